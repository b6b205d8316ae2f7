//! Observability: logging setup, crash-report context and the panic hook.
//!
//! Install both at startup:
//!
//! ```ignore
//! use flopmap::observability::{init_logging, install_panic_hook};
//!
//! fn main() {
//!     init_logging(0);
//!     install_panic_hook();
//!     // ... rest of application
//! }
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, set_hyperparameters, set_phase, ContextGuard, RunContext, RunPhase,
};
pub use panic_hook::install_panic_hook;

use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

static TUI_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Mark whether the interactive chart view owns the terminal.
pub fn set_tui_active(active: bool) {
    TUI_ACTIVE.store(active, Ordering::SeqCst);
}

pub fn is_tui_active() -> bool {
    TUI_ACTIVE.load(Ordering::SeqCst)
}

/// Default filter directive for a `-v` count.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "flopmap=warn",
        1 => "flopmap=info",
        2 => "flopmap=debug",
        _ => "flopmap=trace",
    }
}

/// Initialize the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity level. Calling this more
/// than once is harmless.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
