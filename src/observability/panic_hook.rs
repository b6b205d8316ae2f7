//! Custom panic hook for structured crash reports.
//!
//! Leaves the interactive chart view (alternate screen, raw mode) before
//! printing, so the report is visible.

use super::context::{get_current_context, RunContext};
use super::{is_tui_active, set_tui_active};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 78;

/// Install the custom panic hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    exit_tui_mode();

    let context = get_current_context();
    eprintln!();
    for line in crash_report_lines(&extract_panic_message(info), location(info), &context) {
        eprintln!("{line}");
    }
    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    }
}

fn exit_tui_mode() {
    if !is_tui_active() {
        return;
    }
    set_tui_active(false);

    // Ignore errors - we're already panicking
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
}

fn location(info: &PanicHookInfo<'_>) -> Option<String> {
    info.location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
}

fn crash_report_lines(message: &str, location: Option<String>, context: &RunContext) -> Vec<String> {
    let rule = "═".repeat(WIDTH);
    let mut lines = vec![
        format!("╔{rule}╗"),
        boxed("FLOPMAP CRASH REPORT"),
        format!("╠{rule}╣"),
        boxed(&format!("Version: {VERSION}")),
        boxed(&format!("Platform: {}", std::env::consts::OS)),
        format!("╠{rule}╣"),
        boxed(&format!("PANIC: {message}")),
    ];

    if let Some(loc) = location {
        lines.push(boxed(&format!("Location: {loc}")));
    }

    lines.push(format!("╠{rule}╣"));
    match context.phase {
        Some(phase) => lines.push(boxed(&format!("Phase: {phase}"))),
        None => lines.push(boxed("Phase: (not set)")),
    }
    if let Some(params) = context.hyperparameters {
        lines.push(boxed(&format!("Hyperparameters: {params}")));
    }
    if std::env::var("RUST_BACKTRACE").is_err() {
        lines.push(boxed("Run with RUST_BACKTRACE=1 for stack trace"));
    }
    lines.push(format!("╚{rule}╝"));
    lines
}

fn boxed(text: &str) -> String {
    let inner = WIDTH - 2;
    format!("║  {:<inner$}║", truncate(text, inner))
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
