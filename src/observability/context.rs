//! Thread-local context tracking for crash reports.
//!
//! Records which pipeline phase is running and with which hyperparameters,
//! so the panic hook can say what flopmap was doing when it crashed. Guards
//! restore the previous context on drop.

use crate::core::Hyperparameters;
use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<RunContext> = const { RefCell::new(RunContext::new()) };
}

/// Context snapshot for the current run.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub phase: Option<RunPhase>,
    pub hyperparameters: Option<Hyperparameters>,
}

impl RunContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            hyperparameters: None,
        }
    }
}

/// Stages of a single `analyze` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Loading `.flopmap.toml` and merging CLI flags
    Configuration,
    /// Evaluating formulas and aggregating the breakdown
    Calculation,
    /// Writing the text report
    Reporting,
    /// Exporting or displaying the pie chart
    Charting,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Calculation => write!(f, "calculation"),
            Self::Reporting => write!(f, "reporting"),
            Self::Charting => write!(f, "charting"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: RunContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current phase until the returned guard drops.
#[must_use]
pub fn set_phase(phase: RunPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

/// Record the hyperparameters being evaluated until the guard drops.
#[must_use]
pub fn set_hyperparameters(params: Hyperparameters) -> ContextGuard {
    update(|ctx| ctx.hyperparameters = Some(params))
}

pub fn get_current_context() -> RunContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn update(f: impl FnOnce(&mut RunContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        f(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}
