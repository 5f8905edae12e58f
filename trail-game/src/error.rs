//! Error types surfaced by the simulation core.

use thiserror::Error;

use crate::event::EventKind;
use crate::mode::ModeKind;

/// Failures raised while loading tuning data or trail descriptions.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be at least {min} (got {value})")]
    BelowMinimum {
        field: &'static str,
        min: i64,
        value: i64,
    },
    #[error("{field} must be at most {max} (got {value})")]
    AboveMaximum {
        field: &'static str,
        max: i64,
        value: i64,
    },
    #[error("{field} range is inverted ({min} > {max})")]
    InvertedRange {
        field: &'static str,
        min: i32,
        max: i32,
    },
    #[error("missing {table} entry for {key}")]
    MissingEntry { table: &'static str, key: String },
    #[error("trail needs at least two locations (got {0})")]
    TrailTooShort(usize),
    #[error("trail mile markers must increase at location `{0}`")]
    TrailOutOfOrder(String),
    #[error("fork `{0}` must offer at least one branch")]
    EmptyFork(String),
}

/// Failures raised by the mode stack, the event director or the simulation loop.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A lifecycle hook the mode is required to provide was left at its default.
    #[error("mode {mode:?} does not implement the `{hook}` hook")]
    HookNotImplemented { mode: ModeKind, hook: &'static str },
    #[error("no factory registered for mode {0:?}")]
    UnknownModeKind(ModeKind),
    #[error("no event registered for {0:?}")]
    UnknownEvent(EventKind),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type SimResult<T> = Result<T, SimulationError>;
