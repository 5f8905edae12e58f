//! Trail Game Engine
//!
//! Platform-agnostic core of a text-mode wagon trail simulation. A
//! [`Simulation`] owns the shared [`World`], an [`EventDirector`] that fires
//! categorized random events, and a [`ModeStack`] of menu-driven screens. Hosts
//! tick it at a steady cadence and feed it lines of input; this crate performs
//! no I/O of its own.

pub mod climate;
pub mod clock;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod event;
pub mod mode;
pub mod modes;
pub mod rng;
pub mod simulation;
pub mod trail;
pub mod world;

// Re-export commonly used types
pub use climate::{Climate, Condition};
pub use clock::{Calendar, ClockEvent, Month, SimulationClock};
pub use config::{Range, SimulationConfig};
pub use entity::{
    EventTarget, HealthLevel, Inventory, ItemKind, Person, Profession, RationLevel, TravelPace,
    Vehicle, VehicleStatus,
};
pub use error::{ConfigError, SimResult, SimulationError};
pub use event::{EventCategory, EventDirector, EventKind, EventOutcome};
pub use mode::{GameMode, ModeKind, ModeStack, StateId};
pub use rng::RngBundle;
pub use simulation::{MilestoneRecorder, NullRecorder, Simulation};
pub use trail::{Location, LocationKind, Trail};
pub use world::{Directive, Ending, Milestone, World};
