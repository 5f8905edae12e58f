//! Random events: what can happen to the party and how it is chosen.

pub mod director;
pub mod person;
pub mod prefab;
pub mod vehicle;
pub mod warning;
pub mod weather;
pub mod wild;

pub use director::{EventDirector, EventOutcome};
pub use prefab::{DestroyedItems, DestroyerHooks, ItemDestroyer, destroy_items, try_kill_passengers};

use serde::{Deserialize, Serialize};

use crate::entity::EventTarget;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Vehicle,
    Animal,
    Person,
    Warning,
    Weather,
    Wild,
    RiverCross,
}

/// Whether category-based selection may pick an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventExecution {
    Automatic,
    /// Only ever fired by name.
    ManualOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    VehicleFire,
    OxenWander,
    SprainedMuscle,
    DeathPlayer,
    DeathCompanion,
    WellAgain,
    LowFood,
    HeavyFog,
    HailStorm,
    FindFruit,
    FindBerries,
    VehicleFloods,
}

impl EventKind {
    #[must_use]
    pub const fn category(self) -> EventCategory {
        match self {
            Self::VehicleFire => EventCategory::Vehicle,
            Self::OxenWander => EventCategory::Animal,
            Self::SprainedMuscle | Self::DeathPlayer | Self::DeathCompanion | Self::WellAgain => {
                EventCategory::Person
            }
            Self::LowFood => EventCategory::Warning,
            Self::HeavyFog | Self::HailStorm => EventCategory::Weather,
            Self::FindFruit | Self::FindBerries => EventCategory::Wild,
            Self::VehicleFloods => EventCategory::RiverCross,
        }
    }

    #[must_use]
    pub const fn execution(self) -> EventExecution {
        match self {
            Self::DeathPlayer
            | Self::DeathCompanion
            | Self::WellAgain
            | Self::LowFood
            | Self::HailStorm
            | Self::VehicleFloods => EventExecution::ManualOnly,
            Self::VehicleFire
            | Self::OxenWander
            | Self::SprainedMuscle
            | Self::HeavyFog
            | Self::FindFruit
            | Self::FindBerries => EventExecution::Automatic,
        }
    }
}

/// Inputs and scratch output for one event execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    target: EventTarget,
    subject: String,
    lines: Vec<String>,
}

impl EventContext {
    #[must_use]
    pub fn new(target: EventTarget, subject: impl Into<String>) -> Self {
        Self {
            target,
            subject: subject.into(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub const fn target(&self) -> EventTarget {
        self.target
    }

    /// Display name of the target.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Attach a line of narrative produced while executing.
    pub fn note(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// One registered event.
pub trait EventDefinition {
    fn kind(&self) -> EventKind;

    /// Apply the event's effects.
    fn execute(&self, ctx: &mut EventContext, world: &mut World);

    /// Text shown to the player once the event has run.
    fn render(&self, ctx: &EventContext) -> String;
}

/// Every event shipped with the game.
#[must_use]
pub fn default_events() -> Vec<Box<dyn EventDefinition>> {
    vec![
        Box::new(vehicle::VehicleFire),
        Box::new(vehicle::OxenWander),
        Box::new(vehicle::VehicleFloods),
        Box::new(person::SprainedMuscle),
        Box::new(person::DeathPlayer),
        Box::new(person::DeathCompanion),
        Box::new(person::WellAgain),
        Box::new(weather::HeavyFog),
        Box::new(weather::HailStorm),
        Box::new(wild::FindFruit),
        Box::new(wild::FindBerries),
        Box::new(warning::LowFood),
    ]
}
