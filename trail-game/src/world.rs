//! Shared simulation state and the directive queue modes and events write to.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::climate::Climate;
use crate::clock::{Calendar, SimulationClock};
use crate::config::SimulationConfig;
use crate::entity::{EventTarget, Vehicle};
use crate::event::{EventCategory, EventKind};
use crate::mode::ModeKind;
use crate::rng::RngBundle;
use crate::trail::Trail;

/// A notable moment worth persisting to the score book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "milestone", rename_all = "snake_case")]
pub enum Milestone {
    LeaderDied {
        leader: String,
        date: String,
        miles: u32,
    },
    ReachedDestination {
        leader: String,
        date: String,
        survivors: usize,
        cash_cents: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    LeaderDied,
    ReachedDestination,
}

/// A request emitted during a tick and applied by the simulation once the
/// emitting call has returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    PushMode(ModeKind),
    /// Removed at the start of the next tick.
    RemoveMode(ModeKind),
    TriggerEvent {
        target: EventTarget,
        kind: EventKind,
    },
    TriggerCategory {
        target: EventTarget,
        category: EventCategory,
    },
    /// Queue narrative text for the random event screen.
    Notify(String),
    RecordMilestone(Milestone),
    EndGame(Ending),
    /// Tear the simulation down after the final screen was acknowledged.
    Shutdown,
}

/// Everything modes, states and events may read or mutate.
#[derive(Debug, Clone)]
pub struct World {
    pub config: SimulationConfig,
    pub clock: SimulationClock,
    pub climate: Climate,
    pub vehicle: Vehicle,
    pub trail: Trail,
    pub rng: RngBundle,
    pub ending: Option<Ending>,
    outbox: VecDeque<Directive>,
    notices: VecDeque<String>,
}

impl World {
    #[must_use]
    pub fn new(config: SimulationConfig, trail: Trail, seed: u64) -> Self {
        let clock = SimulationClock::new(&config.clock);
        Self {
            config,
            clock,
            climate: Climate::default(),
            vehicle: Vehicle::default(),
            trail,
            rng: RngBundle::from_user_seed(seed),
            ending: None,
            outbox: VecDeque::new(),
            notices: VecDeque::new(),
        }
    }

    #[must_use]
    pub const fn date(&self) -> Calendar {
        self.clock.calendar()
    }

    pub fn send(&mut self, directive: Directive) {
        self.outbox.push_back(directive);
    }

    pub(crate) fn next_directive(&mut self) -> Option<Directive> {
        self.outbox.pop_front()
    }

    pub(crate) const fn outbox_mut(&mut self) -> &mut VecDeque<Directive> {
        &mut self.outbox
    }

    #[must_use]
    pub fn pending_directives(&self) -> usize {
        self.outbox.len()
    }

    pub(crate) fn push_notice(&mut self, text: String) {
        self.notices.push_back(text);
    }

    /// Next queued event text, oldest first.
    pub fn next_notice(&mut self) -> Option<String> {
        self.notices.pop_front()
    }

    /// Display name for an event target.
    #[must_use]
    pub fn target_name(&self, target: EventTarget) -> String {
        match target {
            EventTarget::Vehicle => "the wagon".to_string(),
            EventTarget::Person(index) => self
                .vehicle
                .passengers
                .get(index)
                .map_or_else(|| "someone".to_string(), |person| person.name().to_string()),
        }
    }

    /// Miles left between the wagon and the next location.
    #[must_use]
    pub fn distance_to_next(&self) -> u32 {
        self.trail.distance_to_next(self.vehicle.odometer)
    }

    #[must_use]
    pub fn miles_per_day(&self) -> u32 {
        self.config.pace.miles_per_day(self.vehicle.pace)
    }
}
