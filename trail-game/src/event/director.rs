use std::collections::BTreeMap;

use rand::seq::SliceRandom;

use crate::entity::EventTarget;
use crate::error::{SimResult, SimulationError};
use crate::event::{EventCategory, EventContext, EventDefinition, EventExecution, EventKind, default_events};
use crate::world::World;

/// Text produced by one fired event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub kind: EventKind,
    pub text: String,
}

/// Registry of event definitions keyed by kind.
#[derive(Default)]
pub struct EventDirector {
    events: BTreeMap<EventKind, Box<dyn EventDefinition>>,
}

impl std::fmt::Debug for EventDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDirector")
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EventDirector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_events() -> Self {
        let mut director = Self::new();
        for event in default_events() {
            director.register(event);
        }
        director
    }

    /// Register an event, replacing any previous definition of the same kind.
    pub fn register(&mut self, event: Box<dyn EventDefinition>) {
        self.events.insert(event.kind(), event);
    }

    #[must_use]
    pub fn is_registered(&self, kind: EventKind) -> bool {
        self.events.contains_key(&kind)
    }

    /// Events category selection may choose from, in registry order.
    #[must_use]
    pub fn eligible(&self, category: EventCategory) -> Vec<EventKind> {
        self.events
            .keys()
            .copied()
            .filter(|kind| kind.category() == category && kind.execution() == EventExecution::Automatic)
            .collect()
    }

    /// Fire a uniformly chosen automatic event from `category`.
    ///
    /// Returns `None` when the category has no automatic events or the target
    /// person is already dead.
    pub fn trigger_event_by_type(
        &self,
        world: &mut World,
        target: EventTarget,
        category: EventCategory,
    ) -> Option<EventOutcome> {
        if let EventTarget::Person(index) = target
            && !world
                .vehicle
                .passengers
                .get(index)
                .is_some_and(|person| person.is_alive())
        {
            return None;
        }
        let candidates = self.eligible(category);
        let Some(kind) = candidates.choose(world.rng.events()).copied() else {
            log::debug!("no automatic events in {category:?}");
            return None;
        };
        let event = self.events.get(&kind)?;
        Some(Self::run(event.as_ref(), world, target))
    }

    /// Fire a specific event by kind, regardless of its execution policy.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownEvent`] if the kind was never registered.
    pub fn trigger_event(
        &self,
        world: &mut World,
        target: EventTarget,
        kind: EventKind,
    ) -> SimResult<EventOutcome> {
        let event = self
            .events
            .get(&kind)
            .ok_or(SimulationError::UnknownEvent(kind))?;
        Ok(Self::run(event.as_ref(), world, target))
    }

    fn run(event: &dyn EventDefinition, world: &mut World, target: EventTarget) -> EventOutcome {
        let mut ctx = EventContext::new(target, world.target_name(target));
        event.execute(&mut ctx, world);
        let kind = event.kind();
        log::info!("event {kind:?} fired for {}", ctx.subject());
        EventOutcome {
            kind,
            text: event.render(&ctx),
        }
    }
}
