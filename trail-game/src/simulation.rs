//! The tick-driven simulation: clock, climate, party, events and the mode stack.

use std::convert::Infallible;

use rand::seq::SliceRandom;

use crate::climate::Condition;
use crate::clock::ClockEvent;
use crate::config::SimulationConfig;
use crate::entity::{EventTarget, ItemKind};
use crate::error::SimResult;
use crate::event::{EventCategory, EventDirector, EventKind, EventOutcome};
use crate::mode::{ModeKind, ModeRegistry, ModeStack};
use crate::modes::default_registry;
use crate::rng::check_percent;
use crate::trail::Trail;
use crate::world::{Directive, Ending, Milestone, World};

/// Categories the daily random roll may pick from.
const DAILY_CATEGORIES: [EventCategory; 4] = [
    EventCategory::Vehicle,
    EventCategory::Animal,
    EventCategory::Weather,
    EventCategory::Wild,
];

/// Persists milestones such as deaths and arrivals.
/// Hosts provide this; the simulation never does I/O itself.
pub trait MilestoneRecorder {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Record one milestone.
    ///
    /// # Errors
    ///
    /// Returns an error if the milestone cannot be stored.
    fn record_milestone(&mut self, milestone: &Milestone) -> Result<(), Self::Error>;
}

/// Recorder that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecorder;

impl MilestoneRecorder for NullRecorder {
    type Error = Infallible;

    fn record_milestone(&mut self, _milestone: &Milestone) -> Result<(), Infallible> {
        Ok(())
    }
}

/// One running game.
pub struct Simulation<R: MilestoneRecorder = NullRecorder> {
    world: World,
    director: EventDirector,
    modes: ModeStack,
    recorder: R,
    last_frame: Option<String>,
    destroyed: bool,
    ticks: u64,
}

impl Simulation<NullRecorder> {
    /// Start a new game at the party creation screen.
    ///
    /// # Errors
    ///
    /// Fails if the first mode cannot be pushed.
    pub fn new(config: SimulationConfig, trail: Trail, seed: u64) -> SimResult<Self> {
        Self::with_recorder(config, trail, seed, NullRecorder)
    }
}

impl<R: MilestoneRecorder> Simulation<R> {
    /// Start a new game that reports milestones to `recorder`.
    ///
    /// # Errors
    ///
    /// Fails if the first mode cannot be pushed.
    pub fn with_recorder(
        config: SimulationConfig,
        trail: Trail,
        seed: u64,
        recorder: R,
    ) -> SimResult<Self> {
        let mut simulation = Self::with_parts(
            World::new(config, trail, seed),
            EventDirector::with_default_events(),
            default_registry(),
            recorder,
        );
        simulation.push_mode(ModeKind::NewGame)?;
        Ok(simulation)
    }

    /// Assemble a simulation from parts without pushing any mode.
    #[must_use]
    pub fn with_parts(
        world: World,
        director: EventDirector,
        registry: ModeRegistry,
        recorder: R,
    ) -> Self {
        log::debug!("simulation created with seed {}", world.rng.seed());
        Self {
            world,
            director,
            modes: ModeStack::new(registry),
            recorder,
            last_frame: None,
            destroyed: false,
            ticks: 0,
        }
    }

    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    pub const fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub const fn modes(&self) -> &ModeStack {
        &self.modes
    }

    #[must_use]
    pub const fn director(&self) -> &EventDirector {
        &self.director
    }

    #[must_use]
    pub const fn recorder(&self) -> &R {
        &self.recorder
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn accepts_input(&self) -> bool {
        !self.destroyed && self.modes.accepts_input()
    }

    /// The current screen text.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        if self.destroyed {
            return None;
        }
        self.modes.render(&self.world)
    }

    /// Push a mode and apply whatever it asked for while being created.
    ///
    /// # Errors
    ///
    /// Propagates stack and lifecycle failures.
    pub fn push_mode(&mut self, kind: ModeKind) -> SimResult<()> {
        self.modes.push(kind, &mut self.world)?;
        self.drain_directives()
    }

    /// Advance one step. Returns the new screen text when it changed.
    ///
    /// Ticking a destroyed simulation does nothing.
    ///
    /// # Errors
    ///
    /// Propagates contract violations from modes and events.
    pub fn tick(&mut self) -> SimResult<Option<String>> {
        if self.destroyed {
            return Ok(None);
        }
        self.ticks += 1;

        self.modes.tick(&mut self.world)?;
        self.drain_directives()?;
        if self.destroyed {
            return Ok(None);
        }

        let passing = self.modes.passes_time();
        if passing {
            let pace = self.world.vehicle.pace;
            self.world.clock.set_pace(pace);
        }
        for event in self.world.clock.tick(passing) {
            self.on_clock_event(event);
        }
        self.drain_directives()?;
        if self.destroyed {
            return Ok(None);
        }

        let frame = self.render();
        if frame == self.last_frame {
            return Ok(None);
        }
        self.last_frame.clone_from(&frame);
        Ok(frame)
    }

    /// Deliver one line of player input to the top mode.
    ///
    /// # Errors
    ///
    /// Propagates contract violations from the mode.
    pub fn send_input_line(&mut self, line: &str) -> SimResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.modes.send_input(line, &mut self.world)?;
        self.drain_directives()
    }

    /// Tear the game down. Later ticks and input are ignored.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        log::info!("simulation destroyed after {} ticks", self.ticks);
        self.destroyed = true;
        self.modes.clear();
        self.last_frame = None;
    }

    fn on_clock_event(&mut self, event: ClockEvent) {
        match event {
            ClockEvent::DayEnd { days } => {
                log::info!("day {days} ended ({})", self.world.date());
                self.on_day_end();
            }
            ClockEvent::MonthEnd { months } => log::info!("month {months} ended"),
            ClockEvent::YearEnd { years } => log::info!("year {years} ended"),
            ClockEvent::PaceChanged { from, to } => {
                log::info!("pace changed from {} to {}", from.label(), to.label());
            }
        }
    }

    fn on_day_end(&mut self) {
        let world = &mut self.world;
        let month = world.date().month;
        let condition = world.climate.tick(month, &world.config.climate, world.rng.climate());
        let moving = world.vehicle.status.is_moving();
        match condition {
            Condition::Hail => world.send(Directive::TriggerEvent {
                target: EventTarget::Vehicle,
                kind: EventKind::HailStorm,
            }),
            Condition::Fog if moving => world.send(Directive::TriggerCategory {
                target: EventTarget::Vehicle,
                category: EventCategory::Weather,
            }),
            _ => {}
        }

        let food_before = world.vehicle.inventory.quantity(ItemKind::Food);
        let mut outbox = std::mem::take(world.outbox_mut());
        {
            let World {
                config,
                vehicle,
                rng,
                ..
            } = &mut *world;
            vehicle.tick_passengers(config, rng.health(), &mut outbox);
        }
        world.outbox_mut().append(&mut outbox);

        let miles_per_day = world.miles_per_day();
        let moved = world.vehicle.on_day_tick(miles_per_day);
        if moved > 0 {
            log::debug!("wagon covered {moved} miles");
        }

        let threshold = world.config.food.low_food_threshold;
        let food_after = world.vehicle.inventory.quantity(ItemKind::Food);
        if food_before >= threshold && food_after < threshold {
            world.send(Directive::TriggerEvent {
                target: EventTarget::Vehicle,
                kind: EventKind::LowFood,
            });
        }

        if moving
            && check_percent(world.rng.events(), world.config.events.daily_pct)
            && let Some(category) = DAILY_CATEGORIES.choose(world.rng.events()).copied()
        {
            world.send(Directive::TriggerCategory {
                target: EventTarget::Vehicle,
                category,
            });
        }

        self.check_arrival();
    }

    fn check_arrival(&mut self) {
        let world = &mut self.world;
        let odometer = world.vehicle.odometer;
        let Some(location) = world.trail.check_arrival(odometer) else {
            return;
        };
        let name = location.name.clone();
        let mode = location.kind.mode();
        world.vehicle.stop();
        log::info!("arrived at {name} (mile {odometer})");

        if !world.trail.is_last_location() {
            world.send(Directive::PushMode(mode));
            return;
        }

        let leader = world
            .vehicle
            .leader()
            .map(|person| person.name().to_string())
            .unwrap_or_default();
        let survivors = world.vehicle.living_passengers();
        let date = world.date().to_string();
        world.send(Directive::RecordMilestone(Milestone::ReachedDestination {
            leader,
            date: date.clone(),
            survivors,
            cash_cents: world.vehicle.balance_cents,
        }));
        world.send(Directive::Notify(format!(
            "Congratulations! You have made it to {name} on {date} with {survivors} of your party alive."
        )));
        world.send(Directive::EndGame(Ending::ReachedDestination));
    }

    /// Apply every queued directive, including ones queued while applying.
    fn drain_directives(&mut self) -> SimResult<()> {
        while let Some(directive) = self.world.next_directive() {
            if self.destroyed {
                log::debug!("dropping {directive:?} after destroy");
                continue;
            }
            self.apply(directive)?;
        }
        Ok(())
    }

    fn apply(&mut self, directive: Directive) -> SimResult<()> {
        match directive {
            Directive::PushMode(kind) => {
                self.modes.push(kind, &mut self.world)?;
            }
            Directive::RemoveMode(kind) => self.modes.pop_next_tick(kind),
            Directive::TriggerEvent { target, kind } => {
                let outcome = self.director.trigger_event(&mut self.world, target, kind)?;
                self.show_event(outcome)?;
            }
            Directive::TriggerCategory { target, category } => {
                if let Some(outcome) =
                    self.director
                        .trigger_event_by_type(&mut self.world, target, category)
                {
                    self.show_event(outcome)?;
                }
            }
            Directive::Notify(text) => self.show_notice(text)?,
            Directive::RecordMilestone(milestone) => {
                log::info!("milestone: {milestone:?}");
                if let Err(err) = self.recorder.record_milestone(&milestone) {
                    log::warn!("failed to record milestone: {err}");
                }
            }
            Directive::EndGame(ending) => {
                log::info!("game ended: {ending:?}");
                self.world.ending = Some(ending);
            }
            Directive::Shutdown => self.destroy(),
        }
        Ok(())
    }

    fn show_event(&mut self, outcome: EventOutcome) -> SimResult<()> {
        log::debug!("showing {:?}", outcome.kind);
        self.show_notice(outcome.text)
    }

    fn show_notice(&mut self, text: String) -> SimResult<()> {
        self.world.push_notice(text);
        self.modes.push(ModeKind::RandomEvent, &mut self.world)?;
        Ok(())
    }
}
