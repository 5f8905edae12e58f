//! Events about a single party member.

use crate::entity::EventTarget;
use crate::event::{EventContext, EventDefinition, EventKind};
use crate::world::{Directive, Ending, Milestone, World};

fn person_index(ctx: &EventContext, world: &World) -> Option<usize> {
    match ctx.target() {
        EventTarget::Person(index) => Some(index),
        EventTarget::Vehicle => world
            .vehicle
            .passengers
            .iter()
            .position(|person| person.is_alive()),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SprainedMuscle;

impl EventDefinition for SprainedMuscle {
    fn kind(&self) -> EventKind {
        EventKind::SprainedMuscle
    }

    fn execute(&self, ctx: &mut EventContext, world: &mut World) {
        let damage = world.config.events.sprain_damage;
        let Some(index) = person_index(ctx, world) else {
            return;
        };
        let Some(person) = world.vehicle.passengers.get_mut(index) else {
            return;
        };
        let fatal = person.wound(damage);
        ctx.note(format!("{} has sprained a muscle.", person.name()));
        if let Some(kind) = fatal {
            world.send(Directive::TriggerEvent {
                target: EventTarget::Person(index),
                kind,
            });
        }
    }

    fn render(&self, ctx: &EventContext) -> String {
        ctx.lines().join("\n")
    }
}

/// The leader is gone and the journey ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeathPlayer;

impl EventDefinition for DeathPlayer {
    fn kind(&self) -> EventKind {
        EventKind::DeathPlayer
    }

    fn execute(&self, ctx: &mut EventContext, world: &mut World) {
        if let Some(person) =
            person_index(ctx, world).and_then(|index| world.vehicle.passengers.get_mut(index))
        {
            person.kill();
        }
        let milestone = Milestone::LeaderDied {
            leader: ctx.subject().to_string(),
            date: world.date().to_string(),
            miles: world.vehicle.odometer,
        };
        world.send(Directive::RecordMilestone(milestone));
        world.send(Directive::EndGame(Ending::LeaderDied));
    }

    fn render(&self, ctx: &EventContext) -> String {
        format!(
            "{} has died.\nWithout its leader the party cannot go on.",
            ctx.subject()
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeathCompanion;

impl EventDefinition for DeathCompanion {
    fn kind(&self) -> EventKind {
        EventKind::DeathCompanion
    }

    fn execute(&self, _ctx: &mut EventContext, world: &mut World) {
        log::info!(
            "{} of {} passengers still alive",
            world.vehicle.living_passengers(),
            world.vehicle.passengers.len()
        );
    }

    fn render(&self, ctx: &EventContext) -> String {
        format!("{} has died.", ctx.subject())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WellAgain;

impl EventDefinition for WellAgain {
    fn kind(&self) -> EventKind {
        EventKind::WellAgain
    }

    fn execute(&self, _ctx: &mut EventContext, _world: &mut World) {}

    fn render(&self, ctx: &EventContext) -> String {
        format!("{} is well again.", ctx.subject())
    }
}
