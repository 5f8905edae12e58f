//! Weather events.

use crate::entity::ItemKind;
use crate::event::prefab::NO_LOSS_OF_ITEMS;
use crate::event::{
    DestroyedItems, DestroyerHooks, EventContext, EventDefinition, EventKind, ItemDestroyer,
    try_kill_passengers,
};
use crate::world::World;

/// Sets of clothing each survivor needs to ride out a storm safely.
const CLOTHES_PER_PERSON: i32 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeavyFog;

impl EventDefinition for HeavyFog {
    fn kind(&self) -> EventKind {
        EventKind::HeavyFog
    }

    fn execute(&self, _ctx: &mut EventContext, world: &mut World) {
        let lost = world.config.events.fog_mileage_loss.roll(world.rng.events());
        world.vehicle.reduce_mileage(lost);
    }

    fn render(&self, _ctx: &EventContext) -> String {
        "Heavy fog. Lose time.".to_string()
    }
}

/// Fired by the daily weather roll, never by category selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct HailStorm;

impl DestroyerHooks for HailStorm {
    fn on_pre_destroy(&self) -> String {
        "A severe hail storm results in the loss of:".to_string()
    }

    fn on_post_destroy(&self, destroyed: &DestroyedItems, world: &mut World) -> String {
        if destroyed.is_empty() {
            return NO_LOSS_OF_ITEMS.to_string();
        }
        let survivors = i32::try_from(world.vehicle.living_passengers()).unwrap_or(i32::MAX);
        if world.vehicle.inventory.quantity(ItemKind::Clothes) >= survivors * CLOTHES_PER_PERSON {
            return "Spare clothing kept everyone warm.".to_string();
        }
        try_kill_passengers(world, "caught in the storm")
    }
}

impl EventDefinition for HailStorm {
    fn kind(&self) -> EventKind {
        EventKind::HailStorm
    }

    fn execute(&self, ctx: &mut EventContext, world: &mut World) {
        let lost = world.config.events.hail_mileage_loss.roll(world.rng.events());
        world.vehicle.reduce_mileage(lost);
        ItemDestroyer::run(self, ctx, world);
    }

    fn render(&self, ctx: &EventContext) -> String {
        ctx.lines().join("\n")
    }
}
