//! Events that strike the wagon or its team.

use crate::entity::ItemKind;
use crate::event::prefab::NO_LOSS_OF_ITEMS;
use crate::event::{
    DestroyedItems, DestroyerHooks, EventContext, EventDefinition, EventKind, ItemDestroyer,
    try_kill_passengers,
};
use crate::world::World;

#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleFire;

impl DestroyerHooks for VehicleFire {
    fn on_pre_destroy(&self) -> String {
        "Fire in the wagon results in the loss of:".to_string()
    }

    fn on_post_destroy(&self, destroyed: &DestroyedItems, world: &mut World) -> String {
        if destroyed.is_empty() {
            return NO_LOSS_OF_ITEMS.to_string();
        }
        try_kill_passengers(world, "burned")
    }
}

impl EventDefinition for VehicleFire {
    fn kind(&self) -> EventKind {
        EventKind::VehicleFire
    }

    fn execute(&self, ctx: &mut EventContext, world: &mut World) {
        ItemDestroyer::run(self, ctx, world);
    }

    fn render(&self, ctx: &EventContext) -> String {
        ctx.lines().join("\n")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleFloods;

impl DestroyerHooks for VehicleFloods {
    fn on_pre_destroy(&self) -> String {
        "The wagon floods while crossing the river, losing:".to_string()
    }

    fn on_post_destroy(&self, destroyed: &DestroyedItems, world: &mut World) -> String {
        if destroyed.is_empty() {
            return NO_LOSS_OF_ITEMS.to_string();
        }
        try_kill_passengers(world, "drowned")
    }
}

impl EventDefinition for VehicleFloods {
    fn kind(&self) -> EventKind {
        EventKind::VehicleFloods
    }

    fn execute(&self, ctx: &mut EventContext, world: &mut World) {
        let lost = world.config.events.flood_mileage_loss.roll(world.rng.events());
        world.vehicle.reduce_mileage(lost);
        ItemDestroyer::run(self, ctx, world);
    }

    fn render(&self, ctx: &EventContext) -> String {
        ctx.lines().join("\n")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OxenWander;

impl EventDefinition for OxenWander {
    fn kind(&self) -> EventKind {
        EventKind::OxenWander
    }

    fn execute(&self, ctx: &mut EventContext, world: &mut World) {
        let lost = world.config.events.wander_mileage_loss.roll(world.rng.events());
        world.vehicle.reduce_mileage(lost);
        if world.vehicle.inventory.remove(ItemKind::Animal, 1) > 0 {
            ctx.note("One of your oxen wandered off and could not be found.");
        } else {
            ctx.note("You lose time searching for stray cattle.");
        }
    }

    fn render(&self, ctx: &EventContext) -> String {
        ctx.lines().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::entity::EventTarget;
    use crate::trail::Trail;

    #[test]
    fn stray_ox_is_removed() {
        let mut world = World::new(SimulationConfig::load_from_static(), Trail::load_from_static(), 5);
        world.vehicle.inventory.add(ItemKind::Animal, 2);
        world.vehicle.start_moving(12);

        let mut ctx = EventContext::new(EventTarget::Vehicle, "the wagon");
        OxenWander.execute(&mut ctx, &mut world);

        assert_eq!(world.vehicle.inventory.quantity(ItemKind::Animal), 1);
        assert!(world.vehicle.mileage < 12);
        assert!(OxenWander.render(&ctx).contains("wandered off"));
    }

    #[test]
    fn fire_without_cargo_reports_no_loss() {
        let mut world = World::new(SimulationConfig::load_from_static(), Trail::load_from_static(), 5);
        let mut ctx = EventContext::new(EventTarget::Vehicle, "the wagon");
        VehicleFire.execute(&mut ctx, &mut world);
        assert!(VehicleFire.render(&ctx).ends_with(NO_LOSS_OF_ITEMS));
    }
}
