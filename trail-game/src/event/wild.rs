//! Things found, or found wanting, along the trail.

use crate::entity::ItemKind;
use crate::event::{EventContext, EventDefinition, EventKind};
use crate::world::World;

const FRUIT_FOOD_LBS: i32 = 17;
const BERRIES_FOOD_LBS: i32 = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct FindFruit;

impl EventDefinition for FindFruit {
    fn kind(&self) -> EventKind {
        EventKind::FindFruit
    }

    fn execute(&self, _ctx: &mut EventContext, world: &mut World) {
        world.vehicle.inventory.add(ItemKind::Food, FRUIT_FOOD_LBS);
    }

    fn render(&self, _ctx: &EventContext) -> String {
        format!("You find wild fruit.\nYour food supply grows by {FRUIT_FOOD_LBS} pounds.")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FindBerries;

impl EventDefinition for FindBerries {
    fn kind(&self) -> EventKind {
        EventKind::FindBerries
    }

    fn execute(&self, _ctx: &mut EventContext, world: &mut World) {
        world.vehicle.inventory.add(ItemKind::Food, BERRIES_FOOD_LBS);
    }

    fn render(&self, _ctx: &EventContext) -> String {
        format!("You gather wild berries along the trail.\n{BERRIES_FOOD_LBS} pounds of food added.")
    }
}
