//! Warnings about the state of the party's supplies.

use crate::entity::ItemKind;
use crate::event::{EventContext, EventDefinition, EventKind};
use crate::world::World;

/// Raised once when the food stock dips under the warning threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowFood;

impl EventDefinition for LowFood {
    fn kind(&self) -> EventKind {
        EventKind::LowFood
    }

    fn execute(&self, ctx: &mut EventContext, world: &mut World) {
        ctx.note(format!(
            "Only {} pounds of food remain.",
            world.vehicle.inventory.quantity(ItemKind::Food)
        ));
    }

    fn render(&self, ctx: &EventContext) -> String {
        let mut text = "You are running low on food.".to_string();
        for line in ctx.lines() {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::entity::EventTarget;
    use crate::trail::Trail;

    #[test]
    fn low_food_reports_the_remaining_stock() {
        let mut world = World::new(SimulationConfig::load_from_static(), Trail::load_from_static(), 4);
        world.vehicle.inventory.add(ItemKind::Food, 42);
        let mut ctx = EventContext::new(EventTarget::Vehicle, "the wagon");
        LowFood.execute(&mut ctx, &mut world);
        assert_eq!(
            LowFood.render(&ctx),
            "You are running low on food.\nOnly 42 pounds of food remain."
        );
    }
}
