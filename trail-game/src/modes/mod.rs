//! The concrete game modes and the registry that builds them.

pub mod hunt;
pub mod location;
pub mod new_game;
pub mod random_event;
pub mod river;
pub mod store;
pub mod trade;
pub mod travel;

pub use hunt::HuntMode;
pub use location::{ForkInRoadMode, LandmarkMode, SettlementMode};
pub use new_game::NewGameMode;
pub use random_event::RandomEventMode;
pub use river::RiverCrossingMode;
pub use store::StoreMode;
pub use trade::TradeMode;
pub use travel::TravelMode;

use crate::entity::{HealthLevel, ItemKind};
use crate::mode::{ModeKind, ModeRegistry};
use crate::world::World;

/// Registry with a factory for every mode kind.
#[must_use]
pub fn default_registry() -> ModeRegistry {
    let mut registry = ModeRegistry::new();
    registry.register(ModeKind::NewGame, NewGameMode::create);
    registry.register(ModeKind::Travel, TravelMode::create);
    registry.register(ModeKind::Store, StoreMode::create);
    registry.register(ModeKind::Trade, TradeMode::create);
    registry.register(ModeKind::Hunt, HuntMode::create);
    registry.register(ModeKind::RandomEvent, RandomEventMode::create);
    registry.register(ModeKind::RiverCrossing, RiverCrossingMode::create);
    registry.register(ModeKind::Landmark, LandmarkMode::create);
    registry.register(ModeKind::Settlement, SettlementMode::create);
    registry.register(ModeKind::ForkInRoad, ForkInRoadMode::create);
    registry
}

/// Format cents as dollars, e.g. `$12.50`.
#[must_use]
pub fn money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}${}.{:02}", cents / 100, cents % 100)
}

/// Health band of the party as a whole, from the living members' average.
#[must_use]
pub fn party_health(world: &World) -> HealthLevel {
    let living: Vec<i32> = world
        .vehicle
        .passengers
        .iter()
        .filter(|person| person.is_alive())
        .map(|person| person.health())
        .collect();
    if living.is_empty() {
        return HealthLevel::Dead;
    }
    let count = i32::try_from(living.len()).unwrap_or(i32::MAX);
    HealthLevel::from_health(living.iter().sum::<i32>() / count)
}

/// Date, weather and progress block shown by travel screens.
#[must_use]
pub fn status_report(world: &World) -> String {
    let vehicle = &world.vehicle;
    let next = world
        .trail
        .next_location()
        .map_or_else(|| "none".to_string(), |location| location.name.clone());
    format!(
        "{}\n\
         Weather: {}\n\
         Health: {}\n\
         Pace: {}\n\
         Rations: {}\n\
         --------------------------------\n\
         Food: {} pounds\n\
         Next landmark: {} ({} miles)\n\
         Miles traveled: {} miles",
        world.date(),
        world.climate,
        party_health(world),
        vehicle.pace.label(),
        vehicle.ration.label(),
        vehicle.inventory.quantity(ItemKind::Food),
        next,
        world.distance_to_next(),
        vehicle.odometer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_cents() {
        assert_eq!(money(0), "$0.00");
        assert_eq!(money(1205), "$12.05");
        assert_eq!(money(-250), "-$2.50");
    }

    #[test]
    fn every_mode_kind_is_registered() {
        let registry = default_registry();
        for kind in [
            ModeKind::NewGame,
            ModeKind::Travel,
            ModeKind::Store,
            ModeKind::Trade,
            ModeKind::Hunt,
            ModeKind::RandomEvent,
            ModeKind::RiverCrossing,
            ModeKind::Landmark,
            ModeKind::Settlement,
            ModeKind::ForkInRoad,
        ] {
            assert!(registry.contains(kind), "{kind:?} missing");
        }
    }
}
