//! Simulation entities: the party members and the wagon that carries them.

pub mod person;
pub mod vehicle;

pub use person::{HealthLevel, Person, PersonTick, Profession};
pub use vehicle::{
    Inventory, ItemKind, RationLevel, SimItem, TravelPace, Vehicle, VehicleStatus, reduce_mileage,
};

use serde::{Deserialize, Serialize};

/// Entity an event acts upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTarget {
    Vehicle,
    /// Index into the vehicle's passenger list.
    Person(usize),
}
