//! The wagon: inventory, pace, rations and the passengers it carries.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::entity::person::{Person, PersonTick};
use crate::world::Directive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Oxen pulling the wagon.
    Animal,
    Food,
    Clothes,
    Ammo,
    Wheel,
    Axle,
    Tongue,
    Cash,
}

impl ItemKind {
    /// Goods that can change hands at stores and trading posts.
    pub const STORE_GOODS: [Self; 7] = [
        Self::Animal,
        Self::Food,
        Self::Clothes,
        Self::Ammo,
        Self::Wheel,
        Self::Axle,
        Self::Tongue,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Animal => "oxen",
            Self::Food => "food",
            Self::Clothes => "clothing",
            Self::Ammo => "ammunition",
            Self::Wheel => "wagon wheels",
            Self::Axle => "wagon axles",
            Self::Tongue => "wagon tongues",
            Self::Cash => "cash",
        }
    }

    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Animal => "ox",
            Self::Food => "pound",
            Self::Clothes => "set",
            Self::Ammo => "bullet",
            Self::Wheel | Self::Axle | Self::Tongue => "part",
            Self::Cash => "cent",
        }
    }

    /// Cash can be spent but never burned, drowned or hailed upon.
    #[must_use]
    pub const fn is_destructible(self) -> bool {
        !matches!(self, Self::Cash)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quantity and per-unit value of one stocked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimItem {
    pub quantity: i32,
    pub unit_value_cents: i64,
}

impl SimItem {
    #[must_use]
    pub const fn total_value_cents(&self) -> i64 {
        self.quantity as i64 * self.unit_value_cents
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<ItemKind, SimItem>,
}

impl Inventory {
    #[must_use]
    pub fn quantity(&self, kind: ItemKind) -> i32 {
        self.items.get(&kind).map_or(0, |item| item.quantity)
    }

    #[must_use]
    pub fn get(&self, kind: ItemKind) -> Option<&SimItem> {
        self.items.get(&kind)
    }

    /// Overwrite the stocked quantity, never below zero.
    pub fn set_quantity(&mut self, kind: ItemKind, quantity: i32) {
        self.items.entry(kind).or_default().quantity = quantity.max(0);
    }

    pub fn add(&mut self, kind: ItemKind, amount: i32) {
        let current = self.quantity(kind);
        self.set_quantity(kind, current.saturating_add(amount));
    }

    /// Record what one unit was paid for, e.g. after a purchase.
    pub fn set_unit_value(&mut self, kind: ItemKind, cents: i64) {
        self.items.entry(kind).or_default().unit_value_cents = cents;
    }

    /// Remove up to `amount`, returning how much was actually taken.
    pub fn remove(&mut self, kind: ItemKind, amount: i32) -> i32 {
        let current = self.quantity(kind);
        let taken = amount.clamp(0, current);
        self.set_quantity(kind, current - taken);
        taken
    }

    /// Items with a positive stock, in a stable order.
    pub fn stocked(&self) -> impl Iterator<Item = (ItemKind, &SimItem)> {
        self.items
            .iter()
            .filter(|(_, item)| item.quantity > 0)
            .map(|(kind, item)| (*kind, item))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelPace {
    Paused,
    #[default]
    Steady,
    Strenuous,
    Grueling,
}

impl TravelPace {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paused => "paused",
            Self::Steady => "steady",
            Self::Strenuous => "strenuous",
            Self::Grueling => "grueling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RationLevel {
    BareBones,
    Meager,
    #[default]
    Filling,
}

impl RationLevel {
    /// Multiplier used by food consumption and illness odds.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::BareBones => 1,
            Self::Meager => 2,
            Self::Filling => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BareBones => "bare bones",
            Self::Meager => "meager",
            Self::Filling => "filling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[default]
    Stopped,
    Moving,
    Resting,
}

impl VehicleStatus {
    #[must_use]
    pub const fn is_moving(self) -> bool {
        matches!(self, Self::Moving)
    }
}

/// Subtract from a mileage budget, flooring at zero.
pub fn reduce_mileage(mileage: &mut i32, amount: i32) {
    *mileage = mileage.saturating_sub(amount.max(0)).max(0);
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vehicle {
    pub passengers: Vec<Person>,
    pub inventory: Inventory,
    pub pace: TravelPace,
    pub ration: RationLevel,
    pub balance_cents: i64,
    /// Miles the wagon can still cover today.
    pub mileage: i32,
    /// Miles travelled since leaving the first location.
    pub odometer: u32,
    pub status: VehicleStatus,
}

impl Vehicle {
    /// Replace the party, keeping the leader first.
    pub fn reset_passengers(&mut self, mut passengers: Vec<Person>) {
        passengers.sort_by_key(|person| !person.is_leader());
        self.passengers = passengers;
    }

    #[must_use]
    pub fn leader(&self) -> Option<&Person> {
        self.passengers.iter().find(|person| person.is_leader())
    }

    #[must_use]
    pub fn living_passengers(&self) -> usize {
        self.passengers.iter().filter(|person| person.is_alive()).count()
    }

    pub fn reduce_mileage(&mut self, amount: i32) {
        reduce_mileage(&mut self.mileage, amount);
    }

    /// Start rolling with today's full mileage budget.
    pub fn start_moving(&mut self, miles_per_day: u32) {
        self.status = VehicleStatus::Moving;
        self.mileage = i32::try_from(miles_per_day).unwrap_or(i32::MAX);
    }

    pub const fn stop(&mut self) {
        self.status = VehicleStatus::Stopped;
    }

    pub const fn rest(&mut self) {
        self.status = VehicleStatus::Resting;
    }

    /// Run every living passenger's daily upkeep.
    pub fn tick_passengers<R: Rng + ?Sized>(
        &mut self,
        cfg: &SimulationConfig,
        rng: &mut R,
        outbox: &mut VecDeque<Directive>,
    ) {
        let Self {
            passengers,
            inventory,
            mileage,
            status,
            ration,
            ..
        } = self;
        let passenger_count = passengers.len();
        for (index, person) in passengers.iter_mut().enumerate() {
            if !person.is_alive() {
                continue;
            }
            let mut env = PersonTick {
                index,
                inventory: &mut *inventory,
                mileage: &mut *mileage,
                status: *status,
                ration: *ration,
                passenger_count,
                cfg,
                rng: &mut *rng,
                outbox: &mut *outbox,
            };
            person.on_day_tick(&mut env);
        }
    }

    /// Close out the day: bank today's mileage on the odometer and refill the
    /// budget for tomorrow. Returns the miles covered.
    pub fn on_day_tick(&mut self, miles_per_day: u32) -> u32 {
        let moved = if self.status.is_moving() {
            u32::try_from(self.mileage.max(0)).unwrap_or_default()
        } else {
            0
        };
        self.odometer = self.odometer.saturating_add(moved);
        self.mileage = i32::try_from(miles_per_day).unwrap_or(i32::MAX);
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Profession;

    #[test]
    fn mileage_never_goes_negative() {
        let mut vehicle = Vehicle::default();
        vehicle.start_moving(12);
        vehicle.reduce_mileage(5);
        assert_eq!(vehicle.mileage, 7);
        vehicle.reduce_mileage(50);
        assert_eq!(vehicle.mileage, 0);
        vehicle.reduce_mileage(-10);
        assert_eq!(vehicle.mileage, 0);
    }

    #[test]
    fn day_tick_only_moves_a_rolling_wagon() {
        let mut vehicle = Vehicle::default();
        assert_eq!(vehicle.on_day_tick(12), 0);
        assert_eq!(vehicle.odometer, 0);

        vehicle.start_moving(16);
        vehicle.reduce_mileage(4);
        assert_eq!(vehicle.on_day_tick(16), 12);
        assert_eq!(vehicle.odometer, 12);
        assert_eq!(vehicle.mileage, 16);
    }

    #[test]
    fn inventory_removal_is_bounded_by_stock() {
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Ammo, 30);
        assert_eq!(inventory.remove(ItemKind::Ammo, 50), 30);
        assert_eq!(inventory.quantity(ItemKind::Ammo), 0);
        assert_eq!(inventory.stocked().count(), 0);
        assert_eq!(inventory.remove(ItemKind::Food, 5), 0);
    }

    #[test]
    fn leader_is_kept_first() {
        let mut vehicle = Vehicle::default();
        vehicle.reset_passengers(vec![
            Person::new("Mary", Profession::Farmer, false),
            Person::new("Ezra", Profession::Farmer, true),
        ]);
        assert_eq!(vehicle.passengers[0].name(), "Ezra");
        assert_eq!(vehicle.leader().map(Person::name), Some("Ezra"));
        assert_eq!(vehicle.living_passengers(), 2);
    }
}
