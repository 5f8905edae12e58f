//! Party members and their daily upkeep.

use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{AfflictionCfg, Range, SimulationConfig};
use crate::constants::{
    HEALTH_DEAD, HEALTH_FAIR_FLOOR, HEALTH_GOOD_FLOOR, HEALTH_MAX, HEALTH_POOR_FLOOR,
    HEALTH_VERY_POOR_FLOOR,
};
use crate::entity::vehicle::{Inventory, ItemKind, RationLevel, VehicleStatus, reduce_mileage};
use crate::entity::EventTarget;
use crate::event::{EventCategory, EventKind};
use crate::rng::check_percent;
use crate::world::Directive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    Banker,
    Carpenter,
    Farmer,
}

impl Profession {
    pub const ALL: [Self; 3] = [Self::Banker, Self::Carpenter, Self::Farmer];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Banker => "banker",
            Self::Carpenter => "carpenter",
            Self::Farmer => "farmer",
        }
    }
}

/// Coarse health band derived from the numeric health value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthLevel {
    Good,
    Fair,
    Poor,
    VeryPoor,
    Dead,
}

impl HealthLevel {
    #[must_use]
    pub const fn from_health(health: i32) -> Self {
        if health >= HEALTH_GOOD_FLOOR {
            Self::Good
        } else if health >= HEALTH_FAIR_FLOOR {
            Self::Fair
        } else if health >= HEALTH_POOR_FLOOR {
            Self::Poor
        } else if health >= HEALTH_VERY_POOR_FLOOR {
            Self::VeryPoor
        } else {
            Self::Dead
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::VeryPoor => "very poor",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One member of the party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    name: String,
    profession: Profession,
    leader: bool,
    health: i32,
    near_death: bool,
}

/// Everything a person's daily upkeep may read or change besides the person.
pub struct PersonTick<'a, R: Rng + ?Sized> {
    pub index: usize,
    pub inventory: &'a mut Inventory,
    pub mileage: &'a mut i32,
    pub status: VehicleStatus,
    pub ration: RationLevel,
    pub passenger_count: usize,
    pub cfg: &'a SimulationConfig,
    pub rng: &'a mut R,
    pub outbox: &'a mut VecDeque<Directive>,
}

impl<R: Rng + ?Sized> PersonTick<'_, R> {
    fn signal(&mut self, directive: Directive) {
        self.outbox.push_back(directive);
    }
}

enum Illness {
    Mild,
    Moderate,
    Severe,
}

impl Person {
    #[must_use]
    pub fn new(name: impl Into<String>, profession: Profession, leader: bool) -> Self {
        Self {
            name: name.into(),
            profession,
            leader,
            health: HEALTH_MAX,
            near_death: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn profession(&self) -> Profession {
        self.profession
    }

    #[must_use]
    pub const fn is_leader(&self) -> bool {
        self.leader
    }

    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    #[must_use]
    pub const fn health_level(&self) -> HealthLevel {
        HealthLevel::from_health(self.health)
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > HEALTH_DEAD
    }

    #[must_use]
    pub const fn is_near_death(&self) -> bool {
        self.near_death
    }

    /// Every write to health goes through here.
    pub const fn set_health(&mut self, value: i32) {
        self.health = if value < HEALTH_DEAD {
            HEALTH_DEAD
        } else if value > HEALTH_MAX {
            HEALTH_MAX
        } else {
            value
        };
    }

    /// Non-positive amounts are ignored.
    pub const fn damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.set_health(self.health.saturating_sub(amount));
    }

    /// Non-positive amounts are ignored.
    pub const fn heal(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.set_health(self.health.saturating_add(amount));
    }

    /// Event fired when this person dies.
    #[must_use]
    pub const fn death_event(&self) -> EventKind {
        if self.leader {
            EventKind::DeathPlayer
        } else {
            EventKind::DeathCompanion
        }
    }

    /// Damage that may be fatal. Returns the death event to fire when this
    /// blow is the one that killed them.
    #[must_use]
    pub const fn wound(&mut self, amount: i32) -> Option<EventKind> {
        let was_alive = self.is_alive();
        self.damage(amount);
        if was_alive && !self.is_alive() {
            Some(self.death_event())
        } else {
            None
        }
    }

    pub const fn kill(&mut self) {
        self.set_health(HEALTH_DEAD);
    }

    /// Daily upkeep: eat, then check for illness and wear.
    pub fn on_day_tick<R: Rng + ?Sized>(&mut self, env: &mut PersonTick<'_, R>) {
        if !self.is_alive() {
            return;
        }
        self.consume_food(env);
        self.check_illness(env);
    }

    fn consume_food<R: Rng + ?Sized>(&mut self, env: &mut PersonTick<'_, R>) {
        let food = env.inventory.quantity(ItemKind::Food);
        let cfg = &env.cfg.food;
        let remaining = food - cfg.base_consumption - cfg.per_ration * env.ration.value();
        env.inventory.set_quantity(ItemKind::Food, remaining.max(0));

        if remaining >= cfg.reserve_floor {
            self.recover(env);
        } else {
            let damage = cfg.starvation_damage;
            self.injure(damage, env);
        }
    }

    /// Heal a little. The near-death flag stays set, and `WellAgain` waits,
    /// until the person is back in the good band rather than on the first heal.
    fn recover<R: Rng + ?Sized>(&mut self, env: &mut PersonTick<'_, R>) {
        if !self.is_alive() || self.health_level() == HealthLevel::Good {
            return;
        }
        let amount = env.cfg.health.heal.roll(env.rng);
        self.heal(amount);

        if self.near_death && self.health_level() == HealthLevel::Good {
            self.near_death = false;
            log::info!("{} has recovered", self.name);
            env.signal(Directive::TriggerEvent {
                target: EventTarget::Person(env.index),
                kind: EventKind::WellAgain,
            });
        }
    }

    /// Random damage, with a chance of a follow-up person event and a death
    /// notice if it was fatal.
    fn injure<R: Rng + ?Sized>(&mut self, range: Range, env: &mut PersonTick<'_, R>) {
        if !self.is_alive() {
            return;
        }
        let amount = range.roll(env.rng);
        let fatal = self.wound(amount);
        log::debug!("{} took {amount} damage (health {})", self.name, self.health);

        let target = EventTarget::Person(env.index);
        if let Some(kind) = fatal {
            env.signal(Directive::TriggerEvent { target, kind });
        } else if check_percent(env.rng, env.cfg.health.injury_event_pct) {
            env.signal(Directive::TriggerCategory {
                target,
                category: EventCategory::Person,
            });
        }
    }

    fn afflict<R: Rng + ?Sized>(&mut self, affliction: &AfflictionCfg, env: &mut PersonTick<'_, R>) {
        reduce_mileage(env.mileage, affliction.mileage_loss);
        self.injure(affliction.damage, env);
    }

    fn check_illness<R: Rng + ?Sized>(&mut self, env: &mut PersonTick<'_, R>) {
        if !self.is_alive() {
            return;
        }
        let cfg = env.cfg;
        let illness = &cfg.health.illness;
        let ration_steps = env.ration.value() - 1;
        // The moderate odds shrink with party size; a lone survivor must not divide by zero.
        let party = i32::try_from(env.passenger_count.max(1)).unwrap_or(i32::MAX);

        let mild_odds = illness.mild_base_pct + illness.mild_ration_pct * ration_steps;
        let moderate_odds =
            illness.moderate_base_pct - illness.moderate_ration_pct / party * ration_steps;

        let rolled = if check_percent(env.rng, mild_odds) {
            Some(Illness::Mild)
        } else if check_percent(env.rng, moderate_odds) {
            Some(Illness::Moderate)
        } else if check_percent(env.rng, illness.severe_pct) {
            Some(Illness::Severe)
        } else {
            None
        };

        if !env.status.is_moving() {
            self.recover(env);
            return;
        }

        if let Some(severity) = rolled {
            let affliction = match severity {
                Illness::Mild => &illness.mild,
                Illness::Moderate => &illness.moderate,
                Illness::Severe => &illness.severe,
            };
            self.afflict(affliction, env);
        }

        let starving = env.inventory.quantity(ItemKind::Food) <= 0;
        match self.health_level() {
            HealthLevel::Good => self.recover(env),
            HealthLevel::Fair if starving => self.afflict(&cfg.health.fair_starving, env),
            HealthLevel::Poor if starving => self.afflict(&cfg.health.poor_starving, env),
            HealthLevel::VeryPoor => {
                self.near_death = true;
                self.afflict(&cfg.health.very_poor, env);
            }
            HealthLevel::Fair | HealthLevel::Poor | HealthLevel::Dead => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn tick_person(
        person: &mut Person,
        inventory: &mut Inventory,
        status: VehicleStatus,
        rng: &mut StepRng,
    ) -> (i32, VecDeque<Directive>) {
        let cfg = SimulationConfig::load_from_static();
        let mut mileage = 12;
        let mut outbox = VecDeque::new();
        let mut env = PersonTick {
            index: 0,
            inventory,
            mileage: &mut mileage,
            status,
            ration: RationLevel::Filling,
            passenger_count: 4,
            cfg: &cfg,
            rng,
            outbox: &mut outbox,
        };
        person.on_day_tick(&mut env);
        (mileage, outbox)
    }

    #[test]
    fn health_bands_follow_thresholds() {
        assert_eq!(HealthLevel::from_health(500), HealthLevel::Good);
        assert_eq!(HealthLevel::from_health(401), HealthLevel::Good);
        assert_eq!(HealthLevel::from_health(400), HealthLevel::Fair);
        assert_eq!(HealthLevel::from_health(301), HealthLevel::Fair);
        assert_eq!(HealthLevel::from_health(300), HealthLevel::Poor);
        assert_eq!(HealthLevel::from_health(201), HealthLevel::Poor);
        assert_eq!(HealthLevel::from_health(200), HealthLevel::VeryPoor);
        assert_eq!(HealthLevel::from_health(1), HealthLevel::VeryPoor);
        assert_eq!(HealthLevel::from_health(0), HealthLevel::Dead);
    }

    #[test]
    fn health_is_clamped_on_every_write() {
        let mut person = Person::new("Ezra", Profession::Farmer, true);
        person.heal(10_000);
        assert_eq!(person.health(), HEALTH_MAX);
        person.damage(10_000);
        assert_eq!(person.health(), HEALTH_DEAD);
        person.set_health(-40);
        assert_eq!(person.health(), HEALTH_DEAD);
    }

    #[test]
    fn negative_amounts_change_nothing() {
        let mut person = Person::new("Ezra", Profession::Farmer, true);
        person.set_health(250);
        person.damage(-100);
        assert_eq!(person.health(), 250);
        person.damage(i32::MIN);
        assert_eq!(person.health(), 250);
        person.heal(-100);
        assert_eq!(person.health(), 250);
    }

    #[test]
    fn well_again_waits_for_the_good_band() {
        let mut person = Person::new("Mary", Profession::Farmer, false);
        person.set_health(350);
        person.near_death = true;
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Food, 200);
        let mut rng = StepRng::new(0xC000_0000, 0);

        let (_, outbox) = tick_person(&mut person, &mut inventory, VehicleStatus::Stopped, &mut rng);
        assert!(person.health() > 350);
        assert_eq!(person.health_level(), HealthLevel::Fair);
        assert!(person.is_near_death());
        assert!(outbox.is_empty());

        person.set_health(400);
        let (_, outbox) = tick_person(&mut person, &mut inventory, VehicleStatus::Stopped, &mut rng);
        assert_eq!(person.health_level(), HealthLevel::Good);
        assert!(!person.is_near_death());
        assert_eq!(
            outbox.into_iter().collect::<Vec<_>>(),
            vec![Directive::TriggerEvent {
                target: EventTarget::Person(0),
                kind: EventKind::WellAgain,
            }]
        );
    }

    #[test]
    fn wound_reports_only_the_fatal_blow() {
        let mut leader = Person::new("Ezra", Profession::Farmer, true);
        leader.set_health(30);
        assert_eq!(leader.wound(25), None);
        assert_eq!(leader.wound(25), Some(EventKind::DeathPlayer));
        assert_eq!(leader.wound(25), None);

        let mut companion = Person::new("Mary", Profession::Farmer, false);
        companion.set_health(5);
        assert_eq!(companion.wound(5), Some(EventKind::DeathCompanion));
    }

    #[test]
    fn fed_healthy_traveller_eats_without_harm() {
        let mut person = Person::new("Ezra", Profession::Farmer, true);
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Food, 200);
        // Every percentage roll lands on 75, above all illness odds.
        let mut rng = StepRng::new(0xC000_0000, 0);
        let (mileage, outbox) =
            tick_person(&mut person, &mut inventory, VehicleStatus::Moving, &mut rng);

        assert_eq!(inventory.quantity(ItemKind::Food), 200 - 8 - 15);
        assert_eq!(person.health(), HEALTH_MAX);
        assert_eq!(mileage, 12);
        assert!(outbox.is_empty());
    }

    #[test]
    fn starving_party_member_loses_health() {
        let mut person = Person::new("Mary", Profession::Farmer, false);
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Food, 5);
        let mut rng = StepRng::new(0xC000_0000, 0);
        let _ = tick_person(&mut person, &mut inventory, VehicleStatus::Stopped, &mut rng);

        assert_eq!(inventory.quantity(ItemKind::Food), 0);
        assert!(person.health() < HEALTH_MAX);
        assert!(person.is_alive());
    }

    #[test]
    fn fatal_damage_signals_death_by_role() {
        let mut leader = Person::new("Ezra", Profession::Banker, true);
        leader.set_health(3);
        let mut inventory = Inventory::default();
        let mut rng = StepRng::new(0, 0);
        let (_, outbox) =
            tick_person(&mut leader, &mut inventory, VehicleStatus::Stopped, &mut rng);

        assert!(!leader.is_alive());
        assert!(outbox.iter().any(|directive| matches!(
            directive,
            Directive::TriggerEvent {
                kind: EventKind::DeathPlayer,
                ..
            }
        )));
    }

    #[test]
    fn dead_people_are_skipped() {
        let mut person = Person::new("Jed", Profession::Farmer, false);
        person.kill();
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Food, 100);
        let mut rng = StepRng::new(0, 0);
        let (_, outbox) =
            tick_person(&mut person, &mut inventory, VehicleStatus::Moving, &mut rng);
        assert_eq!(inventory.quantity(ItemKind::Food), 100);
        assert!(outbox.is_empty());
    }
}
