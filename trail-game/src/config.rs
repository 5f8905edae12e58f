//! Tuning tables for the simulation, loaded from JSON.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::climate::Condition;
use crate::entity::{ItemKind, Profession, TravelPace};
use crate::error::ConfigError;

const DEFAULT_SIMULATION_DATA: &str = include_str!("../data/simulation.json");

/// Inclusive integer range used for every randomized amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub min: i32,
    pub max: i32,
}

impl Range {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Draw a value in `min..=max`. Degenerate ranges return `min` without drawing.
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> i32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    fn validate(self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockCfg {
    pub start_year: u32,
    pub start_month: u8,
    pub start_day: u8,
    /// Simulation steps that make up one in-game day.
    pub steps_per_day: u32,
}

impl Default for ClockCfg {
    fn default() -> Self {
        Self {
            start_year: 1848,
            start_month: 3,
            start_day: 1,
            steps_per_day: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceCfg {
    pub steady: u32,
    pub strenuous: u32,
    pub grueling: u32,
}

impl Default for PaceCfg {
    fn default() -> Self {
        Self {
            steady: 12,
            strenuous: 16,
            grueling: 20,
        }
    }
}

impl PaceCfg {
    /// Miles covered in one day at the given pace.
    #[must_use]
    pub const fn miles_per_day(&self, pace: TravelPace) -> u32 {
        match pace {
            TravelPace::Paused => 0,
            TravelPace::Steady => self.steady,
            TravelPace::Strenuous => self.strenuous,
            TravelPace::Grueling => self.grueling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodCfg {
    /// Pounds every living person eats per day regardless of rations.
    pub base_consumption: i32,
    /// Extra pounds per ration step.
    pub per_ration: i32,
    /// Stock that must remain after a meal for the meal to count as a full one.
    pub reserve_floor: i32,
    pub starvation_damage: Range,
    /// A low-food warning fires once when stock drops below this.
    pub low_food_threshold: i32,
}

impl Default for FoodCfg {
    fn default() -> Self {
        Self {
            base_consumption: 8,
            per_ration: 5,
            reserve_floor: 13,
            starvation_damage: Range::new(10, 50),
            low_food_threshold: 50,
        }
    }
}

/// Mileage lost and damage dealt by one affliction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfflictionCfg {
    pub mileage_loss: i32,
    pub damage: Range,
}

impl AfflictionCfg {
    const fn new(mileage_loss: i32, min: i32, max: i32) -> Self {
        Self {
            mileage_loss,
            damage: Range::new(min, max),
        }
    }
}

/// Daily illness odds, rolled mild first, then moderate, then severe.
///
/// Mild odds are `mild_base_pct + mild_ration_pct * (rations - 1)` and moderate
/// odds are `moderate_base_pct - moderate_ration_pct / party * (rations - 1)`.
/// The classic table used `+35` and `40` for the two ration coefficients and
/// made the severe case the unconditional fallback, which leaves nearly every
/// traveller sick every day. The shipped values (`-4`, `4`, `severe_pct = 2`)
/// are a retuning of the same shape; restore the old numbers through the JSON
/// table if the harsher curve is wanted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IllnessCfg {
    pub mild_base_pct: i32,
    pub mild_ration_pct: i32,
    pub moderate_base_pct: i32,
    /// Divided by the party size before it scales with rations.
    pub moderate_ration_pct: i32,
    pub severe_pct: i32,
    pub mild: AfflictionCfg,
    pub moderate: AfflictionCfg,
    pub severe: AfflictionCfg,
}

impl Default for IllnessCfg {
    fn default() -> Self {
        Self {
            mild_base_pct: 10,
            mild_ration_pct: -4,
            moderate_base_pct: 5,
            moderate_ration_pct: 4,
            severe_pct: 2,
            mild: AfflictionCfg::new(5, 1, 10),
            moderate: AfflictionCfg::new(10, 5, 15),
            severe: AfflictionCfg::new(15, 10, 50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCfg {
    pub heal: Range,
    /// Chance that a random injury also triggers a person event.
    pub injury_event_pct: i32,
    /// Extra wear while moving on an empty larder, per health band.
    pub fair_starving: AfflictionCfg,
    pub poor_starving: AfflictionCfg,
    pub very_poor: AfflictionCfg,
    pub illness: IllnessCfg,
}

impl Default for HealthCfg {
    fn default() -> Self {
        Self {
            heal: Range::new(1, 10),
            injury_event_pct: 10,
            fair_starving: AfflictionCfg::new(5, 10, 50),
            poor_starving: AfflictionCfg::new(10, 5, 10),
            very_poor: AfflictionCfg::new(15, 1, 5),
            illness: IllnessCfg::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestroyerCfg {
    /// Chance that a given non-empty item is hit at all.
    pub pick_pct: i32,
    /// Percentage of the stock lost once an item is hit.
    pub loss_pct: Range,
    /// Chance that each living passenger dies when a destroyer reports losses.
    pub kill_pct: i32,
}

impl Default for DestroyerCfg {
    fn default() -> Self {
        Self {
            pick_pct: 50,
            loss_pct: Range::new(10, 60),
            kill_pct: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsCfg {
    /// Chance of a random event at the end of each travelling day.
    pub daily_pct: i32,
    pub fog_mileage_loss: Range,
    pub hail_mileage_loss: Range,
    pub flood_mileage_loss: Range,
    pub wander_mileage_loss: Range,
    pub sprain_damage: i32,
}

impl Default for EventsCfg {
    fn default() -> Self {
        Self {
            daily_pct: 15,
            fog_mileage_loss: Range::new(3, 8),
            hail_mileage_loss: Range::new(5, 15),
            flood_mileage_loss: Range::new(0, 20),
            wander_mileage_loss: Range::new(2, 6),
            sprain_damage: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreCfg {
    pub prices_cents: BTreeMap<ItemKind, i64>,
    pub max_quantity: BTreeMap<ItemKind, i32>,
}

impl StoreCfg {
    #[must_use]
    pub fn price(&self, item: ItemKind) -> i64 {
        self.prices_cents.get(&item).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn max_quantity(&self, item: ItemKind) -> i32 {
        self.max_quantity.get(&item).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuntCfg {
    pub max_bullets: i32,
    pub food_per_bullet: Range,
    /// Pounds of meat each living person can carry back to the wagon.
    pub carry_per_person: i32,
}

impl Default for HuntCfg {
    fn default() -> Self {
        Self {
            max_bullets: 40,
            food_per_bullet: Range::new(2, 6),
            carry_per_person: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeCfg {
    /// Largest lot offered or requested per item.
    pub max_lot: BTreeMap<ItemKind, i32>,
    /// Chance a trading post has someone willing to deal.
    pub offer_pct: i32,
}

impl Default for TradeCfg {
    fn default() -> Self {
        Self {
            max_lot: BTreeMap::new(),
            offer_pct: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverCfg {
    /// Deepest water the wagon can ford without risk.
    pub ford_safe_depth_ft: u32,
    pub float_fail_pct: i32,
    pub ferry_cost_cents: i64,
}

impl Default for RiverCfg {
    fn default() -> Self {
        Self {
            ford_safe_depth_ft: 3,
            float_fail_pct: 20,
            ferry_cost_cents: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClimateCfg {
    /// Relative weights for each weather condition.
    pub condition_weights: BTreeMap<Condition, u32>,
    /// Average temperature per month, January first.
    pub monthly_temperature_f: Vec<i32>,
    pub temperature_jitter: Range,
}

/// Every tuning table the simulation consults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub clock: ClockCfg,
    pub pace: PaceCfg,
    pub food: FoodCfg,
    pub health: HealthCfg,
    pub destroyer: DestroyerCfg,
    pub events: EventsCfg,
    pub store: StoreCfg,
    pub starting_cash_cents: BTreeMap<Profession, i64>,
    pub hunt: HuntCfg,
    pub trade: TradeCfg,
    pub river: RiverCfg,
    pub climate: ClimateCfg,
}

impl SimulationConfig {
    /// Load configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_SIMULATION_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    #[must_use]
    pub fn starting_cash(&self, profession: Profession) -> i64 {
        self.starting_cash_cents
            .get(&profession)
            .copied()
            .unwrap_or_default()
    }

    /// Check ranges and mandatory table entries.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least("clock.steps_per_day", i64::from(self.clock.steps_per_day), 1)?;
        at_least("clock.start_month", i64::from(self.clock.start_month), 1)?;
        at_most("clock.start_month", i64::from(self.clock.start_month), 12)?;
        at_least("clock.start_day", i64::from(self.clock.start_day), 1)?;
        at_most("clock.start_day", i64::from(self.clock.start_day), 28)?;

        self.food.starvation_damage.validate("food.starvation_damage")?;
        self.health.heal.validate("health.heal")?;
        for (field, affliction) in [
            ("health.fair_starving", &self.health.fair_starving),
            ("health.poor_starving", &self.health.poor_starving),
            ("health.very_poor", &self.health.very_poor),
            ("health.illness.mild", &self.health.illness.mild),
            ("health.illness.moderate", &self.health.illness.moderate),
            ("health.illness.severe", &self.health.illness.severe),
        ] {
            affliction.damage.validate(field)?;
            at_least(field, i64::from(affliction.mileage_loss), 0)?;
        }
        self.destroyer.loss_pct.validate("destroyer.loss_pct")?;
        at_least("destroyer.loss_pct.min", i64::from(self.destroyer.loss_pct.min), 0)?;
        at_most("destroyer.loss_pct.max", i64::from(self.destroyer.loss_pct.max), 100)?;
        self.hunt.food_per_bullet.validate("hunt.food_per_bullet")?;
        self.climate.temperature_jitter.validate("climate.temperature_jitter")?;

        for item in ItemKind::STORE_GOODS {
            if !self.store.prices_cents.contains_key(&item) {
                return Err(ConfigError::MissingEntry {
                    table: "store.prices_cents",
                    key: item.name().to_string(),
                });
            }
        }
        for profession in Profession::ALL {
            if !self.starting_cash_cents.contains_key(&profession) {
                return Err(ConfigError::MissingEntry {
                    table: "starting_cash_cents",
                    key: profession.name().to_string(),
                });
            }
        }
        if self.climate.monthly_temperature_f.len() != 12 {
            return Err(ConfigError::MissingEntry {
                table: "climate.monthly_temperature_f",
                key: format!("{} of 12 months", self.climate.monthly_temperature_f.len()),
            });
        }
        Ok(())
    }
}

fn at_least(field: &'static str, value: i64, min: i64) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::BelowMinimum { field, min, value });
    }
    Ok(())
}

fn at_most(field: &'static str, value: i64, max: i64) -> Result<(), ConfigError> {
    if value > max {
        return Err(ConfigError::AboveMaximum { field, max, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_is_valid() {
        let config = SimulationConfig::from_json(DEFAULT_SIMULATION_DATA).unwrap();
        assert_eq!(config.food.reserve_floor, 13);
        assert_eq!(config.pace.miles_per_day(TravelPace::Paused), 0);
        assert!(config.store.price(ItemKind::Animal) > 0);
        assert!(config.starting_cash(Profession::Banker) > config.starting_cash(Profession::Farmer));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut config = SimulationConfig::load_from_static();
        config.health.heal = Range::new(10, 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { field: "health.heal", .. })
        ));
    }

    #[test]
    fn missing_price_is_rejected() {
        let mut config = SimulationConfig::load_from_static();
        config.store.prices_cents.remove(&ItemKind::Food);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingEntry { table: "store.prices_cents", .. })
        ));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        assert!(matches!(
            SimulationConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn degenerate_range_does_not_draw() {
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        assert_eq!(Range::new(5, 5).roll(&mut rng), 5);
        assert_eq!(Range::new(1, 3).roll(&mut rng), 1);
    }
}
