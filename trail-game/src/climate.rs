//! Daily weather rolls.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clock::Month;
use crate::config::ClimateCfg;
use crate::rng::weighted_pick;

const FREEZING_F: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Clear,
    Rain,
    Snow,
    Fog,
    Hail,
}

impl Condition {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rain => "rainy",
            Self::Snow => "snowy",
            Self::Fog => "foggy",
            Self::Hail => "hail",
        }
    }

    /// Conditions that keep hunters in camp.
    #[must_use]
    pub const fn is_severe(self) -> bool {
        matches!(self, Self::Snow | Self::Hail)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Climate {
    pub temperature_f: i32,
    pub condition: Condition,
}

impl Climate {
    /// Roll today's weather. Rain falls as snow when it is freezing.
    pub fn tick<R: Rng + ?Sized>(&mut self, month: Month, cfg: &ClimateCfg, rng: &mut R) -> Condition {
        let base = cfg
            .monthly_temperature_f
            .get(month.index())
            .copied()
            .unwrap_or(50);
        self.temperature_f = base + cfg.temperature_jitter.roll(rng);

        let options: Vec<(Condition, u32)> = cfg
            .condition_weights
            .iter()
            .map(|(condition, weight)| (*condition, *weight))
            .collect();
        let mut condition = weighted_pick(&options, rng).unwrap_or_default();
        if condition == Condition::Rain && self.temperature_f <= FREEZING_F {
            condition = Condition::Snow;
        }
        self.condition = condition;
        condition
    }

    #[must_use]
    pub const fn temperature_label(&self) -> &'static str {
        match self.temperature_f {
            i32::MIN..=10 => "very cold",
            11..=32 => "cold",
            33..=69 => "cool",
            70..=89 => "warm",
            _ => "hot",
        }
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.temperature_label(), self.condition.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn freezing_rain_turns_to_snow() {
        let mut cfg = SimulationConfig::load_from_static().climate;
        cfg.condition_weights.clear();
        cfg.condition_weights.insert(Condition::Rain, 1);
        cfg.monthly_temperature_f = vec![0; 12];

        let mut climate = Climate::default();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        assert_eq!(climate.tick(Month::January, &cfg, &mut rng), Condition::Snow);
        assert!(climate.condition.is_severe());
    }

    #[test]
    fn empty_weights_fall_back_to_clear() {
        let cfg = ClimateCfg::default();
        let mut climate = Climate::default();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        assert_eq!(climate.tick(Month::June, &cfg, &mut rng), Condition::Clear);
        assert_eq!(climate.temperature_f, 50);
    }
}
