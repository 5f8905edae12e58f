//! Hunting for food.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::climate::Condition;
use crate::config::HuntCfg;
use crate::entity::{ItemKind, Vehicle};
use crate::error::SimResult;
use crate::mode::{GameMode, MenuCommand, MenuMode, ModeCore, ModeCtx, ModeKind, NoticeState, StateId};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuntBlockReason {
    NoBullets,
    SevereWeather,
    NobodyToHunt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuntOutcome {
    Success {
        bullets_spent: i32,
        food_gained_lbs: i32,
    },
    Blocked(HuntBlockReason),
}

/// Spend some bullets and bring back what the party can carry.
#[must_use]
pub fn resolve_hunt_with_rng<R: Rng + ?Sized>(
    vehicle: &mut Vehicle,
    weather: Condition,
    cfg: &HuntCfg,
    rng: &mut R,
) -> HuntOutcome {
    if let Some(blocked) = hunt_block_reason(vehicle, weather) {
        return HuntOutcome::Blocked(blocked);
    }

    let bullets_available = vehicle.inventory.quantity(ItemKind::Ammo);
    let max_spend = bullets_available.clamp(1, cfg.max_bullets.max(1));
    let bullets_spent = rng.gen_range(1..=max_spend);
    let food_per_bullet = cfg.food_per_bullet.roll(rng);
    let food_shot = bullets_spent.saturating_mul(food_per_bullet);
    let food_gained = food_shot.min(carry_cap_lbs(vehicle, cfg));

    vehicle.inventory.remove(ItemKind::Ammo, bullets_spent);
    vehicle.inventory.add(ItemKind::Food, food_gained);

    HuntOutcome::Success {
        bullets_spent,
        food_gained_lbs: food_gained,
    }
}

fn hunt_block_reason(vehicle: &Vehicle, weather: Condition) -> Option<HuntBlockReason> {
    if vehicle.inventory.quantity(ItemKind::Ammo) <= 0 {
        return Some(HuntBlockReason::NoBullets);
    }
    if weather.is_severe() {
        return Some(HuntBlockReason::SevereWeather);
    }
    if vehicle.living_passengers() == 0 {
        return Some(HuntBlockReason::NobodyToHunt);
    }
    None
}

fn carry_cap_lbs(vehicle: &Vehicle, cfg: &HuntCfg) -> i32 {
    let alive = i32::try_from(vehicle.living_passengers()).unwrap_or(i32::MAX);
    alive.saturating_mul(cfg.carry_per_person)
}

#[must_use]
pub fn describe(outcome: HuntOutcome) -> String {
    match outcome {
        HuntOutcome::Success {
            bullets_spent,
            food_gained_lbs,
        } => format!(
            "You used {bullets_spent} bullets and brought back {food_gained_lbs} pounds of food."
        ),
        HuntOutcome::Blocked(HuntBlockReason::NoBullets) => {
            "You have no ammunition to hunt with.".to_string()
        }
        HuntOutcome::Blocked(HuntBlockReason::SevereWeather) => {
            "The weather is too severe to hunt.".to_string()
        }
        HuntOutcome::Blocked(HuntBlockReason::NobodyToHunt) => {
            "There is nobody left to hunt.".to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntCommand {
    Hunt,
    Leave,
}

impl MenuCommand for HuntCommand {
    fn keyword(self) -> &'static str {
        match self {
            Self::Hunt => "hunt",
            Self::Leave => "leave",
        }
    }
}

pub struct HuntMode {
    core: ModeCore<HuntCommand, Option<HuntOutcome>>,
}

impl HuntMode {
    pub fn create(_world: &mut World) -> Box<dyn GameMode> {
        Box::new(Self {
            core: ModeCore::new(None),
        })
    }

    fn rebuild_menu(&mut self, world: &World) {
        let menu = &mut self.core.menu;
        menu.clear();
        menu.set_header(format!(
            "Hunting\n{}\nAmmunition: {} bullets\nFood: {} pounds",
            world.date(),
            world.vehicle.inventory.quantity(ItemKind::Ammo),
            world.vehicle.inventory.quantity(ItemKind::Food)
        ));
        if self.core.data.is_none() {
            menu.add(HuntCommand::Hunt, "Go hunting");
        }
        menu.add(HuntCommand::Leave, "Return to the wagon");
    }
}

impl MenuMode for HuntMode {
    type Command = HuntCommand;
    type Data = Option<HuntOutcome>;

    const KIND: ModeKind = ModeKind::Hunt;

    fn core(&self) -> &ModeCore<HuntCommand, Option<HuntOutcome>> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<HuntCommand, Option<HuntOutcome>> {
        &mut self.core
    }

    fn on_command(&mut self, command: HuntCommand, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {
            HuntCommand::Hunt => {
                let world: &mut World = ctx;
                let outcome = resolve_hunt_with_rng(
                    &mut world.vehicle,
                    world.climate.condition,
                    &world.config.hunt,
                    world.rng.trade(),
                );
                log::info!("hunt resolved: {outcome:?}");
                self.core.data = Some(outcome);
                self.core
                    .set_state(NoticeState::new(StateId::HuntResult, describe(outcome)));
            }
            HuntCommand::Leave => ctx.remove_mode_next_tick(ModeKind::Hunt),
        }
        Ok(())
    }

    fn created(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.rebuild_menu(ctx.world());
        Ok(())
    }

    fn activated(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.rebuild_menu(ctx.world());
        Ok(())
    }

    fn mode_added(&mut self, _added: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }

    fn state_changed(&mut self, world: &World) {
        self.rebuild_menu(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Range;
    use crate::entity::{Person, Profession};
    use rand::rngs::mock::StepRng;

    fn party_wagon(ammo: i32, people: usize) -> Vehicle {
        let mut vehicle = Vehicle::default();
        vehicle.inventory.add(ItemKind::Ammo, ammo);
        vehicle.reset_passengers(
            (0..people)
                .map(|index| Person::new(format!("P{index}"), Profession::Farmer, index == 0))
                .collect(),
        );
        vehicle
    }

    fn hunt(vehicle: &mut Vehicle, weather: Condition, cfg: &HuntCfg) -> HuntOutcome {
        resolve_hunt_with_rng(vehicle, weather, cfg, &mut StepRng::new(0, 0))
    }

    #[test]
    fn hunting_without_ammo_is_blocked() {
        let mut vehicle = party_wagon(0, 2);
        let outcome = hunt(&mut vehicle, Condition::Clear, &HuntCfg::default());
        assert_eq!(outcome, HuntOutcome::Blocked(HuntBlockReason::NoBullets));
    }

    #[test]
    fn hail_keeps_hunters_home() {
        let mut vehicle = party_wagon(10, 2);
        let outcome = hunt(&mut vehicle, Condition::Hail, &HuntCfg::default());
        assert_eq!(outcome, HuntOutcome::Blocked(HuntBlockReason::SevereWeather));
        assert_eq!(vehicle.inventory.quantity(ItemKind::Ammo), 10);
    }

    #[test]
    fn successful_hunt_trades_bullets_for_food() {
        let mut vehicle = party_wagon(40, 1);
        let cfg = HuntCfg {
            food_per_bullet: Range::new(10, 10),
            ..HuntCfg::default()
        };
        let outcome = hunt(&mut vehicle, Condition::Clear, &cfg);
        assert_eq!(
            outcome,
            HuntOutcome::Success {
                bullets_spent: 1,
                food_gained_lbs: 10,
            }
        );
        assert_eq!(vehicle.inventory.quantity(ItemKind::Ammo), 39);
        assert_eq!(vehicle.inventory.quantity(ItemKind::Food), 10);
    }

    #[test]
    fn food_is_capped_by_what_survivors_can_carry() {
        let mut vehicle = party_wagon(40, 1);
        let cfg = HuntCfg {
            food_per_bullet: Range::new(500, 500),
            ..HuntCfg::default()
        };
        let outcome = hunt(&mut vehicle, Condition::Clear, &cfg);
        assert_eq!(
            outcome,
            HuntOutcome::Success {
                bullets_spent: 1,
                food_gained_lbs: 100,
            }
        );
        assert!(describe(outcome).contains("100 pounds"));
    }
}
