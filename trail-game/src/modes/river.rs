//! Crossing a river on the trail.

use crate::constants::PRESS_ENTER;
use crate::entity::EventTarget;
use crate::error::SimResult;
use crate::event::EventKind;
use crate::mode::{
    GameMode, MenuCommand, MenuMode, ModeCore, ModeCtx, ModeKind, ModeState, NoticeState, StateId,
    Transition, parse_yes_no,
};
use crate::modes::money;
use crate::rng::check_percent;
use crate::trail::LocationKind;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingMethod {
    Ford,
    CaulkAndFloat,
    Ferry,
}

impl CrossingMethod {
    const fn describe(self) -> &'static str {
        match self {
            Self::Ford => "attempt to ford the river",
            Self::CaulkAndFloat => "caulk the wagon and float it across",
            Self::Ferry => "take a ferry across",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiverCommand {
    Cross(CrossingMethod),
    LearnMore,
}

impl MenuCommand for RiverCommand {
    fn keyword(self) -> &'static str {
        match self {
            Self::Cross(CrossingMethod::Ford) => "ford",
            Self::Cross(CrossingMethod::CaulkAndFloat) => "float",
            Self::Cross(CrossingMethod::Ferry) => "ferry",
            Self::LearnMore => "info",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiverInfo {
    pub name: String,
    pub depth_ft: u32,
}

pub struct RiverCrossingMode {
    core: ModeCore<RiverCommand, RiverInfo>,
}

impl RiverCrossingMode {
    pub fn create(world: &mut World) -> Box<dyn GameMode> {
        let info = world
            .trail
            .current_location()
            .map(|location| RiverInfo {
                name: location.name.clone(),
                depth_ft: match location.kind {
                    LocationKind::RiverCrossing { depth_ft } => depth_ft,
                    _ => 0,
                },
            })
            .unwrap_or_default();
        Box::new(Self {
            core: ModeCore::new(info),
        })
    }

    fn rebuild_menu(&mut self, world: &World) {
        let data = &self.core.data;
        let menu = &mut self.core.menu;
        menu.clear();
        menu.set_header(format!(
            "{}\n{}\n\nThe river is {} feet deep.\nYou must cross the river in order to continue.\nWhat would you like to do?",
            data.name,
            world.date(),
            data.depth_ft
        ));
        menu.add(RiverCommand::Cross(CrossingMethod::Ford), "Attempt to ford the river");
        menu.add(
            RiverCommand::Cross(CrossingMethod::CaulkAndFloat),
            "Caulk the wagon and float it across",
        );
        menu.add(
            RiverCommand::Cross(CrossingMethod::Ferry),
            format!("Take a ferry across ({})", money(world.config.river.ferry_cost_cents)),
        );
        menu.add(RiverCommand::LearnMore, "Get more information");
    }
}

impl MenuMode for RiverCrossingMode {
    type Command = RiverCommand;
    type Data = RiverInfo;

    const KIND: ModeKind = ModeKind::RiverCrossing;

    fn core(&self) -> &ModeCore<RiverCommand, RiverInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<RiverCommand, RiverInfo> {
        &mut self.core
    }

    fn on_command(&mut self, command: RiverCommand, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {
            RiverCommand::Cross(method) => self.core.set_state(ConfirmCrossingState { method }),
            RiverCommand::LearnMore => {
                let cfg = &ctx.config.river;
                self.core.set_state(NoticeState::new(
                    StateId::CrossingResult,
                    format!(
                        "A wagon can be forded safely through water up to {} feet deep.\n\
                         Floating a caulked wagon fails about {}% of the time.\n\
                         The ferry costs {} and always gets you across.",
                        cfg.ford_safe_depth_ft,
                        cfg.float_fail_pct,
                        money(cfg.ferry_cost_cents)
                    ),
                ));
            }
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
}

/// Outcome of an attempted crossing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossingOutcome {
    Safe(String),
    /// The wagon was swamped; the flood event tells the rest.
    Flooded,
    CannotAfford,
}

/// Resolve a crossing against the river depth and the wagon's purse.
pub fn attempt_crossing(method: CrossingMethod, depth_ft: u32, world: &mut World) -> CrossingOutcome {
    let cfg = world.config.river.clone();
    match method {
        CrossingMethod::Ford if depth_ft > cfg.ford_safe_depth_ft => CrossingOutcome::Flooded,
        CrossingMethod::Ford => {
            CrossingOutcome::Safe("You forded the river without trouble.".to_string())
        }
        CrossingMethod::CaulkAndFloat => {
            if check_percent(world.rng.events(), cfg.float_fail_pct) {
                CrossingOutcome::Flooded
            } else {
                CrossingOutcome::Safe("The wagon floated safely to the far bank.".to_string())
            }
        }
        CrossingMethod::Ferry => {
            if world.vehicle.balance_cents < cfg.ferry_cost_cents {
                return CrossingOutcome::CannotAfford;
            }
            world.vehicle.balance_cents -= cfg.ferry_cost_cents;
            CrossingOutcome::Safe(format!(
                "The ferry carried you across for {}.",
                money(cfg.ferry_cost_cents)
            ))
        }
    }
}

pub struct ConfirmCrossingState {
    method: CrossingMethod,
}

impl ModeState<RiverInfo> for ConfirmCrossingState {
    fn id(&self) -> StateId {
        StateId::ConfirmCrossing
    }

    fn render(&self, data: &RiverInfo, _world: &World) -> String {
        format!(
            "You chose to {} at {}.\n\nAre you sure? Y/N",
            self.method.describe(),
            data.name
        )
    }

    fn on_input(
        &mut self,
        line: &str,
        data: &mut RiverInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<RiverInfo> {
        match parse_yes_no(line) {
            Some(true) => {}
            Some(false) => return Transition::ClearToMenu,
            None => return Transition::Stay,
        }
        let outcome = attempt_crossing(self.method, data.depth_ft, ctx);
        log::info!("crossing {} by {:?}: {outcome:?}", data.name, self.method);
        match outcome {
            CrossingOutcome::Safe(text) => Transition::to(CrossingResultState { text }),
            CrossingOutcome::Flooded => {
                ctx.trigger_event(EventTarget::Vehicle, EventKind::VehicleFloods);
                ctx.remove_mode_next_tick(ModeKind::RiverCrossing);
                Transition::Stay
            }
            CrossingOutcome::CannotAfford => Transition::to(NoticeState::new(
                StateId::CrossingResult,
                "You do not have enough money to pay for the ferry.",
            )),
        }
    }
}

/// Shown after a safe crossing; acknowledging it leaves the river behind.
pub struct CrossingResultState {
    text: String,
}

impl ModeState<RiverInfo> for CrossingResultState {
    fn id(&self) -> StateId {
        StateId::CrossingResult
    }

    fn render(&self, _data: &RiverInfo, _world: &World) -> String {
        format!("{}\n\n{PRESS_ENTER}", self.text)
    }

    fn accepts_input(&self) -> bool {
        false
    }

    fn on_input(
        &mut self,
        _line: &str,
        _data: &mut RiverInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<RiverInfo> {
        ctx.remove_mode_next_tick(ModeKind::RiverCrossing);
        Transition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::trail::Trail;
    use crate::world::Directive;

    fn world() -> World {
        let mut world = World::new(SimulationConfig::load_from_static(), Trail::load_from_static(), 5);
        world.vehicle.balance_cents = 1_000;
        world
    }

    fn river(world: &mut World, depth_ft: u32) -> Box<dyn GameMode> {
        let mut mode: Box<dyn GameMode> = Box::new(RiverCrossingMode {
            core: ModeCore::new(RiverInfo {
                name: "Test River".to_string(),
                depth_ft,
            }),
        });
        mode.on_post_create(&mut ModeCtx::new(world, 2)).unwrap();
        mode
    }

    #[test]
    fn shallow_ford_is_safe() {
        let mut world = world();
        let mut mode = river(&mut world, 2);
        let mut ctx = ModeCtx::new(&mut world, 2);
        mode.on_input("ford", &mut ctx).unwrap();
        assert_eq!(mode.current_state(), Some(StateId::ConfirmCrossing));
        mode.on_input("y", &mut ctx).unwrap();
        assert_eq!(mode.current_state(), Some(StateId::CrossingResult));
        mode.on_input("", &mut ctx).unwrap();
        drop(ctx);
        assert_eq!(
            world.next_directive(),
            Some(Directive::RemoveMode(ModeKind::RiverCrossing))
        );
    }

    #[test]
    fn deep_ford_floods_the_wagon() {
        let mut world = world();
        let mut mode = river(&mut world, 6);
        let mut ctx = ModeCtx::new(&mut world, 2);
        mode.on_input("1", &mut ctx).unwrap();
        mode.on_input("yes", &mut ctx).unwrap();
        drop(ctx);
        assert_eq!(
            world.next_directive(),
            Some(Directive::TriggerEvent {
                target: EventTarget::Vehicle,
                kind: EventKind::VehicleFloods,
            })
        );
        assert_eq!(
            world.next_directive(),
            Some(Directive::RemoveMode(ModeKind::RiverCrossing))
        );
    }

    #[test]
    fn ferry_charges_or_refuses() {
        let mut world = world();
        assert_eq!(
            attempt_crossing(CrossingMethod::Ferry, 6, &mut world),
            CrossingOutcome::Safe("The ferry carried you across for $5.00.".to_string())
        );
        assert_eq!(world.vehicle.balance_cents, 500);

        world.vehicle.balance_cents = 100;
        assert_eq!(
            attempt_crossing(CrossingMethod::Ferry, 6, &mut world),
            CrossingOutcome::CannotAfford
        );
        assert_eq!(world.vehicle.balance_cents, 100);
    }

    #[test]
    fn declining_returns_to_the_menu() {
        let mut world = world();
        let mut mode = river(&mut world, 2);
        let mut ctx = ModeCtx::new(&mut world, 2);
        mode.on_input("float", &mut ctx).unwrap();
        mode.on_input("n", &mut ctx).unwrap();
        assert_eq!(mode.current_state(), None);
        assert_eq!(ctx.pending_directives(), 0);
    }
}
