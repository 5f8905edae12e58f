//! The main travel menu shown between stops on the trail.

mod states;

pub use states::{
    ChangePaceState, ChangeRationsState, DriveState, LookAroundQuestionState, RestQuestionState,
    RestingState,
};

use std::fmt::Write as _;

use crate::entity::ItemKind;
use crate::error::SimResult;
use crate::mode::{GameMode, MenuCommand, MenuMode, ModeCore, ModeCtx, ModeKind, NoticeState, StateId};
use crate::modes::{money, status_report};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelCommand {
    ContinueOnTrail,
    CheckSupplies,
    LookAtMap,
    ChangePace,
    ChangeRations,
    StopToRest,
    AttemptToTrade,
    HuntForFood,
}

impl MenuCommand for TravelCommand {
    fn keyword(self) -> &'static str {
        match self {
            Self::ContinueOnTrail => "continue",
            Self::CheckSupplies => "supplies",
            Self::LookAtMap => "map",
            Self::ChangePace => "pace",
            Self::ChangeRations => "rations",
            Self::StopToRest => "rest",
            Self::AttemptToTrade => "trade",
            Self::HuntForFood => "hunt",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelInfo {
    /// Trail index of the last location the party looked around at.
    pub looked_around_at: Option<usize>,
}

pub struct TravelMode {
    core: ModeCore<TravelCommand, TravelInfo>,
}

impl TravelMode {
    pub fn create(_world: &mut World) -> Box<dyn GameMode> {
        Box::new(Self {
            core: ModeCore::new(TravelInfo::default()),
        })
    }

    fn rebuild_menu(&mut self, world: &World) {
        let menu = &mut self.core.menu;
        menu.clear();
        menu.set_header(status_report(world));
        menu.add(TravelCommand::ContinueOnTrail, "Continue on trail");
        menu.add(TravelCommand::CheckSupplies, "Check supplies");
        menu.add(TravelCommand::LookAtMap, "Look at map");
        menu.add(TravelCommand::ChangePace, "Change pace");
        menu.add(TravelCommand::ChangeRations, "Change food rations");
        menu.add(TravelCommand::StopToRest, "Stop to rest");
        menu.add(TravelCommand::AttemptToTrade, "Attempt to trade");
        menu.add(TravelCommand::HuntForFood, "Hunt for food");
    }

    /// Offer to look around when standing at a location not yet visited.
    fn check_look_around(&mut self, world: &World) {
        if self.core.has_state() || !world.trail.reached_next_point() {
            return;
        }
        let index = world.trail.index();
        if self.core.data.looked_around_at == Some(index) {
            return;
        }
        if world.trail.is_first_location() {
            self.core.data.looked_around_at = Some(index);
            self.core
                .set_state(NoticeState::new(StateId::LookAround, look_around_text(world)));
        } else {
            self.core.set_state(LookAroundQuestionState);
        }
    }
}

fn look_around_text(world: &World) -> String {
    world.trail.current_location().map_or_else(
        || world.date().to_string(),
        |location| {
            let mut text = format!("{}\n{}", location.name, world.date());
            if !location.description.is_empty() {
                text.push_str("\n\n");
                text.push_str(&location.description);
            }
            text
        },
    )
}

fn supplies_report(world: &World) -> String {
    let vehicle = &world.vehicle;
    let mut out = String::from("Your Supplies\n");
    for item in ItemKind::STORE_GOODS {
        let _ = writeln!(
            out,
            "  {:<10} {:>6} {}",
            item.name(),
            vehicle.inventory.quantity(item),
            item.unit()
        );
    }
    let _ = write!(out, "  {:<10} {:>6}", "money", money(vehicle.balance_cents));
    out
}

fn map_report(world: &World) -> String {
    let trail = &world.trail;
    let mut out = String::from("Trail Map\n");
    for (index, location) in trail.locations().iter().enumerate() {
        let marker = if index == trail.index() { ">" } else { " " };
        let _ = writeln!(out, " {marker} {:>5} mi  {}", location.mile_marker, location.name);
    }
    let _ = write!(out, "\nMiles traveled: {}", world.vehicle.odometer);
    out
}

impl MenuMode for TravelMode {
    type Command = TravelCommand;
    type Data = TravelInfo;

    const KIND: ModeKind = ModeKind::Travel;

    fn core(&self) -> &ModeCore<TravelCommand, TravelInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<TravelCommand, TravelInfo> {
        &mut self.core
    }

    fn on_command(&mut self, command: TravelCommand, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {
            TravelCommand::ContinueOnTrail => {
                if let Some(state) = states::start_driving(ctx) {
                    self.core.set_state(state);
                } else {
                    self.core.set_state(DriveState);
                }
            }
            TravelCommand::CheckSupplies => self.core.set_state(NoticeState::new(
                StateId::CheckSupplies,
                supplies_report(ctx.world()),
            )),
            TravelCommand::LookAtMap => self
                .core
                .set_state(NoticeState::new(StateId::LookAtMap, map_report(ctx.world()))),
            TravelCommand::ChangePace => self.core.set_state(ChangePaceState),
            TravelCommand::ChangeRations => self.core.set_state(ChangeRationsState),
            TravelCommand::StopToRest => self.core.set_state(RestQuestionState::default()),
            TravelCommand::AttemptToTrade => ctx.push_mode(ModeKind::Trade),
            TravelCommand::HuntForFood => ctx.push_mode(ModeKind::Hunt),
        }
        Ok(())
    }

    fn created(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.rebuild_menu(ctx.world());
        Ok(())
    }

    fn activated(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.rebuild_menu(ctx.world());
        self.check_look_around(ctx.world());
        Ok(())
    }

    fn mode_added(&mut self, added: ModeKind, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        if added.is_location() {
            self.core.data.looked_around_at = Some(ctx.trail.index());
            self.core.clear_state();
        }
        Ok(())
    }

    fn state_changed(&mut self, world: &World) {
        self.rebuild_menu(world);
    }

    fn ticked(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        if !self.core.has_state() {
            self.rebuild_menu(ctx.world());
        }
        Ok(())
    }
}
