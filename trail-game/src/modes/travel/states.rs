use std::fmt::Write as _;

use crate::constants::{MAX_REST_DAYS, MENU_PROMPT, PRESS_ENTER};
use crate::entity::{ItemKind, RationLevel, TravelPace};
use crate::mode::{ModeCtx, ModeState, NoticeState, StateId, Transition, parse_yes_no};
use crate::modes::status_report;
use crate::world::World;

use super::TravelInfo;

const PACES: [TravelPace; 3] = [TravelPace::Steady, TravelPace::Strenuous, TravelPace::Grueling];
const RATIONS: [RationLevel; 3] = [RationLevel::Filling, RationLevel::Meager, RationLevel::BareBones];

const PACE_ADVICE: &str = "steady - You travel about 8 hours a day, taking frequent rests. You take \
care not to get too tired.\n\nstrenuous - You travel about 12 hours a day, starting just after \
sunrise and stopping shortly before sunset. You stop to rest only when necessary. You finish each \
day feeling very tired.\n\ngrueling - You travel about 16 hours a day, starting before sunrise and \
continuing until dark. You almost never stop to rest. You do not get enough sleep at night. You \
finish each day feeling absolutely exhausted, and your health suffers.";

fn pick<T: Copy>(options: &[T], line: &str) -> Option<T> {
    line.trim()
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| options.get(index).copied())
}

/// Put the wagon in motion, or explain why it cannot move.
pub(super) fn start_driving(ctx: &mut ModeCtx<'_>) -> Option<NoticeState> {
    if ctx.vehicle.inventory.quantity(ItemKind::Animal) <= 0 {
        return Some(NoticeState::new(
            StateId::ContinueOnTrail,
            "You have no oxen to pull your wagon.",
        ));
    }
    if ctx.trail.is_last_location() {
        return Some(NoticeState::new(
            StateId::ContinueOnTrail,
            "There is no more trail to follow.",
        ));
    }
    let miles = ctx.miles_per_day();
    ctx.trail.depart();
    ctx.vehicle.start_moving(miles);
    log::debug!("wagon moving at {miles} miles per day");
    None
}

/// The wagon rolls on while this is on screen.
pub struct DriveState;

impl ModeState<TravelInfo> for DriveState {
    fn id(&self) -> StateId {
        StateId::Drive
    }

    fn render(&self, _data: &TravelInfo, world: &World) -> String {
        format!("{}\n\nPress ENTER to size up the situation.", status_report(world))
    }

    fn passes_time(&self) -> bool {
        true
    }

    fn on_input(
        &mut self,
        _line: &str,
        _data: &mut TravelInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<TravelInfo> {
        ctx.vehicle.stop();
        Transition::ClearToMenu
    }

    fn on_tick(&mut self, _data: &mut TravelInfo, ctx: &mut ModeCtx<'_>) -> Transition<TravelInfo> {
        if ctx.vehicle.status.is_moving() {
            Transition::Stay
        } else {
            Transition::ClearToMenu
        }
    }
}

pub struct LookAroundQuestionState;

impl ModeState<TravelInfo> for LookAroundQuestionState {
    fn id(&self) -> StateId {
        StateId::LookAroundQuestion
    }

    fn render(&self, _data: &TravelInfo, world: &World) -> String {
        let name = world
            .trail
            .current_location()
            .map_or("a new place", |location| location.name.as_str());
        format!("You are now at {name}.\nWould you like to look around? Y/N")
    }

    fn on_input(
        &mut self,
        line: &str,
        data: &mut TravelInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<TravelInfo> {
        let Some(answer) = parse_yes_no(line) else {
            return Transition::Stay;
        };
        data.looked_around_at = Some(ctx.trail.index());
        if answer
            && let Some(kind) = ctx.trail.current_location().map(|location| location.kind.mode())
        {
            ctx.push_mode(kind);
        }
        Transition::ClearToMenu
    }
}

pub struct ChangePaceState;

impl ModeState<TravelInfo> for ChangePaceState {
    fn id(&self) -> StateId {
        StateId::ChangePace
    }

    fn render(&self, _data: &TravelInfo, world: &World) -> String {
        let mut out = format!(
            "Change pace\n(currently \"{}\")\n\nThe pace at which you travel can change. Your choices are:\n\n",
            world.vehicle.pace.label()
        );
        for (index, pace) in PACES.iter().enumerate() {
            let _ = writeln!(out, "  {}. a {} pace", index + 1, pace.label());
        }
        let _ = writeln!(out, "  {}. find out what these different paces mean", PACES.len() + 1);
        out.push('\n');
        out.push_str(MENU_PROMPT);
        out
    }

    fn on_input(
        &mut self,
        line: &str,
        _data: &mut TravelInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<TravelInfo> {
        if let Some(pace) = pick(&PACES, line) {
            ctx.vehicle.pace = pace;
            return Transition::ClearToMenu;
        }
        if line.trim() == (PACES.len() + 1).to_string() {
            return Transition::to(PaceAdviceState);
        }
        Transition::Stay
    }
}

/// Describes each pace, then goes back to the pace question.
pub struct PaceAdviceState;

impl ModeState<TravelInfo> for PaceAdviceState {
    fn id(&self) -> StateId {
        StateId::PaceAdvice
    }

    fn render(&self, _data: &TravelInfo, _world: &World) -> String {
        format!("{PACE_ADVICE}\n\n{PRESS_ENTER}")
    }

    fn accepts_input(&self) -> bool {
        false
    }

    fn on_input(
        &mut self,
        _line: &str,
        _data: &mut TravelInfo,
        _ctx: &mut ModeCtx<'_>,
    ) -> Transition<TravelInfo> {
        Transition::to(ChangePaceState)
    }
}

pub struct ChangeRationsState;

impl ModeState<TravelInfo> for ChangeRationsState {
    fn id(&self) -> StateId {
        StateId::ChangeRations
    }

    fn render(&self, _data: &TravelInfo, world: &World) -> String {
        let mut out = format!(
            "Change food rations\n(currently \"{}\")\n\nThe amount of food the people in your party eat each day can change. These amounts are:\n\n",
            world.vehicle.ration.label()
        );
        for (index, ration) in RATIONS.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, ration.label());
        }
        out.push('\n');
        out.push_str(MENU_PROMPT);
        out
    }

    fn on_input(
        &mut self,
        line: &str,
        _data: &mut TravelInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<TravelInfo> {
        match pick(&RATIONS, line) {
            Some(ration) => {
                ctx.vehicle.ration = ration;
                Transition::ClearToMenu
            }
            None => Transition::Stay,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RestQuestionState {
    error: Option<String>,
}

impl ModeState<TravelInfo> for RestQuestionState {
    fn id(&self) -> StateId {
        StateId::RestQuestion
    }

    fn render(&self, _data: &TravelInfo, _world: &World) -> String {
        let mut out = String::from("How many days would you like to rest?");
        if let Some(error) = &self.error {
            out.push_str("\n\n");
            out.push_str(error);
        }
        out
    }

    fn on_input(
        &mut self,
        line: &str,
        _data: &mut TravelInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<TravelInfo> {
        match line.trim().parse::<u32>() {
            Ok(0) => Transition::ClearToMenu,
            Ok(days) if days <= MAX_REST_DAYS => {
                ctx.vehicle.rest();
                let until_day = ctx.clock.days_elapsed() + days;
                log::debug!("resting {days} days");
                Transition::to(RestingState { until_day })
            }
            _ => Transition::to(Self {
                error: Some(format!("Please enter a number from 0 to {MAX_REST_DAYS}.")),
            }),
        }
    }
}

/// Lets days pass while the party recovers.
pub struct RestingState {
    until_day: u32,
}

impl ModeState<TravelInfo> for RestingState {
    fn id(&self) -> StateId {
        StateId::Resting
    }

    fn render(&self, _data: &TravelInfo, world: &World) -> String {
        let left = self.until_day.saturating_sub(world.clock.days_elapsed());
        format!("{}\n\nResting... {left} days to go.", status_report(world))
    }

    fn accepts_input(&self) -> bool {
        false
    }

    fn passes_time(&self) -> bool {
        true
    }

    fn on_input(
        &mut self,
        _line: &str,
        _data: &mut TravelInfo,
        _ctx: &mut ModeCtx<'_>,
    ) -> Transition<TravelInfo> {
        Transition::Stay
    }

    fn on_tick(&mut self, _data: &mut TravelInfo, ctx: &mut ModeCtx<'_>) -> Transition<TravelInfo> {
        if ctx.clock.days_elapsed() >= self.until_day {
            ctx.vehicle.stop();
            Transition::ClearToMenu
        } else {
            Transition::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::entity::VehicleStatus;
    use crate::trail::Trail;

    fn world() -> World {
        World::new(SimulationConfig::load_from_static(), Trail::load_from_static(), 2)
    }

    #[test]
    fn driving_needs_oxen() {
        let mut world = world();
        let mut ctx = ModeCtx::new(&mut world, 1);
        assert!(start_driving(&mut ctx).is_some());
        assert_eq!(ctx.vehicle.status, VehicleStatus::Stopped);

        ctx.vehicle.inventory.add(ItemKind::Animal, 2);
        assert!(start_driving(&mut ctx).is_none());
        assert!(ctx.vehicle.status.is_moving());
        assert!(!ctx.trail.reached_next_point());
    }

    #[test]
    fn pace_menu_sets_pace_and_offers_advice() {
        let mut world = world();
        let mut ctx = ModeCtx::new(&mut world, 1);
        let mut data = TravelInfo::default();
        let mut state = ChangePaceState;

        assert!(matches!(state.on_input("9", &mut data, &mut ctx), Transition::Stay));
        match state.on_input("4", &mut data, &mut ctx) {
            Transition::Replace(next) => assert_eq!(next.id(), StateId::PaceAdvice),
            _ => panic!("expected pace advice"),
        }
        assert!(matches!(state.on_input("3", &mut data, &mut ctx), Transition::ClearToMenu));
        assert_eq!(ctx.vehicle.pace, TravelPace::Grueling);
    }

    #[test]
    fn rations_follow_the_menu_order() {
        let mut world = world();
        let mut ctx = ModeCtx::new(&mut world, 1);
        let mut data = TravelInfo::default();
        assert!(matches!(
            ChangeRationsState.on_input("3", &mut data, &mut ctx),
            Transition::ClearToMenu
        ));
        assert_eq!(ctx.vehicle.ration, RationLevel::BareBones);
    }

    #[test]
    fn rest_question_validates_days() {
        let mut world = world();
        let mut ctx = ModeCtx::new(&mut world, 1);
        let mut data = TravelInfo::default();
        let mut state = RestQuestionState::default();

        match state.on_input("12", &mut data, &mut ctx) {
            Transition::Replace(next) => {
                assert_eq!(next.id(), StateId::RestQuestion);
                assert!(next.render(&data, &ctx).contains("from 0 to 9"));
            }
            _ => panic!("expected a retry"),
        }
        match state.on_input("2", &mut data, &mut ctx) {
            Transition::Replace(next) => assert_eq!(next.id(), StateId::Resting),
            _ => panic!("expected resting"),
        }
        assert_eq!(ctx.vehicle.status, VehicleStatus::Resting);
    }

    #[test]
    fn resting_ends_on_the_target_day() {
        let mut world = world();
        let mut ctx = ModeCtx::new(&mut world, 1);
        let mut data = TravelInfo::default();
        ctx.vehicle.rest();
        let mut state = RestingState { until_day: 0 };
        assert!(state.passes_time());
        assert!(matches!(state.on_tick(&mut data, &mut ctx), Transition::ClearToMenu));
        assert_eq!(ctx.vehicle.status, VehicleStatus::Stopped);
    }
}
