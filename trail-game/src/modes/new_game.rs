//! Party creation: profession, names, confirmation.

use std::fmt::Write as _;

use crate::constants::{DEFAULT_COMPANION_NAMES, DEFAULT_LEADER_NAME, MENU_PROMPT, PARTY_SIZE};
use crate::entity::{Person, Profession};
use crate::error::SimResult;
use crate::mode::{
    GameMode, MenuMode, ModeCore, ModeCtx, ModeKind, ModeState, NoCommand, StateId, Transition,
    parse_yes_no,
};
use crate::modes::money;
use crate::world::World;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGameInfo {
    pub profession: Option<Profession>,
    /// Leader first.
    pub names: Vec<String>,
}

pub struct NewGameMode {
    core: ModeCore<NoCommand, NewGameInfo>,
}

impl NewGameMode {
    pub fn create(_world: &mut World) -> Box<dyn GameMode> {
        Box::new(Self {
            core: ModeCore::new(NewGameInfo::default()),
        })
    }
}

impl MenuMode for NewGameMode {
    type Command = NoCommand;
    type Data = NewGameInfo;

    const KIND: ModeKind = ModeKind::NewGame;

    fn core(&self) -> &ModeCore<NoCommand, NewGameInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<NoCommand, NewGameInfo> {
        &mut self.core
    }

    fn on_command(&mut self, command: NoCommand, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {}
    }

    fn created(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.core.set_state(ChooseProfessionState);
        Ok(())
    }

    fn activated(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        if !self.core.has_state() {
            self.core.set_state(ChooseProfessionState);
        }
        Ok(())
    }

    fn mode_added(&mut self, _added: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }
}

struct ChooseProfessionState;

impl ModeState<NewGameInfo> for ChooseProfessionState {
    fn id(&self) -> StateId {
        StateId::ChooseProfession
    }

    fn render(&self, _data: &NewGameInfo, world: &World) -> String {
        let mut out = String::from("Many kinds of people made the trip west.\n\nYou may:\n");
        for (index, profession) in Profession::ALL.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. Be a {} from Independence ({})",
                index + 1,
                profession.name(),
                money(world.config.starting_cash(*profession))
            );
        }
        out.push('\n');
        out.push_str(MENU_PROMPT);
        out
    }

    fn on_input(
        &mut self,
        line: &str,
        data: &mut NewGameInfo,
        _ctx: &mut ModeCtx<'_>,
    ) -> Transition<NewGameInfo> {
        let line = line.trim();
        let chosen = line
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| Profession::ALL.get(index).copied())
            .or_else(|| {
                Profession::ALL
                    .into_iter()
                    .find(|profession| profession.name().eq_ignore_ascii_case(line))
            });
        let Some(profession) = chosen else {
            return Transition::Stay;
        };
        data.profession = Some(profession);
        data.names.clear();
        Transition::to(InputNameState)
    }
}

struct InputNameState;

impl ModeState<NewGameInfo> for InputNameState {
    fn id(&self) -> StateId {
        StateId::InputName
    }

    fn render(&self, data: &NewGameInfo, _world: &World) -> String {
        let slot = data.names.len();
        if slot == 0 {
            return "What is the first name of the wagon leader?".to_string();
        }
        let mut out = String::from("What are the first names of the other members in your party?\n\n");
        for (index, name) in data.names.iter().enumerate() {
            let _ = writeln!(out, "  {}. {name}", index + 1);
        }
        let _ = write!(out, "  {}. ?", slot + 1);
        out
    }

    fn on_input(
        &mut self,
        line: &str,
        data: &mut NewGameInfo,
        _ctx: &mut ModeCtx<'_>,
    ) -> Transition<NewGameInfo> {
        let slot = data.names.len();
        let name = line.trim();
        let name = if name.is_empty() {
            if slot == 0 {
                DEFAULT_LEADER_NAME
            } else {
                DEFAULT_COMPANION_NAMES[(slot - 1) % DEFAULT_COMPANION_NAMES.len()]
            }
        } else {
            name
        };
        data.names.push(name.to_string());
        if data.names.len() < PARTY_SIZE {
            Transition::Stay
        } else {
            Transition::to(ConfirmPartyState { submitted: false })
        }
    }
}

struct ConfirmPartyState {
    submitted: bool,
}

impl ModeState<NewGameInfo> for ConfirmPartyState {
    fn id(&self) -> StateId {
        StateId::ConfirmParty
    }

    fn render(&self, data: &NewGameInfo, world: &World) -> String {
        let profession = data.profession.unwrap_or(Profession::Farmer);
        let mut out = String::new();
        for (index, name) in data.names.iter().enumerate() {
            let role = if index == 0 { " (leader)" } else { "" };
            let _ = writeln!(out, "  {}. {name}{role}", index + 1);
        }
        let _ = write!(
            out,
            "\nProfession: {}\nStarting money: {}\n\nAre these answers correct? Y/N",
            profession.name(),
            money(world.config.starting_cash(profession))
        );
        out
    }

    fn on_input(
        &mut self,
        line: &str,
        data: &mut NewGameInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<NewGameInfo> {
        if self.submitted {
            return Transition::Stay;
        }
        match parse_yes_no(line) {
            Some(true) => {
                self.submitted = true;
                start_journey(data, ctx);
                Transition::Stay
            }
            Some(false) => {
                *data = NewGameInfo::default();
                Transition::to(ChooseProfessionState)
            }
            None => Transition::Stay,
        }
    }
}

fn start_journey(data: &NewGameInfo, ctx: &mut ModeCtx<'_>) {
    let profession = data.profession.unwrap_or(Profession::Farmer);
    let party = data
        .names
        .iter()
        .enumerate()
        .map(|(index, name)| Person::new(name.clone(), profession, index == 0))
        .collect();
    let cash = ctx.config.starting_cash(profession);
    ctx.vehicle.reset_passengers(party);
    ctx.vehicle.balance_cents = cash;
    log::info!(
        "party of {} leaves as {} with {}",
        data.names.len(),
        profession.name(),
        money(cash)
    );

    ctx.push_mode(ModeKind::Travel);
    ctx.push_mode(ModeKind::Store);
    ctx.remove_mode_next_tick(ModeKind::NewGame);
}
