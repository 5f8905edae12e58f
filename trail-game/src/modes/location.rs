//! Screens shown when the party stops at a landmark, settlement or fork.

use rand::seq::SliceRandom;

use crate::error::SimResult;
use crate::mode::{GameMode, MenuCommand, MenuMode, ModeCore, ModeCtx, ModeKind, NoticeState, StateId};
use crate::trail::{Branch, Location, LocationKind};
use crate::world::World;

const SETTLER_ADVICE: [&str; 6] = [
    "A trapper tells you: \"Keep your oxen well fed and they'll carry you to Oregon.\"",
    "A woman says: \"Don't wait too long to cross the mountains. Snow comes early.\"",
    "An old scout warns: \"Ford a river only where it is shallow. Better to pay the ferry.\"",
    "A missionary remarks: \"Many have fallen ill from bad water. Rest when your people are weak.\"",
    "A guide says: \"Spare wheels and axles are worth more than gold out on the trail.\"",
    "A farmer tells you: \"Hunting is good out here, but leave enough bullets for the journey.\"",
];

fn current_place(world: &World) -> Option<Location> {
    world.trail.current_location().cloned()
}

fn place_header(location: Option<&Location>, world: &World) -> String {
    location.map_or_else(
        || world.date().to_string(),
        |location| {
            let mut header = format!("{}\n{}", location.name, world.date());
            if !location.description.is_empty() {
                header.push_str("\n\n");
                header.push_str(&location.description);
            }
            header
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkCommand {
    Continue,
}

impl MenuCommand for LandmarkCommand {
    fn keyword(self) -> &'static str {
        "continue"
    }
}

pub struct LandmarkMode {
    core: ModeCore<LandmarkCommand, Option<Location>>,
}

impl LandmarkMode {
    pub fn create(world: &mut World) -> Box<dyn GameMode> {
        Box::new(Self {
            core: ModeCore::new(current_place(world)),
        })
    }
}

impl MenuMode for LandmarkMode {
    type Command = LandmarkCommand;
    type Data = Option<Location>;

    const KIND: ModeKind = ModeKind::Landmark;

    fn core(&self) -> &ModeCore<LandmarkCommand, Option<Location>> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<LandmarkCommand, Option<Location>> {
        &mut self.core
    }

    fn on_command(&mut self, command: LandmarkCommand, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {
            LandmarkCommand::Continue => ctx.remove_mode_next_tick(ModeKind::Landmark),
        }
        Ok(())
    }

    fn created(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        let header = place_header(self.core.data.as_ref(), ctx.world());
        self.core.menu.set_header(header);
        self.core.menu.add(LandmarkCommand::Continue, "Continue on the trail");
        Ok(())
    }

    fn activated(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }

    fn mode_added(&mut self, _added: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementCommand {
    BuySupplies,
    TalkToPeople,
    Continue,
}

impl MenuCommand for SettlementCommand {
    fn keyword(self) -> &'static str {
        match self {
            Self::BuySupplies => "buy",
            Self::TalkToPeople => "talk",
            Self::Continue => "continue",
        }
    }
}

pub struct SettlementMode {
    core: ModeCore<SettlementCommand, Option<Location>>,
}

impl SettlementMode {
    pub fn create(world: &mut World) -> Box<dyn GameMode> {
        Box::new(Self {
            core: ModeCore::new(current_place(world)),
        })
    }
}

impl MenuMode for SettlementMode {
    type Command = SettlementCommand;
    type Data = Option<Location>;

    const KIND: ModeKind = ModeKind::Settlement;

    fn core(&self) -> &ModeCore<SettlementCommand, Option<Location>> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<SettlementCommand, Option<Location>> {
        &mut self.core
    }

    fn on_command(&mut self, command: SettlementCommand, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {
            SettlementCommand::BuySupplies => ctx.push_mode(ModeKind::Store),
            SettlementCommand::TalkToPeople => {
                let advice = SETTLER_ADVICE
                    .choose(ctx.rng.events())
                    .copied()
                    .unwrap_or_default();
                self.core
                    .set_state(NoticeState::new(StateId::TalkToPeople, advice));
            }
            SettlementCommand::Continue => ctx.remove_mode_next_tick(ModeKind::Settlement),
        }
        Ok(())
    }

    fn created(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        let header = place_header(self.core.data.as_ref(), ctx.world());
        let menu = &mut self.core.menu;
        menu.set_header(header);
        menu.add(SettlementCommand::BuySupplies, "Buy supplies");
        menu.add(SettlementCommand::TalkToPeople, "Talk to people");
        menu.add(SettlementCommand::Continue, "Continue on the trail");
        Ok(())
    }

    fn activated(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }

    fn mode_added(&mut self, _added: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkCommand {
    Branch(usize),
}

impl MenuCommand for ForkCommand {
    fn keyword(self) -> &'static str {
        "branch"
    }
}

pub struct ForkInRoadMode {
    core: ModeCore<ForkCommand, Vec<Branch>>,
}

impl ForkInRoadMode {
    pub fn create(world: &mut World) -> Box<dyn GameMode> {
        let branches = match world.trail.current_location().map(|location| &location.kind) {
            Some(LocationKind::ForkInRoad { branches }) => branches.clone(),
            _ => Vec::new(),
        };
        Box::new(Self {
            core: ModeCore::new(branches),
        })
    }
}

impl MenuMode for ForkInRoadMode {
    type Command = ForkCommand;
    type Data = Vec<Branch>;

    const KIND: ModeKind = ModeKind::ForkInRoad;

    fn core(&self) -> &ModeCore<ForkCommand, Vec<Branch>> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<ForkCommand, Vec<Branch>> {
        &mut self.core
    }

    fn on_command(&mut self, command: ForkCommand, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        let ForkCommand::Branch(choice) = command;
        match ctx.trail.take_branch(choice) {
            Some(branch) => log::info!("took the {} ({:+} miles)", branch.name, branch.mile_delta),
            None => log::warn!("fork has no branch {choice}"),
        }
        ctx.remove_mode_next_tick(ModeKind::ForkInRoad);
        Ok(())
    }

    fn created(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        let location = current_place(ctx.world());
        let mut header = place_header(location.as_ref(), ctx.world());
        header.push_str("\n\nThe trail divides here. You may:");
        let menu = &mut self.core.menu;
        menu.set_header(header);
        for (index, branch) in self.core.data.iter().enumerate() {
            let label = match branch.mile_delta {
                0 => format!("Take the {}", branch.name),
                delta if delta < 0 => format!("Take the {} (saves {} miles)", branch.name, -delta),
                delta => format!("Take the {} (adds {delta} miles)", branch.name),
            };
            menu.add(ForkCommand::Branch(index), label);
        }
        Ok(())
    }

    fn activated(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }

    fn mode_added(&mut self, _added: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }
}
