//! Shows the text of events that just happened, one screen per event.

use crate::constants::PRESS_ENTER;
use crate::error::SimResult;
use crate::mode::{
    GameMode, MenuMode, ModeCore, ModeCtx, ModeKind, ModeState, NoCommand, StateId, Transition,
};
use crate::world::World;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventNoticeInfo {
    pub text: String,
}

pub struct RandomEventMode {
    core: ModeCore<NoCommand, EventNoticeInfo>,
}

impl RandomEventMode {
    pub fn create(_world: &mut World) -> Box<dyn GameMode> {
        Box::new(Self {
            core: ModeCore::new(EventNoticeInfo::default()),
        })
    }
}

impl MenuMode for RandomEventMode {
    type Command = NoCommand;
    type Data = EventNoticeInfo;

    const KIND: ModeKind = ModeKind::RandomEvent;

    fn core(&self) -> &ModeCore<NoCommand, EventNoticeInfo> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<NoCommand, EventNoticeInfo> {
        &mut self.core
    }

    fn on_command(&mut self, command: NoCommand, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {}
    }

    fn created(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.core.data.text = ctx.next_notice().unwrap_or_default();
        self.core.set_state(EventNoticeState);
        Ok(())
    }

    fn activated(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }

    fn mode_added(&mut self, _added: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }
}

/// Displays the current event text until acknowledged.
pub struct EventNoticeState;

impl ModeState<EventNoticeInfo> for EventNoticeState {
    fn id(&self) -> StateId {
        StateId::EventNotice
    }

    fn render(&self, data: &EventNoticeInfo, world: &World) -> String {
        format!("{}\n\n{}\n\n{PRESS_ENTER}", world.date(), data.text)
    }

    fn accepts_input(&self) -> bool {
        false
    }

    fn on_input(
        &mut self,
        _line: &str,
        data: &mut EventNoticeInfo,
        ctx: &mut ModeCtx<'_>,
    ) -> Transition<EventNoticeInfo> {
        if let Some(next) = ctx.next_notice() {
            data.text = next;
        } else if let Some(ending) = ctx.ending {
            log::info!("game over: {ending:?}");
            ctx.shutdown();
        } else {
            ctx.remove_mode_next_tick(ModeKind::RandomEvent);
        }
        Transition::Stay
    }
}
