//! Shared plumbing for modes built from a menu plus optional states.

use crate::error::{SimResult, SimulationError};
use crate::mode::{GameMode, Menu, MenuCommand, ModeCtx, ModeKind, ModeState, StateId, StateSlot, Transition};
use crate::world::World;

/// Menu, mode data and the active state of one mode.
pub struct ModeCore<C, D> {
    pub menu: Menu<C>,
    pub data: D,
    slot: StateSlot<D>,
    state_changed: bool,
}

impl<C: MenuCommand, D: 'static> ModeCore<C, D> {
    #[must_use]
    pub fn new(data: D) -> Self {
        Self {
            menu: Menu::new(),
            data,
            slot: StateSlot::NoState,
            state_changed: false,
        }
    }

    pub fn set_state(&mut self, state: impl ModeState<D> + 'static) {
        self.slot = StateSlot::Active(Box::new(state));
        self.state_changed = true;
    }

    /// Drop the active state, if any, and return to the menu.
    pub fn clear_state(&mut self) {
        if matches!(self.slot, StateSlot::Active(_)) {
            self.slot = StateSlot::NoState;
            self.state_changed = true;
        }
    }

    #[must_use]
    pub fn state_id(&self) -> Option<StateId> {
        match &self.slot {
            StateSlot::Active(state) => Some(state.id()),
            StateSlot::NoState => None,
        }
    }

    #[must_use]
    pub const fn has_state(&self) -> bool {
        matches!(self.slot, StateSlot::Active(_))
    }

    #[must_use]
    pub fn render(&self, world: &World) -> String {
        match &self.slot {
            StateSlot::Active(state) => state.render(&self.data, world),
            StateSlot::NoState => self.menu.render(),
        }
    }

    fn take_slot(&mut self) -> StateSlot<D> {
        std::mem::replace(&mut self.slot, StateSlot::NoState)
    }

    fn resolve(&mut self, state: Box<dyn ModeState<D>>, transition: Transition<D>) {
        match transition {
            Transition::Stay => self.slot = StateSlot::Active(state),
            Transition::Replace(next) => {
                self.slot = StateSlot::Active(next);
                self.state_changed = true;
            }
            Transition::ClearToMenu => {
                self.slot = StateSlot::NoState;
                self.state_changed = true;
            }
        }
    }

    const fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.state_changed, false)
    }
}

const fn missing_hook(mode: ModeKind, hook: &'static str) -> SimulationError {
    SimulationError::HookNotImplemented { mode, hook }
}

/// A mode driven by a command menu. Implementing this gives a [`GameMode`].
///
/// `created`, `activated` and `mode_added` must be provided by every mode that
/// can end up on a live stack; the defaults report a contract violation.
pub trait MenuMode: 'static {
    type Command: MenuCommand;
    type Data: 'static;

    const KIND: ModeKind;

    fn core(&self) -> &ModeCore<Self::Command, Self::Data>;

    fn core_mut(&mut self) -> &mut ModeCore<Self::Command, Self::Data>;

    /// Run a menu command chosen by the player.
    ///
    /// # Errors
    ///
    /// Propagates errors from the command.
    fn on_command(&mut self, command: Self::Command, ctx: &mut ModeCtx<'_>) -> SimResult<()>;

    /// # Errors
    ///
    /// Defaults to [`SimulationError::HookNotImplemented`].
    fn created(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Err(missing_hook(Self::KIND, "on_post_create"))
    }

    /// # Errors
    ///
    /// Defaults to [`SimulationError::HookNotImplemented`].
    fn activated(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Err(missing_hook(Self::KIND, "on_mode_activate"))
    }

    /// # Errors
    ///
    /// Defaults to [`SimulationError::HookNotImplemented`].
    fn mode_added(&mut self, _added: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Err(missing_hook(Self::KIND, "on_mode_added"))
    }

    /// # Errors
    ///
    /// Propagates errors raised by the mode.
    fn mode_removed(&mut self, _removed: ModeKind, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }

    /// Rebuild the menu after a state was entered or left.
    fn state_changed(&mut self, _world: &World) {}

    /// # Errors
    ///
    /// Propagates errors raised by the mode.
    fn ticked(&mut self, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        Ok(())
    }
}

fn flush_state_change<M: MenuMode>(mode: &mut M, world: &World) {
    if mode.core_mut().take_changed() {
        mode.state_changed(world);
    }
}

impl<M: MenuMode> GameMode for M {
    fn kind(&self) -> ModeKind {
        M::KIND
    }

    fn on_post_create(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.created(ctx)?;
        flush_state_change(self, ctx.world());
        Ok(())
    }

    fn on_mode_activate(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.activated(ctx)?;
        flush_state_change(self, ctx.world());
        Ok(())
    }

    fn on_mode_added(&mut self, added: ModeKind, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.mode_added(added, ctx)?;
        flush_state_change(self, ctx.world());
        Ok(())
    }

    fn on_mode_removed(&mut self, removed: ModeKind, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.mode_removed(removed, ctx)?;
        flush_state_change(self, ctx.world());
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        self.ticked(ctx)?;
        let core = self.core_mut();
        if let StateSlot::Active(mut state) = core.take_slot() {
            let transition = state.on_tick(&mut core.data, ctx);
            core.resolve(state, transition);
        }
        flush_state_change(self, ctx.world());
        Ok(())
    }

    fn on_input(&mut self, line: &str, ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        let core = self.core_mut();
        match core.take_slot() {
            StateSlot::Active(mut state) => {
                let transition = state.on_input(line, &mut core.data, ctx);
                core.resolve(state, transition);
            }
            StateSlot::NoState => match core.menu.parse(line) {
                Some(command) => {
                    log::debug!("{:?} runs {command:?}", M::KIND);
                    self.on_command(command, ctx)?;
                }
                None => log::debug!("{:?} ignored input {line:?}", M::KIND),
            },
        }
        flush_state_change(self, ctx.world());
        Ok(())
    }

    fn render(&self, world: &World) -> String {
        self.core().render(world)
    }

    fn current_state(&self) -> Option<StateId> {
        self.core().state_id()
    }

    fn accepts_input(&self) -> bool {
        match &self.core().slot {
            StateSlot::Active(state) => state.accepts_input(),
            StateSlot::NoState => true,
        }
    }

    fn passes_time(&self) -> bool {
        match &self.core().slot {
            StateSlot::Active(state) => state.passes_time(),
            StateSlot::NoState => false,
        }
    }
}
