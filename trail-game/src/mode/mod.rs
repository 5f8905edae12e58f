//! Game modes: the stack of screens the player interacts with.
//!
//! Only the topmost mode receives ticks and input. Most modes are a [`Menu`] of
//! commands plus an optional [`ModeState`] that temporarily takes over the
//! screen; [`MenuMode`] implements [`GameMode`] for all of them.

pub mod menu;
pub mod menu_mode;
pub mod stack;
pub mod state;

pub use menu::{Menu, MenuCommand, MenuEntry, NoCommand};
pub use menu_mode::{MenuMode, ModeCore};
pub use stack::{ModeFactory, ModeRegistry, ModeStack};
pub use state::{ModeState, NoticeState, StateSlot, Transition, parse_yes_no};

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::entity::EventTarget;
use crate::error::SimResult;
use crate::event::{EventCategory, EventKind};
use crate::world::{Directive, Milestone, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    NewGame,
    Travel,
    Store,
    Trade,
    Hunt,
    RandomEvent,
    RiverCrossing,
    Landmark,
    Settlement,
    ForkInRoad,
}

impl ModeKind {
    /// Modes pushed by arriving at a trail location.
    #[must_use]
    pub const fn is_location(self) -> bool {
        matches!(
            self,
            Self::RiverCrossing | Self::Landmark | Self::Settlement | Self::ForkInRoad
        )
    }
}

/// Every state any mode can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateId {
    ChooseProfession,
    InputName,
    ConfirmParty,
    LookAround,
    LookAroundQuestion,
    ContinueOnTrail,
    Drive,
    ChangePace,
    PaceAdvice,
    ChangeRations,
    CheckSupplies,
    LookAtMap,
    RestQuestion,
    Resting,
    BuyItem,
    MissingItem,
    StoreDebt,
    StoreAdvice,
    TradeResult,
    HuntResult,
    EventNotice,
    ConfirmCrossing,
    CrossingResult,
    TalkToPeople,
}

/// Access to the world for mode hooks, plus helpers that queue directives.
pub struct ModeCtx<'a> {
    world: &'a mut World,
    mode_count: usize,
}

impl<'a> ModeCtx<'a> {
    pub const fn new(world: &'a mut World, mode_count: usize) -> Self {
        Self { world, mode_count }
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &*self.world
    }

    /// Modes on the stack when this hook was invoked.
    #[must_use]
    pub const fn mode_count(&self) -> usize {
        self.mode_count
    }

    pub fn push_mode(&mut self, kind: ModeKind) {
        self.world.send(Directive::PushMode(kind));
    }

    /// Removal takes effect at the start of the next tick.
    pub fn remove_mode_next_tick(&mut self, kind: ModeKind) {
        self.world.send(Directive::RemoveMode(kind));
    }

    pub fn trigger_event(&mut self, target: EventTarget, kind: EventKind) {
        self.world.send(Directive::TriggerEvent { target, kind });
    }

    pub fn trigger_category(&mut self, target: EventTarget, category: EventCategory) {
        self.world.send(Directive::TriggerCategory { target, category });
    }

    pub fn record_milestone(&mut self, milestone: Milestone) {
        self.world.send(Directive::RecordMilestone(milestone));
    }

    pub fn shutdown(&mut self) {
        self.world.send(Directive::Shutdown);
    }
}

impl Deref for ModeCtx<'_> {
    type Target = World;

    fn deref(&self) -> &World {
        &*self.world
    }
}

impl DerefMut for ModeCtx<'_> {
    fn deref_mut(&mut self) -> &mut World {
        &mut *self.world
    }
}

/// A mode on the stack, as seen by the stack manager.
pub trait GameMode {
    fn kind(&self) -> ModeKind;

    /// Called once, right after the mode was pushed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimulationError::HookNotImplemented`] if the mode does not provide it.
    fn on_post_create(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()>;

    /// Called when the mode becomes the top of the stack.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimulationError::HookNotImplemented`] if the mode does not provide it.
    fn on_mode_activate(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()>;

    /// Called on every other mode when `added` is pushed above it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimulationError::HookNotImplemented`] if the mode does not provide it.
    fn on_mode_added(&mut self, added: ModeKind, ctx: &mut ModeCtx<'_>) -> SimResult<()>;

    /// Called on the removed mode and every remaining one.
    ///
    /// # Errors
    ///
    /// Propagates errors raised by the mode.
    fn on_mode_removed(&mut self, removed: ModeKind, ctx: &mut ModeCtx<'_>) -> SimResult<()>;

    /// # Errors
    ///
    /// Propagates errors raised by the mode.
    fn on_tick(&mut self, ctx: &mut ModeCtx<'_>) -> SimResult<()>;

    /// # Errors
    ///
    /// Propagates errors raised by the mode.
    fn on_input(&mut self, line: &str, ctx: &mut ModeCtx<'_>) -> SimResult<()>;

    fn render(&self, world: &World) -> String;

    fn current_state(&self) -> Option<StateId>;

    fn accepts_input(&self) -> bool;

    fn passes_time(&self) -> bool;
}
