//! Sub-states a mode can step through between menu visits.

use crate::constants::PRESS_ENTER;
use crate::mode::{ModeCtx, StateId};
use crate::world::World;

/// What a state asks its owning mode to do next.
pub enum Transition<D> {
    Stay,
    Replace(Box<dyn ModeState<D>>),
    /// Drop the state and show the mode's menu again.
    ClearToMenu,
}

impl<D> Transition<D> {
    pub fn to(state: impl ModeState<D> + 'static) -> Self {
        Self::Replace(Box::new(state))
    }
}

/// A focused screen inside a mode. It reads and writes the mode's data `D`.
pub trait ModeState<D> {
    fn id(&self) -> StateId;

    /// Must not mutate anything.
    fn render(&self, data: &D, world: &World) -> String;

    /// False for informational screens that only wait for a key press.
    fn accepts_input(&self) -> bool {
        true
    }

    /// Whether the simulation clock runs while this state is on screen.
    fn passes_time(&self) -> bool {
        false
    }

    fn on_input(&mut self, line: &str, data: &mut D, ctx: &mut ModeCtx<'_>) -> Transition<D>;

    fn on_tick(&mut self, _data: &mut D, _ctx: &mut ModeCtx<'_>) -> Transition<D> {
        Transition::Stay
    }
}

pub enum StateSlot<D> {
    NoState,
    Active(Box<dyn ModeState<D>>),
}

/// A fixed message shown until the player presses enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeState {
    id: StateId,
    text: String,
}

impl NoticeState {
    #[must_use]
    pub fn new(id: StateId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl<D> ModeState<D> for NoticeState {
    fn id(&self) -> StateId {
        self.id
    }

    fn render(&self, _data: &D, _world: &World) -> String {
        format!("{}\n\n{PRESS_ENTER}", self.text)
    }

    fn accepts_input(&self) -> bool {
        false
    }

    fn on_input(&mut self, _line: &str, _data: &mut D, _ctx: &mut ModeCtx<'_>) -> Transition<D> {
        Transition::ClearToMenu
    }
}

/// Interpret a yes/no answer.
#[must_use]
pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
