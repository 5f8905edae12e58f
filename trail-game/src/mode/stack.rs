//! The mode stack manager.

use std::collections::BTreeMap;

use crate::error::{SimResult, SimulationError};
use crate::mode::{GameMode, ModeCtx, ModeKind, StateId};
use crate::world::World;

/// Builds a fresh mode instance.
pub type ModeFactory = fn(&mut World) -> Box<dyn GameMode>;

/// Maps each mode kind to the factory that builds it.
#[derive(Debug, Clone, Default)]
pub struct ModeRegistry {
    factories: BTreeMap<ModeKind, ModeFactory>,
}

impl ModeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ModeKind, factory: ModeFactory) {
        self.factories.insert(kind, factory);
    }

    #[must_use]
    pub fn contains(&self, kind: ModeKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownModeKind`] when no factory is registered.
    pub fn build(&self, kind: ModeKind, world: &mut World) -> SimResult<Box<dyn GameMode>> {
        let factory = self
            .factories
            .get(&kind)
            .ok_or(SimulationError::UnknownModeKind(kind))?;
        Ok(factory(world))
    }
}

struct StackedMode {
    id: u64,
    mode: Box<dyn GameMode>,
}

/// Ordered stack of live modes. Only the top one is ticked, rendered and fed input.
pub struct ModeStack {
    registry: ModeRegistry,
    modes: Vec<StackedMode>,
    pending_removal: Vec<ModeKind>,
    active_id: Option<u64>,
    next_id: u64,
}

impl std::fmt::Debug for ModeStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeStack")
            .field("modes", &self.kinds())
            .field("pending_removal", &self.pending_removal)
            .finish_non_exhaustive()
    }
}

impl ModeStack {
    #[must_use]
    pub const fn new(registry: ModeRegistry) -> Self {
        Self {
            registry,
            modes: Vec::new(),
            pending_removal: Vec::new(),
            active_id: None,
            next_id: 0,
        }
    }

    #[must_use]
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Kind of the topmost mode.
    #[must_use]
    pub fn active_mode(&self) -> Option<ModeKind> {
        self.top().map(GameMode::kind)
    }

    #[must_use]
    pub fn top(&self) -> Option<&dyn GameMode> {
        self.modes.last().map(|entry| entry.mode.as_ref())
    }

    #[must_use]
    pub fn active_state(&self) -> Option<StateId> {
        self.top().and_then(GameMode::current_state)
    }

    /// Mode kinds from bottom to top.
    #[must_use]
    pub fn kinds(&self) -> Vec<ModeKind> {
        self.modes.iter().map(|entry| entry.mode.kind()).collect()
    }

    #[must_use]
    pub fn contains(&self, kind: ModeKind) -> bool {
        self.modes.iter().any(|entry| entry.mode.kind() == kind)
    }

    /// Build and push a mode. Pushing the kind already on top is a no-op and
    /// returns `false`.
    ///
    /// # Errors
    ///
    /// Fails for unregistered kinds or when a lifecycle hook fails.
    pub fn push(&mut self, kind: ModeKind, world: &mut World) -> SimResult<bool> {
        if self.active_mode() == Some(kind) {
            log::debug!("{kind:?} already on top of the stack");
            return Ok(false);
        }
        let mode = self.registry.build(kind, world)?;
        let id = self.next_id;
        self.next_id += 1;
        self.modes.push(StackedMode { id, mode });
        log::info!("pushed {kind:?} ({} modes)", self.modes.len());

        let mut ctx = ModeCtx::new(world, self.modes.len());
        if let Some((added, below)) = self.modes.split_last_mut() {
            added.mode.on_post_create(&mut ctx)?;
            for entry in below {
                entry.mode.on_mode_added(kind, &mut ctx)?;
            }
        }
        Ok(true)
    }

    /// Request removal of the topmost mode of `kind` at the start of the next tick.
    pub fn pop_next_tick(&mut self, kind: ModeKind) {
        self.pending_removal.push(kind);
    }

    #[must_use]
    pub fn removal_pending(&self) -> bool {
        !self.pending_removal.is_empty()
    }

    fn apply_pending_removals(&mut self, world: &mut World) -> SimResult<()> {
        for kind in std::mem::take(&mut self.pending_removal) {
            let Some(position) = self.modes.iter().rposition(|entry| entry.mode.kind() == kind) else {
                log::warn!("removal of {kind:?} requested but it is not on the stack");
                continue;
            };
            let mut removed = self.modes.remove(position);
            log::info!("removed {kind:?} ({} modes)", self.modes.len());

            let mut ctx = ModeCtx::new(world, self.modes.len());
            removed.mode.on_mode_removed(kind, &mut ctx)?;
            for entry in &mut self.modes {
                entry.mode.on_mode_removed(kind, &mut ctx)?;
            }
        }
        Ok(())
    }

    /// Apply deferred removals, activate a new top mode, then tick it.
    ///
    /// # Errors
    ///
    /// Propagates lifecycle hook failures.
    pub fn tick(&mut self, world: &mut World) -> SimResult<()> {
        self.apply_pending_removals(world)?;
        let count = self.modes.len();
        let Some(top) = self.modes.last_mut() else {
            self.active_id = None;
            return Ok(());
        };
        let mut ctx = ModeCtx::new(world, count);
        if self.active_id != Some(top.id) {
            self.active_id = Some(top.id);
            log::debug!("activating {:?}", top.mode.kind());
            top.mode.on_mode_activate(&mut ctx)?;
        }
        top.mode.on_tick(&mut ctx)
    }

    /// Route one line of input to the top mode.
    ///
    /// # Errors
    ///
    /// Propagates failures raised by the mode.
    pub fn send_input(&mut self, line: &str, world: &mut World) -> SimResult<()> {
        let count = self.modes.len();
        let Some(top) = self.modes.last_mut() else {
            return Ok(());
        };
        top.mode.on_input(line, &mut ModeCtx::new(world, count))
    }

    #[must_use]
    pub fn render(&self, world: &World) -> Option<String> {
        self.top().map(|mode| mode.render(world))
    }

    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.top().is_some_and(GameMode::accepts_input)
    }

    /// Whether the top mode lets the clock run.
    #[must_use]
    pub fn passes_time(&self) -> bool {
        self.top().is_some_and(GameMode::passes_time)
    }

    pub fn clear(&mut self) {
        self.modes.clear();
        self.pending_removal.clear();
        self.active_id = None;
    }
}
