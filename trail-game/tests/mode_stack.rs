use trail_game::config::SimulationConfig;
use trail_game::error::{SimResult, SimulationError};
use trail_game::mode::{
    GameMode, MenuMode, ModeCore, ModeCtx, ModeKind, ModeRegistry, ModeStack, NoCommand, StateId,
};
use trail_game::modes::default_registry;
use trail_game::trail::Trail;
use trail_game::world::World;
use trail_game::Simulation;

fn world() -> World {
    World::new(
        SimulationConfig::default_config(),
        Trail::load_from_static(),
        0xDEC0_DED,
    )
}

fn stack() -> ModeStack {
    ModeStack::new(default_registry())
}

/// A mode that only provides the bare minimum and none of the lifecycle hooks.
struct HooklessMode {
    core: ModeCore<NoCommand, ()>,
}

impl HooklessMode {
    fn create(_world: &mut World) -> Box<dyn GameMode> {
        Box::new(Self {
            core: ModeCore::new(()),
        })
    }
}

impl MenuMode for HooklessMode {
    type Command = NoCommand;
    type Data = ();

    const KIND: ModeKind = ModeKind::Hunt;

    fn core(&self) -> &ModeCore<NoCommand, ()> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModeCore<NoCommand, ()> {
        &mut self.core
    }

    fn on_command(&mut self, command: NoCommand, _ctx: &mut ModeCtx<'_>) -> SimResult<()> {
        match command {}
    }
}

#[test]
fn idle_simulation_renders_once_and_holds_the_clock() {
    let mut sim = Simulation::new(
        SimulationConfig::default_config(),
        Trail::load_from_static(),
        17,
    )
    .unwrap();
    assert!(sim.tick().unwrap().is_some());
    for _ in 0..50 {
        assert_eq!(sim.tick().unwrap(), None);
    }
    assert_eq!(sim.world().clock.days_elapsed(), 0);
    assert_eq!(sim.modes().active_state(), Some(StateId::ChooseProfession));
}

#[test]
fn removal_waits_for_the_next_tick() {
    let mut world = world();
    let mut stack = stack();
    stack.push(ModeKind::Travel, &mut world).unwrap();
    stack.push(ModeKind::Hunt, &mut world).unwrap();
    assert_eq!(stack.kinds(), vec![ModeKind::Travel, ModeKind::Hunt]);

    stack.pop_next_tick(ModeKind::Hunt);
    assert!(stack.removal_pending());
    assert_eq!(stack.active_mode(), Some(ModeKind::Hunt));

    stack.tick(&mut world).unwrap();
    assert!(!stack.removal_pending());
    assert_eq!(stack.kinds(), vec![ModeKind::Travel]);
}

#[test]
fn travel_at_the_first_location_looks_around_immediately() {
    let mut world = world();
    let mut stack = stack();
    stack.push(ModeKind::Travel, &mut world).unwrap();
    stack.tick(&mut world).unwrap();
    assert_eq!(stack.active_state(), Some(StateId::LookAround));

    stack.send_input("", &mut world).unwrap();
    stack.tick(&mut world).unwrap();
    assert_eq!(stack.active_state(), None);
}

#[test]
fn travel_at_a_later_location_asks_first() {
    let mut world = world();
    world.trail.depart();
    world.trail.arrive_at_next_location();
    let mut stack = stack();
    stack.push(ModeKind::Travel, &mut world).unwrap();
    stack.tick(&mut world).unwrap();
    assert_eq!(stack.active_state(), Some(StateId::LookAroundQuestion));

    stack.send_input("n", &mut world).unwrap();
    stack.tick(&mut world).unwrap();
    assert_eq!(stack.active_state(), None);
}

#[test]
fn pushing_the_top_mode_again_is_ignored() {
    let mut world = world();
    let mut stack = stack();
    assert!(stack.push(ModeKind::Travel, &mut world).unwrap());
    assert!(!stack.push(ModeKind::Travel, &mut world).unwrap());
    assert_eq!(stack.mode_count(), 1);
}

#[test]
fn missing_lifecycle_hooks_are_reported() {
    let mut world = world();
    let mut registry = ModeRegistry::new();
    registry.register(ModeKind::Hunt, HooklessMode::create);
    let mut stack = ModeStack::new(registry);

    let err = stack.push(ModeKind::Hunt, &mut world).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::HookNotImplemented {
            mode: ModeKind::Hunt,
            hook: "on_post_create",
        }
    ));
}

#[test]
fn unregistered_modes_cannot_be_pushed() {
    let mut world = world();
    let mut stack = ModeStack::new(ModeRegistry::new());
    let err = stack.push(ModeKind::Store, &mut world).unwrap_err();
    assert!(matches!(err, SimulationError::UnknownModeKind(ModeKind::Store)));
    assert_eq!(stack.mode_count(), 0);
}
