use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use trail_game::config::SimulationConfig;
use trail_game::entity::{EventTarget, Inventory, ItemKind, Person, Profession};
use trail_game::event::prefab::NO_LOSS_OF_ITEMS;
use trail_game::event::{
    EventCategory, EventDirector, EventExecution, EventKind, destroy_items, try_kill_passengers,
};
use trail_game::trail::Trail;
use trail_game::world::{Directive, Ending, World};
use trail_game::Simulation;

fn world() -> World {
    let mut world = World::new(
        SimulationConfig::default_config(),
        Trail::load_from_static(),
        99,
    );
    world.vehicle.reset_passengers(vec![
        Person::new("Ezra", Profession::Banker, true),
        Person::new("Mary", Profession::Banker, false),
        Person::new("Jed", Profession::Banker, false),
    ]);
    world
}

#[test]
fn manual_events_are_never_selected_by_category() {
    let director = EventDirector::with_default_events();
    for category in [
        EventCategory::Vehicle,
        EventCategory::Animal,
        EventCategory::Person,
        EventCategory::Warning,
        EventCategory::Weather,
        EventCategory::Wild,
        EventCategory::RiverCross,
    ] {
        for kind in director.eligible(category) {
            assert_eq!(kind.execution(), EventExecution::Automatic, "{kind:?}");
            assert_eq!(kind.category(), category);
        }
    }
    assert!(!director.eligible(EventCategory::Person).contains(&EventKind::DeathPlayer));
    assert!(director.eligible(EventCategory::Weather).contains(&EventKind::HeavyFog));
    assert!(!director.eligible(EventCategory::Weather).contains(&EventKind::HailStorm));
}

#[test]
fn empty_categories_select_nothing() {
    let director = EventDirector::with_default_events();
    let mut world = world();
    for _ in 0..20 {
        assert!(
            director
                .trigger_event_by_type(&mut world, EventTarget::Vehicle, EventCategory::Warning)
                .is_none()
        );
        assert!(
            director
                .trigger_event_by_type(&mut world, EventTarget::Vehicle, EventCategory::RiverCross)
                .is_none()
        );
    }
}

#[test]
fn manual_events_fire_by_name() {
    let director = EventDirector::with_default_events();
    let mut world = world();
    world.vehicle.inventory.add(ItemKind::Food, 20);
    let outcome = director
        .trigger_event(&mut world, EventTarget::Vehicle, EventKind::LowFood)
        .unwrap();
    assert_eq!(outcome.kind, EventKind::LowFood);
    assert!(!outcome.text.is_empty());
}

#[test]
fn destroyer_on_an_empty_wagon_reports_no_loss() {
    let director = EventDirector::with_default_events();
    let mut world = world();
    let outcome = director
        .trigger_event(&mut world, EventTarget::Vehicle, EventKind::VehicleFire)
        .unwrap();
    assert!(outcome.text.contains(NO_LOSS_OF_ITEMS), "{}", outcome.text);
    assert!(world.vehicle.passengers.iter().all(Person::is_alive));
}

#[test]
fn destroyed_amounts_never_exceed_stock() {
    let cfg = SimulationConfig::default_config().destroyer;
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for _ in 0..100 {
        let mut inventory = Inventory::default();
        inventory.add(ItemKind::Food, 30);
        inventory.add(ItemKind::Clothes, 1);
        inventory.add(ItemKind::Cash, 500);
        let destroyed = destroy_items(&mut inventory, &cfg, &mut rng);
        assert!(!destroyed.contains_key(&ItemKind::Cash));
        for (item, lost) in &destroyed {
            assert!(*lost >= 1);
            assert!(inventory.quantity(*item) >= 0);
        }
        assert_eq!(
            inventory.quantity(ItemKind::Food) + destroyed.get(&ItemKind::Food).copied().unwrap_or(0),
            30
        );
    }
}

#[test]
fn the_dead_are_not_killed_again() {
    let mut world = world();
    world.config.destroyer.kill_pct = 100;
    for person in &mut world.vehicle.passengers {
        person.kill();
    }
    let text = try_kill_passengers(&mut world, "drowned");
    assert_eq!(text, "Everyone escaped unharmed.");
    assert_eq!(world.pending_directives(), 0);

    let director = EventDirector::with_default_events();
    assert!(
        director
            .trigger_event_by_type(&mut world, EventTarget::Person(1), EventCategory::Person)
            .is_none()
    );
}

#[test]
fn a_certain_kill_ends_with_the_leader() {
    let mut world = world();
    world.config.destroyer.kill_pct = 100;
    let text = try_kill_passengers(&mut world, "burned");
    assert!(text.contains("Ezra, the party leader, was burned."));
    assert_eq!(world.vehicle.living_passengers(), 0);
    assert_eq!(world.pending_directives(), 1);
}

#[test]
fn weather_selection_only_ever_picks_heavy_fog() {
    let director = EventDirector::with_default_events();
    for seed in 0..64 {
        let mut world = World::new(
            SimulationConfig::default_config(),
            Trail::load_from_static(),
            seed,
        );
        let outcome = director
            .trigger_event_by_type(&mut world, EventTarget::Vehicle, EventCategory::Weather)
            .unwrap();
        assert_eq!(outcome.kind, EventKind::HeavyFog, "seed {seed}");
    }
}

#[test]
fn fatal_sprain_on_the_leader_ends_the_game() {
    let mut sim = Simulation::new(
        SimulationConfig::default_config(),
        Trail::load_from_static(),
        7,
    )
    .unwrap();
    let world = sim.world_mut();
    world.vehicle.reset_passengers(vec![
        Person::new("Ezra", Profession::Banker, true),
        Person::new("Mary", Profession::Banker, false),
    ]);
    world.vehicle.passengers[0].set_health(10);
    world.send(Directive::TriggerEvent {
        target: EventTarget::Person(0),
        kind: EventKind::SprainedMuscle,
    });

    sim.tick().unwrap();
    assert!(!sim.world().vehicle.passengers[0].is_alive());
    assert_eq!(sim.world().ending, Some(Ending::LeaderDied));
}
