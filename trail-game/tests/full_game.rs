use trail_game::config::SimulationConfig;
use trail_game::constants::HEALTH_MAX;
use trail_game::entity::ItemKind;
use trail_game::mode::{ModeKind, StateId};
use trail_game::trail::Trail;
use trail_game::{Ending, Simulation};

const OUTFIT: [(&str, &str); 4] = [("oxen", "6"), ("food", "900"), ("clothing", "8"), ("ammunition", "200")];

fn new_game(seed: u64) -> Simulation {
    Simulation::new(
        SimulationConfig::default_config(),
        Trail::load_from_static(),
        seed,
    )
    .unwrap()
}

fn send(sim: &mut Simulation, line: &str) {
    sim.send_input_line(line).unwrap();
    sim.tick().unwrap();
}

fn create_party(sim: &mut Simulation) {
    sim.tick().unwrap();
    send(sim, "banker");
    for name in ["Ezra", "", "", ""] {
        send(sim, name);
    }
    assert_eq!(sim.modes().active_state(), Some(StateId::ConfirmParty));
    send(sim, "y");
}

fn outfit_wagon(sim: &mut Simulation) {
    assert_eq!(sim.modes().active_mode(), Some(ModeKind::Store));
    assert_eq!(sim.modes().active_state(), Some(StateId::StoreAdvice));
    send(sim, "");
    for (item, quantity) in OUTFIT {
        send(sim, item);
        send(sim, quantity);
    }
    send(sim, "leave");
}

/// Pick the answer a cautious player would give on the current screen.
/// `None` means the screen needs no input right now.
fn answer(sim: &Simulation) -> Option<&'static str> {
    let state = sim.modes().active_state();
    match (sim.modes().active_mode()?, state) {
        (ModeKind::Travel, Some(StateId::Drive | StateId::Resting)) => None,
        (ModeKind::Travel, Some(StateId::LookAroundQuestion)) => Some("n"),
        (ModeKind::Travel, Some(_)) => Some(""),
        (ModeKind::Travel, None) => Some("continue"),
        (ModeKind::RiverCrossing, None) => Some("ferry"),
        (ModeKind::RiverCrossing, Some(StateId::ConfirmCrossing)) => Some("y"),
        (ModeKind::ForkInRoad, None) => Some("1"),
        (ModeKind::Landmark | ModeKind::Settlement, None) => Some("continue"),
        (_, Some(_)) => Some(""),
        (_, None) => Some("leave"),
    }
}

#[test]
fn new_party_is_seeded_from_the_confirmation() {
    let mut sim = new_game(5);
    create_party(&mut sim);
    let world = sim.world();
    assert_eq!(world.vehicle.passengers.len(), 4);
    assert_eq!(world.vehicle.leader().map(|leader| leader.name()), Some("Ezra"));
    assert_eq!(world.vehicle.balance_cents, 160_000);
    assert!(!sim.modes().contains(ModeKind::NewGame));
    assert_eq!(sim.modes().kinds(), vec![ModeKind::Travel, ModeKind::Store]);
}

#[test]
fn store_purchases_reach_the_wagon() {
    let mut sim = new_game(5);
    create_party(&mut sim);
    outfit_wagon(&mut sim);

    let world = sim.world();
    assert_eq!(sim.modes().active_mode(), Some(ModeKind::Travel));
    assert_eq!(sim.modes().active_state(), Some(StateId::LookAround));
    assert_eq!(world.vehicle.inventory.quantity(ItemKind::Animal), 6);
    assert_eq!(world.vehicle.inventory.quantity(ItemKind::Food), 900);
    assert_eq!(world.vehicle.balance_cents, 160_000 - 12_000 - 18_000 - 8_000 - 2_000);
}

#[test]
fn scripted_journey_stays_within_bounds() {
    let mut sim = new_game(1848);
    create_party(&mut sim);
    outfit_wagon(&mut sim);
    let start = sim.world().date();

    for _ in 0..40_000 {
        if sim.is_destroyed() {
            break;
        }
        if sim.modes().active_state() == Some(StateId::ContinueOnTrail) {
            // The team is gone; nothing left to drive.
            break;
        }
        if let Some(line) = answer(&sim) {
            sim.send_input_line(line).unwrap();
        }
        sim.tick().unwrap();

        let world = sim.world();
        for person in &world.vehicle.passengers {
            assert!((0..=HEALTH_MAX).contains(&person.health()), "{person:?}");
        }
        assert!(world.vehicle.mileage >= 0);
        assert!(world.vehicle.inventory.quantity(ItemKind::Food) >= 0);
    }

    let world = sim.world();
    assert_ne!(world.date(), start, "the calendar must move while travelling");
    assert!(world.clock.days_elapsed() > 0);
    assert!(world.vehicle.odometer > 0);
    if sim.is_destroyed() {
        assert!(matches!(
            world.ending,
            Some(Ending::LeaderDied | Ending::ReachedDestination)
        ));
    }
}

#[test]
fn same_seed_same_journey() {
    let run = |seed| {
        let mut sim = new_game(seed);
        create_party(&mut sim);
        outfit_wagon(&mut sim);
        for _ in 0..2_000 {
            if sim.is_destroyed() {
                break;
            }
            if let Some(line) = answer(&sim) {
                sim.send_input_line(line).unwrap();
            }
            sim.tick().unwrap();
        }
        let world = sim.world();
        (
            world.date(),
            world.vehicle.odometer,
            world.vehicle.inventory.quantity(ItemKind::Food),
            world.rng.total_draws(),
        )
    };
    assert_eq!(run(77), run(77));
}
