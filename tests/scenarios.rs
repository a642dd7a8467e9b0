use lane_defense::{Game, approx_eq};
use lane_defense::sim::{
    self, Attacker, Command, GameEvent, GameState, Plant, PlantKind, Resource, RoundPhase,
    Snapshot, Tile,
};
use lane_defense::tuning::Tuning;

const DT: f32 = 0.05;

fn run_for(state: &mut GameState, tuning: &Tuning, seconds: f64) {
    let until = state.time + seconds;
    while state.time < until - 1e-6 {
        sim::tick(state, tuning, DT);
    }
}

/// Tick until round 1 has fully spawned, counting spawn events
fn spawn_round(state: &mut GameState, tuning: &Tuning) -> usize {
    let mut spawned = 0;
    for _ in 0..400 {
        sim::tick(state, tuning, DT);
        spawned += state
            .events
            .drain(..)
            .filter(|e| matches!(e, GameEvent::AttackerSpawned { .. }))
            .count();
        if state.round.phase == RoundPhase::Spawning && state.round.pending_spawns == 0 {
            break;
        }
    }
    spawned
}

#[test]
fn generator_emits_after_interval() {
    let mut game = Game::with_seed(2024);
    assert!(game.place_plant(2, 3, PlantKind::Generator).is_applied());

    let snapshot = game.snapshot();
    assert_eq!(snapshot.balance, 50);
    assert_eq!(snapshot.plants.len(), 1);
    assert_eq!((snapshot.plants[0].row, snapshot.plants[0].col), (2, 3));

    while game.state().time < 6.9 {
        game.step(DT);
    }
    assert!(game.snapshot().resources.is_empty(), "emitted too early");

    while game.state().time < 7.1 {
        game.step(DT);
    }
    let snapshot = game.snapshot();
    assert_eq!(snapshot.resources.len(), 1);
    let expected = game.state().board.tile_center(Tile::new(2, 3));
    assert_eq!(snapshot.resources[0].pos, expected);

    let events = game.drain_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ResourceSpawned { .. }))
    );
}

#[test]
fn collecting_credits_fixed_amount() {
    let mut game = Game::with_seed(5);
    game.place_plant(0, 0, PlantKind::Generator);
    while game.snapshot().resources.is_empty() {
        game.step(DT);
    }
    let id = game.snapshot().resources[0].id;

    assert!(game.collect_resource(id).is_applied());
    assert_eq!(game.snapshot().balance, 75);
    assert!(!game.collect_resource(id).is_applied());
    assert_eq!(game.snapshot().balance, 75);
}

#[test]
fn round_one_spawns_then_advances_to_round_two() {
    let tuning = Tuning::default();
    let mut state = GameState::new(77, &tuning);

    let spawned = spawn_round(&mut state, &tuning);
    let expected = sim::round_config(&tuning, 1).count;
    assert_eq!(expected, 7);
    assert_eq!(spawned, expected as usize);
    assert_eq!(state.attackers.len(), 7);
    assert!(state.attackers.iter().all(|a| a.hp == 450.0));

    state.attackers.clear();
    sim::tick(&mut state, &tuning, DT);
    assert_eq!(state.round.phase, RoundPhase::Cleared);
    assert!(state.events.contains(&GameEvent::RoundCleared { round: 1 }));

    run_for(&mut state, &tuning, 2.4);
    assert_eq!(state.round.number, 1, "advanced before the delay");

    let mut guard = 0;
    while state.round.number == 1 {
        sim::tick(&mut state, &tuning, DT);
        guard += 1;
        assert!(guard <= 4, "round 2 did not start on time");
    }
    assert_eq!(state.round.number, 2);
    assert_eq!(state.round.phase, RoundPhase::Spawning);
    assert_eq!(state.round.pending_spawns, 9);

    sim::tick(&mut state, &tuning, DT);
    let config = sim::round_config(&tuning, 2);
    let attacker = state.attackers.iter().next().expect("round 2 spawn");
    assert!(approx_eq(attacker.hp, config.hp, 1e-3));
    assert!(attacker.speed >= config.speed * tuning.speed_jitter_min - 1e-4);
    assert!(attacker.speed <= config.speed * tuning.speed_jitter_max + 1e-4);
}

#[test]
fn eaten_plant_dies_and_attacker_walks_on() {
    let tuning = Tuning::default();
    let mut state = GameState::new(3, &tuning);
    let center = state.board.tile_center(Tile::new(2, 3));

    let plant_id = state.next_entity_id();
    state.plants.insert(Plant {
        id: plant_id,
        kind: PlantKind::Generator,
        row: 2,
        col: 3,
        cooldown: 100.0,
        hp: 300.0,
    });
    let attacker_id = state.next_entity_id();
    state.attackers.insert(Attacker {
        id: attacker_id,
        row: 2,
        x: center.x,
        hp: 450.0,
        speed: 18.0,
        eating: false,
    });

    let mut ticks = 0;
    while state.plants.get(plant_id).is_some() {
        sim::tick(&mut state, &tuning, DT);
        ticks += 1;
        assert!(ticks < 500, "plant never died");
        let attacker = state.attackers.get(attacker_id).unwrap();
        assert!(attacker.eating);
        assert_eq!(attacker.x, center.x);
    }
    // 300 hp at 15 hp/s
    assert!((399..=401).contains(&ticks), "took {ticks} ticks");
    assert!(
        state
            .events
            .contains(&GameEvent::PlantDestroyed { plant: plant_id })
    );

    sim::tick(&mut state, &tuning, DT);
    let attacker = state.attackers.get(attacker_id).unwrap();
    assert!(!attacker.eating);
    assert!(attacker.x < center.x);
}

#[test]
fn uncollected_resource_expires_without_credit() {
    let tuning = Tuning::default();
    let mut state = GameState::new(9, &tuning);
    let id = state.next_entity_id();
    state.resources.insert(Resource {
        id,
        pos: glam::Vec2::new(100.0, 100.0),
        ttl: 6.5,
    });

    run_for(&mut state, &tuning, 6.4);
    assert!(state.resources.get(id).is_some());

    run_for(&mut state, &tuning, 0.15);
    assert!(state.resources.get(id).is_none());
    assert_eq!(state.balance, 100);
}

#[test]
fn shooters_defend_their_lane() {
    let tuning = Tuning::default();
    let mut state = GameState::new(21, &tuning);
    state.balance = 1000;
    sim::economy::place_plant(&mut state, &tuning, Tile::new(1, 0), PlantKind::SingleShooter)
        .unwrap();
    let id = state.next_entity_id();
    state.attackers.insert(Attacker {
        id,
        row: 1,
        x: 700.0,
        hp: 100.0,
        speed: 18.0,
        eating: false,
    });

    // 100 hp at 20 per projectile needs five hits
    run_for(&mut state, &tuning, 8.0);
    assert!(state.attackers.get(id).is_none());
    assert!(state.events.contains(&GameEvent::AttackerKilled { attacker: id }));
}

#[test]
fn game_over_is_terminal_until_reset() {
    let mut game = Game::with_seed(1);
    game.step(DT);
    let tuning = game.tuning().clone();

    // Nothing defends; run until the first attacker breaks through
    let mut guard = 0;
    while !game.state().is_over() {
        game.step(DT);
        guard += 1;
        assert!(guard < 20_000, "attackers never arrived");
    }
    assert!(game.state().attackers.iter().any(|a| a.x <= 0.0));
    assert!(game.drain_events().contains(&GameEvent::GameOver { round: 1 }));

    let frozen = game.snapshot();
    for _ in 0..100 {
        game.step(DT);
    }
    assert!(!game.place_plant(0, 0, PlantKind::Generator).is_applied());
    assert_eq!(game.snapshot(), frozen);
    assert!(game.drain_events().is_empty());

    assert!(game.reset().is_applied());
    let fresh: Snapshot = game.snapshot();
    assert!(!fresh.game_over);
    assert_eq!(fresh.round, 1);
    assert_eq!(fresh.balance, tuning.starting_balance);
    assert!(fresh.attackers.is_empty());
    assert!(game.state().scheduler.is_empty());
}

#[test]
fn reset_mid_spawn_drops_queued_spawns() {
    let tuning = Tuning::default();
    let mut state = GameState::new(31, &tuning);

    run_for(&mut state, &tuning, 2.0);
    assert_eq!(state.round.phase, RoundPhase::Spawning);
    assert!(state.round.pending_spawns > 0);
    assert!(!state.scheduler.is_empty());

    assert!(sim::apply(&mut state, &tuning, Command::Reset).is_applied());
    assert!(state.scheduler.is_empty());
    assert!(state.attackers.is_empty());

    let spawned = spawn_round(&mut state, &tuning);
    assert_eq!(spawned, sim::round_config(&tuning, 1).count as usize);
    assert_eq!(state.attackers.len(), spawned);
    assert_eq!(state.round.number, 1);
}

#[test]
fn reset_while_cleared_drops_round_advance() {
    let tuning = Tuning::default();
    let mut state = GameState::new(32, &tuning);

    spawn_round(&mut state, &tuning);
    state.attackers.clear();
    sim::tick(&mut state, &tuning, DT);
    assert_eq!(state.round.phase, RoundPhase::Cleared);

    assert!(sim::apply(&mut state, &tuning, Command::Reset).is_applied());
    assert!(state.scheduler.is_empty());

    // Well past the old advance time, still in round 1
    let spawned = spawn_round(&mut state, &tuning);
    assert_eq!(spawned, 7);
    run_for(&mut state, &tuning, f64::from(tuning.round_delay) + 1.0);
    assert_eq!(state.round.number, 1);
    assert_eq!(state.round.phase, RoundPhase::Spawning);
}
