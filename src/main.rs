//! Lane Defense entry point
//!
//! Native builds run a headless session driven by a simple bot and print a
//! summary. The browser build is driven through `platform::web` instead.
//!
//! Usage: `lane-defense [seed] [seconds] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_defense::{Game, Settings, Tuning};

    env_logger::init();
    log::info!("Lane Defense (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(180.0);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut game = Game::new(seed, tuning, Settings::default());
    let summary = autoplay::run(&mut game, seconds);

    println!("seed {seed}, {:.1}s simulated", summary.elapsed);
    println!(
        "round {} | balance {} | plants {} | kills {} | collected {}",
        summary.round, summary.balance, summary.plants, summary.kills, summary.collected
    );
    if summary.game_over {
        println!("Game over - the attackers broke through.");
    } else {
        println!("Still holding the line.");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use lane_defense::Game;
    use lane_defense::consts::{COLS, ROWS};
    use lane_defense::sim::{GameEvent, PlantKind, Tile};

    const DT: f32 = 1.0 / 60.0;

    pub struct Summary {
        pub elapsed: f32,
        pub round: u32,
        pub balance: u32,
        pub plants: usize,
        pub kills: u32,
        pub collected: u32,
        pub game_over: bool,
    }

    /// Build order: one generator per lane, then shooters column by column
    fn build_order() -> Vec<(Tile, PlantKind)> {
        let mut order: Vec<_> = (0..ROWS)
            .map(|row| (Tile::new(row, 0), PlantKind::Generator))
            .collect();
        for col in 1..COLS / 2 {
            let kind = if col == 1 {
                PlantKind::SingleShooter
            } else {
                PlantKind::DoubleShooter
            };
            order.extend((0..ROWS).map(|row| (Tile::new(row, col), kind)));
        }
        order
    }

    pub fn run(game: &mut Game, seconds: f32) -> Summary {
        let order = build_order();
        let mut elapsed = 0.0;
        let mut kills = 0;
        let mut collected = 0;

        while elapsed < seconds && !game.state().is_over() {
            game.step(DT);
            elapsed += DT;

            let ready: Vec<_> = game.state().resources.iter().map(|r| r.id).collect();
            for id in ready {
                game.collect_resource(id);
            }

            // Next unplanted tile in the build order, if affordable
            let next = order
                .iter()
                .find(|(tile, _)| game.state().plant_at(*tile).is_none());
            if let Some(&(tile, kind)) = next {
                game.place_plant(tile.row, tile.col, kind);
            }

            for event in game.drain_events() {
                match event {
                    GameEvent::AttackerKilled { .. } => kills += 1,
                    GameEvent::ResourceCollected { .. } => collected += 1,
                    _ => {}
                }
            }
        }

        let snapshot = game.snapshot();
        Summary {
            elapsed,
            round: snapshot.round,
            balance: snapshot.balance,
            plants: snapshot.plants.len(),
            kills,
            collected,
            game_over: snapshot.game_over,
        }
    }
}
