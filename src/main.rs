//! Light-cycle duel headless runner
//!
//! Plays demo rounds at a fixed timestep and logs each outcome.
//! Usage: `lightcycle-duel [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use lightcycle_duel::Settings;
    use lightcycle_duel::sim::{Arena, GameState, RoundOutcome};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    env_logger::init();
    log::info!("Light-cycle duel (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    log::info!(
        "Difficulty={}, driver={}, rounds={}",
        settings.difficulty.as_str(),
        settings.player_driver.as_str(),
        settings.rounds
    );

    let arena = Arena::new(settings.arena_width, settings.arena_height);
    let mut state = GameState::new(arena, settings.difficulty);
    let mut rng = Pcg32::seed_from_u64(settings.seed);

    let (mut player_wins, mut ai_wins, mut ties, mut unfinished) = (0u32, 0u32, 0u32, 0u32);
    for _ in 0..settings.rounds {
        if !state.start_round() {
            log::error!("Arena is unusable, stopping");
            break;
        }
        match runner::play_round(&mut state, &settings, &mut rng) {
            Some(RoundOutcome::Player) => player_wins += 1,
            Some(RoundOutcome::Ai) => ai_wins += 1,
            Some(RoundOutcome::Tie) => ties += 1,
            None => {
                log::warn!("Round {} hit the tick cap", state.round);
                unfinished += 1;
            }
        }
    }

    println!(
        "player: {}  ai: {}  tie: {}  unfinished: {}",
        player_wins, ai_wins, ties, unfinished
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by the host page; nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use lightcycle_duel::Settings;
    use lightcycle_duel::consts::SIM_DT;
    use lightcycle_duel::settings::PlayerDriver;
    use lightcycle_duel::sim::{Direction, GameEvent, GameState, RoundOutcome, TickInput, tick};
    use rand::Rng;
    use rand_pcg::Pcg32;

    /// Run one round to completion (or the tick cap)
    pub fn play_round(
        state: &mut GameState,
        settings: &Settings,
        rng: &mut Pcg32,
    ) -> Option<RoundOutcome> {
        let mut input = TickInput {
            idle_mode: settings.player_driver == PlayerDriver::Autopilot,
            ..Default::default()
        };

        for _ in 0..settings.max_ticks_per_round {
            if settings.player_driver == PlayerDriver::Wanderer {
                input.turn = wander(rng, state.player.dir, settings.wander_turn_chance);
            }
            for event in tick(state, &input, SIM_DT) {
                match event {
                    GameEvent::Turn { agent, direction } => {
                        log::trace!("{:?} -> {:?}", agent, direction);
                    }
                    GameEvent::RoundOver(outcome) => return Some(outcome),
                }
            }
        }
        None
    }

    /// Occasionally try a quarter turn
    fn wander(rng: &mut Pcg32, current: Direction, chance: f32) -> Option<Direction> {
        if rng.random::<f32>() >= chance {
            return None;
        }
        Some(if rng.random_bool(0.5) {
            current.turn_left()
        } else {
            current.turn_right()
        })
    }
}
