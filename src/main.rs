//! Snake Rush entry point
//!
//! Natively this runs headless demo rounds with the autopilot steering.
//! The web build starts through `snake_rush::wasm_start` instead.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use snake_rush::audio::AudioManager;
    use snake_rush::game::SnapshotRenderer;
    use snake_rush::platform::{LogPresenter, Presenter};
    use snake_rush::sim::GameEvent;
    use snake_rush::{Leaderboard, MapSize, Session, Settings, format_elapsed};

    /// Simulated frame length (~60 fps)
    const FRAME_MS: u64 = 16;
    /// Give up on a round after this much simulated time
    const ROUND_CAP_MS: u64 = 10 * 60 * 1000;

    /// Sound plus log output
    struct Console {
        audio: AudioManager,
        log: LogPresenter,
    }

    impl Presenter for Console {
        fn present(&mut self, event: &GameEvent) {
            self.audio.present(event);
            self.log.present(event);
        }
    }

    struct Args {
        seed: u64,
        map: MapSize,
        rounds: u32,
    }

    /// `snake-rush [seed] [small|medium|large] [rounds]`
    fn parse_args() -> Args {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let seed = args
            .first()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0x5EED);
        let map = args
            .get(1)
            .and_then(|s| MapSize::from_str(s))
            .unwrap_or_default();
        let rounds = args
            .get(2)
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);
        Args { seed, map, rounds }
    }

    pub fn run() {
        env_logger::init();
        let args = parse_args();
        log::info!(
            "Snake Rush (native) starting: seed {}, {} map, {} round(s)",
            args.seed,
            args.map.as_str(),
            args.rounds
        );

        let settings = Settings::for_map(args.map);
        let mut console = Console {
            audio: AudioManager::new(&settings),
            log: LogPresenter,
        };
        let mut renderer = SnapshotRenderer::default();
        let mut session = Session::new(settings, args.seed, Leaderboard::load());
        session.set_idle(true);

        for round in 0..args.rounds {
            if round > 0 {
                session.restart(args.seed.wrapping_add(round as u64));
            }
            session.request_start();

            let mut now = 0;
            while session.summary().is_none() && now <= ROUND_CAP_MS {
                if let Err(e) = session.frame(now, &mut renderer, &mut console) {
                    eprintln!("Round {} aborted: {}", round + 1, e);
                    break;
                }
                now += FRAME_MS;
            }

            match session.summary() {
                Some(summary) => println!(
                    "Round {}: {} score {} after {}{}",
                    round + 1,
                    summary.reason.message(),
                    summary.score,
                    format_elapsed(summary.elapsed_ms),
                    summary
                        .rank
                        .map(|r| format!(" (high score #{})", r))
                        .unwrap_or_default()
                ),
                None => println!(
                    "Round {}: still alive after {}, score {}",
                    round + 1,
                    format_elapsed(session.state.active_ms()),
                    session.state.score
                ),
            }
        }

        if let Some(frame) = &renderer.latest {
            log::debug!("Last frame: {}", frame);
        }
        for (i, entry) in session.board.entries.iter().enumerate() {
            println!("#{} {}", i + 1, entry.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is snake_rush::wasm_start, this is just to satisfy the compiler
}
