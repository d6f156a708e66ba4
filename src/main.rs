//! Court Rally entry point
//!
//! In the browser this mounts the court into the page. Natively it plays a
//! headless match against the opponent AI with a pointer that shadows the
//! ball, which is handy for eyeballing tuning changes in the log.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    court_rally::platform::web::start();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(7);
    log::info!("Court Rally (headless) starting, seed {}", seed);

    let summary = headless::play_match(seed);
    println!(
        "{} after {} frames ({} painted): player {} / opponent {}, longest rally {}",
        if summary.won { "Match won" } else { "Gave up" },
        summary.frames,
        summary.painted,
        summary.player_term,
        summary.opponent_term,
        summary.longest_rally,
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use court_rally::clock::{ManualTicks, run_loop};
    use court_rally::input::SurfaceRect;
    use court_rally::renderer::RecordingSurface;
    use court_rally::sim::PcgRandom;
    use court_rally::sprite::FixedSprite;
    use court_rally::{SceneHost, Sprites, TennisGame, Tuning};

    /// Ten minutes at 60 fps
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    /// Frames before the carousel scrolls the court into view
    const SCENE_SWITCH_FRAME: u64 = 30;
    /// Frames after that before the pointer enters the court
    const ENTER_DELAY: u64 = 45;

    /// Carousel stand-in: the court becomes visible after a few frames
    struct Carousel {
        frame: Cell<u64>,
        completed: Cell<bool>,
    }

    impl SceneHost for Carousel {
        fn is_active(&self) -> bool {
            self.frame.get() >= SCENE_SWITCH_FRAME
        }

        fn notify_complete(&self) {
            self.completed.set(true);
        }
    }

    pub struct Summary {
        pub won: bool,
        pub frames: u64,
        pub painted: u64,
        pub player_term: &'static str,
        pub opponent_term: &'static str,
        pub longest_rally: u32,
    }

    pub fn play_match(seed: u64) -> Summary {
        let tuning = Tuning::default();
        let rect = SurfaceRect {
            left: 0.0,
            width: tuning.width,
        };
        let ticks = Rc::new(ManualTicks::new());
        let host = Rc::new(Carousel {
            frame: Cell::new(0),
            completed: Cell::new(false),
        });
        let game = Rc::new(RefCell::new(TennisGame::new(tuning, PcgRandom::new(seed))));
        let surface = Rc::new(RefCell::new(RecordingSurface::default()));
        let longest_rally = Rc::new(Cell::new(0u32));

        {
            let host = Rc::clone(&host);
            let game = Rc::clone(&game);
            let surface = Rc::clone(&surface);
            let longest_rally = Rc::clone(&longest_rally);
            let sprites = Sprites {
                player: Some(FixedSprite::loaded(300.0, 90.0)),
                // Opponent sprite never arrives: solid paddle
                opponent: Some(FixedSprite::pending()),
            };

            run_loop(Rc::clone(&ticks), move |_time| {
                let frame = host.frame.get();
                let mut game = game.borrow_mut();

                if host.is_active() {
                    let ball_x = game.state().ball.pos.x;
                    game.pointer_moved(ball_x, rect);
                    if frame == SCENE_SWITCH_FRAME + ENTER_DELAY {
                        game.pointer_entered();
                    }
                }

                // Keep the recording to one frame; only the count matters here
                surface.borrow_mut().commands.clear();
                let report = game.frame(&*host, &mut *surface.borrow_mut(), &sprites);
                if let Some(step) = report.step {
                    if step.point.is_some() || step.replay {
                        let board = game.scoreboard();
                        log::info!(
                            "Frame {}: {} - {} (rally {})",
                            frame,
                            board.player_term,
                            board.opponent_term,
                            board.rally
                        );
                    }
                }
                longest_rally.set(longest_rally.get().max(game.state().rally));
                host.frame.set(frame + 1);
            });
        }

        while !host.completed.get() && ticks.fired() < MAX_FRAMES {
            ticks.fire(1000.0 / 60.0);
        }

        let board = game.borrow().scoreboard();
        let painted = surface.borrow().frames;
        Summary {
            won: host.completed.get(),
            frames: ticks.fired(),
            painted,
            player_term: board.player_term,
            opponent_term: board.opponent_term,
            longest_rally: longest_rally.get(),
        }
    }
}
