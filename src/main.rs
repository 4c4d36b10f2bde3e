//! Paddle Strike entry point
//!
//! Browser builds wire the canvas, keyboard, mouse and start button to a
//! session. Native builds play demo runs with the autopilot and print the
//! leaderboard.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use paddle_strike::Settings;
    use paddle_strike::highscores::HighScores;
    use paddle_strike::persistence::LocalStore;
    use paddle_strike::platform::{Session, SharedSession, SystemClock};
    use paddle_strike::renderer::{self, canvas::CanvasRenderer};
    use paddle_strike::sim::{MoveIntent, TickInput};

    type Game = SharedSession<LocalStore, SystemClock>;

    /// Page-level host state
    struct Host {
        game: Game,
        renderer: CanvasRenderer,
        document: Document,
        /// The frame loop and descent timer run once per page, across runs
        loop_started: bool,
        slow_tick_ms: u64,
    }

    impl Host {
        fn update_score(&self) {
            let score = self.game.snapshot().score;
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&renderer::score_text(score)));
            }
        }

        fn update_leaderboard(&self, scores: &HighScores) {
            let Some(list) = self.document.get_element_by_id("score-list") else {
                return;
            };
            list.set_inner_html("");
            for line in renderer::leaderboard_lines(scores) {
                if let Ok(li) = self.document.create_element("li") {
                    li.set_text_content(Some(&line));
                    let _ = list.append_child(&li);
                }
            }
        }

        fn draw(&self) {
            let frame = renderer::build_frame(&self.game.snapshot());
            self.renderer.draw(&frame);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Paddle Strike starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;

        let store = LocalStore::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut settings = Settings::load(&store);
        settings.arena_width = canvas.width() as f32;
        settings.arena_height = canvas.height() as f32;
        let settings = settings.sanitized();

        let game = SharedSession::new(Session::new(&settings, store, SystemClock));
        let host = Rc::new(RefCell::new(Host {
            game,
            renderer: CanvasRenderer::new(&canvas)?,
            document,
            loop_started: false,
            slow_tick_ms: settings.slow_tick_ms,
        }));

        {
            let h = host.borrow();
            h.update_leaderboard(&h.game.leaderboard());
        }

        setup_input_handlers(&canvas, host.clone())?;
        setup_start_button(host)?;

        log::info!("Paddle Strike ready");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        host: Rc<RefCell<Host>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard: arrows move, space fires
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let input = match event.key().as_str() {
                    "ArrowLeft" => TickInput {
                        movement: Some(MoveIntent::Left),
                        fire: false,
                    },
                    "ArrowRight" => TickInput {
                        movement: Some(MoveIntent::Right),
                        fire: false,
                    },
                    " " => TickInput {
                        movement: None,
                        fire: true,
                    },
                    _ => return,
                };
                host.borrow().game.apply_input(&input);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse: paddle follows the pointer
        {
            let canvas_el = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_el.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                host.borrow().game.apply_input(&TickInput {
                    movement: Some(MoveIntent::PointerX(x as f32)),
                    fire: false,
                });
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_start_button(host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let document = host.borrow().document.clone();
        let Some(btn) = document.get_element_by_id("start-btn") else {
            log::warn!("No start button found");
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            {
                let h = host.borrow();
                h.game.start_run();
                h.update_score();
                h.update_leaderboard(&h.game.leaderboard());
            }

            let first_start = !host.borrow().loop_started;
            if first_start {
                host.borrow_mut().loop_started = true;
                if let Err(e) = start_slow_timer(host.clone()) {
                    log::error!("Could not start descent timer: {:?}", e);
                }
                request_animation_frame(host.clone());
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn start_slow_timer(host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let interval = host.borrow().slow_tick_ms as i32;

        let closure = Closure::<dyn FnMut()>::new(move || {
            let h = host.borrow();
            let was_running = h.game.is_running();
            if let Err(e) = h.game.advance_slow() {
                log::error!("Failed to save high score: {}", e);
            }
            if was_running && !h.game.is_running() {
                h.update_leaderboard(&h.game.leaderboard());
            }
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval,
        )?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(host);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>) {
        {
            let h = host.borrow();
            if let Err(e) = h.game.advance_fast() {
                log::error!("Failed to save high score: {}", e);
            }
            h.draw();
            h.update_score();
        }

        request_animation_frame(host);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::error::Error;
    use std::thread;
    use std::time::Duration;

    use paddle_strike::Settings;
    use paddle_strike::persistence::FileStore;
    use paddle_strike::platform::native::GameLoop;
    use paddle_strike::platform::{Session, SharedSession, SystemClock};
    use paddle_strike::renderer;
    use paddle_strike::sim::Autopilot;

    /// Where scores and settings live between runs
    const DATA_DIR: &str = ".paddle-strike";

    pub fn run() -> Result<(), Box<dyn Error>> {
        let store = FileStore::open(DATA_DIR)?;
        let settings = Settings::load(&store);
        log::info!("Data directory: {}", store.dir().display());

        let game = SharedSession::new(Session::new(&settings, store, SystemClock));
        let mut pilot = Autopilot::new(settings.autopilot_seed);
        let input_interval = Duration::from_millis(settings.fast_tick_ms);

        for run in 1..=settings.demo_runs {
            game.start_run();
            log::info!("Demo run {}/{} started", run, settings.demo_runs);

            let game_loop = GameLoop::start(&game, &settings)?;
            while game.is_running() {
                let input = pilot.decide(&game.snapshot());
                game.apply_input(&input);
                thread::sleep(input_interval);
            }
            game_loop.stop();

            let snapshot = game.snapshot();
            println!(
                "Run {}: level {}, {}",
                run,
                snapshot.level,
                renderer::score_text(snapshot.score)
            );
        }

        println!("\nHigh scores:");
        let scores = game.leaderboard();
        if scores.is_empty() {
            println!("  (none)");
        }
        for (rank, line) in renderer::leaderboard_lines(&scores).iter().enumerate() {
            println!("  {}. {}", rank + 1, line);
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Paddle Strike (native demo) starting...");

    if let Err(e) = native_game::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
