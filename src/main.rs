//! Speed Snek entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, PointerEvent};

    use speed_snek::persistence::LocalStorageStore;
    use speed_snek::platform::{CanvasSurface, board_size};
    use speed_snek::render::{draw_frame, draw_speedometer};
    use speed_snek::sim::{Bounds, GameOverReason, GamePhase, TickOutcome};
    use speed_snek::{Game, Point, Settings};

    /// Height assumed for the UI above the board when it has no layout yet (px)
    const FALLBACK_UI_HEIGHT: f64 = 100.0;
    /// Board border width, matching the stylesheet (px)
    const BOARD_BORDER: f64 = 2.0;
    const SPEEDOMETER_HEIGHT: f64 = 40.0;

    /// Everything the browser callbacks share
    struct App {
        game: Game<LocalStorageStore>,
        board: CanvasSurface,
        speedometer: CanvasSurface,
        bounds: Bounds,
        // Track phase to react to transitions
        last_phase: GamePhase,
    }

    impl App {
        /// Draw both canvases and refresh the HUD
        fn render(&mut self, time: f64) {
            draw_frame(self.game.state(), &mut self.board);
            draw_speedometer(self.game.state(), &mut self.speedometer);
            self.update_hud(time);
        }

        fn update_hud(&mut self, time: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "currentScore", &format!("Score: {:>2}", self.game.score()));
            set_text(&document, "bestScore", &format!("Best: {:>2}", self.game.best_score()));

            let phase = self.game.state().phase;
            match phase {
                // The end panel carries the result
                GamePhase::GameOver(_) => set_text(&document, "message", ""),
                _ => set_text(&document, "message", &self.game.message(time)),
            }

            if phase != self.last_phase {
                if let GamePhase::GameOver(reason) = phase {
                    self.show_end_panel(&document, reason);
                }
                self.last_phase = phase;
            }
        }

        fn show_end_panel(&self, document: &Document, reason: GameOverReason) {
            set_text(document, "reason", reason.message());
            set_text(document, "finalScore", &format!("Score: {}", self.game.score()));
            let mut best = format!("Best: {}", self.game.best_score());
            if self.game.is_new_best() {
                best.push_str(" (NEW BEST!)");
            }
            set_text(document, "best", &best);

            set_hidden(document, "startMessage", true);
            set_hidden(document, "endMessage", false);
            set_hidden(document, "info", false);
        }

        /// Rebuild the session with new settings (title screen only)
        fn apply_settings(&mut self, settings: Settings) {
            let seed = js_sys::Date::now() as u64;
            match Game::new(settings.clone(), self.bounds, LocalStorageStore, seed) {
                Ok(game) => {
                    settings.save();
                    self.game = game;
                    self.last_phase = GamePhase::Title;
                }
                Err(e) => log::warn!("Settings rejected: {}", e),
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Speed Snek starting...");
        if let Err(e) = start() {
            log::error!("Startup failed: {:?}", e);
        }
    }

    fn start() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let board_canvas: HtmlCanvasElement = document
            .get_element_by_id("gameBoard")
            .ok_or("no game board canvas")?
            .dyn_into()?;
        let meter_canvas: HtmlCanvasElement = document
            .get_element_by_id("speedometer")
            .ok_or("no speedometer canvas")?
            .dyn_into()?;

        // Size the board to the viewport
        let (viewport_w, viewport_h) = document.document_element().map_or((0.0, 0.0), |el| {
            (el.client_width() as f64, el.client_height() as f64)
        });
        let ui_height = document
            .get_element_by_id("ui")
            .map_or(FALLBACK_UI_HEIGHT, |el| el.client_height() as f64);
        let bounds = board_size(viewport_w, viewport_h, ui_height, BOARD_BORDER);
        if let Some(ui) = document.get_element_by_id("ui") {
            let _ = ui.set_attribute("style", &format!("width: {}px", bounds.width));
        }

        let board = CanvasSurface::new(&board_canvas, bounds.width, bounds.height)?;
        let speedometer = CanvasSurface::new(&meter_canvas, bounds.width, SPEEDOMETER_HEIGHT)?;

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(Settings::load(), bounds, LocalStorageStore, seed) {
            Ok(game) => game,
            Err(e) => {
                log::warn!("Stored settings unusable ({}), using defaults", e);
                Game::new(Settings::default(), bounds, LocalStorageStore, seed)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?
            }
        };
        log::info!("Board {}x{}, seed {}", bounds.width, bounds.height, seed);

        let app = Rc::new(RefCell::new(App {
            game,
            board,
            speedometer,
            bounds,
            last_phase: GamePhase::Title,
        }));

        setup_pointer_handlers(&board_canvas, app.clone());
        setup_buttons(&document, app.clone());

        set_hidden(&document, "startMessage", false);
        set_hidden(&document, "endMessage", true);
        set_hidden(&document, "info", false);

        request_animation_frame(app);

        log::info!("Speed Snek running!");
        Ok(())
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer move - offsets are already board-local
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let point = Point::new(event.offset_x() as f64, event.offset_y() as f64);
                let outcome = app
                    .borrow_mut()
                    .game
                    .pointer_sample(point, event.time_stamp());
                if let TickOutcome::Scored { score } = outcome {
                    log::debug!("nom! ({})", score);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer leave - a wall crash while playing
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                app.borrow_mut().game.pointer_left();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch input captures the pointer; release it so leaving the board registers
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let _ = canvas_clone.release_pointer_capture(event.pointer_id());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        // Start
        if let Some(btn) = document.get_element_by_id("startButton") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if app.borrow_mut().game.start() {
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        set_hidden(&document, "info", true);
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart
        if let Some(btn) = document.get_element_by_id("restartButton") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                app.borrow_mut().game.restart(seed);
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    set_hidden(&document, "info", true);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Difficulty - cycles through the presets on the title screen
        if let Some(btn) = document.get_element_by_id("difficultyButton") {
            btn.set_text_content(Some(app.borrow().game.state().settings.difficulty.as_str()));
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                if a.game.state().phase != GamePhase::Title {
                    return;
                }
                let mut settings = a.game.state().settings.clone();
                let difficulty = settings.difficulty.next();
                settings.apply_difficulty(difficulty);
                a.apply_settings(settings);
                btn_clone.set_text_content(Some(difficulty.as_str()));
                log::info!("Difficulty: {}", difficulty.as_str());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.game.frame(time);
            a.render(time);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Speed Snek (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    println!("\nRunning headless demo round...");
    demo_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one scripted round: steer straight at each pellet at a constant speed
#[cfg(not(target_arch = "wasm32"))]
fn demo_round() {
    use speed_snek::sim::{Bounds, TickOutcome};
    use speed_snek::{Game, MemoryStore, Settings};

    const FRAME_MS: f64 = 16.0;
    const STEP_PX: f64 = 12.0;
    const MAX_FRAMES: usize = 20_000;

    let bounds = Bounds::new(900.0, 600.0);
    let mut game = match Game::new(Settings::default(), bounds, MemoryStore::new(), 2024) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Could not create game: {}", e);
            return;
        }
    };

    game.start();
    let mut now = 0.0;
    let mut pointer = bounds.center();
    game.pointer_sample(pointer, now);

    for _ in 0..MAX_FRAMES {
        now += FRAME_MS;
        let state = game.state();
        if state.is_playing() {
            if let Some(item) = state.item {
                let to_item = item.location - pointer;
                let step = to_item.length().min(STEP_PX);
                pointer += to_item.normalize_or_zero() * step;
            }
            match game.pointer_sample(pointer, now) {
                TickOutcome::Scored { score } => {
                    println!("  pellet {} at {:.1}s", score, now / 1000.0)
                }
                TickOutcome::GameOver(_) => break,
                TickOutcome::Continue => {}
            }
        }
        // During the countdown the pointer holds still in the start circle
        if let TickOutcome::GameOver(_) = game.frame(now) {
            break;
        }
    }

    println!("{}", game.message(now));
    println!("Best score this session: {}", game.best_score());
}
