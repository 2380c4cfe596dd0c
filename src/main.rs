//! Trutti Hunt entry point
//!
//! Browser builds drive a round from `requestAnimationFrame`; native builds
//! play headless rounds with a scripted clicker and log the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use trutti_hunt::Settings;
    use trutti_hunt::consts::*;
    use trutti_hunt::persistence::default_storage;
    use trutti_hunt::platform::{now_iso8601, now_ms};
    use trutti_hunt::renderer::canvas::CanvasSurface;
    use trutti_hunt::sim::{Difficulty, EndReason, Round, RoundConfig, RoundEvent};

    /// Game instance holding all state
    struct Game {
        round: Round,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        document: Document,
        settings: Settings,
        /// Last completion banner shown, cleared on the next round
        banner: Option<String>,
    }

    impl Game {
        fn start_round(&mut self) {
            let mut store = default_storage();
            if let Err(e) = self.settings.save(store.as_mut()) {
                log::warn!("Failed to save settings: {}", e);
            }

            let config = RoundConfig::new(
                self.settings.difficulty,
                self.canvas.width() as f32,
                self.canvas.height() as f32,
                now_ms() as u64,
            );
            self.round.start(config, now_ms());
            self.banner = None;
            self.set_visible("game-over", false);
            self.set_visible("start-prompt", false);
            self.set_visible("hud", true);
        }

        fn select_difficulty(&mut self, difficulty: Difficulty) {
            if self.round.is_running() || self.round.is_paused() {
                return;
            }
            self.settings.difficulty = difficulty;
            self.set_text("start-difficulty", difficulty.as_str());
            log::info!("Difficulty set to {}", difficulty.as_str());
        }

        /// Advance and draw one frame, then react to what happened
        fn frame(&mut self) {
            let now = now_ms();
            self.round.tick(now);
            self.round.render(&mut self.surface, now);

            for event in self.round.drain_events() {
                match event {
                    RoundEvent::Completion(message) => self.banner = Some(message),
                    RoundEvent::Ended { qualifies, reason } => self.on_round_end(qualifies, reason),
                    _ => {}
                }
            }

            self.update_hud();
        }

        fn on_round_end(&mut self, qualifies: bool, reason: EndReason) {
            self.set_text("final-money", &format!("${}", self.round.money()));
            self.set_text(
                "final-specials",
                &format!("{}/{}", self.round.caught_count(), SPECIAL_COUNT),
            );
            self.set_visible("game-over", true);

            if !qualifies {
                log::info!("Round over ({:?}), not a top score", reason);
                return;
            }

            // `prompt` blocks; the loop resumes once the player answers
            let name = web_sys::window()
                .and_then(|w| {
                    w.prompt_with_message("New top score! Enter your name:")
                        .ok()
                        .flatten()
                })
                .unwrap_or_default();
            match self.round.save_score(&name, now_iso8601()) {
                Some(rank) => log::info!("Saved score as #{}", rank),
                None => log::info!("Score not saved"),
            }
            self.render_scoreboard();
        }

        fn render_scoreboard(&self) {
            let Some(list) = self.document.get_element_by_id("scoreboard") else {
                return;
            };
            let text = self
                .round
                .scoreboard()
                .entries()
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    format!(
                        "{}. {} {} ${} ({})",
                        i + 1,
                        e.difficulty.icon(),
                        e.name,
                        e.score,
                        e.date.get(..10).unwrap_or(&e.date)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            list.set_text_content(Some(&text));
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            self.set_text("hud-money", &format!("${}", self.round.money()));
            self.set_text("hud-time", &self.round.time_remaining().to_string());
            self.set_text(
                "hud-specials",
                &format!("{}/{}", self.round.caught_count(), SPECIAL_COUNT),
            );
            self.set_text(
                "hud-difficulty",
                &format!(
                    "{} {}",
                    self.round.difficulty().icon(),
                    self.round.difficulty().as_str()
                ),
            );
            self.set_visible("pause-menu", self.round.is_paused());
            self.set_visible("completion", self.banner.is_some());
            if let Some(message) = &self.banner {
                self.set_text("completion", message);
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                if el.text_content().as_deref() != Some(text) {
                    el.set_text_content(Some(text));
                }
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Trutti Hunt starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        fit_canvas(&canvas);

        let surface = CanvasSurface::new(&canvas).ok_or("2d context unavailable")?;

        let settings = Settings::load(default_storage().as_ref());
        log::info!("Loaded settings: {}", settings.difficulty.as_str());

        let mut round = Round::new(default_storage());
        round.resize(canvas.width() as f32, canvas.height() as f32);

        let game = Rc::new(RefCell::new(Game {
            round,
            surface,
            canvas: canvas.clone(),
            document: document.clone(),
            settings,
            banner: None,
        }));
        {
            let g = game.borrow();
            g.set_text("start-difficulty", g.settings.difficulty.as_str());
            g.set_visible("start-prompt", true);
            g.set_visible("loading", false);
        }

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Trutti Hunt running!");
        Ok(())
    }

    /// Match the drawing buffer to the element's CSS size
    fn fit_canvas(canvas: &HtmlCanvasElement) {
        let w = canvas.client_width().max(0) as u32;
        let h = canvas.client_height().max(0) as u32;
        if w > 0 && h > 0 {
            canvas.set_width(w);
            canvas.set_height(h);
        } else {
            canvas.set_width(DEFAULT_CANVAS_WIDTH as u32);
            canvas.set_height(DEFAULT_CANVAS_HEIGHT as u32);
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click - convert client coordinates to canvas pixels
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                let sx = canvas_clone.width() as f64 / rect.width();
                let sy = canvas_clone.height() as f64 / rect.height();
                let x = (event.client_x() as f64 - rect.left()) * sx;
                let y = (event.client_y() as f64 - rect.top()) * sy;
                game.borrow_mut()
                    .round
                    .handle_click(x as f32, y as f32, now_ms());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "p" | "P" | "Escape" => {
                        g.round.toggle_pause(now_ms());
                    }
                    " " | "Enter" => {
                        if !g.round.is_running() && !g.round.is_paused() {
                            g.start_round();
                        }
                    }
                    "1" => g.select_difficulty(Difficulty::Easy),
                    "2" => g.select_difficulty(Difficulty::Medium),
                    "3" => g.select_difficulty(Difficulty::Hard),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            fit_canvas(&g.canvas);
            let (w, h) = (g.canvas.width() as f32, g.canvas.height() as f32);
            g.round.resize(w, h);
            log::debug!("Resized to {}x{}", w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                    && game.borrow_mut().round.pause(now_ms())
                {
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if game.borrow_mut().round.pause(now_ms()) {
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Trutti Hunt (native) starting...");
    log::info!("Native mode plays headless rounds - serve the wasm build for the real game");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(7);

    headless::play_all(seed);
}

/// Scripted rounds at a simulated 60 fps
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use trutti_hunt::persistence::MemoryStorage;
    use trutti_hunt::platform::now_iso8601;
    use trutti_hunt::sim::{Difficulty, EntityKind, Round, RoundConfig, RoundEvent};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Chance per frame that the scripted player clicks something
    const CLICK_CHANCE: f64 = 0.08;
    /// Chance the player fat-fingers an obstacle when one is on screen
    const MISCLICK_CHANCE: f64 = 0.1;

    pub fn play_all(seed: u64) {
        let mut round = Round::new(Box::new(MemoryStorage::new()));

        for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
            let round_seed = seed.wrapping_add(i as u64);
            play(&mut round, difficulty, round_seed);
            match round.save_score("Headless", now_iso8601()) {
                Some(rank) => log::info!("Saved {} round as #{}", difficulty.as_str(), rank),
                None => log::info!("{} round did not place", difficulty.as_str()),
            }
        }

        println!("\nScoreboard:");
        for (i, entry) in round.scoreboard().entries().iter().enumerate() {
            println!(
                "  {}. {} {:<10} ${}",
                i + 1,
                entry.difficulty.icon(),
                entry.difficulty.as_str(),
                entry.score
            );
        }
    }

    fn play(round: &mut Round, difficulty: Difficulty, seed: u64) {
        let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);
        round.start(RoundConfig::new(difficulty, 800.0, 600.0, seed), 0.0);

        let mut now = 0.0;
        while !round.is_ended() {
            now += FRAME_MS;
            round.tick(now);

            if round.is_running() && player.random_bool(CLICK_CHANCE) {
                if let Some(target) = pick_target(round, &mut player) {
                    round.handle_click(target.x, target.y, now);
                }
            }

            for event in round.drain_events() {
                match event {
                    RoundEvent::SpecialCaught { id, caught } => {
                        log::debug!("Caught special #{} ({} total)", id, caught)
                    }
                    RoundEvent::Completion(message) => println!("{}", message),
                    RoundEvent::Ended { qualifies, reason } => {
                        log::info!("Ended: {:?} (qualifies: {})", reason, qualifies)
                    }
                    _ => {}
                }
            }
        }

        println!(
            "{} {:<6} money ${:<5} specials {}/{} time left {}s",
            difficulty.icon(),
            difficulty.as_str(),
            round.money(),
            round.caught_count(),
            round.specials().universe().len(),
            round.time_remaining()
        );
    }

    /// Center of something worth clicking, specials first
    fn pick_target(round: &Round, player: &mut Pcg32) -> Option<glam::Vec2> {
        let entities = round.entities();
        let special = entities
            .iter()
            .find(|e| matches!(e.kind, EntityKind::SpecialTurkey { .. }));
        let wanted = special.or_else(|| {
            entities.iter().find(|e| {
                matches!(e.kind, EntityKind::Turkey) || e.is_bonus_obstacle()
            })
        });

        let misclick = player.random_bool(MISCLICK_CHANCE);
        let target = if misclick {
            entities
                .iter()
                .find(|e| matches!(e.kind, EntityKind::Obstacle { bonus: false, .. }))
                .or(wanted)
        } else {
            wanted
        };
        target.map(|e| e.center())
    }
}
