//! Kebab Tycoon entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use kebab_tycoon::audio::{AudioManager, Mix, SoundEffect};
    use kebab_tycoon::consts::*;
    use kebab_tycoon::persistence::{self, KeyValueStore};
    use kebab_tycoon::platform::{FrameClock, InputState, KeyAction};
    use kebab_tycoon::renderer::{Backdrop, FrameBatches, RenderState, SceneOptions, build_scene};
    use kebab_tycoon::sim::{ArcadeState, GameEvent, effects, tick};
    use kebab_tycoon::{
        BestScore, HudPublisher, HudSnapshot, IdlePanel, IdleStore, Settings, UpgradeId, assets,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum StartupError {
        #[error("no browser window")]
        NoWindow,
        #[error("no document")]
        NoDocument,
        #[error("no #canvas element")]
        NoCanvas,
        #[error("failed to create surface: {0}")]
        Surface(#[from] wgpu::CreateSurfaceError),
        #[error("no GPU adapter: {0}")]
        Adapter(#[from] wgpu::RequestAdapterError),
        #[error("failed to create device: {0}")]
        Device(#[from] wgpu::RequestDeviceError),
    }

    /// Game instance holding all state
    struct Game {
        document: Document,
        state: ArcadeState,
        input: InputState,
        clock: FrameClock,
        backdrop: Backdrop,
        hud: HudPublisher,
        idle: IdleStore<Box<dyn KeyValueStore>>,
        /// Settings and best score live here; the idle store owns its own handle
        prefs: Box<dyn KeyValueStore>,
        settings: Settings,
        best: BestScore,
        audio: AudioManager,
        render_state: Option<RenderState>,
    }

    impl Game {
        fn new(seed: u64, document: Document) -> Self {
            let prefs = persistence::open_default();
            let settings = Settings::load(&prefs);
            let best = BestScore::load(&prefs);
            let idle = IdleStore::open(persistence::open_default());

            let mut state = ArcadeState::new(seed);
            state.max_particles = settings.max_particles();

            Self {
                document,
                state,
                input: InputState::new(),
                clock: FrameClock::new(),
                backdrop: Backdrop::new(),
                hud: HudPublisher::new(),
                idle,
                prefs,
                audio: AudioManager::new(Mix::from_settings(&settings)),
                settings,
                best,
                render_state: None,
            }
        }

        /// One animation frame
        fn frame(&mut self, time_ms: f64) {
            let (raw, dt) = self.clock.step(time_ms);
            let now = time_ms / 1000.0;

            let input = self.input.take_tick_input();
            tick(&mut self.state, &input, dt);
            self.backdrop.update(dt);
            self.handle_events();

            // Unclamped: passive income keeps accruing across long frames
            if self.idle.accrue(raw) {
                self.render_idle_panel();
            }

            self.audio.update();
            self.render(now);

            if let Some(snapshot) = self.hud.poll(self.state.hud(), now) {
                self.publish_hud(snapshot);
            }
        }

        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Started => log::info!("Run started"),
                    GameEvent::Ate => self.audio.play(SoundEffect::Eat),
                    GameEvent::BombHit => self.audio.play(SoundEffect::Hit),
                    GameEvent::GameOver { score } => {
                        self.audio.play(SoundEffect::GameOver);
                        log::info!("Game over with score {}", score);
                        if self.best.record(score) {
                            self.best.save(&mut self.prefs);
                            self.set_text("hud-best", &score.to_string());
                        }
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let shake = if self.settings.effective_screen_shake() {
                effects::shake_offset(&self.state, time as f32)
            } else {
                Vec2::ZERO
            };
            let options = SceneOptions {
                assets_ready: render_state.sprites_ready(),
                parallax: self.settings.quality.parallax_enabled(),
                shake,
            };
            let frame = FrameBatches::build(&build_scene(&self.state, &self.backdrop, options));

            match render_state.render(&frame) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.settings.save(&mut self.prefs);
            self.audio.set_mix(Mix::from_settings(&self.settings));
            self.render_mute_button();
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }

        // === DOM ===

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        /// Push a published snapshot into the HUD elements
        fn publish_hud(&self, snapshot: HudSnapshot) {
            self.set_text("hud-score", &snapshot.score.to_string());
            self.set_text("hud-lives", &snapshot.lives.to_string());

            self.set_hidden("overlay", snapshot.is_running);
            if let (Some(banner), Some(prompt)) = (snapshot.banner(), snapshot.prompt()) {
                self.set_text("overlay-title", banner);
                self.set_text("overlay-prompt", prompt);
            }
        }

        fn render_idle_panel(&self) {
            let panel = IdlePanel::from_state(self.idle.state());
            self.set_text("idle-kebabs", &panel.kebabs);
            self.set_text("idle-per-click", &panel.per_click);
            self.set_text("idle-per-second", &panel.per_second);

            for row in &panel.upgrades {
                let id = row.id.as_str();
                self.set_text(&format!("label-{}", id), &row.label);
                self.set_text(&format!("cost-{}", id), &row.cost);
                self.set_text(&format!("owned-{}", id), &row.owned);
                if let Some(btn) = self.document.get_element_by_id(&format!("buy-{}", id)) {
                    let _ = btn.set_attribute("title", row.description);
                    let _ = if row.affordable {
                        btn.remove_attribute("disabled")
                    } else {
                        btn.set_attribute("disabled", "")
                    };
                }
            }
        }

        fn render_mute_button(&self) {
            let label = if self.settings.muted { "Unmute" } else { "Mute" };
            self.set_text("mute-btn", label);
        }
    }

    pub async fn run() -> Result<(), StartupError> {
        log::info!("Kebab Tycoon starting...");

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(StartupError::NoCanvas)?;

        // Backing store at device resolution; CSS keeps the logical size
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr).floor() as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr).floor() as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, document.clone());
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        game.render_state = Some(RenderState::new(surface, &adapter, width, height).await?);

        // Initial DOM state
        game.render_idle_panel();
        game.render_mute_button();
        game.set_text("hud-best", &game.best.get().to_string());

        let game = Rc::new(RefCell::new(game));

        setup_input_handlers(&canvas, game.clone());
        setup_idle_panel(&document, game.clone());
        load_assets(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Kebab Tycoon running!");
        Ok(())
    }

    /// Fetch sprites in the background; the game runs on primitives meanwhile
    fn load_assets(game: Rc<RefCell<Game>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let Some(sprites) = assets::load_sprites().await else {
                return;
            };
            if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                render_state.upload_sprites(&sprites);
            }
        });
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Some(action) = g.input.key_down(&event.key()) else {
                    return;
                };
                // Keep arrows/space from scrolling the page
                event.prevent_default();
                g.audio.unlock();
                if action == KeyAction::ToggleMute && !event.repeat() {
                    g.toggle_mute();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - start/restart and unlock audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.unlock();
                g.input.pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: drop held keys (the game keeps running)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_idle_panel(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "cook-btn", game.clone(), |g| {
            g.idle.cook();
            g.render_idle_panel();
        });

        for id in UpgradeId::ALL {
            on_click(document, &format!("buy-{}", id.as_str()), game.clone(), move |g| {
                if let Err(e) = g.idle.buy(id) {
                    log::info!("{}", e);
                }
                g.render_idle_panel();
            });
        }

        on_click(document, "reset-idle-btn", game.clone(), |g| {
            g.idle.reset();
            g.render_idle_panel();
        });

        on_click(document, "mute-btn", game, |g| g.toggle_mute());
    }

    /// Wire a button; every click also counts as an audio-unlocking gesture
    fn on_click(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        action: impl Fn(&mut Game) + 'static,
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} element", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            g.audio.unlock();
            action(&mut *g);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Kebab Tycoon (native) starting...");
    log::info!("The playable build is web-only - run with `trunk serve`");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    native_demo::arcade(seed);
    native_demo::idle();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless runs exercising the simulation and the idle economy
#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use kebab_tycoon::persistence::{self, MemoryStore};
    use kebab_tycoon::sim::{ArcadeState, GameEvent, autopilot, tick};
    use kebab_tycoon::{BestScore, IdleStore, UpgradeId};

    const DEMO_DT: f32 = 1.0 / 60.0;
    /// Give up on runs the autopilot survives indefinitely
    const DEMO_MAX_SECONDS: f32 = 300.0;

    /// Let the autopilot play one run and log how it went
    pub fn arcade(seed: u64) {
        let mut state = ArcadeState::new(seed);
        let mut caught = 0u32;
        let mut bombs = 0u32;
        let mut final_score = None;

        let mut elapsed = 0.0;
        while elapsed < DEMO_MAX_SECONDS && final_score.is_none() {
            let input = autopilot::drive(&state);
            tick(&mut state, &input, DEMO_DT);
            elapsed += DEMO_DT;

            for event in state.drain_events() {
                match event {
                    GameEvent::Ate => caught += 1,
                    GameEvent::BombHit => bombs += 1,
                    GameEvent::GameOver { score } => final_score = Some(score),
                    GameEvent::Started => {}
                }
            }
        }

        let score = final_score.unwrap_or(state.score);
        log::info!(
            "Autopilot run (seed {}): score {}, {} kebabs, {} bombs, {:.1}s{}",
            seed,
            score,
            caught,
            bombs,
            elapsed,
            if final_score.is_some() { "" } else { " (time limit)" }
        );

        let mut store = MemoryStore::new();
        let mut best = BestScore::load(&store);
        if best.record(score) {
            best.save(&mut store);
        }
        log::info!("Best score: {}", best.get());
    }

    /// Cook, buy a few upgrades and let a minute of passive income accrue
    pub fn idle() {
        let mut store = IdleStore::open(persistence::open_default());
        for _ in 0..40 {
            store.cook();
        }
        for id in [UpgradeId::Grill, UpgradeId::Chef, UpgradeId::Franchise] {
            if let Err(e) = store.buy(id) {
                log::warn!("{}", e);
            }
        }
        store.tick(60.0);

        // Reopen from the same storage to show the snapshot survived
        let store = IdleStore::open(store.into_storage());
        let state = store.state();
        log::info!(
            "Idle economy: {:.1} kebabs, {}/click, {}/s",
            state.kebabs,
            state.kebabs_per_click,
            state.kebabs_per_second
        );
    }
}
