//! Tree Bounce entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    use tree_bounce::sim::{DragEvent, TickInput};
    use tree_bounce::{GameConfig, Session};

    // The 3D scene lives in JS; it reads one snapshot per frame
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            const render = window.treeBounceRender;
            if (typeof render !== 'function') {
                return false;
            }
            render(JSON.parse(json));
            return true;
        }
    ")]
    extern "C" {
        fn present_frame(json: &str) -> bool;
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: TickInput,
        last_time: f64,
        // Warn about a missing render hook once, not every frame
        renderer_missing: bool,
    }

    impl Game {
        fn new(seed: u64, config: GameConfig) -> Self {
            Self {
                session: Session::new(seed, config),
                input: TickInput::default(),
                last_time: 0.0,
                renderer_missing: false,
            }
        }

        /// Step the simulation and consume this frame's input
        fn update(&mut self, dt: f32) {
            // GameState logs run transitions itself
            for event in self.session.frame(&self.input, dt) {
                log::trace!("{:?}", event);
            }
            self.input.clear();
        }

        /// Hand the frame to the JS renderer
        fn render(&mut self) {
            let mut snapshot = serde_json::to_value(self.session.state.snapshot());
            if let Ok(serde_json::Value::Object(map)) = &mut snapshot {
                map.insert("camera_y".into(), self.session.camera.y.into());
            }
            let json = match snapshot.and_then(|v| serde_json::to_string(&v)) {
                Ok(json) => json,
                Err(e) => {
                    log::warn!("Failed to serialize frame: {}", e);
                    return;
                }
            };

            let presented = present_frame(&json);
            if !presented && !self.renderer_missing {
                log::warn!("window.treeBounceRender not installed, frames are not drawn");
            }
            self.renderer_missing = !presented;
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("bounce-counter") {
                el.set_text_content(Some(&self.session.state.ball.bounce_count.to_string()));
            }
        }
    }

    fn set_overlay_visible(id: &str, visible: bool) {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            log::warn!("#{} not found", id);
            return;
        };
        let class = if visible { "" } else { "hidden" };
        let _ = el.set_attribute("class", class);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tree Bounce starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let config = GameConfig::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, config)));

        log::info!("Game initialized with seed: {}", seed);

        // Overlay follows the lifecycle
        {
            let mut g = game.borrow_mut();
            let lifecycle = &mut g.session.state.lifecycle;
            lifecycle.on_game_over(|| set_overlay_visible("game-over", true));
            lifecycle.on_reset(|| set_overlay_visible("game-over", false));
        }
        set_overlay_visible("game-over", false);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Tree Bounce running!");
    }

    fn push_drag(game: &Rc<RefCell<Game>>, event: DragEvent) {
        game.borrow_mut().input.drag.push(event);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Press starts a drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                push_drag(&game, DragEvent::Press { x: event.client_x() as f32 });
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move only matters while dragging; the control filters that
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                push_drag(&game, DragEvent::Move { x: event.client_x() as f32 });
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release ends the drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                push_drag(&game, DragEvent::Release);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // So does the pointer leaving the page
        if let Some(root) = window.document().and_then(|d| d.document_element()) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                push_drag(&game, DragEvent::Release);
            });
            let _ = root
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "r" | "R" => g.input.restart = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
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
    log::info!("Tree Bounce (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to play in the browser");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    headless::run(seed, tree_bounce::GameConfig::load());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run without a window, for tuning and smoke tests
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use tree_bounce::sim::{DragEvent, GameEvent, TickInput};
    use tree_bounce::{GameConfig, Session, radians_to_degrees};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    /// Sweep the pointer back and forth, a slow drag every few seconds
    fn scripted_drag(frame: u32, input: &mut TickInput) {
        match frame % 180 {
            0 => input.drag.push(DragEvent::Press { x: 0.0 }),
            1..=59 => {
                let x = (frame % 180) as f32 * 2.0;
                input.drag.push(DragEvent::Move { x });
            }
            60 => input.drag.push(DragEvent::Release),
            _ => {}
        }
    }

    pub fn run(seed: u64, config: GameConfig) {
        let mut session = Session::new(seed, config);
        let mut input = TickInput::default();

        log::info!(
            "Seed {}: {} platforms on the trunk",
            seed,
            session.state.trunk.platforms().len()
        );

        let mut frame = 0;
        let mut ended = false;
        while frame < MAX_FRAMES && !ended {
            scripted_drag(frame, &mut input);
            for event in session.frame(&input, FRAME_DT) {
                match event {
                    GameEvent::Bounce {
                        surface,
                        height,
                        count,
                    } => {
                        log::debug!("Bounce #{} on {:?} at y={:.3}", count, surface, height);
                    }
                    GameEvent::GameOver { bounces } => {
                        log::info!("Game over after {} bounces", bounces);
                        ended = true;
                    }
                    GameEvent::Reset { run } => log::debug!("Run {} started", run),
                }
            }
            input.clear();
            frame += 1;
        }

        let snapshot = session.state.snapshot();
        log::info!(
            "Finished after {} frames: {:?}, {} bounces, ball at y={:.2}, camera at y={:.2}, trunk at {:.1} deg",
            frame,
            snapshot.phase,
            snapshot.bounce_count,
            snapshot.ball_position.y,
            session.camera.y,
            radians_to_degrees(snapshot.trunk_rotation)
        );
    }
}
