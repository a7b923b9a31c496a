//! Falling-sand cellular-automaton physics core: element registry, dense
//! grid, fixed-timestep scheduler, and a frame-buffer compositor, wrapped in
//! a `wasm_bindgen` facade for browser hosts and a plain Rust API for the
//! native CLI driver.

pub mod core;
pub mod domain;
pub mod error;
pub mod logging;
pub mod render;
pub mod rng;
pub mod simulation;
pub mod systems;

use wasm_bindgen::prelude::*;

use domain::registry::ElementRegistry;
use domain::settings::Settings;
use simulation::engine::{Engine, PointerButton};

#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();
    logging::info("sandcore engine initialized");
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Browser-facing wrapper around [`Engine`]. Construction never fails:
/// malformed `elements.data`/`settings.data` text degrades to a registry
/// containing only EMPTY and to default settings, respectively, per the
/// loader's "warn and continue" contract. Callers that need load failures
/// surfaced should use `ElementRegistry::load` from the native driver
/// instead, where a missing/unreadable file is fatal.
#[wasm_bindgen]
pub struct SandCore {
    engine: Engine,
}

#[wasm_bindgen]
impl SandCore {
    #[wasm_bindgen(constructor)]
    pub fn new(elements_text: &str, settings_text: &str) -> SandCore {
        let registry = ElementRegistry::parse(elements_text);
        let settings = Settings::parse(settings_text);
        SandCore { engine: Engine::new(settings, registry) }
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn tick(&mut self, now_ms: f64) {
        self.engine.tick(now_ms);
    }

    pub fn paint_circle(&mut self, x: i32, y: i32, radius: i32, element_id: u16) {
        self.engine.paint_circle(x, y, radius, element_id);
    }

    pub fn erase_circle(&mut self, x: i32, y: i32, radius: i32) {
        self.engine.erase_circle(x, y, radius);
    }

    pub fn pointer_down(&mut self, x: i32, y: i32, erase: bool) {
        let button = if erase { PointerButton::Erase } else { PointerButton::Paint };
        self.engine.pointer_down(x, y, button);
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) {
        self.engine.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.engine.pointer_up();
    }

    pub fn wheel_delta(&mut self, delta: f64) {
        self.engine.wheel_delta(delta);
    }

    pub fn set_selected_element(&mut self, id: u16) {
        self.engine.set_selected_element(id);
    }

    pub fn set_brush_size(&mut self, n: u32) {
        self.engine.set_brush_size(n);
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.engine.enable_perf_metrics(enabled);
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.engine.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.engine.height()
    }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 {
        self.engine.tick_count()
    }

    #[wasm_bindgen(getter)]
    pub fn fps(&self) -> f64 {
        self.engine.fps()
    }

    #[wasm_bindgen(getter)]
    pub fn tps(&self) -> f64 {
        self.engine.tps()
    }

    /// Current frame as a flat RGBA8 buffer, top-left origin.
    pub fn take_frame(&self) -> Vec<u8> {
        self.engine.take_frame().to_vec()
    }
}
