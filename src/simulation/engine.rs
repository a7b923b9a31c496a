//! The public facade: owns the grid, registry, framebuffer and timing state,
//! and exposes the embedding-agnostic API described for consumers (a JS host
//! via wasm-bindgen, or the native CLI driver).

use crate::core::grid::Grid;
use crate::domain::registry::ElementRegistry;
use crate::domain::settings::Settings;
use crate::render::framebuffer::FrameBuffer;
use crate::rng::Rng;
use crate::simulation::perf::PerfStats;
use crate::simulation::scheduler::{physics_step, DEFAULT_DIRTY_CLEAR_CADENCE};

const MAX_SUBSTEPS_PER_FRAME: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Paint,
    Erase,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PendingStroke {
    active: bool,
    erase: bool,
    x: i32,
    y: i32,
}

pub struct Engine {
    settings: Settings,
    registry: ElementRegistry,
    grid: Grid,
    framebuffer: FrameBuffer,
    rng: Rng,

    is_running: bool,
    last_frame_time: Option<f64>,
    accumulator: f64,
    tick_count: u64,
    dirty_clear_cadence: u32,

    selected_element: u16,
    brush_size: u32,
    stroke: PendingStroke,

    perf_enabled: bool,
    last_perf_stats: PerfStats,
    frames_rendered: u64,
    last_fps: f64,
    last_tps: f64,
}

impl Engine {
    pub fn new(settings: Settings, registry: ElementRegistry) -> Engine {
        let width = settings.engine_width;
        let height = settings.engine_height;
        let brush_size = settings.input_brush_size;
        let seed = 0x5A_AD_CA_FEu32;

        Engine {
            grid: Grid::new(width, height),
            framebuffer: FrameBuffer::new(width, height),
            rng: Rng::new(seed),
            is_running: false,
            last_frame_time: None,
            accumulator: 0.0,
            tick_count: 0,
            dirty_clear_cadence: DEFAULT_DIRTY_CLEAR_CADENCE,
            selected_element: crate::domain::element::FIRST_USER_ELEMENT_ID,
            brush_size,
            stroke: PendingStroke::default(),
            perf_enabled: false,
            last_perf_stats: PerfStats::default(),
            frames_rendered: 0,
            last_fps: 0.0,
            last_tps: 0.0,
            settings,
            registry,
        }
    }

    pub fn start(&mut self) {
        self.is_running = true;
        self.last_frame_time = None;
    }

    pub fn stop(&mut self) {
        self.is_running = false;
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn set_dirty_clear_cadence(&mut self, cadence: u32) {
        self.dirty_clear_cadence = cadence.max(1);
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
    }

    pub fn perf_stats(&self) -> Option<PerfStats> {
        self.perf_enabled.then_some(self.last_perf_stats)
    }

    pub fn set_selected_element(&mut self, id: u16) {
        self.selected_element = id;
    }

    pub fn set_brush_size(&mut self, n: u32) {
        self.brush_size = n.min(self.settings.input_brush_max_size);
    }

    pub fn paint_circle(&mut self, x: i32, y: i32, radius: i32, element_id: u16) {
        self.grid.fill_circle(x, y, radius, element_id, &self.registry, &mut self.rng);
    }

    pub fn erase_circle(&mut self, x: i32, y: i32, radius: i32) {
        self.grid.fill_circle(x, y, radius, 0, &self.registry, &mut self.rng);
    }

    /// Begin a stroke at `(x, y)` in sim-space, active until `pointer_up`.
    pub fn pointer_down(&mut self, x: i32, y: i32, button: PointerButton) {
        self.stroke = PendingStroke { active: true, erase: button == PointerButton::Erase, x, y };
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) {
        self.stroke.x = x;
        self.stroke.y = y;
        self.framebuffer.set_cursor(Some((x, y, self.brush_size as i32)));
    }

    pub fn pointer_up(&mut self) {
        self.stroke.active = false;
    }

    /// `delta · brush_sensitivity`, clamped to `[0, brush_max_size]`.
    pub fn wheel_delta(&mut self, delta: f64) {
        let change = delta * self.settings.input_brush_sensitivity;
        let new_size = (self.brush_size as f64 + change).round();
        let clamped = new_size.clamp(0.0, self.settings.input_brush_max_size as f64);
        self.brush_size = clamped as u32;
    }

    fn apply_pending_input(&mut self) {
        if !self.stroke.active {
            return;
        }
        let radius = self.brush_size as i32;
        if self.stroke.erase {
            self.erase_circle(self.stroke.x, self.stroke.y, radius);
        } else {
            self.paint_circle(self.stroke.x, self.stroke.y, radius, self.selected_element);
        }
    }

    /// One loop iteration driven by a monotonic millisecond clock.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.is_running {
            return;
        }

        let delta = match self.last_frame_time {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_frame_time = Some(now_ms);

        self.apply_pending_input();

        self.accumulator += delta;
        let mut substeps = 0u32;
        let physics_interval = self.settings.physics_interval_ms;
        while self.accumulator >= physics_interval {
            let stats = physics_step(&mut self.grid, &self.registry, &mut self.rng, self.tick_count, self.dirty_clear_cadence);
            if self.perf_enabled {
                self.last_perf_stats = stats;
            }
            self.accumulator -= physics_interval;
            self.tick_count += 1;
            substeps += 1;
            if substeps >= MAX_SUBSTEPS_PER_FRAME {
                self.accumulator = 0.0;
                break;
            }
        }
        if delta > 0.0 {
            self.last_tps = (substeps as f64) * 1000.0 / delta;
            self.last_fps = 1000.0 / delta;
        }

        self.framebuffer.queue_particles(self.grid.cells().iter(), None);
        self.framebuffer.render();
        self.frames_rendered += 1;
    }

    pub fn take_frame(&self) -> &[u8] {
        self.framebuffer.bytes()
    }

    pub fn width(&self) -> u32 {
        self.settings.engine_width
    }

    pub fn height(&self) -> u32 {
        self.settings.engine_height
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn fps(&self) -> f64 {
        self.last_fps
    }

    pub fn tps(&self) -> f64 {
        self.last_tps
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
