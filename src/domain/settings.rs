//! `settings.data` loader: `category.key: value` lines, same comment rules as
//! `elements.data`. Unknown keys are ignored; unparseable values are ignored;
//! missing keys fall back to defaults. This file never fails to load.

use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub engine_width: u32,
    pub engine_height: u32,
    pub render_interval_ms: f64,
    pub physics_interval_ms: f64,
    pub input_brush_size: u32,
    pub input_brush_max_size: u32,
    pub input_brush_sensitivity: f64,
    pub debug_start_enabled: bool,
    pub debug_overlay_start_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            engine_width: 342,
            engine_height: 192,
            render_interval_ms: 16.667,
            physics_interval_ms: 25.0,
            input_brush_size: 4,
            input_brush_max_size: 42,
            input_brush_sensitivity: 0.02,
            debug_start_enabled: false,
            debug_overlay_start_enabled: false,
        }
    }
}

impl Settings {
    /// Missing file is not fatal here: fall back to defaults, mirroring the
    /// contract that unparseable/unknown keys are simply ignored.
    pub fn load(path: impl AsRef<Path>) -> Settings {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(_) => Settings::default(),
        }
    }

    pub fn parse(text: &str) -> Settings {
        let mut settings = Settings::default();
        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else { continue };
            let key = key.trim();
            let value = value.trim();
            apply_key(&mut settings, key, value);
        }
        settings
    }
}

fn apply_key(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "engine.width" => assign(&mut settings.engine_width, value.parse()),
        "engine.height" => assign(&mut settings.engine_height, value.parse()),
        "engine.render_interval" => assign(&mut settings.render_interval_ms, value.parse()),
        "engine.physics_interval" => assign(&mut settings.physics_interval_ms, value.parse()),
        "input.brush_size" => assign(&mut settings.input_brush_size, value.parse()),
        "input.brush_max_size" => assign(&mut settings.input_brush_max_size, value.parse()),
        "input.brush_sensitivity" => assign(&mut settings.input_brush_sensitivity, value.parse()),
        "debug.start_enabled" => assign(&mut settings.debug_start_enabled, value.parse()),
        "debug.overlay_start_enabled" => assign(&mut settings.debug_overlay_start_enabled, value.parse()),
        _ => {} // unknown key, ignored
    }
}

fn assign<T>(slot: &mut T, parsed: Result<T, impl std::fmt::Debug>) {
    if let Ok(v) = parsed {
        *slot = v;
    }
    // unparseable value: silently keep the existing (default) value
}
