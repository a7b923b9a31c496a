//! Block-structured text loader for `elements.data`.
//!
//! ```text
//! # comment
//! [10]
//! name: Sand
//! category: sands
//! phase: solid
//! is_movable: true
//! density: 2.0
//! base_color: #C2B280
//! blend_color: #A0895F
//! highlight_color: #D8CBA0
//! cohesion: 10
//! repose_angle: 38
//! ```
//!
//! Invalid id, duplicate id, or a block missing any required field is
//! logged and the block discarded — the rest of the file still loads.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::element::{
    derive_repose_directions, Category, Element, Phase, Rgba8, EMPTY_ELEMENT_ID,
    FIRST_USER_ELEMENT_ID,
};
use crate::error::LoadError;
use crate::logging;

const REQUIRED_KEYS: &[&str] = &[
    "name",
    "phase",
    "category",
    "base_color",
    "blend_color",
    "highlight_color",
    "is_movable",
    "density",
    "cohesion",
    "repose_angle",
];

/// Read-only id → element mapping, built once at load time.
pub struct ElementRegistry {
    elements: HashMap<u16, Element>,
}

impl ElementRegistry {
    /// Load from a file path. `Io` is fatal; malformed blocks inside the file
    /// are warnings, not failures.
    pub fn load(path: impl AsRef<Path>) -> Result<ElementRegistry, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::parse(&text);
        if registry.elements.len() <= 1 {
            // Only EMPTY made it through.
            return Err(LoadError::Empty { path: path.to_path_buf() });
        }
        Ok(registry)
    }

    /// Parse already-loaded text. Never fails: bad blocks are warned about
    /// and dropped, and EMPTY is always injected at id 0.
    pub fn parse(text: &str) -> ElementRegistry {
        let mut elements: HashMap<u16, Element> = HashMap::new();

        let mut current_id: Option<u16> = None;
        let mut current_id_valid = false;
        let mut fields: HashMap<String, String> = HashMap::new();

        let flush = |id: Option<u16>, valid: bool, fields: &mut HashMap<String, String>, elements: &mut HashMap<u16, Element>| {
            let Some(id) = id else { return };
            if !valid {
                return;
            }
            match build_element(id, fields) {
                Ok(el) => {
                    if elements.contains_key(&id) {
                        logging::warn(&format!("elements.data: duplicate id {id}, discarding later block"));
                    } else {
                        elements.insert(id, el);
                    }
                }
                Err(reason) => {
                    logging::warn(&format!("elements.data: block [{id}] discarded: {reason}"));
                }
            }
            fields.clear();
        };

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(inner) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                // New block: flush the previous one first.
                flush(current_id, current_id_valid, &mut fields, &mut elements);
                match inner.trim().parse::<i64>() {
                    Ok(n) if n >= FIRST_USER_ELEMENT_ID as i64 && n <= u16::MAX as i64 => {
                        current_id = Some(n as u16);
                        current_id_valid = true;
                    }
                    _ => {
                        logging::warn(&format!("elements.data: invalid block id '{inner}', discarding block"));
                        current_id = None;
                        current_id_valid = false;
                    }
                }
                continue;
            }
            if current_id.is_none() {
                continue; // stray key-value before any block
            }
            if let Some((key, value)) = line.split_once(':') {
                fields.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        flush(current_id, current_id_valid, &mut fields, &mut elements);

        // EMPTY is always injected at id 0, even if the file defined one.
        elements.insert(EMPTY_ELEMENT_ID, Element::empty());

        ElementRegistry { elements }
    }

    pub fn get(&self, id: u16) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn contains(&self, id: u16) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.elements.keys().copied()
    }
}

fn build_element(id: u16, fields: &HashMap<String, String>) -> Result<Element, String> {
    for key in REQUIRED_KEYS {
        if !fields.contains_key(*key) {
            return Err(format!("missing required field '{key}'"));
        }
    }

    let name = fields["name"].clone();
    let phase = Phase::from_key(&fields["phase"]).ok_or_else(|| format!("unknown phase '{}'", fields["phase"]))?;
    let category = Category::from_key(&fields["category"]).ok_or_else(|| format!("unknown category '{}'", fields["category"]))?;
    let base_color = Rgba8::parse(&fields["base_color"]).ok_or_else(|| format!("bad base_color '{}'", fields["base_color"]))?;
    let blend_color = Rgba8::parse(&fields["blend_color"]).ok_or_else(|| format!("bad blend_color '{}'", fields["blend_color"]))?;
    let highlight_color = Rgba8::parse(&fields["highlight_color"])
        .ok_or_else(|| format!("bad highlight_color '{}'", fields["highlight_color"]))?;
    let is_movable = fields["is_movable"]
        .parse::<bool>()
        .map_err(|_| format!("bad is_movable '{}'", fields["is_movable"]))?;
    let density = fields["density"]
        .parse::<f32>()
        .map_err(|_| format!("bad density '{}'", fields["density"]))?;
    let cohesion = fields["cohesion"]
        .parse::<u8>()
        .map_err(|_| format!("bad cohesion '{}'", fields["cohesion"]))?;
    let repose_angle_raw = fields["repose_angle"]
        .parse::<i32>()
        .map_err(|_| format!("bad repose_angle '{}'", fields["repose_angle"]))?;
    let repose_angle = repose_angle_raw.clamp(10, 80) as u8;

    let repose_directions = if category == Category::Sand {
        derive_repose_directions(repose_angle)
    } else {
        Vec::new()
    };

    Ok(Element {
        id,
        name,
        category,
        phase,
        is_movable,
        density,
        base_color,
        blend_color,
        highlight_color,
        cohesion,
        repose_angle,
        repose_directions,
    })
}
