//! Element definitions: immutable species data loaded once and shared
//! read-only for the lifetime of the engine.

/// Coarse behavior class selecting the per-tick handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Category {
    Technical = 0,
    Solid = 1,
    Liquid = 2,
    Gas = 3,
    Sand = 4,
    Electronic = 5,
}

impl Category {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "solids" => Some(Category::Solid),
            "liquids" => Some(Category::Liquid),
            "gases" => Some(Category::Gas),
            "sands" => Some(Category::Sand),
            "electronics" => Some(Category::Electronic),
            _ => None,
        }
    }
}

/// Matter phase. `Virtual` is reserved for non-physical technical elements
/// (e.g. empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Phase {
    Virtual = -1,
    Solid = 0,
    Liquid = 1,
    Gas = 2,
    Plasma = 3,
}

impl Phase {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "solid" => Some(Phase::Solid),
            "liquid" => Some(Phase::Liquid),
            "gas" => Some(Phase::Gas),
            "plasma" => Some(Phase::Plasma),
            _ => None,
        }
    }
}

/// Packed RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation at `t` in `[0, 1]`, each channel rounded to the
    /// nearest integer.
    pub fn lerp(a: Rgba8, b: Rgba8, t: f32) -> Rgba8 {
        let lerp_channel = |x: u8, y: u8| -> u8 {
            let v = x as f32 + (y as f32 - x as f32) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba8 {
            r: lerp_channel(a.r, b.r),
            g: lerp_channel(a.g, b.g),
            b: lerp_channel(a.b, b.b),
            a: lerp_channel(a.a, b.a),
        }
    }

    /// Parse `#RRGGBB` or `#RGB`; alpha defaults to 0xFF.
    pub fn parse(s: &str) -> Option<Rgba8> {
        let s = s.trim().strip_prefix('#')?;
        match s.len() {
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16).ok()?;
                let g = u8::from_str_radix(&s[2..4], 16).ok()?;
                let b = u8::from_str_radix(&s[4..6], 16).ok()?;
                Some(Rgba8::new(r, g, b, 0xFF))
            }
            3 => {
                let dup = |c: char| -> Option<u8> { u8::from_str_radix(&c.to_string().repeat(2), 16).ok() };
                let mut chars = s.chars();
                let r = dup(chars.next()?)?;
                let g = dup(chars.next()?)?;
                let b = dup(chars.next()?)?;
                Some(Rgba8::new(r, g, b, 0xFF))
            }
            _ => None,
        }
    }
}

/// Immutable element species. Id `0` is the reserved EMPTY element; ids
/// `1..=9` are reserved technical slots; user-defined ids start at `10`.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: u16,
    pub name: String,
    pub category: Category,
    pub phase: Phase,
    pub is_movable: bool,
    pub density: f32,
    pub base_color: Rgba8,
    pub blend_color: Rgba8,
    pub highlight_color: Rgba8,
    pub cohesion: u8,
    pub repose_angle: u8,
    /// Precomputed repose direction groups, populated for `Category::Sand`
    /// elements only (empty otherwise). See `derive_repose_directions`.
    pub repose_directions: Vec<Vec<(i32, i32)>>,
}

pub const EMPTY_ELEMENT_ID: u16 = 0;
pub const FIRST_RESERVED_TECHNICAL_ID: u16 = 1;
pub const LAST_RESERVED_TECHNICAL_ID: u16 = 9;
pub const FIRST_USER_ELEMENT_ID: u16 = 10;

impl Element {
    /// The hardcoded EMPTY element, injected by the loader regardless of
    /// what the data file defines for id 0.
    pub fn empty() -> Element {
        let black = Rgba8::new(0x0E, 0x0E, 0x11, 0xFF);
        Element {
            id: EMPTY_ELEMENT_ID,
            name: "Empty".to_string(),
            category: Category::Technical,
            phase: Phase::Virtual,
            is_movable: true,
            density: 0.0,
            base_color: black,
            blend_color: black,
            highlight_color: black,
            cohesion: 0,
            repose_angle: 45,
            repose_directions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id == EMPTY_ELEMENT_ID
    }
}

/// Derive the repose direction tiers for a Sand element from its clamped
/// `repose_angle` (degrees, clamped to `[10, 80]` by the loader).
///
/// θ < 50°: `[[(0,-1)], [(1,-1),(-1,-1)], [(⌈cot θ⌉,-1),(-⌈cot θ⌉,-1)]]`
/// θ ≥ 50°: `[[(0,-1)], [(1,-⌈tan θ⌉),(-1,-⌈tan θ⌉)]]`
pub fn derive_repose_directions(repose_angle: u8) -> Vec<Vec<(i32, i32)>> {
    let theta = (repose_angle as f64).to_radians();
    if repose_angle < 50 {
        let cot = (1.0 / theta.tan()).ceil() as i32;
        vec![
            vec![(0, -1)],
            vec![(1, -1), (-1, -1)],
            vec![(cot, -1), (-cot, -1)],
        ]
    } else {
        let tan = theta.tan().ceil() as i32;
        vec![vec![(0, -1)], vec![(1, -tan), (-1, -tan)]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgba8::parse("#112233"), Some(Rgba8::new(0x11, 0x22, 0x33, 0xFF)));
        assert_eq!(Rgba8::parse("#abc"), Some(Rgba8::new(0xaa, 0xbb, 0xcc, 0xFF)));
        assert_eq!(Rgba8::parse("bogus"), None);
    }

    #[test]
    fn lerp_at_endpoints() {
        let a = Rgba8::new(0, 0, 0, 255);
        let b = Rgba8::new(255, 255, 255, 255);
        assert_eq!(Rgba8::lerp(a, b, 0.0), a);
        assert_eq!(Rgba8::lerp(a, b, 1.0), b);
    }

    #[test]
    fn repose_directions_low_angle() {
        let dirs = derive_repose_directions(45);
        assert_eq!(dirs.len(), 3);
        assert_eq!(dirs[0], vec![(0, -1)]);
        assert_eq!(dirs[1], vec![(1, -1), (-1, -1)]);
    }

    #[test]
    fn repose_directions_high_angle() {
        let dirs = derive_repose_directions(70);
        assert_eq!(dirs.len(), 2);
        assert_eq!(dirs[0], vec![(0, -1)]);
    }

    #[test]
    fn empty_element_is_reserved() {
        let e = Element::empty();
        assert_eq!(e.id, EMPTY_ELEMENT_ID);
        assert!(e.is_movable);
        assert_eq!(e.density, 0.0);
    }
}
