//! Dense `W·H` particle storage plus bounds, neighborhood, dirty-set, and
//! brush operations. Mirrors the teacher's `Grid` in spirit (owns all cell
//! state, exposes checked accessors) but stores one `Particle` per cell
//! (array-of-structs) rather than the teacher's structure-of-arrays, per the
//! design notes' recommendation to keep element extras on the element, not
//! the cell.

use crate::core::dirty::DirtySet;
use crate::core::particle::Particle;
use crate::domain::element::Rgba8;
use crate::domain::registry::ElementRegistry;
use crate::rng::Rng;

/// The eight neighbor offsets, used by `neighbors` and by category handlers
/// composing direction groups.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// The color sample steps used by `create_at`: t ∈ {0, 1/5, 2/5, 3/5, 4/5, 1}.
const COLOR_STEPS: [f32; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Particle>,
    dirty: DirtySet,
}

impl Grid {
    /// Create a grid filled entirely with the EMPTY element (id 0).
    pub fn new(width: u32, height: u32) -> Grid {
        let size = (width as usize) * (height as usize);
        let empty_color = Rgba8::new(0x0E, 0x0E, 0x11, 0xFF);
        let cells = (0..size)
            .map(|idx| {
                let x = (idx as u32) % width.max(1);
                let y = (idx as u32) / width.max(1);
                Particle::new(0, (x, y), idx, empty_color)
            })
            .collect();
        Grid {
            width,
            height,
            cells,
            dirty: DirtySet::new(size),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn flat_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Particle> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(&self.cells[self.flat_index(x as u32, y as u32)])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Particle> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.flat_index(x as u32, y as u32);
        Some(&mut self.cells[idx])
    }

    pub fn neighbor(&self, p: &Particle, delta: (i32, i32)) -> Option<&Particle> {
        let (px, py) = p.position;
        self.get(px as i32 + delta.0, py as i32 + delta.1)
    }

    /// Map offsets to particles, dropping any that fall out of bounds, then
    /// AND-filter by category and/or element id.
    pub fn neighbors<'a>(
        &'a self,
        p: &Particle,
        deltas: &[(i32, i32)],
        filter_category: Option<crate::domain::element::Category>,
        filter_id: Option<u16>,
        registry: &ElementRegistry,
    ) -> Vec<&'a Particle> {
        deltas
            .iter()
            .filter_map(|&d| self.neighbor(p, d))
            .filter(|n| {
                if let Some(id) = filter_id {
                    if n.element_id != id {
                        return false;
                    }
                }
                if let Some(cat) = filter_category {
                    let Some(el) = registry.get(n.element_id) else { return false };
                    if el.category != cat {
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    pub fn mark_dirty(&mut self, p: &Particle, include_neighbors: bool) {
        self.dirty.insert(p.index);
        if include_neighbors {
            let (px, py) = p.position;
            for &(dx, dy) in &NEIGHBOR_OFFSETS {
                let nx = px as i32 + dx;
                let ny = py as i32 + dy;
                if self.in_bounds(nx, ny) {
                    self.dirty.insert(self.flat_index(nx as u32, ny as u32));
                }
            }
        }
    }

    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    pub fn dirty_is_empty(&self) -> bool {
        self.dirty.is_empty()
    }

    pub fn dirty_snapshot(&self) -> Vec<usize> {
        self.dirty.to_vec()
    }

    pub fn dirty_clear(&mut self) {
        self.dirty.clear();
    }

    /// Rebuild the cell at `(x, y)` to a new particle of `element_id`.
    /// Returns `false` only when out of bounds.
    pub fn create_at(
        &mut self,
        x: i32,
        y: i32,
        element_id: u16,
        registry: &ElementRegistry,
        rng: &mut Rng,
        mark_dirty: bool,
        include_neighbors: bool,
    ) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let (ux, uy) = (x as u32, y as u32);
        let idx = self.flat_index(ux, uy);

        let color = match registry.get(element_id) {
            Some(el) => {
                let t = COLOR_STEPS[rng.next_below(COLOR_STEPS.len())];
                Rgba8::lerp(el.base_color, el.highlight_color, t)
            }
            None => Rgba8::default(),
        };

        let particle = Particle::new(element_id, (ux, uy), idx, color);
        self.cells[idx] = particle;

        if mark_dirty {
            let p = self.cells[idx].clone();
            self.mark_dirty(&p, include_neighbors);
        }
        true
    }

    /// Exchange the two (already-resolved) particles' grid slots, updating
    /// each one's `(position, index)` to its new home.
    pub fn swap(&mut self, a: &Particle, b: &Particle, mark_dirty: bool, include_neighbors: bool) {
        let a_index = a.index;
        let b_index = b.index;
        if a_index == b_index {
            return;
        }
        let a_pos = a.position;
        let b_pos = b.position;

        self.cells.swap(a_index, b_index);
        self.cells[a_index].position = a_pos;
        self.cells[a_index].index = a_index;
        self.cells[b_index].position = b_pos;
        self.cells[b_index].index = b_index;

        if mark_dirty {
            let a = self.cells[a_index].clone();
            let b = self.cells[b_index].clone();
            self.mark_dirty(&a, include_neighbors);
            self.mark_dirty(&b, include_neighbors);
        }
    }

    /// Paint a filled circle of radius `r` centered at `(cx, cy)`.
    ///
    /// Erasing (`element_id == 0`) overrides any occupant; painting a
    /// non-zero element only lands on cells that are currently EMPTY,
    /// allowing non-destructive stacking strokes.
    pub fn fill_circle(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        element_id: u16,
        registry: &ElementRegistry,
        rng: &mut Rng,
    ) {
        let r2 = r * r;
        for j in -r..=r {
            for i in -r..=r {
                if i * i + j * j > r2 {
                    continue;
                }
                let px = cx + i;
                let py = cy + j;
                if !self.in_bounds(px, py) {
                    continue;
                }
                let occupant_is_empty = self.get(px, py).map(|p| p.element_id == 0).unwrap_or(false);
                if element_id == 0 || occupant_is_empty {
                    self.create_at(px, py, element_id, registry, rng, true, true);
                }
            }
        }
    }

    pub fn cells(&self) -> &[Particle] {
        &self.cells
    }

    pub fn index_coherent(&self, idx: usize) -> bool {
        let p = &self.cells[idx];
        p.index == idx && p.position == ((idx as u32) % self.width, (idx as u32) / self.width)
    }
}
