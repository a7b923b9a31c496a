//! `try_move`: the single movement primitive every category handler calls.
//!
//! Direction groups are tiers of candidate offsets. Tiers are tried in
//! order; within a tier, candidates are tried in a freshly shuffled order.
//! The first candidate whose target is movable and less dense than the
//! mover wins — that swap condition is the only mover-selection rule.

use crate::core::grid::Grid;
use crate::domain::registry::ElementRegistry;
use crate::rng::Rng;

/// Attempt to move the particle currently at `from_index` through the given
/// direction-group tiers. Returns the flat index of the swap target on
/// success.
pub fn try_move(
    grid: &mut Grid,
    from_index: usize,
    direction_groups: &[Vec<(i32, i32)>],
    bump_x: bool,
    rng: &mut Rng,
    registry: &ElementRegistry,
    mark_dirty: bool,
    include_neighbors: bool,
) -> Option<usize> {
    let (px, py, density) = {
        let p = &grid.cells()[from_index];
        let density = registry.get(p.element_id).map(|e| e.density).unwrap_or(0.0);
        (p.position.0 as i32, p.position.1 as i32, density)
    };

    for tier in direction_groups {
        let mut candidates = tier.clone();
        rng.shuffle(&mut candidates);

        for (dx, dy) in candidates {
            let dx = if bump_x && rng.next_bool() { -dx } else { dx };
            let tx = px + dx;
            let ty = py + dy;

            let Some(target) = grid.get(tx, ty) else { continue };
            let target_movable = registry.get(target.element_id).map(|e| e.is_movable).unwrap_or(false);
            let target_density = registry.get(target.element_id).map(|e| e.density).unwrap_or(f32::INFINITY);

            if target_movable && density > target_density {
                let target_particle = target.clone();
                let target_index = target_particle.index;
                let mover_particle = grid.cells()[from_index].clone();
                grid.swap(&mover_particle, &target_particle, mark_dirty, include_neighbors);
                return Some(target_index);
            }
        }
    }
    None
}
