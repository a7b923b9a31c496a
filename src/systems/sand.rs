//! Sand handler: uses the element's precomputed repose direction tiers, with
//! lateral jitter (`bump_x`) applied per candidate including vertical ones —
//! the source this core is modeled on does the same; whether that was
//! intended for straight-down tiers specifically is an open question (see
//! DESIGN.md).

use crate::core::grid::Grid;
use crate::core::movement::try_move;
use crate::domain::registry::ElementRegistry;
use crate::rng::Rng;

pub fn handle_sand(grid: &mut Grid, index: usize, rng: &mut Rng, registry: &ElementRegistry) -> Option<usize> {
    let element_id = grid.cells()[index].element_id;
    let Some(element) = registry.get(element_id) else { return None };
    if element.repose_directions.is_empty() {
        return None;
    }
    let groups = element.repose_directions.clone();
    try_move(grid, index, &groups, true, rng, registry, true, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ElementRegistry {
        ElementRegistry::parse(
            "[10]\nname: Sand\ncategory: sands\nphase: solid\nis_movable: true\ndensity: 2\nbase_color: #C2B280\nblend_color: #C2B280\nhighlight_color: #C2B280\ncohesion: 0\nrepose_angle: 45\n",
        )
    }

    #[test]
    fn sand_falls_straight_down_when_clear() {
        let reg = registry();
        let mut rng = Rng::new(5);
        let mut grid = Grid::new(5, 5);
        grid.create_at(2, 3, 10, &reg, &mut rng, false, false);
        let idx = grid.get(2, 3).unwrap().index;
        handle_sand(&mut grid, idx, &mut rng, &reg);
        assert_eq!(grid.get(2, 2).unwrap().element_id, 10);
    }

    #[test]
    fn sand_pile_forms_a_symmetric_mound() {
        let reg = registry();
        let mut rng = Rng::new(99);
        let mut grid = Grid::new(20, 20);
        for x in 5..15 {
            grid.create_at(x, 15, 10, &reg, &mut rng, false, false);
        }
        let total_before: usize = grid.cells().iter().filter(|p| p.element_id == 10).count();

        for _ in 0..200 {
            let indices: Vec<usize> = grid
                .cells()
                .iter()
                .filter(|p| p.element_id == 10)
                .map(|p| p.index)
                .collect();
            for idx in indices {
                if grid.cells()[idx].element_id == 10 {
                    handle_sand(&mut grid, idx, &mut rng, &reg);
                }
            }
        }

        let total_after: usize = grid.cells().iter().filter(|p| p.element_id == 10).count();
        assert_eq!(total_before, total_after, "sand count must be conserved");

        for p in grid.cells() {
            if p.element_id == 10 {
                assert!(p.position.1 < grid.height(), "no sand below the grid");
            }
        }
    }
}
