//! Liquid handler: straight down, then diagonal down, then sideways flow.

use crate::core::grid::Grid;
use crate::core::movement::try_move;
use crate::domain::registry::ElementRegistry;
use crate::rng::Rng;

pub fn handle_liquid(grid: &mut Grid, index: usize, rng: &mut Rng, registry: &ElementRegistry) -> Option<usize> {
    let groups = vec![
        vec![(0, -1)],
        vec![(-1, -1), (1, -1)],
        vec![(-1, 0), (1, 0)],
    ];
    try_move(grid, index, &groups, false, rng, registry, true, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ElementRegistry {
        ElementRegistry::parse(
            "[10]\nname: Water\ncategory: liquids\nphase: liquid\nis_movable: true\ndensity: 1\nbase_color: #00f\nblend_color: #00f\nhighlight_color: #00f\ncohesion: 0\nrepose_angle: 45\n",
        )
    }

    #[test]
    fn water_falls_straight_down_when_clear() {
        let reg = registry();
        let mut rng = Rng::new(7);
        let mut grid = Grid::new(5, 5);
        grid.create_at(2, 3, 10, &reg, &mut rng, false, false);
        let idx = grid.get(2, 3).unwrap().index;
        handle_liquid(&mut grid, idx, &mut rng, &reg);
        assert_eq!(grid.get(2, 2).unwrap().element_id, 10);
    }

    #[test]
    fn water_reaches_the_floor() {
        let reg = registry();
        let mut rng = Rng::new(7);
        let mut grid = Grid::new(10, 10);
        grid.create_at(5, 9, 10, &reg, &mut rng, false, false);
        let mut last_y = 9u32;
        for _ in 0..30 {
            let idx = grid
                .cells()
                .iter()
                .find(|p| p.element_id == 10)
                .unwrap()
                .index;
            handle_liquid(&mut grid, idx, &mut rng, &reg);
            let y = grid.cells().iter().find(|p| p.element_id == 10).unwrap().position.1;
            assert!(y <= last_y, "water y must be non-increasing until it rests");
            last_y = y;
        }
        assert_eq!(last_y, 0);
    }
}
