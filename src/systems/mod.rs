//! Category dispatch: Solid and Electronic are no-ops (reserved); Technical
//! and unknown ids are skipped.

pub mod gas;
pub mod grouping;
pub mod liquid;
pub mod sand;

use crate::core::grid::Grid;
use crate::domain::element::Category;
use crate::domain::registry::ElementRegistry;
use crate::rng::Rng;

pub fn dispatch(
    grid: &mut Grid,
    index: usize,
    category: Category,
    rng: &mut Rng,
    registry: &ElementRegistry,
) -> Option<usize> {
    match category {
        Category::Liquid => liquid::handle_liquid(grid, index, rng, registry),
        Category::Gas => gas::handle_gas(grid, index, rng, registry),
        Category::Sand => sand::handle_sand(grid, index, rng, registry),
        Category::Solid | Category::Electronic | Category::Technical => None,
    }
}
