//! One physics step: consume the previous tick's dirty set, randomize and
//! sort it for bottom-up/fair processing, dispatch each particle by
//! category, then run one liquid grouping + equalisation pass.

use std::collections::HashSet;

use crate::core::grid::Grid;
use crate::domain::registry::ElementRegistry;
use crate::rng::Rng;
use crate::simulation::perf::PerfStats;
use crate::systems;
use crate::systems::grouping::group_and_equalize;

/// Default dirty-set clear cadence: clear every tick. Spec's Open Question 1
/// leaves this configurable; the default is frozen here for reproducible
/// tests (see DESIGN.md).
pub const DEFAULT_DIRTY_CLEAR_CADENCE: u32 = 1;

pub fn physics_step(
    grid: &mut Grid,
    registry: &ElementRegistry,
    rng: &mut Rng,
    tick_index: u64,
    dirty_clear_cadence: u32,
) -> PerfStats {
    let timer_start = crate::simulation::perf::PerfTimer::start();

    let mut particles = grid.dirty_snapshot();
    let dirty_collected = particles.len() as u32;

    let cadence = dirty_clear_cadence.max(1);
    if tick_index % cadence as u64 == 0 {
        grid.dirty_clear();
    }

    rng.shuffle(&mut particles);
    particles.sort_by_key(|&idx| grid.cells()[idx].position.1);

    let mut processed: HashSet<usize> = HashSet::new();
    let mut swaps_performed = 0u32;

    for idx in particles {
        if processed.contains(&idx) {
            continue;
        }
        let element_id = grid.cells()[idx].element_id;
        let Some(category) = registry.get(element_id).map(|e| e.category) else { continue };

        if let Some(target_idx) = systems::dispatch(grid, idx, category, rng, registry) {
            processed.insert(idx);
            processed.insert(target_idx);
            swaps_performed += 1;
        }
    }

    let grouping_swaps = group_and_equalize(grid, registry, &mut processed) as u32;

    PerfStats {
        dirty_collected,
        swaps_performed,
        grouping_swaps,
        step_micros: timer_start.elapsed_micros(),
    }
}
