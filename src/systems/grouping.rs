//! Liquid grouping ("Katorithm"): a single raster scan that unions
//! same-element liquid regions via UP/LEFT predecessors, paired with an
//! equalisation pass that levels each puddle's surface.

use std::collections::HashSet;

use crate::core::grid::Grid;
use crate::domain::element::Category;
use crate::domain::registry::ElementRegistry;

struct Group {
    /// Every flat index belonging to this connected same-element region.
    members: Vec<usize>,
    /// Surface liquid particles whose up-neighbor is empty — candidates to
    /// sink into the paired `empties` slot during equalisation.
    liquids: Vec<usize>,
    empties: Vec<usize>,
}

/// Minimum puddle size (by total membership) to bother equalising; smaller
/// groups are ignored to avoid pathological frame cost.
const MIN_GROUP_SIZE: usize = 30;

/// Cap on equalisation swaps performed per surviving group, per tick.
const SWAP_DIVISOR: usize = 4;

/// Single-scan union over the grid's liquid-category cells, followed by one
/// equalisation pass per surviving group. Returns the number of equalisation
/// swaps performed (for perf-stat reporting).
pub fn group_and_equalize(
    grid: &mut Grid,
    registry: &ElementRegistry,
    processed: &mut HashSet<usize>,
) -> usize {
    let groups = scan_groups(grid, registry);
    let mut swaps = 0;
    for group in groups {
        if group.members.len() <= MIN_GROUP_SIZE {
            continue;
        }
        swaps += equalize_group(grid, group, processed);
    }
    swaps
}

fn scan_groups(grid: &Grid, registry: &ElementRegistry) -> Vec<Group> {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let size = grid.cells().len();
    let mut group_of: Vec<Option<usize>> = vec![None; size];
    let mut groups: Vec<Group> = Vec::new();

    // y from H-1 down to 0 (topmost row first, since y increases upward),
    // x from 0 to W-1 within each row.
    for y in (0..h).rev() {
        for x in 0..w {
            let Some(p) = grid.get(x, y) else { continue };
            let Some(el) = registry.get(p.element_id) else { continue };
            if el.category != Category::Liquid {
                continue;
            }
            let idx = p.index;
            let element_id = p.element_id;

            let up = grid.get(x, y + 1);
            let left = grid.get(x - 1, y);
            let has_up = up.map(|n| n.element_id == element_id).unwrap_or(false);
            let has_left = left.map(|n| n.element_id == element_id).unwrap_or(false);
            let is_up_empty = up.map(|n| n.element_id == 0).unwrap_or(false);
            let up_index = up.map(|n| n.index);

            let gid = match (has_left, has_up) {
                (false, false) => {
                    let gid = groups.len();
                    groups.push(Group { members: vec![idx], liquids: Vec::new(), empties: Vec::new() });
                    group_of[idx] = Some(gid);
                    gid
                }
                (true, false) => {
                    // has_left true implies left exists and was already
                    // visited (same row, smaller x); a missing predecessor
                    // group is a violated invariant, not a case to panic on.
                    let Some(left) = left else {
                        debug_assert!(false, "has_left true but left neighbor missing");
                        continue;
                    };
                    let Some(gid) = group_of[left.index] else {
                        debug_assert!(false, "left predecessor already grouped");
                        continue;
                    };
                    groups[gid].members.push(idx);
                    group_of[idx] = Some(gid);
                    gid
                }
                (false, true) => {
                    // up's row (y+1) was scanned before this one.
                    let Some(up) = up else {
                        debug_assert!(false, "has_up true but up neighbor missing");
                        continue;
                    };
                    let Some(gid) = group_of[up.index] else {
                        debug_assert!(false, "up predecessor already grouped");
                        continue;
                    };
                    groups[gid].members.push(idx);
                    group_of[idx] = Some(gid);
                    gid
                }
                (true, true) => {
                    let (Some(up_n), Some(left_n)) = (up, left) else {
                        debug_assert!(false, "has_up/has_left true but neighbor missing");
                        continue;
                    };
                    let Some(gid_up) = group_of[up_n.index] else {
                        debug_assert!(false, "up predecessor already grouped");
                        continue;
                    };
                    let Some(gid_left) = group_of[left_n.index] else {
                        debug_assert!(false, "left predecessor already grouped");
                        continue;
                    };
                    groups[gid_up].members.push(idx);
                    group_of[idx] = Some(gid_up);

                    if gid_left != gid_up {
                        let moved_members = std::mem::take(&mut groups[gid_left].members);
                        let moved_liquids = std::mem::take(&mut groups[gid_left].liquids);
                        let moved_empties = std::mem::take(&mut groups[gid_left].empties);
                        for &member in &moved_members {
                            group_of[member] = Some(gid_up);
                        }
                        groups[gid_up].members.extend(moved_members);
                        groups[gid_up].liquids.extend(moved_liquids);
                        groups[gid_up].empties.extend(moved_empties);
                        // Left slot is emptied, not removed, to preserve id
                        // stability of remaining group indices.
                    }
                    gid_up
                }
            };

            if is_up_empty {
                let Some(up_idx) = up_index else {
                    debug_assert!(false, "is_up_empty true but up neighbor missing");
                    continue;
                };
                groups[gid].liquids.push(idx);
                groups[gid].empties.push(up_idx);
            }
        }
    }

    groups
}

fn equalize_group(grid: &mut Grid, mut group: Group, processed: &mut HashSet<usize>) -> usize {
    group.liquids.sort_by(|&a, &b| {
        let ya = grid.cells()[a].position.1;
        let yb = grid.cells()[b].position.1;
        yb.cmp(&ya) // descending: highest first
    });
    group.empties.sort_by_key(|&idx| grid.cells()[idx].position.1); // ascending: lowest first

    let l = group.liquids.len().min(group.empties.len());
    let cap = l / SWAP_DIVISOR;
    let mut performed = 0;

    for i in 0..l {
        if performed >= cap {
            break;
        }
        let liquid_idx = group.liquids[i];
        let empty_idx = group.empties[i];
        let ly = grid.cells()[liquid_idx].position.1;
        let ey = grid.cells()[empty_idx].position.1;
        if ly > ey {
            let liquid = grid.cells()[liquid_idx].clone();
            let empty = grid.cells()[empty_idx].clone();
            grid.swap(&liquid, &empty, true, true);
            processed.insert(liquid_idx);
            processed.insert(empty_idx);
            performed += 1;
        }
    }
    performed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;

    fn water_registry() -> ElementRegistry {
        ElementRegistry::parse(
            "[10]\nname: Water\ncategory: liquids\nphase: liquid\nis_movable: true\ndensity: 1\nbase_color: #00f\nblend_color: #00f\nhighlight_color: #00f\ncohesion: 0\nrepose_angle: 45\n",
        )
    }

    fn fill_rect(grid: &mut Grid, reg: &ElementRegistry, rng: &mut Rng, x0: i32, y0: i32, w: i32, h: i32, id: u16) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                grid.create_at(x, y, id, reg, rng, false, false);
            }
        }
    }

    #[test]
    fn small_puddle_is_skipped_below_threshold() {
        let reg = water_registry();
        let mut rng = Rng::new(1);
        let mut grid = Grid::new(20, 20);
        // 10 x 3 = 30 cells: must NOT be equalised (<= 30).
        fill_rect(&mut grid, &reg, &mut rng, 2, 2, 10, 3, 10);
        let mut processed = HashSet::new();
        let swaps = group_and_equalize(&mut grid, &reg, &mut processed);
        assert_eq!(swaps, 0);
    }

    #[test]
    fn large_puddle_is_considered_above_threshold() {
        let reg = water_registry();
        let mut rng = Rng::new(1);
        let mut grid = Grid::new(20, 20);
        // 11 x 3 = 33 cells: must be considered (> 30). Leave the row above
        // open so there's somewhere to equalise into.
        fill_rect(&mut grid, &reg, &mut rng, 2, 2, 11, 3, 10);
        let groups = scan_groups(&grid, &reg);
        assert!(groups.iter().any(|g| g.members.len() > 30));
    }

    #[test]
    fn equalisation_moves_liquid_toward_lower_empties() {
        let reg = water_registry();
        let mut rng = Rng::new(1);
        let mut grid = Grid::new(20, 20);
        // A tall narrow column feeding a wide shallow pool below it, all
        // connected via the same element id, comfortably above threshold.
        fill_rect(&mut grid, &reg, &mut rng, 5, 10, 1, 25, 10); // tall stack (won't all fit; clipped by bounds)
        fill_rect(&mut grid, &reg, &mut rng, 0, 0, 20, 2, 10); // wide base
        let total_before: usize = grid.cells().iter().filter(|p| p.element_id == 10).count();
        let mut processed = HashSet::new();
        group_and_equalize(&mut grid, &reg, &mut processed);
        let total_after: usize = grid.cells().iter().filter(|p| p.element_id == 10).count();
        assert_eq!(total_before, total_after, "equalisation only swaps, never destroys liquid");
    }
}
