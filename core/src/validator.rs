use crate::*;

/// Indices of every cell that satisfies `target`.
pub fn correct_set(grid: &Grid, target: &TargetCriterion) -> Selection {
    grid.iter()
        .filter(|&(_, cell)| target.matches(cell))
        .map(|(index, _)| index)
        .collect()
}

/// Passes only on exact set equality with the correct set: nothing missed, nothing extra.
pub fn is_correct(grid: &Grid, target: &TargetCriterion, selection: &Selection) -> bool {
    review(grid, target, selection).is_correct()
}

/// Breakdown of a selection against the correct set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionReport {
    /// Correct cells left unselected.
    pub missed: CellCount,
    /// Selected cells that do not match, out-of-range indices included.
    pub extra: CellCount,
}

impl SelectionReport {
    pub const fn is_correct(self) -> bool {
        self.missed == 0 && self.extra == 0
    }
}

pub fn review(grid: &Grid, target: &TargetCriterion, selection: &Selection) -> SelectionReport {
    let mut report = SelectionReport::default();
    for (index, cell) in grid.iter() {
        if target.matches(cell) && !selection.contains(index) {
            report.missed += 1;
        }
    }
    for index in selection.iter() {
        if !grid.get(index).is_some_and(|cell| target.matches(cell)) {
            report.extra += 1;
        }
    }
    report
}
