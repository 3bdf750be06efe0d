use regrowth_common::{CellLabel, Vec2};

/// Row and column of a flat row-major index.
#[inline(always)]
pub fn cell_coords(idx: usize, size: usize) -> (usize, usize) {
    (idx / size, idx % size)
}

/// Flat indices of the 4-connected neighbors of `idx`, in the order up, down, left, right.
/// Edges wrap to the opposite side, so row 0's "up" neighbor lives on the last row.
#[inline(always)]
pub fn neighbor_indices(idx: usize, size: usize) -> [usize; 4] {
    let (row, col) = cell_coords(idx, size);
    let up = if row == 0 { size - 1 } else { row - 1 };
    let down = if row + 1 == size { 0 } else { row + 1 };
    let left = if col == 0 { size - 1 } else { col - 1 };
    let right = if col + 1 == size { 0 } else { col + 1 };
    [
        up * size + col,
        down * size + col,
        row * size + left,
        row * size + right,
    ]
}

/// Square row-major matrix of cell labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    size: usize,
    cells: Vec<CellLabel>,
}

impl LabelGrid {
    /// A grid of the given size with every cell set to `label`.
    pub fn filled(size: usize, label: CellLabel) -> Self {
        Self { size, cells: vec![label; size * size] }
    }

    /// Builds a grid by evaluating `f` at every flat index.
    pub fn from_fn<F>(size: usize, f: F) -> Self
    where
        F: FnMut(usize) -> CellLabel,
    {
        Self { size, cells: (0..size * size).map(f).collect() }
    }

    /// Builds a grid from row-major labels. Returns `None` if the length is not `size * size`.
    pub fn from_cells(size: usize, cells: Vec<CellLabel>) -> Option<Self> {
        (cells.len() == size * size).then_some(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    pub fn get(&self, row: usize, col: usize) -> CellLabel {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, label: CellLabel) {
        let idx = self.index(row, col);
        self.cells[idx] = label;
    }

    pub fn as_slice(&self) -> &[CellLabel] {
        &self.cells
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [CellLabel] {
        &mut self.cells
    }

    /// Numeric label codes (0-6), row-major, for renderers that want plain values.
    pub fn codes(&self) -> Vec<u8> {
        self.cells.iter().map(|l| l.code()).collect()
    }

    /// Iterator over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[CellLabel]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn count(&self, label: CellLabel) -> u32 {
        self.cells.iter().filter(|&&l| l == label).count() as u32
    }
}

/// Euclidean distance of every cell to the grid center. Read-only once built.
#[derive(Debug, Clone)]
pub struct DistanceField {
    size: usize,
    values: Vec<f64>,
}

impl DistanceField {
    pub fn from_center(size: usize, center: f64) -> Self {
        let origin = Vec2::new(center, center);
        let values = (0..size * size)
            .map(|idx| {
                let (row, col) = cell_coords(idx, size);
                Vec2::from_cell(row, col).distance(origin)
            })
            .collect();
        Self { size, values }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn get(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Cells eligible for regrowth and necrosis. Bits can be set but never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjuryMask {
    size: usize,
    bits: Vec<bool>,
}

impl InjuryMask {
    pub fn new(size: usize) -> Self {
        Self { size, bits: vec![false; size * size] }
    }

    /// Mask covering every cell.
    pub fn full(size: usize) -> Self {
        Self { size, bits: vec![true; size * size] }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn is_set(&self, idx: usize) -> bool {
        self.bits[idx]
    }

    /// Marks a cell as injured. Returns true if it was not marked before.
    pub fn mark(&mut self, idx: usize) -> bool {
        !std::mem::replace(&mut self.bits[idx], true)
    }

    pub fn count(&self) -> u32 {
        self.bits.iter().filter(|&&b| b).count() as u32
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_wrap_at_edges() {
        let size = 5;
        // Top-left corner
        assert_eq!(neighbor_indices(0, size), [20, 5, 4, 1]);
        // Bottom-right corner
        assert_eq!(neighbor_indices(24, size), [19, 4, 23, 20]);
        // Interior
        assert_eq!(neighbor_indices(12, size), [7, 17, 11, 13]);
    }

    #[test]
    fn single_cell_grid_is_its_own_neighbor() {
        assert_eq!(neighbor_indices(0, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn from_cells_checks_length() {
        assert!(LabelGrid::from_cells(3, vec![CellLabel::Bone; 9]).is_some());
        assert!(LabelGrid::from_cells(3, vec![CellLabel::Bone; 8]).is_none());
    }

    #[test]
    fn grid_codes_and_rows() {
        let mut grid = LabelGrid::filled(3, CellLabel::Empty);
        grid.set(1, 2, CellLabel::Scar);
        assert_eq!(grid.get(1, 2), CellLabel::Scar);
        assert_eq!(grid.codes()[5], 6);
        assert_eq!(grid.rows().count(), 3);
        assert_eq!(grid.rows().nth(1).unwrap()[2], CellLabel::Scar);
        assert_eq!(grid.count(CellLabel::Scar), 1);
    }

    #[test]
    fn distance_field_is_centered() {
        let field = DistanceField::from_center(11, 5.0);
        assert_eq!(field.at(5, 5), 0.0);
        assert_eq!(field.at(5, 8), 3.0);
        assert_eq!(field.at(1, 2), 5.0);
    }

    #[test]
    fn mask_marks_once() {
        let mut mask = InjuryMask::new(4);
        assert!(mask.mark(3));
        assert!(!mask.mark(3));
        assert!(mask.is_set(3));
        assert_eq!(mask.count(), 1);
        assert_eq!(InjuryMask::full(4).count(), 16);
    }
}
