use regrowth_common::{CellLabel, SimParams};

use crate::grid::{neighbor_indices, DistanceField, InjuryMask, LabelGrid};

/// Holds the automaton state and the per-step scratch fields.
#[derive(Debug)]
pub struct TissueState {
    pub params: SimParams,

    // --- Ping-Pong Buffers ---
    /// Grid read by every rule of the current step.
    pub grid_in: LabelGrid,
    /// Grid written by the current step. Swapped in once the step completes.
    pub grid_out: LabelGrid,

    // --- Static Geometry ---
    pub distances: DistanceField,
    pub injury_mask: InjuryMask,

    // --- Neighborhood Fields (recomputed from grid_in each step) ---
    pub has_living_neighbor: Vec<bool>,
    pub near_vessel: Vec<bool>,

    // --- Random Fields (one uniform value per cell, redrawn each step) ---
    pub growth_dice: Vec<f64>,
    /// Only filled when vessel sprouting draws independently of regrowth.
    pub vessel_dice: Vec<f64>,
    pub necrosis_dice: Vec<f64>,
    pub scar_dice: Vec<f64>,
}

impl TissueState {
    /// Allocates scratch fields around an initial grid and mask.
    pub fn new(params: SimParams, grid: LabelGrid, distances: DistanceField, injury_mask: InjuryMask) -> Self {
        let num_cells = params.num_cells;

        Self {
            params,
            grid_out: grid.clone(),
            grid_in: grid,
            distances,
            injury_mask,
            has_living_neighbor: vec![false; num_cells],
            near_vessel: vec![false; num_cells],
            growth_dice: vec![0.0; num_cells],
            vessel_dice: vec![0.0; num_cells],
            necrosis_dice: vec![0.0; num_cells],
            scar_dice: vec![0.0; num_cells],
        }
    }

    /// Recomputes `has_living_neighbor` and `near_vessel` from `grid_in`.
    pub fn update_neighborhood(&mut self) {
        let size = self.params.grid_size;
        let cells = self.grid_in.as_slice();

        for idx in 0..self.params.num_cells {
            let mut living = false;
            let mut vessel = false;
            for n in neighbor_indices(idx, size) {
                let label = cells[n];
                living |= label.is_occupied();
                vessel |= label == CellLabel::Vessel;
            }
            self.has_living_neighbor[idx] = living;
            self.near_vessel[idx] = vessel;
        }
    }

    /// Swaps the input and output grids.
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.grid_in, &mut self.grid_out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regrowth_common::SimulationConfig;

    fn small_state(grid: LabelGrid) -> TissueState {
        let mut config = SimulationConfig::default();
        config.grid.size = grid.size();
        let params = config.get_sim_params();
        let distances = DistanceField::from_center(params.grid_size, params.center);
        let mask = InjuryMask::new(params.grid_size);
        TissueState::new(params, grid, distances, mask)
    }

    #[test]
    fn neighborhood_flags_wrap_around() {
        let mut grid = LabelGrid::filled(4, CellLabel::Empty);
        grid.set(3, 1, CellLabel::Vessel);
        let mut state = small_state(grid);
        state.update_neighborhood();

        // (0, 1) sees the vessel at (3, 1) through the top edge.
        assert!(state.near_vessel[1]);
        assert!(state.has_living_neighbor[1]);
        // (2, 1) is directly above it.
        assert!(state.near_vessel[2 * 4 + 1]);
        // (3, 1) itself has no vessel neighbor.
        assert!(!state.near_vessel[3 * 4 + 1]);
        // (1, 3) is not adjacent.
        assert!(!state.has_living_neighbor[4 + 3]);
    }

    #[test]
    fn scar_counts_as_living_neighbor() {
        let mut grid = LabelGrid::filled(3, CellLabel::Empty);
        grid.set(1, 1, CellLabel::Scar);
        let mut state = small_state(grid);
        state.update_neighborhood();
        assert!(state.has_living_neighbor[1]);
        assert!(!state.near_vessel[1]);
    }

    #[test]
    fn swap_exchanges_grids() {
        let mut state = small_state(LabelGrid::filled(2, CellLabel::Bone));
        state.grid_out = LabelGrid::filled(2, CellLabel::Skin);
        state.swap_buffers();
        assert_eq!(state.grid_in.get(0, 0), CellLabel::Skin);
        assert_eq!(state.grid_out.get(0, 0), CellLabel::Bone);
    }
}
