//! Initial limb cross-section and the amputation wedge.

use rand::Rng;
use regrowth_common::{vec_to_angle, CellLabel, SimParams, Vec2};

use crate::grid::{cell_coords, DistanceField, LabelGrid};

/// Labels every cell by the ring its distance falls into. Deterministic.
pub fn layered_tissue(params: &SimParams, distances: &DistanceField) -> LabelGrid {
    LabelGrid::from_fn(params.grid_size, |idx| params.bands.classify(distances.get(idx)))
}

/// Turns each muscle cell into a vessel with probability `probability`.
///
/// One uniform value is drawn for every cell in row-major order, muscle or not,
/// so the number of draws depends only on the grid size.
/// Returns the number of vessels seeded.
pub fn seed_vessels<R: Rng>(grid: &mut LabelGrid, probability: f64, rng: &mut R) -> u32 {
    let mut seeded = 0;
    for label in grid.as_mut_slice() {
        let roll: f64 = rng.random();
        if *label == CellLabel::Muscle && roll < probability {
            *label = CellLabel::Vessel;
            seeded += 1;
        }
    }
    seeded
}

/// Flat indices of the cells removed by the amputation: those whose angle from the
/// center is within `injury_half_angle` of the +x axis and that lie closer than
/// `injury_radius`.
pub fn injury_wedge(params: &SimParams, distances: &DistanceField) -> Vec<usize> {
    let center = Vec2::new(params.center, params.center);
    (0..params.num_cells)
        .filter(|&idx| {
            let (row, col) = cell_coords(idx, params.grid_size);
            let angle = vec_to_angle(Vec2::from_cell(row, col) - center);
            angle.abs() < params.injury_half_angle && distances.get(idx) < params.injury_radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regrowth_common::SimulationConfig;

    fn default_params() -> SimParams {
        SimulationConfig::default().get_sim_params()
    }

    #[test]
    fn rings_follow_band_boundaries() {
        let params = default_params();
        let distances = DistanceField::from_center(params.grid_size, params.center);
        let grid = layered_tissue(&params, &distances);

        // Samples along the row through the center (row 50), distance = |col - 50|.
        let expectations = [
            (50, CellLabel::Bone),   // d = 0
            (65, CellLabel::Bone),   // d = 15, bone boundary
            (66, CellLabel::Muscle), // d = 16
            (88, CellLabel::Muscle), // d = 38, muscle boundary
            (89, CellLabel::Skin),   // d = 39
            (92, CellLabel::Skin),   // d = 42, skin boundary
            (93, CellLabel::Empty),  // d = 43
            (8, CellLabel::Skin),    // d = 42 on the other side
            (7, CellLabel::Empty),   // d = 43
            (0, CellLabel::Empty),
        ];
        for (col, expected) in expectations {
            assert_eq!(grid.get(50, col), expected, "col {}", col);
        }

        // Off-axis sample: (row 20, col 30) has d = sqrt(900 + 400) ~ 36.06.
        assert_eq!(grid.get(20, 30), CellLabel::Muscle);
        // Corner is far outside the limb.
        assert_eq!(grid.get(0, 0), CellLabel::Empty);
    }

    #[test]
    fn seeding_only_touches_muscle() {
        let params = default_params();
        let distances = DistanceField::from_center(params.grid_size, params.center);
        let layered = layered_tissue(&params, &distances);
        let mut seeded = layered.clone();
        let mut rng = StdRng::seed_from_u64(7);
        let count = seed_vessels(&mut seeded, 0.08, &mut rng);

        assert!(count > 0);
        assert_eq!(seeded.count(CellLabel::Vessel), count);
        for (before, after) in layered.as_slice().iter().zip(seeded.as_slice()) {
            if before != after {
                assert_eq!(*before, CellLabel::Muscle);
                assert_eq!(*after, CellLabel::Vessel);
            }
        }
    }

    #[test]
    fn seeding_extremes() {
        let params = default_params();
        let distances = DistanceField::from_center(params.grid_size, params.center);
        let layered = layered_tissue(&params, &distances);
        let mut rng = StdRng::seed_from_u64(1);

        let mut none = layered.clone();
        assert_eq!(seed_vessels(&mut none, 0.0, &mut rng), 0);
        assert_eq!(none, layered);

        let mut all = layered.clone();
        let muscle = layered.count(CellLabel::Muscle);
        assert_eq!(seed_vessels(&mut all, 1.0, &mut rng), muscle);
        assert_eq!(all.count(CellLabel::Muscle), 0);
    }

    #[test]
    fn wedge_points_along_positive_columns() {
        let params = default_params();
        let distances = DistanceField::from_center(params.grid_size, params.center);
        let wedge = injury_wedge(&params, &distances);
        let size = params.grid_size;

        // On the center row, to the right of center and within radius 50.
        assert!(wedge.contains(&(50 * size + 60)));
        assert!(wedge.contains(&(50 * size + 99)));
        // The center itself has angle 0 and distance 0.
        assert!(wedge.contains(&(50 * size + 50)));
        // Left of center is opposite the wedge.
        assert!(!wedge.contains(&(50 * size + 40)));
        // Straight down the column is at angle pi/2.
        assert!(!wedge.contains(&(80 * size + 50)));
        for &idx in &wedge {
            assert!(distances.get(idx) < params.injury_radius);
        }
    }
}
