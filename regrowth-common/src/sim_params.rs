use serde::{Deserialize, Serialize};

use crate::config::DrawMode;
use crate::label::CellLabel;

/// Radii of the concentric tissue rings, measured from the grid center.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueBands {
    pub bone: f64,
    pub muscle: f64,
    pub skin: f64,
}

impl TissueBands {
    /// Label of the ring containing distance `d`. Inner rings win on shared boundaries.
    #[inline(always)]
    pub fn classify(&self, d: f64) -> CellLabel {
        if d <= self.bone {
            CellLabel::Bone
        } else if d <= self.muscle {
            CellLabel::Muscle
        } else if d <= self.skin {
            CellLabel::Skin
        } else {
            CellLabel::Empty
        }
    }

    /// True for cells strictly beyond the skin ring, which must stay empty.
    #[inline(always)]
    pub fn is_outside(&self, d: f64) -> bool {
        d > self.skin
    }
}

/// Per-step transition probabilities.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionProbabilities {
    pub tissue_growth: f64,
    pub vessel_growth: f64,
    pub necrosis: f64,
    pub scar_formation: f64,
}

/// Simulation parameters derived from the configuration, used frequently during simulation steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    // Geometry
    pub grid_size: usize,
    pub num_cells: usize,
    /// Row and column of the grid center (integer half of the size).
    pub center: f64,
    pub bands: TissueBands,
    pub vessel_seed_probability: f64,

    // Injury wedge
    pub injury_step: u32,
    pub injury_half_angle: f64,
    pub injury_radius: f64,

    // Transitions
    pub probabilities: TransitionProbabilities,
    pub draw_mode: DrawMode,

    // Time
    pub total_steps: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_band_wins_on_boundary() {
        let bands = TissueBands { bone: 15.0, muscle: 38.0, skin: 42.0 };
        assert_eq!(bands.classify(0.0), CellLabel::Bone);
        assert_eq!(bands.classify(15.0), CellLabel::Bone);
        assert_eq!(bands.classify(15.01), CellLabel::Muscle);
        assert_eq!(bands.classify(38.0), CellLabel::Muscle);
        assert_eq!(bands.classify(42.0), CellLabel::Skin);
        assert_eq!(bands.classify(42.5), CellLabel::Empty);
        assert!(bands.is_outside(42.5));
        assert!(!bands.is_outside(42.0));
    }
}
