use serde::{Deserialize, Serialize};

use crate::label::CellLabel;

/// Number of cells holding each label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub empty: u32,
    pub bone: u32,
    pub muscle: u32,
    pub skin: u32,
    pub vessel: u32,
    pub necrosis: u32,
    pub scar: u32,
}

impl LabelCounts {
    /// Tallies a slice of labels.
    pub fn tally<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a CellLabel>,
    {
        let mut counts = LabelCounts::default();
        for &label in labels {
            *counts.slot_mut(label) += 1;
        }
        counts
    }

    pub fn get(&self, label: CellLabel) -> u32 {
        match label {
            CellLabel::Empty => self.empty,
            CellLabel::Bone => self.bone,
            CellLabel::Muscle => self.muscle,
            CellLabel::Skin => self.skin,
            CellLabel::Vessel => self.vessel,
            CellLabel::Necrosis => self.necrosis,
            CellLabel::Scar => self.scar,
        }
    }

    pub fn total(&self) -> u32 {
        CellLabel::ALL.iter().map(|&l| self.get(l)).sum()
    }

    fn slot_mut(&mut self, label: CellLabel) -> &mut u32 {
        match label {
            CellLabel::Empty => &mut self.empty,
            CellLabel::Bone => &mut self.bone,
            CellLabel::Muscle => &mut self.muscle,
            CellLabel::Skin => &mut self.skin,
            CellLabel::Vessel => &mut self.vessel,
            CellLabel::Necrosis => &mut self.necrosis,
            CellLabel::Scar => &mut self.scar,
        }
    }
}

/// Summary statistics of the automaton after a given step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepStats {
    /// Number of steps applied when the snapshot was taken.
    pub step: u32,
    /// Whether the amputation has happened yet.
    pub injured: bool,
    /// Cells inside the injury mask.
    pub injured_cell_count: u32,
    pub counts: LabelCounts,
}
