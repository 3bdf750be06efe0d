use serde::{Deserialize, Serialize};

/// The state held by a single grid cell.
///
/// Discriminants are the numeric codes exposed to renderers (0-6).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CellLabel {
    #[default]
    Empty = 0,
    Bone = 1,
    Muscle = 2,
    Skin = 3,
    Vessel = 4,
    Necrosis = 5,
    Scar = 6,
}

impl CellLabel {
    /// All labels in code order.
    pub const ALL: [CellLabel; 7] = [
        CellLabel::Empty,
        CellLabel::Bone,
        CellLabel::Muscle,
        CellLabel::Skin,
        CellLabel::Vessel,
        CellLabel::Necrosis,
        CellLabel::Scar,
    ];

    /// Numeric code of the label (0-6).
    #[inline(always)]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`CellLabel::code`]. Returns `None` for codes above 6.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Anything that is not `Empty` counts as a living neighbor for regrowth.
    #[inline(always)]
    pub fn is_occupied(self) -> bool {
        self != CellLabel::Empty
    }

    pub fn name(self) -> &'static str {
        match self {
            CellLabel::Empty => "Empty",
            CellLabel::Bone => "Bone",
            CellLabel::Muscle => "Muscle",
            CellLabel::Skin => "Skin",
            CellLabel::Vessel => "Vessel",
            CellLabel::Necrosis => "Necrosis",
            CellLabel::Scar => "Scar",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_positions_in_all() {
        for (i, label) in CellLabel::ALL.iter().enumerate() {
            assert_eq!(label.code() as usize, i);
            assert_eq!(CellLabel::from_code(i as u8), Some(*label));
        }
        assert_eq!(CellLabel::from_code(7), None);
    }

    #[test]
    fn only_empty_is_unoccupied() {
        assert!(!CellLabel::Empty.is_occupied());
        assert!(CellLabel::Necrosis.is_occupied());
        assert!(CellLabel::Scar.is_occupied());
    }
}
