//! Neighbor offset tables for each connectivity mode

use crate::error::ContactPointsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Voxel offset `[dx, dy, dz]`
pub type Offset = [i64; 3];

/// Which voxels count as adjacent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Connectivity {
    /// Shared faces only
    #[default]
    Six,
    /// Faces and edges
    Eighteen,
    /// Faces, edges and corners
    TwentySix,
}

impl Connectivity {
    /// Numeric name of the mode (6, 18 or 26)
    pub fn value(self) -> i64 {
        match self {
            Connectivity::Six => 6,
            Connectivity::Eighteen => 18,
            Connectivity::TwentySix => 26,
        }
    }
}

impl TryFrom<i64> for Connectivity {
    type Error = ContactPointsError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(Connectivity::Six),
            18 => Ok(Connectivity::Eighteen),
            26 => Ok(Connectivity::TwentySix),
            other => Err(ContactPointsError::UnsupportedConnectivity(other)),
        }
    }
}

impl From<Connectivity> for i64 {
    fn from(connectivity: Connectivity) -> Self {
        connectivity.value()
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// Each table holds exactly the neighbors that come later in X-fastest linear
// order, i.e. half of the full neighborhood. Visiting these from every voxel
// touches each adjacent pair once.
const FORWARD_6: [Offset; 3] = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

const FORWARD_18: [Offset; 9] = [
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    // edges within the current slice
    [-1, 1, 0],
    [1, 1, 0],
    // edges into the next slice
    [0, -1, 1],
    [0, 1, 1],
    [-1, 0, 1],
    [1, 0, 1],
];

const FORWARD_26: [Offset; 13] = [
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    [-1, 1, 0],
    [1, 1, 0],
    [0, -1, 1],
    [0, 1, 1],
    [-1, 0, 1],
    [1, 0, 1],
    // corners
    [-1, -1, 1],
    [1, -1, 1],
    [-1, 1, 1],
    [1, 1, 1],
];

/// Forward neighbor offsets for a connectivity mode
pub fn forward_offsets(connectivity: Connectivity) -> &'static [Offset] {
    match connectivity {
        Connectivity::Six => &FORWARD_6,
        Connectivity::Eighteen => &FORWARD_18,
        Connectivity::TwentySix => &FORWARD_26,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_forward(offset: &Offset) -> bool {
        let [dx, dy, dz] = *offset;
        dz > 0 || (dz == 0 && dy > 0) || (dz == 0 && dy == 0 && dx > 0)
    }

    #[test]
    fn test_try_from_recognized_values() {
        assert_eq!(Connectivity::try_from(6).unwrap(), Connectivity::Six);
        assert_eq!(Connectivity::try_from(18).unwrap(), Connectivity::Eighteen);
        assert_eq!(Connectivity::try_from(26).unwrap(), Connectivity::TwentySix);
    }

    #[test]
    fn test_try_from_rejects_other_values() {
        for value in [0, 4, 7, 8, -6, 27] {
            assert!(matches!(
                Connectivity::try_from(value),
                Err(ContactPointsError::UnsupportedConnectivity(v)) if v == value
            ));
        }
    }

    #[test]
    fn test_tables_are_half_neighborhoods() {
        for connectivity in [
            Connectivity::Six,
            Connectivity::Eighteen,
            Connectivity::TwentySix,
        ] {
            let offsets = forward_offsets(connectivity);
            assert_eq!(offsets.len() as i64 * 2, connectivity.value());

            let unique: HashSet<_> = offsets.iter().collect();
            assert_eq!(unique.len(), offsets.len());

            for offset in offsets {
                assert!(is_forward(offset), "{:?} is not forward", offset);
                let nonzero = offset.iter().filter(|&&d| d != 0).count();
                let max_nonzero = match connectivity {
                    Connectivity::Six => 1,
                    Connectivity::Eighteen => 2,
                    Connectivity::TwentySix => 3,
                };
                assert!(nonzero >= 1 && nonzero <= max_nonzero);
            }
        }
    }

    #[test]
    fn test_serde_uses_numeric_form() {
        let json = serde_json::to_string(&Connectivity::Eighteen).unwrap();
        assert_eq!(json, "18");
        let parsed: Connectivity = serde_json::from_str("26").unwrap();
        assert_eq!(parsed, Connectivity::TwentySix);
        assert!(serde_json::from_str::<Connectivity>("7").is_err());
    }
}
