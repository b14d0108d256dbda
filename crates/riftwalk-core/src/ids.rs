use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct FootId(pub u8);
impl fmt::Display for FootId { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "FootId({})", self.0) } }

/// Which side of the body a foot hangs from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side { Left, Right }

impl Side {
    /// Sign applied to the body's right vector for the lateral offset.
    #[inline] pub fn sign(self) -> f32 { match self { Side::Left => -1.0, Side::Right => 1.0 } }
}
