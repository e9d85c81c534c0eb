use super::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated quantum-number triple `(n, l, m)` identifying one hydrogen-like
/// eigenstate. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateSpec {
    n: u32,
    l: u32,
    m: i32,
}

impl StateSpec {
    /// Invariants: `n >= 1`, `0 <= l < n`, `-l <= m <= l`.
    pub fn new(n: u32, l: u32, m: i32) -> Result<Self, ModelError> {
        if n < 1 {
            return Err(ModelError::PrincipalOutOfRange { n });
        }
        if l >= n {
            return Err(ModelError::AzimuthalOutOfRange { n, l });
        }
        if m.unsigned_abs() > l {
            return Err(ModelError::MagneticOutOfRange { l, m });
        }
        Ok(Self { n, l, m })
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn l(&self) -> u32 {
        self.l
    }

    pub fn m(&self) -> i32 {
        self.m
    }
}

impl fmt::Display for StateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(n={}, l={}, m={})", self.n, self.l, self.m)
    }
}
