//! Per-triplet failure flags
use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Stage whose failure flag a check raises. The user model is the
/// reference copy and has no flag of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    Proposed,
    Baseline,
}

impl Flag {
    pub fn stage(&self) -> Stage {
        match self {
            Flag::Proposed => Stage::Proposed,
            Flag::Baseline => Stage::Baseline,
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Flag::Proposed => write!(f, "proposed"),
            Flag::Baseline => write!(f, "baseline"),
        }
    }
}

/// Two OR-accumulated booleans. Flags can be raised and merged, never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureFlags {
    proposed_err: bool,
    baseline_err: bool,
}

impl FailureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, flag: Flag) {
        match flag {
            Flag::Proposed => self.proposed_err = true,
            Flag::Baseline => self.baseline_err = true,
        }
    }

    pub fn is_raised(&self, flag: Flag) -> bool {
        match flag {
            Flag::Proposed => self.proposed_err,
            Flag::Baseline => self.baseline_err,
        }
    }

    pub fn proposed_err(&self) -> bool {
        self.proposed_err
    }

    pub fn baseline_err(&self) -> bool {
        self.baseline_err
    }

    pub fn any(&self) -> bool {
        self.proposed_err || self.baseline_err
    }
}

impl BitOr for FailureFlags {
    type Output = FailureFlags;

    fn bitor(self, rhs: FailureFlags) -> FailureFlags {
        FailureFlags {
            proposed_err: self.proposed_err || rhs.proposed_err,
            baseline_err: self.baseline_err || rhs.baseline_err,
        }
    }
}

impl BitOrAssign for FailureFlags {
    fn bitor_assign(&mut self, rhs: FailureFlags) {
        *self = *self | rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_start_clear() {
        let flags = FailureFlags::new();
        assert!(!flags.proposed_err());
        assert!(!flags.baseline_err());
        assert!(!flags.any());
    }

    #[test]
    fn test_merge_never_clears() {
        let mut flags = FailureFlags::new();
        flags.raise(Flag::Baseline);
        flags |= FailureFlags::new();
        assert!(flags.baseline_err());
        assert!(!flags.proposed_err());

        let mut other = FailureFlags::new();
        other.raise(Flag::Proposed);
        flags |= other;
        assert!(flags.baseline_err() && flags.proposed_err());
    }

    #[test]
    fn test_merge_is_commutative() {
        let mut a = FailureFlags::new();
        a.raise(Flag::Proposed);
        let mut b = FailureFlags::new();
        b.raise(Flag::Baseline);
        assert_eq!(a | b, b | a);
    }
}
