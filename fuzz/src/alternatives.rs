//! Alternatives whose copies and moves fail on demand.

use std::fmt;

use arbitrary::Arbitrary;
use compact_variant::{
    Alternative,
    CopyAlternative,
    LifetimeError,
};

#[derive(Debug)]
pub struct Poisoned(&'static str);

impl fmt::Display for Poisoned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poisoned {}", self.0)
    }
}

impl std::error::Error for Poisoned {}

/// Copying fails when poisoned, moving never does. Copies are staged.
#[derive(Arbitrary, Debug, Clone, PartialEq, Eq)]
pub struct Fragile {
    pub id: u16,
    pub poisoned: bool,
}

impl Alternative for Fragile {}

impl CopyAlternative for Fragile {
    const COPY_MAY_FAIL: bool = true;

    fn try_copy(&self) -> Result<Self, LifetimeError> {
        if self.poisoned {
            return Err(LifetimeError::new(Poisoned("copy")));
        }
        Ok(Fragile {
            id: self.id,
            poisoned: false,
        })
    }
}

/// Copying and moving both fail when poisoned. Copies are direct.
#[derive(Arbitrary, Debug, Clone, PartialEq, Eq)]
pub struct Volatile {
    pub id: u16,
    pub poisoned: bool,
}

impl Alternative for Volatile {
    const MOVE_MAY_FAIL: bool = true;

    fn try_relocate(self) -> Result<Self, LifetimeError> {
        if self.poisoned {
            return Err(LifetimeError::new(Poisoned("relocation")));
        }
        Ok(self)
    }

    fn try_move_assign(&mut self, source: Self) -> Result<(), LifetimeError> {
        if source.poisoned {
            return Err(LifetimeError::new(Poisoned("move")));
        }
        *self = source;
        Ok(())
    }
}

impl CopyAlternative for Volatile {
    const COPY_MAY_FAIL: bool = true;

    fn try_copy(&self) -> Result<Self, LifetimeError> {
        if self.poisoned {
            return Err(LifetimeError::new(Poisoned("copy")));
        }
        Ok(Volatile {
            id: self.id,
            poisoned: false,
        })
    }
}
