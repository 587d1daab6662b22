use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 20;
pub const DEFAULT_LIMIT: u32 = 10;

/// Number of entries kept per movers category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Limit(u32);

impl Limit {
    pub const fn new(value: u32) -> Result<Self, ValidationError> {
        if value < MIN_LIMIT || value > MAX_LIMIT {
            return Err(ValidationError::limit_out_of_range(value));
        }
        Ok(Self(value))
    }

    /// Applies the default when the caller did not supply a limit.
    pub fn resolve(value: Option<u32>) -> Result<Self, ValidationError> {
        value.map_or(Ok(Self::default()), Self::new)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl Display for Limit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Limit {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Limit> for u32 {
    fn from(value: Limit) -> Self {
        value.0
    }
}
