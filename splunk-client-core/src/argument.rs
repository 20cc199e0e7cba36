//! Name/value pairs sent as request parameters

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// A single request parameter.
///
/// Equality and hashing cover both the name and the value, so the same name
/// may appear more than once in an [`ArgumentSet`](crate::ArgumentSet) with
/// different values (Splunk accepts repeated parameters such as `search`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: String,
}

impl Argument {
    /// Create a new argument, rendering `value` to its string form
    pub fn new<N: Into<String>, V: ToString>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }

    /// Create a new argument, rejecting an empty name
    pub fn try_new<N: Into<String>, V: ToString>(name: N, value: V) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("name", "Argument name cannot be empty"));
        }
        Ok(Self::new(name, value))
    }

    /// Copy of this argument with `prefix` prepended to its name
    pub fn prefixed(&self, prefix: &str) -> Self {
        Self {
            name: format!("{}{}", prefix, self.name),
            value: self.value.clone(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl<N: Into<String>, V: ToString> From<(N, V)> for Argument {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}
