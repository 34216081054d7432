//! Simulation flavors and the legacy flavor-matching rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorkspaceError;

/// The blockchain protocol a workspace simulates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Ethereum,
    Corda,
}

impl Flavor {
    /// Every supported flavor, in the order defaults are synthesized.
    pub const ALL: [Flavor; 2] = [Flavor::Ethereum, Flavor::Corda];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Corda => "corda",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = WorkspaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethereum" => Ok(Self::Ethereum),
            "corda" => Ok(Self::Corda),
            other => Err(WorkspaceError::InvalidFlavor(other.to_string())),
        }
    }
}

/// Whether a stored flavor satisfies a requested one.
///
/// Workspaces persisted before flavors existed carry no flavor at all; those
/// are Ethereum workspaces, so an absent stored flavor matches a request for
/// `Ethereum` and nothing else. No other coercion applies.
pub fn is_flavor(stored: Option<Flavor>, requested: Flavor) -> bool {
    match stored {
        Some(flavor) => flavor == requested,
        None => requested == Flavor::Ethereum,
    }
}
