//! Statistics stage configuration.

use serde::{Deserialize, Serialize};

use crate::exposure::ExtremaSeed;

/// Statistics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Seeding policy for `maximum` and `minimum`.
    #[serde(default)]
    pub extrema_seed: ExtremaSeed,
}
