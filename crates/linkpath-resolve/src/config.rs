use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning for a [`PathResolver`](crate::PathResolver).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum concurrently running branches per array or link fan-out.
    pub max_fan_out: usize,
    /// Per-fetch timeout applied by the object client, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_fan_out: 8,
            fetch_timeout_secs: 30,
        }
    }
}

impl ResolverConfig {
    /// Strictly sequential fan-out.
    pub fn sequential() -> Self {
        Self {
            max_fan_out: 1,
            ..Default::default()
        }
    }

    /// Effective fan-out limit; never below one.
    pub fn fan_out_limit(&self) -> usize {
        self.max_fan_out.max(1)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
