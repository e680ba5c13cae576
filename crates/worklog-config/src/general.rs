//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_show_recent() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Print the rows just written after each successful submission.
    #[serde(default = "default_show_recent")]
    pub show_recent: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_recent: default_show_recent(),
        }
    }
}
