use serde::{Deserialize, Serialize};

use super::number;

/// State value the exchange reports when it is operating normally.
pub const STATE_OPERATIONAL: i64 = 1;

/// Response of the exchange's `info/` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    #[serde(default, deserialize_with = "number::text_lenient")]
    pub version: String,

    /// 1 = operational, 2 = error
    pub state: i64,

    #[serde(default)]
    pub maintenance_mode: bool,
}

impl ServerStatus {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state == STATE_OPERATIONAL && !self.maintenance_mode
    }

    /// One-line description suitable for the console.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.maintenance_mode {
            "Server in maintenance mode".to_string()
        } else if self.state == STATE_OPERATIONAL {
            format!("Server operational, version {}", self.version)
        } else {
            format!("Server reports error state {}", self.state)
        }
    }
}
