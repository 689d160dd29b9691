//! Mission briefing table.

use serde::{Deserialize, Serialize};

/// One briefing entry shown between waves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub title: String,
    pub text: String,
}

impl Mission {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

const DEFAULT_MISSIONS: [(&str, &str); 6] = [
    (
        "Desert Patrol",
        "Quiet sector. Intercept isolated scout fighters.",
    ),
    (
        "Asteroid Field",
        "Careful, pilot. Hazardous navigation ahead. Avoid impacts.",
    ),
    (
        "Elite Squadrons",
        "Interceptors detected. They are fast. Stay sharp.",
    ),
    (
        "Imperial Blockade",
        "Bombers inbound. Protect the fleet.",
    ),
    (
        "Defender Prototype",
        "Alert! New elite fighters detected. Extreme firepower.",
    ),
    (
        "The Destroyer",
        "Capital ship in sight! Aim for the central shield generator!",
    ),
];

/// The built-in six-entry mission table.
pub fn default_missions() -> Vec<Mission> {
    DEFAULT_MISSIONS
        .iter()
        .map(|(title, text)| Mission::new(*title, *text))
        .collect()
}

/// Briefing for `wave`, indexed `wave % table.len()`. `None` for an empty table.
pub fn briefing_for(table: &[Mission], wave: u32) -> Option<&Mission> {
    if table.is_empty() {
        return None;
    }
    table.get(wave as usize % table.len())
}
