//! Establishment profile singleton.
use serde::{Deserialize, Serialize};

/// The single establishment record shown on the client landing screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstablishmentInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub instagram: String,
    pub logo_url: Option<String>,
    /// Map deeplink for navigation.
    pub waze_url: Option<String>,
}

impl Default for EstablishmentInfo {
    fn default() -> Self {
        Self {
            name: "Lava Jato Pro".into(),
            address: "Rua Exemplo, 123 - Centro".into(),
            phone: "5531999999999".into(),
            instagram: "@lavajato".into(),
            logo_url: None,
            waze_url: None,
        }
    }
}
