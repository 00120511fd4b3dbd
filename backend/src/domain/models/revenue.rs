//! Revenue ledger entries and the shared size/payment enums.
use serde::{Deserialize, Serialize};

use super::Entity;

/// Vehicle size category, which selects the service price tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleSize {
    #[serde(rename = "Pequeno")]
    Small,
    #[serde(rename = "Médio")]
    Medium,
    #[serde(rename = "Grande")]
    Large,
}

impl VehicleSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleSize::Small => "Pequeno",
            VehicleSize::Medium => "Médio",
            VehicleSize::Large => "Grande",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pequeno" => Some(VehicleSize::Small),
            "Médio" => Some(VehicleSize::Medium),
            "Grande" => Some(VehicleSize::Large),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Dinheiro")]
    Cash,
    #[serde(rename = "Cartão")]
    Card,
    #[serde(rename = "Pix")]
    Pix,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Card => "Cartão",
            PaymentMethod::Pix => "Pix",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Dinheiro" => Some(PaymentMethod::Cash),
            "Cartão" => Some(PaymentMethod::Card),
            "Pix" => Some(PaymentMethod::Pix),
            _ => None,
        }
    }
}

/// A single billed wash.
///
/// Entered manually by the admin, or synthesized when an appointment is
/// confirmed. Synthesized entries default to `Medium`/`Cash` because the
/// originating appointment records neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueEntry {
    pub id: String,
    /// Service label, e.g. "Lavagem Completa".
    pub service_type: String,
    pub vehicle_size: VehicleSize,
    pub amount: f64,
    pub payment: PaymentMethod,
    /// RFC 3339 timestamp of when the entry was recorded.
    pub recorded_at: String,
}

impl Entity for RevenueEntry {
    fn id(&self) -> &str {
        &self.id
    }
}
