//! Service catalog items with per-size price tiers.
use serde::{Deserialize, Serialize};

use super::revenue::VehicleSize;
use super::Entity;

/// A wash offered by the establishment.
///
/// `price` is the small-tier price by convention; the medium and large tiers
/// fall back to it when unset. `old_price` is the optional pre-discount value
/// shown struck through in promotions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    pub label: String,
    pub description: String,
    pub price: f64,
    pub price_medium: Option<f64>,
    pub price_large: Option<f64>,
    pub old_price: Option<f64>,
}

impl ServiceItem {
    /// Resolve the price tier for a vehicle size, defaulting to the base price.
    pub fn price_for(&self, size: VehicleSize) -> f64 {
        match size {
            VehicleSize::Small => self.price,
            VehicleSize::Medium => self.price_medium.unwrap_or(self.price),
            VehicleSize::Large => self.price_large.unwrap_or(self.price),
        }
    }
}

impl Entity for ServiceItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The catalog seeded on first run, matching the production defaults.
pub fn default_catalog() -> Vec<ServiceItem> {
    vec![
        ServiceItem {
            id: "simples".into(),
            label: "Lavagem Simples".into(),
            description: "Ducha + Secagem".into(),
            price: 30.0,
            price_medium: Some(40.0),
            price_large: Some(50.0),
            old_price: Some(40.0),
        },
        ServiceItem {
            id: "completa".into(),
            label: "Lavagem Completa".into(),
            description: "Int. + Ext. + Cera".into(),
            price: 60.0,
            price_medium: Some(70.0),
            price_large: Some(80.0),
            old_price: Some(70.0),
        },
        ServiceItem {
            id: "higienizacao".into(),
            label: "Higienização".into(),
            description: "Bancos + Teto".into(),
            price: 250.0,
            price_medium: Some(270.0),
            price_large: Some(300.0),
            old_price: Some(300.0),
        },
        ServiceItem {
            id: "polimento".into(),
            label: "Polimento Técnico".into(),
            description: "Revitalização".into(),
            price: 350.0,
            price_medium: Some(380.0),
            price_large: Some(420.0),
            old_price: Some(400.0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_prices_resolve_by_size() {
        let item = &default_catalog()[0];
        assert_eq!(item.price_for(VehicleSize::Small), 30.0);
        assert_eq!(item.price_for(VehicleSize::Medium), 40.0);
        assert_eq!(item.price_for(VehicleSize::Large), 50.0);
    }

    #[test]
    fn missing_tiers_fall_back_to_base_price() {
        let item = ServiceItem {
            id: "enceramento".into(),
            label: "Enceramento".into(),
            description: String::new(),
            price: 90.0,
            price_medium: None,
            price_large: None,
            old_price: None,
        };
        assert_eq!(item.price_for(VehicleSize::Medium), 90.0);
        assert_eq!(item.price_for(VehicleSize::Large), 90.0);
    }
}
