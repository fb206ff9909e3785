//! Habitability thresholds and attribute assumptions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mandatory thresholds a unit must meet to become a validated property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationCriteria {
    /// Minimum floor area in m²
    #[serde(with = "rust_decimal::serde::float")]
    pub min_floor_area: Decimal,

    /// Minimum floor level
    pub min_floor: i32,

    /// Maximum walk to the nearest station in minutes
    pub max_station_minutes: f64,

    /// Required canonical building material
    pub required_material: String,

    /// Required canonical gas type
    pub required_gas_type: String,
}

impl Default for ValidationCriteria {
    fn default() -> Self {
        Self {
            min_floor_area: Decimal::from(65),
            min_floor: 2,
            max_station_minutes: 10.0,
            required_material: "reinforced_concrete".to_string(),
            required_gas_type: "city_gas".to_string(),
        }
    }
}

/// Values used when the markup carries no material or gas signal.
///
/// The default search query already filters on reinforced concrete and city
/// gas, so results pages rarely repeat them. A `None` here means the unit is
/// rejected for the missing field instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumedAttributes {
    pub building_material: Option<String>,
    pub gas_type: Option<String>,
}

impl AssumedAttributes {
    /// No assumptions: material and gas must be observed
    pub fn none() -> Self {
        Self {
            building_material: None,
            gas_type: None,
        }
    }
}

impl Default for AssumedAttributes {
    fn default() -> Self {
        Self {
            building_material: Some("reinforced_concrete".to_string()),
            gas_type: Some("city_gas".to_string()),
        }
    }
}
