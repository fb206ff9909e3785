use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Rent,
    Purchase,
}

/// Where the building material and gas type of a property came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeOrigin {
    /// Both values were read from the listing or detail page markup
    Observed,
    /// At least one value was filled in from the configured assumptions
    Assumed,
}

impl AttributeOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Observed => "observed",
            Self::Assumed => "assumed",
        }
    }
}

/// A building/unit pair that satisfies every mandatory criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedProperty {
    pub source: String,
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub floor_area: Decimal,
    pub floor: i32,
    pub nearest_station: String,
    pub station_distance: f64,
    pub address: String,
    pub building_material: String,
    pub gas_type: String,
    pub attribute_origin: AttributeOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
}
