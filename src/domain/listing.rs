use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Markup layout a listing block was extracted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaRevision {
    /// Current layout: building header plus a nested table with one row per unit
    UnitTable,
    /// Retired layout: a single unit's fields sit directly in the block
    FlatCassette,
}

impl fmt::Display for SchemaRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnitTable => write!(f, "unit_table"),
            Self::FlatCassette => write!(f, "flat_cassette"),
        }
    }
}

/// Floor of a unit.
///
/// Serialized as a bare integer when the label parsed, otherwise as an object
/// carrying the raw label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Floor {
    Level(i32),
    Unparsed { label: String, parse_failed: bool },
}

impl Floor {
    pub fn unparsed(label: impl Into<String>) -> Self {
        Self::Unparsed {
            label: label.into(),
            parse_failed: true,
        }
    }

    pub fn level(&self) -> Option<i32> {
        match self {
            Self::Level(level) => Some(*level),
            Self::Unparsed { .. } => None,
        }
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "{level}F"),
            Self::Unparsed { label, .. } => write!(f, "{label}"),
        }
    }
}

/// One "line / station, walk N minutes" entry of a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationAccess {
    pub station: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_minutes: Option<f64>,
}

/// One rentable unit inside a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<Floor>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub rent: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub management_fee: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub security_deposit: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_money: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub area: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One building listing with its units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Detail columns in source order, keyed by column position
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub access: Vec<StationAccess>,
    #[serde(default)]
    pub units: Vec<Unit>,
    pub schema: SchemaRevision,
    #[serde(default)]
    pub skipped_unit_rows: usize,
}

impl Building {
    /// Station with the shortest parsed walk; the first one wins ties
    pub fn nearest_station(&self) -> Option<&StationAccess> {
        self.access
            .iter()
            .filter(|access| access.walk_minutes.is_some())
            .fold(None, |best: Option<&StationAccess>, access| match best {
                Some(current) if current.walk_minutes <= access.walk_minutes => Some(current),
                _ => Some(access),
            })
    }

    /// Lowest parsed rent across units, used as the merge sort key
    pub fn lowest_rent(&self) -> Option<Decimal> {
        self.units.iter().filter_map(|unit| unit.rent).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building_with_access(access: Vec<StationAccess>) -> Building {
        Building {
            title: "Test".to_string(),
            address: None,
            image_url: None,
            attributes: IndexMap::new(),
            access,
            units: Vec::new(),
            schema: SchemaRevision::UnitTable,
            skipped_unit_rows: 0,
        }
    }

    #[test]
    fn test_nearest_station_prefers_shortest_walk() {
        let building = building_with_access(vec![
            StationAccess { station: "A駅".into(), walk_minutes: Some(8.0) },
            StationAccess { station: "B駅".into(), walk_minutes: None },
            StationAccess { station: "C駅".into(), walk_minutes: Some(3.0) },
            StationAccess { station: "D駅".into(), walk_minutes: Some(3.0) },
        ]);

        let nearest = building.nearest_station().unwrap();
        assert_eq!(nearest.station, "C駅");
    }

    #[test]
    fn test_floor_serializes_as_integer_or_label() {
        assert_eq!(serde_json::to_string(&Floor::Level(3)).unwrap(), "3");

        let unparsed = Floor::unparsed("B1階");
        let json = serde_json::to_string(&unparsed).unwrap();
        assert_eq!(json, r#"{"label":"B1階","parse_failed":true}"#);
        assert_eq!(serde_json::from_str::<Floor>(&json).unwrap(), unparsed);
    }
}
