//! Validation filter for property candidates
//!
//! Presence of all eight required fields is checked first, then the
//! thresholds in fixed order: floor area, floor, station distance, building
//! material, gas type. The first failure is the rejection reason.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::ValidationCriteria;

/// Required fields of a candidate, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequiredField {
    Price,
    FloorArea,
    Floor,
    NearestStation,
    StationDistance,
    Address,
    BuildingMaterial,
    GasType,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::FloorArea => "floor_area",
            Self::Floor => "floor",
            Self::NearestStation => "nearest_station",
            Self::StationDistance => "station_distance",
            Self::Address => "address",
            Self::BuildingMaterial => "building_material",
            Self::GasType => "gas_type",
        }
    }
}

/// Why a candidate was excluded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("missing required field: {}", .0.as_str())]
    MissingField(RequiredField),

    #[error("floor area {actual} m² is below {minimum} m²")]
    FloorAreaTooSmall { actual: Decimal, minimum: Decimal },

    #[error("floor {actual} is below {minimum}")]
    FloorTooLow { actual: i32, minimum: i32 },

    #[error("station walk {actual} min exceeds {maximum} min")]
    StationTooFar { actual: f64, maximum: f64 },

    #[error("building material {actual} is not {required}")]
    MaterialMismatch { actual: String, required: String },

    #[error("gas type {actual} is not {required}")]
    GasTypeMismatch { actual: String, required: String },
}

impl Rejection {
    /// Stable reason key for counting
    pub fn reason(&self) -> String {
        match self {
            Self::MissingField(field) => format!("missing_{}", field.as_str()),
            Self::FloorAreaTooSmall { .. } => "floor_area_too_small".to_string(),
            Self::FloorTooLow { .. } => "floor_too_low".to_string(),
            Self::StationTooFar { .. } => "station_too_far".to_string(),
            Self::MaterialMismatch { .. } => "material_mismatch".to_string(),
            Self::GasTypeMismatch { .. } => "gas_type_mismatch".to_string(),
        }
    }
}

/// The eight values the filter looks at. Blank strings count as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyCandidate {
    pub price: Option<Decimal>,
    pub floor_area: Option<Decimal>,
    pub floor: Option<i32>,
    pub nearest_station: Option<String>,
    pub station_distance: Option<f64>,
    pub address: Option<String>,
    pub building_material: Option<String>,
    pub gas_type: Option<String>,
}

/// Candidate with every required field present
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteCandidate {
    pub price: Decimal,
    pub floor_area: Decimal,
    pub floor: i32,
    pub nearest_station: String,
    pub station_distance: f64,
    pub address: String,
    pub building_material: String,
    pub gas_type: String,
}

impl PropertyCandidate {
    /// Check presence of every required field, in order
    pub fn complete(&self) -> Result<CompleteCandidate, Rejection> {
        fn text(value: &Option<String>, field: RequiredField) -> Result<String, Rejection> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or(Rejection::MissingField(field))
        }

        Ok(CompleteCandidate {
            price: self.price.ok_or(Rejection::MissingField(RequiredField::Price))?,
            floor_area: self.floor_area.ok_or(Rejection::MissingField(RequiredField::FloorArea))?,
            floor: self.floor.ok_or(Rejection::MissingField(RequiredField::Floor))?,
            nearest_station: text(&self.nearest_station, RequiredField::NearestStation)?,
            station_distance: self
                .station_distance
                .filter(|minutes| minutes.is_finite())
                .ok_or(Rejection::MissingField(RequiredField::StationDistance))?,
            address: text(&self.address, RequiredField::Address)?,
            building_material: text(&self.building_material, RequiredField::BuildingMaterial)?,
            gas_type: text(&self.gas_type, RequiredField::GasType)?,
        })
    }
}

/// Applies [`ValidationCriteria`] to candidates
#[derive(Debug, Clone, Default)]
pub struct ValidationFilter {
    criteria: ValidationCriteria,
}

impl ValidationFilter {
    pub fn new(criteria: ValidationCriteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &ValidationCriteria {
        &self.criteria
    }

    /// Full check; returns the complete candidate or the first failure
    pub fn evaluate(&self, candidate: &PropertyCandidate) -> Result<CompleteCandidate, Rejection> {
        let complete = candidate.complete()?;
        let criteria = &self.criteria;

        if complete.floor_area < criteria.min_floor_area {
            return Err(Rejection::FloorAreaTooSmall {
                actual: complete.floor_area,
                minimum: criteria.min_floor_area,
            });
        }
        if complete.floor < criteria.min_floor {
            return Err(Rejection::FloorTooLow {
                actual: complete.floor,
                minimum: criteria.min_floor,
            });
        }
        if complete.station_distance > criteria.max_station_minutes {
            return Err(Rejection::StationTooFar {
                actual: complete.station_distance,
                maximum: criteria.max_station_minutes,
            });
        }
        if !complete.building_material.eq_ignore_ascii_case(&criteria.required_material) {
            return Err(Rejection::MaterialMismatch {
                actual: complete.building_material,
                required: criteria.required_material.clone(),
            });
        }
        if !complete.gas_type.eq_ignore_ascii_case(&criteria.required_gas_type) {
            return Err(Rejection::GasTypeMismatch {
                actual: complete.gas_type,
                required: criteria.required_gas_type.clone(),
            });
        }

        Ok(complete)
    }

    pub fn validate(&self, candidate: &PropertyCandidate) -> bool {
        self.evaluate(candidate).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn passing() -> PropertyCandidate {
        PropertyCandidate {
            price: Some(Decimal::from(180_000)),
            floor_area: Some(Decimal::from(70)),
            floor: Some(3),
            nearest_station: Some("東急東横線/中目黒駅".to_string()),
            station_distance: Some(5.0),
            address: Some("東京都目黒区上目黒2".to_string()),
            building_material: Some("reinforced_concrete".to_string()),
            gas_type: Some("city_gas".to_string()),
        }
    }

    #[test]
    fn test_passing_candidate() {
        assert!(ValidationFilter::default().validate(&passing()));
    }

    #[test]
    fn test_boundary_values_pass() {
        let candidate = PropertyCandidate {
            floor_area: Some(Decimal::from(65)),
            floor: Some(2),
            station_distance: Some(10.0),
            ..passing()
        };
        assert!(ValidationFilter::default().validate(&candidate));
    }

    #[test]
    fn test_comparisons_ignore_case() {
        let candidate = PropertyCandidate {
            building_material: Some("Reinforced_Concrete".to_string()),
            gas_type: Some("CITY_GAS".to_string()),
            ..passing()
        };
        assert!(ValidationFilter::default().validate(&candidate));
    }

    #[rstest]
    #[case::price(PropertyCandidate { price: None, ..passing() }, "missing_price")]
    #[case::blank_address(PropertyCandidate { address: Some("  ".to_string()), ..passing() }, "missing_address")]
    #[case::gas_missing(PropertyCandidate { gas_type: None, floor_area: Some(Decimal::from(10)), ..passing() }, "missing_gas_type")]
    #[case::area(PropertyCandidate { floor_area: Some(Decimal::new(649, 1)), ..passing() }, "floor_area_too_small")]
    #[case::floor(PropertyCandidate { floor: Some(1), ..passing() }, "floor_too_low")]
    #[case::distance(PropertyCandidate { station_distance: Some(10.5), ..passing() }, "station_too_far")]
    #[case::material(PropertyCandidate { building_material: Some("wood".to_string()), ..passing() }, "material_mismatch")]
    #[case::gas(PropertyCandidate { gas_type: Some("propane".to_string()), ..passing() }, "gas_type_mismatch")]
    #[case::area_before_floor(PropertyCandidate { floor_area: Some(Decimal::from(20)), floor: Some(1), ..passing() }, "floor_area_too_small")]
    fn test_rejection_reasons(#[case] candidate: PropertyCandidate, #[case] reason: &str) {
        let rejection = ValidationFilter::default().evaluate(&candidate).unwrap_err();
        assert_eq!(rejection.reason(), reason);
    }

    proptest! {
        #[test]
        fn prop_larger_area_never_flips_to_reject(area in 0u32..500, extra in 0u32..500) {
            let filter = ValidationFilter::default();
            let smaller = PropertyCandidate { floor_area: Some(Decimal::from(area)), ..passing() };
            let larger = PropertyCandidate { floor_area: Some(Decimal::from(area + extra)), ..passing() };
            prop_assert!(!filter.validate(&smaller) || filter.validate(&larger));
        }

        #[test]
        fn prop_higher_floor_never_flips_to_reject(floor in -5i32..60, extra in 0i32..60) {
            let filter = ValidationFilter::default();
            let lower = PropertyCandidate { floor: Some(floor), ..passing() };
            let higher = PropertyCandidate { floor: Some(floor + extra), ..passing() };
            prop_assert!(!filter.validate(&lower) || filter.validate(&higher));
        }

        #[test]
        fn prop_relaxed_criteria_only_grow_accepted_set(
            area in 0u32..200,
            floor in -2i32..40,
            minutes in 0u32..40,
            min_area in 0u32..200,
            min_floor in -2i32..40,
            max_minutes in 0u32..40,
            relax_area in 0u32..100,
            relax_floor in 0i32..20,
            relax_minutes in 0u32..20,
        ) {
            let candidate = PropertyCandidate {
                floor_area: Some(Decimal::from(area)),
                floor: Some(floor),
                station_distance: Some(f64::from(minutes)),
                ..passing()
            };
            let strict = ValidationCriteria {
                min_floor_area: Decimal::from(min_area),
                min_floor,
                max_station_minutes: f64::from(max_minutes),
                ..ValidationCriteria::default()
            };
            let relaxed = ValidationCriteria {
                min_floor_area: Decimal::from(min_area.saturating_sub(relax_area)),
                min_floor: min_floor - relax_floor,
                max_station_minutes: f64::from(max_minutes + relax_minutes),
                ..strict.clone()
            };

            let accepted_strict = ValidationFilter::new(strict).validate(&candidate);
            let accepted_relaxed = ValidationFilter::new(relaxed).validate(&candidate);
            prop_assert!(!accepted_strict || accepted_relaxed);
        }

        #[test]
        fn prop_material_and_gas_must_equal_requirement(
            material in prop::sample::select(vec!["reinforced_concrete", "steel", "wood"]),
            required_material in prop::sample::select(vec!["reinforced_concrete", "steel", "wood"]),
            gas in prop::sample::select(vec!["city_gas", "propane"]),
            required_gas in prop::sample::select(vec!["city_gas", "propane"]),
        ) {
            let candidate = PropertyCandidate {
                building_material: Some(material.to_string()),
                gas_type: Some(gas.to_string()),
                ..passing()
            };
            let filter = ValidationFilter::new(ValidationCriteria {
                required_material: required_material.to_string(),
                required_gas_type: required_gas.to_string(),
                ..ValidationCriteria::default()
            });
            prop_assert_eq!(
                filter.validate(&candidate),
                material == required_material && gas == required_gas
            );
        }

        #[test]
        fn prop_shorter_walk_never_flips_to_reject(minutes in 0.0f64..60.0, less in 0.0f64..60.0) {
            let filter = ValidationFilter::default();
            let farther = PropertyCandidate { station_distance: Some(minutes), ..passing() };
            let closer = PropertyCandidate { station_distance: Some((minutes - less).max(0.0)), ..passing() };
            prop_assert!(!filter.validate(&farther) || filter.validate(&closer));
        }
    }
}
