//! Building × unit projection into validation candidates and property rows

use std::collections::HashMap;

use crate::application::validation::{CompleteCandidate, PropertyCandidate, Rejection, ValidationFilter};
use crate::domain::{AssumedAttributes, AttributeOrigin, Building, PropertyType, Unit, ValidatedProperty};
use crate::infrastructure::parsing::{NormalizedListing, PropertyDetails};

/// Detail page extractions keyed by unit URL
pub type DetailIndex = HashMap<String, PropertyDetails>;

/// Result of projecting one listing
#[derive(Debug, Clone, Default)]
pub struct ListingProjection {
    pub properties: Vec<ValidatedProperty>,
    pub rejections: Vec<Rejection>,
}

pub struct PropertyProjector {
    source: String,
    property_type: PropertyType,
    assumptions: AssumedAttributes,
}

impl PropertyProjector {
    pub fn new(source: impl Into<String>, assumptions: AssumedAttributes) -> Self {
        Self {
            source: source.into(),
            property_type: PropertyType::Rent,
            assumptions,
        }
    }

    /// Candidate for one unit plus where its material and gas type came from
    ///
    /// Detail page values win over listing page values, which win over the
    /// configured assumptions.
    pub fn candidate(
        &self,
        listing: &NormalizedListing,
        unit: &Unit,
        details: Option<&PropertyDetails>,
    ) -> (PropertyCandidate, AttributeOrigin) {
        let building = &listing.building;
        let nearest = building.nearest_station();

        let observed_material = details
            .and_then(|details| details.building_material.clone())
            .or_else(|| listing.building_material.clone());
        let observed_gas = details
            .and_then(|details| details.gas_type.clone())
            .or_else(|| listing.gas_type.clone());

        let origin = if (observed_material.is_none() && self.assumptions.building_material.is_some())
            || (observed_gas.is_none() && self.assumptions.gas_type.is_some())
        {
            AttributeOrigin::Assumed
        } else {
            AttributeOrigin::Observed
        };

        let candidate = PropertyCandidate {
            price: unit.rent,
            floor_area: unit.area,
            floor: unit.floor.as_ref().and_then(|floor| floor.level()),
            nearest_station: nearest.map(|access| access.station.clone()),
            station_distance: nearest.and_then(|access| access.walk_minutes),
            address: building.address.clone(),
            building_material: observed_material.or_else(|| self.assumptions.building_material.clone()),
            gas_type: observed_gas.or_else(|| self.assumptions.gas_type.clone()),
        };

        (candidate, origin)
    }

    /// Evaluate every unit of a listing, keeping passing ones as properties
    pub fn project_listing(
        &self,
        listing: &NormalizedListing,
        details: &DetailIndex,
        filter: &ValidationFilter,
    ) -> ListingProjection {
        let mut projection = ListingProjection::default();

        for unit in &listing.building.units {
            let unit_details = unit.url.as_ref().and_then(|url| details.get(url));
            let (candidate, origin) = self.candidate(listing, unit, unit_details);

            match filter.evaluate(&candidate) {
                Ok(complete) => projection.properties.push(self.property(
                    &listing.building,
                    unit,
                    unit_details,
                    complete,
                    origin,
                )),
                Err(rejection) => projection.rejections.push(rejection),
            }
        }

        projection
    }

    fn property(
        &self,
        building: &Building,
        unit: &Unit,
        details: Option<&PropertyDetails>,
        complete: CompleteCandidate,
        attribute_origin: AttributeOrigin,
    ) -> ValidatedProperty {
        ValidatedProperty {
            source: self.source.clone(),
            property_type: self.property_type,
            url: unit.url.clone(),
            title: building.title.clone(),
            price: complete.price,
            floor_area: complete.floor_area,
            floor: complete.floor,
            nearest_station: complete.nearest_station,
            station_distance: complete.station_distance,
            address: complete.address,
            building_material: complete.building_material,
            gas_type: complete.gas_type,
            attribute_origin,
            layout: unit.layout.clone(),
            direction: details.and_then(|details| details.direction.clone()),
            description: details.and_then(|details| details.description.clone()),
            image_url: details
                .and_then(|details| details.image_url.clone())
                .or_else(|| building.image_url.clone()),
            posted_date: details.and_then(|details| details.posted_date.clone()),
        }
    }
}
