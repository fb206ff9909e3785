//! Record normalizer: located raw fields → typed `Building`/`Unit`
//!
//! A conversion failure demotes that one field to `None`; it never fails the
//! record. Output depends only on the located input and the parse context.

use rust_decimal::Decimal;
use tracing::debug;

use super::ParseContext;
use super::field_locator::{LocatedBlock, LocatedUnit, parse_area, parse_floor_level, parse_man_yen};
use crate::domain::{Building, Floor, Unit};

/// Building plus the building-level signals that are not part of the entity
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedListing {
    pub building: Building,
    pub building_material: Option<String>,
    pub gas_type: Option<String>,
}

pub struct RecordNormalizer;

impl RecordNormalizer {
    pub fn normalize(located: LocatedBlock, context: &ParseContext) -> NormalizedListing {
        let image_url = located
            .image_src
            .as_deref()
            .and_then(|src| resolve_or_demote("image_url", src, context));

        let units = located
            .units
            .iter()
            .map(|unit| Self::normalize_unit(unit, context))
            .collect();

        NormalizedListing {
            building: Building {
                title: located.title,
                address: located.address,
                image_url,
                attributes: located.columns,
                access: located.stations,
                units,
                schema: located.schema,
                skipped_unit_rows: located.skipped_unit_rows,
            },
            building_material: located.building_material,
            gas_type: located.gas_type,
        }
    }

    fn normalize_unit(unit: &LocatedUnit, context: &ParseContext) -> Unit {
        Unit {
            floor: unit.floor.as_deref().map(|label| match parse_floor_level(label) {
                Some(level) => Floor::Level(level),
                None => {
                    debug!(label = %label, "Floor label has no leading digits");
                    Floor::unparsed(label)
                }
            }),
            rent: money("rent", unit.rent.as_deref()),
            management_fee: money("management_fee", unit.management_fee.as_deref()),
            security_deposit: money("security_deposit", unit.security_deposit.as_deref()),
            key_money: money("key_money", unit.key_money.as_deref()),
            layout: unit.layout.clone(),
            area: unit.area.as_deref().and_then(|raw| {
                let area = parse_area(raw);
                if area.is_none() {
                    debug!(field = "area", raw = %raw, "Demoting malformed area to missing");
                }
                area
            }),
            url: unit
                .link
                .as_deref()
                .and_then(|href| resolve_or_demote("url", href, context)),
        }
    }
}

fn money(field: &str, raw: Option<&str>) -> Option<Decimal> {
    let raw = raw?;
    let value = parse_man_yen(raw);
    if value.is_none() && raw.trim() != "-" {
        debug!(field, raw = %raw, "Demoting malformed amount to missing");
    }
    value
}

fn resolve_or_demote(field: &str, href: &str, context: &ParseContext) -> Option<String> {
    match context.resolve_url(href) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!(field, error = %e, "Demoting unresolvable link to missing");
            None
        }
    }
}
