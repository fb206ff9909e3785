use std::fmt::Write;

use super::{PLACEHOLDER, ReportBody, ReportMeta, or_placeholder, property_fields, unit_fields};
use crate::domain::{Building, ValidatedProperty};

pub fn render(meta: &ReportMeta, body: ReportBody<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", meta.title);
    let _ = writeln!(out, "_Generated at {}_\n", meta.generated_at.to_rfc3339());

    match body {
        ReportBody::Buildings(buildings) => {
            let _ = writeln!(out, "{} buildings\n", buildings.len());
            for building in buildings {
                write_building(&mut out, building);
            }
        }
        ReportBody::Properties(properties) => {
            let _ = writeln!(out, "{} properties matching the criteria\n", properties.len());
            for property in properties {
                write_property(&mut out, property);
            }
        }
    }

    out
}

fn write_building(out: &mut String, building: &Building) {
    let _ = writeln!(out, "## {}\n", building.title);

    if let Some(image_url) = &building.image_url {
        let _ = writeln!(out, "![{}]({})\n", building.title, image_url);
    }

    let _ = writeln!(out, "- Address: {}", or_placeholder(building.address.as_deref()));
    for (key, value) in &building.attributes {
        let _ = writeln!(out, "- {key}: {value}");
    }
    out.push('\n');

    if building.units.is_empty() {
        let _ = writeln!(out, "_No units listed_\n");
    }

    for (index, unit) in building.units.iter().enumerate() {
        let _ = writeln!(out, "### Unit {}\n", index + 1);
        for (label, value) in unit_fields(unit) {
            let _ = writeln!(out, "- {label}: {}", or_placeholder(value.as_deref()));
        }
        if let Some(url) = &unit.url {
            let _ = writeln!(out, "- [Details]({url})");
        }
        out.push('\n');
    }
}

fn write_property(out: &mut String, property: &ValidatedProperty) {
    let _ = writeln!(out, "## {}\n", property.title);
    for (label, value) in property_fields(property) {
        let value = value.unwrap_or_else(|| PLACEHOLDER.to_string());
        let _ = writeln!(out, "- {label}: {value}");
    }
    if let Some(description) = &property.description {
        let _ = writeln!(out, "\n> {description}");
    }
    out.push('\n');
}
