//! Plain-text run summary printed to stdout

use std::fmt::Write;

use super::{PLACEHOLDER, format_area, format_yen};
use crate::domain::ValidatedProperty;

pub fn render(properties: &[ValidatedProperty], results_path: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} properties matching the criteria", properties.len());
    if let Some(path) = results_path {
        let _ = writeln!(out, "Results saved to {path}");
    }

    for property in properties {
        let _ = writeln!(out);
        let _ = writeln!(out, "Title: {}", property.title);
        let _ = writeln!(out, "Price: {}/month", format_yen(property.price));
        let _ = writeln!(out, "Floor Area: {}", format_area(property.floor_area));
        let _ = writeln!(out, "Floor: {}F", property.floor);
        let _ = writeln!(
            out,
            "Station: {} ({}min)",
            property.nearest_station, property.station_distance
        );
        let _ = writeln!(out, "Address: {}", property.address);
        if let Some(direction) = &property.direction {
            let _ = writeln!(out, "Direction: {direction}");
        }
        let _ = writeln!(out, "URL: {}", property.url.as_deref().unwrap_or(PLACEHOLDER));
    }

    out
}
