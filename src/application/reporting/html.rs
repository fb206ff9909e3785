//! HTML report: one card per building or property

use std::fmt::Write;

use super::{ReportBody, ReportMeta, or_placeholder, property_fields, unit_fields};
use crate::domain::{Building, ValidatedProperty};

const STYLE: &str = r"
body { font-family: sans-serif; margin: 2rem; background: #f5f5f5; }
.card { background: #fff; border-radius: 8px; padding: 1rem; margin-bottom: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.15); }
.card img { max-width: 320px; display: block; margin-bottom: .75rem; }
.grid { display: grid; grid-template-columns: max-content 1fr; gap: .25rem 1rem; }
.grid dt { font-weight: bold; }
.units { display: flex; flex-wrap: wrap; gap: 1rem; margin-top: 1rem; }
.unit { border: 1px solid #ddd; border-radius: 6px; padding: .75rem; min-width: 220px; }
";

pub fn render(meta: &ReportMeta, body: ReportBody<'_>) -> String {
    let mut out = String::new();
    let title = escape(&meta.title);

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(out, "<h1>{title}</h1>");
    let _ = writeln!(
        out,
        "<p class=\"generated\">Generated at {}</p>",
        escape(&meta.generated_at.to_rfc3339())
    );

    match body {
        ReportBody::Buildings(buildings) => {
            for building in buildings {
                write_building(&mut out, building);
            }
        }
        ReportBody::Properties(properties) => {
            for property in properties {
                write_property(&mut out, property);
            }
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn write_building(out: &mut String, building: &Building) {
    out.push_str("<div class=\"card building\">\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape(&building.title));
    if let Some(image_url) = &building.image_url {
        let _ = writeln!(
            out,
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            escape(image_url),
            escape(&building.title)
        );
    }

    out.push_str("<dl class=\"grid\">\n");
    write_row(out, "Address", building.address.as_deref());
    for (key, value) in &building.attributes {
        write_row(out, key, Some(value));
    }
    out.push_str("</dl>\n");

    if !building.units.is_empty() {
        out.push_str("<div class=\"units\">\n");
        for unit in &building.units {
            out.push_str("<div class=\"card unit\">\n<dl class=\"grid\">\n");
            for (label, value) in unit_fields(unit) {
                write_row(out, label, value.as_deref());
            }
            out.push_str("</dl>\n");
            if let Some(url) = &unit.url {
                let _ = writeln!(out, "<a href=\"{}\">Details</a>", escape(url));
            }
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n");
    }

    out.push_str("</div>\n");
}

fn write_property(out: &mut String, property: &ValidatedProperty) {
    out.push_str("<div class=\"card property\">\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape(&property.title));
    if let Some(image_url) = &property.image_url {
        let _ = writeln!(
            out,
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            escape(image_url),
            escape(&property.title)
        );
    }

    out.push_str("<dl class=\"grid\">\n");
    for (label, value) in property_fields(property) {
        write_row(out, label, value.as_deref());
    }
    out.push_str("</dl>\n");

    if let Some(description) = &property.description {
        let _ = writeln!(out, "<p>{}</p>", escape(description));
    }
    out.push_str("</div>\n");
}

fn write_row(out: &mut String, label: &str, value: Option<&str>) {
    let _ = writeln!(
        out,
        "<dt>{}</dt><dd>{}</dd>",
        escape(label),
        escape(or_placeholder(value))
    );
}

/// Escape text for element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
