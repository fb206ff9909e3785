//! Field locator for SUUMO listing blocks
//!
//! Locates raw field values inside one listing block using the rule table in
//! [`ParsingConfig`]. A missing optional field is `None`; only a missing title
//! fails the block. The unit-specific string parsers (man-yen prices, areas,
//! station access, floor labels) live here as free functions so the
//! normalizer and the detail parser share one set of rules.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{ElementRef, Selector};
use std::str::FromStr;
use tracing::{debug, warn};

use super::config::{ParsingConfig, TermMapping, UnitRules};
use super::{ParsingError, ParsingResult};
use crate::domain::{SchemaRevision, StationAccess};

/// Literal token meaning "x 10,000 yen"
pub const MAN_YEN_MARKER: &str = "万円";
/// Separator between station name and walking time
pub const DISTANCE_MARKER: char = '歩';
/// Suffix of the walking time
pub const MINUTES_MARKER: char = '分';

static COLUMN_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[-_])(col\d+)$").expect("static regex is valid"));

const LINE_BREAKING_ELEMENTS: &[&str] = &[
    "div", "p", "li", "ul", "ol", "dl", "dt", "dd", "tr", "table", "section",
];

static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("static selector is valid"));

/// Raw values located for one unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatedUnit {
    pub floor: Option<String>,
    pub rent: Option<String>,
    pub management_fee: Option<String>,
    pub security_deposit: Option<String>,
    pub key_money: Option<String>,
    pub layout: Option<String>,
    pub area: Option<String>,
    pub link: Option<String>,
}

/// Raw values located for one listing block
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedBlock {
    pub schema: SchemaRevision,
    pub title: String,
    pub address: Option<String>,
    pub image_src: Option<String>,
    pub columns: IndexMap<String, String>,
    pub stations: Vec<StationAccess>,
    pub building_material: Option<String>,
    pub gas_type: Option<String>,
    pub units: Vec<LocatedUnit>,
    pub skipped_unit_rows: usize,
}

/// Compiled unit rules for one schema revision
struct UnitSelectors {
    probe: Vec<Selector>,
    row: Vec<Selector>,
    min_cells: usize,
    floor_cell: Option<usize>,
    floor: Vec<Selector>,
    rent: Vec<Selector>,
    management_fee: Vec<Selector>,
    security_deposit: Vec<Selector>,
    key_money: Vec<Selector>,
    layout: Vec<Selector>,
    area: Vec<Selector>,
    link: Vec<Selector>,
}

impl UnitSelectors {
    fn compile(rules: &UnitRules) -> ParsingResult<Self> {
        Ok(Self {
            probe: compile_selectors("unit.probe", &rules.probe)?,
            row: compile_optional_selectors(&rules.row),
            min_cells: rules.min_cells,
            floor_cell: rules.floor_cell,
            floor: compile_optional_selectors(&rules.floor),
            rent: compile_selectors("unit.rent", &rules.rent)?,
            management_fee: compile_optional_selectors(&rules.management_fee),
            security_deposit: compile_optional_selectors(&rules.security_deposit),
            key_money: compile_optional_selectors(&rules.key_money),
            layout: compile_optional_selectors(&rules.layout),
            area: compile_selectors("unit.area", &rules.area)?,
            link: compile_optional_selectors(&rules.link),
        })
    }
}

/// Heuristic field locator compiled from a [`ParsingConfig`]
pub struct FieldLocator {
    listing_block: Vec<Selector>,
    title: Vec<Selector>,
    address: Vec<Selector>,
    image: Vec<Selector>,
    image_attributes: Vec<String>,
    detail_column: Vec<Selector>,
    station_column: Vec<Selector>,
    unit_table: UnitSelectors,
    flat_cassette: UnitSelectors,
    structure_column: String,
    material_terms: Vec<TermMapping>,
    gas_terms: Vec<TermMapping>,
    listing_block_sources: Vec<String>,
}

impl FieldLocator {
    /// Create a locator with the default SUUMO rule table
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ParsingConfig::default())
    }

    /// Create a locator with a custom rule table
    pub fn with_config(config: &ParsingConfig) -> ParsingResult<Self> {
        let listing = &config.listing;
        Ok(Self {
            listing_block: compile_selectors("listing_block", &listing.listing_block)?,
            title: compile_selectors("title", &listing.title)?,
            address: compile_optional_selectors(&listing.address),
            image: compile_optional_selectors(&listing.image),
            image_attributes: listing.image_attributes.clone(),
            detail_column: compile_optional_selectors(&listing.detail_column),
            station_column: compile_optional_selectors(&listing.station_column),
            unit_table: UnitSelectors::compile(&config.unit_table)?,
            flat_cassette: UnitSelectors::compile(&config.flat_cassette)?,
            structure_column: listing.structure_column.clone(),
            material_terms: config.material_terms.clone(),
            gas_terms: config.gas_terms.clone(),
            listing_block_sources: listing.listing_block.clone(),
        })
    }

    /// All listing blocks below `root`, using the first container selector that matches
    pub fn listing_blocks<'a>(&self, root: ElementRef<'a>) -> (Vec<ElementRef<'a>>, Vec<String>) {
        let mut tried = Vec::new();
        for (selector, source) in self.listing_block.iter().zip(&self.listing_block_sources) {
            tried.push(source.clone());
            let blocks: Vec<ElementRef<'a>> = root.select(selector).collect();
            if !blocks.is_empty() {
                debug!("Found {} listing blocks using selector '{}'", blocks.len(), source);
                return (blocks, tried);
            }
        }
        (Vec::new(), tried)
    }

    /// Probe the block structure to pick the rule set
    pub fn detect_schema(&self, block: ElementRef<'_>) -> SchemaRevision {
        if first_match(block, &self.unit_table.probe).is_some() {
            SchemaRevision::UnitTable
        } else if first_match(block, &self.flat_cassette.probe).is_some() {
            SchemaRevision::FlatCassette
        } else {
            debug!("No unit structure found in listing block, assuming unit table layout");
            SchemaRevision::UnitTable
        }
    }

    /// Locate every raw field of one listing block
    pub fn locate_block(&self, block: ElementRef<'_>) -> ParsingResult<LocatedBlock> {
        let title = first_text(block, &self.title)
            .ok_or_else(|| ParsingError::required_field_missing("title", Some("listing block")))?;

        let schema = self.detect_schema(block);
        let columns = self.locate_columns(block);
        let stations = self.locate_stations(block);
        let (units, skipped_unit_rows) = self.locate_units(block, schema);

        if skipped_unit_rows > 0 {
            warn!(
                title = %title,
                skipped_unit_rows,
                "Skipped unit rows with too few cells"
            );
        }

        Ok(LocatedBlock {
            schema,
            address: first_text(block, &self.address),
            image_src: self.locate_image(block),
            building_material: match_terms(self.structure_lines(&columns), &self.material_terms),
            gas_type: match_terms(columns.values(), &self.gas_terms),
            title,
            columns,
            stations,
            units,
            skipped_unit_rows,
        })
    }

    /// Values of the structure column, including its split lines
    fn structure_lines<'a>(
        &'a self,
        columns: &'a IndexMap<String, String>,
    ) -> impl Iterator<Item = &'a String> + Clone {
        columns
            .iter()
            .filter(|(key, _)| {
                key.strip_prefix(self.structure_column.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('_'))
            })
            .map(|(_, value)| value)
    }

    fn locate_image(&self, block: ElementRef<'_>) -> Option<String> {
        for selector in &self.image {
            for image in block.select(selector) {
                for attribute in &self.image_attributes {
                    let Some(value) = image.value().attr(attribute) else {
                        continue;
                    };
                    let value = value.trim();
                    if !value.is_empty() && !value.starts_with("data:") {
                        return Some(value.to_string());
                    }
                }
            }
        }
        None
    }

    /// Detail columns keyed by position, multi-line columns split per line
    fn locate_columns(&self, block: ElementRef<'_>) -> IndexMap<String, String> {
        let mut columns = IndexMap::new();
        let Some(selector) = self
            .detail_column
            .iter()
            .find(|selector| block.select(selector).next().is_some())
        else {
            return columns;
        };

        for (position, column) in block.select(selector).enumerate() {
            let base_key = column_key(column, position);
            let lines = split_lines(column);
            match lines.len() {
                0 => {}
                1 => insert_unique(&mut columns, &base_key, 1, lines[0].clone()),
                _ => {
                    for (line_index, line) in lines.into_iter().enumerate() {
                        let key = format!("{base_key}_{}", line_index + 1);
                        insert_unique(&mut columns, &key, line_index + 1, line);
                    }
                }
            }
        }
        columns
    }

    fn locate_stations(&self, block: ElementRef<'_>) -> Vec<StationAccess> {
        let Some(column) = first_match(block, &self.station_column) else {
            return Vec::new();
        };
        split_lines(column)
            .iter()
            .filter_map(|line| {
                let access = locate_station(line);
                if access.is_none() {
                    debug!(line = %line, "Access line has no walking distance");
                }
                access
            })
            .collect()
    }

    fn locate_units(&self, block: ElementRef<'_>, schema: SchemaRevision) -> (Vec<LocatedUnit>, usize) {
        let rules = match schema {
            SchemaRevision::UnitTable => &self.unit_table,
            SchemaRevision::FlatCassette => &self.flat_cassette,
        };

        if rules.row.is_empty() {
            return (vec![locate_unit(block, &[], rules)], 0);
        }

        let rows: Vec<ElementRef<'_>> = rules
            .row
            .iter()
            .map(|selector| block.select(selector).collect::<Vec<_>>())
            .find(|rows| !rows.is_empty())
            .unwrap_or_default();

        let mut units = Vec::with_capacity(rows.len());
        let mut skipped = 0;
        for row in rows {
            let cells: Vec<ElementRef<'_>> = row.select(&CELL_SELECTOR).collect();
            if cells.len() < rules.min_cells {
                debug!(cells = cells.len(), min_cells = rules.min_cells, "Skipping short unit row");
                skipped += 1;
                continue;
            }
            units.push(locate_unit(row, &cells, rules));
        }
        (units, skipped)
    }
}

fn locate_unit(scope: ElementRef<'_>, cells: &[ElementRef<'_>], rules: &UnitSelectors) -> LocatedUnit {
    let floor = first_text(scope, &rules.floor).or_else(|| {
        rules
            .floor_cell
            .and_then(|index| cells.get(index))
            .and_then(|cell| non_empty(&collapse_whitespace(&element_text(*cell))))
    });

    LocatedUnit {
        floor,
        rent: first_text(scope, &rules.rent),
        management_fee: first_text(scope, &rules.management_fee),
        security_deposit: first_text(scope, &rules.security_deposit),
        key_money: first_text(scope, &rules.key_money),
        layout: first_text(scope, &rules.layout),
        area: first_text(scope, &rules.area),
        link: rules.link.iter().find_map(|selector| {
            scope
                .select(selector)
                .find_map(|anchor| anchor.value().attr("href"))
                .and_then(non_empty)
        }),
    }
}

/// Compile multiple selector strings, skipping invalid ones
fn compile_optional_selectors(selector_strings: &[String]) -> Vec<Selector> {
    selector_strings
        .iter()
        .filter_map(|selector_str| match Selector::parse(selector_str) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!("Failed to compile selector '{}': {}", selector_str, e);
                None
            }
        })
        .collect()
}

/// Compile multiple selector strings; at least one must be valid
fn compile_selectors(field: &str, selector_strings: &[String]) -> ParsingResult<Vec<Selector>> {
    let mut selectors = Vec::new();
    let mut errors = Vec::new();

    for selector_str in selector_strings {
        match Selector::parse(selector_str) {
            Ok(selector) => selectors.push(selector),
            Err(e) => errors.push(format!("'{selector_str}': {e}")),
        }
    }

    if selectors.is_empty() {
        return Err(ParsingError::NoValidSelectors {
            field: field.to_string(),
            errors: if errors.is_empty() {
                "no selectors configured".to_string()
            } else {
                errors.join(", ")
            },
        });
    }

    if !errors.is_empty() {
        debug!("Some selectors for {} failed to compile: {}", field, errors.join(", "));
    }

    Ok(selectors)
}

pub(crate) fn first_match<'a>(scope: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|selector| scope.select(selector).next())
}

/// Text of the first element matched by any selector, whitespace collapsed
pub(crate) fn first_text(scope: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        scope
            .select(selector)
            .find_map(|element| non_empty(&collapse_whitespace(&element_text(element))))
    })
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Lines of an element: embedded newlines, `<br>` and block-level children
/// break lines, inline markup does not
pub fn split_lines(element: ElementRef<'_>) -> Vec<String> {
    let mut text = String::new();
    push_line_text(element, &mut text);
    text.lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}

fn push_line_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if name == "br" {
                out.push('\n');
                continue;
            }
            let block = LINE_BREAKING_ELEMENTS.contains(&name);
            if block {
                out.push('\n');
            }
            push_line_text(child, out);
            if block {
                out.push('\n');
            }
        }
    }
}

/// Position-derived column key: `colN` from the class name, else 1-based position
fn column_key(column: ElementRef<'_>, position: usize) -> String {
    column
        .value()
        .classes()
        .find_map(|class| COLUMN_CLASS.captures(class).map(|caps| caps[1].to_string()))
        .unwrap_or_else(|| format!("col{}", position + 1))
}

/// Insert under `key`, appending the line index while the key is taken
fn insert_unique(columns: &mut IndexMap<String, String>, key: &str, line_index: usize, value: String) {
    let mut candidate = key.to_string();
    let mut suffix = line_index;
    while columns.contains_key(&candidate) {
        candidate = format!("{key}_{suffix}");
        suffix += 1;
    }
    columns.insert(candidate, value);
}

/// First configured term found in any of the values, in term order
pub fn match_terms<'a>(values: impl Iterator<Item = &'a String> + Clone, terms: &[TermMapping]) -> Option<String> {
    terms.iter().find_map(|term| {
        let pattern = term.pattern.to_uppercase();
        values
            .clone()
            .any(|value| value.to_uppercase().contains(&pattern))
            .then(|| term.canonical.clone())
    })
}

/// Parse a SUUMO price such as `8.5万円`, `5000円` or `1,200円`
///
/// `-` and empty text mean the fee does not apply and yield `None`.
pub fn parse_man_yen(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '，')
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }

    if let Some(amount) = cleaned.strip_suffix(MAN_YEN_MARKER).or_else(|| cleaned.strip_suffix('万')) {
        let amount = Decimal::from_str(amount).ok()?;
        return amount.checked_mul(Decimal::from(10_000)).map(|value| value.normalize());
    }

    let amount = cleaned.strip_suffix('円').unwrap_or(&cleaned);
    Decimal::from_str(amount).ok().map(|value| value.normalize())
}

/// Parse a floor area such as `70.5m2`, `70.5m²` or `70.5㎡`
pub fn parse_area(text: &str) -> Option<Decimal> {
    let cleaned = text.trim();
    let number = ["m2", "m²", "㎡", "m"]
        .iter()
        .find_map(|suffix| cleaned.strip_suffix(suffix))
        .unwrap_or(cleaned)
        .trim();
    Decimal::from_str(number).ok().map(|value| value.normalize())
}

/// Split `"<station><歩><minutes><分>"` on the distance marker exactly once
pub fn split_station(text: &str) -> Option<(String, String)> {
    let (station, minutes) = text.split_once(DISTANCE_MARKER)?;
    let station = station.trim();
    if station.is_empty() {
        return None;
    }
    Some((station.to_string(), minutes.trim().to_string()))
}

/// Parse the minutes half of a station line; must be a finite non-negative number
pub fn parse_walk_minutes(text: &str) -> Option<f64> {
    let number = text.trim().trim_end_matches(MINUTES_MARKER).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|minutes| minutes.is_finite() && *minutes >= 0.0)
}

/// Locate station name and walking minutes in one access line
///
/// A line without the distance marker is a miss for both fields; a malformed
/// minutes value only drops the distance.
pub fn locate_station(text: &str) -> Option<StationAccess> {
    let (station, minutes) = split_station(text)?;
    Some(StationAccess {
        station,
        walk_minutes: parse_walk_minutes(&minutes),
    })
}

/// Leading digit run of a floor label such as `3階` or `3-4階`
pub fn parse_floor_level(text: &str) -> Option<i32> {
    let digits: String = text
        .trim()
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(u32::from(c) - u32::from('０') + u32::from('0')).unwrap_or(c),
            _ => c,
        })
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use scraper::Html;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[rstest]
    #[case("8.5万円", Some("85000"))]
    #[case("12万円", Some("120000"))]
    #[case("1,234万円", Some("12340000"))]
    #[case(" 5000円 ", Some("5000"))]
    #[case("1,200円", Some("1200"))]
    #[case("8.5万", Some("85000"))]
    #[case("-", None)]
    #[case("", None)]
    #[case("応相談", None)]
    fn test_parse_man_yen(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_man_yen(text), expected.map(dec));
    }

    #[rstest]
    #[case("70.5m2", Some("70.5"))]
    #[case("65m²", Some("65"))]
    #[case("80.12㎡", Some("80.12"))]
    #[case("広い", None)]
    fn test_parse_area(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(parse_area(text), expected.map(dec));
    }

    #[rstest]
    #[case("3階", Some(3))]
    #[case("12階", Some(12))]
    #[case("3-4階", Some(3))]
    #[case("３階", Some(3))]
    #[case("B1階", None)]
    #[case("階", None)]
    fn test_parse_floor_level(#[case] text: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse_floor_level(text), expected);
    }

    #[test]
    fn test_station_split() {
        let access = locate_station("渋谷駅歩5分").unwrap();
        assert_eq!(access.station, "渋谷駅");
        assert_eq!(access.walk_minutes, Some(5.0));

        let access = locate_station("東急東横線/代官山駅 歩7分").unwrap();
        assert_eq!(access.station, "東急東横線/代官山駅");
        assert_eq!(access.walk_minutes, Some(7.0));
    }

    #[test]
    fn test_station_without_marker_is_a_miss() {
        assert_eq!(locate_station("都営バス/渋谷駅 バス10分"), None);
        assert_eq!(locate_station("歩5分"), None);
    }

    #[test]
    fn test_station_with_malformed_minutes_keeps_name() {
        let access = locate_station("渋谷駅歩すぐ").unwrap();
        assert_eq!(access.station, "渋谷駅");
        assert_eq!(access.walk_minutes, None);
    }

    #[test]
    fn test_multiline_columns_are_split_and_keys_stay_unique() {
        let html = Html::parse_fragment(
            r#"<div class="cassetteitem">
                <div class="cassetteitem_content-title">テストマンション</div>
                <ul class="cassetteitem_detail">
                    <li class="cassetteitem_detail-col1">東京都<span>渋谷区</span>恵比寿1</li>
                    <li class="cassetteitem_detail-col2">JR山手線/<a href="/eki/">恵比寿駅</a> 歩5分<br>東急東横線/代官山駅 歩9分</li>
                    <li class="cassetteitem_detail-col3"><div>築5年</div><div>10階建</div></li>
                    <li class="cassetteitem_detail-col3">鉄筋コンクリート</li>
                    <li class="cassetteitem_detail-col3">都市ガス</li>
                </ul>
            </div>"#,
        );
        let locator = FieldLocator::new().unwrap();
        let (blocks, _) = locator.listing_blocks(html.root_element());
        let located = locator.locate_block(blocks[0]).unwrap();

        let keys: Vec<&str> = located.columns.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["col1", "col2_1", "col2_2", "col3_1", "col3_2", "col3", "col3_3"]);
        assert_eq!(located.columns["col1"], "東京都渋谷区恵比寿1");
        assert_eq!(located.columns["col2_1"], "JR山手線/恵比寿駅 歩5分");
        assert_eq!(located.stations.len(), 2);
        assert_eq!(located.stations[0].station, "JR山手線/恵比寿駅");
        assert_eq!(located.stations[0].walk_minutes, Some(5.0));
        assert_eq!(located.stations[1].walk_minutes, Some(9.0));
        assert_eq!(located.columns["col3_1"], "築5年");
        assert_eq!(located.columns["col3_2"], "10階建");
        assert_eq!(located.columns["col3"], "鉄筋コンクリート");
        assert_eq!(located.columns["col3_3"], "都市ガス");
        assert_eq!(located.building_material.as_deref(), Some("reinforced_concrete"));
        assert_eq!(located.gas_type.as_deref(), Some("city_gas"));
    }

    #[test]
    fn test_material_is_read_from_structure_column_only() {
        let html = Html::parse_fragment(
            r#"<div class="cassetteitem">
                <div class="cassetteitem_content-title">Arc Court</div>
                <ul class="cassetteitem_detail">
                    <li class="cassetteitem_detail-col1">東京都港区 Circle Bldg</li>
                    <li class="cassetteitem_detail-col2">都営大江戸線/麻布十番駅 歩4分</li>
                    <li class="cassetteitem_detail-col3"><div>築8年</div><div>木造 2階建</div></li>
                </ul>
            </div>"#,
        );
        let locator = FieldLocator::new().unwrap();
        let (blocks, _) = locator.listing_blocks(html.root_element());
        let located = locator.locate_block(blocks[0]).unwrap();

        assert_eq!(located.building_material.as_deref(), Some("wood"));
    }

    #[test]
    fn test_stray_rc_letters_are_not_a_material() {
        let config = ParsingConfig::default();
        let values = ["Arc Court".to_string(), "築8年".to_string()];
        assert_eq!(match_terms(values.iter(), &config.material_terms), None);
    }

    #[test]
    fn test_block_without_title_fails() {
        let html = Html::parse_fragment(r#"<div class="cassetteitem"><p>no title</p></div>"#);
        let locator = FieldLocator::new().unwrap();
        let (blocks, _) = locator.listing_blocks(html.root_element());
        let err = locator.locate_block(blocks[0]).unwrap_err();
        assert!(matches!(err, ParsingError::RequiredFieldMissing { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_material_terms_prefer_more_specific_patterns() {
        let config = ParsingConfig::default();
        let values = ["鉄骨鉄筋コンクリート".to_string()];
        assert_eq!(
            match_terms(values.iter(), &config.material_terms).as_deref(),
            Some("steel_reinforced_concrete")
        );
        let values = ["築3年".to_string(), "rc造".to_string()];
        assert_eq!(
            match_terms(values.iter(), &config.material_terms).as_deref(),
            Some("reinforced_concrete")
        );
    }

    proptest! {
        #[test]
        fn prop_man_yen_expands_by_ten_thousand(whole in 0u32..10_000, tenths in 0u32..10) {
            let text = format!("{whole}.{tenths}万円");
            let expected = Decimal::from(whole * 10 + tenths) * Decimal::from(1_000);
            prop_assert_eq!(parse_man_yen(&text), Some(expected));
        }

        #[test]
        fn prop_station_split_yields_name_and_minutes(name in "[ぁ-ゖ]{1,6}駅", minutes in 0u32..120) {
            let access = locate_station(&format!("{name}歩{minutes}分")).unwrap();
            prop_assert_eq!(access.station, name);
            prop_assert_eq!(access.walk_minutes, Some(f64::from(minutes)));
        }
    }
}
