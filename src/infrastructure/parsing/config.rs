//! Extraction rule table for SUUMO listing markup
//!
//! Every field is located by an ordered list of CSS selectors; the first
//! selector that matches wins. Unit-level rules are keyed by schema revision
//! so a retired layout keeps working next to the current one.

use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Building-level selectors shared by every revision
    pub listing: ListingSelectors,

    /// Unit rules for the nested unit table layout
    pub unit_table: UnitRules,

    /// Unit rules for the retired flat cassette layout
    pub flat_cassette: UnitRules,

    /// Detail page selectors used by the optional enrichment pass
    pub detail_page: DetailPageSelectors,

    /// Keyword to canonical value mapping for construction material
    pub material_terms: Vec<TermMapping>,

    /// Keyword to canonical value mapping for gas supply
    pub gas_terms: Vec<TermMapping>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            listing: ListingSelectors::default(),
            unit_table: UnitRules::unit_table(),
            flat_cassette: UnitRules::flat_cassette(),
            detail_page: DetailPageSelectors::default(),
            material_terms: vec![
                TermMapping::new("鉄骨鉄筋", "steel_reinforced_concrete"),
                TermMapping::new("SRC造", "steel_reinforced_concrete"),
                TermMapping::new("鉄筋コン", "reinforced_concrete"),
                TermMapping::new("RC造", "reinforced_concrete"),
                TermMapping::new("軽量鉄骨", "light_gauge_steel"),
                TermMapping::new("鉄骨", "steel"),
                TermMapping::new("木造", "wood"),
            ],
            gas_terms: vec![
                TermMapping::new("都市ガス", "city_gas"),
                TermMapping::new("プロパン", "propane"),
                TermMapping::new("LPガス", "propane"),
            ],
        }
    }
}

/// Substring that maps free text onto a canonical attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMapping {
    pub pattern: String,
    pub canonical: String,
}

impl TermMapping {
    pub fn new(pattern: &str, canonical: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            canonical: canonical.to_string(),
        }
    }
}

/// CSS selectors for the building part of a listing block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    /// Selectors for listing block containers - multiple fallbacks
    pub listing_block: Vec<String>,

    /// Selectors for the building name
    pub title: Vec<String>,

    /// Selectors for the street address
    pub address: Vec<String>,

    /// Selectors for the building photo
    pub image: Vec<String>,

    /// Attributes holding the image URL, lazy-load attributes first
    pub image_attributes: Vec<String>,

    /// Selectors for the detail columns (address, access, age...)
    pub detail_column: Vec<String>,

    /// Selectors for the station access column
    pub station_column: Vec<String>,

    /// Column key whose lines carry the construction material
    pub structure_column: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            listing_block: vec![
                "div.cassetteitem".to_string(),
                ".cassetteitem".to_string(),
            ],
            title: vec![
                "div.cassetteitem_content-title".to_string(),
                ".cassetteitem_content-title".to_string(),
            ],
            address: vec![
                "li.cassetteitem_detail-col1".to_string(),
                ".cassetteitem_detail-col1".to_string(),
            ],
            image: vec![
                ".cassetteitem_object-item img".to_string(),
                "img.js-noContextMenu".to_string(),
                ".cassetteitem_object img".to_string(),
            ],
            image_attributes: vec![
                "rel".to_string(),
                "data-src".to_string(),
                "src".to_string(),
            ],
            detail_column: vec![
                "ul.cassetteitem_detail > li".to_string(),
                "li[class*='cassetteitem_detail-col']".to_string(),
            ],
            station_column: vec![
                "li.cassetteitem_detail-col2".to_string(),
                ".cassetteitem_detail-col2".to_string(),
            ],
            structure_column: "col3".to_string(),
        }
    }
}

/// Rules locating the units of a listing block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRules {
    /// Structural probe; a block matching any of these uses this rule set
    pub probe: Vec<String>,

    /// Selectors for unit rows; empty means the block itself is the single unit
    pub row: Vec<String>,

    /// Rows with fewer cells than this are skipped
    pub min_cells: usize,

    /// Zero-based cell holding the floor when no floor selector matches
    pub floor_cell: Option<usize>,

    pub floor: Vec<String>,
    pub rent: Vec<String>,
    pub management_fee: Vec<String>,
    pub security_deposit: Vec<String>,
    pub key_money: Vec<String>,
    pub layout: Vec<String>,
    pub area: Vec<String>,
    pub link: Vec<String>,
}

impl UnitRules {
    pub fn unit_table() -> Self {
        Self {
            probe: vec!["table.cassetteitem_other".to_string()],
            row: vec![
                "table.cassetteitem_other > tbody > tr".to_string(),
                "tr.js-cassette_link".to_string(),
            ],
            min_cells: 6,
            floor_cell: Some(2),
            floor: Vec::new(),
            rent: vec![".cassetteitem_price--rent".to_string()],
            management_fee: vec![".cassetteitem_price--administration".to_string()],
            security_deposit: vec![".cassetteitem_price--deposit".to_string()],
            key_money: vec![".cassetteitem_price--gratuity".to_string()],
            layout: vec![".cassetteitem_madori".to_string()],
            area: vec![".cassetteitem_menseki".to_string()],
            link: vec![
                "a.js-cassette_link_href".to_string(),
                "a.cassetteitem_other-linktext".to_string(),
                "a[href*='/chintai/']".to_string(),
            ],
        }
    }

    pub fn flat_cassette() -> Self {
        Self {
            probe: vec![".cassetteitem_floor".to_string()],
            row: Vec::new(),
            min_cells: 0,
            floor_cell: None,
            floor: vec!["span.cassetteitem_floor".to_string(), ".cassetteitem_floor".to_string()],
            rent: vec!["span.cassetteitem_price--rent".to_string()],
            management_fee: vec![".cassetteitem_price--administration".to_string()],
            security_deposit: vec![".cassetteitem_price--deposit".to_string()],
            key_money: vec![".cassetteitem_price--gratuity".to_string()],
            layout: vec![".cassetteitem_madori".to_string()],
            area: vec!["span.cassetteitem_menseki".to_string()],
            link: vec!["a.js-cassette_link".to_string(), "a[href*='/chintai/']".to_string()],
        }
    }
}

impl Default for UnitRules {
    fn default() -> Self {
        Self::unit_table()
    }
}

/// CSS selectors for property detail pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailPageSelectors {
    pub description: Vec<String>,
    pub image: Vec<String>,

    /// Rows of label/value tables
    pub info_row: Vec<String>,

    pub direction_label: String,
    pub structure_label: String,
    pub posted_date_label: String,
}

impl Default for DetailPageSelectors {
    fn default() -> Self {
        Self {
            description: vec![
                "div.property_view_note".to_string(),
                ".property_view_note-list".to_string(),
            ],
            image: vec![
                "img.property_view_object--item".to_string(),
                ".property_view_object img".to_string(),
            ],
            info_row: vec![
                "table.property_view_table tr".to_string(),
                "table.data_table tr".to_string(),
                ".property_data tr".to_string(),
            ],
            direction_label: "向き".to_string(),
            structure_label: "構造".to_string(),
            posted_date_label: "情報更新日".to_string(),
        }
    }
}
