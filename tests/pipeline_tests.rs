//! End-to-end pipeline tests against recorded listing markup
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use suumo_scout::application::{FailureStage, RunOutcome, ScrapePipeline};
use suumo_scout::domain::{AssumedAttributes, AttributeOrigin, Floor, SchemaRevision};
use suumo_scout::infrastructure::{AppConfig, FetchError, PageFetcher, PageRequest};

const SEARCH_URL: &str = "https://suumo.jp/jj/chintai/ichiran/FR301FC001/";
const TWO_BLOCKS: &str = include_str!("fixtures/two_blocks.html");
const EDGE_CASES: &str = include_str!("fixtures/edge_cases.html");
const FLAT_CASSETTE: &str = include_str!("fixtures/flat_cassette.html");
const DETAIL_PAGE: &str = include_str!("fixtures/detail_page.html");

/// Serves canned markup by URL and records every request
struct FixtureFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, markup)| ((*url).to_string(), (*markup).to_string()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(request.url.clone());
        self.pages.get(&request.url).cloned().ok_or_else(|| FetchError::Status {
            status: 503,
            url: request.url.clone(),
        })
    }
}

async fn run_single(markup: &str, config: &AppConfig) -> RunOutcome {
    let pipeline = ScrapePipeline::new(FixtureFetcher::new(&[(SEARCH_URL, markup)]), config).unwrap();
    pipeline.run().await
}

#[tokio::test]
async fn two_block_page_yields_one_validated_property() {
    let outcome = run_single(TWO_BLOCKS, &AppConfig::default()).await;

    assert_eq!(outcome.stats.pages_fetched, 1);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.buildings.len(), 2);

    // cheapest building first
    assert_eq!(outcome.buildings[0].title, "コンフォート中野");
    assert_eq!(outcome.buildings[1].title, "リバーサイド目黒");

    assert_eq!(outcome.properties.len(), 1);
    let property = &outcome.properties[0];
    assert_eq!(property.title, "リバーサイド目黒");
    assert_eq!(property.price, Decimal::from(200_000));
    assert_eq!(property.floor_area, Decimal::from(70));
    assert_eq!(property.floor, 3);
    assert_eq!(property.nearest_station, "JR山手線/目黒駅");
    assert_eq!(property.station_distance, 5.0);
    assert_eq!(property.address, "東京都目黒区下目黒1");
    assert_eq!(property.building_material, "reinforced_concrete");
    assert_eq!(property.gas_type, "city_gas");
    assert_eq!(property.attribute_origin, AttributeOrigin::Observed);
    assert_eq!(
        property.url.as_deref(),
        Some("https://suumo.jp/chintai/jnc_000000001/?bc=100001")
    );
    assert_eq!(
        property.image_url.as_deref(),
        Some("https://img01.suumo.com/front/gazo/fr/bukken/001/100001_0001.jpg")
    );

    assert_eq!(outcome.stats.rejections.get("floor_area_too_small"), Some(&1));
}

#[tokio::test]
async fn building_attributes_keep_column_order() {
    let outcome = run_single(TWO_BLOCKS, &AppConfig::default()).await;
    let building = &outcome.buildings[1];

    let keys: Vec<&str> = building.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, ["col1", "col2_1", "col2_2", "col3_1", "col3_2", "col3_3"]);
    assert_eq!(building.attributes["col3_2"], "鉄筋コン 10階建");
    assert_eq!(building.access.len(), 2);
}

#[tokio::test]
async fn zero_unit_buildings_and_skipped_rows_are_reported() {
    let outcome = run_single(EDGE_CASES, &AppConfig::default()).await;

    assert_eq!(outcome.stats.skipped_blocks, 1);
    assert_eq!(outcome.stats.skipped_unit_rows, 2);
    assert_eq!(outcome.buildings.len(), 2);

    let empty = outcome
        .buildings
        .iter()
        .find(|building| building.title == "満室マンション")
        .unwrap();
    assert!(empty.units.is_empty());

    let shibuya = outcome
        .buildings
        .iter()
        .find(|building| building.title == "アーバンコート渋谷")
        .unwrap();
    assert_eq!(shibuya.skipped_unit_rows, 2);
    assert_eq!(shibuya.units.len(), 2);
    assert_eq!(shibuya.units[0].rent, Some(Decimal::new(235_000, 0)));
    assert_eq!(shibuya.units[0].management_fee, None);
    assert_eq!(shibuya.units[1].floor, Some(Floor::unparsed("B1階")));
    assert_eq!(shibuya.units[1].rent, None);
    assert_eq!(shibuya.units[1].area, None);

    // the zero-unit building contributes no rows; the unpriced unit is rejected
    assert_eq!(outcome.properties.len(), 1);
    assert_eq!(outcome.properties[0].title, "アーバンコート渋谷");
    assert_eq!(outcome.stats.rejections.get("missing_price"), Some(&1));
}

#[tokio::test]
async fn flat_cassette_layout_is_detected() {
    let outcome = run_single(FLAT_CASSETTE, &AppConfig::default()).await;

    let building = &outcome.buildings[0];
    assert_eq!(building.schema, SchemaRevision::FlatCassette);
    assert_eq!(building.units.len(), 1);
    assert_eq!(building.units[0].floor, Some(Floor::Level(7)));
    assert_eq!(
        building.units[0].url.as_deref(),
        Some("https://suumo.jp/chintai/jnc_000000020/")
    );

    assert_eq!(outcome.properties.len(), 1);
    assert_eq!(outcome.properties[0].attribute_origin, AttributeOrigin::Assumed);
}

#[tokio::test]
async fn without_assumptions_unobserved_material_is_rejected() {
    let config = AppConfig {
        assumptions: AssumedAttributes::none(),
        ..AppConfig::default()
    };
    let outcome = run_single(FLAT_CASSETTE, &config).await;

    assert!(outcome.properties.is_empty());
    assert_eq!(outcome.stats.rejections.get("missing_building_material"), Some(&1));
}

#[tokio::test]
async fn detail_pages_supply_observed_attributes() {
    let mut config = AppConfig {
        assumptions: AssumedAttributes::none(),
        ..AppConfig::default()
    };
    config.site.fetch_details = true;

    let fetcher = FixtureFetcher::new(&[
        (SEARCH_URL, FLAT_CASSETTE),
        ("https://suumo.jp/chintai/jnc_000000020/", DETAIL_PAGE),
    ]);
    let pipeline = ScrapePipeline::new(fetcher, &config).unwrap();
    let outcome = pipeline.run().await;

    assert_eq!(outcome.stats.detail_pages_fetched, 1);
    assert_eq!(outcome.properties.len(), 1);

    let property = &outcome.properties[0];
    assert_eq!(property.attribute_origin, AttributeOrigin::Observed);
    assert_eq!(property.direction.as_deref(), Some("南"));
    assert_eq!(property.description.as_deref(), Some("南向きの角部屋です。"));
    assert_eq!(property.posted_date.as_deref(), Some("2024/05/01"));
    assert_eq!(
        property.image_url.as_deref(),
        Some("https://img01.suumo.com/front/gazo/fr/bukken/003/detail_main.jpg")
    );
}

#[tokio::test]
async fn detail_pages_are_skipped_for_units_failing_numeric_checks() {
    let mut config = AppConfig::default();
    config.site.fetch_details = true;

    let fetcher = FixtureFetcher::new(&[(SEARCH_URL, TWO_BLOCKS)]);
    let pipeline = ScrapePipeline::new(fetcher, &config).unwrap();
    let outcome = pipeline.run().await;

    // only the 70m² unit is worth a detail request; its page is missing
    assert_eq!(outcome.stats.detail_failures, 1);
    assert_eq!(outcome.stats.detail_pages_fetched, 0);
    assert_eq!(outcome.properties.len(), 1);
}

#[tokio::test]
async fn fetch_failure_reports_status_and_fails_run() {
    let pipeline = ScrapePipeline::new(FixtureFetcher::new(&[]), &AppConfig::default()).unwrap();
    let outcome = pipeline.run().await;

    assert!(outcome.all_fetches_failed());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].stage, FailureStage::Fetch);
    assert_eq!(outcome.failures[0].status, Some(503));
    assert!(outcome.buildings.is_empty());
}

#[tokio::test]
async fn page_without_listing_blocks_is_a_parse_failure() {
    let outcome = run_single("<html><body><p>該当する物件がありません</p></body></html>", &AppConfig::default()).await;

    assert!(!outcome.all_fetches_failed());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].stage, FailureStage::Parse);
    assert!(outcome.buildings.is_empty());
    assert!(outcome.properties.is_empty());
}
