//! Report projection tests over parsed fixture pages
use chrono::{TimeZone, Utc};
use suumo_scout::application::reporting::{self, ListingReport, ReportBody, ReportMeta, ValidatedReport};
use suumo_scout::application::{DetailIndex, PropertyProjector, ValidationFilter};
use suumo_scout::domain::{AssumedAttributes, Building, ValidatedProperty};
use suumo_scout::infrastructure::{ListingParser, OutputWriter, ParseContext};

const TWO_BLOCKS: &str = include_str!("fixtures/two_blocks.html");

fn meta() -> ReportMeta {
    ReportMeta::new("SUUMO Property Listings", Utc.with_ymd_and_hms(2024, 5, 1, 0, 30, 0).unwrap())
}

fn extract(markup: &str) -> (Vec<Building>, Vec<ValidatedProperty>) {
    let parser = ListingParser::new().unwrap();
    let context = ParseContext::new("https://suumo.jp/jj/chintai/ichiran/FR301FC001/", "https://suumo.jp").unwrap();
    let page = parser.parse_page(markup, &context).unwrap();

    let projector = PropertyProjector::new("suumo", AssumedAttributes::default());
    let filter = ValidationFilter::default();
    let properties = page
        .listings
        .iter()
        .flat_map(|listing| {
            projector
                .project_listing(listing, &DetailIndex::new(), &filter)
                .properties
        })
        .collect();
    let buildings = page.listings.into_iter().map(|listing| listing.building).collect();
    (buildings, properties)
}

#[test]
fn structured_output_is_idempotent() {
    let (first_buildings, first_properties) = extract(TWO_BLOCKS);
    let (second_buildings, second_properties) = extract(TWO_BLOCKS);

    let render = |buildings: &[Building], properties: &[ValidatedProperty]| {
        (
            reporting::json::render(&meta(), ReportBody::Buildings(buildings)).unwrap(),
            reporting::json::render(&meta(), ReportBody::Properties(properties)).unwrap(),
        )
    };

    assert_eq!(
        render(&first_buildings, &first_properties),
        render(&second_buildings, &second_properties)
    );
}

#[test]
fn json_documents_round_trip() {
    let (buildings, properties) = extract(TWO_BLOCKS);

    let listing: ListingReport =
        serde_json::from_str(&reporting::json::render(&meta(), ReportBody::Buildings(&buildings)).unwrap()).unwrap();
    assert_eq!(listing.buildings, buildings);

    let validated: ValidatedReport =
        serde_json::from_str(&reporting::json::render(&meta(), ReportBody::Properties(&properties)).unwrap()).unwrap();
    assert_eq!(validated.properties, properties);
    assert_eq!(validated.generated_at, meta().generated_at);
}

#[test]
fn validated_rows_render_one_card_each() {
    let (buildings, properties) = extract(TWO_BLOCKS);
    assert_eq!(properties.len(), 1);

    let markdown = reporting::markdown::render(&meta(), ReportBody::Properties(&properties));
    assert_eq!(markdown.matches("\n## ").count(), 1);
    assert!(markdown.contains("## リバーサイド目黒"));
    assert!(markdown.contains("- Price: ¥200,000/month"));

    let html = reporting::html::render(&meta(), ReportBody::Properties(&properties));
    assert_eq!(html.matches("class=\"card property\"").count(), 1);

    let html = reporting::html::render(&meta(), ReportBody::Buildings(&buildings));
    assert_eq!(html.matches("class=\"card building\"").count(), 2);
    assert_eq!(html.matches("class=\"card unit\"").count(), 2);
    assert!(html.contains("<dt>Key money</dt><dd>N/A</dd>"));
}

#[tokio::test]
async fn reports_are_written_to_output_directory() {
    let (buildings, properties) = extract(TWO_BLOCKS);
    let temp = tempfile::tempdir().unwrap();
    let writer = OutputWriter::new(temp.path().join("output"));

    let written = reporting::write_reports(&writer, &meta(), &buildings, &properties)
        .await
        .unwrap();

    assert!(written.json.ends_with("suumo_properties.json"));
    assert!(written.markdown.ends_with("suumo_properties.md"));
    assert!(written.html.ends_with("suumo_properties.html"));

    let results_name = written.results.file_name().unwrap().to_string_lossy().to_string();
    assert!(results_name.starts_with("results_"));
    assert!(results_name.ends_with(".json"));
    assert_eq!(results_name.len(), "results_YYYYMMDD_HHMMSS.json".len());

    let results: ValidatedReport = serde_json::from_str(&std::fs::read_to_string(&written.results).unwrap()).unwrap();
    assert_eq!(results.properties.len(), 1);

    // a second run overwrites the building reports in place
    reporting::write_reports(&writer, &meta(), &[], &[]).await.unwrap();
    let listing: ListingReport = serde_json::from_str(&std::fs::read_to_string(&written.json).unwrap()).unwrap();
    assert!(listing.buildings.is_empty());
}
