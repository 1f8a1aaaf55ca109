use super::*;

fn spec(id: &str, title: &str, value: Option<&str>) -> ProductSpec {
    ProductSpec {
        spec_id: id.to_string(),
        title: title.to_string(),
        value: value.map(str::to_string),
    }
}

fn price(region: &str, amount: &str) -> ProductPrice {
    ProductPrice {
        region: region.to_string(),
        price: amount.to_string(),
    }
}

fn technology(title: &str, content: &str) -> ProductTechnology {
    ProductTechnology {
        title: title.to_string(),
        content: content.to_string(),
    }
}

fn feature(group: Option<&str>, content: &str) -> ProductFeature {
    ProductFeature {
        group_title: group.map(str::to_string),
        content: content.to_string(),
    }
}

fn make_record() -> ProductRecord {
    ProductRecord {
        uid: "test-uid".to_string(),
        title: "Test Product".to_string(),
        display_title: "Test Product Display".to_string(),
        url: "/test-product".to_string(),
        description: Some("Test description".to_string()),
        tagline: Some("Test tagline".to_string()),
        specs: vec![
            spec("test-spec-1", "Test Spec 1", Some("Test value 1")),
            spec("test-spec-2", "Test Spec 2", Some("Test value 2")),
        ],
        prices: vec![price("no", "100 NOK"), price("se", "100 SEK")],
        technologies: vec![
            technology("Test Technology 1", "Test technology content 1"),
            technology("Test Technology 2", "Test technology content 2"),
        ],
        features: vec![
            feature(Some("Test Feature Group 1"), "Test feature content 1"),
            feature(Some("Test Feature Group 1"), "Test feature content 2"),
            feature(Some("Test Feature Group 2"), "Test feature content 3"),
        ],
    }
}

fn bare_record() -> ProductRecord {
    ProductRecord {
        uid: "abc123".to_string(),
        title: "Ski X".to_string(),
        display_title: "Ski X".to_string(),
        url: "/ski-x".to_string(),
        description: None,
        tagline: None,
        specs: vec![],
        prices: vec![],
        technologies: vec![],
        features: vec![],
    }
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

#[test]
fn format_specs_last_value_wins_in_first_seen_order() {
    let specs = vec![
        spec("a", "Length", Some("160cm")),
        spec("b", "Flex", Some("Soft")),
        spec("c", "Length", Some("170cm")),
    ];
    assert_eq!(
        format_specs(&specs).as_deref(),
        Some("Length: 170cm; Flex: Soft")
    );
}

#[test]
fn format_specs_skips_titles_whose_last_value_is_empty() {
    let specs = vec![
        spec("a", "Length", Some("170cm")),
        spec("b", "Length", None),
        spec("c", "Flex", Some("")),
    ];
    assert_eq!(format_specs(&specs), None);
}

#[test]
fn format_prices_uppercases_region() {
    let prices = vec![price("no", "100 NOK"), price("se", "100 SEK")];
    assert_eq!(
        format_prices(&prices).as_deref(),
        Some("NO: 100 NOK; SE: 100 SEK")
    );
}

#[test]
fn format_technologies_uses_bare_title_without_content() {
    let techs = vec![technology("Carbon", "Light"), technology("Base", "")];
    assert_eq!(
        format_technologies(&techs).as_deref(),
        Some("Carbon: Light | Base")
    );
}

#[test]
fn format_features_defaults_missing_group_to_general() {
    let features = vec![
        feature(None, "Light"),
        feature(Some("Core"), "Wood"),
        feature(Some(""), "Fast"),
    ];
    assert_eq!(
        format_features(&features).as_deref(),
        Some("General: Light, Fast | Core: Wood")
    );
}

#[test]
fn empty_collections_have_no_summary() {
    assert_eq!(format_specs(&[]), None);
    assert_eq!(format_prices(&[]), None);
    assert_eq!(format_technologies(&[]), None);
    assert_eq!(format_features(&[]), None);
}

// ---------------------------------------------------------------------------
// Plain text
// ---------------------------------------------------------------------------

#[test]
fn render_text_contains_all_labeled_lines_in_order() {
    let text = render_text(&make_record());
    let expected = [
        "Product: Test Product Display",
        "Tagline: Test tagline",
        "URL: /test-product",
        "UID: test-uid",
        "Description: Test description",
        "Specifications: Test Spec 1: Test value 1; Test Spec 2: Test value 2",
        "Prices: NO: 100 NOK; SE: 100 SEK",
        "Technology: Test Technology 1: Test technology content 1 | Test Technology 2: Test technology content 2",
        "Features: Test Feature Group 1: Test feature content 1, Test feature content 2 | Test Feature Group 2: Test feature content 3",
    ];
    assert_eq!(text, expected.join("\n"));
}

#[test]
fn render_text_omits_absent_sections() {
    let text = render_text(&bare_record());
    assert_eq!(text, "Product: Ski X\nURL: /ski-x\nUID: abc123");
}

// ---------------------------------------------------------------------------
// Markdown
// ---------------------------------------------------------------------------

#[test]
fn render_markdown_emits_heading_per_section() {
    let md = render_markdown(&make_record());
    assert!(md.starts_with("# Test Product Display\n*Test tagline*\n\n**URL:** /test-product\n**UID:** test-uid\n\n"));
    assert!(md.contains("## Description\nTest description\n"));
    assert!(md.contains("## Specifications\n- Test Spec 1: Test value 1\n- Test Spec 2: Test value 2\n"));
    assert!(md.contains("## Prices\n- NO: 100 NOK\n- SE: 100 SEK\n"));
    assert!(md.contains("## Technology\n- Test Technology 1: Test technology content 1\n"));
    assert!(md.contains(
        "## Features\n- Test Feature Group 1: Test feature content 1, Test feature content 2\n- Test Feature Group 2: Test feature content 3\n"
    ));
}

#[test]
fn render_markdown_keeps_separator_characters_inside_entries() {
    let mut record = bare_record();
    record.specs = vec![spec("a", "Sizes", Some("170; 180"))];
    let md = render_markdown(&record);
    assert!(md.contains("- Sizes: 170; 180\n"), "got: {md}");
}

#[test]
fn render_markdown_skips_empty_sections() {
    let md = render_markdown(&bare_record());
    assert_eq!(md, "# Ski X\n\n**URL:** /ski-x\n**UID:** abc123\n");
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[test]
fn formatted_product_serializes_all_summaries() {
    let formatted = FormattedProduct::from_record(&make_record());
    let value = serde_json::to_value(&formatted).unwrap();
    assert_eq!(value["uid"], "test-uid");
    assert_eq!(value["display_title"], "Test Product Display");
    assert_eq!(value["prices_text"], "NO: 100 NOK; SE: 100 SEK");
    assert_eq!(value["tagline"], "Test tagline");
    assert_eq!(
        value["formatted_text"].as_str().unwrap(),
        render_text(&make_record())
    );
}

#[test]
fn formatted_product_uses_null_for_missing_summaries() {
    let formatted = FormattedProduct::from_record(&bare_record());
    let value = serde_json::to_value(&formatted).unwrap();
    assert!(value["specs_text"].is_null());
    assert!(value["description"].is_null());
}
