use serde_json::json;

use super::*;

fn product_from(value: serde_json::Value) -> CatalogProduct {
    serde_json::from_value(value).expect("fixture should decode")
}

fn make_detail() -> CatalogProduct {
    product_from(json!({
        "uid": "abc123",
        "url": "/ski-x",
        "title": "Ski X",
        "display_title": "Ski X Pro",
        "description": "<p>Fast   ski.</p>\n<p>Light.</p>",
        "tagline": "Go fast",
        "updated_product_specs": [
            {"id": "len", "title": "Length", "value": "170cm"},
            {"id": "use", "title": "Usage", "value": ["Race", "Training"]},
            {"id": "", "title": "Orphan", "value": "x"},
            {"id": "blank", "title": "", "value": "y"},
            {"id": "none", "title": "Weight", "value": null}
        ],
        "prices": {"no": "100 NOK", "gb": ""},
        "details": {
            "technology": {"title": "T", "content": "<p>C</p>"},
            "feature_details": [
                {"group_title": "Construction", "group": [
                    {"title": "a", "content": "<b>Wood core</b>"},
                    {"title": "b", "content": "  "}
                ]},
                {"group_title": null, "group": [
                    {"title": "c", "content": "Light"}
                ]}
            ]
        }
    }))
}

// ---------------------------------------------------------------------------
// strip_html
// ---------------------------------------------------------------------------

#[test]
fn strip_html_removes_tags_and_collapses_whitespace() {
    assert_eq!(
        strip_html("<p>Hello   <b>world</b></p>\n\t<br/>again "),
        "Hello world again"
    );
}

#[test]
fn strip_html_empty_input_yields_empty() {
    assert_eq!(strip_html(""), "");
    assert_eq!(strip_html("   "), "");
    assert_eq!(strip_html("<div></div>"), "");
}

#[test]
fn strip_html_is_non_greedy() {
    assert_eq!(strip_html("a<x>b<y>c"), "abc");
}

#[test]
fn strip_html_leaves_text_without_tags_unchanged() {
    assert_eq!(strip_html("5 < 6 and 7 > 3"), "5 3");
    assert_eq!(strip_html("plain text"), "plain text");
}

// ---------------------------------------------------------------------------
// extract_specs
// ---------------------------------------------------------------------------

#[test]
fn extract_specs_keeps_only_specs_with_id_and_title() {
    let specs = extract_specs(&make_detail());
    let ids: Vec<&str> = specs.iter().map(|s| s.spec_id.as_str()).collect();
    assert_eq!(ids, vec!["len", "use", "none"]);
}

#[test]
fn extract_specs_joins_list_values() {
    let specs = extract_specs(&make_detail());
    assert_eq!(specs[0].value.as_deref(), Some("170cm"));
    assert_eq!(specs[1].value.as_deref(), Some("Race, Training"));
    assert_eq!(specs[2].value, None);
}

#[test]
fn extract_specs_handles_missing_field() {
    let product = product_from(json!({"uid": "x"}));
    assert!(extract_specs(&product).is_empty());
}

// ---------------------------------------------------------------------------
// extract_prices
// ---------------------------------------------------------------------------

#[test]
fn extract_prices_copies_all_regions() {
    let prices = extract_prices(&make_detail());
    assert_eq!(prices.len(), 2);
    assert_eq!(prices["no"].as_deref(), Some("100 NOK"));
    assert_eq!(prices["gb"].as_deref(), Some(""));
}

// ---------------------------------------------------------------------------
// extract_technologies
// ---------------------------------------------------------------------------

#[test]
fn extract_technologies_single_object_and_list_are_identical() {
    let single = product_from(json!({
        "details": {"technology": {"title": "T", "content": "<p>C</p>"}}
    }));
    let list = product_from(json!({
        "details": {"technology": [{"title": "T", "content": "<p>C</p>"}]}
    }));

    let from_single = extract_technologies(&single);
    assert_eq!(
        from_single,
        vec![ProductTechnology {
            title: "T".to_string(),
            content: "C".to_string(),
        }]
    );
    assert_eq!(from_single, extract_technologies(&list));
}

#[test]
fn extract_technologies_drops_untitled_entries() {
    let product = product_from(json!({
        "details": {"technology": [
            {"title": "", "content": "x"},
            {"content": "y"},
            {"title": "Skin", "content": null}
        ]}
    }));
    let techs = extract_technologies(&product);
    assert_eq!(techs.len(), 1);
    assert_eq!(techs[0].title, "Skin");
    assert_eq!(techs[0].content, "");
}

#[test]
fn extract_technologies_without_details_is_empty() {
    let product = product_from(json!({"details": null}));
    assert!(extract_technologies(&product).is_empty());
}

// ---------------------------------------------------------------------------
// extract_features
// ---------------------------------------------------------------------------

#[test]
fn extract_features_flattens_groups_and_drops_empty_content() {
    let features = extract_features(&make_detail());
    assert_eq!(
        features,
        vec![
            ProductFeature {
                group_title: Some("Construction".to_string()),
                content: "Wood core".to_string(),
            },
            ProductFeature {
                group_title: None,
                content: "Light".to_string(),
            },
        ]
    );
}

#[test]
fn extract_features_treats_blank_group_title_as_missing() {
    let product = product_from(json!({
        "details": {"feature_details": [
            {"group_title": "", "group": [{"content": "Grip"}]}
        ]}
    }));
    let features = extract_features(&product);
    assert_eq!(features.len(), 1);
    assert!(features[0].group_title.is_none());
}

// ---------------------------------------------------------------------------
// normalize_product
// ---------------------------------------------------------------------------

#[test]
fn normalize_product_maps_root_fields() {
    let product = normalize_product(&make_detail(), "/ski-x").unwrap();
    assert_eq!(product.uid, "abc123");
    assert_eq!(product.title, "Ski X");
    assert_eq!(product.display_title, "Ski X Pro");
    assert_eq!(product.url, "/ski-x");
    assert_eq!(product.description, "Fast ski. Light.");
    assert_eq!(product.tagline.as_deref(), Some("Go fast"));
    assert_eq!(product.specs.len(), 3);
    assert_eq!(product.technologies.len(), 1);
    assert_eq!(product.features.len(), 2);
}

#[test]
fn normalize_product_without_uid_is_missing_uid() {
    let product = product_from(json!({"uid": "  ", "title": "Nameless"}));
    let result = normalize_product(&product, "/nameless");
    assert!(
        matches!(result, Err(CatalogError::MissingUid { ref url }) if url == "/nameless"),
        "expected MissingUid, got: {result:?}"
    );
}

#[test]
fn normalize_product_falls_back_to_requested_url() {
    let product = product_from(json!({"uid": "u1"}));
    let normalized = normalize_product(&product, "/requested").unwrap();
    assert_eq!(normalized.url, "/requested");
    assert_eq!(normalized.title, "");
    assert_eq!(normalized.description, "");
    assert!(normalized.tagline.is_none());
}

#[test]
fn normalize_product_blank_prices_survive_until_storage() {
    let product = normalize_product(&make_detail(), "/ski-x").unwrap();
    let stored: Vec<_> = product
        .storable_prices()
        .into_iter()
        .map(|p| p.region)
        .collect();
    assert_eq!(stored, vec!["no".to_string()]);
}
