use meta_core::{
    merge_all, post_process, BaseMetadata, Metadata, MetadataFragment, OpenGraphMetadata,
    RawMetadata, ScraperOptions, TwitterMetadata,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

fn og_titled(title: &str) -> MetadataFragment {
    MetadataFragment::with_open_graph(OpenGraphMetadata {
        title: Some(title.to_string()),
        ..OpenGraphMetadata::default()
    })
}

#[test]
fn skeleton_is_total_and_raw_is_opt_in() {
    let plain = Metadata::skeleton(false);
    assert_eq!(plain.base, BaseMetadata::default());
    assert!(plain.json_ld.is_empty());
    assert!(plain.raw.is_none());
    assert!(plain.custom.is_none());

    let with_raw = Metadata::skeleton(true);
    assert_eq!(with_raw.raw, Some(RawMetadata::default()));
}

#[test]
fn later_fragment_wins_same_key() {
    let merged = merge_all(
        Metadata::skeleton(false),
        vec![og_titled("first"), og_titled("second")],
    );
    assert_eq!(merged.open_graph.title.as_deref(), Some("second"));
}

#[test]
fn disjoint_fragments_compose() {
    let twitter = MetadataFragment::with_twitter(TwitterMetadata {
        card: Some("summary".into()),
        ..TwitterMetadata::default()
    });
    let mut entity = Map::new();
    entity.insert("@type".into(), Value::from("Article"));
    let json_ld = MetadataFragment::with_json_ld(vec![entity.clone()]);

    let merged = merge_all(Metadata::skeleton(false), vec![og_titled("og"), twitter, json_ld]);
    assert_eq!(merged.open_graph.title.as_deref(), Some("og"));
    assert_eq!(merged.twitter.card.as_deref(), Some("summary"));
    assert_eq!(merged.json_ld, vec![entity]);
}

#[test]
fn custom_bucket_is_replaced_not_merged() {
    let first = MetadataFragment::with_custom(json_map(json!({"a": 1, "b": 2})));
    let second = MetadataFragment::with_custom(json_map(json!({"c": 3})));
    let merged = merge_all(Metadata::skeleton(false), vec![first, second]);
    assert_eq!(merged.custom, Some(json_map(json!({"c": 3}))));
}

#[test]
fn post_process_normalizes_and_truncates_base() {
    let base = BaseMetadata {
        title: Some("  A \n\t Title  ".into()),
        description: Some(format!("  {}   tail", "word ".repeat(30))),
        image: Some("http://example.com/a.png".into()),
        ..BaseMetadata::default()
    };
    let merged = merge_all(
        Metadata::skeleton(false),
        vec![MetadataFragment::with_base(base)],
    );
    let options = ScraperOptions {
        max_description_length: 20,
        ..ScraperOptions::default()
    };
    let processed = post_process(merged, &options);

    assert_eq!(processed.base.title.as_deref(), Some("A Title"));
    assert_eq!(
        processed.base.description.as_deref(),
        Some("word word word word...")
    );
    assert_eq!(processed.base.image.as_deref(), Some("https://example.com/a.png"));
}

#[test]
fn metadata_serializes_with_camel_case_keys() {
    let mut metadata = Metadata::skeleton(false);
    metadata.base.canonical_url = Some("https://example.com".into());
    metadata.open_graph.site_name = Some("Site".into());
    metadata.open_graph.og_type = Some("article".into());

    let value = serde_json::to_value(&metadata).unwrap();
    assert_eq!(
        value,
        json!({
            "base": {"canonicalUrl": "https://example.com"},
            "openGraph": {"siteName": "Site", "type": "article"},
            "twitter": {},
            "jsonLd": []
        })
    );
}

fn json_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}
