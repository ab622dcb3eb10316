use meta_core::{JsonLdMetadata, MetadataFragment, ScraperOptions};
use scrape_logging::scrape_debug;
use serde_json::Value;

use crate::dom::{element_text, DomError, HtmlDocument};
use crate::plugins::Plugin;
use crate::PluginError;

const NAME: &str = "json-ld";

/// Collects `<script type="application/ld+json">` entities in document order.
///
/// A script whose body is not valid JSON contributes nothing; the rest of the
/// page is still read.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLdPlugin;

#[async_trait::async_trait]
impl Plugin for JsonLdPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn extract(
        &self,
        html: &str,
        _options: &ScraperOptions,
    ) -> Result<MetadataFragment, PluginError> {
        let entries = extract_json_ld(html).map_err(|err| PluginError::dom(NAME, err))?;
        Ok(MetadataFragment::with_json_ld(entries))
    }
}

fn extract_json_ld(html: &str) -> Result<Vec<JsonLdMetadata>, DomError> {
    let doc = HtmlDocument::parse(html);
    let mut entries = Vec::new();
    for (index, script) in doc
        .select_all(r#"script[type="application/ld+json"]"#)?
        .iter()
        .enumerate()
    {
        match parse_json_ld(&element_text(script)) {
            Ok(parsed) => entries.extend(parsed),
            Err(err) => scrape_debug!("skipping malformed json-ld script #{index}: {err}"),
        }
    }
    Ok(entries)
}

/// Parses one script body into its entities.
///
/// A top-level array contributes each of its objects, an object carrying an
/// `@graph` array contributes the graph members, and any other object is a
/// single entity. Blank input is zero entities.
pub fn parse_json_ld(content: &str) -> Result<Vec<JsonLdMetadata>, serde_json::Error> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries = match serde_json::from_str::<Value>(content)? {
        Value::Array(items) => objects(items),
        Value::Object(object) => match object.get("@graph") {
            Some(Value::Array(graph)) => objects(graph.clone()),
            _ => vec![object],
        },
        _ => Vec::new(),
    };
    Ok(entries)
}

fn objects(values: Vec<Value>) -> Vec<JsonLdMetadata> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_json_ld;

    #[test]
    fn blank_script_is_empty() {
        assert!(parse_json_ld("  \n ").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_json_ld("{invalid json}").is_err());
    }

    #[test]
    fn array_members_are_spread_and_scalars_dropped() {
        let entries = parse_json_ld(r#"[{"@type":"A"}, 3, {"@type":"B"}]"#).unwrap();
        let types: Vec<_> = entries.iter().map(|e| e["@type"].as_str()).collect();
        assert_eq!(types, vec![Some("A"), Some("B")]);
    }

    #[test]
    fn non_array_graph_keeps_object_whole() {
        let entries = parse_json_ld(r#"{"@type":"A","@graph":{"x":1}}"#).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains_key("@graph"));
    }
}
