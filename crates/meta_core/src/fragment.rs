use serde_json::{Map, Value};

use crate::metadata::{
    BaseMetadata, JsonLdMetadata, Metadata, OpenGraphMetadata, RawMetadata, TwitterMetadata,
};

/// Partial metadata produced by one plugin.
///
/// Each `Some` key replaces the accumulator's value for that key when merged;
/// `None` leaves it untouched. A well-behaved plugin fills only its own key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataFragment {
    pub base: Option<BaseMetadata>,
    pub open_graph: Option<OpenGraphMetadata>,
    pub twitter: Option<TwitterMetadata>,
    pub json_ld: Option<Vec<JsonLdMetadata>>,
    pub raw: Option<RawMetadata>,
    pub custom: Option<Map<String, Value>>,
}

impl MetadataFragment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_base(base: BaseMetadata) -> Self {
        Self {
            base: Some(base),
            ..Self::default()
        }
    }

    pub fn with_open_graph(open_graph: OpenGraphMetadata) -> Self {
        Self {
            open_graph: Some(open_graph),
            ..Self::default()
        }
    }

    pub fn with_twitter(twitter: TwitterMetadata) -> Self {
        Self {
            twitter: Some(twitter),
            ..Self::default()
        }
    }

    pub fn with_json_ld(json_ld: Vec<JsonLdMetadata>) -> Self {
        Self {
            json_ld: Some(json_ld),
            ..Self::default()
        }
    }

    pub fn with_raw(raw: RawMetadata) -> Self {
        Self {
            raw: Some(raw),
            ..Self::default()
        }
    }

    pub fn with_custom(custom: Map<String, Value>) -> Self {
        Self {
            custom: Some(custom),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Shallow, last-writer-wins merge of one fragment into the accumulator.
///
/// Whole keys are replaced, never deep-merged: a fragment carrying `base`
/// discards every field the accumulator's previous `base` held.
pub fn merge_fragment(mut acc: Metadata, fragment: MetadataFragment) -> Metadata {
    let MetadataFragment {
        base,
        open_graph,
        twitter,
        json_ld,
        raw,
        custom,
    } = fragment;

    if let Some(base) = base {
        acc.base = base;
    }
    if let Some(open_graph) = open_graph {
        acc.open_graph = open_graph;
    }
    if let Some(twitter) = twitter {
        acc.twitter = twitter;
    }
    if let Some(json_ld) = json_ld {
        acc.json_ld = json_ld;
    }
    if raw.is_some() {
        acc.raw = raw;
    }
    if custom.is_some() {
        acc.custom = custom;
    }
    acc
}

/// Folds fragments into `initial` in order; later fragments win conflicts.
pub fn merge_all<I>(initial: Metadata, fragments: I) -> Metadata
where
    I: IntoIterator<Item = MetadataFragment>,
{
    fragments.into_iter().fold(initial, merge_fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragment_leaves_accumulator_alone() {
        let mut acc = Metadata::skeleton(true);
        acc.base.title = Some("kept".into());
        let merged = merge_fragment(acc.clone(), MetadataFragment::empty());
        assert_eq!(merged, acc);
    }

    #[test]
    fn replaced_key_drops_previous_fields() {
        let mut acc = Metadata::skeleton(false);
        acc.base.author = Some("first".into());
        let merged = merge_fragment(
            acc,
            MetadataFragment::with_base(BaseMetadata {
                title: Some("second".into()),
                ..BaseMetadata::default()
            }),
        );
        assert_eq!(merged.base.title.as_deref(), Some("second"));
        assert_eq!(merged.base.author, None);
    }
}
