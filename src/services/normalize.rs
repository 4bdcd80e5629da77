// src/services/normalize.rs

//! Field normalization.
//!
//! Converts the raw multi-valued, attribute-wrapped detail fields into
//! typed scalars and sequences, and selects the locale-variant name.

use crate::models::{FieldNode, LinkRef, NO_CHINESE_NAME, RawDetailItem};
use crate::services::detail::RECOGNIZED_FIELDS;

/// Typed rendition of the recognized detail fields.
///
/// Absent raw fields stay absent (empty sequences).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedFields {
    pub name: Vec<String>,
    pub chinese_name: Option<String>,
    pub yearpublished: Vec<i64>,
    pub minplayers: Vec<i64>,
    pub maxplayers: Vec<i64>,
    pub playingtime: Vec<i64>,
    pub minplaytime: Vec<i64>,
    pub maxplaytime: Vec<i64>,
    pub minage: Vec<i64>,
    pub link: Vec<LinkRef>,
}

impl NormalizedFields {
    /// Chinese name when one was detected, else the sentinel.
    pub fn chinese_name_or_default(&self) -> String {
        self.chinese_name
            .clone()
            .unwrap_or_else(|| NO_CHINESE_NAME.to_string())
    }

    /// Chinese name when one was detected, else the primary name.
    pub fn default_name(&self) -> Option<&str> {
        self.chinese_name
            .as_deref()
            .or_else(|| self.name.first().map(String::as_str))
    }
}

/// Normalize the recognized multi-valued fields of one raw detail item.
///
/// The Chinese-script scan examines every name variant, not just the
/// primary one; the first match wins.
pub fn normalize_fields(item: &RawDetailItem) -> NormalizedFields {
    // The parser only admits recognized field names; anything else here
    // is a programming error upstream.
    debug_assert!(
        item.fields.keys().all(|k| RECOGNIZED_FIELDS.contains(&k.as_str())),
        "unrecognized detail field in {:?}",
        item.fields.keys().collect::<Vec<_>>()
    );

    let mut out = NormalizedFields::default();

    for field in RECOGNIZED_FIELDS {
        let Some(nodes) = item.fields.get(*field) else {
            continue;
        };
        match *field {
            "name" => {
                for node in nodes {
                    let Some(value) = node.attr("value") else {
                        continue;
                    };
                    if out.chinese_name.is_none() && contains_chinese(value) {
                        out.chinese_name = Some(value.to_string());
                    }
                    out.name.push(value.to_string());
                }
            }
            "link" => {
                out.link = nodes.iter().map(link_from_node).collect();
            }
            "yearpublished" => out.yearpublished = numeric_values(field, nodes),
            "minplayers" => out.minplayers = numeric_values(field, nodes),
            "maxplayers" => out.maxplayers = numeric_values(field, nodes),
            "playingtime" => out.playingtime = numeric_values(field, nodes),
            "minplaytime" => out.minplaytime = numeric_values(field, nodes),
            "maxplaytime" => out.maxplaytime = numeric_values(field, nodes),
            "minage" => out.minage = numeric_values(field, nodes),
            _ => unreachable!("field list and match arms are kept in sync"),
        }
    }

    out
}

/// Link nodes pass through as `{type, id, value}` triples, no coercion.
fn link_from_node(node: &FieldNode) -> LinkRef {
    LinkRef {
        link_type: node.attr("type").unwrap_or_default().to_string(),
        id: node.attr("id").unwrap_or_default().to_string(),
        value: node.attr("value").unwrap_or_default().to_string(),
    }
}

/// Coerce value attributes to numbers; anything unparseable is dropped
/// from the sequence with a warning.
fn numeric_values(field: &str, nodes: &[FieldNode]) -> Vec<i64> {
    nodes
        .iter()
        .filter_map(|node| node.attr("value"))
        .filter_map(|value| match value.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                log::warn!("Dropping non-numeric {field} value '{value}'");
                None
            }
        })
        .collect()
}

/// True when the text uses Chinese script (CJK ideograph ranges).
pub fn contains_chinese(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
            | '\u{3400}'..='\u{4DBF}'   // Extension A
            | '\u{F900}'..='\u{FAFF}'   // Compatibility Ideographs
            | '\u{20000}'..='\u{2A6DF}' // Extension B
        )
    })
}
