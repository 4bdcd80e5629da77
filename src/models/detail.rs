//! Raw detail API data structures.
//!
//! These mirror the attribute-wrapped, multi-valued shape of the XML
//! payload. They are consumed exactly once by the normalizer and the
//! poll reducer, then discarded.

use std::collections::HashMap;

/// A single attribute-wrapped value node, e.g. `<name type="primary" value="Catan"/>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldNode {
    pub attributes: HashMap<String, String>,
}

impl FieldNode {
    /// Look up an attribute by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// One voteable answer within a poll bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOption {
    pub value: String,
    pub num_votes: u32,
}

/// One labeled option-group within a poll.
///
/// For the player count poll the label is the `numplayers` attribute
/// (e.g. `"4"` or `"4+"`); other polls have a single unlabeled bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollBucket {
    pub num_players: Option<String>,
    pub options: Vec<PollOption>,
}

/// A community-voted multiple-choice attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Poll {
    pub name: String,
    pub title: String,
    pub total_votes: u32,
    pub buckets: Vec<PollBucket>,
}

/// One item from the detail API, still in multi-valued raw form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDetailItem {
    /// Numeric game identifier
    pub game_id: u32,

    /// Recognized multi-valued fields, keyed by element name
    pub fields: HashMap<String, Vec<FieldNode>>,

    /// Poll collection
    pub polls: Vec<Poll>,

    /// Free-text description
    pub description: String,

    /// Full-size image URL
    pub image: Option<String>,
}

impl RawDetailItem {
    /// Minimal stand-in record carrying only the identifier.
    ///
    /// Substituted for every member of a batch whose detail fetch failed.
    pub fn placeholder(game_id: u32) -> Self {
        Self {
            game_id,
            ..Self::default()
        }
    }
}
