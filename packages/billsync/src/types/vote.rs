//! Roll-call vote records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single legislator's recorded position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteCode {
    #[serde(rename = "Y")]
    Yea,
    #[serde(rename = "N")]
    Nay,
    #[serde(rename = "E")]
    Excused,
    #[serde(rename = "NV")]
    NotVoting,
    #[serde(rename = "P")]
    Present,
}

impl VoteCode {
    /// Parse a roll-call token. Anything outside the closed code set is not
    /// a vote marker.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Y" => Some(VoteCode::Yea),
            "N" => Some(VoteCode::Nay),
            "E" => Some(VoteCode::Excused),
            "NV" => Some(VoteCode::NotVoting),
            "P" => Some(VoteCode::Present),
            _ => None,
        }
    }
}

/// One roll call: every legislator's position for a single vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillVoteEvent {
    /// Chamber label from the vote listing, lowercased
    pub chamber: String,

    /// Legislator name to recorded position; last occurrence wins for
    /// duplicated names
    pub votes: HashMap<String, VoteCode>,
}
