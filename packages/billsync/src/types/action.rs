//! Legislative actions and their semantic tags.

use serde::{Deserialize, Serialize};

/// Closed set of semantic stages an action description can map to.
///
/// Produced by [`crate::classify::classify`]; `Other` is the catch-all for
/// descriptions no rule claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionTag {
    /// Referred to a committee ("Assigned to ...")
    CommitteeAssigned,
    /// Effective date recorded
    EffectiveDate,
    /// Bill arrived in the House
    ArrivedInHouse,
    /// Bill arrived in the Senate
    ArrivedInSenate,
    /// A co-sponsor was added
    CoSponsorAdded,
    /// Scheduled for a third-reading vote
    ThirdReadingScheduled,
    /// Committee recommended passage ("Do Pass")
    CommitteeDebate,
    /// An alternate chief sponsor change removed a sponsor
    SponsorRemoved,
    /// Fiscal note requested
    FiscalNoteRequested,
    /// Passed both chambers
    PassedBothChambers,
    /// Sent to the governor
    SentToGovernor,
    /// Governor approved
    GovernorApproved,
    /// Enacted as a public act
    PublicAct,
    /// Third reading passed
    ThirdReadingPassed,
    /// Third reading failed
    ThirdReadingFailed,
    /// An amendment was adopted
    AmendmentAdopted,
    /// First reading
    FirstReading,
    /// Second reading
    SecondReading,
    /// No rule matched
    Other,
}

/// One row of a bill's action table, in published (chronological) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAction {
    /// Action date in UTC epoch milliseconds; None when the published date
    /// could not be parsed
    pub date: Option<i64>,

    /// Legislative body exactly as published ("House", "Senate", ...)
    pub chamber: String,

    /// Raw action description
    pub description: String,

    /// Semantic tag derived from the description
    pub tag: ActionTag,
}
