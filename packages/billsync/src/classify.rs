//! Action description classification.
//!
//! Free-text action descriptions are mapped onto [`ActionTag`]s by an ordered
//! rule table. The first rule whose needles all appear in the description
//! wins, so earlier rules shadow later ones ("Added as Alternate Chief
//! Co-Sponsor" is a co-sponsor addition, not a third-reading event). Rules
//! with a refinement own their description outright: when no inner needle
//! matches, the result is [`ActionTag::Other`] rather than a later rule.

use crate::types::ActionTag;

enum Outcome {
    Tag(ActionTag),
    /// Inner first-match lookup. Claims the description even on no match.
    Refine(&'static [(&'static str, ActionTag)]),
}

struct Rule {
    requires: &'static [&'static str],
    outcome: Outcome,
}

const RULES: &[Rule] = &[
    Rule {
        requires: &["Assigned to"],
        outcome: Outcome::Tag(ActionTag::CommitteeAssigned),
    },
    Rule {
        requires: &["Effective Date"],
        outcome: Outcome::Tag(ActionTag::EffectiveDate),
    },
    Rule {
        requires: &["Arrived in"],
        outcome: Outcome::Refine(&[
            ("House", ActionTag::ArrivedInHouse),
            ("Senate", ActionTag::ArrivedInSenate),
        ]),
    },
    Rule {
        requires: &["Added as", "Sponsor"],
        outcome: Outcome::Tag(ActionTag::CoSponsorAdded),
    },
    Rule {
        requires: &["Placed on Calendar Order of 3rd Reading"],
        outcome: Outcome::Tag(ActionTag::ThirdReadingScheduled),
    },
    Rule {
        requires: &["Do Pass"],
        outcome: Outcome::Tag(ActionTag::CommitteeDebate),
    },
    Rule {
        requires: &["Alternate Chief"],
        outcome: Outcome::Tag(ActionTag::SponsorRemoved),
    },
    Rule {
        requires: &["Fiscal Note Requested"],
        outcome: Outcome::Tag(ActionTag::FiscalNoteRequested),
    },
    Rule {
        requires: &["Passed Both Houses"],
        outcome: Outcome::Tag(ActionTag::PassedBothChambers),
    },
    Rule {
        requires: &["Sent", "Governor"],
        outcome: Outcome::Tag(ActionTag::SentToGovernor),
    },
    Rule {
        requires: &["Governor Approved"],
        outcome: Outcome::Tag(ActionTag::GovernorApproved),
    },
    Rule {
        requires: &["Public Act"],
        outcome: Outcome::Tag(ActionTag::PublicAct),
    },
    Rule {
        requires: &["Third Reading"],
        outcome: Outcome::Refine(&[
            ("Passed", ActionTag::ThirdReadingPassed),
            ("Failed", ActionTag::ThirdReadingFailed),
        ]),
    },
    Rule {
        requires: &["Amendment", "Adopted"],
        outcome: Outcome::Tag(ActionTag::AmendmentAdopted),
    },
    Rule {
        requires: &["First Reading"],
        outcome: Outcome::Tag(ActionTag::FirstReading),
    },
    Rule {
        requires: &["Second Reading"],
        outcome: Outcome::Tag(ActionTag::SecondReading),
    },
];

/// Classify one action description.
pub fn classify(description: &str) -> ActionTag {
    for rule in RULES {
        if rule.requires.iter().all(|needle| description.contains(needle)) {
            return match &rule.outcome {
                Outcome::Tag(tag) => *tag,
                Outcome::Refine(inner) => inner
                    .iter()
                    .find(|(needle, _)| description.contains(needle))
                    .map(|(_, tag)| *tag)
                    .unwrap_or(ActionTag::Other),
            };
        }
    }
    ActionTag::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_each_rule() {
        let cases = [
            ("Assigned to Education", ActionTag::CommitteeAssigned),
            ("Effective Date January 1, 2022", ActionTag::EffectiveDate),
            ("Arrived in House", ActionTag::ArrivedInHouse),
            ("Arrived in Senate", ActionTag::ArrivedInSenate),
            ("Added as Co-Sponsor Rep. Jane Doe", ActionTag::CoSponsorAdded),
            (
                "Placed on Calendar Order of 3rd Reading - Short Debate",
                ActionTag::ThirdReadingScheduled,
            ),
            ("Do Pass / Short Debate Education Committee", ActionTag::CommitteeDebate),
            ("Removed as Alternate Chief Sponsor", ActionTag::SponsorRemoved),
            ("Fiscal Note Requested by Rep. John Roe", ActionTag::FiscalNoteRequested),
            ("Passed Both Houses", ActionTag::PassedBothChambers),
            ("Sent to the Governor", ActionTag::SentToGovernor),
            ("Governor Approved", ActionTag::GovernorApproved),
            ("Public Act . . . . . . . 101-0001", ActionTag::PublicAct),
            ("Third Reading - Passed; 112-000-000", ActionTag::ThirdReadingPassed),
            ("Third Reading - Failed; 041-070-000", ActionTag::ThirdReadingFailed),
            ("House Floor Amendment No. 2 Adopted", ActionTag::AmendmentAdopted),
            ("First Reading", ActionTag::FirstReading),
            ("Second Reading", ActionTag::SecondReading),
            ("Referred to Rules Committee", ActionTag::Other),
        ];
        for (description, expected) in cases {
            assert_eq!(classify(description), expected, "{description}");
        }
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        // "Added as" + "Sponsor" outranks the alternate-chief rule.
        assert_eq!(
            classify("Added as Alternate Chief Co-Sponsor Rep. Jane Doe"),
            ActionTag::CoSponsorAdded
        );
        // "Assigned to" outranks everything below it.
        assert_eq!(
            classify("Assigned to Third Reading Calendar"),
            ActionTag::CommitteeAssigned
        );
    }

    #[test]
    fn refinement_claims_the_description() {
        // "Arrived in" matched but neither chamber did, so the description
        // never reaches the first-reading rule further down.
        assert_eq!(classify("Arrived in Assembly, First Reading"), ActionTag::Other);
        assert_eq!(classify("Third Reading - Postponed"), ActionTag::Other);
    }

    #[test]
    fn unknown_descriptions_fall_through_to_other() {
        assert_eq!(classify("Motion Filed to Reconsider Vote"), ActionTag::Other);
        assert_eq!(classify(""), ActionTag::Other);
    }
}
