//! Legislative life-cycle tracking.
//!
//! A bill moves through a fixed sequence of milestones: first and second
//! reading and a third-reading vote in its origin chamber, the same three in
//! the crossover chamber, then transmission to the governor and enactment.
//! [`current_stage`] replays a bill's action list through that state machine
//! and reports how far it got and which action moved it last. Notifications
//! fire when a fresh replay lands on a different milestone than the stored
//! action list did.

use crate::types::{ActionTag, BillAction, BillMetadata, Notification};

/// How far along the statutory pipeline a bill has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleStage {
    Introduced,
    OriginFirstReading,
    OriginSecondReading,
    OriginPassed,
    CrossoverFirstReading,
    CrossoverSecondReading,
    CrossoverPassed,
    SentToGovernor,
    Law,
}

impl LifecycleStage {
    /// The next stage when `tag` is the milestone this stage is waiting for.
    fn advance(self, tag: ActionTag) -> Option<Self> {
        use LifecycleStage::*;
        match (self, tag) {
            (Introduced, ActionTag::FirstReading) => Some(OriginFirstReading),
            (OriginFirstReading, ActionTag::SecondReading) => Some(OriginSecondReading),
            (OriginSecondReading, ActionTag::ThirdReadingPassed) => Some(OriginPassed),
            (OriginPassed, ActionTag::FirstReading) => Some(CrossoverFirstReading),
            (CrossoverFirstReading, ActionTag::SecondReading) => Some(CrossoverSecondReading),
            (CrossoverSecondReading, ActionTag::ThirdReadingPassed) => Some(CrossoverPassed),
            (CrossoverPassed, ActionTag::SentToGovernor) => Some(SentToGovernor),
            (SentToGovernor, ActionTag::PublicAct) => Some(Law),
            _ => None,
        }
    }

    /// Bills become publicly visible once they clear their origin chamber.
    pub fn is_viewable(self) -> bool {
        self >= Self::OriginPassed
    }
}

/// The action that last advanced the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedStep {
    pub tag: ActionTag,
    pub chamber: String,
}

/// Result of replaying an action list through the life cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSnapshot {
    pub stage: LifecycleStage,
    /// `None` when no action has advanced the machine yet.
    pub matched: Option<MatchedStep>,
}

/// Replay `actions` in order, advancing on each matching milestone.
/// Non-milestone actions are skipped without resetting progress.
pub fn current_stage(actions: &[BillAction]) -> StageSnapshot {
    let mut stage = LifecycleStage::Introduced;
    let mut matched = None;
    for action in actions {
        if let Some(next) = stage.advance(action.tag) {
            stage = next;
            matched = Some(MatchedStep {
                tag: action.tag,
                chamber: action.chamber.clone(),
            });
        }
    }
    StageSnapshot { stage, matched }
}

/// Compare the stored and freshly scraped action lists and produce a
/// notification when the bill reached a new milestone. A fresh list that
/// matches nothing yields no notification, even if the stored list did.
pub fn notification_for(
    metadata: &BillMetadata,
    old_actions: &[BillAction],
    new_actions: &[BillAction],
) -> Option<Notification> {
    let after = current_stage(new_actions).matched?;
    let changed = match current_stage(old_actions).matched {
        None => true,
        Some(before) => before.tag != after.tag || before.chamber != after.chamber,
    };
    if !changed {
        return None;
    }
    Some(Notification {
        bill_info: metadata.clone(),
        text: notification_text(&after, metadata),
    })
}

fn notification_text(step: &MatchedStep, metadata: &BillMetadata) -> String {
    // The prefix follows the chamber the milestone happened in, not the
    // chamber the bill originated in.
    let prefix = if step.chamber == "Senate" { "SB" } else { "HB" };
    let phrase = match step.tag {
        ActionTag::FirstReading => format!("Arrived in {}", step.chamber),
        ActionTag::SecondReading => format!("Debating in {}", step.chamber),
        ActionTag::ThirdReadingPassed => format!("Passed in {}", step.chamber),
        ActionTag::SentToGovernor => "Passed both chambers and waiting for governor".to_string(),
        ActionTag::PublicAct => "Bill passed into law!".to_string(),
        _ => String::new(),
    };
    format!("Bill {}{} update: {}", prefix, metadata.number, phrase)
}

/// Which expensive follow-up fetches a batch of new actions calls for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshFlags {
    pub full_text: bool,
    pub votes: bool,
}

/// Inspect the actions appended since the last sync (`actions[previous_len..]`)
/// and decide what needs re-fetching.
pub fn refresh_flags(previous_len: usize, actions: &[BillAction]) -> RefreshFlags {
    let mut flags = RefreshFlags::default();
    for action in actions.iter().skip(previous_len) {
        match action.tag {
            ActionTag::AmendmentAdopted => flags.full_text = true,
            ActionTag::ThirdReadingPassed | ActionTag::ThirdReadingFailed => {
                // TODO: a third-reading vote should trigger a roll-call
                // refresh here; today votes are only fetched the first time
                // a bill is seen.
            }
            _ => {}
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chamber;

    fn action(tag: ActionTag, chamber: &str) -> BillAction {
        BillAction {
            date: Some(0),
            chamber: chamber.to_string(),
            description: String::new(),
            tag,
        }
    }

    fn metadata() -> BillMetadata {
        BillMetadata {
            assembly: 101,
            chamber: Chamber::Senate,
            number: 42,
            url: "https://example.gov/BillStatus.asp?DocNum=42".to_string(),
        }
    }

    #[test]
    fn walks_the_full_pipeline_to_law() {
        let actions = vec![
            action(ActionTag::FirstReading, "Senate"),
            action(ActionTag::SecondReading, "Senate"),
            action(ActionTag::ThirdReadingPassed, "Senate"),
            action(ActionTag::FirstReading, "House"),
            action(ActionTag::SecondReading, "House"),
            action(ActionTag::ThirdReadingPassed, "House"),
            action(ActionTag::SentToGovernor, "House"),
            action(ActionTag::PublicAct, "House"),
        ];
        let snapshot = current_stage(&actions);
        assert_eq!(snapshot.stage, LifecycleStage::Law);
        assert!(snapshot.stage.is_viewable());
        assert_eq!(
            snapshot.matched,
            Some(MatchedStep {
                tag: ActionTag::PublicAct,
                chamber: "House".to_string(),
            })
        );
    }

    #[test]
    fn skips_actions_that_are_not_milestones() {
        let actions = vec![
            action(ActionTag::FirstReading, "Senate"),
            action(ActionTag::CommitteeAssigned, "Senate"),
            action(ActionTag::CommitteeDebate, "Senate"),
            action(ActionTag::SecondReading, "Senate"),
            action(ActionTag::Other, "Senate"),
        ];
        assert_eq!(current_stage(&actions).stage, LifecycleStage::OriginSecondReading);
    }

    #[test]
    fn out_of_order_milestones_do_not_advance() {
        // A second reading before any first reading leaves the bill where
        // it started.
        let actions = vec![action(ActionTag::SecondReading, "Senate")];
        let snapshot = current_stage(&actions);
        assert_eq!(snapshot.stage, LifecycleStage::Introduced);
        assert_eq!(snapshot.matched, None);

        // A repeated first reading is ignored rather than regressing.
        let actions = vec![
            action(ActionTag::FirstReading, "Senate"),
            action(ActionTag::FirstReading, "Senate"),
        ];
        assert_eq!(current_stage(&actions).stage, LifecycleStage::OriginFirstReading);
    }

    #[test]
    fn viewable_once_the_origin_chamber_passes_the_bill() {
        let mut actions = vec![
            action(ActionTag::FirstReading, "Senate"),
            action(ActionTag::SecondReading, "Senate"),
        ];
        assert!(!current_stage(&actions).stage.is_viewable());

        actions.push(action(ActionTag::ThirdReadingPassed, "Senate"));
        assert!(current_stage(&actions).stage.is_viewable());
    }

    #[test]
    fn first_milestone_produces_a_notification() {
        let old = vec![];
        let new = vec![action(ActionTag::FirstReading, "House")];
        let notification = notification_for(&metadata(), &old, &new).unwrap();
        assert_eq!(notification.text, "Bill HB42 update: Arrived in House");
    }

    #[test]
    fn unchanged_milestone_is_silent() {
        let actions = vec![
            action(ActionTag::FirstReading, "Senate"),
            action(ActionTag::SecondReading, "Senate"),
        ];
        assert_eq!(notification_for(&metadata(), &actions, &actions), None);
    }

    #[test]
    fn crossover_reading_notifies_with_the_new_chamber() {
        let old = vec![
            action(ActionTag::FirstReading, "Senate"),
            action(ActionTag::SecondReading, "Senate"),
            action(ActionTag::ThirdReadingPassed, "Senate"),
        ];
        let mut new = old.clone();
        new.push(action(ActionTag::FirstReading, "House"));
        let notification = notification_for(&metadata(), &old, &new).unwrap();
        assert_eq!(notification.text, "Bill HB42 update: Arrived in House");
    }

    #[test]
    fn governor_and_enactment_phrases() {
        let passed = vec![
            action(ActionTag::FirstReading, "Senate"),
            action(ActionTag::SecondReading, "Senate"),
            action(ActionTag::ThirdReadingPassed, "Senate"),
            action(ActionTag::FirstReading, "House"),
            action(ActionTag::SecondReading, "House"),
            action(ActionTag::ThirdReadingPassed, "House"),
        ];
        let mut sent = passed.clone();
        sent.push(action(ActionTag::SentToGovernor, "House"));
        let notification = notification_for(&metadata(), &passed, &sent).unwrap();
        assert_eq!(
            notification.text,
            "Bill HB42 update: Passed both chambers and waiting for governor"
        );

        let mut law = sent.clone();
        law.push(action(ActionTag::PublicAct, "Senate"));
        let notification = notification_for(&metadata(), &sent, &law).unwrap();
        assert_eq!(notification.text, "Bill SB42 update: Bill passed into law!");
    }

    #[test]
    fn a_fresh_list_matching_nothing_is_silent() {
        let old = vec![action(ActionTag::FirstReading, "Senate")];
        let new = vec![action(ActionTag::Other, "Senate")];
        assert_eq!(notification_for(&metadata(), &old, &new), None);
    }

    #[test]
    fn amendments_in_the_new_tail_request_full_text() {
        let actions = vec![
            action(ActionTag::FirstReading, "Senate"),
            action(ActionTag::AmendmentAdopted, "Senate"),
            action(ActionTag::SecondReading, "Senate"),
        ];
        // The amendment is in the already-synced prefix.
        assert_eq!(refresh_flags(2, &actions), RefreshFlags::default());
        // The amendment is newly appended.
        assert_eq!(
            refresh_flags(1, &actions),
            RefreshFlags { full_text: true, votes: false }
        );
    }

    #[test]
    fn third_reading_votes_do_not_request_a_roll_call_refresh() {
        let actions = vec![
            action(ActionTag::FirstReading, "Senate"),
            action(ActionTag::ThirdReadingPassed, "Senate"),
        ];
        assert_eq!(refresh_flags(1, &actions), RefreshFlags::default());
    }
}
