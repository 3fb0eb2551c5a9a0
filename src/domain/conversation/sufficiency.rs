//! Slot-sufficiency gate.
//!
//! Each create intent declares a required-slot policy: a primary
//! identifying slot plus a minimum count across a pool, rather than
//! all-or-nothing. Missing optional slots are filled with defaults
//! downstream; a missing primary slot always yields a clarification.

use super::intent::Intent;
use super::slots::{Slot, SlotKind};

/// Declarative sufficiency policy for one intent.
struct SufficiencyPolicy {
    intent: Intent,
    /// The slot that must be present for the action to identify its record.
    primary: SlotKind,
    /// Pool of slots counted toward the threshold, in clarification order.
    pool: &'static [SlotKind],
    /// Minimum number of pool slots that must be present.
    min_count: usize,
}

const CAMPAIGN_POOL: [SlotKind; 4] = [
    SlotKind::CampaignName,
    SlotKind::AudienceGroup,
    SlotKind::TemplateName,
    SlotKind::SchedulePhrase,
];

const TEMPLATE_POOL: [SlotKind; 1] = [SlotKind::TemplateName];

const POLICIES: [SufficiencyPolicy; 2] = [
    SufficiencyPolicy {
        intent: Intent::CreateCampaign,
        primary: SlotKind::CampaignName,
        pool: &CAMPAIGN_POOL,
        min_count: 3,
    },
    SufficiencyPolicy {
        intent: Intent::CreateTemplate,
        primary: SlotKind::TemplateName,
        pool: &TEMPLATE_POOL,
        min_count: 1,
    },
];

/// Outcome of evaluating an intent's slots against its policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sufficiency {
    /// Enough slots are present to build an action.
    Sufficient,
    /// Pool slots still needed, in declared order, excluding known ones.
    Missing(Vec<SlotKind>),
    /// The intent has no slot requirements.
    NotApplicable,
}

/// Evaluates whether the extracted slots satisfy the intent's policy.
pub fn evaluate(intent: Intent, slots: &[Slot]) -> Sufficiency {
    let policy = match POLICIES.iter().find(|p| p.intent == intent) {
        Some(policy) => policy,
        None => return Sufficiency::NotApplicable,
    };

    let present = |kind: SlotKind| slots.iter().any(|s| s.kind == kind);
    let have = policy.pool.iter().filter(|k| present(**k)).count();

    if present(policy.primary) && have >= policy.min_count {
        Sufficiency::Sufficient
    } else {
        let missing = policy
            .pool
            .iter()
            .copied()
            .filter(|k| !present(*k))
            .collect();
        Sufficiency::Missing(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(kind: SlotKind) -> Slot {
        Slot::new(kind, "value", 0.9, "span")
    }

    #[test]
    fn campaign_with_three_of_four_is_sufficient() {
        let slots = vec![
            slot(SlotKind::CampaignName),
            slot(SlotKind::AudienceGroup),
            slot(SlotKind::TemplateName),
        ];
        assert_eq!(
            evaluate(Intent::CreateCampaign, &slots),
            Sufficiency::Sufficient
        );
    }

    #[test]
    fn campaign_with_only_name_lists_remaining_three() {
        let slots = vec![slot(SlotKind::CampaignName)];
        assert_eq!(
            evaluate(Intent::CreateCampaign, &slots),
            Sufficiency::Missing(vec![
                SlotKind::AudienceGroup,
                SlotKind::TemplateName,
                SlotKind::SchedulePhrase,
            ])
        );
    }

    #[test]
    fn campaign_with_no_slots_lists_all_four() {
        assert_eq!(
            evaluate(Intent::CreateCampaign, &[]),
            Sufficiency::Missing(CAMPAIGN_POOL.to_vec())
        );
    }

    #[test]
    fn campaign_without_primary_is_insufficient_even_at_threshold() {
        // Three of four present, but the identifying name is absent.
        let slots = vec![
            slot(SlotKind::AudienceGroup),
            slot(SlotKind::TemplateName),
            slot(SlotKind::SchedulePhrase),
        ];
        assert_eq!(
            evaluate(Intent::CreateCampaign, &slots),
            Sufficiency::Missing(vec![SlotKind::CampaignName])
        );
    }

    #[test]
    fn template_needs_only_its_name() {
        let slots = vec![slot(SlotKind::TemplateName)];
        assert_eq!(
            evaluate(Intent::CreateTemplate, &slots),
            Sufficiency::Sufficient
        );
        assert_eq!(
            evaluate(Intent::CreateTemplate, &[]),
            Sufficiency::Missing(vec![SlotKind::TemplateName])
        );
    }

    #[test]
    fn list_intents_have_no_policy() {
        assert_eq!(
            evaluate(Intent::ShowCampaigns, &[]),
            Sufficiency::NotApplicable
        );
        assert_eq!(evaluate(Intent::Greeting, &[]), Sufficiency::NotApplicable);
    }
}
