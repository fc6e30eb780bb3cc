//! Property-based tests for history store ordering and lookups.
//!
//! For any sequence of appends the list is newest first with unique ids,
//! deletes remove exactly one record, and search agrees with a plain
//! case-insensitive filter.

use proptest::prelude::*;
use sitewright::database::MemorySlotStorage;
use sitewright::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use sitewright::types::artifact::Artifact;
use sitewright::types::history::HistoryUpdate;
use std::collections::HashSet;

/// Non-blank prompts from a small alphabet so searches get real hits.
fn arb_prompt() -> impl Strategy<Value = String> {
    "[a-cA-C][a-cA-C ]{0,11}"
}

/// Store with a frozen clock, forcing every id through the collision path.
fn frozen_store() -> HistoryManager {
    HistoryManager::new(Box::new(MemorySlotStorage::new())).with_clock(|| 1_000)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn appends_are_listed_newest_first(prompts in prop::collection::vec(arb_prompt(), 1..15)) {
        let mut store = frozen_store();
        for (i, prompt) in prompts.iter().enumerate() {
            store.append(prompt, Artifact::new(i.to_string(), "", "")).unwrap();
        }

        let listed = store.list();
        prop_assert_eq!(listed.len(), prompts.len());

        let expected: Vec<&String> = prompts.iter().rev().collect();
        let actual: Vec<&String> = listed.iter().map(|r| &r.prompt).collect();
        prop_assert_eq!(actual, expected);

        let ids: HashSet<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(ids.len(), listed.len());
    }

    #[test]
    fn delete_removes_exactly_one(
        prompts in prop::collection::vec(arb_prompt(), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut store = frozen_store();
        for prompt in &prompts {
            store.append(prompt, Artifact::default()).unwrap();
        }
        let before = store.list();
        let victim = before[pick.index(before.len())].clone();

        prop_assert!(store.delete(&victim.id).unwrap());

        let after = store.list();
        prop_assert_eq!(after.len(), before.len() - 1);
        prop_assert!(after.iter().all(|r| r.id != victim.id));
        let survivors: Vec<_> = before.into_iter().filter(|r| r.id != victim.id).collect();
        prop_assert_eq!(after, survivors);
    }

    #[test]
    fn search_matches_case_insensitive_filter(
        prompts in prop::collection::vec(arb_prompt(), 0..12),
        query in "[a-cA-C]{1,3}",
    ) {
        let mut store = frozen_store();
        for prompt in &prompts {
            store.append(prompt, Artifact::default()).unwrap();
        }

        let needle = query.to_lowercase();
        let expected: Vec<String> = store
            .list()
            .into_iter()
            .filter(|r| r.prompt.to_lowercase().contains(&needle))
            .map(|r| r.id)
            .collect();
        let actual: Vec<String> = store.search(&query).into_iter().map(|r| r.id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn update_moves_record_to_head(
        prompts in prop::collection::vec(arb_prompt(), 2..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut store = frozen_store();
        for prompt in &prompts {
            store.append(prompt, Artifact::default()).unwrap();
        }
        let before = store.list();
        let target = before[pick.index(before.len())].clone();

        let update = HistoryUpdate { js: Some("edited".into()), ..Default::default() };
        store.update(&target.id, update).unwrap().unwrap();

        let after = store.list();
        prop_assert_eq!(after.len(), before.len());
        prop_assert_eq!(&after[0].id, &target.id);
        prop_assert_eq!(after[0].code.js.as_str(), "edited");

        let rest_before: Vec<&str> = before.iter().filter(|r| r.id != target.id).map(|r| r.id.as_str()).collect();
        let rest_after: Vec<&str> = after[1..].iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(rest_after, rest_before);
    }
}
