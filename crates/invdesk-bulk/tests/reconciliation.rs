//! Reconciliation never guesses which records disappeared.

use std::collections::BTreeSet;

use invdesk_bulk::{ReconciliationPolicy, classify};
use invdesk_model::{BulkResponse, BulkTarget, RecordId};
use invdesk_selection::SelectionStore;
use proptest::prelude::*;

fn requested() -> impl Strategy<Value = BTreeSet<RecordId>> {
    prop::collection::btree_set(
        (1u32..10_000).prop_map(|n| RecordId::new(n.to_string()).unwrap()),
        1..30,
    )
}

fn selected(ids: &BTreeSet<RecordId>) -> SelectionStore {
    let mut store = SelectionStore::default();
    store.select_all_on_current_page(ids.iter().cloned());
    store
}

proptest! {
    #[test]
    fn mismatched_count_clears_and_refreshes(ids in requested(), count in 0u64..64) {
        prop_assume!(count != ids.len() as u64);
        let response = BulkResponse { removed: Some(count), ..BulkResponse::default() };
        let result = classify(BulkTarget::Ids(ids.clone()), &response).unwrap();
        let mut store = selected(&ids);

        let outcome = ReconciliationPolicy::new().apply(&result, &mut store);

        prop_assert!(result.ambiguous);
        prop_assert!(store.is_empty());
        prop_assert!(outcome.refresh);
        prop_assert_eq!(outcome.discarded, 0);
    }

    #[test]
    fn listed_ids_are_the_only_ones_dropped(ids in requested(), keep in any::<prop::sample::Index>()) {
        let all: Vec<RecordId> = ids.iter().cloned().collect();
        let split = keep.index(all.len() + 1);
        let removed: Vec<RecordId> = all[..split].to_vec();
        let response = BulkResponse { removed_ids: Some(removed.clone()), ..BulkResponse::default() };
        let result = classify(BulkTarget::Ids(ids.clone()), &response).unwrap();
        let mut store = selected(&ids);

        let outcome = ReconciliationPolicy::new().apply(&result, &mut store);

        let expected: BTreeSet<RecordId> = all[split..].iter().cloned().collect();
        prop_assert_eq!(store.explicit_ids(), &expected);
        prop_assert_eq!(outcome.discarded, split);
        prop_assert_eq!(outcome.refresh, split < all.len());
    }
}

#[test]
fn matching_count_confirms_every_id() {
    let ids: BTreeSet<RecordId> = ["5", "9"].iter().map(|v| RecordId::new(*v).unwrap()).collect();
    let response = BulkResponse {
        removed: Some(2),
        ..BulkResponse::default()
    };
    let result = classify(BulkTarget::Ids(ids.clone()), &response).unwrap();
    let mut store = selected(&ids);

    let outcome = ReconciliationPolicy::new().apply(&result, &mut store);

    assert!(store.is_empty());
    assert!(!outcome.refresh);
}
