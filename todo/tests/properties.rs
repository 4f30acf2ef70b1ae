//! Property tests for list transitions over random request sequences

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use std::collections::HashSet;
use todo::{TextPolicy, TodoAction, TodoEnvironment, TodoId, TodoList, TodoStore};

fn action_strategy() -> impl Strategy<Value = TodoAction> {
    prop_oneof![
        "[a-z ]{0,8}".prop_map(|text| TodoAction::Add { text }),
        (0_u64..12).prop_map(|id| TodoAction::Toggle { id: TodoId::new(id) }),
        (0_u64..12).prop_map(|id| TodoAction::Remove { id: TodoId::new(id) }),
        Just(TodoAction::Unrecognized),
    ]
}

fn run(actions: &[TodoAction]) -> Vec<TodoList> {
    let mut lists = vec![TodoList::new()];
    for action in actions {
        let next = lists.last().unwrap().apply(action);
        lists.push(next);
    }
    lists
}

proptest! {
    #[test]
    fn ids_are_always_unique(actions in prop::collection::vec(action_strategy(), 0..40)) {
        for list in run(&actions) {
            let ids = list.ids();
            let unique: HashSet<_> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }
    }

    #[test]
    fn issued_ids_strictly_increase(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut issued = Vec::new();
        for window in run(&actions).windows(2) {
            if window[1].len() > window[0].len() {
                issued.push(window[1].last().unwrap().id);
            }
        }
        prop_assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(issued.iter().all(|id| *id > TodoId::SEED));
    }

    #[test]
    fn transitions_do_not_touch_their_input(actions in prop::collection::vec(action_strategy(), 1..40)) {
        let mut current = TodoList::new();
        for action in &actions {
            let copy: Vec<_> = current.iter().cloned().collect();
            let next = current.apply(action);
            prop_assert_eq!(current.iter().cloned().collect::<Vec<_>>(), copy);
            current = next;
        }
    }

    #[test]
    fn surviving_items_keep_relative_order(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let lists = run(&actions);
        for window in lists.windows(2) {
            let after: HashSet<_> = window[1].ids().into_iter().collect();
            let kept: Vec<_> = window[0].ids().into_iter().filter(|id| after.contains(id)).collect();
            let prefix: Vec<_> = window[1].ids().into_iter().take(kept.len()).collect();
            prop_assert_eq!(kept, prefix);
        }
    }

    #[test]
    fn toggle_changes_exactly_one_flag(actions in prop::collection::vec(action_strategy(), 0..20), pick in 0_usize..20) {
        let list = run(&actions).pop().unwrap();
        prop_assume!(!list.is_empty());
        let target = list.ids()[pick % list.len()];

        let toggled = list.toggle(target);
        let changed = list
            .iter()
            .zip(toggled.iter())
            .filter(|(before, after)| before.completed != after.completed)
            .count();
        prop_assert_eq!(changed, 1);
        prop_assert_eq!(toggled.toggle(target), list);
    }

    #[test]
    fn store_never_admits_blank_text(texts in prop::collection::vec("[ \t]{0,4}|[a-z]{1,4}", 0..20)) {
        let mut store = TodoStore::with_environment(
            TodoEnvironment::new().with_policy(TextPolicy::RejectBlank),
        );
        for text in texts {
            store.add(text);
        }
        prop_assert!(store.snapshot().iter().all(|item| !item.text.trim().is_empty()));
    }
}
