//! Property-based invariant tests for the flexbox playground.
//!
//! Verifies, for any sequence of add/remove/click/edit operations:
//! 1. The item count equals initial + adds - effective removes, never below 0
//! 2. Item ids are strictly increasing and never reused
//! 3. At most one item carries the selected class, and it is the selection
//! 4. The item snippet is visible exactly when an item is selected
//! 5. Item controls are disabled exactly when nothing is selected
//! 6. Every solution toggled twice ends where it started
//! 7. Clicking an unselected item twice renders the same as clearing the selection

use css_playground::controls::EventKind;
use css_playground::dom::{Document, SnippetSlot, Surface, Target};
use css_playground::playground::{ClickTarget, FlexController};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove,
    Click(u32),
    Background,
    Grow(u8),
    Gap(u8),
    Reset,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        3 => Just(Op::Remove),
        4 => (1u32..12).prop_map(Op::Click),
        1 => Just(Op::Background),
        2 => (0u8..5).prop_map(Op::Grow),
        1 => (0u8..=50).prop_map(Op::Gap),
        1 => Just(Op::Reset),
    ]
}

fn apply(flex: &mut FlexController, op: &Op) {
    match op {
        Op::Add => {
            flex.add_item();
        }
        Op::Remove => {
            flex.remove_item();
        }
        Op::Click(id) => flex.select_item(ClickTarget::Item(*id)),
        Op::Background => flex.select_item(ClickTarget::Background),
        Op::Grow(n) => flex
            .handle_control_event("flex-grow", EventKind::Input, n.to_string().into())
            .unwrap(),
        Op::Gap(n) => flex
            .handle_control_event("gap", EventKind::Input, n.to_string().into())
            .unwrap(),
        Op::Reset => flex.reset_playground(),
    }
}

proptest! {
    #[test]
    fn item_count_tracks_adds_and_removes(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut flex = FlexController::default();
        let mut expected = flex.item_count();
        for op in &ops {
            match op {
                Op::Add => expected += 1,
                Op::Remove => expected = expected.saturating_sub(1),
                _ => {}
            }
            apply(&mut flex, op);
            prop_assert_eq!(flex.item_count(), expected);
        }
    }

    #[test]
    fn ids_are_increasing_and_never_reused(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut flex = FlexController::default();
        let mut issued: Vec<u32> = flex.item_ids();
        for op in &ops {
            if matches!(op, Op::Add) {
                let id = flex.add_item();
                prop_assert!(id.is_some());
                let id = id.unwrap_or_default();
                prop_assert!(!issued.contains(&id));
                issued.push(id);
            } else {
                apply(&mut flex, op);
            }
            let ids = flex.item_ids();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn selection_is_consistent(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut flex = FlexController::default();
        let mut doc = Document::new();
        for op in &ops {
            apply(&mut flex, op);
            doc.apply_all(&flex.render());

            let marked: Vec<u32> = doc
                .item_ids()
                .into_iter()
                .filter(|id| doc.element(&Target::Item(*id)).has_class("selected"))
                .collect();
            prop_assert!(marked.len() <= 1);
            prop_assert_eq!(marked.first().copied(), flex.selected());

            let selected = flex.selected().is_some();
            prop_assert_eq!(doc.element(&Target::Snippet(SnippetSlot::Item)).visible, selected);
            prop_assert_eq!(flex.item_snippet().is_some(), selected);
            prop_assert!(flex.item_controls().iter().all(|c| c.disabled != selected));
        }
    }

    #[test]
    fn solution_toggle_twice_is_identity(index in 0usize..4, start_visible in any::<bool>()) {
        let mut flex = FlexController::default();
        if start_visible {
            flex.toggle_solution(index);
        }
        let before = flex.render();
        flex.toggle_solution(index);
        flex.toggle_solution(index);
        prop_assert_eq!(flex.render(), before);
    }

    #[test]
    fn double_select_matches_deselect(
        ops in prop::collection::vec(arb_op(), 0..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut clicked = FlexController::default();
        let mut cleared = FlexController::default();
        for op in &ops {
            apply(&mut clicked, op);
            apply(&mut cleared, op);
        }

        let candidates: Vec<u32> = clicked
            .item_ids()
            .into_iter()
            .filter(|id| clicked.selected() != Some(*id))
            .collect();
        prop_assume!(!candidates.is_empty());
        let id = *pick.get(&candidates);

        clicked.select_item(ClickTarget::Item(id));
        clicked.select_item(ClickTarget::Item(id));
        cleared.deselect_all_items(true);

        prop_assert_eq!(clicked.selected(), None);
        prop_assert_eq!(clicked.render(), cleared.render());
    }
}
