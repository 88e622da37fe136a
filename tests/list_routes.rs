use std::collections::HashSet;

use alarm_routing::{AlarmsList, ListRoute, RowRoute};
use proptest::prelude::*;

mod test_utils;
use test_utils::*;

#[derive(Clone, Debug)]
enum Op {
    Add,
    Delete(usize),
    DeleteUnknown,
    OpenRow(usize, u8),
    RowButton(usize, u8),
    Cancel,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0..8usize).prop_map(Op::Delete),
        Just(Op::DeleteUnknown),
        (0..8usize, 0..2u8).prop_map(|(i, a)| Op::OpenRow(i, a)),
        (0..8usize, 0..5u8).prop_map(|(i, b)| Op::RowButton(i, b)),
        Just(Op::Cancel),
    ]
}

fn apply(list: &AlarmsList, op: &Op) {
    let nth = |i: usize| {
        let rows = list.rows();
        (!rows.is_empty()).then(|| rows[i % rows.len()].clone())
    };
    match op {
        Op::Add => {
            list.add_button_tapped();
            list.save_draft();
        }
        Op::Delete(i) => {
            if let Some(row) = nth(*i) {
                list.delete(row.id());
            }
        }
        Op::DeleteUnknown => list.delete(id(u128::MAX)),
        Op::OpenRow(i, a) => {
            if let Some(row) = nth(*i) {
                let route = if *a == 0 {
                    RowRoute::DeleteAlert
                } else {
                    RowRoute::ToggleConfirmationDialog
                };
                list.open_row_route(row.id(), route);
            }
        }
        Op::RowButton(i, b) => {
            if let Some(row) = nth(*i) {
                match *b {
                    0 => row.delete_button_tapped(),
                    1 => row.delete_confirmation_button_tapped(),
                    2 => row.toggle_button_tapped(),
                    3 => row.set_edit_navigation(true),
                    _ => row.cancel_button_tapped(),
                }
            }
        }
        Op::Cancel => list.cancel_button_tapped(),
    }
}

fn check_invariants(list: &AlarmsList) -> Result<(), TestCaseError> {
    let ids = list.ids();
    let unique: HashSet<_> = ids.iter().collect();
    prop_assert_eq!(unique.len(), ids.len());

    let route = list.route();
    if let Some(id) = route.as_ref().and_then(ListRoute::row_id) {
        prop_assert!(ids.contains(&id));
    }
    for row in list.rows() {
        let expected = match &route {
            Some(ListRoute::Items { id, route }) if *id == row.id() => Some(route.clone()),
            _ => None,
        };
        prop_assert_eq!(row.route().get(), expected);
    }
    Ok(())
}

proptest! {
    /// Ids stay unique and the list route never names a missing row, whatever happens.
    #[test]
    fn prop_routes_stay_consistent(ops in prop::collection::vec(arb_op(), 0..40)) {
        let list = AlarmsList::new([item(1, false), item(2, true)], env(100));
        for op in &ops {
            apply(&list, op);
            check_invariants(&list)?;
        }
    }
}

#[test]
fn deleting_routed_row_clears_route() {
    let list = AlarmsList::new([item(1, false), item(2, false)], env(100));
    list.row(id(2)).unwrap().toggle_button_tapped();
    assert_eq!(list.route().and_then(|r| r.row_id()), Some(id(2)));
    list.delete(id(2));
    assert_eq!(list.route(), None);
}

#[test]
fn toggle_twice_is_identity() {
    let list = AlarmsList::new([item(1, true)], env(100));
    let row = list.row(id(1)).unwrap();
    for _ in 0..2 {
        row.toggle_button_tapped();
        row.toggle_confirmation_button_tapped();
    }
    assert!(row.item().get().is_on);
}

#[test]
fn row_route_round_trip_through_list() {
    let list = AlarmsList::new([item(1, false)], env(100));
    let row = list.row(id(1)).unwrap();
    row.delete_button_tapped();
    assert_eq!(
        list.route(),
        Some(ListRoute::Items {
            id: id(1),
            route: RowRoute::DeleteAlert,
        })
    );
    list.cancel_button_tapped();
    assert_eq!(row.route().get(), None);
}
