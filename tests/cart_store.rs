mod common;

use common::{burger, cola, product};
use proptest::prelude::*;
use restaurant_order_api::{models::CartState, services::cart_store::CartStore};
use rust_decimal::Decimal;

#[test]
fn adding_same_product_twice_merges_into_one_line() {
    let mut cart = CartStore::new();
    cart.add(&burger(), None);
    cart.add(&burger(), None);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.total_count(), 2);
}

#[test]
fn totals_follow_added_items() {
    let mut cart = CartStore::new();
    cart.add(&burger(), None);
    cart.add(&burger(), None);
    cart.add(&cola(), None);

    assert_eq!(cart.total_count(), 3);
    assert_eq!(cart.total_price(), Decimal::new(5780, 2));
    let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn negative_quantity_removes_the_item() {
    let mut cart = CartStore::new();
    cart.add(&burger(), None);
    cart.add(&burger(), None);
    cart.add(&cola(), None);

    cart.set_quantity("a", -1);

    assert!(cart.get("a").is_none());
    assert_eq!(cart.total_count(), 1);
    assert_eq!(cart.total_price(), Decimal::new(600, 2));
}

#[test]
fn set_quantity_zero_matches_remove() {
    let mut removed = CartStore::new();
    removed.add(&burger(), Some("no onions"));
    removed.add(&cola(), None);
    let mut zeroed = removed.clone();

    removed.remove("a");
    zeroed.set_quantity("a", 0);

    assert_eq!(removed.items(), zeroed.items());
}

#[test]
fn set_quantity_replaces_instead_of_adding() {
    let mut cart = CartStore::new();
    cart.add(&burger(), None);
    cart.add(&burger(), None);

    cart.set_quantity("a", 5);

    assert_eq!(cart.get("a").map(|i| i.quantity), Some(5));
}

#[test]
fn unknown_products_are_ignored() {
    let mut cart = CartStore::new();
    cart.add(&burger(), None);
    let before = cart.items().to_vec();

    cart.remove("missing");
    cart.set_quantity("missing", 3);
    cart.set_note("missing", "extra cheese");

    assert_eq!(cart.items(), before.as_slice());
}

#[test]
fn notes_latest_wins_and_blank_keeps_previous() {
    let mut cart = CartStore::new();
    cart.add(&burger(), Some("no onions"));
    cart.add(&burger(), None);
    assert_eq!(cart.get("a").and_then(|i| i.note.as_deref()), Some("no onions"));

    cart.add(&burger(), Some(""));
    assert_eq!(cart.get("a").and_then(|i| i.note.as_deref()), Some("no onions"));

    cart.add(&burger(), Some("well done"));
    let item = cart.get("a").expect("burger in cart");
    assert_eq!(item.note.as_deref(), Some("well done"));
    assert_eq!(item.quantity, 4);
}

#[test]
fn set_note_overwrites_and_empty_clears() {
    let mut cart = CartStore::new();
    cart.add(&burger(), Some("no onions"));

    cart.set_note("a", "extra pickles");
    assert_eq!(cart.get("a").and_then(|i| i.note.as_deref()), Some("extra pickles"));

    cart.set_note("a", "");
    assert_eq!(cart.get("a").and_then(|i| i.note.clone()), None);
}

#[test]
fn set_note_with_only_whitespace_clears() {
    let mut cart = CartStore::new();
    cart.add(&burger(), Some("no onions"));

    cart.set_note("a", "   ");
    assert_eq!(cart.get("a").and_then(|i| i.note.clone()), None);

    cart.set_note("a", "\t\n");
    assert_eq!(cart.get("a").and_then(|i| i.note.clone()), None);
}

#[test]
fn line_items_keep_the_price_seen_at_add_time() {
    let mut cart = CartStore::new();
    let mut item = burger();
    cart.add(&item, None);

    item.price = Decimal::new(9990, 2);
    item.name = "Renamed Burger".into();
    cart.add(&item, None);

    let line = cart.get("a").expect("burger in cart");
    assert_eq!(line.name, "Classic Burger");
    assert_eq!(line.price, Decimal::new(2590, 2));
    assert_eq!(cart.total_price(), Decimal::new(5180, 2));
}

#[test]
fn clear_is_idempotent_and_resets_state() {
    let mut cart = CartStore::new();
    assert_eq!(cart.state(), CartState::Empty);

    cart.add(&burger(), None);
    assert_eq!(cart.state(), CartState::NonEmpty);

    cart.clear();
    cart.clear();
    assert_eq!(cart.total_count(), 0);
    assert_eq!(cart.total_price(), Decimal::ZERO);
    assert_eq!(cart.state(), CartState::Empty);
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    SetQuantity(usize, i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize).prop_map(Op::Add),
        (0..4usize).prop_map(Op::Remove),
        (0..4usize, -2..6i64).prop_map(|(i, q)| Op::SetQuantity(i, q)),
    ]
}

proptest! {
    #[test]
    fn totals_always_match_line_items(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let menu = [
            product("p0", "Burger", 2590),
            product("p1", "Fries", 1250),
            product("p2", "Shake", 1875),
            product("p3", "Water", 400),
        ];
        let mut cart = CartStore::new();

        for op in ops {
            match op {
                Op::Add(i) => cart.add(&menu[i], None),
                Op::Remove(i) => cart.remove(&menu[i].id),
                Op::SetQuantity(i, q) => cart.set_quantity(&menu[i].id, q),
            }

            let count: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
            let price: Decimal = cart
                .items()
                .iter()
                .map(|i| i.price * Decimal::from(i.quantity))
                .sum();
            prop_assert_eq!(cart.total_count(), count);
            prop_assert_eq!(cart.total_price(), price);
            prop_assert!(cart.items().iter().all(|i| i.quantity >= 1));

            let mut ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), cart.items().len());
        }
    }
}
