use cardboxapp::model::{IngredientEntry, Recipe, SortKey};
use cardboxapp::text::{
    format_ingredients, format_instructions, parse_ingredients, parse_instructions,
};
use cardboxapp::view::{compare, text_cmp};
use chrono::NaiveDate;
use proptest::prelude::*;
use std::cmp::Ordering;

// ── Ingredient text ─────────────────────────────────────────────────────

fn item() -> impl Strategy<Value = String> {
    "[a-z0-9]([a-z0-9 ]{0,10}[a-z0-9])?"
}

fn group() -> impl Strategy<Value = IngredientEntry> {
    (
        "([A-Za-z]([A-Za-z -]{0,8}[A-Za-z])?)?",
        prop::collection::vec(item(), 1..5),
    )
        .prop_map(|(name, items)| IngredientEntry::group(name, items))
}

/// Standalone items can only come before the first group.
fn entries() -> impl Strategy<Value = Vec<IngredientEntry>> {
    (
        prop::collection::vec(item(), 0..5),
        prop::collection::vec(group(), 0..4),
    )
        .prop_map(|(items, groups)| {
            items
                .into_iter()
                .map(IngredientEntry::Item)
                .chain(groups)
                .collect()
        })
}

/// Arbitrary lines, including stray markers and blank lines.
fn raw_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[-a-z ]{0,8}", 0..12).prop_map(|lines| lines.join("\n"))
}

// ── Records for sorting ─────────────────────────────────────────────────

fn sort_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn recipe() -> impl Strategy<Value = Recipe> {
    (
        "[a-c]{1,2}",
        "[aAbB]{0,2}",
        prop::option::of("[xXy]{0,1}"),
        prop::option::of("[mM]{1}"),
        prop::option::of(0i64..3),
        prop::option::of(0u32..3),
    )
        .prop_map(|(id, title, provider, reference, page, day)| {
            let mut recipe = Recipe::new(title, "1");
            recipe.id = id;
            recipe.provider = provider;
            recipe.reference = reference;
            recipe.page_number = page;
            recipe.created_at = day.and_then(|d| NaiveDate::from_ymd_opt(2024, 3, 1 + d));
            recipe
        })
}

proptest! {
    #[test]
    fn formatted_ingredients_reparse_to_same_entries(entries in entries()) {
        let text = format_ingredients(&entries);
        prop_assert_eq!(parse_ingredients(&text), entries);
    }

    #[test]
    fn parsed_ingredients_survive_a_format_round_trip(text in raw_text()) {
        let parsed = parse_ingredients(&text);
        prop_assert_eq!(parse_ingredients(&format_ingredients(&parsed)), parsed);
    }

    #[test]
    fn instruction_steps_round_trip(
        steps in prop::collection::vec("[a-z0-9]([a-z0-9 .,]{0,12}[a-z0-9.])?", 0..8)
    ) {
        prop_assert_eq!(parse_instructions(&format_instructions(&steps)), steps);
    }

    #[test]
    fn compare_is_antisymmetric(a in recipe(), b in recipe(), key in sort_key()) {
        prop_assert_eq!(compare(&a, &b, key), compare(&b, &a, key).reverse());
    }

    #[test]
    fn compare_is_transitive(
        a in recipe(),
        b in recipe(),
        c in recipe(),
        key in sort_key()
    ) {
        let le = |x: &Recipe, y: &Recipe| compare(x, y, key) != Ordering::Greater;
        if le(&a, &b) && le(&b, &c) {
            prop_assert!(le(&a, &c));
        }
        if compare(&a, &b, key) == Ordering::Equal && compare(&b, &c, key) == Ordering::Equal {
            prop_assert_eq!(compare(&a, &c, key), Ordering::Equal);
        }
    }

    #[test]
    fn same_reference_and_page_order_by_title(
        a in recipe(),
        title in "[aAbB]{0,2}",
        id in "[a-c]{1,2}"
    ) {
        let mut b = a.clone();
        b.title = title;
        b.id = id;
        let expected = text_cmp(&a.title, &b.title).then_with(|| a.id.cmp(&b.id));
        prop_assert_eq!(compare(&a, &b, SortKey::Source), expected);
    }
}
