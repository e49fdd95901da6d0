//! Chain resolution, override, and aggregation tests

use std::sync::Arc;

use chrono::NaiveDate;
use heredity::value::tag;
use heredity::{Accessor, Heritage, InMemory, Key, Value};
use num_bigint::BigInt;

use crate::helpers::{Entity, SEO, seo_chain};

#[test]
fn test_global_set_then_get() {
    let global = Accessor::global(Arc::new(InMemory::new()));
    global.set("title", "Title").expect("Set should succeed");
    let value = global
        .get("title")
        .expect("Get should succeed")
        .expect("Value should be present");
    assert_eq!(value, "Title");
}

#[test]
fn test_missing_everywhere_is_none() {
    let chain = seo_chain();
    let value = chain
        .storefront
        .seo()
        .get("nonexistent")
        .expect("Get should succeed");
    assert!(value.is_none(), "Unwritten name resolves to None, not error");
}

#[test]
fn test_each_kind_round_trips_through_storage() {
    let global = Accessor::global(Arc::new(InMemory::new()));
    let date = NaiveDate::from_ymd_opt(2026, 8, 4).expect("Valid date");
    let cases: Vec<(&str, Value)> = vec![
        ("text", Value::from("Some Title")),
        ("int", Value::from(-7i64)),
        ("float", Value::Float(2.5)),
        ("bool", Value::Bool(true)),
        ("symbol", Value::symbol("draft")),
        ("date", Value::Date(date)),
        (
            "time",
            Value::Time(date.and_hms_opt(9, 30, 0).expect("Valid time")),
        ),
    ];
    for (name, value) in cases {
        global.set(name, value.clone()).expect("Set should succeed");
        let back = global
            .get(name)
            .expect("Get should succeed")
            .expect("Value should be present");
        assert_eq!(back, value, "Kind should survive the round trip: {name}");
    }
}

#[test]
fn test_huge_integer_round_trips_exactly() {
    let global = Accessor::global(Arc::new(InMemory::new()));
    let big: BigInt = "123456789101112131415161718123"
        .parse()
        .expect("Literal should parse");
    global
        .set("count", Value::Int(big.clone()))
        .expect("Set should succeed");
    let back = global
        .get("count")
        .expect("Get should succeed")
        .expect("Value should be present");
    assert_eq!(back, Value::Int(big), "Magnitude must not be truncated");
}

#[test]
fn test_child_falls_back_to_parent() {
    let chain = seo_chain();
    chain.global.set("title", "Title").expect("Set should succeed");

    let value = chain
        .industry
        .seo()
        .get("title")
        .expect("Get should succeed")
        .expect("Inherited value should be visible");
    assert_eq!(value, "Title");
}

#[test]
fn test_four_level_fallback() {
    let chain = seo_chain();
    chain.global.set("title", "Root").expect("Set should succeed");

    for accessor in [
        chain.industry.seo(),
        chain.client.seo(),
        chain.storefront.seo(),
    ] {
        let value = accessor
            .get("title")
            .expect("Get should succeed")
            .expect("Every descendant should see the root value");
        assert_eq!(value, "Root");
    }
}

#[test]
fn test_override_is_local_to_the_writer() {
    let chain = seo_chain();
    chain.global.set("title", "A").expect("Set should succeed");
    chain
        .storefront
        .seo()
        .set("title", "B")
        .expect("Set should succeed");

    assert_eq!(
        chain
            .storefront
            .seo()
            .get("title")
            .expect("Get should succeed")
            .expect("Override should be visible"),
        "B"
    );
    // The ancestors are untouched
    assert_eq!(
        chain
            .client
            .seo()
            .get("title")
            .expect("Get should succeed")
            .expect("Parent chain should be unaffected"),
        "A"
    );
    assert_eq!(
        chain
            .global
            .get("title")
            .expect("Get should succeed")
            .expect("Root should be unaffected"),
        "A"
    );
}

#[test]
fn test_unset_restores_inherited_value() {
    let chain = seo_chain();
    chain.global.set("title", "A").expect("Set should succeed");
    let seo = chain.storefront.seo();

    seo.set("title", "B").expect("Set should succeed");
    assert_eq!(
        seo.get("title")
            .expect("Get should succeed")
            .expect("Override should be visible"),
        "B"
    );

    seo.unset("title").expect("Unset should succeed");
    assert_eq!(
        seo.get("title")
            .expect("Get should succeed")
            .expect("Inherited value should be visible again"),
        "A",
        "Deleting an override un-overrides, it does not delete the chain value"
    );
}

#[test]
fn test_set_null_on_unset_name_is_a_no_op() {
    let chain = seo_chain();
    chain
        .storefront
        .seo()
        .set("title", Value::Null)
        .expect("Clearing an absent attribute should succeed");
}

#[test]
fn test_all_closest_wins() {
    let chain = seo_chain();
    chain.global.set("title", "T").expect("Set should succeed");
    chain.global.set("k", "v").expect("Set should succeed");
    // industry and client stay unset
    chain
        .storefront
        .seo()
        .set("title", "L")
        .expect("Set should succeed");

    let all = chain
        .storefront
        .seo()
        .all(true)
        .expect("All should succeed");
    assert_eq!(all.len(), 2);
    assert_eq!(all["title"], "L", "The closest level defines the value");
    assert_eq!(all["k"], "v", "Unshadowed names come from the root");
}

#[test]
fn test_all_middle_level_shadows_root() {
    let chain = seo_chain();
    chain.global.set("title", "T").expect("Set should succeed");
    chain
        .client
        .seo()
        .set("title", "C")
        .expect("Set should succeed");

    let all = chain
        .storefront
        .seo()
        .all(true)
        .expect("All should succeed");
    assert_eq!(
        all["title"], "C",
        "Only the closest defining level is visible, never a list of levels"
    );
}

#[test]
fn test_all_local_only_ignores_ancestors() {
    let chain = seo_chain();
    chain.global.set("title", "T").expect("Set should succeed");
    chain.global.set("k", "v").expect("Set should succeed");
    chain
        .storefront
        .seo()
        .set("title", "L")
        .expect("Set should succeed");

    let local = chain
        .storefront
        .seo()
        .all(false)
        .expect("All should succeed");
    assert_eq!(local.len(), 1, "Ancestors define more names than we see");
    assert_eq!(local["title"], "L");
}

#[test]
fn test_all_is_not_cached_across_calls() {
    let chain = seo_chain();
    chain.global.set("title", "T").expect("Set should succeed");
    let seo = chain.storefront.seo();

    assert_eq!(seo.all(true).expect("All should succeed").len(), 1);

    chain.global.set("k", "v").expect("Set should succeed");
    let again = seo.all(true).expect("All should succeed");
    assert_eq!(again.len(), 2, "A later write must show up in a later walk");
}

#[test]
fn test_unset_relation_is_transient() {
    let backend = Arc::new(InMemory::new());
    let global = Arc::new(Accessor::global(backend.clone()));
    global.set("title", "Title").expect("Set should succeed");

    let industry = Entity::new(
        backend.clone(),
        "Industry",
        "ind-9",
        Heritage::Fixed(global),
    );
    let client = Entity::new(
        backend,
        "Client",
        "cli-9",
        Heritage::relation("industry", SEO),
    );

    // The relation is not wired yet: no parent for now, not an error
    assert!(
        client
            .seo()
            .get("title")
            .expect("Get should succeed")
            .is_none()
    );

    // Once the host sets the relation, the next access resolves through it
    client.relate("industry", industry);
    assert_eq!(
        client
            .seo()
            .get("title")
            .expect("Get should succeed")
            .expect("Relation set later must be picked up"),
        "Title"
    );
}

#[test]
fn test_truthy_coercion() {
    let chain = seo_chain();
    let seo = chain.storefront.seo();

    assert!(!seo.truthy("crawlable").expect("Truthy should succeed"));

    chain
        .global
        .set("crawlable", true)
        .expect("Set should succeed");
    assert!(seo.truthy("crawlable").expect("Truthy should succeed"));

    seo.set("crawlable", false).expect("Set should succeed");
    assert!(
        !seo.truthy("crawlable").expect("Truthy should succeed"),
        "A local false overrides an inherited true"
    );

    chain.global.set("title", "t").expect("Set should succeed");
    assert!(
        seo.truthy("title").expect("Truthy should succeed"),
        "Non-boolean present values are truthy"
    );
}

#[test]
fn test_typed_keys() {
    const TITLE: Key<String> = Key::new("title");
    const CRAWLABLE: Key<bool> = Key::new("crawlable");

    let chain = seo_chain();
    chain
        .global
        .set_as(&TITLE, "Title".to_string())
        .expect("Set should succeed");

    let seo = chain.storefront.seo();
    assert_eq!(
        seo.get_as(&TITLE)
            .expect("Get should succeed")
            .expect("Inherited value should be visible"),
        "Title"
    );
    assert!(
        seo.get_as(&CRAWLABLE)
            .expect("Get should succeed")
            .is_none()
    );

    let err = seo
        .get_as(&Key::<bool>::new("title"))
        .expect_err("Text attribute read through a bool key should fail");
    assert!(err.is_type_mismatch(), "Should be a type mismatch: {err:?}");
}

#[test]
fn test_malformed_stored_value_surfaces_from_get() {
    let chain = seo_chain();
    let seo = chain.storefront.seo();
    seo.store()
        .put("count", Some("not a number".into()), Some(tag::INTEGER.into()))
        .expect("Raw put should succeed");

    let err = seo
        .get("count")
        .expect_err("Undecodable stored value must not be swallowed");
    assert!(err.is_malformed_value(), "Should be malformed: {err:?}");
}

#[test]
fn test_unknown_stored_tag_degrades_to_text() {
    let chain = seo_chain();
    let seo = chain.storefront.seo();
    seo.store()
        .put("legacy", Some("90s".into()), Some("Era".into()))
        .expect("Raw put should succeed");

    let value = seo
        .get("legacy")
        .expect("Get should succeed")
        .expect("Value should be present");
    assert_eq!(
        value, "90s",
        "Records written before a tag existed decode as text"
    );
}
