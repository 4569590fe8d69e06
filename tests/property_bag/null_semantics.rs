//! Absent vs present-null through every read path.

use crate::common::*;

#[test]
fn lookup_distinguishes_null_from_absent_for_any_type() {
    let b = bag(json!({"n": null}));
    assert_eq!(b.try_get::<i64>("n").unwrap(), Lookup::Null);
    assert_eq!(b.try_get::<Vec<String>>("n").unwrap(), Lookup::Null);
    assert_eq!(b.try_get::<PropertyBag>("n").unwrap(), Lookup::Null);
    assert_eq!(b.try_get::<Value>("n").unwrap(), Lookup::Null);
    assert_eq!(b.try_get::<i64>("x").unwrap(), Lookup::Absent);
}

#[test]
fn null_reads_never_fail_conversion() {
    // A type that could never be read from null still reports Null
    let b = bag(json!({"n": null}));
    assert!(b.try_get::<CultureName>("n").unwrap().is_null());
    assert!(b.try_get::<DateTimeOffset>("n").unwrap().is_null());
}

#[test]
fn contains_key_sees_nulls() {
    let b = bag(json!({"n": null}));
    assert!(b.contains_key("n"));
    assert_eq!(b.entry_type("n"), Some(EntryType::Null));
}

#[test]
fn set_null_and_unit_store_null() {
    let f = factory();
    let b = f
        .create_with(|v| {
            v.set_null("explicit");
            v.set("unit", ())?;
            v.set("none", None::<bool>)?;
            Ok(())
        })
        .unwrap();
    for key in ["explicit", "unit", "none"] {
        assert!(b.try_get::<bool>(key).unwrap().is_null(), "{key}");
    }
    assert_eq!(
        b.to_json_string().unwrap(),
        r#"{"explicit":null,"unit":null,"none":null}"#
    );
}

#[test]
fn null_survives_modification() {
    let f = factory();
    let b = f.parse(r#"{"n":null,"x":1}"#).unwrap();
    let out = f
        .create_modified(&b, ModificationRequest::new().with_remove(["x"]))
        .unwrap();
    assert_eq!(out.try_get::<i64>("n").unwrap(), Lookup::Null);
    assert_eq!(out.try_get::<i64>("x").unwrap(), Lookup::Absent);
}

#[test]
fn nested_bag_keeps_null_vs_absent() {
    let b = bag(json!({"inner": {"n": null}}));
    let inner = b.get::<PropertyBag>("inner").unwrap().unwrap();
    assert!(inner.try_get::<String>("n").unwrap().is_null());
    assert!(inner.try_get::<String>("m").unwrap().is_absent());
}
