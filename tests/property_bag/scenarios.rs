//! Reference scenarios for reads, serialization and modification.

use crate::common::*;

#[test]
fn present_string_is_found() {
    let bag = factory().create([("hello", "world")]).unwrap();
    let (found, value) = bag.try_get::<String>("hello").unwrap().into_pair();
    assert!(found);
    assert_eq!(value, "world");
}

#[test]
fn missing_key_is_not_found() {
    let bag = factory().create([("hello", "world")]).unwrap();
    let (found, value) = bag.try_get::<String>("goodbye").unwrap().into_pair();
    assert!(!found);
    assert_eq!(value, String::default());
}

#[test]
fn null_value_is_found_with_default() {
    let bag = factory().create([("hello", None::<String>)]).unwrap();
    let (found, value) = bag.try_get::<String>("hello").unwrap().into_pair();
    assert!(found);
    assert_eq!(value, String::default());
}

#[test]
fn serializes_compact_in_insertion_order() {
    let f = factory();
    let bag = f
        .create_with(|v| {
            v.set("hello", "world")?.set("number", 3)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(
        bag.to_json_string().unwrap(),
        r#"{"hello":"world","number":3}"#
    );
    assert_eq!(
        serde_json::to_string(&bag).unwrap(),
        r#"{"hello":"world","number":3}"#
    );
}

#[test]
fn modification_removes_and_appends() {
    let f = factory();
    let bag = f.parse(r#"{"a":1,"b":2}"#).unwrap();
    let request = ModificationRequest::new()
        .with_set_or_add(values(&f, [("c", json!(1))]))
        .with_remove(["a"]);
    let modified = f.create_modified(&bag, request).unwrap();
    assert_eq!(modified.to_json_string().unwrap(), r#"{"b":2,"c":1}"#);
}

#[test]
fn timestamp_with_offset_round_trips() {
    let f = factory();
    let instant = sample_instant();
    let bag = f.create([("when", instant)]).unwrap();

    assert_eq!(
        bag.to_json_string().unwrap(),
        r#"{"when":{"dateTimeOffset":"2018-04-15T09:09:31.2340000+01:00","unixTime":1523779771234}}"#
    );

    let reparsed = f.parse(&bag.to_json_string().unwrap()).unwrap();
    let back = reparsed.get::<DateTimeOffset>("when").unwrap().unwrap();
    assert_eq!(back, instant);
    assert_eq!(back.offset().local_minus_utc(), 3600);
    assert_eq!(back.to_iso_string(), "2018-04-15T09:09:31.2340000+01:00");
    assert_eq!(back.unix_time_millis(), 1_523_779_771_234);
}
