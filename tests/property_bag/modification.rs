//! Copy-on-write modification.

use crate::common::*;

#[test]
fn input_is_unchanged() {
    let f = factory();
    let original = f.parse(r#"{"a":1,"b":{"c":2}}"#).unwrap();
    let before = original.to_document();

    let request = ModificationRequest::new()
        .with_set_or_add(values(&f, [("a", json!("changed")), ("z", json!(true))]))
        .with_remove(["b"]);
    let modified = f.create_modified(&original, request).unwrap();

    assert_eq!(original.to_document(), before);
    assert_eq!(
        modified.to_json_string().unwrap(),
        r#"{"a":"changed","z":true}"#
    );
}

#[test]
fn updates_keep_position_and_new_keys_append_in_set_order() {
    let f = factory();
    let original = f.parse(r#"{"a":1,"b":2,"c":3}"#).unwrap();
    let request = ModificationRequest::new().with_set_or_add(values(
        &f,
        [("y", json!(25)), ("b", json!(20)), ("x", json!(24))],
    ));
    let modified = f.create_modified(&original, request).unwrap();
    assert_eq!(keys_of(&modified), vec!["a", "b", "c", "y", "x"]);
    assert_eq!(modified.get::<i64>("b").unwrap(), Some(20));
}

#[test]
fn removing_everything_gives_empty_bag() {
    let f = factory();
    let original = f.parse(r#"{"a":1,"b":2}"#).unwrap();
    let modified = f
        .create_modified(&original, ModificationRequest::new().with_remove(["a", "b"]))
        .unwrap();
    assert!(modified.is_empty());
    assert_eq!(modified.to_json_string().unwrap(), "{}");
}

#[test]
fn conflicting_key_is_rejected() {
    let f = factory();
    let original = f.parse(r#"{"a":1}"#).unwrap();
    let request = ModificationRequest::new()
        .with_set_or_add(values(&f, [("a", json!(2))]))
        .with_remove(["a"]);
    let err = f.create_modified(&original, request).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(err.to_string().contains("\"a\""));
}

#[test]
fn empty_request_is_rejected() {
    let f = factory();
    let original = f.parse(r#"{"a":1}"#).unwrap();
    let err = f
        .create_modified(&original, ModificationRequest::new())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn empty_parts_are_allowed() {
    let f = factory();
    let original = f.parse(r#"{"a":1}"#).unwrap();
    let out = f
        .create_modified(
            &original,
            ModificationRequest::new().with_remove(Vec::<String>::new()),
        )
        .unwrap();
    assert_eq!(out, original);
}

#[test]
fn callback_form_builds_set_part() {
    let f = factory();
    let original = f.parse(r#"{"keep":1,"drop":2}"#).unwrap();
    let out = f
        .create_modified_with(
            &original,
            |v| {
                v.set("added", vec![1, 2, 3])?;
                Ok(())
            },
            ["drop"],
        )
        .unwrap();
    assert_eq!(out.to_json_string().unwrap(), r#"{"keep":1,"added":[1,2,3]}"#);
}

#[test]
fn nested_bag_can_be_set() {
    let f = factory();
    let inner = f.create([("x", 1)]).unwrap();
    let original = f.parse(r#"{"a":1}"#).unwrap();
    let out = f
        .create_modified_with(
            &original,
            |v| {
                v.set("inner", inner.clone())?;
                Ok(())
            },
            Vec::<String>::new(),
        )
        .unwrap();
    let read = out.get::<PropertyBag>("inner").unwrap().unwrap();
    assert_eq!(read, inner);
}

#[test]
fn modified_bag_uses_factory_engine() {
    let source = factory();
    let original = source.parse(r#"{"a":null,"b":1}"#).unwrap();

    let ignoring = factory_with(
        SerializerSettings::default().with_null_value_handling(propbag::NullValueHandling::Ignore),
    );
    let out = ignoring
        .create_modified(&original, ModificationRequest::new().with_remove(["zzz"]))
        .unwrap();
    assert_eq!(out.to_json_string().unwrap(), r#"{"b":1}"#);
    assert!(out.try_get::<i64>("a").unwrap().is_null());
}

#[test]
fn chained_modifications() {
    let f = factory();
    let mut bag = f.parse("{}").unwrap();
    for i in 0..5 {
        bag = f
            .create_modified(
                &bag,
                ModificationRequest::new().with_set_or_add(values(&f, [("counter", json!(i))])),
            )
            .unwrap();
    }
    assert_eq!(bag.get::<i64>("counter").unwrap(), Some(4));
    assert_eq!(bag.len(), 1);
}
