//! Bags shared across threads.

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn public_types_are_send_and_sync() {
    assert_send_sync::<PropertyBag>();
    assert_send_sync::<PropertyBagFactory>();
    assert_send_sync::<SerializerSettings>();
    assert_send_sync::<propbag::JsonEngine>();
}

#[test]
fn concurrent_readers_see_the_same_values() {
    let f = factory();
    let shared = f
        .create_with(|v| {
            for i in 0..100 {
                v.set(format!("k{i}"), i)?;
            }
            Ok(())
        })
        .unwrap();

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let bag = shared.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..100i64 {
                    assert_eq!(bag.get::<i64>(&format!("k{i}")).unwrap(), Some(i));
                }
                bag.as_dictionary().unwrap().len()
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), 100);
    }
}

#[test]
fn modifications_on_other_threads_do_not_leak() {
    let f = Arc::new(factory());
    let original = f.parse(r#"{"base":0}"#).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let f = Arc::clone(&f);
            let original = original.clone();
            thread::spawn(move || {
                let out = f
                    .create_modified(
                        &original,
                        ModificationRequest::new()
                            .with_set_or_add(values(&f, [("thread", json!(t))]))
                            .with_remove(["base"]),
                    )
                    .unwrap();
                out.get::<i64>("thread").unwrap()
            })
        })
        .collect();

    let mut seen: Vec<i64> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert_eq!(original.to_json_string().unwrap(), r#"{"base":0}"#);
}
