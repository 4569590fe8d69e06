//! Value converters: timestamps, cultures, enums, records and custom hooks.

use crate::common::*;
use chrono::{DateTime, FixedOffset};
use propbag::{DateParseHandling, ValueConverter};
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum Tier {
    Free,
    PayAsYouGo,
    Enterprise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantProfile {
    display_name: String,
    tier: Tier,
    created: DateTimeOffset,
    culture: Option<CultureName>,
}

#[test]
fn chrono_values_use_object_form() {
    let f = factory();
    let dt: DateTime<FixedOffset> = sample_instant().into_inner();
    let b = f.create([("at", dt)]).unwrap();
    assert_eq!(b.get::<Value>("at").unwrap().unwrap()["unixTime"], json!(1523779771234i64));
    let back: DateTime<FixedOffset> = b.get("at").unwrap().unwrap();
    assert_eq!(back, dt);
    assert_eq!(back.offset().local_minus_utc(), 3600);
}

#[test]
fn bare_date_string_reads_as_timestamp_by_default() {
    let b = bag(json!({"at": "2018-04-15T09:09:31.234+01:00"}));
    let at = b.get::<DateTimeOffset>("at").unwrap().unwrap();
    assert_eq!(at, sample_instant());
    // The stored value is still a string for string reads
    assert_eq!(
        b.get::<String>("at").unwrap().as_deref(),
        Some("2018-04-15T09:09:31.234+01:00")
    );
}

#[test]
fn bare_date_string_conflicts_with_date_time_mode() {
    let f = factory_with(
        SerializerSettings::default().with_date_parse_handling(DateParseHandling::DateTime),
    );
    let b = f
        .parse(r#"{"bare":"2018-04-15T09:09:31.234+01:00","wire":{"dateTimeOffset":"2018-04-15T09:09:31.2340000+01:00","unixTime":1523779771234}}"#)
        .unwrap();
    let err = b.try_get::<DateTimeOffset>("bare").unwrap_err();
    assert!(err.is_serialization());
    assert!(err.to_string().contains("'bare'"));
    assert_eq!(b.get::<DateTimeOffset>("wire").unwrap(), Some(sample_instant()));
}

#[test]
fn culture_round_trips_as_name() {
    let f = factory();
    let b = f
        .create_with(|v| {
            v.set("culture", CultureName::new("en-us").unwrap())?;
            v.set("missing", None::<CultureName>)?;
            v.set("invariant", CultureName::invariant())?;
            Ok(())
        })
        .unwrap();
    assert_eq!(
        b.to_json_string().unwrap(),
        r#"{"culture":"en-US","missing":null,"invariant":""}"#
    );

    let reparsed = f.parse(&b.to_json_string().unwrap()).unwrap();
    assert_eq!(
        reparsed.get::<CultureName>("culture").unwrap().unwrap().as_str(),
        "en-US"
    );
    assert!(reparsed.try_get::<CultureName>("missing").unwrap().is_null());
    assert!(reparsed
        .get::<CultureName>("invariant")
        .unwrap()
        .unwrap()
        .is_invariant());
}

#[test]
fn invalid_culture_is_a_conversion_error() {
    let b = bag(json!({"culture": "definitely not"}));
    let err = b.try_get::<CultureName>("culture").unwrap_err();
    assert!(err.is_serialization());
}

#[test]
fn enums_use_camel_case_names() {
    let f = factory();
    let b = f.create([("tier", Tier::PayAsYouGo)]).unwrap();
    assert_eq!(b.to_json_string().unwrap(), r#"{"tier":"payAsYouGo"}"#);
    assert_eq!(b.get::<Tier>("tier").unwrap(), Some(Tier::PayAsYouGo));
    assert!(bag(json!({"tier": "PayAsYouGo"}))
        .try_get::<Tier>("tier")
        .is_err());
}

#[test]
fn records_with_wire_types_round_trip() {
    let f = factory();
    let profile = TenantProfile {
        display_name: "Contoso".to_string(),
        tier: Tier::Enterprise,
        created: sample_instant(),
        culture: Some(CultureName::new("fr-FR").unwrap()),
    };
    let b = f.create([("profile", profile.clone())]).unwrap();

    let stored = b.get::<Value>("profile").unwrap().unwrap();
    assert_eq!(stored["tier"], json!("enterprise"));
    assert_eq!(stored["culture"], json!("fr-FR"));
    assert_eq!(stored["created"]["unixTime"], json!(1523779771234i64));

    let reparsed = f.parse(&b.to_json_string().unwrap()).unwrap();
    assert_eq!(reparsed.get::<TenantProfile>("profile").unwrap(), Some(profile));
}

#[test]
fn record_read_failure_names_key() {
    let b = bag(json!({"profile": {"displayName": 5}}));
    let err = b.try_get::<TenantProfile>("profile").unwrap_err();
    assert!(err.is_serialization());
    assert!(err.to_string().contains("'profile'"));
}

/// Stores a temperature in Celsius as `{"c": <value>}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Celsius(f64);

struct CelsiusConverter;

impl ValueConverter for CelsiusConverter {
    fn name(&self) -> &'static str {
        "celsius"
    }

    fn can_convert(&self, type_id: TypeId) -> bool {
        type_id == TypeId::of::<Celsius>()
    }

    fn read(
        &self,
        _: TypeId,
        value: &Value,
        _: &SerializerSettings,
    ) -> propbag::Result<Box<dyn Any>> {
        let c = value["c"]
            .as_f64()
            .ok_or_else(|| Error::serialization("expected {\"c\": number}"))?;
        Ok(Box::new(Celsius(c)))
    }

    fn write(&self, value: &dyn Any, _: &SerializerSettings) -> propbag::Result<Value> {
        let c = value
            .downcast_ref::<Celsius>()
            .ok_or_else(|| Error::invalid_operation("expected Celsius"))?;
        Ok(json!({"c": c.0}))
    }
}

#[test]
fn custom_converter_takes_precedence_over_serde() {
    let f = factory_with(SerializerSettings::default().with_converter(Arc::new(CelsiusConverter)));
    let b = f.create([("temp", Celsius(21.5))]).unwrap();
    assert_eq!(b.to_json_string().unwrap(), r#"{"temp":{"c":21.5}}"#);
    assert_eq!(b.get::<Celsius>("temp").unwrap(), Some(Celsius(21.5)));

    // Without the converter the newtype goes through serde
    let plain = factory().create([("temp", Celsius(21.5))]).unwrap();
    assert_eq!(plain.to_json_string().unwrap(), r#"{"temp":21.5}"#);
}
