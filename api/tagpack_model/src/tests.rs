// Copyright 2015-2023 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::convert::TryFrom;

use chrono::{FixedOffset, TimeZone};

use crate::{
    AbsoluteDate, DateTime, Extension, Map, Number, OperationMode, RelativeDate, Text, Value,
    ValueKind, DEFAULT_PRECISION,
};

#[test]
fn operation_mode_from_int() {
    assert_eq!(OperationMode::try_from(0), Ok(OperationMode::Simple));
    assert_eq!(OperationMode::try_from(1), Ok(OperationMode::Preserving));
    let err = OperationMode::try_from(2).unwrap_err();
    assert_eq!(err.to_string(), "2 is not a valid operation mode.");
    assert_eq!(OperationMode::default(), OperationMode::Simple);
    assert_eq!(i64::from(OperationMode::Preserving), 1);
}

#[test]
fn value_kinds() {
    assert_eq!(Value::Nil.kind(), ValueKind::Nil);
    assert_eq!(Value::Null.kind(), ValueKind::Null);
    assert_ne!(Value::Nil, Value::Null);
    assert_eq!(Value::from("a").kind(), ValueKind::String);
    assert_eq!(Value::from(Some(3)), Value::Int(3));
    assert_eq!(Value::from(None::<i64>), Value::Nil);
    assert_eq!(ValueKind::DateTime.to_string(), "date");
}

#[test]
fn map_last_write_wins() {
    let mut map = Map::new();
    assert!(map.insert("a", 1).is_none());
    map.insert("b", 2);
    assert_eq!(map.insert("a", 3), Some(Value::Int(1)));

    let entries = map
        .iter()
        .map(|(k, v)| (k.as_str().unwrap().to_string(), v.clone()))
        .collect::<Vec<_>>();
    assert_eq!(
        entries,
        vec![
            ("a".to_string(), Value::Int(3)),
            ("b".to_string(), Value::Int(2))
        ]
    );
    assert_eq!(map.get(&Text::utf8("b")), Some(&Value::Int(2)));
}

#[test]
fn extension_parts() {
    let ext = Extension::new(42, vec![1, 2, 3]);
    assert_eq!(ext.ext_type(), 42);
    assert_eq!(ext.len(), 3);
    assert_eq!(ext.into_parts(), (42, vec![1, 2, 3]));
}

#[test]
fn number_validation() {
    for good in ["0", "-1", "+12.5", "1.25e10", "7E-3", "12345678901234567890.0001"] {
        assert!(Number::new(good, 10).is_ok(), "{}", good);
    }
    for bad in ["", "-", ".5", "5.", "1e", "1.2.3", "abc", "1e+", " 1"] {
        assert!(Number::new(bad, 10).is_err(), "{}", bad);
    }
    let n = Number::with_default_precision("2.5").unwrap();
    assert_eq!(n.precision(), Some(DEFAULT_PRECISION));
    assert_eq!(n.digits(), Some("2.5"));
    assert_eq!(n.to_f64(), 2.5);
}

#[test]
fn number_special_states() {
    assert!(Number::NaN.to_f64().is_nan());
    assert_eq!(Number::Infinity.to_f64(), f64::INFINITY);
    assert_eq!(Number::NegInfinity.to_f64(), f64::NEG_INFINITY);
    assert_eq!(Number::from_f64(f64::NAN, 5), Number::NaN);
    assert_eq!(Number::from_f64(f64::NEG_INFINITY, 5), Number::NegInfinity);
    assert_eq!(Number::from_f64(1.5, 5).to_f64(), 1.5);
    assert_eq!("-inf".parse::<Number>(), Ok(Number::NegInfinity));
}

#[test]
fn absolute_date_iso() {
    let utc = AbsoluteDate::new(1_500_000_000, 0, 0);
    assert_eq!(utc.to_iso8601().as_deref(), Some("2017-07-14T02:40:00Z"));

    let frac = AbsoluteDate::new(1_500_000_000, 1234, 0);
    assert_eq!(
        frac.to_iso8601().as_deref(),
        Some("2017-07-14T02:40:00.001234Z")
    );

    let offset = AbsoluteDate::new(1_500_000_000, 0, 3600);
    assert_eq!(
        offset.to_iso8601().as_deref(),
        Some("2017-07-14T03:40:00+01:00")
    );

    assert_eq!(AbsoluteDate::new(0, 1_000_000, 0).to_iso8601(), None);
    assert_eq!(AbsoluteDate::new(0, 0, 100_000).to_iso8601(), None);
}

#[test]
fn absolute_date_from_chrono() {
    let tz = FixedOffset::east_opt(-7200).unwrap();
    let date = tz.timestamp_opt(1_000, 5_500).unwrap();
    let abs = AbsoluteDate::from(date);
    assert_eq!(abs, AbsoluteDate::new(1_000, 5, -7200));
    assert_eq!(abs.to_chrono(), Some(tz.timestamp_opt(1_000, 5_000).unwrap()));
}

#[test]
fn relative_date_iso() {
    let full = RelativeDate {
        years: 1,
        months: 2,
        days: 3,
        hours: 4,
        minutes: 5,
        seconds: 6,
        microseconds: 7,
    };
    assert_eq!(full.to_iso8601(), "P1Y2M3DT4H5M6.000007S");
    assert_eq!(RelativeDate::default().to_iso8601(), "PT0S");
    let days = RelativeDate {
        days: 10,
        ..Default::default()
    };
    assert_eq!(days.to_iso8601(), "P10D");
    let neg = RelativeDate {
        seconds: -2,
        ..Default::default()
    };
    assert_eq!(neg.to_iso8601(), "PT-2S");
    let date = DateTime::from(days);
    assert!(date.is_relative());
    assert_eq!(date.to_iso8601().as_deref(), Some("P10D"));
}

#[test]
fn unsigned_promotion() {
    assert_eq!(Value::from(7u64), Value::Int(7));
    assert_eq!(Value::from(i64::MAX as u64), Value::Int(i64::MAX));
    let big = Value::from(u64::MAX);
    match big {
        Value::Number(number) => {
            assert_eq!(number.digits(), Some("18446744073709551615"));
            assert_eq!(number.precision(), Some(DEFAULT_PRECISION));
        }
        ow => panic!("Unexpected value: {:?}", ow),
    }
}

#[test]
fn number_validity() {
    assert!(Number::new("-1.5e3", 4).unwrap().is_valid());
    assert!(Number::NaN.is_valid());
    assert!(Number::from(u64::MAX).is_valid());
    let unchecked = Number::Finite {
        digits: "1.".to_string(),
        precision: 4,
    };
    assert!(!unchecked.is_valid());
}
