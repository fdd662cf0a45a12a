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

//! Property tests over generated value trees.

use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::select;

use tagpack::error::ErrorKind;
use tagpack::msgpack::TIMESTAMP_EXT;
use tagpack::{
    pack, unpack, AbsoluteDate, DateTime, Encoding, Extension, Map, Number, OperationMode,
    RelativeDate, Text, Value,
};

fn encoding() -> impl Strategy<Value = Encoding> {
    select(
        Encoding::all()
            .filter(|e| *e != Encoding::Utf8)
            .collect::<Vec<_>>(),
    )
}

fn text() -> impl Strategy<Value = Text> {
    prop_oneof![
        "\\PC{0,12}".prop_map(Text::utf8),
        (vec(any::<u8>(), 0..12), encoding()).prop_map(|(bytes, enc)| Text::new(bytes, enc)),
    ]
}

fn number() -> impl Strategy<Value = Number> {
    prop_oneof![
        Just(Number::NaN),
        Just(Number::Infinity),
        Just(Number::NegInfinity),
        (
            "[+-]?[0-9]{1,24}(\\.[0-9]{1,12})?([eE][+-]?[0-9]{1,3})?",
            any::<u32>()
        )
            .prop_map(|(digits, precision)| Number::new(digits, precision).unwrap()),
    ]
}

fn date() -> impl Strategy<Value = DateTime> {
    prop_oneof![
        (any::<i64>(), 0..1_000_000i32, any::<i32>())
            .prop_map(|(secs, micros, offset)| {
                DateTime::Absolute(AbsoluteDate::new(secs, micros, offset))
            }),
        any::<[i32; 7]>().prop_map(
            |[years, months, days, hours, minutes, seconds, microseconds]| {
                DateTime::Relative(RelativeDate {
                    years,
                    months,
                    days,
                    hours,
                    minutes,
                    seconds,
                    microseconds,
                })
            }
        ),
    ]
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("NaN is not equal to itself", |x| !x.is_nan())
            .prop_map(Value::Float),
        vec(any::<u8>(), 0..16).prop_map(Value::Binary),
        text().prop_map(Value::String),
        date().prop_map(Value::DateTime),
        number().prop_map(Value::Number),
    ]
}

/// Leaves that read back unchanged in `Simple` mode.
fn native_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        vec(any::<u8>(), 0..16).prop_map(Value::Binary),
        "\\PC{0,12}".prop_map(Value::text),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..8).prop_map(Value::Array),
            vec((text(), inner), 0..8)
                .prop_map(|entries| Value::Map(entries.into_iter().collect::<Map>())),
        ]
    })
}

proptest! {
    #[test]
    fn preserving_round_trip(value in value()) {
        let bytes = pack(&value, OperationMode::Preserving).unwrap();
        prop_assert_eq!(unpack(&bytes, OperationMode::Preserving).unwrap(), value);
    }

    #[test]
    fn utf8_strings_are_native_in_both_modes(s in "\\PC{0,40}") {
        let value = Value::text(s);
        let simple = pack(&value, OperationMode::Simple).unwrap();
        let preserving = pack(&value, OperationMode::Preserving).unwrap();
        prop_assert_eq!(simple, preserving);
    }

    #[test]
    fn concatenated_values_merge_preserving(a in leaf(), b in leaf()) {
        let mode = OperationMode::Preserving;
        let mut bytes = pack(&a, mode).unwrap().to_vec();
        bytes.extend_from_slice(&pack(&b, mode).unwrap());
        prop_assert_eq!(unpack(&bytes, mode).unwrap(), Value::Array(vec![a, b]));
    }

    #[test]
    fn concatenated_values_merge_simple(a in native_leaf(), b in native_leaf()) {
        let mode = OperationMode::Simple;
        let mut bytes = pack(&a, mode).unwrap().to_vec();
        bytes.extend_from_slice(&pack(&b, mode).unwrap());
        prop_assert_eq!(unpack(&bytes, mode).unwrap(), Value::Array(vec![a, b]));
    }

    #[test]
    fn large_unsigned_become_numbers(n in (i64::MAX as u64 + 1)..=u64::MAX) {
        let mut bytes = vec![0xcf];
        bytes.extend_from_slice(&n.to_be_bytes());
        let expected = Value::Number(Number::from(n));
        prop_assert_eq!(unpack(&bytes, OperationMode::Simple).unwrap(), expected.clone());
        prop_assert_eq!(unpack(&bytes, OperationMode::Preserving).unwrap(), expected);
    }

    #[test]
    fn unknown_extensions_by_mode(
        ext_type in any::<i8>().prop_filter("known extension", |t| !(TIMESTAMP_EXT..=3).contains(t)),
        data in vec(any::<u8>(), 0..20),
    ) {
        let ext = Value::Extension(Extension::new(ext_type, data));
        let bytes = pack(&ext, OperationMode::Simple).unwrap();

        let err = unpack(&bytes, OperationMode::Preserving).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::UnknownExtension);
        prop_assert_eq!(unpack(&bytes, OperationMode::Simple).unwrap(), ext);
    }

    #[test]
    fn short_number_extensions_are_invalid(precision in vec(any::<u8>(), 0..5)) {
        let mut bytes = vec![0xc7, 1 + precision.len() as u8, 0x02, 0x03];
        bytes.extend_from_slice(&precision);
        let err = unpack(&bytes, OperationMode::Preserving).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
