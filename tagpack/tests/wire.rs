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

//! Exchanges with generic MessagePack data and the lossy `Simple` mode conversions.

use tagpack::error::{ErrorKind, MsgPackReadError};
use tagpack::{
    pack, unpack, AbsoluteDate, DateTime, Encoding, Map, MsgPack, Number, OperationMode,
    RelativeDate, Text, Value, ValueKind,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn empty_input_is_nil() {
    for mode in [OperationMode::Simple, OperationMode::Preserving] {
        assert_eq!(unpack(&[], mode), Ok(Value::Nil));
    }
}

#[test]
fn simple_mode_is_lossy() {
    init_tracing();
    let mut map = Map::new();
    map.insert("null", Value::Null);
    map.insert("number", Number::new("2.5e3", 7).unwrap());
    map.insert(
        "date",
        DateTime::Absolute(AbsoluteDate::new(1_500_000_000, 250_000, -18_000)),
    );
    map.insert(
        "wait",
        DateTime::Relative(RelativeDate {
            hours: 1,
            seconds: 30,
            ..Default::default()
        }),
    );
    map.insert(Text::new(vec![0xc4], Encoding::Iso8859_1), "latin");

    let codec = MsgPack::new(OperationMode::Simple);
    let bytes = codec.pack(&Value::Map(map)).unwrap();

    let mut expected = Map::new();
    expected.insert("null", Value::Nil);
    expected.insert("number", 2500.0);
    expected.insert("date", "2017-07-13T21:40:00.250000-05:00");
    expected.insert("wait", "PT1H30S");
    expected.insert("\u{c4}", "latin");
    assert_eq!(codec.unpack(&bytes), Ok(Value::Map(expected)));
}

#[test]
fn preserving_output_read_in_simple_mode() {
    let value = Value::Array(vec![Value::Null, Value::Int(1)]);
    let bytes = pack(&value, OperationMode::Preserving).unwrap();
    match unpack(&bytes, OperationMode::Simple) {
        Ok(Value::Array(items)) => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].kind(), ValueKind::Extension);
            assert_eq!(items[1], Value::Int(1));
        }
        ow => panic!("Unexpected result: {:?}", ow),
    }
}

#[test]
fn reads_standard_timestamps() {
    // 12 byte layout: nanoseconds then seconds.
    let mut bytes = vec![0xc7, 12, 0xff];
    bytes.extend_from_slice(&1_500u32.to_be_bytes());
    bytes.extend_from_slice(&(-10i64).to_be_bytes());
    let expected = Value::DateTime(AbsoluteDate::new(-10, 1, 0).into());
    assert_eq!(unpack(&bytes, OperationMode::Simple), Ok(expected.clone()));
    assert_eq!(unpack(&bytes, OperationMode::Preserving), Ok(expected));
}

#[test]
fn non_text_key_returns_no_partial_map() {
    let bytes = [0x82, 0x01, 0xa1, b'a', 0xa1, b'b', 0x02];
    let err = unpack(&bytes, OperationMode::Preserving).unwrap_err();
    assert_eq!(err, MsgPackReadError::NonTextKey(ValueKind::Int));
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn interoperable_integers() {
    // Values written by another encoder in their widest form.
    let bytes = [
        0x93, 0xd3, 0, 0, 0, 0, 0, 0, 0, 1, 0xd1, 0xff, 0xff, 0xcb, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0,
    ];
    assert_eq!(
        unpack(&bytes, OperationMode::Simple),
        Ok(Value::Array(vec![
            Value::Int(1),
            Value::Int(-1),
            Value::Float(1.0)
        ]))
    );
}

#[test]
fn values_after_an_array_join_it() {
    let mode = OperationMode::Simple;
    let mut bytes = pack(&Value::Array(vec![Value::Int(1), Value::Int(2)]), mode)
        .unwrap()
        .to_vec();
    bytes.extend_from_slice(&pack(&Value::Int(3), mode).unwrap());
    assert_eq!(
        unpack(&bytes, mode),
        Ok(Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
    );
}
