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

//! Byte layouts of the extension types used in preserving mode.
//!
//! Every writer emits an extension header followed by exactly the declared number of bytes. Every
//! reader is handed exactly the declared payload and fails if any of it is left over.

use std::io::Write;
use std::mem::size_of;

use bytes::{Buf, BufMut, BytesMut};
use rmp::encode::write_ext_meta;

use tagpack_model::{AbsoluteDate, DateTime, Encoding, Extension, Number, RelativeDate, Text, Value};

use crate::{
    MsgPackReadError, MsgPackWriteError, DATE_EXT, NULL_EXT, NUMBER_EXT, STRING_EXT, TIMESTAMP_EXT,
};


const RELATIVE_DATE: u8 = 0;
const ABSOLUTE_DATE: u8 = 1;

const ABSOLUTE_DATE_LEN: usize = 1 + size_of::<i64>() + 2 * size_of::<i32>();
const RELATIVE_DATE_LEN: usize = 1 + 7 * size_of::<i32>();

const NUMBER_NAN: u8 = 0;
const NUMBER_INF: u8 = 1;
const NUMBER_NEG_INF: u8 = 2;
const NUMBER_NORMAL: u8 = 3;

/// Kind, precision and at least one digit.
const MIN_NORMAL_NUMBER_LEN: usize = 1 + size_of::<u32>() + 1;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

fn write_ext<W: Write>(
    writer: &mut W,
    ext_type: i8,
    payload: &[u8],
) -> Result<(), MsgPackWriteError> {
    let len =
        u32::try_from(payload.len()).map_err(|_| MsgPackWriteError::TooLarge(payload.len()))?;
    write_ext_meta(writer, len, ext_type)?;
    writer.write_all(payload)?;
    Ok(())
}

pub fn write_null_ext<W: Write>(writer: &mut W) -> Result<(), MsgPackWriteError> {
    write_ext(writer, NULL_EXT, &[])
}

pub fn write_date_ext<W: Write>(writer: &mut W, date: &DateTime) -> Result<(), MsgPackWriteError> {
    let payload = match date {
        DateTime::Absolute(AbsoluteDate {
            epoch_seconds,
            microseconds,
            utc_offset,
        }) => {
            let mut payload = BytesMut::with_capacity(ABSOLUTE_DATE_LEN);
            payload.put_u8(ABSOLUTE_DATE);
            payload.put_i64(*epoch_seconds);
            payload.put_i32(*microseconds);
            payload.put_i32(*utc_offset);
            payload
        }
        DateTime::Relative(RelativeDate {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            microseconds,
        }) => {
            let mut payload = BytesMut::with_capacity(RELATIVE_DATE_LEN);
            payload.put_u8(RELATIVE_DATE);
            for field in [years, months, days, hours, minutes, seconds, microseconds] {
                payload.put_i32(*field);
            }
            payload
        }
    };
    write_ext(writer, DATE_EXT, &payload)
}

/// Write a number. Finite numbers whose digits are not a decimal literal are rejected as they
/// could not be read back.
pub fn write_number_ext<W: Write>(
    writer: &mut W,
    number: &Number,
) -> Result<(), MsgPackWriteError> {
    if !number.is_valid() {
        return Err(invalid_number(number));
    }
    match number {
        Number::NaN => write_ext(writer, NUMBER_EXT, &[NUMBER_NAN]),
        Number::Infinity => write_ext(writer, NUMBER_EXT, &[NUMBER_INF]),
        Number::NegInfinity => write_ext(writer, NUMBER_EXT, &[NUMBER_NEG_INF]),
        Number::Finite { digits, precision } => {
            let mut payload = BytesMut::with_capacity(1 + size_of::<u32>() + digits.len());
            payload.put_u8(NUMBER_NORMAL);
            payload.put_u32(*precision);
            payload.put_slice(digits.as_bytes());
            write_ext(writer, NUMBER_EXT, &payload)
        }
    }
}

pub fn write_string_ext<W: Write>(writer: &mut W, text: &Text) -> Result<(), MsgPackWriteError> {
    let mut payload = BytesMut::with_capacity(1 + text.len());
    payload.put_u8(text.encoding().id());
    payload.put_slice(text.as_bytes());
    write_ext(writer, STRING_EXT, &payload)
}

/// Write an opaque extension exactly as it was provided.
pub fn write_opaque_ext<W: Write>(
    writer: &mut W,
    extension: &Extension,
) -> Result<(), MsgPackWriteError> {
    write_ext(writer, extension.ext_type(), extension.data())
}

pub(crate) fn invalid_number(number: &Number) -> MsgPackWriteError {
    MsgPackWriteError::UnsupportedValue(format!("'{}' is not a valid decimal number.", number))
}

fn invalid(ext_type: i8, reason: &'static str) -> MsgPackReadError {
    MsgPackReadError::InvalidExtension { ext_type, reason }
}

fn finish(ext_type: i8, payload: &[u8], value: Value) -> Result<Value, MsgPackReadError> {
    if payload.is_empty() {
        Ok(value)
    } else {
        Err(MsgPackReadError::UnconsumedExtension {
            ext_type,
            remaining: payload.len(),
        })
    }
}

pub fn read_null_ext(payload: &[u8]) -> Result<Value, MsgPackReadError> {
    finish(NULL_EXT, payload, Value::Null)
}

/// Read a date. Only a kind byte of `1` marks an absolute date, any other kind is relative.
pub fn read_date_ext(mut payload: &[u8]) -> Result<Value, MsgPackReadError> {
    if !payload.has_remaining() {
        return Err(invalid(DATE_EXT, "missing date kind"));
    }
    let date = match payload.get_u8() {
        ABSOLUTE_DATE => {
            if payload.remaining() < ABSOLUTE_DATE_LEN - 1 {
                return Err(invalid(DATE_EXT, "absolute date is too short"));
            }
            DateTime::Absolute(AbsoluteDate {
                epoch_seconds: payload.get_i64(),
                microseconds: payload.get_i32(),
                utc_offset: payload.get_i32(),
            })
        }
        _ => {
            if payload.remaining() < RELATIVE_DATE_LEN - 1 {
                return Err(invalid(DATE_EXT, "relative date is too short"));
            }
            DateTime::Relative(RelativeDate {
                years: payload.get_i32(),
                months: payload.get_i32(),
                days: payload.get_i32(),
                hours: payload.get_i32(),
                minutes: payload.get_i32(),
                seconds: payload.get_i32(),
                microseconds: payload.get_i32(),
            })
        }
    };
    finish(DATE_EXT, payload, Value::DateTime(date))
}

pub fn read_number_ext(mut payload: &[u8]) -> Result<Value, MsgPackReadError> {
    let total_len = payload.len();
    if !payload.has_remaining() {
        return Err(invalid(NUMBER_EXT, "missing number kind"));
    }
    let number = match payload.get_u8() {
        NUMBER_NAN => Number::NaN,
        NUMBER_INF => Number::Infinity,
        NUMBER_NEG_INF => Number::NegInfinity,
        NUMBER_NORMAL => {
            if total_len < MIN_NORMAL_NUMBER_LEN {
                return Err(invalid(NUMBER_EXT, "number is too short"));
            }
            let precision = payload.get_u32();
            let digits = std::str::from_utf8(payload)
                .map_err(|_| invalid(NUMBER_EXT, "digits are not ASCII"))?;
            let number = Number::new(digits, precision)
                .map_err(|_| invalid(NUMBER_EXT, "digits are not a decimal number"))?;
            payload.advance(payload.len());
            number
        }
        _ => return Err(invalid(NUMBER_EXT, "unknown number kind")),
    };
    finish(NUMBER_EXT, payload, Value::Number(number))
}

pub fn read_string_ext(mut payload: &[u8]) -> Result<Value, MsgPackReadError> {
    if !payload.has_remaining() {
        return Err(invalid(STRING_EXT, "missing encoding"));
    }
    let encoding = Encoding::from_id(payload.get_u8())
        .ok_or_else(|| invalid(STRING_EXT, "unknown encoding"))?;
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(payload.len())
        .map_err(|_| MsgPackReadError::Allocation(payload.len()))?;
    bytes.extend_from_slice(payload);
    payload.advance(payload.len());
    finish(STRING_EXT, payload, Value::String(Text::new(bytes, encoding)))
}

/// Read the standard MessagePack timestamp extension in any of its three layouts. The result is
/// an absolute UTC date with the nanoseconds truncated to microseconds.
pub fn read_timestamp_ext(mut payload: &[u8]) -> Result<Value, MsgPackReadError> {
    let (seconds, nanos) = match payload.len() {
        4 => (i64::from(payload.get_u32()), 0),
        8 => {
            let packed = payload.get_u64();
            ((packed & 0x3_ffff_ffff) as i64, (packed >> 34) as u32)
        }
        12 => {
            let nanos = payload.get_u32();
            (payload.get_i64(), nanos)
        }
        _ => return Err(invalid(TIMESTAMP_EXT, "timestamp must be 4, 8 or 12 bytes")),
    };
    if nanos >= NANOS_PER_SECOND {
        return Err(invalid(TIMESTAMP_EXT, "nanoseconds out of range"));
    }
    let date = AbsoluteDate::from_timestamp(seconds, nanos);
    finish(TIMESTAMP_EXT, payload, Value::DateTime(date.into()))
}
