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

use std::mem::size_of;

use bytes::Buf;
use rmp::Marker;
use tracing::trace;

use tagpack_model::{Encoding, Extension, Map, OperationMode, Text, Value};

use crate::extension::{
    read_date_ext, read_null_ext, read_number_ext, read_string_ext, read_timestamp_ext,
};
use crate::{
    MsgPackConfig, MsgPackReadError, DATE_EXT, NULL_EXT, NUMBER_EXT, STRING_EXT, TIMESTAMP_EXT,
};


/// Attempt to read a single [`Value`] from MessagePack data in a buffer. Only the bytes of the
/// value are consumed.
///
/// # Arguments
/// * `input` - The buffer containing the MessagePack data.
/// * `config` - The mode that determines how extensions are interpreted and the limits on the
///   size of the data.
pub fn read_from_msg_pack<R: Buf>(
    input: &mut R,
    config: &MsgPackConfig,
) -> Result<Value, MsgPackReadError> {
    ValueReader { input, config }.read_value(0)
}

/// Read every value in a buffer. An empty buffer produces [`Value::Nil`] and a buffer holding a
/// single value produces that value. When there are several values, the later values are
/// appended to the first if it is a [`Value::Array`] and otherwise all of them are collected into
/// a new [`Value::Array`].
pub fn read_all_from_msg_pack<R: Buf>(
    input: &mut R,
    config: &MsgPackConfig,
) -> Result<Value, MsgPackReadError> {
    if !input.has_remaining() {
        return Ok(Value::Nil);
    }
    let first = read_from_msg_pack(input, config)?;
    if !input.has_remaining() {
        return Ok(first);
    }
    let mut items = match first {
        Value::Array(items) => items,
        ow => vec![ow],
    };
    let mut count = 1;
    while input.has_remaining() {
        items.push(read_from_msg_pack(input, config)?);
        count += 1;
    }
    trace!(count, "Merged values read from MessagePack.");
    Ok(Value::Array(items))
}

struct ValueReader<'a, R> {
    input: &'a mut R,
    config: &'a MsgPackConfig,
}

impl<'a, R: Buf> ValueReader<'a, R> {
    /// Read a value nested inside `depth` arrays or maps.
    fn read_value(&mut self, depth: usize) -> Result<Value, MsgPackReadError> {
        let marker = read_marker(self.input)?;
        let input = &mut *self.input;
        match marker {
            Marker::Null => Ok(Value::Nil),
            Marker::True => Ok(Value::Bool(true)),
            Marker::False => Ok(Value::Bool(false)),
            Marker::FixPos(n) => Ok(Value::Int(n.into())),
            Marker::FixNeg(n) => Ok(Value::Int(n.into())),
            Marker::I8 => compose_simple(input, Buf::get_i8, Value::Int),
            Marker::I16 => compose_simple(input, Buf::get_i16, Value::Int),
            Marker::I32 => compose_simple(input, Buf::get_i32, Value::Int),
            Marker::I64 => compose_simple(input, Buf::get_i64, Value::Int),
            Marker::U8 => compose_simple(input, Buf::get_u8, Value::Int),
            Marker::U16 => compose_simple(input, Buf::get_u16, Value::Int),
            Marker::U32 => compose_simple(input, Buf::get_u32, Value::Int),
            Marker::U64 => compose_simple(input, Buf::get_u64, |n: u64| Value::from(n)),
            Marker::F32 => compose_simple(input, Buf::get_f32, Value::Float),
            Marker::F64 => compose_simple(input, Buf::get_f64, Value::Float),
            Marker::FixStr(len) => self.read_string(len.into()),
            Marker::Str8 => {
                let len = read_len(input, Buf::get_u8)?;
                self.read_string(len)
            }
            Marker::Str16 => {
                let len = read_len(input, Buf::get_u16)?;
                self.read_string(len)
            }
            Marker::Str32 => {
                let len = read_len(input, Buf::get_u32)?;
                self.read_string(len)
            }
            Marker::Bin8 => {
                let len = read_len(input, Buf::get_u8)?;
                Ok(Value::Binary(self.read_blob(len)?))
            }
            Marker::Bin16 => {
                let len = read_len(input, Buf::get_u16)?;
                Ok(Value::Binary(self.read_blob(len)?))
            }
            Marker::Bin32 => {
                let len = read_len(input, Buf::get_u32)?;
                Ok(Value::Binary(self.read_blob(len)?))
            }
            Marker::FixArray(n) => self.read_array(n.into(), depth + 1),
            Marker::Array16 => {
                let len = read_len(input, Buf::get_u16)?;
                self.read_array(len, depth + 1)
            }
            Marker::Array32 => {
                let len = read_len(input, Buf::get_u32)?;
                self.read_array(len, depth + 1)
            }
            Marker::FixMap(n) => self.read_map(n.into(), depth + 1),
            Marker::Map16 => {
                let len = read_len(input, Buf::get_u16)?;
                self.read_map(len, depth + 1)
            }
            Marker::Map32 => {
                let len = read_len(input, Buf::get_u32)?;
                self.read_map(len, depth + 1)
            }
            marker if is_ext(marker) => {
                let len = read_ext_size(input, marker)?;
                self.read_ext(len)
            }
            ow => Err(MsgPackReadError::InvalidMarker(ow)),
        }
    }

    fn check_len(&self, len: u32) -> Result<usize, MsgPackReadError> {
        let max = self.config.max_len;
        if len > max {
            Err(MsgPackReadError::TooLong { len, max })
        } else {
            Ok(len as usize)
        }
    }

    fn read_blob(&mut self, len: u32) -> Result<Vec<u8>, MsgPackReadError> {
        let len = self.check_len(len)?;
        read_bytes(self.input, len)
    }

    fn read_string(&mut self, len: u32) -> Result<Value, MsgPackReadError> {
        let bytes = self.read_blob(len)?;
        if std::str::from_utf8(&bytes).is_err() {
            return Err(MsgPackReadError::InvalidUtf8);
        }
        Ok(Value::String(Text::new(bytes, Encoding::Utf8)))
    }

    fn enter(&self, depth: usize) -> Result<(), MsgPackReadError> {
        let max = self.config.max_depth;
        if depth > max {
            Err(MsgPackReadError::TooDeep(max))
        } else {
            Ok(())
        }
    }

    fn read_array(&mut self, len: u32, depth: usize) -> Result<Value, MsgPackReadError> {
        self.enter(depth)?;
        let len = self.check_len(len)?;
        // Every item takes at least one byte.
        if self.input.remaining() < len {
            return Err(MsgPackReadError::Incomplete);
        }
        let mut items = Vec::new();
        items
            .try_reserve_exact(len)
            .map_err(|_| MsgPackReadError::Allocation(len))?;
        for _ in 0..len {
            items.push(self.read_value(depth)?);
        }
        Ok(Value::Array(items))
    }

    fn read_map(&mut self, len: u32, depth: usize) -> Result<Value, MsgPackReadError> {
        self.enter(depth)?;
        let len = self.check_len(len)?;
        if (self.input.remaining() as u64) < 2 * len as u64 {
            return Err(MsgPackReadError::Incomplete);
        }
        let mut map = Map::new();
        map.try_reserve(len)
            .map_err(|_| MsgPackReadError::Allocation(len))?;
        for _ in 0..len {
            let key = match self.read_value(depth)? {
                Value::String(text) => text,
                ow => return Err(MsgPackReadError::NonTextKey(ow.kind())),
            };
            let value = self.read_value(depth)?;
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    fn read_ext(&mut self, len: u32) -> Result<Value, MsgPackReadError> {
        let len = self.check_len(len)?;
        if !self.input.has_remaining() {
            return Err(MsgPackReadError::Incomplete);
        }
        let ext_type = self.input.get_i8();
        let payload = read_bytes(self.input, len)?;
        match (ext_type, self.config.mode) {
            (TIMESTAMP_EXT, _) => read_timestamp_ext(&payload),
            (NULL_EXT, OperationMode::Preserving) => read_null_ext(&payload),
            (DATE_EXT, OperationMode::Preserving) => read_date_ext(&payload),
            (NUMBER_EXT, OperationMode::Preserving) => read_number_ext(&payload),
            (STRING_EXT, OperationMode::Preserving) => read_string_ext(&payload),
            (_, OperationMode::Preserving) => Err(MsgPackReadError::UnknownExtType(ext_type)),
            (_, OperationMode::Simple) => {
                trace!(ext_type, len, "Passing through an uninterpreted extension.");
                Ok(Value::Extension(Extension::new(ext_type, payload)))
            }
        }
    }
}

fn read_marker<R>(input: &mut R) -> Result<Marker, MsgPackReadError>
where
    R: Buf,
{
    if !input.has_remaining() {
        Err(MsgPackReadError::Incomplete)
    } else {
        Ok(Marker::from_u8(input.get_u8()))
    }
}

fn read_len<R, F, S>(input: &mut R, read: F) -> Result<u32, MsgPackReadError>
where
    R: Buf,
    F: Fn(&mut R) -> S,
    S: Into<u32>,
{
    if input.remaining() < size_of::<S>() {
        Err(MsgPackReadError::Incomplete)
    } else {
        Ok(read(input).into())
    }
}

fn compose_simple<R, F1, F2, S, T>(
    input: &mut R,
    read: F1,
    to_value: F2,
) -> Result<Value, MsgPackReadError>
where
    R: Buf,
    F1: Fn(&mut R) -> S,
    S: Into<T>,
    F2: FnOnce(T) -> Value,
{
    if input.remaining() < size_of::<S>() {
        Err(MsgPackReadError::Incomplete)
    } else {
        Ok(to_value(read(input).into()))
    }
}

fn read_bytes<R>(input: &mut R, len: usize) -> Result<Vec<u8>, MsgPackReadError>
where
    R: Buf,
{
    if input.remaining() < len {
        return Err(MsgPackReadError::Incomplete);
    }
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(len)
        .map_err(|_| MsgPackReadError::Allocation(len))?;
    bytes.resize(len, 0);
    input.copy_to_slice(&mut bytes);
    Ok(bytes)
}

fn is_ext(marker: Marker) -> bool {
    matches!(
        marker,
        Marker::FixExt1
            | Marker::FixExt2
            | Marker::FixExt4
            | Marker::FixExt8
            | Marker::FixExt16
            | Marker::Ext8
            | Marker::Ext16
            | Marker::Ext32
    )
}

fn read_ext_size<R>(input: &mut R, marker: Marker) -> Result<u32, MsgPackReadError>
where
    R: Buf,
{
    match marker {
        Marker::FixExt1 => Ok(1),
        Marker::FixExt2 => Ok(2),
        Marker::FixExt4 => Ok(4),
        Marker::FixExt8 => Ok(8),
        Marker::FixExt16 => Ok(16),
        Marker::Ext8 => read_len(input, Buf::get_u8),
        Marker::Ext16 => read_len(input, Buf::get_u16),
        Marker::Ext32 => read_len(input, Buf::get_u32),
        _ => Err(MsgPackReadError::InvalidMarker(marker)),
    }
}
