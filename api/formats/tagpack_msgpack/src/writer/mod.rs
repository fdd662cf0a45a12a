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

use std::io;
use std::io::Write;

use bytes::{Bytes, BytesMut};
use rmp::encode::{
    write_array_len, write_bin, write_bool, write_f64, write_map_len, write_nil, write_sint,
    write_str,
};
use tracing::trace;

use tagpack_model::text::Transcoder;
use tagpack_model::{DateTime, Map, Number, OperationMode, Text, Value};

use crate::extension::{
    invalid_number, write_date_ext, write_null_ext, write_number_ext, write_opaque_ext,
    write_string_ext,
};
use crate::{MsgPackConfig, MsgPackWriteError};


/// Write a [`Value`] as MessagePack into a new buffer.
///
/// # Arguments
/// * `value` - The value to write.
/// * `config` - The mode that determines how values with no native MessagePack representation
///   are written and the deepest nesting that will be written.
/// * `transcoder` - Converts non UTF-8 text in [`OperationMode::Simple`] mode.
pub fn write_to_msg_pack<T>(
    value: &Value,
    config: &MsgPackConfig,
    transcoder: &T,
) -> Result<Bytes, MsgPackWriteError>
where
    T: Transcoder + ?Sized,
{
    let mut writer = MsgPackWriter::new(BytesMutWrite::default(), *config, transcoder);
    writer.write_value(value)?;
    let bytes = writer.into_inner().freeze();
    trace!(len = bytes.len(), mode = ?config.mode, "Wrote value as MessagePack.");
    Ok(bytes)
}

/// Writes [`Value`]s to an underlying [`Write`] as MessagePack.
///
/// Booleans, integers, floats and binary data always use the corresponding native MessagePack
/// types, as does UTF-8 text. Nulls, dates, numbers and text in other encodings are written
/// according to the [`OperationMode`]: as the nearest native type in `Simple` mode or as an
/// extension in `Preserving` mode. Opaque extensions are written back verbatim in both modes.
///
/// Arrays and maps nested more deeply than the configured `max_depth` are rejected, so that
/// anything written can be read back with the same configuration.
pub struct MsgPackWriter<'a, W, T: ?Sized> {
    out: W,
    mode: OperationMode,
    max_depth: usize,
    transcoder: &'a T,
}

impl<'a, W, T> MsgPackWriter<'a, W, T>
where
    W: Write,
    T: Transcoder + ?Sized,
{
    pub fn new(out: W, config: MsgPackConfig, transcoder: &'a T) -> Self {
        MsgPackWriter {
            out,
            mode: config.mode,
            max_depth: config.max_depth,
            transcoder,
        }
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a value and, recursively, all of its children.
    pub fn write_value(&mut self, value: &Value) -> Result<(), MsgPackWriteError> {
        self.write_nested(value, 0)
    }

    /// Write a value nested inside `depth` arrays or maps.
    fn write_nested(&mut self, value: &Value, depth: usize) -> Result<(), MsgPackWriteError> {
        match value {
            Value::Nil => write_nil(&mut self.out)?,
            Value::Null => match self.mode {
                OperationMode::Simple => write_nil(&mut self.out)?,
                OperationMode::Preserving => write_null_ext(&mut self.out)?,
            },
            Value::Bool(b) => write_bool(&mut self.out, *b)?,
            Value::Int(n) => {
                write_sint(&mut self.out, *n)?;
            }
            Value::Float(x) => write_f64(&mut self.out, *x)?,
            Value::Binary(blob) => {
                check_len(blob.len())?;
                write_bin(&mut self.out, blob)?;
            }
            Value::String(text) => self.write_text(text)?,
            Value::Array(items) => self.write_array(items, depth + 1)?,
            Value::Map(map) => self.write_map(map, depth + 1)?,
            Value::DateTime(date) => self.write_date(date)?,
            Value::Number(number) => self.write_number(number)?,
            Value::Extension(ext) => write_opaque_ext(&mut self.out, ext)?,
        }
        Ok(())
    }

    fn write_text(&mut self, text: &Text) -> Result<(), MsgPackWriteError> {
        if text.is_utf8() {
            let string =
                std::str::from_utf8(text.as_bytes()).map_err(|_| MsgPackWriteError::InvalidUtf8)?;
            self.write_utf8(string)
        } else {
            match self.mode {
                OperationMode::Simple => {
                    let converted = self.transcoder.to_utf8(text.as_bytes(), text.encoding())?;
                    self.write_utf8(&converted)
                }
                OperationMode::Preserving => write_string_ext(&mut self.out, text),
            }
        }
    }

    fn write_utf8(&mut self, string: &str) -> Result<(), MsgPackWriteError> {
        check_len(string.len())?;
        write_str(&mut self.out, string)?;
        Ok(())
    }

    fn write_date(&mut self, date: &DateTime) -> Result<(), MsgPackWriteError> {
        match self.mode {
            OperationMode::Simple => {
                let formatted = date.to_iso8601().ok_or_else(|| {
                    MsgPackWriteError::UnsupportedValue(format!(
                        "{:?} cannot be represented as a calendar date.",
                        date
                    ))
                })?;
                self.write_utf8(&formatted)
            }
            OperationMode::Preserving => write_date_ext(&mut self.out, date),
        }
    }

    fn write_number(&mut self, number: &Number) -> Result<(), MsgPackWriteError> {
        if !number.is_valid() {
            return Err(invalid_number(number));
        }
        match self.mode {
            OperationMode::Simple => {
                write_f64(&mut self.out, number.to_f64())?;
                Ok(())
            }
            OperationMode::Preserving => write_number_ext(&mut self.out, number),
        }
    }

    fn enter(&self, depth: usize) -> Result<(), MsgPackWriteError> {
        if depth > self.max_depth {
            Err(MsgPackWriteError::TooDeep(self.max_depth))
        } else {
            Ok(())
        }
    }

    fn write_array(&mut self, items: &[Value], depth: usize) -> Result<(), MsgPackWriteError> {
        self.enter(depth)?;
        let len = u32::try_from(items.len())
            .map_err(|_| MsgPackWriteError::TooManyItems(items.len()))?;
        write_array_len(&mut self.out, len)?;
        for item in items {
            self.write_nested(item, depth)?;
        }
        Ok(())
    }

    fn write_map(&mut self, map: &Map, depth: usize) -> Result<(), MsgPackWriteError> {
        self.enter(depth)?;
        let len =
            u32::try_from(map.len()).map_err(|_| MsgPackWriteError::TooManyItems(map.len()))?;
        write_map_len(&mut self.out, len)?;
        for (key, value) in map {
            self.write_text(key)?;
            self.write_nested(value, depth)?;
        }
        Ok(())
    }
}

fn check_len(len: usize) -> Result<u32, MsgPackWriteError> {
    u32::try_from(len).map_err(|_| MsgPackWriteError::TooLarge(len))
}

/// Wrapped around a BytesMut that implements io::Write for use by rmp.
#[derive(Default)]
pub(crate) struct BytesMutWrite(BytesMut);

impl BytesMutWrite {
    fn freeze(self) -> Bytes {
        self.0.freeze()
    }
}

impl Write for BytesMutWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
