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

use std::fmt::{Display, Formatter};

use crate::{DateTime, Extension, Map, Number, Text};

/// The value model that is serialized to MessagePack.
///
/// Values form a tree with no sharing; every node is exclusively owned by its parent. [`Value::Nil`]
/// is the absence of a value while [`Value::Null`] is an explicit null. The two are only
/// distinguished on the wire in [`crate::OperationMode::Preserving`] mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Raw bytes with no associated encoding.
    Binary(Vec<u8>),
    /// Text in one of the supported encodings.
    String(Text),
    Array(Vec<Value>),
    Map(Map),
    DateTime(DateTime),
    /// An arbitrary precision decimal number.
    Number(Number),
    /// An explicit null, distinct from [`Value::Nil`].
    Null,
    /// An extension payload that is passed through without interpretation.
    Extension(Extension),
}

/// Discriminant for the variants of [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Nil,
    Bool,
    Int,
    Float,
    Binary,
    String,
    Array,
    Map,
    DateTime,
    Number,
    Null,
    Extension,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Nil => "nil",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Binary => "binary",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
            ValueKind::DateTime => "date",
            ValueKind::Number => "number",
            ValueKind::Null => "null",
            ValueKind::Extension => "extension",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Binary(_) => ValueKind::Binary,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Number(_) => ValueKind::Number,
            Value::Null => ValueKind::Null,
            Value::Extension(_) => ValueKind::Extension,
        }
    }

    /// Create a UTF-8 string value.
    pub fn text<S: Into<String>>(text: S) -> Value {
        Value::String(Text::utf8(text))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

/// Unsigned integers that do not fit in an `i64` become [`Value::Number`].
impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Number(n.into()),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

impl From<Text> for Value {
    fn from(t: Text) -> Self {
        Value::String(t)
    }
}

impl From<Vec<u8>> for Value {
    fn from(blob: Vec<u8>) -> Self {
        Value::Binary(blob)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<DateTime> for Value {
    fn from(date: DateTime) -> Self {
        Value::DateTime(date)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Extension> for Value {
    fn from(ext: Extension) -> Self {
        Value::Extension(ext)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(maybe: Option<T>) -> Self {
        maybe.map(Into::into).unwrap_or(Value::Nil)
    }
}
