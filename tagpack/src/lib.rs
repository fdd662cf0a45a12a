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

//! A MessagePack codec for a dynamic value model.
//!
//! Values are written with native MessagePack types where they exist. Nulls, arbitrary precision
//! numbers, dates and text in encodings other than UTF-8 are handled according to an
//! [`OperationMode`]:
//!
//! - [`OperationMode::Simple`] writes the nearest native type so that any MessagePack consumer can
//!   read the output. Some information is lost.
//! - [`OperationMode::Preserving`] writes custom extensions so that every value reads back
//!   exactly, provided the reader is also in `Preserving` mode.
//!
//! ```
//! use tagpack::{pack, unpack, OperationMode, Value};
//!
//! let value = Value::Array(vec![Value::Null, Value::text("hello")]);
//! let bytes = pack(&value, OperationMode::Preserving).unwrap();
//! assert_eq!(unpack(&bytes, OperationMode::Preserving).unwrap(), value);
//! ```

mod codec;

#[doc(inline)]
pub use tagpack_model as model;

pub use codec::{pack, unpack, MsgPack, MsgPackError};
pub use tagpack_model::{
    AbsoluteDate, DateTime, Encoding, Extension, InvalidOperationMode, Map, Number, NumberError,
    OperationMode, RelativeDate, Text, Value, ValueKind, DEFAULT_PRECISION,
};

pub mod text {
    pub use tagpack_model::text::{StandardTranscoder, TranscodeError, Transcoder, UnknownEncoding};
}

pub mod msgpack {
    pub use tagpack_msgpack::extension;
    pub use tagpack_msgpack::{
        read_all_from_msg_pack, read_from_msg_pack, write_to_msg_pack, MsgPackWriter,
    };
    pub use tagpack_msgpack::{DATE_EXT, NULL_EXT, NUMBER_EXT, STRING_EXT, TIMESTAMP_EXT};
}

pub mod config {
    pub use tagpack_msgpack::MsgPackConfig;
}

pub mod error {
    pub use super::codec::MsgPackError;
    pub use tagpack_msgpack::{ErrorKind, MsgPackReadError, MsgPackWriteError};
}
