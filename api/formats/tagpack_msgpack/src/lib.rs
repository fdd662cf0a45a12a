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

//! MessagePack support for the tagpack value model.
//!
//! Native MessagePack types are used wherever they exist. The kinds of value that MessagePack
//! cannot represent directly are written in one of two ways, depending on the
//! [`OperationMode`](tagpack_model::OperationMode):
//!
//! - `Simple`: the nearest native type is used (numbers become doubles, dates become strings,
//!   nulls become nil and text is converted to UTF-8).
//! - `Preserving`: the following extension types are used so that every value can be read back
//!   exactly.
//!
//! | Code | Kind   | Payload (big endian)                                              |
//! |------|--------|-------------------------------------------------------------------|
//! | 0    | Null   | empty                                                             |
//! | 1    | Date   | `1u8, i64 epoch seconds, i32 micros, i32 offset` (absolute) or    |
//! |      |        | `0u8, i32 x 7 (years .. micros)` (relative)                        |
//! | 2    | Number | `u8 kind` (`0` NaN, `1` +inf, `2` -inf) or `3u8, u32 precision, ascii digits` |
//! | 3    | String | `u8 encoding id, text bytes`                                      |
//!
//! The standard timestamp extension (code -1) is understood in both modes.

mod config;
mod error;
pub mod extension;
mod reader;
mod writer;

pub use config::MsgPackConfig;
pub use error::{ErrorKind, MsgPackReadError, MsgPackWriteError};
pub use reader::{read_all_from_msg_pack, read_from_msg_pack};
pub use writer::{write_to_msg_pack, MsgPackWriter};

pub const NULL_EXT: i8 = 0;
pub const DATE_EXT: i8 = 1;
pub const NUMBER_EXT: i8 = 2;
pub const STRING_EXT: i8 = 3;
pub const TIMESTAMP_EXT: i8 = -1;
