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

//! The dynamically typed value model that is written to and read from MessagePack.

mod extension;
mod map;
mod mode;
mod number;
#[cfg(test)]
mod tests;
pub mod text;
pub mod time;
mod value;

pub use extension::Extension;
pub use map::Map;
pub use mode::{InvalidOperationMode, OperationMode};
pub use number::{Number, NumberError, DEFAULT_PRECISION};
pub use text::{Encoding, Text};
pub use time::{AbsoluteDate, DateTime, RelativeDate};
pub use value::{Value, ValueKind};
