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

use thiserror::Error;

/// Selects how values with no native MessagePack representation are written and how extension
/// values are interpreted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationMode {
    /// Only native MessagePack types are written so that any consumer can read the output. Numbers,
    /// dates, nulls and string encodings are not preserved exactly.
    #[default]
    Simple = 0,
    /// Custom extension types are used so that every value can be recovered exactly. The output
    /// can only be fully interpreted by a reader in the same mode.
    Preserving = 1,
}

/// An integer did not correspond to any [`OperationMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not a valid operation mode.")]
pub struct InvalidOperationMode(pub i64);

impl TryFrom<i64> for OperationMode {
    type Error = InvalidOperationMode;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OperationMode::Simple),
            1 => Ok(OperationMode::Preserving),
            ow => Err(InvalidOperationMode(ow)),
        }
    }
}

impl From<OperationMode> for i64 {
    fn from(mode: OperationMode) -> Self {
        mode as i64
    }
}
