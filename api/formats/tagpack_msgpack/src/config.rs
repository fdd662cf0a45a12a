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

use tagpack_model::OperationMode;

const DEFAULT_MAX_LEN: u32 = u32::MAX;
const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration for reading and writing MessagePack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsgPackConfig {
    /// Policy for values that have no native MessagePack representation.
    pub mode: OperationMode,
    /// The largest collection count or byte length that will be accepted when reading.
    pub max_len: u32,
    /// The deepest nesting of arrays and maps that will be accepted when reading.
    pub max_depth: usize,
}

impl MsgPackConfig {
    pub fn with_mode(mode: OperationMode) -> Self {
        MsgPackConfig {
            mode,
            ..Default::default()
        }
    }
}

impl Default for MsgPackConfig {
    fn default() -> Self {
        Self {
            mode: OperationMode::Simple,
            max_len: DEFAULT_MAX_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
