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

/// An opaque MessagePack extension: a type code and the payload bytes. The payload is never
/// interpreted by the codec and is written back out exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    ext_type: i8,
    data: Vec<u8>,
}

impl Extension {
    pub fn new(ext_type: i8, data: Vec<u8>) -> Self {
        Extension { ext_type, data }
    }

    pub fn ext_type(&self) -> i8 {
        self.ext_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Take back ownership of the type code and payload.
    pub fn into_parts(self) -> (i8, Vec<u8>) {
        let Extension { ext_type, data } = self;
        (ext_type, data)
    }
}
