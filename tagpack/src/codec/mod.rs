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

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use tagpack_model::text::{StandardTranscoder, Transcoder};
use tagpack_model::{OperationMode, Value};
use tagpack_msgpack::{
    read_all_from_msg_pack, write_to_msg_pack, ErrorKind, MsgPackConfig, MsgPackReadError,
    MsgPackWriteError,
};


/// Either direction of the codec failed.
#[derive(Debug, Error)]
pub enum MsgPackError {
    #[error("Packing failed: {0}")]
    Pack(#[from] MsgPackWriteError),
    #[error("Unpacking failed: {0}")]
    Unpack(#[from] MsgPackReadError),
}

impl MsgPackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MsgPackError::Pack(err) => err.kind(),
            MsgPackError::Unpack(err) => err.kind(),
        }
    }
}

/// Pack a value with the default limits and the [`StandardTranscoder`].
pub fn pack(value: &Value, mode: OperationMode) -> Result<Bytes, MsgPackWriteError> {
    MsgPack::new(mode).pack(value)
}

/// Unpack every value in a buffer with the default limits. See [`MsgPack::unpack`].
pub fn unpack(bytes: &[u8], mode: OperationMode) -> Result<Value, MsgPackReadError> {
    MsgPack::new(mode).unpack(bytes)
}

/// A MessagePack codec with a settable [`OperationMode`].
///
/// The same handle should be used, or at least the same mode, on both sides of a conversation:
/// data packed in `Preserving` mode contains extensions that a `Simple` mode reader will pass
/// through as opaque [`Value::Extension`]s.
#[derive(Debug, Clone, Default)]
pub struct MsgPack<T = StandardTranscoder> {
    config: MsgPackConfig,
    transcoder: T,
}

impl MsgPack {
    pub fn new(mode: OperationMode) -> Self {
        MsgPack::with_config(MsgPackConfig::with_mode(mode))
    }

    pub fn with_config(config: MsgPackConfig) -> Self {
        MsgPack {
            config,
            transcoder: StandardTranscoder,
        }
    }
}

impl<T: Transcoder> MsgPack<T> {
    /// Replace the transcoder used to convert non UTF-8 text in `Simple` mode.
    pub fn with_transcoder<U: Transcoder>(self, transcoder: U) -> MsgPack<U> {
        MsgPack {
            config: self.config,
            transcoder,
        }
    }

    pub fn mode(&self) -> OperationMode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: OperationMode) {
        self.config.mode = mode;
    }

    pub fn config(&self) -> &MsgPackConfig {
        &self.config
    }

    pub fn pack(&self, value: &Value) -> Result<Bytes, MsgPackWriteError> {
        let bytes = write_to_msg_pack(value, &self.config, &self.transcoder)?;
        debug!(mode = ?self.config.mode, len = bytes.len(), "Packed a value.");
        Ok(bytes)
    }

    /// Unpack all of the values in a buffer. An empty buffer is [`Value::Nil`] and several
    /// consecutive values are returned together as a [`Value::Array`].
    pub fn unpack(&self, mut bytes: &[u8]) -> Result<Value, MsgPackReadError> {
        let len = bytes.len();
        let value = read_all_from_msg_pack(&mut bytes, &self.config)?;
        debug!(mode = ?self.config.mode, len, "Unpacked a value.");
        Ok(value)
    }
}
