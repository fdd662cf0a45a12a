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
use std::io;

use rmp::encode::ValueWriteError;
use rmp::Marker;
use thiserror::Error;

use tagpack_model::text::TranscodeError;
use tagpack_model::ValueKind;

/// The classes of failure that can occur when writing or reading MessagePack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The underlying reader or writer failed.
    IoFault,
    /// The data is not valid MessagePack or not valid for its declared type.
    InvalidData,
    /// A value of the wrong type was encountered.
    TypeMismatch,
    /// A size exceeded the limit for the operation.
    TooBig,
    /// Storage for a value could not be allocated.
    AllocationFailure,
    /// An internal contract was violated.
    UsageBug,
    /// An extension type that could not be interpreted.
    UnknownExtension,
    /// A value that cannot be written in the active mode.
    UnsupportedValue,
}

impl ErrorKind {
    /// The fixed description of the kind.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::IoFault => "The reader or writer failed to fill or flush its buffer.",
            ErrorKind::InvalidData => "The data is not valid MessagePack.",
            ErrorKind::TypeMismatch => {
                "The type or value range of the data did not match what was expected."
            }
            ErrorKind::TooBig => {
                "A read or write was larger than the maximum size allowed for the operation."
            }
            ErrorKind::AllocationFailure => "An allocation failure occurred.",
            ErrorKind::UsageBug => "The MessagePack codec was used incorrectly.",
            ErrorKind::UnknownExtension => "The data contained an unknown extension type.",
            ErrorKind::UnsupportedValue => "The value cannot be serialized in this mode.",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Writing out to MessagePack can fail because of an IO error, because a value exceeds the
/// limitations of the MessagePack format or because a value has no representation in the active
/// mode.
#[derive(Debug, Error)]
pub enum MsgPackWriteError {
    #[error("An error occurred writing the content: {0}")]
    Io(#[from] io::Error),
    #[error("{0} items is too many to encode as MessagePack.")]
    TooManyItems(usize),
    #[error("{0} bytes is too large to encode as MessagePack.")]
    TooLarge(usize),
    #[error("Values are nested more than {0} levels deep.")]
    TooDeep(usize),
    #[error("A UTF-8 string contained invalid data.")]
    InvalidUtf8,
    #[error("Failed to convert a string to UTF-8: {0}")]
    Transcode(#[from] TranscodeError),
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),
}

impl MsgPackWriteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MsgPackWriteError::Io(_) => ErrorKind::IoFault,
            MsgPackWriteError::TooManyItems(_)
            | MsgPackWriteError::TooLarge(_)
            | MsgPackWriteError::TooDeep(_) => ErrorKind::TooBig,
            MsgPackWriteError::InvalidUtf8 | MsgPackWriteError::Transcode(_) => {
                ErrorKind::InvalidData
            }
            MsgPackWriteError::UnsupportedValue(_) => ErrorKind::UnsupportedValue,
        }
    }
}

impl From<ValueWriteError> for MsgPackWriteError {
    fn from(err: ValueWriteError) -> Self {
        MsgPackWriteError::Io(err.into())
    }
}

/// Reading MessagePack data can fail if the bytes do not constitute valid MessagePack, the buffer
/// ends part way through a value or a value cannot be represented in the active mode.
#[derive(Debug, Error, PartialEq)]
pub enum MsgPackReadError {
    #[error("The input ended part way through a value.")]
    Incomplete,
    #[error("Unexpected message pack marker: {0:?}")]
    InvalidMarker(Marker),
    #[error("A string value contained invalid UTF8.")]
    InvalidUtf8,
    #[error("Map keys must be strings but a {0} was found.")]
    NonTextKey(ValueKind),
    #[error("{0} is not a recognized extension code.")]
    UnknownExtType(i8),
    #[error("Invalid payload for extension {ext_type}: {reason}")]
    InvalidExtension { ext_type: i8, reason: &'static str },
    #[error("{remaining} bytes of extension {ext_type} were not consumed.")]
    UnconsumedExtension { ext_type: i8, remaining: usize },
    #[error("A length of {len} exceeds the limit of {max}.")]
    TooLong { len: u32, max: u32 },
    #[error("Values are nested more than {0} levels deep.")]
    TooDeep(usize),
    #[error("Failed to allocate space for {0} elements.")]
    Allocation(usize),
}

impl MsgPackReadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MsgPackReadError::Incomplete
            | MsgPackReadError::InvalidMarker(_)
            | MsgPackReadError::InvalidUtf8
            | MsgPackReadError::InvalidExtension { .. } => ErrorKind::InvalidData,
            MsgPackReadError::NonTextKey(_) => ErrorKind::TypeMismatch,
            MsgPackReadError::UnknownExtType(_) => ErrorKind::UnknownExtension,
            MsgPackReadError::UnconsumedExtension { .. } => ErrorKind::UsageBug,
            MsgPackReadError::TooLong { .. } | MsgPackReadError::TooDeep(_) => ErrorKind::TooBig,
            MsgPackReadError::Allocation(_) => ErrorKind::AllocationFailure,
        }
    }
}
