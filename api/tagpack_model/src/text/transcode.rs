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

use thiserror::Error;

use super::Encoding;

/// Conversion of text from one of the supported encodings to UTF-8.
pub trait Transcoder {
    fn to_utf8(&self, bytes: &[u8], from: Encoding) -> Result<String, TranscodeError>;
}

impl<T: Transcoder + ?Sized> Transcoder for &T {
    fn to_utf8(&self, bytes: &[u8], from: Encoding) -> Result<String, TranscodeError> {
        (**self).to_utf8(bytes, from)
    }
}

/// Reasons that text could not be converted to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    #[error("Conversion from {0} is not supported.")]
    Unsupported(Encoding),
    #[error("Invalid {encoding} data at byte offset {offset}.")]
    InvalidInput { encoding: Encoding, offset: usize },
    #[error("{0} data has an odd number of bytes.")]
    Truncated(Encoding),
}

/// Converts the encodings that need no lookup tables: ASCII, UTF-8, the UTF-16 family and
/// ISO-8859-1.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTranscoder;

impl Transcoder for StandardTranscoder {
    fn to_utf8(&self, bytes: &[u8], from: Encoding) -> Result<String, TranscodeError> {
        match from {
            Encoding::UsAscii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(TranscodeError::InvalidInput {
                    encoding: from,
                    offset,
                }),
                None => Ok(bytes.iter().map(|b| char::from(*b)).collect()),
            },
            Encoding::Utf8 => std::str::from_utf8(bytes)
                .map(ToString::to_string)
                .map_err(|e| TranscodeError::InvalidInput {
                    encoding: from,
                    offset: e.valid_up_to(),
                }),
            Encoding::Utf16 => match bytes {
                [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, from, u16::from_be_bytes, 2),
                [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, from, u16::from_le_bytes, 2),
                _ => decode_utf16(bytes, from, u16::from_be_bytes, 0),
            },
            Encoding::Utf16Be => decode_utf16(bytes, from, u16::from_be_bytes, 0),
            Encoding::Utf16Le => decode_utf16(bytes, from, u16::from_le_bytes, 0),
            Encoding::Iso8859_1 => Ok(bytes.iter().map(|b| char::from(*b)).collect()),
            ow => Err(TranscodeError::Unsupported(ow)),
        }
    }
}

fn decode_utf16<F>(
    bytes: &[u8],
    encoding: Encoding,
    to_unit: F,
    base_offset: usize,
) -> Result<String, TranscodeError>
where
    F: Fn([u8; 2]) -> u16,
{
    if bytes.len() % 2 != 0 {
        return Err(TranscodeError::Truncated(encoding));
    }
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    let mut out = String::with_capacity(bytes.len() / 2);
    let mut offset = base_offset;
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(c) => {
                out.push(c);
                offset += c.len_utf16() * 2;
            }
            Err(_) => return Err(TranscodeError::InvalidInput { encoding, offset }),
        }
    }
    Ok(out)
}
