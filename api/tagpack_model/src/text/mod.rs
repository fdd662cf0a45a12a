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

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

mod transcode;

pub use transcode::{StandardTranscoder, TranscodeError, Transcoder};

/// The text encodings that a [`Text`] value may carry. The discriminant of each variant is the
/// identifier used for the encoding in serialized data and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Encoding {
    UsAscii = 0,
    Utf8 = 1,
    Utf16 = 2,
    Utf16Be = 3,
    Utf16Le = 4,
    Iso8859_1 = 5,
    Iso8859_2 = 6,
    Iso8859_3 = 7,
    Iso8859_4 = 8,
    Iso8859_5 = 9,
    Iso8859_6 = 10,
    Iso8859_7 = 11,
    Iso8859_8 = 12,
    Iso8859_9 = 13,
    Iso8859_10 = 14,
    Iso8859_11 = 15,
    Iso8859_13 = 16,
    Iso8859_14 = 17,
    Iso8859_15 = 18,
    Iso8859_16 = 19,
    Koi8R = 20,
    Koi8U = 21,
    Koi7 = 22,
}

/// Every encoding with its canonical name, ordered by identifier.
const ENCODINGS: [(Encoding, &str); 23] = [
    (Encoding::UsAscii, "US-ASCII"),
    (Encoding::Utf8, "UTF-8"),
    (Encoding::Utf16, "UTF-16"),
    (Encoding::Utf16Be, "UTF-16BE"),
    (Encoding::Utf16Le, "UTF-16LE"),
    (Encoding::Iso8859_1, "ISO-8859-1"),
    (Encoding::Iso8859_2, "ISO-8859-2"),
    (Encoding::Iso8859_3, "ISO-8859-3"),
    (Encoding::Iso8859_4, "ISO-8859-4"),
    (Encoding::Iso8859_5, "ISO-8859-5"),
    (Encoding::Iso8859_6, "ISO-8859-6"),
    (Encoding::Iso8859_7, "ISO-8859-7"),
    (Encoding::Iso8859_8, "ISO-8859-8"),
    (Encoding::Iso8859_9, "ISO-8859-9"),
    (Encoding::Iso8859_10, "ISO-8859-10"),
    (Encoding::Iso8859_11, "ISO-8859-11"),
    (Encoding::Iso8859_13, "ISO-8859-13"),
    (Encoding::Iso8859_14, "ISO-8859-14"),
    (Encoding::Iso8859_15, "ISO-8859-15"),
    (Encoding::Iso8859_16, "ISO-8859-16"),
    (Encoding::Koi8R, "KOI8-R"),
    (Encoding::Koi8U, "KOI8-U"),
    (Encoding::Koi7, "KOI7"),
];

impl Encoding {
    /// The identifier of the encoding in serialized data.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Encoding> {
        ENCODINGS.get(usize::from(id)).map(|(enc, _)| *enc)
    }

    pub fn name(self) -> &'static str {
        ENCODINGS[usize::from(self.id())].1
    }

    pub fn all() -> impl Iterator<Item = Encoding> {
        ENCODINGS.iter().map(|(enc, _)| *enc)
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a supported encoding.")]
pub struct UnknownEncoding(pub String);

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let alias = match name.to_ascii_uppercase().as_str() {
            "ASCII" => Some(Encoding::UsAscii),
            "UTF8" => Some(Encoding::Utf8),
            "UTF16" => Some(Encoding::Utf16),
            "LATIN1" | "LATIN-1" => Some(Encoding::Iso8859_1),
            _ => None,
        };
        alias
            .or_else(|| {
                ENCODINGS
                    .iter()
                    .find(|(_, n)| n.eq_ignore_ascii_case(name))
                    .map(|(enc, _)| *enc)
            })
            .ok_or_else(|| UnknownEncoding(s.to_string()))
    }
}

/// A sequence of bytes holding text in a specific [`Encoding`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Text {
    encoding: Encoding,
    bytes: Vec<u8>,
}

impl Text {
    /// Wrap bytes that are encoded with the given encoding. The bytes are not validated.
    pub fn new(bytes: Vec<u8>, encoding: Encoding) -> Self {
        Text { encoding, bytes }
    }

    pub fn utf8<S: Into<String>>(text: S) -> Self {
        Text {
            encoding: Encoding::Utf8,
            bytes: text.into().into_bytes(),
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn is_utf8(&self) -> bool {
        self.encoding == Encoding::Utf8
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// View the text as a string slice if it is UTF-8 encoded and valid.
    pub fn as_str(&self) -> Option<&str> {
        if self.is_utf8() {
            std::str::from_utf8(&self.bytes).ok()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_parts(self) -> (Vec<u8>, Encoding) {
        let Text { encoding, bytes } = self;
        (bytes, encoding)
    }
}

impl Debug for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "Text({:?})", s),
            None => f
                .debug_struct("Text")
                .field("encoding", &self.encoding)
                .field("bytes", &self.bytes)
                .finish(),
        }
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::utf8(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::utf8(s)
    }
}
