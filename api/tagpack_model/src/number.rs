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
use std::str::FromStr;

use thiserror::Error;

/// The precision assigned to numbers that are created without one.
pub const DEFAULT_PRECISION: u32 = 128;

/// An arbitrary precision decimal number. Finite numbers keep their exact decimal digits along
/// with a precision so that neither is lost in transit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    Finite { digits: String, precision: u32 },
    NaN,
    Infinity,
    NegInfinity,
}

/// The digits of a number were not a valid decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid decimal number.")]
pub struct NumberError(pub String);

impl Number {
    /// Create a finite number from a decimal literal of the form `[+-]d+[.d+][(e|E)[+-]d+]`.
    pub fn new<S: Into<String>>(digits: S, precision: u32) -> Result<Number, NumberError> {
        let digits = digits.into();
        if is_decimal(&digits) {
            Ok(Number::Finite { digits, precision })
        } else {
            Err(NumberError(digits))
        }
    }

    pub fn with_default_precision<S: Into<String>>(digits: S) -> Result<Number, NumberError> {
        Number::new(digits, DEFAULT_PRECISION)
    }

    /// Create a number from a double. The digits are the shortest representation that round
    /// trips to the same double.
    pub fn from_f64(x: f64, precision: u32) -> Number {
        if x.is_nan() {
            Number::NaN
        } else if x.is_infinite() {
            if x > 0.0 {
                Number::Infinity
            } else {
                Number::NegInfinity
            }
        } else {
            Number::Finite {
                digits: format!("{:e}", x),
                precision,
            }
        }
    }

    pub fn digits(&self) -> Option<&str> {
        match self {
            Number::Finite { digits, .. } => Some(digits.as_str()),
            _ => None,
        }
    }

    pub fn precision(&self) -> Option<u32> {
        match self {
            Number::Finite { precision, .. } => Some(*precision),
            _ => None,
        }
    }

    /// Whether the digits of a finite number form a decimal literal. This only fails for a
    /// [`Number::Finite`] built directly rather than through [`Number::new`].
    pub fn is_valid(&self) -> bool {
        match self {
            Number::Finite { digits, .. } => is_decimal(digits),
            _ => true,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Number::NaN)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Number::Infinity | Number::NegInfinity)
    }

    /// The nearest double to this number.
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Finite { digits, .. } => digits.parse().unwrap_or(f64::NAN),
            Number::NaN => f64::NAN,
            Number::Infinity => f64::INFINITY,
            Number::NegInfinity => f64::NEG_INFINITY,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Finite { digits, .. } => f.write_str(digits),
            Number::NaN => f.write_str("NaN"),
            Number::Infinity => f.write_str("inf"),
            Number::NegInfinity => f.write_str("-inf"),
        }
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::Finite {
            digits: n.to_string(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NaN" | "nan" => Ok(Number::NaN),
            "inf" | "+inf" | "Infinity" => Ok(Number::Infinity),
            "-inf" | "-Infinity" => Ok(Number::NegInfinity),
            _ => Number::with_default_precision(s),
        }
    }
}

fn is_decimal(s: &str) -> bool {
    fn digits(bytes: &[u8]) -> usize {
        bytes.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let bytes = s.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_len = digits(&bytes[i..]);
    if int_len == 0 {
        return false;
    }
    i += int_len;

    if bytes.get(i) == Some(&b'.') {
        let frac_len = digits(&bytes[i + 1..]);
        if frac_len == 0 {
            return false;
        }
        i += 1 + frac_len;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_len = digits(&bytes[i..]);
        if exp_len == 0 {
            return false;
        }
        i += exp_len;
    }

    i == bytes.len()
}
