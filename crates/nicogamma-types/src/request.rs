use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The only protocol version the comment server understands.
pub const SUPPORTED_VERSION: &str = "20061206";

/// Maximum number of digits accepted in a `res_from` numeral.
const RES_FROM_MAX_DIGITS: usize = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid res_from numeral: {0:?}")]
pub struct InvalidResFrom(pub String);

/// Client cursor from the `res_from` attribute.
///
/// Kept as the literal numeral the client sent so that a refresh poll can
/// echo it back byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResFrom(String);

impl ResFrom {
    /// Validates `-?[0-9]{1,10}`.
    pub fn new(numeral: impl Into<String>) -> Result<Self, InvalidResFrom> {
        let numeral = numeral.into();
        let digits = numeral.strip_prefix('-').unwrap_or(&numeral);
        let valid = !digits.is_empty()
            && digits.len() <= RES_FROM_MAX_DIGITS
            && digits.bytes().all(|b| b.is_ascii_digit());
        if valid {
            Ok(Self(numeral))
        } else {
            Err(InvalidResFrom(numeral))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the cursor. Ten digits always fit in an `i64`.
    pub fn value(&self) -> i64 {
        self.0.parse().unwrap_or_default()
    }

    /// A refresh poll is any numeral that does not start with `-`, so `-0`
    /// still counts as a fetch.
    pub fn is_refresh(&self) -> bool {
        !self.0.starts_with('-')
    }
}

impl fmt::Display for ResFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResFrom {
    type Err = InvalidResFrom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ResFrom {
    type Error = InvalidResFrom;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResFrom> for String {
    fn from(value: ResFrom) -> Self {
        value.0
    }
}

/// A parsed `<thread res_from=".." version="20061206" thread=".." />` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRequest {
    pub res_from: ResFrom,
    pub thread_id: u64,
}

impl ThreadRequest {
    pub fn new(res_from: ResFrom, thread_id: u64) -> Self {
        Self { res_from, thread_id }
    }

    pub fn version(&self) -> &'static str {
        SUPPORTED_VERSION
    }

    pub fn is_refresh(&self) -> bool {
        self.res_from.is_refresh()
    }
}
