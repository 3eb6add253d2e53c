/*!
Traits for converting claimed tokens into typed values.

Conversion happens at resolution time, once a token has been claimed for an
option or positional. Most types get their conversion for free through
[`ParsedValue`], which hooks into [`FromStr`]. Types that need the raw
argument bytes (because they don't care about UTF-8) should implement
[`RawValue`] instead.
*/

use core::{fmt::Display, str::FromStr};

use claimant_lexer::Arg;
use thiserror::Error;

/// A claimed token couldn't be converted into its destination type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The argument wasn't valid UTF-8 and should be
    #[error("argument isn't valid UTF-8: {arg:?}")]
    InvalidUtf8 { arg: String },

    /// The argument was valid UTF-8, but it failed to parse into an instance
    /// of the type
    #[error("couldn't parse {arg:?}: {message}")]
    Parse { arg: String, message: String },

    /// Something else went wrong
    #[error("{message}")]
    Custom { message: String },
}

impl DecodeError {
    pub fn invalid_utf8(arg: &Arg) -> Self {
        Self::InvalidUtf8 {
            arg: arg.to_string(),
        }
    }

    pub fn parse(arg: &str, message: impl Display) -> Self {
        Self::Parse {
            arg: arg.to_owned(),
            message: message.to_string(),
        }
    }

    pub fn custom(message: impl Display) -> Self {
        Self::Custom {
            message: message.to_string(),
        }
    }
}

/**
A type that can be decoded from a single raw command line token.

See also [`Value`], for the common case that your type needs to be decoded
from a [`str`] instead of a byte slice.
*/
pub trait RawValue<'arg>: Sized {
    /// Decode a value from an [`Arg`] given on the command line
    fn from_arg(arg: &'arg Arg) -> Result<Self, DecodeError>;
}

/**
A type that can be decoded from a single UTF-8 command line token.

Types that implement [`Value`] automatically implement [`RawValue`], such that
an argument that isn't valid UTF-8 is rejected before the value sees it.
*/
pub trait Value<'arg>: Sized {
    fn from_arg(arg: &'arg str) -> Result<Self, DecodeError>;
}

impl<'arg, T> RawValue<'arg> for T
where
    T: Value<'arg>,
{
    #[inline]
    fn from_arg(arg: &'arg Arg) -> Result<Self, DecodeError> {
        Value::from_arg(arg.to_str().ok_or_else(|| DecodeError::invalid_utf8(arg))?)
    }
}

/// For types with a [`FromStr`] implementation, [`ParsedValue`] automatically
/// gives them a [`Value`] implementation so that they can be used as the
/// destination of an option.
pub trait ParsedValue: FromStr {}

impl<'arg, T> Value<'arg> for T
where
    T: ParsedValue,
    T::Err: Display,
{
    #[inline]
    fn from_arg(arg: &'arg str) -> Result<Self, DecodeError> {
        arg.parse().map_err(|err| DecodeError::parse(arg, err))
    }
}

/**
A destination for repeated values, such as the values of a list option or
the tokens collected by [`gather`][crate::Parser::gather]. Values are added
in input order.
*/
pub trait Collection {
    type Item;

    fn add(&mut self, item: Self::Item);
}
