/*!
Error types for declaring and resolving options.

Every declaration on a [`Parser`][crate::Parser] returns a
[`Result`]. Registration problems (a malformed or duplicate key) are detected
before anything is resolved, so a failed registration never touches the
destination. Resolution problems are detected while claiming tokens and
decoding values.
*/

use core::slice;

use claimant_lexer::ClaimError;
use joinery::JoinableIterator;
use thiserror::Error;

use crate::value::DecodeError;

/// A problem with the keys of a declaration, detected before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// Short keys must be printable, non-extended ASCII
    #[error("short names must be printable ASCII characters, got {short:?}")]
    UnprintableShort { short: char },

    /// Long keys must be more than one character
    #[error("long names must be longer than one character, got {long:?}")]
    LongTooShort { long: String },

    /// This short key was already registered by an earlier declaration
    #[error("duplicate short code detected: -{short}")]
    DuplicateShort { short: char },

    /// This long key was already registered by an earlier declaration
    #[error("duplicate long code detected: --{long}")]
    DuplicateLong { long: String },
}

/// A problem claiming or decoding the tokens for a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolutionError {
    /// A long flag was the last token on the command line. This is detected
    /// during tokenization, regardless of what the flag is declared as.
    #[error("no argument given to --{option}")]
    TrailingLong { option: String, index: usize },

    /// A required option didn't appear on the command line
    #[error("required argument not given: {option}")]
    Required { option: String },

    /// An occurrence of a value-taking option wasn't directly followed by an
    /// unclaimed token
    #[error("no argument given to {option}")]
    NoArgument {
        option: String,
        #[source]
        error: ClaimError,
    },

    /// A value was claimed but couldn't be converted to the destination type
    #[error("error while parsing value of {option}: {error}")]
    Decode {
        option: String,
        #[source]
        error: DecodeError,
    },

    /// A required positional had nothing left to claim
    #[error("expected a positional argument for: {name}")]
    ExpectedPositional { name: String },

    /// A counter appeared more times than its destination type can hold
    #[error("{option} was given {count} times, which is too many for its counter")]
    CountOverflow { option: String, count: usize },
}

/// Any error produced by claimant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Several errors, reported together. This is always flat; combining
    /// errors with [`Error::and`] never nests a `Multiple` in another.
    #[error("{}", .0.iter().join_with("; "))]
    Multiple(Vec<Error>),
}

impl Error {
    /// Combine two errors into one, preserving the order they were detected
    /// in.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let mut errors = self.into_vec();
        errors.extend(other.into_vec());
        Error::Multiple(errors)
    }

    /// Every individual error in this one, in order.
    pub fn iter(&self) -> slice::Iter<'_, Error> {
        match self {
            Error::Multiple(errors) => errors.iter(),
            error => slice::from_ref(error).iter(),
        }
    }

    pub fn into_vec(self) -> Vec<Error> {
        match self {
            Error::Multiple(errors) => errors,
            error => vec![error],
        }
    }

    pub fn is_registration(&self) -> bool {
        self.iter()
            .any(|error| matches!(error, Error::Registration(_)))
    }

    pub fn is_resolution(&self) -> bool {
        self.iter()
            .any(|error| matches!(error, Error::Resolution(_)))
    }
}

impl<'a> IntoIterator for &'a Error {
    type Item = &'a Error;
    type IntoIter = slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/**
An accumulator for declaration results, for when you'd rather report every
problem at once than stop at the first one.

```
use claimant::{Command, Declaration, Declare, Errors};

let args = ["-n", "lots"];
let mut parser = Command::new("demo", "").parse(&args)?;

let mut count: u32 = 0;
let mut name = String::new();

let mut errors = Errors::new();
errors.record(parser.arg(Declaration::short('n', "how many"), &mut count));
errors.record(parser.arg(Declaration::long("name", "who").required(), &mut name));

assert_eq!(errors.len(), 2);
assert!(errors.into_result().is_err());
# Ok::<(), claimant::Error>(())
```
*/
#[derive(Debug, Clone, Default)]
pub struct Errors {
    errors: Vec<Error>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the error from this result, if any, and pass along the success
    /// value.
    pub fn record<T>(&mut self, result: Result<T, Error>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    pub fn push(&mut self, error: Error) {
        self.errors.extend(error.into_vec());
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Error> {
        self.errors.iter()
    }

    /// `Ok` if nothing was recorded, otherwise every recorded error as one
    /// [`Error`]. A single error is returned as-is rather than wrapped.
    pub fn into_result(self) -> Result<(), Error> {
        let mut errors = self.errors;

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Error::Multiple(errors)),
        }
    }
}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl Extend<Error> for Errors {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        iter.into_iter().for_each(|error| self.push(error));
    }
}
