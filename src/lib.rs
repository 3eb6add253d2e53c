/*!
A claim-based command line arguments resolver; claimant tokenizes the whole
command line once, then lets you declare options in whatever order suits
you, each declaration claiming the tokens that belong to it.

The flow always looks like this:

1. Build a [`Command`] with the program's name, description, and any
   configuration (a custom terminator, help layout options, and so on).
2. [`Command::parse`] tokenizes the arguments. Every token is classified by
   its shape alone: `-abc` is a cluster of short flags, `--name` is a long
   flag, and everything else is "unclaimed".
3. Declare options on the resulting [`Parser`] (and its [`Group`]s) through
   the [`Declare`] trait: [`flag`][Declare::flag], [`count`][Declare::count],
   [`arg`][Declare::arg], and [`list`][Declare::list]. A value-taking option
   claims the unclaimed token immediately after each of its occurrences.
4. Finally, [`pos`][Parser::pos] and [`gather`][Parser::gather] hand out
   whatever is still unclaimed, in input order.

Every declaration returns a `Result`. Use `?` to stop at the first problem, or
feed each result into an [`Errors`] to collect all of them.

```
use claimant::{Command, Declaration, Declare, Positional};

let args = ["-vv", "--output", "out.txt", "input.txt"];

let mut verbosity: u8 = 0;
let mut output = String::from("a.out");
let mut input = String::new();

let mut parser = Command::new("demo", "a demonstration").parse(&args)?;
parser
    .count(Declaration::long_short('v', "verbose", "be louder"), &mut verbosity)?
    .arg(Declaration::long_short('o', "output", "where to write"), &mut output)?
    .pos(Positional::new("input", "what to read"), &mut input)?;

assert_eq!(verbosity, 2);
assert_eq!(output, "out.txt");
assert_eq!(input, "input.txt");
# Ok::<(), claimant::Error>(())
```
*/

pub mod arguments;
pub mod declaration;
pub mod errors;
pub mod help;
mod impls;
pub mod parser;
mod printers;
pub mod registry;
pub mod run;
pub mod value;

use core::fmt;

pub use claimant_lexer::{Arg, ClaimError, ClaimTable, DEFAULT_TERMINATOR};

pub use crate::{
    arguments::LoadedArguments,
    declaration::{Declaration, Positional},
    errors::{Error, Errors},
    help::{Descriptor, HelpOptions, Kind, Repetition, Requirement},
    parser::{Command, Declare, Group, Parser},
    value::{Collection, DecodeError, ParsedValue, RawValue, Value},
};

/// The set of tags that identify a particular option (`-short`, `--long`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tags<'a> {
    /// This option uses only a long tag
    Long { long: &'a str },

    /// This option uses only a short tag
    Short { short: char },

    /// This option uses both a long and short tag
    LongShort { long: &'a str, short: char },
}

impl<'a> Tags<'a> {
    /// Get the long tag, if any
    #[inline]
    #[must_use]
    pub const fn long(&self) -> Option<&'a str> {
        match self {
            Tags::Long { long } | Tags::LongShort { long, .. } => Some(long),
            Tags::Short { .. } => None,
        }
    }

    /// Get the short tag, if any
    #[inline]
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        match self {
            Tags::Short { short } | Tags::LongShort { short, .. } => Some(*short),
            Tags::Long { .. } => None,
        }
    }
}

/// Tags print the way they're named in error messages: `-v`, `--verbose`,
/// or `-v/--verbose`.
impl fmt::Display for Tags<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Tags::Long { long } => write!(f, "--{long}"),
            Tags::Short { short } => write!(f, "-{short}"),
            Tags::LongShort { long, short } => write!(f, "-{short}/--{long}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_display() {
        assert_eq!(Tags::Short { short: 'v' }.to_string(), "-v");
        assert_eq!(Tags::Long { long: "verbose" }.to_string(), "--verbose");
        assert_eq!(
            Tags::LongShort {
                long: "verbose",
                short: 'v'
            }
            .to_string(),
            "-v/--verbose"
        );
    }

    #[test]
    fn tags_accessors() {
        let tags = Tags::LongShort {
            long: "output",
            short: 'o',
        };

        assert_eq!(tags.short(), Some('o'));
        assert_eq!(tags.long(), Some("output"));
        assert_eq!(Tags::Long { long: "output" }.short(), None);
        assert_eq!(Tags::Short { short: 'o' }.long(), None);
    }
}
