#![no_std]

/*!
Low-level tokenization of command-line arguments. Every token is classified
by its shape alone (a cluster of short flags, a long flag, or something else)
before any option is declared, and the results are recorded in a
[`ClaimTable`]. No type handling happens here, and nothing here knows which
options exist. Usually this is too low level to use directly.

Tokens that aren't flags are "unclaimed". Higher layers claim them one at a
time, either as the value of the flag immediately before them or as
positional arguments, and a claimed token can never be claimed again.
*/

extern crate alloc;

mod arg;

use alloc::{
    collections::{BTreeMap, BTreeSet},
    vec::Vec,
};
use core::fmt;

pub use arg::Arg;

/// The conventional terminator. After it, every token is positional.
pub const DEFAULT_TERMINATOR: &str = "--";

/// The shape of a single token, decided without knowledge of declared keys.
#[derive(Debug, Clone, Copy)]
enum Shape<'arg> {
    /// Empty tokens are skipped entirely
    Empty,

    /// The terminator; it's dropped, and flips every later token to `Other`
    Terminator,

    /// `-abc`: each byte after the dash is an independent short key. Never
    /// empty; a lone `-` is `Other`.
    Cluster(&'arg [u8]),

    /// `--name`
    Long(&'arg Arg),

    /// Anything else: a value for some flag, or a positional
    Other,
}

fn classify<'arg>(token: &'arg [u8], terminator: &[u8]) -> Shape<'arg> {
    match token {
        [] => Shape::Empty,
        _ if token == terminator => Shape::Terminator,
        [b'-', b'-', long @ ..] => match long {
            [] => Shape::Other,
            long => Shape::Long(Arg::new(long)),
        },
        [b'-'] => Shape::Other,
        [b'-', short @ ..] => Shape::Cluster(short),
        _ => Shape::Other,
    }
}

/**
A long flag was the very last token on the command line.

This is reported during tokenization, before anyone knows whether the flag
takes a value, so it fires for value-less long flags too.
*/
#[derive(Debug, Clone, Copy)]
pub struct TrailingLong<'arg> {
    /// The key, without the leading dashes
    pub option: &'arg Arg,

    /// The position of the token in the input
    pub index: usize,
}

impl fmt::Display for TrailingLong<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no argument given to --{}", self.option)
    }
}

impl core::error::Error for TrailingLong<'_> {}

/// A flag's value couldn't be claimed from the unclaimed tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimError {
    /// There are no unclaimed tokens after the flag at all
    Exhausted,

    /// The first unclaimed token after the flag isn't the one directly after
    /// it. Values must be adjacent to their flag.
    NotAdjacent { expected: usize, found: usize },
}

impl fmt::Display for ClaimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ClaimError::Exhausted => write!(f, "no unclaimed argument follows"),
            ClaimError::NotAdjacent { expected, found } => write!(
                f,
                "expected an unclaimed argument at position {expected}, \
                 but the next one is at position {found}"
            ),
        }
    }
}

impl core::error::Error for ClaimError {}

/**
The result of tokenizing a command line: which token positions supplied each
key, and which positions are still unclaimed.

Short and long keys share one key space, keyed by their raw bytes, so `-v`
and `--v` both supply the key `v`. Indices are positions in the original
input (program name excluded), so skipped tokens still take up a position.

[claimant-lexer][crate] operates entirely on borrowed data. The `'arg`
lifetime refers to the command line tokens, which are expected to outlive
every declaration made against this table.
*/
#[derive(Debug, Clone, Default)]
pub struct ClaimTable<'arg> {
    tokens: Vec<&'arg Arg>,
    keys: BTreeMap<&'arg [u8], Vec<usize>>,
    unclaimed: BTreeSet<usize>,
}

impl<'arg> ClaimTable<'arg> {
    /**
    Tokenize the arguments in a single forward pass. The list should
    *exclude* the name of the program, which is commonly passed as the first
    argument in the list.
    */
    pub fn new<I>(args: I, terminator: &[u8]) -> Result<Self, TrailingLong<'arg>>
    where
        I: IntoIterator<Item = &'arg [u8]>,
    {
        let tokens: Vec<&'arg Arg> = args.into_iter().map(Arg::new).collect();
        let last = tokens.len().checked_sub(1);

        let mut table = Self::default();
        let mut terminated = false;

        for (index, token) in tokens.iter().copied().enumerate() {
            if terminated {
                if !token.is_empty() {
                    table.unclaimed.insert(index);
                }
                continue;
            }

            match classify(token.bytes(), terminator) {
                Shape::Empty => {}
                Shape::Terminator => terminated = true,
                Shape::Cluster(shorts) => shorts
                    .chunks(1)
                    .for_each(|short| table.supply(short, index)),
                Shape::Long(option) if Some(index) == last => {
                    return Err(TrailingLong { option, index });
                }
                Shape::Long(option) => table.supply(option.bytes(), index),
                Shape::Other => {
                    table.unclaimed.insert(index);
                }
            }
        }

        table.tokens = tokens;
        Ok(table)
    }

    fn supply(&mut self, key: &'arg [u8], index: usize) {
        self.keys.entry(key).or_default().push(index);
    }

    /// The number of tokens in the input, including skipped ones
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the token at this position
    #[inline]
    pub fn token(&self, index: usize) -> Option<&'arg Arg> {
        self.tokens.get(index).copied()
    }

    /// Every position that supplied this key, in input order. A cluster like
    /// `-vvv` supplies its position once per repetition.
    #[inline]
    pub fn occurrences(&self, key: &[u8]) -> Option<&[usize]> {
        self.keys.get(key).map(Vec::as_slice)
    }

    /// All keys seen on the command line, in byte order
    pub fn keys(&self) -> impl Iterator<Item = (&'arg [u8], &[usize])> + '_ {
        self.keys.iter().map(|(&key, indices)| (key, indices.as_slice()))
    }

    /// Unclaimed positions, in ascending order
    pub fn unclaimed(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.unclaimed.iter().copied()
    }

    #[inline]
    pub fn unclaimed_count(&self) -> usize {
        self.unclaimed.len()
    }

    #[inline]
    pub fn is_unclaimed(&self, index: usize) -> bool {
        self.unclaimed.contains(&index)
    }

    /// The smallest unclaimed position and its token, if any
    #[inline]
    pub fn first_unclaimed(&self) -> Option<(usize, &'arg Arg)> {
        self.unclaimed
            .first()
            .map(|&index| (index, self.tokens[index]))
    }

    /// Claim a specific position. Returns false if it was already claimed (or
    /// was never claimable).
    #[inline]
    pub fn claim(&mut self, index: usize) -> bool {
        self.unclaimed.remove(&index)
    }

    /**
    Claim the value for the flag that occurred at `occurrence`. The value is
    the smallest unclaimed position after the flag, and it must be exactly
    `occurrence + 1`; a gap is an error rather than a reason to keep looking.
    */
    pub fn claim_next(&mut self, occurrence: usize) -> Result<(usize, &'arg Arg), ClaimError> {
        let expected = occurrence + 1;

        match self.unclaimed.range(expected..).next().copied() {
            None => Err(ClaimError::Exhausted),
            Some(found) if found != expected => Err(ClaimError::NotAdjacent { expected, found }),
            Some(found) => {
                self.unclaimed.remove(&found);
                Ok((found, self.tokens[found]))
            }
        }
    }
}
