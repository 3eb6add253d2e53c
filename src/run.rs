/*!
The claim resolver: the shared state of a single parse run, and the
resolution logic for every declaration kind.

A [`Run`] owns the [`ClaimTable`] for the command line and the
[`KeyRegistry`] of every key declared so far. It's owned by a
[`Parser`][crate::Parser] and lent to each [`Group`][crate::Group], so all
declarations in a run see (and consume) the same tokens.
*/

use core::{fmt::Display, slice};

use claimant_lexer::{Arg, ClaimTable};
use tracing::{debug, trace};

use crate::{
    Tags,
    errors::{Error, ResolutionError},
    help::Requirement,
    registry::KeyRegistry,
    value::{Collection, RawValue},
};

fn decode<'arg, T>(option: impl Display, arg: &'arg Arg) -> Result<T, Error>
where
    T: RawValue<'arg>,
{
    T::from_arg(arg).map_err(|error| {
        ResolutionError::Decode {
            option: option.to_string(),
            error,
        }
        .into()
    })
}

#[derive(Debug, Clone)]
pub struct Run<'arg> {
    table: ClaimTable<'arg>,
    registry: KeyRegistry,
}

impl<'arg> Run<'arg> {
    /// Tokenize the arguments. The list should *exclude* the name of the
    /// program.
    pub fn new<I>(args: I, terminator: &str) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'arg [u8]>,
    {
        let table = ClaimTable::new(args, terminator.as_bytes()).map_err(|error| {
            ResolutionError::TrailingLong {
                option: error.option.to_string(),
                index: error.index,
            }
        })?;

        debug!(
            tokens = table.len(),
            unclaimed = table.unclaimed_count(),
            keys = table.keys().count(),
            "tokenized command line"
        );

        Ok(Self {
            table,
            registry: KeyRegistry::new(),
        })
    }

    pub fn table(&self) -> &ClaimTable<'arg> {
        &self.table
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Validate and record the keys of a new declaration
    pub fn register(&mut self, tags: Tags<'_>) -> Result<(), Error> {
        KeyRegistry::validate(tags)?;
        self.registry.register(tags)
    }

    /**
    Find the positions that supplied this option. The short key is tried
    first, and the long key only if the short key never appeared. An absent
    option is an error only if it's required.
    */
    pub fn lookup(&self, tags: Tags<'_>, requirement: Requirement) -> Result<Option<&[usize]>, Error> {
        let found = tags
            .short()
            .and_then(|short| u8::try_from(short).ok())
            .and_then(|short| self.table.occurrences(slice::from_ref(&short)))
            .or_else(|| {
                tags.long()
                    .and_then(|long| self.table.occurrences(long.as_bytes()))
            });

        match (found, requirement) {
            (Some(occurrences), _) => Ok(Some(occurrences)),
            (None, Requirement::Optional) => Ok(None),
            (None, Requirement::Required) => Err(ResolutionError::Required {
                option: tags.to_string(),
            }
            .into()),
        }
    }

    /// Like [`lookup`][Self::lookup], but detached from `self` so that the
    /// occurrences can be claimed.
    fn occurrences(&self, tags: Tags<'_>, requirement: Requirement) -> Result<Vec<usize>, Error> {
        self.lookup(tags, requirement)
            .map(|occurrences| occurrences.map(<[usize]>::to_vec).unwrap_or_default())
    }

    /// Claim the value token directly after the occurrence of an option at
    /// `occurrence`.
    pub fn claim_value(&mut self, tags: Tags<'_>, occurrence: usize) -> Result<&'arg Arg, Error> {
        let (index, value) = self.table.claim_next(occurrence).map_err(|error| {
            ResolutionError::NoArgument {
                option: tags.to_string(),
                error,
            }
        })?;

        trace!(option = %tags, occurrence, index, %value, "claimed value");
        Ok(value)
    }

    /// The number of tokens nothing has claimed yet
    pub fn unclaimed(&self) -> usize {
        self.table.unclaimed_count()
    }

    pub(crate) fn resolve_flag(
        &mut self,
        tags: Tags<'_>,
        requirement: Requirement,
        into: &mut bool,
        inverted: bool,
    ) -> Result<(), Error> {
        *into = inverted;

        if self.lookup(tags, requirement)?.is_some() {
            *into = !inverted;
        }

        Ok(())
    }

    pub(crate) fn resolve_count<C>(
        &mut self,
        tags: Tags<'_>,
        requirement: Requirement,
        into: &mut C,
    ) -> Result<(), Error>
    where
        C: TryFrom<usize>,
    {
        if let Some(occurrences) = self.lookup(tags, requirement)? {
            let count = occurrences.len();

            *into = C::try_from(count).map_err(|_| ResolutionError::CountOverflow {
                option: tags.to_string(),
                count,
            })?;
        }

        Ok(())
    }

    /// Every occurrence claims its value, but only the last one is decoded
    pub(crate) fn resolve_arg<T>(
        &mut self,
        tags: Tags<'_>,
        requirement: Requirement,
        into: &mut T,
    ) -> Result<(), Error>
    where
        T: RawValue<'arg>,
    {
        let occurrences = self.occurrences(tags, requirement)?;

        let Some((&last, earlier)) = occurrences.split_last() else {
            return Ok(());
        };

        for &occurrence in earlier {
            let discarded = self.claim_value(tags, occurrence)?;
            trace!(option = %tags, %discarded, "overridden by a later occurrence");
        }

        let value = self.claim_value(tags, last)?;
        *into = decode(tags, value)?;
        Ok(())
    }

    pub(crate) fn resolve_list<C>(
        &mut self,
        tags: Tags<'_>,
        requirement: Requirement,
        into: &mut C,
    ) -> Result<(), Error>
    where
        C: Collection,
        C::Item: RawValue<'arg>,
    {
        self.occurrences(tags, requirement)?
            .into_iter()
            .try_for_each(|occurrence| {
                let value = self.claim_value(tags, occurrence)?;
                into.add(decode(tags, value)?);
                Ok(())
            })
    }

    /// Decode the first unclaimed token. It's only claimed if it decodes.
    pub(crate) fn resolve_positional<T>(
        &mut self,
        name: &str,
        requirement: Requirement,
        into: &mut T,
    ) -> Result<(), Error>
    where
        T: RawValue<'arg>,
    {
        let Some((index, arg)) = self.table.first_unclaimed() else {
            return match requirement {
                Requirement::Optional => Ok(()),
                Requirement::Required => Err(ResolutionError::ExpectedPositional {
                    name: name.to_owned(),
                }
                .into()),
            };
        };

        *into = decode(name, arg)?;
        self.table.claim(index);
        trace!(positional = name, index, %arg, "claimed positional");
        Ok(())
    }

    pub(crate) fn resolve_gather<C>(&mut self, name: &str, into: &mut C) -> Result<(), Error>
    where
        C: Collection,
        C::Item: RawValue<'arg>,
    {
        while let Some((index, arg)) = self.table.first_unclaimed() {
            into.add(decode(name, arg)?);
            self.table.claim(index);
            trace!(positional = name, index, %arg, "gathered positional");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERBOSE: Tags<'static> = Tags::LongShort {
        long: "verbose",
        short: 'v',
    };

    const OUTPUT: Tags<'static> = Tags::LongShort {
        long: "output",
        short: 'o',
    };

    fn run<'a>(args: &[&'a str]) -> Run<'a> {
        Run::new(args.iter().map(|arg| arg.as_bytes()), "--").unwrap()
    }

    #[test]
    fn lookup_prefers_short() {
        let run = run(&["-v", "--verbose", "x"]);

        assert_eq!(
            run.lookup(VERBOSE, Requirement::Optional).unwrap(),
            Some(&[0][..])
        );
        assert_eq!(
            run.lookup(Tags::Long { long: "verbose" }, Requirement::Optional)
                .unwrap(),
            Some(&[1][..])
        );
    }

    #[test]
    fn lookup_falls_back_to_long() {
        let run = run(&["--verbose", "x"]);

        assert_eq!(
            run.lookup(VERBOSE, Requirement::Optional).unwrap(),
            Some(&[0][..])
        );
    }

    #[test]
    fn lookup_required() {
        let run = run(&["x"]);

        assert_eq!(run.lookup(VERBOSE, Requirement::Optional).unwrap(), None);
        assert_eq!(
            run.lookup(VERBOSE, Requirement::Required).unwrap_err().to_string(),
            "required argument not given: -v/--verbose"
        );
    }

    #[test]
    fn trailing_long() {
        let error = Run::new([b"--verbose".as_slice()], "--").unwrap_err();
        assert_eq!(error.to_string(), "no argument given to --verbose");
    }

    #[test]
    fn flag_and_inverted_flag() {
        let mut run = run(&["-v"]);

        let mut verbose = false;
        run.resolve_flag(VERBOSE, Requirement::Optional, &mut verbose, false)
            .unwrap();
        assert!(verbose);

        let mut color = false;
        run.resolve_flag(
            Tags::Long { long: "no-color" },
            Requirement::Optional,
            &mut color,
            true,
        )
        .unwrap();
        assert!(color);

        let mut quiet = true;
        run.resolve_flag(VERBOSE, Requirement::Optional, &mut quiet, true)
            .unwrap();
        assert!(!quiet);
    }

    #[test]
    fn count() {
        let mut run = run(&["-vvv", "--verbose", "x"]);

        let mut verbosity: u32 = 0;
        run.resolve_count(VERBOSE, Requirement::Optional, &mut verbosity)
            .unwrap();
        assert_eq!(verbosity, 3);

        let mut untouched: u32 = 9;
        run.resolve_count(Tags::Short { short: 'q' }, Requirement::Optional, &mut untouched)
            .unwrap();
        assert_eq!(untouched, 9);
    }

    #[test]
    fn count_overflow() {
        let args = vec!["-v"; 300];
        let mut run = run(&args);

        let mut verbosity: u8 = 0;
        match run.resolve_count(VERBOSE, Requirement::Optional, &mut verbosity) {
            Err(Error::Resolution(ResolutionError::CountOverflow { count, .. })) => {
                assert_eq!(count, 300)
            }
            other => panic!("expected an overflow, got {other:?}"),
        }
    }

    #[test]
    fn arg_last_occurrence_wins() {
        let mut run = run(&["-o", "a", "-o", "b", "--output", "c", "d"]);

        let mut output = String::new();
        run.resolve_arg(OUTPUT, Requirement::Optional, &mut output)
            .unwrap();

        // --output was never consulted, because -o was present
        assert_eq!(output, "b");
        assert_eq!(run.table().unclaimed().collect::<Vec<_>>(), [5, 6]);
    }

    #[test]
    fn arg_requires_every_value() {
        let mut run = run(&["-o", "-v", "-o", "b"]);

        let mut output = String::from("default");
        match run.resolve_arg(OUTPUT, Requirement::Optional, &mut output) {
            Err(Error::Resolution(ResolutionError::NoArgument { option, .. })) => {
                assert_eq!(option, "-o/--output")
            }
            other => panic!("expected a missing argument, got {other:?}"),
        }
        assert_eq!(output, "default");
    }

    #[test]
    fn arg_decode_failure_names_the_option() {
        let mut run = run(&["-n", "many"]);

        let mut count: u32 = 0;
        let error = run
            .resolve_arg(Tags::Short { short: 'n' }, Requirement::Optional, &mut count)
            .unwrap_err();

        assert!(
            error
                .to_string()
                .starts_with("error while parsing value of -n: ")
        );
    }

    #[test]
    fn list_accumulates() {
        let mut run = run(&["-W", "all", "x", "-W", "abi", "--W", "inline"]);

        let mut warnings: Vec<String> = Vec::new();
        run.resolve_list(Tags::Short { short: 'W' }, Requirement::Optional, &mut warnings)
            .unwrap();

        assert_eq!(warnings, ["all", "abi", "inline"]);
        assert_eq!(run.unclaimed(), 1);
    }

    #[test]
    fn list_keeps_values_before_a_failure() {
        let mut run = run(&["-n", "1", "-n", "two", "-n", "3"]);

        let mut numbers: Vec<i32> = Vec::new();
        assert!(
            run.resolve_list(Tags::Short { short: 'n' }, Requirement::Optional, &mut numbers)
                .is_err()
        );
        assert_eq!(numbers, [1]);
    }

    #[test]
    fn positionals_walk_in_order() {
        let mut run = run(&["cmd", "-v", "one", "two"]);

        let mut command = String::new();
        run.resolve_positional("command", Requirement::Required, &mut command)
            .unwrap();
        assert_eq!(command, "cmd");

        let mut rest: Vec<String> = Vec::new();
        run.resolve_gather("rest", &mut rest).unwrap();
        assert_eq!(rest, ["one", "two"]);

        let mut missing = String::from("untouched");
        run.resolve_positional("missing", Requirement::Optional, &mut missing)
            .unwrap();
        assert_eq!(missing, "untouched");

        assert_eq!(
            run.resolve_positional("missing", Requirement::Required, &mut missing)
                .unwrap_err()
                .to_string(),
            "expected a positional argument for: missing"
        );
    }

    #[test]
    fn failed_positional_stays_unclaimed() {
        let mut run = run(&["x", "5"]);

        let mut number: i32 = 0;
        assert!(
            run.resolve_positional("number", Requirement::Required, &mut number)
                .is_err()
        );
        assert_eq!(run.unclaimed(), 2);

        let mut numbers: Vec<i32> = Vec::new();
        assert!(run.resolve_gather("numbers", &mut numbers).is_err());
        assert!(numbers.is_empty());
        assert_eq!(run.unclaimed(), 2);
    }

    #[test]
    fn register_validates_first() {
        let mut run = run(&[]);

        assert!(run.register(Tags::Short { short: ' ' }).is_err());
        assert!(!run.registry().contains_short(' '));

        run.register(VERBOSE).unwrap();
        assert!(run.register(Tags::Short { short: 'v' }).is_err());
    }
}
