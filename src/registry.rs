/*!
Validation and de-duplication of option keys.

Keys are checked when an option is declared, before any resolution happens.
A declaration that fails here never touches its destination and never shows
up in help.
*/

use std::collections::BTreeSet;

use crate::{
    Tags,
    errors::{Error, RegistrationError},
};

/// Every key registered so far, across a parser and all of its groups.
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    shorts: BTreeSet<char>,
    longs: BTreeSet<String>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /**
    Check that these tags are well-formed: a short key must be printable,
    non-extended ASCII (`'!'` through `'~'`), and a long key must be longer
    than one character. Both keys are checked, and both problems are
    reported if both are present.
    */
    pub fn validate(tags: Tags<'_>) -> Result<(), Error> {
        let short = tags
            .short()
            .filter(|short| !matches!(short, '!'..='~'))
            .map(|short| RegistrationError::UnprintableShort { short });

        let long = tags
            .long()
            .filter(|long| long.chars().count() <= 1)
            .map(|long| RegistrationError::LongTooShort {
                long: long.to_owned(),
            });

        combine(short, long)
    }

    /**
    Record the keys in these tags, failing if either was already registered.
    A key that wasn't a duplicate is kept even if its partner was, so a
    later declaration can't claim it either.
    */
    pub fn register(&mut self, tags: Tags<'_>) -> Result<(), Error> {
        let short = match tags.short() {
            Some(short) if !self.shorts.insert(short) => {
                Some(RegistrationError::DuplicateShort { short })
            }
            _ => None,
        };

        let long = match tags.long() {
            Some(long) if !self.longs.insert(long.to_owned()) => {
                Some(RegistrationError::DuplicateLong {
                    long: long.to_owned(),
                })
            }
            _ => None,
        };

        combine(short, long)
    }

    pub fn contains_short(&self, short: char) -> bool {
        self.shorts.contains(&short)
    }

    pub fn contains_long(&self, long: &str) -> bool {
        self.longs.contains(long)
    }
}

fn combine(
    short: Option<RegistrationError>,
    long: Option<RegistrationError>,
) -> Result<(), Error> {
    match (short, long) {
        (None, None) => Ok(()),
        (Some(error), None) | (None, Some(error)) => Err(error.into()),
        (Some(short), Some(long)) => Err(Error::from(short).and(long.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_tags() {
        assert!(
            KeyRegistry::validate(Tags::LongShort {
                long: "verbose",
                short: 'v'
            })
            .is_ok()
        );
        assert!(KeyRegistry::validate(Tags::Short { short: '!' }).is_ok());
        assert!(KeyRegistry::validate(Tags::Short { short: '~' }).is_ok());
        assert!(KeyRegistry::validate(Tags::Long { long: "ab" }).is_ok());
    }

    #[test]
    fn unprintable_short() {
        for short in [' ', '\n', '\u{7f}', 'é'] {
            match KeyRegistry::validate(Tags::Short { short }) {
                Err(Error::Registration(RegistrationError::UnprintableShort { short: bad })) => {
                    assert_eq!(bad, short)
                }
                other => panic!("expected an unprintable short, got {other:?}"),
            }
        }
    }

    #[test]
    fn long_too_short() {
        match KeyRegistry::validate(Tags::Long { long: "x" }) {
            Err(Error::Registration(RegistrationError::LongTooShort { long })) => {
                assert_eq!(long, "x")
            }
            other => panic!("expected a too-short long, got {other:?}"),
        }
    }

    #[test]
    fn both_problems_are_reported() {
        let error = KeyRegistry::validate(Tags::LongShort {
            long: "x",
            short: ' ',
        })
        .unwrap_err();

        assert_eq!(error.iter().count(), 2);
    }

    #[test]
    fn duplicates() {
        let mut registry = KeyRegistry::new();

        registry
            .register(Tags::LongShort {
                long: "verbose",
                short: 'v',
            })
            .unwrap();

        assert_eq!(
            registry.register(Tags::Short { short: 'v' }),
            Err(RegistrationError::DuplicateShort { short: 'v' }.into())
        );
        assert_eq!(
            registry.register(Tags::Long { long: "verbose" }),
            Err(RegistrationError::DuplicateLong {
                long: "verbose".to_owned()
            }
            .into())
        );

        let error = registry
            .register(Tags::LongShort {
                long: "verbose",
                short: 'v',
            })
            .unwrap_err();
        assert_eq!(error.iter().count(), 2);
    }

    #[test]
    fn partial_duplicate_keeps_the_new_key() {
        let mut registry = KeyRegistry::new();
        registry.register(Tags::Short { short: 'o' }).unwrap();

        assert!(
            registry
                .register(Tags::LongShort {
                    long: "output",
                    short: 'o'
                })
                .is_err()
        );
        assert!(registry.contains_long("output"));
        assert!(registry.register(Tags::Long { long: "output" }).is_err());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut registry = KeyRegistry::new();

        registry.register(Tags::Short { short: 'w' }).unwrap();
        registry.register(Tags::Short { short: 'W' }).unwrap();
        assert!(registry.contains_short('w'));
        assert!(registry.contains_short('W'));
    }
}
