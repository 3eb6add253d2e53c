/*!
Declarations: what an option or positional is called, how it's described,
and whether it's required.
*/

use core::fmt::Display;

use crate::{
    Tags,
    help::{Descriptor, Kind, Repetition, Requirement},
};

/**
A declared option: its tags, its description, and whether it's required.

```
use claimant::{Declaration, Requirement};

let output = Declaration::long_short('o', "output", "where to write")
    .placeholder("FILE")
    .defaulted("a.out");

assert_eq!(output.tags().to_string(), "-o/--output");
assert_eq!(output.requirement(), Requirement::Optional);
```
*/
#[derive(Debug, Clone)]
pub struct Declaration<'a> {
    tags: Tags<'a>,
    description: &'a str,
    requirement: Requirement,
    placeholder: Option<&'a str>,
    default: Option<String>,
}

impl<'a> Declaration<'a> {
    #[must_use]
    pub const fn new(tags: Tags<'a>, description: &'a str) -> Self {
        Self {
            tags,
            description,
            requirement: Requirement::Optional,
            placeholder: None,
            default: None,
        }
    }

    /// An option with only a short tag, like `-v`
    pub const fn short(short: char, description: &'a str) -> Self {
        Self::new(Tags::Short { short }, description)
    }

    /// An option with only a long tag, like `--verbose`
    pub const fn long(long: &'a str, description: &'a str) -> Self {
        Self::new(Tags::Long { long }, description)
    }

    /// An option with both tags, like `-v/--verbose`
    pub const fn long_short(short: char, long: &'a str, description: &'a str) -> Self {
        Self::new(Tags::LongShort { long, short }, description)
    }

    /// Make it an error for this option to be absent
    #[must_use]
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    /// The name of this option's value in help, like `FILE`
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Show a default value in help. This has no effect on resolution; the
    /// destination's initial value is the real default.
    pub fn defaulted(mut self, default: impl Display) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn tags(&self) -> Tags<'a> {
        self.tags
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub(crate) fn describe(&self, repetition: Repetition) -> Descriptor {
        Descriptor {
            default: self.default.clone(),
            placeholder: self.placeholder.map(str::to_owned),
            kind: match self.default {
                Some(_) => Kind::Defaulted,
                None => Kind::Normal,
            },
            requirement: self.requirement,
            repetition,
            ..Descriptor::option(self.tags, self.description)
        }
    }
}

/**
A declared positional. Positionals are required unless made
[`optional`][Positional::optional]; an optional positional leaves its
destination untouched if there's nothing left to claim.
*/
#[derive(Debug, Clone, Copy)]
pub struct Positional<'a> {
    name: &'a str,
    description: &'a str,
    requirement: Requirement,
    placeholder: Option<&'a str>,
}

impl<'a> Positional<'a> {
    #[must_use]
    pub const fn new(name: &'a str, description: &'a str) -> Self {
        Self {
            name,
            description,
            requirement: Requirement::Required,
            placeholder: None,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.requirement = Requirement::Optional;
        self
    }

    pub const fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub const fn name(&self) -> &'a str {
        self.name
    }

    pub const fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub(crate) fn describe(&self, requirement: Requirement, repetition: Repetition) -> Descriptor {
        Descriptor {
            short: None,
            long: Some(self.name.to_owned()),
            description: self.description.to_owned(),
            default: None,
            placeholder: self.placeholder.map(str::to_owned),
            kind: Kind::Positional,
            requirement,
            repetition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaulted_declaration() {
        let descriptor = Declaration::long_short('o', "output", "where to write")
            .placeholder("FILE")
            .defaulted("a.out")
            .describe(Repetition::Single);

        assert_eq!(descriptor.short, Some('o'));
        assert_eq!(descriptor.long.as_deref(), Some("output"));
        assert_eq!(descriptor.kind, Kind::Defaulted);
        assert_eq!(descriptor.default.as_deref(), Some("a.out"));
        assert_eq!(descriptor.placeholder.as_deref(), Some("FILE"));
        assert_eq!(descriptor.requirement, Requirement::Optional);
    }

    #[test]
    fn required_declaration() {
        let declaration = Declaration::long("name", "who").required();
        let descriptor = declaration.describe(Repetition::Multiple);

        assert_eq!(declaration.requirement(), Requirement::Required);
        assert_eq!(descriptor.kind, Kind::Normal);
        assert_eq!(descriptor.short, None);
        assert_eq!(descriptor.repetition, Repetition::Multiple);
    }

    #[test]
    fn positional_defaults_to_required() {
        let positional = Positional::new("input", "what to read");
        assert_eq!(positional.requirement(), Requirement::Required);
        assert_eq!(positional.optional().requirement(), Requirement::Optional);

        let descriptor = positional.describe(Requirement::Required, Repetition::Single);
        assert!(descriptor.is_positional());
        assert_eq!(descriptor.long.as_deref(), Some("input"));
    }
}
