/*!
Descriptions of declared options, and the configuration for rendering them
as help text.

Every successful registration records a [`Descriptor`], in declaration order,
on the [`Parser`][crate::Parser] or [`Group`][crate::Group] it was declared
on. [`Parser::help`][crate::Parser::help] renders them.
*/

use crate::{
    Tags,
    parser::{Command, GroupUsage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    #[default]
    Optional,
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repetition {
    #[default]
    Single,
    Multiple,
}

/// The help-relevant flavor of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    Normal,

    /// An option with a default value to show in help
    Defaulted,

    /// A positional; its name is stored in [`Descriptor::long`]
    Positional,
}

/// The help-facing record of a single declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Descriptor {
    pub short: Option<char>,

    /// The long key, or the name of a positional
    pub long: Option<String>,

    pub description: String,

    /// The default value, as shown in help
    pub default: Option<String>,

    /// The name of the value in help text, like `FILE`
    pub placeholder: Option<String>,

    pub kind: Kind,
    pub requirement: Requirement,
    pub repetition: Repetition,
}

impl Descriptor {
    pub(crate) fn option(tags: Tags<'_>, description: &str) -> Self {
        Self {
            short: tags.short(),
            long: tags.long().map(str::to_owned),
            description: description.to_owned(),
            ..Self::default()
        }
    }

    /// The tags of this option. Always `None` for positionals.
    pub fn tags(&self) -> Option<Tags<'_>> {
        if self.is_positional() {
            return None;
        }

        match (self.short, self.long.as_deref()) {
            (Some(short), Some(long)) => Some(Tags::LongShort { long, short }),
            (Some(short), None) => Some(Tags::Short { short }),
            (None, Some(long)) => Some(Tags::Long { long }),
            (None, None) => None,
        }
    }

    pub fn is_positional(&self) -> bool {
        self.kind == Kind::Positional
    }
}

/**
Layout settings for rendered help. The defaults produce an 80 column help
screen with options indented by 4 columns and one blank line between
sections.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpOptions {
    /// The maximum width of any line
    pub width: usize,

    /// Indentation of options and section headings
    pub indent: usize,

    /// Additional indentation of options inside a named group
    pub group_indent: usize,

    /// Blank lines between sections
    pub lines_between: usize,

    /// Blank lines between a group's heading and its options
    pub lines_after_group: usize,

    /// Emit a blank line after any option whose description wrapped
    pub line_after_wrap: bool,

    /// The word that starts the usage line
    pub usage_prefix: String,
}

impl Default for HelpOptions {
    fn default() -> Self {
        Self {
            width: 80,
            indent: 4,
            group_indent: 4,
            lines_between: 1,
            lines_after_group: 0,
            line_after_wrap: true,
            usage_prefix: "usage:".to_owned(),
        }
    }
}

/// Rendered help for a [`Parser`][crate::Parser]; see
/// [`Parser::help`][crate::Parser::help].
#[derive(Debug, Clone, Copy)]
pub struct Help<'a> {
    pub(crate) command: &'a Command,
    pub(crate) options: &'a [Descriptor],
    pub(crate) groups: &'a [GroupUsage],
    pub(crate) positionals: &'a [Descriptor],
}
