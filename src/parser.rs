/*!
The declaration surface: [`Command`] configures a parse, [`Parser`] holds a
tokenized command line, and [`Declare`] resolves options against it.
*/

use std::io;

use tracing::debug;

use crate::{
    DEFAULT_TERMINATOR, Tags,
    declaration::{Declaration, Positional},
    errors::Error,
    help::{Descriptor, Help, HelpOptions, Repetition, Requirement},
    run::Run,
    value::{Collection, RawValue},
};

/**
Configuration for a command, set before its arguments are tokenized.

```
use claimant::{Command, HelpOptions};

let command = Command::new("cc", "a pretend compiler")
    .header("Compiles things, pretend-style.")
    .footer("Report bugs to nobody.")
    .terminator("::")
    .help_options(HelpOptions {
        width: 100,
        ..HelpOptions::default()
    });

assert_eq!(command.terminator, "::");
```
*/
#[derive(Debug, Clone)]
pub struct Command {
    /// The program's name, shown in help and usage
    pub name: String,

    /// A short description, shown after the name in help
    pub description: String,

    /// A longer description, shown before the options in help
    pub header: Option<String>,

    /// Shown after everything else in help
    pub footer: Option<String>,

    /// After this token, every token is positional
    pub terminator: String,

    pub help: HelpOptions,
}

impl Command {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            header: None,
            footer: None,
            terminator: DEFAULT_TERMINATOR.to_owned(),
            help: HelpOptions::default(),
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    pub fn help_options(mut self, help: HelpOptions) -> Self {
        self.help = help;
        self
    }

    /**
    Tokenize a command line and get a [`Parser`] to declare options on. The
    arguments should *exclude* the name of the program; see
    [`LoadedArguments`][crate::LoadedArguments] for that.

    This fails only if a long flag is the very last argument.
    */
    pub fn parse<'arg, I, A>(self, args: I) -> Result<Parser<'arg>, Error>
    where
        I: IntoIterator<Item = &'arg A>,
        A: AsRef<[u8]> + ?Sized + 'arg,
    {
        let run = Run::new(args.into_iter().map(|arg| arg.as_ref()), &self.terminator)?;

        Ok(Parser {
            command: self,
            run,
            options: Vec::new(),
            positionals: Vec::new(),
            groups: Vec::new(),
        })
    }
}

fn declare<'arg, D>(
    declarer: &mut D,
    tags: Tags<'_>,
    descriptor: Descriptor,
    resolve: impl FnOnce(&mut Run<'arg>) -> Result<(), Error>,
) -> Result<(), Error>
where
    D: Declare<'arg> + ?Sized,
{
    let (run, descriptors) = declarer.parts();

    run.register(tags)
        .inspect_err(|error| debug!(option = %tags, %error, "failed to register option"))?;

    descriptors.push(descriptor);

    resolve(run).inspect_err(|error| debug!(option = %tags, %error, "failed to resolve option"))
}

/**
Option declarations. Each one validates and registers the option's keys,
records it for help, then immediately resolves it against the command line,
writing the result into `into`.

When an option is absent (and not required), its destination keeps whatever
value it had, so initialize destinations with their defaults. Flags are the
exception: they're always written.
*/
pub trait Declare<'arg> {
    /// The shared run state, and the list that this declarer records
    /// descriptors into.
    fn parts(&mut self) -> (&mut Run<'arg>, &mut Vec<Descriptor>);

    /// `into` is `true` if the flag is present, and `false` otherwise.
    fn flag(&mut self, declaration: Declaration<'_>, into: &mut bool) -> Result<&mut Self, Error> {
        let tags = declaration.tags();
        let requirement = declaration.requirement();

        declare(
            self,
            tags,
            declaration.describe(Repetition::Single),
            |run| run.resolve_flag(tags, requirement, into, false),
        )?;

        Ok(self)
    }

    /// `into` is `false` if the flag is present, and `true` otherwise.
    fn inverted_flag(
        &mut self,
        declaration: Declaration<'_>,
        into: &mut bool,
    ) -> Result<&mut Self, Error> {
        let tags = declaration.tags();
        let requirement = declaration.requirement();

        let descriptor = Descriptor {
            default: Some("true".to_owned()),
            ..declaration.describe(Repetition::Single)
        };

        declare(self, tags, descriptor, |run| {
            run.resolve_flag(tags, requirement, into, true)
        })?;

        Ok(self)
    }

    /// Count the occurrences of a flag; `-vvv` counts 3. An absent flag
    /// leaves the counter alone.
    fn count<C>(&mut self, declaration: Declaration<'_>, into: &mut C) -> Result<&mut Self, Error>
    where
        C: TryFrom<usize>,
    {
        let tags = declaration.tags();
        let requirement = declaration.requirement();

        declare(
            self,
            tags,
            declaration.describe(Repetition::Multiple),
            |run| run.resolve_count(tags, requirement, into),
        )?;

        Ok(self)
    }

    /// An option with a single value. If it appears more than once, the
    /// last value wins, but every occurrence must still have a value.
    fn arg<T>(&mut self, declaration: Declaration<'_>, into: &mut T) -> Result<&mut Self, Error>
    where
        T: RawValue<'arg>,
    {
        let tags = declaration.tags();
        let requirement = declaration.requirement();

        declare(
            self,
            tags,
            declaration.describe(Repetition::Single),
            |run| run.resolve_arg(tags, requirement, into),
        )?;

        Ok(self)
    }

    /// An option that can appear any number of times; every value is added
    /// to `into`, in order.
    fn list<C>(&mut self, declaration: Declaration<'_>, into: &mut C) -> Result<&mut Self, Error>
    where
        C: Collection,
        C::Item: RawValue<'arg>,
    {
        let tags = declaration.tags();
        let requirement = declaration.requirement();

        declare(
            self,
            tags,
            declaration.describe(Repetition::Multiple),
            |run| run.resolve_list(tags, requirement, into),
        )?;

        Ok(self)
    }
}

/// The options declared in a single named group, for help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupUsage {
    pub name: String,
    pub options: Vec<Descriptor>,
}

/**
A tokenized command line, ready for declarations.

Options are declared through [`Declare`]; positionals through
[`pos`][Parser::pos] and [`gather`][Parser::gather], which should come after
every option, since they take whatever the options didn't claim.
*/
#[derive(Debug)]
pub struct Parser<'arg> {
    command: Command,
    run: Run<'arg>,
    options: Vec<Descriptor>,
    positionals: Vec<Descriptor>,
    groups: Vec<GroupUsage>,
}

impl<'arg> Declare<'arg> for Parser<'arg> {
    fn parts(&mut self) -> (&mut Run<'arg>, &mut Vec<Descriptor>) {
        (&mut self.run, &mut self.options)
    }
}

impl<'arg> Parser<'arg> {
    /**
    Start a named group of options. Groups share this parser's tokens and
    keys; they only affect how options are laid out in help. Declaring a
    group with the same name again adds to the existing group.
    */
    pub fn group(&mut self, name: &str) -> Group<'_, 'arg> {
        let index = match self.groups.iter().position(|group| group.name == name) {
            Some(index) => index,
            None => {
                self.groups.push(GroupUsage {
                    name: name.to_owned(),
                    options: Vec::new(),
                });
                self.groups.len() - 1
            }
        };

        Group {
            usage: &mut self.groups[index],
            run: &mut self.run,
        }
    }

    /// Take the first unclaimed token as a positional
    pub fn pos<T>(&mut self, positional: Positional<'_>, into: &mut T) -> Result<&mut Self, Error>
    where
        T: RawValue<'arg>,
    {
        let name = positional.name();
        let requirement = positional.requirement();

        self.positionals
            .push(positional.describe(requirement, Repetition::Single));

        self.run
            .resolve_positional(name, requirement, into)
            .inspect_err(|error| debug!(positional = name, %error, "failed to resolve positional"))?;

        Ok(self)
    }

    /// Take every remaining unclaimed token, in order. Having nothing left
    /// to gather isn't an error.
    pub fn gather<C>(&mut self, positional: Positional<'_>, into: &mut C) -> Result<&mut Self, Error>
    where
        C: Collection,
        C::Item: RawValue<'arg>,
    {
        let name = positional.name();

        self.positionals
            .push(positional.describe(Requirement::Optional, Repetition::Multiple));

        self.run
            .resolve_gather(name, into)
            .inspect_err(|error| debug!(positional = name, %error, "failed to gather positionals"))?;

        Ok(self)
    }

    /// The number of tokens nothing has claimed yet
    pub fn unclaimed(&self) -> usize {
        self.run.unclaimed()
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn run(&self) -> &Run<'arg> {
        &self.run
    }

    /// Top-level options, in declaration order
    pub fn options(&self) -> &[Descriptor] {
        &self.options
    }

    pub fn positionals(&self) -> &[Descriptor] {
        &self.positionals
    }

    pub fn groups(&self) -> &[GroupUsage] {
        &self.groups
    }

    /// Help text for everything declared so far
    pub fn help(&self) -> Help<'_> {
        Help {
            command: &self.command,
            options: &self.options,
            groups: &self.groups,
            positionals: &self.positionals,
        }
    }

    pub fn write_help(&self, mut out: impl io::Write) -> io::Result<()> {
        write!(out, "{}", self.help())
    }
}

/// A named group of options; see [`Parser::group`].
#[derive(Debug)]
pub struct Group<'p, 'arg> {
    usage: &'p mut GroupUsage,
    run: &'p mut Run<'arg>,
}

impl<'arg> Declare<'arg> for Group<'_, 'arg> {
    fn parts(&mut self) -> (&mut Run<'arg>, &mut Vec<Descriptor>) {
        (&mut *self.run, &mut self.usage.options)
    }
}

impl Group<'_, '_> {
    pub fn name(&self) -> &str {
        &self.usage.name
    }

    /// The options declared in this group so far
    pub fn options(&self) -> &[Descriptor] {
        &self.usage.options
    }
}
