use std::fmt::{self, Display, Write as _};

use indent_write::fmt::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;
use textwrap::Options;

use crate::{
    Tags,
    help::{Descriptor, Help, HelpOptions, Repetition, Requirement},
};

impl Display for Help<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print_help(f, self)
    }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn option_tags(option: &Descriptor) -> impl Display + '_ {
    lazy_format!(match (option.tags()) {
        Some(Tags::LongShort { long, short }) => "-{short}, --{long}",
        Some(Tags::Short { short }) => "-{short}",
        Some(Tags::Long { long }) => "    --{long}",
        None => "",
    })
}

fn positional_name(positional: &Descriptor) -> impl Display + '_ {
    let name = positional.long.as_deref().unwrap_or_default();

    lazy_format!(match (positional.repetition) {
        Repetition::Single => "{name}",
        Repetition::Multiple => "{name}...",
    })
}

/// The left-hand column of a row in the options list
fn row_prefix(descriptor: &Descriptor) -> String {
    let placeholder = lazy_format!(match (&descriptor.placeholder) {
        Some(placeholder) => " {placeholder}",
        None => "",
    });

    match descriptor.is_positional() {
        true => format!("{}{placeholder}", positional_name(descriptor)),
        false => format!("{}{placeholder}", option_tags(descriptor)),
    }
}

/// How a required option appears in the usage line
fn required_synopsis(option: &Descriptor) -> impl Display + '_ {
    let tag = lazy_format!(match (option.tags()) {
        Some(Tags::Short { short } | Tags::LongShort { short, .. }) => "-{short}",
        Some(Tags::Long { long }) => "--{long}",
        None => "",
    });

    lazy_format!(match (&option.placeholder) {
        Some(placeholder) => "{tag} {placeholder}",
        None => "{tag}",
    })
}

fn positional_synopsis(positional: &Descriptor) -> impl Display + '_ {
    let name = positional.long.as_deref().unwrap_or_default();

    lazy_format!(match ((positional.requirement, positional.repetition)) {
        (Requirement::Required, Repetition::Single) => "{name}",
        (Requirement::Required, Repetition::Multiple) => "{name}...",
        (Requirement::Optional, Repetition::Single) => "[{name}]",
        (Requirement::Optional, Repetition::Multiple) => "[{name}...]",
    })
}

fn blank_lines(out: &mut (impl fmt::Write + ?Sized), count: usize) -> fmt::Result {
    (0..count).try_for_each(|_| writeln!(out))
}

/// The absolute column that every description starts at: 5 past the end of
/// the longest row prefix, accounting for indentation.
fn description_column(help: &Help<'_>) -> usize {
    let options = &help.command.help;
    let nested = options.indent + options.group_indent;

    let top = help
        .options
        .iter()
        .map(|option| options.indent + display_width(&row_prefix(option)));

    let grouped = help
        .groups
        .iter()
        .flat_map(|group| group.options.iter())
        .chain(help.positionals)
        .map(|descriptor| nested + display_width(&row_prefix(descriptor)));

    top.chain(grouped).max().unwrap_or(0) + 5
}

/*
Overall structure:

NAME - DESCRIPTION

usage: NAME [-shorts] [--long] -required positional [gathered...]

HEADER

    -s, --long PLACEHOLDER     description
                               [default: value]

    GROUP:
        -g, --grouped          description

    positionals:
        positional             description

FOOTER
 */
fn print_help(out: &mut (impl fmt::Write + ?Sized), help: &Help<'_>) -> fmt::Result {
    let command = help.command;
    let options = &command.help;
    let column = description_column(help);

    match command.description.is_empty() {
        true => writeln!(out, "{}", command.name)?,
        false => writeln!(out, "{} - {}", command.name, command.description)?,
    }

    blank_lines(out, options.lines_between)?;
    print_usage(out, help)?;

    if let Some(header) = &command.header {
        blank_lines(out, options.lines_between)?;
        writeln!(out, "{}", textwrap::fill(header, options.width))?;
    }

    if !help.options.is_empty() {
        blank_lines(out, options.lines_between)?;

        let indent = " ".repeat(options.indent);
        let mut out = IndentWriter::new(&indent, &mut *out);
        print_rows(&mut out, help.options, options, column, options.indent)?;
    }

    help.groups.iter().try_for_each(|group| {
        blank_lines(out, options.lines_between)?;
        section(out, &group.name, &group.options, options, column)
    })?;

    if !help.positionals.is_empty() {
        blank_lines(out, options.lines_between)?;
        section(out, "positionals", help.positionals, options, column)?;
    }

    if let Some(footer) = &command.footer {
        blank_lines(out, options.lines_between)?;
        writeln!(out, "{}", textwrap::fill(footer, options.width))?;
    }

    Ok(())
}

fn print_usage(out: &mut (impl fmt::Write + ?Sized), help: &Help<'_>) -> fmt::Result {
    let command = help.command;
    let prefix = command.help.usage_prefix.as_str();

    let all_options = || {
        help.options
            .iter()
            .chain(help.groups.iter().flat_map(|group| group.options.iter()))
    };

    let optional = || {
        all_options().filter(|option| option.requirement == Requirement::Optional)
    };

    let shorts: String = optional().filter_map(|option| option.short).collect();

    let shorts = match shorts.is_empty() {
        true => None,
        false => Some(format!("[-{shorts}]")),
    };

    let longs = optional()
        .filter(|option| option.short.is_none())
        .filter_map(|option| option.long.as_deref())
        .map(|long| format!("[--{long}]"));

    let required = all_options()
        .filter(|option| option.requirement == Requirement::Required)
        .map(|option| required_synopsis(option).to_string());

    let positionals = help
        .positionals
        .iter()
        .map(|positional| positional_synopsis(positional).to_string());

    let words: Vec<String> = [prefix.to_owned(), command.name.clone()]
        .into_iter()
        .chain(shorts)
        .chain(longs)
        .chain(required)
        .chain(positionals)
        .collect();

    let line = words.iter().join_with(' ').to_string();
    let hanging = " ".repeat(display_width(prefix) + display_width(&command.name) + 2);

    writeln!(
        out,
        "{}",
        textwrap::fill(&line, Options::new(command.help.width).subsequent_indent(&hanging))
    )
}

/// Write a named section: the heading at `indent`, then its rows at
/// `indent + group_indent`.
fn section(
    out: &mut (impl fmt::Write + ?Sized),
    heading: &str,
    rows: &[Descriptor],
    options: &HelpOptions,
    column: usize,
) -> fmt::Result {
    let indent = " ".repeat(options.indent);
    let mut out = IndentWriter::new(&indent, &mut *out);

    writeln!(out, "{heading}:")?;
    blank_lines(&mut out, options.lines_after_group)?;

    let group_indent = " ".repeat(options.group_indent);
    let mut out = IndentWriter::new(&group_indent, &mut out);

    print_rows(
        &mut out,
        rows,
        options,
        column,
        options.indent + options.group_indent,
    )
}

/// Write rows that will end up `depth` columns in from the left edge,
/// once the enclosing indentation has been applied.
fn print_rows(
    out: &mut (impl fmt::Write + ?Sized),
    rows: &[Descriptor],
    options: &HelpOptions,
    column: usize,
    depth: usize,
) -> fmt::Result {
    let column = column.saturating_sub(depth);
    let width = options.width.saturating_sub(depth);
    let hanging = " ".repeat(column);

    rows.iter().try_for_each(|row| {
        let prefix = row_prefix(row);

        let wrapped = match row.description.is_empty() {
            true => {
                writeln!(out, "{prefix}")?;
                false
            }
            false => {
                let initial = format!("{prefix:column$}");
                let lines = textwrap::wrap(
                    &row.description,
                    Options::new(width)
                        .initial_indent(&initial)
                        .subsequent_indent(&hanging),
                );

                lines.iter().try_for_each(|line| writeln!(out, "{line}"))?;
                lines.len() > 1
            }
        };

        if let Some(default) = &row.default {
            let default = format!("[default: {default}]");

            textwrap::wrap(
                &default,
                Options::new(width)
                    .initial_indent(&hanging)
                    .subsequent_indent(&hanging),
            )
            .iter()
            .try_for_each(|line| writeln!(out, "{line}"))?;
        }

        match wrapped && options.line_after_wrap {
            true => writeln!(out),
            false => Ok(()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{option_tags, required_synopsis};
    use crate::{Command, Declaration, Declare, HelpOptions, Positional, Tags, help::Descriptor};

    #[test]
    fn tag_spellings() {
        let both = Descriptor::option(
            Tags::LongShort {
                long: "output",
                short: 'o',
            },
            "",
        );
        let short = Descriptor::option(Tags::Short { short: 'o' }, "");
        let long = Descriptor {
            placeholder: Some("FILE".to_owned()),
            ..Descriptor::option(Tags::Long { long: "output" }, "")
        };

        assert_eq!(option_tags(&both).to_string(), "-o, --output");
        assert_eq!(option_tags(&short).to_string(), "-o");
        assert_eq!(option_tags(&long).to_string(), "    --output");

        assert_eq!(required_synopsis(&both).to_string(), "-o");
        assert_eq!(required_synopsis(&long).to_string(), "--output FILE");
    }

    #[test]
    fn full_layout() {
        let args = ["in.txt"];
        let mut parser = Command::new("demo", "a demo").parse(&args).unwrap();

        let mut verbose = false;
        let mut output = String::from("a.out");
        let mut aligned = false;
        let mut input = String::new();

        parser
            .flag(Declaration::long_short('v', "verbose", "be loud"), &mut verbose)
            .unwrap()
            .arg(
                Declaration::long_short('o', "output", "where to write")
                    .placeholder("FILE")
                    .defaulted("a.out"),
                &mut output,
            )
            .unwrap();

        parser
            .group("extra")
            .flag(Declaration::long("aligned", "align words"), &mut aligned)
            .unwrap();

        parser
            .pos(Positional::new("input", "what to read"), &mut input)
            .unwrap();

        let expected = "\
demo - a demo

usage: demo [-vo] [--aligned] input

    -v, --verbose         be loud
    -o, --output FILE     where to write
                          [default: a.out]

    extra:
            --aligned     align words

    positionals:
        input             what to read
";

        assert_eq!(parser.help().to_string(), expected);
    }

    #[test]
    fn usage_line() {
        let args = ["-n", "3", "sub"];
        let mut parser = Command::new("tool", "").parse(&args).unwrap();

        let mut count = 0u32;
        let mut name = String::new();
        let mut sub = String::new();
        let mut rest: Vec<String> = Vec::new();

        parser
            .arg(
                Declaration::short('n', "how many").required().placeholder("N"),
                &mut count,
            )
            .unwrap()
            .arg(Declaration::long("name", "who"), &mut name)
            .unwrap()
            .pos(Positional::new("command", "what to do"), &mut sub)
            .unwrap()
            .gather(Positional::new("files", "inputs"), &mut rest)
            .unwrap();

        let help = parser.help().to_string();
        let usage = help.lines().nth(2).unwrap();

        assert_eq!(usage, "usage: tool [--name] -n N command [files...]");
        assert!(help.starts_with("tool\n"));
        assert!(help.contains("        files...     inputs\n"));
    }

    #[test]
    fn wrapped_descriptions() {
        let args: [&str; 0] = [];
        let mut parser = Command::new("wrap", "wraps")
            .header("A header that is long enough that it definitely needs to wrap across lines.")
            .footer("bye")
            .help_options(HelpOptions {
                width: 40,
                ..HelpOptions::default()
            })
            .parse(&args)
            .unwrap();

        let mut long = false;
        let mut short = false;

        parser
            .flag(
                Declaration::short('l', "a description that is much too long for one line"),
                &mut long,
            )
            .unwrap()
            .flag(Declaration::short('s', "short"), &mut short)
            .unwrap();

        let help = parser.help().to_string();

        assert!(help.lines().all(|line| line.chars().count() <= 40));
        assert!(help.ends_with("\nbye\n"));

        let lines: Vec<&str> = help.lines().collect();
        let first = lines
            .iter()
            .position(|line| line.starts_with("    -l"))
            .unwrap();
        let description = lines[first].find('a').unwrap();

        // Continuation lines hang at the description column, and a blank line
        // separates the wrapped row from the next one.
        assert!(lines[first + 1].starts_with(&" ".repeat(description)));
        let next = lines
            .iter()
            .position(|line| line.starts_with("    -s"))
            .unwrap();
        assert_eq!(lines[next - 1], "");
    }
}
