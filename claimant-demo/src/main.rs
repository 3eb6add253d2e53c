mod error;

use std::{fmt, io};

use anyhow::Context;
use claimant::{
    Command, DecodeError, Declaration, Declare, Errors, LoadedArguments, Positional, Value,
};
use lazy_format::lazy_format;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt as subscriber};

use crate::error::VendorError;

const HEADER: &str = "Pretends to build an object file, to show off how options, groups, \
    and positionals are declared and resolved. Nothing is actually compiled.";

/// A colon-separated tuple of vendor information, like `acme:123:x86`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct VendorId {
    segments: Vec<String>,
}

impl VendorId {
    fn parse(id: &str) -> Result<Self, VendorError> {
        if id.is_empty() {
            return Err(VendorError::Empty);
        }

        let segments = id
            .split(':')
            .enumerate()
            .map(|(index, segment)| match segment.is_empty() {
                true => Err(VendorError::EmptySegment {
                    id: id.to_owned(),
                    index,
                }),
                false => Ok(segment.to_owned()),
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { segments })
    }
}

impl<'arg> Value<'arg> for VendorId {
    fn from_arg(arg: &'arg str) -> Result<Self, DecodeError> {
        Self::parse(arg).map_err(DecodeError::custom)
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(":"))
    }
}

#[derive(Debug)]
struct Options {
    need_help: bool,
    verbosity: u8,
    output: String,

    max_phys: u8,
    word_size: f64,
    word_aligned: bool,

    warn: bool,
    warnings: Vec<String>,
    bus: u8,

    vendor: VendorId,
    subcommand: String,
    positionals: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            need_help: false,
            verbosity: 0,
            output: "a.out".to_owned(),
            max_phys: 0,
            word_size: 64.0,
            word_aligned: false,
            warn: false,
            warnings: Vec::new(),
            bus: 1,
            vendor: VendorId::default(),
            subcommand: "compile".to_owned(),
            positionals: Vec::new(),
        }
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |value: bool| match value {
            true => "y",
            false => "n",
        };

        writeln!(f, "output: {}", self.output)?;
        writeln!(f, "command: {}", self.subcommand)?;
        writeln!(f, "verbosity: {}", self.verbosity)?;
        writeln!(f, "max address: {} MiB", self.max_phys)?;
        writeln!(f, "word size: {} bits", self.word_size)?;
        writeln!(f, "word aligned: {}", yes_no(self.word_aligned))?;
        writeln!(f, "warnings enabled: {}", yes_no(self.warn))?;

        if self.warn {
            let warnings = lazy_format!("\t{warning}\n" for warning in &self.warnings);
            write!(f, "warnings:\n{warnings}")?;
        }

        writeln!(f, "bus ID: {}", self.bus)?;
        writeln!(f, "vendor: {}", self.vendor)?;

        if !self.positionals.is_empty() {
            let positionals = lazy_format!("\t{positional}\n" for positional in &self.positionals);
            write!(f, "positionals:\n{positionals}")?;
        }

        Ok(())
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    subscriber()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let arguments = LoadedArguments::from_env();
    let command = Command::new("testing", "just a simple testing app")
        .header(HEADER)
        .footer("Built as a demonstration of claimant.");

    let mut parser = arguments
        .parse(command)
        .context("failed to tokenize the command line")?;

    let mut options = Options::default();
    let mut errors = Errors::new();

    errors.record(parser.flag(
        Declaration::long_short('h', "help", "print this dialog"),
        &mut options.need_help,
    ));
    errors.record(parser.count(
        Declaration::long_short('v', "verbose", "increase the verbosity of the program"),
        &mut options.verbosity,
    ));
    errors.record(
        parser.arg(
            Declaration::long_short(
                'o',
                "output",
                "output path for the resulting object/binary",
            )
            .placeholder("FILE")
            .defaulted(&options.output),
            &mut options.output,
        ),
    );
    errors.record(parser.flag(
        Declaration::long_short('w', "warn-all", "toggle all warnings"),
        &mut options.warn,
    ));
    errors.record(parser.list(
        Declaration::long_short('W', "warn", "toggle a specific warning"),
        &mut options.warnings,
    ));

    let mut architecture = parser.group("architecture");
    errors.record(architecture.arg(
        Declaration::long_short('m', "max-phys", "max hardware memory address").placeholder("MiB"),
        &mut options.max_phys,
    ));
    errors.record(architecture.arg(
        Declaration::long("word-size", "number of bits in the maximum word size"),
        &mut options.word_size,
    ));
    errors.record(architecture.flag(
        Declaration::long(
            "word-aligned",
            "all memory operations and instructions must be word aligned",
        ),
        &mut options.word_aligned,
    ));

    errors.record(parser.group("outputs").arg(
        Declaration::long_short('s', "sound-bus", "ID of the sound bus"),
        &mut options.bus,
    ));

    errors.record(parser.arg(
        Declaration::long("vendor-id", "a colon-separated tuple of vendor information"),
        &mut options.vendor,
    ));
    errors.record(parser.pos(
        Positional::new("subcommand", "first positional is a subcommand").optional(),
        &mut options.subcommand,
    ));
    errors.record(parser.gather(
        Positional::new("inputs", "everything else"),
        &mut options.positionals,
    ));

    if options.need_help {
        parser
            .write_help(io::stdout().lock())
            .context("failed to print help")?;
        return Ok(());
    }

    errors.into_result().context("invalid command line")?;

    debug!(?options, "resolved options");
    print!("{options}");

    Ok(())
}
