use std::ffi::{OsStr, OsString};

use crate::{
    errors::Error,
    parser::{Command, Parser},
};

/// Helper type for loading arguments from the environment.
///
/// This type exists for roughly two purposes: to provide a convenient
/// owned container for args retrieved from [`std::env`], and to be an object
/// that a [`Parser`] can borrow from.
#[derive(Debug, Clone)]
pub struct LoadedArguments {
    arguments: Vec<OsString>,
}

impl LoadedArguments {
    pub fn from_env() -> Self {
        Self::new(std::env::args_os())
    }

    /// Load a complete argument list, including the program name.
    pub fn new<I>(arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        Self {
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// The program name, as given by the OS
    pub fn argv0(&self) -> Option<&OsStr> {
        self.arguments.first().map(OsString::as_os_str)
    }

    /// Every argument after the program name, as raw bytes
    pub fn arguments(&self) -> impl Iterator<Item = &[u8]> {
        self.arguments
            .get(1..)
            .unwrap_or(&[])
            .iter()
            .map(|arg| arg.as_encoded_bytes())
    }

    /// Tokenize these arguments for `command`. If the command doesn't have
    /// a name, the program name is used.
    pub fn parse(&self, mut command: Command) -> Result<Parser<'_>, Error> {
        if command.name.is_empty() {
            if let Some(argv0) = self.argv0() {
                command.name = argv0.to_string_lossy().into_owned();
            }
        }

        command.parse(self.arguments())
    }
}
