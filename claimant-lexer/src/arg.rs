use core::fmt::{self, Write};

/**
A single, raw token passed in from the command line.

Every token keeps its original bytes, since that's what the OS gives us. Flags
are recognized by shape alone (`-abc`, `--name`), so nothing here needs to be
valid UTF-8 until a declared option asks for its value to be decoded.
*/
#[derive(Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Arg([u8]);

impl Arg {
    pub const fn new(bytes: &[u8]) -> &Self {
        // SAFETY: Arg is repr transparent to a byte slice, so it's safe to
        // transmute into it.
        unsafe { core::mem::transmute(bytes) }
    }

    pub const fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get this argument as a `str`, if it's valid UTF-8
    pub fn to_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

macro_rules! compare_bytes {
    ($($other:ty => |$value:ident| $bytes:expr;)*) => {$(
        impl PartialEq<$other> for Arg {
            fn eq(&self, $value: &$other) -> bool {
                self.0 == *$bytes
            }
        }
    )*};
}

compare_bytes! {
    [u8] => |other| other;
    &[u8] => |other| *other;
    str => |other| other.as_bytes();
    &str => |other| other.as_bytes();
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_str() {
            Some(s) => write!(f, "{:?}", s),
            None => write!(f, "{:?}", &self.0),
        }
    }
}

/// Lossy display: invalid UTF-8 sequences are replaced with U+FFFD.
impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.utf8_chunks().try_for_each(|chunk| {
            f.write_str(chunk.valid())?;

            match chunk.invalid() {
                b"" => Ok(()),
                _ => f.write_char(char::REPLACEMENT_CHARACTER),
            }
        })
    }
}
