//! Result and errors.
use std::fmt::{self, Display, Formatter};

use crate::constants::Address;

pub type Chip8Result<T> = std::result::Result<T, Chip8Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chip8Error {
    /// `RET` was executed with an empty call stack.
    StackUnderflow { pc: Address },
    /// `CALL` was executed with a full call stack.
    StackOverflow { pc: Address },
    Fmt(fmt::Error),
}

impl Chip8Error {
    /// Address of the instruction that faulted, if the error came from the interpreter.
    pub fn pc(&self) -> Option<Address> {
        match self {
            Self::StackUnderflow { pc } | Self::StackOverflow { pc } => Some(*pc),
            Self::Fmt(_) => None,
        }
    }
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::StackUnderflow { pc } => write!(f, "call stack underflow at {pc:04X}"),
            Self::StackOverflow { pc } => write!(f, "call stack overflow at {pc:04X}"),
            Self::Fmt(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Chip8Error {}

impl From<fmt::Error> for Chip8Error {
    fn from(err: fmt::Error) -> Self {
        Chip8Error::Fmt(err)
    }
}
