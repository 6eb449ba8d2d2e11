//! Helpers for extracting operands from opcodes.
use std::fmt;

use crate::constants::Address;

/// A single 16-bit instruction word, as fetched big-endian from memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u16);

impl Opcode {
    #[inline(always)]
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    /// Opcode family in the upper nibble.
    #[inline(always)]
    pub fn family(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Operand NNN, a 12-bit address.
    #[inline(always)]
    pub fn nnn(self) -> Address {
        self.0 & 0x0FFF
    }

    /// Operand NN, the low byte.
    #[inline(always)]
    pub fn nn(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// Operand N, the low nibble.
    #[inline(always)]
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// Register operand VX.
    #[inline(always)]
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// Register operand VY.
    #[inline(always)]
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
