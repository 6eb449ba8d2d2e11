//! Instruction timing.
//!
//! In [`TimingMode::Cosmac`] every instruction takes the number of machine
//! cycles the COSMAC VIP interpreter needed for it, and the clock runs at the
//! VIP's machine cycle rate. Costs are approximations where the VIP
//! depends on the state of the hardware.
use std::{fmt, str::FromStr};

use crate::{clock::Hz, constants::COSMAC_CYCLE_RATE};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimingMode {
    /// Every instruction takes a single cycle, at the configured rate.
    #[default]
    Fixed,
    /// Every instruction takes its historical number of cycles, at the
    /// COSMAC VIP rate.
    Cosmac,
}

impl TimingMode {
    /// Clock rate the mode is tied to, if any.
    pub fn base_rate(self) -> Option<Hz> {
        match self {
            Self::Fixed => None,
            Self::Cosmac => Some(Hz(COSMAC_CYCLE_RATE)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Cosmac => "cosmac",
        }
    }
}

impl fmt::Display for TimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimingMode {
    type Err = InvalidTimingMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fixed" => Ok(Self::Fixed),
            "cosmac" => Ok(Self::Cosmac),
            other => Err(InvalidTimingMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTimingMode(pub String);

impl std::error::Error for InvalidTimingMode {}

impl fmt::Display for InvalidTimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown timing mode \"{}\", expected fixed or cosmac", self.0)
    }
}

// ----------------------------------------------------------------------------
// COSMAC VIP machine cycles per instruction

pub const CLEAR_SCREEN: u32 = 24;
pub const RETURN: u32 = 10;
pub const JUMP: u32 = 12;
pub const CALL: u32 = 26;
pub const SKIP_BYTE: u32 = 10;
pub const SKIP_REGISTER: u32 = 14;
pub const SKIP_KEY: u32 = 14;
/// Extra cycles when a skip instruction is taken.
pub const SKIP_TAKEN: u32 = 4;
pub const LOAD_BYTE: u32 = 6;
pub const ADD_BYTE: u32 = 10;
pub const LOAD_REGISTER: u32 = 12;
pub const ALU: u32 = 44;
pub const LOAD_ADDRESS: u32 = 12;
pub const JUMP_V0: u32 = 22;
/// Extra cycles when `JP V0, addr` crosses a page.
pub const JUMP_V0_PAGE: u32 = 2;
pub const RANDOM: u32 = 36;
pub const DRAW: u32 = 3072;
pub const DRAW_ROW: u32 = 94;
pub const DRAW_COLLISION: u32 = 8;
pub const LOAD_DELAY: u32 = 10;
pub const WAIT_KEY: u32 = 2;
pub const SET_TIMER: u32 = 10;
pub const ADD_ADDRESS: u32 = 16;
/// Extra cycles when `ADD I, Vx` crosses a page.
pub const ADD_ADDRESS_PAGE: u32 = 6;
pub const LOAD_GLYPH: u32 = 20;
pub const BCD: u32 = 84;
pub const BCD_DIGIT: u32 = 16;
pub const REGISTER_BLOCK: u32 = 18;
pub const REGISTER_BLOCK_EACH: u32 = 14;
/// The VIP had no extended instructions. Scrolling and mode switches are
/// charged like a screen clear.
pub const EXTENDED: u32 = CLEAR_SCREEN;
pub const NOP: u32 = 1;

/// Cost of a skip instruction, depending on whether it was taken.
#[inline]
pub fn skip(base: u32, taken: bool) -> u32 {
    if taken {
        base + SKIP_TAKEN
    } else {
        base
    }
}

/// Cost of a sprite draw, by number of rows and colliding pixels.
#[inline]
pub fn draw(rows: usize, collisions: usize) -> u32 {
    let per_row = DRAW_ROW.saturating_add((collisions as u32).saturating_mul(DRAW_COLLISION));
    DRAW.saturating_add((rows as u32).saturating_mul(per_row))
}

/// Whether adding `offset` to the low byte of `base` carries into the next page.
#[inline]
pub fn crosses_page(base: u16, offset: u8) -> bool {
    (base & 0xFF) + offset as u16 >= 0x100
}
