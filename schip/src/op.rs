//! Decoded instructions.
//!
//! Decoding is a pure function of the instruction word. The interpreter
//! matches on [`Op`] rather than on raw nibbles, so every opcode family
//! is handled in one exhaustive match.
use std::fmt::{self, Formatter};

use crate::{bytecode::Opcode, constants::Address};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Op {
    /// 00E0 (CLS)
    ///
    /// Clear the screen.
    ClearScreen,
    /// 00EE (RET)
    ///
    /// Return from the sub-routine.
    Return,
    /// 00Cn (SCD nibble)
    ///
    /// Scroll the display down by `n` physical rows.
    ScrollDown { n: u8 },
    /// 00FB (SCR)
    ///
    /// Scroll the display right by 4 physical columns.
    ScrollRight,
    /// 00FC (SCL)
    ///
    /// Scroll the display left by 4 physical columns.
    ScrollLeft,
    /// 00FD (EXIT)
    Exit,
    /// 00FE (LOW)
    LoRes,
    /// 00FF (HIGH)
    HiRes,
    /// 1nnn (JP addr)
    Jump { address: Address },
    /// 2nnn (CALL addr)
    Call { address: Address },
    /// 3xnn (SE Vx, byte)
    ///
    /// Skip the next instruction if register `Vx` equals value `nn`
    Skip_Eq_Byte { vx: u8, nn: u8 },
    /// 4xnn (SNE Vx, byte)
    Skip_NotEq_Byte { vx: u8, nn: u8 },
    /// 5xy0 (SE Vx, Vy)
    Skip_Eq { vx: u8, vy: u8 },
    /// 6xnn (LD Vx, byte)
    Load_Byte { vx: u8, nn: u8 },
    /// 7xnn (ADD Vx, byte)
    ///
    /// Carry flag is not affected.
    Add_Byte { vx: u8, nn: u8 },

    // ------------------------------------------------------------------------
    // Math
    /// 8xy0 (LD Vx, Vy)
    Load_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy1 (OR Vx, Vy)
    Or_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy2 (AND Vx, Vy)
    And_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy3 (XOR Vx, Vy)
    Xor_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy4 (ADD Vx, Vy)
    Add_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy5 (SUB Vx, Vy)
    Sub_Vx_Vy { vx: u8, vy: u8 },
    /// 8xy6 (SHR Vx {, Vy})
    ///
    /// `Vy` is only read when the legacy shift quirk is enabled.
    ShiftRight { vx: u8, vy: u8 },
    /// 8xy7 (SUBN Vx, Vy)
    SubReverse_Vx_Vy { vx: u8, vy: u8 },
    /// 8xyE (SHL Vx {, Vy})
    ShiftLeft { vx: u8, vy: u8 },

    /// 9xy0 (SNE Vx, Vy)
    Skip_NotEq { vx: u8, vy: u8 },
    /// Annn (LD I, addr)
    Load_Address { address: Address },
    /// Bnnn (JP V0, addr)
    Jump_V0 { address: Address },
    /// Cxnn (RND Vx, byte)
    Random { vx: u8, nn: u8 },
    /// Dxyn (DRW Vx, Vy, nibble)
    Draw { vx: u8, vy: u8, n: u8 },

    // ------------------------------------------------------------------------
    // Keyboard
    /// Ex9E (SKP Vx)
    Skip_Key { vx: u8 },
    /// ExA1 (SKNP Vx)
    Skip_NotKey { vx: u8 },

    // ------------------------------------------------------------------------
    // Miscellaneous
    /// Fx07 (LD Vx, DT)
    Load_Delay { vx: u8 },
    /// Fx0A (LD Vx, K)
    WaitKey { vx: u8 },
    /// Fx15 (LD DT, Vx)
    Set_Delay { vx: u8 },
    /// Fx18 (LD ST, Vx)
    Set_Sound { vx: u8 },
    /// Fx1E (ADD I, Vx)
    Add_Address { vx: u8 },
    /// Fx29 (LD F, Vx)
    Load_Glyph { vx: u8 },
    /// Fx33 (LD B, Vx)
    Store_Bcd { vx: u8 },
    /// Fx55 (LD [I], Vx)
    Store_Registers { vx: u8 },
    /// Fx65 (LD Vx, [I])
    Load_Registers { vx: u8 },

    /// Unrecognised bit pattern inside a known family.
    Unknown(Opcode),
}

impl Op {
    pub fn decode(opcode: Opcode) -> Self {
        let vx = opcode.x();
        let vy = opcode.y();

        match opcode.family() {
            0x0 => match opcode.0 {
                0x00E0 => Op::ClearScreen,
                0x00EE => Op::Return,
                0x00FB => Op::ScrollRight,
                0x00FC => Op::ScrollLeft,
                0x00FD => Op::Exit,
                0x00FE => Op::LoRes,
                0x00FF => Op::HiRes,
                word if word & 0xFFF0 == 0x00C0 => Op::ScrollDown { n: opcode.n() },
                _ => Op::Unknown(opcode),
            },
            0x1 => Op::Jump {
                address: opcode.nnn(),
            },
            0x2 => Op::Call {
                address: opcode.nnn(),
            },
            0x3 => Op::Skip_Eq_Byte { vx, nn: opcode.nn() },
            0x4 => Op::Skip_NotEq_Byte { vx, nn: opcode.nn() },
            0x5 => Op::Skip_Eq { vx, vy },
            0x6 => Op::Load_Byte { vx, nn: opcode.nn() },
            0x7 => Op::Add_Byte { vx, nn: opcode.nn() },
            0x8 => match opcode.n() {
                0x0 => Op::Load_Vx_Vy { vx, vy },
                0x1 => Op::Or_Vx_Vy { vx, vy },
                0x2 => Op::And_Vx_Vy { vx, vy },
                0x3 => Op::Xor_Vx_Vy { vx, vy },
                0x4 => Op::Add_Vx_Vy { vx, vy },
                0x5 => Op::Sub_Vx_Vy { vx, vy },
                0x6 => Op::ShiftRight { vx, vy },
                0x7 => Op::SubReverse_Vx_Vy { vx, vy },
                0xE => Op::ShiftLeft { vx, vy },
                _ => Op::Unknown(opcode),
            },
            0x9 => Op::Skip_NotEq { vx, vy },
            0xA => Op::Load_Address {
                address: opcode.nnn(),
            },
            0xB => Op::Jump_V0 {
                address: opcode.nnn(),
            },
            0xC => Op::Random { vx, nn: opcode.nn() },
            0xD => Op::Draw {
                vx,
                vy,
                n: opcode.n(),
            },
            0xE => match opcode.nn() {
                0x9E => Op::Skip_Key { vx },
                0xA1 => Op::Skip_NotKey { vx },
                _ => Op::Unknown(opcode),
            },
            0xF => match opcode.nn() {
                0x07 => Op::Load_Delay { vx },
                0x0A => Op::WaitKey { vx },
                0x15 => Op::Set_Delay { vx },
                0x18 => Op::Set_Sound { vx },
                0x1E => Op::Add_Address { vx },
                0x29 => Op::Load_Glyph { vx },
                0x33 => Op::Store_Bcd { vx },
                0x55 => Op::Store_Registers { vx },
                0x65 => Op::Load_Registers { vx },
                _ => Op::Unknown(opcode),
            },
            _ => unreachable!("opcode family is a 4-bit nibble"),
        }
    }
}

impl From<Opcode> for Op {
    fn from(opcode: Opcode) -> Self {
        Op::decode(opcode)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Op::ClearScreen => write!(f, "CLS"),
            Op::Return => write!(f, "RET"),
            Op::ScrollDown { n } => write!(f, "SCD {n}"),
            Op::ScrollRight => write!(f, "SCR"),
            Op::ScrollLeft => write!(f, "SCL"),
            Op::Exit => write!(f, "EXIT"),
            Op::LoRes => write!(f, "LOW"),
            Op::HiRes => write!(f, "HIGH"),
            Op::Jump { address } => write!(f, "JP 0x{address:03X}"),
            Op::Call { address } => write!(f, "CALL 0x{address:03X}"),
            Op::Skip_Eq_Byte { vx, nn } => write!(f, "SE v{vx:X}, {nn}"),
            Op::Skip_NotEq_Byte { vx, nn } => write!(f, "SNE v{vx:X}, {nn}"),
            Op::Skip_Eq { vx, vy } => write!(f, "SE v{vx:X}, v{vy:X}"),
            Op::Load_Byte { vx, nn } => write!(f, "LD v{vx:X}, {nn}"),
            Op::Add_Byte { vx, nn } => write!(f, "ADD v{vx:X}, {nn}"),
            // ------
            Op::Load_Vx_Vy { vx, vy } => write!(f, "LD v{vx:X}, v{vy:X}"),
            Op::Or_Vx_Vy { vx, vy } => write!(f, "OR v{vx:X}, v{vy:X}"),
            Op::And_Vx_Vy { vx, vy } => write!(f, "AND v{vx:X}, v{vy:X}"),
            Op::Xor_Vx_Vy { vx, vy } => write!(f, "XOR v{vx:X}, v{vy:X}"),
            Op::Add_Vx_Vy { vx, vy } => write!(f, "ADD v{vx:X}, v{vy:X}"),
            Op::Sub_Vx_Vy { vx, vy } => write!(f, "SUB v{vx:X}, v{vy:X}"),
            Op::ShiftRight { vx, vy } => write!(f, "SHR v{vx:X}, v{vy:X}"),
            Op::SubReverse_Vx_Vy { vx, vy } => write!(f, "SUBN v{vx:X}, v{vy:X}"),
            Op::ShiftLeft { vx, vy } => write!(f, "SHL v{vx:X}, v{vy:X}"),
            // ------
            Op::Skip_NotEq { vx, vy } => write!(f, "SNE v{vx:X}, v{vy:X}"),
            Op::Load_Address { address } => write!(f, "LD I, 0x{address:03X}"),
            Op::Jump_V0 { address } => write!(f, "JP v0, 0x{address:03X}"),
            Op::Random { vx, nn } => write!(f, "RND v{vx:X}, {nn}"),
            Op::Draw { vx, vy, n } => write!(f, "DRW v{vx:X}, v{vy:X}, {n}"),
            // ------
            Op::Skip_Key { vx } => write!(f, "SKP v{vx:X}"),
            Op::Skip_NotKey { vx } => write!(f, "SKNP v{vx:X}"),
            Op::Load_Delay { vx } => write!(f, "LD v{vx:X}, DT"),
            Op::WaitKey { vx } => write!(f, "LD v{vx:X}, K"),
            Op::Set_Delay { vx } => write!(f, "LD DT, v{vx:X}"),
            Op::Set_Sound { vx } => write!(f, "LD ST, v{vx:X}"),
            Op::Add_Address { vx } => write!(f, "ADD I, v{vx:X}"),
            Op::Load_Glyph { vx } => write!(f, "LD F, v{vx:X}"),
            Op::Store_Bcd { vx } => write!(f, "LD B, v{vx:X}"),
            Op::Store_Registers { vx } => write!(f, "LD [I], v{vx:X}"),
            Op::Load_Registers { vx } => write!(f, "LD v{vx:X}, [I]"),
            Op::Unknown(opcode) => write!(f, "0x{opcode}"),
        }
    }
}
