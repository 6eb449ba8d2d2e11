//! Disassembler.
use std::fmt::{self, Write as FmtWrite};

use crate::{bytecode::Opcode, constants::MEM_START, op::Op};

/// Linear disassembler.
///
/// Every two bytes are decoded as an instruction, starting at the program
/// load address. Sprite data mixed into the program is listed as whatever
/// instruction it happens to decode to.
pub struct Disassembler<'a> {
    bytecode: &'a [u8],
    cursor: usize,
}

impl<'a> Disassembler<'a> {
    pub fn new(bytecode: &'a [u8]) -> Self {
        Self {
            bytecode,
            cursor: 0,
        }
    }

    /// Write the listing of the whole program to the given writer.
    pub fn disassemble<W: FmtWrite>(&mut self, w: &mut W) -> fmt::Result {
        self.cursor = 0;

        while self.cursor < self.bytecode.len() {
            self.disassemble_one(w)?;
        }

        Ok(())
    }

    /// Write a single instruction to the given writer, and move past it.
    pub fn disassemble_one<W: FmtWrite>(&mut self, w: &mut W) -> fmt::Result {
        let address = MEM_START + self.cursor;

        match self.bytecode.get(self.cursor..self.cursor + 2) {
            Some(&[hi, lo]) => {
                let opcode = Opcode::from_bytes([hi, lo]);
                writeln!(w, "{address:04X}: {opcode}  {}", Op::decode(opcode))?;
                self.cursor += 2;
            }
            _ => {
                // Trailing odd byte, or nothing left.
                if let Some(byte) = self.bytecode.get(self.cursor) {
                    writeln!(w, "{address:04X}: {byte:02X}    db 0x{byte:02X}")?;
                    self.cursor += 1;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_listing() {
        let mut disasm = Disassembler::new(&[0x60, 0x05, 0x00, 0xFF, 0x80, 0x1F, 0xAB]);
        let mut buf = String::new();
        disasm.disassemble(&mut buf).unwrap();

        let lines: Vec<&str> = buf.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "0200: 6005  LD v0, 5");
        assert!(lines[1].starts_with("0202: 00FF  "));
        assert_eq!(lines[2], "0204: 801F  0x801F");
        assert_eq!(lines[3], "0206: AB    db 0xAB");
    }

    #[test]
    fn test_past_the_end() {
        let mut buf = String::new();
        let mut disasm = Disassembler::new(&[]);
        disasm.disassemble_one(&mut buf).unwrap();
        disasm.disassemble(&mut buf).unwrap();
        assert!(buf.is_empty());

        let mut disasm = Disassembler::new(&[0x00, 0xE0]);
        disasm.disassemble(&mut buf).unwrap();
        disasm.disassemble_one(&mut buf).unwrap();
        assert_eq!(buf, "0200: 00E0  CLS\n");
    }
}
