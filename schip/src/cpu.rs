//! CPU and memory state.
use crate::{
    bytecode::Opcode,
    constants::*,
    error::{Chip8Error, Chip8Result},
};

/// Core state for a chip8 interpreter.
#[derive(Clone, PartialEq, Eq)]
pub struct Chip8Cpu {
    // ------------------------------------------------------------------------
    // Registers
    /// Program counter pointing to the current position in the bytecode.
    pub(crate) pc: Address,
    /// Stack pointer, indicating the number of return addresses on the stack.
    pub(crate) sp: usize,
    /// General purpose registers for temporary values.
    ///
    /// Register 16 (VF) is used for either the carry flag or borrow switch depending on opcode.
    pub(crate) registers: [u8; REGISTER_COUNT],
    /// Pointer register (I) used for temporarily storing an address.
    ///
    /// The full 16 bits are kept, but memory is only ever accessed through
    /// the lower 12.
    pub(crate) address: Address,

    // ------------------------------------------------------------------------
    // Memory
    /// Main memory storage space.
    pub(crate) ram: Box<[u8; MEM_SIZE]>,
    /// Stack of return pointers used for jumping when a routine call finishes.
    pub(crate) stack: [Address; STACK_SIZE],
}

impl Default for Chip8Cpu {
    fn default() -> Self {
        Self {
            pc: MEM_START as Address,
            sp: 0,
            registers: [0; REGISTER_COUNT],
            address: 0,

            ram: Box::new([0; MEM_SIZE]),
            stack: [0; STACK_SIZE],
        }
    }
}

impl Chip8Cpu {
    /// Creates a CPU with zeroed memory, the built-in font loaded,
    /// and the program counter at the start of program space.
    pub fn new() -> Self {
        let mut cpu = Self::default();
        cpu.ram[FONTSET_START..FONTSET_START + FONTSET_DATA_LENGTH].copy_from_slice(&FONTSET);
        cpu
    }

    /// Copy program bytes into memory at [`MEM_START`].
    ///
    /// Bytes that would not fit are dropped. Returns the number of bytes copied.
    pub fn load_program(&mut self, bytecode: &[u8]) -> usize {
        let count = bytecode.len().min(MEM_SIZE - MEM_START);
        self.ram[MEM_START..MEM_START + count].copy_from_slice(&bytecode[..count]);
        count
    }

    #[inline(always)]
    pub fn pc(&self) -> Address {
        self.pc
    }

    #[inline(always)]
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Value of the `I` register.
    #[inline(always)]
    pub fn address(&self) -> Address {
        self.address
    }

    #[inline(always)]
    pub fn register(&self, index: u8) -> u8 {
        self.registers[index as usize & 0xF]
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    /// Return addresses currently on the stack, oldest first.
    pub fn stack(&self) -> &[Address] {
        &self.stack[..self.sp]
    }

    pub fn ram(&self) -> &[u8; MEM_SIZE] {
        &self.ram
    }

    /// Read a byte of memory. The address wraps around the memory size.
    #[inline(always)]
    pub fn read(&self, address: usize) -> u8 {
        self.ram[address & ADDRESS_MASK]
    }

    /// Write a byte of memory. The address wraps around the memory size.
    #[inline(always)]
    pub fn write(&mut self, address: usize, value: u8) {
        self.ram[address & ADDRESS_MASK] = value;
    }

    /// Extract the instruction at the current program counter.
    #[inline(always)]
    pub fn fetch(&self) -> Opcode {
        let pc = self.pc as usize;
        Opcode::from_bytes([self.read(pc), self.read(pc + 1)])
    }

    /// Move the program counter forward by the given number of bytes.
    #[inline(always)]
    pub(crate) fn advance(&mut self, bytes: Address) {
        self.pc = self.pc.wrapping_add(bytes) & ADDRESS_MASK as Address;
    }

    #[inline(always)]
    pub(crate) fn jump(&mut self, address: usize) {
        self.pc = (address & ADDRESS_MASK) as Address;
    }

    /// Push a return address onto the call stack.
    ///
    /// The `pc` is the address of the calling instruction, used for error reporting.
    pub(crate) fn push(&mut self, return_address: Address, pc: Address) -> Chip8Result<()> {
        if self.sp >= STACK_SIZE {
            return Err(Chip8Error::StackOverflow { pc });
        }
        self.stack[self.sp] = return_address;
        self.sp += 1;
        Ok(())
    }

    /// Pop a return address off the call stack.
    pub(crate) fn pop(&mut self, pc: Address) -> Chip8Result<Address> {
        match self.sp.checked_sub(1) {
            Some(sp) => {
                self.sp = sp;
                Ok(self.stack[sp])
            }
            None => Err(Chip8Error::StackUnderflow { pc }),
        }
    }

    #[inline(always)]
    pub(crate) fn set_flag(&mut self, value: u8) {
        self.registers[FLAG_REGISTER] = value;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_cpu() {
        let cpu = Chip8Cpu::new();
        assert_eq!(cpu.pc(), 0x200);
        assert_eq!(cpu.sp(), 0);
        assert_eq!(&cpu.ram[0x50..0x55], &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(&cpu.ram[0x9B..0xA0], &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert!(cpu.ram[..0x50].iter().all(|b| *b == 0));
        assert!(cpu.ram[0xA0..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_load_truncates() {
        let mut cpu = Chip8Cpu::new();
        let program = vec![0xAB; MEM_SIZE];
        assert_eq!(cpu.load_program(&program), MEM_SIZE - MEM_START);
        assert_eq!(cpu.ram[MEM_SIZE - 1], 0xAB);
        assert_eq!(cpu.ram[MEM_START - 1], 0);
    }

    #[test]
    fn test_memory_wraps() {
        let mut cpu = Chip8Cpu::new();
        cpu.write(0x1005, 0x42);
        assert_eq!(cpu.ram[0x005], 0x42);
        assert_eq!(cpu.read(0xF005), 0x42);

        cpu.pc = 0xFFF;
        cpu.ram[0xFFF] = 0x12;
        cpu.ram[0x000] = 0x34;
        assert_eq!(cpu.fetch(), Opcode(0x1234));
    }

    #[test]
    fn test_stack_bounds() {
        let mut cpu = Chip8Cpu::new();
        assert_eq!(cpu.pop(0x200), Err(Chip8Error::StackUnderflow { pc: 0x200 }));
        assert_eq!(cpu.sp(), 0);

        for i in 0..STACK_SIZE {
            cpu.push(0x300 + i as Address, 0x200).unwrap();
        }
        assert_eq!(cpu.sp(), STACK_SIZE);
        assert_eq!(
            cpu.push(0x400, 0x220),
            Err(Chip8Error::StackOverflow { pc: 0x220 })
        );
        assert_eq!(cpu.sp(), STACK_SIZE);
        assert_eq!(cpu.pop(0x200), Ok(0x30F));
        assert_eq!(cpu.stack().len(), STACK_SIZE - 1);
    }
}
