mod bytecode;
mod clock;
pub mod constants;
mod cpu;
mod disasm;
mod display;
mod error;
mod keypad;
mod op;
mod timer;
pub mod timing;
mod vm;

pub use self::{
    bytecode::Opcode,
    clock::{Clock, Hz},
    display::{DrawResult, Framebuffer},
    keypad::{InvalidKeyCode, KeyCode, Keypad, RunState},
    op::Op,
    timer::Timers,
    timing::{InvalidTimingMode, TimingMode},
};

pub mod prelude {
    pub use super::{
        clock::Hz,
        cpu::Chip8Cpu,
        disasm::Disassembler,
        error::{Chip8Error, Chip8Result},
        keypad::{KeyCode, RunState},
        timing::TimingMode,
        vm::{Chip8Conf, Chip8Vm, Flow},
    };
}
