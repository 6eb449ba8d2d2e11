//! Virtual machine.
use std::{
    fmt::{self, Write},
    time::Duration,
};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    clock::{Clock, Hz},
    constants::*,
    cpu::Chip8Cpu,
    display::Framebuffer,
    error::{Chip8Error, Chip8Result},
    keypad::{KeyCode, Keypad, RunState},
    op::Op,
    timer::Timers,
    timing::{self, TimingMode},
};

pub struct Chip8Vm {
    cpu: Chip8Cpu,
    display: Framebuffer,
    keypad: Keypad,
    timers: Timers,
    clock: Clock,
    state: RunState,
    /// Clock cycles still owed by the last executed instruction.
    pending_cycles: u32,
    /// Cycle cost of the last executed instruction.
    last_cost: u32,
    /// Set by `00FD` (`EXIT`) for the host to poll.
    exit_requested: bool,
    /// Fatal error that stopped the interpreter.
    fault: Option<Chip8Error>,
    rng: StdRng,
    conf: Chip8Conf,
}

/// VM Configuration Parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Chip8Conf {
    /// Instructions per second in fixed timing mode.
    pub cycle_rate: Hz,
    pub timing: TimingMode,
    /// `8xy6` and `8xyE` shift `Vy` and store the result in `Vx`,
    /// as on the COSMAC VIP. Otherwise `Vx` is shifted in place.
    pub legacy_shift: bool,
    /// `Fx55` and `Fx65` leave `I` incremented past the last register,
    /// as on the COSMAC VIP. Otherwise `I` is left unchanged.
    pub legacy_memops: bool,
    /// Seed for the `RND` instruction. Seeded from entropy when not set.
    pub seed: Option<u64>,
}

/// Outcome of a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Flow {
    Ok,
    /// Program counter has jumped to a new address.
    ///
    /// This is returned when the interpreter encounters:
    ///
    /// - 1nnn (`JP addr`)
    /// - 2nnn (`CALL addr`)
    /// - 00EE (`RET`)
    /// - Bnnn (`JP V0, addr`)
    Jump,
    Draw,
    Sound,
    /// Wait for a keypress.
    ///
    /// Returned by the opcode `Fx0A` (`LD Vx, K`), and by every step
    /// while the machine is still waiting.
    KeyWait,
    /// The program requested the interpreter to exit.
    Exit,
}

impl Chip8Vm {
    pub fn new(mut conf: Chip8Conf) -> Self {
        conf.cycle_rate = conf.cycle_rate.clamped();

        let rate = conf.timing.base_rate().unwrap_or(conf.cycle_rate);
        let rng = match conf.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Chip8Vm {
            cpu: Chip8Cpu::new(),
            display: Framebuffer::new(),
            keypad: Keypad::default(),
            timers: Timers::new(),
            clock: Clock::new(rate),
            state: RunState::Running,
            pending_cycles: 0,
            last_cost: 0,
            exit_requested: false,
            fault: None,
            rng,
            conf,
        }
    }

    /// Configuration that was used to instantiate the VM.
    pub fn config(&self) -> &Chip8Conf {
        &self.conf
    }

    /// Load program bytes into memory, starting at `0x200`.
    ///
    /// Any byte sequence is accepted. Programs too large for memory are
    /// truncated. The machine state is not reset.
    pub fn load_program(&mut self, bytecode: &[u8]) -> usize {
        let count = self.cpu.load_program(bytecode);

        if count < bytecode.len() {
            log::warn!(
                "program truncated to {count} bytes, {} bytes did not fit in memory",
                bytecode.len() - count
            );
        } else {
            log::debug!("loaded program of {count} bytes");
        }

        count
    }

    pub fn cpu(&self) -> &Chip8Cpu {
        &self.cpu
    }

    pub fn display(&self) -> &Framebuffer {
        &self.display
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    #[inline]
    pub fn delay_timer(&self) -> u8 {
        self.timers.delay()
    }

    /// Current sound timer. The buzzer should sound while it's non-zero.
    #[inline]
    pub fn sound_timer(&self) -> u8 {
        self.timers.sound()
    }

    #[inline]
    pub fn buzzer(&self) -> bool {
        self.timers.sound() > 0
    }

    #[inline]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    #[inline]
    pub fn run_state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_awaiting_key(&self) -> bool {
        matches!(self.state, RunState::AwaitingKey { .. })
    }

    /// The fatal error that stopped the interpreter, if any.
    pub fn fault(&self) -> Option<&Chip8Error> {
        self.fault.as_ref()
    }

    /// Number of clock cycles consumed by the last executed instruction.
    pub fn last_cost(&self) -> u32 {
        self.last_cost
    }

    pub fn timing_mode(&self) -> TimingMode {
        self.conf.timing
    }

    /// Switch the timing mode.
    ///
    /// The clock rate follows the mode, and the cycles owed by the
    /// instruction in flight are dropped.
    pub fn set_timing_mode(&mut self, timing: TimingMode) {
        self.conf.timing = timing;
        self.pending_cycles = 0;
        self.clock
            .set_rate(timing.base_rate().unwrap_or(self.conf.cycle_rate));
    }

    /// Change the instruction rate for the fixed timing mode.
    ///
    /// Takes effect on the next update.
    pub fn set_cycle_rate(&mut self, rate: Hz) {
        self.conf.cycle_rate = rate.clamped();
        if self.conf.timing.base_rate().is_none() {
            self.clock.set_rate(self.conf.cycle_rate);
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

/// Input
impl Chip8Vm {
    /// Mark a key as pressed.
    ///
    /// If the VM is waiting for keyboard input, the key is stored in the
    /// waiting register and execution resumes at the next step.
    pub fn press_key(&mut self, key: KeyCode) {
        self.keypad.set(key, true);

        if let RunState::AwaitingKey { register } = self.state {
            self.cpu.registers[register as usize & 0xF] = key.as_u8();
            self.state = RunState::Running;
        }
    }

    /// Mark a key as released. Has no effect on a pending key wait.
    pub fn release_key(&mut self, key: KeyCode) {
        self.keypad.set(key, false);
    }

    /// Sets the keyboard key input state.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.press_key(key)
        } else {
            self.release_key(key)
        }
    }

    /// Clear the keyboard input state, setting all keys to up.
    pub fn clear_keys(&mut self) {
        self.keypad.clear()
    }
}

/// Clock
impl Chip8Vm {
    /// Advance the machine by the given wall time.
    ///
    /// Runs as many clock cycles as fit in the elapsed time, then counts
    /// down the timers. Returns the number of clock cycles run.
    pub fn update(&mut self, elapsed: Duration) -> Chip8Result<u64> {
        if let Some(err) = &self.fault {
            return Err(err.clone());
        }

        self.clock.advance(elapsed);

        let mut cycles = 0;
        while self.clock.take_cycle() {
            self.cycle()?;
            cycles += 1;
        }

        self.timers.advance(elapsed);

        Ok(cycles)
    }

    /// A single clock cycle.
    ///
    /// An instruction is only executed once the cycles owed by the previous
    /// instruction have been paid off.
    fn cycle(&mut self) -> Chip8Result<()> {
        if self.is_awaiting_key() {
            return Ok(());
        }

        if self.pending_cycles > 0 {
            self.pending_cycles -= 1;
            return Ok(());
        }

        self.step().map(|_| ())
    }

    /// Execute the given number of instructions, ignoring the clock.
    ///
    /// Stops early when the machine starts waiting for a key.
    pub fn run_steps(&mut self, step_count: usize) -> Chip8Result<Flow> {
        let mut flow = Flow::Ok;

        for _ in 0..step_count {
            flow = self.step()?;
            if flow == Flow::KeyWait {
                break;
            }
        }

        Ok(flow)
    }
}

/// Interpreter
impl Chip8Vm {
    /// Execute exactly one instruction.
    ///
    /// While waiting for a keypress this is a no-op. Once faulted, the
    /// fault is returned again without executing anything.
    pub fn step(&mut self) -> Chip8Result<Flow> {
        if let Some(err) = &self.fault {
            return Err(err.clone());
        }

        if self.is_awaiting_key() {
            return Ok(Flow::KeyWait);
        }

        // Each instruction is two bytes, with the opcode identity in the first 4-bit nibble.
        let pc = self.cpu.pc;
        let op = Op::decode(self.cpu.fetch());
        op_trace(pc, &op);

        self.cpu.advance(2);

        match self.exec(op, pc) {
            Ok((flow, cost)) => {
                let cost = match self.conf.timing {
                    TimingMode::Fixed => 1,
                    TimingMode::Cosmac => cost.max(1),
                };
                self.last_cost = cost;
                self.pending_cycles = cost - 1;
                Ok(flow)
            }
            Err(err) => {
                // Leave the program counter on the faulting instruction.
                self.cpu.pc = pc;
                log::error!("{err}");
                self.fault = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Execute a decoded instruction.
    ///
    /// The program counter has already been moved past the instruction,
    /// `pc` is its address. Returns the COSMAC cycle cost.
    fn exec(&mut self, op: Op, pc: Address) -> Chip8Result<(Flow, u32)> {
        let mut flow = Flow::Ok;

        let cost = match op {
            // 00E0 (CLS)
            Op::ClearScreen => {
                self.display.clear();
                flow = Flow::Draw;
                timing::CLEAR_SCREEN
            }
            // 00EE (RET)
            //
            // Set the program counter to the value at the top of the stack.
            Op::Return => {
                let address = self.cpu.pop(pc)?;
                self.cpu.jump(address as usize);
                flow = Flow::Jump;
                timing::RETURN
            }
            // 00Cn (SCD nibble)
            Op::ScrollDown { n } => {
                self.display.scroll_down(n as usize);
                flow = Flow::Draw;
                timing::EXTENDED
            }
            // 00FB (SCR)
            Op::ScrollRight => {
                self.display.scroll_right();
                flow = Flow::Draw;
                timing::EXTENDED
            }
            // 00FC (SCL)
            Op::ScrollLeft => {
                self.display.scroll_left();
                flow = Flow::Draw;
                timing::EXTENDED
            }
            // 00FD (EXIT)
            //
            // Only raises the flag. Stopping is up to the host.
            Op::Exit => {
                log::info!("exit requested at {pc:04X}");
                self.exit_requested = true;
                flow = Flow::Exit;
                timing::NOP
            }
            // 00FE (LOW)
            Op::LoRes => {
                log::info!("low resolution mode");
                self.display.set_hires(false);
                timing::EXTENDED
            }
            // 00FF (HIGH)
            Op::HiRes => {
                log::info!("high resolution mode");
                self.display.set_hires(true);
                timing::EXTENDED
            }
            // 1nnn (JP addr)
            Op::Jump { address } => {
                self.cpu.jump(address as usize);
                flow = Flow::Jump;
                timing::JUMP
            }
            // 2nnn (CALL addr)
            //
            // The return address is the instruction after the call.
            Op::Call { address } => {
                self.cpu.push(self.cpu.pc, pc)?;
                self.cpu.jump(address as usize);
                flow = Flow::Jump;
                timing::CALL
            }
            // 3xnn (SE Vx, byte)
            Op::Skip_Eq_Byte { vx, nn } => {
                let taken = self.cpu.register(vx) == nn;
                self.skip_if(taken);
                timing::skip(timing::SKIP_BYTE, taken)
            }
            // 4xnn (SNE Vx, byte)
            Op::Skip_NotEq_Byte { vx, nn } => {
                let taken = self.cpu.register(vx) != nn;
                self.skip_if(taken);
                timing::skip(timing::SKIP_BYTE, taken)
            }
            // 5xy0 (SE Vx, Vy)
            Op::Skip_Eq { vx, vy } => {
                let taken = self.cpu.register(vx) == self.cpu.register(vy);
                self.skip_if(taken);
                timing::skip(timing::SKIP_REGISTER, taken)
            }
            // 6xnn (LD Vx, byte)
            Op::Load_Byte { vx, nn } => {
                self.cpu.registers[vx as usize] = nn;
                timing::LOAD_BYTE
            }
            // 7xnn (ADD Vx, byte)
            //
            // Carry flag is not set.
            Op::Add_Byte { vx, nn } => {
                let x = self.cpu.register(vx);
                self.cpu.registers[vx as usize] = x.wrapping_add(nn);
                timing::ADD_BYTE
            }
            // 9xy0 (SNE Vx, Vy)
            Op::Skip_NotEq { vx, vy } => {
                let taken = self.cpu.register(vx) != self.cpu.register(vy);
                self.skip_if(taken);
                timing::skip(timing::SKIP_REGISTER, taken)
            }
            // Annn (LD I, addr)
            Op::Load_Address { address } => {
                self.cpu.address = address;
                timing::LOAD_ADDRESS
            }
            // Bnnn (JP V0, addr)
            //
            // Jump to location nnn + V0.
            Op::Jump_V0 { address } => {
                let v0 = self.cpu.register(0);
                self.cpu.jump(address as usize + v0 as usize);
                flow = Flow::Jump;
                if timing::crosses_page(address, v0) {
                    timing::JUMP_V0 + timing::JUMP_V0_PAGE
                } else {
                    timing::JUMP_V0
                }
            }
            // Cxnn (RND Vx, byte)
            //
            // Set register VX to the result of bitwise AND between a random number and NN.
            Op::Random { vx, nn } => {
                self.cpu.registers[vx as usize] = nn & self.rng.gen::<u8>();
                timing::RANDOM
            }
            // Dxyn (DRW Vx, Vy, nibble)
            Op::Draw { vx, vy, n } => {
                flow = Flow::Draw;
                self.exec_draw(vx, vy, n)
            }
            Op::Load_Vx_Vy { .. }
            | Op::Or_Vx_Vy { .. }
            | Op::And_Vx_Vy { .. }
            | Op::Xor_Vx_Vy { .. }
            | Op::Add_Vx_Vy { .. }
            | Op::Sub_Vx_Vy { .. }
            | Op::ShiftRight { .. }
            | Op::SubReverse_Vx_Vy { .. }
            | Op::ShiftLeft { .. } => self.exec_math(op),
            Op::Skip_Key { .. }
            | Op::Skip_NotKey { .. }
            | Op::Load_Delay { .. }
            | Op::WaitKey { .. }
            | Op::Set_Delay { .. }
            | Op::Set_Sound { .. }
            | Op::Add_Address { .. }
            | Op::Load_Glyph { .. }
            | Op::Store_Bcd { .. }
            | Op::Store_Registers { .. }
            | Op::Load_Registers { .. } => {
                let (misc_flow, cost) = self.exec_misc(op);
                flow = misc_flow;
                cost
            }
            // Unrecognised instructions only advance the program counter.
            Op::Unknown(_) => timing::NOP,
        };

        Ok((flow, cost))
    }

    #[inline]
    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.cpu.advance(2);
        }
    }

    /// Execute an arithmetic instruction.
    ///
    /// The flag register is always written after the result, so VF holds
    /// the flag even when it is the destination.
    #[must_use]
    fn exec_math(&mut self, op: Op) -> u32 {
        let regs = &mut self.cpu.registers;

        match op {
            // 8xy0 (LD Vx, Vy)
            Op::Load_Vx_Vy { vx, vy } => {
                regs[vx as usize] = regs[vy as usize];
                return timing::LOAD_REGISTER;
            }
            // 8xy1 (OR Vx, Vy)
            Op::Or_Vx_Vy { vx, vy } => regs[vx as usize] |= regs[vy as usize],
            // 8xy2 (AND Vx, Vy)
            Op::And_Vx_Vy { vx, vy } => regs[vx as usize] &= regs[vy as usize],
            // 8xy3 (XOR Vx, Vy)
            Op::Xor_Vx_Vy { vx, vy } => regs[vx as usize] ^= regs[vy as usize],
            // 8xy4 (ADD Vx, Vy)
            //
            // If overflow, set VF to 1, else 0.
            Op::Add_Vx_Vy { vx, vy } => {
                let (result, carry) = regs[vx as usize].overflowing_add(regs[vy as usize]);
                regs[vx as usize] = result;
                regs[FLAG_REGISTER] = carry as u8;
            }
            // 8xy5 (SUB Vx, Vy)
            //
            // VF is set to 0 when there is a borrow, set to 1 when there isn't.
            Op::Sub_Vx_Vy { vx, vy } => {
                let (x, y) = (regs[vx as usize], regs[vy as usize]);
                regs[vx as usize] = x.wrapping_sub(y);
                regs[FLAG_REGISTER] = (x >= y) as u8;
            }
            // 8xy7 (SUBN Vx, Vy)
            //
            // Subtracts VX from VY, and stores the result in VX.
            Op::SubReverse_Vx_Vy { vx, vy } => {
                let (x, y) = (regs[vx as usize], regs[vy as usize]);
                regs[vx as usize] = y.wrapping_sub(x);
                regs[FLAG_REGISTER] = (y >= x) as u8;
            }
            // 8xy6 (SHR Vx {, Vy})
            //
            // VF receives the bit shifted out.
            Op::ShiftRight { vx, vy } => {
                let source = if self.conf.legacy_shift { vy } else { vx };
                let value = regs[source as usize];
                let result = value >> 1;
                regs[source as usize] = result;
                regs[vx as usize] = result;
                regs[FLAG_REGISTER] = value & 1;
            }
            // 8xyE (SHL Vx {, Vy})
            Op::ShiftLeft { vx, vy } => {
                let source = if self.conf.legacy_shift { vy } else { vx };
                let value = regs[source as usize];
                let result = value << 1;
                regs[source as usize] = result;
                regs[vx as usize] = result;
                regs[FLAG_REGISTER] = value >> 7;
            }
            _ => unreachable!("not an arithmetic instruction: {op}"),
        }

        timing::ALU
    }

    /// Execute a keyboard, timer or memory instruction.
    #[must_use]
    fn exec_misc(&mut self, op: Op) -> (Flow, u32) {
        let mut flow = Flow::Ok;

        let cost = match op {
            // Ex9E (SKP Vx)
            Op::Skip_Key { vx } => {
                let taken = self.keypad.is_pressed(self.cpu.register(vx));
                self.skip_if(taken);
                timing::skip(timing::SKIP_KEY, taken)
            }
            // ExA1 (SKNP Vx)
            Op::Skip_NotKey { vx } => {
                let taken = !self.keypad.is_pressed(self.cpu.register(vx));
                self.skip_if(taken);
                timing::skip(timing::SKIP_KEY, taken)
            }
            // Fx07 (LD Vx, DT)
            Op::Load_Delay { vx } => {
                self.cpu.registers[vx as usize] = self.timers.delay;
                timing::LOAD_DELAY
            }
            // Fx0A (LD Vx, K)
            //
            // All execution stops until a key is pressed, then the value of
            // that key is stored in Vx. The program counter has already moved
            // on, so execution resumes at the next instruction.
            Op::WaitKey { vx } => {
                self.state = RunState::AwaitingKey { register: vx };
                flow = Flow::KeyWait;
                timing::WAIT_KEY
            }
            // Fx15 (LD DT, Vx)
            Op::Set_Delay { vx } => {
                self.timers.delay = self.cpu.register(vx);
                timing::SET_TIMER
            }
            // Fx18 (LD ST, Vx)
            Op::Set_Sound { vx } => {
                self.timers.sound = self.cpu.register(vx);
                flow = Flow::Sound;
                timing::SET_TIMER
            }
            // Fx1E (ADD I, Vx)
            Op::Add_Address { vx } => {
                let x = self.cpu.register(vx);
                let address = self.cpu.address;
                self.cpu.address = address.wrapping_add(x as Address);
                if timing::crosses_page(address, x) {
                    timing::ADD_ADDRESS + timing::ADD_ADDRESS_PAGE
                } else {
                    timing::ADD_ADDRESS
                }
            }
            // Fx29 (LD F, Vx)
            //
            // Set I = location of the font glyph for the digit in Vx.
            Op::Load_Glyph { vx } => {
                let digit = (self.cpu.register(vx) & 0xF) as usize;
                self.cpu.address = (FONTSET_START + digit * FONTSET_HEIGHT) as Address;
                timing::LOAD_GLYPH
            }
            // Fx33 (LD B, Vx)
            //
            // Store the binary-coded decimal representation of Vx
            // in the memory locations I, I+1, and I+2.
            Op::Store_Bcd { vx } => {
                let x = self.cpu.register(vx);
                let digits = [x / 100, x / 10 % 10, x % 10];
                let addr = self.cpu.address as usize;
                for (i, digit) in digits.iter().enumerate() {
                    self.cpu.write(addr + i, *digit);
                }
                let sum: u32 = digits.iter().map(|d| *d as u32).sum();
                timing::BCD + sum * timing::BCD_DIGIT
            }
            // Fx55 (LD [I], Vx)
            //
            // Store registers V0 through Vx in memory starting at location I.
            Op::Store_Registers { vx } => {
                let addr = self.cpu.address as usize;
                for i in 0..=vx as usize {
                    self.cpu.write(addr + i, self.cpu.registers[i]);
                }
                self.register_block_done(vx)
            }
            // Fx65 (LD Vx, [I])
            //
            // Read registers V0 through Vx from memory starting at location I.
            Op::Load_Registers { vx } => {
                let addr = self.cpu.address as usize;
                for i in 0..=vx as usize {
                    self.cpu.registers[i] = self.cpu.read(addr + i);
                }
                self.register_block_done(vx)
            }
            _ => unreachable!("not a miscellaneous instruction: {op}"),
        };

        (flow, cost)
    }

    /// Apply the memory quirk after a register block transfer.
    fn register_block_done(&mut self, vx: u8) -> u32 {
        let count = vx as u32 + 1;
        if self.conf.legacy_memops {
            self.cpu.address = self.cpu.address.wrapping_add(count as Address);
        }
        timing::REGISTER_BLOCK + count * timing::REGISTER_BLOCK_EACH
    }

    /// Dxyn (DRW Vx, Vy, nibble)
    ///
    /// Draw a sprite stored at address I to the display buffer, at the
    /// coordinate in registers Vx and Vy.
    ///
    /// In low resolution the sprite is 8 pixels wide and N rows high, and
    /// VF is set to 1 when any set pixel was drawn over. In high resolution
    /// N = 0 draws a 16x16 sprite, and VF counts colliding or clipped rows.
    #[must_use]
    fn exec_draw(&mut self, vx: u8, vy: u8, n: u8) -> u32 {
        let x = self.cpu.register(vx) as usize;
        let y = self.cpu.register(vy) as usize;
        let wide = self.display.is_hires() && n == 0;
        let len = if wide { 32 } else { n as usize };

        let mut sprite = [0_u8; 32];
        let addr = self.cpu.address as usize;
        for (i, byte) in sprite.iter_mut().take(len).enumerate() {
            *byte = self.cpu.read(addr + i);
        }
        let sprite = &sprite[..len];

        let result = if self.display.is_hires() {
            self.display.draw_hires(x, y, sprite, wide)
        } else {
            self.display.draw_lores(x, y, sprite)
        };

        self.cpu.set_flag(result.flag);
        timing::draw(result.rows, result.collisions)
    }
}

/// Troubleshooting
#[allow(dead_code)]
#[doc(hidden)]
impl Chip8Vm {
    /// Returns the contents of the memory as a human readable string.
    pub fn dump_ram(&self, count: usize) -> Result<String, fmt::Error> {
        let iter = self
            .cpu
            .ram
            .iter()
            .enumerate()
            .skip(MEM_START)
            .take(count)
            .step_by(2);
        let mut buf = String::new();

        for (i, op) in iter {
            writeln!(buf, "{:04X}: {:02X}{:02X}", i, op, self.cpu.read(i + 1))?;
        }

        Ok(buf)
    }

    pub fn dump_display(&self) -> Result<String, fmt::Error> {
        self.display.dump()
    }

    pub fn dump_keys(&self) -> Result<String, fmt::Error> {
        self.keypad.dump()
    }
}

#[cfg(feature = "op_trace")]
#[inline]
fn op_trace(pc: Address, op: &Op) {
    log::trace!("{pc:04X}: {op}");
}

#[cfg(not(feature = "op_trace"))]
#[inline]
fn op_trace(_: Address, _: &Op) {}
