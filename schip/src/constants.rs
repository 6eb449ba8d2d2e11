//! Constant values of the Chip-8 and SUPER-CHIP architecture.

/// Number of general purpose registers.
pub const REGISTER_COUNT: usize = 0x10; // 16

/// Register VF doubles as the carry, borrow and collision flag.
pub const FLAG_REGISTER: usize = 0xF;

/// The lower memory space was historically used for the interpreter itself,
/// but is now used for fonts.
pub const MEM_START: usize = 0x200; // 512
pub const MEM_SIZE: usize = 0x1000; // 4096

/// Mask keeping computed addresses inside of main memory.
pub const ADDRESS_MASK: usize = MEM_SIZE - 1;

/// Levels of nesting allowed in the call stack.
///
/// Exceeding it is a fatal fault, not a wrap around.
pub const STACK_SIZE: usize = 0x10; // 16

/// Address where the built-in hexadecimal font is loaded.
pub const FONTSET_START: usize = 0x50;
/// Each glyph is 5 rows of 8 pixels.
pub const FONTSET_HEIGHT: usize = 5;
pub const FONTSET_DATA_LENGTH: usize = FONTSET_HEIGHT * 16;

#[rustfmt::skip]
pub const FONTSET: [u8; FONTSET_DATA_LENGTH] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Logical resolution of the original Chip-8 display.
pub const LORES_WIDTH: usize = 64;
pub const LORES_HEIGHT: usize = 32;

/// Logical resolution of the extended display mode.
///
/// This is also the physical size of the display buffer. In low resolution
/// each logical pixel covers a 2x2 block.
pub const HIRES_WIDTH: usize = 128;
pub const HIRES_HEIGHT: usize = 64;
pub const DISPLAY_BUFFER_SIZE: usize = HIRES_WIDTH * HIRES_HEIGHT;

/// Number of columns shifted by the horizontal scroll instructions.
pub const SCROLL_COLUMNS: usize = 4;

/// Number of times per second that the delay and sound timers count down.
pub const TIMER_FREQUENCY: u64 = 60;

/// Number of nanoseconds in a second
#[doc(hidden)]
pub const NANOS_IN_SECOND: u64 = 1_000_000_000;

/// Time in nanoseconds a single timer tick takes, precalculated.
pub const TIMER_PERIOD: u64 = NANOS_IN_SECOND / TIMER_FREQUENCY;

/// Instruction rate used when none is configured.
pub const DEFAULT_CYCLE_RATE: u64 = 500;

/// Upper bound for a configured instruction rate.
pub const MAX_CYCLE_RATE: u64 = 1_000_000;

/// Cap on the number of cycles a single clock update may catch up on.
///
/// When the host stalls, for example on a breakpoint or while a window is
/// being dragged, the backlog is dropped instead of being replayed.
pub const MAX_CYCLES_PER_UPDATE: u64 = 20_000;

/// Machine cycles per second of the COSMAC VIP: a 1.76 MHz crystal
/// with 8 clock pulses per machine cycle.
pub const COSMAC_CYCLE_RATE: u64 = 220_113;

/// Number of keys on the keyboard (0x0-0xF)
pub const KEY_COUNT: u8 = 16;

/// Type for storing the 12-bit memory addresses.
pub type Address = u16;
