use std::time::Duration;

use schip::{constants::TIMER_PERIOD, prelude::*};

fn frames(n: u64) -> Duration {
    Duration::from_nanos(TIMER_PERIOD * n)
}

fn new_vm(conf: Chip8Conf, program: &[u8]) -> Chip8Vm {
    let mut vm = Chip8Vm::new(Chip8Conf {
        seed: Some(0xC0FFEE),
        ..conf
    });
    assert_eq!(vm.load_program(program), program.len());
    vm
}

#[test]
#[rustfmt::skip]
fn test_add_registers() {
    let mut vm = new_vm(Chip8Conf::default(), &[
        0x60, 0x05, // LD v0, 5
        0x61, 0x03, // LD v1, 3
        0x80, 0x14, // ADD v0, v1
    ]);

    vm.run_steps(3).unwrap();

    assert_eq!(vm.cpu().register(0), 8);
    assert_eq!(vm.cpu().register(0xF), 0);
    assert_eq!(vm.cpu().pc(), 0x206);
}

#[test]
fn test_add_registers_through_clock() {
    let mut vm = new_vm(
        Chip8Conf {
            cycle_rate: Hz(180),
            ..Default::default()
        },
        &[0x60, 0x05, 0x61, 0x03, 0x80, 0x14],
    );

    // 180 Hz is three instructions per frame.
    assert_eq!(vm.update(frames(1)), Ok(3));
    assert_eq!(vm.cpu().register(0), 8);
    assert_eq!(vm.cpu().pc(), 0x206);
}

#[test]
fn test_return_on_empty_stack() {
    let mut vm = new_vm(Chip8Conf::default(), &[0x00, 0xEE]);

    let err = vm.step().unwrap_err();
    assert_eq!(err, Chip8Error::StackUnderflow { pc: 0x200 });
    assert_eq!(err.to_string(), "call stack underflow at 0200");
    assert_eq!(vm.cpu().pc(), 0x200);
    assert_eq!(vm.cpu().sp(), 0);

    // Nothing runs after a fault.
    assert_eq!(vm.update(frames(10)), Err(err.clone()));
    assert_eq!(vm.fault(), Some(&err));
    assert_eq!(vm.cpu().pc(), 0x200);
}

#[test]
#[rustfmt::skip]
fn test_nested_calls_overflow() {
    let mut program = Vec::new();
    // Each subroutine calls the next one.
    for i in 0..17_u16 {
        let next = 0x200 + (i + 1) * 2;
        program.extend_from_slice(&(0x2000 | next).to_be_bytes());
    }

    let mut vm = new_vm(Chip8Conf::default(), &program);
    vm.run_steps(16).unwrap();
    assert_eq!(vm.cpu().sp(), 16);
    assert_eq!(vm.cpu().stack().last(), Some(&0x220));

    assert_eq!(vm.step(), Err(Chip8Error::StackOverflow { pc: 0x220 }));
    assert_eq!(vm.cpu().sp(), 16);
}

#[test]
#[rustfmt::skip]
fn test_await_key() {
    let mut vm = new_vm(Chip8Conf::default(), &[
        0xF2, 0x0A, // LD v2, K
        0x12, 0x02, // JP 0x202
    ]);

    assert_eq!(vm.step(), Ok(Flow::KeyWait));
    assert!(vm.is_awaiting_key());
    let pc = vm.cpu().pc();

    assert_eq!(vm.step(), Ok(Flow::KeyWait));
    assert_eq!(vm.update(frames(2)).map(|_| vm.cpu().pc()), Ok(pc));
    assert!(vm.is_awaiting_key());
    assert_eq!(vm.cpu().register(2), 0);

    vm.press_key(KeyCode::Key7);
    assert_eq!(vm.run_state(), RunState::Running);

    assert_eq!(vm.step(), Ok(Flow::Jump));
    assert_eq!(vm.cpu().register(2), 7);
    assert_eq!(vm.cpu().pc(), 0x202);
}

#[test]
#[rustfmt::skip]
fn test_shift_right_quirk() {
    let program = [
        0x60, 0x05, // LD v0, 0x05
        0x61, 0xF0, // LD v1, 0xF0
        0x80, 0x16, // SHR v0, v1
    ];

    let mut vm = new_vm(Chip8Conf::default(), &program);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.cpu().register(0), 0x02);
    assert_eq!(vm.cpu().register(0xF), 1);

    let mut vm = new_vm(Chip8Conf { legacy_shift: true, ..Default::default() }, &program);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.cpu().register(0), 0x78);
    assert_eq!(vm.cpu().register(0xF), 0);
}

#[test]
#[rustfmt::skip]
fn test_draw_twice_restores() {
    let mut vm = new_vm(Chip8Conf::default(), &[
        0x60, 0x3C, // LD v0, 60    ; wraps at the right edge
        0x61, 0x1E, // LD v1, 30    ; wraps at the bottom edge
        0xA2, 0x0C, // LD I, .sprite
        0xD0, 0x13, // DRW v0, v1, 3
        0xD0, 0x13, // DRW v0, v1, 3
        0x12, 0x0A, // JP 0x20A
        // .sprite
        0b1010_1111,
        0b0101_0000,
        0b1111_1111,
    ]);

    vm.run_steps(3).unwrap();
    let before = vm.display().snapshot();

    assert_eq!(vm.step(), Ok(Flow::Draw));
    assert_eq!(vm.cpu().register(0xF), 0);
    assert_ne!(vm.display().snapshot(), before);
    assert!(vm.display().pixel(60, 30));
    assert!(vm.display().pixel(0, 30));
    assert!(vm.display().pixel(3, 0));

    // Every pixel of the second draw lands on its own earlier copy.
    assert_eq!(vm.step(), Ok(Flow::Draw));
    assert_eq!(vm.cpu().register(0xF), 1);
    assert_eq!(vm.display().snapshot(), before);
}

#[test]
#[rustfmt::skip]
fn test_delay_timer_reaches_zero() {
    let mut vm = new_vm(Chip8Conf::default(), &[
        0x60, 0x1E, // LD v0, 30
        0xF0, 0x15, // LD DT, v0
        0xF0, 0x18, // LD ST, v0
        0x12, 0x06, // JP 0x206
    ]);
    vm.run_steps(3).unwrap();
    assert_eq!(vm.delay_timer(), 30);

    vm.update(frames(29)).unwrap();
    assert_eq!(vm.delay_timer(), 1);
    assert!(vm.buzzer());

    vm.update(frames(1)).unwrap();
    assert_eq!(vm.delay_timer(), 0);
    assert_eq!(vm.sound_timer(), 0);
    assert!(!vm.buzzer());

    vm.update(frames(120)).unwrap();
    assert_eq!(vm.delay_timer(), 0);
}

#[test]
fn test_timers_at_fine_granularity() {
    let mut vm = new_vm(Chip8Conf::default(), &[0x60, 0x3C, 0xF0, 0x15, 0x12, 0x04]);
    vm.run_steps(2).unwrap();

    // One second in 1 ms slices.
    for _ in 0..1000 {
        vm.update(Duration::from_millis(1)).unwrap();
    }
    assert_eq!(vm.delay_timer(), 0);
}

#[test]
#[rustfmt::skip]
fn test_seeded_runs_are_identical() {
    let program = [
        0xC0, 0x3F, // RND v0, 0x3F
        0xC1, 0x1F, // RND v1, 0x1F
        0xC2, 0x0F, // RND v2, 0xF
        0xF2, 0x29, // LD F, v2
        0xD0, 0x15, // DRW v0, v1, 5
        0x12, 0x00, // JP 0x200
    ];

    let run = || {
        let mut vm = new_vm(Chip8Conf::default(), &program);
        vm.run_steps(600).unwrap();
        (vm.display().snapshot(), *vm.cpu().registers())
    };

    assert_eq!(run(), run());
}

#[test]
fn test_cycle_cap() {
    // JP 0x200
    let mut vm = new_vm(
        Chip8Conf {
            cycle_rate: Hz(1000),
            ..Default::default()
        },
        &[0x12, 0x00],
    );

    // An hour long stall only catches up on a bounded number of cycles.
    assert_eq!(vm.update(Duration::from_secs(3600)), Ok(20_000));
}

#[test]
fn test_cosmac_rate() {
    let mut vm = new_vm(
        Chip8Conf {
            timing: TimingMode::Cosmac,
            ..Default::default()
        },
        &[0x12, 0x00],
    );

    // 1/60 s at 220113 Hz, in whole cycles.
    assert_eq!(vm.update(frames(1)), Ok(3668));
}

#[test]
#[rustfmt::skip]
fn test_hires_program() {
    let mut vm = new_vm(Chip8Conf::default(), &[
        0x00, 0xFF, // HIGH
        0x60, 0x78, // LD v0, 120
        0x61, 0x00, // LD v1, 0
        0xA2, 0x10, // LD I, .sprite
        0xD0, 0x10, // DRW v0, v1, 0
        0x00, 0xC4, // SCD 4
        0x00, 0xFD, // EXIT
        0x12, 0x0E, // JP 0x20E
        // .sprite
        0xFF, 0xFF,
    ]);

    while !vm.exit_requested() {
        vm.update(frames(1)).unwrap();
    }

    let display = vm.display();
    assert_eq!((display.width(), display.height()), (128, 64));
    assert!(display.pixel(120, 4));
    assert!(display.pixel(127, 4));
    assert!(display.pixel(0, 4));
    assert!(display.pixel(7, 4));
    assert!(!display.pixel(8, 4));
    assert!(!display.pixel(120, 0));
    assert!(!display.pixel(120, 5));
}

#[test]
fn test_oversized_program_is_truncated() {
    let mut vm = Chip8Vm::new(Chip8Conf::default());
    assert_eq!(vm.load_program(&vec![0x12; 0x1000]), 0xE00);
}
