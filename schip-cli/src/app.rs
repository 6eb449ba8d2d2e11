use std::{
    thread,
    time::{Duration, Instant},
};

use log::info;
use schip::{constants::TIMER_PERIOD, prelude::*};

use crate::{config::AppConfig, error::AppError, script::InputScript};

/// Headless frame driver.
///
/// Runs the VM at 60 frames per second of emulated time, feeding it
/// scripted keyboard input.
pub struct App {
    vm: Chip8Vm,
    config: AppConfig,
    script: InputScript,
    /// Emulated time since the start of the run.
    elapsed: Duration,
    /// Whether the buzzer was sounding last frame.
    tone: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop after this much emulated time.
    pub limit: Option<Duration>,
    /// Pace frames against the wall clock, instead of running as fast as possible.
    pub realtime: bool,
}

/// Reason the run loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// The program executed `EXIT`.
    Exit,
    TimeLimit,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::with_conf(config.to_conf(), config)
    }

    /// Create the app with explicit VM settings, ignoring the ones derived from the config.
    pub fn with_conf(conf: Chip8Conf, config: AppConfig) -> Self {
        Self {
            vm: Chip8Vm::new(conf),
            config,
            script: InputScript::default(),
            elapsed: Duration::ZERO,
            tone: false,
        }
    }

    pub fn set_script(&mut self, script: InputScript) {
        self.script = script;
    }

    /// Load ROM file into VM
    pub fn load_rom(&mut self, filepath: &str) -> Result<(), AppError> {
        info!("load rom: {filepath}");

        let bytecode = std::fs::read(filepath)?;
        self.vm.load_program(&bytecode);

        Ok(())
    }

    pub fn load_program(&mut self, bytecode: &[u8]) {
        self.vm.load_program(bytecode);
    }

    pub fn vm(&self) -> &Chip8Vm {
        &self.vm
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Frame loop.
impl App {
    /// Length of one frame.
    pub const FRAME: Duration = Duration::from_nanos(TIMER_PERIOD);

    /// Run a single frame.
    pub fn frame(&mut self) -> Result<(), AppError> {
        // Merge input stream into VM
        let mut changed = false;
        for event in self.script.drain_until(self.elapsed) {
            self.vm.set_key(event.key, event.pressed);
            changed = true;
        }

        if changed && log::log_enabled!(log::Level::Debug) {
            let keys = self.vm.dump_keys().map_err(Chip8Error::from)?;
            log::debug!("{:>6}ms {keys}", self.elapsed.as_millis());
        }

        self.vm.update(Self::FRAME)?;
        self.elapsed += Self::FRAME;

        if self.config.sound {
            let tone = self.vm.buzzer();
            if tone != self.tone {
                info!("tone {}", if tone { "on" } else { "off" });
                self.tone = tone;
            }
        }

        Ok(())
    }

    /// Run frames until the program exits or the time limit is reached.
    ///
    /// A fatal fault in the VM stops the loop with an error.
    pub fn run(&mut self, options: RunOptions) -> Result<Stop, AppError> {
        let start = Instant::now();
        let started_at = self.elapsed;

        loop {
            if let Some(limit) = options.limit {
                if self.elapsed >= limit {
                    info!("time limit reached after {} frames", self.frame_count());
                    return Ok(Stop::TimeLimit);
                }
            }

            self.frame()?;

            if self.vm.exit_requested() {
                info!("exit after {} frames", self.frame_count());
                return Ok(Stop::Exit);
            }

            if options.realtime {
                let deadline = start + (self.elapsed - started_at);
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                }
            }
        }
    }

    fn frame_count(&self) -> u128 {
        self.elapsed.as_nanos() / Self::FRAME.as_nanos()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    fn app(program: &[u8]) -> App {
        let config = AppConfig::default();
        let mut app = App::with_conf(
            Chip8Conf {
                seed: Some(7),
                ..config.to_conf()
            },
            config,
        );
        app.load_program(program);
        app
    }

    #[test]
    #[rustfmt::skip]
    fn test_run_until_exit() {
        let mut app = app(&[
            0x60, 0x05, // LD v0, 5
            0x00, 0xFD, // EXIT
            0x12, 0x04, // JP 0x204
        ]);

        assert_eq!(app.run(RunOptions::default()).unwrap(), Stop::Exit);
        assert_eq!(app.elapsed(), App::FRAME);
        assert_eq!(app.vm().cpu().register(0), 5);
    }

    #[test]
    fn test_time_limit() {
        // JP 0x200
        let mut app = app(&[0x12, 0x00]);

        let options = RunOptions {
            limit: Some(App::FRAME * 60),
            realtime: false,
        };
        assert_eq!(app.run(options).unwrap(), Stop::TimeLimit);
        assert_eq!(app.frame_count(), 60);
    }

    #[test]
    #[rustfmt::skip]
    fn test_scripted_key() {
        let mut app = app(&[
            0xF2, 0x0A, // LD v2, K
            0x00, 0xFD, // EXIT
        ]);
        app.set_script(InputScript::from_yaml("- { at: 250, key: 7 }").unwrap());

        let options = RunOptions {
            limit: Some(Duration::from_secs(2)),
            realtime: false,
        };
        assert_eq!(app.run(options).unwrap(), Stop::Exit);
        assert_eq!(app.vm().cpu().register(2), 7);
        assert!(app.elapsed() > Duration::from_millis(250));
        assert!(app.elapsed() < Duration::from_millis(300));
    }

    #[test]
    fn test_fault_stops_run() {
        let mut app = app(&[0x00, 0xEE]);

        let err = app.run(RunOptions::default()).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Chip8(Chip8Error::StackUnderflow { pc: 0x200 })
        ));
    }

    #[test]
    #[rustfmt::skip]
    fn test_tone() {
        let mut app = app(&[
            0x60, 0x06, // LD v0, 6
            0xF0, 0x18, // LD ST, v0
            0x12, 0x04, // JP 0x204
        ]);

        app.frame().unwrap();
        assert!(app.tone);
        for _ in 0..6 {
            app.frame().unwrap();
        }
        assert!(!app.tone);
    }
}
