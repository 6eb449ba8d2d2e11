//! Entrypoint for CLI
use std::{env, error::Error, fs, time::Duration};

#[macro_use]
extern crate slog;
use log::{error, info};
use schip::prelude::*;
use schip_cli::{App, AppConfig, InputScript, RunOptions};
use slog::Drain;

static USAGE: &str = r#"
usage: schip CMD [ARGS]

commands:
    run ROM     Run the target ROM file headless, and print the final screen
        --config FILE   Settings file, created when missing (default: schip.yaml)
        --script FILE   Scripted key events
        --seconds N     Stop after N seconds of emulated time (default: 10)
        --timing MODE   Override the timing mode, fixed or cosmac
        --realtime      Pace the frames against the wall clock
    dis ROM     Disassemble the target ROM into a listing
    config [FILE]
                Print the settings, creating the file when missing

examples:
    schip run breakout.rom --script keys.yaml
    schip run breakout.rom --timing cosmac
    schip dis breakout.rom
    schip config schip.yaml
"#;

const DEFAULT_CONFIG: &str = "schip.yaml";
const DEFAULT_SECONDS: u64 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    let status = {
        let decorator = slog_term::PlainDecorator::new(std::io::stdout());
        let drain = slog_term::CompactFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        let logger = slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")));

        let _scope_guard = slog_scope::set_global_logger(logger);
        slog_stdlog::init_with_level(log::Level::Debug)?;

        match parse_args() {
            Some(cmd) => match run_cmd(cmd) {
                Ok(_) => 0,
                Err(err) => {
                    error!("{err}");
                    1
                }
            },
            None => {
                print_usage();
                // FreeBSD EX_USAGE (64)
                64
            }
        }
    };

    // Guards are dropped, so the async drain has flushed.
    if status != 0 {
        std::process::exit(status);
    }

    Ok(())
}

fn run_cmd(cmd: Cmd) -> Result<(), Box<dyn Error>> {
    match cmd {
        Cmd::Run {
            filepath,
            config,
            script,
            timing,
            seconds,
            realtime,
        } => run_rom(
            &filepath,
            &config,
            script.as_deref(),
            timing.as_deref(),
            seconds,
            realtime,
        ),
        Cmd::Dis { filepath } => {
            let bytecode = fs::read(&filepath)?;
            let mut listing = String::new();
            Disassembler::new(&bytecode).disassemble(&mut listing)?;
            print!("{listing}");
            Ok(())
        }
        Cmd::Config { filepath } => {
            let config = AppConfig::load(&filepath);
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

fn run_rom(
    filepath: &str,
    config: &str,
    script: Option<&str>,
    timing: Option<&str>,
    seconds: u64,
    realtime: bool,
) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::load(config);
    if let Some(timing) = timing {
        config.set_timing(timing)?;
    }
    info!(
        "cycles={} timing={} legacy_shift={} legacy_memops={}",
        config.cycles, config.timing, config.legacy_shift, config.legacy_memops
    );

    let mut app = App::new(config);
    app.load_rom(filepath)?;

    if let Some(script) = script {
        app.set_script(InputScript::from_file(script)?);
    }

    let options = RunOptions {
        limit: Some(Duration::from_secs(seconds)),
        realtime,
    };
    let result = app.run(options);

    // The screen is printed even when the program faulted.
    println!("{}", app.vm().dump_display()?);

    let stop = result?;
    info!("stopped: {stop:?}");

    Ok(())
}

fn parse_args() -> Option<Cmd> {
    let mut args = env::args().skip(1);

    match args.next()?.as_str() {
        "run" => {
            let filepath = args.next()?;
            let mut config = DEFAULT_CONFIG.to_string();
            let mut script = None;
            let mut timing = None;
            let mut seconds = DEFAULT_SECONDS;
            let mut realtime = false;

            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--config" => config = args.next()?,
                    "--script" => script = Some(args.next()?),
                    "--timing" => timing = Some(args.next()?),
                    "--seconds" => seconds = args.next()?.parse().ok()?,
                    "--realtime" => realtime = true,
                    _ => return None,
                }
            }

            Some(Cmd::Run {
                filepath,
                config,
                script,
                timing,
                seconds,
                realtime,
            })
        }
        "dis" => Some(Cmd::Dis {
            filepath: args.next()?,
        }),
        "config" => Some(Cmd::Config {
            filepath: args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string()),
        }),
        _ => None,
    }
}

fn print_usage() {
    println!("SCHIP v{}", env!("CARGO_PKG_VERSION"));
    println!("{USAGE}");
}

enum Cmd {
    /// Run file
    Run {
        filepath: String,
        config: String,
        script: Option<String>,
        timing: Option<String>,
        seconds: u64,
        realtime: bool,
    },
    /// Disassemble
    Dis { filepath: String },
    /// Print settings
    Config { filepath: String },
}
