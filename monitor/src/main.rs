mod script;

use std::fs::File;
use std::io::{self, Write, stdout};
use std::process::ExitCode;
use std::sync::Arc;

use common::Block;
use common::constants::MACE_BASE;
use common::misc::parse_u32;
use mace_lib::io::isa::StatusWritePolicy;
use mace_lib::io::rtc::RamRtc;
use mace_lib::{Mace, MaceConfig};
use savestate::{SaveState, SaveStateError};
use script::{Command, Counter, ScriptError, parse_script};

use clap::Parser;
use clap_stdin::FileOrStdin;
use log::error;
use thiserror::Error;

/// SGI MACE bus monitor
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Command script; "-" reads stdin
    input: FileOrStdin,

    /// Physical base address of the MACE aperture, for diagnostics
    #[arg(long, default_value_t = MACE_BASE, value_parser = parse_u32)]
    base: u32,

    /// Let writes to the interrupt status register clear the bits written as 1
    #[arg(long)]
    status_w1c: bool,
}

#[derive(Debug, Error)]
enum MonitorError {
    #[error("Unable to read script: {0}")]
    Input(String),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    SaveState(#[from] SaveStateError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

struct Monitor {
    mace: Mace,
}

impl Monitor {
    fn new(config: MaceConfig) -> Self {
        let mut mace = Mace::with_config(config, Arc::new(RamRtc::default()));
        mace.reset();
        Monitor { mace }
    }

    fn describe(addr: u32) -> String {
        match Block::decode(addr) {
            Some((block, offset)) => format!("{block}+{offset:#06x}"),
            None => format!("{addr:#08x}"),
        }
    }

    fn exec(&mut self, cmd: &Command, out: &mut impl Write) -> Result<(), MonitorError> {
        match cmd {
            Command::Reset => self.mace.reset(),
            Command::Stop => self.mace.stop(),
            Command::Run(dur) => self.mace.run_for(*dur),
            Command::Tick(counter, count) => {
                for _ in 0..*count {
                    match counter {
                        Counter::Ust => self.mace.ust_tick(),
                        Counter::Msc => self.mace.msc_tick(),
                    }
                }
            }
            Command::Read { addr, mem_mask } => {
                let val = self.mace.read(*addr, *mem_mask);
                writeln!(out, "{} -> {val:#018x}", Self::describe(*addr))?;
            }
            Command::Write { addr, data, mem_mask } => {
                self.mace.write(*addr, *data, *mem_mask);
            }
            Command::Status => {
                writeln!(
                    out,
                    "t={:?} ust={:#010x} msc={:#010x} int_status={:#x} int_mask={:#x}",
                    self.mace.now(),
                    self.mace.ust(),
                    self.mace.msc(),
                    self.mace.int_status(),
                    self.mace.int_mask(),
                )?;
            }
            Command::Save(path) => {
                self.mace.save_state().write_to(&mut File::create(path)?)?;
            }
            Command::Load(path) => {
                let save = SaveState::read_from(&mut File::open(path)?)?;
                self.mace.restore_state(&save);
            }
        }
        Ok(())
    }

    fn exec_all(&mut self, cmds: &[Command], out: &mut impl Write) -> Result<(), MonitorError> {
        for cmd in cmds {
            self.exec(cmd, out)?;
        }
        Ok(())
    }
}

fn run(args: Args) -> Result<(), MonitorError> {
    let input = args
        .input
        .contents()
        .map_err(|err| MonitorError::Input(err.to_string()))?;
    let cmds = parse_script(&input)?;

    let config = MaceConfig {
        base: args.base,
        status_write: if args.status_w1c {
            StatusWritePolicy::WriteOneToClear
        } else {
            StatusWritePolicy::Ignore
        },
    };
    let mut monitor = Monitor::new(config);
    monitor.exec_all(&cmds, &mut stdout().lock())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
