use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use common::Block;
use common::constants::{FULL_MASK, MACE_BASE};
use common::misc::{parse_duration, parse_u32, parse_u64};
use mace_lib::io::isa::StatusWritePolicy;
use mace_lib::io::rtc::RamRtc;
use mace_lib::io::ust_msc::UstMscBlock;
use mace_lib::{Mace, MaceConfig};
use savestate::{SaveState, SaveStateError};

use clap::Parser;
use log::error;

/// SGI MACE timebase runner
#[derive(Parser)]
#[command(about)]
struct Args {
    /// How long to run after reset, e.g. 960ns, 20us, 5ms, 1s
    #[arg(long, default_value = "1ms", value_parser = parse_duration)]
    run: Duration,

    /// Compare1 value, e.g. 0x0000000100000000 (UST=1, MSC=0)
    #[arg(long, value_parser = parse_u64)]
    compare1: Option<u64>,

    /// Compare2 value
    #[arg(long, value_parser = parse_u64)]
    compare2: Option<u64>,

    /// Compare3 value
    #[arg(long, value_parser = parse_u64)]
    compare3: Option<u64>,

    /// Physical base address of the MACE aperture, for diagnostics
    #[arg(long, default_value_t = MACE_BASE, value_parser = parse_u32)]
    base: u32,

    /// Let writes to the interrupt status register clear the bits written as 1
    #[arg(long)]
    status_w1c: bool,

    /// Save state to restore before running
    #[arg(long)]
    restore: Option<String>,

    /// File to save state to after running
    #[arg(long)]
    save: Option<String>,
}

fn run(args: Args) -> Result<(), SaveStateError> {
    let config = MaceConfig {
        base: args.base,
        status_write: if args.status_w1c {
            StatusWritePolicy::WriteOneToClear
        } else {
            StatusWritePolicy::Ignore
        },
    };
    let mut mace = Mace::with_config(config, Arc::new(RamRtc::default()));
    mace.reset();

    if let Some(path) = &args.restore {
        let save = SaveState::read_from(&mut File::open(path)?)?;
        mace.restore_state(&save);
    }

    let compares = [
        (UstMscBlock::COMPARE1, args.compare1),
        (UstMscBlock::COMPARE2, args.compare2),
        (UstMscBlock::COMPARE3, args.compare3),
    ];
    for (offset, val) in compares {
        if let Some(val) = val {
            mace.write_block(Block::UstMsc, offset, val, FULL_MASK);
        }
    }

    mace.run_for(args.run);

    println!("time:       {:?}", mace.now());
    println!("ust:        {:#010x}", mace.ust());
    println!("msc:        {:#010x}", mace.msc());
    println!("ust_msc:    {:#018x}", mace.ust_msc());
    println!("int_status: {:#018x}", mace.int_status());

    if let Some(path) = &args.save {
        mace.save_state().write_to(&mut File::create(path)?)?;
    }
    Ok(())
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
