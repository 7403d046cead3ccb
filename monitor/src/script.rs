// Monitor scripts: one command per line, `#` starts a comment.
//
//   reset | stop | status
//   run <duration>
//   tick ust|msc [count]
//   read <addr> [mask]
//   write <addr> <data> [mask]
//   save <path> | load <path>
//
// An <addr> is either a byte offset from the MACE base (`0x340008`) or a block name with
// an optional byte offset into it (`ust_msc+0x08`, `isa`).

use std::time::Duration;

use common::Block;
use common::constants::FULL_MASK;
use common::misc::{ParseError, parse_duration, parse_u32, parse_u64};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command {cmd:?}")]
    UnknownCommand { line: usize, cmd: String },

    #[error("line {line}: usage: {usage}")]
    Usage { line: usize, usage: &'static str },

    #[error("line {line}: unknown block {name:?}")]
    UnknownBlock { line: usize, name: String },

    #[error("line {line}: offset {offset:#x} is outside {block}")]
    OutOfBlock { line: usize, block: Block, offset: u32 },

    #[error("line {line}: {err}")]
    Value {
        line: usize,
        #[source]
        err: ParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Ust,
    Msc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset,
    Stop,
    Status,
    Run(Duration),
    Tick(Counter, u64),
    Read { addr: u32, mem_mask: u64 },
    Write { addr: u32, data: u64, mem_mask: u64 },
    Save(String),
    Load(String),
}

pub fn parse_script(input: &str) -> Result<Vec<Command>, ScriptError> {
    input
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx + 1, line).transpose())
        .collect()
}

pub fn parse_line(line: usize, input: &str) -> Result<Option<Command>, ScriptError> {
    let input = input.split('#').next().unwrap_or_default();
    let words: Vec<&str> = input.split_whitespace().collect();
    let Some((&cmd, args)) = words.split_first() else {
        return Ok(None);
    };

    let value = |err| ScriptError::Value { line, err };
    let usage = |usage| ScriptError::Usage { line, usage };

    let cmd = match (cmd.to_ascii_lowercase().as_str(), args) {
        ("reset", []) => Command::Reset,
        ("stop", []) => Command::Stop,
        ("status", []) => Command::Status,
        ("run", [dur]) => Command::Run(parse_duration(dur).map_err(value)?),
        ("tick", [counter, rest @ ..]) if rest.len() <= 1 => {
            let counter = match counter.to_ascii_lowercase().as_str() {
                "ust" => Counter::Ust,
                "msc" => Counter::Msc,
                _ => return Err(usage("tick ust|msc [count]")),
            };
            let count = match rest.first() {
                Some(count) => parse_u64(count).map_err(value)?,
                None => 1,
            };
            Command::Tick(counter, count)
        }
        ("read", [addr, rest @ ..]) if rest.len() <= 1 => Command::Read {
            addr: parse_addr(line, addr)?,
            mem_mask: parse_mask(rest.first().copied()).map_err(value)?,
        },
        ("write", [addr, data, rest @ ..]) if rest.len() <= 1 => Command::Write {
            addr: parse_addr(line, addr)?,
            data: parse_u64(data).map_err(value)?,
            mem_mask: parse_mask(rest.first().copied()).map_err(value)?,
        },
        ("save", [path]) => Command::Save(path.to_string()),
        ("load", [path]) => Command::Load(path.to_string()),
        ("reset" | "stop" | "status", _) => return Err(usage("reset | stop | status")),
        ("run", _) => return Err(usage("run <duration>")),
        ("tick", _) => return Err(usage("tick ust|msc [count]")),
        ("read", _) => return Err(usage("read <addr> [mask]")),
        ("write", _) => return Err(usage("write <addr> <data> [mask]")),
        ("save" | "load", _) => return Err(usage("save|load <path>")),
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                cmd: cmd.to_string(),
            });
        }
    };
    Ok(Some(cmd))
}

fn parse_mask(input: Option<&str>) -> Result<u64, ParseError> {
    input.map_or(Ok(FULL_MASK), parse_u64)
}

fn parse_addr(line: usize, input: &str) -> Result<u32, ScriptError> {
    let value = |err| ScriptError::Value { line, err };

    let starts_numeric = input.starts_with(|c: char| c.is_ascii_digit());
    if starts_numeric {
        return parse_u32(input).map_err(value);
    }

    let (name, offset) = match input.split_once('+') {
        Some((name, offset)) => (name, parse_u32(offset).map_err(value)?),
        None => (input, 0),
    };
    let block = Block::from_name(name).ok_or_else(|| ScriptError::UnknownBlock {
        line,
        name: name.to_string(),
    })?;
    if offset >= block.size() {
        return Err(ScriptError::OutOfBlock { line, block, offset });
    }
    Ok(block.start() + offset)
}
