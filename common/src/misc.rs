use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid number: {0:?}")]
    Number(String),

    #[error("Invalid duration: {0:?} (expected e.g. 960ns, 20us, 5ms, 1s)")]
    Duration(String),
}

pub fn bit(val: u64, n: u32) -> bool {
    (val >> n) & 0x1 != 0
}

/// Parses a u64 written in hex (`0x`), octal (`0o`), binary (`0b`) or decimal. Underscores
/// are allowed as separators.
pub fn parse_u64(input: &str) -> Result<u64, ParseError> {
    let cleaned = input.trim().replace('_', "");
    let (digits, radix) = if let Some(rest) = cleaned.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = cleaned.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = cleaned.strip_prefix("0b") {
        (rest, 2)
    } else {
        (cleaned.as_str(), 10)
    };
    u64::from_str_radix(digits, radix).map_err(|_| ParseError::Number(input.to_owned()))
}

pub fn parse_u32(input: &str) -> Result<u32, ParseError> {
    let val = parse_u64(input)?;
    u32::try_from(val).map_err(|_| ParseError::Number(input.to_owned()))
}

/// Parses a duration such as `960ns`, `20us`, `5ms` or `1s`. A bare number is nanoseconds.
pub fn parse_duration(input: &str) -> Result<Duration, ParseError> {
    let input = input.trim();
    let split = input
        .find(|c: char| c.is_ascii_alphabetic() && c != '_')
        .unwrap_or(input.len());
    let (num, unit) = input.split_at(split);
    let num: u64 = num
        .replace('_', "")
        .parse()
        .map_err(|_| ParseError::Duration(input.to_owned()))?;
    match unit {
        "" | "ns" => Ok(Duration::from_nanos(num)),
        "us" => Ok(Duration::from_micros(num)),
        "ms" => Ok(Duration::from_millis(num)),
        "s" => Ok(Duration::from_secs(num)),
        _ => Err(ParseError::Duration(input.to_owned())),
    }
}
