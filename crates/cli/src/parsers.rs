use mfl_core::MaxLength;
use std::{fmt::Display, str::FromStr};

fn parse_bounded_number<T>(s: &str, min: T) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .trim()
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    Ok(value)
}

/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1)
}

/// Parse `--max-function-length`.
///
/// # Errors
/// Same as [`parse_positive_usize`].
pub fn parse_max_length(s: &str) -> Result<MaxLength, String> {
    let value = parse_positive_usize(s)?;
    MaxLength::new(value).map_err(|e| e.to_string())
}
