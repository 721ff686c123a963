//! Per-role subcommands. Each `run` statically maps a parsed subcommand onto
//! one typed handle method.

pub mod am;
pub mod hs;
pub mod mapreduce;
pub mod nm;
pub mod rm;

use std::str::FromStr;

use yarn_core::YarnError;

/// Parse an optional flag into a vocabulary enum. Out-of-vocabulary values
/// surface as `YarnError::Validation` before any request is built.
pub(crate) fn parse_flag<E>(value: Option<&str>) -> Result<Option<E>, YarnError>
where
    E: FromStr<Err = YarnError>,
{
    value.map(str::parse).transpose()
}
