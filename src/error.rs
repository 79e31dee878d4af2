use std::fmt;
use thiserror::Error;

/// Which of the two indicator sections a bad flag byte came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    StandardWall,
    UtLocal,
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::StandardWall => f.write_str("std/wall"),
            IndicatorKind::UtLocal      => f.write_str("UT/local"),
        }
    }
}

/// Every way a TZif decode can fail.  All variants are fatal: the decoder
/// stops at the first one and nothing after the failure point is read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TzifError {
    #[error("Truncated input: missing {field} (need {needed} bytes, {available} left)")]
    TruncatedInput {
        field:     &'static str,
        needed:    usize,
        available: usize,
    },
    #[error("Invalid magic number {found:02x?}, expected \"TZif\"")]
    InvalidMagic { found: [u8; 4] },
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("Transition type {value} at transition {index} out of range (typecnt {typecnt})")]
    TransitionTypeOutOfRange { index: u32, value: u8, typecnt: u32 },
    #[error("Designation index {value} of local time type {record} out of range (charcnt {charcnt})")]
    DesignationIndexOutOfRange { record: u32, value: u8, charcnt: u32 },
    #[error("Extra data at end of time zone designations ({trailing} unterminated bytes)")]
    TrailingDesignationData { trailing: usize },
    #[error("Unsupported {kind} indicator {value} at position {index}")]
    InvalidIndicator { kind: IndicatorKind, index: u32, value: u8 },
}

impl TzifError {
    /// Name of the field being read when the error was raised.
    pub fn field(&self) -> &'static str {
        match self {
            TzifError::TruncatedInput { field, .. }         => *field,
            TzifError::InvalidMagic { .. }                  => "magic",
            TzifError::UnsupportedVersion(_)                => "version",
            TzifError::TransitionTypeOutOfRange { .. }      => "transition type",
            TzifError::DesignationIndexOutOfRange { .. }    => "local time type record",
            TzifError::TrailingDesignationData { .. }       => "time zone designations",
            TzifError::InvalidIndicator { kind: IndicatorKind::StandardWall, .. } => "std/wall indicator",
            TzifError::InvalidIndicator { kind: IndicatorKind::UtLocal, .. }      => "UT/local indicator",
        }
    }
}

pub type Result<T> = std::result::Result<T, TzifError>;
