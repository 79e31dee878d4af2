//! Time instant decoders for the two data-block widths.
//!
//! The first (v1) data block stores instants as 32-bit signed seconds; the
//! second block of a v2+ file stores them as 64-bit signed seconds.  Both are
//! big-endian and both widen to `i64`.

use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::Result;

/// Width of the time values in a data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWidth {
    /// 4-byte instants (v1 data block).
    Narrow,
    /// 8-byte instants (v2+ data block).
    Wide,
}

impl TimeWidth {
    /// Bytes per encoded instant.
    #[inline]
    pub fn size(self) -> usize {
        match self {
            TimeWidth::Narrow => 4,
            TimeWidth::Wide   => 8,
        }
    }

    /// Decode one instant of this width.
    pub fn decode(self, cur: &mut Cursor<'_>, field: &'static str) -> Result<i64> {
        match self {
            TimeWidth::Narrow => decode_narrow_time(cur, field),
            TimeWidth::Wide   => decode_wide_time(cur, field),
        }
    }
}

/// 4 bytes big-endian, sign-extended from 32 bits.
pub fn decode_narrow_time(cur: &mut Cursor<'_>, field: &'static str) -> Result<i64> {
    cur.read_i32(field).map(i64::from)
}

/// 8 bytes big-endian two's complement.
pub fn decode_wide_time(cur: &mut Cursor<'_>, field: &'static str) -> Result<i64> {
    cur.read_i64(field)
}
