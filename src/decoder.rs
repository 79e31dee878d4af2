//! Top-level decode driver.
//!
//! A TZif file is decoded in one or two passes:
//!
//! 1. header + data block with 32-bit instants (always);
//! 2. for v2 and later, a second header + data block with 64-bit instants,
//!    followed by the footer, which runs to the end of the input.
//!
//! There is no backtracking.  Each pass picks up the cursor where the
//! previous one left it, and the first error aborts the whole decode.

use tracing::debug;

use crate::body::{decode_body, TypeIndexBound};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::event::{Event, Sink};
use crate::footer::read_footer;
use crate::header::Header;
use crate::time::TimeWidth;

/// Knobs for [`decode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Bound applied to transition type indices.
    pub type_index_bound: TypeIndexBound,
    /// Stop after the first (32-bit) pass even when the version announces a
    /// second block.  The footer is then not captured.
    pub narrow_only: bool,
}

/// Decode `input`, streaming every field to `sink`.
///
/// Returns whatever bytes were not consumed: trailing data after a v1
/// block (or after the first block with `narrow_only`), and an empty slice
/// for a complete v2+ file since the footer swallows the rest.
pub fn decode<'a, S: Sink<'a> + ?Sized>(
    input: &'a [u8],
    opts:  &DecodeOptions,
    sink:  &mut S,
) -> Result<&'a [u8]> {
    let mut cur = Cursor::new(input);

    let header = decode_pass(&mut cur, TimeWidth::Narrow, opts, sink)?;
    if !header.version.has_wide_block() || opts.narrow_only {
        debug!(left = cur.remaining(), "decode finished after 32-bit block");
        return Ok(cur.rest());
    }

    decode_pass(&mut cur, TimeWidth::Wide, opts, sink)?;
    let footer = read_footer(&mut cur);
    debug!(footer_len = footer.len(), "decode finished with footer");
    sink.emit(Event::Footer(footer));
    Ok(cur.rest())
}

fn decode_pass<'a, S: Sink<'a> + ?Sized>(
    cur:   &mut Cursor<'a>,
    width: TimeWidth,
    opts:  &DecodeOptions,
    sink:  &mut S,
) -> Result<Header> {
    let header = Header::read(cur)?;
    debug!(
        version  = header.version.number(),
        ?width,
        timecnt  = header.timecnt,
        typecnt  = header.typecnt,
        charcnt  = header.charcnt,
        leapcnt  = header.leapcnt,
        "header decoded"
    );
    sink.emit(Event::Header { header, width });
    decode_body(cur, &header, width, opts.type_index_bound, sink)?;
    Ok(header)
}
