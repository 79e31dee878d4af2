//! v2+ footer: the bytes after the second data block.
//!
//! The footer is kept verbatim.  Well-formed files carry a POSIX TZ string
//! between two newlines, but nothing here depends on that.

use serde::Serialize;

use crate::cursor::Cursor;
use crate::render::escaped_bytes;

/// Capture everything left in `cur` as the footer.
pub fn read_footer<'a>(cur: &mut Cursor<'a>) -> &'a [u8] {
    cur.take_rest()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    #[serde(serialize_with = "escaped_bytes")]
    pub raw: Vec<u8>,
}

impl Footer {
    pub fn new(raw: &[u8]) -> Self {
        Self { raw: raw.to_vec() }
    }

    /// The TZ string when the footer has the `\n<TZ>\n` shape.
    pub fn tz_string(&self) -> Option<&str> {
        let inner = self.raw.strip_prefix(b"\n")?.strip_suffix(b"\n")?;
        if inner.contains(&b'\n') {
            return None;
        }
        std::str::from_utf8(inner).ok()
    }
}
