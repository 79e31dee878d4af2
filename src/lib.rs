pub mod error;
pub mod cursor;
pub mod time;
pub mod header;
pub mod body;
pub mod footer;
pub mod event;
pub mod decoder;
pub mod model;
pub mod render;

pub use error::{IndicatorKind, Result, TzifError};
pub use cursor::Cursor;
pub use time::{TimeWidth, decode_narrow_time, decode_wide_time};
pub use header::{Header, Version, decode_header};
pub use body::{LeapSecond, LocalTimeType, StdWall, TypeIndexBound, UtLocal, decode_body};
pub use footer::Footer;
pub use event::{Event, Section, Sink};
pub use decoder::{DecodeOptions, decode};
pub use model::{Collector, DataBlock, Designation, TzifFile};
pub use render::Renderer;

/// Decode `input` into a [`TzifFile`] with default options.
pub fn parse(input: &[u8]) -> Result<TzifFile> {
    parse_with(input, &DecodeOptions::default())
}

/// Decode `input` into a [`TzifFile`].
pub fn parse_with(input: &[u8], opts: &DecodeOptions) -> Result<TzifFile> {
    let mut collector = Collector::new();
    decode(input, opts, &mut collector)?;
    // No header collected means there was no magic to read.
    collector.finish().ok_or(TzifError::TruncatedInput {
        field:     "magic",
        needed:    header::MAGIC.len(),
        available: input.len(),
    })
}
