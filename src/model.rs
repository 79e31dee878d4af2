//! Materialized view of a decoded file, built from the event stream.

use serde::Serialize;

use crate::body::{LeapSecond, LocalTimeType, StdWall, UtLocal};
use crate::event::{Event, Sink};
use crate::footer::Footer;
use crate::header::Header;
use crate::render::escaped_bytes;
use crate::time::TimeWidth;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Designation {
    /// Start of the entry in the designation blob.
    pub offset: u32,
    /// Raw bytes between `offset` and the next NUL.
    #[serde(serialize_with = "escaped_bytes")]
    pub name:   Vec<u8>,
}

/// One header plus its data block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataBlock {
    pub header:           Header,
    pub width:            TimeWidth,
    pub transition_times: Vec<i64>,
    pub transition_types: Vec<u8>,
    pub local_time_types: Vec<LocalTimeType>,
    pub designations:     Vec<Designation>,
    pub leap_seconds:     Vec<LeapSecond>,
    pub std_wall:         Vec<StdWall>,
    pub ut_local:         Vec<UtLocal>,
}

impl DataBlock {
    fn new(header: Header, width: TimeWidth) -> Self {
        Self {
            header,
            width,
            transition_times: Vec::with_capacity(header.timecnt.min(1 << 16) as usize),
            transition_types: Vec::with_capacity(header.timecnt.min(1 << 16) as usize),
            local_time_types: Vec::new(),
            designations:     Vec::new(),
            leap_seconds:     Vec::new(),
            std_wall:         Vec::new(),
            ut_local:         Vec::new(),
        }
    }

    /// Designation bytes for a local time type, looked up by blob offset.
    pub fn designation_of(&self, ltt: &LocalTimeType) -> Option<&[u8]> {
        let idx = u32::from(ltt.idx);
        self.designations
            .iter()
            .find(|d| d.offset <= idx && idx <= d.offset + d.name.len() as u32)
            .and_then(|d| d.name.get((idx - d.offset) as usize..))
    }
}

/// A fully decoded TZif file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TzifFile {
    /// The 32-bit block every file starts with.
    pub v1:     DataBlock,
    /// The 64-bit block of a v2+ file.
    pub v2:     Option<DataBlock>,
    pub footer: Option<Footer>,
}

impl TzifFile {
    /// The most precise block available.
    pub fn best_block(&self) -> &DataBlock {
        self.v2.as_ref().unwrap_or(&self.v1)
    }
}

/// Sink that accumulates events into [`DataBlock`]s.
#[derive(Debug, Default)]
pub struct Collector {
    blocks: Vec<DataBlock>,
    footer: Option<Footer>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected file, or `None` if no header was ever seen.
    pub fn finish(self) -> Option<TzifFile> {
        let mut blocks = self.blocks.into_iter();
        let v1 = blocks.next()?;
        Some(TzifFile { v1, v2: blocks.next(), footer: self.footer })
    }

    fn current(&mut self) -> Option<&mut DataBlock> {
        self.blocks.last_mut()
    }
}

impl<'a> Sink<'a> for Collector {
    fn emit(&mut self, event: Event<'a>) {
        if let Event::Header { header, width } = event {
            self.blocks.push(DataBlock::new(header, width));
            return;
        }
        if let Event::Footer(raw) = event {
            self.footer = Some(Footer::new(raw));
            return;
        }
        let Some(block) = self.current() else { return };
        match event {
            Event::TransitionTime { time, .. }            => block.transition_times.push(time),
            Event::TransitionType { local_time_type, .. } => block.transition_types.push(local_time_type),
            Event::LocalTimeType { record, .. }           => block.local_time_types.push(record),
            Event::Designation { offset, name }           => block.designations.push(Designation {
                offset,
                name: name.to_vec(),
            }),
            Event::LeapSecond { record, .. }              => block.leap_seconds.push(record),
            Event::StandardWall { indicator, .. }         => block.std_wall.push(indicator),
            Event::UtLocal { indicator, .. }              => block.ut_local.push(indicator),
            Event::Header { .. } | Event::Footer(_) | Event::Section(_) => {}
        }
    }
}
