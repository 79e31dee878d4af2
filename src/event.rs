//! Decode events and the sink trait that consumes them.
//!
//! The decoder never formats anything itself.  It emits one [`Event`] per
//! decoded field, in wire order, as soon as the field has been validated.
//! Renderers, collectors and tests are all just [`Sink`]s.

use crate::body::{LeapSecond, LocalTimeType, StdWall, UtLocal};
use crate::header::Header;
use crate::time::TimeWidth;

/// The body sections, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    TransitionTimes,
    TransitionTypes,
    LocalTimeTypes,
    Designations,
    LeapSeconds,
    StandardWall,
    UtLocal,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::TransitionTimes,
        Section::TransitionTypes,
        Section::LocalTimeTypes,
        Section::Designations,
        Section::LeapSeconds,
        Section::StandardWall,
        Section::UtLocal,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::TransitionTimes => "Transition times",
            Section::TransitionTypes => "Transition types",
            Section::LocalTimeTypes  => "Local time type records",
            Section::Designations    => "Time zone designations",
            Section::LeapSeconds     => "Leap second records",
            Section::StandardWall    => "Standard/wall indicators",
            Section::UtLocal         => "UT/local indicators",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    /// A header was decoded; a data block of `width` instants follows.
    Header { header: Header, width: TimeWidth },
    /// A body section starts.  Emitted even when the section is empty.
    Section(Section),
    TransitionTime { index: u32, time: i64 },
    TransitionType { index: u32, local_time_type: u8 },
    LocalTimeType { index: u32, record: LocalTimeType },
    /// One NUL-terminated designation; `offset` is its start in the blob.
    Designation { offset: u32, name: &'a [u8] },
    LeapSecond { index: u32, record: LeapSecond },
    StandardWall { index: u32, indicator: StdWall },
    UtLocal { index: u32, indicator: UtLocal },
    /// Everything after the second data block, verbatim.
    Footer(&'a [u8]),
}

pub trait Sink<'a> {
    fn emit(&mut self, event: Event<'a>);
}

impl<'a> Sink<'a> for Vec<Event<'a>> {
    fn emit(&mut self, event: Event<'a>) {
        self.push(event);
    }
}

impl<'a, S: Sink<'a> + ?Sized> Sink<'a> for &mut S {
    fn emit(&mut self, event: Event<'a>) {
        (**self).emit(event);
    }
}
