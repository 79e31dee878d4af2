//! Data block decoder.
//!
//! A data block is seven count-driven sections laid out back to back:
//!
//! | Section                 | Entry size       | Count      |
//! |-------------------------|------------------|------------|
//! | transition times        | 4 or 8           | `timecnt`  |
//! | transition types        | 1                | `timecnt`  |
//! | local time type records | 6                | `typecnt`  |
//! | designations            | 1                | `charcnt`  |
//! | leap second records     | 4 or 8, then 4   | `leapcnt`  |
//! | std/wall indicators     | 1                | `isstdcnt` |
//! | UT/local indicators     | 1                | `isutcnt`  |
//!
//! Sections are decoded strictly in this order.  Every index field is
//! range-checked against the header before its event is emitted, and the
//! first failure ends the block.

use serde::Serialize;
use tracing::{trace, warn};

use crate::cursor::Cursor;
use crate::error::{IndicatorKind, Result, TzifError};
use crate::event::{Event, Section, Sink};
use crate::header::Header;
use crate::time::TimeWidth;

/// Size of one encoded local time type record.
pub const LOCAL_TIME_TYPE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalTimeType {
    /// Offset from UT in seconds.
    pub utoff: i32,
    /// DST flag byte as stored; not restricted to 0/1.
    pub dst:   u8,
    /// Start of the designation in the designation blob.
    pub idx:   u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeapSecond {
    pub occur: i64,
    pub corr:  i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StdWall {
    Wall,
    Standard,
}

impl StdWall {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(StdWall::Wall),
            1 => Some(StdWall::Standard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StdWall::Wall     => "wall",
            StdWall::Standard => "standard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UtLocal {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "UT")]
    Ut,
}

impl UtLocal {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(UtLocal::Local),
            1 => Some(UtLocal::Ut),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UtLocal::Local => "local",
            UtLocal::Ut    => "UT",
        }
    }
}

/// Upper bound applied to transition type indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeIndexBound {
    /// `index < typecnt`: every index names an existing record.
    #[default]
    Strict,
    /// `index <= typecnt`: also admits one past the last record, as some
    /// older dump tools do.
    Inclusive,
}

impl TypeIndexBound {
    #[inline]
    fn admits(self, index: u8, typecnt: u32) -> bool {
        let index = u32::from(index);
        match self {
            TypeIndexBound::Strict    => index < typecnt,
            TypeIndexBound::Inclusive => index <= typecnt,
        }
    }
}

/// Exact encoded size of the data block described by `header`.
pub fn block_size(header: &Header, width: TimeWidth) -> u64 {
    let w = width.size() as u64;
    u64::from(header.timecnt) * (w + 1)
        + u64::from(header.typecnt) * LOCAL_TIME_TYPE_SIZE as u64
        + u64::from(header.charcnt)
        + u64::from(header.leapcnt) * (w + 4)
        + u64::from(header.isstdcnt)
        + u64::from(header.isutcnt)
}

/// Decode one data block from `cur`, emitting every field to `sink`.
///
/// On success `cur` is left just past the UT/local indicators.  On failure
/// the events emitted so far describe everything that was valid before the
/// offending field.
pub fn decode_body<'a, S: Sink<'a> + ?Sized>(
    cur:    &mut Cursor<'a>,
    header: &Header,
    width:  TimeWidth,
    bound:  TypeIndexBound,
    sink:   &mut S,
) -> Result<()> {
    let start = cur.remaining();

    sink.emit(Event::Section(Section::TransitionTimes));
    for index in 0..header.timecnt {
        let time = width.decode(cur, "transition time")?;
        sink.emit(Event::TransitionTime { index, time });
    }

    sink.emit(Event::Section(Section::TransitionTypes));
    for index in 0..header.timecnt {
        let value = cur.read_u8("transition type")?;
        if !bound.admits(value, header.typecnt) {
            return Err(TzifError::TransitionTypeOutOfRange {
                index,
                value,
                typecnt: header.typecnt,
            });
        }
        if u32::from(value) == header.typecnt {
            warn!(index, value, "transition type one past the last local time type");
        }
        sink.emit(Event::TransitionType { index, local_time_type: value });
    }

    sink.emit(Event::Section(Section::LocalTimeTypes));
    for index in 0..header.typecnt {
        let mut rec = Cursor::new(cur.take(LOCAL_TIME_TYPE_SIZE, "local time type record")?);
        let record = LocalTimeType {
            utoff: rec.read_i32("utoff")?,
            dst:   rec.read_u8("dst")?,
            idx:   rec.read_u8("idx")?,
        };
        // idx <= charcnt - 1, with charcnt == 0 rejecting every record.
        if u32::from(record.idx) >= header.charcnt {
            return Err(TzifError::DesignationIndexOutOfRange {
                record:  index,
                value:   record.idx,
                charcnt: header.charcnt,
            });
        }
        sink.emit(Event::LocalTimeType { index, record });
    }

    sink.emit(Event::Section(Section::Designations));
    let blob = cur.take(header.charcnt as usize, "time zone designations")?;
    decode_designations(blob, sink)?;

    sink.emit(Event::Section(Section::LeapSeconds));
    for index in 0..header.leapcnt {
        let occur = width.decode(cur, "leap second occurrence")?;
        let corr  = cur.read_i32("leap second correction")?;
        sink.emit(Event::LeapSecond { index, record: LeapSecond { occur, corr } });
    }

    sink.emit(Event::Section(Section::StandardWall));
    for index in 0..header.isstdcnt {
        let value = cur.read_u8("std/wall indicator")?;
        let indicator = StdWall::from_byte(value).ok_or(TzifError::InvalidIndicator {
            kind: IndicatorKind::StandardWall,
            index,
            value,
        })?;
        sink.emit(Event::StandardWall { index, indicator });
    }

    sink.emit(Event::Section(Section::UtLocal));
    for index in 0..header.isutcnt {
        let value = cur.read_u8("UT/local indicator")?;
        let indicator = UtLocal::from_byte(value).ok_or(TzifError::InvalidIndicator {
            kind: IndicatorKind::UtLocal,
            index,
            value,
        })?;
        sink.emit(Event::UtLocal { index, indicator });
    }

    let consumed = (start - cur.remaining()) as u64;
    debug_assert_eq!(consumed, block_size(header, width));
    trace!(consumed, ?width, "data block decoded");
    Ok(())
}

/// Split the designation blob on NUL.  The blob must end on a terminator.
fn decode_designations<'a, S: Sink<'a> + ?Sized>(blob: &'a [u8], sink: &mut S) -> Result<()> {
    let mut start = 0;
    for (end, &b) in blob.iter().enumerate() {
        if b == 0 {
            sink.emit(Event::Designation { offset: start as u32, name: &blob[start..end] });
            start = end + 1;
        }
    }
    if start != blob.len() {
        return Err(TzifError::TrailingDesignationData { trailing: blob.len() - start });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Version;

    fn header(timecnt: u32, typecnt: u32, charcnt: u32) -> Header {
        Header {
            version: Version::V1,
            isutcnt: 0,
            isstdcnt: 0,
            leapcnt: 0,
            timecnt,
            typecnt,
            charcnt,
        }
    }

    fn run<'a>(
        data:  &'a [u8],
        h:     &Header,
        bound: TypeIndexBound,
    ) -> (Result<()>, Vec<Event<'a>>, usize) {
        let mut cur = Cursor::new(data);
        let mut events = Vec::new();
        let res = decode_body(&mut cur, h, TimeWidth::Narrow, bound, &mut events);
        (res, events, cur.remaining())
    }

    #[test]
    fn single_type_record() {
        let mut data = (-18000i32).to_be_bytes().to_vec();
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(b"EST\0");
        let h = header(0, 1, 4);

        let (res, events, left) = run(&data, &h, TypeIndexBound::Strict);
        res.unwrap();
        assert_eq!(left, 0);
        assert!(events.contains(&Event::LocalTimeType {
            index:  0,
            record: LocalTimeType { utoff: -18000, dst: 0, idx: 0 },
        }));
        assert!(events.contains(&Event::Designation { offset: 0, name: b"EST" }));
        let sections = events.iter().filter(|e| matches!(e, Event::Section(_))).count();
        assert_eq!(sections, Section::ALL.len());
    }

    #[test]
    fn designation_index_bounds() {
        let h = header(0, 1, 4);
        let rec = |idx: u8| {
            let mut d = 0i32.to_be_bytes().to_vec();
            d.extend_from_slice(&[0, idx]);
            d.extend_from_slice(b"ABC\0");
            d
        };

        let ok = rec(3);
        assert!(run(&ok, &h, TypeIndexBound::Strict).0.is_ok());

        let bad = rec(4);
        assert_eq!(
            run(&bad, &h, TypeIndexBound::Strict).0.unwrap_err(),
            TzifError::DesignationIndexOutOfRange { record: 0, value: 4, charcnt: 4 }
        );
    }

    #[test]
    fn empty_designations_reject_any_record() {
        let h = header(0, 1, 0);
        let data = [0u8; 6];
        assert!(matches!(
            run(&data, &h, TypeIndexBound::Strict).0,
            Err(TzifError::DesignationIndexOutOfRange { charcnt: 0, .. })
        ));
    }

    #[test]
    fn transition_type_bound() {
        let h = header(1, 1, 4);
        let mut data = 100i32.to_be_bytes().to_vec();
        data.push(1); // == typecnt
        data.extend_from_slice(&0i32.to_be_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(b"UTC\0");

        assert_eq!(
            run(&data, &h, TypeIndexBound::Strict).0.unwrap_err(),
            TzifError::TransitionTypeOutOfRange { index: 0, value: 1, typecnt: 1 }
        );

        {
            let (res, events, _) = run(&data, &h, TypeIndexBound::Inclusive);
            res.unwrap();
            assert!(events.contains(&Event::TransitionType { index: 0, local_time_type: 1 }));
        }

        data[4] = 2;
        assert!(run(&data, &h, TypeIndexBound::Inclusive).0.is_err());
    }

    #[test]
    fn unterminated_designation() {
        let (res, events, _) = run(b"UTC\0GMT", &header(0, 0, 7), TypeIndexBound::Strict);
        assert_eq!(res.unwrap_err(), TzifError::TrailingDesignationData { trailing: 3 });
        // The complete entry before the bad tail was still emitted.
        assert!(events.contains(&Event::Designation { offset: 0, name: b"UTC" }));
    }

    #[test]
    fn empty_designations_between_terminators() {
        let (res, events, _) = run(b"\0\0LMT\0", &header(0, 0, 6), TypeIndexBound::Strict);
        res.unwrap();
        let names: Vec<&[u8]> = events
            .iter()
            .filter_map(|e| match e {
                Event::Designation { name, .. } => Some(*name),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec![&b""[..], &b""[..], &b"LMT"[..]]);
    }

    #[test]
    fn indicators() {
        let mut h = header(0, 0, 0);
        h.isstdcnt = 2;
        h.isutcnt = 2;

        let (res, events, _) = run(&[0, 1, 1, 0], &h, TypeIndexBound::Strict);
        res.unwrap();
        assert!(events.contains(&Event::StandardWall { index: 0, indicator: StdWall::Wall }));
        assert!(events.contains(&Event::StandardWall { index: 1, indicator: StdWall::Standard }));
        assert!(events.contains(&Event::UtLocal { index: 0, indicator: UtLocal::Ut }));
        assert!(events.contains(&Event::UtLocal { index: 1, indicator: UtLocal::Local }));

        assert_eq!(
            run(&[0, 2, 0, 0], &h, TypeIndexBound::Strict).0.unwrap_err(),
            TzifError::InvalidIndicator { kind: IndicatorKind::StandardWall, index: 1, value: 2 }
        );
        assert_eq!(
            run(&[0, 0, 0, 9], &h, TypeIndexBound::Strict).0.unwrap_err(),
            TzifError::InvalidIndicator { kind: IndicatorKind::UtLocal, index: 1, value: 9 }
        );
    }

    #[test]
    fn leap_seconds_use_block_width() {
        let mut h = header(0, 0, 0);
        h.leapcnt = 1;
        let mut data = 78796800i64.to_be_bytes().to_vec();
        data.extend_from_slice(&1i32.to_be_bytes());

        let mut cur = Cursor::new(&data);
        let mut events = Vec::new();
        decode_body(&mut cur, &h, TimeWidth::Wide, TypeIndexBound::Strict, &mut events).unwrap();
        assert!(events.contains(&Event::LeapSecond {
            index:  0,
            record: LeapSecond { occur: 78796800, corr: 1 },
        }));
        assert_eq!(block_size(&h, TimeWidth::Wide), 12);
        assert_eq!(block_size(&h, TimeWidth::Narrow), 8);
    }

    #[test]
    fn stops_at_first_failure() {
        let mut h = header(2, 1, 4);
        h.isstdcnt = 1;
        // Second transition time is cut short.
        let data = [0u8, 0, 0, 1, 0, 0];
        let (res, events, _) = run(&data, &h, TypeIndexBound::Strict);
        assert_eq!(res.unwrap_err().field(), "transition time");
        assert_eq!(
            events,
            vec![
                Event::Section(Section::TransitionTimes),
                Event::TransitionTime { index: 0, time: 1 },
            ]
        );
    }
}
