//! Human-readable and JSON renderings.
//!
//! [`Renderer`] is a [`Sink`] that writes one line per event as it arrives,
//! so a failed decode still shows everything up to the bad field.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serializer;

use crate::event::{Event, Sink};
use crate::model::TzifFile;

/// `2006-01-02T15:04:05`-style UTC rendering of a Unix instant.
pub fn format_utc(secs: i64) -> String {
    match DateTime::<Utc>::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None     => "out of range".to_string(),
    }
}

/// ASCII-escaped rendering of raw bytes.  Lossless: backslashes, quotes
/// and every non-printable or non-ASCII byte are escaped.
pub fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        out.extend(std::ascii::escape_default(b).map(char::from));
    }
    out
}

/// Double-quoted, escaped rendering of raw bytes.
pub fn quote(bytes: &[u8]) -> String {
    format!("\"{}\"", escape(bytes))
}

/// Serialize raw bytes as their [`escape`]d string.
pub(crate) fn escaped_bytes<S: Serializer>(raw: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&escape(raw))
}

/// Streaming text renderer.
///
/// Write errors are latched: the first one is kept, later events are
/// dropped, and [`Renderer::finish`] reports it.
pub struct Renderer<W: Write> {
    out:   W,
    error: Option<io::Error>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_event(&mut self, event: &Event<'_>) -> io::Result<()> {
        let out = &mut self.out;
        match event {
            Event::Header { header, .. } => {
                writeln!(out, "Header:")?;
                writeln!(out, " version: {}", header.version.number())?;
                writeln!(out, " isutcnt: {}", header.isutcnt)?;
                writeln!(out, " isstdcnt: {}", header.isstdcnt)?;
                writeln!(out, " leapcnt: {}", header.leapcnt)?;
                writeln!(out, " timecnt: {}", header.timecnt)?;
                writeln!(out, " typecnt: {}", header.typecnt)?;
                writeln!(out, " charcnt: {}", header.charcnt)
            }
            Event::Section(section) => writeln!(out, "{}:", section.title()),
            Event::TransitionTime { time, .. } => {
                writeln!(out, " {} ({} UTC)", time, format_utc(*time))
            }
            Event::TransitionType { local_time_type, .. } => writeln!(out, " {local_time_type}"),
            Event::LocalTimeType { index, record } => writeln!(
                out,
                " ({}) utoff={} dst={} idx={}",
                index, record.utoff, record.dst, record.idx
            ),
            Event::Designation { name, .. } => writeln!(out, " {}", quote(name)),
            Event::LeapSecond { record, .. } => {
                writeln!(out, " occur={} corr={}", record.occur, record.corr)
            }
            Event::StandardWall { index, indicator } => {
                writeln!(out, " ({}) {}", index, indicator.as_str())
            }
            Event::UtLocal { index, indicator } => {
                writeln!(out, " ({}) {}", index, indicator.as_str())
            }
            Event::Footer(raw) => {
                writeln!(out, "Footer:")?;
                writeln!(out, "{}", quote(raw))
            }
        }
    }
}

impl<'a, W: Write> Sink<'a> for Renderer<W> {
    fn emit(&mut self, event: Event<'a>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_event(&event) {
            self.error = Some(e);
        }
    }
}

/// Pretty-printed JSON for a decoded file.
pub fn to_json(file: &TzifFile) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(file)
}
