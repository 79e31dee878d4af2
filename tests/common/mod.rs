//! Byte-exact TZif fixture builder for tests.

#![allow(dead_code)]

/// One header + data block worth of fields.
#[derive(Clone, Debug, Default)]
pub struct Block {
    pub transition_times: Vec<i64>,
    pub transition_types: Vec<u8>,
    /// (utoff, dst, idx)
    pub types:            Vec<(i32, u8, u8)>,
    pub designations:     Vec<u8>,
    /// (occur, corr)
    pub leap_seconds:     Vec<(i64, i32)>,
    pub std_wall:         Vec<u8>,
    pub ut_local:         Vec<u8>,
}

impl Block {
    /// Single-type zone with no transitions.
    pub fn fixed(utoff: i32, name: &str) -> Self {
        let mut designations = name.as_bytes().to_vec();
        designations.push(0);
        Self {
            types: vec![(utoff, 0, 0)],
            designations,
            ..Self::default()
        }
    }

    /// Two-type zone with DST transitions and a leap second.
    pub fn new_york_like() -> Self {
        Self {
            transition_times: vec![-1633280400, -1615140000, 1699164000, 1710054000],
            transition_types: vec![1, 0, 0, 1],
            types:            vec![(-18000, 0, 0), (-14400, 1, 4)],
            designations:     b"EST\0EDT\0".to_vec(),
            leap_seconds:     vec![(78796800, 1)],
            std_wall:         vec![0, 1],
            ut_local:         vec![0, 1],
        }
    }

    pub fn encode(&self, version: u8, wide: bool) -> Vec<u8> {
        let mut out = b"TZif".to_vec();
        out.push(version);
        out.extend_from_slice(&[0u8; 15]);
        for count in [
            self.ut_local.len(),
            self.std_wall.len(),
            self.leap_seconds.len(),
            self.transition_times.len(),
            self.types.len(),
            self.designations.len(),
        ] {
            out.extend_from_slice(&(count as u32).to_be_bytes());
        }
        let time = |out: &mut Vec<u8>, t: i64| {
            if wide {
                out.extend_from_slice(&t.to_be_bytes());
            } else {
                out.extend_from_slice(&(t as i32).to_be_bytes());
            }
        };
        for &t in &self.transition_times {
            time(&mut out, t);
        }
        out.extend_from_slice(&self.transition_types);
        for &(utoff, dst, idx) in &self.types {
            out.extend_from_slice(&utoff.to_be_bytes());
            out.push(dst);
            out.push(idx);
        }
        out.extend_from_slice(&self.designations);
        for &(occur, corr) in &self.leap_seconds {
            time(&mut out, occur);
            out.extend_from_slice(&corr.to_be_bytes());
        }
        out.extend_from_slice(&self.std_wall);
        out.extend_from_slice(&self.ut_local);
        out
    }
}

/// A version 1 file.
pub fn v1(block: &Block) -> Vec<u8> {
    block.encode(0, false)
}

/// A v2/v3 file: 32-bit block, 64-bit block, footer.
pub fn v2(version: u8, narrow: &Block, wide: &Block, footer: &[u8]) -> Vec<u8> {
    let mut out = narrow.encode(version, false);
    out.extend(wide.encode(version, true));
    out.extend_from_slice(footer);
    out
}
