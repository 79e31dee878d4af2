use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::{Result, TzifError};

pub const MAGIC: &[u8; 4] = b"TZif";
/// Reserved bytes following the version tag.
pub const RESERVED_LEN: usize = 15;
/// Magic + version + reserved + six counts.
pub const HEADER_SIZE: usize = 4 + 1 + RESERVED_LEN + 6 * 4;

/// Format version carried in the version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Version {
    V1,
    V2,
    V3,
}

impl Version {
    pub fn from_byte(b: u8) -> Result<Self> {
        match b {
            0x00 => Ok(Version::V1),
            b'2' => Ok(Version::V2),
            b'3' => Ok(Version::V3),
            other => Err(TzifError::UnsupportedVersion(other)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Version::V1 => 1,
            Version::V2 => 2,
            Version::V3 => 3,
        }
    }

    /// Whether a second, 64-bit data block and a footer follow the first.
    pub fn has_wide_block(self) -> bool {
        self > Version::V1
    }
}

impl From<Version> for u8 {
    fn from(v: Version) -> u8 {
        v.number()
    }
}

/// TZif header.  The counts are taken as-is; they are only checked where a
/// later field indexes into an earlier section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    pub version:  Version,
    pub isutcnt:  u32,
    pub isstdcnt: u32,
    pub leapcnt:  u32,
    pub timecnt:  u32,
    pub typecnt:  u32,
    pub charcnt:  u32,
}

impl Header {
    /// Decode a header from the front of `cur`.
    pub fn read(cur: &mut Cursor<'_>) -> Result<Self> {
        let magic = cur.take(MAGIC.len(), "magic")?;
        if magic != MAGIC {
            let mut found = [0u8; 4];
            found.copy_from_slice(magic);
            return Err(TzifError::InvalidMagic { found });
        }
        let version = Version::from_byte(cur.read_u8("version")?)?;
        cur.take(RESERVED_LEN, "reserved")?;

        Ok(Self {
            version,
            isutcnt:  cur.read_u32("isutcnt")?,
            isstdcnt: cur.read_u32("isstdcnt")?,
            leapcnt:  cur.read_u32("leapcnt")?,
            timecnt:  cur.read_u32("timecnt")?,
            typecnt:  cur.read_u32("typecnt")?,
            charcnt:  cur.read_u32("charcnt")?,
        })
    }
}

/// Decode a header from `data`, returning the unconsumed remainder.
pub fn decode_header(data: &[u8]) -> Result<(&[u8], Header)> {
    let mut cur = Cursor::new(data);
    let header = Header::read(&mut cur)?;
    Ok((cur.rest(), header))
}
