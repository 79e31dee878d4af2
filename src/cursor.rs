//! Read-only view over the input with a forward-only position.
//!
//! A [`Cursor`] never copies the underlying buffer; every `take` narrows the
//! view and hands back a sub-slice borrowed from the original input.  The
//! cursor is a plain value threaded through the decoders and returned with
//! their results, so there is no shared position state.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Result, TzifError};

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    /// The unconsumed remainder of the input.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        self.data
    }

    /// Take the next `n` bytes, or fail with `TruncatedInput` naming `field`.
    pub fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        if self.data.len() < n {
            return Err(TzifError::TruncatedInput {
                field,
                needed:    n,
                available: self.data.len(),
            });
        }
        let (head, tail) = self.data.split_at(n);
        self.data = tail;
        Ok(head)
    }

    /// Take everything that is left.
    pub fn take_rest(&mut self) -> &'a [u8] {
        std::mem::take(&mut self.data)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take(4, field)?))
    }

    pub fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        Ok(BigEndian::read_i32(self.take(4, field)?))
    }

    pub fn read_i64(&mut self, field: &'static str) -> Result<i64> {
        Ok(BigEndian::read_i64(self.take(8, field)?))
    }
}
