use crate::foundation::error::{ParseError, ParseResult};

/// Sequential little-endian reader over an immutable byte buffer.
///
/// Offsets reported in errors are absolute positions in the original file, including for
/// cursors produced by [`ByteCursor::sub_cursor`].
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> ByteCursor<'a> {
    /// Start reading at the beginning of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            base: 0,
        }
    }

    /// Absolute offset of the next read.
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    /// Bytes consumed from this cursor so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Bytes left before the end of this cursor.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Take the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> ParseResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(ParseError::OutOfBounds {
                offset: self.position(),
                needed: len,
                available: self.remaining(),
            });
        }
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Advance past `len` bytes without looking at them.
    pub fn skip(&mut self, len: usize) -> ParseResult<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Split off the next `len` bytes as an independent cursor, advancing this one past them.
    pub fn sub_cursor(&mut self, len: usize) -> ParseResult<ByteCursor<'a>> {
        let base = self.position();
        let bytes = self.read_bytes(len)?;
        Ok(ByteCursor {
            bytes,
            pos: 0,
            base,
        })
    }

    /// Read one unsigned byte.
    pub fn read_u8(&mut self) -> ParseResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read one signed byte.
    pub fn read_i8(&mut self) -> ParseResult<i8> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `u16`.
    pub fn read_u16(&mut self) -> ParseResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `i16`.
    pub fn read_i16(&mut self) -> ParseResult<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `u32`.
    pub fn read_u32(&mut self) -> ParseResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `i32`.
    pub fn read_i32(&mut self) -> ParseResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian IEEE-754 `f32`.
    pub fn read_f32(&mut self) -> ParseResult<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// 16.16 signed fixed point.
    pub fn read_fixed(&mut self) -> ParseResult<f32> {
        Ok(self.read_i32()? as f32 / 65536.0)
    }

    /// A `u16` byte length followed by that many UTF-8 bytes.
    pub fn read_string(&mut self) -> ParseResult<String> {
        let offset = self.position();
        let len = usize::from(self.read_u16()?);
        let raw = self.read_bytes(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| ParseError::InvalidString { offset })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/cursor.rs"]
mod tests;
