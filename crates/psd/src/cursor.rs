//! Bounds-checked big-endian reads over a byte slice.

use crate::LoadError;

/// A read position inside immutable file data. Every read is checked
/// against the end of the slice and reports the failing offset.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], LoadError> {
        if self.remaining() < len {
            return Err(LoadError::Corrupt(format!(
                "unexpected end of data: needed {len} bytes at offset {}, {} left",
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub(crate) fn skip(&mut self, len: usize) -> Result<(), LoadError> {
        self.read_bytes(len).map(|_| ())
    }

    /// Splits off the next `len` bytes as an independent cursor, so a
    /// length-prefixed region can be parsed without overrunning its end.
    pub(crate) fn take(&mut self, len: usize) -> Result<Cursor<'a>, LoadError> {
        Ok(Cursor::new(self.read_bytes(len)?))
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, LoadError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, LoadError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16, LoadError> {
        let bytes = self.read_bytes(2)?;
        Ok(i16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, LoadError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, LoadError> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64, LoadError> {
        let bytes = self.read_bytes(8)?;
        Ok(i64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    pub(crate) fn read_f64(&mut self) -> Result<f64, LoadError> {
        let bytes = self.read_bytes(8)?;
        Ok(f64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Four-character code, kept as raw bytes so callers can match on
    /// literals like `b"8BIM"`.
    pub(crate) fn read_tag(&mut self) -> Result<[u8; 4], LoadError> {
        let bytes = self.read_bytes(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Length-prefixed name, padded so prefix plus content occupy a
    /// multiple of `pad_to` bytes. Decodes lossily; legacy names are not
    /// guaranteed to be UTF-8.
    pub(crate) fn read_pascal_string(&mut self, pad_to: usize) -> Result<String, LoadError> {
        let len = self.read_u8()? as usize;
        let name = String::from_utf8_lossy(self.read_bytes(len)?).into_owned();
        let padding = (pad_to - (1 + len) % pad_to) % pad_to;
        self.skip(padding)?;
        Ok(name)
    }

    /// Four-byte code unit count followed by UTF-16BE data. Unpaired
    /// surrogates decode to the replacement character; trailing NULs are
    /// trimmed because writers disagree on whether to include one.
    pub(crate) fn read_unicode_string(&mut self) -> Result<String, LoadError> {
        let count = self.read_u32()? as usize;
        let bytes = self.read_bytes(count * 2)?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        let decoded: String = char::decode_utf16(units)
            .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
        Ok(decoded.trim_end_matches('\0').to_string())
    }
}
