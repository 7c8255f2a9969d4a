//! Little-endian cursor over the self-describing model buffer (`spec.md` §6).
//!
//! Every scalar and array read is bounds-checked and returns
//! [`ModelContractError::Truncated`] rather than panicking — a malformed or
//! truncated buffer must fail model loading cleanly, never crash the process
//! (`spec.md` §7).

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{ModelContractError, ModelResult};

pub struct TableReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> TableReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    fn take(&mut self, n: usize) -> ModelResult<&'a [u8]> {
        if self.pos + n > self.buf.len() {
            return Err(ModelContractError::Truncated {
                offset: self.pos,
                wanted: n,
                available: self.buf.len().saturating_sub(self.pos),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> ModelResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> ModelResult<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> ModelResult<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub fn read_i64(&mut self) -> ModelResult<i64> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    pub fn read_f32(&mut self) -> ModelResult<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> ModelResult<f64> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Length-prefixed (`u32` byte length) UTF-8 string.
    pub fn read_string(&mut self) -> ModelResult<String> {
        let len = self.read_u32()? as usize;
        let offset = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ModelContractError::InvalidUtf8(offset))
    }

    pub fn read_u32_vec(&mut self, count: usize) -> ModelResult<Vec<u32>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.read_u32()?);
        }
        Ok(out)
    }

    pub fn read_f32_vec(&mut self, count: usize) -> ModelResult<Vec<f32>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.read_f32()?);
        }
        Ok(out)
    }

    /// `u32`-length-prefixed vector of `u32`s (used for variable-length
    /// tables such as `TemporalProfile.buckets`).
    pub fn read_u32_prefixed_u32_vec(&mut self) -> ModelResult<Vec<u32>> {
        let len = self.read_u32()? as usize;
        self.read_u32_vec(len)
    }

    /// `u32`-length-prefixed vector of `f32`s.
    pub fn read_u32_prefixed_f32_vec(&mut self) -> ModelResult<Vec<f32>> {
        let len = self.read_u32()? as usize;
        self.read_f32_vec(len)
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
