//! Little-endian buffer writer, symmetric with [`crate::reader::TableReader`].
//!
//! Exists so [`crate::builder::ModelBuilder`] can serialize a model to the
//! exact wire format `spec.md` §6 describes, and so `taro-model`'s own tests
//! can exercise [`crate::store::load`] against real bytes rather than only
//! against in-memory structs.

use byteorder::{ByteOrder, LittleEndian};

#[derive(Default)]
pub struct TableWriter {
    buf: Vec<u8>,
}

impl TableWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u32(&mut self, v: u32) {
        let mut tmp = [0u8; 4];
        LittleEndian::write_u32(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
    }

    pub fn write_u64(&mut self, v: u64) {
        let mut tmp = [0u8; 8];
        LittleEndian::write_u64(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
    }

    pub fn write_i64(&mut self, v: i64) {
        let mut tmp = [0u8; 8];
        LittleEndian::write_i64(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
    }

    pub fn write_f32(&mut self, v: f32) {
        let mut tmp = [0u8; 4];
        LittleEndian::write_f32(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
    }

    pub fn write_f64(&mut self, v: f64) {
        let mut tmp = [0u8; 8];
        LittleEndian::write_f64(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub fn write_u32_vec(&mut self, v: &[u32]) {
        for &x in v {
            self.write_u32(x);
        }
    }

    pub fn write_f32_vec(&mut self, v: &[f32]) {
        for &x in v {
            self.write_f32(x);
        }
    }

    pub fn write_u32_prefixed_u32_vec(&mut self, v: &[u32]) {
        self.write_u32(v.len() as u32);
        self.write_u32_vec(v);
    }

    pub fn write_u32_prefixed_f32_vec(&mut self, v: &[f32]) {
        self.write_u32(v.len() as u32);
        self.write_f32_vec(v);
    }
}
