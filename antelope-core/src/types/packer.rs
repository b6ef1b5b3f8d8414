//! Canonical binary packing, the wire form of transactions, actions and ABIs.
//!
//! Integers are little endian, lengths and sizes are LEB128 encoded `varuint32`s, strings and
//! byte arrays are length prefixed and optional values carry a one byte presence flag.
use super::{Bytes, Name};
use thiserror::Error;

/// Error thrown when unpacking binary data
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PackError {
    #[error("unexpected end of data: needed {needed} more byte(s) at offset {offset}")]
    UnexpectedEof { offset: usize, needed: usize },
    #[error("varuint32 at offset {0} does not fit in 32 bits")]
    VarintOverflow(usize),
    #[error("invalid utf-8 string at offset {0}")]
    InvalidUtf8(usize),
    #[error("invalid bool value {0}")]
    InvalidBool(u8),
    #[error("{0} trailing byte(s) after the decoded value")]
    TrailingBytes(usize),
}

/// Types that can be written in the canonical binary form
pub trait Pack {
    fn pack(&self, enc: &mut Encoder);

    /// Packs the value into a freshly allocated buffer
    fn packed(&self) -> Vec<u8> {
        let mut enc = Encoder::new();
        self.pack(&mut enc);
        enc.into_bytes()
    }
}

/// Types that can be read from the canonical binary form
pub trait Unpack: Sized {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError>;

    /// Unpacks a value which must span the whole input
    fn unpacked(data: &[u8]) -> Result<Self, PackError> {
        let mut dec = Decoder::new(data);
        let value = Self::unpack(&mut dec)?;
        dec.finish()?;
        Ok(value)
    }
}

/// Growable output buffer
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_varuint32(&mut self, mut value: u32) {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.buf.push(byte);
                break
            }
            self.buf.push(byte | 0x80);
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over packed input
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8], PackError> {
        let remaining = self.remaining();
        if remaining < len {
            return Err(PackError::UnexpectedEof { offset: self.pos, needed: len - remaining })
        }
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn read_varuint32(&mut self) -> Result<u32, PackError> {
        let start = self.pos;
        let mut value = 0u64;
        let mut shift = 0;
        loop {
            let byte = self.read_raw(1)?[0];
            value |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                break
            }
            shift += 7;
            if shift > 28 {
                return Err(PackError::VarintOverflow(start))
            }
        }
        u32::try_from(value).map_err(|_| PackError::VarintOverflow(start))
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Fails if any input is left
    pub fn finish(&self) -> Result<(), PackError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(PackError::TrailingBytes(n)),
        }
    }
}

/// A LEB128 encoded unsigned 32-bit integer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarUint32(pub u32);

impl Pack for VarUint32 {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_varuint32(self.0)
    }
}

impl Unpack for VarUint32 {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        dec.read_varuint32().map(VarUint32)
    }
}

/// Implements `Pack`/`Unpack` for a struct by packing its fields in declaration order
macro_rules! impl_pack_struct {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl Pack for $ty {
            fn pack(&self, enc: &mut Encoder) {
                $(self.$field.pack(enc);)*
            }
        }

        impl Unpack for $ty {
            fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
                Ok(Self { $($field: Unpack::unpack(dec)?,)* })
            }
        }
    };
}

pub(crate) use impl_pack_struct;

macro_rules! impl_pack_int {
    ($($ty:ty),*) => {
        $(
            impl Pack for $ty {
                fn pack(&self, enc: &mut Encoder) {
                    enc.write_raw(&self.to_le_bytes())
                }
            }

            impl Unpack for $ty {
                fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
                    let raw = dec.read_raw(std::mem::size_of::<$ty>())?;
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(raw);
                    Ok(<$ty>::from_le_bytes(buf))
                }
            }
        )*
    };
}

impl_pack_int!(u8, u16, u32, u64, i64);

impl Pack for bool {
    fn pack(&self, enc: &mut Encoder) {
        (*self as u8).pack(enc)
    }
}

impl Unpack for bool {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        match u8::unpack(dec)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(PackError::InvalidBool(other)),
        }
    }
}

impl Pack for str {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_varuint32(self.len() as u32);
        enc.write_raw(self.as_bytes());
    }
}

impl Pack for String {
    fn pack(&self, enc: &mut Encoder) {
        self.as_str().pack(enc)
    }
}

impl Unpack for String {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        let len = dec.read_varuint32()? as usize;
        let offset = dec.position();
        let raw = dec.read_raw(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| PackError::InvalidUtf8(offset))
    }
}

impl Pack for Bytes {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_varuint32(self.len() as u32);
        enc.write_raw(self.as_ref());
    }
}

impl Unpack for Bytes {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        let len = dec.read_varuint32()? as usize;
        Ok(Bytes::from(dec.read_raw(len)?))
    }
}

impl Pack for Name {
    fn pack(&self, enc: &mut Encoder) {
        self.as_u64().pack(enc)
    }
}

impl Unpack for Name {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        u64::unpack(dec).map(Name::new)
    }
}

impl<T: Pack> Pack for Vec<T> {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_varuint32(self.len() as u32);
        for item in self {
            item.pack(enc);
        }
    }
}

impl<T: Unpack> Unpack for Vec<T> {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        let len = dec.read_varuint32()? as usize;
        // every element takes at least one byte
        let mut out = Vec::with_capacity(len.min(dec.remaining()));
        for _ in 0..len {
            out.push(T::unpack(dec)?);
        }
        Ok(out)
    }
}

impl<T: Pack> Pack for Option<T> {
    fn pack(&self, enc: &mut Encoder) {
        match self {
            Some(value) => {
                true.pack(enc);
                value.pack(enc);
            }
            None => false.pack(enc),
        }
    }
}

impl<T: Unpack> Unpack for Option<T> {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        if bool::unpack(dec)? {
            Ok(Some(T::unpack(dec)?))
        } else {
            Ok(None)
        }
    }
}

impl<A: Pack, B: Pack> Pack for (A, B) {
    fn pack(&self, enc: &mut Encoder) {
        self.0.pack(enc);
        self.1.pack(enc);
    }
}

impl<A: Unpack, B: Unpack> Unpack for (A, B) {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        Ok((A::unpack(dec)?, B::unpack(dec)?))
    }
}

impl<T: Pack + ?Sized> Pack for &T {
    fn pack(&self, enc: &mut Encoder) {
        (**self).pack(enc)
    }
}
