use std::cell::RefCell;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::rc::Rc;

use mknote_common::math::ToUsize;

use crate::error::{Error, Result, ResultExt};

/// Shared reader over the Exif buffer
///
/// Clones share the same buffer and cursor position.
#[derive(Debug, Clone)]
pub struct Raw {
    pub big_endian: bool,
    pub buffer: Rc<RefCell<Cursor<Vec<u8>>>>,
}

impl Raw {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            big_endian: false,
            buffer: Rc::new(RefCell::new(Cursor::new(data))),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.borrow().get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self) -> Result<u32> {
        self.buffer
            .borrow()
            .position()
            .try_into()
            .e(Error::OffsetTooLarge)
    }

    pub fn seek_start(&mut self, seek: u32) -> Result<()> {
        self.buffer
            .borrow_mut()
            .seek(SeekFrom::Start(seek.into()))?;

        Ok(())
    }

    pub fn read_exact<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes: [u8; N] = [0; N];
        self.buffer.borrow_mut().read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads `len` bytes, fails before allocating if the buffer is shorter
    pub fn read_vec(&mut self, len: u32) -> Result<Vec<u8>> {
        let len = len.usize()?;
        let available = self
            .len()
            .saturating_sub(self.buffer.borrow().position().usize()?);

        if len > available {
            return Err(Error::LookupEof);
        }

        let mut buf = vec![0; len];
        self.buffer
            .borrow_mut()
            .read_exact(&mut buf)
            .e(Error::LookupEof)?;

        Ok(buf)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_exact()?;
        Ok(if self.big_endian {
            u16::from_be_bytes(bytes)
        } else {
            u16::from_le_bytes(bytes)
        })
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let bytes = self.read_exact()?;
        Ok(if self.big_endian {
            i16::from_be_bytes(bytes)
        } else {
            i16::from_le_bytes(bytes)
        })
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_exact()?;
        Ok(if self.big_endian {
            u32::from_be_bytes(bytes)
        } else {
            u32::from_le_bytes(bytes)
        })
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_exact()?;
        Ok(if self.big_endian {
            u64::from_be_bytes(bytes)
        } else {
            u64::from_le_bytes(bytes)
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_exact()?;
        Ok(if self.big_endian {
            i32::from_be_bytes(bytes)
        } else {
            i32::from_le_bytes(bytes)
        })
    }
}
