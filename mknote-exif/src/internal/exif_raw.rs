mod debug;
mod decode;
mod lookup;
mod makernote;

use std::collections::BTreeMap;

use mknote_common::exif::{Ifd, TagIfd};
use mknote_common::math::*;

pub use self::makernote::MakerNoteKind;
use super::{Raw, Type};
use crate::error::{Error, Result, ResultExt};

/// Location and layout of a single IFD entry
#[derive(Debug, Clone, Copy)]
pub struct EntryRef {
    /// Position of the entry itself, not of its data
    pub position: u32,
    pub data_type: Type,
    pub count: u32,
    pub value_offset: ValueOffset,
}

impl EntryRef {
    pub fn value_offset_position(&self) -> Result<u32> {
        Ok(self.position.safe_add(8)?)
    }

    pub fn data_len(&self) -> Result<u32> {
        self.count
            .checked_mul(self.data_type.size())
            .e(Error::DataSizeTooLarge)
    }

    pub fn offset(&self) -> Result<u32> {
        if let ValueOffset::Offset(offset) = self.value_offset {
            Ok(offset)
        } else {
            Err(Error::ValueInsteadOfOffset)
        }
    }

    /// Position of the first data byte, inline values included
    pub fn data_position(&self) -> Result<u32> {
        match self.value_offset {
            ValueOffset::Value(_) => self.value_offset_position(),
            ValueOffset::Offset(offset) => Ok(offset),
        }
    }
}

/// This can either be a value or an offset where to find the value
#[derive(Debug, Clone, Copy)]
pub enum ValueOffset {
    Value(u32),
    Offset(u32),
}

impl ValueOffset {
    fn new(data_type: Type, count: u32, value: u32) -> Result<Self> {
        let Some(size) = data_type.size().checked_mul(count) else {
            return Err(Error::DataSizeTooLarge);
        };
        Ok(if size <= 4 {
            Self::Value(value)
        } else {
            Self::Offset(value)
        })
    }

    pub fn u32(&self) -> u32 {
        match self {
            Self::Value(x) => *x,
            Self::Offset(x) => *x,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExifRaw {
    pub raw: Raw,
    pub locations: BTreeMap<TagIfd, Vec<EntryRef>>,
    /// The locations where the offsets are stored
    pub ifd_locations: BTreeMap<Ifd, u32>,
    /// Recognized makernote, `None` if absent or unsupported
    pub makernote: Option<MakerNoteKind>,
}

impl ExifRaw {
    pub fn new(raw: Vec<u8>) -> Self {
        Self {
            raw: Raw::new(raw),
            locations: Default::default(),
            ifd_locations: Default::default(),
            makernote: None,
        }
    }

    pub fn raw(&self) -> Raw {
        self.raw.clone()
    }

    /// Tags present in `ifd`, in ascending order
    pub fn tags(&self, ifd: Ifd) -> impl Iterator<Item = TagIfd> + '_ {
        self.locations
            .iter()
            .filter(move |(tagifd, entries)| tagifd.ifd == ifd && !entries.is_empty())
            .map(|(tagifd, _)| *tagifd)
    }
}
