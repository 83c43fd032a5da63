use mknote_common::exif::{Ifd, Tag, TagIfd};
use mknote_common::math::{SafeAdd, ToUsize};
use mknote_common::Rational;

use super::*;
use crate::directory::{TagDirectory, Value};

impl super::ExifRaw {
    pub fn lookup_entry(&self, tagifd: impl Into<TagIfd>) -> Option<EntryRef> {
        self.locations
            .get(&tagifd.into())
            .and_then(|entries| entries.first())
            .copied()
    }

    /// Raw bytes of an entry, in file byte order
    pub fn lookup_data(&mut self, tagifd: impl Into<TagIfd>) -> Result<Option<(Type, Vec<u8>)>> {
        let Some(entry) = self.lookup_entry(tagifd) else {
            return Ok(None);
        };

        let mut raw = self.raw();
        raw.seek_start(entry.data_position()?)?;
        let data = raw.read_vec(entry.data_len()?)?;

        Ok(Some((entry.data_type, data)))
    }

    pub fn lookup_binary(&mut self, tagifd: impl Into<TagIfd>) -> Result<Option<Vec<u8>>> {
        Ok(self.lookup_data(tagifd)?.map(|(_, data)| data))
    }

    /// Read a single entry from IFD
    pub fn read_entry(&mut self) -> Result<(Tag, EntryRef)> {
        let mut raw = self.raw();

        let position = raw.position()?;
        let tag_id = raw.read_u16().e(Error::EntryEof)?;
        let data_type = raw.read_u16().e(Error::EntryEof)?.into();
        let count = raw.read_u32().e(Error::EntryEof)?;
        let value = ValueOffset::new(data_type, count, raw.read_u32().e(Error::EntryEof)?)?;

        Ok((
            Tag(tag_id),
            EntryRef {
                position,
                data_type,
                count,
                value_offset: value,
            },
        ))
    }

    /// Decodes an entry into a typed [`Value`]
    ///
    /// Multi byte values are converted from the file's byte order.
    pub fn lookup_value(&mut self, tagifd: impl Into<TagIfd>) -> Result<Option<Value>> {
        let Some(entry) = self.lookup_entry(tagifd) else {
            return Ok(None);
        };

        let mut raw = self.raw();
        raw.seek_start(entry.data_position()?)?;

        // Rejects counts that point past the end before allocating anything
        let data_end = entry.data_position()?.safe_add(entry.data_len()?)?;
        if data_end.usize()? > raw.len() {
            return Err(Error::LookupEof);
        }

        let count = entry.count;

        let value = match entry.data_type {
            Type::Byte => Value::Byte(raw.read_vec(count)?),
            Type::Undefined => Value::Undefined(raw.read_vec(count)?),
            Type::SByte => Value::SByte(
                raw.read_vec(count)?
                    .into_iter()
                    .map(|x| i8::from_ne_bytes([x]))
                    .collect(),
            ),
            Type::Ascii | Type::Utf8 => Value::Ascii(strip_nul(&raw.read_vec(count)?)),
            Type::Short => {
                Value::Short((0..count).map(|_| raw.read_u16()).collect::<Result<_>>()?)
            }
            Type::SShort => {
                Value::SShort((0..count).map(|_| raw.read_i16()).collect::<Result<_>>()?)
            }
            Type::Long => {
                Value::Long((0..count).map(|_| raw.read_u32()).collect::<Result<_>>()?)
            }
            Type::SLong => {
                Value::SLong((0..count).map(|_| raw.read_i32()).collect::<Result<_>>()?)
            }
            Type::Rational => Value::Rational(
                (0..count)
                    .map(|_| -> Result<Rational> {
                        Ok(Rational::from((raw.read_u32()?, raw.read_u32()?)))
                    })
                    .collect::<Result<_>>()?,
            ),
            Type::SRational => Value::SRational(
                (0..count)
                    .map(|_| -> Result<Rational> {
                        Ok(Rational::from((raw.read_i32()?, raw.read_i32()?)))
                    })
                    .collect::<Result<_>>()?,
            ),
            Type::Float => Value::Float(
                (0..count)
                    .map(|_| raw.read_u32().map(f32::from_bits))
                    .collect::<Result<_>>()?,
            ),
            Type::Double => Value::Double(
                (0..count)
                    .map(|_| raw.read_u64().map(f64::from_bits))
                    .collect::<Result<_>>()?,
            ),
            other => return Err(Error::UnsupportedType(other)),
        };

        Ok(Some(value))
    }

    /// Decodes all entries of `ifd`
    ///
    /// Entries that can't be decoded are skipped.
    pub fn directory(&mut self, ifd: Ifd) -> Result<TagDirectory> {
        if !self.ifd_locations.contains_key(&ifd) && self.tags(ifd).next().is_none() {
            return Err(Error::IfdNotFound(ifd));
        }

        let mut directory = TagDirectory::new(ifd);
        let tags = self.tags(ifd).collect::<Vec<_>>();

        for tagifd in tags {
            match self.lookup_value(tagifd) {
                Ok(Some(value)) => directory.set(tagifd.tag, value),
                Ok(None) => {}
                Err(err) => tracing::debug!("Skipping tag {} in '{ifd:?}': {err}", tagifd.tag),
            }
        }

        Ok(directory)
    }

    /// Returns a field of [`Type::Ascii`] or [`Type::Utf8`]
    ///
    /// This lookup deviates from the standard in that it removes all NULL bytes
    /// instead of just the last byte that should be NULL. This is due to many
    /// Exif implementations writing NULL bytes at the end or beginning of the
    /// data.
    pub fn lookup_string(&mut self, tagifd: impl Into<TagIfd>) -> Result<Option<String>> {
        let tagifd = tagifd.into();
        if let Some(entry) = self.lookup_entry(tagifd) {
            if !matches!(entry.data_type, Type::Ascii | Type::Utf8) {
                return Err(Error::WrongType {
                    expected: (entry.count, Type::Ascii),
                    actual: (entry.count, entry.data_type),
                });
            }
        }

        Ok(self.lookup_binary(tagifd)?.map(|data| strip_nul(&data)))
    }

    pub fn lookup_short(&mut self, tagifd: impl Into<TagIfd>) -> Result<Option<u16>> {
        let tagifd = tagifd.into();
        let Some(entry) = self.lookup_entry(tagifd) else {
            return Ok(None);
        };

        Self::check_type(&entry, 1, Type::Short)?;

        let mut raw = self.raw();
        raw.seek_start(entry.data_position()?)?;
        raw.read_u16().map(Some)
    }

    pub fn lookup_long(&mut self, tagifd: impl Into<TagIfd>) -> Result<Option<u32>> {
        let Some(entry) = self.lookup_entry(tagifd) else {
            return Ok(None);
        };

        Self::check_type(&entry, 1, Type::Long)?;

        // Inline values are stored as read with the file's byte order
        Ok(Some(entry.value_offset.u32()))
    }

    pub fn lookup_rational(&mut self, tagifd: impl Into<TagIfd>) -> Result<Option<Rational>> {
        let Some(entry) = self.lookup_entry(tagifd) else {
            return Ok(None);
        };

        Self::check_type(&entry, 1, Type::Rational)?;

        let mut raw = self.raw();
        raw.seek_start(entry.offset()?)?;
        let x = raw.read_u32()?;
        let y = raw.read_u32()?;

        Ok(Some(Rational::from((x, y))))
    }

    fn check_type(entry: &EntryRef, count: u32, data_type: Type) -> Result<()> {
        if entry.count == count && entry.data_type == data_type {
            Ok(())
        } else {
            Err(Error::WrongType {
                expected: (count, data_type),
                actual: (entry.count, entry.data_type),
            })
        }
    }
}

/// Strip all NULL bytes
fn strip_nul(data: &[u8]) -> String {
    let data = data.iter().copied().filter(|x| *x != 0).collect::<Vec<_>>();
    String::from_utf8_lossy(&data).to_string()
}
