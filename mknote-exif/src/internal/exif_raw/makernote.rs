use mknote_common::exif::{Ifd, Tag, TagIfd};
use mknote_common::math::SafeAdd;

use super::*;

/// Identifier at the start of Nikon makernotes
pub const NIKON_IDENTIFIER: &[u8] = b"Nikon\0";

/// Makernote layouts with a known structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MakerNoteKind {
    /// Nikon E-series cameras prior to the E990
    ///
    /// Starts with `Nikon\0\x01\0`, followed by an IFD whose offsets are
    /// relative to the Exif header, like in the Olympus makernote.
    NikonType1,
}

impl MakerNoteKind {
    /// Recognizes the makernote from its first bytes
    ///
    /// Returns the kind and where the IFD starts, relative to the makernote.
    ///
    /// ```
    /// # use mknote_exif::MakerNoteKind;
    /// assert_eq!(
    ///     MakerNoteKind::detect(b"Nikon\0\x01\0\x05\0"),
    ///     Some((MakerNoteKind::NikonType1, 8))
    /// );
    /// assert_eq!(MakerNoteKind::detect(b"Nikon\0\x02\x10\0\0"), None);
    /// ```
    pub fn detect(header: &[u8]) -> Option<(Self, u32)> {
        if header.starts_with(NIKON_IDENTIFIER) && header.get(6) == Some(&1) {
            return Some((Self::NikonType1, 8));
        }

        None
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NikonType1 => "Nikon Makernote",
        }
    }
}

impl super::ExifRaw {
    pub fn makernote_entry(&self) -> Option<EntryRef> {
        self.lookup_entry(TagIfd::new(Tag::MAKER_NOTE, Ifd::Exif))
    }

    /// Finds the makernote kind and the absolute position of its IFD
    pub fn makernote_guess_offset(&mut self) -> Option<(MakerNoteKind, u32)> {
        let entry = self.makernote_entry()?;
        if entry.count < 8 {
            tracing::debug!("Makernote with {} bytes is too short", entry.count);
            return None;
        }
        let offset = entry.offset().ok()?;

        let mut raw = self.raw();
        raw.seek_start(offset).ok()?;
        let header = raw.read_exact::<8>().ok()?;

        let Some((kind, internal_offset)) = MakerNoteKind::detect(&header) else {
            tracing::debug!("Unsupported makernote starting with {header:x?}");
            return None;
        };

        Some((kind, offset.safe_add(internal_offset).ok()?))
    }

    /// Decodes the makernote IFD into [`Ifd::MakerNote`]
    ///
    /// Does nothing if there is no makernote or its kind is not supported.
    pub fn makernote_register(&mut self) -> Result<()> {
        let Some(entry) = self.makernote_entry() else {
            return Ok(());
        };

        let Some((kind, ifd_position)) = self.makernote_guess_offset() else {
            return Ok(());
        };

        tracing::debug!("Found makernote {kind:?} with IFD at byte {ifd_position}");

        self.add_ifd_offset_location(Ifd::MakerNote, entry.value_offset_position()?);
        self.raw().seek_start(ifd_position)?;

        // Entries with unreadable data are kept and skipped on lookup
        if let Err(err) = self.decode_ifd_entries(Ifd::MakerNote) {
            self.locations.retain(|tagifd, _| tagifd.ifd != Ifd::MakerNote);
            self.ifd_locations.remove(&Ifd::MakerNote);
            return Err(err);
        }

        self.makernote = Some(kind);

        Ok(())
    }
}
