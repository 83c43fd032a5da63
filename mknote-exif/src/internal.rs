//! Low level access to the Exif structure
//!
//! The types in here expose entries as they are stored. For rendered values,
//! use [`crate::Exif`] or the [`crate::descriptor`] module.

mod exif_raw;
mod raw;
mod type_;

pub use exif_raw::{EntryRef, ExifRaw, MakerNoteKind, ValueOffset};
pub use mknote_common::exif::{Ifd, Tag, TagIfd};
pub use raw::Raw;
pub use type_::Type;
