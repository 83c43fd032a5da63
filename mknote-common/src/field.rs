//! Metadata fields
//!
//! Definition of the Exif fields the mknote crates look up by name. Makernote
//! tags are vendor specific and defined next to their descriptors instead.

mod macros;

use crate::exif::Ifd;

macros::make_tags![
    // Primary
    (0x10F, Make, Ifd::Primary),
    (0x110, Model, Ifd::Primary),
    (0x112, Orientation, Ifd::Primary),
    (0x131, Software, Ifd::Primary),
    (0x132, DateTime, Ifd::Primary),

    // Exif
    (0x829A, ExposureTime, Ifd::Exif),
    (0x829D, FNumber, Ifd::Exif),
    (0x9003, DateTimeOriginal, Ifd::Exif),
    (0x920A, FocalLength, Ifd::Exif),
    /// Vendor specific block, see [`crate::exif::Tag::MAKER_NOTE`]
    (0x927C, MakerNote, Ifd::Exif),
];
