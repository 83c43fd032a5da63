//! Nikon type 1 makernote
//!
//! Written by E-series cameras prior to (not including) the E990. For
//! example: E700, E800, E900, E900S, E910, E950.
//!
//! The makernote starts with the ASCII string `Nikon`. The data format is
//! the same as an IFD, starting at offset 8:
//!
//! ```text
//! :0000: 4E 69 6B 6F 6E 00 01 00-05 00 02 00 02 00 06 00 Nikon...........
//! :0010: 00 00 EC 02 00 00 03 00-03 00 01 00 00 00 06 00 ................
//! ```

use mknote_common::exif::Tag;

use super::TagDescriptor;
use crate::directory::Directory;

/// Tags used in the Nikon type 1 makernote
pub struct NikonType1Tag;

impl NikonType1Tag {
    pub const UNKNOWN_1: Tag = Tag(0x0002);
    pub const QUALITY: Tag = Tag(0x0003);
    pub const COLOR_MODE: Tag = Tag(0x0004);
    pub const IMAGE_ADJUSTMENT: Tag = Tag(0x0005);
    pub const CCD_SENSITIVITY: Tag = Tag(0x0006);
    pub const WHITE_BALANCE: Tag = Tag(0x0007);
    pub const FOCUS: Tag = Tag(0x0008);
    pub const UNKNOWN_2: Tag = Tag(0x0009);
    pub const DIGITAL_ZOOM: Tag = Tag(0x000A);
    pub const CONVERTER: Tag = Tag(0x000B);
    pub const UNKNOWN_3: Tag = Tag(0x0F00);

    pub fn name(tag: Tag) -> Option<&'static str> {
        Some(match tag {
            Self::UNKNOWN_1 => "Makernote Unknown 1",
            Self::QUALITY => "Quality",
            Self::COLOR_MODE => "Color Mode",
            Self::IMAGE_ADJUSTMENT => "Image Adjustment",
            Self::CCD_SENSITIVITY => "CCD Sensitivity",
            Self::WHITE_BALANCE => "White Balance",
            Self::FOCUS => "Focus",
            Self::UNKNOWN_2 => "Makernote Unknown 2",
            Self::DIGITAL_ZOOM => "Digital Zoom",
            Self::CONVERTER => "Fisheye Converter",
            Self::UNKNOWN_3 => "Makernote Unknown 3",
            _ => return None,
        })
    }
}

const QUALITY: &[Option<&str>] = &[
    Some("VGA Basic"),
    Some("VGA Normal"),
    Some("VGA Fine"),
    Some("SXGA Basic"),
    Some("SXGA Normal"),
    Some("SXGA Fine"),
];

const COLOR_MODE: &[Option<&str>] = &[Some("Color"), Some("Monochrome")];

const IMAGE_ADJUSTMENT: &[Option<&str>] = &[
    Some("Normal"),
    Some("Bright +"),
    Some("Bright -"),
    Some("Contrast +"),
    Some("Contrast -"),
];

const CCD_SENSITIVITY: &[Option<&str>] = &[
    Some("ISO80"),
    None,
    Some("ISO160"),
    None,
    Some("ISO320"),
    Some("ISO100"),
];

const WHITE_BALANCE: &[Option<&str>] = &[
    Some("Auto"),
    Some("Preset"),
    Some("Daylight"),
    Some("Incandescence"),
    Some("Florescence"),
    Some("Cloudy"),
    Some("SpeedLight"),
];

const CONVERTER: &[Option<&str>] = &[Some("None"), Some("Fisheye converter")];

pub struct NikonType1Descriptor<'a> {
    directory: &'a dyn Directory,
}

impl<'a> NikonType1Descriptor<'a> {
    pub fn new(directory: &'a dyn Directory) -> Self {
        Self { directory }
    }

    pub fn quality_description(&self) -> Option<String> {
        self.indexed_description(NikonType1Tag::QUALITY, 1, QUALITY)
    }

    pub fn color_mode_description(&self) -> Option<String> {
        self.indexed_description(NikonType1Tag::COLOR_MODE, 1, COLOR_MODE)
    }

    pub fn image_adjustment_description(&self) -> Option<String> {
        self.indexed_description(NikonType1Tag::IMAGE_ADJUSTMENT, 0, IMAGE_ADJUSTMENT)
    }

    pub fn ccd_sensitivity_description(&self) -> Option<String> {
        self.indexed_description(NikonType1Tag::CCD_SENSITIVITY, 0, CCD_SENSITIVITY)
    }

    pub fn white_balance_description(&self) -> Option<String> {
        self.indexed_description(NikonType1Tag::WHITE_BALANCE, 0, WHITE_BALANCE)
    }

    /// Focus distance, `1/0` stands for infinity
    pub fn focus_description(&self) -> Option<String> {
        let value = self.directory.rational(NikonType1Tag::FOCUS)?;

        if value.numerator == 1 && value.denominator == 0 {
            return Some(String::from("Infinite"));
        }

        Some(value.to_simple_string(true))
    }

    pub fn digital_zoom_description(&self) -> Option<String> {
        let value = self.directory.rational(NikonType1Tag::DIGITAL_ZOOM)?;

        if value.numerator == 0 {
            return Some(String::from("No digital zoom"));
        }

        Some(format!("{}x digital zoom", value.to_simple_string(true)))
    }

    pub fn converter_description(&self) -> Option<String> {
        self.indexed_description(NikonType1Tag::CONVERTER, 0, CONVERTER)
    }
}

impl TagDescriptor for NikonType1Descriptor<'_> {
    fn directory(&self) -> &dyn Directory {
        self.directory
    }

    fn tag_name(&self, tag: Tag) -> Option<&'static str> {
        NikonType1Tag::name(tag)
    }

    fn description(&self, tag: Tag) -> Option<String> {
        match tag {
            NikonType1Tag::QUALITY => self.quality_description(),
            NikonType1Tag::COLOR_MODE => self.color_mode_description(),
            NikonType1Tag::IMAGE_ADJUSTMENT => self.image_adjustment_description(),
            NikonType1Tag::CCD_SENSITIVITY => self.ccd_sensitivity_description(),
            NikonType1Tag::WHITE_BALANCE => self.white_balance_description(),
            NikonType1Tag::FOCUS => self.focus_description(),
            NikonType1Tag::DIGITAL_ZOOM => self.digital_zoom_description(),
            NikonType1Tag::CONVERTER => self.converter_description(),
            _ => self.default_description(tag),
        }
    }
}
