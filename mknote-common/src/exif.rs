#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TagIfd {
    pub tag: Tag,
    pub ifd: Ifd,
}

impl TagIfd {
    pub fn new(tag: Tag, ifd: Ifd) -> Self {
        Self { tag, ifd }
    }
}

impl<T: Field> From<T> for TagIfd {
    fn from(_value: T) -> Self {
        TagIfd {
            tag: T::TAG,
            ifd: T::IFD,
        }
    }
}

pub trait Field {
    const NAME: &'static str;
    const TAG: Tag;
    const IFD: Ifd;
}

/// Name of a well known field, `None` for tags without a definition
pub fn lookup_tag_name(tagifd: TagIfd) -> Option<&'static str> {
    crate::field::TAG_NAMES
        .iter()
        .find(|(key, _)| *key == (tagifd.tag.0, tagifd.ifd))
        .map(|(_, name)| *name)
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag(pub u16);

impl Tag {
    pub const MAKER_NOTE: Self = Self(0x927C);

    pub const EXIF_IFD_POINTER: Self = Self(0x8769);
    pub const GPS_INFO_IFD_POINTER: Self = Self(0x8825);
    pub const INTEROPERABILITY_IFD_POINTER: Self = Self(0xA005);

    /// See 4.6.3 in v3.0 standard
    pub fn exif_specific_ifd(&self) -> Option<Ifd> {
        match *self {
            Self::EXIF_IFD_POINTER => Some(Ifd::Exif),
            Self::GPS_INFO_IFD_POINTER => Some(Ifd::Gps),
            Self::INTEROPERABILITY_IFD_POINTER => Some(Ifd::Interoperability),
            _ => None,
        }
    }
}

/// Tags are shown the way Exif tables list them
///
/// ```
/// # use mknote_common::exif::Tag;
/// assert_eq!(Tag(0xA).to_string(), "0x000A");
/// ```
impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Image file directory
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ifd {
    Primary,
    Thumbnail,
    Exif,
    Gps,
    Interoperability,
    MakerNote,
}
