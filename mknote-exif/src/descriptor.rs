//! Human readable descriptions of tag values
//!
//! A descriptor is bound to one [`Directory`] and turns the raw value of a
//! tag into display text. Vendor specific descriptors override
//! [`TagDescriptor::description`] for the tags they know and fall back to
//! [`TagDescriptor::default_description`] for everything else.

mod nikon_type1;

use mknote_common::exif::{Ifd, Tag, TagIfd};

pub use self::nikon_type1::{NikonType1Descriptor, NikonType1Tag};
use crate::directory::{Directory, Value};
use crate::internal::MakerNoteKind;

/// Arrays with more elements are summarized instead of listed
const MAX_LISTED_VALUES: usize = 16;

pub trait TagDescriptor {
    fn directory(&self) -> &dyn Directory;

    /// Display name of `tag`
    fn tag_name(&self, _tag: Tag) -> Option<&'static str> {
        None
    }

    /// Description of the value stored for `tag`
    ///
    /// `None` if the tag is missing or its value has no known meaning.
    fn description(&self, tag: Tag) -> Option<String> {
        self.default_description(tag)
    }

    /// Renders the raw value without any tag specific knowledge
    fn default_description(&self, tag: Tag) -> Option<String> {
        let value = self.directory().value(tag)?;

        if !matches!(value, Value::Ascii(_)) && value.len() > MAX_LISTED_VALUES {
            return Some(format!("[{} {}s]", value.len(), value.type_name()));
        }

        Some(value.to_string())
    }

    /// Looks up the integer value of `tag` in `descriptions`
    ///
    /// The first entry of `descriptions` belongs to the value `base`. Values
    /// outside the table and `None` entries have no description.
    fn indexed_description(
        &self,
        tag: Tag,
        base: i64,
        descriptions: &[Option<&str>],
    ) -> Option<String> {
        let index = self.directory().integer(tag)?.checked_sub(base)?;
        let index = usize::try_from(index).ok()?;

        descriptions
            .get(index)
            .copied()
            .flatten()
            .map(ToString::to_string)
    }
}

/// Description of a single tag as shown to users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDescription {
    pub tag: Tag,
    /// Known name or the tag number in hex
    pub name: String,
    pub description: Option<String>,
}

/// Descriptor for directories without tag specific knowledge
pub struct GenericDescriptor<'a> {
    directory: &'a dyn Directory,
    ifd: Ifd,
}

impl<'a> GenericDescriptor<'a> {
    pub fn new(directory: &'a dyn Directory, ifd: Ifd) -> Self {
        Self { directory, ifd }
    }
}

impl TagDescriptor for GenericDescriptor<'_> {
    fn directory(&self) -> &dyn Directory {
        self.directory
    }

    fn tag_name(&self, tag: Tag) -> Option<&'static str> {
        mknote_common::exif::lookup_tag_name(TagIfd::new(tag, self.ifd))
    }
}

/// Selects the descriptor for a makernote directory
pub fn descriptor_for<'a>(
    kind: MakerNoteKind,
    directory: &'a dyn Directory,
) -> Box<dyn TagDescriptor + 'a> {
    match kind {
        MakerNoteKind::NikonType1 => Box::new(NikonType1Descriptor::new(directory)),
    }
}

/// Name of a tag, taking the makernote kind into account
pub fn lookup_tag_name(tagifd: TagIfd, makernote: Option<MakerNoteKind>) -> Option<&'static str> {
    match (tagifd.ifd, makernote) {
        (Ifd::MakerNote, Some(MakerNoteKind::NikonType1)) => NikonType1Tag::name(tagifd.tag),
        (Ifd::MakerNote, None) => None,
        _ => mknote_common::exif::lookup_tag_name(tagifd),
    }
}

/// Describes `tags` in the given order
pub fn describe_all(
    descriptor: &dyn TagDescriptor,
    tags: impl IntoIterator<Item = Tag>,
) -> Vec<TagDescription> {
    tags.into_iter()
        .map(|tag| TagDescription {
            tag,
            name: descriptor
                .tag_name(tag)
                .map(ToString::to_string)
                .unwrap_or_else(|| tag.to_string()),
            description: descriptor.description(tag),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use mknote_common::Rational;

    use super::*;
    use crate::directory::TagDirectory;

    #[test]
    fn default_renders_value() {
        let directory = TagDirectory::new(Ifd::Primary)
            .with(Tag(0x10F), Value::Ascii(String::from("NIKON")))
            .with(Tag(0x11A), Value::Rational(vec![Rational::new(300, 1)]));
        let descriptor = GenericDescriptor::new(&directory, Ifd::Primary);

        assert_eq!(descriptor.description(Tag(0x10F)).as_deref(), Some("NIKON"));
        assert_eq!(descriptor.description(Tag(0x11A)).as_deref(), Some("300/1"));
        assert_eq!(descriptor.description(Tag(0x110)), None);
        assert_eq!(descriptor.tag_name(Tag(0x10F)), Some("Make"));
    }

    #[test]
    fn default_summarizes_long_arrays() {
        let directory = TagDirectory::new(Ifd::MakerNote)
            .with(Tag(1), Value::Undefined(vec![0; 20]))
            .with(Tag(2), Value::Short(vec![7; 16]))
            .with(Tag(3), Value::Ascii("x".repeat(40)));
        let descriptor = GenericDescriptor::new(&directory, Ifd::MakerNote);

        assert_eq!(descriptor.description(Tag(1)).as_deref(), Some("[20 bytes]"));
        assert_eq!(
            descriptor.description(Tag(2)).as_deref(),
            Some("7 7 7 7 7 7 7 7 7 7 7 7 7 7 7 7")
        );
        assert_eq!(descriptor.description(Tag(3)), Some("x".repeat(40)));
    }

    #[test]
    fn indexed_lookup() {
        let table = [Some("zero"), None, Some("two")];
        let directory = TagDirectory::new(Ifd::MakerNote)
            .with(Tag(1), Value::Short(vec![0]))
            .with(Tag(2), Value::Short(vec![1]))
            .with(Tag(3), Value::Short(vec![3]))
            .with(Tag(4), Value::SShort(vec![-1]));
        let descriptor = GenericDescriptor::new(&directory, Ifd::MakerNote);

        assert_eq!(
            descriptor.indexed_description(Tag(1), 0, &table).as_deref(),
            Some("zero")
        );
        assert_eq!(
            descriptor.indexed_description(Tag(3), 1, &table).as_deref(),
            Some("two")
        );
        assert_eq!(descriptor.indexed_description(Tag(2), 0, &table), None);
        assert_eq!(descriptor.indexed_description(Tag(3), 0, &table), None);
        assert_eq!(descriptor.indexed_description(Tag(4), 0, &table), None);
        assert_eq!(descriptor.indexed_description(Tag(1), 1, &table), None);
        assert_eq!(descriptor.indexed_description(Tag(9), 0, &table), None);
    }

    #[test]
    fn tag_names_depend_on_makernote() {
        let quality = TagIfd::new(Tag(3), Ifd::MakerNote);
        assert_eq!(
            lookup_tag_name(quality, Some(MakerNoteKind::NikonType1)),
            Some("Quality")
        );
        assert_eq!(lookup_tag_name(quality, None), None);
        assert_eq!(
            lookup_tag_name(TagIfd::new(Tag(0x110), Ifd::Primary), None),
            Some("Model")
        );
    }
}
