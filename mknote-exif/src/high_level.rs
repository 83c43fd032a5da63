use std::cell::RefCell;

use mknote_common::exif::Ifd;
use mknote_common::field;

use crate::descriptor::{self, TagDescription};
use crate::directory::TagDirectory;
use crate::error::Result;
use crate::internal::*;

#[derive(Debug)]
pub struct Exif {
    decoder: RefCell<ExifRaw>,
}

impl Exif {
    pub fn new(data: Vec<u8>) -> Result<Self> {
        let mut decoder = ExifRaw::new(data);
        decoder.decode()?;

        Ok(Self {
            decoder: RefCell::new(decoder),
        })
    }

    /// Camera manufacturer
    pub fn make(&self) -> Option<String> {
        self.decoder.borrow_mut().lookup_string(field::Make).ok()?
    }

    /// Camera model
    pub fn model(&self) -> Option<String> {
        self.decoder.borrow_mut().lookup_string(field::Model).ok()?
    }

    /// Kind of the makernote if it is supported
    pub fn makernote_kind(&self) -> Option<MakerNoteKind> {
        self.decoder.borrow().makernote
    }

    /// All decodable values of the makernote
    pub fn makernote_directory(&self) -> Option<TagDirectory> {
        self.makernote_kind()?;
        self.decoder.borrow_mut().directory(Ifd::MakerNote).ok()
    }

    /// Human readable descriptions of all makernote tags
    ///
    /// Empty if there is no supported makernote.
    pub fn makernote_descriptions(&self) -> Vec<TagDescription> {
        let Some(kind) = self.makernote_kind() else {
            return Vec::new();
        };

        let Some(directory) = self.makernote_directory() else {
            return Vec::new();
        };

        let descriptor = descriptor::descriptor_for(kind, &directory);
        descriptor::describe_all(descriptor.as_ref(), directory.tags())
    }

    pub fn debug_dump(&self) -> String {
        self.decoder.borrow_mut().debug_dump()
    }
}
