#![doc = include_str!("../README.md")]

pub mod descriptor;
pub mod directory;
pub mod error;
mod high_level;
pub mod internal;

pub use descriptor::{TagDescription, TagDescriptor};
pub use directory::{Directory, TagDirectory, Value};
pub use high_level::Exif;
pub use internal::MakerNoteKind;
