use mknote_common::math::MathError;

use crate::internal::{Ifd, Type};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown byte order {0:?}")]
    UnkownByteOrder([u8; 2]),
    #[error("Magic bytes should be 42, found {0}")]
    MagicBytesWrong(u16),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Math: {0}")]
    Math(#[from] MathError),
    #[error("IFD {0:?} not found")]
    IfdNotFound(Ifd),
    #[error("Offset exceeds supported range")]
    OffsetTooLarge,
    #[error("Data ends inside lookup")]
    LookupEof,
    #[error("Data ends before byte order")]
    ByteOrderEof,
    #[error("Data ends before magic bytes")]
    MagicBytesEof,
    #[error("Data ends inside IFD entry")]
    EntryEof,
    #[error("Data ends before number of IFD entries")]
    IfdNumEntriesEof,
    #[error("Data size of entry too large")]
    DataSizeTooLarge,
    #[error("Wrong type: expected {expected:?}, found {actual:?}")]
    WrongType {
        expected: (u32, Type),
        actual: (u32, Type),
    },
    #[error("Unsupported data type {0:?}")]
    UnsupportedType(Type),
    #[error("Value stored inline where an offset was expected")]
    ValueInsteadOfOffset,
}

pub(crate) trait ResultExt<T> {
    fn e(self, err: Error) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E> {
    fn e(self, err: Error) -> Result<T> {
        self.map_err(|_| err)
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn e(self, err: Error) -> Result<T> {
        match self {
            Some(v) => Ok(v),
            None => Err(err),
        }
    }
}
