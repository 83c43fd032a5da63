//! Locate metadata in JPEG files
//!
//! Only the segments before the start of scan are inspected, which is where
//! Exif data is stored.

use mknote_common::math::{MathError, SafeAdd};

pub const EXIF_IDENTIFIER_STRING: &[u8] = b"Exif\0\0";

const SOI: &[u8] = &[0xFF, 0xD8];
pub const MARKER_START: u8 = 0xFF;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Data does not start with a JPEG start of image marker")]
    NotJpeg,
    #[error("Expected marker at byte {0}")]
    MarkerExpected(usize),
    #[error("Segment length {0} is invalid")]
    InvalidLength(u16),
    #[error("Unexpected end of data")]
    UnexpectedEof,
    #[error("Math: {0}")]
    Math(#[from] MathError),
}

#[derive(Clone, Debug)]
pub struct Segment<'a> {
    marker: Marker,
    pos: usize,
    data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Position of the marker
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Payload without marker and length field
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

pub struct Jpeg<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Jpeg<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let segments = Self::find_segments(data)?;
        Ok(Self { segments })
    }

    pub fn is_filetype(data: &[u8]) -> bool {
        data.starts_with(SOI)
    }

    /// List all segments in their order of appearance
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// List all segments with the given marker
    pub fn segments_marker(&self, marker: Marker) -> impl Iterator<Item = &Segment<'a>> {
        self.segments.iter().filter(move |x| x.marker == marker)
    }

    pub fn exif(&self) -> impl Iterator<Item = &Segment<'a>> {
        self.segments_marker(Marker::APP1)
            .filter(|x| x.data().starts_with(EXIF_IDENTIFIER_STRING))
    }

    /// Exif data without the identifier string
    pub fn exif_data(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.exif()
            .filter_map(|x| x.data().get(EXIF_IDENTIFIER_STRING.len()..))
    }

    fn find_segments(data: &'a [u8]) -> Result<Vec<Segment<'a>>> {
        if !Self::is_filetype(data) {
            return Err(Error::NotJpeg);
        }

        let mut segments = Vec::new();
        let mut pos = SOI.len();

        loop {
            let [start, marker] = read_array(data, pos)?;
            if start != MARKER_START {
                return Err(Error::MarkerExpected(pos));
            }

            let marker = Marker::from(marker);

            if marker == Marker::EOI {
                break;
            }

            if marker.is_standalone() {
                segments.push(Segment {
                    marker,
                    pos,
                    data: &[],
                });
                pos = pos.safe_add(2)?;
                continue;
            }

            let len = u16::from_be_bytes(read_array(data, pos.safe_add(2)?)?);
            if len < 2 {
                return Err(Error::InvalidLength(len));
            }

            let data_start = pos.safe_add(4)?;
            let data_end = pos.safe_add(2)?.safe_add(usize::from(len))?;
            let segment_data = data.get(data_start..data_end).ok_or(Error::UnexpectedEof)?;

            tracing::debug!("Found segment {marker:?} at byte {pos} with length {len}");

            segments.push(Segment {
                marker,
                pos,
                data: segment_data,
            });

            if marker == Marker::SOS {
                break;
            }

            pos = data_end;
        }

        Ok(segments)
    }
}

fn read_array<const N: usize>(data: &[u8], pos: usize) -> Result<[u8; N]> {
    let end = pos.safe_add(N)?;
    data.get(pos..end)
        .and_then(|x| x.try_into().ok())
        .ok_or(Error::UnexpectedEof)
}

mknote_common::utils::convertible_enum!(
    #[repr(u8)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub enum Marker {
        SOF0 = 0xC0,
        SOF1 = 0xC1,
        SOF2 = 0xC2,
        /// Define Huffman table
        DHT = 0xC4,
        RST0 = 0xD0,
        RST1 = 0xD1,
        RST2 = 0xD2,
        RST3 = 0xD3,
        RST4 = 0xD4,
        RST5 = 0xD5,
        RST6 = 0xD6,
        RST7 = 0xD7,
        /// Start of image
        SOI = 0xD8,
        /// End of image
        EOI = 0xD9,
        /// Start of scan
        SOS = 0xDA,
        DQT = 0xDB,
        APP0 = 0xE0,
        /// Exif, XMP
        APP1 = 0xE1,
        /// ICC color profile
        APP2 = 0xE2,
        /// Comment
        COM = 0xFE,
    }
);

impl Marker {
    /// Markers that are not followed by a length field
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            Self::RST0
                | Self::RST1
                | Self::RST2
                | Self::RST3
                | Self::RST4
                | Self::RST5
                | Self::RST6
                | Self::RST7
                | Self::SOI
                | Self::Unknown(0x01)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(exif: &[u8]) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];

        // APP0 with 3 bytes payload
        data.extend_from_slice(&[0xFF, 0xE0, 0, 5, b'J', b'F', 0]);

        let len = u16::try_from(exif.len() + EXIF_IDENTIFIER_STRING.len() + 2).unwrap();
        data.extend_from_slice(&[0xFF, 0xE1]);
        data.extend_from_slice(&len.to_be_bytes());
        data.extend_from_slice(EXIF_IDENTIFIER_STRING);
        data.extend_from_slice(exif);

        // SOS with 1 byte payload, followed by scan data
        data.extend_from_slice(&[0xFF, 0xDA, 0, 3, 0, 0x12, 0x34, 0xFF, 0xD9]);
        data
    }

    #[test]
    fn finds_exif() {
        let data = jpeg(b"II*\0");
        let jpeg = Jpeg::new(&data).unwrap();

        let markers = jpeg.segments().iter().map(|x| x.marker()).collect::<Vec<_>>();
        assert_eq!(markers, vec![Marker::APP0, Marker::APP1, Marker::SOS]);

        let exif = jpeg.exif_data().collect::<Vec<_>>();
        assert_eq!(exif, vec![b"II*\0".as_slice()]);
    }

    #[test]
    fn rejects_other_data() {
        assert!(matches!(Jpeg::new(b"II*\0"), Err(Error::NotJpeg)));
    }

    #[test]
    fn truncated() {
        let data = jpeg(b"II*\0");
        let truncated = &data[..12];
        assert!(matches!(Jpeg::new(truncated), Err(Error::UnexpectedEof)));
    }
}
