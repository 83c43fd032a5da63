#![allow(dead_code)]

pub use mknote_exif::internal::*;

/// IFD entry with its data in file byte order
pub struct Entry {
    pub tag: u16,
    pub data_type: Type,
    pub count: u32,
    pub data: Vec<u8>,
}

/// Assembles Exif data for tests
pub struct ExifWriter {
    pub data: Vec<u8>,
    pub big_endian: bool,
    /// Position of `data` within the complete Exif data
    base: u32,
}

impl ExifWriter {
    /// Starts with a header that points to an IFD at byte 8
    pub fn new(big_endian: bool) -> Self {
        let mut writer = Self::nested(big_endian, 0);

        writer.write_bytes(if big_endian { b"MM" } else { b"II" });
        writer.write_bytes(&writer.u16(42));
        writer.write_bytes(&writer.u32(8));

        writer
    }

    /// Writer for a block that will be placed at `base`
    pub fn nested(big_endian: bool, base: u32) -> Self {
        Self {
            data: Vec::new(),
            big_endian,
            base,
        }
    }

    pub fn position(&self) -> u32 {
        self.base + u32::try_from(self.data.len()).unwrap()
    }

    pub fn u16(&self, value: u16) -> [u8; 2] {
        if self.big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        }
    }

    pub fn u32(&self, value: u32) -> [u8; 4] {
        if self.big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn short(&self, tag: u16, value: u16) -> Entry {
        Entry {
            tag,
            data_type: Type::Short,
            count: 1,
            data: self.u16(value).to_vec(),
        }
    }

    pub fn long(&self, tag: u16, value: u32) -> Entry {
        Entry {
            tag,
            data_type: Type::Long,
            count: 1,
            data: self.u32(value).to_vec(),
        }
    }

    pub fn ascii(&self, tag: u16, value: &str) -> Entry {
        let mut data = value.as_bytes().to_vec();
        data.push(0);

        Entry {
            tag,
            data_type: Type::Ascii,
            count: u32::try_from(data.len()).unwrap(),
            data,
        }
    }

    pub fn rational(&self, tag: u16, numerator: u32, denominator: u32) -> Entry {
        let mut data = self.u32(numerator).to_vec();
        data.extend_from_slice(&self.u32(denominator));

        Entry {
            tag,
            data_type: Type::Rational,
            count: 1,
            data,
        }
    }

    pub fn float(&self, tag: u16, value: f32) -> Entry {
        Entry {
            tag,
            data_type: Type::Float,
            count: 1,
            data: self.u32(value.to_bits()).to_vec(),
        }
    }

    pub fn double(&self, tag: u16, value: f64) -> Entry {
        let data = if self.big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };

        Entry {
            tag,
            data_type: Type::Double,
            count: 1,
            data: data.to_vec(),
        }
    }

    pub fn undefined(&self, tag: u16, value: &[u8]) -> Entry {
        Entry {
            tag,
            data_type: Type::Undefined,
            count: u32::try_from(value.len()).unwrap(),
            data: value.to_vec(),
        }
    }

    /// Bytes needed by [`Self::write_ifd`] for `entries`
    pub fn ifd_len(entries: &[Entry], next: bool) -> u32 {
        let external: usize = entries
            .iter()
            .filter(|x| x.data.len() > 4)
            .map(|x| padded_len(&x.data))
            .sum();

        u32::try_from(Self::entries_len(entries.len(), next) + external).unwrap()
    }

    fn entries_len(n_entries: usize, next: bool) -> usize {
        2 + 12 * n_entries + if next { 4 } else { 0 }
    }

    /// Writes an IFD followed by the data that does not fit into the entries
    ///
    /// Returns the position of the IFD.
    pub fn write_ifd(&mut self, entries: &[Entry], next: bool) -> u32 {
        let start = self.position();
        let mut data_position =
            start + u32::try_from(Self::entries_len(entries.len(), next)).unwrap();

        self.write_bytes(&self.u16(u16::try_from(entries.len()).unwrap()));

        for entry in entries {
            self.write_bytes(&self.u16(entry.tag));
            self.write_bytes(&self.u16(entry.data_type.u16()));
            self.write_bytes(&self.u32(entry.count));

            if entry.data.len() <= 4 {
                let mut value = entry.data.clone();
                value.resize(4, 0);
                self.write_bytes(&value);
            } else {
                self.write_bytes(&self.u32(data_position));
                data_position += u32::try_from(padded_len(&entry.data)).unwrap();
            }
        }

        if next {
            self.write_bytes(&[0; 4]);
        }

        for entry in entries.iter().filter(|x| x.data.len() > 4) {
            self.write_bytes(&entry.data);
            if entry.data.len() % 2 == 1 {
                self.write_bytes(&[0]);
            }
        }

        assert_eq!(self.position(), data_position);

        start
    }
}

fn padded_len(data: &[u8]) -> usize {
    data.len() + data.len() % 2
}

/// Exif data of a Nikon E950 with the makernote written by `makernote`
///
/// The makernote writer is positioned where the makernote will end up, such
/// that offsets inside of it can be computed from [`ExifWriter::position`].
pub fn exif_with_makernote(big_endian: bool, makernote: impl FnOnce(&mut ExifWriter)) -> Vec<u8> {
    let mut writer = ExifWriter::new(big_endian);

    let mut primary = vec![
        writer.ascii(0x10F, "NIKON"),
        writer.ascii(0x110, "E950"),
        writer.long(0x8769, 0),
    ];
    let exif_ifd = writer.position() + ExifWriter::ifd_len(&primary, true);
    primary[2] = writer.long(0x8769, exif_ifd);
    writer.write_ifd(&primary, true);

    let makernote_position =
        exif_ifd + u32::try_from(ExifWriter::entries_len(1, true)).unwrap();
    let mut note = ExifWriter::nested(big_endian, makernote_position);
    makernote(&mut note);

    let exif = [writer.undefined(0x927C, &note.data)];
    assert_eq!(writer.write_ifd(&exif, true), exif_ifd);

    writer.data
}

/// Makernote of type 1 with settings as written by an E950
pub fn nikon_type1_makernote(note: &mut ExifWriter) {
    note.write_bytes(b"Nikon\0\x01\0");

    let entries = [
        note.undefined(0x0002, &[0, 1, 0, 0]),
        // SXGA Basic
        note.short(0x0003, 4),
        // Color
        note.short(0x0004, 1),
        // Normal
        note.short(0x0005, 0),
        // Unset slot in table
        note.short(0x0006, 1),
        // Daylight
        note.short(0x0007, 2),
        // Infinite
        note.rational(0x0008, 1, 0),
        // No digital zoom
        note.rational(0x000A, 0, 100),
        // Outside of table
        note.short(0x000B, 9),
    ];

    note.write_ifd(&entries, true);
}

/// Exif data with the E950 makernote
pub fn nikon_type1_exif(big_endian: bool) -> Vec<u8> {
    exif_with_makernote(big_endian, nikon_type1_makernote)
}
