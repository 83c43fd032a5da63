//! Decoded tag values of a single IFD

use std::collections::BTreeMap;
use std::fmt;

use mknote_common::exif::{Ifd, Tag};
use mknote_common::Rational;

/// Value of an IFD entry, converted to native byte order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Byte(Vec<u8>),
    /// Text with all NULL bytes removed
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<Rational>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl Value {
    /// Number of stored elements, bytes for [`Value::Ascii`]
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(x) | Self::Undefined(x) => x.len(),
            Self::Ascii(x) => x.len(),
            Self::Short(x) => x.len(),
            Self::Long(x) => x.len(),
            Self::Rational(x) | Self::SRational(x) => x.len(),
            Self::SByte(x) => x.len(),
            Self::SShort(x) => x.len(),
            Self::SLong(x) => x.len(),
            Self::Float(x) => x.len(),
            Self::Double(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of a single element's type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Byte(_) | Self::Undefined(_) => "byte",
            Self::Ascii(_) => "char",
            Self::Short(_) => "short",
            Self::Long(_) => "long",
            Self::Rational(_) => "rational",
            Self::SByte(_) => "signed byte",
            Self::SShort(_) => "signed short",
            Self::SLong(_) => "signed long",
            Self::SRational(_) => "signed rational",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
        }
    }

    /// Value as integer
    ///
    /// Works for entries with a single integer or rational, and for text
    /// that contains a number.
    ///
    /// ```
    /// # use mknote_exif::Value;
    /// # use mknote_common::Rational;
    /// assert_eq!(Value::Short(vec![3]).integer(), Some(3));
    /// assert_eq!(Value::Short(vec![3, 4]).integer(), None);
    /// assert_eq!(Value::Rational(vec![Rational::new(7, 2)]).integer(), Some(3));
    /// assert_eq!(Value::Ascii(String::from(" 12 ")).integer(), Some(12));
    /// ```
    pub fn integer(&self) -> Option<i64> {
        match self {
            Self::Byte(x) | Self::Undefined(x) => single(x).map(i64::from),
            Self::SByte(x) => single(x).map(i64::from),
            Self::Short(x) => single(x).map(i64::from),
            Self::SShort(x) => single(x).map(i64::from),
            Self::Long(x) => single(x).map(i64::from),
            Self::SLong(x) => single(x).map(i64::from),
            Self::Rational(x) | Self::SRational(x) => single(x)
                .filter(|x| x.denominator != 0)
                .map(|x| x.integer_value()),
            Self::Ascii(x) => x
                .trim_matches(|c: char| c == '\0' || c.is_whitespace())
                .parse()
                .ok(),
            Self::Float(_) | Self::Double(_) => None,
        }
    }

    /// Value as rational, integers are returned as `n/1`
    pub fn rational(&self) -> Option<Rational> {
        match self {
            Self::Rational(x) | Self::SRational(x) => single(x),
            Self::Ascii(_) | Self::Float(_) | Self::Double(_) => None,
            _ => self.integer().map(|x| Rational::new(x, 1)),
        }
    }
}

fn single<T: Copy>(values: &[T]) -> Option<T> {
    match values {
        [value] => Some(*value),
        _ => None,
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{value}")?;
    }

    Ok(())
}

/// Text as is, other values separated by spaces
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascii(x) => f.write_str(x),
            Self::Byte(x) | Self::Undefined(x) => join(f, x),
            Self::SByte(x) => join(f, x),
            Self::Short(x) => join(f, x),
            Self::SShort(x) => join(f, x),
            Self::Long(x) => join(f, x),
            Self::SLong(x) => join(f, x),
            Self::Rational(x) | Self::SRational(x) => join(f, x),
            Self::Float(x) => join(f, x),
            Self::Double(x) => join(f, x),
        }
    }
}

/// Read access to tag values
///
/// Missing tags and values that can't be converted are `None`. This is what
/// descriptors consume.
pub trait Directory {
    fn value(&self, tag: Tag) -> Option<&Value>;

    fn contains(&self, tag: Tag) -> bool {
        self.value(tag).is_some()
    }

    fn integer(&self, tag: Tag) -> Option<i64> {
        self.value(tag)?.integer()
    }

    fn rational(&self, tag: Tag) -> Option<Rational> {
        self.value(tag)?.rational()
    }

    fn string(&self, tag: Tag) -> Option<String> {
        self.value(tag).map(ToString::to_string)
    }
}

/// Values of all entries in one IFD
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagDirectory {
    ifd: Ifd,
    values: BTreeMap<Tag, Value>,
}

impl TagDirectory {
    pub fn new(ifd: Ifd) -> Self {
        Self {
            ifd,
            values: BTreeMap::new(),
        }
    }

    pub fn ifd(&self) -> Ifd {
        self.ifd
    }

    /// Sets the value for `tag`, replacing an existing one
    pub fn set(&mut self, tag: Tag, value: Value) {
        self.values.insert(tag, value);
    }

    /// Builder variant of [`Self::set`]
    pub fn with(mut self, tag: Tag, value: Value) -> Self {
        self.set(tag, value);
        self
    }

    /// Tags in ascending order
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Directory for TagDirectory {
    fn value(&self, tag: Tag) -> Option<&Value> {
        self.values.get(&tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_conversions() {
        assert_eq!(Value::Byte(vec![200]).integer(), Some(200));
        assert_eq!(Value::SByte(vec![-2]).integer(), Some(-2));
        assert_eq!(Value::Long(vec![]).integer(), None);
        assert_eq!(Value::Rational(vec![Rational::new(1, 0)]).integer(), None);
        assert_eq!(Value::Ascii(String::from("12\0")).integer(), Some(12));
        assert_eq!(Value::Ascii(String::from("twelve")).integer(), None);
        assert_eq!(Value::Double(vec![3.0]).integer(), None);
    }

    #[test]
    fn rational_conversions() {
        assert_eq!(
            Value::SRational(vec![Rational::new(-1, 3)]).rational(),
            Some(Rational::new(-1, 3))
        );
        assert_eq!(Value::Short(vec![2]).rational(), Some(Rational::new(2, 1)));
        assert_eq!(Value::Ascii(String::from("2")).rational(), None);
        assert_eq!(
            Value::Rational(vec![Rational::new(1, 2), Rational::new(1, 3)]).rational(),
            None
        );
    }

    #[test]
    fn display() {
        assert_eq!(Value::Short(vec![1, 2, 3]).to_string(), "1 2 3");
        assert_eq!(
            Value::Rational(vec![Rational::new(1, 2), Rational::new(3, 4)]).to_string(),
            "1/2 3/4"
        );
        assert_eq!(Value::Ascii(String::from("E950")).to_string(), "E950");
        assert_eq!(Value::Float(vec![1.5, -2.0]).to_string(), "1.5 -2");
        assert_eq!(Value::Double(vec![0.25]).to_string(), "0.25");
    }

    #[test]
    fn directory_access() {
        let directory = TagDirectory::new(Ifd::MakerNote)
            .with(Tag(3), Value::Short(vec![2]))
            .with(Tag(8), Value::Rational(vec![Rational::new(1, 0)]))
            .with(Tag(0xF00), Value::Ascii(String::from("E950")));

        assert_eq!(directory.integer(Tag(3)), Some(2));
        assert_eq!(directory.rational(Tag(8)), Some(Rational::new(1, 0)));
        assert_eq!(directory.integer(Tag(4)), None);
        assert!(!directory.contains(Tag(4)));
        assert_eq!(directory.string(Tag(0xF00)).as_deref(), Some("E950"));
        assert_eq!(directory.string(Tag(8)).as_deref(), Some("1/0"));
        assert_eq!(directory.string(Tag(4)), None);
        assert_eq!(
            directory.tags().collect::<Vec<_>>(),
            vec![Tag(3), Tag(8), Tag(0xF00)]
        );
    }
}
