use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    core::value::CellValue,
    error::{CsvError, Result},
};

/// Primitive kind of a bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Bool,
    Int,
    UInt,
    Float,
    Char,
    Text,
    /// Declared on the record but never mapped to a column.
    Other,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Bool => "bool",
            FieldKind::Int => "signed integer",
            FieldKind::UInt => "unsigned integer",
            FieldKind::Float => "float",
            FieldKind::Char => "char",
            FieldKind::Text => "string",
            FieldKind::Other => "non-primitive value",
        };
        f.write_str(name)
    }
}

/// Types a record field may have to take part in column binding.
///
/// Conversion back from a cell accepts the typed variant written by
/// [`Primitive::to_cell`] or text, which is parsed with the type's standard
/// textual rules. An empty cell yields the type's default value.
pub trait Primitive: Sized + Default {
    const KIND: FieldKind;

    fn to_cell(&self) -> CellValue;

    fn from_cell(value: &CellValue) -> Result<Self>;
}

fn format_error(value: &CellValue, kind: FieldKind) -> CsvError {
    CsvError::Format {
        value: value.to_string(),
        kind,
    }
}

macro_rules! impl_primitive_int {
    ($kind:expr; $($ty:ty),*) => {
        $(impl Primitive for $ty {
            const KIND: FieldKind = $kind;

            fn to_cell(&self) -> CellValue {
                CellValue::from(*self)
            }

            fn from_cell(value: &CellValue) -> Result<Self> {
                let converted = match value {
                    CellValue::Empty => Some(<$ty>::default()),
                    CellValue::Int(number) => <$ty>::try_from(*number).ok(),
                    CellValue::UInt(number) => <$ty>::try_from(*number).ok(),
                    CellValue::Text(text) => text.trim().parse::<$ty>().ok(),
                    _ => None,
                };
                converted.ok_or_else(|| format_error(value, Self::KIND))
            }
        })*
    };
}

impl_primitive_int!(FieldKind::Int; i8, i16, i32, i64, isize);
impl_primitive_int!(FieldKind::UInt; u8, u16, u32, u64, usize);

macro_rules! impl_primitive_float {
    ($($ty:ty),*) => {
        $(impl Primitive for $ty {
            const KIND: FieldKind = FieldKind::Float;

            fn to_cell(&self) -> CellValue {
                CellValue::from(*self)
            }

            fn from_cell(value: &CellValue) -> Result<Self> {
                let converted = match value {
                    CellValue::Empty => Some(<$ty>::default()),
                    CellValue::Float(number) => Some(*number as $ty),
                    CellValue::Text(text) => text.trim().parse::<$ty>().ok(),
                    _ => None,
                };
                converted.ok_or_else(|| format_error(value, Self::KIND))
            }
        })*
    };
}

impl_primitive_float!(f32, f64);

impl Primitive for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn to_cell(&self) -> CellValue {
        CellValue::Bool(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Self> {
        match value {
            CellValue::Empty => Ok(false),
            CellValue::Bool(flag) => Ok(*flag),
            CellValue::Text(text) if text.trim().eq_ignore_ascii_case("true") => Ok(true),
            CellValue::Text(text) if text.trim().eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(format_error(value, Self::KIND)),
        }
    }
}

impl Primitive for char {
    const KIND: FieldKind = FieldKind::Char;

    fn to_cell(&self) -> CellValue {
        CellValue::Char(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Self> {
        match value {
            CellValue::Empty => Ok(char::default()),
            CellValue::Char(c) => Ok(*c),
            CellValue::Text(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(format_error(value, Self::KIND)),
                }
            }
            _ => Err(format_error(value, Self::KIND)),
        }
    }
}

impl Primitive for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_cell(&self) -> CellValue {
        CellValue::Text(self.clone())
    }

    fn from_cell(value: &CellValue) -> Result<Self> {
        match value {
            CellValue::Text(text) => Ok(text.clone()),
            other => Ok(other.to_string()),
        }
    }
}

type Getter<T> = Box<dyn Fn(&T) -> CellValue>;
type Setter<T> = Box<dyn Fn(&mut T, &CellValue) -> Result<()>>;

/// Descriptor of one field of a record type: its name, primitive kind and
/// accessors.
///
/// ```
/// use csv_grid::binding::{Field, FieldKind};
///
/// #[derive(Default)]
/// struct Car {
///     year: u16,
///     tags: Vec<String>,
/// }
///
/// let year = Field::new("year", |car: &Car| car.year, |car: &mut Car, year| car.year = year);
/// let tags = Field::<Car>::opaque("tags");
///
/// assert_eq!(year.kind(), FieldKind::UInt);
/// assert!(!tags.is_primitive());
/// ```
pub struct Field<T> {
    name: &'static str,
    kind: FieldKind,
    getter: Option<Getter<T>>,
    setter: Option<Setter<T>>,
}

impl<T> Field<T> {
    /// A primitive field bound through a getter and a setter.
    pub fn new<V, G, S>(name: &'static str, get: G, set: S) -> Self
    where
        V: Primitive,
        G: Fn(&T) -> V + 'static,
        S: Fn(&mut T, V) + 'static,
    {
        Self {
            name,
            kind: V::KIND,
            getter: Some(Box::new(move |record: &T| get(record).to_cell())),
            setter: Some(Box::new(move |record: &mut T, value: &CellValue| {
                set(record, V::from_cell(value)?);
                Ok(())
            })),
        }
    }

    /// A field whose type is not primitive. It is known to the record but
    /// never mapped to a column.
    pub fn opaque(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Other,
            getter: None,
            setter: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The primitive kind, or [`FieldKind::Other`] for opaque fields.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the field can be bound to a column.
    pub fn is_primitive(&self) -> bool {
        self.kind != FieldKind::Other
    }

    pub(crate) fn read(&self, record: &T) -> CellValue {
        self.getter
            .as_ref()
            .map_or(CellValue::Empty, |get| get(record))
    }

    pub(crate) fn write(&self, record: &mut T, value: &CellValue) -> Result<()> {
        match &self.setter {
            Some(set) => set(record, value),
            None => Ok(()),
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A record type that can be bound to document rows.
///
/// `fields` lists the record's fields once; the binder sorts them by name to
/// fix the column order.
pub trait Record: Default {
    fn fields() -> Vec<Field<Self>>;
}
