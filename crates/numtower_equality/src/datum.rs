//! The general value model compared by the equality predicates.
//!
//! Compound values are reference-counted cells with interior mutability, so
//! they have identity (for `eq?`) and can form cycles through `set-car!`,
//! `set-cdr!` or `vector-set!`.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use numtower_foundation::{Error, Number, Result};

use crate::hooks::ExtendedObject;

/// A Scheme value.
#[derive(Clone)]
pub enum Datum {
    /// The empty list.
    Nil,
    /// `#t` or `#f`.
    Bool(bool),
    /// A character.
    Char(char),
    /// A symbol; an interning host shares one allocation per name.
    Symbol(Rc<str>),
    /// A mutable string.
    String(Rc<RefCell<String>>),
    /// A mutable pair.
    Pair(Rc<Pair>),
    /// A mutable vector.
    Vector(Rc<RefCell<Vec<Datum>>>),
    /// A box holding one or more values.
    Box(Rc<RefCell<Vec<Datum>>>),
    /// A record instance.
    Record(Rc<Record>),
    /// An instance of the host object system.
    Instance(Rc<Instance>),
    /// A host-defined type with its own equality.
    Extended(Rc<dyn ExtendedObject>),
    /// A number.
    Number(Number),
}

/// A cons cell.
pub struct Pair {
    car: RefCell<Datum>,
    cdr: RefCell<Datum>,
}

/// Releases chains of uniquely owned nodes without recursing per link.
impl Drop for Pair {
    fn drop(&mut self) {
        let mut pending = vec![
            std::mem::replace(self.car.get_mut(), Datum::Nil),
            std::mem::replace(self.cdr.get_mut(), Datum::Nil),
        ];
        while let Some(datum) = pending.pop() {
            match datum {
                Datum::Pair(pair) => {
                    if let Ok(pair) = Rc::try_unwrap(pair) {
                        pending.push(pair.car.replace(Datum::Nil));
                        pending.push(pair.cdr.replace(Datum::Nil));
                    }
                }
                Datum::Vector(items) | Datum::Box(items) => {
                    if let Ok(items) = Rc::try_unwrap(items) {
                        pending.extend(items.into_inner());
                    }
                }
                Datum::Record(record) => {
                    if let Ok(record) = Rc::try_unwrap(record) {
                        pending.extend(record.fields.take());
                    }
                }
                _ => {}
            }
        }
    }
}

impl Pair {
    /// The first element.
    #[must_use]
    pub fn car(&self) -> Datum {
        self.car.borrow().clone()
    }

    /// The rest.
    #[must_use]
    pub fn cdr(&self) -> Datum {
        self.cdr.borrow().clone()
    }

    /// `set-car!`.
    pub fn set_car(&self, value: Datum) {
        *self.car.borrow_mut() = value;
    }

    /// `set-cdr!`.
    pub fn set_cdr(&self, value: Datum) {
        *self.cdr.borrow_mut() = value;
    }
}

/// A record type: a name and an ordered list of field names.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordType {
    name: Rc<str>,
    fields: Vec<Rc<str>>,
}

impl RecordType {
    /// Creates a record type.
    #[must_use]
    pub fn new(name: &str, fields: &[&str]) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            fields: fields.iter().map(|&f| f.into()).collect(),
        })
    }

    /// The type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field names, in order.
    #[must_use]
    pub fn fields(&self) -> &[Rc<str>] {
        &self.fields
    }
}

/// An instance of a [`RecordType`].
pub struct Record {
    rtype: Rc<RecordType>,
    fields: RefCell<Vec<Datum>>,
}

impl Record {
    /// The record's type.
    #[must_use]
    pub fn record_type(&self) -> &Rc<RecordType> {
        &self.rtype
    }

    /// The field values, in the type's field order.
    #[must_use]
    pub fn fields(&self) -> Ref<'_, Vec<Datum>> {
        self.fields.borrow()
    }

    /// Sets the field at `index`; returns `false` if there is no such field.
    pub fn set_field(&self, index: usize, value: Datum) -> bool {
        match self.fields.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// An instance of the host object system, compared through
/// [`ObjectHooks`](crate::hooks::ObjectHooks).
pub struct Instance {
    class: Rc<str>,
    slots: RefCell<Vec<Datum>>,
}

impl Instance {
    /// The class name.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The slot values.
    #[must_use]
    pub fn slots(&self) -> Ref<'_, Vec<Datum>> {
        self.slots.borrow()
    }
}

// =============================================================================
// Construction
// =============================================================================

impl Datum {
    /// A fresh pair.
    #[must_use]
    pub fn cons(car: Datum, cdr: Datum) -> Self {
        Self::Pair(Rc::new(Pair {
            car: RefCell::new(car),
            cdr: RefCell::new(cdr),
        }))
    }

    /// A proper list of fresh pairs.
    pub fn list(items: impl IntoIterator<Item = Datum>) -> Self {
        let items: Vec<Datum> = items.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Self::Nil, |tail, head| Self::cons(head, tail))
    }

    /// A symbol with a fresh name allocation.
    #[must_use]
    pub fn symbol(name: &str) -> Self {
        Self::Symbol(name.into())
    }

    /// A fresh mutable string.
    #[must_use]
    pub fn string(text: &str) -> Self {
        Self::String(Rc::new(RefCell::new(text.to_string())))
    }

    /// A fresh vector.
    pub fn vector(items: impl IntoIterator<Item = Datum>) -> Self {
        Self::Vector(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// A fresh box holding `values`.
    pub fn boxed(values: impl IntoIterator<Item = Datum>) -> Self {
        Self::Box(Rc::new(RefCell::new(values.into_iter().collect())))
    }

    /// A record of type `rtype`.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` if the number of values differs from the
    /// number of fields.
    pub fn record(rtype: &Rc<RecordType>, values: Vec<Datum>) -> Result<Self> {
        if values.len() != rtype.fields.len() {
            return Err(Error::arity_mismatch(
                format!("{} fields for {}", rtype.fields.len(), rtype.name),
                values.len(),
            ));
        }
        Ok(Self::Record(Rc::new(Record {
            rtype: Rc::clone(rtype),
            fields: RefCell::new(values),
        })))
    }

    /// An object-system instance of `class`.
    #[must_use]
    pub fn instance(class: &str, slots: Vec<Datum>) -> Self {
        Self::Instance(Rc::new(Instance {
            class: class.into(),
            slots: RefCell::new(slots),
        }))
    }

    /// Wraps a host-defined value.
    pub fn extended(object: impl ExtendedObject + 'static) -> Self {
        Self::Extended(Rc::new(object))
    }
}

impl From<Number> for Datum {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Datum {
    fn from(i: i64) -> Self {
        Self::Number(Number::from(i))
    }
}

impl From<f64> for Datum {
    fn from(d: f64) -> Self {
        Self::Number(Number::from(d))
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<char> for Datum {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

// =============================================================================
// Inspection
// =============================================================================

impl Datum {
    /// Short name of this value's type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Nil => "null",
            Self::Bool(_) => "boolean",
            Self::Char(_) => "char",
            Self::Symbol(_) => "symbol",
            Self::String(_) => "string",
            Self::Pair(_) => "pair",
            Self::Vector(_) => "vector",
            Self::Box(_) => "box",
            Self::Record(r) => r.rtype.name(),
            Self::Instance(i) => i.class(),
            Self::Extended(e) => e.type_name(),
            Self::Number(_) => "number",
        }
    }

    /// `number?`.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// The number inside, for numeric primitives.
    ///
    /// # Errors
    ///
    /// Returns `BadNumber` for any non-numeric value.
    pub fn as_number(&self) -> Result<&Number> {
        match self {
            Self::Number(n) => Ok(n),
            other => Err(Error::bad_number(other)),
        }
    }
}

/// Atoms print as literals; compound values print as `#<type>` so cyclic
/// structure never recurses.
impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "()"),
            Self::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Self::Char(c) => write!(f, "#\\{c}"),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::String(s) => write!(f, "{:?}", s.borrow()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Vector(v) => write!(f, "#<vector {}>", v.borrow().len()),
            other => write!(f, "#<{}>", other.type_name()),
        }
    }
}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
