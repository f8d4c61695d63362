use crate::query::Proxy;

/// The tag of a parsed value.
///
/// `Int` and `Number` are distinguished by the literal's syntax, not its
/// value: a fraction or exponent part makes a `Number`, so `1.0` and `1e2`
/// are `Number` while `1` is `Int`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Object,
    Array,
    Int,
    Number,
    String,
    True,
    False,
    Null,
}

// begin/end is a dual-purpose half-open range: byte offsets into the source
// text for strings and scalar literals, arena index ranges for objects and
// arrays. Always begin <= end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Value {
    pub(crate) kind: Kind,
    pub(crate) begin: u32,
    pub(crate) end: u32,
    pub(crate) number: f64,
}

impl Value {
    // Canonical error value: a null over the empty range. Navigation that
    // misses lands here and stays here.
    pub(crate) const NULL: Value = Value {
        kind: Kind::Null,
        begin: 0,
        end: 0,
        number: 0.0,
    };

    pub(crate) fn new(kind: Kind, begin: u32, end: u32, number: f64) -> Self {
        Self {
            kind,
            begin,
            end,
            number,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Key {
    pub(crate) begin: u32,
    pub(crate) end: u32,
    pub(crate) hash: u64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyValue {
    pub(crate) key: Key,
    pub(crate) value: Value,
}

/// A parsed document: the borrowed source text plus two flat arenas.
///
/// Array elements and object members live in two append-only sequences;
/// every container holds a contiguous index range into one of them, so the
/// whole tree costs two allocations regardless of nesting. String and
/// scalar spans alias the source text, which the `'a` borrow keeps alive
/// and unmodified for the document's lifetime.
///
/// A `Document` is immutable after [`parse`](crate::parse) returns and may
/// be read from any number of threads.
#[derive(Debug)]
pub struct Document<'a> {
    pub(crate) text: &'a str,
    pub(crate) elements: Vec<Value>,
    pub(crate) members: Vec<KeyValue>,
    pub(crate) root: Value,
}

impl<'a> Document<'a> {
    pub(crate) fn new(
        text: &'a str,
        elements: Vec<Value>,
        members: Vec<KeyValue>,
        root: Value,
    ) -> Self {
        Self {
            text,
            elements,
            members,
            root,
        }
    }

    /// Proxy over the root value.
    pub fn root(&self) -> Proxy<'_> {
        Proxy::new(self.root, self)
    }
}
