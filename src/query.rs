use log::warn;

use crate::document::{Document, Kind, Value};
use crate::key::{HashedKey, HashedKeyStripped};
use crate::text::unescape;

const OBJECT_SENTINEL: &str = "object can not be viewed as string";
const ARRAY_SENTINEL: &str = "array can not be viewed as string";
const NULL_SENTINEL: &str = "null can not be viewed as string";

/// A non-owning read view over one value of a [`Document`].
///
/// Proxies are cheap `Copy` handles. Any navigation miss, such as an
/// unmatched key or an out-of-range index, yields the canonical error
/// proxy, a `Null` of size 0, so calls chain without panicking:
///
/// ```
/// let doc = flatjson::parse(r#"{"a": [1, 2]}"#)?;
/// let missing = doc.root().get_child(7).get_child(0);
/// assert_eq!(missing.kind(), flatjson::Kind::Null);
/// assert_eq!(missing.size(), 0);
/// # Ok::<(), flatjson::ParseError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Proxy<'a> {
    value: Value,
    doc: &'a Document<'a>,
}

impl<'a> Proxy<'a> {
    pub(crate) fn new(value: Value, doc: &'a Document<'a>) -> Self {
        Self { value, doc }
    }

    fn null(&self) -> Proxy<'a> {
        Proxy::new(Value::NULL, self.doc)
    }

    fn span(&self) -> &'a str {
        &self.doc.text[self.value.begin as usize..self.value.end as usize]
    }

    pub fn kind(&self) -> Kind {
        self.value.kind
    }

    /// The value's bytes as they appear in the source: quotes excluded for
    /// strings, escapes untouched. Objects, arrays and nulls have no raw
    /// text and yield a fixed sentinel string.
    pub fn raw_text(&self) -> &'a str {
        match self.value.kind {
            Kind::Object => OBJECT_SENTINEL,
            Kind::Array => ARRAY_SENTINEL,
            Kind::Null => NULL_SENTINEL,
            _ => self.span(),
        }
    }

    /// Raw (still escaped) string span; `None` unless the kind is String.
    pub fn as_str(&self) -> Option<&'a str> {
        if self.value.kind == Kind::String {
            Some(self.span())
        } else {
            None
        }
    }

    /// Owned copy of the raw string span; `None` unless the kind is String.
    pub fn as_string(&self) -> Option<String> {
        self.as_str().map(str::to_owned)
    }

    /// `None` unless the kind is True or False. Ints do not coerce.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value.kind {
            Kind::True => Some(true),
            Kind::False => Some(false),
            _ => None,
        }
    }

    /// Integer extraction. An Int truncates its stored double back to an
    /// integer. A Number also converts, but lossily: that path emits a
    /// `log::warn!` and still succeeds. Values outside the i32 range
    /// saturate at the bounds.
    pub fn as_int(&self) -> Option<i32> {
        match self.value.kind {
            Kind::Int => Some(self.value.number as i32),
            Kind::Number => {
                warn!("truncating number into int");
                Some(self.value.number as i32)
            }
            _ => None,
        }
    }

    /// `None` unless the kind is Int or Number.
    pub fn as_f64(&self) -> Option<f64> {
        matches!(self.value.kind, Kind::Int | Kind::Number).then_some(self.value.number)
    }

    /// `None` unless the kind is Int or Number.
    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|number| number as f32)
    }

    /// Element count for arrays, member count for objects, raw byte length
    /// for strings. Any other kind yields its span length, which is 0 for
    /// the error proxy. Never a failure.
    pub fn size(&self) -> usize {
        (self.value.end - self.value.begin) as usize
    }

    /// Raw (escaped) key bytes of member `i`; `None` unless the kind is
    /// Object and `i` is in range.
    pub fn get_key(&self, i: usize) -> Option<&'a str> {
        if self.value.kind != Kind::Object || i >= self.size() {
            return None;
        }
        let key = self.doc.members[self.value.begin as usize + i].key;
        Some(&self.doc.text[key.begin as usize..key.end as usize])
    }

    /// Proxy over the i-th element (array) or the i-th member's value
    /// (object), in source order. Out of range or wrong kind yields the
    /// error proxy.
    pub fn get_child(&self, i: usize) -> Proxy<'a> {
        if i >= self.size() {
            return self.null();
        }
        let at = self.value.begin as usize + i;
        match self.value.kind {
            Kind::Array => Proxy::new(self.doc.elements[at], self.doc),
            Kind::Object => Proxy::new(self.doc.members[at].value, self.doc),
            _ => self.null(),
        }
    }

    /// Look up a member by precomputed key: a linear scan that skips on
    /// hash mismatch and confirms with a byte-exact compare of the raw key
    /// bytes. First match wins. Wrong kind or no match yields the error
    /// proxy.
    pub fn lookup(&self, key: &HashedKey<'_>) -> Proxy<'a> {
        if self.value.kind != Kind::Object {
            return self.null();
        }
        let wanted = key.text.as_bytes();
        let members = &self.doc.members[self.value.begin as usize..self.value.end as usize];
        for member in members {
            if member.key.hash != key.hash {
                continue;
            }
            let raw = &self.doc.text.as_bytes()[member.key.begin as usize..member.key.end as usize];
            if raw == wanted {
                return Proxy::new(member.value, self.doc);
            }
        }
        self.null()
    }

    /// Like [`Proxy::lookup`] but for a stripped key: hash and length only,
    /// skipping the byte comparison. The caller accepted the collision
    /// risk when it stripped the key.
    pub fn lookup_stripped(&self, key: &HashedKeyStripped) -> Proxy<'a> {
        if self.value.kind != Kind::Object {
            return self.null();
        }
        let members = &self.doc.members[self.value.begin as usize..self.value.end as usize];
        for member in members {
            if member.key.hash == key.hash
                && (member.key.end - member.key.begin) as usize == key.len
            {
                return Proxy::new(member.value, self.doc);
            }
        }
        self.null()
    }

    /// Debug rendering of the subtree: kind tags, unescaped string
    /// payloads, two-space indentation.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, indent: usize) {
        match self.value.kind {
            Kind::Object => {
                out.push_str("{\n");
                for i in 0..self.size() {
                    push_indent(out, indent + 1);
                    if let Some(key) = self.get_key(i) {
                        out.push_str(key);
                        out.push_str(": ");
                    }
                    self.get_child(i).dump_into(out, indent + 1);
                    out.push('\n');
                }
                push_indent(out, indent);
                out.push('}');
            }
            Kind::Array => {
                out.push_str("[\n");
                for i in 0..self.size() {
                    push_indent(out, indent + 1);
                    self.get_child(i).dump_into(out, indent + 1);
                    out.push('\n');
                }
                push_indent(out, indent);
                out.push(']');
            }
            Kind::Int => {
                let mut buf = itoa::Buffer::new();
                out.push_str("[int] ");
                out.push_str(buf.format(self.value.number as i64));
            }
            Kind::Number => {
                out.push_str(&format!("[number] {:.6}", self.value.number));
            }
            Kind::String => {
                out.push_str("[string] ");
                out.push_str(&unescape(self.span()));
            }
            Kind::True => out.push_str("[bool] true"),
            Kind::False => out.push_str("[bool] false"),
            Kind::Null => out.push_str("[null] null"),
        }
    }
}

fn push_indent(out: &mut String, levels: usize) {
    for _ in 0..levels {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[rstest::rstest]
    fn test_raw_text_spans_and_sentinels() {
        let doc = parse(r#"{"s":"a\nb","i":42,"t":true,"n":null,"v":[]}"#).unwrap();
        let root = doc.root();
        assert_eq!(root.raw_text(), OBJECT_SENTINEL);
        assert_eq!(root.lookup(&HashedKey::new("s")).raw_text(), r"a\nb");
        assert_eq!(root.lookup(&HashedKey::new("i")).raw_text(), "42");
        assert_eq!(root.lookup(&HashedKey::new("t")).raw_text(), "true");
        assert_eq!(root.lookup(&HashedKey::new("n")).raw_text(), NULL_SENTINEL);
        assert_eq!(root.lookup(&HashedKey::new("v")).raw_text(), ARRAY_SENTINEL);
    }

    #[rstest::rstest]
    fn test_typed_getters_reject_incompatible_kinds() {
        let doc = parse(r#"{"s":"x","i":1,"t":true}"#).unwrap();
        let root = doc.root();
        let s = root.lookup(&HashedKey::new("s"));
        let i = root.lookup(&HashedKey::new("i"));
        let t = root.lookup(&HashedKey::new("t"));

        assert_eq!(s.as_str(), Some("x"));
        assert_eq!(s.as_int(), None);
        assert_eq!(s.as_bool(), None);

        assert_eq!(i.as_int(), Some(1));
        assert_eq!(i.as_f64(), Some(1.0));
        assert_eq!(i.as_f32(), Some(1.0));
        assert_eq!(i.as_str(), None);
        assert_eq!(i.as_bool(), None, "no int to bool coercion");

        assert_eq!(t.as_bool(), Some(true));
        assert_eq!(t.as_int(), None, "no bool to int coercion");
    }

    #[rstest::rstest]
    #[case("1.9", 1)]
    #[case("-1.9", -1)]
    #[case("1e2", 100)]
    fn test_number_as_int_truncates_but_succeeds(#[case] input: &str, #[case] expected: i32) {
        let doc = parse(input).unwrap();
        assert_eq!(doc.root().kind(), Kind::Number);
        assert_eq!(doc.root().as_int(), Some(expected));
    }

    #[rstest::rstest]
    #[case("3000000000", i32::MAX)]
    #[case("-3000000000", i32::MIN)]
    fn test_as_int_saturates_out_of_range(#[case] input: &str, #[case] expected: i32) {
        let doc = parse(input).unwrap();
        assert_eq!(doc.root().as_int(), Some(expected));
    }

    #[rstest::rstest]
    fn test_navigation_misses_chain_on_the_error_proxy() {
        let doc = parse(r#"{"a":[1]}"#).unwrap();
        let root = doc.root();

        let miss = root.lookup(&HashedKey::new("nope"));
        assert_eq!(miss.kind(), Kind::Null);
        assert_eq!(miss.size(), 0);
        assert_eq!(miss.as_f64(), None);

        let chained = miss.get_child(3).lookup(&HashedKey::new("x")).get_child(0);
        assert_eq!(chained.kind(), Kind::Null);

        let a = root.lookup(&HashedKey::new("a"));
        assert_eq!(a.get_child(1).kind(), Kind::Null, "out of range");
        assert_eq!(root.get_child(5).kind(), Kind::Null);
    }

    #[rstest::rstest]
    fn test_lookup_needs_raw_escaped_key_text() {
        let doc = parse(r#"{"a\"b": 7}"#).unwrap();
        let root = doc.root();
        assert_eq!(root.lookup(&HashedKey::new(r#"a\"b"#)).as_int(), Some(7));
        assert_eq!(root.lookup(&HashedKey::new("a\"b")).kind(), Kind::Null);
    }

    #[rstest::rstest]
    fn test_duplicate_keys_first_match_wins() {
        let doc = parse(r#"{"k":1,"k":2}"#).unwrap();
        let root = doc.root();
        assert_eq!(root.lookup(&HashedKey::new("k")).as_int(), Some(1));
        assert_eq!(root.get_child(1).as_int(), Some(2));
    }

    #[rstest::rstest]
    fn test_stripped_lookup_matches_on_hash_and_length() {
        let doc = parse(r#"{"alpha":1,"beta":2}"#).unwrap();
        let root = doc.root();
        let beta = HashedKeyStripped::new("beta");
        assert_eq!(root.lookup_stripped(&beta).as_int(), Some(2));

        let wrong_len = HashedKeyStripped {
            hash: crate::key::fnv1a(b"beta"),
            len: 5,
        };
        assert_eq!(root.lookup_stripped(&wrong_len).kind(), Kind::Null);
    }

    #[rstest::rstest]
    fn test_string_size_is_raw_byte_length() {
        let doc = parse(r#""a\nb""#).unwrap();
        assert_eq!(doc.root().size(), 4);

        let doc = parse(r#""héllo""#).unwrap();
        assert_eq!(doc.root().size(), 6);
    }

    #[rstest::rstest]
    fn test_dump_renders_the_tree() {
        let doc = parse(r#"{"a":1,"b":[true,"x"],"c":1.5}"#).unwrap();
        let expected = "{\n  a: [int] 1\n  b: [\n    [bool] true\n    [string] x\n  ]\n  c: [number] 1.500000\n}";
        assert_eq!(doc.root().dump(), expected);
    }
}
