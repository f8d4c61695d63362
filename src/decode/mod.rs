mod number;

use smallvec::SmallVec;

use crate::constants::{is_ws, MAX_DEPTH};
use crate::document::{Document, Key, KeyValue, Kind, Value};
use crate::error::ParseError;
use crate::key::{FNV_OFFSET_BASIS, FNV_PRIME};

/// Parse a complete JSON text into a [`Document`] that borrows it.
///
/// The accepted grammar is a superset of strict JSON: `//` line comments
/// count as whitespace and containers tolerate a trailing comma. String
/// contents are never validated or unescaped during the parse; values keep
/// spans into `text` with their escape sequences intact, and
/// [`unescape`](crate::unescape) decodes them on demand.
///
/// The first syntax error aborts the parse:
///
/// ```
/// let err = flatjson::parse("{\n  \"a\": }").unwrap_err();
/// assert_eq!(err.to_string(), "line: 2, col: 8 desc: expecting value");
/// ```
pub fn parse(text: &str) -> Result<Document<'_>, ParseError> {
    // Spans are stored as u32 offsets.
    if text.len() > u32::MAX as usize {
        return Err(ParseError {
            line: 1,
            col: 1,
            desc: "input too large",
        });
    }
    let mut parser = Parser::new(text.as_bytes());
    let root = parser.parse_document()?;
    Ok(Document::new(text, parser.elements, parser.members, root))
}

// Most containers are small; keep their pending children off the heap.
type ElementBuf = SmallVec<[Value; 16]>;
type MemberBuf = SmallVec<[KeyValue; 8]>;

struct Parser<'a> {
    text: &'a [u8],
    pos: usize,
    depth: usize,
    elements: Vec<Value>,
    members: Vec<KeyValue>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a [u8]) -> Self {
        Self {
            text,
            pos: 0,
            depth: 0,
            elements: Vec::new(),
            members: Vec::new(),
        }
    }

    fn parse_document(&mut self) -> Result<Value, ParseError> {
        let root = self.parse_value()?;
        self.skip_ws()?;
        if self.pos < self.text.len() {
            return Err(self.error("expecting EOF"));
        }
        Ok(root)
    }

    fn error(&self, desc: &'static str) -> ParseError {
        ParseError::at(self.text, self.pos, desc)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn accept(&mut self, want: u8) -> bool {
        if self.peek() == Some(want) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn skip_ws(&mut self) -> Result<(), ParseError> {
        while let Some(byte) = self.peek() {
            if is_ws(byte) {
                self.pos += 1;
            } else if byte == b'/' {
                self.skip_comment()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    // Line comments count as whitespace and run to the end of the line (or
    // of the input).
    fn skip_comment(&mut self) -> Result<(), ParseError> {
        self.pos += 1;
        if !self.accept(b'/') {
            return Err(self.error("comment starts with //"));
        }
        self.pos = match memchr::memchr2(b'\n', b'\r', &self.text[self.pos..]) {
            Some(offset) => self.pos + offset,
            None => self.text.len(),
        };
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.skip_ws()?;
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string(),
            Some(b't') => self.parse_literal(b"true", Kind::True, "invalid value, expecting \"true\""),
            Some(b'f') => {
                self.parse_literal(b"false", Kind::False, "invalid value, expecting \"false\"")
            }
            Some(b'n') => self.parse_literal(b"null", Kind::Null, "invalid value, expecting \"null\""),
            Some(b'-' | b'0'..=b'9') => Ok(self.parse_number()),
            _ => Err(self.error("expecting value")),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.pos += 1; // '{'
        let mut pending = MemberBuf::new();
        // Running out of input ends the object as if it were closed.
        while self.pos < self.text.len() {
            self.skip_ws()?;
            if self.accept(b'}') {
                break; // empty object, or trailing comma
            }
            let key = self.parse_key()?;
            self.skip_ws()?;
            if !self.accept(b':') {
                return Err(self.error("need \":\" after key"));
            }
            let value = self.parse_value()?;
            pending.push(KeyValue { key, value });
            self.skip_ws()?;
            if self.accept(b'}') {
                break;
            }
            if !self.accept(b',') {
                return Err(self.error("need \",\" between key-values"));
            }
        }
        self.depth -= 1;
        let begin = self.members.len() as u32;
        self.members.extend_from_slice(&pending);
        Ok(Value::new(
            Kind::Object,
            begin,
            self.members.len() as u32,
            0.0,
        ))
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.pos += 1; // '['
        let mut pending = ElementBuf::new();
        while self.pos < self.text.len() {
            self.skip_ws()?;
            if self.accept(b']') {
                break;
            }
            let value = self.parse_value()?;
            pending.push(value);
            self.skip_ws()?;
            if self.accept(b']') {
                break;
            }
            if !self.accept(b',') {
                return Err(self.error("need \",\" between values"));
            }
        }
        self.depth -= 1;
        let begin = self.elements.len() as u32;
        self.elements.extend_from_slice(&pending);
        Ok(Value::new(
            Kind::Array,
            begin,
            self.elements.len() as u32,
            0.0,
        ))
    }

    fn parse_key(&mut self) -> Result<Key, ParseError> {
        if !self.accept(b'"') {
            return Err(self.error("key needs to start with \""));
        }
        let begin = self.pos as u32;
        let hash = self.skip_key();
        if !self.accept(b'"') {
            return Err(self.error("key needs to end with \""));
        }
        Ok(Key {
            begin,
            end: (self.pos - 1) as u32,
            hash,
        })
    }

    // Scan to the closing quote, folding the raw bytes into the key's hash
    // as we go. A quote whose previous byte is a backslash is content and
    // gets hashed like any other byte.
    fn skip_key(&mut self) -> u64 {
        let mut hash = FNV_OFFSET_BASIS;
        while let Some(byte) = self.peek() {
            if byte == b'"' && self.text[self.pos - 1] != b'\\' {
                break;
            }
            hash = (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME);
            self.pos += 1;
        }
        hash
    }

    fn parse_string(&mut self) -> Result<Value, ParseError> {
        self.pos += 1; // '"'
        let begin = self.pos as u32;
        self.skip_string();
        if !self.accept(b'"') {
            return Err(self.error("string needs to end with \""));
        }
        Ok(Value::new(Kind::String, begin, (self.pos - 1) as u32, 0.0))
    }

    // Same single-byte look-behind as skip_key.
    fn skip_string(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b'"' && self.text[self.pos - 1] != b'\\' {
                break;
            }
            self.pos += 1;
        }
    }

    fn parse_literal(
        &mut self,
        word: &'static [u8],
        kind: Kind,
        desc: &'static str,
    ) -> Result<Value, ParseError> {
        self.pos += 1; // the dispatch byte
        let rest = &word[1..];
        if !self.text[self.pos..].starts_with(rest) {
            return Err(self.error(desc));
        }
        self.pos += rest.len();
        let end = self.pos as u32;
        Ok(Value::new(kind, end - word.len() as u32, end, 0.0))
    }

    fn parse_number(&mut self) -> Value {
        let begin = self.pos as u32;
        let (kind, value) = number::decode(self.text, &mut self.pos);
        Value::new(kind, begin, self.pos as u32, value)
    }
}
