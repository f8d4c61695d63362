use crate::constants::BANNER;

/// Streaming emitter producing compact JSON prefixed with a format banner.
///
/// Output carries no whitespace and applies no string escaping; callers
/// supply pre-escaped text. Containers open through scoped handles that
/// close themselves when dropped, so every exit path emits the matching
/// delimiter and a mismatched close cannot be expressed:
///
/// ```
/// use flatjson::Writer;
///
/// let mut writer = Writer::new();
/// {
///     let mut root = writer.root_object();
///     root.add_int("id", 7);
///     let mut tags = root.add_array("tags");
///     tags.push_string("a");
///     tags.push_string("b");
/// }
/// let text = writer.finish();
/// assert_eq!(text, "// flatjson 0.1\n{\"id\":7,\"tags\":[\"a\",\"b\"]}");
/// ```
pub struct Writer {
    buf: String,
}

impl Writer {
    /// A fresh writer holding only the banner comment line.
    pub fn new() -> Self {
        Self {
            buf: BANNER.to_owned(),
        }
    }

    /// Open the root object. The returned handle borrows the writer
    /// exclusively until it drops.
    pub fn root_object(&mut self) -> ObjectWriter<'_> {
        self.buf.push('{');
        ObjectWriter {
            writer: self,
            count: 0,
        }
    }

    /// Open the root array. The returned handle borrows the writer
    /// exclusively until it drops.
    pub fn root_array(&mut self) -> ArrayWriter<'_> {
        self.buf.push('[');
        ArrayWriter {
            writer: self,
            count: 0,
        }
    }

    /// The accumulated output.
    pub fn finish(self) -> String {
        self.buf
    }

    /// The accumulated output as raw bytes.
    pub fn finish_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }

    fn separate(&mut self, count: &mut usize) {
        if *count > 0 {
            self.buf.push(',');
        }
        *count += 1;
    }

    fn put_key(&mut self, key: &str) {
        self.buf.push('"');
        self.buf.push_str(key);
        self.buf.push_str("\":");
    }

    fn put_string(&mut self, value: &str) {
        self.buf.push('"');
        self.buf.push_str(value);
        self.buf.push('"');
    }

    fn put_number(&mut self, value: f64) {
        self.buf.push_str(&format!("{value:.6}"));
    }

    fn put_int(&mut self, value: i64) {
        let mut digits = itoa::Buffer::new();
        self.buf.push_str(digits.format(value));
    }

    fn put_bool(&mut self, value: bool) {
        self.buf.push_str(if value { "true" } else { "false" });
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped handle over an open object. Dropping it emits the closing brace.
pub struct ObjectWriter<'w> {
    writer: &'w mut Writer,
    count: usize,
}

impl ObjectWriter<'_> {
    fn begin_member(&mut self, key: &str) {
        self.writer.separate(&mut self.count);
        self.writer.put_key(key);
    }

    /// Add `key` with a quoted string value, emitted without escaping.
    pub fn add_string(&mut self, key: &str, value: &str) {
        self.begin_member(key);
        self.writer.put_string(value);
    }

    /// Add `key` with a number rendered to six decimal places.
    pub fn add_number(&mut self, key: &str, value: f64) {
        self.begin_member(key);
        self.writer.put_number(value);
    }

    /// Add `key` with a plain decimal integer.
    pub fn add_int(&mut self, key: &str, value: i64) {
        self.begin_member(key);
        self.writer.put_int(value);
    }

    /// Add `key` with a `true`/`false` literal.
    pub fn add_bool(&mut self, key: &str, value: bool) {
        self.begin_member(key);
        self.writer.put_bool(value);
    }

    /// Open a nested object under `key`. This handle is frozen until the
    /// returned one drops.
    pub fn add_object(&mut self, key: &str) -> ObjectWriter<'_> {
        self.begin_member(key);
        self.writer.buf.push('{');
        ObjectWriter {
            writer: &mut *self.writer,
            count: 0,
        }
    }

    /// Open a nested array under `key`. This handle is frozen until the
    /// returned one drops.
    pub fn add_array(&mut self, key: &str) -> ArrayWriter<'_> {
        self.begin_member(key);
        self.writer.buf.push('[');
        ArrayWriter {
            writer: &mut *self.writer,
            count: 0,
        }
    }
}

impl Drop for ObjectWriter<'_> {
    fn drop(&mut self) {
        self.writer.buf.push('}');
    }
}

/// Scoped handle over an open array. Dropping it emits the closing bracket.
pub struct ArrayWriter<'w> {
    writer: &'w mut Writer,
    count: usize,
}

impl ArrayWriter<'_> {
    fn begin_element(&mut self) {
        self.writer.separate(&mut self.count);
    }

    /// Append a quoted string element, emitted without escaping.
    pub fn push_string(&mut self, value: &str) {
        self.begin_element();
        self.writer.put_string(value);
    }

    /// Append a number rendered to six decimal places.
    pub fn push_number(&mut self, value: f64) {
        self.begin_element();
        self.writer.put_number(value);
    }

    /// Append a plain decimal integer.
    pub fn push_int(&mut self, value: i64) {
        self.begin_element();
        self.writer.put_int(value);
    }

    /// Append a `true`/`false` literal.
    pub fn push_bool(&mut self, value: bool) {
        self.begin_element();
        self.writer.put_bool(value);
    }

    /// Open a nested object element. This handle is frozen until the
    /// returned one drops.
    pub fn push_object(&mut self) -> ObjectWriter<'_> {
        self.begin_element();
        self.writer.buf.push('{');
        ObjectWriter {
            writer: &mut *self.writer,
            count: 0,
        }
    }

    /// Open a nested array element. This handle is frozen until the
    /// returned one drops.
    pub fn push_array(&mut self) -> ArrayWriter<'_> {
        self.begin_element();
        self.writer.buf.push('[');
        ArrayWriter {
            writer: &mut *self.writer,
            count: 0,
        }
    }
}

impl Drop for ArrayWriter<'_> {
    fn drop(&mut self) {
        self.writer.buf.push(']');
    }
}
