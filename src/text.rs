/// Decode the escape sequences in a raw string span.
///
/// `\"`, `\\` and `\/` map to themselves; `\b`, `\f`, `\n`, `\r`, `\t` to
/// the control characters. `\uXXXX` decoding is not implemented: the
/// backslash is dropped and the `u` plus hex digits pass through
/// literally. Any other escaped character, or a trailing `\` at the end of
/// input, stops decoding early and the partial result is returned as-is,
/// without an error signal.
///
/// ```
/// assert_eq!(flatjson::unescape(r"line\nbreak"), "line\nbreak");
/// assert_eq!(flatjson::unescape("abc\\"), "abc");
/// ```
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else { break };
        match escaped {
            '"' | '\\' | '/' => out.push(escaped),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            // \uXXXX stays undecoded; the hex digits follow as plain text.
            'u' => out.push('u'),
            _ => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("", "")]
    #[case("plain", "plain")]
    #[case("héllo wörld", "héllo wörld")]
    #[case(r"a\nb", "a\nb")]
    #[case(r#"\"\\\/"#, "\"\\/")]
    #[case(r"\b\f\n\r\t", "\u{0008}\u{000c}\n\r\t")]
    #[case("\x5Cu0041bc", "u0041bc")]
    fn test_unescape(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unescape(raw), expected);
    }

    #[rstest::rstest]
    #[case("abc\\", "abc")]
    #[case(r"ab\qcd", "ab")]
    #[case("\\", "")]
    fn test_bad_escape_truncates_without_error(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unescape(raw), expected);
    }
}
