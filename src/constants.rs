pub const MAX_DEPTH: usize = 256;

pub const BANNER: &str = "// flatjson 0.1\n";

#[inline]
pub fn is_ws(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}
