/// Whether every big-endian 16-bit unit of `bytes` fits in one byte.
///
/// Stops at the first unit with a non-zero high byte. Empty input is
/// compactable. A trailing odd byte is ignored.
pub fn is_compactable(bytes: &[u8]) -> bool {
    bytes.chunks_exact(2).all(|unit| unit[0] == 0)
}
