use crate::compress::is_compactable;
use crate::test_utils::utf16;

#[test]
fn empty_is_compactable() {
    assert!(is_compactable(&[]));
}

#[test]
fn latin1_text_is_compactable() {
    assert!(is_compactable(&[0x00, 0x41, 0x00, 0x42]));
    assert!(is_compactable(&utf16("caf\u{e9} \u{ff}")));
}

#[test]
fn wide_unit_is_not_compactable() {
    assert!(!is_compactable(&[0x01, 0x41, 0x00, 0x42]));
    assert!(!is_compactable(&utf16("\u{3b1}\u{3b2}")));
}

#[test]
fn flipping_any_high_byte_breaks_compactability() {
    let base = utf16("hello, world");
    assert!(is_compactable(&base));
    for unit in 0..base.len() / 2 {
        let mut flipped = base.clone();
        flipped[unit * 2] = 0x80;
        assert!(!is_compactable(&flipped), "unit {unit}");
    }
}

#[test]
fn trailing_odd_byte_is_ignored() {
    assert!(is_compactable(&[0x00, 0x41, 0xff]));
}
