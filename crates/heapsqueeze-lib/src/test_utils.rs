use heapsqueeze_core::BasicType;
use heapsqueeze_hprof::{HprofWriter, encode_fields};

pub const OBJECT_CLASS_ID: u64 = 0x100;
pub const STRING_CLASS_ID: u64 = 0x200;
pub const OTHER_CLASS_ID: u64 = 0x300;

/// Raw UTF-16BE bytes of `text`.
pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// A dump defining `java/lang/Object` and `java/lang/String { value, hash }`,
/// then one char array plus one string pointing at it per entry.
pub fn string_dump(id_size: u32, strings: &[(u64, Vec<u8>)]) -> Vec<u8> {
    let mut w = HprofWriter::new(Vec::new(), id_size).unwrap();
    w.class_dump(OBJECT_CLASS_ID, "java/lang/Object", 0, &[]).unwrap();
    w.class_dump(
        STRING_CLASS_ID,
        "java/lang/String",
        OBJECT_CLASS_ID,
        &[("value", BasicType::Object), ("hash", BasicType::Int)],
    )
    .unwrap();

    for (i, (array_id, bytes)) in strings.iter().enumerate() {
        let array_id = *array_id;
        w.prim_array_dump(array_id, BasicType::Char, (bytes.len() / 2) as u32, bytes);
        let fields = encode_fields(
            id_size as usize,
            &[(BasicType::Object, array_id), (BasicType::Int, 0)],
        );
        w.instance_dump(0x10_000 + i as u64, STRING_CLASS_ID, &fields);
    }
    w.finish().unwrap()
}
