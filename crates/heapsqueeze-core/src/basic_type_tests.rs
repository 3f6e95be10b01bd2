use super::*;

#[test]
fn tag_roundtrip_covers_all_types() {
    for tag in 0..=255u8 {
        if let Some(ty) = BasicType::from_tag(tag) {
            assert_eq!(ty.tag(), tag);
        }
    }
    assert_eq!(BasicType::from_tag(5), Some(BasicType::Char));
    assert_eq!(BasicType::from_tag(3), None);
    assert_eq!(BasicType::from_tag(12), None);
}

#[test]
fn primitive_sizes() {
    assert_eq!(BasicType::Boolean.primitive_size(), Some(1));
    assert_eq!(BasicType::Char.primitive_size(), Some(2));
    assert_eq!(BasicType::Int.primitive_size(), Some(4));
    assert_eq!(BasicType::Double.primitive_size(), Some(8));
    assert_eq!(BasicType::Object.primitive_size(), None);
}

#[test]
fn reference_size_follows_model() {
    assert_eq!(BasicType::Object.size_with_reference(4), 4);
    assert_eq!(BasicType::Object.size_with_reference(8), 8);
    assert_eq!(BasicType::Long.size_with_reference(4), 8);
}

#[test]
fn java_type_names() {
    assert_eq!(BasicType::Boolean.name(), "boolean");
    assert_eq!(BasicType::Char.name(), "char");
    assert_eq!(BasicType::Object.name(), "java/lang/Object");
}
