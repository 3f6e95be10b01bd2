use super::*;

fn string_class() -> ClassData {
    ClassData::with_fields(
        "java/lang/String",
        vec![
            FieldData::new("java/lang/String", "value", BasicType::Object),
            FieldData::new("java/lang/String", "hash", BasicType::Int),
        ],
    )
}

#[test]
fn array_descriptor_names() {
    let chars = ClassData::array(BasicType::Char, 10);
    assert_eq!(chars.name(), "char[]");
    assert_eq!(
        chars.array_shape(),
        Some(ArrayShape {
            component: BasicType::Char,
            length: 10
        })
    );

    let objects = ClassData::array(BasicType::Object, 3);
    assert_eq!(objects.name(), "java/lang/Object[]");
}

#[test]
fn arrays_differ_by_length() {
    assert_ne!(
        ClassData::array(BasicType::Byte, 4),
        ClassData::array(BasicType::Byte, 5)
    );
    assert_eq!(
        ClassData::array(BasicType::Byte, 4),
        ClassData::array(BasicType::Byte, 4)
    );
}

#[test]
fn add_field_on_clone_leaves_original() {
    let canonical = string_class();
    let mut augmented = canonical.clone();
    augmented.add_field(FieldData::new(
        "java/lang/String",
        "isCompressed",
        BasicType::Boolean,
    ));

    assert_eq!(canonical.fields().len(), 2);
    assert_eq!(augmented.fields().len(), 3);
    assert_eq!(augmented.fields()[2].ty(), BasicType::Boolean);
    assert_ne!(canonical, augmented);
}

#[test]
fn field_blocks_follow_owners() {
    let cd = ClassData::with_fields(
        "java/util/LinkedHashMap$Entry",
        vec![
            FieldData::new("java/util/HashMap$Node", "hash", BasicType::Int),
            FieldData::new("java/util/HashMap$Node", "key", BasicType::Object),
            FieldData::new("java/util/LinkedHashMap$Entry", "before", BasicType::Object),
        ],
    );

    let blocks: Vec<usize> = cd.field_blocks().map(|b| b.len()).collect();
    assert_eq!(blocks, vec![2, 1]);
    let owners: Vec<&str> = cd.field_blocks().map(|b| b[0].owner()).collect();
    assert_eq!(
        owners,
        vec!["java/util/HashMap$Node", "java/util/LinkedHashMap$Entry"]
    );
}

#[test]
fn class_without_fields_has_no_blocks() {
    let cd = ClassData::new("java/lang/Object");
    assert!(cd.fields().is_empty());
    assert_eq!(cd.field_blocks().count(), 0);
    assert_eq!(cd.array_shape(), None);
}
