use heapsqueeze_core::{BasicType, ClassData, FieldData};
use indoc::indoc;

use crate::{DataModel, HotSpotLayouter, Layouter};

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
fn renders_instance_table() {
    let layout = HotSpotLayouter::new(DataModel::x86_64_compressed(8)).layout(&string_class());

    insta::assert_snapshot!(layout, @r"
    java/lang/String object internals:
     OFFSET  SIZE               TYPE DESCRIPTION
          0    12                    (object header)
         12     4                int String.hash
         16     4   java/lang/Object String.value
         20     4                    (loss due to the next object alignment)
    Instance size: 24 bytes
    Space losses: 0 bytes internal + 4 bytes external = 4 bytes total
    ");
}

#[test]
fn renders_padding_gap_between_blocks() {
    let class = ClassData::with_fields(
        "Child",
        vec![
            FieldData::new("org/example/Parent", "flag", BasicType::Byte),
            FieldData::new("Child", "count", BasicType::Int),
        ],
    );
    let layout = HotSpotLayouter::new(DataModel::x86_64_compressed(8)).layout(&class);

    let expected = indoc! {"
        Child object internals:
         OFFSET  SIZE               TYPE DESCRIPTION
              0    12                    (object header)
             12     1               byte Parent.flag
             13     3                    (alignment/padding gap)
             16     4                int Child.count
             20     4                    (loss due to the next object alignment)
        Instance size: 24 bytes
        Space losses: 3 bytes internal + 4 bytes external = 7 bytes total"};
    assert_eq!(layout.to_string(), expected);
}

#[test]
fn renders_array_table() {
    let layout = HotSpotLayouter::new(DataModel::x86_64_compressed(8))
        .layout(&ClassData::array(BasicType::Char, 3));

    insta::assert_snapshot!(layout, @r"
    char[] object internals:
     OFFSET  SIZE               TYPE DESCRIPTION
          0    16                    (object header)
         16     6               char [3 elements]
         22     2                    (loss due to the next object alignment)
    Instance size: 24 bytes
    Space losses: 0 bytes internal + 2 bytes external = 2 bytes total
    ");
}

#[test]
fn losses_of_exact_fit() {
    let class = ClassData::with_fields(
        "Pair",
        vec![
            FieldData::new("Pair", "a", BasicType::Int),
            FieldData::new("Pair", "b", BasicType::Int),
        ],
    );
    let layout = HotSpotLayouter::new(DataModel::x86_32()).layout(&class);
    assert_eq!(layout.instance_size(), 16);
    assert_eq!(layout.internal_loss(), 0);
    assert_eq!(layout.external_loss(), 0);
}

#[test]
fn fields_sorted_by_offset() {
    let layout = HotSpotLayouter::new(DataModel::x86_64()).layout(&string_class());
    let offsets: Vec<u64> = layout.fields().iter().map(|f| f.offset).collect();
    let mut sorted = offsets.clone();
    sorted.sort_unstable();
    assert_eq!(offsets, sorted);
    assert_eq!(offsets[0], 16);
}
