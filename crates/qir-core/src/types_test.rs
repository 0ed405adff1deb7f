use super::*;

#[test]
fn test_shorthands() {
    assert_eq!(
        SqlType::bigint(),
        SqlType::Integer {
            bits: IntBitWidth::I64
        }
    );
    assert_eq!(SqlType::varchar(), SqlType::String { max_length: None });
    assert_eq!(SqlType::varchar().to_string(), "VARCHAR");
}

#[test]
fn test_display_names() {
    assert_eq!(SqlType::bigint().to_string(), "BIGINT");
    assert_eq!(
        SqlType::String {
            max_length: Some(100)
        }
        .display_name(),
        "VARCHAR(100)"
    );
    assert_eq!(
        SqlType::Collection(Box::new(SqlType::Struct(vec![(
            "id".to_string(),
            SqlType::bigint()
        )])))
        .display_name(),
        "COLLECTION(STRUCT(id BIGINT))"
    );
}

#[test]
fn test_unknown_type() {
    let ty = SqlType::Unknown("no input".into());
    assert!(ty.is_unknown());
    assert!(!SqlType::Date.is_unknown());
    assert_eq!(ty.to_string(), "UNKNOWN(no input)");
}

#[test]
fn test_collection_element_type() {
    let rows = SqlType::Collection(Box::new(SqlType::Boolean));
    assert!(rows.is_collection());
    assert_eq!(rows.element_type(), Some(&SqlType::Boolean));
    assert_eq!(SqlType::Boolean.element_type(), None);
}
