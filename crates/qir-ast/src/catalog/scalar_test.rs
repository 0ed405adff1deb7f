use super::*;
use crate::catalog::{Table, TableExpansion};

fn lit(n: i64) -> Node {
    Node::from(Literal::integer(n))
}

#[test]
fn test_literal_equality_includes_type() {
    assert_eq!(Literal::integer(1), Literal::integer(1));
    assert_ne!(
        Literal::integer(1),
        Literal::new(LiteralValue::Integer(1), SqlType::Decimal {
            precision: None,
            scale: None
        })
    );
    assert_ne!(Literal::integer(1), Literal::integer(2));
}

#[test]
fn test_float_literals_compare_bitwise() {
    assert_eq!(Literal::float(f64::NAN), Literal::float(f64::NAN));
    assert_ne!(Literal::float(0.0), Literal::float(-0.0));
    assert_eq!(Node::from(Literal::float(1.5)).to_string(), "Literal 1.5");
}

#[test]
fn test_literal_is_true() {
    assert!(Literal::boolean(true).is_true());
    assert!(!Literal::boolean(false).is_true());
    assert!(!Literal::integer(1).is_true());
}

#[test]
fn test_product_child_names() {
    let product = ProductNode::new(vec![lit(1), lit(2), lit(3)]);
    assert_eq!(product.child_names(), vec!["_1", "_2", "_3"]);
}

#[test]
fn test_struct_declares_no_generators() {
    let record = StructNode::new(vec![
        (Symbol::field("id"), lit(1)),
        (Symbol::field("name"), Node::from(Literal::string("a"))),
    ]);
    assert!(record.generators().is_empty());
    assert_eq!(record.with_generators(&[]), record);
    assert_eq!(record.child_names(), vec!["id", "name"]);
    assert_eq!(record.field(&Symbol::field("id")), Some(&lit(1)));
    assert!(Node::from(record).is_def_node());
}

#[test]
fn test_struct_field_rename_keeps_values() {
    let record = StructNode::new(vec![(Symbol::field("id"), lit(1))]);
    let renamed = record.with_field_symbols(&[Symbol::field("key")]);
    assert_eq!(renamed.elements[0].0, Symbol::field("key"));
    assert!(renamed.elements[0].1.ptr_eq(&record.elements[0].1));
}

#[test]
fn test_struct_rebuild_keeps_symbols() {
    let record = StructNode::new(vec![(Symbol::field("id"), lit(1))]);
    let rebuilt = record.rebuild(vec![lit(9)]);
    assert_eq!(rebuilt.elements, vec![(Symbol::field("id"), lit(9))]);
}

#[test]
fn test_select_rejects_raw_table() {
    let table = Node::from(Table::new("orders"));
    let err = Select::new(table, Symbol::field("amount")).unwrap_err();
    assert!(matches!(err, AstError::SelectFromTable { ref table, ref field }
        if table == "orders" && field == "amount"));
    assert!(err.to_string().starts_with("[Q001]"));
}

#[test]
fn test_select_over_expansion() {
    let gen = Symbol::fresh();
    let expansion = Node::from(TableExpansion::new(
        gen,
        Node::from(Table::new("orders")),
        Node::from(StructNode::new(Vec::new())),
    ));
    let select = Select::new(expansion.clone(), Symbol::field("amount")).unwrap();
    assert!(select.input().ptr_eq(&expansion));
    assert_eq!(select.reference(), &Symbol::field("amount"));
}

#[test]
#[should_panic(expected = "[Q001]")]
fn test_select_rebuild_over_table_panics() {
    let select = Select::new(lit(1), Symbol::field("x")).unwrap();
    select.rebuild(vec![Node::from(Table::new("orders"))]);
}

#[test]
fn test_select_display_renders_path() {
    let root = Symbol::fresh();
    let path = Node::from(
        Select::new(Node::from(Ref::new(root.clone())), Symbol::field("name")).unwrap(),
    );
    assert_eq!(path.to_string(), format!("Select {root}.name"));

    let over_call = Node::from(
        Select::new(
            Node::from(Apply::new(Symbol::function("f"), Vec::new())),
            Symbol::field("x"),
        )
        .unwrap(),
    );
    assert_eq!(over_call.to_string(), "Select x");
}

#[test]
fn test_apply_reference_is_function() {
    let call = Apply::new(Symbol::function("count"), vec![lit(1)]);
    let renamed = call.with_reference(Symbol::function("sum"));
    assert_eq!(renamed.function, Symbol::function("sum"));
    assert_eq!(renamed.args, call.args);
}

#[test]
fn test_if_then_names() {
    let clause = IfThen::new(Node::from(Literal::boolean(true)), lit(1));
    assert_eq!(clause.child_names(), vec!["if", "then"]);
    assert_eq!(clause.children().len(), 2);
}

#[test]
fn test_conditional_rebuild() {
    let cond = Conditional::new(
        vec![
            IfThen::new(Node::from(Literal::boolean(false)), lit(1)),
            IfThen::new(Node::from(Literal::boolean(true)), lit(2)),
        ],
        lit(3),
    );
    let children = cond.children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[2], lit(3));

    let replaced = cond.rebuild(vec![children[1].clone(), children[0].clone(), lit(4)]);
    assert_eq!(replaced.clauses[0], children[1]);
    assert_eq!(replaced.otherwise, lit(4));
}

#[test]
fn test_pure_names() {
    let pure = Pure::new(lit(1));
    assert_eq!(pure.child_names(), vec!["value"]);
    assert_eq!(pure.with_child(lit(2)).value, lit(2));
}
