use super::*;
use crate::catalog::{JoinType, Ordering};
use std::collections::HashSet;

fn lit(n: i64) -> Node {
    Node::from(Literal::integer(n))
}

fn eq_call(left: Node, right: Node) -> Node {
    Node::from(Apply::new(Symbol::function("="), vec![left, right]))
}

#[test]
fn test_structural_equality_and_hash() {
    let a = eq_call(lit(1), lit(2));
    let b = eq_call(lit(1), lit(2));
    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);

    let set: HashSet<Node> = [a.clone(), b].into_iter().collect();
    assert_eq!(set.len(), 1);
    assert_ne!(a, eq_call(lit(1), lit(3)));
}

#[test]
fn test_children_are_stable() {
    let node = eq_call(lit(1), lit(2));
    let first = node.children();
    let second = node.children();
    assert_eq!(first.len(), 2);
    assert!(first[0].ptr_eq(&second[0]));
    assert!(first[1].ptr_eq(&second[1]));
}

#[test]
fn test_child_names_positional_fallback() {
    let node = eq_call(lit(1), lit(2));
    assert_eq!(node.child_names(), vec!["0", "1"]);

    let cond = Node::from(Conditional::new(
        vec![IfThen::new(Node::from(Literal::boolean(true)), lit(1))],
        lit(0),
    ));
    assert_eq!(cond.child_names(), vec!["0", "else"]);
}

#[test]
fn test_rebuild_replaces_children_only() {
    let node = eq_call(lit(1), lit(2));
    let rebuilt = node.rebuild(vec![lit(3), lit(4)]);
    assert_eq!(rebuilt.reference(), Some(&Symbol::function("=")));
    assert_eq!(rebuilt.children(), vec![lit(3), lit(4)]);
}

#[test]
fn test_rebuild_with_own_children_is_equal() {
    let gen = Symbol::fresh();
    let node = Node::from(Join::new(
        gen.clone(),
        Symbol::fresh(),
        Node::from(Table::new("a")),
        Node::from(Table::new("b")),
        JoinType::Left,
        Node::from(Literal::boolean(true)),
    ));
    assert_eq!(node.rebuild(node.children()), node);
}

#[test]
#[should_panic(expected = "Apply::rebuild expects 2 children, got 1")]
fn test_rebuild_wrong_arity_panics() {
    eq_call(lit(1), lit(2)).rebuild(vec![lit(1)]);
}

#[test]
#[should_panic(expected = "Pure::rebuild expects 1 children, got 0")]
fn test_unary_rebuild_wrong_arity_panics() {
    Node::from(Pure::new(lit(1))).rebuild(Vec::new());
}

#[test]
fn test_map_children_identity() {
    let node = eq_call(lit(1), eq_call(lit(2), lit(3)));
    let same = node.map_children(|c| c.clone());
    assert!(same.ptr_eq(&node));
}

#[test]
fn test_map_children_keeps_unchanged_siblings() {
    let left = lit(1);
    let right = lit(2);
    let node = eq_call(left.clone(), right.clone());

    let mapped = node.map_children(|c| if c.ptr_eq(&right) { lit(5) } else { c.clone() });
    assert!(!mapped.ptr_eq(&node));
    let children = mapped.children();
    assert!(children[0].ptr_eq(&left));
    assert_eq!(children[1], lit(5));
}

#[test]
fn test_map_children_structurally_equal_copy_counts_as_change() {
    let node = eq_call(lit(1), lit(2));
    let mapped = node.map_children(|c| c.rebuild(Vec::new()));
    assert!(!mapped.ptr_eq(&node));
    assert_eq!(mapped, node);
}

#[test]
fn test_delegate() {
    let from = Node::from(Table::new("orders"));
    let trivial = Node::from(Filter::new(
        Symbol::fresh(),
        from.clone(),
        Node::from(Literal::boolean(true)),
    ));
    assert!(trivial.delegate().ptr_eq(&from));

    let real = Node::from(Filter::new(
        Symbol::fresh(),
        from,
        Node::from(Literal::boolean(false)),
    ));
    assert!(real.delegate().ptr_eq(&real));
}

#[test]
fn test_nested_trivial_filters_delegate_to_source() {
    let from = Node::from(Table::new("orders"));
    let inner = Node::from(Filter::new(
        Symbol::fresh(),
        from.clone(),
        Node::from(Literal::boolean(true)),
    ));
    let outer = Node::from(Filter::new(
        Symbol::fresh(),
        inner,
        Node::from(Literal::boolean(true)),
    ));
    assert!(outer.delegate().ptr_eq(&from));
}

#[test]
fn test_typed_trivial_filter_delegate_keeps_type() {
    let rows = SqlType::Collection(Box::new(SqlType::bigint()));
    let from = Node::from(Table::new("orders"));
    let filter = Node::from(Filter::new(
        Symbol::fresh(),
        from.clone(),
        Node::from(Literal::boolean(true)),
    ));

    let delegated = filter.with_type(rows.clone()).delegate();
    assert_eq!(delegated.node_type(), Some(rows.clone()));
    assert_eq!(delegated, from.with_type(rows.clone()));

    // a source that already has a type keeps its own
    let typed_from = from.with_type(SqlType::Unknown("raw".into()));
    let over_typed = Node::from(Filter::new(
        Symbol::fresh(),
        typed_from.clone(),
        Node::from(Literal::boolean(true)),
    ))
    .with_type(rows);
    assert!(over_typed.delegate().ptr_eq(&typed_from));

    assert!(filter.delegate().ptr_eq(&from));
}

#[test]
fn test_types() {
    assert_eq!(lit(1).node_type(), Some(SqlType::bigint()));

    let call = eq_call(lit(1), lit(2));
    assert_eq!(call.node_type(), None);
    let typed = call.with_type(SqlType::Boolean);
    assert_eq!(typed.node_type(), Some(SqlType::Boolean));
    assert_ne!(typed, call);

    // attached types survive rebuilding
    let rebuilt = typed.rebuild(vec![lit(3), lit(4)]);
    assert_eq!(rebuilt.node_type(), Some(SqlType::Boolean));
}

#[test]
fn test_with_type_on_literal_changes_literal() {
    let null = Node::from(Literal::null(SqlType::Unknown("null".into())));
    let typed = null.with_type(SqlType::Date);
    assert_eq!(typed, Node::from(Literal::null(SqlType::Date)));
}

#[test]
fn test_generators_of_non_def_node() {
    let node = lit(1);
    assert!(!node.is_def_node());
    assert!(node.generators().is_empty());
    assert!(node.with_generators(&[]).ptr_eq(&node));
}

#[test]
#[should_panic(expected = "Literal introduces no generators")]
fn test_with_generators_on_non_def_node_panics() {
    lit(1).with_generators(&[Symbol::fresh()]);
}

#[test]
fn test_map_generators() {
    let gen = Symbol::fresh();
    let node = Node::from(Take::with_generator(gen.clone(), Node::from(Table::new("t")), 5));
    assert!(node.is_def_node());
    assert!(node.map_generators(|s| s.clone()).ptr_eq(&node));

    let renamed_to = Symbol::fresh();
    let renamed = node.map_generators(|_| renamed_to.clone());
    assert_eq!(renamed.generators()[0].0, renamed_to);
    assert!(renamed.children()[0].ptr_eq(&node.children()[0]));
}

#[test]
fn test_references() {
    let s = Symbol::fresh();
    let node = Node::from(Ref::new(s.clone()));
    assert_eq!(node.reference(), Some(&s));
    assert!(node.map_references(|s| s.clone()).ptr_eq(&node));

    let t = Symbol::fresh();
    let moved = node.map_references(|_| t.clone());
    assert_eq!(moved, Node::from(Ref::new(t.clone())));

    assert_eq!(lit(1).reference(), None);
    assert!(lit(1).with_reference(t).is_none());
}

#[test]
fn test_display_attributes() {
    assert_eq!(lit(1).to_string(), "Literal 1");
    assert_eq!(Node::from(Literal::string("a")).to_string(), "Literal \"a\"");
    assert_eq!(eq_call(lit(1), lit(2)).to_string(), "Apply =");
    assert_eq!(
        Node::from(Union::new(lit(1), lit(2), true)).to_string(),
        "Union all"
    );
    assert_eq!(Node::from(Union::new(lit(1), lit(2), false)).to_string(), "Union");
    assert_eq!(
        Node::from(SortBy::new(
            Symbol::fresh(),
            Node::from(Table::new("t")),
            vec![(lit(1), Ordering::asc()), (lit(2), Ordering::desc().nulls_last())],
        ))
        .to_string(),
        "SortBy asc, desc nulls last"
    );
}

#[test]
fn test_serialize_typed_node() {
    let typed = eq_call(lit(1), lit(2)).with_type(SqlType::Boolean);
    let json: serde_json::Value = serde_json::to_value(&typed).unwrap();
    assert_eq!(json["type"], serde_json::json!("Boolean"));
    assert!(json["node"]["Apply"].is_object());
    assert_eq!(json["node"]["Apply"]["function"], serde_json::json!("="));
}
