use super::*;
use crate::catalog::{Literal, Ref, Table};

fn table(name: &str) -> Node {
    Node::from(Table::new(name))
}

fn key(name: &str) -> Node {
    Node::from(Ref::new(Symbol::field(name)))
}

#[test]
fn test_ordering_reverse() {
    let ordering = Ordering::desc().nulls_first();
    let reversed = ordering.reverse();
    assert_eq!(reversed.direction, Direction::Ascending);
    assert_eq!(reversed.nulls, NullOrdering::Last);
    assert_eq!(reversed.reverse(), ordering);

    assert_eq!(Ordering::asc().reverse(), Ordering::desc());
    assert_eq!(NullOrdering::Default.reverse(), NullOrdering::Default);
}

#[test]
fn test_ordering_display() {
    assert_eq!(Ordering::asc().to_string(), "asc");
    assert_eq!(Ordering::desc().nulls_last().to_string(), "desc nulls last");
    assert_eq!(
        Ordering::asc().nulls_first().nulls_default().to_string(),
        "asc"
    );
}

#[test]
fn test_join_type_names() {
    assert_eq!(JoinType::Outer.sql_name(), "FULL OUTER");
    assert_eq!(JoinType::Left.sql_name(), "LEFT");
    assert_eq!(JoinType::Inner.to_string(), "inner");
}

#[test]
fn test_filter_shape() {
    let gen = Symbol::fresh();
    let filter = Filter::new(gen.clone(), table("t"), Node::from(Literal::boolean(false)));
    assert_eq!(filter.child_names(), vec![format!("from {gen}"), "where".to_string()]);
    assert!(!filter.is_trivial());

    let generators = filter.generators();
    assert_eq!(generators.len(), 1);
    assert_eq!(generators[0].0, gen);
    assert_eq!(generators[0].1, table("t"));
}

#[test]
fn test_sort_by_children_and_names() {
    let gen = Symbol::fresh();
    let sort = SortBy::new(
        gen.clone(),
        table("t"),
        vec![(key("a"), Ordering::asc()), (key("b"), Ordering::desc())],
    );
    assert_eq!(sort.children(), vec![table("t"), key("a"), key("b")]);
    assert_eq!(
        sort.child_names(),
        vec![format!("from {gen}"), "by0".to_string(), "by1".to_string()]
    );
}

#[test]
fn test_sort_by_rebuild_keeps_orderings() {
    let sort = SortBy::new(
        Symbol::fresh(),
        table("t"),
        vec![(key("a"), Ordering::desc().nulls_last())],
    );
    let rebuilt = sort.rebuild(vec![table("u"), key("z")]);
    assert_eq!(rebuilt.from, table("u"));
    assert_eq!(rebuilt.by, vec![(key("z"), Ordering::desc().nulls_last())]);
    assert_eq!(rebuilt.generator, sort.generator);
}

#[test]
fn test_take_synthesizes_generator() {
    let a = Take::new(table("t"), 10);
    let b = Take::new(table("t"), 10);
    assert!(a.generator.is_anon());
    assert_ne!(a.generator, b.generator);
    assert_eq!(Node::from(a).to_string(), "Take 10");
}

#[test]
fn test_drop_rename() {
    let dropped = Drop::new(table("t"), 3);
    let renamed = dropped.with_generators(&[Symbol::field("row")]);
    assert_eq!(renamed.generator, Symbol::field("row"));
    assert_eq!(renamed.count, 3);
    assert!(renamed.from.ptr_eq(&dropped.from));
}

#[test]
fn test_group_by_generators() {
    let from_gen = Symbol::fresh();
    let by_gen = Symbol::fresh();
    let group = GroupBy::new(from_gen.clone(), by_gen.clone(), table("t"), key("k"));
    let symbols: Vec<Symbol> = group.generators().into_iter().map(|(s, _)| s).collect();
    assert_eq!(symbols, vec![from_gen, by_gen]);
}

#[test]
fn test_join_rebuild_keeps_generators_and_type() {
    let left_gen = Symbol::fresh();
    let right_gen = Symbol::fresh();
    let join = Join::new(
        left_gen.clone(),
        right_gen.clone(),
        table("a"),
        table("b"),
        JoinType::Right,
        Node::from(Literal::boolean(true)),
    );
    let rebuilt = join.rebuild(vec![table("c"), table("d"), Node::from(Literal::boolean(false))]);
    assert_eq!(rebuilt.left_gen, left_gen);
    assert_eq!(rebuilt.right_gen, right_gen);
    assert_eq!(rebuilt.join_type, JoinType::Right);
    assert_eq!(rebuilt.left, table("c"));
    assert_eq!(rebuilt.on, Node::from(Literal::boolean(false)));
}

#[test]
#[should_panic(expected = "Join::with_generators expects 2 symbols, got 1")]
fn test_join_rename_wrong_length_panics() {
    let join = Join::new(
        Symbol::fresh(),
        Symbol::fresh(),
        table("a"),
        table("b"),
        JoinType::Inner,
        Node::from(Literal::boolean(true)),
    );
    join.with_generators(&[Symbol::fresh()]);
}

#[test]
fn test_union_flag_and_generators() {
    let union = Union::new(table("a"), table("b"), false);
    assert_eq!(union.generators().len(), 2);
    assert_ne!(union.left_gen, union.right_gen);
    let swapped = union.with_children(table("b"), table("a"));
    assert_eq!(swapped.left_gen, union.left_gen);
    assert!(!swapped.all);
}

#[test]
fn test_bind_names() {
    let gen = Symbol::fresh();
    let bind = Bind::new(gen.clone(), table("t"), Node::from(Ref::new(gen.clone())));
    assert_eq!(bind.child_names(), vec![format!("from {gen}"), "select".to_string()]);
    assert_eq!(bind.generators()[0].0, gen);
}
