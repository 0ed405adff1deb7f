//! Concrete node kinds.
//!
//! | kind                | shape    | binding                         |
//! |---------------------|----------|---------------------------------|
//! | `Literal`           | nullary  | typed                           |
//! | `Product`           | variadic |                                 |
//! | `Struct`            | variadic | def (no generators)             |
//! | `Pure`              | unary    |                                 |
//! | `Filter`            | binary   | def: `from`                     |
//! | `SortBy`            | variadic | def: `from`                     |
//! | `Take` / `Drop`     | unary    | def: `from` (self-generated)    |
//! | `GroupBy`           | binary   | def: `from`, `by`               |
//! | `Join`              | variadic | def: `left`, `right`            |
//! | `Union`             | binary   | def: `left`, `right`            |
//! | `Bind`              | binary   | def: `from`                     |
//! | `Table`             | nullary  |                                 |
//! | `TableExpansion`    | binary   | def: `table`                    |
//! | `TableRefExpansion` | binary   | def: `ref`                      |
//! | `Select`            | unary    | ref: field                      |
//! | `Apply`             | variadic | ref: function                   |
//! | `Ref`               | nullary  | ref: bound symbol               |
//! | `LetDynamic`        | variadic | def: one per definition         |
//! | `Sequence`          | nullary  | typed                           |
//! | `RangeFrom`         | nullary  | typed                           |
//! | `IfThen`            | binary   |                                 |
//! | `Conditional`       | variadic |                                 |

mod let_dynamic;
mod relational;
mod scalar;
mod sequence;
mod table;

pub use let_dynamic::LetDynamic;
pub use relational::{
    Bind, Direction, Drop, Filter, GroupBy, Join, JoinType, NullOrdering, Ordering, SortBy, Take,
    Union,
};
pub use scalar::{
    Apply, Conditional, IfThen, Literal, LiteralValue, ProductNode, Pure, Ref, Select, StructNode,
};
pub use sequence::{RangeFrom, SequenceNode};
pub use table::{Table, TableExpansion, TableRefExpansion};
