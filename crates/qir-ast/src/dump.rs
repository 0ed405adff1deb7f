//! Labeled textual and JSON renderings of a tree, for diagnostics.
//!
//! ```text
//! Filter
//!   from @5: TableExpansion
//!     table @4: Table orders
//!     columns: Struct
//!   where: Literal true [BOOLEAN]
//! ```

use crate::error::AstResult;
use crate::node::Node;
use qir_core::{Config, DumpConfig};
use std::path::Path;

/// Renders a node and its descendants, one line per node.
#[derive(Debug, Clone, Default)]
pub struct Dump {
    config: DumpConfig,
}

impl Dump {
    pub fn new(config: DumpConfig) -> Self {
        Self { config }
    }

    /// Use the `dump` section of the configuration file at `path`.
    pub fn from_config_file(path: &Path) -> AstResult<Self> {
        let config = Config::load(path)?;
        Ok(Self::new(config.dump))
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Text rendering: the root on the first line, then every child
    /// labeled with its child name and indented one level deeper.
    pub fn render(&self, node: &Node) -> String {
        let mut lines = Vec::new();
        self.render_into(node, None, 0, &mut lines);
        lines.join("\n")
    }

    fn render_into(&self, node: &Node, name: Option<&str>, depth: usize, lines: &mut Vec<String>) {
        let pad = " ".repeat(self.config.indent * depth);
        let mut line = match name {
            Some(name) => format!("{pad}{name}: {node}"),
            None => format!("{pad}{node}"),
        };
        if self.config.show_types {
            if let Some(ty) = node.node_type() {
                line.push_str(&format!(" [{ty}]"));
            }
        }
        lines.push(line);

        let children = node.children();
        if children.is_empty() {
            return;
        }
        if self.config.max_depth.is_some_and(|max| depth >= max) {
            lines.push(format!("{}...", " ".repeat(self.config.indent * (depth + 1))));
            return;
        }
        for (child, child_name) in children.iter().zip(node.child_names()) {
            self.render_into(child, Some(&child_name), depth + 1, lines);
        }
    }

    /// Pretty-printed JSON rendering of the whole tree.
    pub fn to_json(node: &Node) -> AstResult<String> {
        Ok(serde_json::to_string_pretty(node)?)
    }
}

impl Node {
    /// Text rendering with the default [`DumpConfig`].
    pub fn dump(&self) -> String {
        Dump::default().render(self)
    }
}

#[cfg(test)]
#[path = "dump_test.rs"]
mod tests;
