use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use crate::error::Error;
use crate::rewriter::collector::NodeId;

/// Result of replacing the literals of a SQL text by named parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiteralReplacement {
    /// SQL text with `@name` placeholders in place of literals.
    pub result_sql: String,
    /// Parameter name assigned to each substituted literal node.
    pub literal_map: BTreeMap<NodeId, String>,
    /// Original source text of the literal bound to each parameter name.
    pub parameters: BTreeMap<String, String>,
}

impl LiteralReplacement {
    /// Record that `node` is replaced by parameter `name`.
    ///
    /// Fails when the node is already mapped to a different name.
    pub fn bind_literal(&mut self, node: NodeId, name: &str) -> Result<(), Error> {
        insert_unique(&mut self.literal_map, node, name.to_string(), |existing| {
            format!(
                "literal node {} is mapped to both {existing} and {name}",
                node.0
            )
        })
    }

    /// Record that parameter `name` stands for `value`.
    ///
    /// Fails when the name is already bound to a different value.
    pub fn bind_parameter(&mut self, name: &str, value: &str) -> Result<(), Error> {
        insert_unique(
            &mut self.parameters,
            name.to_string(),
            value.to_string(),
            |existing| format!("parameter {name} is bound to both {existing} and {value}"),
        )
    }

    /// Parameter name assigned to `node`, if it was substituted.
    pub fn parameter_for(&self, node: NodeId) -> Option<&str> {
        self.literal_map.get(&node).map(String::as_str)
    }
}

fn insert_unique<K: Ord, V: PartialEq>(
    map: &mut BTreeMap<K, V>,
    key: K,
    value: V,
    conflict: impl FnOnce(&V) -> String,
) -> Result<(), Error> {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(slot) if *slot.get() == value => Ok(()),
        Entry::Occupied(slot) => Err(Error::Internal(conflict(slot.get()))),
    }
}
