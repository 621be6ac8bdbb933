use crate::classifier::node_kind::NodeKind;
use crate::classifier::type_kind::TypeKind;
use crate::parser::options::ProductMode;

/// Generates `_p<index>_<TYPE>` parameter names.
///
/// The index grows with every generated name, so names are unique within
/// one rewrite and ordered by first occurrence.
#[derive(Debug, Clone)]
pub struct ParameterNamer {
    mode: ProductMode,
    index: usize,
}

impl ParameterNamer {
    /// Start numbering at zero.
    pub fn new(mode: ProductMode) -> Self {
        Self { mode, index: 0 }
    }

    /// Name for the next literal of the given kind.
    pub fn next_name(&mut self, kind: NodeKind) -> String {
        let type_name = TypeKind::of_literal(kind).name(self.mode);
        let name = format!("_p{}_{type_name}", self.index);
        self.index += 1;
        name
    }

    /// Number of names generated so far.
    pub fn generated(&self) -> usize {
        self.index
    }
}
