/// Recursive check for constant expressions, including constant arrays and structs.
pub mod literal;
/// Node-kind tags for sqlparser expressions.
pub mod node_kind;
/// Semantic type of a literal and its display name.
pub mod type_kind;
