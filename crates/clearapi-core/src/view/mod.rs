pub mod grouping;
pub mod outline;
pub mod tree;

pub use grouping::{GroupedOperation, OperationGroups, group_operations};
pub use outline::render_outline;
pub use tree::{
    ExpandedSchema, PropertyRow, TreeNode, child_schema, component_node, expand_all,
    is_expandable, root_node, rows,
};
