use std::fmt::Debug;

use crate::arena::NodeStore;
use crate::types::{KeyNode, NodeId};

/// Debug printer shared by both policies.
///
/// ```text
/// Node[#1] h=2 { 20 }
/// L=Node[#2] h=1 { 10 }
///   L=∅
///   R=∅
/// R=∅
/// ```
pub fn print<K, N>(store: &NodeStore<N>, node: NodeId, tab: &str) -> String
where
    K: Debug,
    N: KeyNode<K>,
{
    if node.is_nil() {
        return "∅".to_string();
    }
    let n = &store[node];
    let child_tab = format!("{tab}  ");
    let left = print::<K, N>(store, n.l(), &child_tab);
    let right = print::<K, N>(store, n.r(), &child_tab);
    format!(
        "Node[{node}] {} {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
        n.state(),
        n.key()
    )
}
