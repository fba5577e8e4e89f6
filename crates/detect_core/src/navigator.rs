//! Decorates a term tree with stable node ids, parent links and the set of
//! basic nodes whose satisfaction must be tracked by the DFA builder.

use std::collections::HashSet;

use crate::term::Term;

/// Stable identifier for a node within one indicator's term tree.
///
/// Ids are assigned in post-order tree-walk order starting at `0`; the
/// navigator's `label` for id `n` is `s<n+1>`, matching the `s1, s2, …`
/// convention described for DFA state names.
pub type NodeId = u32;

/// A node's shape, flattened into an id-addressed arena so that the
/// evaluator never needs to compare [`Term`] values by identity.
#[derive(Debug, Clone)]
enum NodeKind {
    And(Vec<NodeId>),
    Or(Vec<NodeId>),
    Not(NodeId),
    Match { r#type: String, value: String },
}

/// Read-only, post-construction view of one indicator's term tree.
#[derive(Debug, Clone)]
pub struct Navigator {
    kinds: Vec<NodeKind>,
    parent: Vec<Option<NodeId>>,
    root: NodeId,
    basic_nodes: HashSet<NodeId>,
    match_terms: Vec<NodeId>,
}

impl Navigator {
    /// Builds a navigator from a term tree in a single post-order walk.
    #[must_use]
    pub fn build(term: &Term) -> Navigator {
        let mut kinds = Vec::new();
        let mut parent = Vec::new();
        let root = assign_ids(term, &mut kinds, &mut parent);

        let mut basic_nodes = HashSet::new();
        let mut match_terms = Vec::new();
        for (id, kind) in kinds.iter().enumerate() {
            let id = id as NodeId;
            if matches!(kind, NodeKind::Match { .. }) {
                match_terms.push(id);
            }
            if let Some(parent_id) = parent[id as usize] {
                match &kinds[parent_id as usize] {
                    NodeKind::And(_) | NodeKind::Not(_) => {
                        basic_nodes.insert(id);
                    }
                    NodeKind::Or(_) | NodeKind::Match { .. } => {}
                }
            }
        }

        Navigator {
            kinds,
            parent,
            root,
            basic_nodes,
            match_terms,
        }
    }

    /// The root node's id. Satisfying the root is what puts a DFA in `hit`.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The parent of `node`, or `None` for the root.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent[node as usize]
    }

    /// The basic nodes: children of AND or NOT, excluding the root and
    /// excluding NOT nodes themselves.
    #[must_use]
    pub fn basic_nodes(&self) -> &HashSet<NodeId> {
        &self.basic_nodes
    }

    /// All match-term (leaf) node ids, in tree-walk order.
    #[must_use]
    pub fn match_terms(&self) -> &[NodeId] {
        &self.match_terms
    }

    #[must_use]
    pub fn is_and(&self, node: NodeId) -> bool {
        matches!(self.kinds[node as usize], NodeKind::And(_))
    }

    #[must_use]
    pub fn is_or(&self, node: NodeId) -> bool {
        matches!(self.kinds[node as usize], NodeKind::Or(_))
    }

    #[must_use]
    pub fn is_not(&self, node: NodeId) -> bool {
        matches!(self.kinds[node as usize], NodeKind::Not(_))
    }

    #[must_use]
    pub fn is_match(&self, node: NodeId) -> bool {
        matches!(self.kinds[node as usize], NodeKind::Match { .. })
    }

    /// Children of an AND/OR node; empty for NOT/Match.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match &self.kinds[node as usize] {
            NodeKind::And(children) | NodeKind::Or(children) => children,
            NodeKind::Not(_) | NodeKind::Match { .. } => &[],
        }
    }

    /// The child of a NOT node.
    #[must_use]
    pub fn not_child(&self, node: NodeId) -> NodeId {
        match &self.kinds[node as usize] {
            NodeKind::Not(child) => *child,
            _ => panic!("not_child called on a non-NOT node"),
        }
    }

    /// The `(type, value)` pair of a match-term node.
    #[must_use]
    pub fn match_pair(&self, node: NodeId) -> (&str, &str) {
        match &self.kinds[node as usize] {
            NodeKind::Match { r#type, value } => (r#type, value),
            _ => panic!("match_pair called on a non-match node"),
        }
    }

    /// The display label for a node, e.g. `s3`. Used to build DFA state
    /// names and in tree/FSM dumps.
    #[must_use]
    pub fn label(&self, node: NodeId) -> String {
        format!("s{}", node + 1)
    }

    /// Total number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

fn assign_ids(term: &Term, kinds: &mut Vec<NodeKind>, parent: &mut Vec<Option<NodeId>>) -> NodeId {
    match term {
        Term::And(children) => {
            let child_ids: Vec<NodeId> = children
                .iter()
                .map(|c| assign_ids(c, kinds, parent))
                .collect();
            let id = push_node(kinds, parent, NodeKind::And(child_ids.clone()));
            for child_id in child_ids {
                parent[child_id as usize] = Some(id);
            }
            id
        }
        Term::Or(children) => {
            let child_ids: Vec<NodeId> = children
                .iter()
                .map(|c| assign_ids(c, kinds, parent))
                .collect();
            let id = push_node(kinds, parent, NodeKind::Or(child_ids.clone()));
            for child_id in child_ids {
                parent[child_id as usize] = Some(id);
            }
            id
        }
        Term::Not(child) => {
            let child_id = assign_ids(child, kinds, parent);
            let id = push_node(kinds, parent, NodeKind::Not(child_id));
            parent[child_id as usize] = Some(id);
            id
        }
        Term::Match { r#type, value } => push_node(
            kinds,
            parent,
            NodeKind::Match {
                r#type: r#type.clone(),
                value: value.clone(),
            },
        ),
    }
}

fn push_node(kinds: &mut Vec<NodeKind>, parent: &mut Vec<Option<NodeId>>, kind: NodeKind) -> NodeId {
    let id = kinds.len() as NodeId;
    kinds.push(kind);
    parent.push(None);
    id
}
