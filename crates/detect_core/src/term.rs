//! The boolean term tree: AND / OR / NOT over match terms.

/// A node in a boolean expression tree.
///
/// The tree is immutable once constructed; all satisfaction information
/// lives in a separate [`crate::combination::Combination`] keyed by the
/// stable node ids a [`crate::navigator::Navigator`] assigns to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// True iff every child is satisfied. Children are non-empty and
    /// ordered; order is preserved for deterministic tree walks but has
    /// no effect on evaluation.
    And(Vec<Term>),
    /// True iff any child is satisfied.
    Or(Vec<Term>),
    /// True iff the child is *not* satisfied by end-of-stream.
    Not(Box<Term>),
    /// A leaf: matches a token by exact `(type, value)` equality.
    Match { r#type: String, value: String },
}

impl Term {
    /// Creates an AND node.
    #[must_use]
    pub fn and(children: Vec<Term>) -> Term {
        Term::And(children)
    }

    /// Creates an OR node.
    #[must_use]
    pub fn or(children: Vec<Term>) -> Term {
        Term::Or(children)
    }

    /// Creates a NOT node.
    #[must_use]
    pub fn not(child: Term) -> Term {
        Term::Not(Box::new(child))
    }

    /// Creates a match term.
    #[must_use]
    pub fn match_term(r#type: impl Into<String>, value: impl Into<String>) -> Term {
        Term::Match {
            r#type: r#type.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this is an AND expression.
    #[must_use]
    pub fn is_and(&self) -> bool {
        matches!(self, Term::And(_))
    }

    /// Returns `true` if this is an OR expression.
    #[must_use]
    pub fn is_or(&self) -> bool {
        matches!(self, Term::Or(_))
    }

    /// Returns `true` if this is a NOT expression.
    #[must_use]
    pub fn is_not(&self) -> bool {
        matches!(self, Term::Not(_))
    }

    /// Returns `true` if this is a match term.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Term::Match { .. })
    }

    /// Returns the children of an AND/OR node, or an empty slice otherwise.
    #[must_use]
    pub fn children(&self) -> &[Term] {
        match self {
            Term::And(children) | Term::Or(children) => children,
            Term::Not(_) | Term::Match { .. } => &[],
        }
    }

    /// Returns the child of a NOT node, if any.
    #[must_use]
    pub fn child(&self) -> Option<&Term> {
        match self {
            Term::Not(child) => Some(child),
            _ => None,
        }
    }

    /// Returns the `(type, value)` pair of a match term, if any.
    #[must_use]
    pub fn match_pair(&self) -> Option<(&str, &str)> {
        match self {
            Term::Match { r#type, value } => Some((r#type, value)),
            _ => None,
        }
    }

    /// Walks the term tree in post-order, invoking `visitor` with
    /// `(node, parent_or_none)` for every node.
    ///
    /// Children of AND and OR are visited in declaration order; the NOT
    /// child is visited before its parent. The visitor may abort the walk
    /// by returning an `Err`.
    pub fn walk<F, E>(&self, visitor: &mut F) -> Result<(), E>
    where
        F: FnMut(&Term, Option<&Term>) -> Result<(), E>,
    {
        self.walk_with_parent(visitor, None)
    }

    fn walk_with_parent<F, E>(&self, visitor: &mut F, parent: Option<&Term>) -> Result<(), E>
    where
        F: FnMut(&Term, Option<&Term>) -> Result<(), E>,
    {
        match self {
            Term::And(children) | Term::Or(children) => {
                for child in children {
                    child.walk_with_parent(visitor, Some(self))?;
                }
            }
            Term::Not(child) => child.walk_with_parent(visitor, Some(self))?,
            Term::Match { .. } => {}
        }
        visitor(self, parent)
    }
}
