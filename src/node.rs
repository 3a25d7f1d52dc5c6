use generational_arena::Index;
use std::fmt;

/// Structural role of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Internal node holding a yes/no prompt and exactly two children.
    Question,
    /// Leaf node holding a guessed object's name.
    Answer,
}

/// One element of the question tree.
///
/// `text` and `kind` are fixed at construction. The child slots hold arena
/// indices and are reseated only by [`QuestionTree::graft`]; an `Answer`
/// node never has children, a `Question` node always has both.
///
/// [`QuestionTree::graft`]: crate::tree::QuestionTree::graft
#[derive(Debug, Clone)]
pub struct QuestionNode {
    pub text: String,
    pub kind: NodeKind,
    /// Subtree taken on an affirmative response, None for answers
    pub yes: Option<Index>,
    /// Subtree taken on a negative response, None for answers
    pub no: Option<Index>,
}

impl QuestionNode {
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NodeKind::Answer,
            yes: None,
            no: None,
        }
    }

    pub fn question(text: impl Into<String>, yes: Index, no: Index) -> Self {
        Self {
            text: text.into(),
            kind: NodeKind::Question,
            yes: Some(yes),
            no: Some(no),
        }
    }

    pub fn is_question(&self) -> bool {
        self.kind == NodeKind::Question
    }

    /// Type-marker line of the two-line persisted record.
    pub fn tag(&self) -> &'static str {
        match self.kind {
            NodeKind::Question => "Q:",
            NodeKind::Answer => "A:",
        }
    }
}

impl fmt::Display for QuestionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.tag(), self.text)
    }
}
