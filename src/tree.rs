use std::io::{BufRead, Lines, Write};

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{debug, instrument};

use crate::errors::{GameError, GameResult};
use crate::node::QuestionNode;

/// Arena-backed binary decision tree of questions and answers.
///
/// Uses generational arena indices as node handles, so the graft step can
/// compare child slots by identity rather than payload value (leaf texts may
/// repeat across the tree).
#[derive(Debug)]
pub struct QuestionTree {
    arena: Arena<QuestionNode>,
    root: Index,
}

impl QuestionTree {
    /// Trivial tree: a single answer leaf for `object`.
    pub fn with_object(object: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(QuestionNode::answer(object));
        Self { arena, root }
    }

    /// Builds a tree from a questions document.
    ///
    /// The document is a pre-order dump of two-line records: a type-marker
    /// line (anything containing `Q` means question), then the payload line.
    /// A question record is immediately followed by its yes-subtree, then
    /// its no-subtree. A stream that ends mid-record fails the whole load;
    /// no partial tree is returned.
    #[instrument(level = "debug", skip(input))]
    pub fn read<R: BufRead>(input: R) -> GameResult<Self> {
        let mut arena = Arena::new();
        let mut lines = input.lines();
        let root = Self::read_node(&mut lines, &mut arena)?;
        debug!("loaded tree with {} nodes", arena.len());
        Ok(Self { arena, root })
    }

    fn read_node<R: BufRead>(
        lines: &mut Lines<R>,
        arena: &mut Arena<QuestionNode>,
    ) -> GameResult<Index> {
        let tag = lines.next().ok_or(GameError::TruncatedDocument)??;
        let text = lines.next().ok_or(GameError::TruncatedDocument)??;
        if tag.contains('Q') {
            let yes = Self::read_node(lines, arena)?;
            let no = Self::read_node(lines, arena)?;
            Ok(arena.insert(QuestionNode::question(text, yes, no)))
        } else {
            Ok(arena.insert(QuestionNode::answer(text)))
        }
    }

    /// Writes the tree as a questions document, pre-order, exactly the
    /// order [`QuestionTree::read`] expects back.
    #[instrument(level = "debug", skip(self, output))]
    pub fn save<W: Write>(&self, output: &mut W) -> GameResult<()> {
        self.write_node(output, self.root)
    }

    fn write_node<W: Write>(&self, output: &mut W, idx: Index) -> GameResult<()> {
        let node = self.node(idx)?;
        writeln!(output, "{}", node)?;
        if let (Some(yes), Some(no)) = (node.yes, node.no) {
            self.write_node(output, yes)?;
            self.write_node(output, no)?;
        }
        Ok(())
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn node(&self, idx: Index) -> GameResult<&QuestionNode> {
        self.arena.get(idx).ok_or(GameError::DanglingNode)
    }

    /// Replaces the wrongly guessed `leaf` with a new question node that
    /// distinguishes `object` from it.
    ///
    /// The new question's yes-child is the new object leaf when
    /// `answer_is_yes`, otherwise the old leaf, and vice versa for the
    /// no-child. With no `parent` the root itself is replaced. The slot to
    /// reseat is found by index identity; if neither of the parent's slots
    /// holds `leaf` the graft is abandoned and the tree is left untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn graft(
        &mut self,
        parent: Option<Index>,
        leaf: Index,
        question: &str,
        object: &str,
        answer_is_yes: bool,
    ) -> GameResult<()> {
        // Resolve the slot before inserting anything, so a failed graft
        // leaves the arena in its pre-graft state.
        let use_yes_slot = match parent {
            None => None,
            Some(parent_idx) => {
                let parent_node = self.node(parent_idx)?;
                if parent_node.yes == Some(leaf) {
                    Some(true)
                } else if parent_node.no == Some(leaf) {
                    Some(false)
                } else {
                    return Err(GameError::GraftTargetNotFound);
                }
            }
        };

        let object_leaf = self.arena.insert(QuestionNode::answer(object));
        let (yes, no) = if answer_is_yes {
            (object_leaf, leaf)
        } else {
            (leaf, object_leaf)
        };
        let new_question = self.arena.insert(QuestionNode::question(question, yes, no));

        match (parent, use_yes_slot) {
            (Some(parent_idx), Some(true)) => {
                self.arena[parent_idx].yes = Some(new_question);
            }
            (Some(parent_idx), Some(false)) => {
                self.arena[parent_idx].no = Some(new_question);
            }
            _ => self.root = new_question,
        }
        debug!("grafted {:?} above leaf {:?}", new_question, leaf);
        Ok(())
    }

    /// termtree view for terminal display, yes-branch first.
    pub fn render(&self) -> Tree<String> {
        self.render_node(self.root, "")
    }

    fn render_node(&self, idx: Index, prefix: &str) -> Tree<String> {
        match self.arena.get(idx) {
            None => Tree::new(format!("{}<missing node>", prefix)),
            Some(node) => {
                let mut tree = Tree::new(format!("{}{}", prefix, node.text));
                if let (Some(yes), Some(no)) = (node.yes, node.no) {
                    tree.push(self.render_node(yes, "[y] "));
                    tree.push(self.render_node(no, "[n] "));
                }
                tree
            }
        }
    }

    fn nodes_equal(&self, idx: Index, other: &Self, other_idx: Index) -> bool {
        match (self.arena.get(idx), other.arena.get(other_idx)) {
            (Some(a), Some(b)) => {
                a.kind == b.kind
                    && a.text == b.text
                    && match ((a.yes, a.no), (b.yes, b.no)) {
                        ((Some(ay), Some(an)), (Some(by), Some(bn))) => {
                            self.nodes_equal(ay, other, by) && self.nodes_equal(an, other, bn)
                        }
                        ((None, None), (None, None)) => true,
                        _ => false,
                    }
            }
            _ => false,
        }
    }
}

/// Structural and value equality, independent of arena index layout.
impl PartialEq for QuestionTree {
    fn eq(&self, other: &Self) -> bool {
        self.nodes_equal(self.root, other, other.root)
    }
}
