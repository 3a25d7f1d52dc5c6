//! Interactive play/learn loop over a [`QuestionTree`].

use std::io::{BufRead, Write};

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::errors::{GameError, GameResult};
use crate::tree::QuestionTree;

/// Terminal state of one play round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The guess was confirmed, the tree is unchanged.
    Win,
    /// The guess was wrong and a new question was grafted into the tree.
    Learned,
}

/// A response counts as "yes" iff it starts with `y` after trimming and
/// case-folding. Everything else, including empty or garbled input, is "no".
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('y')
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> GameResult<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(GameError::UnexpectedEof(prompt.trim().to_string()));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Runs exactly one traversal from root to a leaf: ask the questions along
/// the way, guess at the leaf, and on a wrong guess learn a new
/// distinguishing question from the player.
///
/// Each prompt emits one line (or prompt fragment) and consumes exactly one
/// response line, in strict alternation. The parent of the current node is
/// tracked transiently so the graft knows which child slot to reseat; it is
/// never stored in the tree itself.
#[instrument(level = "debug", skip_all)]
pub fn play<R: BufRead, W: Write>(
    tree: &mut QuestionTree,
    input: &mut R,
    output: &mut W,
) -> GameResult<Outcome> {
    let mut current = tree.root();
    let mut parent: Option<Index> = None;
    loop {
        let node = tree.node(current)?.clone();
        if node.is_question() {
            let answer = prompt_line(input, output, &format!("{} (y/n)? ", node.text))?;
            let next = if is_affirmative(&answer) {
                node.yes
            } else {
                node.no
            };
            parent = Some(current);
            current = next.ok_or(GameError::DanglingNode)?;
            continue;
        }

        writeln!(output, "I guess that your object is {}!", node.text)?;
        let answer = prompt_line(input, output, "Am I right? (y/n)? ")?;
        if is_affirmative(&answer) {
            writeln!(output, "Awesome! I win!")?;
            return Ok(Outcome::Win);
        }

        writeln!(output, "Boo! I lose. Please help me get better!")?;
        let object = prompt_line(input, output, "What is your object? ")?
            .trim()
            .to_string();
        writeln!(
            output,
            "Please give me a yes/no question that distinguishes between {} and {}.",
            object, node.text
        )?;
        let question = prompt_line(input, output, "Q: ")?.trim().to_string();
        let answer = prompt_line(
            input,
            output,
            &format!("Is the answer \"yes\" for {}? (y/n)? ", object),
        )?;
        debug!("learning object {:?} behind question {:?}", object, question);
        tree.graft(parent, current, &question, &object, is_affirmative(&answer))?;
        return Ok(Outcome::Learned);
    }
}
