//! Tests for the interactive play/learn loop

use std::io::Cursor;

use rstest::rstest;
use twentyq::errors::{GameError, GameResult};
use twentyq::game::{self, Outcome};
use twentyq::tree::QuestionTree;
use twentyq::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const CAT_DOG_DOC: &str = "Q:\nIs it a cat?\nA:\ncat\nA:\ndog\n";

fn parse(doc: &str) -> QuestionTree {
    QuestionTree::read(Cursor::new(doc.as_bytes())).unwrap()
}

fn dump(tree: &QuestionTree) -> String {
    let mut out = Vec::new();
    tree.save(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Drives one play round with scripted responses, returning the outcome and
/// the transcript written to the output sink.
fn run(tree: &mut QuestionTree, responses: &str) -> (GameResult<Outcome>, String) {
    let mut input = Cursor::new(responses.as_bytes());
    let mut output = Vec::new();
    let result = game::play(tree, &mut input, &mut output);
    (result, String::from_utf8(output).unwrap())
}

// ============================================================
// Winning Path Tests
// ============================================================

#[test]
fn given_correct_guess_when_playing_then_wins_without_mutation() {
    let mut tree = parse(CAT_DOG_DOC);
    let (result, transcript) = run(&mut tree, "y\ny\n");

    assert_eq!(result.unwrap(), Outcome::Win);
    assert!(transcript.contains("Is it a cat? (y/n)? "));
    assert!(transcript.contains("I guess that your object is cat!"));
    assert!(transcript.contains("Awesome! I win!"));
    assert_eq!(tree, parse(CAT_DOG_DOC));
}

#[test]
fn given_negative_answer_when_playing_then_no_branch_is_guessed() {
    let mut tree = parse(CAT_DOG_DOC);
    let (result, transcript) = run(&mut tree, "n\ny\n");

    assert_eq!(result.unwrap(), Outcome::Win);
    assert!(transcript.contains("I guess that your object is dog!"));
}

#[test]
fn given_deep_tree_when_playing_then_each_question_consumes_one_line() {
    let mut tree = parse("Q:\nIs it a mammal?\nQ:\nDoes it purr?\nA:\ncat\nA:\ndog\nA:\nsnake\n");
    let (result, transcript) = run(&mut tree, "y\ny\ny\n");

    assert_eq!(result.unwrap(), Outcome::Win);
    assert!(transcript.contains("Is it a mammal? (y/n)? "));
    assert!(transcript.contains("Does it purr? (y/n)? "));
    assert!(transcript.contains("I guess that your object is cat!"));
}

#[rstest]
#[case(" Y")]
#[case("yes")]
#[case("YEP")]
fn given_tolerant_affirmative_spelling_when_confirming_then_wins(#[case] answer: &str) {
    let mut tree = parse(CAT_DOG_DOC);
    let (result, _) = run(&mut tree, &format!("y\n{}\n", answer));
    assert_eq!(result.unwrap(), Outcome::Win);
}

// ============================================================
// Learning Path Tests
// ============================================================

#[test]
fn given_wrong_guess_when_new_answer_is_yes_then_new_object_takes_yes_slot() {
    let mut tree = parse(CAT_DOG_DOC);
    let (result, transcript) = run(&mut tree, "y\nn\nfish\nDoes it have fins?\ny\n");

    assert_eq!(result.unwrap(), Outcome::Learned);
    assert!(transcript.contains("Boo! I lose. Please help me get better!"));
    assert!(transcript
        .contains("Please give me a yes/no question that distinguishes between fish and cat."));
    assert!(transcript.contains("Is the answer \"yes\" for fish? (y/n)? "));
    assert_eq!(
        dump(&tree),
        "Q:\nIs it a cat?\nQ:\nDoes it have fins?\nA:\nfish\nA:\ncat\nA:\ndog\n"
    );
}

#[test]
fn given_wrong_guess_when_new_answer_is_no_then_old_leaf_takes_yes_slot() {
    let mut tree = parse(CAT_DOG_DOC);
    let (result, _) = run(&mut tree, "y\nn\nfish\nDoes it have fins?\nn\n");

    assert_eq!(result.unwrap(), Outcome::Learned);
    assert_eq!(
        dump(&tree),
        "Q:\nIs it a cat?\nQ:\nDoes it have fins?\nA:\ncat\nA:\nfish\nA:\ndog\n"
    );
}

#[test]
fn given_single_leaf_tree_when_learning_then_root_is_replaced() {
    let mut tree = QuestionTree::with_object("cat");
    let (result, _) = run(&mut tree, "n\nfish\nDoes it have fins?\ny\n");

    assert_eq!(result.unwrap(), Outcome::Learned);
    assert_eq!(dump(&tree), "Q:\nDoes it have fins?\nA:\nfish\nA:\ncat\n");
}

#[test]
fn given_single_leaf_tree_when_learning_with_negative_answer_then_slots_swap() {
    let mut tree = QuestionTree::with_object("cat");
    let (result, _) = run(&mut tree, "n\nfish\nDoes it have fins?\nn\n");

    assert_eq!(result.unwrap(), Outcome::Learned);
    assert_eq!(dump(&tree), "Q:\nDoes it have fins?\nA:\ncat\nA:\nfish\n");
}

#[test]
fn given_padded_learning_input_when_grafting_then_object_and_question_are_trimmed() {
    let mut tree = QuestionTree::with_object("cat");
    let (result, _) = run(&mut tree, "n\n  fish  \n  Does it have fins?  \ny\n");

    assert_eq!(result.unwrap(), Outcome::Learned);
    assert_eq!(dump(&tree), "Q:\nDoes it have fins?\nA:\nfish\nA:\ncat\n");
}

#[test]
fn given_garbled_confirmation_when_playing_then_treated_as_negative() {
    // "maybe" is not an affirmative, so the round falls into learning
    let mut tree = QuestionTree::with_object("cat");
    let (result, _) = run(&mut tree, "maybe\nfish\nDoes it have fins?\ny\n");
    assert_eq!(result.unwrap(), Outcome::Learned);
}

// ============================================================
// Exhausted Input Tests
// ============================================================

#[test]
fn given_input_ending_mid_round_when_playing_then_session_fails() {
    let mut tree = parse(CAT_DOG_DOC);
    let (result, _) = run(&mut tree, "y\n");
    assert!(matches!(result, Err(GameError::UnexpectedEof(_))));
}

#[test]
fn given_failed_session_when_inspecting_tree_then_no_mutation_happened() {
    let mut tree = parse(CAT_DOG_DOC);
    let (result, _) = run(&mut tree, "y\nn\nfish\n");
    assert!(matches!(result, Err(GameError::UnexpectedEof(_))));
    assert_eq!(tree, parse(CAT_DOG_DOC));
}
