use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::game;
use crate::tree::QuestionTree;

pub fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Play {
            questions,
            object,
            save,
        }) => _play(questions.as_deref(), object, save.as_deref()),
        Some(Commands::Tree { questions }) => _tree(questions),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

fn load_tree(questions: Option<&Path>, object: &str) -> Result<QuestionTree> {
    match questions {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Cannot open questions document: {:?}", path))?;
            QuestionTree::read(BufReader::new(file))
                .with_context(|| format!("Cannot load questions document: {:?}", path))
        }
        None => Ok(QuestionTree::with_object(object)),
    }
}

#[instrument]
fn _play(questions: Option<&Path>, object: &str, save: Option<&Path>) -> Result<()> {
    let mut tree = load_tree(questions, object)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    loop {
        match game::play(&mut tree, &mut input, &mut output) {
            Ok(outcome) => debug!("round finished: {:?}", outcome),
            Err(e) => {
                eprintln!("{}", format!("Error: {}", e).red());
                break;
            }
        }
        if !ask_again(&mut input, &mut output)? {
            break;
        }
    }

    if let Some(path) = save {
        let file = File::create(path)
            .with_context(|| format!("Cannot create questions document: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        tree.save(&mut writer)?;
        writer.flush()?;
        println!("Saved questions to {}", path.display());
    }
    Ok(())
}

/// End-of-input counts as "no more rounds", not as an error.
fn ask_again<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "Do you want to play again? (y/n)? ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(game::is_affirmative(&line))
}

#[instrument]
fn _tree(questions: &Path) -> Result<()> {
    let tree = load_tree(Some(questions), "")?;
    println!("{}", tree.render());
    Ok(())
}

fn _completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
