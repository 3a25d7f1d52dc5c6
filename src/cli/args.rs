//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// 20-questions guessing game with a self-learning binary decision tree
#[derive(Parser, Debug)]
#[command(name = "twentyq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging, multiple -d options increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play guessing rounds, learning from every wrong guess
    Play {
        /// Questions document to load the tree from
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        questions: Option<PathBuf>,

        /// Starting object for a fresh one-leaf tree (ignored with --questions)
        #[arg(short, long, default_value = "computer")]
        object: String,

        /// Write the grown tree to this file when the session ends
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        save: Option<PathBuf>,
    },

    /// Print the decision tree of a questions document
    Tree {
        /// Questions document to load the tree from
        #[arg(value_hint = ValueHint::FilePath)]
        questions: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
