pub mod cli;
pub mod errors;
pub mod game;
pub mod node;
pub mod tree;
pub mod util;
