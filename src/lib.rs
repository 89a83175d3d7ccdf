pub mod error;
pub mod eval;
pub mod fs;
pub mod graph;
pub mod load;
pub mod parse;
pub mod progress;
pub mod run;
pub mod scanner;
pub mod trace;
pub mod work;

pub use error::{Error, Warning};
