//! iconscript language parser, interpreter, and emission driver.

pub mod ast;
pub mod emit;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;

pub use emit::{evaluate, Evaluation};
pub use error::{ErrorKind, ScriptError, ScriptResult, Severity};
pub use parser::parse;
