//! Pipeline stages: generator, humanizer, judge, and structural evaluator.

pub mod evaluator;
pub mod rewriter;
pub mod scorer;
pub mod scrambler;

pub use evaluator::{evaluate, Evaluation};
pub use rewriter::Rewriter;
pub use scorer::{Scorer, Verdict};
pub use scrambler::Scrambler;
