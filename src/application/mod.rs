//! Application layer: loop orchestration over the pipeline stages.

pub mod humanize_loop;

pub use humanize_loop::HumanizeLoop;
