//! Property tests for gitdeploy.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "never expands".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/command_line.rs"]
mod command_line;

#[path = "properties/pull_output.rs"]
mod pull_output;

#[path = "properties/descriptor.rs"]
mod descriptor;
