//! CLI subcommand implementations for the gemini-export binary.

pub mod export_cmd;
pub mod input;
pub mod inspect_cmd;
pub mod output;
pub mod selectors_cmd;
