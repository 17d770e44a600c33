// SPDX-License-Identifier: MIT

//! nl2sql-rs: natural-language-to-SQL pipeline (M0 scaffold)

pub mod config;
pub mod error;
pub mod graph;

pub use config::{load_config, load_config_from, Config};
pub use error::{Nl2SqlError, PipelineError, Result};
