// SPDX-License-Identifier: MIT

//! Graph-based NL2SQL pipeline
//!
//! This module provides the pipeline state, the nodes that transform it,
//! and the executor that runs nodes in dependency order.

pub mod builder;
pub mod executor;
pub mod loader;
pub mod nodes;
pub mod state;
pub mod types;

pub use builder::PipelineBuilder;
pub use executor::{CompiledNode, PipelineGraph};
pub use loader::PipelineLoader;
pub use nodes::{execute_sql_node, generate_sql_node, Node, NodeKind};
pub use state::{ExecutionResult, Nl2SqlState};
pub use types::{DependsOn, NodeDef, PipelineDef};
