// SPDX-License-Identifier: MIT

//! Pipeline nodes
//!
//! This module provides the core Node trait and the built-in M0 nodes:
//! - `GenerateSqlNode` - turns the question into a candidate query
//! - `ExecuteSqlNode` - runs the candidate query

mod execute_sql;
mod generate_sql;

pub use execute_sql::{execute_sql_node, ExecuteSqlNode};
pub use generate_sql::{generate_sql_node, GenerateSqlNode};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::graph::state::Nl2SqlState;

/// A single step in the pipeline graph
#[async_trait]
pub trait Node: Send + Sync {
    /// Returns the node name
    fn name(&self) -> &str;

    /// Produce the next state from the current one
    async fn invoke(&self, state: &Nl2SqlState) -> Result<Nl2SqlState>;
}

/// Built-in node types addressable from pipeline definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    GenerateSql,
    ExecuteSql,
}

impl NodeKind {
    /// Instantiate the node implementation for this kind
    pub fn create(self) -> Arc<dyn Node> {
        match self {
            NodeKind::GenerateSql => Arc::new(GenerateSqlNode),
            NodeKind::ExecuteSql => Arc::new(ExecuteSqlNode),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::GenerateSql => "generate_sql",
            NodeKind::ExecuteSql => "execute_sql",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_serde() {
        for kind in [NodeKind::GenerateSql, NodeKind::ExecuteSql] {
            let yaml = serde_yaml::to_string(&kind).unwrap();
            assert_eq!(yaml.trim(), kind.as_str());
            assert_eq!(kind.create().name(), kind.as_str());
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: std::result::Result<NodeKind, _> = serde_yaml::from_str("validate_sql");
        assert!(result.is_err());
    }
}
