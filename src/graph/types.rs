// SPDX-License-Identifier: MIT

//! Pipeline definition types
//!
//! This module defines the YAML shape of a pipeline: a named list of nodes,
//! each naming a built-in node kind and the nodes it depends on.

use serde::{Deserialize, Serialize};

use super::nodes::NodeKind;

/// A pipeline definition
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PipelineDef {
    /// Name of the pipeline
    pub name: String,
    /// Description of the pipeline
    #[serde(default)]
    pub description: String,
    /// Nodes in the graph
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
}

/// A node in the pipeline graph
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeDef {
    /// Unique identifier for this node
    pub id: String,
    /// Which built-in node implementation to run
    pub kind: NodeKind,
    /// Dependencies - nodes that must complete before this runs
    #[serde(default)]
    pub depends_on: DependsOn,
}

/// Upstream node ids, written in YAML as nothing, one id, or a list
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(untagged)]
pub enum DependsOn {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl DependsOn {
    /// The dependency ids, borrowed
    pub fn ids(&self) -> &[String] {
        match self {
            DependsOn::None => &[],
            DependsOn::Single(id) => std::slice::from_ref(id),
            DependsOn::Multiple(ids) => ids,
        }
    }
}
