// SPDX-License-Identifier: MIT

//! Pipeline graph executor

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use super::nodes::Node;
use super::state::Nl2SqlState;
use crate::error::Result;

/// Compiled node ready for execution
pub struct CompiledNode {
    pub id: String,
    pub node: Arc<dyn Node>,
    pub depends_on: Vec<String>,
}

/// Executable pipeline: nodes in topological order
///
/// Construct through [`PipelineBuilder`](super::PipelineBuilder) or
/// [`compile`](super::builder::compile), which validate and order the nodes.
pub struct PipelineGraph {
    name: String,
    description: String,
    nodes: Vec<CompiledNode>,
}

impl PipelineGraph {
    pub(crate) fn new(name: String, description: String, nodes: Vec<CompiledNode>) -> Self {
        Self {
            name,
            description,
            nodes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Node ids in execution order
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Run a fresh state built from `question` through the graph
    pub async fn run(&self, question: impl Into<String>) -> Result<Nl2SqlState> {
        self.invoke_state(Nl2SqlState::new(question)).await
    }

    /// Thread `state` through every node once, in order
    ///
    /// A failing node leaves the state as it was, records its error under
    /// `<node_id>.error`, and causes its dependents to be skipped.
    pub async fn invoke_state(&self, mut state: Nl2SqlState) -> Result<Nl2SqlState> {
        let mut completed: HashSet<&str> = HashSet::new();

        for compiled in &self.nodes {
            let id = compiled.id.as_str();

            if let Some(missing) = compiled
                .depends_on
                .iter()
                .find(|d| !completed.contains(d.as_str()))
            {
                log::warn!("Skipping node {}: dependency {} did not complete", id, missing);
                continue;
            }

            log::info!("Executing node: {}", id);
            match compiled.node.invoke(&state).await {
                Ok(next) => {
                    state = next;
                    completed.insert(id);
                    log::info!("Node {} completed", id);
                }
                Err(e) => {
                    log::error!("Node {} failed: {}", id, e);
                    state = state.with_value(&format!("{}.error", id), Value::String(e.to_string()))?;
                }
            }
        }

        log::debug!("Pipeline '{}' final state: {}", self.name, state.to_json());
        Ok(state)
    }
}

#[async_trait]
impl Node for PipelineGraph {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, state: &Nl2SqlState) -> Result<Nl2SqlState> {
        self.invoke_state(state.clone()).await
    }
}
