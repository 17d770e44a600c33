// SPDX-License-Identifier: MIT

//! Pipeline loader - YAML file loading and parsing

use std::fs;
use std::path::Path;

use super::nodes::NodeKind;
use super::types::{DependsOn, NodeDef, PipelineDef};
use crate::error::{PipelineError, Result};

/// Loads pipeline definitions from YAML files
pub struct PipelineLoader;

impl PipelineLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a pipeline definition from a YAML file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<PipelineDef> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a pipeline definition from a YAML string
    pub fn parse_yaml(content: &str) -> Result<PipelineDef> {
        let def: PipelineDef = serde_yaml::from_str(content)?;
        Ok(def)
    }

    /// The built-in generate -> execute pipeline
    pub fn default_pipeline() -> PipelineDef {
        PipelineDef {
            name: "nl2sql".to_string(),
            description: "Generate SQL from a question, then execute it".to_string(),
            nodes: vec![
                NodeDef {
                    id: "generate_sql".to_string(),
                    kind: NodeKind::GenerateSql,
                    depends_on: DependsOn::None,
                },
                NodeDef {
                    id: "execute_sql".to_string(),
                    kind: NodeKind::ExecuteSql,
                    depends_on: DependsOn::Single("generate_sql".to_string()),
                },
            ],
        }
    }
}

impl Default for PipelineLoader {
    fn default() -> Self {
        Self::new()
    }
}
