// SPDX-License-Identifier: MIT

//! Pipeline builder - validates definitions and constructs executable graphs

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use super::executor::{CompiledNode, PipelineGraph};
use super::loader::PipelineLoader;
use super::nodes::{Node, NodeKind};
use super::types::PipelineDef;
use crate::error::{PipelineError, Result};

/// Builds pipeline graphs from definitions
///
/// Node kinds resolve to their built-in implementation unless an override has
/// been registered with [`PipelineBuilder::with_node`].
#[derive(Default)]
pub struct PipelineBuilder {
    loader: PipelineLoader,
    overrides: HashMap<NodeKind, Arc<dyn Node>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `node` wherever a definition names `kind`
    pub fn with_node(mut self, kind: NodeKind, node: Arc<dyn Node>) -> Self {
        self.overrides.insert(kind, node);
        self
    }

    /// Build a pipeline from a YAML file path
    pub fn build_file<P: AsRef<Path>>(&self, path: P) -> Result<PipelineGraph> {
        let def = self.loader.load(path)?;
        self.build(&def)
    }

    /// Build the built-in generate -> execute pipeline
    pub fn build_default(&self) -> Result<PipelineGraph> {
        self.build(&PipelineLoader::default_pipeline())
    }

    /// Build a pipeline from a parsed definition
    pub fn build(&self, def: &PipelineDef) -> Result<PipelineGraph> {
        let nodes = def
            .nodes
            .iter()
            .map(|node_def| CompiledNode {
                id: node_def.id.clone(),
                node: self.resolve(node_def.kind),
                depends_on: node_def.depends_on.ids().to_vec(),
            })
            .collect();

        let graph = compile(&def.name, &def.description, nodes)?;
        log::info!(
            "Built pipeline '{}' with {} nodes",
            def.name,
            graph.node_ids().len()
        );
        Ok(graph)
    }

    fn resolve(&self, kind: NodeKind) -> Arc<dyn Node> {
        self.overrides
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.create())
    }
}

/// Validate nodes and order them for execution
///
/// Rejects duplicate ids, dependencies on undeclared nodes, and cycles. The
/// result is topologically sorted; among nodes that are ready at the same
/// time, declaration order wins.
pub fn compile(name: &str, description: &str, nodes: Vec<CompiledNode>) -> Result<PipelineGraph> {
    let mut declared: HashSet<&str> = HashSet::new();
    for node in &nodes {
        if !declared.insert(node.id.as_str()) {
            return Err(PipelineError::DuplicateNode(node.id.clone()).into());
        }
    }

    for node in &nodes {
        if let Some(dep) = node.depends_on.iter().find(|d| !declared.contains(d.as_str())) {
            return Err(PipelineError::UnknownDependency {
                node: node.id.clone(),
                dependency: dep.clone(),
            }
            .into());
        }
    }

    let order = topological_order(&nodes)?;

    let mut slots: Vec<Option<CompiledNode>> = nodes.into_iter().map(Some).collect();
    let ordered = order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect();

    Ok(PipelineGraph::new(
        name.to_string(),
        description.to_string(),
        ordered,
    ))
}

/// Indices of `nodes` in execution order
fn topological_order(nodes: &[CompiledNode]) -> Result<Vec<usize>> {
    let mut done: HashSet<&str> = HashSet::new();
    let mut order = Vec::with_capacity(nodes.len());

    while order.len() < nodes.len() {
        let next = nodes.iter().enumerate().find(|(_, n)| {
            !done.contains(n.id.as_str()) && n.depends_on.iter().all(|d| done.contains(d.as_str()))
        });

        match next {
            Some((index, node)) => {
                done.insert(node.id.as_str());
                order.push(index);
            }
            None => return Err(PipelineError::CircularDependency(find_cycle(nodes, &done)).into()),
        }
    }

    Ok(order)
}

/// Walk dependencies among unfinished nodes until one repeats
fn find_cycle(nodes: &[CompiledNode], done: &HashSet<&str>) -> Vec<String> {
    let by_id: HashMap<&str, &CompiledNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let Some(start) = nodes.iter().find(|n| !done.contains(n.id.as_str())) else {
        return vec![];
    };

    let mut path: Vec<&str> = vec![start.id.as_str()];
    let mut current = start;
    loop {
        let Some(dep) = current
            .depends_on
            .iter()
            .map(String::as_str)
            .find(|d| !done.contains(d))
        else {
            break;
        };

        if let Some(pos) = path.iter().position(|id| *id == dep) {
            let mut cycle: Vec<String> = path[pos..].iter().map(|s| s.to_string()).collect();
            cycle.push(dep.to_string());
            return cycle;
        }

        path.push(dep);
        match by_id.get(dep) {
            Some(node) => current = node,
            None => break,
        }
    }

    path.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Nl2SqlError;
    use crate::graph::loader::PipelineLoader;

    fn node(id: &str, deps: &[&str]) -> CompiledNode {
        CompiledNode {
            id: id.to_string(),
            node: NodeKind::GenerateSql.create(),
            depends_on: deps.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn pipeline_error(result: Result<PipelineGraph>) -> PipelineError {
        match result {
            Err(Nl2SqlError::Pipeline(e)) => e,
            Err(other) => panic!("expected pipeline error, got {}", other),
            Ok(_) => panic!("expected pipeline error, got a graph"),
        }
    }

    #[test]
    fn test_default_pipeline_order() {
        let graph = PipelineBuilder::new().build_default().unwrap();
        assert_eq!(graph.name(), "nl2sql");
        assert_eq!(graph.node_ids(), vec!["generate_sql", "execute_sql"]);
    }

    #[test]
    fn test_declaration_order_reordered_by_dependencies() {
        let graph = compile(
            "p",
            "",
            vec![node("c", &["b"]), node("a", &[]), node("b", &["a"])],
        )
        .unwrap();
        assert_eq!(graph.node_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let graph = compile(
            "p",
            "",
            vec![node("x", &[]), node("join", &["x", "y"]), node("y", &[])],
        )
        .unwrap();
        assert_eq!(graph.node_ids(), vec!["x", "y", "join"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = pipeline_error(compile("p", "", vec![node("a", &[]), node("a", &[])]));
        assert_eq!(err, PipelineError::DuplicateNode("a".to_string()));
    }

    #[test]
    fn test_unknown_dependency_rejected() {
        let err = pipeline_error(compile("p", "", vec![node("a", &["ghost"])]));
        assert_eq!(
            err,
            PipelineError::UnknownDependency {
                node: "a".to_string(),
                dependency: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_cycle_rejected_with_path() {
        let err = pipeline_error(compile(
            "p",
            "",
            vec![node("root", &[]), node("a", &["b"]), node("b", &["a"])],
        ));
        assert_eq!(
            err,
            PipelineError::CircularDependency(vec!["a".into(), "b".into(), "a".into()])
        );
    }

    #[test]
    fn test_self_dependency_is_cycle() {
        let err = pipeline_error(compile("p", "", vec![node("a", &["a"])]));
        assert_eq!(
            err,
            PipelineError::CircularDependency(vec!["a".into(), "a".into()])
        );
    }

    #[test]
    fn test_build_from_yaml() {
        let yaml = r#"
name: reversed
nodes:
  - id: run
    kind: execute_sql
    depends_on: [gen]
  - id: gen
    kind: generate_sql
"#;
        let def = PipelineLoader::parse_yaml(yaml).unwrap();
        let graph = PipelineBuilder::new().build(&def).unwrap();
        assert_eq!(graph.node_ids(), vec!["gen", "run"]);
    }

    #[test]
    fn test_empty_pipeline_builds() {
        let graph = compile("empty", "", vec![]).unwrap();
        assert!(graph.node_ids().is_empty());
    }
}
