//! Service graph export.
//!
//! Available under the `graph-export` feature: serializes the registered
//! service graph (one node per registration, one edge per declared
//! constructor parameter) for dependency tooling and documentation.

use serde::Serialize;

use crate::container::Container;
use crate::lifetime::Lifetime;
use crate::registration::Producer;

/// One registered service.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    /// Registration name
    pub name: String,
    /// `"shared"` or `"transient"`
    pub lifetime: &'static str,
    /// `"instance"`, `"factory"`, or `"type"`
    pub producer: &'static str,
    /// Whether a shared instance is currently cached
    pub cached: bool,
}

/// One declared constructor dependency.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    /// Service whose blueprint declares the parameter
    pub from: String,
    /// Service name the parameter resolves to
    pub to: String,
    /// The parameter name
    pub parameter: String,
    /// `"registered"` when an explicit registration satisfies the edge,
    /// `"autowired"` when the target would be constructed ad hoc
    pub wiring: &'static str,
}

/// Snapshot of a container's registered service graph.
///
/// Factory registrations appear as nodes without outgoing edges; their
/// dependencies are hidden inside the closure.
///
/// # Examples
///
/// ```
/// use wirebox::Container;
///
/// let container = Container::new();
/// container.register_instance("port", 8080u16);
///
/// let graph = container.export_graph();
/// assert_eq!(graph.nodes.len(), 1);
/// let json = graph.to_json().unwrap();
/// assert!(json.contains("\"port\""));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ServiceGraph {
    /// Registered services
    pub nodes: Vec<GraphNode>,
    /// Declared constructor dependencies
    pub edges: Vec<GraphEdge>,
}

impl ServiceGraph {
    /// Serializes the graph as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Container {
    /// Exports the registered service graph.
    pub fn export_graph(&self) -> ServiceGraph {
        let mut definitions = self.snapshot_definitions();
        definitions.sort_by(|a, b| a.0.cmp(&b.0));

        let mut nodes = Vec::with_capacity(definitions.len());
        let mut edges = Vec::new();
        for (name, definition) in &definitions {
            nodes.push(GraphNode {
                name: name.clone(),
                lifetime: match definition.lifetime() {
                    Lifetime::Shared => "shared",
                    Lifetime::Transient => "transient",
                },
                producer: definition.producer().kind(),
                cached: self.is_cached(name),
            });

            if let Producer::Type(blueprint) = definition.producer() {
                for param in blueprint.params() {
                    if let Some(service) = param.service_dependency() {
                        let registered = definitions
                            .iter()
                            .any(|(candidate, _)| candidate == service);
                        edges.push(GraphEdge {
                            from: name.clone(),
                            to: service.to_string(),
                            parameter: param.name().to_string(),
                            wiring: if registered { "registered" } else { "autowired" },
                        });
                    }
                }
            }
        }

        ServiceGraph { nodes, edges }
    }
}
