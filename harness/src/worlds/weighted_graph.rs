//! `WeightedGraph`: an explicit directed graph with named nodes.
//!
//! Nodes are interned in first-mention order; a node's state is its index.
//! Successors come out in edge insertion order, so runs are reproducible
//! from the construction sequence alone. Goals are held by name, which
//! lets a caller name a goal the graph never mentions (and get
//! `Exhausted`).

use std::collections::{BTreeMap, BTreeSet};

use pathwise_search::contract::{SearchProblem, Successor};

use crate::contract::DescribeState;

/// Error building a [`WeightedGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Edge costs must be non-negative.
    NegativeCost { from: String, to: String, cost: i64 },
    /// Heuristic value for a node the graph does not contain.
    UnknownNode { name: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeCost { from, to, cost } => {
                write!(f, "edge {from} -> {to} has negative cost {cost}")
            }
            Self::UnknownNode { name } => write!(f, "unknown node: {name}"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Directed graph with non-negative edge costs and an optional heuristic
/// table (missing entries read as zero).
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    problem_id: String,
    names: Vec<String>,
    index: BTreeMap<String, usize>,
    edges: Vec<Vec<(usize, i64)>>,
    heuristic: Vec<i64>,
    goals: BTreeSet<String>,
}

impl WeightedGraph {
    /// A graph containing only `start`, which becomes node 0.
    #[must_use]
    pub fn new(problem_id: impl Into<String>, start: &str) -> Self {
        let mut graph = Self {
            problem_id: problem_id.into(),
            names: Vec::new(),
            index: BTreeMap::new(),
            edges: Vec::new(),
            heuristic: Vec::new(),
            goals: BTreeSet::new(),
        };
        graph.intern(start);
        graph
    }

    /// Unit-cost chain `names[0] -> names[1] -> ...`, starting at `names[0]`.
    ///
    /// An empty slice yields a single node named `"start"`.
    #[must_use]
    pub fn line(names: &[&str], goal: &str) -> Self {
        let mut graph = Self::new("line_graph", names.first().copied().unwrap_or("start"));
        for pair in names.windows(2) {
            graph.push_edge(pair[0], pair[1], 1);
        }
        graph.add_goal(goal);
        graph
    }

    /// Add a directed edge, interning both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NegativeCost`] if `cost < 0`.
    pub fn add_edge(&mut self, from: &str, to: &str, cost: i64) -> Result<(), GraphError> {
        if cost < 0 {
            return Err(GraphError::NegativeCost {
                from: from.to_string(),
                to: to.to_string(),
                cost,
            });
        }
        self.push_edge(from, to, cost);
        Ok(())
    }

    /// Add edges in both directions with the same cost.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NegativeCost`] if `cost < 0`.
    pub fn add_undirected_edge(&mut self, a: &str, b: &str, cost: i64) -> Result<(), GraphError> {
        self.add_edge(a, b, cost)?;
        self.add_edge(b, a, cost)
    }

    /// Set the heuristic estimate for an existing node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if the graph has no such node.
    pub fn set_heuristic(&mut self, name: &str, value: i64) -> Result<(), GraphError> {
        let idx = self.node_index(name).ok_or_else(|| GraphError::UnknownNode {
            name: name.to_string(),
        })?;
        self.heuristic[idx] = value;
        Ok(())
    }

    pub fn add_goal(&mut self, name: &str) {
        self.goals.insert(name.to_string());
    }

    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name of node `idx`, or `"?"` when out of range.
    #[must_use]
    pub fn node_name(&self, idx: usize) -> &str {
        self.names.get(idx).map_or("?", String::as_str)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Outgoing `(target, cost)` pairs of node `idx`, in insertion order.
    #[must_use]
    pub fn edges_from(&self, idx: usize) -> &[(usize, i64)] {
        self.edges.get(idx).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_goal_node(&self, idx: usize) -> bool {
        self.names
            .get(idx)
            .is_some_and(|name| self.goals.contains(name))
    }

    fn push_edge(&mut self, from: &str, to: &str, cost: i64) {
        let from = self.intern(from);
        let to = self.intern(to);
        self.edges[from].push((to, cost));
    }

    fn intern(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.edges.push(Vec::new());
        self.heuristic.push(0);
        idx
    }
}

impl SearchProblem for WeightedGraph {
    type State = usize;

    fn problem_id(&self) -> &str {
        &self.problem_id
    }

    fn start_state(&self) -> usize {
        0
    }

    fn is_goal(&self, state: &usize) -> bool {
        self.is_goal_node(*state)
    }

    fn successors(&self, state: &usize) -> Vec<Successor<usize>> {
        self.edges_from(*state)
            .iter()
            .map(|&(to, cost)| Successor::new(to, cost))
            .collect()
    }

    fn heuristic(&self, state: &usize) -> i64 {
        self.heuristic.get(*state).copied().unwrap_or(0)
    }
}

impl DescribeState for WeightedGraph {
    fn describe_state(&self, state: &usize) -> String {
        self.node_name(*state).to_string()
    }
}
