//! Run configuration: which problem to build and how to search it.
//!
//! A config is a JSON object:
//!
//! ```text
//! {
//!   "problem": "eight_puzzle",
//!   "params":  { "depth": 10, "seed": 7, "heuristic": "manhattan" },
//!   "policy":  { "strategy": "a_star", "max_expansions": null, "record_graph": true }
//! }
//! ```
//!
//! `params` and `policy` are optional; every missing field takes its
//! default. [`RunConfig::to_json_value`] writes the fully-defaulted form, so
//! two configs that run the same search have the same [`RunConfig::digest`].

use std::collections::BTreeMap;

use pathwise_kernel::canon::canonical_json_bytes;
use pathwise_kernel::hash::{canonical_hash, ContentHash, HashDomain};
use pathwise_search::error::SearchError;
use pathwise_search::policy::SearchPolicy;
use serde_json::{json, Map, Value};

use crate::report::RunReport;
use crate::runner::{run_search, RunError};
use crate::worlds::eight_puzzle::{Board, BoardError, EightPuzzle, PuzzleHeuristic};
use crate::worlds::missionaries::Missionaries;
use crate::worlds::peg_solitaire::{PegBoardError, PegHeuristic, PegSolitaire};
use crate::worlds::rabbit_leap::RabbitLeap;
use crate::worlds::sentence_alignment::{SentenceAlignment, DEFAULT_PLAGIARISM_THRESHOLD};
use crate::worlds::weighted_graph::{GraphError, WeightedGraph};

/// Ceiling for peg solitaire runs whose policy leaves `max_expansions` out.
pub const PEG_SOLITAIRE_MAX_EXPANSIONS: u64 = 5_000_000;

/// Error reading a [`RunConfig`] or building its problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidJson { detail: String },
    NotAnObject { field: &'static str },
    MissingField { field: &'static str },
    InvalidField { field: &'static str, detail: String },
    UnknownProblem { name: String },
    Policy(SearchError),
    Graph(GraphError),
    Board(BoardError),
    PegBoard(PegBoardError),
    CanonFailed { detail: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson { detail } => write!(f, "invalid JSON: {detail}"),
            Self::NotAnObject { field } => write!(f, "{field} must be a JSON object"),
            Self::MissingField { field } => write!(f, "missing field {field}"),
            Self::InvalidField { field, detail } => write!(f, "invalid {field}: {detail}"),
            Self::UnknownProblem { name } => write!(f, "unknown problem {name:?}"),
            Self::Policy(e) => write!(f, "{e}"),
            Self::Graph(e) => write!(f, "graph: {e}"),
            Self::Board(e) => write!(f, "board: {e}"),
            Self::PegBoard(e) => write!(f, "peg board: {e}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One directed (or undirected) edge of a `weighted_graph` config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeConfig {
    pub from: String,
    pub to: String,
    pub cost: i64,
}

/// Problem selection plus its parameters, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemConfig {
    /// Unit-cost chain `nodes[0] → nodes[1] → …`.
    LineGraph { nodes: Vec<String>, goal: String },
    WeightedGraph {
        start: String,
        goals: Vec<String>,
        edges: Vec<EdgeConfig>,
        undirected: bool,
        heuristic: BTreeMap<String, i64>,
    },
    Missionaries { people: u32, capacity: u32 },
    RabbitLeap { per_side: usize, prune_dead_ends: bool },
    EightPuzzle {
        goal: Board,
        /// Explicit start; when absent the start is `goal` scrambled.
        start: Option<Board>,
        depth: u32,
        seed: u64,
        heuristic: PuzzleHeuristic,
    },
    PegSolitaire {
        /// Seven rows; `None` is the English board.
        rows: Option<Vec<String>>,
        heuristic: PegHeuristic,
    },
    SentenceAlignment {
        left: String,
        right: String,
        threshold: usize,
    },
}

impl ProblemConfig {
    /// Names accepted in the `problem` field.
    pub const NAMES: [&'static str; 7] = [
        "line_graph",
        "weighted_graph",
        "missionaries",
        "rabbit_leap",
        "eight_puzzle",
        "peg_solitaire",
        "sentence_alignment",
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LineGraph { .. } => "line_graph",
            Self::WeightedGraph { .. } => "weighted_graph",
            Self::Missionaries { .. } => "missionaries",
            Self::RabbitLeap { .. } => "rabbit_leap",
            Self::EightPuzzle { .. } => "eight_puzzle",
            Self::PegSolitaire { .. } => "peg_solitaire",
            Self::SentenceAlignment { .. } => "sentence_alignment",
        }
    }

    fn from_params(name: &str, params: &Params<'_>) -> Result<Self, ConfigError> {
        let config = match name {
            "line_graph" => Self::LineGraph {
                nodes: params.strings("nodes")?.ok_or(ConfigError::MissingField { field: "nodes" })?,
                goal: params.string("goal")?.ok_or(ConfigError::MissingField { field: "goal" })?,
            },
            "weighted_graph" => Self::WeightedGraph {
                start: params.string("start")?.ok_or(ConfigError::MissingField { field: "start" })?,
                goals: params.strings("goals")?.unwrap_or_default(),
                edges: params.edges()?,
                undirected: params.bool("undirected")?.unwrap_or(false),
                heuristic: params.int_table("heuristic")?,
            },
            "missionaries" => Self::Missionaries {
                people: params.u32("people")?.unwrap_or(3),
                capacity: params.u32("capacity")?.unwrap_or(2),
            },
            "rabbit_leap" => Self::RabbitLeap {
                per_side: params.usize("per_side")?.unwrap_or(3),
                prune_dead_ends: params.bool("prune_dead_ends")?.unwrap_or(true),
            },
            "eight_puzzle" => Self::EightPuzzle {
                goal: params.board("goal")?.unwrap_or(Board::SPIRAL),
                start: params.board("start")?,
                depth: params.u32("depth")?.unwrap_or(10),
                seed: params.u64("seed")?.unwrap_or(0),
                heuristic: match params.string("heuristic")? {
                    None => PuzzleHeuristic::default(),
                    Some(h) => PuzzleHeuristic::parse(&h).ok_or_else(|| ConfigError::InvalidField {
                        field: "heuristic",
                        detail: format!("unknown puzzle heuristic {h:?}"),
                    })?,
                },
            },
            "peg_solitaire" => Self::PegSolitaire {
                rows: params.strings("rows")?,
                heuristic: match params.string("heuristic")? {
                    None => PegHeuristic::default(),
                    Some(h) => PegHeuristic::parse(&h).ok_or_else(|| ConfigError::InvalidField {
                        field: "heuristic",
                        detail: format!("unknown peg heuristic {h:?}"),
                    })?,
                },
            },
            "sentence_alignment" => Self::SentenceAlignment {
                left: params.string("left")?.ok_or(ConfigError::MissingField { field: "left" })?,
                right: params.string("right")?.ok_or(ConfigError::MissingField { field: "right" })?,
                threshold: params
                    .usize("threshold")?
                    .unwrap_or(DEFAULT_PLAGIARISM_THRESHOLD),
            },
            other => {
                return Err(ConfigError::UnknownProblem {
                    name: other.to_string(),
                })
            }
        };
        Ok(config)
    }

    /// Expansion ceiling applied when the config names none. An explicit
    /// `"max_expansions": null` still runs unbounded.
    #[must_use]
    pub fn default_max_expansions(&self) -> Option<u64> {
        match self {
            Self::PegSolitaire { .. } => Some(PEG_SOLITAIRE_MAX_EXPANSIONS),
            _ => None,
        }
    }

    fn params_json(&self) -> Value {
        match self {
            Self::LineGraph { nodes, goal } => json!({"goal": goal, "nodes": nodes}),
            Self::WeightedGraph {
                start,
                goals,
                edges,
                undirected,
                heuristic,
            } => json!({
                "edges": edges
                    .iter()
                    .map(|e| json!([e.from, e.to, e.cost]))
                    .collect::<Vec<_>>(),
                "goals": goals,
                "heuristic": heuristic,
                "start": start,
                "undirected": undirected,
            }),
            Self::Missionaries { people, capacity } => {
                json!({"capacity": capacity, "people": people})
            }
            Self::RabbitLeap {
                per_side,
                prune_dead_ends,
            } => json!({"per_side": per_side, "prune_dead_ends": prune_dead_ends}),
            Self::EightPuzzle {
                goal,
                start,
                depth,
                seed,
                heuristic,
            } => json!({
                "depth": depth,
                "goal": board_text(*goal),
                "heuristic": heuristic.as_str(),
                "seed": seed,
                "start": start.map(board_text),
            }),
            Self::PegSolitaire { rows, heuristic } => json!({
                "heuristic": heuristic.as_str(),
                "rows": rows,
            }),
            Self::SentenceAlignment {
                left,
                right,
                threshold,
            } => json!({"left": left, "right": right, "threshold": threshold}),
        }
    }
}

/// A parsed, defaulted run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub problem: ProblemConfig,
    pub policy: SearchPolicy,
}

impl RunConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON, unknown problems or
    /// strategies, and fields of the wrong type.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| ConfigError::InvalidJson {
            detail: e.to_string(),
        })?;
        Self::from_json_value(&value)
    }

    /// # Errors
    ///
    /// See [`Self::from_json_bytes`].
    pub fn from_json_value(value: &Value) -> Result<Self, ConfigError> {
        let obj = value
            .as_object()
            .ok_or(ConfigError::NotAnObject { field: "config" })?;
        let name = obj
            .get("problem")
            .ok_or(ConfigError::MissingField { field: "problem" })?
            .as_str()
            .ok_or_else(|| ConfigError::InvalidField {
                field: "problem",
                detail: "must be a string".into(),
            })?;

        let empty = Map::new();
        let params = match obj.get("params") {
            None | Some(Value::Null) => &empty,
            Some(v) => v
                .as_object()
                .ok_or(ConfigError::NotAnObject { field: "params" })?,
        };
        let problem = ProblemConfig::from_params(name, &Params(params))?;

        let policy_json = obj.get("policy").filter(|v| !v.is_null());
        let mut policy = match policy_json {
            None => SearchPolicy::default(),
            Some(v) => SearchPolicy::from_json_value(v).map_err(ConfigError::Policy)?,
        };
        let ceiling_given = policy_json.is_some_and(|v| v.get("max_expansions").is_some());
        if !ceiling_given {
            policy.max_expansions = problem.default_max_expansions();
        }

        Ok(Self { problem, policy })
    }

    /// Fully-defaulted JSON form.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "params": self.problem.params_json(),
            "policy": self.policy.to_json_value(),
            "problem": self.problem.name(),
        })
    }

    /// Content hash of the canonical JSON form under [`HashDomain::RunConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CanonFailed`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, ConfigError> {
        let bytes =
            canonical_json_bytes(&self.to_json_value()).map_err(|e| ConfigError::CanonFailed {
                detail: e.to_string(),
            })?;
        Ok(canonical_hash(HashDomain::RunConfig, &bytes))
    }
}

/// Build the configured problem and run it.
///
/// # Errors
///
/// Returns [`RunError::Config`] when the problem cannot be built from its
/// parameters, and any other [`RunError`] from [`run_search`].
pub fn run_config(config: &RunConfig) -> Result<RunReport, RunError> {
    let policy = &config.policy;
    match &config.problem {
        ProblemConfig::LineGraph { nodes, goal } => {
            let names: Vec<&str> = nodes.iter().map(String::as_str).collect();
            if names.is_empty() {
                return Err(RunError::Config(ConfigError::InvalidField {
                    field: "nodes",
                    detail: "at least one node is required".into(),
                }));
            }
            run_search(&WeightedGraph::line(&names, goal), policy)
        }
        ProblemConfig::WeightedGraph {
            start,
            goals,
            edges,
            undirected,
            heuristic,
        } => {
            let graph = build_graph(start, goals, edges, *undirected, heuristic)
                .map_err(|e| RunError::Config(ConfigError::Graph(e)))?;
            run_search(&graph, policy)
        }
        ProblemConfig::Missionaries { people, capacity } => {
            run_search(&Missionaries::new(*people, *capacity), policy)
        }
        ProblemConfig::RabbitLeap {
            per_side,
            prune_dead_ends,
        } => {
            let problem = RabbitLeap::new(*per_side);
            if *prune_dead_ends {
                run_search(&problem, policy)
            } else {
                run_search(&problem.without_pruning(), policy)
            }
        }
        ProblemConfig::EightPuzzle {
            goal,
            start,
            depth,
            seed,
            heuristic,
        } => {
            let puzzle = match start {
                Some(start) => EightPuzzle::new(*start, *goal, *heuristic),
                None => EightPuzzle::scrambled(*goal, *depth, *seed, *heuristic),
            };
            run_search(&puzzle, policy)
        }
        ProblemConfig::PegSolitaire { rows, heuristic } => {
            let problem = match rows {
                Some(rows) => PegSolitaire::parse(rows, *heuristic)
                    .map_err(|e| RunError::Config(ConfigError::PegBoard(e)))?,
                None => PegSolitaire::english(*heuristic),
            };
            run_search(&problem, policy)
        }
        ProblemConfig::SentenceAlignment {
            left,
            right,
            threshold,
        } => {
            let problem = SentenceAlignment::from_texts(left, right).with_threshold(*threshold);
            run_search(&problem, policy)
        }
    }
}

fn build_graph(
    start: &str,
    goals: &[String],
    edges: &[EdgeConfig],
    undirected: bool,
    heuristic: &BTreeMap<String, i64>,
) -> Result<WeightedGraph, GraphError> {
    let mut graph = WeightedGraph::new("weighted_graph", start);
    for edge in edges {
        if undirected {
            graph.add_undirected_edge(&edge.from, &edge.to, edge.cost)?;
        } else {
            graph.add_edge(&edge.from, &edge.to, edge.cost)?;
        }
    }
    for (name, value) in heuristic {
        graph.set_heuristic(name, *value)?;
    }
    for goal in goals {
        graph.add_goal(goal);
    }
    Ok(graph)
}

fn board_text(board: Board) -> String {
    board
        .0
        .chunks(3)
        .map(|row| row.iter().map(u8::to_string).collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}

/// Typed accessors over the `params` object. `Ok(None)` means absent or null.
struct Params<'a>(&'a Map<String, Value>);

impl Params<'_> {
    fn get(&self, field: &'static str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    fn string(&self, field: &'static str) -> Result<Option<String>, ConfigError> {
        self.get(field)
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| wrong_type(field, "a string"))
            })
            .transpose()
    }

    fn strings(&self, field: &'static str) -> Result<Option<Vec<String>>, ConfigError> {
        self.get(field)
            .map(|v| {
                v.as_array()
                    .and_then(|items| {
                        items
                            .iter()
                            .map(|i| i.as_str().map(str::to_string))
                            .collect::<Option<Vec<_>>>()
                    })
                    .ok_or_else(|| wrong_type(field, "an array of strings"))
            })
            .transpose()
    }

    fn bool(&self, field: &'static str) -> Result<Option<bool>, ConfigError> {
        self.get(field)
            .map(|v| v.as_bool().ok_or_else(|| wrong_type(field, "a boolean")))
            .transpose()
    }

    fn u64(&self, field: &'static str) -> Result<Option<u64>, ConfigError> {
        self.get(field)
            .map(|v| {
                v.as_u64()
                    .ok_or_else(|| wrong_type(field, "a non-negative integer"))
            })
            .transpose()
    }

    fn u32(&self, field: &'static str) -> Result<Option<u32>, ConfigError> {
        self.u64(field)?
            .map(|v| u32::try_from(v).map_err(|_| wrong_type(field, "a 32-bit integer")))
            .transpose()
    }

    fn usize(&self, field: &'static str) -> Result<Option<usize>, ConfigError> {
        self.u64(field)?
            .map(|v| usize::try_from(v).map_err(|_| wrong_type(field, "a machine-sized integer")))
            .transpose()
    }

    fn board(&self, field: &'static str) -> Result<Option<Board>, ConfigError> {
        self.string(field)?
            .map(|text| Board::parse(&text).map_err(ConfigError::Board))
            .transpose()
    }

    fn int_table(&self, field: &'static str) -> Result<BTreeMap<String, i64>, ConfigError> {
        let Some(v) = self.get(field) else {
            return Ok(BTreeMap::new());
        };
        let obj = v.as_object().ok_or(ConfigError::NotAnObject { field })?;
        obj.iter()
            .map(|(name, h)| {
                h.as_i64()
                    .map(|h| (name.clone(), h))
                    .ok_or_else(|| wrong_type(field, "an object of integers"))
            })
            .collect()
    }

    /// `edges` is an array of `[from, to, cost]` triples.
    fn edges(&self) -> Result<Vec<EdgeConfig>, ConfigError> {
        let Some(v) = self.get("edges") else {
            return Ok(Vec::new());
        };
        let items = v
            .as_array()
            .ok_or_else(|| wrong_type("edges", "an array"))?;
        items
            .iter()
            .map(|item| match item.as_array().map(Vec::as_slice) {
                Some([from, to, cost]) => Ok(EdgeConfig {
                    from: from
                        .as_str()
                        .ok_or_else(|| wrong_type("edges", "[from, to, cost] triples"))?
                        .to_string(),
                    to: to
                        .as_str()
                        .ok_or_else(|| wrong_type("edges", "[from, to, cost] triples"))?
                        .to_string(),
                    cost: cost
                        .as_i64()
                        .ok_or_else(|| wrong_type("edges", "[from, to, cost] triples"))?,
                }),
                _ => Err(wrong_type("edges", "[from, to, cost] triples")),
            })
            .collect()
    }
}

fn wrong_type(field: &'static str, expected: &str) -> ConfigError {
    ConfigError::InvalidField {
        field,
        detail: format!("must be {expected}"),
    }
}
