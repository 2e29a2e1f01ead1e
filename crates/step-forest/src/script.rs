//! JSON operation scripts driving the engine, used by the `tree-trace` bin.
//!
//! ```json
//! {
//!   "policy": "red_black",
//!   "build": [10, 20, 30],
//!   "ops": [{ "op": "insert", "key": 5 }, { "op": "delete", "key": 20 }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::avl::Avl;
use crate::engine;
use crate::red_black::RedBlack;
use crate::step::Step;
use crate::tree::Policy;
use crate::types::{Outcome, PolicyKind};

pub type ScriptKey = i64;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("invalid script: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to encode steps: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default)]
    pub build: Vec<ScriptKey>,
    #[serde(default)]
    pub ops: Vec<ScriptOp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "key", rename_all = "snake_case")]
pub enum ScriptOp {
    Insert(ScriptKey),
    Delete(ScriptKey),
    Search(ScriptKey),
}

/// Outcome and steps of one script entry, encoded as a flat
/// `{"op", "key", "outcome", "steps"}` record. The initial build has
/// `op: None` and is encoded without the `op` and `key` fields.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub op: Option<ScriptOp>,
    pub outcome: Outcome,
    pub steps: Vec<Step<ScriptKey>>,
}

impl Script {
    pub fn from_json(input: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(input).map_err(ScriptError::Parse)
    }

    /// Runs the build and then every op against the resulting tree.
    pub fn run(&self) -> Vec<Report> {
        match self.policy {
            PolicyKind::Avl => self.run_with::<Avl>(),
            PolicyKind::RedBlack => self.run_with::<RedBlack>(),
        }
    }

    fn run_with<P: Policy<ScriptKey>>(&self) -> Vec<Report> {
        let mut reports = Vec::with_capacity(self.ops.len() + 1);
        let built = engine::build::<ScriptKey, P, _>(self.build.iter().copied());
        reports.push(Report {
            op: None,
            outcome: built.outcome,
            steps: built.steps,
        });

        let mut tree = built.tree;
        for &op in &self.ops {
            let (outcome, steps) = match op {
                ScriptOp::Insert(key) => {
                    let trace = engine::insert(&tree, key);
                    tree = trace.tree;
                    (trace.outcome, trace.steps)
                }
                ScriptOp::Delete(key) => {
                    let trace = engine::delete(&tree, &key);
                    tree = trace.tree;
                    (trace.outcome, trace.steps)
                }
                ScriptOp::Search(key) => {
                    let trace = engine::search(&tree, &key);
                    (trace.outcome, trace.steps)
                }
            };
            reports.push(Report {
                op: Some(op),
                outcome,
                steps,
            });
        }
        reports
    }
}

/// Parses `input`, runs it and encodes the reports as a JSON array.
pub fn run_json(input: &str) -> Result<String, ScriptError> {
    let script = Script::from_json(input)?;
    serde_json::to_string(&script.run()).map_err(ScriptError::Encode)
}
