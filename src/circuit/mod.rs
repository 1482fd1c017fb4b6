//! # Slot Circuits
//!
//! A question is a DAG of named nodes. Inputs are leaves carrying a bit (or
//! nothing, when the level only names them); slots are empty gate positions
//! with a declared arity and an ordered list of upstream node ids. The player
//! fills slots with gates and the output node is re-evaluated after every move.
//!
//! ## Flow
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐    ┌──────────────┐
//! │  Question   │───▶│  GateConfig  │───▶│ Assignment  │───▶│  Evaluation  │
//! │   (JSON)    │    │ (gate budget)│    │ (placements)│    │ (output bit) │
//! └─────────────┘    └──────────────┘    └─────────────┘    └──────────────┘
//!   • inputs           • gateCounts        • slot → gate      • 0 / 1 / ?
//!   • slots            • allowedGates      • arity + quota    • resolved slots
//!   • output           • default: all 8      checked first
//! ```
//!
//! ## Evaluation
//! Evaluation walks back from the output, memoizing each slot for the duration
//! of one call. Anything that cannot be resolved (an unknown id, an input
//! without a value, an empty slot) makes every slot downstream of it
//! [`Resolution::Undetermined`](crate::Resolution) instead of failing. A cycle
//! between filled slots is reported as [`EvaluationError::Cycle`].

pub mod assignment;
pub mod constraints;
pub mod errors;
pub mod evaluation;
pub mod serialization;
pub mod structure;

pub use assignment::Assignment;
pub use constraints::{ConfigSource, GateConfig, Quota, Rejection};
pub use errors::QuestionError;
pub use evaluation::{
    Error as EvaluationError, Evaluation, TruthRow, TruthTable, MAX_TABLE_INPUTS,
};
pub use structure::{Input, Question, Slot};
