mod circuit;
mod core;
mod loader;
mod session;

pub use crate::core::{
    gate_count::GateCount,
    gate_type::{GateType, GateTypeError},
    node::{NodeId, Resolution},
};

pub use circuit::{
    evaluation::evaluate, Assignment, ConfigSource, EvaluationError, Evaluation, GateConfig, Input,
    Question, QuestionError, Quota, Rejection, Slot, TruthRow, TruthTable, MAX_TABLE_INPUTS,
};
pub use loader::{DirSource, LevelLoader, LoadError, LoadEvent, LoadSequence, QuestionSource};
pub use session::{Placement, Session};
