use std::collections::HashMap;

use bitvec::prelude::*;

use super::Question;
use crate::{Assignment, NodeId, Resolution};

/// Largest input count [`Question::truth_table`] will enumerate.
pub const MAX_TABLE_INPUTS: usize = 16;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Cycle detected: slot {0} depends on itself")]
    Cycle(NodeId),
    #[error("Truth table over {0} inputs exceeds the limit of {max}", max = MAX_TABLE_INPUTS)]
    TooManyInputs(usize),
}

/// Outcome of one evaluation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub value: Resolution,
    /// Every slot that resolved to a bit, in resolution order.
    pub trace: Vec<(NodeId, bool)>,
}

impl Evaluation {
    pub fn slot(&self, id: &str) -> Option<bool> {
        self.trace
            .iter()
            .find(|(slot, _)| slot.as_str() == id)
            .map(|(_, bit)| *bit)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthRow {
    /// Input bits in the question's declared input order.
    pub inputs: Vec<bool>,
    pub output: Resolution,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    pub inputs: Vec<NodeId>,
    pub rows: Vec<TruthRow>,
}

struct Evaluator<'q> {
    question: &'q Question,
    assignment: &'q Assignment,
    input_values: HashMap<&'q str, Option<bool>>,
    slot_index: HashMap<&'q str, usize>,
    memo: Vec<Option<Resolution>>,
    visiting: BitVec,
    trace: Vec<(NodeId, bool)>,
}

impl<'q> Evaluator<'q> {
    fn new(question: &'q Question, assignment: &'q Assignment) -> Self {
        let slot_count = question.slots.len();

        // First declaration wins, matching `Question::input` and `Question::slot`.
        let mut input_values = HashMap::new();
        for input in &question.inputs {
            input_values.entry(input.name.as_str()).or_insert(input.value);
        }
        let mut slot_index = HashMap::new();
        for (index, slot) in question.slots.iter().enumerate() {
            slot_index.entry(slot.id.as_str()).or_insert(index);
        }

        Self {
            question,
            assignment,
            input_values,
            slot_index,
            memo: vec![None; slot_count],
            visiting: bitvec![0; slot_count],
            trace: Vec::new(),
        }
    }

    fn with_input_bits(mut self, bits: &[bool]) -> Self {
        for (input, bit) in self.question.inputs.iter().zip(bits).rev() {
            self.input_values.insert(input.name.as_str(), Some(*bit));
        }
        self
    }

    fn solve(&mut self, id: &str) -> Result<Resolution, Error> {
        if let Some(value) = self.input_values.get(id) {
            return Ok((*value).into());
        }

        let Some(&index) = self.slot_index.get(id) else {
            return Ok(Resolution::Undetermined);
        };
        if let Some(resolved) = self.memo[index] {
            return Ok(resolved);
        }

        let question = self.question;
        let slot = &question.slots[index];
        let Some(gate) = self.assignment.gate(id) else {
            self.memo[index] = Some(Resolution::Undetermined);
            return Ok(Resolution::Undetermined);
        };

        if self.visiting[index] {
            return Err(Error::Cycle(slot.id.clone()));
        }
        self.visiting.set(index, true);

        let mut operands = Vec::with_capacity(slot.inputs.len());
        for upstream in &slot.inputs {
            let resolved = match upstream {
                Some(upstream) => self.solve(upstream)?,
                None => Resolution::Undetermined,
            };
            match resolved {
                Resolution::Bit(bit) => operands.push(bit),
                Resolution::Undetermined => break,
            }
        }
        self.visiting.set(index, false);

        let resolved = if operands.len() == slot.inputs.len() {
            gate.apply(&operands).into()
        } else {
            Resolution::Undetermined
        };

        if let Resolution::Bit(bit) = resolved {
            log::debug!("evaluate: slot {id} {gate}({operands:?}) = {bit}");
            self.trace.push((slot.id.clone(), bit));
        }
        self.memo[index] = Some(resolved);
        Ok(resolved)
    }

    fn run(mut self) -> Result<Evaluation, Error> {
        let value = match &self.question.output {
            Some(output) => self.solve(output)?,
            None => Resolution::Undetermined,
        };
        Ok(Evaluation {
            value,
            trace: self.trace,
        })
    }
}

impl Question {
    /// Resolves the output bit under `assignment`.
    ///
    /// Unknown references, inputs without a value, empty slots and gates short
    /// of operands all leave the affected sub-graph undetermined. A slot that
    /// transitively feeds itself is an error.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<Evaluation, Error> {
        let evaluation = Evaluator::new(self, assignment).run()?;
        log::debug!(
            "evaluate: {} output={} resolved_slots={}",
            self.label(),
            evaluation.value,
            evaluation.trace.len()
        );
        Ok(evaluation)
    }

    /// Output for every combination of input bits, ignoring any concrete
    /// values the question declares. Row `r` assigns the first input the most
    /// significant bit of `r`.
    pub fn truth_table(&self, assignment: &Assignment) -> Result<TruthTable, Error> {
        let n = self.inputs.len();
        if n > MAX_TABLE_INPUTS {
            return Err(Error::TooManyInputs(n));
        }

        let rows = (0..1usize << n)
            .map(|row| {
                let inputs = (0..n)
                    .map(|i| (row >> (n - 1 - i)) & 1 == 1)
                    .collect::<Vec<_>>();
                let output = Evaluator::new(self, assignment)
                    .with_input_bits(&inputs)
                    .run()?
                    .value;
                Ok(TruthRow { inputs, output })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(TruthTable {
            inputs: self.inputs.iter().map(|input| input.name.clone()).collect(),
            rows,
        })
    }
}

/// Free-function form of [`Question::evaluate`].
pub fn evaluate(question: &Question, assignment: &Assignment) -> Result<Evaluation, Error> {
    question.evaluate(assignment)
}
