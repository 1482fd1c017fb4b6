use std::collections::HashSet;

use serde_json::Value;

use super::QuestionError;
use crate::{GateType, NodeId};

/// A named leaf of the circuit. `value` is `None` when the question only
/// lists the name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Input {
    pub name: NodeId,
    pub value: Option<bool>,
}

/// Empty gate position with its declared arity and ordered upstream references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub id: NodeId,
    pub arity: usize,
    /// Upstream ids in operand order. `None` marks a reference that is not an
    /// id at all and never resolves.
    pub inputs: Vec<Option<NodeId>>,
    /// Layout hints for the board; never read by evaluation.
    pub col: Option<i64>,
    pub row: Option<i64>,
}

impl Slot {
    pub fn new<I, N>(id: impl Into<NodeId>, arity: usize, inputs: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        Self {
            id: id.into(),
            arity,
            inputs: inputs.into_iter().map(|id| Some(id.into())).collect(),
            col: None,
            row: None,
        }
    }
}

/// Circuit definition of one level. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Question {
    pub id: Option<String>,
    pub title: Option<String>,
    pub inputs: Vec<Input>,
    pub slots: Vec<Slot>,
    pub output: Option<NodeId>,
    /// Raw `gateCounts`, interpreted by [`crate::GateConfig::resolve`].
    pub gate_counts: Option<Value>,
    /// Raw `allowedGates`, interpreted by [`crate::GateConfig::resolve`].
    pub allowed_gates: Option<Value>,
}

impl Question {
    pub fn new(output: impl Into<NodeId>) -> Self {
        Self {
            output: Some(output.into()),
            ..Default::default()
        }
    }

    pub fn add_input(&mut self, name: impl Into<NodeId>, value: Option<bool>) -> &mut Self {
        self.inputs.push(Input {
            name: name.into(),
            value,
        });
        self
    }

    pub fn add_slot(&mut self, slot: Slot) -> &mut Self {
        self.slots.push(slot);
        self
    }

    /// Display label: title, then id, then a generic fallback.
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("Circuit")
    }

    /// First input declared under `name`.
    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|input| *input.name == *name)
    }

    /// First slot declared under `id`.
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| *slot.id == *id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.input(id).is_some() || self.slot(id).is_some()
    }

    /// Whether `gate` fits the arity declared by `slot`.
    ///
    /// Unknown slots are accepted, like unresolvable references are left
    /// undetermined by evaluation instead of failing.
    pub fn check_arity(&self, slot: &str, gate: GateType) -> bool {
        self.slot(slot)
            .map_or(true, |slot| slot.arity == gate.arity())
    }

    /// Rejects questions whose inputs and slots share an identifier.
    pub fn check_ids(&self) -> Result<(), QuestionError> {
        let mut seen = HashSet::new();
        self.inputs
            .iter()
            .map(|input| &input.name)
            .chain(self.slots.iter().map(|slot| &slot.id))
            .try_for_each(|id| match seen.insert(id.as_str()) {
                true => Ok(()),
                false => Err(QuestionError::DuplicateNode(id.clone())),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_adder_sum() -> Question {
        let mut question = Question::new("S");
        question
            .add_input("A", Some(true))
            .add_input("B", Some(false))
            .add_slot(Slot::new("S", 2, ["A", "B"]))
            .add_slot(Slot::new("N", 1, ["S"]));
        question
    }

    #[test]
    fn test_lookup() {
        let question = half_adder_sum();
        assert_eq!(question.input("A").and_then(|i| i.value), Some(true));
        assert_eq!(question.slot("S").map(|s| s.arity), Some(2));
        assert!(question.contains("B"));
        assert!(question.contains("N"));
        assert!(!question.contains("C"));
    }

    #[test]
    fn test_check_arity() {
        let question = half_adder_sum();
        assert!(question.check_arity("S", GateType::Xor));
        assert!(!question.check_arity("S", GateType::Not));
        assert!(question.check_arity("N", GateType::Not));
        assert!(!question.check_arity("N", GateType::And));
        assert!(question.check_arity("missing", GateType::And));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut question = half_adder_sum();
        assert!(question.check_ids().is_ok());

        question.add_slot(Slot::new("A", 1, ["B"]));
        match question.check_ids() {
            Err(QuestionError::DuplicateNode(id)) => assert_eq!(id.as_str(), "A"),
            other => panic!("Expected DuplicateNode, got: {other:?}"),
        }
    }

    #[test]
    fn test_label_fallbacks() {
        let mut question = Question::default();
        assert_eq!(question.label(), "Circuit");
        question.id = Some("lvl-1".to_owned());
        assert_eq!(question.label(), "lvl-1");
        question.title = Some("Half adder".to_owned());
        assert_eq!(question.label(), "Half adder");
    }
}
