//! JSON form of a question:
//!
//! ```json
//! {
//!   "id": "lvl-2",
//!   "title": "Majority",
//!   "inputs": { "A": 1, "B": 0 },
//!   "slots": [{ "id": "S1", "arity": 2, "in": ["A", "B"], "col": 0, "row": 0 }],
//!   "output": "S1",
//!   "gateCounts": { "and": 1 }
//! }
//! ```
//!
//! `inputs` may also be a plain list of names. Missing or wrongly typed
//! `inputs`, `slots`, `output` or `in` entries load as empty or unresolvable so
//! that the board can still be shown; evaluation then reports the affected
//! part as undetermined.

use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Input, Question, QuestionError, Slot};
use crate::NodeId;

/// Top-level fields are kept as raw JSON so that a wrongly typed section
/// degrades to "nothing known" instead of rejecting the level.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    title: Value,
    #[serde(default)]
    inputs: Value,
    #[serde(default)]
    slots: Value,
    #[serde(default)]
    output: Value,
    #[serde(default)]
    gate_counts: Option<Value>,
    #[serde(default)]
    allowed_gates: Option<Value>,
}

fn string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn node_id(value: &Value) -> Option<NodeId> {
    value.as_str().map(NodeId::from)
}

/// 0/1 numbers and booleans are concrete bits; anything else leaves the input unknown.
fn input_bit(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(bit) => Some(*bit),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 0.0 => Some(false),
            Some(v) if v == 1.0 => Some(true),
            _ => None,
        },
        _ => None,
    }
}

/// A list names inputs without values; an object maps names to bits. Non-string
/// names in a list are skipped. Any other shape declares no inputs.
fn inputs(value: Value) -> Vec<Input> {
    match value {
        Value::Array(names) => names
            .iter()
            .filter_map(node_id)
            .map(|name| Input { name, value: None })
            .collect(),
        Value::Object(values) => values
            .into_iter()
            .map(|(name, value)| Input {
                name: NodeId(name),
                value: input_bit(&value),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Slot records without a string id cannot be referenced and are skipped. An
/// arity that is not a non-negative integer reads as 0, which no gate fits.
fn slot(record: &Map<String, Value>) -> Option<Slot> {
    let id = record.get("id").and_then(node_id)?;
    let arity = record
        .get("arity")
        .and_then(Value::as_u64)
        .map_or(0, |arity| arity as usize);
    let inputs = match record.get("in") {
        Some(Value::Array(refs)) => refs.iter().map(node_id).collect(),
        _ => Vec::new(),
    };

    Some(Slot {
        id,
        arity,
        inputs,
        col: record.get("col").and_then(Value::as_i64),
        row: record.get("row").and_then(Value::as_i64),
    })
}

fn slots(value: &Value) -> Vec<Slot> {
    match value {
        Value::Array(records) => records
            .iter()
            .filter_map(Value::as_object)
            .filter_map(slot)
            .collect(),
        _ => Vec::new(),
    }
}

impl From<RawQuestion> for Question {
    fn from(raw: RawQuestion) -> Self {
        Question {
            id: string(&raw.id),
            title: string(&raw.title),
            slots: slots(&raw.slots),
            inputs: inputs(raw.inputs),
            output: node_id(&raw.output),
            gate_counts: raw.gate_counts,
            allowed_gates: raw.allowed_gates,
        }
    }
}

impl Question {
    pub fn from_json_value(value: Value) -> Result<Self, QuestionError> {
        let question: Question = serde_json::from_value::<RawQuestion>(value)?.into();
        question.check_ids()?;
        Ok(question)
    }

    pub fn from_json_str(json: &str) -> Result<Self, QuestionError> {
        let question: Question = serde_json::from_str::<RawQuestion>(json)?.into();
        question.check_ids()?;
        Ok(question)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, QuestionError> {
        let question: Question = serde_json::from_reader::<_, RawQuestion>(reader)?.into();
        question.check_ids()?;
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Assignment, Resolution};

    #[test]
    fn test_inputs_as_mapping() {
        let question = Question::from_json_value(json!({
            "inputs": { "B": 0, "A": 1, "C": true, "D": 7 },
            "slots": [{ "id": "S", "arity": 2, "in": ["A", "B"] }],
            "output": "S",
        }))
        .unwrap();

        let inputs = question
            .inputs
            .iter()
            .map(|input| (input.name.as_str(), input.value))
            .collect::<Vec<_>>();
        assert_eq!(
            inputs,
            vec![
                ("B", Some(false)),
                ("A", Some(true)),
                ("C", Some(true)),
                ("D", None),
            ]
        );
    }

    #[test]
    fn test_inputs_as_names() {
        let question = Question::from_json_str(
            r#"{"inputs": ["A", "B"], "slots": [], "output": "S"}"#,
        )
        .unwrap();
        assert_eq!(question.inputs.len(), 2);
        assert!(question.inputs.iter().all(|input| input.value.is_none()));
    }

    #[test]
    fn test_full_level_fields() {
        let question = Question::from_json_value(json!({
            "id": "lvl-3",
            "title": "Three gates",
            "inputs": { "A": 1 },
            "slots": [
                { "id": "S1", "arity": 1, "in": ["A"], "col": 0, "row": 1 },
                { "id": "S2", "arity": 2, "in": ["S1", "A"] }
            ],
            "output": "S2",
            "gateCounts": { "and": 1, "not": 2 },
            "allowedGates": ["or"],
        }))
        .unwrap();

        assert_eq!(question.label(), "Three gates");
        assert_eq!(question.slots[0].col, Some(0));
        assert_eq!(question.slots[0].row, Some(1));
        assert_eq!(
            question.slots[1].inputs,
            vec![Some(NodeId::from("S1")), Some(NodeId::from("A"))]
        );
        assert_eq!(question.output, Some(NodeId::from("S2")));
        assert_eq!(question.gate_counts, Some(json!({ "and": 1, "not": 2 })));
        assert_eq!(question.allowed_gates, Some(json!(["or"])));
    }

    #[test]
    fn test_missing_sections_load_empty() {
        let question = Question::from_json_str("{}").unwrap();
        assert!(question.inputs.is_empty());
        assert!(question.slots.is_empty());
        assert_eq!(question.output, None);
    }

    #[test]
    fn test_collision_rejected() {
        let result = Question::from_json_value(json!({
            "inputs": ["A"],
            "slots": [{ "id": "A", "arity": 1, "in": ["A"] }],
            "output": "A",
        }));
        assert!(matches!(result, Err(QuestionError::DuplicateNode(id)) if id.as_str() == "A"));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Question::from_json_str("{ \"slots\": [ }"),
            Err(QuestionError::Json(_))
        ));
    }

    #[test]
    fn test_wrongly_typed_sections_load_empty() {
        for inputs in [json!(null), json!(7), json!("A")] {
            let question = Question::from_json_value(json!({
                "inputs": inputs,
                "slots": 3,
                "output": "S",
            }))
            .unwrap();
            assert!(question.inputs.is_empty(), "{inputs}");
            assert!(question.slots.is_empty());
        }
    }

    #[test]
    fn test_non_string_output_is_unresolvable() {
        let question = Question::from_json_value(json!({
            "inputs": { "A": 1 },
            "slots": [{ "id": "S", "arity": 1, "in": ["A"] }],
            "output": 5,
        }))
        .unwrap();
        assert_eq!(question.output, None);

        let assignment = Assignment::from_names([("S", "not")]).unwrap();
        assert_eq!(
            question.evaluate(&assignment).unwrap().value,
            Resolution::Undetermined
        );
    }

    #[test]
    fn test_non_string_reference_is_unresolvable() {
        let question = Question::from_json_value(json!({
            "inputs": { "A": 1, "B": 0 },
            "slots": [
                { "id": "S", "arity": 2, "in": ["A", null] },
                { "id": "T", "arity": 2, "in": ["A", "B"] }
            ],
            "output": "S",
        }))
        .unwrap();
        assert_eq!(question.slots[0].inputs, vec![Some(NodeId::from("A")), None]);

        let mut assignment = Assignment::from_names([("S", "or"), ("T", "or")]).unwrap();
        assert_eq!(
            question.evaluate(&assignment).unwrap().value,
            Resolution::Undetermined
        );

        assignment.clear("S");
        let mut rewired = question.clone();
        rewired.output = Some(NodeId::from("T"));
        assert_eq!(
            rewired.evaluate(&assignment).unwrap().value,
            Resolution::Bit(true)
        );
    }

    #[test]
    fn test_malformed_slot_records() {
        let question = Question::from_json_value(json!({
            "inputs": ["A", 3, "B"],
            "slots": [
                { "arity": 1, "in": ["A"] },
                "S0",
                { "id": "S1", "arity": "two", "in": "A" },
                { "id": "S2", "arity": 1, "in": ["A"], "col": "left" }
            ],
            "output": "S2",
        }))
        .unwrap();

        assert_eq!(question.inputs.len(), 2);
        let ids = question.slots.iter().map(|slot| slot.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["S1", "S2"]);
        assert_eq!(question.slots[0].arity, 0);
        assert!(question.slots[0].inputs.is_empty());
        assert_eq!(question.slots[1].col, None);
        assert!(!question.check_arity("S1", crate::GateType::Not));
    }
}
