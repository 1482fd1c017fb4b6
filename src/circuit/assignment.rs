use std::collections::BTreeMap;

use crate::{GateType, GateTypeError, NodeId};

/// Gates currently placed into slots. A slot missing from the map is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    gates: BTreeMap<NodeId, GateType>,
}

impl Assignment {
    /// Builds an assignment from raw `slot -> gate name` pairs.
    ///
    /// An unrecognized gate name is an internal inconsistency and fails the
    /// whole conversion.
    pub fn from_names<'n>(
        pairs: impl IntoIterator<Item = (&'n str, &'n str)>,
    ) -> Result<Self, GateTypeError> {
        let mut assignment = Self::default();
        for (slot, name) in pairs {
            assignment.set(slot, name.parse()?);
        }
        Ok(assignment)
    }

    /// Copy of the current mapping; later mutation of either side is independent.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn reset(&mut self) {
        self.gates.clear();
    }

    /// Places `gate` into `slot`, returning the gate it replaced.
    pub fn set(&mut self, slot: impl Into<NodeId>, gate: GateType) -> Option<GateType> {
        self.gates.insert(slot.into(), gate)
    }

    /// Empties `slot`. No-op when it holds nothing.
    pub fn clear(&mut self, slot: &str) -> Option<GateType> {
        self.gates.remove(slot)
    }

    pub fn gate(&self, slot: &str) -> Option<GateType> {
        self.gates.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, GateType)> + '_ {
        self.gates.iter().map(|(slot, gate)| (slot, *gate))
    }
}
