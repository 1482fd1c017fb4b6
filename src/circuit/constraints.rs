//! Which gates a level lets the player place, and how many of each.
//!
//! Resolution order, first match wins:
//! 1. `gateCounts`: an object mapping gate names to non-negative quotas.
//!    Entries with an unknown name or a quota that is negative, non-numeric or
//!    non-finite are dropped one by one.
//! 2. `allowedGates`: a list of gate names, each with unlimited quota.
//! 3. All eight kinds, unlimited.

use std::{collections::BTreeMap, fmt};

use serde_json::Value;

use super::Question;
use crate::{Assignment, GateCount, GateType, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quota {
    Limited(u32),
    Unlimited,
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quota::Limited(n) => write!(f, "{n}"),
            Quota::Unlimited => f.write_str("∞"),
        }
    }
}

/// Where a [`GateConfig`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    GateCounts,
    AllowedGates,
    Default,
}

/// Why a placement was refused. Refusals are ordinary outcomes, not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    UnknownSlot(NodeId),
    UnknownGate(String),
    ArityMismatch {
        slot: NodeId,
        gate: GateType,
        expected: usize,
    },
    NotAllowed(GateType),
    QuotaExhausted { gate: GateType, quota: u32 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownSlot(slot) => write!(f, "no slot {slot}"),
            Rejection::UnknownGate(name) => write!(f, "unknown gate {name:?}"),
            Rejection::ArityMismatch {
                slot,
                gate,
                expected,
            } => write!(
                f,
                "{gate} takes {} inputs but slot {slot} has {expected}",
                gate.arity()
            ),
            Rejection::NotAllowed(gate) => write!(f, "{gate} is not available in this level"),
            Rejection::QuotaExhausted { gate, quota } => {
                write!(f, "all {quota} {gate} gates are already placed")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateConfig {
    /// Placeable kinds, in the order the level lists them.
    pub gates: Vec<GateType>,
    /// Per-kind quota. Empty means no restriction at all.
    pub limits: BTreeMap<GateType, Quota>,
    pub source: ConfigSource,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            gates: GateType::ALL.to_vec(),
            limits: BTreeMap::new(),
            source: ConfigSource::Default,
        }
    }
}

/// Floors a JSON number or numeric string into a quota.
fn normalize_quota(value: &Value) -> Option<u32> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (raw.is_finite() && raw >= 0.0).then(|| raw.floor().min(u32::MAX as f64) as u32)
}

impl GateConfig {
    pub fn resolve(question: &Question) -> Self {
        let config = Self::from_gate_counts(question.gate_counts.as_ref())
            .or_else(|| Self::from_allowed_gates(question.allowed_gates.as_ref()))
            .unwrap_or_default();
        log::debug!(
            "gate config for {}: {:?} {:?}",
            question.label(),
            config.source,
            config.gates
        );
        config
    }

    fn from_gate_counts(raw: Option<&Value>) -> Option<Self> {
        let Some(Value::Object(counts)) = raw else {
            return None;
        };

        let mut gates = Vec::new();
        let mut limits = BTreeMap::new();
        for (name, quota) in counts {
            let (Some(gate), Some(quota)) = (GateType::normalize(name), normalize_quota(quota))
            else {
                log::debug!("gateCounts: dropping entry {name:?}={quota}");
                continue;
            };
            if limits.contains_key(&gate) {
                continue;
            }
            gates.push(gate);
            limits.insert(gate, Quota::Limited(quota));
        }

        (!gates.is_empty()).then_some(Self {
            gates,
            limits,
            source: ConfigSource::GateCounts,
        })
    }

    fn from_allowed_gates(raw: Option<&Value>) -> Option<Self> {
        let Some(Value::Array(names)) = raw else {
            return None;
        };

        let mut gates = Vec::new();
        for gate in names.iter().filter_map(Value::as_str).filter_map(GateType::normalize) {
            if !gates.contains(&gate) {
                gates.push(gate);
            }
        }

        (!gates.is_empty()).then(|| Self {
            limits: gates.iter().map(|gate| (*gate, Quota::Unlimited)).collect(),
            gates,
            source: ConfigSource::AllowedGates,
        })
    }

    /// Quota for `gate`, or `None` when the level does not offer it.
    pub fn limit(&self, gate: GateType) -> Option<Quota> {
        if self.limits.is_empty() {
            return Some(Quota::Unlimited);
        }
        self.limits.get(&gate).copied()
    }

    /// Quota left for `gate` given the current usage, for palette badges.
    pub fn remaining(&self, gate: GateType, used: &GateCount) -> Option<Quota> {
        self.limit(gate).map(|quota| match quota {
            Quota::Limited(n) => Quota::Limited(n.saturating_sub(used.get(gate) as u32)),
            Quota::Unlimited => Quota::Unlimited,
        })
    }

    /// Quota check for placing `gate` into `slot` on top of `assignment`.
    ///
    /// Re-placing the kind a slot already holds does not consume extra quota.
    pub fn check_quota(
        &self,
        slot: &str,
        gate: GateType,
        assignment: &Assignment,
    ) -> Result<(), Rejection> {
        match self.limit(gate) {
            None => Err(Rejection::NotAllowed(gate)),
            Some(Quota::Unlimited) => Ok(()),
            Some(Quota::Limited(quota)) => {
                let mut used = GateCount::of(assignment).get(gate);
                if assignment.gate(slot) == Some(gate) {
                    used -= 1;
                }
                if used < quota as usize {
                    Ok(())
                } else {
                    Err(Rejection::QuotaExhausted { gate, quota })
                }
            }
        }
    }

    /// Quota predicate bound to the current assignment.
    pub fn build_accept<'a>(
        &'a self,
        assignment: &'a Assignment,
    ) -> impl Fn(&str, GateType) -> bool + 'a {
        move |slot, gate| self.limits.is_empty() || self.check_quota(slot, gate, assignment).is_ok()
    }
}
