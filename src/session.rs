use crate::{
    Assignment, EvaluationError, Evaluation, GateConfig, GateCount, GateType, Question, Quota,
    Rejection,
};

/// Result of a placement attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Placed { replaced: Option<GateType> },
    Rejected(Rejection),
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed { .. })
    }
}

/// State of the level currently on the board: the question, the gate budget
/// derived from it, and the single live assignment.
#[derive(Clone, Debug)]
pub struct Session {
    question: Question,
    config: GateConfig,
    assignment: Assignment,
}

impl Session {
    pub fn new(question: Question) -> Self {
        let config = GateConfig::resolve(&question);
        Self {
            question,
            config,
            assignment: Assignment::default(),
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn assignment(&self) -> Assignment {
        self.assignment.snapshot()
    }

    pub fn gate_count(&self) -> GateCount {
        GateCount::of(&self.assignment)
    }

    /// Arity and quota checks for dropping `gate` onto `slot`.
    ///
    /// Unknown slots pass the arity check.
    pub fn check(&self, slot: &str, gate: GateType) -> Result<(), Rejection> {
        if !self.question.check_arity(slot, gate) {
            let expected = self.question.slot(slot).map_or(0, |slot| slot.arity);
            return Err(Rejection::ArityMismatch {
                slot: slot.into(),
                gate,
                expected,
            });
        }
        self.config.check_quota(slot, gate, &self.assignment)
    }

    /// Predicate form of [`Session::check`] taking a raw gate name.
    pub fn accept(&self, slot: &str, gate: &str) -> bool {
        GateType::normalize(gate).is_some_and(|gate| self.check(slot, gate).is_ok())
    }

    /// Drops `gate` onto `slot` if the level allows it. Refusals leave the
    /// assignment untouched.
    pub fn place(&mut self, slot: &str, gate: &str) -> Placement {
        let outcome = self.try_place(slot, gate);
        match &outcome {
            Ok(replaced) => {
                log::debug!("place: {gate} into {slot} (replaced {replaced:?})");
                Placement::Placed {
                    replaced: *replaced,
                }
            }
            Err(rejection) => {
                log::debug!("place: rejected {gate:?} into {slot}: {rejection}");
                Placement::Rejected(rejection.clone())
            }
        }
    }

    fn try_place(&mut self, slot: &str, gate: &str) -> Result<Option<GateType>, Rejection> {
        let Some(target) = self.question.slot(slot) else {
            return Err(Rejection::UnknownSlot(slot.into()));
        };
        let gate =
            GateType::normalize(gate).ok_or_else(|| Rejection::UnknownGate(gate.to_owned()))?;
        self.check(slot, gate)?;
        Ok(self.assignment.set(target.id.clone(), gate))
    }

    pub fn clear(&mut self, slot: &str) -> Option<GateType> {
        let cleared = self.assignment.clear(slot);
        log::debug!("clear: {slot} (was {cleared:?})");
        cleared
    }

    pub fn reset(&mut self) {
        self.assignment.reset();
    }

    pub fn evaluate(&self) -> Result<Evaluation, EvaluationError> {
        self.question.evaluate(&self.assignment)
    }

    /// Palette entries with the quota left for each.
    pub fn palette(&self) -> Vec<(GateType, Quota)> {
        let used = self.gate_count();
        self.config
            .gates
            .iter()
            .filter_map(|gate| Some((*gate, self.config.remaining(*gate, &used)?)))
            .collect()
    }
}
