use std::fmt;

use crate::{Assignment, GateType};

/// Number of placed gates per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateCount([usize; 8]);

impl GateCount {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Tallies the gates currently held by `assignment`.
    pub fn of(assignment: &Assignment) -> Self {
        let mut count = Self::zero();
        assignment.iter().for_each(|(_, gate)| count.handle(gate));
        count
    }

    /// Tallies raw gate names, skipping empty and unrecognized entries.
    pub fn from_names<'n>(names: impl IntoIterator<Item = &'n str>) -> Self {
        let mut count = Self::zero();
        names
            .into_iter()
            .filter_map(GateType::normalize)
            .for_each(|gate| count.handle(gate));
        count
    }

    pub fn handle(&mut self, gate: GateType) {
        self.0[gate as usize] += 1;
    }

    pub fn get(&self, gate: GateType) -> usize {
        self.0[gate as usize]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GateType, usize)> + '_ {
        GateType::ALL
            .into_iter()
            .map(move |gate| (gate, self.get(gate)))
    }
}

impl fmt::Display for GateCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (gate, n) in self.iter().filter(|(_, n)| *n > 0) {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{gate}={n}")?;
            first = false;
        }
        Ok(())
    }
}
