use std::{fmt, str::FromStr};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown gate kind {0:?}")]
    Unknown(String),
}
pub type GateTypeError = Error;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GateType {
    Buffer = 0,
    Not = 1,
    And = 2,
    Or = 3,
    Xor = 4,
    Nand = 5,
    Nor = 6,
    Xnor = 7,
}

impl GateType {
    pub const ALL: [GateType; 8] = [
        GateType::Buffer,
        GateType::Not,
        GateType::And,
        GateType::Or,
        GateType::Xor,
        GateType::Nand,
        GateType::Nor,
        GateType::Xnor,
    ];

    /// Truth function of the gate. Unary gates ignore their second operand.
    pub const fn f(&self) -> fn(bool, bool) -> bool {
        match self {
            GateType::Buffer => |a, _| a,
            GateType::Not => |a, _| !a,

            GateType::And => |a, b| a & b,
            GateType::Or => |a, b| a | b,
            GateType::Xor => |a, b| a ^ b,

            GateType::Nand => |a, b| !(a & b),
            GateType::Nor => |a, b| !(a | b),
            GateType::Xnor => |a, b| !(a ^ b),
        }
    }

    pub const fn arity(&self) -> usize {
        match self {
            GateType::Buffer | GateType::Not => 1,
            GateType::And
            | GateType::Or
            | GateType::Xor
            | GateType::Nand
            | GateType::Nor
            | GateType::Xnor => 2,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            GateType::Buffer => "buffer",
            GateType::Not => "not",
            GateType::And => "and",
            GateType::Or => "or",
            GateType::Xor => "xor",
            GateType::Nand => "nand",
            GateType::Nor => "nor",
            GateType::Xnor => "xnor",
        }
    }

    /// Applies the gate to `operands` taken in order.
    ///
    /// Operands past the gate's arity are ignored. Returns `None` when fewer
    /// operands than the arity are supplied.
    pub fn apply(&self, operands: &[bool]) -> Option<bool> {
        match (self.arity(), operands) {
            (1, [a, ..]) => Some(self.f()(*a, false)),
            (2, [a, b, ..]) => Some(self.f()(*a, *b)),
            _ => None,
        }
    }

    /// Trims and lowercases `raw`, then matches it against the eight kinds.
    pub fn normalize(raw: &str) -> Option<Self> {
        let name = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|gate| gate.name() == name)
    }

    /// Get 4-bit truth table for the gate (bit0=f(0,0), bit1=f(0,1), bit2=f(1,0), bit3=f(1,1))
    pub fn truth_table(&self) -> u8 {
        let f = self.f();
        let mut tt = 0u8;
        if f(false, false) {
            tt |= 1;
        }
        if f(false, true) {
            tt |= 2;
        }
        if f(true, false) {
            tt |= 4;
        }
        if f(true, true) {
            tt |= 8;
        }
        tt
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s).ok_or_else(|| Error::Unknown(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth_tables() {
        // AND: f(0,0)=0, f(0,1)=0, f(1,0)=0, f(1,1)=1 -> 0b1000 = 8
        assert_eq!(GateType::And.truth_table(), 8);

        // OR: f(0,0)=0, f(0,1)=1, f(1,0)=1, f(1,1)=1 -> 0b1110 = 14
        assert_eq!(GateType::Or.truth_table(), 14);

        // XOR: f(0,0)=0, f(0,1)=1, f(1,0)=1, f(1,1)=0 -> 0b0110 = 6
        assert_eq!(GateType::Xor.truth_table(), 6);

        // NAND: f(0,0)=1, f(0,1)=1, f(1,0)=1, f(1,1)=0 -> 0b0111 = 7
        assert_eq!(GateType::Nand.truth_table(), 7);

        // NOR: only f(0,0)=1 -> 0b0001
        assert_eq!(GateType::Nor.truth_table(), 1);

        // XNOR: f(0,0)=1, f(1,1)=1 -> 0b1001
        assert_eq!(GateType::Xnor.truth_table(), 9);
    }

    #[test]
    fn test_unary_gates() {
        assert_eq!(GateType::Buffer.apply(&[false]), Some(false));
        assert_eq!(GateType::Buffer.apply(&[true]), Some(true));
        assert_eq!(GateType::Not.apply(&[false]), Some(true));
        assert_eq!(GateType::Not.apply(&[true]), Some(false));
    }

    #[test]
    fn test_apply_matches_bitwise_definitions() {
        let bit = |b: bool| b as u8;
        for a in [false, true] {
            for b in [false, true] {
                let (x, y) = (bit(a), bit(b));
                let expect = |gate: GateType| match gate {
                    GateType::Buffer => x,
                    GateType::Not => x ^ 1,
                    GateType::And => x & y,
                    GateType::Or => x | y,
                    GateType::Xor => x ^ y,
                    GateType::Nand => (x & y) ^ 1,
                    GateType::Nor => (x | y) ^ 1,
                    GateType::Xnor => (x ^ y) ^ 1,
                };
                for gate in GateType::ALL {
                    let operands = [a, b];
                    let got = gate.apply(&operands[..gate.arity()]).map(bit);
                    assert_eq!(got, Some(expect(gate)), "{gate}({x},{y})");
                }
            }
        }
    }

    #[test]
    fn test_spot_values() {
        assert_eq!(GateType::Nand.apply(&[true, true]), Some(false));
        assert_eq!(GateType::Xor.apply(&[true, false]), Some(true));
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(GateType::And.apply(&[true]), None);
        assert_eq!(GateType::Not.apply(&[]), None);
        assert_eq!(GateType::Not.apply(&[true, true]), Some(false));
    }

    #[test]
    fn test_arity() {
        for gate in GateType::ALL {
            let expected = match gate {
                GateType::Buffer | GateType::Not => 1,
                _ => 2,
            };
            assert_eq!(gate.arity(), expected, "{gate}");
        }
    }

    #[test]
    fn test_parse_normalizes() {
        assert_eq!("  XOR ".parse::<GateType>(), Ok(GateType::Xor));
        assert_eq!("Buffer".parse::<GateType>(), Ok(GateType::Buffer));
        assert_eq!(
            "imp".parse::<GateType>(),
            Err(GateTypeError::Unknown("imp".to_owned()))
        );
        assert_eq!(GateType::normalize(""), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for gate in GateType::ALL {
            assert_eq!(gate.to_string().parse::<GateType>(), Ok(gate));
        }
    }
}
