use std::{borrow::Borrow, fmt, ops::Deref};

use serde::{Deserialize, Serialize};

/// Identifier of an input or a slot. Unique across a question.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for NodeId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Value of a node after evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    Bit(bool),
    /// Not enough of the graph is filled in or resolvable to produce a bit.
    Undetermined,
}

impl Resolution {
    pub fn bit(&self) -> Option<bool> {
        match self {
            Resolution::Bit(bit) => Some(*bit),
            Resolution::Undetermined => None,
        }
    }

    pub fn is_determined(&self) -> bool {
        matches!(self, Resolution::Bit(_))
    }
}

impl From<Option<bool>> for Resolution {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Resolution::Undetermined, Resolution::Bit)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Bit(false) => f.write_str("0"),
            Resolution::Bit(true) => f.write_str("1"),
            Resolution::Undetermined => f.write_str("?"),
        }
    }
}
