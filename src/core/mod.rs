pub mod gate_count;
pub mod gate_type;
pub mod node;
