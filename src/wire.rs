//! Directed connections between gates.

use std::fmt;

use crate::arena::GateId;

/// Which pin of the source gate a wire taps.
///
/// Almost every wire taps the source's single output pin. Tapping one of the
/// source's *input* pins is allowed for pass-through and feedback topologies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SourcePin {
    Output,
    Input(u8),
}

impl fmt::Display for SourcePin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourcePin::Output => write!(f, "out"),
            SourcePin::Input(pin) => write!(f, "in{}", pin),
        }
    }
}

/// A directed connection from a source gate pin to a destination input pin.
///
/// Wires do not enforce at-most-one-source-per-input-pin; the evaluator reads
/// every feeding wire in insertion order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Wire {
    pub src: GateId,
    pub src_pin: SourcePin,
    pub dst: GateId,
    pub dst_pin: u8,
}

impl Wire {
    pub fn new(src: GateId, src_pin: SourcePin, dst: GateId, dst_pin: u8) -> Self {
        Self {
            src,
            src_pin,
            dst,
            dst_pin,
        }
    }

    /// True if either endpoint is the given gate.
    pub fn touches(&self, id: GateId) -> bool {
        self.src == id || self.dst == id
    }
}
