//! Logic gates and I/O terminals.

use std::fmt;

/// The kind of a circuit element: a combinational gate or an I/O terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GateKind {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Input,
    Output,
}

impl GateKind {
    /// Number of input pins this kind exposes.
    pub fn arity(self) -> usize {
        match self {
            GateKind::Input => 0,
            GateKind::Not | GateKind::Output => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Input => "INPUT",
            GateKind::Output => "OUTPUT",
        };
        write!(f, "{}", s)
    }
}

/// A 2D canvas position. Carried for the editing layer; the engine never
/// interprets it.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single circuit element.
///
/// `label` is meaningful only for Input/Output gates: inputs are named
/// `'A' + label`, outputs `"Y{label + 1}"`. The circuit keeps labels dense
/// (`0..count`) across removals.
#[derive(Debug, Clone)]
pub struct Gate {
    pub kind: GateKind,
    pub position: Point,
    pub state: bool,
    pub selected: bool,
    pub label: Option<u8>,
}

impl Gate {
    pub fn new(kind: GateKind, position: Point, label: Option<u8>) -> Self {
        Self {
            kind,
            position,
            state: false,
            selected: false,
            label,
        }
    }

    /// Computes this gate's output for the given ordered operand list.
    ///
    /// Total function: fewer operands than the arity requires yields `false`,
    /// extra operands are ignored. Input gates report their own latched state
    /// regardless of wiring; Output gates pass their first operand through.
    pub fn eval(&self, inputs: &[bool]) -> bool {
        match self.kind {
            GateKind::And => inputs.len() >= 2 && (inputs[0] && inputs[1]),
            GateKind::Or => inputs.len() >= 2 && (inputs[0] || inputs[1]),
            GateKind::Not => !inputs.is_empty() && !inputs[0],
            GateKind::Nand => inputs.len() >= 2 && !(inputs[0] && inputs[1]),
            GateKind::Nor => inputs.len() >= 2 && !(inputs[0] || inputs[1]),
            GateKind::Xor => inputs.len() >= 2 && (inputs[0] != inputs[1]),
            GateKind::Input => self.state,
            GateKind::Output => inputs.first().copied().unwrap_or(false),
        }
    }

    /// The single-letter variable name of a labeled Input gate.
    pub fn variable(&self) -> Option<char> {
        match self.kind {
            GateKind::Input => self.label.map(|l| (b'A' + l) as char),
            _ => None,
        }
    }

    /// Display name: `A`..`D` for inputs, `Y1`/`Y2` for outputs, the kind
    /// name otherwise. Unlabeled I/O gates render as `IN`/`OUT`.
    pub fn name(&self) -> String {
        match (self.kind, self.label) {
            (GateKind::Input, Some(l)) => ((b'A' + l) as char).to_string(),
            (GateKind::Input, None) => "IN".to_string(),
            (GateKind::Output, Some(l)) => format!("Y{}", l as u32 + 1),
            (GateKind::Output, None) => "OUT".to_string(),
            (kind, _) => kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn gate(kind: GateKind) -> Gate {
        Gate::new(kind, Point::default(), None)
    }

    #[test]
    fn test_eval_binary() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let inputs = [a, b];
            assert_eq!(gate(GateKind::And).eval(&inputs), a && b);
            assert_eq!(gate(GateKind::Or).eval(&inputs), a || b);
            assert_eq!(gate(GateKind::Nand).eval(&inputs), !(a && b));
            assert_eq!(gate(GateKind::Nor).eval(&inputs), !(a || b));
            assert_eq!(gate(GateKind::Xor).eval(&inputs), a != b);
        }
    }

    #[test]
    fn test_eval_not() {
        assert_eq!(gate(GateKind::Not).eval(&[true]), false);
        assert_eq!(gate(GateKind::Not).eval(&[false]), true);
    }

    #[test]
    fn test_eval_missing_inputs_is_false() {
        assert_eq!(gate(GateKind::And).eval(&[true]), false);
        assert_eq!(gate(GateKind::Not).eval(&[]), false);
        assert_eq!(gate(GateKind::Output).eval(&[]), false);
    }

    #[test]
    fn test_eval_extra_inputs_ignored() {
        assert_eq!(gate(GateKind::And).eval(&[true, true, false]), true);
        assert_eq!(gate(GateKind::Output).eval(&[true, false]), true);
    }

    #[test]
    fn test_input_reports_latched_state() {
        let mut g = gate(GateKind::Input);
        g.state = true;
        assert_eq!(g.eval(&[]), true);
        assert_eq!(g.eval(&[false]), true);
    }

    #[test]
    fn test_names() {
        let a = Gate::new(GateKind::Input, Point::default(), Some(0));
        assert_eq!(a.name(), "A");
        assert_eq!(a.variable(), Some('A'));
        let y2 = Gate::new(GateKind::Output, Point::default(), Some(1));
        assert_eq!(y2.name(), "Y2");
        assert_eq!(gate(GateKind::Input).name(), "IN");
        assert_eq!(gate(GateKind::Nand).name(), "NAND");
    }
}
