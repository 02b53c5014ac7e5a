//! The mutable gate/wire graph and its evaluation engine.
//!
//! A [`Circuit`] owns a generational arena of gates and a list of wires. The
//! editing layer mutates it through the `add_*`/`remove_*` surface and calls
//! [`Circuit::evaluate`] once per update tick; the analysis layer derives
//! symbolic expressions and truth tables from a snapshot.
//!
//! Everything here is total on malformed input: stale wires are skipped,
//! missing operands evaluate to `false`, and expression generation for a gate
//! inside a feedback cycle terminates with a placeholder instead of
//! recursing forever.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::arena::{Arena, GateId};
use crate::error::LogicError;
use crate::gate::{Gate, GateKind, Point};
use crate::parse;
use crate::wire::{SourcePin, Wire};

/// Hard cap on the total number of gates.
pub const MAX_GATES: usize = 100;
/// Hard cap on Input gates (variables `A`..`D`).
pub const MAX_INPUTS: usize = 4;
/// Hard cap on Output gates (`Y1`, `Y2`).
pub const MAX_OUTPUTS: usize = 2;

#[derive(Debug, Clone)]
pub struct Circuit {
    gates: Arena<Gate>,
    wires: Vec<Wire>,
    input_count: usize,
    output_count: usize,
    next_input_label: u8,
    next_output_label: u8,
    max_iterations: usize,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    /// Iteration bound for fixed-point relaxation. Generous for circuits of
    /// up to [`MAX_GATES`] gates; not a convergence guarantee.
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    pub fn new() -> Self {
        Self {
            gates: Arena::new(),
            wires: Vec::new(),
            input_count: 0,
            output_count: 0,
            next_input_label: 0,
            next_output_label: 0,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn output_count(&self) -> usize {
        self.output_count
    }

    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gates.get(id)
    }

    pub fn gates(&self) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates.iter()
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }
}

// Mutation surface.
impl Circuit {
    /// Adds a gate, assigning the next dense label to Input/Output kinds.
    ///
    /// Returns `None` (circuit unchanged) when a cap is hit: [`MAX_GATES`]
    /// total, [`MAX_INPUTS`] inputs, [`MAX_OUTPUTS`] outputs.
    pub fn add_gate(&mut self, kind: GateKind, position: Point) -> Option<GateId> {
        if self.gates.len() >= MAX_GATES {
            return None;
        }
        if kind == GateKind::Input && self.input_count >= MAX_INPUTS {
            return None;
        }
        if kind == GateKind::Output && self.output_count >= MAX_OUTPUTS {
            return None;
        }

        let label = match kind {
            GateKind::Input => {
                let label = self.next_input_label;
                self.next_input_label += 1;
                self.input_count += 1;
                Some(label)
            }
            GateKind::Output => {
                let label = self.next_output_label;
                self.next_output_label += 1;
                self.output_count += 1;
                Some(label)
            }
            _ => None,
        };

        Some(self.gates.insert(Gate::new(kind, position, label)))
    }

    /// Connects a source gate pin to a destination input pin. Endpoints are
    /// not validated here; evaluation skips wires that no longer resolve.
    pub fn add_wire(&mut self, src: GateId, src_pin: SourcePin, dst: GateId, dst_pin: u8) {
        self.wires.push(Wire::new(src, src_pin, dst, dst_pin));
    }

    /// Removes a gate, cascade-deleting its incident wires (and any wire
    /// that had already gone stale), then relabels the remaining Input and
    /// Output gates contiguously from 0.
    ///
    /// Returns `false` if the handle no longer resolves.
    pub fn remove_gate(&mut self, id: GateId) -> bool {
        if self.gates.remove(id).is_none() {
            return false;
        }
        let gates = &self.gates;
        self.wires
            .retain(|w| gates.contains(w.src) && gates.contains(w.dst));
        self.relabel_io();
        true
    }

    /// Deletes every wire with an endpoint at `id`.
    pub fn remove_wires_for_gate(&mut self, id: GateId) {
        self.wires.retain(|w| !w.touches(id));
    }

    /// Removes all gates and wires and resets the label counters.
    pub fn clear(&mut self) {
        self.gates.clear();
        self.wires.clear();
        self.input_count = 0;
        self.output_count = 0;
        self.next_input_label = 0;
        self.next_output_label = 0;
    }

    /// Sets a gate's latched state (Input toggling from the editor).
    pub fn set_state(&mut self, id: GateId, state: bool) {
        if let Some(gate) = self.gates.get_mut(id) {
            gate.state = state;
        }
    }

    /// Flips an Input gate's state; returns the new state, or `None` if the
    /// gate is not an Input.
    pub fn toggle_input(&mut self, id: GateId) -> Option<bool> {
        let gate = self.gates.get_mut(id)?;
        if gate.kind != GateKind::Input {
            return None;
        }
        gate.state = !gate.state;
        Some(gate.state)
    }

    pub fn set_selected(&mut self, id: GateId, selected: bool) {
        if let Some(gate) = self.gates.get_mut(id) {
            gate.selected = selected;
        }
    }

    pub fn deselect_all(&mut self) {
        for (_, gate) in self.gates.iter_mut() {
            gate.selected = false;
        }
    }

    /// Reassigns dense labels `0..count` to Input and Output gates in arena
    /// order and recomputes the I/O counters.
    fn relabel_io(&mut self) {
        let mut input_label = 0u8;
        let mut output_label = 0u8;
        for (_, gate) in self.gates.iter_mut() {
            match gate.kind {
                GateKind::Input => {
                    gate.label = Some(input_label);
                    input_label += 1;
                }
                GateKind::Output => {
                    gate.label = Some(output_label);
                    output_label += 1;
                }
                _ => (),
            }
        }
        self.input_count = input_label as usize;
        self.output_count = output_label as usize;
        self.next_input_label = input_label;
        self.next_output_label = output_label;
    }
}

// Queries.
impl Circuit {
    /// Input gate handles in arena order.
    pub fn input_gates(&self) -> Vec<GateId> {
        self.gates
            .iter()
            .filter(|(_, g)| g.kind == GateKind::Input)
            .map(|(id, _)| id)
            .collect()
    }

    /// Output gate handles in arena order.
    pub fn output_gates(&self) -> Vec<GateId> {
        self.gates
            .iter()
            .filter(|(_, g)| g.kind == GateKind::Output)
            .map(|(id, _)| id)
            .collect()
    }

    /// Input gates with a backward path from some Output gate, in arena
    /// order. Inputs that feed nothing observable are excluded from truth
    /// tables.
    pub fn connected_inputs(&self) -> Vec<GateId> {
        let inputs = self.input_gates();
        let mut connected: HashSet<GateId> = HashSet::new();

        for out in self.output_gates() {
            let mut visited: HashSet<GateId> = HashSet::new();
            let mut stack = vec![out];
            while let Some(current) = stack.pop() {
                if !visited.insert(current) {
                    continue;
                }
                if inputs.contains(&current) {
                    connected.insert(current);
                    continue;
                }
                for w in &self.wires {
                    if w.dst == current {
                        stack.push(w.src);
                    }
                }
            }
        }

        inputs.into_iter().filter(|id| connected.contains(id)).collect()
    }
}

// Fixed-point evaluation.
impl Circuit {
    /// Relaxes all gate states to a fixed point and commits them in place.
    ///
    /// Each pass visits gates in arena order and evaluates those whose
    /// feeding gates were all evaluated this pass, reading the previous
    /// pass's states. Output gates pass through the first already-evaluated
    /// operand. The loop stops when a full pass changes nothing or after
    /// `max_iterations` passes; hitting the cap is tolerated silently (this
    /// is how feedback loops that never settle are bounded).
    pub fn evaluate(&mut self) {
        if self.gates.is_empty() {
            return;
        }

        let snapshot: Vec<(GateId, Gate)> =
            self.gates.iter().map(|(id, g)| (id, g.clone())).collect();
        let position: HashMap<GateId, usize> = snapshot
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (*id, i))
            .collect();
        let n = snapshot.len();

        let mut old_states: Vec<bool> = snapshot.iter().map(|(_, g)| g.state).collect();
        let mut new_states = old_states.clone();
        let mut evaluated = vec![false; n];
        for (i, (_, gate)) in snapshot.iter().enumerate() {
            if gate.kind == GateKind::Input {
                evaluated[i] = true;
            }
        }

        let mut changed = true;
        let mut iterations = 0;
        while changed && iterations < self.max_iterations {
            changed = false;

            for (i, (_, gate)) in snapshot.iter().enumerate() {
                if gate.kind != GateKind::Input {
                    evaluated[i] = false;
                }
            }

            for (i, (id, gate)) in snapshot.iter().enumerate() {
                if evaluated[i] {
                    continue;
                }

                if gate.kind == GateKind::Output {
                    // Pass-through: first operand whose source already
                    // settled this pass, or false when nothing feeds it.
                    let mut value = false;
                    for w in &self.wires {
                        if w.dst == *id {
                            if let Some(&s) = position.get(&w.src) {
                                if evaluated[s] {
                                    value = old_states[s];
                                    break;
                                }
                            }
                        }
                    }
                    new_states[i] = value;
                    evaluated[i] = true;
                    if new_states[i] != old_states[i] {
                        changed = true;
                    }
                    continue;
                }

                let mut inputs = Vec::new();
                let mut all_evaluated = true;
                for w in &self.wires {
                    if w.dst != *id {
                        continue;
                    }
                    match position.get(&w.src) {
                        Some(&s) => {
                            if !evaluated[s] {
                                all_evaluated = false;
                                break;
                            }
                            inputs.push(old_states[s]);
                        }
                        // Stale wire: endpoint gate no longer exists.
                        None => continue,
                    }
                }

                if all_evaluated {
                    new_states[i] = if inputs.is_empty() {
                        false
                    } else {
                        gate.eval(&inputs)
                    };
                    evaluated[i] = true;
                    if new_states[i] != old_states[i] {
                        changed = true;
                    }
                }
            }

            old_states.copy_from_slice(&new_states);
            iterations += 1;
        }

        if changed {
            debug!("evaluate: iteration cap ({}) hit without convergence", self.max_iterations);
        } else {
            debug!("evaluate: converged after {} passes", iterations);
        }

        for (i, (id, _)) in snapshot.iter().enumerate() {
            if let Some(gate) = self.gates.get_mut(*id) {
                gate.state = new_states[i];
            }
        }
    }
}

// Symbolic expression generation.
impl Circuit {
    /// Derives a boolean expression for `id` in terms of Input letters.
    ///
    /// Depth-first over wires feeding `id`, memoized in `memo` (shared
    /// across a whole generation call so repeated references reuse their
    /// subexpression). An entry is pre-seeded with `"0"` before recursing,
    /// so a gate re-requested while its own expression is still being built
    /// (a feedback cycle) reads the placeholder and terminates; the emitted
    /// expression for cyclic regions is not meaningful, only finite.
    ///
    /// Operand strings are sorted lexicographically, making the output
    /// independent of wire insertion order. A gate fed by the wrong number
    /// of operands for its kind contributes `"0"`.
    pub fn expression_for(&self, id: GateId, memo: &mut HashMap<GateId, String>) -> String {
        if let Some(expr) = memo.get(&id) {
            return expr.clone();
        }
        let gate = match self.gates.get(id) {
            Some(gate) => gate,
            None => return "0".to_string(),
        };

        if gate.kind == GateKind::Input {
            let expr = gate
                .variable()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "0".to_string());
            memo.insert(id, expr.clone());
            return expr;
        }

        // In-progress marker; overwritten below.
        memo.insert(id, "0".to_string());

        let mut operands = Vec::new();
        for w in &self.wires {
            // Direct self-loops are skipped outright.
            if w.dst != id || w.src == id || !self.gates.contains(w.src) {
                continue;
            }
            let expr = self.expression_for(w.src, memo);
            if expr != "0" {
                operands.push(expr);
            }
        }
        operands.sort_unstable();

        let expr = if operands.is_empty() {
            "0".to_string()
        } else if gate.kind == GateKind::Output {
            operands[0].clone()
        } else {
            match (gate.kind, operands.len()) {
                (GateKind::Not, 1) => format!("~({})", operands[0]),
                (GateKind::And, 2) => format!("({}.{})", operands[0], operands[1]),
                (GateKind::Or, 2) => format!("({}+{})", operands[0], operands[1]),
                (GateKind::Nand, 2) => format!("~({}.{})", operands[0], operands[1]),
                (GateKind::Nor, 2) => format!("~({}+{})", operands[0], operands[1]),
                (GateKind::Xor, 2) => format!("({}^{})", operands[0], operands[1]),
                _ => "0".to_string(),
            }
        };

        memo.insert(id, expr.clone());
        expr
    }

    /// Formats one `Y{n} = expr` line per Output gate, with double
    /// negations collapsed and the expression re-validated.
    ///
    /// Lines are ordered by output label, which can diverge from arena
    /// order once a removed Output's slot has been reused, and each line
    /// carries the gate's own name.
    pub fn expressions(&self) -> Result<String, LogicError> {
        let mut outputs = self.output_gates();
        if outputs.is_empty() {
            return Err(LogicError::NoOutputGates);
        }
        outputs.sort_by_key(|&id| self.gates.get(id).and_then(|g| g.label));

        let mut memo = HashMap::new();
        let mut result = String::new();
        for out in &outputs {
            let name = match self.gates.get(*out) {
                Some(gate) => gate.name(),
                None => continue,
            };
            let expr = self.expression_for(*out, &mut memo);
            let cleaned =
                parse::clean(&parse::collapse_double_negation(&expr)).unwrap_or_default();
            result.push_str(&format!("{} = {}\n", name, cleaned));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn p() -> Point {
        Point::default()
    }

    /// Y1 = A AND B.
    fn and_circuit() -> (Circuit, GateId, GateId, GateId) {
        let mut c = Circuit::new();
        let a = c.add_gate(GateKind::Input, p()).unwrap();
        let b = c.add_gate(GateKind::Input, p()).unwrap();
        let and = c.add_gate(GateKind::And, p()).unwrap();
        let y = c.add_gate(GateKind::Output, p()).unwrap();
        c.add_wire(a, SourcePin::Output, and, 0);
        c.add_wire(b, SourcePin::Output, and, 1);
        c.add_wire(and, SourcePin::Output, y, 0);
        (c, a, b, y)
    }

    #[test]
    fn test_and_circuit_evaluation() {
        let (mut c, a, b, y) = and_circuit();
        for (va, vb) in [(false, false), (false, true), (true, false), (true, true)] {
            c.set_state(a, va);
            c.set_state(b, vb);
            c.evaluate();
            assert_eq!(c.gate(y).unwrap().state, va && vb);
        }
    }

    #[test]
    fn test_evaluation_idempotent() {
        let (mut c, a, b, y) = and_circuit();
        c.set_state(a, true);
        c.set_state(b, true);
        c.evaluate();
        let states: Vec<bool> = c.gates().map(|(_, g)| g.state).collect();
        for _ in 0..5 {
            c.evaluate();
            let again: Vec<bool> = c.gates().map(|(_, g)| g.state).collect();
            assert_eq!(states, again);
        }
        assert!(c.gate(y).unwrap().state);
    }

    #[test]
    fn test_gate_cap() {
        let mut c = Circuit::new();
        for _ in 0..MAX_GATES {
            assert!(c.add_gate(GateKind::And, p()).is_some());
        }
        assert_eq!(c.gate_count(), MAX_GATES);
        assert!(c.add_gate(GateKind::And, p()).is_none());
        assert_eq!(c.gate_count(), MAX_GATES);
    }

    #[test]
    fn test_io_caps() {
        let mut c = Circuit::new();
        for _ in 0..MAX_INPUTS {
            assert!(c.add_gate(GateKind::Input, p()).is_some());
        }
        assert!(c.add_gate(GateKind::Input, p()).is_none());
        assert_eq!(c.input_count(), MAX_INPUTS);

        for _ in 0..MAX_OUTPUTS {
            assert!(c.add_gate(GateKind::Output, p()).is_some());
        }
        assert!(c.add_gate(GateKind::Output, p()).is_none());
        assert_eq!(c.output_count(), MAX_OUTPUTS);
    }

    #[test]
    fn test_label_density_after_removal() {
        let mut c = Circuit::new();
        let i0 = c.add_gate(GateKind::Input, p()).unwrap();
        let _i1 = c.add_gate(GateKind::Input, p()).unwrap();
        let i2 = c.add_gate(GateKind::Input, p()).unwrap();
        c.remove_gate(i0);

        let labels: Vec<u8> = c
            .gates()
            .filter(|(_, g)| g.kind == GateKind::Input)
            .map(|(_, g)| g.label.unwrap())
            .collect();
        assert_eq!(labels, vec![0, 1]);
        assert_eq!(c.input_count(), 2);

        // Freed capacity is usable again and gets the next dense label.
        let i3 = c.add_gate(GateKind::Input, p()).unwrap();
        assert_eq!(c.gate(i3).unwrap().label, Some(2));
        assert_eq!(c.gate(i2).unwrap().label, Some(1));
    }

    #[test]
    fn test_removal_drops_incident_wires() {
        let (mut c, a, _b, _y) = and_circuit();
        let wires_before = c.wires().len();
        assert_eq!(wires_before, 3);
        c.remove_gate(a);
        // The A->AND wire is gone; the rest still resolve.
        assert_eq!(c.wires().len(), 2);
        for w in c.wires() {
            assert!(c.gate(w.src).is_some());
            assert!(c.gate(w.dst).is_some());
        }
    }

    #[test]
    fn test_stale_handle_after_removal() {
        let (mut c, a, _b, _y) = and_circuit();
        assert!(c.remove_gate(a));
        assert!(!c.remove_gate(a));
        assert!(c.gate(a).is_none());
        // Slot reuse must not resurrect the old handle.
        let fresh = c.add_gate(GateKind::Input, p()).unwrap();
        assert!(c.gate(a).is_none());
        assert!(c.gate(fresh).is_some());
    }

    #[test]
    fn test_clear_resets_counters() {
        let (mut c, ..) = and_circuit();
        c.clear();
        assert_eq!(c.gate_count(), 0);
        assert!(c.wires().is_empty());
        let a = c.add_gate(GateKind::Input, p()).unwrap();
        assert_eq!(c.gate(a).unwrap().label, Some(0));
    }

    #[test]
    fn test_toggle_input() {
        let (mut c, a, _b, _y) = and_circuit();
        assert_eq!(c.toggle_input(a), Some(true));
        assert_eq!(c.toggle_input(a), Some(false));
        let and = c
            .gates()
            .find(|(_, g)| g.kind == GateKind::And)
            .map(|(id, _)| id)
            .unwrap();
        assert_eq!(c.toggle_input(and), None);
    }

    #[test]
    fn test_feedback_self_loop_terminates() {
        let mut c = Circuit::new();
        let not = c.add_gate(GateKind::Not, p()).unwrap();
        c.add_wire(not, SourcePin::Output, not, 0);
        // A NOT fed by itself oscillates; evaluation must still return.
        c.evaluate();
        c.evaluate();
    }

    #[test]
    fn test_feedback_via_intermediate_terminates() {
        let mut c = Circuit::new();
        let n1 = c.add_gate(GateKind::Not, p()).unwrap();
        let n2 = c.add_gate(GateKind::Not, p()).unwrap();
        c.add_wire(n1, SourcePin::Output, n2, 0);
        c.add_wire(n2, SourcePin::Output, n1, 0);
        c.set_max_iterations(10);
        c.evaluate();
    }

    #[test]
    fn test_evaluate_skips_stale_wires() {
        let (mut c, a, b, y) = and_circuit();
        c.set_state(a, true);
        c.set_state(b, true);
        // Remove B but sneak its old wires back in to simulate a stale list.
        let stale = Wire::new(b, SourcePin::Output, y, 0);
        c.remove_gate(b);
        c.wires.push(stale);
        c.evaluate();
        assert_eq!(c.gate(y).unwrap().state, false);
    }

    #[test]
    fn test_expression_for_and() {
        let (c, _a, _b, y) = and_circuit();
        let mut memo = HashMap::new();
        assert_eq!(c.expression_for(y, &mut memo), "(A.B)");
    }

    #[test]
    fn test_expression_deterministic_under_wire_order() {
        // Same topology, wires inserted in opposite order: operand sorting
        // must canonicalize the result.
        let build = |flip: bool| {
            let mut c = Circuit::new();
            let a = c.add_gate(GateKind::Input, p()).unwrap();
            let b = c.add_gate(GateKind::Input, p()).unwrap();
            let or = c.add_gate(GateKind::Or, p()).unwrap();
            let y = c.add_gate(GateKind::Output, p()).unwrap();
            if flip {
                c.add_wire(b, SourcePin::Output, or, 1);
                c.add_wire(a, SourcePin::Output, or, 0);
            } else {
                c.add_wire(a, SourcePin::Output, or, 0);
                c.add_wire(b, SourcePin::Output, or, 1);
            }
            c.add_wire(or, SourcePin::Output, y, 0);
            let mut memo = HashMap::new();
            c.expression_for(y, &mut memo)
        };
        assert_eq!(build(false), build(true));
        assert_eq!(build(false), "(A+B)");
    }

    #[test]
    fn test_expression_repeated_generation_identical() {
        let (c, _a, _b, y) = and_circuit();
        let mut memo = HashMap::new();
        let first = c.expression_for(y, &mut memo);
        let mut memo = HashMap::new();
        let second = c.expression_for(y, &mut memo);
        assert_eq!(first, second);
    }

    #[test]
    fn test_expression_arity_mismatch_is_zero() {
        let mut c = Circuit::new();
        let a = c.add_gate(GateKind::Input, p()).unwrap();
        let and = c.add_gate(GateKind::And, p()).unwrap();
        c.add_wire(a, SourcePin::Output, and, 0);
        let mut memo = HashMap::new();
        // AND with one operand contributes "0".
        assert_eq!(c.expression_for(and, &mut memo), "0");
    }

    #[test]
    fn test_expression_cycle_terminates() {
        let mut c = Circuit::new();
        let n1 = c.add_gate(GateKind::Not, p()).unwrap();
        let n2 = c.add_gate(GateKind::Not, p()).unwrap();
        c.add_wire(n1, SourcePin::Output, n2, 0);
        c.add_wire(n2, SourcePin::Output, n1, 0);
        let mut memo = HashMap::new();
        // n1 depends on n2 depends on n1: the in-progress marker breaks the
        // cycle, emitting "0" for the looped operand.
        assert_eq!(c.expression_for(n1, &mut memo), "0");
    }

    #[test]
    fn test_expressions_lines() {
        let (c, ..) = and_circuit();
        let text = c.expressions().unwrap();
        assert_eq!(text, "Y1 = (A.B)\n");
    }

    #[test]
    fn test_expressions_follow_labels_after_output_slot_reuse() {
        let mut c = Circuit::new();
        let a = c.add_gate(GateKind::Input, p()).unwrap();
        let not = c.add_gate(GateKind::Not, p()).unwrap();
        let y1 = c.add_gate(GateKind::Output, p()).unwrap();
        let y2 = c.add_gate(GateKind::Output, p()).unwrap();
        c.add_wire(a, SourcePin::Output, not, 0);
        c.add_wire(a, SourcePin::Output, y1, 0);
        c.add_wire(not, SourcePin::Output, y2, 0);

        // Removing Y1 relabels the survivor to Y1; the replacement reuses
        // the freed slot but gets the next label, Y2. Arena order and label
        // order now disagree.
        c.remove_gate(y1);
        let y3 = c.add_gate(GateKind::Output, p()).unwrap();
        c.add_wire(a, SourcePin::Output, y3, 0);
        assert_eq!(c.gate(y2).unwrap().name(), "Y1");
        assert_eq!(c.gate(y3).unwrap().name(), "Y2");

        assert_eq!(c.expressions().unwrap(), "Y1 = ~(A)\nY2 = A\n");
    }

    #[test]
    fn test_expressions_without_outputs() {
        let mut c = Circuit::new();
        c.add_gate(GateKind::Input, p());
        assert_eq!(c.expressions(), Err(LogicError::NoOutputGates));
    }

    #[test]
    fn test_connected_inputs_excludes_dangling() {
        let (mut c, a, b, _y) = and_circuit();
        let dangling = c.add_gate(GateKind::Input, p()).unwrap();
        let connected = c.connected_inputs();
        assert!(connected.contains(&a));
        assert!(connected.contains(&b));
        assert!(!connected.contains(&dangling));
    }

    #[test]
    fn test_nand_nor_xor_evaluation() {
        for (kind, f) in [
            (GateKind::Nand, (|a, b| !(a && b)) as fn(bool, bool) -> bool),
            (GateKind::Nor, |a, b| !(a || b)),
            (GateKind::Xor, |a, b| a != b),
        ] {
            let mut c = Circuit::new();
            let a = c.add_gate(GateKind::Input, p()).unwrap();
            let b = c.add_gate(GateKind::Input, p()).unwrap();
            let g = c.add_gate(kind, p()).unwrap();
            let y = c.add_gate(GateKind::Output, p()).unwrap();
            c.add_wire(a, SourcePin::Output, g, 0);
            c.add_wire(b, SourcePin::Output, g, 1);
            c.add_wire(g, SourcePin::Output, y, 0);
            for (va, vb) in [(false, false), (false, true), (true, false), (true, true)] {
                c.set_state(a, va);
                c.set_state(b, vb);
                c.evaluate();
                assert_eq!(c.gate(y).unwrap().state, f(va, vb), "{kind} {va} {vb}");
            }
        }
    }

    #[test]
    fn test_two_level_circuit() {
        // Y1 = (A.B) + ~C
        let mut c = Circuit::new();
        let a = c.add_gate(GateKind::Input, p()).unwrap();
        let b = c.add_gate(GateKind::Input, p()).unwrap();
        let cc = c.add_gate(GateKind::Input, p()).unwrap();
        let and = c.add_gate(GateKind::And, p()).unwrap();
        let not = c.add_gate(GateKind::Not, p()).unwrap();
        let or = c.add_gate(GateKind::Or, p()).unwrap();
        let y = c.add_gate(GateKind::Output, p()).unwrap();
        c.add_wire(a, SourcePin::Output, and, 0);
        c.add_wire(b, SourcePin::Output, and, 1);
        c.add_wire(cc, SourcePin::Output, not, 0);
        c.add_wire(and, SourcePin::Output, or, 0);
        c.add_wire(not, SourcePin::Output, or, 1);
        c.add_wire(or, SourcePin::Output, y, 0);

        for i in 0..8u32 {
            let (va, vb, vc) = (i & 4 != 0, i & 2 != 0, i & 1 != 0);
            c.set_state(a, va);
            c.set_state(b, vb);
            c.set_state(cc, vc);
            c.evaluate();
            assert_eq!(c.gate(y).unwrap().state, (va && vb) || !vc);
        }

        let mut memo = HashMap::new();
        assert_eq!(c.expression_for(y, &mut memo), "((A.B)+~(C))");
    }
}
