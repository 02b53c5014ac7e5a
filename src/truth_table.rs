//! Truth tables derived from circuits or typed expressions.
//!
//! A table enumerates every assignment of its variables (MSB = first
//! variable), records one value column per tracked output, and keeps the
//! first output's values as a minterm bit-vector, which is what the
//! minimizer consumes. `Display` renders the editor's ASCII grid.

use std::collections::HashMap;
use std::fmt;

use crate::circuit::Circuit;
use crate::error::LogicError;
use crate::minimize;
use crate::parse;

#[derive(Debug, Clone)]
pub struct Row {
    pub inputs: Vec<bool>,
    pub outputs: Vec<bool>,
}

#[derive(Debug, Clone)]
pub struct TruthTable {
    vars: Vec<char>,
    output_names: Vec<String>,
    rows: Vec<Row>,
    /// First output column, indexed by row; the minimizer's input.
    minterms: Vec<bool>,
}

impl TruthTable {
    /// Builds the table of a typed infix expression.
    ///
    /// Variables are the expression's letters, sorted alphabetically; the
    /// single output column is named `Y1`.
    pub fn of_expression(expr: &str) -> Result<Self, LogicError> {
        let cleaned = parse::clean(&parse::collapse_double_negation(expr))
            .ok_or(LogicError::InvalidExpression)?;
        if cleaned.is_empty() {
            return Err(LogicError::InvalidExpression);
        }
        let vars = parse::variables(&cleaned);
        if vars.is_empty() {
            return Err(LogicError::NoVariables);
        }
        let postfix = parse::to_postfix(&cleaned).ok_or(LogicError::InvalidExpression)?;

        let num_vars = vars.len();
        let num_rows = 1usize << num_vars;
        let mut rows = Vec::with_capacity(num_rows);
        let mut minterms = vec![false; num_rows];

        for i in 0..num_rows {
            let mut values = HashMap::new();
            let mut inputs = Vec::with_capacity(num_vars);
            for (j, &var) in vars.iter().enumerate() {
                let bit = (i >> (num_vars - 1 - j)) & 1 == 1;
                values.insert(var, bit);
                inputs.push(bit);
            }
            let result = parse::eval_postfix(&postfix, &values);
            minterms[i] = result;
            rows.push(Row {
                inputs,
                outputs: vec![result],
            });
        }

        Ok(Self {
            vars,
            output_names: vec!["Y1".to_string()],
            rows,
            minterms,
        })
    }

    /// Builds the table of a circuit snapshot.
    ///
    /// Only inputs with a path to some output participate, ordered by their
    /// label letters; there is one column per Output gate, ordered by label
    /// (arena order drifts from label order once a removed Output's slot is
    /// reused). Each row clones the circuit, drives the inputs MSB-first and
    /// runs the fixed-point evaluator. The minterm vector tracks `Y1`.
    pub fn of_circuit(circuit: &Circuit) -> Result<Self, LogicError> {
        if circuit.input_gates().is_empty() {
            return Err(LogicError::NoInputGates);
        }

        let mut connected: Vec<(crate::arena::GateId, char)> = circuit
            .connected_inputs()
            .into_iter()
            .filter_map(|id| circuit.gate(id).and_then(|g| g.variable()).map(|v| (id, v)))
            .collect();
        connected.sort_by_key(|&(_, v)| v);
        if connected.is_empty() {
            return Err(LogicError::NoConnectedInputs);
        }

        let mut outputs = circuit.output_gates();
        outputs.sort_by_key(|&id| circuit.gate(id).and_then(|g| g.label));
        let vars: Vec<char> = connected.iter().map(|&(_, v)| v).collect();
        let output_names: Vec<String> = outputs
            .iter()
            .filter_map(|&id| circuit.gate(id).map(|g| g.name()))
            .collect();

        let num_vars = vars.len();
        let num_rows = 1usize << num_vars;
        let mut rows = Vec::with_capacity(num_rows);
        let mut minterms = vec![false; num_rows];

        for i in 0..num_rows {
            let mut snapshot = circuit.clone();
            for (j, &(id, _)) in connected.iter().enumerate() {
                snapshot.set_state(id, (i >> (num_vars - 1 - j)) & 1 == 1);
            }
            snapshot.evaluate();

            let inputs: Vec<bool> = connected
                .iter()
                .map(|&(id, _)| snapshot.gate(id).map(|g| g.state).unwrap_or(false))
                .collect();
            let out_values: Vec<bool> = outputs
                .iter()
                .map(|&id| snapshot.gate(id).map(|g| g.state).unwrap_or(false))
                .collect();
            minterms[i] = out_values.first().copied().unwrap_or(false);
            rows.push(Row {
                inputs,
                outputs: out_values,
            });
        }

        Ok(Self {
            vars,
            output_names,
            rows,
            minterms,
        })
    }

    pub fn vars(&self) -> &[char] {
        &self.vars
    }

    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// First output's value per row index.
    pub fn minterms(&self) -> &[bool] {
        &self.minterms
    }

    /// Row indices on which the first output is true.
    pub fn minterm_indices(&self) -> Vec<usize> {
        (0..self.minterms.len())
            .filter(|&i| self.minterms[i])
            .collect()
    }

    /// The exact (unsimplified) sum-of-products equation: one parenthesized
    /// product per true minterm, joined with `+`. All-true collapses to `"1"`
    /// and all-false to `"0"`.
    pub fn exact_equation(&self) -> String {
        let num_vars = self.vars.len();
        if num_vars == 0 || self.minterms.is_empty() {
            return "0".to_string();
        }
        if self.minterms.iter().all(|&m| m) {
            return "1".to_string();
        }
        if !self.minterms.iter().any(|&m| m) {
            return "0".to_string();
        }

        let mut terms = Vec::new();
        for (i, &m) in self.minterms.iter().enumerate() {
            if !m {
                continue;
            }
            let literals: Vec<String> = (0..num_vars)
                .map(|j| {
                    let bit = (i >> (num_vars - 1 - j)) & 1 == 1;
                    if bit {
                        self.vars[j].to_string()
                    } else {
                        format!("~{}", self.vars[j])
                    }
                })
                .collect();
            terms.push(format!("({})", literals.join(".")));
        }
        terms.join(" + ")
    }

    /// The minimized sum-of-products form of the first output.
    pub fn minimized(&self) -> String {
        minimize::simplify(&self.minterms, &self.vars)
    }
}

/// ASCII grid rendering: `+---+` borders and centered `|`-separated cells.
impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<String> = self
            .vars
            .iter()
            .map(|v| v.to_string())
            .chain(self.output_names.iter().cloned())
            .collect();
        let widths: Vec<usize> = headers.iter().map(|h| (h.len() + 2).max(3)).collect();

        let border = border_line(&widths);
        writeln!(f, "{}", border)?;
        writeln!(f, "{}", cell_line(&headers, &widths))?;
        writeln!(f, "{}", border)?;
        for row in &self.rows {
            let cells: Vec<String> = row
                .inputs
                .iter()
                .chain(row.outputs.iter())
                .map(|&b| if b { "1".to_string() } else { "0".to_string() })
                .collect();
            writeln!(f, "{}", cell_line(&cells, &widths))?;
        }
        write!(f, "{}", border)
    }
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for &w in widths {
        line.push_str(&"-".repeat(w));
        line.push('+');
    }
    line
}

fn cell_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, &w) in cells.iter().zip(widths.iter()) {
        let padding = w.saturating_sub(cell.len());
        let left = padding / 2;
        let right = padding - left;
        line.push_str(&" ".repeat(left));
        line.push_str(cell);
        line.push_str(&" ".repeat(right));
        line.push('|');
    }
    line
}
