//! # logic-rs: Combinational Logic Circuits in Rust
//!
//! **`logic-rs`** is the evaluation and boolean-expression engine behind an
//! interactive digital-logic editor: a mutable gate/wire graph, a fixed-point
//! combinational simulator, a symbolic expression generator, an infix boolean
//! expression parser/evaluator, and a Quine–McCluskey two-level minimizer.
//!
//! The crate is deliberately UI-free. The editing layer (canvas, palette,
//! mouse routing) is a caller: it mutates the [`Circuit`][circuit::Circuit],
//! invokes [`evaluate`][circuit::Circuit::evaluate] once per update tick, and
//! consumes strings and tables from the analysis surface.
//!
//! ## The pipeline
//!
//! ```text
//! graph  -->  states  -->  expression  -->  truth table  -->  minimized SOP
//! ```
//!
//! - [`circuit`]: the gate graph, fixed-point relaxation and symbolic
//!   expression generation.
//! - [`parse`]: infix boolean expressions (`.` AND, `+` OR, `~` NOT, `^` XOR),
//!   shunting-yard conversion and stack evaluation.
//! - [`truth_table`]: exhaustive enumeration of a circuit's or expression's
//!   assignments, minterm extraction, ASCII rendering.
//! - [`minimize`]: Quine–McCluskey prime-implicant reduction to a near-minimal
//!   sum-of-products form.
//!
//! ## Design posture
//!
//! The engine runs while the user is mid-edit, so every operation is total:
//! half-wired gates evaluate to `false`, invalid expressions become sentinel
//! errors ([`error::LogicError`]) rather than panics, and feedback loops are
//! bounded by an iteration cap rather than detected. Gates are addressed by
//! generational handles ([`arena::GateId`]), so removing a gate never
//! invalidates references to the survivors.
//!
//! ## Basic usage
//!
//! ```rust
//! use logic_rs::circuit::Circuit;
//! use logic_rs::gate::{GateKind, Point};
//! use logic_rs::truth_table::TruthTable;
//! use logic_rs::wire::SourcePin;
//!
//! let mut circuit = Circuit::new();
//! let a = circuit.add_gate(GateKind::Input, Point::default()).unwrap();
//! let b = circuit.add_gate(GateKind::Input, Point::default()).unwrap();
//! let xor = circuit.add_gate(GateKind::Xor, Point::default()).unwrap();
//! let y = circuit.add_gate(GateKind::Output, Point::default()).unwrap();
//! circuit.add_wire(a, SourcePin::Output, xor, 0);
//! circuit.add_wire(b, SourcePin::Output, xor, 1);
//! circuit.add_wire(xor, SourcePin::Output, y, 0);
//!
//! circuit.evaluate();
//! assert_eq!(circuit.expressions().unwrap(), "Y1 = (A^B)\n");
//!
//! let table = TruthTable::of_circuit(&circuit).unwrap();
//! assert_eq!(table.minterm_indices(), vec![1, 2]);
//! assert_eq!(table.minimized(), "A^B");
//! ```

pub mod arena;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod minimize;
pub mod parse;
pub mod truth_table;
pub mod wire;
