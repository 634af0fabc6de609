//! Block Classifier
//!
//! Splits a source text into classified lines. [line_classification] holds the stateless
//! per-line rules, [state_machine] the three-state machine that decides when they apply and
//! accumulates code and equation blocks across lines.

pub mod line_classification;
pub mod state_machine;

pub use line_classification::{classify_line, Fence, LineType};
pub use state_machine::{
    ClassifiedLine, LineClassifier, LineState, LineStateMachine, Step, Unterminated,
};
