//! Pauli-sum observables.
//!
//! An observable is a weighted sum of Pauli strings:
//! O = Σᵢ cᵢ Pᵢ
//! where each label is read little-endian, so the last character acts on
//! qubit 0.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while building an observable.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ObservableError {
    /// A label used a character other than `I`, `X`, `Y` or `Z`.
    #[error("Invalid Pauli character '{character}' in label '{label}'")]
    InvalidPauli {
        /// The offending label.
        label: String,
        /// The character that is not a Pauli.
        character: char,
    },

    /// Labels of one observable must all have the same length.
    #[error("Label '{label}' has {got} qubits, expected {expected}")]
    LengthMismatch {
        /// The offending label.
        label: String,
        /// Length of the first label.
        expected: usize,
        /// Length of this label.
        got: usize,
    },

    /// An observable needs at least one term.
    #[error("Observable has no terms")]
    Empty,
}

/// A single Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity operator.
    I,
    /// Pauli-X operator.
    X,
    /// Pauli-Y operator.
    Y,
    /// Pauli-Z operator.
    Z,
}

impl Pauli {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::I),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Get the name of this Pauli operator.
    pub fn name(&self) -> &'static str {
        match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A weighted sum of Pauli strings over a fixed number of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparsePauliOp {
    num_qubits: usize,
    terms: Vec<(String, f64)>,
}

impl SparsePauliOp {
    /// Build an observable from `(label, coefficient)` pairs.
    ///
    /// ```
    /// use qfact_primitives::SparsePauliOp;
    ///
    /// let op = SparsePauliOp::from_list([("II", 1.0), ("IZ", 2.0), ("XI", 3.0)]).unwrap();
    /// assert_eq!(op.num_qubits(), 2);
    /// assert_eq!(op.len(), 3);
    /// ```
    pub fn from_list<S: AsRef<str>>(
        terms: impl IntoIterator<Item = (S, f64)>,
    ) -> Result<Self, ObservableError> {
        let mut num_qubits = None;
        let mut parsed = Vec::new();
        for (label, coeff) in terms {
            let label = label.as_ref();
            if let Some(c) = label.chars().find(|&c| Pauli::from_char(c).is_none()) {
                return Err(ObservableError::InvalidPauli {
                    label: label.to_string(),
                    character: c,
                });
            }
            let len = label.chars().count();
            let expected = *num_qubits.get_or_insert(len);
            if len != expected {
                return Err(ObservableError::LengthMismatch {
                    label: label.to_string(),
                    expected,
                    got: len,
                });
            }
            parsed.push((label.to_string(), coeff));
        }
        let num_qubits = num_qubits.ok_or(ObservableError::Empty)?;
        Ok(Self {
            num_qubits,
            terms: parsed,
        })
    }

    /// Number of qubits the observable acts on.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the observable has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over `(label, coefficient)` pairs.
    pub fn terms(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.terms.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// Pauli acting on `qubit` in term `term`.
    pub fn pauli(&self, term: usize, qubit: usize) -> Option<Pauli> {
        let (label, _) = self.terms.get(term)?;
        let c = label.chars().rev().nth(qubit)?;
        Pauli::from_char(c)
    }

    /// Evaluate Σᵢ cᵢ ⟨Pᵢ⟩ with `expectation` supplying each ⟨Pᵢ⟩.
    pub fn evaluate(&self, mut expectation: impl FnMut(&str) -> f64) -> f64 {
        self.terms
            .iter()
            .map(|(label, coeff)| coeff * expectation(label))
            .sum()
    }
}

impl fmt::Display for SparsePauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, coeff)) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if *coeff >= 0.0 {
                write!(f, "+{coeff:.4} {label}")?;
            } else {
                write!(f, "{coeff:.4} {label}")?;
            }
        }
        Ok(())
    }
}
