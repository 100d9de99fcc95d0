//! Parameter bindings shared by both primitives.

use serde::{Deserialize, Serialize};

/// Values for a circuit's free parameters, in canonical parameter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ParameterValues {
    /// The circuit has no free parameters.
    #[default]
    None,
    /// One binding; contributes no array axis.
    Single(Vec<f64>),
    /// Several bindings; contributes the leading array axis.
    List(Vec<Vec<f64>>),
}

impl ParameterValues {
    /// Every binding as a slice. `None` yields one empty binding.
    pub fn bindings(&self) -> Vec<&[f64]> {
        match self {
            Self::None => vec![&[] as &[f64]],
            Self::Single(values) => vec![values.as_slice()],
            Self::List(list) => list.iter().map(Vec::as_slice).collect(),
        }
    }
}

impl From<Vec<f64>> for ParameterValues {
    fn from(values: Vec<f64>) -> Self {
        Self::Single(values)
    }
}

impl From<Vec<Vec<f64>>> for ParameterValues {
    fn from(list: Vec<Vec<f64>>) -> Self {
        Self::List(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_one_empty_binding() {
        let values = ParameterValues::None;
        assert_eq!(values.bindings(), vec![&[] as &[f64]]);
    }

    #[test]
    fn test_list_bindings() {
        let values = ParameterValues::from(vec![vec![1.0], vec![2.0]]);
        assert_eq!(values.bindings().len(), 2);
        assert_eq!(values.bindings()[1], &[2.0]);
    }
}
