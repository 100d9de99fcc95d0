//! Symbolic gate angles.
//!
//! Variational forms carry free angles such as `θ[3]`. A
//! [`ParameterExpression`] keeps them symbolic until a circuit is bound with
//! concrete values.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::fmt;

use crate::error::{IrError, IrResult};

/// A gate angle, either concrete or built from named parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A concrete value in radians.
    Constant(f64),
    /// A named free parameter.
    Symbol(String),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Sum of two expressions.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Difference of two expressions.
    Sub(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Product of two expressions.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Quotient of two expressions.
    Div(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// A concrete angle.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// A named free parameter.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// The `index`-th element of a parameter vector, named `base[index]`.
    pub fn indexed(base: &str, index: usize) -> Self {
        Self::Symbol(format!("{base}[{index}]"))
    }

    /// The constant π.
    pub fn pi() -> Self {
        Self::Pi
    }

    /// Whether any free parameter remains in the expression.
    pub fn is_symbolic(&self) -> bool {
        match self {
            Self::Symbol(_) => true,
            Self::Constant(_) | Self::Pi => false,
            Self::Neg(e) => e.is_symbolic(),
            Self::Add(a, b) | Self::Sub(a, b) | Self::Mul(a, b) | Self::Div(a, b) => {
                a.is_symbolic() || b.is_symbolic()
            }
        }
    }

    /// Evaluate to a number, or `None` while symbols remain.
    ///
    /// Division by zero also evaluates to `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Constant(v) => Some(*v),
            Self::Symbol(_) => None,
            Self::Pi => Some(PI),
            Self::Neg(e) => e.as_f64().map(|v| -v),
            Self::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            Self::Sub(a, b) => Some(a.as_f64()? - b.as_f64()?),
            Self::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
            Self::Div(a, b) => {
                let den = b.as_f64()?;
                if den == 0.0 {
                    None
                } else {
                    Some(a.as_f64()? / den)
                }
            }
        }
    }

    /// Evaluate to a number, failing with the first unbound symbol.
    pub fn value(&self) -> IrResult<f64> {
        self.as_f64().ok_or_else(|| {
            let name = self
                .symbols()
                .into_iter()
                .next()
                .unwrap_or_else(|| self.to_string());
            IrError::UnboundParameter(name)
        })
    }

    /// Insert every symbol name used by the expression into `out`.
    pub fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            Self::Constant(_) | Self::Pi => {}
            Self::Symbol(name) => {
                out.insert(name.clone());
            }
            Self::Neg(e) => e.collect_symbols(out),
            Self::Add(a, b) | Self::Sub(a, b) | Self::Mul(a, b) | Self::Div(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
        }
    }

    /// Symbol names used by the expression.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    /// Substitute every symbol found in `values`.
    ///
    /// The result is folded to a [`ParameterExpression::Constant`] when no
    /// symbol is left.
    pub fn substitute(&self, values: &FxHashMap<String, f64>) -> Self {
        let replaced = self.replace(values);
        match replaced.as_f64() {
            Some(v) => Self::Constant(v),
            None => replaced,
        }
    }

    fn replace(&self, values: &FxHashMap<String, f64>) -> Self {
        let both = |a: &Self, b: &Self| (Box::new(a.replace(values)), Box::new(b.replace(values)));
        match self {
            Self::Symbol(name) => match values.get(name) {
                Some(v) => Self::Constant(*v),
                None => self.clone(),
            },
            Self::Constant(_) | Self::Pi => self.clone(),
            Self::Neg(e) => Self::Neg(Box::new(e.replace(values))),
            Self::Add(a, b) => {
                let (a, b) = both(a, b);
                Self::Add(a, b)
            }
            Self::Sub(a, b) => {
                let (a, b) = both(a, b);
                Self::Sub(a, b)
            }
            Self::Mul(a, b) => {
                let (a, b) = both(a, b);
                Self::Mul(a, b)
            }
            Self::Div(a, b) => {
                let (a, b) = both(a, b);
                Self::Div(a, b)
            }
        }
    }
}

/// Order parameter names the way bindings are matched to them.
///
/// Names of the form `base[i]` group by `base` and then sort by the numeric
/// index, so `θ[10]` follows `θ[9]`. Any other name sorts lexically.
pub fn canonical_order(a: &str, b: &str) -> Ordering {
    match (split_indexed(a), split_indexed(b)) {
        (Some((base_a, idx_a)), Some((base_b, idx_b))) => {
            base_a.cmp(base_b).then(idx_a.cmp(&idx_b))
        }
        _ => a.cmp(b),
    }
}

fn split_indexed(name: &str) -> Option<(&str, usize)> {
    let open = name.rfind('[')?;
    let inner = name[open + 1..].strip_suffix(']')?;
    let index = inner.parse().ok()?;
    Some((&name[..open], index))
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "{v}"),
            Self::Symbol(name) => f.write_str(name),
            Self::Pi => f.write_str("π"),
            Self::Neg(e) => write!(f, "-{e}"),
            Self::Add(a, b) => write!(f, "({a} + {b})"),
            Self::Sub(a, b) => write!(f, "({a} - {b})"),
            Self::Mul(a, b) => write!(f, "{a}*{b}"),
            Self::Div(a, b) => write!(f, "{a}/{b}"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<&str> for ParameterExpression {
    fn from(name: &str) -> Self {
        Self::Symbol(name.to_string())
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self {
        Self::Neg(Box::new(self))
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for ParameterExpression {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Div for ParameterExpression {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::Div(Box::new(self), Box::new(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_folding() {
        let expr = ParameterExpression::pi() / ParameterExpression::constant(2.0);
        assert!(!expr.is_symbolic());
        assert!((expr.as_f64().unwrap() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_division_by_zero_is_none() {
        let expr = ParameterExpression::constant(1.0) / ParameterExpression::constant(0.0);
        assert_eq!(expr.as_f64(), None);
    }

    #[test]
    fn test_substitute() {
        let expr = -ParameterExpression::indexed("θ", 0) + ParameterExpression::pi();
        assert!(expr.is_symbolic());

        let mut values = FxHashMap::default();
        values.insert("θ[0]".to_string(), 1.0);
        let bound = expr.substitute(&values);
        assert_eq!(bound, ParameterExpression::Constant(PI - 1.0));
    }

    #[test]
    fn test_partial_substitute_keeps_symbols() {
        let expr = ParameterExpression::symbol("a") * ParameterExpression::symbol("b");
        let mut values = FxHashMap::default();
        values.insert("a".to_string(), 2.0);
        let bound = expr.substitute(&values);
        assert!(bound.is_symbolic());
        assert_eq!(bound.symbols().into_iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_canonical_order_is_numeric() {
        let mut names = vec!["θ[10]", "θ[2]", "θ[1]", "φ", "θ[0]"];
        names.sort_by(|a, b| canonical_order(a, b));
        assert_eq!(names, vec!["θ[0]", "θ[1]", "θ[2]", "θ[10]", "φ"]);
    }
}
