//! [`Environment`] and related types.

use std::collections::{hash_map, HashMap};

use core::{f64::consts, iter};

use crate::fns::StdFunction;

/// Name of the binding holding the previous successful result.
pub const ANS: &str = "ans";

const CONSTANTS: [(&str, f64); 2] = [("pi", consts::PI), ("e", consts::E)];

/// Value bound to a name in an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    /// Numeric constant, such as `pi`.
    Number(f64),
    /// Callable function, such as `sqrt`.
    Function(StdFunction),
}

/// Closed set of names visible to an expression.
///
/// An environment contains [whitelisted functions](StdFunction), the `pi` and `e` constants
/// and, if a previous result is provided, the [`ANS`] constant. It is rebuilt for each
/// evaluation and cannot be extended.
///
/// # Examples
///
/// ```
/// use calc_eval::{Binding, Environment, StdFunction};
///
/// let env = Environment::new(Some(42.0));
/// assert_eq!(env.get("ans"), Some(Binding::Number(42.0)));
/// assert_eq!(env.get("sqrt"), Some(Binding::Function(StdFunction::Sqrt)));
/// assert_eq!(env.get("x"), None);
///
/// let env = Environment::new(None);
/// assert_eq!(env.get("ans"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    bindings: HashMap<&'static str, Binding>,
    ans: Option<f64>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Environment {
    /// Creates an environment. `ans` is bound only if `previous` is a finite number.
    pub fn new(previous: Option<f64>) -> Self {
        let ans = previous.filter(|value| value.is_finite());
        let functions = StdFunction::ALL
            .into_iter()
            .map(|function| (function.name(), Binding::Function(function)));
        let constants = CONSTANTS
            .into_iter()
            .chain(ans.map(|value| (ANS, value)))
            .map(|(name, value)| (name, Binding::Number(value)));

        Self {
            bindings: functions.chain(constants).collect(),
            ans,
        }
    }

    /// Returns the previous result bound to [`ANS`], if any.
    pub fn ans(&self) -> Option<f64> {
        self.ans
    }

    /// Gets a binding by name.
    pub fn get(&self, name: &str) -> Option<Binding> {
        self.bindings.get(name).copied()
    }

    /// Checks whether the environment has a binding with the specified name.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Iterates over all bindings in the environment in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Binding)> + '_ {
        self.into_iter()
    }

    /// Lists names of all callable functions, sorted alphabetically.
    pub fn function_names(&self) -> Vec<&'static str> {
        self.sorted_names(|binding| matches!(binding, Binding::Function(_)))
    }

    /// Lists names of all numeric constants, sorted alphabetically.
    pub fn constant_names(&self) -> Vec<&'static str> {
        self.sorted_names(|binding| matches!(binding, Binding::Number(_)))
    }

    fn sorted_names(&self, filter: impl Fn(&Binding) -> bool) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .bindings
            .iter()
            .filter_map(|(name, binding)| filter(binding).then_some(*name))
            .collect();
        names.sort_unstable();
        names
    }
}

impl<'r> IntoIterator for &'r Environment {
    type Item = (&'static str, Binding);
    type IntoIter = iter::Map<
        hash_map::Iter<'r, &'static str, Binding>,
        fn((&'r &'static str, &'r Binding)) -> (&'static str, Binding),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let copy_entry: fn((&'r &'static str, &'r Binding)) -> (&'static str, Binding) =
            |(name, binding)| (*name, *binding);
        self.bindings.iter().map(copy_entry)
    }
}
