//! Placeholder allocation and parameter storage.

use crate::value::Value;
use indexmap::IndexMap;

/// Prefix of every generated placeholder (`@param1`, `@param2`, ...).
pub const PARAM_PREFIX: &str = "@param";

/// Insertion-ordered parameter map: placeholder name -> value.
pub type Parameters = IndexMap<String, Value>;

/// Allocates sequential placeholder names and records values in order.
///
/// Ordinals are 1-based and strictly increasing for the lifetime of the binder.
#[derive(Clone, Debug, Default)]
pub struct ParamBinder {
    params: Parameters,
}

impl ParamBinder {
    /// Create a new empty binder.
    pub fn new() -> Self {
        Self {
            params: IndexMap::new(),
        }
    }

    /// Bind a value and return its placeholder name.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        let name = placeholder(self.params.len() + 1);
        self.params.insert(name.clone(), value.into());
        name
    }

    /// Bind every value and return the comma-separated placeholder list.
    pub fn bind_list<I>(&mut self, values: I) -> String
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let names: Vec<String> = values.into_iter().map(|v| self.bind(v)).collect();
        names.join(", ")
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if nothing has been bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Look up a bound value by placeholder name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Borrow the bound parameters.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Consume the binder, yielding the parameter map.
    pub fn into_params(self) -> Parameters {
        self.params
    }
}

/// Placeholder name for a 1-based ordinal.
pub fn placeholder(ordinal: usize) -> String {
    format!("{PARAM_PREFIX}{ordinal}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_allocates_sequential_names() {
        let mut binder = ParamBinder::new();
        assert_eq!(binder.bind(10), "@param1");
        assert_eq!(binder.bind("x"), "@param2");
        assert_eq!(binder.len(), 2);
        assert_eq!(binder.get("@param1"), Some(&Value::Int(10)));
    }

    #[test]
    fn bind_list_joins_placeholders() {
        let mut binder = ParamBinder::new();
        binder.bind(0);
        assert_eq!(binder.bind_list([1, 2, 3]), "@param2, @param3, @param4");
        let keys: Vec<&str> = binder.params().keys().map(String::as_str).collect();
        assert_eq!(keys, ["@param1", "@param2", "@param3", "@param4"]);
    }

    #[test]
    fn clone_is_independent() {
        let mut a = ParamBinder::new();
        a.bind(1);
        let mut b = a.clone();
        b.bind(2);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
    }
}
