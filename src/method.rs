/*!
Named-closure method tables

Methods are registered explicitly by name rather than discovered
reflectively, so a variant's method surface is exactly the contents of
its [`MethodTable`](struct.MethodTable.html). Registration order is
preserved: it determines the order in which the consistency checker
reports missing methods.
*/
use crate::error::Error;
use crate::value::{Record, Value};
use ahash::RandomState;
use indexmap::IndexMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// A method: named behaviour invoked against a variant's field record.
///
/// Atomic variants invoke their methods against an empty record; carrying
/// variants against the constructed instance's fields. Cheap to clone.
#[derive(Clone)]
pub struct Method(Arc<dyn Fn(&Record) -> Value + Send + Sync>);

impl Method {
    /// Wrap a closure as a method body
    pub fn new(body: impl Fn(&Record) -> Value + Send + Sync + 'static) -> Method {
        Method(Arc::new(body))
    }
    /// Invoke this method against a field record
    #[inline]
    pub fn invoke(&self, fields: &Record) -> Value {
        (self.0)(fields)
    }
}

impl Debug for Method {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        fmt.write_str("Method(..)")
    }
}

/// An insertion-ordered table of named methods
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: IndexMap<String, Method, RandomState>,
}

impl MethodTable {
    /// Create a new, empty method table
    pub fn new() -> MethodTable {
        Self::default()
    }
    /// Register a method under a name. Fail if the name is already taken
    pub fn try_def(&mut self, name: impl Into<String>, method: Method) -> Result<(), Error> {
        let name = name.into();
        if self.methods.contains_key(&name) {
            return Err(Error::DuplicateMethod { method: name });
        }
        self.methods.insert(name, method);
        Ok(())
    }
    /// Look up a method by name
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }
    /// Check whether a method name is defined
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
    /// Iterate over the registered method names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.methods.keys().map(String::as_str)
    }
    /// Get the number of registered methods
    #[inline]
    pub fn len(&self) -> usize {
        self.methods.len()
    }
    /// Check whether this method table is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
    /// Merge another table into this one. Existing definitions take precedence
    pub fn merge(&mut self, other: &MethodTable) {
        for (name, method) in &other.methods {
            if !self.methods.contains_key(name) {
                self.methods.insert(name.clone(), method.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_registration_fails() {
        let mut table = MethodTable::new();
        table
            .try_def("url", Method::new(|_| Value::Unit))
            .expect("first registration");
        assert_eq!(
            table.try_def("url", Method::new(|_| Value::Unit)),
            Err(Error::DuplicateMethod {
                method: "url".to_owned()
            })
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn merge_keeps_existing_definitions() {
        let mut local = MethodTable::new();
        local
            .try_def("describe", Method::new(|_| Value::from("local")))
            .unwrap();
        let mut shared = MethodTable::new();
        shared
            .try_def("describe", Method::new(|_| Value::from("shared")))
            .unwrap();
        shared
            .try_def("tag", Method::new(|_| Value::from("shared")))
            .unwrap();
        local.merge(&shared);
        let names: Vec<_> = local.names().collect();
        assert_eq!(names, ["describe", "tag"]);
        let fields = Record::default();
        assert_eq!(
            local.get("describe").unwrap().invoke(&fields),
            Value::from("local")
        );
        assert_eq!(
            local.get("tag").unwrap().invoke(&fields),
            Value::from("shared")
        );
    }

    #[test]
    fn invoke_sees_fields() {
        let mut table = MethodTable::new();
        table
            .try_def(
                "double",
                Method::new(|fields| {
                    let n = fields.get("n").and_then(Value::as_int).unwrap_or(0);
                    Value::from(n * 2)
                }),
            )
            .unwrap();
        let mut fields = Record::default();
        fields.insert("n".to_owned(), Value::from(21));
        assert_eq!(table.get("double").unwrap().invoke(&fields), Value::from(42));
    }
}
