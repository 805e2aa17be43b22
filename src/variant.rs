/*!
Variant descriptors, constructed instances, and the value-level union

A [`VariantType`](struct.VariantType.html) is a cheaply-cloneable shared
handle to an immutable variant descriptor. Equality between handles is
descriptor identity, which gives atomic variants their singleton
semantics: the handle itself is the variant's sole value. Carrying
variants act as constructors; their values are
[`VariantInstance`](struct.VariantInstance.html)s, which also compare by
constructed identity. A case analysis scrutinises a
[`SumValue`](enum.SumValue.html), the union of the two.
*/
use crate::error::Error;
use crate::method::{Method, MethodTable};
use crate::value::{Record, Value};
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// The ordered field-name list of a variant
pub(crate) type FieldNames = SmallVec<[String; 4]>;

#[derive(Debug)]
struct VariantData {
    name: String,
    fields: FieldNames,
    methods: MethodTable,
}

/// One case of a sum type
///
/// Atomic (no fields) or carrying (one or more named fields). The handle
/// is cheap to clone; all clones share one sealed descriptor, and
/// equality is identity of that descriptor.
#[derive(Debug, Clone)]
pub struct VariantType(Arc<VariantData>);

impl VariantType {
    pub(crate) fn new(name: String, fields: FieldNames, methods: MethodTable) -> VariantType {
        VariantType(Arc::new(VariantData {
            name,
            fields,
            methods,
        }))
    }
    /// Get the name of this variant
    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }
    /// Get the declared field names of this variant, in declaration order
    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.0.fields
    }
    /// Check whether this variant carries fields
    #[inline]
    pub fn is_carrying(&self) -> bool {
        !self.0.fields.is_empty()
    }
    /// Check whether this variant is atomic
    #[inline]
    pub fn is_atomic(&self) -> bool {
        self.0.fields.is_empty()
    }
    /// Look up a method of this variant by name
    #[inline]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.0.methods.get(name)
    }
    /// Check whether this variant defines a method
    #[inline]
    pub fn has_method(&self, name: &str) -> bool {
        self.0.methods.contains(name)
    }
    /// Iterate over this variant's method names, in registration order.
    /// Shared methods of the owning sum type are included
    pub fn method_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.methods.names()
    }
    /// Call a type-level method of an atomic variant.
    ///
    /// Atomic variants double as their own singleton instance, so their
    /// methods are callable on the handle without construction; the body
    /// executes against an empty field record. Carrying variants keep
    /// their behaviour on constructed instances instead.
    pub fn call(&self, method: &str) -> Result<Value, Error> {
        if self.is_carrying() {
            return Err(Error::NotAtomic {
                variant: self.name().to_owned(),
            });
        }
        let body = self.method(method).ok_or_else(|| Error::UnknownMethod {
            variant: self.name().to_owned(),
            method: method.to_owned(),
        })?;
        Ok(body.invoke(&Record::default()))
    }
    /// Construct an instance of a carrying variant.
    ///
    /// The bindings must cover the declared fields exactly: a missing,
    /// undeclared, or repeated field fails with the corresponding caller
    /// error, and atomic variants cannot be constructed at all. The
    /// instance's field record is normalised to declared field order
    /// regardless of binding order.
    pub fn construct<K, I>(&self, bindings: I) -> Result<VariantInstance, Error>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        if self.is_atomic() {
            return Err(Error::NotCarrying {
                variant: self.name().to_owned(),
            });
        }
        let mut supplied = Record::default();
        for (field, value) in bindings {
            let field = field.into();
            if !self.0.fields.iter().any(|f| *f == field) {
                return Err(Error::UnexpectedField {
                    variant: self.name().to_owned(),
                    field,
                });
            }
            if supplied.insert(field.clone(), value).is_some() {
                return Err(Error::DuplicateField {
                    variant: self.name().to_owned(),
                    field,
                });
            }
        }
        let mut fields = Record::default();
        for field in &self.0.fields {
            match supplied.swap_remove(field) {
                Some(value) => {
                    fields.insert(field.clone(), value);
                }
                None => {
                    return Err(Error::MissingField {
                        variant: self.name().to_owned(),
                        field: field.clone(),
                    })
                }
            }
        }
        Ok(VariantInstance(Arc::new(InstanceData {
            ty: self.clone(),
            fields,
        })))
    }
}

impl PartialEq for VariantType {
    #[inline]
    fn eq(&self, other: &VariantType) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VariantType {}

impl Display for VariantType {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        fmt.write_str(self.name())
    }
}

#[derive(Debug)]
struct InstanceData {
    ty: VariantType,
    fields: Record,
}

/// A constructed value of a carrying variant
///
/// Holds one immutable binding per declared field plus a back-reference
/// to its variant. Equality is constructed identity: two separately
/// constructed instances are distinct even with equal fields.
#[derive(Debug, Clone)]
pub struct VariantInstance(Arc<InstanceData>);

impl VariantInstance {
    /// Get the variant this instance belongs to
    #[inline]
    pub fn ty(&self) -> &VariantType {
        &self.0.ty
    }
    /// Get a field binding by name
    #[inline]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.fields.get(name)
    }
    /// Get this instance's field record, in declared field order
    #[inline]
    pub fn fields(&self) -> &Record {
        &self.0.fields
    }
    /// Call a method of this instance; the body executes against its
    /// field record
    pub fn call(&self, method: &str) -> Result<Value, Error> {
        let body = self
            .0
            .ty
            .method(method)
            .ok_or_else(|| Error::UnknownMethod {
                variant: self.0.ty.name().to_owned(),
                method: method.to_owned(),
            })?;
        Ok(body.invoke(&self.0.fields))
    }
}

impl PartialEq for VariantInstance {
    #[inline]
    fn eq(&self, other: &VariantInstance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VariantInstance {}

/// A value drawn from a sum type: the target of a case analysis
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SumValue {
    /// An atomic variant's singleton value: the variant handle itself
    Atom(VariantType),
    /// A constructed instance of a carrying variant
    Instance(VariantInstance),
}

impl SumValue {
    /// Get the variant this value belongs to
    #[inline]
    pub fn variant(&self) -> &VariantType {
        match self {
            SumValue::Atom(variant) => variant,
            SumValue::Instance(instance) => instance.ty(),
        }
    }
    /// Check whether this value belongs to a given variant
    #[inline]
    pub fn is(&self, variant: &VariantType) -> bool {
        self.variant() == variant
    }
    /// Call a method on this value
    pub fn call(&self, method: &str) -> Result<Value, Error> {
        match self {
            SumValue::Atom(variant) => variant.call(method),
            SumValue::Instance(instance) => instance.call(method),
        }
    }
}

impl From<VariantType> for SumValue {
    #[inline]
    fn from(variant: VariantType) -> SumValue {
        SumValue::Atom(variant)
    }
}

impl From<VariantInstance> for SumValue {
    #[inline]
    fn from(instance: VariantInstance) -> SumValue {
        SumValue::Instance(instance)
    }
}

/// The declaration body of a single variant
///
/// Passed to the definition closure of
/// [`SumType::variant`](../sum/struct.SumType.html#method.variant) to
/// register the variant's local methods.
#[derive(Debug)]
pub struct VariantBuilder {
    methods: MethodTable,
}

impl VariantBuilder {
    pub(crate) fn new() -> VariantBuilder {
        VariantBuilder {
            methods: MethodTable::new(),
        }
    }
    /// Register a method on the variant under declaration
    pub fn method(
        &mut self,
        name: impl Into<String>,
        body: impl Fn(&Record) -> Value + Send + Sync + 'static,
    ) -> Result<(), Error> {
        self.methods.try_def(name, Method::new(body))
    }
    pub(crate) fn into_methods(self) -> MethodTable {
        self.methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn carrying(name: &str, fields: &[&str]) -> VariantType {
        let mut builder = VariantBuilder::new();
        builder
            .method("describe", |fields| {
                Value::from(format!("{} fields", fields.len()))
            })
            .unwrap();
        VariantType::new(
            name.to_owned(),
            fields.iter().map(|f| (*f).to_owned()).collect(),
            builder.into_methods(),
        )
    }

    #[test]
    fn atomic_identity() {
        let red = VariantType::new("Red".to_owned(), FieldNames::new(), MethodTable::new());
        let blue = VariantType::new("Blue".to_owned(), FieldNames::new(), MethodTable::new());
        assert_eq!(red, red.clone());
        assert_ne!(red, blue);
        assert!(red.is_atomic());
        assert!(!red.is_carrying());
    }

    #[test]
    fn construction_validates_bindings() {
        let user = carrying("User", &["id", "name"]);
        assert_eq!(
            user.construct(vec![("id", Value::from(1))]),
            Err(Error::MissingField {
                variant: "User".to_owned(),
                field: "name".to_owned()
            })
        );
        assert_eq!(
            user.construct(vec![
                ("id", Value::from(1)),
                ("name", Value::from("jo")),
                ("age", Value::from(9)),
            ]),
            Err(Error::UnexpectedField {
                variant: "User".to_owned(),
                field: "age".to_owned()
            })
        );
        assert_eq!(
            user.construct(vec![
                ("id", Value::from(1)),
                ("id", Value::from(2)),
                ("name", Value::from("jo")),
            ]),
            Err(Error::DuplicateField {
                variant: "User".to_owned(),
                field: "id".to_owned()
            })
        );
        let atom = VariantType::new("Red".to_owned(), FieldNames::new(), MethodTable::new());
        assert_eq!(
            atom.construct(Vec::<(String, Value)>::new()),
            Err(Error::NotCarrying {
                variant: "Red".to_owned()
            })
        );
    }

    #[test]
    fn fields_normalised_to_declared_order() {
        let user = carrying("User", &["id", "name"]);
        let instance = user
            .construct(vec![("name", Value::from("jo")), ("id", Value::from(1))])
            .expect("complete bindings");
        let keys: Vec<_> = instance.fields().keys().cloned().collect();
        assert_eq!(keys, ["id", "name"]);
        assert_eq!(instance.field("id"), Some(&Value::Int(1)));
        assert_eq!(instance.field("age"), None);
    }

    #[test]
    fn instance_identity() {
        let user = carrying("User", &["id"]);
        let a = user.construct(vec![("id", Value::from(1))]).unwrap();
        let b = user.construct(vec![("id", Value::from(1))]).unwrap();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn method_calls() {
        let user = carrying("User", &["id", "name"]);
        let instance = user
            .construct(vec![("id", Value::from(1)), ("name", Value::from("jo"))])
            .unwrap();
        assert_eq!(instance.call("describe"), Ok(Value::from("2 fields")));
        assert_eq!(
            instance.call("missing"),
            Err(Error::UnknownMethod {
                variant: "User".to_owned(),
                method: "missing".to_owned()
            })
        );
        // type-level calls are reserved for atomic variants
        assert_eq!(
            user.call("describe"),
            Err(Error::NotAtomic {
                variant: "User".to_owned()
            })
        );
        let mut builder = VariantBuilder::new();
        builder.method("rgb", |_| Value::from("ff0000")).unwrap();
        let red = VariantType::new("Red".to_owned(), FieldNames::new(), builder.into_methods());
        assert_eq!(red.call("rgb"), Ok(Value::from("ff0000")));
    }

    #[test]
    fn sum_value_dispatch_helpers() {
        let user = carrying("User", &["id"]);
        let instance = user.construct(vec![("id", Value::from(1))]).unwrap();
        let value = SumValue::from(instance.clone());
        assert!(value.is(&user));
        assert_eq!(value.variant(), &user);
        assert_eq!(value.call("describe"), Ok(Value::from("1 fields")));
        let red = VariantType::new("Red".to_owned(), FieldNames::new(), MethodTable::new());
        let atom = SumValue::from(red.clone());
        assert!(atom.is(&red));
        assert!(!atom.is(&user));
    }
}
