/*!
Sum-type declarations: the variant registry and the consistency checker

A [`SumType`](struct.SumType.html) owns the ordered registry of its
variants, the single source of truth for "all variants" consulted by
every case analysis. The registry is append-only and appends are atomic:
each variant declaration immediately re-runs the method-consistency
checker over the whole registry, and a declaration that fails the check
is removed again, leaving the registry exactly as it was.
*/
use crate::error::Error;
use crate::matcher::Matcher;
use crate::method::{Method, MethodTable};
use crate::value::{Record, Value};
use crate::variant::{FieldNames, SumValue, VariantBuilder, VariantType};
use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};

/// A closed, named collection of variants with shared behaviour
#[derive(Debug)]
pub struct SumType {
    name: String,
    shared: MethodTable,
    variants: IndexMap<String, VariantType, RandomState>,
}

impl SumType {
    /// Create an empty sum type with the given name
    pub fn new(name: impl Into<String>) -> SumType {
        SumType {
            name: name.into(),
            shared: MethodTable::new(),
            variants: IndexMap::default(),
        }
    }
    /// Get the name of this sum type
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Declare a shared method, available to every variant.
    ///
    /// Shared behaviour satisfies structural parity for all variants
    /// without each variant redeclaring it. It must be declared before
    /// the first variant: descriptors are sealed at declaration, so a
    /// later shared method could not reach variants that already exist.
    pub fn shared(
        &mut self,
        name: impl Into<String>,
        body: impl Fn(&Record) -> Value + Send + Sync + 'static,
    ) -> Result<(), Error> {
        let name = name.into();
        if !self.variants.is_empty() {
            return Err(Error::SharedAfterVariants {
                sum: self.name.clone(),
                method: name,
            });
        }
        self.shared.try_def(name, Method::new(body))
    }
    /// Declare a variant of this sum type.
    ///
    /// `fields` empty declares an atomic variant, whose returned handle is
    /// its sole value; otherwise a carrying variant, whose values are
    /// constructed via [`VariantType::construct`](../variant/struct.VariantType.html#method.construct).
    /// `def` registers the variant's local methods; the sum type's shared
    /// behaviour is merged in, with local definitions taking precedence.
    ///
    /// The new variant is appended to the registry and the consistency
    /// checker runs immediately over the full registry. On a parity
    /// violation the append is rolled back and the error propagates, so a
    /// failed declaration never changes the registry. Variant names are
    /// unique; redeclaring one fails rather than shadowing.
    pub fn variant(
        &mut self,
        name: impl Into<String>,
        fields: &[&str],
        def: impl FnOnce(&mut VariantBuilder) -> Result<(), Error>,
    ) -> Result<VariantType, Error> {
        let name = name.into();
        if self.variants.contains_key(&name) {
            return Err(Error::DuplicateVariant { variant: name });
        }
        let mut field_names = FieldNames::new();
        for field in fields {
            if field_names.iter().any(|f| f == field) {
                return Err(Error::DuplicateField {
                    variant: name,
                    field: (*field).to_owned(),
                });
            }
            field_names.push((*field).to_owned());
        }
        let mut builder = VariantBuilder::new();
        def(&mut builder)?;
        let mut methods = builder.into_methods();
        methods.merge(&self.shared);
        let variant = VariantType::new(name.clone(), field_names, methods);
        self.variants.insert(name, variant.clone());
        if let Err(error) = self.check_consistency() {
            self.variants.pop();
            return Err(error);
        }
        Ok(variant)
    }
    /// Declare an atomic variant with no local behaviour
    pub fn atom(&mut self, name: impl Into<String>) -> Result<VariantType, Error> {
        self.variant(name, &[], |_| Ok(()))
    }
    /// Look up a variant by name
    #[inline]
    pub fn get(&self, name: &str) -> Option<&VariantType> {
        self.variants.get(name)
    }
    /// Iterate over the registry, in declaration order
    pub fn variants(&self) -> impl Iterator<Item = (&str, &VariantType)> + '_ {
        self.variants.iter().map(|(name, variant)| (name.as_str(), variant))
    }
    /// Get the number of declared variants
    #[inline]
    pub fn len(&self) -> usize {
        self.variants.len()
    }
    /// Check whether this sum type has no variants yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
    /// Evaluate a case analysis against a target value.
    ///
    /// `body` registers `(variant, handler)` arms on a fresh
    /// [`Matcher`](../matcher/struct.Matcher.html) bound to this registry;
    /// see [`Matcher::on`](../matcher/struct.Matcher.html#method.on). The
    /// matcher checks exhaustiveness against the registry before any
    /// dispatch, then runs the first matching handler. An exhaustive
    /// analysis whose target matches no arm (absent, or drawn from an
    /// unrelated sum type) yields `Ok(None)`.
    pub fn case<'a>(
        &self,
        target: Option<&SumValue>,
        body: impl FnOnce(&mut Matcher<'a>),
    ) -> Result<Option<Value>, Error> {
        let mut matcher = Matcher::new();
        body(&mut matcher);
        matcher.match_on(self, target)
    }

    /// Enforce structural parity over the full registry.
    ///
    /// The required method set is the union over *all* registered
    /// variants, recomputed on every append, so a variant introducing a
    /// genuinely new method name retroactively fails the earliest
    /// variant lacking it. The first offending variant in declaration
    /// order is reported; later variants are not scanned.
    fn check_consistency(&self) -> Result<(), Error> {
        let mut all_methods: IndexSet<&str, RandomState> = IndexSet::default();
        for variant in self.variants.values() {
            all_methods.extend(variant.method_names());
        }
        for (name, variant) in &self.variants {
            let missing: Vec<String> = all_methods
                .iter()
                .filter(|method| !variant.has_method(method))
                .map(|method| (*method).to_owned())
                .collect();
            if !missing.is_empty() {
                return Err(Error::MissingMethods {
                    variant: name.clone(),
                    methods: missing,
                });
            }
        }
        Ok(())
    }
}
