/*!
Errors raised while declaring or using a sum type

Every variant of [`Error`](enum.Error.html) represents a programmer
mistake rather than a recoverable runtime condition: declaration and
case analysis fail fast, nothing is silently swallowed, and no partial
result is ever returned on failure.
*/

/// An error raised by sum-type declaration, construction, or case analysis
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Structural parity violation: a variant lacks methods another variant of
    /// the same sum type defines. Raised eagerly, on the declaration that
    /// introduced the divergence; the offending declaration is rolled back.
    #[error("variant `{variant}` is missing the following methods: {}", .methods.join(", "))]
    MissingMethods {
        /// The first offending variant, in declaration order
        variant: String,
        /// The method names it lacks, in first-seen order
        methods: Vec<String>,
    },
    /// A case analysis does not cover every declared variant
    #[error("variant `{variant}` is not handled")]
    NonExhaustiveMatch {
        /// The first uncovered variant, in declaration order
        variant: String,
    },
    /// A variant name was declared twice on the same sum type
    #[error("variant `{variant}` is already declared")]
    DuplicateVariant {
        /// The redeclared variant name
        variant: String,
    },
    /// A field name appeared twice, either in a variant declaration or in the
    /// bindings supplied to a constructor
    #[error("duplicate field `{field}` on variant `{variant}`")]
    DuplicateField {
        /// The variant being declared or constructed
        variant: String,
        /// The repeated field name
        field: String,
    },
    /// A method name was registered twice on the same method table
    #[error("method `{method}` is already defined")]
    DuplicateMethod {
        /// The redefined method name
        method: String,
    },
    /// Shared behaviour was declared after the first variant
    #[error("shared method `{method}` must be declared before any variant of `{sum}`")]
    SharedAfterVariants {
        /// The sum type being declared
        sum: String,
        /// The late shared method
        method: String,
    },
    /// An atomic variant was used as a constructor
    #[error("variant `{variant}` carries no fields and cannot be constructed")]
    NotCarrying {
        /// The atomic variant
        variant: String,
    },
    /// A type-level method call on a carrying variant, whose behaviour lives
    /// on constructed instances
    #[error("variant `{variant}` is not atomic; call methods on a constructed instance")]
    NotAtomic {
        /// The carrying variant
        variant: String,
    },
    /// A constructor was invoked without a binding for a declared field
    #[error("missing field `{field}` for variant `{variant}`")]
    MissingField {
        /// The variant being constructed
        variant: String,
        /// The declared field left unbound
        field: String,
    },
    /// A constructor was invoked with a binding for an undeclared field
    #[error("unexpected field `{field}` for variant `{variant}`")]
    UnexpectedField {
        /// The variant being constructed
        variant: String,
        /// The undeclared field name
        field: String,
    },
    /// A method call named an operation the variant does not define
    #[error("variant `{variant}` has no method `{method}`")]
    UnknownMethod {
        /// The variant the call was made against
        variant: String,
        /// The unknown method name
        method: String,
    },
}
