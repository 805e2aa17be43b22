/*!
`closum` provides closed, structurally-checked sum types ("variants")
with two guarantees ordinarily provided by a compiler, enforced at
runtime because variants are registered dynamically:

- every variant of a sum type exposes an identical method surface
  (structural parity, checked eagerly on each variant declaration);
- every explicit case analysis over a sum type's variants is exhaustive
  (checked on each evaluation, before any handler runs).

Declaration happens once, at setup time; a declared sum type and its
variants are immutable thereafter. Case analyses are evaluated against a
[`SumValue`](variant/enum.SumValue.html) and dispatch to the first
matching handler, but only after every declared variant is covered.

# Example

```
use closum::{SumType, SumValue, Value};

let mut color = SumType::new("Color");
let red = color.atom("Red")?;
let blue = color.atom("Blue")?;

let target = SumValue::from(red.clone());
let result = color.case(Some(&target), |m| {
    m.on(&red, || Value::from("stop"));
    m.on(&blue, || Value::from("go"));
})?;
assert_eq!(result, Some(Value::from("stop")));
# Ok::<(), closum::Error>(())
```
*/
#![forbid(unsafe_code, missing_docs, missing_debug_implementations)]

pub mod error;
pub mod matcher;
pub mod method;
pub mod sum;
pub mod value;
pub mod variant;

pub use error::Error;
pub use matcher::Matcher;
pub use method::{Method, MethodTable};
pub use sum::SumType;
pub use value::{Record, Value};
pub use variant::{SumValue, VariantBuilder, VariantInstance, VariantType};
