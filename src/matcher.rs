/*!
Exhaustive case analysis

A [`Matcher`](struct.Matcher.html) lives for a single evaluation of
[`SumType::case`](../sum/struct.SumType.html#method.case): arms are
registered in order, the owning registry is scanned for exhaustiveness,
and only then does the first matching arm's handler run. The
exhaustiveness scan is unconditional; it fails even when the target
would have matched a registered arm, and even when the uncovered
variant could never be reached.
*/
use crate::error::Error;
use crate::sum::SumType;
use crate::value::Value;
use crate::variant::{SumValue, VariantType};
use smallvec::SmallVec;
use std::fmt::{self, Debug, Formatter};

type Handler<'a> = Box<dyn FnOnce() -> Value + 'a>;

/// A single case-analysis evaluation over a sum type's variants
pub struct Matcher<'a> {
    arms: SmallVec<[(VariantType, Handler<'a>); 4]>,
}

impl Debug for Matcher<'_> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        let covered: Vec<&str> = self.arms.iter().map(|(variant, _)| variant.name()).collect();
        fmt.debug_struct("Matcher").field("arms", &covered).finish()
    }
}

impl<'a> Matcher<'a> {
    pub(crate) fn new() -> Matcher<'a> {
        Matcher {
            arms: SmallVec::new(),
        }
    }
    /// Register a handler for a variant.
    ///
    /// Arms are kept in registration order and the earliest matching arm
    /// wins. Handlers take no arguments; a handler needing the matched
    /// instance's fields closes over the target from its enclosing scope.
    pub fn on(&mut self, variant: &VariantType, handler: impl FnOnce() -> Value + 'a) {
        self.arms.push((variant.clone(), Box::new(handler)));
    }
    /// Check whether a variant is covered by a registered arm
    #[inline]
    pub fn covers(&self, variant: &VariantType) -> bool {
        self.arms.iter().any(|(covered, _)| covered == variant)
    }

    /// Check exhaustiveness against the registry, then dispatch on `target`
    pub(crate) fn match_on(
        self,
        sum: &SumType,
        target: Option<&SumValue>,
    ) -> Result<Option<Value>, Error> {
        self.ensure_all_variants_handled(sum)?;
        let target = match target {
            Some(target) => target,
            None => return Ok(None),
        };
        for (variant, handler) in self.arms {
            if target.is(&variant) {
                return Ok(Some(handler()));
            }
        }
        Ok(None)
    }

    /// Scan the registry in declaration order; the first uncovered
    /// variant fails the whole evaluation
    fn ensure_all_variants_handled(&self, sum: &SumType) -> Result<(), Error> {
        for (name, variant) in sum.variants() {
            if !self.covers(variant) {
                return Err(Error::NonExhaustiveMatch {
                    variant: name.to_owned(),
                });
            }
        }
        Ok(())
    }
}
