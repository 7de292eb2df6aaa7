//! Region-parameter substitutions.

use crate::element::RplElement;
use crate::rpl::Rpl;
use crate::vector::RplVector;
use smol_str::SmolStr;
use std::fmt;

/// Anything region-parameter bindings can be pushed through.
pub trait Substitutable {
    /// Apply a single `from <- to` rewrite.
    fn substitute(&mut self, sub: &Substitution);

    /// Apply every substitution in order, each one seeing the result of the
    /// previous one.
    fn substitute_all(&mut self, subs: &SubstitutionVector) {
        for sub in subs.iter() {
            self.substitute(sub);
        }
    }
}

/// A single `from <- to` rewrite of a region parameter.
///
/// The default value is the identity: applying it changes nothing, so call
/// sites can build one unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Substitution {
    binding: Option<(RplElement, Rpl)>,
}

impl Substitution {
    /// # Panics
    ///
    /// Panics if `from` is not a region parameter.
    pub fn new(from: RplElement, to: Rpl) -> Self {
        assert!(
            from.is_parameter(),
            "substitutions rewrite region parameters, not `{}`",
            from
        );
        Self {
            binding: Some((from, to)),
        }
    }

    /// Shorthand for binding the parameter named `param`.
    pub fn parameter(param: impl Into<SmolStr>, to: Rpl) -> Self {
        Self::new(RplElement::parameter(param), to)
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.binding.is_none()
    }

    pub fn from(&self) -> Option<&RplElement> {
        self.binding.as_ref().map(|(from, _)| from)
    }

    pub fn to(&self) -> Option<&Rpl> {
        self.binding.as_ref().map(|(_, to)| to)
    }

    /// Rewrite `rpl` in place. Returns whether anything changed.
    pub fn apply_to(&self, rpl: &mut Rpl) -> bool {
        match &self.binding {
            Some((from, to)) => rpl.substitute(from, to),
            None => false,
        }
    }

    pub fn apply_to_vector(&self, rpls: &mut RplVector) {
        if let Some((from, to)) = &self.binding {
            rpls.substitute(from, to);
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binding {
            Some((from, to)) => write!(f, "[{}<-{}]", from, to),
            None => write!(f, "[]"),
        }
    }
}

/// An ordered list of substitutions, applied left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SubstitutionVector {
    subs: Vec<Substitution>,
}

impl SubstitutionVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sub: Substitution) {
        if !sub.is_identity() {
            self.subs.push(sub);
        }
    }

    pub fn extend(&mut self, other: &SubstitutionVector) {
        self.subs.extend(other.subs.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Substitution> {
        self.subs.iter()
    }

    /// Apply every substitution to `rpl` in order.
    pub fn apply_to(&self, rpl: &mut Rpl) {
        for sub in &self.subs {
            sub.apply_to(rpl);
        }
    }
}

impl FromIterator<Substitution> for SubstitutionVector {
    fn from_iter<I: IntoIterator<Item = Substitution>>(iter: I) -> Self {
        let mut subs = SubstitutionVector::new();
        for sub in iter {
            subs.push(sub);
        }
        subs
    }
}

impl fmt::Display for SubstitutionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sub in &self.subs {
            write!(f, "{}", sub)?;
        }
        Ok(())
    }
}

// ============================================================================
// Substitutable impls for the region vocabulary
// ============================================================================

impl Substitutable for Rpl {
    fn substitute(&mut self, sub: &Substitution) {
        sub.apply_to(self);
    }
}

impl Substitutable for RplVector {
    fn substitute(&mut self, sub: &Substitution) {
        sub.apply_to_vector(self);
    }
}

/// Rewrites the target side, leaving the bound parameter alone. Used when an
/// invocation's bindings are carried into a caller's context.
impl Substitutable for Substitution {
    fn substitute(&mut self, sub: &Substitution) {
        if let Some((_, to)) = &mut self.binding {
            sub.apply_to(to);
        }
    }
}

impl Substitutable for SubstitutionVector {
    fn substitute(&mut self, sub: &Substitution) {
        for inner in &mut self.subs {
            inner.substitute(sub);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headed(param: &str, rest: &[&str]) -> Rpl {
        std::iter::once(RplElement::parameter(param))
            .chain(rest.iter().map(|n| RplElement::named(*n)))
            .collect()
    }

    #[test]
    fn test_identity_is_a_no_op() {
        let mut rpl = headed("P", &["A"]);
        assert!(!Substitution::default().apply_to(&mut rpl));
        assert_eq!(rpl, headed("P", &["A"]));
    }

    #[test]
    fn test_substitution_splices_at_head() {
        let mut rpl = headed("P", &["Money"]);
        Substitution::parameter("P", Rpl::local()).apply_to(&mut rpl);
        assert_eq!(rpl.to_string(), "Local:Money");
    }

    #[test]
    fn test_vector_applies_in_sequence() {
        let r = Rpl::single(RplElement::named("R"));
        let subs: SubstitutionVector = [
            Substitution::parameter("P1", headed("P2", &[])),
            Substitution::parameter("P2", r.clone()),
        ]
        .into_iter()
        .collect();

        let mut rpl = headed("P1", &["X"]);
        subs.apply_to(&mut rpl);
        assert_eq!(rpl.to_string(), "R:X");
    }

    #[test]
    fn test_swap_is_sequential_not_simultaneous() {
        // A simultaneous swap would leave B at the head.
        let subs: SubstitutionVector = [
            Substitution::parameter("A", headed("B", &[])),
            Substitution::parameter("B", headed("A", &[])),
        ]
        .into_iter()
        .collect();

        let mut rpl = headed("A", &["X"]);
        rpl.substitute_all(&subs);
        assert_eq!(rpl, headed("A", &["X"]));
    }

    #[test]
    fn test_substituting_a_substitution_rewrites_its_target() {
        let mut inner = Substitution::parameter("P", headed("Q", &["A"]));
        inner.substitute(&Substitution::parameter("Q", Rpl::local()));
        assert_eq!(inner.to_string(), "[P<-Local:A]");
        assert_eq!(inner.from(), Some(&RplElement::parameter("P")));
    }

    #[test]
    #[should_panic(expected = "rewrite region parameters")]
    fn test_only_parameters_can_be_rewritten() {
        Substitution::new(RplElement::named("A"), Rpl::local());
    }
}
