//! Ordered region-argument vectors.

use crate::element::RplElement;
use crate::rpl::Rpl;
use std::collections::VecDeque;
use std::fmt;

/// The region arguments of a type, one RPL per region-parameter slot.
///
/// Also used as a working stack while dereferencing: each level of pointer
/// indirection consumes the front slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RplVector {
    rpls: VecDeque<Rpl>,
}

impl RplVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(rpl: Rpl) -> Self {
        let mut rpls = VecDeque::with_capacity(1);
        rpls.push_back(rpl);
        Self { rpls }
    }

    pub fn len(&self) -> usize {
        self.rpls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rpls.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rpl> {
        self.rpls.get(index)
    }

    pub fn first(&self) -> Option<&Rpl> {
        self.rpls.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rpl> {
        self.rpls.iter()
    }

    pub fn push_back(&mut self, rpl: Rpl) {
        self.rpls.push_back(rpl);
    }

    pub fn push_front(&mut self, rpl: Rpl) {
        self.rpls.push_front(rpl);
    }

    /// Remove and return the front slot.
    pub fn deref(&mut self) -> Option<Rpl> {
        self.rpls.pop_front()
    }

    /// Remove the first `n` slots, returning the last one removed. Leaves the
    /// vector untouched and returns `None` when it holds fewer than `n`.
    pub fn deref_n(&mut self, n: usize) -> Option<Rpl> {
        if n == 0 || n > self.rpls.len() {
            return None;
        }
        self.rpls.drain(..n).last()
    }

    /// Positional inclusion. Vectors of different arity are never included.
    pub fn is_included_in(&self, that: &RplVector) -> bool {
        self.len() == that.len()
            && self
                .rpls
                .iter()
                .zip(that.rpls.iter())
                .all(|(lhs, rhs)| lhs.is_included_in(rhs))
    }

    /// True if some position holds disjoint RPLs.
    pub fn is_disjoint(&self, that: &RplVector) -> bool {
        self.rpls
            .iter()
            .zip(that.rpls.iter())
            .any(|(lhs, rhs)| lhs.is_disjoint(rhs))
    }

    /// Positional [`Rpl::join`], in place.
    ///
    /// # Panics
    ///
    /// Panics if the vectors differ in length.
    pub fn join(&mut self, that: &RplVector) -> &mut Self {
        assert_eq!(
            self.len(),
            that.len(),
            "cannot join region vectors of different arity"
        );
        for (lhs, rhs) in self.rpls.iter_mut().zip(that.rpls.iter()) {
            *lhs = lhs.join(rhs);
        }
        self
    }

    /// Apply `from <- to` to every slot.
    pub fn substitute(&mut self, from: &RplElement, to: &Rpl) {
        for rpl in self.rpls.iter_mut() {
            rpl.substitute(from, to);
        }
    }

    /// Concatenate two optional vectors, `a` first, leaving both inputs intact.
    pub fn merge(a: Option<&RplVector>, b: Option<&RplVector>) -> Option<RplVector> {
        Self::destructive_merge(a.cloned(), b.cloned())
    }

    /// Concatenate two optional vectors, `a` first, reusing the storage of the
    /// longer one.
    pub fn destructive_merge(a: Option<RplVector>, b: Option<RplVector>) -> Option<RplVector> {
        match (a, b) {
            (None, None) => None,
            (Some(v), None) | (None, Some(v)) => Some(v),
            (Some(mut a), Some(mut b)) => {
                if a.len() >= b.len() {
                    a.rpls.extend(b.rpls);
                    Some(a)
                } else {
                    while let Some(rpl) = a.rpls.pop_back() {
                        b.rpls.push_front(rpl);
                    }
                    Some(b)
                }
            }
        }
    }
}

impl FromIterator<Rpl> for RplVector {
    fn from_iter<I: IntoIterator<Item = Rpl>>(iter: I) -> Self {
        Self {
            rpls: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RplVector {
    type Item = Rpl;
    type IntoIter = std::collections::vec_deque::IntoIter<Rpl>;

    fn into_iter(self) -> Self::IntoIter {
        self.rpls.into_iter()
    }
}

impl fmt::Display for RplVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, rpl) in self.rpls.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", rpl)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(param: &str, names: &[&str]) -> Rpl {
        std::iter::once(RplElement::parameter(param))
            .chain(names.iter().map(|n| RplElement::named(*n)))
            .collect()
    }

    fn named(names: &[&str]) -> Rpl {
        names.iter().map(|n| RplElement::named(*n)).collect()
    }

    #[test]
    fn test_deref_consumes_front_slots() {
        let mut v: RplVector = [named(&["A"]), named(&["B"]), named(&["C"])]
            .into_iter()
            .collect();
        assert_eq!(v.deref(), Some(named(&["A"])));
        assert_eq!(v.len(), 2);

        let mut v: RplVector = [named(&["A"]), named(&["B"]), named(&["C"])]
            .into_iter()
            .collect();
        assert_eq!(v.deref_n(2), Some(named(&["B"])));
        assert_eq!(v.first(), Some(&named(&["C"])));
        assert_eq!(v.deref_n(5), None);
        assert_eq!(v.len(), 1);
        assert_eq!(v.first(), Some(&named(&["C"])));
    }

    #[test]
    fn test_inclusion_requires_matching_arity() {
        let short = RplVector::singleton(named(&["A"]));
        let long: RplVector = [named(&["A"]), named(&["B"])].into_iter().collect();
        assert!(!short.is_included_in(&long));
        assert!(long.is_included_in(&long));
    }

    #[test]
    fn test_parameter_heads_compare_by_name() {
        let mut lhs: RplVector = [path("P", &["R1"]), path("P", &["R2"])].into_iter().collect();
        let rhs: RplVector = [path("Q", &["R1"]), path("Q", &["R2"])].into_iter().collect();
        assert!(!lhs.is_included_in(&rhs));

        lhs.substitute(&RplElement::parameter("P"), &Rpl::single(RplElement::parameter("Q")));
        assert!(lhs.is_included_in(&rhs));
    }

    #[test]
    fn test_join_is_positional() {
        let mut lhs: RplVector = [named(&["A", "B"]), named(&["X"])].into_iter().collect();
        let rhs: RplVector = [named(&["A", "C"]), named(&["X"])].into_iter().collect();
        lhs.join(&rhs);
        assert_eq!(lhs.to_string(), "[A:*, X]");
    }

    #[test]
    #[should_panic(expected = "different arity")]
    fn test_join_rejects_mismatched_arity() {
        let mut lhs = RplVector::singleton(named(&["A"]));
        lhs.join(&RplVector::new());
    }

    #[test]
    fn test_merge_keeps_argument_order() {
        let base: RplVector = [named(&["B1"])].into_iter().collect();
        let derived: RplVector = [named(&["D1"]), named(&["D2"])].into_iter().collect();

        let merged = RplVector::merge(Some(&base), Some(&derived)).unwrap();
        assert_eq!(merged.to_string(), "[B1, D1, D2]");
        assert_eq!(base.len(), 1);

        let merged = RplVector::destructive_merge(Some(derived), Some(base)).unwrap();
        assert_eq!(merged.to_string(), "[D1, D2, B1]");

        assert_eq!(RplVector::merge(None, None), None);
        assert_eq!(
            RplVector::merge(None, Some(&RplVector::singleton(Rpl::local()))),
            Some(RplVector::singleton(Rpl::local()))
        );
    }
}
