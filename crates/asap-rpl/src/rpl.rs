//! Region path lists and their inclusion/nesting algebra.

use crate::element::{Capture, CaptureIds, RplElement, SpecialElement};
use std::borrow::Cow;
use std::fmt;

/// A region path list: an ordered path of region elements, outermost first.
///
/// The empty path is `Root`. A parameter or capture element, if present,
/// sits at index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rpl {
    elements: Vec<RplElement>,
}

impl Rpl {
    /// Build an RPL from its elements, outermost first.
    ///
    /// A leading `Root` is dropped since the empty path already denotes it.
    ///
    /// # Panics
    ///
    /// Panics if a parameter or capture appears anywhere but the head, or if
    /// `Root` appears anywhere but the head. Collaborators building RPLs from
    /// user annotations go through [`crate::RegionRegistry`], which reports
    /// these as errors instead.
    pub fn new(elements: Vec<RplElement>) -> Self {
        let mut elements = elements;
        if elements.first() == Some(&RplElement::root()) {
            elements.remove(0);
        }
        for (position, element) in elements.iter().enumerate() {
            assert!(
                *element != RplElement::root(),
                "`Root` can only start an RPL"
            );
            assert!(
                position == 0 || !element.is_head_only(),
                "region parameter or capture `{}` must be the head of an RPL",
                element
            );
        }
        Self { elements }
    }

    /// The empty path, denoting `Root`.
    pub fn root() -> Self {
        Self::default()
    }

    /// The single-element path `Local`.
    pub fn local() -> Self {
        Self {
            elements: vec![RplElement::local()],
        }
    }

    /// A single-element path.
    pub fn single(element: RplElement) -> Self {
        Self::new(vec![element])
    }

    pub fn elements(&self) -> &[RplElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True for `Root`.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn head(&self) -> Option<&RplElement> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&RplElement> {
        self.elements.last()
    }

    /// False if any element is a star or a capture.
    pub fn is_fully_specified(&self) -> bool {
        self.elements.iter().all(RplElement::is_fully_specified)
    }

    /// Append an element at the innermost end. Pushing `Root` onto the empty
    /// path leaves it empty.
    ///
    /// # Panics
    ///
    /// Panics if a head-only element or `Root` is pushed onto a non-empty path.
    pub fn push(&mut self, element: RplElement) {
        let is_root = element == RplElement::Special(SpecialElement::Root);
        if self.elements.is_empty() {
            if !is_root {
                self.elements.push(element);
            }
            return;
        }
        assert!(!is_root, "`Root` can only start an RPL");
        assert!(
            !element.is_head_only(),
            "region parameter or capture `{}` must be the head of an RPL",
            element
        );
        self.elements.push(element);
    }

    /// Append every element of `tail`, which must not start with a head-only
    /// element unless `self` is empty.
    pub fn append(&mut self, tail: &Rpl) {
        for element in &tail.elements {
            self.push(element.clone());
        }
    }

    // ========================================================================
    // Inclusion and nesting
    // ========================================================================

    /// `self ⊑ that`: every region `self` may denote is also denoted by `that`.
    pub fn is_included_in(&self, that: &Rpl) -> bool {
        let lhs = self.upper_bound();
        let rhs = that.upper_bound();
        included(lhs.elements(), rhs.elements())
    }

    /// `self` is nested somewhere under `that`. Everything is under `Root`.
    pub fn is_under(&self, that: &Rpl) -> bool {
        let lhs = self.upper_bound();
        let rhs = that.upper_bound();
        under(lhs.elements(), rhs.elements())
    }

    /// True when no region can be denoted by both paths.
    ///
    /// Distinct parameters may be bound to the same region, so they never
    /// prove disjointness; neither does anything past a star.
    pub fn is_disjoint(&self, that: &Rpl) -> bool {
        let lhs = self.upper_bound();
        let rhs = that.upper_bound();
        left_disjoint(lhs.elements(), rhs.elements())
            || right_disjoint(lhs.elements(), rhs.elements())
    }

    // ========================================================================
    // Rewriting
    // ========================================================================

    /// Replace the head element with the elements of `to` if it equals `from`.
    ///
    /// Only the head is inspected: parameters and captures cannot occur
    /// anywhere else. Returns whether anything changed.
    pub fn substitute(&mut self, from: &RplElement, to: &Rpl) -> bool {
        if self.elements.first() != Some(from) {
            return false;
        }
        if to.elements.len() == 1 && to.elements[0] == *from {
            return false;
        }
        let mut elements = Vec::with_capacity(to.elements.len() + self.elements.len() - 1);
        elements.extend(to.elements.iter().cloned());
        elements.extend(self.elements.drain(1..));
        self.elements = elements;
        true
    }

    /// An approximate least upper bound of two paths.
    ///
    /// Keeps the common prefix; if the paths diverge, a single `*` goes at the
    /// divergence point followed by the longest common suffix of what remains.
    /// Adjacent stars are collapsed into one.
    pub fn join(&self, that: &Rpl) -> Rpl {
        let a = &self.elements;
        let b = &that.elements;
        let prefix = a
            .iter()
            .zip(b.iter())
            .take_while(|(x, y)| x == y)
            .count();
        if prefix == a.len() && prefix == b.len() {
            return self.clone();
        }

        let rest_a = &a[prefix..];
        let rest_b = &b[prefix..];
        let suffix = rest_a
            .iter()
            .rev()
            .zip(rest_b.iter().rev())
            .take_while(|(x, y)| x == y)
            .count();

        let star = RplElement::Star;
        let mut elements: Vec<RplElement> = Vec::with_capacity(prefix + 1 + suffix);
        let pieces = a[..prefix]
            .iter()
            .chain(std::iter::once(&star))
            .chain(rest_a[rest_a.len() - suffix..].iter());
        for element in pieces {
            if element.is_star() && elements.last().is_some_and(RplElement::is_star) {
                continue;
            }
            elements.push(element.clone());
        }
        Rpl { elements }
    }

    /// Widen a partially specified path into a single fresh capture element
    /// bounded by it. Fully specified paths come back unchanged.
    pub fn capture(&self, ids: &mut CaptureIds) -> Rpl {
        if self.is_fully_specified() {
            return self.clone();
        }
        Rpl {
            elements: vec![RplElement::Capture(Capture::new(ids.fresh(), self.clone()))],
        }
    }

    /// Replace a capture head by its bound, recursively, keeping the rest of
    /// the path. Paths without a capture head are returned as they are.
    pub fn upper_bound(&self) -> Cow<'_, Rpl> {
        match self.elements.first() {
            Some(RplElement::Capture(capture)) => {
                let mut bound = capture.bound().upper_bound().into_owned();
                for element in &self.elements[1..] {
                    bound.elements.push(element.clone());
                }
                Cow::Owned(bound)
            }
            _ => Cow::Borrowed(self),
        }
    }
}

impl FromIterator<RplElement> for Rpl {
    fn from_iter<I: IntoIterator<Item = RplElement>>(iter: I) -> Self {
        Rpl::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Rpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "Root");
        }
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

// ============================================================================
// Slice algorithms
// ============================================================================

fn included(lhs: &[RplElement], rhs: &[RplElement]) -> bool {
    Inclusion::new(lhs, rhs).included(lhs.len(), rhs.len())
}

fn under(lhs: &[RplElement], rhs: &[RplElement]) -> bool {
    Inclusion::new(lhs, rhs).under(lhs.len(), rhs.len())
}

/// Inclusion and nesting over prefixes `lhs[..i]` and `rhs[..j]`.
///
/// Each star on the right restarts the nesting search on every shorter
/// prefix of the left, so answers are cached per prefix pair to keep the
/// search quadratic instead of growing with the number of stars.
struct Inclusion<'a> {
    lhs: &'a [RplElement],
    rhs: &'a [RplElement],
    memo: Vec<Option<bool>>,
}

impl<'a> Inclusion<'a> {
    fn new(lhs: &'a [RplElement], rhs: &'a [RplElement]) -> Self {
        Self {
            lhs,
            rhs,
            memo: vec![None; (lhs.len() + 1) * (rhs.len() + 1)],
        }
    }

    fn included(&mut self, i: usize, j: usize) -> bool {
        let slot = i * (self.rhs.len() + 1) + j;
        if let Some(known) = self.memo[slot] {
            return known;
        }
        let result = match (i, j) {
            (0, 0) => true,
            (_, 0) => false,
            _ if self.rhs[j - 1].is_star() => self.under(i, j - 1),
            (0, _) => false,
            _ => self.lhs[i - 1] == self.rhs[j - 1] && self.included(i - 1, j - 1),
        };
        self.memo[slot] = Some(result);
        result
    }

    /// Peel elements off the end of `lhs[..i]` until it is included in
    /// `rhs[..j]`. Everything is under `Root`.
    fn under(&mut self, i: usize, j: usize) -> bool {
        if j == 0 {
            return true;
        }
        (1..=i).rev().any(|k| self.included(k, j))
    }
}

fn left_disjoint(a: &[RplElement], b: &[RplElement]) -> bool {
    let mut i = 0;
    loop {
        match (a.get(i), b.get(i)) {
            (None, None) => return false,
            (Some(_), None) => return !may_be_empty(&a[i..]),
            (None, Some(_)) => return !may_be_empty(&b[i..]),
            (Some(x), Some(y)) => {
                if x.is_star() || y.is_star() {
                    return false;
                }
                if x == y {
                    i += 1;
                    continue;
                }
                return !(x.is_head_only() || y.is_head_only());
            }
        }
    }
}

fn right_disjoint(a: &[RplElement], b: &[RplElement]) -> bool {
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        if x.is_star() || y.is_star() || x.is_head_only() || y.is_head_only() {
            return false;
        }
        if x != y {
            return true;
        }
    }
    false
}

/// A path remainder that could stand for no elements at all: stars match the
/// empty path and a parameter may be bound to `Root`.
fn may_be_empty(rest: &[RplElement]) -> bool {
    rest.iter().all(|e| e.is_star() || e.is_head_only())
}
