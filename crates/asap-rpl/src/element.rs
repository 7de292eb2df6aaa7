//! RPL elements: the atoms a region path list is made of.

use crate::rpl::Rpl;
use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The two fixed region names every program can mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialElement {
    /// Top of all nesting. An empty RPL denotes it.
    Root,
    /// The innermost, function-private region.
    Local,
}

impl SpecialElement {
    pub fn name(&self) -> &'static str {
        match self {
            SpecialElement::Root => "Root",
            SpecialElement::Local => "Local",
        }
    }
}

/// Identity of a capture element.
///
/// Two captures are the same element only if they came out of the same
/// call to [`Rpl::capture`]; bounds are never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptureId(pub u32);

/// Source of fresh [`CaptureId`]s, owned by whoever scopes the analysis.
///
/// Ids are only unique per source, so captures from different sources must
/// not be mixed in one comparison.
#[derive(Debug, Default)]
pub struct CaptureIds {
    next: u32,
}

impl CaptureIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> CaptureId {
        let id = CaptureId(self.next);
        self.next += 1;
        id
    }
}

/// An existential element standing for some RPL included in `bound`.
///
/// The bound is shared, immutable, and never rewritten after the capture is
/// created, so a capture can be copied into as many RPLs as needed without
/// the copies drifting apart.
#[derive(Debug, Clone)]
pub struct Capture {
    id: CaptureId,
    bound: Rc<Rpl>,
}

impl Capture {
    pub(crate) fn new(id: CaptureId, bound: Rpl) -> Self {
        Self {
            id,
            bound: Rc::new(bound),
        }
    }

    pub fn id(&self) -> CaptureId {
        self.id
    }

    /// The RPL this capture is bounded by.
    pub fn bound(&self) -> &Rpl {
        &self.bound
    }
}

impl PartialEq for Capture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Capture {}

impl Hash for Capture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One segment of a region path list.
///
/// Named and parameter elements compare by name; special elements and the
/// star are unit values, so every `Root`, `Local` or `*` is the same element.
/// Parameters and captures may only ever appear at the head of an RPL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RplElement {
    Special(SpecialElement),
    Star,
    Named(SmolStr),
    Parameter(SmolStr),
    Capture(Capture),
}

impl RplElement {
    pub fn root() -> Self {
        RplElement::Special(SpecialElement::Root)
    }

    pub fn local() -> Self {
        RplElement::Special(SpecialElement::Local)
    }

    pub fn star() -> Self {
        RplElement::Star
    }

    pub fn named(name: impl Into<SmolStr>) -> Self {
        RplElement::Named(name.into())
    }

    pub fn parameter(name: impl Into<SmolStr>) -> Self {
        RplElement::Parameter(name.into())
    }

    /// Elements that are only legal at position 0 of an RPL.
    pub fn is_head_only(&self) -> bool {
        matches!(self, RplElement::Parameter(_) | RplElement::Capture(_))
    }

    /// Star and capture elements leave an RPL partially specified.
    pub fn is_fully_specified(&self) -> bool {
        !matches!(self, RplElement::Star | RplElement::Capture(_))
    }

    pub fn is_star(&self) -> bool {
        matches!(self, RplElement::Star)
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, RplElement::Parameter(_))
    }

    pub fn as_capture(&self) -> Option<&Capture> {
        match self {
            RplElement::Capture(capture) => Some(capture),
            _ => None,
        }
    }

    /// The name this element is written with in annotations.
    pub fn name(&self) -> SmolStr {
        match self {
            RplElement::Special(special) => SmolStr::new_inline(special.name()),
            RplElement::Star => SmolStr::new_inline("*"),
            RplElement::Named(name) | RplElement::Parameter(name) => name.clone(),
            RplElement::Capture(capture) => SmolStr::new(format!("?{}", capture.id.0)),
        }
    }
}

impl fmt::Display for RplElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RplElement::Special(special) => write!(f, "{}", special.name()),
            RplElement::Star => write!(f, "*"),
            RplElement::Named(name) | RplElement::Parameter(name) => write!(f, "{}", name),
            RplElement::Capture(capture) => write!(f, "?({})", capture.bound),
        }
    }
}
