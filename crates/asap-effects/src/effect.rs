//! Single effects and the effect-kind lattice.

use crate::trivalent::Trivalent;
use asap_rpl::{Rpl, Substitutable, Substitution, SubstitutionVector};
use smol_str::SmolStr;
use std::fmt;

// ============================================================================
// Effect Kinds
// ============================================================================

/// What an effect does to its region.
///
/// Ordered by strength within each family: `Reads ⊑ Writes`,
/// `AtomicReads ⊑ AtomicWrites`. An atomic kind is also a sub-kind of its
/// plain counterpart, never the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    NoEffect,
    Reads,
    AtomicReads,
    Writes,
    AtomicWrites,
    /// A deferred "this calls f under these bindings" effect.
    Invocation,
}

impl EffectKind {
    pub fn is_atomic(self) -> bool {
        matches!(self, EffectKind::AtomicReads | EffectKind::AtomicWrites)
    }

    pub fn is_write_class(self) -> bool {
        matches!(self, EffectKind::Writes | EffectKind::AtomicWrites)
    }

    pub fn is_read_class(self) -> bool {
        matches!(self, EffectKind::Reads | EffectKind::AtomicReads)
    }

    /// Kinds that carry a region.
    pub fn is_memory(self) -> bool {
        self.is_read_class() || self.is_write_class()
    }

    /// Whether an effect of kind `self` can be covered by one of kind `that`.
    ///
    /// Pure effects are covered by anything. Otherwise `that` must be at
    /// least as strong (a write covers a read) and, if `that` is atomic,
    /// `self` must be atomic too: an atomic effect is covered by either
    /// flavour, a plain one only by a plain one.
    pub fn is_sub_kind_of(self, that: EffectKind) -> bool {
        match (self, that) {
            (EffectKind::NoEffect, _) => true,
            (_, EffectKind::NoEffect) => false,
            (EffectKind::Invocation, EffectKind::Invocation) => true,
            (EffectKind::Invocation, _) | (_, EffectKind::Invocation) => false,
            _ => {
                let strong_enough = !self.is_write_class() || that.is_write_class();
                let comparable = !that.is_atomic() || self.is_atomic();
                strong_enough && comparable
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::NoEffect => "pure",
            EffectKind::Reads => "reads",
            EffectKind::AtomicReads => "atomic_reads",
            EffectKind::Writes => "writes",
            EffectKind::AtomicWrites => "atomic_writes",
            EffectKind::Invocation => "invokes",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EffectKind::NoEffect => "pure",
            EffectKind::Reads => "reads",
            EffectKind::AtomicReads => "atomic reads",
            EffectKind::Writes => "writes",
            EffectKind::AtomicWrites => "atomic writes",
            EffectKind::Invocation => "invokes",
        };
        write!(f, "{}", text)
    }
}

// ============================================================================
// Effects
// ============================================================================

/// The callee and bindings of an invocation effect.
///
/// Expanding it into the callee's own summary is left to the caller; the
/// effect only remembers what to expand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Invocation {
    pub function: SmolStr,
    pub substitutions: SubstitutionVector,
}

/// One thing a piece of code may do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Effect {
    Pure,
    Reads(Rpl),
    AtomicReads(Rpl),
    Writes(Rpl),
    AtomicWrites(Rpl),
    Invokes(Invocation),
}

impl Effect {
    /// Build a memory or pure effect from a kind and an optional region, as
    /// the annotation layer hands them over.
    ///
    /// # Panics
    ///
    /// Panics if a memory kind comes without a region, if `NoEffect` comes
    /// with one, or if `kind` is `Invocation` (use [`Effect::invokes`]).
    pub fn new(kind: EffectKind, rpl: Option<Rpl>) -> Self {
        match (kind, rpl) {
            (EffectKind::NoEffect, None) => Effect::Pure,
            (EffectKind::NoEffect, Some(rpl)) => {
                panic!("pure effect constructed with region `{}`", rpl)
            }
            (EffectKind::Invocation, _) => {
                panic!("invocation effects are built with `Effect::invokes`")
            }
            (kind, None) => panic!("`{}` effect constructed without a region", kind),
            (EffectKind::Reads, Some(rpl)) => Effect::Reads(rpl),
            (EffectKind::AtomicReads, Some(rpl)) => Effect::AtomicReads(rpl),
            (EffectKind::Writes, Some(rpl)) => Effect::Writes(rpl),
            (EffectKind::AtomicWrites, Some(rpl)) => Effect::AtomicWrites(rpl),
        }
    }

    pub fn invokes(function: impl Into<SmolStr>, substitutions: SubstitutionVector) -> Self {
        Effect::Invokes(Invocation {
            function: function.into(),
            substitutions,
        })
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Pure => EffectKind::NoEffect,
            Effect::Reads(_) => EffectKind::Reads,
            Effect::AtomicReads(_) => EffectKind::AtomicReads,
            Effect::Writes(_) => EffectKind::Writes,
            Effect::AtomicWrites(_) => EffectKind::AtomicWrites,
            Effect::Invokes(_) => EffectKind::Invocation,
        }
    }

    pub fn rpl(&self) -> Option<&Rpl> {
        match self {
            Effect::Reads(rpl)
            | Effect::AtomicReads(rpl)
            | Effect::Writes(rpl)
            | Effect::AtomicWrites(rpl) => Some(rpl),
            Effect::Pure | Effect::Invokes(_) => None,
        }
    }

    fn rpl_mut(&mut self) -> Option<&mut Rpl> {
        match self {
            Effect::Reads(rpl)
            | Effect::AtomicReads(rpl)
            | Effect::Writes(rpl)
            | Effect::AtomicWrites(rpl) => Some(rpl),
            Effect::Pure | Effect::Invokes(_) => None,
        }
    }

    pub fn invocation(&self) -> Option<&Invocation> {
        match self {
            Effect::Invokes(invocation) => Some(invocation),
            _ => None,
        }
    }

    pub fn is_pure(&self) -> bool {
        matches!(self, Effect::Pure)
    }

    pub fn is_atomic(&self) -> bool {
        self.kind().is_atomic()
    }

    pub fn is_write_class(&self) -> bool {
        self.kind().is_write_class()
    }

    pub fn is_sub_kind_of(&self, that: &Effect) -> bool {
        self.kind().is_sub_kind_of(that.kind())
    }

    /// `self` is covered by `that`: a weaker-or-equal kind on an included
    /// region. Pure effects are covered by anything; an invocation is only
    /// covered by the identical invocation.
    pub fn is_sub_effect_of(&self, that: &Effect) -> bool {
        if self.is_pure() {
            return true;
        }
        match (self, that) {
            (Effect::Invokes(lhs), Effect::Invokes(rhs)) => lhs == rhs,
            (Effect::Invokes(_), _) | (_, Effect::Invokes(_)) => false,
            _ => match (self.rpl(), that.rpl()) {
                (Some(lhs), Some(rhs)) => self.is_sub_kind_of(that) && lhs.is_included_in(rhs),
                _ => false,
            },
        }
    }

    /// Whether running `self` and `that` in parallel is race-free.
    ///
    /// Two reads never race, nor do two atomic effects. Otherwise the regions
    /// must be disjoint. Invocations are `Dunno` until expanded.
    pub fn is_non_interfering(&self, that: &Effect) -> Trivalent {
        if self.is_pure() || that.is_pure() {
            return Trivalent::True;
        }
        if self.invocation().is_some() || that.invocation().is_some() {
            return Trivalent::Dunno;
        }
        let (kind, other_kind) = (self.kind(), that.kind());
        if kind.is_read_class() && other_kind.is_read_class() {
            return Trivalent::True;
        }
        if kind.is_atomic() && other_kind.is_atomic() {
            return Trivalent::True;
        }
        match (self.rpl(), that.rpl()) {
            (Some(lhs), Some(rhs)) => Trivalent::from(lhs.is_disjoint(rhs)),
            _ => Trivalent::True,
        }
    }
}

impl Substitutable for Effect {
    fn substitute(&mut self, sub: &Substitution) {
        match self {
            Effect::Invokes(invocation) => invocation.substitutions.substitute(sub),
            _ => {
                if let Some(rpl) = self.rpl_mut() {
                    sub.apply_to(rpl);
                }
            }
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Pure => write!(f, "pure"),
            Effect::Invokes(invocation) => {
                write!(f, "invokes {}{}", invocation.function, invocation.substitutions)
            }
            _ => match self.rpl() {
                Some(rpl) => write!(f, "{} {}", self.kind(), rpl),
                None => write!(f, "{}", self.kind()),
            },
        }
    }
}
