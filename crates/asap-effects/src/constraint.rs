//! Constraints handed to the external solver when local reasoning runs out.

use crate::effect::Effect;
use crate::summary::{EffectSummary, SummaryId, SummaryTable};
use crate::term::{Term, ToTerm};
use crate::vector::{CoveredEffect, EffectVector};
use asap_rpl::Rpl;
use smol_str::SmolStr;
use std::fmt;

/// Identifier of a constraint, unique within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub SmolStr);

impl ConstraintId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        ConstraintId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Effect inclusion
// ============================================================================

/// "These effects must be included in that summary."
///
/// The left-hand side is owned. The right-hand side is observed through its
/// [`SummaryId`], since the summary belongs to the symbol table and keeps
/// changing during inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectInclusionConstraint {
    id: ConstraintId,
    lhs: EffectVector,
    rhs: SummaryId,
    function: SmolStr,
    statement: Option<SmolStr>,
}

impl EffectInclusionConstraint {
    pub fn new(
        id: ConstraintId,
        lhs: EffectVector,
        rhs: SummaryId,
        function: impl Into<SmolStr>,
        statement: Option<SmolStr>,
    ) -> Self {
        Self {
            id,
            lhs,
            rhs,
            function: function.into(),
            statement,
        }
    }

    pub fn id(&self) -> &ConstraintId {
        &self.id
    }

    pub fn lhs(&self) -> &EffectVector {
        &self.lhs
    }

    pub fn rhs(&self) -> SummaryId {
        self.rhs
    }

    /// The function whose body produced the effects.
    pub fn function(&self) -> &SmolStr {
        &self.function
    }

    /// The statement that triggered the constraint, for diagnostics.
    pub fn statement(&self) -> Option<&SmolStr> {
        self.statement.as_ref()
    }

    pub fn add_effect(&mut self, effect: Effect) {
        self.lhs.push(effect);
    }

    pub fn add_effects(&mut self, effects: &EffectVector) {
        self.lhs.extend_from(effects);
    }

    pub fn make_minimal(&mut self) -> Vec<CoveredEffect> {
        self.lhs.make_minimal()
    }

    /// `esi_constraint(Id, Function, [Effects...], Summary)`.
    ///
    /// # Panics
    ///
    /// Panics if the right-hand side is not in `summaries`.
    pub fn to_term(&self, summaries: &SummaryTable) -> Term {
        Term::compound(
            "esi_constraint",
            vec![
                Term::atom(self.id.as_str()),
                Term::string(self.function.as_str()),
                Term::list(self.lhs.iter().map(ToTerm::to_term).collect()),
                summaries[self.rhs].to_term(),
            ],
        )
    }
}

// ============================================================================
// Effect non-interference
// ============================================================================

/// "These two summaries must not interfere."
///
/// Both summaries are snapshots taken when the constraint is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectNIConstraint {
    id: ConstraintId,
    first: EffectSummary,
    second: EffectSummary,
}

impl EffectNIConstraint {
    pub fn new(id: ConstraintId, first: &EffectSummary, second: &EffectSummary) -> Self {
        Self {
            id,
            first: first.clone(),
            second: second.clone(),
        }
    }

    pub fn id(&self) -> &ConstraintId {
        &self.id
    }

    pub fn first(&self) -> &EffectSummary {
        &self.first
    }

    pub fn second(&self) -> &EffectSummary {
        &self.second
    }
}

impl ToTerm for EffectNIConstraint {
    fn to_term(&self) -> Term {
        Term::compound(
            "eni_constraint",
            vec![
                Term::atom(self.id.as_str()),
                self.first.to_term(),
                self.second.to_term(),
            ],
        )
    }
}

// ============================================================================
// RPL inclusion
// ============================================================================

/// "This RPL must be included in that one."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RplInclusionConstraint {
    id: ConstraintId,
    lhs: Rpl,
    rhs: Rpl,
}

impl RplInclusionConstraint {
    pub fn new(id: ConstraintId, lhs: Rpl, rhs: Rpl) -> Self {
        Self { id, lhs, rhs }
    }

    pub fn id(&self) -> &ConstraintId {
        &self.id
    }

    pub fn lhs(&self) -> &Rpl {
        &self.lhs
    }

    pub fn rhs(&self) -> &Rpl {
        &self.rhs
    }
}

impl ToTerm for RplInclusionConstraint {
    fn to_term(&self) -> Term {
        Term::compound(
            "rpl_constraint",
            vec![
                Term::atom(self.id.as_str()),
                self.lhs.to_term(),
                self.rhs.to_term(),
            ],
        )
    }
}

// ============================================================================
// Constraints
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    EffectInclusion(EffectInclusionConstraint),
    EffectNonInterference(EffectNIConstraint),
    RplInclusion(RplInclusionConstraint),
}

impl Constraint {
    pub fn id(&self) -> &ConstraintId {
        match self {
            Constraint::EffectInclusion(c) => c.id(),
            Constraint::EffectNonInterference(c) => c.id(),
            Constraint::RplInclusion(c) => c.id(),
        }
    }

    pub fn as_effect_inclusion(&self) -> Option<&EffectInclusionConstraint> {
        match self {
            Constraint::EffectInclusion(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_effect_inclusion_mut(&mut self) -> Option<&mut EffectInclusionConstraint> {
        match self {
            Constraint::EffectInclusion(c) => Some(c),
            _ => None,
        }
    }

    /// Serialize for the solver. Pure: nothing is written during export.
    pub fn to_term(&self, summaries: &SummaryTable) -> Term {
        match self {
            Constraint::EffectInclusion(c) => c.to_term(summaries),
            Constraint::EffectNonInterference(c) => c.to_term(),
            Constraint::RplInclusion(c) => c.to_term(),
        }
    }
}
