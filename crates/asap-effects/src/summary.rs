//! Effect summaries: what a declaration may do.

use crate::constraint::ConstraintId;
use crate::effect::Effect;
use crate::trivalent::Trivalent;
use crate::vector::{first_covered, CoveredEffect};
use asap_rpl::{Substitutable, Substitution};
use indexmap::IndexSet;
use smol_str::SmolStr;
use std::fmt;
use std::ops::Index;

// ============================================================================
// Concrete summaries
// ============================================================================

/// Exactly these effects, nothing more.
///
/// Kept in insertion order so reports and solver terms are deterministic.
/// Coverage is semantic, so structurally different but equivalent members
/// are allowed to coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConcreteEffectSummary {
    effects: IndexSet<Effect>,
}

impl ConcreteEffectSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect. Returns false if an identical one was already present.
    pub fn insert(&mut self, effect: Effect) -> bool {
        self.effects.insert(effect)
    }

    pub fn contains(&self, effect: &Effect) -> bool {
        self.effects.contains(effect)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> + Clone {
        self.effects.iter()
    }

    /// True if some member covers `effect`.
    ///
    /// An invocation nobody covers syntactically is `Dunno`: the callee's
    /// summary has to be expanded before it can be judged.
    pub fn covers(&self, effect: &Effect) -> Trivalent {
        if effect.is_pure() || self.effects.contains(effect) {
            return Trivalent::True;
        }
        if self.effects.iter().any(|member| effect.is_sub_effect_of(member)) {
            return Trivalent::True;
        }
        if effect.invocation().is_some() {
            Trivalent::Dunno
        } else {
            Trivalent::False
        }
    }

    pub fn is_non_interfering(&self, effect: &Effect) -> Trivalent {
        Trivalent::all(self.effects.iter().map(|member| member.is_non_interfering(effect)))
    }

    /// Remove every member covered by a different member, restarting the scan
    /// after each removal, and report what was removed and why.
    pub fn make_minimal(&mut self) -> Vec<CoveredEffect> {
        let mut removed = Vec::new();
        while let Some((i, j)) = first_covered(self.effects.iter()) {
            let covering = self.effects[j].clone();
            let Some(effect) = self.effects.shift_remove_index(i) else {
                break;
            };
            tracing::trace!(removed = %effect, covering = %covering, "summary is not minimal");
            removed.push(CoveredEffect {
                removed: effect,
                covering,
            });
        }
        removed
    }
}

impl FromIterator<Effect> for ConcreteEffectSummary {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ConcreteEffectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, effect) in self.effects.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", effect)?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Summary variables
// ============================================================================

/// A placeholder for a summary that is not known yet, resolved by the solver.
///
/// The inclusion constraint recording what it must cover lives in the
/// constraint store; the variable only keeps its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarEffectSummary {
    name: SmolStr,
    constraint: Option<ConstraintId>,
}

impl VarEffectSummary {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn constraint(&self) -> Option<&ConstraintId> {
        self.constraint.as_ref()
    }

    pub fn attach(&mut self, constraint: ConstraintId) {
        self.constraint = Some(constraint);
    }
}

// ============================================================================
// Effect summaries
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectSummary {
    Concrete(ConcreteEffectSummary),
    Var(VarEffectSummary),
}

impl EffectSummary {
    pub fn concrete(effects: impl IntoIterator<Item = Effect>) -> Self {
        EffectSummary::Concrete(effects.into_iter().collect())
    }

    pub fn var(name: impl Into<SmolStr>) -> Self {
        EffectSummary::Var(VarEffectSummary::new(name))
    }

    pub fn as_concrete(&self) -> Option<&ConcreteEffectSummary> {
        match self {
            EffectSummary::Concrete(summary) => Some(summary),
            EffectSummary::Var(_) => None,
        }
    }

    pub fn as_concrete_mut(&mut self) -> Option<&mut ConcreteEffectSummary> {
        match self {
            EffectSummary::Concrete(summary) => Some(summary),
            EffectSummary::Var(_) => None,
        }
    }

    pub fn as_var(&self) -> Option<&VarEffectSummary> {
        match self {
            EffectSummary::Var(var) => Some(var),
            EffectSummary::Concrete(_) => None,
        }
    }

    pub fn as_var_mut(&mut self) -> Option<&mut VarEffectSummary> {
        match self {
            EffectSummary::Var(var) => Some(var),
            EffectSummary::Concrete(_) => None,
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, EffectSummary::Var(_))
    }

    pub fn covers(&self, effect: &Effect) -> Trivalent {
        match self {
            EffectSummary::Concrete(summary) => summary.covers(effect),
            EffectSummary::Var(_) => Trivalent::Dunno,
        }
    }

    /// Every effect of `other` is covered by `self`.
    pub fn covers_summary(&self, other: &EffectSummary) -> Trivalent {
        match (self, other) {
            (EffectSummary::Concrete(this), EffectSummary::Concrete(other)) => {
                Trivalent::all(other.iter().map(|effect| this.covers(effect)))
            }
            _ => Trivalent::Dunno,
        }
    }

    pub fn is_non_interfering(&self, effect: &Effect) -> Trivalent {
        match self {
            EffectSummary::Concrete(summary) => summary.is_non_interfering(effect),
            EffectSummary::Var(_) => Trivalent::Dunno,
        }
    }

    /// Pairwise non-interference of every member of `self` with every member
    /// of `other`.
    pub fn is_non_interfering_summary(&self, other: &EffectSummary) -> Trivalent {
        match (self, other) {
            (EffectSummary::Concrete(this), EffectSummary::Concrete(other)) => {
                Trivalent::all(other.iter().map(|effect| this.is_non_interfering(effect)))
            }
            _ => Trivalent::Dunno,
        }
    }
}

impl Substitutable for EffectSummary {
    /// # Panics
    ///
    /// Panics on a summary variable: those are only ever rewritten by the
    /// solver.
    fn substitute(&mut self, sub: &Substitution) {
        match self {
            EffectSummary::Concrete(summary) => {
                let effects = std::mem::take(&mut summary.effects);
                summary.effects = effects
                    .into_iter()
                    .map(|mut effect| {
                        effect.substitute(sub);
                        effect
                    })
                    .collect();
            }
            EffectSummary::Var(var) => {
                panic!("substitution {} applied to summary variable `{}`", sub, var.name)
            }
        }
    }
}

impl fmt::Display for EffectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectSummary::Concrete(summary) => write!(f, "{}", summary),
            EffectSummary::Var(var) => write!(f, "?{}", var.name),
        }
    }
}

// ============================================================================
// Summary table
// ============================================================================

/// Handle to a summary owned by a [`SummaryTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SummaryId(pub u32);

/// Owner of every declaration's summary. Constraints refer to summaries by
/// [`SummaryId`] so they observe later updates instead of stale copies.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    summaries: Vec<EffectSummary>,
}

impl SummaryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, summary: EffectSummary) -> SummaryId {
        let id = SummaryId(self.summaries.len() as u32);
        self.summaries.push(summary);
        id
    }

    pub fn get(&self, id: SummaryId) -> Option<&EffectSummary> {
        self.summaries.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SummaryId) -> Option<&mut EffectSummary> {
        self.summaries.get_mut(id.0 as usize)
    }

    pub fn contains(&self, id: SummaryId) -> bool {
        (id.0 as usize) < self.summaries.len()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

impl Index<SummaryId> for SummaryTable {
    type Output = EffectSummary;

    fn index(&self, id: SummaryId) -> &EffectSummary {
        match self.get(id) {
            Some(summary) => summary,
            None => panic!("no effect summary with id {}", id.0),
        }
    }
}
