//! The analysis session: symbol table of function summaries, region
//! registry and constraint store.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use asap_effects::{
    Constraint, ConstraintId, Effect, EffectInclusionConstraint, EffectNIConstraint, EffectSummary,
    EffectVector, RplInclusionConstraint, SummaryId, SummaryTable, Term, ToTerm, Trivalent,
};
use asap_rpl::{CaptureIds, RegionRegistry, Rpl, Substitutable, SubstitutionVector};
use asap_types::AsapType;
use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

/// Outcome of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Holds,
    Violated,
    /// Local reasoning was not enough; the named constraint now carries the
    /// question to the solver.
    Deferred(ConstraintId),
}

impl Verdict {
    pub fn holds(&self) -> bool {
        matches!(self, Verdict::Holds)
    }

    pub fn is_violated(&self) -> bool {
        matches!(self, Verdict::Violated)
    }

    pub fn constraint(&self) -> Option<&ConstraintId> {
        match self {
            Verdict::Deferred(id) => Some(id),
            _ => None,
        }
    }
}

/// Result of checking a statement's effects against its function's summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pub verdict: Verdict,
    /// Effects the summary definitely does not cover.
    pub uncovered: Vec<Effect>,
}

/// An effect in a declared summary that another member of the same summary
/// already covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimalityViolation {
    pub function: SmolStr,
    pub removed: Effect,
    pub covering: Effect,
}

pub struct Session {
    config: SessionConfig,
    regions: RegionRegistry,
    captures: CaptureIds,
    summaries: SummaryTable,
    functions: IndexMap<SmolStr, SummaryId>,
    constraints: IndexMap<ConstraintId, Constraint>,
    next_constraint: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            regions: RegionRegistry::new(),
            captures: CaptureIds::new(),
            summaries: SummaryTable::new(),
            functions: IndexMap::new(),
            constraints: IndexMap::new(),
            next_constraint: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn regions(&self) -> &RegionRegistry {
        &self.regions
    }

    pub fn regions_mut(&mut self) -> &mut RegionRegistry {
        &mut self.regions
    }

    /// Build an RPL from a path of names declared in the global scope.
    pub fn rpl(&self, path: &[&str]) -> SessionResult<Rpl> {
        Ok(self.regions.build_rpl(self.regions.global(), path)?)
    }

    /// Widen `rpl` into a fresh capture unique within this session.
    pub fn capture(&mut self, rpl: &Rpl) -> Rpl {
        rpl.capture(&mut self.captures)
    }

    pub fn summaries(&self) -> &SummaryTable {
        &self.summaries
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// Register a function with its declared summary. Without one, inference
    /// gives it a summary variable named `<function>_sig`.
    pub fn declare_function(
        &mut self,
        name: &str,
        summary: Option<EffectSummary>,
    ) -> SessionResult<SummaryId> {
        if self.functions.contains_key(name) {
            return Err(SessionError::DuplicateFunction { name: name.into() });
        }
        let summary = match summary {
            Some(summary) => summary,
            None if self.config.effect_inference => EffectSummary::var(format!("{}_sig", name)),
            None => return Err(SessionError::MissingSummary { name: name.into() }),
        };
        debug!(function = name, summary = %summary, "declared function");
        let id = self.summaries.insert(summary);
        self.functions.insert(name.into(), id);
        Ok(id)
    }

    pub fn summary_id(&self, function: &str) -> SessionResult<SummaryId> {
        self.functions
            .get(function)
            .copied()
            .ok_or_else(|| SessionError::UnknownFunction {
                name: function.into(),
            })
    }

    pub fn summary(&self, function: &str) -> SessionResult<&EffectSummary> {
        let id = self.summary_id(function)?;
        self.summaries
            .get(id)
            .ok_or(SessionError::UnknownSummary { id })
    }

    pub fn functions(&self) -> impl Iterator<Item = (&SmolStr, &EffectSummary)> {
        self.functions
            .iter()
            .filter_map(|(name, id)| Some((name, self.summaries.get(*id)?)))
    }

    /// Effects of calling `callee` with `substitutions`: the callee's
    /// summary with its parameters rewritten, or a single invocation effect
    /// when the summary is still a variable.
    pub fn call_effects(
        &self,
        callee: &str,
        substitutions: &SubstitutionVector,
    ) -> SessionResult<EffectVector> {
        let summary = self.summary(callee)?;
        if summary.is_var() {
            return Ok([Effect::invokes(callee, substitutions.clone())]
                .into_iter()
                .collect());
        }
        let mut summary = summary.clone();
        summary.substitute_all(substitutions);
        Ok(summary
            .as_concrete()
            .map(|concrete| concrete.iter().cloned().collect())
            .unwrap_or_default())
    }

    // ========================================================================
    // Checks
    // ========================================================================

    /// Check that the effects of a statement in `function` are covered by its
    /// summary. Effects that cannot be judged locally are added to the
    /// function's inclusion constraint.
    #[tracing::instrument(level = "debug", skip(self, effects), fields(effects = %effects))]
    pub fn check_covered(
        &mut self,
        function: &str,
        effects: &EffectVector,
        statement: Option<&str>,
    ) -> SessionResult<Coverage> {
        let id = self.summary_id(function)?;
        let summary = self
            .summaries
            .get(id)
            .ok_or(SessionError::UnknownSummary { id })?;

        let mut uncovered = Vec::new();
        let mut unknown = EffectVector::new();
        for effect in effects.iter() {
            match summary.covers(effect) {
                Trivalent::True => {}
                Trivalent::False => uncovered.push(effect.clone()),
                Trivalent::Dunno => unknown.push(effect.clone()),
            }
        }

        let verdict = if !uncovered.is_empty() {
            debug!(uncovered = uncovered.len(), "effects not covered by summary");
            Verdict::Violated
        } else if unknown.is_empty() {
            Verdict::Holds
        } else {
            Verdict::Deferred(self.include_effects(id, function, unknown, statement))
        };
        Ok(Coverage { verdict, uncovered })
    }

    fn include_effects(
        &mut self,
        rhs: SummaryId,
        function: &str,
        effects: EffectVector,
        statement: Option<&str>,
    ) -> ConstraintId {
        let attached = self
            .summaries
            .get(rhs)
            .and_then(|summary| summary.as_var())
            .and_then(|var| var.constraint())
            .cloned();
        if let Some(id) = attached {
            if let Some(constraint) = self
                .constraints
                .get_mut(&id)
                .and_then(|constraint| constraint.as_effect_inclusion_mut())
            {
                trace!(constraint = %id, effects = %effects, "extending inclusion constraint");
                constraint.add_effects(&effects);
                return id;
            }
        }

        let id = self.fresh_constraint_id();
        let constraint = EffectInclusionConstraint::new(
            id.clone(),
            effects,
            rhs,
            function,
            statement.map(SmolStr::from),
        );
        if let Some(var) = self
            .summaries
            .get_mut(rhs)
            .and_then(|summary| summary.as_var_mut())
        {
            var.attach(id.clone());
        }
        self.register(Constraint::EffectInclusion(constraint));
        id
    }

    /// Check that two summaries do not interfere. An unknown answer is
    /// recorded as a non-interference constraint over snapshots of both.
    pub fn check_non_interference(
        &mut self,
        first: &EffectSummary,
        second: &EffectSummary,
    ) -> Verdict {
        match first.is_non_interfering_summary(second) {
            Trivalent::True => Verdict::Holds,
            Trivalent::False => {
                debug!(first = %first, second = %second, "summaries interfere");
                Verdict::Violated
            }
            Trivalent::Dunno => {
                let id = self.fresh_constraint_id();
                self.register(Constraint::EffectNonInterference(EffectNIConstraint::new(
                    id.clone(),
                    first,
                    second,
                )));
                Verdict::Deferred(id)
            }
        }
    }

    /// Non-interference of two declared functions, e.g. the branches of a
    /// parallel invocation.
    pub fn check_functions_non_interfering(
        &mut self,
        first: &str,
        second: &str,
    ) -> SessionResult<Verdict> {
        let first = self.summary(first)?.clone();
        let second = self.summary(second)?.clone();
        Ok(self.check_non_interference(&first, &second))
    }

    /// Check `lhs ⊆ rhs`. Under inference a failed check becomes an RPL
    /// inclusion constraint.
    pub fn check_rpl_inclusion(&mut self, lhs: &Rpl, rhs: &Rpl) -> Verdict {
        if lhs.is_included_in(rhs) {
            return Verdict::Holds;
        }
        if !self.config.effect_inference {
            debug!(lhs = %lhs, rhs = %rhs, "rpl not included");
            return Verdict::Violated;
        }
        let id = self.fresh_constraint_id();
        self.register(Constraint::RplInclusion(RplInclusionConstraint::new(
            id.clone(),
            lhs.clone(),
            rhs.clone(),
        )));
        Verdict::Deferred(id)
    }

    /// Check that `value` may be stored into a location of type `target`,
    /// one RPL inclusion per region argument.
    pub fn check_assignment(&mut self, value: &AsapType, target: &AsapType) -> Verdict {
        if value.is_assignable_to(target) {
            return Verdict::Holds;
        }
        if value.host() != target.host() || value.args().len() != target.args().len() {
            debug!(value = %value, target = %target, "incompatible types");
            return Verdict::Violated;
        }
        let mut result = Verdict::Holds;
        for (lhs, rhs) in value.args().iter().zip(target.args().iter()) {
            match self.check_rpl_inclusion(lhs, rhs) {
                Verdict::Holds => {}
                Verdict::Violated => return Verdict::Violated,
                deferred @ Verdict::Deferred(_) => {
                    if result.holds() {
                        result = deferred;
                    }
                }
            }
        }
        result
    }

    /// Reduce a concrete summary to a minimal one, reporting each member that
    /// another member covered. Summary variables are left alone.
    pub fn check_minimal(&mut self, function: &str) -> SessionResult<Vec<MinimalityViolation>> {
        let id = self.summary_id(function)?;
        let Some(summary) = self
            .summaries
            .get_mut(id)
            .and_then(|summary| summary.as_concrete_mut())
        else {
            return Ok(Vec::new());
        };
        let removed = summary.make_minimal();
        if !self.config.report_non_minimal {
            return Ok(Vec::new());
        }
        Ok(removed
            .into_iter()
            .map(|covered| MinimalityViolation {
                function: function.into(),
                removed: covered.removed,
                covering: covered.covering,
            })
            .collect())
    }

    // ========================================================================
    // Constraints
    // ========================================================================

    fn fresh_constraint_id(&mut self) -> ConstraintId {
        let id = ConstraintId::new(format!("{}{}", self.config.constraint_prefix, self.next_constraint));
        self.next_constraint += 1;
        id
    }

    fn register(&mut self, constraint: Constraint) {
        debug!(constraint = %constraint.id(), "registered constraint");
        self.constraints.insert(constraint.id().clone(), constraint);
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    pub fn constraint(&self, id: &ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id)
    }

    /// Solver terms for every constraint, in registration order.
    ///
    /// Inclusion constraints are minimised on a copy when
    /// `simplify_constraints` is set; the store itself is left untouched.
    pub fn export_terms(&self) -> Vec<Term> {
        let terms: Vec<Term> = self
            .constraints
            .values()
            .map(|constraint| match constraint {
                Constraint::EffectInclusion(inclusion) if self.config.simplify_constraints => {
                    let mut inclusion = inclusion.clone();
                    inclusion.make_minimal();
                    inclusion.to_term(&self.summaries)
                }
                other => other.to_term(&self.summaries),
            })
            .collect();
        debug!(constraints = terms.len(), "exported constraints");
        terms
    }

    /// The exported terms as solver facts, one per line.
    pub fn export_program(&self) -> String {
        self.export_terms()
            .iter()
            .map(|term| format!("{}.\n", term))
            .collect()
    }
}

impl ToTerm for MinimalityViolation {
    fn to_term(&self) -> Term {
        Term::compound(
            "non_minimal",
            vec![
                Term::string(self.function.clone()),
                self.removed.to_term(),
                self.covering.to_term(),
            ],
        )
    }
}
