//! ASaP Effects and Constraints
//!
//! The effect half of ASaP's region-and-effect system. Every declaration gets
//! an effect summary; a statement's effects must be covered by the summary of
//! the function it sits in, and two computations dispatched in parallel must
//! have non-interfering summaries.
//!
//! ## Effect kinds
//!
//! ```text
//!            writes
//!           /      \
//!       reads    atomic writes
//!           \      /
//!        atomic reads
//!              |
//!            pure
//! ```
//!
//! An atomic effect is covered by the plain effect of the same or greater
//! strength, but a plain effect is never covered by an atomic one.
//!
//! ## Summaries
//!
//! - [`ConcreteEffectSummary`]: exactly these effects; coverage and
//!   non-interference are decided locally
//! - [`VarEffectSummary`]: a placeholder resolved by the solver; every
//!   question about it answers [`Trivalent::Dunno`]
//!
//! When an answer is `Dunno`, the caller records a [`Constraint`] and exports
//! it as a solver [`Term`].

mod constraint;
mod effect;
mod summary;
mod term;
mod trivalent;
mod vector;

pub use constraint::{
    Constraint, ConstraintId, EffectInclusionConstraint, EffectNIConstraint,
    RplInclusionConstraint,
};
pub use effect::{Effect, EffectKind, Invocation};
pub use summary::{
    ConcreteEffectSummary, EffectSummary, SummaryId, SummaryTable, VarEffectSummary,
};
pub use term::{Term, ToTerm};
pub use trivalent::Trivalent;
pub use vector::{CoveredEffect, EffectVector};
