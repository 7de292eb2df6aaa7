//! ASaP Region Path Lists
//!
//! The region half of ASaP's region-and-effect system. A region path list
//! (RPL) names a nested memory region the way a qualified path names an item:
//! `Root:Bank:Money`, `P:Accounts:*`, `Local`.
//!
//! ## Vocabulary
//!
//! | Element | Written | Meaning |
//! |---------|---------|---------|
//! | Special | `Root`, `Local` | top of all nesting; the function-private region |
//! | Star | `*` | any (possibly empty) sequence of elements |
//! | Named | `Money` | a declared region name |
//! | Parameter | `P` | a region parameter, bound per instantiation; head only |
//! | Capture | `?(A:*)` | some region included in its bound; head only |
//!
//! ## Algebra
//!
//! - [`Rpl::is_included_in`]: `A:B ⊑ A:*`, compared from the innermost end
//! - [`Rpl::is_under`]: nesting, everything is under `Root`
//! - [`Rpl::substitute`] and [`SubstitutionVector`]: head-only parameter
//!   rewriting, applied strictly in sequence
//! - [`Rpl::join`]: approximate least upper bound for merging control flow
//! - [`Rpl::capture`] / [`Rpl::upper_bound`]: existential widening

mod element;
mod error;
mod registry;
mod rpl;
mod substitution;
mod vector;

pub use element::{Capture, CaptureId, CaptureIds, RplElement, SpecialElement};
pub use error::{RplError, RplResult};
pub use registry::{RegionRegistry, ScopeId};
pub use rpl::Rpl;
pub use substitution::{Substitutable, Substitution, SubstitutionVector};
pub use vector::RplVector;
