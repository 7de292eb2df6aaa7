//! ASaP Region-Annotated Types
//!
//! Pairs a host-language type with the region arguments ASaP attaches to it.
//!
//! For a scalar or reference, the `in` RPL names the region that physically
//! holds the value. For a pointer or aggregate, the argument vector holds one
//! RPL per region slot, outermost first: `int * * p` annotated
//! `[R1, R2, R3]` lives in `R1`, points into `R2`, whose pointee points into
//! `R3`. Dereferencing moves the front argument into the `in` position.

use asap_rpl::{Rpl, RplVector, Substitutable, Substitution};
use smol_str::SmolStr;
use std::fmt;

// ============================================================================
// Host Types
// ============================================================================

/// The slice of a host-language type ASaP needs to see: its name and its
/// levels of indirection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostType {
    /// A scalar, record or class type (`int`, `Account`).
    Named(SmolStr),
    Pointer(Box<HostType>),
    Reference(Box<HostType>),
}

impl HostType {
    pub fn named(name: impl Into<SmolStr>) -> Self {
        HostType::Named(name.into())
    }

    pub fn pointer_to(self) -> Self {
        HostType::Pointer(Box::new(self))
    }

    pub fn reference_to(self) -> Self {
        HostType::Reference(Box::new(self))
    }

    pub fn is_pointer_like(&self) -> bool {
        matches!(self, HostType::Pointer(_) | HostType::Reference(_))
    }

    pub fn pointee(&self) -> Option<&HostType> {
        match self {
            HostType::Pointer(inner) | HostType::Reference(inner) => Some(inner),
            HostType::Named(_) => None,
        }
    }

    /// Number of pointer/reference levels.
    pub fn depth(&self) -> usize {
        match self.pointee() {
            Some(inner) => 1 + inner.depth(),
            None => 0,
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostType::Named(name) => write!(f, "{}", name),
            HostType::Pointer(inner) => write!(f, "{} *", inner),
            HostType::Reference(inner) => write!(f, "{} &", inner),
        }
    }
}

// ============================================================================
// ASaP Types
// ============================================================================

/// A host type together with its region arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AsapType {
    host: HostType,
    args: RplVector,
    in_rpl: Option<Rpl>,
}

impl AsapType {
    pub fn new(host: HostType, args: RplVector, in_rpl: Option<Rpl>) -> Self {
        Self { host, args, in_rpl }
    }

    pub fn host(&self) -> &HostType {
        &self.host
    }

    pub fn args(&self) -> &RplVector {
        &self.args
    }

    pub fn in_rpl(&self) -> Option<&Rpl> {
        self.in_rpl.as_ref()
    }

    /// Strip `n` levels of indirection; each level consumes the front region
    /// argument, which becomes the new `in` RPL.
    ///
    /// # Panics
    ///
    /// Panics if the host type has fewer than `n` pointer levels, or if the
    /// region arguments run out before the pointer levels do.
    pub fn deref(&mut self, n: usize) {
        for _ in 0..n {
            let pointee = match self.host.pointee() {
                Some(pointee) => pointee.clone(),
                None => panic!("cannot dereference non-pointer type `{}`", self.host),
            };
            let in_rpl = match self.args.deref() {
                Some(rpl) => rpl,
                None => panic!(
                    "cannot dereference `{}` past its region arguments",
                    self.host
                ),
            };
            self.host = pointee;
            self.in_rpl = Some(in_rpl);
        }
    }

    /// The `in` RPL after `n` dereferences, leaving `self` untouched.
    pub fn in_rpl_at(&self, n: usize) -> Option<Rpl> {
        if n == 0 {
            return self.in_rpl.clone();
        }
        let mut args = self.args.clone();
        args.deref_n(n)
    }

    /// The type of `&e` where `e` has type `self`: the old `in` RPL becomes
    /// the front region argument.
    ///
    /// # Panics
    ///
    /// Panics if `self` has no `in` RPL.
    pub fn addr_of(&mut self) {
        let in_rpl = match self.in_rpl.take() {
            Some(rpl) => rpl,
            None => panic!("cannot take the address of `{}` without an `in` region", self.host),
        };
        self.args.push_front(in_rpl);
        self.host = self.host.clone().pointer_to();
    }

    /// A value of type `self` may be stored where `that` is expected: same
    /// host type and positionally included region arguments. The `in` RPL is
    /// where the value lives, not part of the value, so it is not compared.
    pub fn is_assignable_to(&self, that: &AsapType) -> bool {
        self.host == that.host && self.args.is_included_in(&that.args)
    }

    /// Merge two types of the same shape, e.g. the branches of `c ? a : b`.
    ///
    /// # Panics
    ///
    /// Panics if the host types differ.
    pub fn join(&mut self, that: &AsapType) {
        assert_eq!(self.host, that.host, "cannot join types of different shape");
        self.args.join(&that.args);
        self.in_rpl = match (self.in_rpl.take(), &that.in_rpl) {
            (Some(lhs), Some(rhs)) => Some(lhs.join(rhs)),
            (lhs, rhs) => lhs.or_else(|| rhs.clone()),
        };
    }
}

impl Substitutable for AsapType {
    fn substitute(&mut self, sub: &Substitution) {
        sub.apply_to_vector(&mut self.args);
        if let Some(rpl) = &mut self.in_rpl {
            sub.apply_to(rpl);
        }
    }
}

impl fmt::Display for AsapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.host)?;
        if !self.args.is_empty() {
            write!(f, " {}", self.args)?;
        }
        if let Some(in_rpl) = &self.in_rpl {
            write!(f, " in {}", in_rpl)?;
        }
        Ok(())
    }
}
