//! Scoped registry of declared region names and region parameters.
//!
//! The registry holds the canonical element for every declared name. RPLs
//! built through it carry copies of those elements, which are plain names and
//! compare by name, so any number of RPLs can mention the same declaration.

use crate::element::{RplElement, SpecialElement};
use crate::error::{RplError, RplResult};
use crate::rpl::Rpl;
use crate::vector::RplVector;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// Handle to a declaration scope inside a [`RegionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    elements: FxHashMap<SmolStr, RplElement>,
    /// Parameters in declaration order, for arity checks.
    parameters: Vec<RplElement>,
}

impl Scope {
    fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            elements: FxHashMap::default(),
            parameters: Vec::new(),
        }
    }
}

/// Declared region vocabulary, organised as a tree of scopes.
#[derive(Debug)]
pub struct RegionRegistry {
    scopes: Vec<Scope>,
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionRegistry {
    /// Create a registry with an empty global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(None)],
        }
    }

    /// The outermost (translation-unit) scope.
    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Open a scope nested in `parent`, e.g. for a class or function.
    pub fn new_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(Some(parent)));
        id
    }

    pub fn declare_region(&mut self, scope: ScopeId, name: &str) -> RplResult<()> {
        self.declare(scope, RplElement::named(name))
    }

    pub fn declare_parameter(&mut self, scope: ScopeId, name: &str) -> RplResult<()> {
        self.declare(scope, RplElement::parameter(name))
    }

    fn declare(&mut self, scope: ScopeId, element: RplElement) -> RplResult<()> {
        let name = element.name();
        if Self::special(&name).is_some() {
            return Err(RplError::Reserved { name });
        }
        let scope = &mut self.scopes[scope.0 as usize];
        if scope.elements.contains_key(&name) {
            return Err(RplError::Duplicate { name });
        }
        if element.is_parameter() {
            scope.parameters.push(element.clone());
        }
        scope.elements.insert(name, element);
        Ok(())
    }

    /// Resolve a name in `scope` or any enclosing scope.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&RplElement> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0 as usize];
            if let Some(element) = scope.elements.get(name) {
                return Some(element);
            }
            current = scope.parent;
        }
        None
    }

    /// Region parameters declared directly in `scope`, in order.
    pub fn parameters(&self, scope: ScopeId) -> &[RplElement] {
        &self.scopes[scope.0 as usize].parameters
    }

    fn special(name: &str) -> Option<RplElement> {
        match name {
            "Root" => Some(RplElement::Special(SpecialElement::Root)),
            "Local" => Some(RplElement::Special(SpecialElement::Local)),
            "*" => Some(RplElement::Star),
            _ => None,
        }
    }

    /// Build an RPL from path segments, outermost first.
    pub fn build_rpl(&self, scope: ScopeId, path: &[&str]) -> RplResult<Rpl> {
        if path.is_empty() {
            return Err(RplError::EmptyPath);
        }
        let mut elements = Vec::with_capacity(path.len());
        for (position, token) in path.iter().enumerate() {
            let element = match Self::special(token) {
                Some(element) => element,
                None => self
                    .lookup(scope, token)
                    .cloned()
                    .ok_or_else(|| RplError::Undeclared {
                        name: SmolStr::new(token),
                    })?,
            };
            if position > 0 {
                if element.is_parameter() {
                    return Err(RplError::MisplacedParameter {
                        name: element.name(),
                        position,
                    });
                }
                if matches!(element, RplElement::Special(_)) {
                    return Err(RplError::MisplacedSpecial {
                        name: element.name(),
                        position,
                    });
                }
            }
            elements.push(element);
        }
        Ok(Rpl::new(elements))
    }

    /// Build a region-argument vector, checking it against the expected arity.
    pub fn build_rpl_vector(
        &self,
        scope: ScopeId,
        paths: &[&[&str]],
        arity: usize,
    ) -> RplResult<RplVector> {
        if paths.len() != arity {
            return Err(RplError::WrongArity {
                expected: arity,
                found: paths.len(),
            });
        }
        paths
            .iter()
            .map(|path| self.build_rpl(scope, path))
            .collect()
    }
}
