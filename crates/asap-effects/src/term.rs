//! Solver terms.
//!
//! The solver consumes Prolog-style terms. Everything here is built fresh from
//! immutable data, so exporting the same constraint twice yields the same term.
//!
//! | Value | Term |
//! |-------|------|
//! | RPL | `['P', 'Money']`, `[]` for `Root`, `'*'` for a star; captures through their upper bound |
//! | Effect | `pure`, `reads(Rpl)`, `atomic_writes(Rpl)`, `invokes("f", [subst('P', Rpl)])` |
//! | Summary | `effect_summary([Effect...])`, `var(Name)` |

use crate::effect::Effect;
use crate::summary::EffectSummary;
use asap_rpl::{Rpl, Substitution};
use smol_str::SmolStr;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Atom(SmolStr),
    Str(SmolStr),
    List(Vec<Term>),
    Compound { functor: SmolStr, args: Vec<Term> },
}

impl Term {
    pub fn atom(name: impl Into<SmolStr>) -> Self {
        Term::Atom(name.into())
    }

    pub fn string(text: impl Into<SmolStr>) -> Self {
        Term::Str(text.into())
    }

    pub fn list(items: Vec<Term>) -> Self {
        Term::List(items)
    }

    pub fn compound(functor: impl Into<SmolStr>, args: Vec<Term>) -> Self {
        Term::Compound {
            functor: functor.into(),
            args,
        }
    }
}

/// Atoms that can be written without quotes: a lowercase letter followed by
/// letters, digits and underscores.
fn is_plain_atom(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    write!(f, "{}", quote)?;
    for c in text.chars() {
        if c == quote || c == '\\' {
            write!(f, "\\")?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, "{}", quote)
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Term]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) if is_plain_atom(name) => write!(f, "{}", name),
            Term::Atom(name) => write_quoted(f, name, '\''),
            Term::Str(text) => write_quoted(f, text, '"'),
            Term::List(items) => {
                write!(f, "[")?;
                write_args(f, items)?;
                write!(f, "]")
            }
            Term::Compound { functor, args } => {
                if is_plain_atom(functor) {
                    write!(f, "{}", functor)?;
                } else {
                    write_quoted(f, functor, '\'')?;
                }
                write!(f, "(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
        }
    }
}

/// Serialization into solver terms.
pub trait ToTerm {
    fn to_term(&self) -> Term;
}

impl ToTerm for Rpl {
    fn to_term(&self) -> Term {
        let resolved = self.upper_bound();
        Term::list(
            resolved
                .elements()
                .iter()
                .map(|element| Term::atom(element.name()))
                .collect(),
        )
    }
}

impl ToTerm for Substitution {
    fn to_term(&self) -> Term {
        match (self.from(), self.to()) {
            (Some(from), Some(to)) => {
                Term::compound("subst", vec![Term::atom(from.name()), to.to_term()])
            }
            _ => Term::atom("identity"),
        }
    }
}

impl ToTerm for Effect {
    fn to_term(&self) -> Term {
        match self {
            Effect::Pure => Term::atom("pure"),
            Effect::Invokes(invocation) => Term::compound(
                "invokes",
                vec![
                    Term::string(invocation.function.clone()),
                    Term::list(
                        invocation
                            .substitutions
                            .iter()
                            .map(ToTerm::to_term)
                            .collect(),
                    ),
                ],
            ),
            _ => {
                let rpl = self.rpl().map(ToTerm::to_term).unwrap_or(Term::List(Vec::new()));
                Term::compound(self.kind().name(), vec![rpl])
            }
        }
    }
}

impl ToTerm for EffectSummary {
    fn to_term(&self) -> Term {
        match self {
            EffectSummary::Concrete(summary) => Term::compound(
                "effect_summary",
                vec![Term::list(summary.iter().map(ToTerm::to_term).collect())],
            ),
            EffectSummary::Var(var) => Term::compound("var", vec![Term::atom(var.name().clone())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asap_rpl::{RplElement, SubstitutionVector};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_atom_quoting() {
        assert_eq!(Term::atom("reads").to_string(), "reads");
        assert_eq!(Term::atom("f_sig2").to_string(), "f_sig2");
        assert_eq!(Term::atom("Money").to_string(), "'Money'");
        assert_eq!(Term::atom("*").to_string(), "'*'");
        assert_eq!(Term::atom("it's").to_string(), "'it\\'s'");
        assert_eq!(Term::string("a\"b").to_string(), "\"a\\\"b\"");
        assert_eq!(Term::list(Vec::new()).to_string(), "[]");
    }

    #[test]
    fn test_effect_terms() {
        let rpl: Rpl = [RplElement::local(), RplElement::named("data"), RplElement::star()]
            .into_iter()
            .collect();
        assert_snapshot!(Effect::AtomicWrites(rpl).to_term().to_string(), @"atomic_writes(['Local', data, '*'])");
        assert_snapshot!(Effect::Reads(Rpl::root()).to_term().to_string(), @"reads([])");
        assert_snapshot!(Effect::Pure.to_term().to_string(), @"pure");

        let subs: SubstitutionVector =
            [Substitution::parameter("P", Rpl::local())].into_iter().collect();
        assert_snapshot!(
            Effect::invokes("swap", subs).to_term().to_string(),
            @r#"invokes("swap", [subst('P', ['Local'])])"#
        );
    }

    #[test]
    fn test_export_is_repeatable() {
        let summary = EffectSummary::concrete([
            Effect::Writes(Rpl::local()),
            Effect::Reads(Rpl::single(RplElement::named("A"))),
        ]);
        assert_eq!(summary.to_term(), summary.to_term());
        assert_snapshot!(
            summary.to_term().to_string(),
            @"effect_summary([writes(['Local']), reads(['A'])])"
        );
    }
}
