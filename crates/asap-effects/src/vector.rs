//! Ordered effect lists and minimality reduction.

use crate::effect::Effect;
use asap_rpl::{Substitutable, Substitution};
use std::fmt;

/// An effect removed by minimality reduction, with the effect that covers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoveredEffect {
    pub removed: Effect,
    pub covering: Effect,
}

/// Positions `(i, j)` of the first effect covered by a different member.
pub(crate) fn first_covered<'a, I>(effects: I) -> Option<(usize, usize)>
where
    I: Iterator<Item = &'a Effect> + Clone,
{
    for (i, candidate) in effects.clone().enumerate() {
        for (j, cover) in effects.clone().enumerate() {
            if i != j && candidate.is_sub_effect_of(cover) {
                return Some((i, j));
            }
        }
    }
    None
}

/// An ordered list of owned effects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EffectVector {
    effects: Vec<Effect>,
}

impl EffectVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn extend_from(&mut self, other: &EffectVector) {
        self.effects.extend(other.effects.iter().cloned());
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

    pub fn as_slice(&self) -> &[Effect] {
        &self.effects
    }

    /// Drop every effect covered by another member until none is left,
    /// reporting each removal with the effect that covered it.
    pub fn make_minimal(&mut self) -> Vec<CoveredEffect> {
        let mut removed = Vec::new();
        while let Some((i, j)) = first_covered(self.effects.iter()) {
            let covering = self.effects[j].clone();
            let effect = self.effects.remove(i);
            tracing::trace!(removed = %effect, covering = %covering, "dropping covered effect");
            removed.push(CoveredEffect {
                removed: effect,
                covering,
            });
        }
        removed
    }
}

impl Substitutable for EffectVector {
    fn substitute(&mut self, sub: &Substitution) {
        for effect in &mut self.effects {
            effect.substitute(sub);
        }
    }
}

impl FromIterator<Effect> for EffectVector {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EffectVector {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.into_iter()
    }
}

impl fmt::Display for EffectVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, effect) in self.effects.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", effect)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asap_rpl::{Rpl, RplElement, SubstitutionVector};
    use pretty_assertions::assert_eq;

    fn named(names: &[&str]) -> Rpl {
        names.iter().map(|n| RplElement::named(*n)).collect()
    }

    #[test]
    fn test_make_minimal_drops_duplicates_once() {
        let mut effects: EffectVector = [
            Effect::Reads(named(&["A"])),
            Effect::Reads(named(&["A"])),
        ]
        .into_iter()
        .collect();
        let removed = effects.make_minimal();
        assert_eq!(removed.len(), 1);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_make_minimal_chains() {
        let mut effects: EffectVector = [
            Effect::Reads(named(&["A", "B"])),
            Effect::Writes(named(&["A", "B"])),
            Effect::Writes(named(&["A", "*"])),
            Effect::Reads(named(&["C"])),
        ]
        .into_iter()
        .collect();
        let removed = effects.make_minimal();
        assert_eq!(removed.len(), 2);
        assert_eq!(effects.to_string(), "[writes A:*, reads C]");
        assert_eq!(
            removed[0],
            CoveredEffect {
                removed: Effect::Reads(named(&["A", "B"])),
                covering: Effect::Writes(named(&["A", "B"])),
            }
        );
        assert!(effects.make_minimal().is_empty());
    }

    #[test]
    fn test_pure_effects_are_always_removed_next_to_anything() {
        let mut effects: EffectVector = [Effect::Pure, Effect::invokes("f", SubstitutionVector::new())]
            .into_iter()
            .collect();
        effects.make_minimal();
        assert_eq!(effects.to_string(), "[invokes f]");
    }
}
