//! Three-valued answers for questions symbolic summaries cannot settle.

use std::fmt;

/// The answer to a coverage or non-interference question.
///
/// `Dunno` means local reasoning is insufficient (a summary variable, or an
/// invocation whose callee has not been expanded) and a constraint must be
/// handed to the solver instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trivalent {
    True,
    False,
    Dunno,
}

impl Trivalent {
    pub fn is_true(self) -> bool {
        self == Trivalent::True
    }

    pub fn is_false(self) -> bool {
        self == Trivalent::False
    }

    pub fn is_dunno(self) -> bool {
        self == Trivalent::Dunno
    }

    /// Conjunction: any `False` wins, then any `Dunno`.
    pub fn and(self, other: Trivalent) -> Trivalent {
        match (self, other) {
            (Trivalent::False, _) | (_, Trivalent::False) => Trivalent::False,
            (Trivalent::Dunno, _) | (_, Trivalent::Dunno) => Trivalent::Dunno,
            _ => Trivalent::True,
        }
    }

    /// Conjunction over an iterator, stopping at the first `False`.
    pub fn all(answers: impl IntoIterator<Item = Trivalent>) -> Trivalent {
        let mut result = Trivalent::True;
        for answer in answers {
            result = result.and(answer);
            if result.is_false() {
                break;
            }
        }
        result
    }
}

impl From<bool> for Trivalent {
    fn from(value: bool) -> Self {
        if value {
            Trivalent::True
        } else {
            Trivalent::False
        }
    }
}

impl fmt::Display for Trivalent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trivalent::True => write!(f, "true"),
            Trivalent::False => write!(f, "false"),
            Trivalent::Dunno => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_false_dominates_dunno() {
        use Trivalent::*;
        assert_eq!(Trivalent::all([True, Dunno, False]), False);
        assert_eq!(Trivalent::all([True, Dunno, True]), Dunno);
        assert_eq!(Trivalent::all([]), True);
        assert_eq!(Trivalent::from(false), False);
    }
}
