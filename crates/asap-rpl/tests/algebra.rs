//! Laws of the region algebra, checked over small families of paths.

use asap_rpl::{
    CaptureIds, RegionRegistry, Rpl, RplElement, RplVector, Substitutable, Substitution,
    SubstitutionVector,
};
use pretty_assertions::assert_eq;

/// `P` and `Q` heads are parameters; everything else is a named region.
fn rpl(path: &str) -> Rpl {
    if path == "Root" {
        return Rpl::root();
    }
    path.split(':')
        .enumerate()
        .map(|(i, name)| match name {
            "*" => RplElement::star(),
            "Local" => RplElement::local(),
            _ if i == 0 && matches!(name, "P" | "P1" | "P2" | "Q") => RplElement::parameter(name),
            _ => RplElement::named(name),
        })
        .collect()
}

const PATHS: &[&str] = &[
    "Root", "A", "B", "A:B", "A:*", "A:B:C", "A:*:C", "*", "*:C", "P", "P:A", "P:*", "Local",
    "Local:A",
];

#[test]
fn test_inclusion_is_reflexive() {
    for path in PATHS {
        let r = rpl(path);
        assert!(r.is_included_in(&r), "{} ⊑ {}", r, r);
    }
}

#[test]
fn test_inclusion_is_transitive() {
    for a in PATHS {
        for b in PATHS {
            for c in PATHS {
                let (a, b, c) = (rpl(a), rpl(b), rpl(c));
                if a.is_included_in(&b) && b.is_included_in(&c) {
                    assert!(a.is_included_in(&c), "{} ⊑ {} ⊑ {}", a, b, c);
                }
            }
        }
    }
}

#[test]
fn test_root_includes_only_itself() {
    let root = Rpl::root();
    for path in PATHS {
        let r = rpl(path);
        assert_eq!(r.is_included_in(&root), r.is_empty(), "{} ⊑ Root", r);
        assert!(r.is_under(&root), "{} under Root", r);
    }
}

#[test]
fn test_star_absorbs_any_tail() {
    for head in [RplElement::named("H"), RplElement::parameter("P")] {
        let starred = Rpl::new(vec![head.clone(), RplElement::star()]);
        for tail in ["Root", "A", "A:B", "*", "A:*:C"] {
            let mut path = Rpl::single(head.clone());
            path.append(&rpl(tail));
            assert!(path.is_included_in(&starred), "{} ⊑ {}", path, starred);
        }
    }
}

#[test]
fn test_substitution_only_rewrites_the_head() {
    let sub = Substitution::parameter("P", rpl("Local:A"));

    let mut unrelated = rpl("Q:P2");
    assert!(!sub.apply_to(&mut unrelated));
    assert_eq!(unrelated, rpl("Q:P2"));

    let mut headed = rpl("P:B:C");
    assert!(sub.apply_to(&mut headed));
    assert_eq!(headed.to_string(), "Local:A:B:C");
}

#[test]
fn test_money_substituted_into_local() {
    let mut money = Rpl::new(vec![RplElement::parameter("P"), RplElement::named("Money")]);
    money.substitute(&RplElement::parameter("P"), &Rpl::local());
    assert_eq!(money.to_string(), "Local:Money");
}

#[test]
fn test_inclusion_examples() {
    assert!(rpl("R1:R2").is_included_in(&rpl("R1:*")));
    assert!(!rpl("R1:R3").is_included_in(&rpl("R1:R2")));
}

#[test]
fn test_substitution_vector_is_sequential() {
    let chained: SubstitutionVector = [
        Substitution::parameter("P1", rpl("P2")),
        Substitution::parameter("P2", rpl("R")),
    ]
    .into_iter()
    .collect();
    let mut r = rpl("P1:X");
    r.substitute_all(&chained);
    assert_eq!(r.to_string(), "R:X");

    // A swap applied left to right: A becomes B, then B becomes A again.
    let swap: SubstitutionVector = [
        Substitution::new(RplElement::parameter("A"), Rpl::single(RplElement::parameter("B"))),
        Substitution::new(RplElement::parameter("B"), Rpl::single(RplElement::parameter("A"))),
    ]
    .into_iter()
    .collect();
    let mut headed = Rpl::new(vec![RplElement::parameter("A"), RplElement::named("X")]);
    headed.substitute_all(&swap);
    assert_eq!(
        headed,
        Rpl::new(vec![RplElement::parameter("A"), RplElement::named("X")])
    );
}

#[test]
fn test_vector_inclusion_after_substitution() {
    let mut lhs: RplVector = [rpl("P:R1"), rpl("P:R2")].into_iter().collect();
    let rhs: RplVector = [rpl("Q:R1"), rpl("Q:R2")].into_iter().collect();
    assert!(!lhs.is_included_in(&rhs));

    lhs.substitute(&RplElement::parameter("P"), &rpl("Q"));
    assert!(lhs.is_included_in(&rhs));
}

#[test]
fn test_disjointness_is_symmetric() {
    for a in PATHS {
        for b in PATHS {
            let (a, b) = (rpl(a), rpl(b));
            assert_eq!(a.is_disjoint(&b), b.is_disjoint(&a), "{} # {}", a, b);
        }
    }
}

#[test]
fn test_included_paths_are_never_disjoint() {
    for a in PATHS {
        for b in PATHS {
            let (a, b) = (rpl(a), rpl(b));
            if a.is_included_in(&b) {
                assert!(!a.is_disjoint(&b), "{} ⊑ {} but disjoint", a, b);
            }
        }
    }
}

#[test]
fn test_capture_is_bounded_by_its_source() {
    let mut ids = CaptureIds::new();
    let source = rpl("A:*");
    let captured = source.capture(&mut ids);
    assert!(captured.is_included_in(&source));
    assert!(rpl("A:B").capture(&mut ids) == rpl("A:B"));
    assert!(captured != source.capture(&mut ids));
}

#[test]
fn test_registry_builds_paths_for_nested_scopes() {
    let mut registry = RegionRegistry::new();
    let global = registry.global();
    registry.declare_region(global, "Money").unwrap();
    let class = registry.new_scope(global);
    registry.declare_parameter(class, "P").unwrap();

    let built = registry.build_rpl(class, &["P", "Money", "*"]).unwrap();
    assert_eq!(built.to_string(), "P:Money:*");
    assert!(registry.build_rpl(global, &["P"]).is_err());
}
