//! Algebraic and geometric properties checked over generated inputs.

use proptest::prelude::*;
use symgeo::prelude::*;

fn leaf_value() -> impl Strategy<Value = f64> {
    (-1000i32..=1000).prop_map(|k| k as f64 / 8.0)
}

/// Deterministic expression trees over `f64` leaves in `[-2, 2]`, small
/// enough that nested products stay finite.
fn dbl_expr() -> impl Strategy<Value = Scalar<f64>> {
    let leaf = (-16i32..=16).prop_map(|k| Scalar::leaf(k as f64 / 8.0));
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|ops| Scalar::sum(ops)),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|ops| Scalar::product(ops)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Scalar::diff(a, b)),
            inner.clone().prop_map(Scalar::opposite),
        ]
    })
}

fn gf_expr(p: u64) -> impl Strategy<Value = Scalar<u64>> {
    let leaf = (0..p).prop_map(Scalar::leaf);
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|ops| Scalar::sum(ops)),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|ops| Scalar::product(ops)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Scalar::diff(a, b)),
            inner.clone().prop_map(Scalar::opposite),
        ]
    })
}

proptest! {
    #[test]
    fn evaluation_is_a_homomorphism_over_f64(a in dbl_expr(), b in dbl_expr()) {
        let f = DblField::seeded(0);
        let (va, vb) = (f.actual(&a).unwrap(), f.actual(&b).unwrap());
        let sum = f.actual(&Scalar::sum([a.clone(), b.clone()])).unwrap();
        let prod = f.actual(&Scalar::product([a, b])).unwrap();
        prop_assert_eq!(sum.to_bits(), f.addition().add(&va, &vb).to_bits());
        prop_assert_eq!(prod.to_bits(), f.multiplication().multiply(&va, &vb).to_bits());
    }

    #[test]
    fn evaluation_is_a_homomorphism_over_gf(a in gf_expr(97), b in gf_expr(97)) {
        let f = PrimeField::new(97).unwrap();
        let (va, vb) = (f.actual(&a).unwrap(), f.actual(&b).unwrap());
        let sum = f.actual(&Scalar::sum([a.clone(), b.clone()])).unwrap();
        let prod = f.actual(&Scalar::product([a, b])).unwrap();
        prop_assert!(f.same(&sum, &f.addition().add(&va, &vb)));
        prop_assert!(f.same(&prod, &f.multiplication().multiply(&va, &vb)));
    }

    #[test]
    fn bags_ignore_order_and_count_duplicates(
        ops in prop::collection::vec(dbl_expr(), 1..6).prop_shuffle(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut reversed = ops.clone();
        reversed.reverse();
        prop_assert_eq!(Scalar::sum(ops.clone()), Scalar::sum(reversed.clone()));
        prop_assert_eq!(Scalar::product(ops.clone()), Scalar::product(reversed));

        let mut extra = ops.clone();
        extra.push(pick.get(&ops).clone());
        prop_assert_ne!(Scalar::sum(ops.clone()), Scalar::sum(extra.clone()));
        prop_assert_ne!(Scalar::product(ops), Scalar::product(extra));
    }

    #[test]
    fn division_by_zero_fails_for_any_dividend(x in dbl_expr()) {
        let f = DblField::seeded(0);
        let e = Scalar::division(x.clone(), Scalar::zero());
        prop_assert!(matches!(e.value(&f), Err(Error::Argument(_))));
        let e = Scalar::inverse(x.clone() - x);
        prop_assert!(matches!(e.value(&f), Err(Error::Argument(_))));
    }

    #[test]
    fn between_stays_in_bounds(lo in leaf_value(), width in 0.0f64..50.0, seed in any::<u64>()) {
        let f = DblField::seeded(seed);
        let hi = lo + width;
        let s = Scalar::between(Scalar::leaf(lo), Scalar::leaf(hi));
        for _ in 0..16 {
            let x = f.actual(&s).unwrap();
            prop_assert!(lo <= x && x <= hi, "{} not in [{}, {}]", x, lo, hi);
        }
        if hi > lo {
            let reversed = Scalar::between(Scalar::leaf(hi), Scalar::leaf(lo));
            prop_assert!(matches!(f.actual(&reversed), Err(Error::Argument(_))));
        }
    }

    #[test]
    fn vect_equals_is_reflexive_and_length_aware(
        values in prop::collection::vec(leaf_value(), 0..6),
        seed in any::<u64>(),
    ) {
        let f = DblField::seeded(seed);
        let mut coords: Vec<Scalar<f64>> = values.iter().copied().map(Scalar::leaf).collect();
        coords.push(f.random());
        let v = Vect::new(coords);
        prop_assert!(v.equals(&f, &v).unwrap());
        let longer = Vect::new(v.coords().iter().cloned().chain([Scalar::zero()]).collect());
        prop_assert!(!v.equals(&f, &longer).unwrap());
    }

    #[test]
    fn dynamic_point_in_line_holds_after_every_draw(
        ax in leaf_value(), ay in leaf_value(),
        dx in 1.0f64..20.0, dy in -20.0f64..20.0,
        seed in any::<u64>(),
    ) {
        let f = DblField::seeded(seed);
        let a = Anchor::new("A", ax, ay);
        let b = Anchor::new("B", ax + dx, ay + dy);
        let line = Line::through(a.point(), b.point());
        for round in 0..4 {
            let d = DynamicPoint::in_line(format!("P{round}"), line.clone());
            for _ in 0..3 {
                d.resample(&f).unwrap();
                prop_assert!(Relation::PointInLine(d.point(), line.clone()).holds(&f).unwrap());
            }
            b.set(ax - dy, ay + dx + round as f64);
            prop_assert!(Relation::PointInLine(d.point(), line.clone()).holds(&f).unwrap());
        }
    }
}
