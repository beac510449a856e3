use nalgebra::{DMatrix, DVector};

use super::*;
use crate::error::Error;
use crate::field::{DblField, Field, PrimeField};
use crate::scalar::Scalar;

fn field() -> DblField {
    DblField::seeded(23)
}

#[test]
fn apply_matches_line_dot_products() {
    let f = field();
    let values: Vec<f64> = (0..12).map(|k| k as f64 - 4.5).collect();
    let m = Matrix::from_values(3, 4, values.clone()).unwrap();
    let v = Vect::from_values([1.0, -2.0, 0.5, 3.0]);
    let out = m.apply(&v).unwrap();
    assert_eq!(out.len(), 3);
    for i in 0..3 {
        let expected = f.actual(&m.line(i).unwrap().dot(&v).unwrap()).unwrap();
        assert!((f.actual(out.coord(i).unwrap()).unwrap() - expected).abs() < 1e-12);
    }
    // Cross-check against nalgebra.
    let dm = DMatrix::from_row_slice(3, 4, &values);
    let dv = DVector::from_vec(vec![1.0, -2.0, 0.5, 3.0]);
    let reference = dm * dv;
    let got = out.to_dvector(&f).unwrap();
    assert!((got - reference).norm() < 1e-12);
}

#[test]
fn apply_rejects_wrong_length() {
    let m = Matrix::from_values(3, 4, vec![0.0; 12]).unwrap();
    let v = Vect::from_values([1.0, 2.0, 3.0]);
    assert!(matches!(m.apply(&v), Err(Error::Argument(_))));
}

#[test]
fn opposite_cancels() {
    let f = field();
    let v = Vect::new(vec![f.random(), Scalar::leaf(2.5), Scalar::leaf(-7.0)]);
    // Capture the random coordinate first so both operands see the same value.
    let v = Vect::from_values(v.actual(&f).unwrap());
    let s = v.plus(&v.opposite()).unwrap();
    for x in s.actual(&f).unwrap() {
        assert!(x.abs() < 1e-6);
    }
}

#[test]
fn vector_ops_check_lengths() {
    let a = Vect::from_values([1.0, 2.0]);
    let b = Vect::from_values([1.0, 2.0, 3.0]);
    assert!(a.plus(&b).is_err());
    assert!(a.minus(&b).is_err());
    assert!(a.dot(&b).is_err());
    assert!(Vect::sum(&[a.clone(), b.clone()]).is_err());
    assert!(Vect::times(&[a.clone(), b]).is_err());
    assert!(Vect::<f64>::sum(&[]).is_err());
    assert!(a.coord(2).is_err());
}

#[test]
fn nary_combinators() {
    let f = field();
    let a = Vect::from_values([1.0, 2.0]);
    let b = Vect::from_values([3.0, 4.0]);
    let c = Vect::from_values([5.0, 6.0]);
    let s = Vect::sum(&[a.clone(), b.clone(), c.clone()]).unwrap();
    assert_eq!(s.actual(&f).unwrap(), vec![9.0, 12.0]);
    let t = Vect::times(&[a.clone(), b.clone(), c]).unwrap();
    assert_eq!(t.actual(&f).unwrap(), vec![15.0, 48.0]);
    assert_eq!(f.actual(&a.dot(&b).unwrap()).unwrap(), 11.0);
    assert_eq!(f.actual(&b.norm_squared()).unwrap(), 25.0);
    assert!((f.actual(&b.norm()).unwrap() - 5.0).abs() < 1e-12);
    let scaled = a.scale(&Scalar::leaf(3.0));
    assert_eq!(scaled.actual(&f).unwrap(), vec![3.0, 6.0]);
}

#[test]
fn vect_equals_semantics() {
    let f = field();
    let v = Vect::new(vec![f.random(), f.random()]);
    // Random coordinates: same handles, equal without resampling.
    assert!(v.equals(&f, &v).unwrap());
    assert!(v.equals(&f, &v.clone()).unwrap());
    let short = Vect::from_values([1.0]);
    assert!(!v.equals(&f, &short).unwrap());
    let a = Vect::from_values([1.0, 2.0]);
    let b = Vect::new(vec![Scalar::leaf(0.5) + Scalar::leaf(0.5), Scalar::leaf(2.0)]);
    assert!(a.equals(&f, &b).unwrap());
    assert!(!a.equals(&f, &Vect::from_values([1.0, 2.5])).unwrap());
}

#[test]
fn planar_helpers() {
    let f = field();
    let x = Vect::from_values([1.0, 0.0]);
    let y = Vect::from_values([0.0, 1.0]);
    assert_eq!(x.perp().unwrap().actual(&f).unwrap(), vec![0.0, 1.0]);
    assert_eq!(f.actual(&x.cross(&y).unwrap()).unwrap(), 1.0);
    let a = f.actual(&x.angle(&y).unwrap()).unwrap();
    assert!((a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    let s = f.actual(&y.signed_angle(&x).unwrap()).unwrap();
    assert!((s + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    let z = Vect::from_values([0.0, 0.0, 1.0]);
    assert!(z.perp().is_err());
    assert!(z.signed_angle(&z).is_err());
}

#[test]
fn basis_and_zeros() {
    let f = field();
    assert_eq!(Vect::<f64>::basis(3, 1).unwrap().actual(&f).unwrap(), vec![0.0, 1.0, 0.0]);
    assert!(Vect::<f64>::basis(3, 3).is_err());
    assert_eq!(Vect::<f64>::zeros(2).actual(&f).unwrap(), vec![0.0, 0.0]);
}

#[test]
fn transpose_is_a_view() {
    let f = field();
    let m = Matrix::from_values(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let t = m.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert!(t.is_transposed());
    assert_eq!(t.get(2, 1).unwrap(), m.get(1, 2).unwrap());
    assert_eq!(
        t.actual(&f).unwrap(),
        vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]
    );
    assert_eq!(t.transpose(), m);
    let dm = t.to_dmatrix(&f).unwrap();
    assert_eq!(dm, m.to_dmatrix(&f).unwrap().transpose());
}

#[test]
fn entrywise_combinators_need_matching_shapes() {
    let f = field();
    let a = Matrix::from_values(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let b = Matrix::identity(2);
    let s = Matrix::sum(&[a.clone(), b.clone()]).unwrap();
    assert_eq!(s.actual(&f).unwrap(), vec![vec![2.0, 2.0], vec![3.0, 5.0]]);
    let p = Matrix::times(&[a.clone(), b.clone()]).unwrap();
    assert_eq!(p.actual(&f).unwrap(), vec![vec![1.0, 0.0], vec![0.0, 4.0]]);
    let d = a.minus(&b).unwrap();
    assert_eq!(d.actual(&f).unwrap(), vec![vec![0.0, 2.0], vec![3.0, 3.0]]);
    let wide = Matrix::from_values(2, 3, vec![0.0; 6]).unwrap();
    assert!(Matrix::sum(&[a.clone(), wide.clone()]).is_err());
    assert!(Matrix::times(&[a.clone(), wide.transpose()]).is_err());
    assert!(a.minus(&wide).is_err());
}

#[test]
fn compose_and_rotation() {
    let f = field();
    let a = Matrix::from_values(2, 3, vec![1.0, 0.0, 2.0, 0.0, 1.0, -1.0]).unwrap();
    let b = Matrix::from_values(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
    let ab = a.compose(&b).unwrap();
    assert_eq!(ab.shape(), (2, 1));
    assert_eq!(ab.actual(&f).unwrap(), vec![vec![7.0], vec![-1.0]]);
    assert!(b.compose(&b).is_err());

    let r = Matrix::rotation(Scalar::leaf(0.0), Scalar::leaf(1.0));
    let v = r.apply(&Vect::from_values([1.0, 0.0])).unwrap();
    assert_eq!(v.actual(&f).unwrap(), vec![0.0, 1.0]);
    let id = r.compose(&r.transpose()).unwrap();
    assert_eq!(id.actual(&f).unwrap(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[test]
fn matrix_construction_checks() {
    let ragged = vec![Vect::from_values([1.0, 2.0]), Vect::from_values([3.0])];
    assert!(Matrix::new(ragged).is_err());
    assert!(Matrix::from_values(2, 2, vec![1.0; 3]).is_err());
    let m = Matrix::new(vec![Vect::from_values([1.0, 2.0]), Vect::from_values([3.0, 4.0])]).unwrap();
    assert!(m.get(2, 0).is_err());
    assert!(m.line(2).is_err());
    assert!(m.column(2).is_err());
    assert_eq!(m.column(1).unwrap(), Vect::from_values([2.0, 4.0]));
}

#[test]
fn works_over_prime_field() {
    let p = PrimeField::new(5).unwrap();
    let m = Matrix::from_values(2, 2, vec![1u64, 2, 3, 4]).unwrap();
    let v = Vect::from_values([1u64, 1]);
    // [3, 7] = [3, 2] mod 5
    assert_eq!(m.apply(&v).unwrap().actual(&p).unwrap(), vec![3, 2]);
}
