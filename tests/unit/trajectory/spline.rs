use super::*;

fn fit_scalar(sites: &[f64], ys: &[f64], degree: usize) -> InterpSpline {
    let values: Vec<[f64; 2]> = sites.iter().zip(ys).map(|(&s, &y)| [s, y]).collect();
    InterpSpline::fit(sites, &values, degree).unwrap()
}

#[test]
fn passes_through_every_site() {
    let sites = [0.0, 4.0, 5.0, 11.0, 20.0, 21.0];
    let ys = [3.0, -7.0, 12.0, 40.0, 2.0, 9.0];
    for degree in 1..=3 {
        let s = fit_scalar(&sites, &ys, degree);
        for (&x, &y) in sites.iter().zip(&ys) {
            let v = s.eval(x);
            assert!((v[0] - x).abs() < 1e-9, "degree {degree} x at {x}");
            assert!((v[1] - y).abs() < 1e-9, "degree {degree} y at {x}: {}", v[1]);
        }
    }
}

#[test]
fn quadratic_reproduces_a_parabola() {
    let f = |t: f64| (t - 5.0) * (t - 5.0) - 3.0 * t;
    let sites = [0.0, 3.0, 7.0, 10.0, 12.0];
    let ys: Vec<f64> = sites.iter().map(|&t| f(t)).collect();
    let s = fit_scalar(&sites, &ys, 2);
    assert_eq!(s.degree(), 2);
    for t in 0..=12 {
        let t = f64::from(t);
        assert!((s.eval(t)[1] - f(t)).abs() < 1e-8, "t={t}");
    }
}

#[test]
fn cubic_reproduces_a_cubic() {
    let f = |t: f64| 0.01 * t * t * t - 0.5 * t * t + 2.0 * t + 1.0;
    let sites = [0.0, 2.0, 5.0, 9.0, 14.0, 15.0];
    let ys: Vec<f64> = sites.iter().map(|&t| f(t)).collect();
    let s = fit_scalar(&sites, &ys, 3);
    assert_eq!(s.degree(), 3);
    for t in 0..=15 {
        let t = f64::from(t);
        assert!((s.eval(t)[1] - f(t)).abs() < 1e-8, "t={t}");
    }
}

#[test]
fn degree_drops_to_fit_the_site_count() {
    let s = fit_scalar(&[0.0, 10.0], &[0.0, 100.0], 3);
    assert_eq!(s.degree(), 1);
    assert!((s.eval(5.0)[1] - 50.0).abs() < 1e-12);

    let s = fit_scalar(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0], 3);
    assert_eq!(s.degree(), 2);
    assert!((s.eval(1.5)[1] - 2.25).abs() < 1e-12);
}

#[test]
fn linear_is_piecewise_linear() {
    let s = fit_scalar(&[0.0, 10.0, 20.0], &[0.0, 100.0, 0.0], 1);
    assert!((s.eval(5.0)[1] - 50.0).abs() < 1e-12);
    assert!((s.eval(15.0)[1] - 50.0).abs() < 1e-12);
}

#[test]
fn rejects_degenerate_input() {
    assert!(InterpSpline::fit(&[1.0], &[[0.0, 0.0]], 2).is_none());
    assert!(InterpSpline::fit(&[1.0, 1.0], &[[0.0, 0.0], [1.0, 1.0]], 2).is_none());
    assert!(InterpSpline::fit(&[2.0, 1.0], &[[0.0, 0.0], [1.0, 1.0]], 1).is_none());
    assert!(InterpSpline::fit(&[0.0, 1.0], &[[0.0, 0.0]], 1).is_none());
}
