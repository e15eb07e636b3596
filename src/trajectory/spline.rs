//! Interpolating B-splines over scalar sites with 2D values.
//!
//! Knot placement follows the usual interpolation conventions: odd degrees use not-a-knot
//! (interior knots at the sites, minus `(k - 1) / 2` at each end), degree 2 puts interior knots
//! halfway between consecutive sites and skips the first and last midpoint. Either way there are
//! exactly as many coefficients as sites, so the collocation system is square.

#[derive(Clone, Debug)]
pub(crate) struct InterpSpline {
    degree: usize,
    knots: Vec<f64>,
    coeffs: Vec<[f64; 2]>,
}

impl InterpSpline {
    /// Fit a spline of `degree` through `(sites[i], values[i])`.
    ///
    /// `sites` must be strictly increasing. The degree drops to `sites.len() - 1` when there are
    /// too few sites for it. Returns `None` for fewer than 2 sites or a singular system.
    pub(crate) fn fit(sites: &[f64], values: &[[f64; 2]], degree: usize) -> Option<Self> {
        let n = sites.len();
        if n < 2 || values.len() != n || degree == 0 {
            return None;
        }
        if sites.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }

        let k = degree.min(n - 1);
        let knots = interp_knots(sites, k);

        let mut a = vec![vec![0.0f64; n]; n];
        for (row, &x) in a.iter_mut().zip(sites) {
            let span = find_span(&knots, k, n, x);
            for (r, b) in basis_funs(&knots, k, span, x).into_iter().enumerate() {
                row[span - k + r] = b;
            }
        }

        let coeffs = solve(a, values.to_vec())?;
        Some(Self {
            degree: k,
            knots,
            coeffs,
        })
    }

    pub(crate) fn degree(&self) -> usize {
        self.degree
    }

    pub(crate) fn eval(&self, x: f64) -> [f64; 2] {
        let k = self.degree;
        let n = self.coeffs.len();
        let span = find_span(&self.knots, k, n, x);
        let mut out = [0.0, 0.0];
        for (r, b) in basis_funs(&self.knots, k, span, x).into_iter().enumerate() {
            let c = self.coeffs[span - k + r];
            out[0] += b * c[0];
            out[1] += b * c[1];
        }
        out
    }
}

fn interp_knots(sites: &[f64], k: usize) -> Vec<f64> {
    let n = sites.len();
    let first = sites[0];
    let last = sites[n - 1];

    let interior: Vec<f64> = if k % 2 == 1 {
        let m = k.div_ceil(2);
        sites[m..n - m].to_vec()
    } else {
        let mids: Vec<f64> = sites.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
        let m = k / 2;
        mids[m..mids.len() - m].to_vec()
    };

    let mut knots = Vec::with_capacity(n + k + 1);
    knots.extend(std::iter::repeat_n(first, k + 1));
    knots.extend(interior);
    knots.extend(std::iter::repeat_n(last, k + 1));
    debug_assert_eq!(knots.len(), n + k + 1);
    knots
}

/// Index `i` in `k..n` with `knots[i] <= x < knots[i + 1]`, clamped to the last span at the
/// right boundary.
fn find_span(knots: &[f64], k: usize, n: usize, x: f64) -> usize {
    if x >= knots[n] {
        return n - 1;
    }
    let mut span = k;
    while span + 1 < n && knots[span + 1] <= x {
        span += 1;
    }
    span
}

/// Non-zero basis values `N[span-k..=span]` at `x` (Cox-de Boor, triangular form).
fn basis_funs(knots: &[f64], k: usize, span: usize, x: f64) -> Vec<f64> {
    let mut n = vec![0.0; k + 1];
    let mut left = vec![0.0; k + 1];
    let mut right = vec![0.0; k + 1];
    n[0] = 1.0;
    for j in 1..=k {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

/// Gaussian elimination with partial pivoting, two right-hand sides at once.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<[f64; 2]>) -> Option<Vec<[f64; 2]>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let f = a[row][col] / a[col][col];
            if f == 0.0 {
                continue;
            }
            for c in col..n {
                a[row][c] -= f * a[col][c];
            }
            b[row][0] -= f * b[col][0];
            b[row][1] -= f * b[col][1];
        }
    }

    let mut x = vec![[0.0; 2]; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for c in row + 1..n {
            acc[0] -= a[row][c] * x[c][0];
            acc[1] -= a[row][c] * x[c][1];
        }
        x[row] = [acc[0] / a[row][row], acc[1] / a[row][row]];
    }
    Some(x)
}

#[cfg(test)]
#[path = "../../tests/unit/trajectory/spline.rs"]
mod tests;
