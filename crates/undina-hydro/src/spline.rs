//! Interpolating B-splines for resampling tabulated kernels.
//!
//! Impulse-response functions arrive on the hydrodynamic solver's native
//! time grid. Moving them onto the simulation step needs a smooth curve
//! through every tabulated sample, so we fit a vector-valued B-spline of
//! degree $p$ (normally 3) through $n$ samples at parameters
//! $u_0 = 0 < u_1 < \dots < u_{n-1} = 1$.
//!
//! Knots follow the averaging scheme of Piegl & Tiller (*The NURBS Book*,
//! Eq. 9.8): the first and last $p + 1$ knots are clamped to 0 and 1, and
//! interior knot $j$ is the mean of $u_j, \dots, u_{j+p-1}$. The control
//! points solve the $n \times n$ collocation system
//! $\sum_k N_{k,p}(u_i) \, \mathbf{P}_k = \mathbf{Q}_i$.

use faer::linalg::solvers::SpSolver;
use ndarray::{Array1, Array2, ArrayView2};

use crate::error::{check_ascending, HydroError};

/// A vector-valued interpolating B-spline on the parameter interval $[0, 1]$.
#[derive(Debug, Clone)]
pub struct BSpline {
    degree: usize,
    /// Clamped knot vector, length `n + degree + 1`.
    knots: Vec<f64>,
    /// Control points, shape (components, n).
    control: Array2<f64>,
}

impl BSpline {
    /// Fit a spline through the columns of `values` at parameters `params`.
    ///
    /// # Arguments
    /// * `values` - Samples of shape `(components, n)`; column `i` is the
    ///   point the curve must pass through at `params[i]`.
    /// * `degree` - Requested polynomial degree. Reduced to `n - 1` when
    ///   fewer than `degree + 1` samples are available.
    /// * `params` - Strictly increasing parameters, first 0 and last 1.
    pub fn interpolate(
        values: ArrayView2<f64>,
        degree: usize,
        params: &[f64],
    ) -> Result<Self, HydroError> {
        let n = params.len();
        if values.ncols() != n {
            return Err(HydroError::ShapeMismatch {
                what: "spline samples",
                expected: vec![values.nrows(), n],
                actual: values.shape().to_vec(),
            });
        }
        check_ascending("spline parameters", params)?;
        if n < 2 {
            return Err(HydroError::Spline(
                "at least 2 samples are needed to fit a spline".into(),
            ));
        }

        let degree = degree.clamp(1, n - 1);
        let knots = average_knots(params, degree);

        // Collocation matrix: row i holds the non-zero basis functions at u_i.
        let mut collocation = Array2::<f64>::zeros((n, n));
        for (i, &u) in params.iter().enumerate() {
            let span = find_span(&knots, degree, n, u);
            let basis = basis_functions(&knots, span, u, degree);
            for (r, b) in basis.iter().enumerate() {
                collocation[[i, span - degree + r]] = *b;
            }
        }

        let faer_mat = faer::Mat::<f64>::from_fn(n, n, |i, j| collocation[[i, j]]);
        let lu = faer_mat.partial_piv_lu();

        let components = values.nrows();
        let mut control = Array2::<f64>::zeros((components, n));
        for c in 0..components {
            let faer_rhs = faer::Col::<f64>::from_fn(n, |i| values[[c, i]]);
            let faer_sol = lu.solve(&faer_rhs);
            for i in 0..n {
                let v = faer_sol[i];
                if !v.is_finite() {
                    return Err(HydroError::Spline(format!(
                        "collocation system is singular (component {}, control point {})",
                        c, i
                    )));
                }
                control[[c, i]] = v;
            }
        }

        Ok(Self {
            degree,
            knots,
            control,
        })
    }

    /// Polynomial degree actually used by the fit.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of vector components.
    pub fn components(&self) -> usize {
        self.control.nrows()
    }

    /// Evaluate every component at parameter `u` (clamped to $[0, 1]$).
    pub fn evaluate(&self, u: f64) -> Array1<f64> {
        let u = u.clamp(0.0, 1.0);
        let n = self.control.ncols();
        let span = find_span(&self.knots, self.degree, n, u);
        let basis = basis_functions(&self.knots, span, u, self.degree);

        let mut point = Array1::<f64>::zeros(self.control.nrows());
        for (r, b) in basis.iter().enumerate() {
            let k = span - self.degree + r;
            for c in 0..self.control.nrows() {
                point[c] += b * self.control[[c, k]];
            }
        }
        point
    }
}

/// Clamped knot vector by parameter averaging.
fn average_knots(params: &[f64], degree: usize) -> Vec<f64> {
    let n = params.len();
    let mut knots = vec![0.0; n + degree + 1];
    for k in knots.iter_mut().skip(n) {
        *k = 1.0;
    }
    for j in 1..n - degree {
        let sum: f64 = params[j..j + degree].iter().sum();
        knots[j + degree] = sum / degree as f64;
    }
    knots
}

/// Index of the knot span containing `u` (Piegl & Tiller, Algorithm A2.1).
fn find_span(knots: &[f64], degree: usize, count: usize, u: f64) -> usize {
    if u >= knots[count] {
        return count - 1;
    }
    if u <= knots[degree] {
        return degree;
    }
    let mut low = degree;
    let mut high = count;
    let mut mid = (low + high) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Non-vanishing basis functions $N_{span-p..=span, p}(u)$ (Algorithm A2.2).
fn basis_functions(knots: &[f64], span: usize, u: f64, degree: usize) -> Vec<f64> {
    let mut basis = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    basis[0] = 1.0;

    for j in 1..=degree {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = basis[r] / (right[r + 1] + left[j - r]);
            basis[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        basis[j] = saved;
    }
    basis
}
