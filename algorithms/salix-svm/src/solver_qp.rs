//! Dense convex quadratic program solver
//!
//! We are solving problems of the form
//! ```ignore
//! min_x 1/2 x^T P x + q^T x
//! s.t.  G x <= h, A x = b
//! ```
//! with a positive semi-definite quadratic term `P`. Both constraint blocks
//! may be empty. The solver follows the primal-dual interior-point scheme
//! with Mehrotra predictor-corrector steps: inequality constraints receive
//! slack variables `s` and multipliers `lambda`, a Newton direction for the
//! perturbed optimality conditions is obtained from the reduced system
//! ```ignore
//! [ P + G^T D G   A^T ] [ dx  ]   [ rhs_x  ]
//! [ A             0   ] [ dnu ] = [ rhs_nu ]
//! ```
//! with `D = diag(lambda / s)`, and iterates stay strictly inside the
//! positive orthant through a fraction-to-boundary step rule.
//!
//! Problems without inequality constraints reduce to a single linear solve of
//! the stationarity conditions and short-circuit the iteration entirely.
use ndarray::{s, Array1, Array2, ArrayView1};
use std::fmt;

use salix::Float;

/// Parameters of the solver routine
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams<F: Float> {
    /// Stopping condition on residuals and complementarity gap
    pub eps: F,
    /// Hard cap on interior-point iterations
    pub max_iterations: usize,
}

impl<F: Float> Default for SolverParams<F> {
    fn default() -> Self {
        SolverParams {
            eps: F::cast(1e-7),
            max_iterations: 100,
        }
    }
}

/// A dense convex quadratic program
///
/// The field names follow the textbook form of the problem: quadratic term
/// `p`, linear term `q`, inequality system `g x <= h` and equality system
/// `a x = b`. Constraint blocks are allowed to have zero rows.
#[derive(Clone, Debug, PartialEq)]
pub struct QpProblem<F: Float> {
    pub p: Array2<F>,
    pub q: Array1<F>,
    pub g: Array2<F>,
    pub h: Array1<F>,
    pub a: Array2<F>,
    pub b: Array1<F>,
}

impl<F: Float> QpProblem<F> {
    /// Number of primal variables
    pub fn nvars(&self) -> usize {
        self.q.len()
    }

    /// Number of inequality constraints
    pub fn nineq(&self) -> usize {
        self.h.len()
    }

    /// Number of equality constraints
    pub fn neq(&self) -> usize {
        self.b.len()
    }

    fn objective(&self, x: &Array1<F>) -> F {
        F::cast(0.5) * x.dot(&self.p.dot(x)) + self.q.dot(x)
    }
}

/// Termination status of the solver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QpStatus {
    /// All residuals and the complementarity gap dropped below the tolerance
    Optimal,
    /// The iteration cap was reached before the residuals converged
    MaxIterations,
    /// The reduced system became singular, no feasible point exists
    Infeasible,
    /// The iterates grew without bound, the objective is unbounded below
    Unbounded,
}

impl fmt::Display for QpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QpStatus::Optimal => write!(f, "optimal"),
            QpStatus::MaxIterations => write!(f, "maximum iterations reached"),
            QpStatus::Infeasible => write!(f, "infeasible"),
            QpStatus::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Solution returned by [`solve_qp`]
#[derive(Clone, Debug)]
pub struct QpSolution<F: Float> {
    /// Termination status, the solution is only meaningful for `Optimal`
    pub status: QpStatus,
    /// Primal variables at the last iterate
    pub x: Array1<F>,
    /// Number of interior-point iterations performed
    pub iterations: usize,
    /// Objective value at the last iterate
    pub objective: F,
}

/// Solve a convex quadratic program
///
/// Runs the primal-dual interior-point iteration from the cold start `x = 0`,
/// `s = lambda = 1` until every optimality residual and the complementarity
/// gap fall below `params.eps`, scaled with the magnitude of the problem
/// data. The returned status must be checked before the solution is used.
///
/// # Panics
///
/// Panics when the dimensions of the problem blocks do not line up.
pub fn solve_qp<F: Float>(problem: &QpProblem<F>, params: &SolverParams<F>) -> QpSolution<F> {
    let n = problem.nvars();
    let m = problem.nineq();
    let k = problem.neq();

    log::debug!(
        "solving quadratic program with {} variables, {} inequalities and {} equalities",
        n,
        m,
        k
    );

    if m == 0 {
        return solve_stationarity(problem);
    }

    let tau = F::cast(0.995);
    let blowup = F::cast(1e10);

    let mut x = Array1::<F>::zeros(n);
    let mut s = Array1::<F>::from_elem(m, F::one());
    let mut lambda = Array1::<F>::from_elem(m, F::one());
    let mut nu = Array1::<F>::zeros(k);

    // residual tolerances scale with the problem data
    let eps_dual = params.eps * (F::one() + inf_norm(problem.q.view()));
    let eps_pri = params.eps * (F::one() + inf_norm(problem.h.view()));
    let eps_eq = params.eps * (F::one() + inf_norm(problem.b.view()));

    for iteration in 0..params.max_iterations {
        // residuals of the perturbed optimality conditions
        let r_dual =
            problem.p.dot(&x) + &problem.q + problem.g.t().dot(&lambda) + problem.a.t().dot(&nu);
        let r_pri = problem.g.dot(&x) + &s - &problem.h;
        let r_eq = problem.a.dot(&x) - &problem.b;
        let gap = s.dot(&lambda) / F::cast(m);

        log::trace!(
            "iteration {}: gap {}, dual residual {}, primal residual {}",
            iteration,
            gap,
            inf_norm(r_dual.view()),
            inf_norm(r_pri.view())
        );

        if inf_norm(r_dual.view()) <= eps_dual
            && inf_norm(r_pri.view()) <= eps_pri
            && inf_norm(r_eq.view()) <= eps_eq
            && gap <= params.eps
        {
            let objective = problem.objective(&x);
            return QpSolution {
                status: QpStatus::Optimal,
                x,
                iterations: iteration,
                objective,
            };
        }

        // reduced system [P + G^T D G, A^T; A, 0] with D = diag(lambda / s)
        let mut kkt = Array2::<F>::zeros((n + k, n + k));
        for i in 0..n {
            for j in 0..n {
                kkt[(i, j)] = problem.p[(i, j)];
            }
        }
        for c in 0..m {
            let d = lambda[c] / s[c];
            for i in 0..n {
                for j in 0..n {
                    let add = problem.g[(c, i)] * d * problem.g[(c, j)];
                    kkt[(i, j)] += add;
                }
            }
        }
        for r in 0..k {
            for j in 0..n {
                kkt[(n + r, j)] = problem.a[(r, j)];
                kkt[(j, n + r)] = problem.a[(r, j)];
            }
        }

        let factor = match LuFactor::compute(&kkt) {
            Some(factor) => factor,
            None => {
                log::debug!("reduced system is singular at iteration {}", iteration);
                let objective = problem.objective(&x);
                return QpSolution {
                    status: QpStatus::Infeasible,
                    x,
                    iterations: iteration,
                    objective,
                };
            }
        };

        // predictor: pure Newton step towards zero complementarity
        let (dx_aff, ds_aff, dl_aff, _) = newton_step(
            problem, &factor, &r_dual, &r_pri, &r_eq, &s, &lambda, F::zero(), None,
        );

        let alpha_aff = max_step(&s, &ds_aff, &lambda, &dl_aff, F::one());
        let mut gap_aff = F::zero();
        for i in 0..m {
            gap_aff += (s[i] + alpha_aff * ds_aff[i]) * (lambda[i] + alpha_aff * dl_aff[i]);
        }
        gap_aff /= F::cast(m);

        // Mehrotra centering heuristic
        let sigma = if gap > F::zero() {
            (gap_aff / gap).powi(3).min(F::one())
        } else {
            F::zero()
        };

        // corrector: recenter and compensate the predictor linearization error
        let (dx, ds, dl, dnu) = newton_step(
            problem,
            &factor,
            &r_dual,
            &r_pri,
            &r_eq,
            &s,
            &lambda,
            sigma * gap,
            Some((&ds_aff, &dl_aff)),
        );

        let alpha = max_step(&s, &ds, &lambda, &dl, tau);
        x.scaled_add(alpha, &dx);
        s.scaled_add(alpha, &ds);
        lambda.scaled_add(alpha, &dl);
        nu.scaled_add(alpha, &dnu);

        if inf_norm(x.view()) > blowup {
            log::debug!("iterates are blowing up, the problem is unbounded below");
            let objective = problem.objective(&x);
            return QpSolution {
                status: QpStatus::Unbounded,
                x,
                iterations: iteration + 1,
                objective,
            };
        }

        let finite = x.iter().all(|v| v.is_finite())
            && s.iter().all(|v| v.is_finite())
            && lambda.iter().all(|v| v.is_finite());
        if !finite {
            log::debug!("iterates lost finiteness at iteration {}", iteration);
            return QpSolution {
                status: QpStatus::Infeasible,
                x: Array1::zeros(n),
                iterations: iteration + 1,
                objective: F::zero(),
            };
        }
    }

    let objective = problem.objective(&x);
    QpSolution {
        status: QpStatus::MaxIterations,
        x,
        iterations: params.max_iterations,
        objective,
    }
}

/// Solve a problem without inequality constraints
///
/// The optimality conditions are linear, a single solve of
/// `[P, A^T; A, 0] [x; nu] = [-q; b]` produces the exact solution. A
/// singular system means no stationary point exists and the problem is
/// reported infeasible.
fn solve_stationarity<F: Float>(problem: &QpProblem<F>) -> QpSolution<F> {
    let n = problem.nvars();
    let k = problem.neq();

    let mut kkt = Array2::<F>::zeros((n + k, n + k));
    for i in 0..n {
        for j in 0..n {
            kkt[(i, j)] = problem.p[(i, j)];
        }
    }
    for r in 0..k {
        for j in 0..n {
            kkt[(n + r, j)] = problem.a[(r, j)];
            kkt[(j, n + r)] = problem.a[(r, j)];
        }
    }

    let mut rhs = Array1::<F>::zeros(n + k);
    for j in 0..n {
        rhs[j] = -problem.q[j];
    }
    for r in 0..k {
        rhs[n + r] = problem.b[r];
    }

    match LuFactor::compute(&kkt) {
        Some(factor) => {
            let x = factor.solve(&rhs).slice(s![..n]).to_owned();
            let objective = problem.objective(&x);
            QpSolution {
                status: QpStatus::Optimal,
                x,
                iterations: 1,
                objective,
            }
        }
        None => QpSolution {
            status: QpStatus::Infeasible,
            x: Array1::zeros(n),
            iterations: 0,
            objective: F::zero(),
        },
    }
}

/// Newton direction for one interior-point step
///
/// The complementarity and primal rows are folded into the dual row, the
/// reduced system is solved with the prefactored matrix and the slack and
/// multiplier directions are recovered by substitution. The predictor pass
/// runs with `sigma_gap = 0` and no corrector term, the corrector pass
/// feeds the element-wise predictor products back in.
#[allow(clippy::too_many_arguments)]
fn newton_step<F: Float>(
    problem: &QpProblem<F>,
    factor: &LuFactor<F>,
    r_dual: &Array1<F>,
    r_pri: &Array1<F>,
    r_eq: &Array1<F>,
    s: &Array1<F>,
    lambda: &Array1<F>,
    sigma_gap: F,
    corrector: Option<(&Array1<F>, &Array1<F>)>,
) -> (Array1<F>, Array1<F>, Array1<F>, Array1<F>) {
    let n = problem.nvars();
    let m = problem.nineq();
    let k = problem.neq();

    // per-constraint terms folded into the dual row
    let mut v = Array1::<F>::zeros(m);
    for i in 0..m {
        let corr = match corrector {
            Some((ds_aff, dl_aff)) => ds_aff[i] * dl_aff[i],
            None => F::zero(),
        };
        v[i] = (sigma_gap - s[i] * lambda[i] - corr) / s[i] + lambda[i] / s[i] * r_pri[i];
    }

    let mut rhs = Array1::<F>::zeros(n + k);
    for j in 0..n {
        let mut acc = -r_dual[j];
        for i in 0..m {
            acc -= problem.g[(i, j)] * v[i];
        }
        rhs[j] = acc;
    }
    for r in 0..k {
        rhs[n + r] = -r_eq[r];
    }

    let sol = factor.solve(&rhs);
    let dx = sol.slice(s![..n]).to_owned();
    let dnu = sol.slice(s![n..]).to_owned();

    // recover slack and multiplier directions
    let gdx = problem.g.dot(&dx);
    let mut ds = Array1::<F>::zeros(m);
    let mut dl = Array1::<F>::zeros(m);
    for i in 0..m {
        ds[i] = -r_pri[i] - gdx[i];
        dl[i] = v[i] + lambda[i] / s[i] * gdx[i];
    }

    (dx, ds, dl, dnu)
}

/// Largest step in `[0, 1]` keeping slacks and multipliers positive
fn max_step<F: Float>(
    s: &Array1<F>,
    ds: &Array1<F>,
    lambda: &Array1<F>,
    dl: &Array1<F>,
    tau: F,
) -> F {
    let mut alpha = F::one();
    for i in 0..s.len() {
        if ds[i] < F::zero() {
            alpha = alpha.min(-tau * s[i] / ds[i]);
        }
        if dl[i] < F::zero() {
            alpha = alpha.min(-tau * lambda[i] / dl[i]);
        }
    }
    alpha
}

fn inf_norm<F: Float>(v: ArrayView1<F>) -> F {
    v.iter().fold(F::zero(), |max, x| max.max(x.abs()))
}

/// LU factorization with partial pivoting
///
/// `lu` stores the unit-diagonal lower triangle below and the upper triangle
/// on and above the diagonal, `swaps[c]` records the row exchanged with `c`
/// during elimination.
struct LuFactor<F: Float> {
    lu: Array2<F>,
    swaps: Vec<usize>,
}

impl<F: Float> LuFactor<F> {
    /// Factorize a square matrix, returns `None` when it is numerically singular
    fn compute(a: &Array2<F>) -> Option<LuFactor<F>> {
        let n = a.nrows();
        let mut lu = a.clone();
        let mut swaps = vec![0; n];

        let scale = a.iter().fold(F::zero(), |max, v| max.max(v.abs()));
        let tiny = scale.max(F::one()) * F::cast(100.) * F::epsilon();

        for col in 0..n {
            let mut pivot_row = col;
            let mut pivot_val = lu[(col, col)].abs();
            for row in col + 1..n {
                let val = lu[(row, col)].abs();
                if val > pivot_val {
                    pivot_row = row;
                    pivot_val = val;
                }
            }
            if pivot_val <= tiny {
                return None;
            }

            swaps[col] = pivot_row;
            if pivot_row != col {
                for c in 0..n {
                    lu.swap((col, c), (pivot_row, c));
                }
            }

            let inv_pivot = F::one() / lu[(col, col)];
            for row in col + 1..n {
                let factor = lu[(row, col)] * inv_pivot;
                lu[(row, col)] = factor;
                for c in col + 1..n {
                    let sub = factor * lu[(col, c)];
                    lu[(row, c)] -= sub;
                }
            }
        }

        Some(LuFactor { lu, swaps })
    }

    /// Solve the factorized system for a single right-hand side
    fn solve(&self, rhs: &Array1<F>) -> Array1<F> {
        let n = self.swaps.len();
        let mut x = rhs.clone();

        for col in 0..n {
            x.swap(col, self.swaps[col]);
        }
        // forward substitution with the unit lower triangle
        for i in 0..n {
            for j in 0..i {
                let sub = self.lu[(i, j)] * x[j];
                x[i] -= sub;
            }
        }
        // backward substitution with the upper triangle
        for i in (0..n).rev() {
            for j in i + 1..n {
                let sub = self.lu[(i, j)] * x[j];
                x[i] -= sub;
            }
            x[i] /= self.lu[(i, i)];
        }

        x
    }
}
