//! A working-set subspace-extrapolation optimizer.
//!
//! This crate provides a local minimizer for smooth objectives that expose
//! both values and gradients. Instead of maintaining a dense quasi-Newton
//! matrix, the solver keeps a bounded, sorted working set of previously
//! evaluated points and fits a constrained linear model over their gradients
//! to extrapolate a promising next iterate.
//!
//! # Features
//! - Bounded working set of `(position, value, gradient)` triples, sorted by
//!   value, with a conditioning-driven eviction rule that always protects the
//!   current best point.
//! - Barycentric extrapolation through an extended Gram system: weights sum
//!   to one but may be negative, so the candidate can leave the convex hull
//!   of known points.
//! - A secant step-length controller with hard clamps, aggressive growth on
//!   flat curvature, and damping on predicted overshoot.
//! - Three interchangeable move generators (hybrid extrapolate-then-descend,
//!   pure extrapolation, plain gradient descent) tried in order each
//!   iteration.
//! - A sanitizing evaluator that replaces non-finite objective outputs with
//!   large-but-finite sentinels, so singularities in the objective degrade
//!   progress instead of crashing the run.
//!
//! # Example
//!
//! Minimize the sphere function from a non-trivial starting point.
//!
//! ```
//! use subspace_descent::{SubspaceDescent, SubspaceSolution};
//! use ndarray::{array, Array1};
//!
//! let sphere = |x: &Array1<f64>| -> (f64, Array1<f64>) { (x.dot(x), 2.0 * x) };
//!
//! let SubspaceSolution {
//!     final_point,
//!     final_value,
//!     ..
//! } = SubspaceDescent::new(array![3.0, 3.0], sphere)
//!     .with_k_max(10)
//!     .with_tolerance(1e-8)
//!     .run()
//!     .expect("optimization failed");
//!
//! assert!(final_value < 1e-6);
//! assert!(final_point.dot(&final_point).sqrt() < 1e-3);
//! ```

use nalgebra::{DMatrix, DVector};
use ndarray::Array1;

// Step-length clamps and update factors.
const ALPHA_MIN: f64 = 1e-12;
const ALPHA_MAX: f64 = 1e5;
const ALPHA_GROWTH: f64 = 5.0;
const ALPHA_DAMP: f64 = 0.7;
// A secant numerator below this carries no curvature information.
const CURVATURE_TOL: f64 = 1e-12;
// Model-fit gates.
const WEIGHT_SUM_TOL: f64 = 1e-12;
const WEIGHT_BOUND: f64 = 1e50;
const MODEL_SLACK: f64 = 1e-10;
// The extrapolated candidate may not travel further from the best point than
// this multiple of the largest pairwise distance in the working set.
const EXTRAPOLATION_REACH: f64 = 10.0;
// Below these, a direction or a step is treated as no movement at all.
const DIRECTION_TOL: f64 = 1e-14;
const STEP_TOL: f64 = 1e-14;
// Sentinel substitution for non-finite objective outputs.
const SANITIZE_SCALE: f64 = 1e3;
const SEED_PENALTY: f64 = 1e30;

#[inline]
fn norm(v: &Array1<f64>) -> f64 {
    v.dot(v).sqrt()
}

/// One evaluated point: position, objective value, and gradient.
#[derive(Debug, Clone)]
struct Point {
    x: Array1<f64>,
    fx: f64,
    grad: Array1<f64>,
}

impl Point {
    fn is_finite(&self) -> bool {
        self.fx.is_finite()
            && self.x.iter().all(|v| v.is_finite())
            && self.grad.iter().all(|v| v.is_finite())
    }
}

/// Paired objective/gradient call counts, incremented together because the
/// objective contract returns both in one call.
#[derive(Debug, Default, Clone, Copy)]
struct CallCounter {
    f_calls: usize,
    g_calls: usize,
}

impl CallCounter {
    fn record(&mut self) {
        self.f_calls += 1;
        self.g_calls += 1;
    }
}

/// The optimizer's memory: an ordered, capacity-bounded collection of
/// evaluated points, ascending by objective value.
///
/// Capacity is `k_max + 1`. The first entry is always the current best and is
/// never chosen for eviction while more than one point remains.
struct WorkingSet {
    points: Vec<Point>,
    k_max: usize,
}

impl WorkingSet {
    fn new(seed: Point, k_max: usize) -> Self {
        debug_assert!(
            seed.is_finite(),
            "working set seeded with a non-finite point"
        );
        Self {
            points: vec![seed],
            k_max,
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    fn best(&self) -> &Point {
        // Non-empty by construction: created from a seed, and eviction never
        // drains the last point.
        &self.points[0]
    }

    fn worst(&self) -> &Point {
        &self.points[self.points.len() - 1]
    }

    /// Inserts a point, keeping the set sorted and within capacity.
    ///
    /// Returns `false` without mutation if the point is not finite in all
    /// fields. A successful insertion returns `true` even when it triggers
    /// the eviction of a different point.
    fn add(&mut self, p: Point) -> bool {
        if !p.is_finite() {
            log::debug!("[subspace] rejected non-finite point (f = {:?})", p.fx);
            return false;
        }
        self.points.push(p);
        // total_cmp sorts NaN last; no such entry should survive
        // sanitization, this only keeps a defect visible instead of UB.
        self.points.sort_by(|a, b| a.fx.total_cmp(&b.fx));
        if self.points.len() > self.k_max + 1 {
            self.evict_one();
        }
        true
    }

    /// Removes the point selected by [`eviction_index`](Self::eviction_index).
    /// No-op when only the best point remains.
    fn evict_one(&mut self) {
        if self.points.len() <= 1 {
            return;
        }
        let idx = self.eviction_index();
        let dropped = self.points.remove(idx);
        log::debug!(
            "[subspace] evicted point {} (f = {:.3e}), {} remain",
            idx,
            dropped.fx,
            self.points.len()
        );
    }

    /// Chooses which point to discard: the removable index whose removal
    /// minimizes the condition number of the extended Gram matrix over the
    /// remaining gradients. Index 0 (the best point) is always protected.
    /// With fewer than 3 points no conditioning comparison is informative,
    /// so the worst point is chosen unconditionally.
    fn eviction_index(&self) -> usize {
        let len = self.points.len();
        if len < 3 {
            return len - 1;
        }
        let mut chosen = len - 1;
        let mut best_cond = f64::INFINITY;
        for candidate in 1..len {
            let rest: Vec<&Array1<f64>> = self
                .points
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != candidate)
                .map(|(_, p)| &p.grad)
                .collect();
            let cond = gram_condition(&rest);
            if cond < best_cond {
                best_cond = cond;
                chosen = candidate;
            }
        }
        chosen
    }

    fn max_pairwise_distance(&self) -> f64 {
        let mut max_dist = 0.0_f64;
        for (i, a) in self.points.iter().enumerate() {
            for b in self.points.iter().skip(i + 1) {
                max_dist = max_dist.max(norm(&(&a.x - &b.x)));
            }
        }
        max_dist
    }
}

/// Builds the bordered system `[[GᵗG, 1], [1ᵗ, 0]]` over the given gradients.
/// Solved against `[0; 1]`, it yields affine (sum-to-one) combination weights
/// that minimize the norm of the combined gradient.
fn extended_gram(grads: &[&Array1<f64>]) -> DMatrix<f64> {
    let k = grads.len();
    DMatrix::from_fn(k + 1, k + 1, |i, j| match (i < k, j < k) {
        (true, true) => grads[i].dot(grads[j]),
        (false, false) => 0.0,
        _ => 1.0,
    })
}

/// Condition number of the extended Gram matrix, used as a heuristic score
/// for eviction. Singular or non-finite spectra score as infinite.
fn gram_condition(grads: &[&Array1<f64>]) -> f64 {
    let sv = extended_gram(grads).singular_values();
    let mut s_max = f64::NEG_INFINITY;
    let mut s_min = f64::INFINITY;
    for &s in sv.iter() {
        s_max = s_max.max(s);
        s_min = s_min.min(s);
    }
    if !(s_min > 0.0) || !s_max.is_finite() {
        return f64::INFINITY;
    }
    s_max / s_min
}

/// An un-evaluated extrapolation candidate: the modeled position, the model
/// gradient at it, and the predicted objective value.
struct Extrapolation {
    x: Array1<f64>,
    grad: Array1<f64>,
    fx: f64,
}

/// Fits the constrained linear model over the working set.
///
/// On any failure (singular solve, degenerate weights, non-finite or
/// non-improving prediction) one point is evicted through the conditioning
/// rule and `None` is returned. Repeated failures therefore shrink the set
/// until the system becomes well-conditioned again.
fn fit_extrapolation(ws: &mut WorkingSet) -> Option<Extrapolation> {
    match try_fit(ws) {
        Some(model) => Some(model),
        None => {
            log::debug!(
                "[subspace] model fit failed with {} points; evicting one",
                ws.len()
            );
            ws.evict_one();
            None
        }
    }
}

fn try_fit(ws: &WorkingSet) -> Option<Extrapolation> {
    let k = ws.len();
    let n = ws.best().x.len();
    let grads: Vec<&Array1<f64>> = ws.iter().map(|p| &p.grad).collect();

    let system = extended_gram(&grads);
    let mut rhs = DVector::<f64>::zeros(k + 1);
    rhs[k] = 1.0;
    let solution = system.lu().solve(&rhs)?;

    let weight_sum: f64 = solution.rows(0, k).iter().sum();
    if !weight_sum.is_finite() || weight_sum.abs() <= WEIGHT_SUM_TOL {
        return None;
    }
    let weights: Vec<f64> = solution.rows(0, k).iter().map(|w| w / weight_sum).collect();
    if weights.iter().any(|w| !w.is_finite() || w.abs() > WEIGHT_BOUND) {
        return None;
    }

    let mut x_model = Array1::<f64>::zeros(n);
    let mut g_model = Array1::<f64>::zeros(n);
    for (w, p) in weights.iter().zip(ws.iter()) {
        x_model.scaled_add(*w, &p.x);
        g_model.scaled_add(*w, &p.grad);
    }

    // Quadratic-model value anchored at the current best point.
    let best = ws.best();
    let offset = &x_model - &best.x;
    let mut fx_model = best.fx + 0.5 * (best.grad.dot(&offset) + g_model.dot(&offset));

    if x_model.iter().any(|v| !v.is_finite())
        || g_model.iter().any(|v| !v.is_finite())
        || !fx_model.is_finite()
    {
        return None;
    }
    if fx_model > best.fx + MODEL_SLACK {
        // The model predicts no improvement over the best point; a symptom
        // of a bad fit rather than a converged one.
        return None;
    }

    // Extreme weights can throw the affine combination arbitrarily far out.
    // Clamp the travel distance relative to the working set's spread and
    // re-apply the value gates at the rescaled point.
    let spread = ws.max_pairwise_distance();
    let dist = norm(&offset);
    let reach = EXTRAPOLATION_REACH * spread;
    if spread > 0.0 && dist > reach {
        let scale = reach / dist;
        let clamped = offset.mapv(|v| v * scale);
        fx_model = best.fx + 0.5 * (best.grad.dot(&clamped) + g_model.dot(&clamped));
        x_model = &best.x + &clamped;
        if !fx_model.is_finite() || fx_model > best.fx + MODEL_SLACK {
            return None;
        }
    }

    Some(Extrapolation {
        x: x_model,
        grad: g_model,
        fx: fx_model,
    })
}

/// Scalar step-length state with a secant update rule.
///
/// Updated after every gradient-style evaluation, so an iteration whose
/// hybrid step commits a non-improving candidate and then falls back to
/// plain descent applies two updates: each evaluation carries usable
/// curvature information.
struct StepController {
    alpha: f64,
    gamma: f64,
}

impl StepController {
    fn new(initial_alpha: f64, gamma: f64) -> Self {
        Self {
            alpha: initial_alpha.clamp(ALPHA_MIN, ALPHA_MAX),
            gamma,
        }
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Updates the step length from the directional derivatives at the base
    /// point (`slope0`) and at the evaluated candidate (`slope_alpha`).
    ///
    /// When the secant numerator is too small to be informative the step is
    /// grown aggressively instead of dividing by near-zero curvature. When
    /// the 1-D quadratic model predicts no decrease at the current step, the
    /// step is damped, overriding the secant estimate.
    fn update(&mut self, base_fx: f64, slope0: f64, slope_alpha: f64) {
        let alpha = self.alpha;
        let numerator = slope_alpha - slope0;
        if numerator.abs() <= CURVATURE_TOL {
            self.alpha = (alpha * ALPHA_GROWTH).clamp(ALPHA_MIN, ALPHA_MAX);
            return;
        }
        let curvature = numerator / alpha;
        let mut next = -slope0 / curvature * self.gamma;
        let modeled = base_fx + alpha * slope0 + 0.5 * alpha * alpha * curvature;
        if !next.is_finite() || modeled >= base_fx {
            next = alpha * ALPHA_DAMP;
        }
        self.alpha = next.clamp(ALPHA_MIN, ALPHA_MAX);
    }
}

/// The result of one strategy attempt. `Success` and `Candidate` both carry
/// an evaluated, sanitized point; only `Success` satisfied the strategy's
/// own acceptance test. The driver commits either kind.
enum StepOutcome {
    Success(Point),
    Candidate(Point),
    Failure,
}

/// Evaluates the objective through the sanitizing wrapper.
///
/// A non-finite value is replaced by a penalty scaled to the working set's
/// current value spread, pushing the point toward rejection without
/// poisoning comparisons. A non-finite gradient is replaced by a vector
/// pointing away from the current best point, or zero when no direction can
/// be normalized safely. Finite outputs pass through unchanged.
fn evaluate<F>(obj_fn: &mut F, x: Array1<f64>, ws: &WorkingSet, counter: &mut CallCounter) -> Point
where
    F: FnMut(&Array1<f64>) -> (f64, Array1<f64>),
{
    let (raw_fx, raw_grad) = obj_fn(&x);
    counter.record();

    let fx = if raw_fx.is_finite() {
        raw_fx
    } else {
        let spread = ws.worst().fx - ws.best().fx;
        let penalty = spread * SANITIZE_SCALE + ws.worst().fx;
        log::debug!(
            "[subspace] non-finite value from objective; substituting penalty {:.3e}",
            penalty
        );
        if penalty.is_finite() {
            penalty
        } else {
            f64::MAX / 4.0
        }
    };

    let grad = if raw_grad.iter().all(|v| v.is_finite()) {
        raw_grad
    } else {
        log::debug!(
            "[subspace] non-finite gradient from objective; substituting outward direction"
        );
        let best = ws.best();
        let away = &x - &best.x;
        let away_norm = norm(&away);
        let best_norm = norm(&best.x);
        if away_norm > DIRECTION_TOL {
            let factor = SANITIZE_SCALE * best_norm / away_norm;
            away.mapv(|v| v * factor)
        } else {
            Array1::zeros(x.len())
        }
    };

    Point { x, fx, grad }
}

/// Plain adaptive gradient descent from the best point. Succeeds when a real
/// move occurred; the candidate is produced regardless of whether it
/// improves the objective, since ranking is left to working-set insertion.
fn gradient_step<F>(
    obj_fn: &mut F,
    ws: &WorkingSet,
    step: &mut StepController,
    counter: &mut CallCounter,
) -> StepOutcome
where
    F: FnMut(&Array1<f64>) -> (f64, Array1<f64>),
{
    let best = ws.best();
    let dir = -&best.grad;
    if norm(&dir) <= DIRECTION_TOL {
        return StepOutcome::Failure;
    }
    let slope0 = best.grad.dot(&dir);
    let base_x = best.x.clone();
    let base_fx = best.fx;
    let x_trial = &base_x + &(step.alpha() * &dir);

    let cand = evaluate(obj_fn, x_trial, ws, counter);
    step.update(base_fx, slope0, cand.grad.dot(&dir));

    if norm(&(&cand.x - &base_x)) > STEP_TOL {
        StepOutcome::Success(cand)
    } else {
        StepOutcome::Candidate(cand)
    }
}

/// Pure model extrapolation: fit, then evaluate the extrapolated position.
/// Succeeds when the evaluated value beats the current worst stored value,
/// a pragmatic test that the frontier genuinely advanced.
fn subspace_step<F>(obj_fn: &mut F, ws: &mut WorkingSet, counter: &mut CallCounter) -> StepOutcome
where
    F: FnMut(&Array1<f64>) -> (f64, Array1<f64>),
{
    let Some(model) = fit_extrapolation(ws) else {
        return StepOutcome::Failure;
    };
    let cand = evaluate(obj_fn, model.x, ws, counter);
    if cand.fx < ws.worst().fx {
        StepOutcome::Success(cand)
    } else {
        StepOutcome::Candidate(cand)
    }
}

/// The primary strategy: extrapolate without evaluating the raw candidate,
/// then take one adaptive descent step from it along the model gradient and
/// evaluate only the combined point. Saves one objective call per iteration
/// over extrapolating and descending with an intermediate evaluation.
fn hybrid_step<F>(
    obj_fn: &mut F,
    ws: &mut WorkingSet,
    step: &mut StepController,
    counter: &mut CallCounter,
) -> StepOutcome
where
    F: FnMut(&Array1<f64>) -> (f64, Array1<f64>),
{
    let Some(model) = fit_extrapolation(ws) else {
        return StepOutcome::Failure;
    };
    let dir = -&model.grad;
    if norm(&dir) <= DIRECTION_TOL {
        return StepOutcome::Failure;
    }
    // The base point is the un-evaluated extrapolation, so the curvature
    // terms use the model's own slope.
    let slope0 = -model.grad.dot(&model.grad);
    let x_trial = &model.x + &(step.alpha() * &dir);

    let cand = evaluate(obj_fn, x_trial, ws, counter);
    step.update(model.fx, slope0, cand.grad.dot(&dir));

    if cand.fx < ws.worst().fx {
        StepOutcome::Success(cand)
    } else {
        StepOutcome::Candidate(cand)
    }
}

/// An error type for the only fatal boundary: an unusable seed.
///
/// Every mid-run numerical pathology is recovered through sanitization or
/// eviction and never surfaces as an error.
#[derive(Debug, thiserror::Error)]
pub enum SubspaceError {
    #[error("the initial point contains a non-finite coordinate")]
    NonFiniteSeed,
    #[error("the objective returned a non-finite gradient at the initial point")]
    NonFiniteSeedGradient,
}

/// How a run ended. Exhausting the iteration budget is a normal termination,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The best gradient norm or the best value fell below the tolerance.
    Converged,
    /// No strategy could produce a candidate in one full iteration.
    Stalled,
    /// The maximum iteration count was reached.
    IterationBudget,
}

/// A summary of a finished optimization run.
#[derive(Debug)]
pub struct SubspaceSolution {
    /// The best point found.
    pub final_point: Array1<f64>,
    /// The objective value at the best point.
    pub final_value: f64,
    /// The gradient norm at the best point.
    pub final_gradient_norm: f64,
    /// Best value after the seed evaluation and after each committing
    /// iteration. Non-increasing by construction.
    pub history: Vec<f64>,
    /// The number of iterations performed.
    pub iterations: usize,
    /// The total number of objective value evaluations.
    pub func_evals: usize,
    /// The total number of gradient evaluations.
    pub grad_evals: usize,
    /// Why the run stopped.
    pub termination: TerminationReason,
}

/// A configurable working-set subspace-extrapolation solver.
pub struct SubspaceDescent<ObjFn> {
    x0: Array1<f64>,
    k_max: usize,
    max_iterations: usize,
    tolerance: f64,
    initial_alpha: f64,
    gamma: f64,
    obj_fn: ObjFn,
}

impl<ObjFn> SubspaceDescent<ObjFn>
where
    ObjFn: FnMut(&Array1<f64>) -> (f64, Array1<f64>),
{
    /// Creates a new solver.
    ///
    /// # Arguments
    /// * `x0` - The initial guess for the minimum.
    /// * `obj_fn` - The objective function which returns a tuple `(value, gradient)`.
    pub fn new(x0: Array1<f64>, obj_fn: ObjFn) -> Self {
        Self {
            x0,
            k_max: 10,
            max_iterations: 1000,
            tolerance: 1e-10,
            initial_alpha: 1e-3,
            gamma: 1.0,
            obj_fn,
        }
    }

    /// Sets the working-set capacity parameter (capacity is `k_max + 1`,
    /// default: 10). Bounds the model-fit dimensionality and memory.
    pub fn with_k_max(mut self, k_max: usize) -> Self {
        self.k_max = k_max.max(1);
        self
    }

    /// Sets the maximum number of iterations (default: 1000).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance on the best gradient norm and the best
    /// value (default: 1e-10).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the initial step length, clamped to `[1e-12, 1e5]` (default: 1e-3).
    pub fn with_initial_alpha(mut self, initial_alpha: f64) -> Self {
        self.initial_alpha = initial_alpha;
        self
    }

    /// Sets the damping factor applied to the secant step estimate
    /// (default: 1.0).
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        if gamma.is_finite() && gamma > 0.0 {
            self.gamma = gamma;
        }
        self
    }

    /// Executes the optimization.
    ///
    /// Returns an error only when the seed is unusable: a non-finite initial
    /// coordinate, or a non-finite gradient at the initial point. A
    /// non-finite initial *value* with a finite gradient is replaced by a
    /// large penalty so that runs started inside a singular region of the
    /// objective can walk out of it.
    pub fn run(&mut self) -> Result<SubspaceSolution, SubspaceError> {
        if self.x0.iter().any(|v| !v.is_finite()) {
            return Err(SubspaceError::NonFiniteSeed);
        }
        let mut counter = CallCounter::default();
        let (seed_fx, seed_grad) = (self.obj_fn)(&self.x0);
        counter.record();
        if seed_grad.iter().any(|v| !v.is_finite()) {
            return Err(SubspaceError::NonFiniteSeedGradient);
        }
        let seed_fx = if seed_fx.is_finite() {
            seed_fx
        } else {
            log::warn!(
                "[subspace] non-finite value at the initial point; starting from a {:.1e} penalty",
                SEED_PENALTY
            );
            SEED_PENALTY
        };

        let mut ws = WorkingSet::new(
            Point {
                x: self.x0.clone(),
                fx: seed_fx,
                grad: seed_grad,
            },
            self.k_max,
        );
        let mut step = StepController::new(self.initial_alpha, self.gamma);
        let mut history = vec![ws.best().fx];
        let mut iterations = 0usize;
        let mut termination = TerminationReason::IterationBudget;

        if self.converged(&ws) {
            termination = TerminationReason::Converged;
        } else {
            for _ in 0..self.max_iterations {
                iterations += 1;
                let mut committed = false;

                let hybrid_success =
                    match hybrid_step(&mut self.obj_fn, &mut ws, &mut step, &mut counter) {
                        StepOutcome::Success(p) => {
                            committed |= ws.add(p);
                            true
                        }
                        StepOutcome::Candidate(p) => {
                            committed |= ws.add(p);
                            false
                        }
                        StepOutcome::Failure => false,
                    };

                if !hybrid_success {
                    let mut produced = false;
                    let subspace_success =
                        match subspace_step(&mut self.obj_fn, &mut ws, &mut counter) {
                            StepOutcome::Success(p) => {
                                committed |= ws.add(p);
                                produced = true;
                                true
                            }
                            StepOutcome::Candidate(p) => {
                                committed |= ws.add(p);
                                produced = true;
                                false
                            }
                            StepOutcome::Failure => false,
                        };
                    if !subspace_success {
                        match gradient_step(&mut self.obj_fn, &ws, &mut step, &mut counter) {
                            StepOutcome::Success(p) | StepOutcome::Candidate(p) => {
                                committed |= ws.add(p);
                                produced = true;
                            }
                            StepOutcome::Failure => {}
                        }
                    }
                    if !produced {
                        if committed {
                            history.push(ws.best().fx);
                        }
                        log::info!(
                            "[subspace] no strategy produced a candidate at iteration {}; stalled",
                            iterations
                        );
                        termination = TerminationReason::Stalled;
                        break;
                    }
                }

                if committed {
                    history.push(ws.best().fx);
                }
                if self.converged(&ws) {
                    termination = TerminationReason::Converged;
                    break;
                }
            }
        }

        let best = ws.best();
        log::info!(
            "[subspace] finished ({:?}) after {} iterations: f = {:.6e}, |g| = {:.3e}, {} evaluations",
            termination,
            iterations,
            best.fx,
            norm(&best.grad),
            counter.f_calls
        );
        Ok(SubspaceSolution {
            final_point: best.x.clone(),
            final_value: best.fx,
            final_gradient_norm: norm(&best.grad),
            history,
            iterations,
            func_evals: counter.f_calls,
            grad_evals: counter.g_calls,
            termination,
        })
    }

    fn converged(&self, ws: &WorkingSet) -> bool {
        let best = ws.best();
        norm(&best.grad) < self.tolerance || best.fx < self.tolerance
    }
}

/// Convenience entry point with the solver's standard defaults.
///
/// Equivalent to building a [`SubspaceDescent`] with the given knobs and
/// calling [`run`](SubspaceDescent::run).
pub fn optimize<F>(
    loss: F,
    x_initial: Array1<f64>,
    k_max: usize,
    max_iterations: usize,
    tolerance: f64,
) -> Result<SubspaceSolution, SubspaceError>
where
    F: FnMut(&Array1<f64>) -> (f64, Array1<f64>),
{
    let mut solver = SubspaceDescent::new(x_initial, loss)
        .with_k_max(k_max)
        .with_max_iterations(max_iterations)
        .with_tolerance(tolerance);
    solver.run()
}
