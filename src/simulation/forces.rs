//! Force / acceleration contributors for the orbit engine
//!
//! Defines the acceleration trait, the set that sums contributors, and
//! direct Newtonian gravity

use crate::simulation::states::{System, NVec2};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Add every term's contribution onto `out`
    /// - `out` is NOT zeroed; callers reset it first
    pub fn accumulate_accels(&self, sys: &System, out: &mut [NVec2]) {
        for term in &self.terms {
            term.acceleration(sys, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Acceleration source operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]);
}

/// Newtonian gravity between every pair of bodies
///
/// Coincident bodies (zero separation) exert no force on each other.
/// `eps2` is an optional Plummer softening added to the squared separation
/// of non-coincident pairs; zero gives the plain inverse-square law.
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();

        // Each unordered pair (i, j), i < j, feeds both bodies
        for i in 0..n {
            let xi = sys.bodies[i].x;
            let mi = sys.bodies[i].m;

            for j in (i + 1)..n {
                let xj = sys.bodies[j].x;
                let mj = sys.bodies[j].m;

                // displacement from i to j: i is pulled along +r, j along -r
                let r = xj - xi;
                let r2 = r.dot(&r);
                if r2 == 0.0 {
                    continue;
                }

                let d2 = r2 + self.eps2;
                let inv_r = d2.sqrt().recip();
                let coef = self.G * inv_r * inv_r * inv_r;

                // a_i = F / m_i = G m_j r / d^3, a_j likewise with -r
                out[i] += coef * mj * r;
                out[j] -= coef * mi * r;
            }
        }
    }
}
