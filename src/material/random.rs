use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Implements a Gaussian deviate sampler using the trigonometric Box-Muller method
///
/// Deviates are produced in independent pairs; the second deviate of each
/// pair is cached and returned by the next call. The generator state is
/// owned, so each evaluation context must hold its own sampler: sharing one
/// sampler across contexts makes the pairing depend on the call order.
///
/// Two samplers built with the same seed produce identical sequences.
pub struct GaussianDeviate {
    rng: StdRng,
    cached: Option<f64>,
}

impl GaussianDeviate {
    /// Allocates a new instance with a seeded uniform generator
    pub fn new(seed: u64) -> Self {
        GaussianDeviate {
            rng: StdRng::seed_from_u64(seed),
            cached: None,
        }
    }

    /// Draws the next deviate with the given mean and standard deviation
    pub fn sample(&mut self, mean: f64, std_dev: f64) -> f64 {
        match self.cached.take() {
            Some(deviate) => deviate * std_dev + mean,
            None => {
                // 1-u maps the uniform draw into (0,1] so the log stays finite
                let dist = f64::sqrt(-2.0 * f64::ln(1.0 - self.rng.gen::<f64>()));
                let angle = 2.0 * PI * self.rng.gen::<f64>();
                self.cached = Some(dist * f64::cos(angle));
                dist * f64::sin(angle) * std_dev + mean
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::GaussianDeviate;

    #[test]
    fn equal_seeds_give_identical_sequences() {
        let mut a = GaussianDeviate::new(123);
        let mut b = GaussianDeviate::new(123);
        let va: Vec<f64> = (0..6).map(|_| a.sample(0.0, 1.0)).collect();
        let vb: Vec<f64> = (0..6).map(|_| b.sample(0.0, 1.0)).collect();
        assert_eq!(va, vb);
    }

    #[test]
    fn shared_sampler_pairing_depends_on_call_order() {
        // two "points" sharing one sampler observe the two halves of a pair
        let mut shared = GaussianDeviate::new(7);
        let first = shared.sample(0.0, 1.0);
        let second = shared.sample(0.0, 1.0);
        assert!(first != second);

        // two points owning their own sampler (same seed) observe the same value
        let mut own_a = GaussianDeviate::new(7);
        let mut own_b = GaussianDeviate::new(7);
        assert_eq!(own_a.sample(0.0, 1.0), first);
        assert_eq!(own_b.sample(0.0, 1.0), first);
    }

    #[test]
    fn statistics_look_sane() {
        let mut sampler = GaussianDeviate::new(42);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| sampler.sample(0.0, 1.0)).collect();
        let mean = samples.iter().sum::<f64>() / (n as f64);
        let var = samples.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n as f64);
        assert!(f64::abs(mean) < 0.05);
        assert!(f64::abs(var - 1.0) < 0.1);

        let mut sampler = GaussianDeviate::new(42);
        let shifted: Vec<f64> = (0..n).map(|_| sampler.sample(5.0, 2.0)).collect();
        let mean = shifted.iter().sum::<f64>() / (n as f64);
        assert!(f64::abs(mean - 5.0) < 0.1);
    }
}
