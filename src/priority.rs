//! Balance priorities for the cluster treap.
//!
//! Each node draws a priority once, at creation. Priorities follow a
//! geometric distribution: `P(priority > k) = 2^-k`. Only their relative order
//! matters; it keeps the expected tree height logarithmic.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Build the generator owned by a tree.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw a fresh node priority.
pub(crate) fn draw_priority<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    priority_from_uniform(rng.gen_range(0.0..1.0))
}

/// Map a uniform `u` in `[0, 1)` to `ceil(log2(1 / (1 - u)))`.
#[inline]
fn priority_from_uniform(u: f64) -> u32 {
    debug_assert!((0.0..1.0).contains(&u), "uniform draw out of range: {u}");
    // f64 has 53 mantissa bits, so the result never exceeds 53.
    (1.0 / (1.0 - u)).log2().ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_uniform() {
        assert_eq!(priority_from_uniform(0.0), 0);
        assert_eq!(priority_from_uniform(0.25), 1);
        assert_eq!(priority_from_uniform(0.5), 1);
        assert_eq!(priority_from_uniform(0.6), 2);
        assert_eq!(priority_from_uniform(0.75), 2);
        assert_eq!(priority_from_uniform(0.9), 4);
    }

    #[test]
    fn test_priorities_are_roughly_geometric() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws: Vec<u32> = (0..10_000).map(|_| draw_priority(&mut rng)).collect();

        assert!(draws.iter().all(|&p| p <= 53));
        // P(priority <= 1) = P(u <= 0.5) = 0.5
        let low = draws.iter().filter(|&&p| p <= 1).count() as f64 / draws.len() as f64;
        assert!((0.45..0.55).contains(&low), "fraction <= 1 was {low}");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = make_rng(Some(9));
        let mut b = make_rng(Some(9));
        for _ in 0..32 {
            assert_eq!(draw_priority(&mut a), draw_priority(&mut b));
        }
    }
}
