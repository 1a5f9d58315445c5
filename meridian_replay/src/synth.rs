// meridian_replay/src/synth.rs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::config::SynthSection;
use crate::FixRecord;

/// Generates a noisy constant-velocity track: the same ground truth the
/// filter's motion model assumes, so the replay shows the estimate locking
/// on as fixes accumulate.
pub fn constant_velocity_track(
    cfg: &SynthSection,
    seed: u64,
) -> Result<Vec<FixRecord>, rand_distr::NormalError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, cfg.noise_std)?;

    let steps = (cfg.duration_seconds / cfg.fix_interval_seconds).ceil() as usize;
    let fixes = (0..=steps)
        .map(|i| {
            let t = i as f64 * cfg.fix_interval_seconds;
            FixRecord {
                t,
                x: cfg.start[0] + cfg.velocity[0] * t + noise.sample(&mut rng),
                y: cfg.start[1] + cfg.velocity[1] * t + noise.sample(&mut rng),
            }
        })
        .collect();
    Ok(fixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_the_track() {
        let cfg = SynthSection::default();
        let a = constant_velocity_track(&cfg, 7).unwrap();
        let b = constant_velocity_track(&cfg, 7).unwrap();
        assert_eq!(a.len(), b.len());
        assert!(a.iter().zip(&b).all(|(l, r)| l.t == r.t && l.x == r.x && l.y == r.y));
    }

    #[test]
    fn noiseless_track_follows_ground_truth() {
        let cfg = SynthSection {
            noise_std: 0.0,
            ..SynthSection::default()
        };
        let fixes = constant_velocity_track(&cfg, 0).unwrap();
        for fix in &fixes {
            assert_eq!(fix.x, cfg.start[0] + cfg.velocity[0] * fix.t);
            assert_eq!(fix.y, cfg.start[1] + cfg.velocity[1] * fix.t);
        }
    }

    #[test]
    fn negative_noise_std_is_rejected() {
        let cfg = SynthSection {
            noise_std: -1.0,
            ..SynthSection::default()
        };
        assert!(constant_velocity_track(&cfg, 0).is_err());
    }
}
