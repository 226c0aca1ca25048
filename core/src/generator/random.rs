use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random generation driven by an injected RNG.
///
/// Grids are resampled until one has a shape-bearing cell whenever the target must come from the grid,
/// giving up after `max_regenerations` tries.
#[derive(Clone, Debug)]
pub struct RandomChallengeGenerator<R = SmallRng> {
    rng: R,
}

impl RandomChallengeGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomChallengeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    fn sample_grid(&mut self, config: &ChallengeConfig) -> Grid {
        let probability = config.shape_probability();
        let rng = &mut self.rng;
        Grid::from_fn(config.size, |_| {
            if rng.random_bool(probability) {
                Cell::marked(pick(rng, &config.shapes), pick(rng, &config.tints))
            } else {
                Cell::Empty
            }
        })
    }

    fn target_from_grid(&mut self, grid: &Grid, variant: Variant) -> Option<TargetCriterion> {
        let count = grid.shape_bearing_count();
        if count == 0 {
            return None;
        }
        let nth = usize::from(self.rng.random_range(0..count));
        let glyph = grid.iter().filter_map(|(_, cell)| cell.glyph()).nth(nth)?;
        Some(match variant {
            Variant::ShapeOnly => TargetCriterion::shape_only(glyph.shape),
            Variant::ShapeAndTint => TargetCriterion::shape_and_tint(glyph.shape, glyph.tint),
        })
    }
}

impl<R: Rng> ChallengeGenerator for RandomChallengeGenerator<R> {
    fn generate(&mut self, config: &ChallengeConfig) -> Result<Challenge> {
        config.validate()?;

        if !config.needs_satisfiable_target() {
            let grid = self.sample_grid(config);
            let target = TargetCriterion::shape_only(pick(&mut self.rng, &config.shapes));
            let challenge = Challenge::new(grid, target);
            if !challenge.is_satisfiable() {
                log::debug!("No cell matches target {}, challenge cannot be passed", target);
            }
            return Ok(challenge);
        }

        for attempt in 1..=config.max_regenerations {
            let grid = self.sample_grid(config);
            if let Some(target) = self.target_from_grid(&grid, config.variant) {
                log::debug!("Generated challenge for {} on attempt {}", target, attempt);
                return Ok(Challenge::new(grid, target));
            }
            log::debug!("Generated grid has no shapes, regenerating (attempt {})", attempt);
        }

        log::warn!(
            "Gave up after {} empty grids, shape probability is {}",
            config.max_regenerations,
            config.shape_probability()
        );
        Err(ChallengeError::EmptyGrid {
            attempts: config.max_regenerations,
        })
    }
}

/// Uniform pick, `items` is non-empty after config validation.
fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const SEEDS: core::ops::Range<u64> = 0..200;

    #[test]
    fn same_seed_same_challenge() {
        let config = ChallengeConfig::default();

        let a = RandomChallengeGenerator::from_seed(42).generate(&config).unwrap();
        let b = RandomChallengeGenerator::from_seed(42).generate(&config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn grid_has_requested_cell_count() {
        let config = ChallengeConfig::new(GridSize::new(3, 7), Variant::ShapeAndTint);
        let challenge = RandomChallengeGenerator::from_seed(1).generate(&config).unwrap();

        assert_eq!(challenge.grid.total_cells(), 21);
        assert_eq!(challenge.grid.iter().count(), 21);
    }

    #[test]
    fn shape_and_tint_presence_agree() {
        for variant in [Variant::ShapeOnly, Variant::ShapeAndTint] {
            let config = ChallengeConfig::new(GridSize::new(4, 4), variant);
            for seed in SEEDS {
                let challenge = RandomChallengeGenerator::from_seed(seed)
                    .generate(&config)
                    .unwrap();
                for (_, cell) in challenge.grid.iter() {
                    assert_eq!(cell.has_shape(), cell.shape().is_some());
                    assert_eq!(cell.has_shape(), cell.tint().is_some());
                }
            }
        }
    }

    #[test]
    fn shape_and_tint_variant_is_always_solvable() {
        let config = ChallengeConfig::default();
        for seed in SEEDS {
            let challenge = RandomChallengeGenerator::from_seed(seed)
                .generate(&config)
                .unwrap();
            assert!(challenge.target.tint.is_some());
            assert!(!challenge.correct_set().is_empty(), "seed {}", seed);
        }
    }

    #[test]
    fn tiny_grid_is_regenerated_until_solvable() {
        let mut config = ChallengeConfig::new(GridSize::new(1, 1), Variant::ShapeAndTint);
        config.shape_probability = Some(0.05);
        config.max_regenerations = CellCount::MAX;

        for seed in 0..20 {
            let challenge = RandomChallengeGenerator::from_seed(seed)
                .generate(&config)
                .unwrap();
            assert!(challenge.grid[0].has_shape());
            assert_eq!(challenge.correct_set(), Selection::from([0]));
        }
    }

    #[test]
    fn zero_probability_fails_loudly_after_cap() {
        let mut config = ChallengeConfig::default();
        config.shape_probability = Some(0.0);
        config.max_regenerations = 5;

        let result = RandomChallengeGenerator::from_seed(7).generate(&config);

        assert_eq!(result, Err(ChallengeError::EmptyGrid { attempts: 5 }));
    }

    #[test]
    fn shape_only_target_ignores_grid_contents() {
        let mut config = ChallengeConfig::new(GridSize::new(4, 4), Variant::ShapeOnly);
        config.shape_probability = Some(0.0);

        let challenge = RandomChallengeGenerator::from_seed(3).generate(&config).unwrap();

        assert_eq!(challenge.grid.shape_bearing_count(), 0);
        assert_eq!(challenge.target.tint, None);
        assert!(!challenge.is_satisfiable());
    }

    #[test]
    fn shape_only_can_be_made_satisfiable() {
        let mut config = ChallengeConfig::new(GridSize::new(2, 2), Variant::ShapeOnly);
        config.require_satisfiable = true;

        for seed in SEEDS {
            let challenge = RandomChallengeGenerator::from_seed(seed)
                .generate(&config)
                .unwrap();
            assert_eq!(challenge.target.tint, None);
            assert!(challenge.is_satisfiable(), "seed {}", seed);
        }
    }

    #[test]
    fn restricted_enumerations_are_honored() {
        let mut config = ChallengeConfig::default();
        config.shapes = vec![Shape::Circle];
        config.tints = vec![Tint::Green];
        config.shape_probability = Some(1.0);

        let challenge = RandomChallengeGenerator::from_seed(11).generate(&config).unwrap();

        assert!(
            challenge
                .grid
                .iter()
                .all(|(_, cell)| cell == Cell::marked(Shape::Circle, Tint::Green))
        );
        assert_eq!(
            challenge.target,
            TargetCriterion::shape_and_tint(Shape::Circle, Tint::Green)
        );
        assert_eq!(challenge.correct_set().len(), 16);
    }

    #[test]
    fn invalid_config_is_rejected_before_sampling() {
        let mut config = ChallengeConfig::default();
        config.tints.clear();

        assert_eq!(
            RandomChallengeGenerator::from_seed(0).generate(&config),
            Err(ChallengeError::EmptyTintSet)
        );
    }
}
