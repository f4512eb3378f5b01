use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random generation strategy: mines are placed by rejection sampling over uniformly random cells.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator<R = SmallRng> {
    rng: R,
}

impl RandomLayoutGenerator<SmallRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    /// Generator backed by a freshly seeded random source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl<R: Rng> RandomLayoutGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LayoutGenerator for RandomLayoutGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<MineLayout> {
        // rejection sampling only terminates when at least one cell stays safe
        config.validate()?;

        let mut mine_mask: Array2<bool> = Array2::default(config.shape().to_nd_index());
        let mut mines_placed = 0;
        let mut collisions: u64 = 0;

        while mines_placed < config.mines {
            let coords: Coord2 = (
                self.rng.random_range(0..config.height),
                self.rng.random_range(0..config.width),
            );
            let tile = &mut mine_mask[coords.to_nd_index()];
            if *tile {
                log::trace!("Sampled {:?} twice, retrying", coords);
                collisions += 1;
                continue;
            }
            *tile = true;
            mines_placed += 1;
        }

        log::debug!(
            "Generated {}x{} layout with {} mines ({} sampling collisions)",
            config.width,
            config.height,
            mines_placed,
            collisions
        );
        Ok(MineLayout::from_mine_mask(mine_mask))
    }
}
