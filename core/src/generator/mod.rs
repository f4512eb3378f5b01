use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// Generator that always yields the same, explicitly placed mines.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayoutGenerator<'a> {
    mines: &'a [Coord2],
}

impl<'a> FixedLayoutGenerator<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }
}

impl LayoutGenerator for FixedLayoutGenerator<'_> {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;
        let layout = MineLayout::from_mine_coords(config.shape(), self.mines)?;
        if layout.mine_count() != config.mines {
            return Err(GameError::config("mine positions do not match mine count"));
        }
        Ok(layout)
    }
}
