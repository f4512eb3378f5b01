use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Creates games and applies moves, keeping the store in sync with every accepted transition.
#[derive(Debug)]
pub struct GameService<S> {
    store: S,
    rng: SmallRng,
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self::with_seed(store, rand::random())
    }

    /// Service whose generated layouts are fully determined by `seed`.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self {
            store,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates a fresh layout for `config` and stores the new session under a newly minted id.
    pub fn create_game(&mut self, config: GameConfig) -> Result<GameSession> {
        let layout = RandomLayoutGenerator::new(self.rng.random()).generate(config)?;
        self.start_game(layout)
    }

    /// Stores a new session over an already generated layout.
    pub fn start_game(&mut self, layout: MineLayout) -> Result<GameSession> {
        let session = GameSession::new(GameId::new_v4(), layout);
        let key = self.store.create(&session)?;
        log::info!(
            "Created game {} (key {}): {}x{} with {} mines",
            session.id(),
            key,
            session.width(),
            session.height(),
            session.mine_count()
        );
        Ok(session)
    }

    /// Opens `coords` in the stored game `id`; a rejected move leaves the stored game as it was.
    pub fn make_move(&mut self, id: GameId, coords: Coord2) -> Result<GameSession> {
        let mut session = self.store.get_by_id(id)?;

        match session.open_cell(coords) {
            Ok(outcome) if outcome.ends_game() => {
                log::info!("Game {} finished by move {:?}: {:?}", id, coords, outcome);
            }
            Ok(outcome) => {
                log::debug!("Move {:?} in game {}: {:?}", coords, id, outcome);
            }
            Err(err) => {
                log::warn!("Rejected move {:?} in game {}: {}", coords, id, err);
                return Err(err);
            }
        }

        self.store.update(&session)?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_game_stores_hidden_session() {
        let mut service = GameService::with_seed(MemoryStore::new(), 3);

        let session = service.create_game(GameConfig::new(8, 6, 10).unwrap()).unwrap();

        assert_eq!(session.width(), 8);
        assert_eq!(session.height(), 6);
        assert_eq!(session.mine_count(), 10);
        assert!(!session.is_completed());
        assert_eq!(session.hidden_count(), 48);
        assert_eq!(service.store().get_by_id(session.id()), Ok(session));
    }

    #[test]
    fn create_game_rejects_full_board() {
        let mut service = GameService::new(MemoryStore::new());

        let result = service.create_game(GameConfig::new_unchecked(2, 2, 4));

        assert!(matches!(result, Err(GameError::InvalidConfiguration { .. })));
        assert!(service.store().is_empty());
    }

    #[test]
    fn make_move_persists_accepted_moves_only() {
        let mut service = GameService::new(MemoryStore::new());
        let layout = FixedLayoutGenerator::new(&[(2, 2)])
            .generate(GameConfig::new(3, 3, 1).unwrap())
            .unwrap();
        let created = service.start_game(layout).unwrap();

        let after_first = service.make_move(created.id(), (2, 1)).unwrap();
        assert_eq!(after_first.cell_at((2, 1)), Cell::Count(1));

        assert_eq!(
            service.make_move(created.id(), (2, 1)),
            Err(GameError::CellAlreadyOpen)
        );
        assert_eq!(service.store().get_by_id(created.id()), Ok(after_first));
    }

    #[test]
    fn winning_move_is_stored_as_completed() {
        let mut service = GameService::new(MemoryStore::new());
        let layout = MineLayout::from_mine_coords((3, 3), &[(2, 2)]).unwrap();
        let created = service.start_game(layout).unwrap();

        let won = service.make_move(created.id(), (0, 0)).unwrap();

        assert_eq!(won.state(), SessionState::Won);
        assert_eq!(service.store().get_by_id(created.id()), Ok(won));
    }

    #[test]
    fn start_game_cannot_receive_a_full_board() {
        let mut service = GameService::new(MemoryStore::new());

        let restored: core::result::Result<MineLayout, _> = serde_json::from_str(r#"[["X","X"]]"#);
        assert!(restored.is_err());
        assert!(matches!(
            MineLayout::from_cells(CellGrid::filled((1, 2), Cell::Mine)),
            Err(GameError::InvalidConfiguration { .. })
        ));

        // the last safe cell keeps a freshly started game in progress
        let layout = MineLayout::from_cells(
            CellGrid::from_rows(alloc::vec![alloc::vec![Cell::Mine, Cell::Count(1)]]).unwrap(),
        )
        .unwrap();
        let session = service.start_game(layout).unwrap();
        assert!(!session.is_completed());
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn make_move_on_unknown_game_is_not_found() {
        let mut service = GameService::new(MemoryStore::new());
        let id = GameId::new_v4();

        assert_eq!(service.make_move(id, (0, 0)), Err(GameError::NotFound(id)));
    }

    #[test]
    fn same_seed_creates_same_layouts() {
        let config = GameConfig::new(10, 10, 20).unwrap();
        let mut first = GameService::with_seed(MemoryStore::new(), 99);
        let mut second = GameService::with_seed(MemoryStore::new(), 99);

        let a = first.create_game(config).unwrap();
        let b = second.create_game(config).unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(a.mine_layout(), b.mine_layout());
    }
}
