use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::*;

/// Storage-internal auto-increment key, unrelated to [`GameId`].
pub type StoreKey = u64;

/// Persistence collaborator for game sessions.
pub trait GameStore {
    /// Stores a new session and returns its storage key.
    fn create(&mut self, session: &GameSession) -> Result<StoreKey>;

    fn get(&self, key: StoreKey) -> Result<Option<GameSession>>;

    /// Looks a session up by its game id, failing with [`GameError::NotFound`].
    fn get_by_id(&self, id: GameId) -> Result<GameSession>;

    fn list(&self) -> Result<Vec<GameSession>>;

    /// Overwrites a stored session, failing with [`GameError::NotFound`] when it was never created.
    fn update(&mut self, session: &GameSession) -> Result<()>;

    fn delete(&mut self, id: GameId) -> Result<()>;
}

#[derive(Clone, Debug)]
struct StoredGame {
    key: StoreKey,
    json: String,
}

/// In-memory store that keeps every session in its serialized record form.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    games: HashMap<GameId, StoredGame>,
    keys: HashMap<StoreKey, GameId>,
    last_key: StoreKey,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn encode(session: &GameSession) -> Result<String> {
        serde_json::to_string(session).map_err(|err| GameError::Storage(err.to_string()))
    }

    fn decode(json: &str) -> Result<GameSession> {
        serde_json::from_str(json).map_err(|err| GameError::Storage(err.to_string()))
    }
}

impl GameStore for MemoryStore {
    fn create(&mut self, session: &GameSession) -> Result<StoreKey> {
        let id = session.id();
        if self.games.contains_key(&id) {
            return Err(GameError::AlreadyExists(id));
        }

        let json = Self::encode(session)?;
        self.last_key += 1;
        let key = self.last_key;
        self.games.insert(id, StoredGame { key, json });
        self.keys.insert(key, id);
        log::debug!("Stored game {} under key {}", id, key);
        Ok(key)
    }

    fn get(&self, key: StoreKey) -> Result<Option<GameSession>> {
        self.keys
            .get(&key)
            .and_then(|id| self.games.get(id))
            .map(|stored| Self::decode(&stored.json))
            .transpose()
    }

    fn get_by_id(&self, id: GameId) -> Result<GameSession> {
        let stored = self.games.get(&id).ok_or(GameError::NotFound(id))?;
        Self::decode(&stored.json)
    }

    fn list(&self) -> Result<Vec<GameSession>> {
        let mut stored: Vec<_> = self.games.values().collect();
        stored.sort_by_key(|stored| stored.key);
        stored
            .into_iter()
            .map(|stored| Self::decode(&stored.json))
            .collect()
    }

    fn update(&mut self, session: &GameSession) -> Result<()> {
        let id = session.id();
        let json = Self::encode(session)?;
        let stored = self.games.get_mut(&id).ok_or(GameError::NotFound(id))?;
        stored.json = json;
        Ok(())
    }

    fn delete(&mut self, id: GameId) -> Result<()> {
        let stored = self.games.remove(&id).ok_or(GameError::NotFound(id))?;
        self.keys.remove(&stored.key);
        log::debug!("Deleted game {} with key {}", id, stored.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        GameSession::new(GameId::new_v4(), layout)
    }

    #[test]
    fn create_assigns_increasing_keys() {
        let mut store = MemoryStore::new();
        let first = session();
        let second = session();

        assert_eq!(store.create(&first), Ok(1));
        assert_eq!(store.create(&second), Ok(2));
        assert_eq!(store.get(1), Ok(Some(first.clone())));
        assert_eq!(store.get(3), Ok(None));
        assert_eq!(store.list(), Ok(alloc::vec![first, second]));
    }

    #[test]
    fn create_rejects_duplicate_ids() {
        let mut store = MemoryStore::new();
        let game = session();
        store.create(&game).unwrap();

        assert_eq!(store.create(&game), Err(GameError::AlreadyExists(game.id())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_replaces_stored_session() {
        let mut store = MemoryStore::new();
        let mut game = session();
        store.create(&game).unwrap();

        game.open_cell((2, 2)).unwrap();
        store.update(&game).unwrap();

        assert_eq!(store.get_by_id(game.id()), Ok(game));
    }

    #[test]
    fn missing_games_are_not_found() {
        let mut store = MemoryStore::new();
        let game = session();

        assert_eq!(store.get_by_id(game.id()), Err(GameError::NotFound(game.id())));
        assert_eq!(store.update(&game), Err(GameError::NotFound(game.id())));
        assert_eq!(store.delete(game.id()), Err(GameError::NotFound(game.id())));
    }

    #[test]
    fn delete_removes_both_lookups() {
        let mut store = MemoryStore::new();
        let game = session();
        let key = store.create(&game).unwrap();

        store.delete(game.id()).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.get(key), Ok(None));
    }
}
