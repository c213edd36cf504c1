use crate::character::Character;
use crate::error::{CoreError, Result};
use crate::io::atomic_write;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Mutations are batched: the store rewrites its backing file after this many
/// pending writes, or immediately on [`UserStore::force_save`].
pub const FLUSH_EVERY: u32 = 5;

/// Characters keyed by external user id, persisted as one YAML file.
///
/// Exclusive access is the caller's job; the context holds the store behind
/// a `tokio::sync::Mutex`, so a flush can never interleave with a mutation.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    characters: BTreeMap<u64, Character>,
    pending: u32,
}

impl UserStore {
    /// Load the store, starting empty when the file does not exist yet.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let characters = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_yaml::from_str(&data)?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            characters,
            pending: 0,
        })
    }

    pub fn get(&self, id: u64) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &Character)> {
        self.characters.iter().map(|(id, c)| (*id, c))
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Writes since the last flush.
    pub fn pending_writes(&self) -> u32 {
        self.pending
    }

    /// Insert or replace, flushing once enough writes have accumulated.
    pub fn set(&mut self, id: u64, character: Character) -> Result<()> {
        self.characters.insert(id, character);
        self.mutated()
    }

    /// Remove an entry; counts as a mutation when something was removed.
    pub fn remove(&mut self, id: u64) -> Result<Option<Character>> {
        let removed = self.characters.remove(&id);
        if removed.is_some() {
            self.mutated()?;
        }
        Ok(removed)
    }

    /// Link a new character, refusing to overwrite an existing entry. The
    /// insert is flushed immediately.
    pub fn new_character(&mut self, id: u64, character: Character) -> Result<()> {
        if self.characters.contains_key(&id) {
            return Err(CoreError::AlreadyLinked(id));
        }
        self.characters.insert(id, character);
        self.force_save()
    }

    /// Unconditional flush.
    pub fn force_save(&mut self) -> Result<()> {
        self.flush()
    }

    fn mutated(&mut self) -> Result<()> {
        self.pending += 1;
        if self.pending >= FLUSH_EVERY {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let data = serde_yaml::to_string(&self.characters)?;
        atomic_write(&self.path, data.as_bytes())?;
        self.pending = 0;
        tracing::debug!(path = %self.path.display(), entries = self.characters.len(), "store flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{PronounSet, VerbSet};
    use crate::inventory::Inventory;
    use crate::stats::StatBlock;
    use chrono::Utc;
    use tempfile::TempDir;

    fn character(name: &str) -> Character {
        Character {
            sheet_url: "https://docs.google.com/spreadsheets/d/abc123".to_string(),
            name: name.to_string(),
            race: "Half-Elf".to_string(),
            size: "medium".to_string(),
            hair: "silver".to_string(),
            eyes: "green".to_string(),
            height: "5'9\"".to_string(),
            weight: "152 lbs".to_string(),
            age: 27,
            level: 4,
            gender: "female".to_string(),
            image: String::new(),
            feet_per_move: 30,
            pronouns: PronounSet::feminine(),
            verbs: VerbSet::singular(),
            pronoun_override: None,
            verb_override: None,
            stats: StatBlock::default(),
            inventory: Inventory::default(),
            linked_at: Utc::now(),
        }
    }

    #[test]
    fn load_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::load(dir.path().join("userdata.yaml")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn flushes_after_five_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("userdata.yaml");
        let mut store = UserStore::load(&path).unwrap();

        for i in 0..4 {
            store.set(i, character("Keth")).unwrap();
            assert!(!path.exists(), "no flush before the fifth write");
        }
        store.set(4, character("Keth")).unwrap();
        assert!(path.exists());
        assert_eq!(store.pending_writes(), 0);
    }

    #[test]
    fn force_save_resets_counter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("userdata.yaml");
        let mut store = UserStore::load(&path).unwrap();
        store.set(1, character("Keth")).unwrap();
        assert_eq!(store.pending_writes(), 1);
        store.force_save().unwrap();
        assert_eq!(store.pending_writes(), 0);
        assert!(path.exists());
    }

    #[test]
    fn new_character_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("userdata.yaml");
        let mut store = UserStore::load(&path).unwrap();
        store.new_character(7, character("Keth")).unwrap();
        let err = store.new_character(7, character("Impostor")).unwrap_err();
        assert!(matches!(err, CoreError::AlreadyLinked(7)));
        assert_eq!(store.get(7).unwrap().name, "Keth");
    }

    #[test]
    fn roundtrips_through_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("userdata.yaml");
        {
            let mut store = UserStore::load(&path).unwrap();
            store.new_character(42, character("Keth")).unwrap();
        }
        let store = UserStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(42).unwrap().name, "Keth");
    }

    #[test]
    fn remove_of_absent_id_is_not_a_mutation() {
        let dir = TempDir::new().unwrap();
        let mut store = UserStore::load(dir.path().join("userdata.yaml")).unwrap();
        assert!(store.remove(99).unwrap().is_none());
        assert_eq!(store.pending_writes(), 0);
    }
}
