//! Shared bot context: one place owning the config, the Sheets client, the
//! user store, and the monster directory. Everything that used to be reached
//! through module globals is injected through an `Arc<BotContext>`.

use crate::character::{Character, PronounSet, VerbSet};
use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::extractor::{self, extract_character};
use crate::monsterdex::{MonsterDex, DM_TAB};
use crate::schema::Tab;
use crate::snapshot::SheetSnapshot;
use crate::store::UserStore;
use gsheets_client::SheetsClient;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub struct BotContext {
    pub config: Config,
    pub sheets: SheetsClient,
    store: Mutex<UserStore>,
    monsters: RwLock<Option<MonsterDex>>,
}

impl BotContext {
    /// Construct the context from a project root: load `charsheet.yaml` and
    /// the user data file, build the Sheets client from the configured key.
    pub fn init(root: &Path) -> Result<Arc<Self>> {
        let config = Config::load(root)?;
        let sheets = SheetsClient::new(config.auth());
        let store = UserStore::load(config.data_path(root))?;
        tracing::info!(entries = store.len(), "context initialized");
        Ok(Arc::new(Self {
            config,
            sheets,
            store: Mutex::new(store),
            monsters: RwLock::new(None),
        }))
    }

    /// Build a context from already-constructed parts (tests, servers with
    /// custom clients).
    pub fn from_parts(config: Config, sheets: SheetsClient, store: UserStore) -> Arc<Self> {
        Arc::new(Self {
            config,
            sheets,
            store: Mutex::new(store),
            monsters: RwLock::new(None),
        })
    }

    /// Flush the store before exit.
    pub async fn shutdown(&self) -> Result<()> {
        self.store.lock().await.force_save()
    }

    pub async fn with_store<T>(&self, f: impl FnOnce(&UserStore) -> T) -> T {
        f(&*self.store.lock().await)
    }

    async fn fetch_snapshot(&self, url: &str, tab: &str) -> Result<SheetSnapshot> {
        let (formatted, raw) = self.sheets.fetch_tab(url, tab).await?;
        Ok(SheetSnapshot::new(formatted, raw))
    }

    /// Fetch the three character tabs and extract a record. Backend failures
    /// come back as the user-facing invalid-sheet error.
    pub async fn import_character(
        &self,
        url: &str,
        pronoun_override: Option<PronounSet>,
        verb_override: Option<VerbSet>,
    ) -> Result<Character> {
        let result = async {
            let front = self.fetch_snapshot(url, Tab::Front.title()).await?;
            let back = self.fetch_snapshot(url, Tab::Back.title()).await?;
            let data = self.fetch_snapshot(url, Tab::Data.title()).await?;
            extract_character(url, &front, &back, &data, pronoun_override, verb_override)
        }
        .await;
        result.map_err(|e| extractor::collapse_load_error(url, e))
    }

    /// Link a sheet to a user id. Fails with [`CoreError::AlreadyLinked`] if
    /// the id already has a character; a failed import leaves no entry behind.
    pub async fn link_sheet(
        &self,
        id: u64,
        url: &str,
        pronoun_override: Option<PronounSet>,
        verb_override: Option<VerbSet>,
    ) -> Result<Character> {
        if self.store.lock().await.get(id).is_some() {
            return Err(CoreError::AlreadyLinked(id));
        }
        let character = self.import_character(url, pronoun_override, verb_override).await?;
        self.store
            .lock()
            .await
            .new_character(id, character.clone())?;
        tracing::info!(user = id, name = %character.name, "sheet linked");
        Ok(character)
    }

    /// Remove a user's character, flushing immediately.
    pub async fn unlink(&self, id: u64) -> Result<Character> {
        let mut store = self.store.lock().await;
        let character = store.remove(id)?.ok_or(CoreError::NotLinked(id))?;
        store.force_save()?;
        tracing::info!(user = id, name = %character.name, "sheet unlinked");
        Ok(character)
    }

    /// Clone of the character linked to `id`.
    pub async fn character(&self, id: u64) -> Result<Character> {
        self.store
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or(CoreError::NotLinked(id))
    }

    /// Replace a user's stored character (inventory changes and the like).
    pub async fn update_character(&self, id: u64, character: Character) -> Result<()> {
        let mut store = self.store.lock().await;
        if store.get(id).is_none() {
            return Err(CoreError::NotLinked(id));
        }
        store.set(id, character)
    }

    /// Fetch the DM sheet and swap in a fresh monster directory. Returns the
    /// number of entries.
    pub async fn reload_dm_sheet(&self) -> Result<usize> {
        if self.config.dm_sheet_url.is_empty() {
            return Err(CoreError::NotConfigured);
        }
        let snap = self
            .fetch_snapshot(&self.config.dm_sheet_url, DM_TAB)
            .await
            .map_err(|e| extractor::collapse_load_error(&self.config.dm_sheet_url, e))?;
        let dex = MonsterDex::from_snapshot(&snap)?;
        let count = dex.len();
        *self.monsters.write().await = Some(dex);
        tracing::info!(monsters = count, "DM sheet reloaded");
        Ok(count)
    }

    async fn ensure_monsters(&self) -> Result<()> {
        if self.monsters.read().await.is_none() {
            self.reload_dm_sheet().await?;
        }
        Ok(())
    }

    /// Look up a monster description, loading the directory on first use.
    pub async fn monster(&self, name: &str) -> Result<String> {
        self.ensure_monsters().await?;
        let guard = self.monsters.read().await;
        let dex = guard.as_ref().ok_or(CoreError::DmSheetNotLoaded)?;
        dex.lookup(name).map(str::to_string)
    }

    /// Sorted monster names, loading the directory on first use.
    pub async fn monster_names(&self) -> Result<Vec<String>> {
        self.ensure_monsters().await?;
        let guard = self.monsters.read().await;
        let dex = guard.as_ref().ok_or(CoreError::DmSheetNotLoaded)?;
        Ok(dex.names().into_iter().map(str::to_string).collect())
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

    fn character() -> Character {
        Character {
            sheet_url: "https://docs.google.com/spreadsheets/d/abc123".to_string(),
            name: "Keth Brightblade".to_string(),
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

    fn context(dir: &TempDir) -> Arc<BotContext> {
        let config = Config::default();
        let sheets = SheetsClient::new(config.auth());
        let store = UserStore::load(dir.path().join("userdata.yaml")).unwrap();
        BotContext::from_parts(config, sheets, store)
    }

    #[tokio::test]
    async fn init_requires_config() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            BotContext::init(dir.path()),
            Err(CoreError::NotConfigured)
        ));
        Config::default().save(dir.path()).unwrap();
        assert!(BotContext::init(dir.path()).is_ok());
    }

    #[tokio::test]
    async fn failed_link_is_invalid_sheet_and_leaves_store_empty() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        // nothing listens here, so every fetch fails at connect
        let sheets = SheetsClient::new(config.auth()).with_base_url("http://127.0.0.1:9");
        let store = UserStore::load(dir.path().join("userdata.yaml")).unwrap();
        let ctx = BotContext::from_parts(config, sheets, store);

        let url = "https://docs.google.com/spreadsheets/d/abc123";
        let err = ctx.link_sheet(7, url, None, None).await.unwrap_err();
        let CoreError::InvalidSheet { url: reported } = err else {
            panic!("expected InvalidSheet, got {err}");
        };
        assert_eq!(reported, url);
        ctx.with_store(|s| assert!(s.is_empty())).await;
        assert!(matches!(
            ctx.character(7).await,
            Err(CoreError::NotLinked(7))
        ));
    }

    #[tokio::test]
    async fn unlink_missing_is_not_linked() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        assert!(matches!(ctx.unlink(7).await, Err(CoreError::NotLinked(7))));
    }

    #[tokio::test]
    async fn character_roundtrip_through_store() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        ctx.with_store(|s| assert!(s.is_empty())).await;
        {
            let mut store = ctx.store.lock().await;
            store.new_character(7, character()).unwrap();
        }
        let c = ctx.character(7).await.unwrap();
        assert_eq!(c.name, "Keth Brightblade");
        let removed = ctx.unlink(7).await.unwrap();
        assert_eq!(removed.name, c.name);
        assert!(matches!(
            ctx.character(7).await,
            Err(CoreError::NotLinked(7))
        ));
    }

    #[tokio::test]
    async fn update_requires_existing_entry() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        assert!(matches!(
            ctx.update_character(9, character()).await,
            Err(CoreError::NotLinked(9))
        ));
    }

    #[tokio::test]
    async fn reload_dm_sheet_requires_url() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        assert!(matches!(
            ctx.reload_dm_sheet().await,
            Err(CoreError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn shutdown_flushes_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("userdata.yaml");
        let ctx = context(&dir);
        {
            let mut store = ctx.store.lock().await;
            store.set(1, character()).unwrap();
        }
        assert!(!path.exists());
        ctx.shutdown().await.unwrap();
        assert!(path.exists());
    }
}
