use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("cell out of bounds: {cell}")]
    CellOutOfBounds { cell: String },

    #[error("sheet layout does not match the character template:\n{details}")]
    SchemaMismatch { details: String },

    #[error(
        "the sheet URL `{url}` is invalid! Make sure you've shared it with the bot's \
         service account and that you double-check it! (If it has /copy or /edit at \
         the end, remove that!)"
    )]
    InvalidSheet { url: String },

    #[error("a character sheet is already linked to user {0}")]
    AlreadyLinked(u64),

    #[error("no character sheet linked to user {0}")]
    NotLinked(u64),

    #[error("unknown monster: {0}")]
    UnknownMonster(String),

    #[error("the monster directory has not been loaded")]
    DmSheetNotLoaded,

    #[error("invalid dice expression: {0}")]
    InvalidDice(String),

    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    #[error("container is full: {0}")]
    InventoryFull(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("'{item}' cannot be used on {target}")]
    WrongTarget { item: String, target: String },

    #[error("item is not usable: {0}")]
    ItemNotUsable(String),

    #[error("item '{0}' has both heal and damage effects")]
    ConflictingItemEffects(String),

    #[error("not configured: run 'charsheet init'")]
    NotConfigured,

    #[error(transparent)]
    Sheets(#[from] gsheets_client::SheetsClientError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
