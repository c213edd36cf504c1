pub mod cellref;
pub mod character;
pub mod config;
pub mod context;
pub mod dice;
pub mod error;
pub mod extractor;
pub mod inventory;
pub mod io;
pub mod monsterdex;
pub mod schema;
pub mod snapshot;
pub mod stats;
pub mod store;

pub use error::{CoreError, Result};
