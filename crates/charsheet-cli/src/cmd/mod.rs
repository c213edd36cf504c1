pub mod desc;
pub mod init;
pub mod link;
pub mod monster;
pub mod reload_dm_sheet;
pub mod roll;
pub mod serve;
pub mod state;
pub mod unlink;
