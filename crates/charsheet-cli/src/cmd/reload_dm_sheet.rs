use crate::output::print_json;
use charsheet_core::context::BotContext;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let ctx = BotContext::init(root)?;
        let count = ctx.reload_dm_sheet().await?;
        if json {
            print_json(&serde_json::json!({ "monsters": count }))?;
        } else {
            println!("DM sheet reloaded: {count} monsters.");
        }
        Ok(())
    })
}
