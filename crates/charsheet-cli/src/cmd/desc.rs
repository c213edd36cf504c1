use crate::output::print_json;
use charsheet_core::context::BotContext;
use std::path::Path;

pub fn run(root: &Path, user: u64, json: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let ctx = BotContext::init(root)?;
        let character = ctx.character(user).await?;
        if json {
            print_json(&serde_json::json!({
                "user": user,
                "name": character.name,
                "description": character.description(),
            }))?;
        } else {
            println!("{}", character.description());
        }
        Ok(())
    })
}
