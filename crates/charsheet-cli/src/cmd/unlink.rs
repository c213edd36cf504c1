use charsheet_core::context::BotContext;
use charsheet_core::error::CoreError;
use std::path::Path;

pub fn run(root: &Path, user: u64) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let ctx = BotContext::init(root)?;
        match ctx.unlink(user).await {
            Ok(_) => {
                println!("Successfully unlinked character sheet.");
                Ok(())
            }
            Err(CoreError::NotLinked(_)) => {
                println!("No character sheet linked! If you'd like to link one, use the link command!");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    })
}
