use crate::output::print_json;
use charsheet_core::context::BotContext;
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>, list: bool, json: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let ctx = BotContext::init(root)?;

        if list {
            let names = ctx.monster_names().await?;
            if json {
                print_json(&names)?;
            } else {
                for n in &names {
                    println!("{n}");
                }
            }
            return Ok(());
        }

        let Some(name) = name else {
            anyhow::bail!("provide a monster name, or pass --list to see them all");
        };
        let description = ctx.monster(name).await?;
        if json {
            print_json(&serde_json::json!({
                "name": name,
                "description": description,
            }))?;
        } else {
            println!("{description}");
        }
        Ok(())
    })
}
