use crate::output::{print_json, print_table};
use charsheet_core::character::Character;
use charsheet_core::context::BotContext;
use std::collections::BTreeMap;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let ctx = BotContext::init(root)?;
        let entries: BTreeMap<u64, Character> = ctx
            .with_store(|s| s.iter().map(|(id, c)| (id, c.clone())).collect())
            .await;

        if json {
            print_json(&entries)?;
            return Ok(());
        }

        if entries.is_empty() {
            println!("No linked characters.");
            return Ok(());
        }

        let rows = entries
            .iter()
            .map(|(id, c)| {
                vec![
                    id.to_string(),
                    c.name.clone(),
                    c.level.to_string(),
                    c.linked_at.format("%Y-%m-%d").to_string(),
                ]
            })
            .collect();
        print_table(&["USER", "NAME", "LEVEL", "LINKED"], rows);
        Ok(())
    })
}
