use crate::output::print_json;
use charsheet_core::context::BotContext;
use charsheet_core::stats::Ability;
use std::path::Path;

pub fn run(
    root: &Path,
    dice: &str,
    user: u64,
    stat: Option<&str>,
    modifier: i64,
    json: bool,
) -> anyhow::Result<()> {
    let stat: Option<Ability> = stat.map(str::parse).transpose()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let ctx = BotContext::init(root)?;
        let character = ctx.character(user).await?;
        let roll = character.roll(dice, stat, modifier)?;

        if json {
            print_json(&roll)?;
            return Ok(());
        }

        let mut line = format!("Rolled a {}", roll.total);
        if let Some(ability) = stat {
            line.push_str(&format!(" for {ability}"));
        }
        if modifier != 0 {
            line.push_str(&format!(" with the {modifier} modifier"));
        }
        println!("{line}");
        if roll.rolls.len() > 1 {
            let dice: Vec<String> = roll.rolls.iter().map(i64::to_string).collect();
            println!("({})", dice.join(" + "));
        }
        Ok(())
    })
}
