use crate::output::print_json;
use charsheet_core::character::{PronounSet, VerbSet};
use charsheet_core::context::BotContext;
use charsheet_core::error::CoreError;
use std::path::Path;

pub fn run(
    root: &Path,
    url: &str,
    user: u64,
    pronouns: Option<&str>,
    verbs: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let pronoun_override = pronouns
        .map(|s| {
            PronounSet::parse(s).ok_or_else(|| {
                anyhow::anyhow!("invalid pronoun override {s:?}: expected subject/object/reflexive")
            })
        })
        .transpose()?;
    let verb_override = verbs
        .map(|s| {
            VerbSet::parse(s)
                .ok_or_else(|| anyhow::anyhow!("invalid verb override {s:?}: expected be/have"))
        })
        .transpose()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let ctx = BotContext::init(root)?;
        let result = ctx.link_sheet(user, url, pronoun_override, verb_override).await;
        ctx.shutdown().await?;
        match result {
            Ok(character) => {
                if json {
                    print_json(&character)?;
                } else {
                    println!("Google sheet successfully linked!");
                    println!("{}", character.description());
                }
                Ok(())
            }
            Err(CoreError::AlreadyLinked(_)) => {
                println!("You already linked a sheet to your account!");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    })
}
