use charsheet_core::context::BotContext;
use std::path::Path;

pub fn run(root: &Path, port: Option<u16>, open: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let ctx = BotContext::init(root)?;
        let port = port.unwrap_or(ctx.config.web.port);
        let result = tokio::select! {
            res = charsheet_server::serve(ctx.clone(), port, open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        };
        ctx.shutdown().await?;
        result
    })
}
