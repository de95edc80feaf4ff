use crate::context::AppContext;
use crate::error::AppResult;
use crate::output::OutputMode;

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let domains = ctx.mail.list_domains().await?;

    if ctx.output.mode() == OutputMode::Text {
        for domain in &domains {
            println!("@{}", domain.domain);
        }
        return Ok(());
    }

    let text = format!("{} domains", domains.len());
    ctx.output.emit(&text, &domains)
}
