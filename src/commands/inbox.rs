use crate::context::AppContext;
use crate::error::AppResult;
use crate::output::OutputMode;

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let session = ctx.require_session()?;
    let messages = ctx.mail.list_messages(&session.token).await?;

    if ctx.output.mode() == OutputMode::Text {
        if messages.is_empty() {
            println!("no messages yet");
            return Ok(());
        }

        for (index, message) in messages.iter().enumerate() {
            let date = message.created_at.as_deref().unwrap_or("(no date)");
            println!(
                "{}. {} — {} ({date})",
                index + 1,
                message.sender_label(),
                message.subject_label()
            );
        }
        return Ok(());
    }

    let text = format!("{} messages", messages.len());
    ctx.output.emit(&text, &messages)
}
