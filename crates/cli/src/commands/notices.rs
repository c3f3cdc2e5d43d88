//! Notice commands (administrators only).

use std::io::Write;

use appliance_store_core::notice::NoticeDraft;
use appliance_store_core::{ADMIN_ROLE, NoticeId};

use super::{NoticeAction, NoticeArgs};
use crate::context::App;
use crate::error::CliError;
use crate::output;

pub async fn run(app: &App, action: NoticeAction, out: &mut impl Write) -> Result<(), CliError> {
    app.require(&[ADMIN_ROLE])?;
    let notices = app.notices();
    match action {
        NoticeAction::List { active } => {
            let list = if active {
                notices.active().await?
            } else {
                notices.list(None).await?
            };
            output::notices(out, &list)?;
        }
        NoticeAction::Show { id } => {
            let notice = notices.get(NoticeId::new(id)).await?;
            output::notices(out, std::slice::from_ref(&notice))?;
            writeln!(out, "\n{}", notice.message)?;
        }
        NoticeAction::Create(args) => {
            let notice = notices.create(draft(args)?).await?;
            writeln!(out, "Created notice #{}", notice.id)?;
        }
        NoticeAction::Update { id, notice } => {
            let notice = notices.update(NoticeId::new(id), draft(notice)?).await?;
            writeln!(out, "Updated notice #{}", notice.id)?;
        }
        NoticeAction::SetStatus { id, status } => {
            let changes = serde_json::json!({ "estado": status.trim() });
            let notice = notices.patch(NoticeId::new(id), &changes).await?;
            writeln!(out, "Notice #{} is now {}", notice.id, notice.status)?;
        }
        NoticeAction::Delete { id } => {
            notices.delete(NoticeId::new(id)).await?;
            writeln!(out, "Deleted notice #{id}")?;
        }
        NoticeAction::Send { id } => {
            let response = notices.send_now(NoticeId::new(id)).await?;
            writeln!(out, "Notice #{id} sent: {response}")?;
        }
        NoticeAction::Stats { id } => {
            let stats = notices.statistics(NoticeId::new(id)).await?;
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&stats).unwrap_or_else(|_| stats.to_string())
            )?;
        }
    }
    Ok(())
}

fn draft(args: NoticeArgs) -> Result<NoticeDraft, CliError> {
    if args.title.trim().is_empty() || args.message.trim().is_empty() {
        return Err(CliError::InvalidArgument(
            "title and message are required".into(),
        ));
    }
    Ok(NoticeDraft {
        title: args.title,
        message: args.message,
        kind: args.kind,
        status: args.status,
        priority: args.priority,
        scheduled_for: args.scheduled_for,
        image_url: args.image_url,
        action_link: args.action_link,
    })
}
