use crate::commands::{mutated, note_refresh, plural, CmdResult};
use crate::error::{Result, SysmeticError};
use crate::model::NoticeRow;
use crate::screen::ListScreen;
use crate::store::DataSource;

pub async fn list<S: DataSource>(source: &S, screen: &mut ListScreen<NoticeRow>) -> Result<bool> {
    let query = screen.begin_request();
    let result = source.notices(&query).await;
    screen.complete(query.ticket, result)
}

pub async fn delete<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<NoticeRow>,
) -> Result<CmdResult> {
    let ids: Vec<i64> = screen
        .require_selection("choose notices to delete")?
        .into_iter()
        .map(|row| row.notice_id)
        .collect();
    source.delete_notices(&ids).await?;

    let message = format!("Deleted {}", plural(ids.len(), "notice"));
    let mut result = mutated(ids, message);
    screen.after_mutation();
    note_refresh(&mut result, list(source, screen).await);
    Ok(result)
}

/// Flip the public flag of the notice at page `index`.
pub async fn toggle_visibility<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<NoticeRow>,
    index: usize,
) -> Result<CmdResult> {
    let row = screen
        .rows()
        .get(index)
        .ok_or_else(|| SysmeticError::NotFound(format!("row {}", index + 1)))?;
    let id = row.notice_id;
    let now = if row.is_open { "hidden" } else { "public" };
    let message = format!("Notice '{}' is now {}", row.notice_title, now);
    source.toggle_notice_visibility(id).await?;

    let mut result = mutated(vec![id], message);
    screen.after_mutation();
    note_refresh(&mut result, list(source, screen).await);
    Ok(result)
}
