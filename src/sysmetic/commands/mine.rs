use crate::commands::{mutated, note_refresh, plural, CmdResult};
use crate::error::Result;
use crate::model::StrategySummary;
use crate::screen::ListScreen;
use crate::store::DataSource;

pub async fn list<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<StrategySummary>,
) -> Result<bool> {
    let query = screen.begin_request();
    let result = source.my_strategies(&query).await;
    screen.complete(query.ticket, result)
}

pub async fn delete<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<StrategySummary>,
) -> Result<CmdResult> {
    let ids: Vec<i64> = screen
        .require_selection("choose strategies to delete")?
        .into_iter()
        .map(|row| row.strategy_id)
        .collect();
    source.delete_my_strategies(&ids).await?;

    let message = format!("Deleted {}", plural(ids.len(), "strategy"));
    let mut result = mutated(ids, message);
    screen.after_mutation();
    note_refresh(&mut result, list(source, screen).await);
    Ok(result)
}
