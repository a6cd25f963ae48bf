use crate::commands::{mutated, note_refresh, plural, CmdResult};
use crate::error::{Result, SysmeticError};
use crate::model::AdminStrategyRow;
use crate::screen::ListScreen;
use crate::store::DataSource;

pub async fn list<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<AdminStrategyRow>,
) -> Result<bool> {
    let query = screen.begin_request();
    let result = source.admin_strategies(&query).await;
    screen.complete(query.ticket, result)
}

/// Approve every checked strategy in one call.
pub async fn approve<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<AdminStrategyRow>,
) -> Result<CmdResult> {
    let ids: Vec<i64> = screen
        .require_selection("choose strategies to approve")?
        .into_iter()
        .map(|row| row.strategy_id)
        .collect();
    source.approve_strategies(&ids).await?;

    let message = format!("Approved {}", plural(ids.len(), "strategy"));
    let mut result = mutated(ids, message);
    screen.after_mutation();
    note_refresh(&mut result, list(source, screen).await);
    Ok(result)
}

/// Reject the strategy at page `index`. A reason is mandatory.
pub async fn reject<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<AdminStrategyRow>,
    index: usize,
    reason: &str,
) -> Result<CmdResult> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(SysmeticError::InvalidInput(
            "A rejection reason is required".to_string(),
        ));
    }
    let row = screen
        .rows()
        .get(index)
        .ok_or_else(|| SysmeticError::NotFound(format!("row {}", index + 1)))?;
    let (id, name) = (row.strategy_id, row.strategy_name.clone());
    source.reject_strategy(id, reason).await?;

    let mut result = mutated(vec![id], format!("Rejected '{}'", name));
    screen.after_mutation();
    note_refresh(&mut result, list(source, screen).await);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ids, FilterContext, FilterRegistry, FilterValue};
    use crate::model::{ApprovalStatus, OpenStatus};
    use crate::store::memory::fixtures::admin_strategy;
    use crate::store::memory::InMemorySource;

    fn source() -> InMemorySource {
        InMemorySource::new().with_admin_strategies(vec![
            admin_strategy(1, "Alpha", OpenStatus::Public, ApprovalStatus::Requested),
            admin_strategy(2, "Beta", OpenStatus::Public, ApprovalStatus::Requested),
            admin_strategy(3, "Rho", OpenStatus::Private, ApprovalStatus::NotRequested),
        ])
    }

    async fn loaded(source: &InMemorySource) -> ListScreen<AdminStrategyRow> {
        let ctx = FilterContext::AdminStrategies;
        let mut screen = ListScreen::new(ctx, FilterRegistry::default().fields(ctx), 10);
        list(source, &mut screen).await.unwrap();
        screen
    }

    #[tokio::test]
    async fn approve_sends_all_checked_ids() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.toggle(0);
        screen.toggle(1);

        let result = approve(&source, &mut screen).await.unwrap();

        assert_eq!(result.affected_ids, vec![1, 2]);
        assert!(source.calls().contains(&"approve [1, 2]".to_string()));
        assert_eq!(
            screen.rows()[0].approval_status_code,
            ApprovalStatus::Approved
        );
        assert!(screen.selection().is_empty());
    }

    #[tokio::test]
    async fn approve_without_selection_never_calls_the_server() {
        let source = source();
        let mut screen = loaded(&source).await;
        let err = approve(&source, &mut screen).await.unwrap_err();
        assert!(matches!(err, SysmeticError::EmptySelection(_)));
        assert_eq!(source.calls(), vec!["admin_strategies"]);
    }

    #[tokio::test]
    async fn reject_requires_reason() {
        let source = source();
        let mut screen = loaded(&source).await;
        let err = reject(&source, &mut screen, 0, "   ").await.unwrap_err();
        assert!(matches!(err, SysmeticError::InvalidInput(_)));
        assert!(source.rejections().is_empty());
    }

    #[tokio::test]
    async fn reject_records_reason() {
        let source = source();
        let mut screen = loaded(&source).await;

        let result = reject(&source, &mut screen, 1, " No backtest data ")
            .await
            .unwrap();

        assert_eq!(result.messages[0].content, "Rejected 'Beta'");
        assert_eq!(
            source.rejections(),
            vec![(2, "No backtest data".to_string())]
        );
        assert_eq!(
            screen.rows()[1].approval_status_code,
            ApprovalStatus::Rejected
        );
    }

    #[tokio::test]
    async fn filtered_list_refetches_with_filters_kept() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.set_filter(
            ids::APPROVAL_STATUS,
            FilterValue::Single("REQUESTED".into()),
        );
        list(&source, &mut screen).await.unwrap();
        assert_eq!(screen.rows().len(), 2);

        screen.toggle(0);
        approve(&source, &mut screen).await.unwrap();

        let names: Vec<_> = screen
            .rows()
            .iter()
            .map(|r| r.strategy_name.as_str())
            .collect();
        assert_eq!(names, vec!["Beta"]);
    }
}
