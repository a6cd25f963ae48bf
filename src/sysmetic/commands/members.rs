use crate::commands::{mutated, note_refresh, plural, CmdResult};
use crate::error::{Result, SysmeticError};
use crate::model::{MemberRole, MemberRow};
use crate::screen::ListScreen;
use crate::store::DataSource;

pub async fn list<S: DataSource>(source: &S, screen: &mut ListScreen<MemberRow>) -> Result<bool> {
    let query = screen.begin_request();
    let result = source.members(&query).await;
    screen.complete(query.ticket, result)
}

/// Give every checked member `role`.
///
/// Admin rights cannot be granted from the member table.
pub async fn change_role<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<MemberRow>,
    role: MemberRole,
) -> Result<CmdResult> {
    if role == MemberRole::Admin {
        return Err(SysmeticError::InvalidInput(
            "The admin role cannot be assigned here".to_string(),
        ));
    }
    let ids: Vec<i64> = screen
        .require_selection("choose members to change")?
        .into_iter()
        .map(|row| row.id)
        .collect();
    source.change_member_roles(&ids, role).await?;

    let message = format!("Set {} to {}", plural(ids.len(), "member"), role);
    let mut result = mutated(ids, message);
    screen.after_mutation();
    note_refresh(&mut result, list(source, screen).await);
    Ok(result)
}

pub async fn delete<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<MemberRow>,
) -> Result<CmdResult> {
    let ids: Vec<i64> = screen
        .require_selection("choose members to delete")?
        .into_iter()
        .map(|row| row.id)
        .collect();
    source.delete_members(&ids).await?;

    let message = format!("Deleted {}", plural(ids.len(), "member"));
    let mut result = mutated(ids, message);
    screen.after_mutation();
    note_refresh(&mut result, list(source, screen).await);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ids, FilterContext, FilterRegistry, FilterValue};
    use crate::store::memory::fixtures::member;
    use crate::store::memory::InMemorySource;

    fn source() -> InMemorySource {
        InMemorySource::new().with_members(vec![
            member(1, "ann@example.com", "ann", MemberRole::User),
            member(2, "bo@example.com", "bo", MemberRole::Trader),
            member(3, "cy@example.com", "cy", MemberRole::User),
        ])
    }

    async fn loaded(source: &InMemorySource) -> ListScreen<MemberRow> {
        let ctx = FilterContext::Members;
        let mut screen = ListScreen::new(ctx, FilterRegistry::default().fields(ctx), 10);
        list(source, &mut screen).await.unwrap();
        screen
    }

    #[tokio::test]
    async fn role_filter_and_search_combine() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.set_filter(ids::ROLE, FilterValue::Single("USER".into()));
        screen.set_filter(ids::SEARCH_TYPE, FilterValue::Single("NICKNAME".into()));
        screen.set_filter(ids::SEARCH_TEXT, FilterValue::Text("cy".into()));

        list(&source, &mut screen).await.unwrap();

        assert_eq!(screen.rows().len(), 1);
        assert_eq!(screen.rows()[0].id, 3);
    }

    #[tokio::test]
    async fn change_role_updates_checked_members() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.toggle(0);
        screen.toggle(2);

        let result = change_role(&source, &mut screen, MemberRole::Trader)
            .await
            .unwrap();

        assert_eq!(result.messages[0].content, "Set 2 members to TRADER");
        assert!(screen
            .rows()
            .iter()
            .all(|m| m.role_code == MemberRole::Trader));
    }

    #[tokio::test]
    async fn admin_role_is_refused() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.toggle(0);
        let err = change_role(&source, &mut screen, MemberRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, SysmeticError::InvalidInput(_)));
        assert!(screen.selection().is_checked(0));
    }

    #[tokio::test]
    async fn delete_removes_members() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.toggle_all();

        let result = delete(&source, &mut screen).await.unwrap();

        assert_eq!(result.affected_ids, vec![1, 2, 3]);
        assert!(screen.rows().is_empty());
        assert_eq!(screen.page().total_elements, 0);
    }
}
