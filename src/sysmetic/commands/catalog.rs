use crate::commands::{mutated, note_refresh, plural, CmdResult};
use crate::error::{Result, SysmeticError};
use crate::model::{CatalogItem, CatalogKind};
use crate::screen::ListScreen;
use crate::store::{CatalogDraft, DataSource, IconFile};

pub async fn list<S: DataSource>(
    source: &S,
    kind: CatalogKind,
    screen: &mut ListScreen<CatalogItem>,
) -> Result<bool> {
    let query = screen.begin_request();
    let result = source.list_catalog(kind, &query).await;
    screen.complete(query.ticket, result)
}

fn clean_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SysmeticError::InvalidInput("Name is required".to_string()));
    }
    Ok(name.to_string())
}

/// Duplicate names are checked against the rows on screen, skipping `except`.
fn check_duplicate(rows: &[CatalogItem], name: &str, except: Option<i64>) -> Result<()> {
    if rows
        .iter()
        .any(|row| row.name == name && Some(row.id) != except)
    {
        return Err(SysmeticError::InvalidInput(format!(
            "'{}' already exists",
            name
        )));
    }
    Ok(())
}

pub async fn create<S: DataSource>(
    source: &S,
    kind: CatalogKind,
    screen: &mut ListScreen<CatalogItem>,
    name: &str,
    icon: Option<IconFile>,
) -> Result<CmdResult> {
    let name = clean_name(name)?;
    check_duplicate(screen.rows(), &name, None)?;
    let icon = icon.ok_or_else(|| {
        SysmeticError::InvalidInput(format!("An icon file is required for a new {}", kind.label()))
    })?;

    let draft = CatalogDraft {
        name: name.clone(),
        icon: Some(icon),
    };
    source.create_catalog_item(kind, &draft).await?;

    let mut result = mutated(Vec::new(), format!("Added {} '{}'", kind.label(), name));
    screen.after_mutation();
    note_refresh(&mut result, list(source, kind, screen).await);
    Ok(result)
}

/// Rename the row at page `index`, optionally replacing its icon.
pub async fn update<S: DataSource>(
    source: &S,
    kind: CatalogKind,
    screen: &mut ListScreen<CatalogItem>,
    index: usize,
    name: &str,
    icon: Option<IconFile>,
) -> Result<CmdResult> {
    let row = screen
        .rows()
        .get(index)
        .ok_or_else(|| SysmeticError::NotFound(format!("row {}", index + 1)))?;
    let id = row.id;
    let name = clean_name(name)?;
    check_duplicate(screen.rows(), &name, Some(id))?;

    let draft = CatalogDraft {
        name: name.clone(),
        icon,
    };
    source.update_catalog_item(kind, id, &draft).await?;

    let mut result = mutated(vec![id], format!("Updated {} '{}'", kind.label(), name));
    screen.after_mutation();
    note_refresh(&mut result, list(source, kind, screen).await);
    Ok(result)
}

/// Delete every checked row.
pub async fn delete<S: DataSource>(
    source: &S,
    kind: CatalogKind,
    screen: &mut ListScreen<CatalogItem>,
) -> Result<CmdResult> {
    let ids: Vec<i64> = screen
        .require_selection("choose rows to delete")?
        .into_iter()
        .map(|row| row.id)
        .collect();
    source.delete_catalog_items(kind, &ids).await?;

    let message = format!("Deleted {}", plural(ids.len(), kind.label()));
    let mut result = mutated(ids, message);
    screen.after_mutation();
    note_refresh(&mut result, list(source, kind, screen).await);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterContext, FilterRegistry};
    use crate::store::memory::fixtures::catalog_item;
    use crate::store::memory::InMemorySource;

    fn icon() -> Option<IconFile> {
        Some(IconFile::new("icon.png", vec![0x89, 0x50]))
    }

    async fn loaded(source: &InMemorySource) -> ListScreen<CatalogItem> {
        let registry = FilterRegistry::default();
        let mut screen = ListScreen::new(
            FilterContext::Catalog,
            registry.fields(FilterContext::Catalog),
            10,
        );
        list(source, CatalogKind::Stock, &mut screen).await.unwrap();
        screen
    }

    fn source() -> InMemorySource {
        InMemorySource::new().with_catalog(
            CatalogKind::Stock,
            vec![
                catalog_item(1, "KOSPI200"),
                catalog_item(2, "NASDAQ"),
                catalog_item(3, "S&P500"),
            ],
        )
    }

    #[tokio::test]
    async fn create_adds_and_refetches() {
        let source = source();
        let mut screen = loaded(&source).await;

        let result = create(&source, CatalogKind::Stock, &mut screen, " Nikkei ", icon())
            .await
            .unwrap();

        assert_eq!(result.messages[0].content, "Added stock 'Nikkei'");
        assert_eq!(screen.rows().len(), 4);
        assert!(!screen.is_stale());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_before_calling_the_server() {
        let source = source();
        let mut screen = loaded(&source).await;
        let calls_before = source.calls().len();

        let err = create(&source, CatalogKind::Stock, &mut screen, "NASDAQ", icon())
            .await
            .unwrap_err();

        assert!(matches!(err, SysmeticError::InvalidInput(_)));
        assert_eq!(source.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn create_requires_name_and_icon() {
        let source = source();
        let mut screen = loaded(&source).await;
        assert!(create(&source, CatalogKind::Stock, &mut screen, "  ", icon())
            .await
            .is_err());
        assert!(create(&source, CatalogKind::Stock, &mut screen, "Nikkei", None)
            .await
            .is_err());
        assert_eq!(source.catalog(CatalogKind::Stock).len(), 3);
    }

    #[tokio::test]
    async fn update_may_keep_its_own_name() {
        let source = source();
        let mut screen = loaded(&source).await;

        update(
            &source,
            CatalogKind::Stock,
            &mut screen,
            1,
            "NASDAQ",
            icon(),
        )
        .await
        .unwrap();
        let err = update(
            &source,
            CatalogKind::Stock,
            &mut screen,
            1,
            "KOSPI200",
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SysmeticError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn update_unknown_row_is_not_found() {
        let source = source();
        let mut screen = loaded(&source).await;
        let err = update(&source, CatalogKind::Stock, &mut screen, 9, "X", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SysmeticError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_checked_rows_and_clears_selection() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.toggle(0);
        screen.toggle(2);

        let result = delete(&source, CatalogKind::Stock, &mut screen)
            .await
            .unwrap();

        assert_eq!(result.affected_ids, vec![1, 3]);
        assert_eq!(result.messages[0].content, "Deleted 2 stocks");
        assert!(screen.selection().is_empty());
        let names: Vec<_> = screen.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["NASDAQ"]);
    }

    #[tokio::test]
    async fn delete_with_nothing_checked_fails() {
        let source = source();
        let mut screen = loaded(&source).await;
        let err = delete(&source, CatalogKind::Stock, &mut screen)
            .await
            .unwrap_err();
        assert!(matches!(err, SysmeticError::EmptySelection(_)));
    }

    #[tokio::test]
    async fn failed_delete_keeps_selection() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.toggle(0);
        source.fail_next(500, "nope");

        assert!(delete(&source, CatalogKind::Stock, &mut screen)
            .await
            .is_err());
        assert!(screen.selection().is_checked(0));
        assert_eq!(source.catalog(CatalogKind::Stock).len(), 3);
    }
}
