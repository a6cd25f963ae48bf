use crate::commands::{mutated, note_refresh, plural, CmdResult};
use crate::error::Result;
use crate::model::InquiryRow;
use crate::screen::ListScreen;
use crate::store::DataSource;

pub async fn list<S: DataSource>(source: &S, screen: &mut ListScreen<InquiryRow>) -> Result<bool> {
    let query = screen.begin_request();
    let result = source.inquiries(&query).await;
    screen.complete(query.ticket, result)
}

pub async fn delete<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<InquiryRow>,
) -> Result<CmdResult> {
    let ids: Vec<i64> = screen
        .require_selection("choose inquiries to delete")?
        .into_iter()
        .map(|row| row.inquiry_id)
        .collect();
    source.delete_inquiries(&ids).await?;

    let message = format!("Deleted {}", plural(ids.len(), "inquiry"));
    let mut result = mutated(ids, message);
    screen.after_mutation();
    note_refresh(&mut result, list(source, screen).await);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ids, FilterContext, FilterRegistry, FilterValue};
    use crate::store::memory::fixtures::inquiry;
    use crate::store::memory::InMemorySource;

    fn source() -> InMemorySource {
        InMemorySource::new().with_inquiries(vec![
            inquiry(1, "Momentum", "CLOSED"),
            inquiry(2, "Momentum", "OPEN"),
            inquiry(3, "Carry", "OPEN"),
        ])
    }

    async fn loaded(source: &InMemorySource) -> ListScreen<InquiryRow> {
        let ctx = FilterContext::Inquiries;
        let mut screen = ListScreen::new(ctx, FilterRegistry::default().fields(ctx), 10);
        list(source, &mut screen).await.unwrap();
        screen
    }

    #[tokio::test]
    async fn closed_filter_and_strategy_search() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.set_filter(ids::CLOSED, FilterValue::Single("OPEN".into()));
        screen.set_filter(ids::SEARCH_TYPE, FilterValue::Single("STRATEGY".into()));
        screen.set_filter(ids::SEARCH_TEXT, FilterValue::Text("momentum".into()));

        list(&source, &mut screen).await.unwrap();

        let found: Vec<_> = screen.rows().iter().map(|r| r.inquiry_id).collect();
        assert_eq!(found, vec![2]);
    }

    #[tokio::test]
    async fn all_means_unfiltered() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.set_filter(ids::CLOSED, FilterValue::Single("ALL".into()));
        list(&source, &mut screen).await.unwrap();
        assert_eq!(screen.rows().len(), 3);
    }

    #[tokio::test]
    async fn delete_checked_inquiries() {
        let source = source();
        let mut screen = loaded(&source).await;
        screen.toggle(2);

        let result = delete(&source, &mut screen).await.unwrap();

        assert_eq!(result.messages[0].content, "Deleted 1 inquiry");
        assert_eq!(source.inquiry_rows().len(), 2);
        assert_eq!(screen.rows().len(), 2);
    }
}
