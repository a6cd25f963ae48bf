use crate::error::Result;
use crate::model::StrategySummary;
use crate::screen::ListScreen;
use crate::store::DataSource;

/// Fetch the screen's current page of search results.
///
/// Works for both search tabs; the screen's context picks the endpoint.
/// Returns whether the page was applied (false when superseded).
pub async fn list<S: DataSource>(
    source: &S,
    screen: &mut ListScreen<StrategySummary>,
) -> Result<bool> {
    let query = screen.begin_request();
    let result = source.search_strategies(&query).await;
    screen.complete(query.ticket, result)
}
