use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filters::{ids, FilterOption, FilterRegistry};
use crate::model::NamedOption;
use crate::store::DataSource;
use tracing::warn;

fn to_options(list: &[NamedOption]) -> Vec<FilterOption> {
    list.iter()
        .map(|o| FilterOption::new(o.name.clone(), o.name.clone()))
        .collect()
}

/// Merge the remote method and instrument lists into `registry`.
///
/// Both lists are replaced together, and only when both came back non-empty;
/// otherwise the registry keeps what it had.
pub async fn load<S: DataSource>(source: &S, registry: &mut FilterRegistry) -> Result<CmdResult> {
    let remote = source.method_and_stock().await?;
    let mut result = CmdResult::default();

    if remote.method_list.is_empty() || remote.stock_list.is_empty() {
        warn!(
            methods = remote.method_list.len(),
            stocks = remote.stock_list.len(),
            "incomplete option lists, keeping current options"
        );
        result.add_message(CmdMessage::warning(
            "Method or instrument list is empty; keeping current options",
        ));
        return Ok(result);
    }

    registry.replace_options(ids::METHODS, to_options(&remote.method_list));
    registry.replace_options(ids::STOCK_NAMES, to_options(&remote.stock_list));
    result.add_message(CmdMessage::info(format!(
        "Loaded {} methods and {} instruments",
        remote.method_list.len(),
        remote.stock_list.len()
    )));
    Ok(result)
}
