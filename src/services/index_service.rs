use tracing::{info, warn};

use crate::domain::DedupeIndex;
use crate::storage::traits::RecordQuery;

/// Collect every identifier already recorded in the sink.
///
/// Pages are requested until the sink reports no continuation. A failed
/// request ends pagination early and the identifiers gathered so far are
/// returned; the failure is logged rather than propagated.
pub fn build_index<Q: RecordQuery + ?Sized>(query: &Q) -> DedupeIndex {
    let mut index = DedupeIndex::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = match query.query_page(cursor.take()) {
            Ok(page) => page,
            Err(e) => {
                warn!(
                    error = %e,
                    pages,
                    collected = index.len(),
                    "Existing-entry query failed, continuing with a partial index"
                );
                break;
            }
        };

        pages += 1;
        index.extend(page.urls);

        if !page.has_more {
            break;
        }

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => {
                warn!(pages, "Sink reported more pages without a cursor, stopping");
                break;
            }
        }
    }

    info!(urls = index.len(), pages, "Built existing-entry index");
    index
}
