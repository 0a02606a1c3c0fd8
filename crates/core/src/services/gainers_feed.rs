use tracing::debug;

use crate::api::traits::DashboardApi;
use crate::errors::CoreError;
use crate::models::gainers::{GainerRecord, GAINERS_PAGE_SIZE};

/// Paginated, append-only accumulator of top-gainer records.
///
/// Owns the offset cursor exclusively. Records are kept in fetch order;
/// if the backend re-serves overlapping ranges the duplicates are kept
/// verbatim, so the accumulated sequence is exactly what the user was shown.
/// The cursor only ever advances — repeated loads extend monotonically and
/// never rewind.
#[derive(Debug, Default)]
pub struct GainersFeed {
    records: Vec<GainerRecord>,
    offset: u32,
}

impl GainersFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the next fixed-size page and append it.
    ///
    /// The offset advances by the page size after every successful fetch,
    /// even a short or empty one: the backend cursor is positional. A failed
    /// fetch leaves both the cursor and the accumulated records untouched.
    /// Returns the newly appended slice.
    pub async fn load_next_page(
        &mut self,
        api: &dyn DashboardApi,
    ) -> Result<&[GainerRecord], CoreError> {
        let page = api.top_gainers(self.offset, GAINERS_PAGE_SIZE).await?;
        debug!(offset = self.offset, received = page.len(), "gainers page loaded");

        self.offset += GAINERS_PAGE_SIZE;
        let start = self.records.len();
        self.records.extend(page);
        Ok(&self.records[start..])
    }

    /// All accumulated records, in fetch order (duplicates included).
    #[must_use]
    pub fn records(&self) -> &[GainerRecord] {
        &self.records
    }

    /// Current offset cursor (5 × number of successful page loads).
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Symbols of the ENTIRE accumulated sequence, for the advisor request.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.records.iter().map(|g| g.symbol.clone()).collect()
    }
}
