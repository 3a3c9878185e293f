//! Cursor pagination as an explicit two-state machine.
//!
//! The only transition out of [`PageState::Fetching`] is guarded by the
//! page's `hasNextPage` flag. An empty page never ends the walk on its own,
//! and a cursor is never requested twice.

use std::collections::HashSet;

use crate::error::{JanitorError, Result};
use crate::models::PageInfo;

/// Where a paginated walk currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// Another page must be requested with this cursor (`None` for the first page).
    Fetching { cursor: Option<String> },
    /// The service reported no further page.
    Done,
}

/// Drives a cursor walk over a GraphQL connection.
#[derive(Debug)]
pub struct Pagination {
    state: PageState,
    requested: HashSet<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PageState::Fetching { cursor: None },
            requested: HashSet::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Cursor for the next request, or `None` once the walk is done.
    #[must_use]
    pub fn next_cursor(&self) -> Option<Option<String>> {
        match &self.state {
            PageState::Fetching { cursor } => Some(cursor.clone()),
            PageState::Done => None,
        }
    }

    /// Apply the `pageInfo` of the page just received.
    ///
    /// # Errors
    /// Returns [`JanitorError::Api`] if the service claims another page but
    /// hands back no cursor or one that was already requested, since
    /// following it would fetch the same page again.
    pub fn advance(&mut self, info: &PageInfo) -> Result<()> {
        if self.state == PageState::Done {
            return Ok(());
        }

        if !info.has_next_page {
            self.state = PageState::Done;
            return Ok(());
        }

        let cursor = info.end_cursor.clone().ok_or_else(|| {
            JanitorError::Api("page reported hasNextPage without an endCursor".to_string())
        })?;

        if !self.requested.insert(cursor.clone()) {
            return Err(JanitorError::Api(format!(
                "pagination cursor {cursor:?} was returned twice"
            )));
        }

        self.state = PageState::Fetching {
            cursor: Some(cursor),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(has_next_page: bool, end_cursor: Option<&str>) -> PageInfo {
        PageInfo {
            has_next_page,
            end_cursor: end_cursor.map(ToString::to_string),
        }
    }

    #[test]
    fn test_starts_fetching_without_cursor() {
        let pagination = Pagination::new();
        assert_eq!(pagination.next_cursor(), Some(None));
    }

    #[test]
    fn test_follows_cursor_until_no_next_page() {
        let mut pagination = Pagination::new();

        pagination.advance(&info(true, Some("c1"))).unwrap();
        assert_eq!(pagination.next_cursor(), Some(Some("c1".to_string())));

        pagination.advance(&info(true, Some("c2"))).unwrap();
        assert_eq!(pagination.next_cursor(), Some(Some("c2".to_string())));

        pagination.advance(&info(false, Some("c3"))).unwrap();
        assert_eq!(pagination.state(), &PageState::Done);
        assert_eq!(pagination.next_cursor(), None);
    }

    #[test]
    fn test_stops_even_without_cursor_when_last_page() {
        let mut pagination = Pagination::new();
        pagination.advance(&info(false, None)).unwrap();
        assert_eq!(pagination.state(), &PageState::Done);
    }

    #[test]
    fn test_missing_cursor_with_next_page_is_error() {
        let mut pagination = Pagination::new();
        let err = pagination.advance(&info(true, None)).unwrap_err();
        assert!(matches!(err, JanitorError::Api(_)));
    }

    #[test]
    fn test_repeated_cursor_is_error() {
        let mut pagination = Pagination::new();
        pagination.advance(&info(true, Some("same"))).unwrap();
        let err = pagination.advance(&info(true, Some("same"))).unwrap_err();
        assert!(err.to_string().contains("returned twice"));
    }

    #[test]
    fn test_done_is_terminal() {
        let mut pagination = Pagination::new();
        pagination.advance(&info(false, None)).unwrap();
        pagination.advance(&info(true, Some("late"))).unwrap();
        assert_eq!(pagination.state(), &PageState::Done);
    }
}
