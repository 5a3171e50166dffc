use dashboard_protocol::{RecordId, Session};

use crate::error::{Result, SearchError};

/// Records revealed per "load more".
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Records that can anchor a resume cursor.
pub trait Keyed {
    fn record_id(&self) -> &RecordId;
}

impl Keyed for Session {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

fn effective_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

/// The next `page_size` records after the first `already_shown`. Running past the
/// end yields a short or empty slice, never an error.
pub fn load_next<T>(source: &[T], already_shown: usize, page_size: usize) -> &[T] {
    let start = already_shown.min(source.len());
    let end = start
        .saturating_add(effective_page_size(page_size))
        .min(source.len());
    &source[start..end]
}

/// Where the next page starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCursor {
    Start,
    /// Number of records already shown.
    Shown(usize),
    /// Id of the last record shown.
    AfterId(RecordId),
}

/// Index in `source` at which the page after `cursor` begins.
pub fn cursor_offset<T: Keyed>(source: &[T], cursor: &WindowCursor) -> Result<usize> {
    match cursor {
        WindowCursor::Start => Ok(0),
        WindowCursor::Shown(count) => Ok((*count).min(source.len())),
        WindowCursor::AfterId(id) => source
            .iter()
            .position(|record| record.record_id() == id)
            .map(|index| index + 1)
            .ok_or_else(|| SearchError::CursorNotFound(id.to_string())),
    }
}

pub fn load_from<'a, T: Keyed>(
    source: &'a [T],
    cursor: &WindowCursor,
    page_size: usize,
) -> Result<&'a [T]> {
    let start = cursor_offset(source, cursor)?;
    Ok(load_next(source, start, page_size))
}

/// An append-only view that grows one page at a time.
#[derive(Debug, Clone)]
pub struct PagedView<T> {
    shown: Vec<T>,
    page_size: usize,
}

impl<T: Keyed + Clone> PagedView<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            shown: Vec::new(),
            page_size: effective_page_size(page_size),
        }
    }

    pub fn shown(&self) -> &[T] {
        &self.shown
    }

    pub fn cursor(&self) -> WindowCursor {
        self.shown
            .last()
            .map(|record| WindowCursor::AfterId(record.record_id().clone()))
            .unwrap_or(WindowCursor::Start)
    }

    /// Appends the next page from `source` and returns how many records arrived.
    pub fn load_more(&mut self, source: &[T]) -> Result<usize> {
        let page = load_from(source, &self.cursor(), self.page_size)?;
        self.shown.extend_from_slice(page);
        log::debug!(
            "Loaded {} more records ({} shown of {})",
            page.len(),
            self.shown.len(),
            source.len()
        );
        Ok(page.len())
    }

    pub fn has_more(&self, source: &[T]) -> bool {
        load_from(source, &self.cursor(), 1)
            .map(|next| !next.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn sessions(count: i64) -> Vec<Session> {
        (1..=count)
            .map(|id| Session {
                id: RecordId::Int(id),
                analysis_label: format!("r{id}"),
                analysis_date: None,
                user: None,
            })
            .collect()
    }

    fn ids(records: &[Session]) -> Vec<i64> {
        records
            .iter()
            .map(|record| match record.id {
                RecordId::Int(id) => id,
                RecordId::Text(_) => -1,
            })
            .collect()
    }

    #[test]
    fn final_page_is_partial() {
        let source = sessions(10);
        assert_eq!(ids(load_next(&source, 8, 4)), vec![9, 10]);
    }

    #[test]
    fn first_page_uses_page_size() {
        let source = sessions(10);
        assert_eq!(ids(load_next(&source, 0, DEFAULT_PAGE_SIZE)), vec![1, 2, 3, 4]);
        assert_eq!(ids(load_next(&source, 4, 4)), vec![5, 6, 7, 8]);
    }

    #[test]
    fn past_the_end_is_empty() {
        let source = sessions(3);
        assert!(load_next(&source, 3, 4).is_empty());
        assert!(load_next(&source, 99, 4).is_empty());
        assert!(load_next::<Session>(&[], 0, 4).is_empty());
    }

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let source = sessions(10);
        assert_eq!(load_next(&source, 0, 0).len(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn id_cursor_resumes_after_last_seen() {
        let source = sessions(6);
        let page = load_from(&source, &WindowCursor::AfterId(RecordId::Int(2)), 3).unwrap();
        assert_eq!(ids(page), vec![3, 4, 5]);
    }

    #[test]
    fn id_cursor_survives_insertions_before_it() {
        let mut source = sessions(6);
        let cursor = WindowCursor::AfterId(RecordId::Int(4));
        source.insert(0, sessions(100).pop().unwrap());
        let page = load_from(&source, &cursor, 4).unwrap();
        assert_eq!(ids(page), vec![5, 6]);
    }

    #[test]
    fn cursor_offset_clamps_shown_count() {
        let source = sessions(3);
        assert_eq!(cursor_offset(&source, &WindowCursor::Shown(10)).unwrap(), 3);
        assert_eq!(
            cursor_offset(&source, &WindowCursor::AfterId(RecordId::Int(3))).unwrap(),
            3
        );
        assert_eq!(cursor_offset(&source, &WindowCursor::Start).unwrap(), 0);
    }

    #[test]
    fn vanished_cursor_is_reported() {
        let source = sessions(3);
        let err = load_from(&source, &WindowCursor::AfterId(RecordId::Int(42)), 4).unwrap_err();
        assert!(matches!(err, SearchError::CursorNotFound(ref id) if id == "42"));
    }

    #[test]
    fn paged_view_appends_until_exhausted() {
        let source = sessions(10);
        let mut view = PagedView::new(4);
        assert_eq!(view.cursor(), WindowCursor::Start);
        assert!(view.has_more(&source));

        assert_eq!(view.load_more(&source).unwrap(), 4);
        assert_eq!(view.load_more(&source).unwrap(), 4);
        assert_eq!(view.load_more(&source).unwrap(), 2);
        assert_eq!(view.load_more(&source).unwrap(), 0);

        assert_eq!(ids(view.shown()), (1..=10).collect::<Vec<_>>());
        assert!(!view.has_more(&source));
        assert_eq!(view.cursor(), WindowCursor::AfterId(RecordId::Int(10)));
    }

    proptest! {
        #[test]
        fn proptest_load_next_is_bounded_contiguous_slice(
            len in 0i64..50,
            shown in 0usize..60,
            page_size in 1usize..10,
        ) {
            let source = sessions(len);
            let page = load_next(&source, shown, page_size);
            let remaining = source.len().saturating_sub(shown);
            prop_assert_eq!(page.len(), remaining.min(page_size));
            if let Some(first) = page.first() {
                prop_assert_eq!(&first.id, &source[shown].id);
            }
        }
    }
}
