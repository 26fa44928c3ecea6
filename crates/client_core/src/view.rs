//! Filtered view, pagination arithmetic, and row/pagination markup.
//!
//! Rendering produces markup strings only; the host page swaps them into
//! the table body and pagination list. Every interpolated value goes
//! through [`escape_html`] — no exceptions per entity.

use crate::record::TableRecord;

/// Fixed page size where pagination is enabled (students).
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Case-insensitive substring filter over each record's designated search
/// fields. A blank (or whitespace-only) query returns everything; relative
/// order is always preserved.
pub fn filter_records<'a, R: TableRecord>(records: &'a [R], query: &str) -> Vec<&'a R> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|r| {
            r.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&q))
        })
        .collect()
}

/// Current-page tracking and slice arithmetic over the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Never zero: an empty list still has one (empty) page.
    pub fn page_count(&self, filtered_len: usize) -> usize {
        filtered_len.div_ceil(self.page_size).max(1)
    }

    /// Half-open bounds of the current page within the filtered view.
    pub fn slice_bounds(&self, filtered_len: usize) -> (usize, usize) {
        let start = (self.current - 1) * self.page_size;
        let end = (start + self.page_size).min(filtered_len);
        (start.min(filtered_len), end)
    }

    /// Clamps into `[1, page_count]` rather than rejecting, the way the
    /// prev/next controls do.
    pub fn set_page(&mut self, page: usize, filtered_len: usize) {
        self.current = page.clamp(1, self.page_count(filtered_len));
    }

    /// Back to page 1 (on every query change).
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Pulls the current page back into range after deletions shrink the
    /// filtered view.
    pub fn clamp(&mut self, filtered_len: usize) {
        self.current = self.current.min(self.page_count(filtered_len));
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders `<tr>` markup for one page of records. Rows are keyed by the
/// record's stable id via `data-id`; an empty slice becomes a single
/// placeholder row spanning every column including the actions column.
pub fn render_rows<R: TableRecord>(slice: &[&R]) -> String {
    if slice.is_empty() {
        let colspan = R::columns().len() + 1;
        return format!(
            "<tr><td colspan=\"{colspan}\" class=\"text-center text-muted\">No {} found.</td></tr>\n",
            R::ENTITY.label_plural()
        );
    }

    let mut out = String::new();
    for record in slice {
        let id = record.id().unwrap_or_default();
        out.push_str("<tr>");
        for cell in record.cells() {
            out.push_str("<td>");
            out.push_str(&escape_html(&cell));
            out.push_str("</td>");
        }
        out.push_str("<td>");
        out.push_str(&format!(
            "<button class=\"btn btn-sm btn-outline-primary me-1 btn-edit\" \
             data-id=\"{id}\" data-action=\"edit\">Edit</button>"
        ));
        out.push_str(&format!(
            "<button class=\"btn btn-sm btn-outline-danger btn-delete\" \
             data-id=\"{id}\" data-action=\"delete\">Delete</button>"
        ));
        out.push_str("</td></tr>\n");
    }
    out
}

/// Renders the pagination control list: prev, one item per page, next.
/// Prev/next are disabled at the boundaries; the current page is active.
pub fn render_pagination(pager: &Pager, filtered_len: usize) -> String {
    let pages = pager.page_count(filtered_len);
    let current = pager.current();

    let mut out = String::new();
    out.push_str(&page_item("<", current.saturating_sub(1).max(1), current == 1, false));
    for page in 1..=pages {
        out.push_str(&page_item(&page.to_string(), page, false, page == current));
    }
    out.push_str(&page_item(">", (current + 1).min(pages), current == pages, false));
    out
}

fn page_item(label: &str, page: usize, disabled: bool, active: bool) -> String {
    let mut class = String::from("page-item");
    if disabled {
        class.push_str(" disabled");
    }
    if active {
        class.push_str(" active");
    }
    format!(
        "<li class=\"{class}\"><a class=\"page-link\" href=\"#\" data-page=\"{page}\">{}</a></li>\n",
        escape_html(label)
    )
}

#[cfg(test)]
mod tests {
    use shared::domain::College;

    use super::*;

    fn colleges() -> Vec<College> {
        vec![
            College {
                id: Some(1),
                code: "CCS".into(),
                name: "College of Computer Studies".into(),
            },
            College {
                id: Some(2),
                code: "COE".into(),
                name: "College of Engineering".into(),
            },
            College {
                id: Some(3),
                code: "CBAA".into(),
                name: "College of Business Administration and Accountancy".into(),
            },
        ]
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let list = colleges();
        let filtered = filter_records(&list, "");
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().zip(&list).all(|(a, b)| a.code == b.code));

        let filtered = filter_records(&list, "   ");
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_substring_match() {
        let list = colleges();
        let filtered = filter_records(&list, "cs");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].code, "CCS");

        let filtered = filter_records(&list, "ENGIN");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].code, "COE");
    }

    #[test]
    fn filter_preserves_relative_order() {
        let list = colleges();
        // "college" matches every name
        let filtered = filter_records(&list, "college");
        let codes: Vec<_> = filtered.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["CCS", "COE", "CBAA"]);
    }

    #[test]
    fn page_count_rounds_up_with_minimum_one() {
        let pager = Pager::new(8);
        assert_eq!(pager.page_count(0), 1);
        assert_eq!(pager.page_count(8), 1);
        assert_eq!(pager.page_count(9), 2);
        assert_eq!(pager.page_count(17), 3);
    }

    #[test]
    fn slice_bounds_follow_page_arithmetic() {
        let mut pager = Pager::new(8);
        assert_eq!(pager.slice_bounds(20), (0, 8));

        pager.set_page(3, 20);
        let (start, end) = pager.slice_bounds(20);
        assert_eq!((start, end), (16, 20));
        assert_eq!(end - start, 20 % 8);

        pager.set_page(2, 16);
        let (start, end) = pager.slice_bounds(16);
        assert_eq!(end - start, 8);
    }

    #[test]
    fn set_page_clamps_at_boundaries() {
        let mut pager = Pager::new(8);
        pager.set_page(99, 10);
        assert_eq!(pager.current(), 2);
        pager.set_page(0, 10);
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn clamp_pulls_current_page_back_after_shrink() {
        let mut pager = Pager::new(8);
        pager.set_page(3, 17);
        pager.clamp(8);
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn rows_escape_interpolated_text() {
        let list = vec![College {
            id: Some(9),
            code: "<X>".into(),
            name: "Evil \"College\" & Co".into(),
        }];
        let refs: Vec<&College> = list.iter().collect();
        let html = render_rows(&refs);
        assert!(html.contains("&lt;X&gt;"));
        assert!(html.contains("Evil &quot;College&quot; &amp; Co"));
        assert!(!html.contains("<X>"));
        assert!(html.contains("data-id=\"9\""));
    }

    #[test]
    fn empty_slice_renders_placeholder_row() {
        let refs: Vec<&College> = Vec::new();
        let html = render_rows(&refs);
        assert!(html.contains("colspan=\"3\""));
        assert!(html.contains("No colleges found."));
    }

    #[test]
    fn pagination_disables_prev_on_first_and_next_on_last_page() {
        let pager = Pager::new(8);
        let html = render_pagination(&pager, 20);
        let first_item = html.lines().next().unwrap();
        assert!(first_item.contains("disabled"));
        assert!(html.contains("page-item active"));
        assert_eq!(html.matches("page-link").count(), 5); // prev + 3 pages + next

        let mut pager = Pager::new(8);
        pager.set_page(3, 20);
        let html = render_pagination(&pager, 20);
        let last_item = html.lines().last().unwrap();
        assert!(last_item.contains("disabled"));
    }
}
