//! List-endpoint query parsing: pagination, ordering and search terms.
//!
//! Kept free of SQL execution so the rules can be unit tested; the db crate
//! turns the parsed values into a query.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Page size used when a resource does not declare its own.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound for a client-supplied `page_size`.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated page-number request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Clamp raw `?page=&page_size=` values.
    ///
    /// `page` floors at 1; `page_size` falls back to `default_size` and is
    /// clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, page_size: Option<i64>, default_size: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Pagination metadata for a result set of `count` rows.
    pub fn info(&self, count: i64) -> PageInfo {
        let total_pages = if count == 0 {
            0
        } else {
            (count + self.page_size - 1) / self.page_size
        };
        PageInfo {
            count,
            page: self.page,
            page_size: self.page_size,
            total_pages,
        }
    }
}

/// Pagination block returned alongside list data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Total rows matching the filters (ignoring pagination).
    pub count: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// One `ORDER BY` term. `field` always comes from a resource's allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub field: &'static str,
    pub descending: bool,
}

/// Parse an `?ordering=` value such as `-published_date,title`.
///
/// Fields not present in `allowed` are ignored. When nothing valid remains,
/// `default` (same syntax, one field per entry) is used instead.
pub fn parse_ordering(
    raw: Option<&str>,
    allowed: &[&'static str],
    default: &[&'static str],
) -> Vec<OrderTerm> {
    let requested: Vec<OrderTerm> = raw
        .unwrap_or_default()
        .split(',')
        .filter_map(|part| parse_term(part.trim(), allowed))
        .collect();

    if !requested.is_empty() {
        return requested;
    }

    default
        .iter()
        .filter_map(|part| {
            let (name, descending) = split_direction(part);
            Some(OrderTerm {
                field: strip_static(part, name)?,
                descending,
            })
        })
        .collect()
}

/// Render terms as an SQL `ORDER BY` body with `id` as a final tiebreaker.
///
/// Identifiers are quoted because several tables have an `order` column.
pub fn order_by_sql(terms: &[OrderTerm]) -> String {
    let mut parts: Vec<String> = terms
        .iter()
        .map(|t| format!("\"{}\" {}", t.field, if t.descending { "DESC" } else { "ASC" }))
        .collect();
    if !terms.iter().any(|t| t.field == "id") {
        let tiebreak = if terms.first().is_some_and(|t| t.descending) {
            "\"id\" DESC"
        } else {
            "\"id\" ASC"
        };
        parts.push(tiebreak.to_string());
    }
    parts.join(", ")
}

fn parse_term(part: &str, allowed: &[&'static str]) -> Option<OrderTerm> {
    let (name, descending) = split_direction(part);
    allowed
        .iter()
        .find(|f| **f == name)
        .copied()
        .map(|field| OrderTerm {
            field,
            descending,
        })
}

fn split_direction(part: &str) -> (&str, bool) {
    match part.strip_prefix('-') {
        Some(name) => (name, true),
        None => (part, false),
    }
}

/// Recover the `'static` field name from a `'static` default entry.
fn strip_static(part: &'static str, name: &str) -> Option<&'static str> {
    if name.is_empty() {
        None
    } else {
        Some(&part[part.len() - name.len()..])
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Split a `?search=` value into terms. Every term must match some field.
pub fn search_terms(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build a case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
///
/// # Examples
///
/// ```
/// use pwatch_core::listing::like_pattern;
/// assert_eq!(like_pattern("50%"), "%50\\%%");
/// ```
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[&str] = &["published_date", "created_at", "title"];
    const DEFAULT: &[&str] = &["-published_date", "-created_at"];

    // -- pagination ---------------------------------------------------------

    #[test]
    fn page_request_defaults() {
        let page = PageRequest::new(None, None, 12);
        assert_eq!(page, PageRequest { page: 1, page_size: 12 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn page_request_clamps_bounds() {
        let page = PageRequest::new(Some(0), Some(1000), 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);

        let page = PageRequest::new(Some(-3), Some(0), 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
    }

    #[test]
    fn offset_uses_page_number() {
        let page = PageRequest::new(Some(3), Some(15), 20);
        assert_eq!(page.offset(), 30);
        assert_eq!(page.limit(), 15);
    }

    #[test]
    fn info_rounds_total_pages_up() {
        let page = PageRequest::new(Some(1), Some(12), 12);
        assert_eq!(page.info(25).total_pages, 3);
        assert_eq!(page.info(24).total_pages, 2);
        assert_eq!(page.info(0).total_pages, 0);
    }

    // -- ordering -----------------------------------------------------------

    #[test]
    fn ordering_uses_requested_fields() {
        let terms = parse_ordering(Some("title,-created_at"), ALLOWED, DEFAULT);
        assert_eq!(
            terms,
            vec![
                OrderTerm { field: "title", descending: false },
                OrderTerm { field: "created_at", descending: true },
            ]
        );
    }

    #[test]
    fn ordering_ignores_unknown_fields() {
        let terms = parse_ordering(Some("password,-title"), ALLOWED, DEFAULT);
        assert_eq!(terms, vec![OrderTerm { field: "title", descending: true }]);
    }

    #[test]
    fn ordering_falls_back_to_default() {
        let terms = parse_ordering(Some("bogus"), ALLOWED, DEFAULT);
        assert_eq!(
            order_by_sql(&terms),
            r#""published_date" DESC, "created_at" DESC, "id" DESC"#
        );

        let terms = parse_ordering(None, ALLOWED, &["order", "name"]);
        assert_eq!(order_by_sql(&terms), r#""order" ASC, "name" ASC, "id" ASC"#);
    }

    #[test]
    fn order_by_does_not_duplicate_id() {
        let terms = [OrderTerm { field: "id", descending: false }];
        assert_eq!(order_by_sql(&terms), r#""id" ASC"#);
    }

    // -- search -------------------------------------------------------------

    #[test]
    fn search_terms_split_on_whitespace_and_commas() {
        assert_eq!(
            search_terms(Some("  budget, education  2025 ")),
            vec!["budget", "education", "2025"]
        );
        assert!(search_terms(Some("   ")).is_empty());
        assert!(search_terms(None).is_empty());
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }
}
