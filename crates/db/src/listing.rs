//! Generic list query: exact filters, multi-term search, ordering and paging.
//!
//! Every list endpoint describes its table once with a [`ListSpec`] and feeds
//! request parameters through a [`ListQuery`]. Column names only ever come
//! from the `'static` spec, never from the request, so they can be pushed as
//! raw SQL while all values are bound.

use pwatch_core::listing::{
    like_pattern, order_by_sql, parse_ordering, search_terms, PageInfo, PageRequest,
};
use pwatch_core::types::Date;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

// ---------------------------------------------------------------------------
// Spec + query
// ---------------------------------------------------------------------------

/// Static description of a listable table.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    pub table: &'static str,
    /// Select list, as used in `SELECT {columns} FROM {table}`.
    pub columns: &'static str,
    pub search_columns: &'static [&'static str],
    pub ordering_fields: &'static [&'static str],
    pub default_ordering: &'static [&'static str],
    pub page_size: i64,
}

/// A bound value for an exact-match filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Date(Date),
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Date> for FilterValue {
    fn from(v: Date) -> Self {
        Self::Date(v)
    }
}

/// Request-side list parameters.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Vec<(&'static str, FilterValue)>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListQuery {
    /// Add an exact-match filter on `column`.
    pub fn filter(mut self, column: &'static str, value: impl Into<FilterValue>) -> Self {
        self.filters.push((column, value.into()));
        self
    }

    /// Add a filter only when the value is present.
    pub fn filter_opt<V: Into<FilterValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.filter(column, v),
            None => self,
        }
    }
}

/// One page of results plus its pagination block.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Convert every item, keeping the pagination block.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Run the count and page queries for `spec` filtered by `query`.
///
/// A page past the end yields an empty `items` with accurate `info`.
pub async fn fetch_page<T>(
    pool: &PgPool,
    spec: &ListSpec,
    query: &ListQuery,
) -> Result<Page<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let page = PageRequest::new(query.page, query.page_size, spec.page_size);
    let terms = search_terms(query.search.as_deref());

    let mut count_qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", spec.table));
    push_where(&mut count_qb, spec, &query.filters, &terms);
    let count: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let ordering = parse_ordering(
        query.ordering.as_deref(),
        spec.ordering_fields,
        spec.default_ordering,
    );
    let mut select_qb =
        QueryBuilder::<Postgres>::new(format!("SELECT {} FROM {}", spec.columns, spec.table));
    push_where(&mut select_qb, spec, &query.filters, &terms);
    select_qb.push(" ORDER BY ");
    select_qb.push(order_by_sql(&ordering));
    select_qb.push(" LIMIT ");
    select_qb.push_bind(page.limit());
    select_qb.push(" OFFSET ");
    select_qb.push_bind(page.offset());

    let items = select_qb.build_query_as::<T>().fetch_all(pool).await?;
    Ok(Page {
        items,
        info: page.info(count),
    })
}

fn push_where(
    qb: &mut QueryBuilder<'_, Postgres>,
    spec: &ListSpec,
    filters: &[(&'static str, FilterValue)],
    terms: &[String],
) {
    qb.push(" WHERE TRUE");

    for (column, value) in filters {
        qb.push(format!(" AND \"{column}\" = "));
        match value {
            FilterValue::Text(v) => qb.push_bind(v.clone()),
            FilterValue::Bool(v) => qb.push_bind(*v),
            FilterValue::Int(v) => qb.push_bind(*v),
            FilterValue::Date(v) => qb.push_bind(*v),
        };
    }

    if spec.search_columns.is_empty() {
        return;
    }
    for term in terms {
        let pattern = like_pattern(term);
        qb.push(" AND (");
        for (i, column) in spec.search_columns.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(format!("COALESCE(\"{column}\", '') ILIKE "));
            qb.push_bind(pattern.clone());
            qb.push(" ESCAPE '\\'");
        }
        qb.push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: ListSpec = ListSpec {
        table: "blogs",
        columns: "id, title",
        search_columns: &["title", "author"],
        ordering_fields: &["title"],
        default_ordering: &["-created_at"],
        page_size: 12,
    };

    #[test]
    fn where_clause_ands_filters_and_ors_search_columns() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id FROM blogs");
        let filters = vec![("status", FilterValue::from("published"))];
        let terms = vec!["budget".to_string(), "act".to_string()];
        push_where(&mut qb, &SPEC, &filters, &terms);
        assert_eq!(
            qb.sql(),
            "SELECT id FROM blogs WHERE TRUE AND \"status\" = $1 \
             AND (COALESCE(\"title\", '') ILIKE $2 ESCAPE '\\' OR COALESCE(\"author\", '') ILIKE $3 ESCAPE '\\') \
             AND (COALESCE(\"title\", '') ILIKE $4 ESCAPE '\\' OR COALESCE(\"author\", '') ILIKE $5 ESCAPE '\\')"
        );
    }

    #[test]
    fn filter_opt_skips_missing_values() {
        let q = ListQuery::default()
            .filter_opt::<String>("category", None)
            .filter_opt("featured", Some(true));
        assert_eq!(q.filters, vec![("featured", FilterValue::Bool(true))]);
    }
}
