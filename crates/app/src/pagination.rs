//! Paginated listing queries.
//!
//! Every listing endpoint runs the same pair of statements: a `COUNT(1)` over
//! the filtered rows and an ordered `OFFSET`/`LIMIT` window over the same
//! rows. Both statements receive their `WHERE` clause from one [`FilterSet`],
//! so the reported total always describes the rows being paged.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, postgres::PgRow};

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 50;

/// A validated page window. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Build a page window, applying defaults and clamping both values to 1.
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).max(1),
        }
    }

    #[must_use]
    pub const fn page(self) -> i64 {
        self.page
    }

    #[must_use]
    pub const fn limit(self) -> i64 {
        self.limit
    }

    /// Number of rows skipped before this page.
    #[must_use]
    pub const fn offset(self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            page: self.page,
            limit: self.limit,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FilterValue {
    Int(i32),
    Text(String),
    Timestamp(Timestamp),
}

#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Compare {
        column: &'static str,
        operator: &'static str,
        value: FilterValue,
    },
    Search {
        columns: &'static [&'static str],
        pattern: String,
    },
}

/// Conjunction of the filters a caller actually supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn equals_id(self, column: &'static str, value: Option<i32>) -> Self {
        self.compare(column, "=", value.map(FilterValue::Int))
    }

    #[must_use]
    pub(crate) fn equals_text(self, column: &'static str, value: Option<&str>) -> Self {
        let value = value
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| FilterValue::Text(value.to_string()));

        self.compare(column, "=", value)
    }

    #[must_use]
    pub(crate) fn since(self, column: &'static str, value: Option<Timestamp>) -> Self {
        self.compare(column, ">=", value.map(FilterValue::Timestamp))
    }

    #[must_use]
    pub(crate) fn until(self, column: &'static str, value: Option<Timestamp>) -> Self {
        self.compare(column, "<=", value.map(FilterValue::Timestamp))
    }

    /// Case-insensitive substring match on any of `columns`.
    #[must_use]
    pub(crate) fn search(mut self, columns: &'static [&'static str], term: Option<&str>) -> Self {
        if let Some(term) = term.map(str::trim).filter(|term| !term.is_empty()) {
            self.predicates.push(Predicate::Search {
                columns,
                pattern: format!("%{term}%"),
            });
        }

        self
    }

    fn compare(
        mut self,
        column: &'static str,
        operator: &'static str,
        value: Option<FilterValue>,
    ) -> Self {
        if let Some(value) = value {
            self.predicates.push(Predicate::Compare {
                column,
                operator,
                value,
            });
        }

        self
    }

    pub(crate) fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        for (index, predicate) in self.predicates.iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });

            match predicate {
                Predicate::Compare {
                    column,
                    operator,
                    value,
                } => {
                    builder.push(column).push(" ").push(operator).push(" ");

                    match value {
                        FilterValue::Int(value) => builder.push_bind(*value),
                        FilterValue::Text(value) => builder.push_bind(value.clone()),
                        FilterValue::Timestamp(value) => {
                            builder.push_bind(SqlxTimestamp::from(*value))
                        }
                    };
                }
                Predicate::Search { columns, pattern } => {
                    builder.push("(");

                    for (position, column) in columns.iter().enumerate() {
                        if position > 0 {
                            builder.push(" OR ");
                        }

                        builder.push(column).push(" ILIKE ").push_bind(pattern.clone());
                    }

                    builder.push(")");
                }
            }
        }
    }
}

/// The fixed parts of a paginated listing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PagedQuery {
    /// `SELECT COUNT(1) FROM ...` without a `WHERE` clause.
    pub(crate) count: &'static str,

    /// `SELECT ... FROM ... JOIN ...` without a `WHERE` clause.
    pub(crate) select: &'static str,

    /// Deterministic ordering, ending in a unique key.
    pub(crate) order_by: &'static str,
}

pub(crate) async fn fetch_page<T>(
    pool: &PgPool,
    query: PagedQuery,
    filters: &FilterSet,
    request: PageRequest,
) -> Result<Paginated<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut count = QueryBuilder::<Postgres>::new(query.count);

    filters.push_where(&mut count);

    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Postgres>::new(query.select);

    filters.push_where(&mut select);

    select
        .push(" ORDER BY ")
        .push(query.order_by)
        .push(" OFFSET ")
        .push_bind(request.offset())
        .push(" LIMIT ")
        .push_bind(request.limit());

    let items = select.build_query_as::<T>().fetch_all(pool).await?;

    Ok(Paginated {
        page: request.page(),
        limit: request.limit(),
        total,
        items,
    })
}
