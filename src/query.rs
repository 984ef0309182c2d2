// src/query.rs

//! SQL construction for the `posts` listing.
//!
//! Filters become predicate/parameter pairs that are folded into a single
//! `WHERE` clause. The page query and the count query share that clause, so
//! `total_pages` always describes the filtered result set.

use sqlx::{Postgres, QueryBuilder};

use crate::models::post::PostListParams;

/// Fixed number of rows per page.
pub const PAGE_SIZE: i64 = 5;

/// Highest accepted page number; keeps `(page - 1) * PAGE_SIZE` well inside `i64`.
pub const MAX_PAGE: i64 = 1_000_000_000;

pub const POST_COLUMNS: &str =
    "post_id, user_id, title, content, status, likes, category, created_at, updated_at, published_at";

/// Optional constraints narrowing the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub status: Option<String>,
    pub keywords: Option<String>,
}

/// One `<clause> $n` fragment and the value bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Predicate {
    clause: &'static str,
    value: String,
}

impl PostFilter {
    /// Empty strings count as "no filter".
    pub fn from_params(params: &PostListParams) -> Self {
        Self {
            status: non_empty(params.status.as_deref()),
            keywords: non_empty(params.keywords.as_deref()),
        }
    }

    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(status) = &self.status {
            predicates.push(Predicate {
                clause: "status = ",
                value: status.clone(),
            });
        }

        if let Some(keywords) = &self.keywords {
            predicates.push(Predicate {
                clause: "title ILIKE ",
                value: contains_pattern(keywords),
            });
        }

        predicates
    }

    /// Appends ` WHERE a = $1 AND b ILIKE $2` (or nothing when unfiltered).
    pub fn push_where<'args>(&self, builder: &mut QueryBuilder<'args, Postgres>) {
        let predicates = self.predicates();
        if predicates.is_empty() {
            return;
        }

        builder.push(" WHERE ");
        let mut separated = builder.separated(" AND ");
        for predicate in predicates {
            separated.push(predicate.clause);
            separated.push_bind_unseparated(predicate.value);
        }
    }
}

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    /// Values are clamped to `1..=MAX_PAGE`.
    pub fn new(number: i64) -> Self {
        Self(number.clamp(1, MAX_PAGE))
    }

    pub fn number(self) -> i64 {
        self.0
    }

    pub fn offset(self) -> i64 {
        (self.0 - 1) * PAGE_SIZE
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}

/// Number of pages needed to show `count` rows.
pub fn total_pages(count: i64) -> i64 {
    if count <= 0 {
        return 0;
    }
    (count + PAGE_SIZE - 1) / PAGE_SIZE
}

/// `SELECT ... FROM posts [WHERE ...] ORDER BY post_id LIMIT $n OFFSET $m`
pub fn select_page(filter: &PostFilter, page: Page) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM posts", POST_COLUMNS));
    filter.push_where(&mut builder);
    builder.push(" ORDER BY post_id LIMIT ");
    builder.push_bind(PAGE_SIZE);
    builder.push(" OFFSET ");
    builder.push_bind(page.offset());
    builder
}

/// `SELECT COUNT(*) FROM posts [WHERE ...]`
pub fn count(filter: &PostFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM posts");
    filter.push_where(&mut builder);
    builder
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Wraps a search term for a substring `ILIKE`, escaping its own wildcards.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
