//! PostgreSQL Repository Implementations
//!
//! `comments` and `users` are owned by this service; `posts` and `pages`
//! belong to the content service and are only read here.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use kernel::id::{CommentId, PostId};

use crate::domain::entity::comment::{Comment, NewComment};
use crate::domain::repository::{
    CommentFilter, CommentPage, CommentRepository, PageRef, PageRequest, PostRef, SortOrder,
    TargetRepository,
};
use crate::domain::value_object::{
    author_name::AuthorName, comment_body::CommentBody, comment_state::CommentState,
    contact_address::ContactAddress, target::CommentTarget,
};
use crate::error::{CommentError, CommentResult};

const COMMENT_COLUMNS: &str = "id, post_id, page_slug, parent_id, author_name, author_email, \
     content, status, ip, user_agent, created_at, updated_at";

/// PostgreSQL-backed comment repository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgCommentRepository {
    async fn insert(&self, comment: &NewComment) -> CommentResult<Comment> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            INSERT INTO comments (
                post_id,
                page_slug,
                parent_id,
                author_name,
                author_email,
                content,
                status,
                ip,
                user_agent,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment.target.post_id().map(|id| id.value()))
        .bind(comment.target.page_slug())
        .bind(comment.parent_id.map(|id| id.value()))
        .bind(comment.author_name.as_str())
        .bind(comment.contact_address.as_str())
        .bind(comment.body.as_str())
        .bind(CommentState::Pending.as_str())
        .bind(comment.source_address.as_deref())
        .bind(comment.client_signature.as_deref())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        row.into_comment()
    }

    async fn find_by_id(&self, id: CommentId) -> CommentResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CommentRow::into_comment).transpose()
    }

    async fn update_state(&self, id: CommentId, state: CommentState) -> CommentResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE comments
            SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(state.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, id: CommentId) -> CommentResult<bool> {
        let deleted = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list(
        &self,
        filter: &CommentFilter,
        order: SortOrder,
        page: &PageRequest,
    ) -> CommentResult<CommentPage> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM comments");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut list_query =
            QueryBuilder::new(format!("SELECT {COMMENT_COLUMNS} FROM comments"));
        push_filter(&mut list_query, filter);
        list_query.push(match order {
            SortOrder::OldestFirst => " ORDER BY created_at ASC, id ASC",
            SortOrder::NewestFirst => " ORDER BY created_at DESC, id DESC",
        });
        list_query
            .push(" LIMIT ")
            .push_bind(i64::from(page.size))
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let rows: Vec<CommentRow> = list_query.build_query_as().fetch_all(&self.pool).await?;

        let items = rows
            .into_iter()
            .map(CommentRow::into_comment)
            .collect::<CommentResult<Vec<_>>>()?;

        Ok(CommentPage {
            items,
            total: total.max(0) as u64,
        })
    }
}

/// Append the WHERE clause for `filter` to a query
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &CommentFilter) {
    let mut prefix = " WHERE ";

    if let Some(target) = &filter.target {
        match target {
            CommentTarget::Post(id) => {
                query.push(prefix).push("post_id = ").push_bind(id.value());
            }
            CommentTarget::Page(slug) => {
                query
                    .push(prefix)
                    .push("page_slug = ")
                    .push_bind(slug.clone());
            }
        }
        prefix = " AND ";
    }

    if let Some(state) = filter.state {
        query.push(prefix).push("status = ").push_bind(state.as_str());
    }
}

// ============================================================================
// Target Repository Implementation
// ============================================================================

impl TargetRepository for PgCommentRepository {
    async fn find_post(&self, id: PostId) -> CommentResult<Option<PostRef>> {
        let row = sqlx::query_as::<_, PostRow>("SELECT id, status FROM posts WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| PostRef {
            id: PostId::from_i64(r.id),
            published: r.status == "published",
        }))
    }

    async fn find_page(&self, slug: &str) -> CommentResult<Option<PageRef>> {
        let row = sqlx::query_as::<_, PageRow>("SELECT slug FROM pages WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| PageRef { slug: r.slug }))
    }
}

// ============================================================================
// Row mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: Option<i64>,
    page_slug: Option<String>,
    parent_id: Option<i64>,
    author_name: String,
    author_email: String,
    content: String,
    status: String,
    ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> CommentResult<Comment> {
        let target = match (self.post_id, self.page_slug) {
            (Some(id), None) => CommentTarget::Post(PostId::from_i64(id)),
            (None, Some(slug)) => CommentTarget::Page(slug),
            _ => {
                return Err(CommentError::Internal(format!(
                    "comment {} targets neither or both of post and page",
                    self.id
                )));
            }
        };

        let state = CommentState::parse(&self.status).ok_or_else(|| {
            CommentError::Internal(format!(
                "comment {} has unknown status {:?}",
                self.id, self.status
            ))
        })?;

        Ok(Comment {
            comment_id: CommentId::from_i64(self.id),
            target,
            parent_id: self.parent_id.map(CommentId::from_i64),
            author_name: AuthorName::from_db(self.author_name),
            contact_address: ContactAddress::from_db(self.author_email),
            body: CommentBody::from_db(self.content),
            state,
            source_address: self.ip,
            client_signature: self.user_agent,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    status: String,
}

#[derive(sqlx::FromRow)]
struct PageRow {
    slug: String,
}
