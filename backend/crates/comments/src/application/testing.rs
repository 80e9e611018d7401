//! In-memory store fake shared by the use-case tests
//!
//! Implements both repository traits over plain vectors/maps, mirroring the
//! listing semantics of the SQL implementation (filter, order, paginate).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::id::{CommentId, PostId};

use crate::domain::entity::comment::{Comment, NewComment};
use crate::domain::repository::{
    CommentFilter, CommentPage, CommentRepository, PageRef, PageRequest, PostRef, SortOrder,
    TargetRepository,
};
use crate::domain::value_object::comment_state::CommentState;
use crate::error::CommentResult;

#[derive(Clone, Default)]
pub struct MemoryCommentStore {
    comments: Arc<Mutex<Vec<Comment>>>,
    next_id: Arc<Mutex<i64>>,
    posts: Arc<Mutex<HashMap<i64, bool>>>,
    pages: Arc<Mutex<HashSet<String>>>,
}

impl MemoryCommentStore {
    pub fn with_post(self, id: i64, published: bool) -> Self {
        self.posts.lock().unwrap().insert(id, published);
        self
    }

    pub fn with_page(self, slug: &str) -> Self {
        self.pages.lock().unwrap().insert(slug.to_string());
        self
    }
}

impl CommentRepository for MemoryCommentStore {
    async fn insert(&self, comment: &NewComment) -> CommentResult<Comment> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let now = Utc::now();
        let stored = Comment {
            comment_id: CommentId::from_i64(*next_id),
            target: comment.target.clone(),
            parent_id: comment.parent_id,
            author_name: comment.author_name.clone(),
            contact_address: comment.contact_address.clone(),
            body: comment.body.clone(),
            state: CommentState::Pending,
            source_address: comment.source_address.clone(),
            client_signature: comment.client_signature.clone(),
            created_at: now,
            updated_at: now,
        };

        self.comments.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: CommentId) -> CommentResult<Option<Comment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.comment_id == id)
            .cloned())
    }

    async fn update_state(&self, id: CommentId, state: CommentState) -> CommentResult<bool> {
        let mut comments = self.comments.lock().unwrap();
        match comments.iter_mut().find(|c| c.comment_id == id) {
            Some(comment) => {
                comment.state = state;
                comment.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: CommentId) -> CommentResult<bool> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.comment_id != id);
        Ok(comments.len() < before)
    }

    async fn list(
        &self,
        filter: &CommentFilter,
        order: SortOrder,
        page: &PageRequest,
    ) -> CommentResult<CommentPage> {
        let comments = self.comments.lock().unwrap();

        let mut matching: Vec<Comment> = comments
            .iter()
            .filter(|c| filter.target.as_ref().is_none_or(|t| c.target == *t))
            .filter(|c| filter.state.is_none_or(|s| c.state == s))
            .cloned()
            .collect();

        match order {
            SortOrder::OldestFirst => matching.sort_by_key(|c| c.comment_id),
            SortOrder::NewestFirst => {
                matching.sort_by_key(|c| std::cmp::Reverse(c.comment_id))
            }
        }

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect();

        Ok(CommentPage { items, total })
    }
}

impl TargetRepository for MemoryCommentStore {
    async fn find_post(&self, id: PostId) -> CommentResult<Option<PostRef>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .get(&id.value())
            .map(|&published| PostRef { id, published }))
    }

    async fn find_page(&self, slug: &str) -> CommentResult<Option<PageRef>> {
        Ok(self.pages.lock().unwrap().get(slug).map(|s| PageRef {
            slug: s.clone(),
        }))
    }
}
