use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Comment, NewPost, Post, parse_route_id};
use crate::error::{ErrorKind, RemoteError, StoreError};
use crate::ports::PostCollection;
use crate::store::PostStore;

/// Scripted collection backing the store tests: behaves like the mock
/// server (appends creates, assigns incrementing ids) and can be told to
/// fail any operation.
struct ScriptedCollection {
    posts: RwLock<Vec<Post>>,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    fail_replace: AtomicBool,
}

impl ScriptedCollection {
    fn new(seed: Vec<Post>) -> Arc<Self> {
        Arc::new(Self {
            posts: RwLock::new(seed),
            fail_list: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fail_replace: AtomicBool::new(false),
        })
    }

    fn fail_next_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    fn fail_next_create(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    fn fail_next_replace(&self) {
        self.fail_replace.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostCollection for ScriptedCollection {
    async fn list(&self) -> Result<Vec<Post>, RemoteError> {
        if self.fail_list.swap(false, Ordering::SeqCst) {
            return Err(RemoteError::Status { status: 401 });
        }
        Ok(self.posts.read().await.clone())
    }

    async fn fetch(&self, id: i64) -> Result<Option<Post>, RemoteError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, post: NewPost) -> Result<Post, RemoteError> {
        if self.fail_create.swap(false, Ordering::SeqCst) {
            return Err(RemoteError::Transport("connection refused".into()));
        }
        let mut posts = self.posts.write().await;
        let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let created = Post {
            id,
            title: post.title,
            content: post.content,
            author: post.author,
            user_id: post.user_id,
            created_at: post.created_at,
            updated_at: None,
            comments: post.comments,
        };
        posts.push(created.clone());
        Ok(created)
    }

    async fn replace(&self, post: &Post) -> Result<Post, RemoteError> {
        if self.fail_replace.swap(false, Ordering::SeqCst) {
            return Err(RemoteError::Status { status: 403 });
        }
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RemoteError::NotFound(post.id))?;
        *slot = post.clone();
        Ok(post.clone())
    }

    async fn remove(&self, id: i64) -> Result<(), RemoteError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RemoteError::NotFound(id));
        }
        Ok(())
    }
}

fn post(id: i64, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: format!("content of {title}"),
        author: "alice".to_string(),
        user_id: Some(1),
        created_at: Utc::now(),
        updated_at: None,
        comments: Vec::new(),
    }
}

fn store_with(seed: Vec<Post>) -> (PostStore, Arc<ScriptedCollection>) {
    let remote = ScriptedCollection::new(seed);
    (PostStore::new(remote.clone()), remote)
}

#[tokio::test]
async fn load_all_replaces_local_state() {
    let (store, _) = store_with(vec![post(1, "first"), post(2, "second")]);

    store.load_all().await.unwrap();

    let posts = store.posts().await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "first");
    assert!(!store.is_loading().await);
    assert_eq!(store.last_error().await, None);
}

#[tokio::test]
async fn load_all_failure_retains_previous_state() {
    let (store, remote) = store_with(vec![post(1, "first")]);
    store.load_all().await.unwrap();

    remote.fail_next_list();
    let err = store.load_all().await.unwrap_err();

    assert!(matches!(err, StoreError::FetchFailed(_)));
    assert_eq!(store.posts().await.len(), 1);
    assert!(!store.is_loading().await);
    assert_eq!(store.last_error().await, Some(ErrorKind::FetchFailed));
}

#[tokio::test]
async fn create_resynchronizes_and_returns_last_post() {
    let (store, _) = store_with(Vec::new());
    store.load_all().await.unwrap();

    let returned = store
        .create(NewPost::new("T1", "C1", "a", Some(1)))
        .await
        .unwrap()
        .expect("collection non-empty after create");

    assert_eq!(returned.title, "T1");
    assert_eq!(returned.content, "C1");
    assert_eq!(returned.id, 1);

    let posts = store.posts().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "T1");
    assert!(posts[0].comments.is_empty());
}

#[tokio::test]
async fn create_failure_leaves_state_unchanged() {
    let (store, remote) = store_with(vec![post(1, "first")]);
    store.load_all().await.unwrap();

    remote.fail_next_create();
    let err = store
        .create(NewPost::new("T", "C", "a", None))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::RemoteWriteFailed(_)));
    assert_eq!(store.posts().await.len(), 1);
    assert_eq!(store.last_error().await, Some(ErrorKind::RemoteWriteFailed));
}

#[tokio::test]
async fn delete_local_removes_exactly_one_post() {
    let mut second = post(2, "second");
    second.comments.push(Comment::new(7, "hi", "bob", None));
    let (store, _) = store_with(vec![post(1, "first"), second, post(3, "third")]);
    store.load_all().await.unwrap();

    assert!(store.delete_local(2).await);

    let posts = store.posts().await;
    assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);

    // unknown id is a no-op
    assert!(!store.delete_local(99).await);
    assert_eq!(store.posts().await.len(), 2);
}

#[tokio::test]
async fn add_comment_appends_after_server_confirmation() {
    let (store, remote) = store_with(vec![post(1, "first")]);
    store.load_all().await.unwrap();

    let comment = store.add_comment(1, "hello", "bob", Some(7)).await.unwrap();

    assert_eq!(comment.content, "hello");
    assert_eq!(comment.author, "bob");
    assert_eq!(comment.user_id, Some(7));

    let posts = store.posts().await;
    assert_eq!(posts[0].comments.len(), 1);
    assert_eq!(posts[0].comments[0].content, "hello");
    assert!(!posts[0].comments[0].created_at.to_rfc3339().is_empty());

    // the replace reached the remote
    let remote_post = remote.fetch(1).await.unwrap().unwrap();
    assert_eq!(remote_post.comments.len(), 1);
}

#[tokio::test]
async fn add_comment_failure_is_not_applied_optimistically() {
    let (store, remote) = store_with(vec![post(1, "first")]);
    store.load_all().await.unwrap();

    remote.fail_next_replace();
    let err = store.add_comment(1, "hello", "bob", None).await.unwrap_err();

    assert!(matches!(err, StoreError::CommentWriteFailed { .. }));
    assert!(store.posts().await[0].comments.is_empty());
    assert_eq!(store.last_error().await, Some(ErrorKind::CommentWriteFailed));
}

#[tokio::test]
async fn add_comment_on_unknown_post_makes_no_network_call() {
    let (store, remote) = store_with(vec![post(1, "first")]);
    store.load_all().await.unwrap();

    // would fail loudly if a replace were attempted
    remote.fail_next_replace();
    let err = store.add_comment(42, "hello", "bob", None).await.unwrap_err();

    assert!(matches!(
        err,
        StoreError::CommentWriteFailed { post_id: 42, .. }
    ));
    // the scripted failure is still armed: nothing was sent
    assert!(remote.fail_replace.load(Ordering::SeqCst));
}

#[tokio::test]
async fn delete_comment_empties_list_and_double_delete_fails() {
    let mut seeded = post(1, "first");
    seeded.comments.push(Comment::new(7, "hi", "bob", Some(7)));
    let (store, _) = store_with(vec![seeded]);
    store.load_all().await.unwrap();

    store.delete_comment(1, 7).await.unwrap();
    assert!(store.posts().await[0].comments.is_empty());

    // the id is gone now; a second delete reports failure, state unchanged
    let err = store.delete_comment(1, 7).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::CommentDeleteFailed {
            post_id: 1,
            comment_id: 7,
            ..
        }
    ));
    assert!(store.posts().await[0].comments.is_empty());
    assert_eq!(
        store.last_error().await,
        Some(ErrorKind::CommentDeleteFailed)
    );
}

#[tokio::test]
async fn delete_comment_remote_failure_leaves_state_unchanged() {
    let mut seeded = post(1, "first");
    seeded.comments.push(Comment::new(7, "hi", "bob", None));
    let (store, remote) = store_with(vec![seeded]);
    store.load_all().await.unwrap();

    remote.fail_next_replace();
    let err = store.delete_comment(1, 7).await.unwrap_err();

    assert!(matches!(err, StoreError::CommentDeleteFailed { .. }));
    assert_eq!(store.posts().await[0].comments.len(), 1);
}

#[tokio::test]
async fn get_post_by_numeric_and_route_forms() {
    let (store, _) = store_with(vec![post(12, "twelve")]);
    store.load_all().await.unwrap();

    assert_eq!(store.get_post(12).await.unwrap().title, "twelve");
    assert!(store.get_post(99).await.is_none());

    // route-param coercion for string ids
    let id = parse_route_id("12").unwrap();
    assert_eq!(store.get_post(id).await.unwrap().title, "twelve");
    assert!(parse_route_id("nope").is_none());
}

#[tokio::test]
async fn comment_ids_stay_unique_within_a_post() {
    let (store, _) = store_with(vec![post(1, "first")]);
    store.load_all().await.unwrap();

    // rapid successive comments can land on the same millisecond; the
    // minted ids must still be distinct within the post
    let a = store.add_comment(1, "one", "bob", None).await.unwrap();
    let b = store.add_comment(1, "two", "bob", None).await.unwrap();
    let c = store.add_comment(1, "three", "bob", None).await.unwrap();

    assert_ne!(a.id, b.id);
    assert_ne!(b.id, c.id);
    assert_ne!(a.id, c.id);
    assert_eq!(store.posts().await[0].comments.len(), 3);
}
