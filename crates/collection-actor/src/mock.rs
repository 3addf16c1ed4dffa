//! # Mocks & Fault Injection
//!
//! Test doubles for code that sits on top of a [`ResourceClient`] or a
//! [`KeyValueStore`].
//!
//! ## When to use what
//!
//! | Tool | Replaces | Use Case |
//! |------|----------|----------|
//! | [`MockClient`] | A running actor | Unit testing logic *around* a client, error mapping |
//! | [`create_mock_client`] | A running actor | Inspecting the exact request a client sent |
//! | [`FlakyStore`] | A storage backend | Real actors, but writes to chosen keys fail |
//!
//! ## Pure mock
//!
//! ```rust
//! use collection_actor::mock::MockClient;
//! use collection_actor::{ActorEntity, FrameworkError, Stamp};
//! use std::convert::Infallible;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Tag { id: String }
//!
//! impl ActorEntity for Tag {
//!     type Id = String; type Create = (); type Update = Infallible;
//!     type Action = Infallible; type ActionResult = (); type Error = Infallible;
//!     fn id(&self) -> &String { &self.id }
//!     fn from_create_params(stamp: Stamp, _: (), _: &[Self]) -> Result<Self, Infallible> { Ok(Self { id: stamp.id }) }
//!     fn on_update(&mut self, u: Infallible, _: &[Self]) -> Result<(), Infallible> { match u {} }
//!     fn handle_action(_: &mut Vec<Self>, a: Infallible) -> Result<(), Infallible> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tag>::new();
//!     mock.expect_get("1".to_string()).return_ok(Some(Tag { id: "1".into() }));
//!     mock.expect_list().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get("1".to_string()).await.unwrap().is_some());
//!     assert!(matches!(client.list().await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Injecting storage failures
//!
//! Wrap the real store in a [`FlakyStore`], start the actors on it, then call
//! [`FlakyStore::fail_writes`] for the key whose write should fail. Reads keep
//! working, so the test can still inspect what was committed.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use crate::storage::{KeyValueStore, StorageError};
use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

type Reply<R, T> = Result<R, FrameworkError<<T as ActorEntity>::Error>>;

/// An expected request and the canned response for it.
enum Expectation<T: ActorEntity> {
    Create(Reply<T, T>),
    Get(T::Id, Reply<Option<T>, T>),
    List(Reply<Vec<T>, T>),
    Update(T::Id, Reply<T, T>),
    Action(Reply<T::ActionResult, T>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in the order they were set. A
/// request of the wrong kind, or for a different id than expected, panics the
/// background task, which the caller observes as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get(want, r))) => {
                        assert_eq!(id, want, "get for unexpected id");
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update(want, r)),
                    ) => {
                        assert_eq!(id, want, "update for unexpected id");
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> Expect<T, T> {
        self.expect(Expectation::Create)
    }

    pub fn expect_get(&mut self, id: T::Id) -> Expect<T, Option<T>> {
        self.expect(move |r| Expectation::Get(id, r))
    }

    pub fn expect_list(&mut self) -> Expect<T, Vec<T>> {
        self.expect(Expectation::List)
    }

    pub fn expect_update(&mut self, id: T::Id) -> Expect<T, T> {
        self.expect(move |r| Expectation::Update(id, r))
    }

    pub fn expect_action(&mut self) -> Expect<T, T::ActionResult> {
        self.expect(Expectation::Action)
    }

    fn expect<R>(
        &mut self,
        wrap: impl FnOnce(Reply<R, T>) -> Expectation<T> + Send + 'static,
    ) -> Expect<T, R> {
        Expect {
            wrap: Box::new(wrap),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder returned by the `expect_*` methods; pick the canned response.
pub struct Expect<T: ActorEntity, R> {
    wrap: Box<dyn FnOnce(Reply<R, T>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> Expect<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        let expectation = (self.wrap)(Ok(value));
        lock(&self.expectations).push_back(expectation);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError<T::Error>) {
        let expectation = (self.wrap)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiving end of its mailbox.
///
/// For tests that want to inspect the request a client wrapper sent and answer
/// it by hand, instead of scripting canned responses with [`MockClient`].
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

// =============================================================================
// STORAGE FAULT INJECTION
// =============================================================================

/// A [`KeyValueStore`] wrapper whose writes fail on demand.
pub struct FlakyStore {
    inner: Arc<dyn KeyValueStore>,
    failing: Mutex<HashSet<String>>,
}

impl FlakyStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner,
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Every later `set` for `key` fails until [`heal`](Self::heal) is called.
    pub fn fail_writes(&self, key: &str) {
        self.failing_keys().insert(key.to_string());
    }

    pub fn heal(&self, key: &str) {
        self.failing_keys().remove(key);
    }

    fn failing_keys(&self) -> MutexGuard<'_, HashSet<String>> {
        self.failing
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if self.failing_keys().contains(key) {
            return Err(StorageError::Write {
                key: key.to_string(),
                source: io::Error::other("injected write failure"),
            });
        }
        self.inner.set(key, value).await
    }
}
