//! Test transports for livepage-reactive integration tests.

#![allow(dead_code)]

use livepage_reactive::{
    Document, DocumentChange, DocumentKey, Error, Listener, QueryDescriptor, Result, Snapshot,
    Transport,
};
use std::collections::HashMap;

/// Installs a test subscriber once so `RUST_LOG=livepage_reactive=debug`
/// shows controller decisions in failing tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Query descriptor rebuilt by callers on every round.
#[derive(Clone, Debug)]
pub struct Query {
    pub collection: String,
    pub order_by: String,
}

impl Query {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            order_by: "created_at".to_string(),
        }
    }
}

impl QueryDescriptor for Query {
    fn is_equal(&self, other: &Self) -> bool {
        self.collection == other.collection && self.order_by == other.order_by
    }
}

pub fn doc(id: &str, value: u32) -> Document<u32> {
    Document::new(format!("items/{id}"), value)
}

pub fn key(id: &str) -> DocumentKey {
    DocumentKey::new(format!("items/{id}"))
}

/// One subscription opened on `ManualTransport`.
pub struct Opened {
    pub handle: u64,
    pub query: Query,
    pub window: usize,
    pub listen_options: Option<&'static str>,
    pub listener: Listener<u32>,
    pub closed: bool,
}

/// Transport whose deliveries are driven by the test.
#[derive(Default)]
pub struct ManualTransport {
    pub opened: Vec<Opened>,
    pub close_calls: usize,
    pub fail_next: Option<Error>,
}

impl ManualTransport {
    pub fn live(&self) -> Vec<&Opened> {
        self.opened.iter().filter(|o| !o.closed).collect()
    }

    pub fn latest(&self) -> &Opened {
        self.opened.last().expect("no subscription opened")
    }

    /// Delivers through the listener of a subscription, closed or not.
    pub fn emit(&self, index: usize, snapshot: Snapshot<u32>) -> bool {
        self.opened[index].listener.on_snapshot(snapshot)
    }

    pub fn emit_error(&self, index: usize, error: Error) -> bool {
        self.opened[index].listener.on_error(error)
    }
}

impl Transport<Query, u32> for ManualTransport {
    type Options = Option<&'static str>;
    type Handle = u64;

    fn subscribe(
        &mut self,
        query: &Query,
        window: usize,
        options: &Self::Options,
        listener: Listener<u32>,
    ) -> Result<u64> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }
        let handle = self.opened.len() as u64;
        self.opened.push(Opened {
            handle,
            query: query.clone(),
            window,
            listen_options: *options,
            listener,
            closed: false,
        });
        Ok(handle)
    }

    fn close(&mut self, handle: u64) {
        self.close_calls += 1;
        self.opened[handle as usize].closed = true;
    }
}

struct Watch {
    window: usize,
    shown: Vec<Document<u32>>,
    listener: Listener<u32>,
}

/// Transport over an in-memory ordered collection.
///
/// Subscriptions receive their initial window synchronously from inside
/// `subscribe`, and a diff of their window after every `write`.
#[derive(Default)]
pub struct MemoryTransport {
    docs: Vec<Document<u32>>,
    watches: HashMap<u64, Watch>,
    next_handle: u64,
}

impl MemoryTransport {
    pub fn with_docs(ids: &[&str]) -> Self {
        Self {
            docs: ids.iter().map(|id| doc(id, 0)).collect(),
            ..Self::default()
        }
    }

    pub fn live_count(&self) -> usize {
        self.watches.len()
    }

    /// Inserts or overwrites a document at `position` and notifies watches.
    pub fn write(&mut self, position: usize, document: Document<u32>) {
        self.docs.retain(|d| d.key() != document.key());
        let position = position.min(self.docs.len());
        self.docs.insert(position, document);
        self.publish();
    }

    pub fn delete(&mut self, id: &str) {
        let key = key(id);
        self.docs.retain(|d| d.key() != &key);
        self.publish();
    }

    fn window(&self, size: usize) -> Vec<Document<u32>> {
        self.docs.iter().take(size).cloned().collect()
    }

    fn publish(&mut self) {
        let handles: Vec<u64> = self.watches.keys().copied().collect();
        for handle in handles {
            let size = self.watches[&handle].window;
            let next = self.window(size);
            let watch = self.watches.get_mut(&handle).expect("watch present");

            let mut changes = Vec::new();
            for old in &watch.shown {
                if !next.iter().any(|d| d.same_key(old)) {
                    changes.push(DocumentChange::removed(old.clone()));
                }
            }
            for new in &next {
                match watch.shown.iter().find(|d| d.same_key(new)) {
                    None => changes.push(DocumentChange::added(new.clone())),
                    Some(old) if old != new => changes.push(DocumentChange::modified(new.clone())),
                    Some(_) => {}
                }
            }
            watch.shown = next.clone();
            watch.listener.on_snapshot(Snapshot::new(next, changes));
        }
    }
}

impl Transport<Query, u32> for MemoryTransport {
    type Options = ();
    type Handle = u64;

    fn subscribe(
        &mut self,
        _query: &Query,
        window: usize,
        _options: &(),
        listener: Listener<u32>,
    ) -> Result<u64> {
        let handle = self.next_handle;
        self.next_handle += 1;

        let shown = self.window(window);
        listener.on_snapshot(Snapshot::initial(shown.clone()));
        self.watches.insert(
            handle,
            Watch {
                window,
                shown,
                listener,
            },
        );
        Ok(handle)
    }

    fn close(&mut self, handle: u64) {
        self.watches.remove(&handle);
    }
}
