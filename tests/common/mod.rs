//! Shared harness for integration tests: an [`AskService`] over in-process mocks.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use faq_router::gateway::{AppState, create_router_with_state};
use faq_router::{
    AskService, CacheStore, ConfidenceRouter, FallbackGenerator, MemoryStore, MockEmbedder,
    MockGenerator, MockKnowledgeBase, ResponseCache, Retriever, SearchHit, TtlPolicy,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub type MockService<S> =
    AskService<Arc<MockEmbedder>, Arc<MockKnowledgeBase>, S, Arc<MockGenerator>>;

pub const KEY_VERSION: &str = "v3";
pub const TOP_K: usize = 5;

pub struct Harness<S> {
    pub service: MockService<S>,
    pub embedder: Arc<MockEmbedder>,
    pub kb: Arc<MockKnowledgeBase>,
    pub generator: Arc<MockGenerator>,
}

/// A knowledge-base hit whose similarity score is `score`.
pub fn hit(id: &str, score: f64) -> SearchHit {
    SearchHit::new(format!("point-{id}"), 1.0 - score)
        .with_field("faq_id", format!("HR-{id}"))
        .with_field("title", format!("Policy {id}"))
        .with_field("question", format!("What is policy {id}?"))
        .with_field("answer", format!("Policy {id} applies to all staff."))
        .with_field("tags", "leave,benefits")
}

pub fn harness_with_store<S: CacheStore>(hits: Vec<SearchHit>, store: S) -> Harness<S> {
    harness_with(hits, store, MockGenerator::new())
}

pub fn harness_with<S: CacheStore>(
    hits: Vec<SearchHit>,
    store: S,
    generator: MockGenerator,
) -> Harness<S> {
    let embedder = Arc::new(MockEmbedder::default());
    let kb = Arc::new(MockKnowledgeBase::scripted(hits));
    let generator = Arc::new(generator);

    let service = AskService::new(
        Retriever::new(Arc::clone(&embedder), Arc::clone(&kb)),
        ConfidenceRouter::default(),
        FallbackGenerator::new(Arc::clone(&generator)),
        ResponseCache::new(store, KEY_VERSION, TtlPolicy::default()),
        TOP_K,
    );

    Harness {
        service,
        embedder,
        kb,
        generator,
    }
}

pub fn harness(hits: Vec<SearchHit>) -> Harness<MemoryStore> {
    harness_with_store(hits, MemoryStore::default())
}

/// An HTTP server bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn<S: CacheStore + 'static>(service: MockService<S>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let router = create_router_with_state(AppState::new(service));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("server error");
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            _handle: handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.addr, path.trim_start_matches('/'))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
