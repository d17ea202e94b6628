use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::cache::{
    CacheStatus, FailingStore, MemoryStore, RecordingStore, ResponseCache, TtlPolicy,
};
use crate::embedding::MockEmbedder;
use crate::generation::{FallbackGenerator, MockGenerator};
use crate::retrieval::{RetrievalError, Retriever};
use crate::routing::{ConfidenceRouter, FALLBACK_MESSAGE, RouteMode};
use crate::vectordb::{MockKnowledgeBase, SearchHit};

type TestService<S> =
    AskService<Arc<MockEmbedder>, Arc<MockKnowledgeBase>, S, Arc<MockGenerator>>;

struct Harness<S> {
    service: TestService<S>,
    kb: Arc<MockKnowledgeBase>,
    generator: Arc<MockGenerator>,
}

fn hit(id: &str, score: f64) -> SearchHit {
    SearchHit::new(id, 1.0 - score)
        .with_field("title", format!("Title {id}"))
        .with_field("question", format!("Question {id}?"))
        .with_field("answer", format!("Answer {id}."))
}

fn harness<S: crate::cache::CacheStore>(hits: Vec<SearchHit>, store: S) -> Harness<S> {
    let kb = Arc::new(MockKnowledgeBase::scripted(hits));
    let generator = Arc::new(MockGenerator::new());
    let service = AskService::new(
        Retriever::new(Arc::new(MockEmbedder::default()), Arc::clone(&kb)),
        ConfidenceRouter::default(),
        FallbackGenerator::new(Arc::clone(&generator)),
        ResponseCache::new(store, "v3", TtlPolicy::default()),
        5,
    );
    Harness {
        service,
        kb,
        generator,
    }
}

#[test]
fn test_request_validation() {
    assert!(matches!(
        AskRequest::new("").validate(),
        Err(AskError::EmptyQuestion)
    ));
    assert!(AskRequest::new("   ").validate().is_ok());
    assert!(AskRequest::new("é".repeat(500)).validate().is_ok());
    assert!(matches!(
        AskRequest::new("é".repeat(501)).validate(),
        Err(AskError::QuestionTooLong { max: 500, len: 501 })
    ));
}

#[test]
fn test_request_rewrite_defaults_to_false() {
    let request: AskRequest = serde_json::from_str(r#"{"question":"leave"}"#).unwrap();
    assert!(!request.rewrite);
}

#[test]
fn test_response_wire_shape() {
    let response = AskResponse {
        hit: false,
        mode: RouteMode::Fallback,
        answer: None,
        message: FALLBACK_MESSAGE.to_string(),
        confidence: 0.0,
        sources: Vec::new(),
        candidates: Vec::new(),
    };
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["mode"], "fallback");
    assert!(json["answer"].is_null());
    assert_eq!(json["confidence"], 0.0);
    assert_eq!(json.as_object().unwrap().len(), 7);
}

#[tokio::test]
async fn test_ask_direct_then_cached() {
    let h = harness(vec![hit("a", 0.9), hit("b", 0.5)], MemoryStore::default());
    let request = AskRequest::new("  How many   vacation days? ");

    let first = h.service.ask(&request).await.unwrap();
    assert_eq!(first.cache_status, CacheStatus::Miss);
    assert_eq!(first.response.mode, RouteMode::Direct);
    assert_eq!(first.response.answer.as_deref(), Some("Answer a."));

    let second = h.service.ask(&request).await.unwrap();
    assert_eq!(second.cache_status, CacheStatus::Hit);
    assert_eq!(
        serde_json::to_vec(&first.response).unwrap(),
        serde_json::to_vec(&second.response).unwrap()
    );
    assert_eq!(h.kb.search_calls(), 1);
}

#[tokio::test]
async fn test_ask_normalized_variants_share_cache_entry() {
    let h = harness(vec![hit("a", 0.9)], MemoryStore::default());

    h.service.ask(&AskRequest::new("annual leave")).await.unwrap();
    let again = h
        .service
        .ask(&AskRequest::new("\tannual \u{3000} leave\n"))
        .await
        .unwrap();

    assert!(again.cache_status.is_hit());
    assert_eq!(h.kb.search_calls(), 1);
}

#[tokio::test]
async fn test_ask_rewrite_flag_is_part_of_key() {
    let store = Arc::new(RecordingStore::new());
    let h = harness(vec![hit("a", 0.9), hit("b", 0.3)], Arc::clone(&store));

    let direct = h.service.ask(&AskRequest::new("leave")).await.unwrap();
    let forced = h
        .service
        .ask(&AskRequest::new("leave").with_rewrite(true))
        .await
        .unwrap();

    assert_eq!(direct.response.mode, RouteMode::Direct);
    assert_eq!(forced.response.mode, RouteMode::Augmented);
    assert_eq!(forced.cache_status, CacheStatus::Miss);
    assert_eq!(h.generator.calls(), 1);
    assert_eq!(
        store.writes(),
        vec![
            ("ask:v3:leave:false".to_string(), Duration::from_secs(3600)),
            ("ask:v3:leave:true".to_string(), Duration::from_secs(7200)),
        ]
    );
}

#[tokio::test]
async fn test_ask_fallback_ttl() {
    let store = Arc::new(RecordingStore::new());
    let h = harness(vec![hit("a", 0.2)], Arc::clone(&store));

    let outcome = h.service.ask(&AskRequest::new("parking")).await.unwrap();
    assert_eq!(outcome.response.mode, RouteMode::Fallback);
    assert_eq!(store.writes()[0].1, Duration::from_secs(600));
}

#[tokio::test]
async fn test_ask_whitespace_question_is_fallback() {
    let h = harness(vec![hit("a", 0.9)], MemoryStore::default());

    let outcome = h.service.ask(&AskRequest::new(" \n ")).await.unwrap();
    assert_eq!(outcome.response.mode, RouteMode::Fallback);
    assert_eq!(outcome.response.confidence, 0.0);
    assert!(outcome.response.candidates.is_empty());
    assert_eq!(h.kb.search_calls(), 0);
}

#[tokio::test]
async fn test_ask_failing_cache_matches_working_cache() {
    let hits = vec![hit("a", 0.7), hit("b", 0.6), hit("c", 0.5)];
    let failing = harness(hits.clone(), FailingStore::new());
    let working = harness(hits, MemoryStore::default());
    let request = AskRequest::new("sick leave");

    let degraded = failing.service.ask(&request).await.unwrap();
    let normal = working.service.ask(&request).await.unwrap();

    assert_eq!(degraded.response, normal.response);
    assert_eq!(degraded.cache_status, CacheStatus::Miss);

    let again = failing.service.ask(&request).await.unwrap();
    assert_eq!(again.cache_status, CacheStatus::Miss);
    assert_eq!(failing.kb.search_calls(), 2);
}

#[tokio::test]
async fn test_ask_propagates_backend_outage() {
    let h = harness(vec![hit("a", 0.9)], MemoryStore::default());
    h.kb.set_unavailable(true);

    let err = h.service.ask(&AskRequest::new("leave")).await.unwrap_err();
    assert!(matches!(
        err,
        AskError::Retrieval(RetrievalError::VectorDb(_))
    ));
}

#[tokio::test]
async fn test_pipeline_ready_reflects_backend() {
    let h = harness(vec![], MemoryStore::default());
    assert!(AskPipeline::ready(&h.service).await.is_ok());

    h.kb.set_unavailable(true);
    assert!(AskPipeline::ready(&h.service).await.is_err());
}
