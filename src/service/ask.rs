use std::future::Future;

use tracing::{debug, info, instrument};

use crate::cache::{CacheStatus, CacheStore, ResponseCache};
use crate::embedding::TextEmbedder;
use crate::generation::{AnswerGenerator, FallbackGenerator};
use crate::query::Query;
use crate::retrieval::Retriever;
use crate::routing::ConfidenceRouter;
use crate::vectordb::{KnowledgeBase, VectorDbError};

use super::{AskError, AskOutcome, AskRequest, AskResponse};

/// What the HTTP layer needs from the question-answering pipeline.
pub trait AskPipeline: Send + Sync + 'static {
    fn ask(
        &self,
        request: &AskRequest,
    ) -> impl Future<Output = Result<AskOutcome, AskError>> + Send;

    /// Initializes the knowledge base if needed and checks it is reachable.
    fn ready(&self) -> impl Future<Output = Result<(), VectorDbError>> + Send;
}

/// Cache lookup, retrieval, routing and cache store for one question.
pub struct AskService<E, K, S, P> {
    retriever: Retriever<E, K>,
    router: ConfidenceRouter,
    generator: FallbackGenerator<P>,
    cache: ResponseCache<S>,
    top_k: usize,
}

impl<E, K, S, P> AskService<E, K, S, P>
where
    E: TextEmbedder,
    K: KnowledgeBase,
    S: CacheStore,
    P: AnswerGenerator,
{
    pub fn new(
        retriever: Retriever<E, K>,
        router: ConfidenceRouter,
        generator: FallbackGenerator<P>,
        cache: ResponseCache<S>,
        top_k: usize,
    ) -> Self {
        Self {
            retriever,
            router,
            generator,
            cache,
            top_k,
        }
    }

    pub fn cache(&self) -> &ResponseCache<S> {
        &self.cache
    }

    pub fn retriever(&self) -> &Retriever<E, K> {
        &self.retriever
    }

    #[instrument(skip_all, fields(rewrite = request.rewrite))]
    pub async fn ask(&self, request: &AskRequest) -> Result<AskOutcome, AskError> {
        request.validate()?;

        let query = Query::new(request.question.as_str(), request.rewrite);
        let key = self.cache.key(query.normalized(), query.force_augment());

        if let Some(response) = self.cache.get::<AskResponse>(&key).await {
            debug!(query = %query.fingerprint(), mode = %response.mode, "Cache hit");
            return Ok(AskOutcome {
                response,
                cache_status: CacheStatus::Hit,
            });
        }

        let candidates = self
            .retriever
            .retrieve(query.normalized(), self.top_k)
            .await?;
        let decision = self
            .router
            .route(
                query.normalized(),
                candidates,
                query.force_augment(),
                &self.generator,
            )
            .await;

        info!(
            query = %query.fingerprint(),
            mode = %decision.mode,
            confidence = decision.confidence,
            degraded = decision.degraded,
            "Question answered"
        );

        let response = AskResponse::from(decision);
        let ttl = self.cache.ttl_for(response.mode);
        self.cache.set(&key, &response, ttl).await;

        Ok(AskOutcome {
            response,
            cache_status: CacheStatus::Miss,
        })
    }
}

impl<E, K, S, P> AskPipeline for AskService<E, K, S, P>
where
    E: TextEmbedder + 'static,
    K: KnowledgeBase + 'static,
    S: CacheStore + 'static,
    P: AnswerGenerator + 'static,
{
    fn ask(
        &self,
        request: &AskRequest,
    ) -> impl Future<Output = Result<AskOutcome, AskError>> + Send {
        AskService::ask(self, request)
    }

    fn ready(&self) -> impl Future<Output = Result<(), VectorDbError>> + Send {
        self.retriever.knowledge_base().ensure_ready()
    }
}
