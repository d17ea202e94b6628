use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serial_test::serial;

use super::*;
use crate::retrieval::Candidate;

fn context() -> Vec<Candidate> {
    vec![
        Candidate::new("leave-1", "Annual leave", 0.7)
            .with_question("How many days of annual leave?")
            .with_answer("Fifteen working days per year."),
        Candidate::new("leave-2", "Sick leave", 0.6)
            .with_question("How do I file sick leave?")
            .with_answer("Submit a medical note in the HR portal."),
    ]
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> ChatCompletionGenerator {
    let mut config = GeneratorConfig::default()
        .with_api_key("sk-test")
        .with_base_url(base_url);
    config.timeout = Duration::from_millis(300);
    ChatCompletionGenerator::new(config).unwrap()
}

#[test]
fn test_config_is_configured() {
    assert!(!GeneratorConfig::default().is_configured());
    assert!(!GeneratorConfig::default().with_api_key("  ").is_configured());
    assert!(!GeneratorConfig::default().with_api_key("sk-MOCK-key").is_configured());
    assert!(GeneratorConfig::default().with_api_key("sk-live").is_configured());
}

#[test]
fn test_config_strips_trailing_slash() {
    let config = GeneratorConfig::default().with_base_url("http://llm.local/v1/");
    assert_eq!(config.completions_url(), "http://llm.local/v1/chat/completions");
}

#[test]
fn test_config_debug_redacts_key() {
    let config = GeneratorConfig::default().with_api_key("sk-secret");
    assert!(!format!("{config:?}").contains("sk-secret"));
}

#[test]
#[serial]
fn test_config_from_env() {
    unsafe {
        std::env::set_var("FAQ_LLM_API_KEY", "sk-env");
        std::env::set_var("FAQ_LLM_BASE_URL", "http://env.local/v1//");
        std::env::set_var("FAQ_LLM_TIMEOUT_SECS", "5");
    }
    let config = GeneratorConfig::from_env();
    unsafe {
        std::env::remove_var("FAQ_LLM_API_KEY");
        std::env::remove_var("FAQ_LLM_BASE_URL");
        std::env::remove_var("FAQ_LLM_TIMEOUT_SECS");
    }

    let config = config.unwrap();
    assert_eq!(config.api_key, "sk-env");
    assert_eq!(config.base_url, "http://env.local/v1");
    assert_eq!(config.timeout, Duration::from_secs(5));
}

#[test]
fn test_chat_generator_requires_credentials() {
    assert!(matches!(
        ChatCompletionGenerator::new(GeneratorConfig::default().with_api_key("mock")),
        Err(GenerationError::NotConfigured)
    ));
}

#[test]
fn test_user_prompt_numbers_references() {
    let prompt = chat::user_prompt("vacation?", &context());
    assert!(prompt.contains("[Reference 1]\nQuestion: How many days of annual leave?"));
    assert!(prompt.contains("[Reference 2]\nQuestion: How do I file sick leave?"));
    assert!(prompt.ends_with("[User question]: vacation?"));
}

#[test]
fn test_build_request_shape() {
    let generator = client("http://unused.local");
    let request = generator.build_request("vacation?", &context()).unwrap();
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["model"], crate::constants::DEFAULT_LLM_MODEL);
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][1]["role"], "user");
    assert_eq!(json["max_tokens"], 512);
    assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
}

#[test]
fn test_template_with_context() {
    let text = TemplateGenerator::new("generation request timed out").render(&context());
    assert_eq!(
        text,
        "(generation request timed out; switched to basic mode) According to the current policy:\n\
         Fifteen working days per year.\n\n[Citation: Reference 1 (auto-matched)]"
    );
}

#[test]
fn test_template_without_reason_or_context() {
    let template = TemplateGenerator::default();
    assert_eq!(template.render(&[]), NO_CONTEXT_ANSWER);
    assert!(template.render(&context()).starts_with("According to the current policy:"));
}

#[tokio::test]
async fn test_chat_generator_success() {
    let upstream = Router::new().route(
        "/chat/completions",
        post(|| async { Json(completion("Fifteen days. [Citation: Reference 1]")) }),
    );
    let base = spawn_upstream(upstream).await;

    let answer = client(&base).generate("vacation?", &context()).await.unwrap();
    assert_eq!(answer, "Fifteen days. [Citation: Reference 1]");
}

#[tokio::test]
async fn test_chat_generator_status_error() {
    let upstream = Router::new().route(
        "/chat/completions",
        post(|| async { StatusCode::TOO_MANY_REQUESTS }),
    );
    let base = spawn_upstream(upstream).await;

    let err = client(&base).generate("q", &context()).await.unwrap_err();
    assert!(matches!(err, GenerationError::Status { status: 429 }));
    assert_eq!(err.degraded_reason(), "generation service error 429");
}

#[tokio::test]
async fn test_chat_generator_empty_completion() {
    let upstream = Router::new().route(
        "/chat/completions",
        post(|| async { Json(completion("   ")) }),
    );
    let base = spawn_upstream(upstream).await;

    let err = client(&base).generate("q", &context()).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyCompletion));
}

#[tokio::test]
async fn test_chat_generator_timeout() {
    let upstream = Router::new().route(
        "/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(completion("late"))
        }),
    );
    let base = spawn_upstream(upstream).await;

    let err = client(&base).generate("q", &context()).await.unwrap_err();
    assert!(matches!(err, GenerationError::Timeout));
}

#[tokio::test]
async fn test_fallback_uses_primary() {
    let generator = FallbackGenerator::new(MockGenerator::new());
    let answer = generator.generate("vacation?", &context()).await;

    assert!(!answer.degraded);
    assert_eq!(answer.text, MockGenerator::expected_answer("vacation?", 2));
}

#[tokio::test]
async fn test_fallback_degrades_on_failure() {
    let generator = FallbackGenerator::new(MockGenerator::failing());
    let answer = generator.generate("vacation?", &context()).await;

    assert!(answer.degraded);
    assert!(answer.text.starts_with("(generation request timed out; switched to basic mode)"));
    assert!(answer.text.contains("Fifteen working days per year."));
}

#[tokio::test]
async fn test_fallback_without_primary() {
    let generator = FallbackGenerator::from_config(GeneratorConfig::default());
    assert!(!generator.has_primary());

    let answer = generator.generate("vacation?", &context()).await;
    assert!(answer.degraded);
    assert!(answer.text.starts_with("(generation service not configured; switched to basic mode)"));

    let empty = generator.generate("vacation?", &[]).await;
    assert_eq!(empty.text, NO_CONTEXT_ANSWER);
}

#[tokio::test]
async fn test_template_behind_generator_contract() {
    let template = TemplateGenerator::new("generation service error 503");
    let via_trait = AnswerGenerator::generate(&template, "vacation?", &context())
        .await
        .unwrap();
    assert_eq!(via_trait, template.render(&context()));

    let degraded = FallbackGenerator::new(MockGenerator::failing())
        .generate("vacation?", &context())
        .await;
    let expected = TemplateGenerator::new("generation request timed out")
        .generate("vacation?", &context())
        .await
        .unwrap();
    assert_eq!(degraded.text, expected);
}

#[tokio::test]
async fn test_template_as_primary_is_not_degraded() {
    let generator = FallbackGenerator::new(TemplateGenerator::default());
    let answer = generator.generate("vacation?", &context()).await;

    assert!(!answer.degraded);
    assert!(answer.text.starts_with("According to the current policy:"));
}
