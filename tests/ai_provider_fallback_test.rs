//! AI fallback through the real provider clients against mock endpoints.

mod common;

use common::PLAIN_PAGE;
use mockito::{Matcher, Server};
use recipe_import::{ErrorKind, ProviderKind, RecipeImporter, Source};
use serde_json::json;

fn anthropic_reply(text: &str) -> String {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn"
    })
    .to_string()
}

fn importer(provider: ProviderKind, base_url: String) -> RecipeImporter {
    RecipeImporter::builder()
        .provider(provider)
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_anthropic_fallback_with_fenced_json() {
    let mut server = Server::new_async().await;
    let page = server
        .mock("GET", "/pancakes")
        .with_status(200)
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;
    let fenced = "```json\n{\"title\": \"Grandma's Pancakes\", \"ingredients\": [\"1 cup flour\", \"1 egg\"], \"instructions\": \"Whisk and fry.\", \"imageUrl\": null, \"tags\": [\"breakfast\"]}\n```";
    let messages = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"max_tokens": 4096})),
            Matcher::Regex("Grandma's Pancakes".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(anthropic_reply(fenced))
        .create_async()
        .await;

    let result = importer(ProviderKind::Anthropic, server.url())
        .import_from_url(&format!("{}/pancakes", server.url()))
        .await
        .unwrap();

    assert_eq!(result.source, Source::AiExtraction);
    assert_eq!(result.recipe.title, "Grandma's Pancakes");
    assert_eq!(result.recipe.ingredients, "1 cup flour\n1 egg");
    assert_eq!(result.recipe.instructions, "Whisk and fry.");
    assert!(result.recipe.image_url.is_none());

    page.assert_async().await;
    messages.assert_async().await;
}

#[tokio::test]
async fn test_openai_fallback() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;
    let completions = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content":
                    "{\"title\": \"Pancakes\", \"ingredients\": [\"flour\"], \"instructions\": \"Fry.\", \"tags\": []}"
                }}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let result = importer(ProviderKind::OpenAI, server.url())
        .import_from_url(&server.url())
        .await
        .unwrap();

    assert_eq!(result.source, Source::AiExtraction);
    assert_eq!(result.recipe.title, "Pancakes");
    completions.assert_async().await;
}

#[tokio::test]
async fn test_provider_status_codes_map_to_error_kinds() {
    let cases = [
        (429, ErrorKind::ProviderRateLimited, 429),
        (401, ErrorKind::ProviderNotConfigured, 503),
        (500, ErrorKind::ProviderError, 502),
    ];

    for (status, expected_kind, expected_http) in cases {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_body(PLAIN_PAGE)
            .create_async()
            .await;
        let messages = server
            .mock("POST", "/v1/messages")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"type": "error", "error": {"type": "x", "message": "secret internal detail"}}"#)
            .expect(1)
            .create_async()
            .await;

        let err = importer(ProviderKind::Anthropic, server.url())
            .import_from_url(&server.url())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), expected_kind, "status {status}");
        assert_eq!(err.kind().http_status(), expected_http);
        assert!(!err.user_message().contains("secret"));
        messages.assert_async().await;
    }
}

#[tokio::test]
async fn test_structured_page_never_calls_provider() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(common::page_with_json_ld(
            r#"{"@type":"Recipe","name":"Pasta","recipeIngredient":["pasta","sauce"],"recipeInstructions":"Boil. Mix."}"#,
        ))
        .create_async()
        .await;
    let messages = server
        .mock("POST", "/v1/messages")
        .expect(0)
        .create_async()
        .await;

    let result = importer(ProviderKind::Anthropic, server.url())
        .import_from_url(&server.url())
        .await
        .unwrap();

    assert_eq!(result.source, Source::SchemaOrg);
    messages.assert_async().await;
}
