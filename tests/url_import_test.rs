mod common;

use common::{importer_with, page_with_json_ld, StubProvider, PLAIN_PAGE};
use mockito::{Matcher, Server};
use recipe_import::{
    config::ProviderConfig, ErrorKind, FetchFailure, ImportConfig, ImportError, RecipeImporter,
    Source,
};

const PASTA_JSON_LD: &str = r#"{"@type":"Recipe","name":"Pasta","recipeIngredient":["pasta","sauce"],"recipeInstructions":"Boil. Mix."}"#;

const AI_REPLY: &str = r#"{"title": "Grandma's Pancakes", "ingredients": ["1 cup flour", "1 egg", "1 cup milk"],
    "instructions": "Whisk everything together and fry in a hot pan.", "imageUrl": null, "tags": ["breakfast"]}"#;

#[tokio::test]
async fn test_invalid_url_fails_before_any_io() {
    let mut server = Server::new_async().await;
    let page = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let provider = StubProvider::replying(AI_REPLY);
    let importer = importer_with(provider.clone());

    for url in ["not-a-url", "ftp://example.com/recipe", ""] {
        let err = importer.import_from_url(url).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "{url}");
        assert_eq!(err.kind().http_status(), 400);
    }

    assert_eq!(provider.calls(), 0);
    page.assert_async().await;
}

#[tokio::test]
async fn test_pasta_page_imports_from_schema_org() {
    let mut server = Server::new_async().await;
    let page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(page_with_json_ld(PASTA_JSON_LD))
        .create_async()
        .await;
    let provider = StubProvider::replying(AI_REPLY);

    let result = importer_with(provider.clone())
        .import_from_url(&format!("{}/recipe", server.url()))
        .await
        .unwrap();

    assert_eq!(result.source, Source::SchemaOrg);
    assert_eq!(result.recipe.title, "Pasta");
    assert_eq!(result.recipe.ingredients, "pasta\nsauce");
    assert_eq!(result.recipe.instructions, "Boil. Mix.");
    assert!(result.recipe.tags.is_empty());
    assert!(result.recipe.image_url.is_none());
    assert!(result
        .recipe
        .raw_html
        .as_deref()
        .is_some_and(|html| html.contains("application/ld+json")));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["source"], "schema.org");
    assert_eq!(json["recipe"]["tags"], serde_json::json!([]));

    assert_eq!(provider.calls(), 0);
    page.assert_async().await;
}

#[tokio::test]
async fn test_relative_image_resolved_against_page_url() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/recipes/soup")
        .with_status(200)
        .with_body(page_with_json_ld(
            r#"{"@type":"Recipe","name":"Soup","image":"/img/soup.jpg",
                "recipeIngredient":["water"],"recipeInstructions":"Boil."}"#,
        ))
        .create_async()
        .await;

    let result = importer_with(StubProvider::replying(AI_REPLY))
        .import_from_url(&format!("{}/recipes/soup", server.url()))
        .await
        .unwrap();

    assert_eq!(
        result.recipe.image_url,
        Some(format!("{}/img/soup.jpg", server.url()))
    );
}

#[tokio::test]
async fn test_page_without_structured_data_falls_back_to_ai() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/pancakes")
        .with_status(200)
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;
    let provider = StubProvider::replying(AI_REPLY);

    let result = importer_with(provider.clone())
        .import_from_url(&format!("{}/pancakes", server.url()))
        .await
        .unwrap();

    assert_eq!(result.source, Source::AiExtraction);
    assert_eq!(result.recipe.title, "Grandma's Pancakes");
    assert_eq!(result.recipe.ingredients, "1 cup flour\n1 egg\n1 cup milk");
    assert!(result.recipe.tags.contains("breakfast"));
    assert_eq!(result.recipe.raw_html.as_deref(), Some(PLAIN_PAGE));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_incomplete_structured_data_falls_back_to_ai() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(page_with_json_ld(
            r#"{"@type":"Recipe","name":"Pancakes","recipeIngredient":["flour"]}"#,
        ))
        .create_async()
        .await;
    let provider = StubProvider::replying(AI_REPLY);

    let result = importer_with(provider.clone())
        .import_from_url(&server.url())
        .await
        .unwrap();

    assert_eq!(result.source, Source::AiExtraction);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_unusable_ai_reply_is_no_recipe_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;

    for reply in [
        "Sorry, I can't find a recipe here.",
        r#"{"title": "Pancakes", "ingredients": [], "instructions": ""}"#,
    ] {
        let err = importer_with(StubProvider::replying(reply))
            .import_from_url(&server.url())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoRecipeFound);
        assert_eq!(err.kind().http_status(), 422);
    }
}

#[tokio::test]
async fn test_provider_errors_are_propagated() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;

    let cases = [
        (
            ImportError::ProviderRateLimited("slow down".to_string()),
            ErrorKind::ProviderRateLimited,
        ),
        (
            ImportError::ProviderNotConfigured("bad key".to_string()),
            ErrorKind::ProviderNotConfigured,
        ),
        (
            ImportError::Provider("overloaded".to_string()),
            ErrorKind::ProviderError,
        ),
    ];

    for (error, expected) in cases {
        let err = importer_with(StubProvider::failing(error))
            .import_from_url(&server.url())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), expected);
        assert!(!err.user_message().contains("slow down"));
    }
}

#[tokio::test]
async fn test_missing_provider_only_matters_for_fallback() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/structured")
        .with_status(200)
        .with_body(page_with_json_ld(PASTA_JSON_LD))
        .create_async()
        .await;
    server
        .mock("GET", "/plain")
        .with_status(200)
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;

    let mut config = ImportConfig::default();
    config.providers.insert(
        "anthropic".to_string(),
        ProviderConfig {
            enabled: false,
            ..Default::default()
        },
    );
    let importer = RecipeImporter::from_config(&config).unwrap();
    assert!(!importer.has_ai_provider());

    let result = importer
        .import_from_url(&format!("{}/structured", server.url()))
        .await
        .unwrap();
    assert_eq!(result.source, Source::SchemaOrg);

    let err = importer
        .import_from_url(&format!("{}/plain", server.url()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProviderNotConfigured);
    assert_eq!(err.kind().http_status(), 503);
}

#[tokio::test]
async fn test_http_errors_are_fetch_failures() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/missing")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", "/broken")
        .with_status(500)
        .create_async()
        .await;
    let provider = StubProvider::replying(AI_REPLY);
    let importer = importer_with(provider.clone());

    let err = importer
        .import_from_url(&format!("{}/missing", server.url()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ImportError::FetchFailed(FetchFailure::NotFound)
    ));
    assert!(err.is_retryable());

    let err = importer
        .import_from_url(&format!("{}/broken", server.url()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ImportError::FetchFailed(FetchFailure::Status(500))
    ));
    assert_eq!(err.kind().code(), "FETCH_FAILED");

    assert_eq!(provider.calls(), 0);
}

/// Requires network access
#[tokio::test]
#[ignore]
async fn test_real_world_recipe_page() {
    let result = recipe_import::import_from_url(
        "https://www.bbcgoodfood.com/recipes/classic-cottage-pie",
    )
    .await
    .unwrap();
    assert!(result.recipe.is_complete());
}
