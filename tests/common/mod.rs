#![allow(dead_code)]

use async_trait::async_trait;
use recipe_import::{ImportError, LlmProvider, RecipeImporter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Provider double that counts calls and answers with a fixed reply.
pub struct StubProvider {
    reply: Mutex<Option<Result<String, ImportError>>>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(Ok(reply.to_string()))),
            calls: AtomicUsize::new(0),
        })
    }

    /// Answers the first call with `err`; later calls fail with a generic provider error.
    pub fn failing(err: ImportError) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(Err(err))),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn provider_name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, ImportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut reply = self.reply.lock().unwrap();
        match reply.take() {
            Some(Ok(text)) => {
                *reply = Some(Ok(text.clone()));
                Ok(text)
            }
            Some(Err(err)) => Err(err),
            None => Err(ImportError::Provider("stub exhausted".to_string())),
        }
    }
}

pub fn importer_with(provider: Arc<StubProvider>) -> RecipeImporter {
    RecipeImporter::builder()
        .llm_provider(provider)
        .build()
        .unwrap()
}

pub fn page_with_json_ld(json_ld: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Recipe</title>
<script type="application/ld+json">{json_ld}</script>
</head>
<body><h1>Recipe</h1></body>
</html>"#
    )
}

pub const PLAIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Grandma's Pancakes</title></head>
<body>
<h1>Grandma's Pancakes</h1>
<ul><li>1 cup flour</li><li>1 egg</li><li>1 cup milk</li></ul>
<p>Whisk everything together and fry in a hot pan.</p>
</body>
</html>"#;
