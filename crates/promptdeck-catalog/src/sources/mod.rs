//! Where prompts come from.
//!
//! The remote catalog lives behind the host's database SDK, so the remote
//! source is whatever `PromptSource` the host plugs in. The file sources here
//! cover the bundled fallbacks.

pub mod json;
pub mod text;

use std::future::Future;
use std::pin::Pin;

use crate::errors::CatalogResult;
use crate::types::{CatalogOrigin, Prompt};

pub use json::JsonFileSource;
pub use text::TextFileSource;

/// Boxed so heterogeneous sources fit in one loader chain.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = CatalogResult<Vec<Prompt>>> + Send + 'a>>;

pub trait PromptSource: Send + Sync {
    /// Shown in logs and in `AllSourcesFailed`.
    fn name(&self) -> &str;

    fn origin(&self) -> CatalogOrigin;

    fn fetch(&self) -> FetchFuture<'_>;
}

/// Prompts already in memory, e.g. compiled into the binary.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    prompts: Vec<Prompt>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, prompts: Vec<Prompt>) -> Self {
        Self {
            name: name.into(),
            prompts,
        }
    }
}

impl PromptSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> CatalogOrigin {
        CatalogOrigin::Bundled
    }

    fn fetch(&self) -> FetchFuture<'_> {
        let prompts = self.prompts.clone();
        Box::pin(async move { Ok(prompts) })
    }
}
