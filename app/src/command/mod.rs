//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use keluhan_config::Config;
use keluhan_core::{LLMProvider, Pipeline};
use keluhan_providers::OpenAiCompatProvider;
use std::sync::Arc;
use tracing::info;

mod extract;
mod info;
mod init;
mod serve;
mod version;

pub use extract::{ExtractInput, ExtractStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use serve::{ServeInput, ServeStrategy};
pub use version::VersionStrategy;

/// Build the extraction pipeline from configuration.
///
/// The provider is type-erased so the server state has one concrete type.
fn build_pipeline(config: &Config) -> anyhow::Result<Pipeline<Arc<dyn LLMProvider>>> {
    info!(
        "Completion service: {} (model: {})",
        config.llm.base_url, config.llm.model
    );

    let provider = OpenAiCompatProvider::new(config.llm.api_key.clone(), config.llm.timeout())?
        .with_base_url(config.llm.base_url.clone());
    let provider: Arc<dyn LLMProvider> = Arc::new(provider);

    Ok(Pipeline::new(provider, config.llm.extraction_config()))
}

/// Core trait defining the contract for all command strategies.
///
/// # Design Principles
/// - **Static dispatch**: All calls are monomorphized at compile time
/// - **Type safety**: Each strategy defines its own input type via associated type
/// - **Extensibility**: Adding new commands requires only implementing this trait
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
