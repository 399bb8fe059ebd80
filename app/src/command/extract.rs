use keluhan_config::Config;
use tracing::info;

/// Input for the extract strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    /// Free-text complaint.
    pub text: String,
    /// Overrides the configured model when set.
    pub model: Option<String>,
}

/// Strategy for running the pipeline once from the command line.
///
/// Prints the same JSON object `POST /chat` would return.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(model) = input.model {
            config.llm.model = model;
        }

        let pipeline = super::build_pipeline(&config)?;
        info!("Extracting with model {}", pipeline.model());

        let outcome = pipeline.process(&input.text).await?;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        Ok(())
    }
}
