use keluhan_config::Config;
use keluhan_server::AppState;
use tracing::info;

/// Input for the serve strategy.
#[derive(Debug, Clone, Copy)]
pub struct ServeInput {
    /// Overrides the configured port when set.
    pub port: Option<u16>,
}

/// Strategy for running the HTTP service until Ctrl-C.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(port) = input.port {
            config.server.port = port;
        }

        info!("Starting keluhan service");
        let pipeline = super::build_pipeline(&config)?;
        keluhan_server::serve(&config.server.bind_addr(), AppState::shared(pipeline)).await
    }
}
