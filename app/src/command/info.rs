use keluhan_config::Config;

/// Strategy for displaying the effective configuration.
///
/// Outputs the completion service settings (API key masked) and the
/// listen address, after environment overrides are applied.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== keluhan Configuration ===\n");

        println!("Completion Service:");
        println!("  Base URL: {}", config.llm.base_url);
        println!("  API Key: {}", mask_api_key(&config.llm.api_key));
        println!("  Model: {}", config.llm.model);
        println!("  Temperature: {}", config.llm.temperature);
        println!("  Timeout: {}s", config.llm.timeout_secs);
        println!();

        println!("Server:");
        println!("  Listen: {}", config.server.bind_addr());

        Ok(())
    }
}

fn mask_api_key(api_key: &str) -> String {
    if api_key.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_keys_keep_both_ends() {
        assert_eq!(mask_api_key("sk-1234567890abcd"), "sk-1...abcd");
        assert_eq!(mask_api_key("lm-studio"), "lm-s...udio");
    }

    #[test]
    fn short_keys_are_fully_hidden() {
        assert_eq!(mask_api_key("secret"), "***");
        assert_eq!(mask_api_key(""), "(not set)");
    }
}
