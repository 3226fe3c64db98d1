//! Loading an optional quote bank from TOML.
//!
//! Set QUOTES_CONFIG_PATH to a file like:
//!
//! ```toml
//! [[quotes]]
//! text = "Your life is what you make it."
//! category = "Life & Creation"
//! ```
//!
//! Bank quotes are merged in front of the built-in corpus.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Quote;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuotesConfig {
  #[serde(default)]
  pub quotes: Vec<QuoteCfg>,
}

/// Quote entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct QuoteCfg {
  pub text: String,
  #[serde(default)]
  pub category: Option<String>,
}

impl QuoteCfg {
  pub fn into_quote(self) -> Quote {
    Quote::new(self.text, self.category.unwrap_or_else(|| "Custom".to_string()))
  }
}

/// Attempt to load `QuotesConfig` from QUOTES_CONFIG_PATH. On any parsing/IO
/// error, returns None and the built-in corpus stands alone.
pub fn load_quotes_config_from_env() -> Option<QuotesConfig> {
  let path = std::env::var("QUOTES_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<QuotesConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quotebuilder_backend", %path, quotes = cfg.quotes.len(), "Loaded quote bank (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quotebuilder_backend", %path, error = %e, "Failed to parse TOML quote bank");
        None
      }
    },
    Err(e) => {
      error!(target: "quotebuilder_backend", %path, error = %e, "Failed to read TOML quote bank file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bank_entries_parse_with_and_without_category() {
    let cfg: QuotesConfig = toml::from_str(
      r#"
        [[quotes]]
        text = "One step at a time."
        category = "Patience"

        [[quotes]]
        text = "Keep walking anyway."
      "#,
    )
    .unwrap();
    assert_eq!(cfg.quotes.len(), 2);
    let q = cfg.quotes[1].clone().into_quote();
    assert_eq!(q.category, "Custom");
  }
}
