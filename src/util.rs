//! Small string helpers used across modules.

/// Normalize a quote or candidate sentence for whole-string comparison:
/// trim, lowercase, collapse internal whitespace runs to single spaces.
pub fn normalize_sentence(s: &str) -> String {
  s.split_whitespace()
    .map(|w| w.to_lowercase())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Normalize a single token for per-position comparison.
pub fn normalize_token(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Normalize a player name for the one-score-per-player rule.
pub fn normalize_username(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
#[allow(dead_code)]
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max { s.to_string() } else { format!("{}… ({} bytes total)", &s[..max], s.len()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sentence_normalization_collapses_and_lowercases() {
    assert_eq!(normalize_sentence("  Joy   is a  natural phenomenon. "), "joy is a natural phenomenon.");
    assert_eq!(normalize_sentence("   "), "");
  }

  #[test]
  fn username_normalization_is_case_insensitive_and_trimmed() {
    assert_eq!(normalize_username("  Alice "), "alice");
    assert_eq!(normalize_username("BOB"), normalize_username("bob"));
  }
}
