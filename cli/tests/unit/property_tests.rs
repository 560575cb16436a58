//! Property-based tests for configuration persistence and templating.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use stagehand_cli::application::ports::{ArtifactTemplate, ConfigStore};
use stagehand_cli::domain::config::{AgentConfig, REDACTED, parse_yes_no};
use stagehand_cli::domain::template::{Substitution, substitute};
use stagehand_cli::infra::config::JsonConfigStore;
use stagehand_cli::infra::template::TemplateFile;

fn config_strategy() -> impl Strategy<Value = AgentConfig> {
    (1u64..=86_400, "sk_[A-Za-z0-9]{8,40}", "[0-9a-f]{32}").prop_map(
        |(sleep_interval, api_key, parent_page_id)| AgentConfig {
            sleep_interval,
            api_key,
            parent_page_id,
        },
    )
}

// ============================================================================
// Configuration store
// ============================================================================

proptest! {
    /// Whatever is saved loads back unchanged.
    #[test]
    fn prop_save_then_load_is_identity(config in config_strategy()) {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let store = JsonConfigStore::new(dir.path().join("config.json"));
        store.save(&config).expect("save");
        prop_assert_eq!(store.load().expect("load"), config);
    }

    /// The API key never appears in the display rows.
    #[test]
    fn prop_display_rows_never_show_api_key(config in config_strategy()) {
        let rows = config.display_rows();
        prop_assert!(rows.iter().all(|(_, value)| !value.contains(&config.api_key)));
        prop_assert!(rows.iter().any(|(_, value)| value == REDACTED));
    }

    /// Answers outside the vocabulary are never taken as yes or no.
    #[test]
    fn prop_unknown_answers_rejected(answer in "[a-z]{1,8}") {
        if !matches!(answer.as_str(), "y" | "yes" | "n" | "no") {
            prop_assert_eq!(parse_yes_no(&answer, true), None);
        }
    }
}

// ============================================================================
// Substitution
// ============================================================================

proptest! {
    /// Values without tokens replace every occurrence and leave no token behind.
    #[test]
    fn prop_substitute_removes_every_token(
        prefix in "[a-z ]{0,20}",
        middle in "[a-z ]{0,20}",
        value in "[A-Za-z0-9_-]{0,20}",
    ) {
        let text = format!("{prefix}<<X>>{middle}<<X>>");
        let out = substitute(&text, &[Substitution::placeholder("X", value.clone())]);
        prop_assert!(!out.contains("<<X>>"));
        prop_assert_eq!(out, format!("{prefix}{value}{middle}{value}"));
    }

    /// Text without any token is returned unchanged.
    #[test]
    fn prop_substitute_without_tokens_is_identity(text in "[a-z0-9 \n]{0,64}") {
        let out = substitute(&text, &[Substitution::descriptor("OS", "--target x")]);
        prop_assert_eq!(out, text);
    }
}

// ============================================================================
// Template backup/restore
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Backup, patch (possibly twice), restore yields the original text.
    #[test]
    fn prop_restore_returns_original_text(
        body in "[ -~\n]{0,256}",
        value in "[a-z0-9]{0,16}",
        twice in any::<bool>(),
    ) {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("template");
        let original = format!("{body}<<SLEEP>>");
        std::fs::write(&path, &original).expect("write");

        let mut file = TemplateFile::new(path.clone());
        let subs = [Substitution::placeholder("SLEEP", value)];
        file.backup().expect("backup");
        file.patch(&subs).expect("patch");
        if twice {
            file.patch(&subs).expect("second patch");
        }
        file.restore().expect("restore");

        prop_assert_eq!(std::fs::read_to_string(&path).expect("read"), original);
        prop_assert!(!file.backup_path().exists());
    }
}
