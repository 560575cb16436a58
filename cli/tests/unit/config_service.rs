//! Config collection, confirmation loop, and display.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use stagehand_cli::application::ports::ConfigStore;
use stagehand_cli::application::services::config_service::ConfigSession;
use stagehand_cli::domain::config::{AgentConfig, REDACTED};
use stagehand_cli::domain::error::ConfigError;
use stagehand_cli::infra::config::JsonConfigStore;

use crate::mocks::{PARENT_PAGE_ID, RecordingReporter, ScriptedPrompter};

fn store_in(dir: &tempfile::TempDir) -> JsonConfigStore {
    JsonConfigStore::new(dir.path().join("config.json"))
}

fn session<'a>(
    store: &'a JsonConfigStore,
    prompter: &'a ScriptedPrompter,
    reporter: &'a RecordingReporter,
) -> ConfigSession<'a, JsonConfigStore, ScriptedPrompter, RecordingReporter> {
    ConfigSession {
        store,
        prompter,
        reporter,
        non_interactive: false,
    }
}

fn expected() -> AgentConfig {
    AgentConfig {
        sleep_interval: 45,
        api_key: "abc123".to_string(),
        parent_page_id: PARENT_PAGE_ID.to_string(),
    }
}

// ── collect ──────────────────────────────────────────────────────────────────

#[test]
fn test_collect_reads_fields_in_order() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&["45", "abc123", PARENT_PAGE_ID]);
    let reporter = RecordingReporter::default();

    let cfg = session(&store, &prompter, &reporter).collect().expect("collect");

    assert_eq!(cfg, expected());
    let prompts = prompter.prompts.borrow();
    assert!(prompts[0].contains("sleep interval"));
    assert!(prompts[1].contains("API key"));
    assert!(prompts[2].contains("parent page ID"));
}

#[test]
fn test_collect_blank_sleep_uses_default() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&["", "k", "p"]);
    let reporter = RecordingReporter::default();

    let cfg = session(&store, &prompter, &reporter).collect().expect("collect");
    assert_eq!(cfg.sleep_interval, 30);
}

#[test]
fn test_collect_reprompts_on_bad_answers() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&["soon", "0", "12", "", "  ", "k", "", "p"]);
    let reporter = RecordingReporter::default();

    let cfg = session(&store, &prompter, &reporter).collect().expect("collect");

    assert_eq!(cfg.sleep_interval, 12);
    assert_eq!(cfg.api_key, "k");
    assert_eq!(cfg.parent_page_id, "p");
    assert_eq!(reporter.count("error:"), 5, "{}", reporter.text());
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn test_collect_trims_pasted_whitespace() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&["5", " secret\n", "  page  "]);
    let reporter = RecordingReporter::default();

    let cfg = session(&store, &prompter, &reporter).collect().expect("collect");
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.parent_page_id, "page");
}

#[test]
fn test_collect_success_lines_never_echo_api_key() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&["45", "abc123", PARENT_PAGE_ID]);
    let reporter = RecordingReporter::default();

    session(&store, &prompter, &reporter).collect().expect("collect");
    assert!(!reporter.text().contains("abc123"));
}

// ── confirm ──────────────────────────────────────────────────────────────────

#[test]
fn test_confirm_blank_defaults_to_yes() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&[""]);
    let reporter = RecordingReporter::default();

    assert!(session(&store, &prompter, &reporter).confirm().expect("confirm"));
}

#[test]
fn test_confirm_is_case_insensitive() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let reporter = RecordingReporter::default();

    let prompter = ScriptedPrompter::new(&["NO"]);
    assert!(!session(&store, &prompter, &reporter).confirm().expect("confirm"));
    let prompter = ScriptedPrompter::new(&["Y"]);
    assert!(session(&store, &prompter, &reporter).confirm().expect("confirm"));
}

#[test]
fn test_confirm_invalid_answer_reprompts_instead_of_defaulting() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&["sure", "nah", "n"]);
    let reporter = RecordingReporter::default();

    let accepted = session(&store, &prompter, &reporter).confirm().expect("confirm");

    assert!(!accepted);
    assert_eq!(prompter.prompts.borrow().len(), 3);
    assert_eq!(reporter.count("error:"), 2);
}

#[test]
fn test_confirm_non_interactive_accepts_without_prompting() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&[]);
    let reporter = RecordingReporter::default();
    let session = ConfigSession {
        store: &store,
        prompter: &prompter,
        reporter: &reporter,
        non_interactive: true,
    };

    assert!(session.confirm().expect("confirm"));
    assert!(prompter.prompts.borrow().is_empty());
}

// ── display ──────────────────────────────────────────────────────────────────

#[test]
fn test_display_redacts_api_key() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&[]);
    let reporter = RecordingReporter::default();

    session(&store, &prompter, &reporter).display(&expected());

    let text = reporter.text();
    assert!(!text.contains("abc123"), "{text}");
    assert!(text.contains(&format!("API_KEY={REDACTED}")), "{text}");
    assert!(text.contains("SLEEP=45"), "{text}");
    assert!(text.contains(&format!("PARENT_PAGE_ID={PARENT_PAGE_ID}")), "{text}");
}

// ── load_or_collect ──────────────────────────────────────────────────────────

#[test]
fn test_load_or_collect_uses_existing_file_without_prompting() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    store.save(&expected()).expect("seed");
    let prompter = ScriptedPrompter::new(&[]);
    let reporter = RecordingReporter::default();

    let cfg = session(&store, &prompter, &reporter)
        .load_or_collect()
        .expect("load");

    assert_eq!(cfg, expected());
    assert!(prompter.prompts.borrow().is_empty());
}

#[test]
fn test_load_or_collect_collects_and_saves_when_absent() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&["45", "abc123", PARENT_PAGE_ID]);
    let reporter = RecordingReporter::default();

    let cfg = session(&store, &prompter, &reporter)
        .load_or_collect()
        .expect("collect");

    assert_eq!(cfg, expected());
    assert_eq!(store.load().expect("saved"), expected());
}

#[test]
fn test_load_or_collect_recollects_on_malformed_file() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    std::fs::write(store.path(), "{\"SLEEP\": ").expect("seed");
    let prompter = ScriptedPrompter::new(&["45", "abc123", PARENT_PAGE_ID]);
    let reporter = RecordingReporter::default();

    let cfg = session(&store, &prompter, &reporter)
        .load_or_collect()
        .expect("collect");

    assert_eq!(cfg, expected());
    assert!(reporter.text().contains("malformed"), "{}", reporter.text());
    assert_eq!(store.load().expect("rewritten"), expected());
}

#[test]
fn test_load_or_collect_non_interactive_without_file_fails() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&[]);
    let reporter = RecordingReporter::default();
    let session = ConfigSession {
        store: &store,
        prompter: &prompter,
        reporter: &reporter,
        non_interactive: true,
    };

    let err = session.load_or_collect().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::NonInteractive(_))
    ));
}

// ── confirm_loop ─────────────────────────────────────────────────────────────

#[test]
fn test_confirm_loop_accepts_first_time() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    let prompter = ScriptedPrompter::new(&["yes"]);
    let reporter = RecordingReporter::default();

    let cfg = session(&store, &prompter, &reporter)
        .confirm_loop(expected())
        .expect("loop");
    assert_eq!(cfg, expected());
}

#[test]
fn test_confirm_loop_rejection_replaces_whole_config() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    store.save(&expected()).expect("seed");
    let prompter = ScriptedPrompter::new(&["no", "", "other-key", "other-page", "no", "10", "k2", "p2", "y"]);
    let reporter = RecordingReporter::default();

    let cfg = session(&store, &prompter, &reporter)
        .confirm_loop(expected())
        .expect("loop");

    let want = AgentConfig {
        sleep_interval: 10,
        api_key: "k2".to_string(),
        parent_page_id: "p2".to_string(),
    };
    assert_eq!(cfg, want);
    assert_eq!(store.load().expect("saved"), want);
    assert_eq!(prompter.remaining(), 0);
}
