mod common;

use common::*;
use notedb_core::{
    Flow, HotkeyError, HotkeyId, IncomingMessage, OutgoingMessage, SettingsError, ShellError,
    ShellEvent, ShellOptions, ShortcutAction, ShortcutConfig, WindowSlot, WindowState,
};
use tempfile::{NamedTempFile, tempdir};

fn partial(pairs: &[(&str, &str)]) -> ShortcutConfig {
    pairs.iter().copied().collect()
}

fn saved(path: &std::path::Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path.join("settings.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

mod loading {
    use super::*;

    /// Verify a missing settings file yields exactly the default bindings.
    #[test]
    fn test_missing_file_binds_defaults() {
        let dir = tempdir().unwrap();
        let shell = started(dir.path());

        assert_eq!(shell.get_shortcuts(), &ShortcutConfig::default());
        let hotkeys = shell.registrar().backend();
        assert!(hotkeys.is_bound("Alt+Q"));
        assert!(hotkeys.is_bound("Alt+S"));
        assert!(hotkeys.is_bound("Ctrl+Alt+N"));
    }

    /// Verify a partial settings file overrides only the keys it names.
    #[test]
    fn test_partial_file_merges_over_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"bossKey":"Alt+Z"}"#).unwrap();

        let shell = started(dir.path());

        assert_eq!(shell.get_shortcuts().get("bossKey"), Some("Alt+Z"));
        assert_eq!(shell.get_shortcuts().get("stopTtsKey"), Some("Alt+S"));
        assert!(shell.registrar().backend().is_bound("Alt+Z"));
        assert!(!shell.registrar().backend().is_bound("Alt+Q"));
    }

    /// Verify a corrupt settings file is ignored in favour of the defaults.
    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

        let shell = started(dir.path());

        assert_eq!(shell.get_shortcuts(), &ShortcutConfig::default());
        assert_eq!(shell.registrar().live_bindings().len(), 3);
    }
}

mod reconfigure {
    use super::*;

    /// Verify an update persists the merged config and moves the binding.
    #[test]
    fn test_update_rebinds_and_persists() {
        let dir = tempdir().unwrap();
        let mut shell = started(dir.path());

        let report = shell
            .update_shortcuts(partial(&[("bossKey", "Ctrl+Shift+B")]))
            .unwrap();

        assert!(report.is_complete());
        let hotkeys = shell.registrar().backend();
        assert!(hotkeys.is_bound("Ctrl+Shift+B"));
        assert!(!hotkeys.is_bound("Alt+Q"));
        assert_eq!(hotkeys.live.len(), 3);

        let json = saved(dir.path());
        assert_eq!(json["bossKey"], "Ctrl+Shift+B");
        assert_eq!(json["stopTtsKey"], "Alt+S");
        assert_eq!(json["memoKey"], "Ctrl+Alt+N");
    }

    /// Verify reapplying the same config leaves the same bindings live.
    #[test]
    fn test_reapply_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut shell = started(dir.path());
        let before = shell.registrar().live_bindings().clone();

        shell.update_shortcuts(ShortcutConfig::empty()).unwrap();
        shell.update_shortcuts(ShortcutConfig::empty()).unwrap();

        assert_eq!(shell.registrar().live_bindings(), &before);
        assert_eq!(shell.registrar().backend().live.len(), 3);
    }

    /// Verify a rebound hotkey fires the same action under its new accelerator.
    #[test]
    fn test_rebound_memo_key_still_toggles_memo() {
        let dir = tempdir().unwrap();
        let mut shell = started(dir.path());
        shell
            .update_shortcuts(partial(&[("memoKey", "Ctrl+Alt+M")]))
            .unwrap();

        shell.handle(ShellEvent::Hotkey(HotkeyId::for_action(ShortcutAction::Memo)));

        assert_eq!(shell.windows().state(WindowSlot::Memo), WindowState::Visible);
    }

    /// Verify a malformed accelerator leaves only its own action unbound.
    #[test]
    fn test_malformed_accelerator_is_isolated() {
        let dir = tempdir().unwrap();
        let mut shell = started(dir.path());

        let report = shell
            .update_shortcuts(partial(&[("stopTtsKey", "Ctrl+Alt")]))
            .unwrap();

        assert!(matches!(
            report.failure(ShortcutAction::StopSpeech),
            Some(HotkeyError::InvalidAccelerator { .. })
        ));
        assert!(!shell.registrar().live_bindings().contains_key(&ShortcutAction::StopSpeech));
        assert!(shell.registrar().backend().is_bound("Alt+Q"));
        assert!(shell.registrar().backend().is_bound("Ctrl+Alt+N"));
    }

    /// Verify an accelerator held by another application does not stop the boss key from binding.
    #[test]
    fn test_stop_speech_conflict_does_not_block_boss_key() {
        let dir = tempdir().unwrap();
        let mut shell = shell_with(
            dir.path(),
            ShellOptions::default(),
            FakeHotkeys::taking(&["Alt+S"]),
        );

        let report = shell.startup().unwrap();

        assert_eq!(
            report.failure(ShortcutAction::StopSpeech),
            Some(&HotkeyError::AlreadyInUse("Alt+S".to_string()))
        );
        assert!(shell.registrar().backend().is_bound("Alt+Q"));
        assert!(shell.registrar().backend().is_bound("Ctrl+Alt+N"));
    }

    /// Verify the stop-speech hotkey is dead while unbound, and live again after a successful rebind.
    #[test]
    fn test_unbound_action_recovers_after_rebind() {
        let dir = tempdir().unwrap();
        let mut shell = shell_with(
            dir.path(),
            ShellOptions::default(),
            FakeHotkeys::taking(&["Alt+S"]),
        );
        shell.startup().unwrap();
        let stop = ShellEvent::Hotkey(HotkeyId::for_action(ShortcutAction::StopSpeech));

        shell.handle(stop.clone());
        assert!(shell.windows().backend().posted.is_empty());

        shell
            .update_shortcuts(partial(&[("stopTtsKey", "Alt+Shift+S")]))
            .unwrap();
        shell.handle(stop);
        assert_eq!(
            shell.windows().backend().posted_to(WindowSlot::Primary),
            vec![&OutgoingMessage::StopTts]
        );
    }

    /// Verify a failed save still applies the new bindings and reports the error.
    #[test]
    fn test_save_failure_keeps_new_bindings() {
        let file = NamedTempFile::new().unwrap();
        let mut shell = started(file.path());

        let result = shell.update_shortcuts(partial(&[("bossKey", "Alt+W")]));

        assert!(matches!(result, Err(ShellError::Settings(SettingsError::Io(_)))));
        assert_eq!(shell.get_shortcuts().get("bossKey"), Some("Alt+W"));
        assert!(shell.registrar().backend().is_bound("Alt+W"));
        assert!(!shell.registrar().backend().is_bound("Alt+Q"));
    }

    /// Verify an update after quit neither rebinds hotkeys nor touches the settings file.
    #[test]
    fn test_update_after_quit_is_rejected() {
        let dir = tempdir().unwrap();
        let mut shell = started(dir.path());
        shell.quit();

        let result = shell.update_shortcuts(partial(&[("bossKey", "Alt+W")]));

        assert!(matches!(result, Err(ShellError::NotRunning)));
        assert!(shell.registrar().backend().live.is_empty());
        assert!(shell.registrar().live_bindings().is_empty());
        assert!(!dir.path().join("settings.json").exists());
    }

    /// Verify an update before startup leaves the user's settings file as it was.
    #[test]
    fn test_update_before_startup_keeps_file() {
        let dir = tempdir().unwrap();
        let original = r#"{"stopTtsKey":"Alt+X","futureKey":"F9"}"#;
        std::fs::write(dir.path().join("settings.json"), original).unwrap();
        let mut shell = shell(dir.path());

        let result = shell.update_shortcuts(partial(&[("bossKey", "Alt+W")]));

        assert!(matches!(result, Err(ShellError::NotRunning)));
        assert!(shell.registrar().backend().live.is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("settings.json")).unwrap(),
            original
        );

        shell.startup().unwrap();
        assert_eq!(shell.get_shortcuts().get("stopTtsKey"), Some("Alt+X"));
        assert_eq!(shell.get_shortcuts().get("futureKey"), Some("F9"));
        assert!(shell.registrar().backend().is_bound("Alt+Q"));
    }

    /// Verify a settings file with a non-string unknown entry keeps the user's bindings and the entry.
    #[test]
    fn test_structured_unknown_entry_survives_update() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"bossKey":"Alt+Z","theme":{"dark":true}}"#,
        )
        .unwrap();
        let mut shell = started(dir.path());
        assert!(shell.registrar().backend().is_bound("Alt+Z"));

        shell
            .update_shortcuts(partial(&[("stopTtsKey", "Alt+X")]))
            .unwrap();

        let json = saved(dir.path());
        assert_eq!(json["bossKey"], "Alt+Z");
        assert_eq!(json["stopTtsKey"], "Alt+X");
        assert_eq!(json["theme"], serde_json::json!({"dark": true}));
    }
}

mod content {
    use super::*;

    /// Verify getShortcuts is answered on the asking window with the full config and the same request id.
    #[test]
    fn test_get_shortcuts_replies_to_sender() {
        let dir = tempdir().unwrap();
        let mut shell = started(dir.path());

        let flow = shell.handle(ShellEvent::Content {
            slot: WindowSlot::Primary,
            message: IncomingMessage::GetShortcuts { request_id: 11 },
        });

        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            shell.windows().backend().posted_to(WindowSlot::Primary),
            vec![&OutgoingMessage::Shortcuts {
                request_id: 11,
                shortcuts: ShortcutConfig::default(),
            }]
        );
    }

    /// Verify updateShortcuts from content is silent on success.
    #[test]
    fn test_update_from_content() {
        let dir = tempdir().unwrap();
        let mut shell = started(dir.path());
        let message = IncomingMessage::parse(
            r#"{"type":"updateShortcuts","shortcuts":{"stopTtsKey":"F8"}}"#,
        )
        .unwrap();

        shell.handle(ShellEvent::Content {
            slot: WindowSlot::Primary,
            message,
        });

        assert!(shell.registrar().backend().is_bound("F8"));
        assert!(shell.windows().backend().posted.is_empty());
        assert_eq!(saved(dir.path())["stopTtsKey"], "F8");
    }

    /// Verify a failed save from content is reported back to the requesting window.
    #[test]
    fn test_update_from_content_reports_save_failure() {
        let file = NamedTempFile::new().unwrap();
        let mut shell = started(file.path());
        shell.handle(ShellEvent::Tray(notedb_core::TrayEvent::Menu(
            notedb_core::TrayItem::OpenMemo,
        )));

        shell.handle(ShellEvent::Content {
            slot: WindowSlot::Memo,
            message: IncomingMessage::UpdateShortcuts {
                shortcuts: partial(&[("bossKey", "Alt+W")]),
            },
        });

        let posted = shell.windows().backend().posted_to(WindowSlot::Memo);
        assert_eq!(posted.len(), 1);
        assert!(matches!(posted[0], OutgoingMessage::ShortcutsSaveFailed { .. }));
        assert!(shell.registrar().backend().is_bound("Alt+W"));
    }
}
