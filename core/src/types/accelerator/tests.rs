use super::*;

fn parse(s: &str) -> Result<Accelerator, AcceleratorError> {
    s.parse()
}

mod parsing {
    use super::*;

    #[test]
    fn test_default_shortcuts_parse() {
        let boss = parse("Alt+Q").unwrap();
        assert!(boss.modifiers.alt);
        assert!(!boss.modifiers.ctrl);
        assert_eq!(boss.key, Key::Letter('Q'));

        let memo = parse("Ctrl+Alt+N").unwrap();
        assert!(memo.modifiers.ctrl && memo.modifiers.alt);
        assert_eq!(memo.key, Key::Letter('N'));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(parse(" alt + q ").unwrap(), parse("Alt+Q").unwrap());
        assert_eq!(parse("CTRL+SHIFT+f5").unwrap(), parse("Ctrl+Shift+F5").unwrap());
    }

    #[test]
    fn test_dom_codes() {
        assert_eq!(parse("Ctrl+Alt+KeyK").unwrap().key, Key::Letter('K'));
        assert_eq!(parse("Alt+Digit7").unwrap().key, Key::Digit(7));
        assert_eq!(parse("Ctrl+ArrowUp").unwrap().key, Key::Up);
    }

    #[test]
    fn test_modifier_aliases() {
        let a = parse("CommandOrControl+Shift+K").unwrap();
        assert!(a.modifiers.ctrl && a.modifiers.shift);
        assert!(parse("Win+E").unwrap().modifiers.meta);
        assert!(parse("Option+Space").unwrap().modifiers.alt);
    }

    #[test]
    fn test_function_keys_without_modifiers() {
        let a = parse("F12").unwrap();
        assert!(a.modifiers.is_empty());
        assert_eq!(a.key, Key::Function(12));
        assert_eq!(parse("Ctrl+F24").unwrap().key, Key::Function(24));
    }

    #[test]
    fn test_single_f_is_a_letter() {
        assert_eq!(parse("Alt+F").unwrap().key, Key::Letter('F'));
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(parse(""), Err(AcceleratorError::Empty));
        assert_eq!(parse("   "), Err(AcceleratorError::Empty));
    }

    #[test]
    fn test_modifiers_only() {
        assert_eq!(parse("Ctrl+Alt"), Err(AcceleratorError::NoKey));
        assert_eq!(parse("Ctrl+"), Err(AcceleratorError::NoKey));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse("Ctrl+Banana"),
            Err(AcceleratorError::UnknownKey("Banana".to_string()))
        );
        assert!(parse("Alt+F25").is_err());
    }

    #[test]
    fn test_two_keys() {
        assert!(matches!(
            parse("Ctrl+KeyA+KeyB"),
            Err(AcceleratorError::MultipleKeys(_))
        ));
    }
}

#[test]
fn test_display_is_normalized() {
    assert_eq!(parse("shift+alt+ctrl+q").unwrap().to_string(), "Ctrl+Alt+Shift+Q");
    assert_eq!(parse("Cmd+ArrowLeft").unwrap().to_string(), "Super+Left");
    assert_eq!(parse("Alt+Digit3").unwrap().to_string(), "Alt+3");
}

#[test]
fn test_dom_code() {
    assert_eq!(Key::Letter('Q').dom_code(), "KeyQ");
    assert_eq!(Key::Digit(0).dom_code(), "Digit0");
    assert_eq!(Key::Function(4).dom_code(), "F4");
    assert_eq!(Key::Down.dom_code(), "ArrowDown");
    assert_eq!(Key::PageUp.dom_code(), "PageUp");
    assert_eq!(Key::Escape.dom_code(), "Escape");
}
