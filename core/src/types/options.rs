pub const DEFAULT_READER_URL: &str = "https://book.ztrztr.top/";
pub const DEFAULT_MEMO_URL: &str = "https://book.ztrztr.top/memo";

/// How to construct the native window for a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// Keep the native window unshown until its content has finished loading.
    pub show_when_ready: bool,
}

impl WindowSpec {
    pub fn reader() -> Self {
        Self {
            title: "Smart NoteDB".to_string(),
            url: DEFAULT_READER_URL.to_string(),
            width: 1200,
            height: 800,
            show_when_ready: false,
        }
    }

    pub fn memo() -> Self {
        Self {
            title: "Smart NoteDB - Memo".to_string(),
            url: DEFAULT_MEMO_URL.to_string(),
            width: 480,
            height: 640,
            show_when_ready: true,
        }
    }
}

/// Static shell configuration, fixed for the life of the process.
#[derive(Clone, Debug)]
pub struct ShellOptions {
    pub primary: WindowSpec,
    pub memo: WindowSpec,
    pub memo_enabled: bool,
    pub tray_tooltip: String,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            primary: WindowSpec::reader(),
            memo: WindowSpec::memo(),
            memo_enabled: true,
            tray_tooltip: "Smart NoteDB".to_string(),
        }
    }
}
