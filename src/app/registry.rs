//! Known-application registry
//!
//! A fixed allow-list mapping executable names to an icon and a friendly
//! display name. Processes whose name is not in the table are never
//! tracked.

/// Display identity of a known application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownApp {
    /// Single emoji shown in the icon column
    pub icon: &'static str,
    /// Friendly name shown instead of the executable name
    pub display_name: &'static str,
}

const fn app(key: &'static str, icon: &'static str, display_name: &'static str) -> (&'static str, KnownApp) {
    (key, KnownApp { icon, display_name })
}

/// Keys are normalised executable names (see `normalize_name`).
static KNOWN_APPS: &[(&str, KnownApp)] = &[
    // Browsers
    app("chrome", "🌐", "Google Chrome"),
    app("firefox", "🦊", "Mozilla Firefox"),
    app("msedge", "🌐", "Microsoft Edge"),
    app("opera", "🎭", "Opera Browser"),
    app("brave", "🦁", "Brave Browser"),
    app("safari", "🧭", "Safari"),
    // Communication
    app("discord", "💬", "Discord"),
    app("spotify", "🎵", "Spotify"),
    app("teams", "👥", "Microsoft Teams"),
    app("zoom", "📹", "Zoom"),
    app("skype", "📞", "Skype"),
    app("slack", "💼", "Slack"),
    app("whatsapp", "💚", "WhatsApp"),
    app("telegram", "✈️", "Telegram"),
    // Games and launchers
    app("steam", "🎮", "Steam"),
    app("epicgameslauncher", "🎮", "Epic Games"),
    app("riotclientservices", "🎮", "Riot Client"),
    app("battlenet", "⚔️", "Battle.net"),
    app("leagueclient", "🎮", "League of Legends"),
    app("valorant", "🎮", "Valorant"),
    // Development
    app("code", "💻", "VS Code"),
    app("devenv", "🔧", "Visual Studio"),
    app("notepad++", "📝", "Notepad++"),
    app("sublime_text", "📝", "Sublime Text"),
    app("atom", "⚛️", "Atom"),
    app("rider", "🔧", "JetBrains Rider"),
    app("pycharm", "🐍", "PyCharm"),
    app("webstorm", "🌐", "WebStorm"),
    // Media
    app("vlc", "🎬", "VLC Media Player"),
    app("wmplayer", "🎵", "Windows Media Player"),
    app("foobar2000", "🎵", "Foobar2000"),
    app("itunes", "🎵", "iTunes"),
    // Office
    app("winword", "📄", "Microsoft Word"),
    app("excel", "📊", "Microsoft Excel"),
    app("powerpnt", "📽️", "PowerPoint"),
    app("onenote", "📒", "OneNote"),
    app("outlook", "📧", "Outlook"),
    // Design
    app("photoshop", "🎨", "Photoshop"),
    app("illustrator", "🖌️", "Illustrator"),
    app("blender", "🎨", "Blender"),
    app("gimp", "🎨", "GIMP"),
    app("figma", "🎨", "Figma"),
    // OS utilities
    app("explorer", "📁", "Windows Explorer"),
    app("notepad", "📝", "Notepad"),
    app("calc", "🔢", "Calculator"),
    app("cmd", "⚫", "Command Prompt"),
    app("powershell", "🔵", "PowerShell"),
    app("taskmgr", "⚙️", "Task Manager"),
    app("mmc", "⚙️", "Management Console"),
    app("regedit", "📝", "Registry Editor"),
    // Cloud storage and archivers
    app("dropbox", "📦", "Dropbox"),
    app("onedrive", "☁️", "OneDrive"),
    app("googledrive", "☁️", "Google Drive"),
    app("7zfm", "📦", "7-Zip"),
    app("winrar", "📦", "WinRAR"),
];

/// Lowercases an executable name and strips a trailing ".exe".
///
/// ToolHelp reports "Chrome.exe" while other platforms report "chrome";
/// both normalise to "chrome".
pub fn normalize_name(executable: &str) -> String {
    let lower = executable.trim().to_lowercase();
    match lower.strip_suffix(".exe") {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

/// Looks up the display identity of an executable.
pub fn lookup(executable: &str) -> Option<&'static KnownApp> {
    let key = normalize_name(executable);
    KNOWN_APPS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, app)| app)
}

/// Number of applications in the allow-list
pub fn known_app_count() -> usize {
    KNOWN_APPS.len()
}
