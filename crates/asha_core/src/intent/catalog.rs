//! Static website and application catalogs for "open ..." intents.
//!
//! # Responsibility
//! - Map spoken keywords to navigation targets and launcher commands.
//!
//! # Invariants
//! - Lookup scans in declared order; the first contained keyword wins.
//! - Catalog keywords are lower-case; callers pass lower-cased text.

/// One navigable website.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Website {
    /// Spoken keyword matched against the lower-cased utterance.
    pub keyword: &'static str,
    pub url: &'static str,
    pub name: &'static str,
}

pub const WEBSITES: &[Website] = &[
    Website {
        keyword: "youtube",
        url: "https://www.youtube.com",
        name: "YouTube",
    },
    Website {
        keyword: "gmail",
        url: "https://mail.google.com",
        name: "Gmail",
    },
    Website {
        keyword: "mail",
        url: "https://mail.google.com",
        name: "Gmail",
    },
    Website {
        keyword: "google",
        url: "https://www.google.com",
        name: "Google",
    },
    Website {
        keyword: "github",
        url: "https://github.com",
        name: "GitHub",
    },
    Website {
        keyword: "instagram",
        url: "https://www.instagram.com",
        name: "Instagram",
    },
    Website {
        keyword: "whatsapp",
        url: "https://web.whatsapp.com",
        name: "WhatsApp Web",
    },
    Website {
        keyword: "twitter",
        url: "https://x.com",
        name: "X (Twitter)",
    },
    Website {
        keyword: "x.com",
        url: "https://x.com",
        name: "X (Twitter)",
    },
    Website {
        keyword: "linkedin",
        url: "https://www.linkedin.com",
        name: "LinkedIn",
    },
    Website {
        keyword: "chatgpt",
        url: "https://chat.openai.com",
        name: "ChatGPT",
    },
    Website {
        keyword: "facebook",
        url: "https://www.facebook.com",
        name: "Facebook",
    },
    Website {
        keyword: "spotify",
        url: "https://open.spotify.com",
        name: "Spotify",
    },
    Website {
        keyword: "reddit",
        url: "https://www.reddit.com",
        name: "Reddit",
    },
    Website {
        keyword: "stackoverflow",
        url: "https://stackoverflow.com",
        name: "Stack Overflow",
    },
    Website {
        keyword: "amazon",
        url: "https://www.amazon.in",
        name: "Amazon",
    },
    Website {
        keyword: "flipkart",
        url: "https://www.flipkart.com",
        name: "Flipkart",
    },
];

/// One launchable local application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownApp {
    /// Spoken keyword matched against the lower-cased utterance.
    pub keyword: &'static str,
    /// Command string handed to the launcher collaborator.
    pub command: &'static str,
    /// Display name used in responses.
    pub name: &'static str,
}

pub const APPS: &[KnownApp] = &[
    KnownApp {
        keyword: "vs code",
        command: "code",
        name: "VS Code",
    },
    KnownApp {
        keyword: "vscode",
        command: "code",
        name: "VS Code",
    },
    KnownApp {
        keyword: "visual studio code",
        command: "code",
        name: "VS Code",
    },
    KnownApp {
        keyword: "chrome",
        command: "chrome",
        name: "Google Chrome",
    },
    KnownApp {
        keyword: "calculator",
        command: "calc",
        name: "Calculator",
    },
    KnownApp {
        keyword: "notepad",
        command: "notepad",
        name: "Notepad",
    },
    KnownApp {
        keyword: "paint",
        command: "mspaint",
        name: "Paint",
    },
    KnownApp {
        keyword: "task manager",
        command: "taskmgr",
        name: "Task Manager",
    },
    KnownApp {
        keyword: "command prompt",
        command: "cmd",
        name: "Command Prompt",
    },
    KnownApp {
        keyword: "terminal",
        command: "wt",
        name: "Terminal",
    },
    KnownApp {
        keyword: "powershell",
        command: "powershell",
        name: "PowerShell",
    },
    KnownApp {
        keyword: "file explorer",
        command: "explorer",
        name: "File Explorer",
    },
    KnownApp {
        keyword: "explorer",
        command: "explorer",
        name: "File Explorer",
    },
    KnownApp {
        keyword: "control panel",
        command: "control",
        name: "Control Panel",
    },
    KnownApp {
        keyword: "settings",
        command: "ms-settings:",
        name: "Settings",
    },
    KnownApp {
        keyword: "word",
        command: "winword",
        name: "Word",
    },
    KnownApp {
        keyword: "excel",
        command: "excel",
        name: "Excel",
    },
    KnownApp {
        keyword: "powerpoint",
        command: "powerpnt",
        name: "PowerPoint",
    },
    KnownApp {
        keyword: "snipping tool",
        command: "SnippingTool",
        name: "Snipping Tool",
    },
    KnownApp {
        keyword: "camera",
        command: "microsoft.windows.camera:",
        name: "Camera",
    },
];

/// Finds the first website whose keyword occurs in the utterance.
pub fn match_website(lower: &str) -> Option<&'static Website> {
    WEBSITES.iter().find(|site| lower.contains(site.keyword))
}

/// Finds the first app whose keyword occurs in the utterance.
pub fn match_app(lower: &str) -> Option<&'static KnownApp> {
    APPS.iter().find(|app| lower.contains(app.keyword))
}

#[cfg(test)]
mod tests {
    use super::{match_app, match_website};

    #[test]
    fn website_lookup_scans_in_declared_order() {
        let site = match_website("open gmail please").expect("gmail is cataloged");
        assert_eq!(site.name, "Gmail");
        // "mail" is also a keyword for Gmail; earlier entry still wins.
        let site = match_website("open mail").expect("mail is cataloged");
        assert_eq!(site.url, "https://mail.google.com");
        assert!(match_website("open the pod bay doors").is_none());
    }

    #[test]
    fn app_lookup_handles_multi_word_keywords() {
        let app = match_app("open visual studio code").expect("vs code is cataloged");
        assert_eq!(app.command, "code");
        let app = match_app("open task manager").expect("task manager is cataloged");
        assert_eq!(app.command, "taskmgr");
        assert!(match_app("open something unknown").is_none());
    }
}
