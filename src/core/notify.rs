//! Best-effort desktop notifications.
//!
//! Uses `osascript` on macOS and `notify-send` on Linux. Missing tools and
//! failures are ignored. Setting `GITCLI_NO_NOTIFY` disables notifications.

use std::process::{Command, Stdio};

pub const DISABLE_ENV: &str = "GITCLI_NO_NOTIFY";
const TITLE: &str = "GitCLI";

#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os(DISABLE_ENV).is_none(),
        }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn send(&self, message: &str) {
        if !self.is_enabled() {
            return;
        }

        let mut command = match std::env::consts::OS {
            "macos" => {
                let script = format!(
                    "display notification \"{}\" with title \"{TITLE}\"",
                    message.replace('"', "'")
                );
                let mut cmd = Command::new("osascript");
                cmd.arg("-e").arg(script);
                cmd
            }
            "linux" | "freebsd" | "netbsd" | "openbsd" => {
                let mut cmd = Command::new("notify-send");
                cmd.arg(TITLE).arg(message);
                cmd
            }
            _ => return,
        };

        let result = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        if let Err(e) = result {
            log::debug!("notification skipped: {e}");
        }
    }
}

/// Shorten `text` to at most `max` characters for notification bodies.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max).collect();
        short.push_str("...");
        short
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_notifier_does_nothing() {
        let notifier = Notifier::disabled();
        assert!(!notifier.is_enabled());
        notifier.send("Commit successful");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdefgh", 3), "abc...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }
}
