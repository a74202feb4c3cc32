use recipebox_core::models::NotificationLevel;
use recipebox_core::Notifier;

/// Prints notifications to stderr, one per line
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    fn line(level: NotificationLevel, message: &str) -> String {
        let marker = match level {
            NotificationLevel::Success => "✓",
            NotificationLevel::Error => "✗",
            NotificationLevel::Info => "i",
        };
        format!("{} {}", marker, message)
    }
}

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        eprintln!("{}", Self::line(NotificationLevel::Success, message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", Self::line(NotificationLevel::Error, message));
    }

    fn info(&self, message: &str) {
        eprintln!("{}", Self::line(NotificationLevel::Info, message));
    }
}
