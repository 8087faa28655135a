//! User-facing notifications (toast messages in a browser shell).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

pub trait Notifier {
    fn notify(&mut self, level: Level, message: &str);

    fn success(&mut self, message: &str) {
        self.notify(Level::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(Level::Error, message);
    }
}
