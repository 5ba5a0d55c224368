use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// A message meant for whoever is looking at the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

/// Receives user-visible messages produced while rendering.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);

    fn info(&mut self, message: impl Into<String>) {
        self.notify(Notice {
            level: Level::Info,
            message: message.into(),
        });
    }

    fn success(&mut self, message: impl Into<String>) {
        self.notify(Notice {
            level: Level::Success,
            message: message.into(),
        });
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.notify(Notice {
            level: Level::Warning,
            message: message.into(),
        });
    }

    fn error(&mut self, message: impl Into<String>) {
        self.notify(Notice {
            level: Level::Error,
            message: message.into(),
        });
    }
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Forwards notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.level {
            Level::Info | Level::Success => info!("{}", notice.message),
            Level::Warning => warn!("{}", notice.message),
            Level::Error => error!("{}", notice.message),
        }
    }
}
