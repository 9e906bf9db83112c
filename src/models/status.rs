//! Status line shown under the toolbar.

/// What the status line currently says.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusMessage {
    #[default]
    Idle,
    /// A directory is being read.
    Loading,
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Loading => Some("Reading directory…"),
            Self::Info(text) | Self::Error(text) => Some(text),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Messages that go away on their own.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Info(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(StatusMessage::Idle.text(), None);
        assert!(StatusMessage::Loading.text().is_some());
        assert_eq!(StatusMessage::Error("boom".into()).text(), Some("boom"));
        assert!(StatusMessage::Error("boom".into()).is_error());
        assert!(StatusMessage::Info("3 images".into()).is_transient());
        assert!(!StatusMessage::Loading.is_transient());
    }
}
