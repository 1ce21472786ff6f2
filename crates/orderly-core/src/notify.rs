use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc};

///
/// NoticeLevel
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Error,
    Info,
    Success,
}

///
/// NoticePersistence
///
/// Toasts dismiss themselves; persistent notices stay until the
/// condition that raised them goes away.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticePersistence {
    Toast,
    Persistent,
}

///
/// Notice
///
/// One user-facing message produced by the reorder controller.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub persistence: NoticePersistence,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            persistence: NoticePersistence::Toast,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            persistence: NoticePersistence::Toast,
            message: message.into(),
        }
    }

    /// Non-blocking explanation that stays visible.
    pub fn persistent_info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            persistence: NoticePersistence::Persistent,
            message: message.into(),
        }
    }
}

///
/// Notifier
///
/// Toast / banner collaborator. Delivery is fire-and-forget.
///

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

///
/// NoticeLog
///
/// In-memory notifier that keeps every notice, in arrival order.
/// Useful for headless drivers and tests.
///

#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: RefCell<Vec<Notice>>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notice> {
        self.notices.borrow_mut().drain(..).collect()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_log_keeps_arrival_order_and_drains() {
        let log = NoticeLog::new();
        log.notify(Notice::success("saved"));
        log.notify(Notice::error("failed"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|n| n.level), Some(NoticeLevel::Error));

        let drained = log.drain();
        assert_eq!(drained[0].message, "saved");
        assert!(log.is_empty());
    }

    #[test]
    fn shared_log_receives_through_rc() {
        let log = Rc::new(NoticeLog::new());
        let handle = Rc::clone(&log);
        handle.notify(Notice::persistent_info("clear filters"));

        let notice = log.last().expect("notice should be recorded");
        assert_eq!(notice.persistence, NoticePersistence::Persistent);
        assert_eq!(notice.level, NoticeLevel::Info);
    }
}
