//! Monitoring session state: at most one per process, owned by the coordinator.

use crate::filter::FilterConfig;

/// One run of active observation, scoped to a browsing context and bounded
/// by start/stop. `context == None` means accept events regardless of
/// context.
#[derive(Debug, Clone, Default)]
pub struct MonitoringSession {
    pub active: bool,
    pub context: Option<i64>,
    pub filters: FilterConfig,
}

impl MonitoringSession {
    /// An event is in scope unless both sides name a context and they differ.
    /// An unset session context accepts everything; an event with no
    /// resolvable context is never rejected on context grounds.
    pub fn matches_context(&self, event_context: Option<i64>) -> bool {
        match (self.context, event_context) {
            (Some(session), Some(event)) => session == event,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_matching() {
        let mut session = MonitoringSession {
            active: true,
            context: Some(5),
            ..Default::default()
        };
        assert!(session.matches_context(Some(5)));
        assert!(!session.matches_context(Some(6)));
        assert!(session.matches_context(None));

        session.context = None;
        assert!(session.matches_context(Some(6)));
        assert!(session.matches_context(None));
    }
}
