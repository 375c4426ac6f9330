use std::sync::Mutex;

use crate::identifier::Identifier;
use crate::processor::TextOrigin;

/// Events emitted by the pipeline during processing.
/// Page text is omitted (can be large).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    PageScanned {
        index: usize,
        total: usize,
        origin: TextOrigin,
        identifier: Option<Identifier>,
    },
    PageDiagnostic {
        index: usize,
        message: String,
    },
    RangesResolved {
        count: usize,
    },
    Completed {
        outputs: usize,
    },
    Failed {
        error: String,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter for callers that only want the final outcome.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Keeps every event in memory, in order.
#[derive(Default)]
pub struct CollectingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl CollectingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn diagnostics(&self) -> Vec<(usize, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::PageDiagnostic { index, message } => Some((index, message)),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for CollectingProgress {
    fn report(&self, event: ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_progress_keeps_order() {
        let progress = CollectingProgress::new();
        progress.report(ProgressEvent::RangesResolved { count: 2 });
        progress.report(ProgressEvent::PageDiagnostic {
            index: 3,
            message: "render failed".to_string(),
        });
        progress.report(ProgressEvent::Completed { outputs: 2 });

        let events = progress.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], ProgressEvent::RangesResolved { count: 2 });
        assert_eq!(progress.diagnostics(), vec![(3, "render failed".to_string())]);
    }
}
