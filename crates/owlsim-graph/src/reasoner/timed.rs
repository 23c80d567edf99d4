//! Timeout wrapper around a blocking reasoner.
//!
//! Classification runs on a dedicated thread; the caller waits on a
//! crossbeam channel with `recv_timeout`. A timed-out classification keeps
//! running in the background but its result is discarded.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use owlsim_core::errors::ReasonerError;
use owlsim_core::traits::{EquivalenceNode, Reasoner};
use owlsim_core::types::ObjectId;
use tracing::{info, warn};

pub struct TimedReasoner<R: Reasoner + 'static> {
    inner: Arc<R>,
    timeout: Duration,
}

impl<R: Reasoner + 'static> TimedReasoner<R> {
    pub fn new(inner: Arc<R>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &Arc<R> {
        &self.inner
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<R: Reasoner + 'static> Reasoner for TimedReasoner<R> {
    fn precompute_inferences(&self) -> Result<(), ReasonerError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let inner = Arc::clone(&self.inner);
        thread::Builder::new()
            .name("owlsim-reasoner".to_string())
            .spawn(move || {
                let _ = tx.send(inner.precompute_inferences());
            })
            .map_err(|e| ReasonerError::Unavailable {
                reason: e.to_string(),
            })?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => {
                info!("classification finished within timeout");
                result
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(timeout_secs = self.timeout.as_secs(), "classification timed out");
                Err(ReasonerError::Timeout {
                    seconds: self.timeout.as_secs(),
                })
            }
            Err(RecvTimeoutError::Disconnected) => Err(ReasonerError::ClassificationFailed {
                reason: "reasoner thread terminated without a result".to_string(),
            }),
        }
    }

    fn super_classes(&self, class: ObjectId, direct: bool) -> Vec<EquivalenceNode> {
        self.inner.super_classes(class, direct)
    }

    fn sub_classes(&self, class: ObjectId, direct: bool) -> Vec<EquivalenceNode> {
        self.inner.sub_classes(class, direct)
    }

    fn equivalent_classes(&self, class: ObjectId) -> EquivalenceNode {
        self.inner.equivalent_classes(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowReasoner {
        delay: Duration,
    }

    impl Reasoner for SlowReasoner {
        fn precompute_inferences(&self) -> Result<(), ReasonerError> {
            thread::sleep(self.delay);
            Ok(())
        }
        fn super_classes(&self, _class: ObjectId, _direct: bool) -> Vec<EquivalenceNode> {
            Vec::new()
        }
        fn sub_classes(&self, _class: ObjectId, _direct: bool) -> Vec<EquivalenceNode> {
            Vec::new()
        }
        fn equivalent_classes(&self, class: ObjectId) -> EquivalenceNode {
            EquivalenceNode::singleton(class)
        }
    }

    #[test]
    fn slow_classification_times_out() {
        let reasoner = TimedReasoner::new(
            Arc::new(SlowReasoner {
                delay: Duration::from_millis(500),
            }),
            Duration::from_millis(20),
        );
        let err = reasoner.precompute_inferences().unwrap_err();
        assert!(matches!(err, ReasonerError::Timeout { .. }));
    }

    #[test]
    fn fast_classification_passes_through() {
        let reasoner = TimedReasoner::new(
            Arc::new(SlowReasoner {
                delay: Duration::from_millis(1),
            }),
            Duration::from_secs(5),
        );
        assert!(reasoner.precompute_inferences().is_ok());
    }
}
