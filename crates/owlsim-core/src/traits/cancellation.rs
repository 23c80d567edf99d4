//! Stopping an all-pairs run between rows.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something an all-pairs runner polls before starting each row of the
/// comparison matrix. Rows already started run to completion.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);
}

/// Shared flag; clones observe and set the same state, so a caller keeps
/// one clone and hands another to the runner.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }
}
