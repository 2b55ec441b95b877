use std::fmt;

use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

/// Cancellation token for a scheduled callback. A callback only acts on the
/// model while its id is the one currently armed for that purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl TimerId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOperation {
    /// Resolve with `Fired` once `millis` have elapsed, or with `Cancelled`
    /// if a `Cancel` for the same id arrives first.
    Start { id: TimerId, millis: u64 },
    /// Notification only; the shell never answers it directly.
    Cancel { id: TimerId },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOutput {
    Fired { id: TimerId },
    Cancelled { id: TimerId },
}

impl TimerOutput {
    #[must_use]
    pub const fn id(&self) -> TimerId {
        match self {
            Self::Fired { id } | Self::Cancelled { id } => *id,
        }
    }
}

impl Operation for TimerOperation {
    type Output = TimerOutput;
}

#[derive(crux_core::macros::Capability)]
pub struct Timer<Ev> {
    context: CapabilityContext<TimerOperation, Ev>,
}

impl<Ev> Timer<Ev> {
    pub fn new(context: CapabilityContext<TimerOperation, Ev>) -> Self {
        Self { context }
    }
}

impl<Ev> Timer<Ev>
where
    Ev: Send + 'static,
{
    /// Single-shot timer; `callback` maps the shell's answer to an app event.
    pub fn start<F>(&self, id: TimerId, millis: u64, callback: F)
    where
        F: FnOnce(TimerOutput) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let output = ctx
                .request_from_shell(TimerOperation::Start { id, millis })
                .await;
            ctx.update_app(callback(output));
        });
    }

    pub fn cancel(&self, id: TimerId) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(TimerOperation::Cancel { id }).await;
        });
    }
}
