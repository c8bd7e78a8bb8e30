use crate::session::SessionId;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerKind {
    Grace,
    WordTick { period: Duration },
}

#[derive(Debug, Clone)]
struct TimerEntry {
    session: SessionId,
    kind: TimerKind,
    deadline: Instant,
}

/// Pending one-shot and interval timers, keyed by the session that armed them.
#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    entries: Vec<TimerEntry>,
}

impl TimerQueue {
    pub(crate) fn arm_grace(&mut self, session: SessionId, now: Instant, delay: Duration) {
        self.entries
            .retain(|entry| !(entry.session == session && entry.kind == TimerKind::Grace));
        self.entries.push(TimerEntry {
            session,
            kind: TimerKind::Grace,
            deadline: now + delay,
        });
    }

    /// Arm (or re-arm) the session's word timer; the first tick is one
    /// period from now.
    pub(crate) fn arm_interval(&mut self, session: SessionId, now: Instant, period: Duration) {
        self.disarm_interval(session);
        self.entries.push(TimerEntry {
            session,
            kind: TimerKind::WordTick { period },
            deadline: now + period,
        });
    }

    pub(crate) fn disarm_interval(&mut self, session: SessionId) {
        self.entries.retain(|entry| {
            !(entry.session == session && matches!(entry.kind, TimerKind::WordTick { .. }))
        });
    }

    pub(crate) fn disarm_session(&mut self, session: SessionId) {
        self.entries.retain(|entry| entry.session != session);
    }

    /// Earliest timer due at `now`. One-shot timers are removed; interval
    /// timers move to their next deadline.
    pub(crate) fn pop_due(&mut self, now: Instant) -> Option<(SessionId, TimerKind)> {
        let (idx, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| entry.deadline)?;

        let fired = match self.entries[idx].kind {
            TimerKind::Grace => self.entries.remove(idx),
            TimerKind::WordTick { period } => {
                let entry = &mut self.entries[idx];
                let fired = entry.clone();
                entry.deadline += period;
                fired
            }
        };
        Some((fired.session, fired.kind))
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.deadline).min()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
