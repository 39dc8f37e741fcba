//! Frame Scheduler: hands out one-shot tick tickets at display cadence.

use std::time::{Duration, Instant};

use log::trace;

/// Handle for one pending tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicketId(u64);

/// Per-frame callback driver.  A requested ticket fires at most once; a
/// cancelled ticket never fires.
pub trait FrameScheduler {
    fn request_tick(&mut self) -> TicketId;
    fn cancel_tick(&mut self, ticket: TicketId);
}

/// Fixed-cadence scheduler polled by the host loop.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    next_id: u64,
    pending: Vec<(TicketId, Instant)>,
    last_fired: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        FrameClock {
            interval,
            next_id: 0,
            pending: Vec::new(),
            last_fired: None,
        }
    }

    pub fn with_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticket due one interval after the last fired frame, or one interval
    /// from `now` when that moment has already gone.
    pub fn request_tick_at(&mut self, now: Instant) -> TicketId {
        let id = TicketId(self.next_id);
        self.next_id += 1;
        let due = match self.last_fired {
            Some(last) if last + self.interval > now => last + self.interval,
            _ => now + self.interval,
        };
        self.pending.push((id, due));
        id
    }

    /// Remove and return the earliest ticket due at `now`.
    pub fn poll_due(&mut self, now: Instant) -> Option<TicketId> {
        let (index, &(id, due)) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, due))| *due <= now)
            .min_by_key(|(_, (_, due))| *due)?;
        self.pending.remove(index);
        self.last_fired = Some(due);
        Some(id)
    }

    /// How long the host may sleep before the next ticket falls due.
    /// `None` when nothing is pending.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|(_, due)| due.saturating_duration_since(now))
            .min()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameClock {
    fn request_tick(&mut self) -> TicketId {
        self.request_tick_at(Instant::now())
    }

    fn cancel_tick(&mut self, ticket: TicketId) {
        let before = self.pending.len();
        self.pending.retain(|(id, _)| *id != ticket);
        if self.pending.len() == before {
            trace!("cancel of {:?} ignored: already fired or cancelled", ticket);
        }
    }
}
