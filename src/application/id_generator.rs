// src/application/id_generator.rs
use crate::domain::NoteId;

pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Hands out creation-ordered ids derived from the clock.
///
/// Two ids requested within the same millisecond (or after the clock went
/// backwards) still come out strictly increasing.
#[derive(Debug)]
pub struct NoteIdGenerator<C: Clock = SystemClock> {
    clock: C,
    last: NoteId,
}

impl<C: Clock> NoteIdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last: NoteId::MIN,
        }
    }

    /// Make sure future ids are greater than `id`.
    pub fn observe(&mut self, id: NoteId) {
        self.last = self.last.max(id);
    }

    pub fn next_id(&mut self) -> NoteId {
        let now = self.clock.now_millis();
        let id = if now > self.last {
            now
        } else {
            self.last.saturating_add(1)
        };
        self.last = id;
        id
    }
}

impl Default for NoteIdGenerator<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}
