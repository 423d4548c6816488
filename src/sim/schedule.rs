//! Cooperative timer queue
//!
//! Delayed work (bubble removal, next target, board regeneration) is queued
//! as a `Continuation` with a due time. Tasks fire in due-time order; tasks
//! due at the same instant fire in the order they were scheduled.

use super::state::BubbleId;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Take a popped bubble off the board
    RemoveBubble(BubbleId),
    /// Drop the incorrect marker from a bubble
    ClearWrongMarker(BubbleId),
    /// Choose the next target
    SelectTarget,
    /// Lay out a fresh board
    RegenerateBoard,
}

/// A continuation waiting for its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub due_ms: u64,
    seq: u64,
    pub action: Continuation,
}

/// Pending tasks, kept sorted by (due time, insertion order)
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_seq: u64,
}

impl Scheduler {
    /// Queue `action` to run at `due_ms`
    pub fn schedule(&mut self, due_ms: u64, action: Continuation) {
        let task = ScheduledTask {
            due_ms,
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        let idx = self
            .tasks
            .partition_point(|t| (t.due_ms, t.seq) <= (task.due_ms, task.seq));
        self.tasks.insert(idx, task);
    }

    /// Remove and return the earliest task due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledTask> {
        if self.tasks.first()?.due_ms <= now_ms {
            Some(self.tasks.remove(0))
        } else {
            None
        }
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<u64> {
        self.tasks.first().map(|t| t.due_ms)
    }

    /// Drop every pending task
    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            log::debug!("Cancelling {} pending tasks", self.tasks.len());
        }
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut sched = Scheduler::default();
        sched.schedule(300, Continuation::SelectTarget);
        sched.schedule(100, Continuation::RemoveBubble(BubbleId(1)));
        sched.schedule(200, Continuation::ClearWrongMarker(BubbleId(2)));

        assert_eq!(sched.next_due(), Some(100));
        assert!(sched.pop_due(50).is_none());

        let order: Vec<_> = std::iter::from_fn(|| sched.pop_due(1000))
            .map(|t| t.action)
            .collect();
        assert_eq!(
            order,
            vec![
                Continuation::RemoveBubble(BubbleId(1)),
                Continuation::ClearWrongMarker(BubbleId(2)),
                Continuation::SelectTarget,
            ]
        );
        assert!(sched.is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut sched = Scheduler::default();
        sched.schedule(250, Continuation::RemoveBubble(BubbleId(5)));
        sched.schedule(250, Continuation::RemoveBubble(BubbleId(3)));
        sched.schedule(250, Continuation::RemoveBubble(BubbleId(4)));

        let ids: Vec<_> = std::iter::from_fn(|| sched.pop_due(250))
            .map(|t| t.action)
            .collect();
        assert_eq!(
            ids,
            vec![
                Continuation::RemoveBubble(BubbleId(5)),
                Continuation::RemoveBubble(BubbleId(3)),
                Continuation::RemoveBubble(BubbleId(4)),
            ]
        );
    }

    #[test]
    fn test_cancel_all() {
        let mut sched = Scheduler::default();
        sched.schedule(10, Continuation::RegenerateBoard);
        sched.schedule(20, Continuation::SelectTarget);
        assert_eq!(sched.len(), 2);
        sched.cancel_all();
        assert!(sched.is_empty());
        assert_eq!(sched.next_due(), None);
    }
}
