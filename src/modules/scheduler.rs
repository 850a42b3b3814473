use std::time::Instant;

/// Handle to a scheduled task, used to cancel it before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskToken(u64);

struct Scheduled<T> {
    token: TaskToken,
    due: Instant,
    task: T,
}

/// Delayed work for the UI thread. Nothing runs on its own: the owner
/// polls `take_due` once per frame and executes what comes back.
pub struct TaskQueue<T> {
    next_id: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self { next_id: 0, tasks: Vec::new() }
    }

    pub fn schedule(&mut self, due: Instant, task: T) -> TaskToken {
        let token = TaskToken(self.next_id);
        self.next_id += 1;
        self.tasks.push(Scheduled { token, due, task });
        token
    }

    /// Returns false when the task already ran or was cancelled.
    pub fn cancel(&mut self, token: TaskToken) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|s| s.token != token);
        self.tasks.len() != before
    }

    #[cfg(test)]
    pub fn is_pending(&self, token: TaskToken) -> bool {
        self.tasks.iter().any(|s| s.token == token)
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|s| s.due).min()
    }

    /// Removes every task due at or before `now`, ordered by deadline and
    /// then by scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TaskToken, T)> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|s| s.due <= now);
        self.tasks = pending;
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.token.0.cmp(&b.token.0)));
        due.into_iter().map(|s| (s.token, s.task)).collect()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn runs_in_deadline_order() {
        let t0 = Instant::now();
        let mut queue = TaskQueue::new();
        queue.schedule(t0 + Duration::from_millis(50), "late");
        queue.schedule(t0, "now");
        queue.schedule(t0, "now-second");

        assert_eq!(queue.next_due(), Some(t0));
        let ran: Vec<_> = queue
            .take_due(t0 + Duration::from_millis(60))
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        assert_eq!(ran, vec!["now", "now-second", "late"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn leaves_future_tasks_alone() {
        let t0 = Instant::now();
        let mut queue = TaskQueue::new();
        let token = queue.schedule(t0 + Duration::from_millis(50), 1);

        assert!(queue.take_due(t0 + Duration::from_millis(49)).is_empty());
        assert!(queue.is_pending(token));
        assert_eq!(queue.take_due(t0 + Duration::from_millis(50)).len(), 1);
        assert!(!queue.is_pending(token));
    }

    #[test]
    fn cancelled_tasks_never_run() {
        let t0 = Instant::now();
        let mut queue = TaskQueue::new();
        let first = queue.schedule(t0, 'a');
        queue.schedule(t0, 'b');

        assert!(queue.cancel(first));
        assert!(!queue.cancel(first));
        let ran: Vec<_> = queue.take_due(t0).into_iter().map(|(_, t)| t).collect();
        assert_eq!(ran, vec!['b']);
    }
}
