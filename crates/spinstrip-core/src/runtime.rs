use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use web_time::Instant;

pub type TaskId = u64;

struct Task {
    id: TaskId,
    due_ms: u64,
    seq: u64,
    callback: Box<dyn FnOnce(u64)>,
}

struct RuntimeInner {
    next_id: TaskId,
    next_seq: u64,
    now_ms: u64,
    tasks: SmallVec<[Task; 8]>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            next_id: 1,
            next_seq: 0,
            now_ms: 0,
            tasks: SmallVec::new(),
        }
    }
}

/// Owner of the task queue. Lives on the thread that delivers pointer
/// events; integrations either call [`Runtime::pump`] from their event loop
/// or drive a [`RuntimeHandle`] deterministically with explicit timestamps.
pub struct Runtime {
    inner: Rc<RefCell<RuntimeInner>>,
    origin: Instant,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RuntimeInner::new())),
            origin: Instant::now(),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: self.inner.clone(),
        }
    }

    /// Runs all tasks due by wall-clock time since the runtime was created.
    pub fn pump(&self) {
        let now_ms = self.origin.elapsed().as_millis() as u64;
        self.handle().drain(now_ms);
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle used to schedule, cancel, and drain deferred tasks.
///
/// Tasks scheduled with the same deadline run in scheduling order, so a
/// burst of zero-delay callbacks from one gesture is delivered
/// first-scheduled-first-run.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RefCell<RuntimeInner>>,
}

impl RuntimeHandle {
    /// Schedules `callback` to run once `delay_ms` has elapsed from the
    /// queue's current time. The callback receives the drain timestamp.
    pub fn post(&self, delay_ms: u64, callback: impl FnOnce(u64) + 'static) -> TaskId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let due_ms = inner.now_ms + delay_ms;
        inner.tasks.push(Task {
            id,
            due_ms,
            seq,
            callback: Box::new(callback),
        });
        id
    }

    /// Schedules a task and wraps it in a registration that cancels the
    /// task when dropped.
    pub fn register(
        &self,
        delay_ms: u64,
        callback: impl FnOnce(u64) + 'static,
    ) -> TaskRegistration {
        let id = self.post(delay_ms, callback);
        TaskRegistration {
            handle: self.clone(),
            id: Some(id),
        }
    }

    /// Removes a pending task. Returns false if it already ran or was
    /// cancelled earlier.
    pub fn cancel(&self, id: TaskId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.tasks.len();
        inner.tasks.retain(|task| task.id != id);
        inner.tasks.len() != before
    }

    /// Runs every task due at or before `now_ms`, in (deadline, scheduling
    /// order). Tasks scheduled by a running callback join the same drain
    /// when their deadline has already passed.
    pub fn drain(&self, now_ms: u64) {
        loop {
            let task = {
                let mut inner = self.inner.borrow_mut();
                if now_ms > inner.now_ms {
                    inner.now_ms = now_ms;
                }
                let due_limit = inner.now_ms;
                let next = inner
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due_ms <= due_limit)
                    .min_by_key(|(_, task)| (task.due_ms, task.seq))
                    .map(|(slot, _)| slot);
                match next {
                    Some(slot) => inner.tasks.remove(slot),
                    None => break,
                }
            };
            log::trace!("runtime: running task {} due at {}ms", task.id, task.due_ms);
            (task.callback)(now_ms);
        }
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// The queue's current notion of time (last drain timestamp).
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }
}

/// Handle to a scheduled task; cancels the task when dropped.
pub struct TaskRegistration {
    handle: RuntimeHandle,
    id: Option<TaskId>,
}

impl TaskRegistration {
    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel(id);
        }
    }
}

impl Drop for TaskRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn same_deadline_runs_in_scheduling_order() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let order = order.clone();
            handle.post(0, move |_| order.borrow_mut().push(tag));
        }
        handle.drain(0);

        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn delayed_task_waits_for_its_deadline() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let ran = Rc::new(RefCell::new(false));
        let flag = ran.clone();

        handle.post(100, move |_| *flag.borrow_mut() = true);
        handle.drain(99);
        assert!(!*ran.borrow());
        handle.drain(100);
        assert!(*ran.borrow());
    }

    #[test]
    fn earlier_deadline_runs_first_regardless_of_scheduling_order() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let order = Rc::new(RefCell::new(Vec::new()));

        let late = order.clone();
        handle.post(50, move |_| late.borrow_mut().push("late"));
        let early = order.clone();
        handle.post(10, move |_| early.borrow_mut().push("early"));

        handle.drain(60);
        assert_eq!(*order.borrow(), vec!["early", "late"]);
    }

    #[test]
    fn cancel_removes_pending_task() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let ran = Rc::new(RefCell::new(false));
        let flag = ran.clone();

        let id = handle.post(0, move |_| *flag.borrow_mut() = true);
        assert!(handle.cancel(id));
        handle.drain(0);
        assert!(!*ran.borrow());
        assert!(!handle.cancel(id));
    }

    #[test]
    fn dropping_registration_cancels_task() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let ran = Rc::new(RefCell::new(false));
        let flag = ran.clone();

        let registration = handle.register(0, move |_| *flag.borrow_mut() = true);
        drop(registration);
        handle.drain(0);
        assert!(!*ran.borrow());
    }

    #[test]
    fn task_scheduled_during_drain_runs_when_due() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let order = Rc::new(RefCell::new(Vec::new()));

        let inner_order = order.clone();
        let inner_handle = handle.clone();
        handle.post(0, move |_| {
            inner_order.borrow_mut().push("outer");
            let nested = inner_order.clone();
            inner_handle.post(0, move |_| nested.borrow_mut().push("nested"));
        });

        handle.drain(0);
        assert_eq!(*order.borrow(), vec!["outer", "nested"]);
    }

    #[test]
    fn callback_receives_drain_timestamp() {
        let runtime = Runtime::new();
        let handle = runtime.handle();
        let seen = Rc::new(RefCell::new(0u64));
        let slot = seen.clone();

        handle.post(5, move |now| *slot.borrow_mut() = now);
        handle.drain(42);
        assert_eq!(*seen.borrow(), 42);
    }
}
