use log::trace;
use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
    time::Duration,
};

pub type TimerCallback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Single-shot delayed callbacks, run on the thread that drives them.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId;

    /// Drop a pending callback. Returns `false` when it already fired or was
    /// cancelled before, which is not an error.
    fn cancel(&self, id: TimerId) -> bool;
}

/// A virtual clock. Nothing fires until the owner calls [`TimerQueue::advance_to`].
pub struct TimerQueue {
    inner: RefCell<QueueInner>,
}

#[derive(Default)]
struct QueueInner {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), TimerCallback>,
    deadlines: HashMap<TimerId, Duration>,
}

impl TimerQueue {
    pub fn new() -> Rc<Self> {
        Rc::new(TimerQueue {
            inner: RefCell::new(QueueInner::default()),
        })
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;

        while let Some(callback) = self.pop_due(target) {
            callback();
            fired += 1;
        }

        let mut inner = self.inner.borrow_mut();
        if target > inner.now {
            inner.now = target;
        }
        fired
    }

    fn pop_due(&self, target: Duration) -> Option<TimerCallback> {
        let mut inner = self.inner.borrow_mut();
        let key = *inner.pending.first_key_value()?.0;
        if key.0 > target {
            return None;
        }

        inner.deadlines.remove(&key.1);
        inner.now = inner.now.max(key.0);
        trace!("timer {:?} fired at {:?}", key.1, key.0);
        inner.pending.remove(&key)
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id);
        inner.next_id += 1;

        let deadline = inner.now + delay;
        inner.deadlines.insert(id, deadline);
        inner.pending.insert((deadline, id), callback);
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.deadlines.remove(&id) {
            Some(deadline) => inner.pending.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }
}
