//! Shared state handed to every handler.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::feedback::YogaPose;
use crate::pipeline::PosePipeline;

type IntroKey = (String, YogaPose);

/// (user, pose) pairs that have already seen the pose introduction. Holds at
/// most `capacity` pairs; the oldest is forgotten first.
struct IntroductionLog {
    capacity: usize,
    order: VecDeque<IntroKey>,
    seen: HashSet<IntroKey>,
}

impl IntroductionLog {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    fn contains(&self, key: &IntroKey) -> bool {
        self.seen.contains(key)
    }

    fn insert(&mut self, key: IntroKey) {
        if self.capacity == 0 || !self.seen.insert(key.clone()) {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pipeline: Arc<PosePipeline>,
    introduced: RwLock<IntroductionLog>,
    inference_timeout: Duration,
}

impl AppState {
    pub fn new(
        pipeline: Arc<PosePipeline>,
        inference_timeout: Duration,
        max_tracked_users: usize,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pipeline,
                introduced: RwLock::new(IntroductionLog::new(max_tracked_users)),
                inference_timeout,
            }),
        }
    }

    pub fn pipeline(&self) -> Arc<PosePipeline> {
        Arc::clone(&self.inner.pipeline)
    }

    pub fn inference_timeout(&self) -> Duration {
        self.inner.inference_timeout
    }

    pub fn is_introduced(&self, user: &str, pose: YogaPose) -> bool {
        self.inner
            .introduced
            .read()
            .contains(&(user.to_owned(), pose))
    }

    /// Records that `user` has been coached on `pose` at least once.
    pub fn mark_introduced(&self, user: &str, pose: YogaPose) {
        self.inner.introduced.write().insert((user.to_owned(), pose));
    }

    pub fn tracked_introductions(&self) -> usize {
        self.inner.introduced.read().len()
    }
}
