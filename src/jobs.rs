// ============================================================================
// Job-Based Invalidation
// ============================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use bitflags::bitflags;

/// Identifier of a component mounted in a [`Host`](crate::host::Host).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u64);

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Job types for invalidation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobType {
    /// Component needs a repaint with its current values
    Paint,
    /// Component geometry depends on a size that changed
    Layout,
}

/// A pending update for one component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Job {
    pub component: ComponentId,
    pub job_type: JobType,
}

bitflags! {
    /// Summary of the work a drained batch of jobs requires.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        const NEEDS_PAINT = 1 << 0;
        const NEEDS_LAYOUT = 1 << 1;
    }
}

type JobSet = RefCell<HashSet<Job>>;

/// Queue of pending jobs, owned by a host.
///
/// Uses a set so each (component, job type) pair is queued once per frame no
/// matter how many values changed.
#[derive(Clone, Default)]
pub struct JobQueue {
    jobs: Rc<JobSet>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a job. Duplicate jobs are ignored.
    pub fn push(&self, component: ComponentId, job_type: JobType) {
        self.jobs.borrow_mut().insert(Job {
            component,
            job_type,
        });
    }

    /// Drain all pending jobs
    pub fn drain(&self) -> Vec<Job> {
        std::mem::take(&mut *self.jobs.borrow_mut())
            .into_iter()
            .collect()
    }

    /// Drop every pending job of a component.
    pub fn forget(&self, component: ComponentId) {
        self.jobs
            .borrow_mut()
            .retain(|job| job.component != component);
    }

    pub fn has_pending_jobs(&self) -> bool {
        !self.jobs.borrow().is_empty()
    }

    /// Handle for a component to report its own changes.
    pub fn invalidator(&self, component: ComponentId) -> Invalidator {
        Invalidator {
            component,
            jobs: Rc::downgrade(&self.jobs),
        }
    }
}

/// Summarize drained jobs into change flags.
pub fn change_flags(jobs: &[Job]) -> ChangeFlags {
    jobs.iter().fold(ChangeFlags::empty(), |flags, job| {
        flags
            | match job.job_type {
                JobType::Paint => ChangeFlags::NEEDS_PAINT,
                JobType::Layout => ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            }
    })
}

/// Render-target handle held by a component.
///
/// Holds the queue weakly: once the host is gone, invalidating is a no-op and
/// nothing keeps the host's state alive.
#[derive(Clone, Debug)]
pub struct Invalidator {
    component: ComponentId,
    jobs: Weak<JobSet>,
}

impl Invalidator {
    /// Request a repaint of the owning component.
    pub fn invalidate(&self) {
        self.push(JobType::Paint);
    }

    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// True while the host queue this handle reports to still exists.
    pub fn is_live(&self) -> bool {
        self.jobs.strong_count() > 0
    }

    fn push(&self, job_type: JobType) {
        if let Some(jobs) = self.jobs.upgrade() {
            jobs.borrow_mut().insert(Job {
                component: self.component,
                job_type,
            });
        }
    }
}
