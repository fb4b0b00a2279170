//! A [`GlobalAlloc`] that records the allocations a thread makes while it's being traced.
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOCATOR: TracingAllocator = TracingAllocator::new();
//!
//! let (_, events) = ALLOCATOR.trace(|| Box::new(1));
//! assert_eq!(Summary::from_events(&events).allocs, 1);
//! ```

use std::alloc::{
    GlobalAlloc,
    Layout,
    System,
};
use std::cell::Cell;

use parking_lot::{
    const_fair_mutex,
    const_mutex,
    FairMutex,
    Mutex,
};

thread_local! {
    static TRACING: Cell<bool> = const { Cell::new(false) };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Alloc { addr: usize, size: usize },
    Freed { addr: usize, size: usize },
}

impl Event {
    pub fn delta(&self) -> isize {
        match self {
            Self::Alloc { size, .. } => *size as isize,
            Self::Freed { size, .. } => -(*size as isize),
        }
    }
}

/// Totals over a list of [`Event`]s.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub allocs: usize,
    pub frees: usize,
    pub net_bytes: isize,
}

impl Summary {
    pub fn from_events(events: &[Event]) -> Self {
        events.iter().fold(Summary::default(), |mut summary, event| {
            match event {
                Event::Alloc { .. } => summary.allocs += 1,
                Event::Freed { .. } => summary.frees += 1,
            }
            summary.net_bytes += event.delta();
            summary
        })
    }

    /// Nothing was allocated or freed.
    pub fn is_quiet(&self) -> bool {
        self.allocs == 0 && self.frees == 0
    }
}

pub struct TracingAllocator {
    log: FairMutex<Vec<Event>>,
    // only one thread traces at a time, so the log belongs to it
    session: Mutex<()>,
}

impl TracingAllocator {
    pub const fn new() -> Self {
        Self {
            log: const_fair_mutex(Vec::new()),
            session: const_mutex(()),
        }
    }

    /// Runs `f`, returning its result and every allocation and free the current thread made
    /// while running it.
    ///
    /// Allocations made by other threads are not recorded. Calls to `trace` from different
    /// threads are serialized, and nesting them deadlocks.
    pub fn trace<R>(&self, f: impl FnOnce() -> R) -> (R, Vec<Event>) {
        let _session = self.session.lock();
        self.log.lock().clear();

        let tracing = TracingGuard::start();
        let result = f();
        drop(tracing);

        let events = std::mem::take(&mut *self.log.lock());
        (result, events)
    }

    fn record(&self, event: Event) {
        if is_tracing() {
            // pushing to the log can allocate, which must not be recorded
            set_tracing(false);
            self.log.lock().push(event);
            set_tracing(true);
        }
    }
}

impl Default for TracingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Traces the current thread until dropped, which also happens when the traced closure panics.
struct TracingGuard {
    _priv: (),
}

impl TracingGuard {
    fn start() -> Self {
        set_tracing(true);
        TracingGuard { _priv: () }
    }
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        set_tracing(false);
    }
}

fn is_tracing() -> bool {
    // the thread local is gone while the thread shuts down, which is never traced
    TRACING.try_with(Cell::get).unwrap_or(false)
}

fn set_tracing(on: bool) {
    let _ = TRACING.try_with(|tracing| tracing.set(on));
}

unsafe impl GlobalAlloc for TracingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let res = System.alloc(layout);
        self.record(Event::Alloc {
            addr: res as usize,
            size: layout.size(),
        });
        res
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.record(Event::Freed {
            addr: ptr as usize,
            size: layout.size(),
        });
        System.dealloc(ptr, layout)
    }
}
