//! Caller location resolution
//!
//! Ordinary calls get their location from `#[track_caller]`: every public
//! logging entry point forwards `Location::caller()`, so the logging machinery
//! itself never shows up in a header.
//!
//! Calls made while the thread is unwinding (a drop guard that logs the
//! failure, for example) would otherwise point at the guard. For those the
//! resolver prefers the location of the panic itself, recorded by the hook
//! that [`install_panic_hook`] registers.

use parking_lot::Mutex;
use std::cell::RefCell;
use std::panic::{self, Location};
use std::sync::atomic::{AtomicU64, Ordering};

/// File used when no location could be determined
pub const UNKNOWN_FILE: &str = "???";

/// Resolved (file, line) pair of a logging call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Sentinel for a location that could not be resolved
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_FILE, 0)
    }

    /// No location, as carried by `OUT` records
    pub fn none() -> Self {
        Self::new("", 0)
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }

    pub fn is_unknown(&self) -> bool {
        self.file == UNKNOWN_FILE && self.line == 0
    }
}

thread_local! {
    // Location of the last panic the hook saw on this thread, tagged with the
    // generation of the hook that recorded it
    static PANIC_SITE: RefCell<Option<(u64, CallSite)>> = const { RefCell::new(None) };
}

// Generation of the installed hook, 0 while none of ours is registered
static ACTIVE_HOOK: AtomicU64 = AtomicU64::new(0);
static NEXT_HOOK: AtomicU64 = AtomicU64::new(1);
static INSTALL: Mutex<()> = parking_lot::const_mutex(());

/// Owned by the registered hook. Dropped when another hook replaces ours,
/// which retires every site recorded under its generation.
struct HookGeneration(u64);

impl HookGeneration {
    fn tag(&self) -> u64 {
        self.0
    }
}

impl Drop for HookGeneration {
    fn drop(&mut self) {
        let _ = ACTIVE_HOOK.compare_exchange(self.0, 0, Ordering::AcqRel, Ordering::Acquire);
    }
}

/// Chain a panic hook that remembers where each thread panicked.
///
/// The previously installed hook still runs afterwards. Calling this while
/// the hook is registered has no further effect; if the application has
/// since replaced it, the hook is chained again.
pub fn install_panic_hook() {
    if ACTIVE_HOOK.load(Ordering::Acquire) != 0 {
        return;
    }

    let _install = INSTALL.lock();
    if ACTIVE_HOOK.load(Ordering::Acquire) != 0 {
        return;
    }

    let generation = HookGeneration(NEXT_HOOK.fetch_add(1, Ordering::Relaxed));
    ACTIVE_HOOK.store(generation.tag(), Ordering::Release);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let site = info
            .location()
            .map(CallSite::from_location)
            .unwrap_or_else(CallSite::unknown);
        let _ = PANIC_SITE.try_with(|slot| {
            if let Ok(mut slot) = slot.try_borrow_mut() {
                *slot = Some((generation.tag(), site));
            }
        });
        previous(info);
    }));
}

/// Whether a hook installed by [`install_panic_hook`] is currently registered
pub fn panic_hook_installed() -> bool {
    ACTIVE_HOOK.load(Ordering::Acquire) != 0
}

/// Location of the panic this thread is unwinding from, if one was recorded
///
/// A site recorded by a hook that has since been replaced is ignored, and a
/// site seen outside unwinding is discarded.
pub fn panic_site() -> Option<CallSite> {
    if !std::thread::panicking() {
        let _ = PANIC_SITE.try_with(|slot| {
            if let Ok(mut slot) = slot.try_borrow_mut() {
                slot.take();
            }
        });
        return None;
    }

    let active = ACTIVE_HOOK.load(Ordering::Acquire);
    if active == 0 {
        return None;
    }
    PANIC_SITE
        .try_with(|slot| match slot.try_borrow().as_deref() {
            Ok(Some((generation, site))) if *generation == active => Some(site.clone()),
            _ => None,
        })
        .ok()
        .flatten()
}

/// Resolve the logical caller for a call that entered the API at `direct`.
///
/// While unwinding, the recorded panic location wins. Otherwise the direct
/// location is used; `None` yields the `???:0` sentinel.
pub fn resolve(direct: Option<&Location<'_>>) -> CallSite {
    if let Some(site) = panic_site() {
        return site;
    }
    direct
        .map(CallSite::from_location)
        .unwrap_or_else(CallSite::unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn here() -> &'static Location<'static> {
        Location::caller()
    }

    #[test]
    fn test_direct_resolution() {
        let location = here();
        let site = resolve(Some(location));
        assert_eq!(site.file, file!());
        assert_eq!(site.line, location.line());
    }

    #[test]
    fn test_unresolved_is_sentinel() {
        let site = resolve(None);
        assert!(site.is_unknown());
        assert_eq!(site, CallSite::new("???", 0));
    }

    #[test]
    fn test_no_panic_site_outside_unwinding() {
        install_panic_hook();
        let _ = std::panic::catch_unwind(|| panic!("recorded"));
        // unwinding is over, so the recorded site no longer applies
        assert_eq!(panic_site(), None);
    }

    #[test]
    fn test_panic_site_used_while_unwinding() {
        use parking_lot::Mutex;
        use std::sync::Arc;

        struct Guard(Arc<Mutex<Option<CallSite>>>);

        impl Drop for Guard {
            fn drop(&mut self) {
                *self.0.lock() = Some(resolve(Some(Location::caller())));
            }
        }

        install_panic_hook();
        let seen = Arc::new(Mutex::new(None));
        let guard_seen = Arc::clone(&seen);
        let panic_line = Arc::new(Mutex::new(0));
        let panic_line_inner = Arc::clone(&panic_line);

        let result = std::thread::spawn(move || {
            let _guard = Guard(guard_seen);
            *panic_line_inner.lock() = line!() + 1;
            panic!("worker failed");
        })
        .join();

        assert!(result.is_err());
        let site = seen.lock().clone().expect("guard ran");
        assert_eq!(site.file, file!());
        assert_eq!(site.line, *panic_line.lock());
    }

    fn recorded_site() -> Option<(u64, CallSite)> {
        PANIC_SITE.with(|slot| slot.borrow().clone())
    }

    #[test]
    fn test_site_discarded_outside_unwinding() {
        PANIC_SITE.with(|slot| *slot.borrow_mut() = Some((1, CallSite::new("old.rs", 8))));
        assert_eq!(panic_site(), None);
        assert_eq!(recorded_site(), None);
    }

    #[test]
    fn test_site_from_retired_hook_ignored() {
        use parking_lot::Mutex;
        use std::sync::Arc;

        struct Guard(Arc<Mutex<Option<CallSite>>>, &'static Location<'static>);

        impl Drop for Guard {
            fn drop(&mut self) {
                // a site left behind by a hook generation that is no longer registered
                PANIC_SITE.with(|slot| {
                    *slot.borrow_mut() = Some((u64::MAX, CallSite::new("old.rs", 8)))
                });
                *self.0.lock() = Some(resolve(Some(self.1)));
            }
        }

        install_panic_hook();
        let seen = Arc::new(Mutex::new(None));
        let guard_seen = Arc::clone(&seen);
        let direct = here();

        let result = std::thread::spawn(move || {
            let _guard = Guard(guard_seen, direct);
            panic!("worker failed");
        })
        .join();

        assert!(result.is_err());
        let site = seen.lock().clone().expect("guard ran");
        assert_eq!(site, CallSite::from_location(direct));
    }
}
