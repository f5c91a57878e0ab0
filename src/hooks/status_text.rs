//! Hooks resolving platform and kernel status codes to text.
//!
//! The operating-system facing layer knows how to describe its own status
//! codes; this module lets it plug that knowledge into
//! [`Error::error_text`](crate::Error::error_text). At most one hook is
//! installed per domain, and registering a new one replaces the previous.
//!
//! The platform hook is asked first, and returning `None` falls back to the
//! host's OS error messages (with the `std` feature). The kernel hook is only
//! asked about codes missing from the built-in name table.
//!
//! An error resolves its text once, when it is built, so registering or
//! removing a hook never changes the text of an existing error. With the
//! `std` feature a panicking hook is treated as returning `None`; without it
//! hooks must not panic.

use alloc::string::String;
use core::panic::Location;

use triomphe::Arc;
use unsize::CoerceUnsize;

use super::hook_lock::HookLock;

/// Resolves a status code to a human-readable description.
///
/// Implemented for every `Fn(i32) -> Option<String>` closure.
///
/// # Examples
///
/// ```
/// use causeway::hooks::StatusTextHook;
///
/// struct Catalog;
///
/// impl StatusTextHook for Catalog {
///     fn status_text(&self, code: i32) -> Option<String> {
///         (code == -1).then(|| String::from("catalog unavailable"))
///     }
/// }
///
/// assert_eq!(Catalog.status_text(-1).as_deref(), Some("catalog unavailable"));
/// assert_eq!(Catalog.status_text(3), None);
/// ```
pub trait StatusTextHook: 'static + Send + Sync {
    /// Returns the description of `code`, or `None` to fall back to the
    /// built-in resolution.
    fn status_text(&self, code: i32) -> Option<String>;
}

impl<F> StatusTextHook for F
where
    F: 'static + Send + Sync + Fn(i32) -> Option<String>,
{
    #[inline]
    fn status_text(&self, code: i32) -> Option<String> {
        self(code)
    }
}

/// A registered hook, together with where it was registered.
struct Hook<H> {
    hook: H,
    added_at: &'static Location<'static>,
}

impl<H> core::fmt::Display for Hook<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Status text hook {} registered at {}:{}",
            core::any::type_name::<H>(),
            self.added_at.file(),
            self.added_at.line()
        )
    }
}

trait UntypedStatusTextHook: 'static + Send + Sync + core::fmt::Display {
    fn status_text(&self, code: i32) -> Option<String>;
}

impl<H: StatusTextHook> UntypedStatusTextHook for Hook<H> {
    #[inline]
    fn status_text(&self, code: i32) -> Option<String> {
        self.hook.status_text(code)
    }
}

type StoredHook = Arc<dyn UntypedStatusTextHook>;

static PLATFORM_HOOK: HookLock<StoredHook> = HookLock::new();
static KERNEL_HOOK: HookLock<StoredHook> = HookLock::new();

#[track_caller]
fn store(hook: impl StatusTextHook) -> StoredHook {
    let hook = Arc::new(Hook {
        hook,
        added_at: Location::caller(),
    });
    hook.unsize(unsize::Coercion!(to dyn UntypedStatusTextHook))
}

/// Installs the hook describing [platform](crate::PlatformStatus) codes.
///
/// # Examples
///
/// ```
/// use causeway::{Error, hooks::register_platform_text_hook};
///
/// register_platform_text_hook(|code: i32| {
///     (code == -2147024891).then(|| String::from("Access is denied."))
/// });
///
/// let error = Error::platform(-2147024891, "opening the log", None, None);
/// assert_eq!(error.to_string(), "opening the log [Access is denied.]");
/// ```
#[track_caller]
pub fn register_platform_text_hook(hook: impl StatusTextHook) {
    let _previous = PLATFORM_HOOK.replace(Some(store(hook)));
}

/// Installs the hook describing [kernel](crate::KernelStatus) codes.
///
/// The hook is only asked about codes that have no built-in
/// [name](crate::KernelStatus::name).
#[track_caller]
pub fn register_kernel_text_hook(hook: impl StatusTextHook) {
    let _previous = KERNEL_HOOK.replace(Some(store(hook)));
}

/// Removes the platform hook, restoring the built-in resolution.
pub fn unregister_platform_text_hook() {
    let _previous = PLATFORM_HOOK.replace(None);
}

/// Removes the kernel hook, restoring the built-in name table.
pub fn unregister_kernel_text_hook() {
    let _previous = KERNEL_HOOK.replace(None);
}

/// Calls `f` with a description of each installed hook.
pub fn debug_status_text_hooks(mut f: impl FnMut(&dyn core::fmt::Display)) {
    for hook in [PLATFORM_HOOK.get(), KERNEL_HOOK.get()].into_iter().flatten() {
        f(&*hook);
    }
}

pub(crate) fn platform_text(code: i32) -> Option<String> {
    resolve(&PLATFORM_HOOK.get()?, code)
}

pub(crate) fn kernel_text(code: i32) -> Option<String> {
    resolve(&KERNEL_HOOK.get()?, code)
}

/// Asks `hook` for the text of `code`. A panicking hook counts as not
/// knowing the code.
#[cfg(feature = "std")]
fn resolve(hook: &StoredHook, code: i32) -> Option<String> {
    std::panic::catch_unwind(core::panic::AssertUnwindSafe(|| hook.status_text(code)))
        .ok()
        .flatten()
}

#[cfg(not(feature = "std"))]
fn resolve(hook: &StoredHook, code: i32) -> Option<String> {
    hook.status_text(code)
}
