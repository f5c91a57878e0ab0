use std::sync::atomic::{AtomicUsize, Ordering};

use causeway::{Error, Exception, KernelStatus, PlatformStatus, hooks};

const INSTRUMENTED: i32 = 0x7A11;

static PLATFORM_CALLS: AtomicUsize = AtomicUsize::new(0);

#[test]
fn platform_hook_runs_once_per_error() {
    hooks::register_platform_text_hook(|code: i32| {
        if code != INSTRUMENTED {
            return None;
        }
        PLATFORM_CALLS.fetch_add(1, Ordering::SeqCst);
        Some(String::from("instrumented"))
    });

    let error = Error::platform(INSTRUMENTED, "probing", None, None);
    assert_eq!(PLATFORM_CALLS.load(Ordering::SeqCst), 1);

    // Neither the exception nor formatting asks the hook again.
    let exception = Exception::new(error.clone());
    assert_eq!(exception.what(), "instrumented");
    assert_eq!(exception.what(), "instrumented");
    assert_eq!(exception.to_string(), "instrumented");
    assert_eq!(error.format("{MS}"), "probing [instrumented]");
    assert_eq!(PLATFORM_CALLS.load(Ordering::SeqCst), 1);

    // Success codes never reach the hook.
    assert_eq!(PlatformStatus::SUCCESS.text(), "");
    assert_eq!(PLATFORM_CALLS.load(Ordering::SeqCst), 1);

    let mut listed = Vec::new();
    hooks::debug_status_text_hooks(|hook| listed.push(hook.to_string()));
    assert!(listed.iter().any(|hook| hook.contains(file!())));

    hooks::unregister_platform_text_hook();
    assert_ne!(PlatformStatus::new(INSTRUMENTED).text(), "instrumented");
    assert_eq!(error.error_text(), "instrumented");

    hooks::register_platform_text_hook(|_code: i32| -> Option<String> {
        panic!("message table unavailable")
    });
    let fallback = Exception::new(Error::platform(INSTRUMENTED, "", None, None));
    assert_ne!(fallback.what(), "instrumented");
    hooks::unregister_platform_text_hook();
}

#[test]
fn kernel_hook_only_describes_unnamed_codes() {
    let denied = KernelStatus::ACCESS_DENIED;
    let unknown = KernelStatus::from_bits(0xC0DE_0001);
    let existing = Error::kernel(unknown, "", None, None);
    assert_eq!(existing.error_text(), "");

    hooks::register_kernel_text_hook(|code: i32| {
        Some(format!("looked up {:08x}", code as u32))
    });

    // Errors built before registration keep their text.
    assert_eq!(existing.error_text(), "");
    assert_eq!(
        Error::kernel(unknown, "", None, None).error_text(),
        "looked up c0de0001"
    );
    assert_eq!(
        Error::kernel(denied, "", None, None).error_text(),
        "STATUS_ACCESS_DENIED"
    );
    assert_eq!(KernelStatus::TIMEOUT.text(), "STATUS_TIMEOUT");

    hooks::register_kernel_text_hook(|code: i32| -> Option<String> {
        assert_ne!(code, 0xC0DE_0001_u32 as i32, "unlisted status");
        None
    });
    let panicked = Exception::new(Error::kernel(unknown, "mapping", None, None));
    assert_eq!(panicked.what(), "");
    assert_eq!(panicked.error().unwrap().format("{MS}"), "mapping");

    hooks::unregister_kernel_text_hook();
    assert_eq!(unknown.text(), "");
}
