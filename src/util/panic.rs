// Sequences under test usually hold FnMut closures over &mut state, which aren't UnwindSafe, so
// the block is always wrapped in AssertUnwindSafe. Nothing observes the state after the panic.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "assertion failed to panic")
    };
    ($run:block, $msg:literal) => {
        assert!(
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(),
            $msg
        );
        println!("^ panic caught");
    };
}

// Checks the panic payload as well, for the methods that panic through ResultExtension::throw.
#[allow(unused_macros)]
macro_rules! assert_panics_with {
    ($run:block, $expected:expr) => {
        let payload = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)) {
            Ok(_) => panic!("assertion failed to panic"),
            Err(payload) => payload,
        };
        let message = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| payload.downcast_ref::<&str>().copied())
            .unwrap_or_default();
        assert!(
            message.contains($expected),
            "panic message {:?} should contain {:?}",
            message,
            $expected
        );
        println!("^ panic caught");
    };
}

#[allow(unused_imports)]
pub(crate) use {assert_panics, assert_panics_with};
