//! Shared test setup for the Sprout crates.
#![doc(html_root_url = "https://docs.rs/sprout_test")]
// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

use color_eyre::section::PanicMessage;
use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use std::sync::Once;

pub mod prelude;

/// A multi-threaded Tokio runtime that can be shared between tests.
///
/// Tests that share a lazily-initialized verifier service should use this runtime,
/// so the service outlives the test that created it.
pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime")
});

static INIT: Once = Once::new();

/// Initialize globals for tests such as the tracing subscriber and panic / error
/// reporting hooks.
///
/// Returns a guard value, so tests can write `let _init_guard = sprout_test::init();`.
pub fn init() -> InitGuard {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer().with_target(false);
        // Use the RUST_LOG env var, or by default:
        //  - warn for most tests, and
        //  - hide the expected warnings from rejected proofs
        let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new("warn")
                .unwrap()
                .add_directive("sprout_joinsplit=error".parse().unwrap())
        });

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(ErrorLayer::default())
            .init();

        color_eyre::config::HookBuilder::default()
            .add_frame_filter(Box::new(|frames| {
                let mut displayed = std::collections::HashSet::new();
                let filters = &[
                    "tokio::",
                    "<futures_util::",
                    "std::panic",
                    "test::run_test_in_process",
                    "core::ops::function::FnOnce::call_once",
                    "std::thread::local",
                    "<core::future::",
                    "<alloc::boxed::Box",
                    "<std::panic::AssertUnwindSafe",
                    "core::result::Result",
                    "test::assert_test_result",
                    "rayon_core::",
                ];

                frames.retain(|frame| {
                    let loc = (frame.lineno, &frame.filename);
                    if !displayed.insert(loc) {
                        return false;
                    }

                    match frame.name.as_ref() {
                        Some(name) => !filters.iter().any(|f| name.as_str().starts_with(f)),
                        None => true,
                    }
                });
            }))
            .panic_message(SkipTestReturnedErrPanicMessages)
            .install()
            .unwrap();
    });

    InitGuard(())
}

/// Keeps test setup alive for the duration of a test.
#[must_use]
#[derive(Debug)]
pub struct InitGuard(());

struct SkipTestReturnedErrPanicMessages;

impl PanicMessage for SkipTestReturnedErrPanicMessages {
    fn display(
        &self,
        pi: &std::panic::PanicInfo<'_>,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let payload = pi
            .payload()
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| pi.payload().downcast_ref::<&str>().cloned())
            .unwrap_or("<non string panic payload>");

        // the test harness has already printed the `Err` value
        if payload.contains("the test returned a termination value with a non-zero status code") {
            return write!(f, "---- end of test output ----");
        }

        writeln!(f, "{}", "\nThe application panicked (crashed).".red())?;

        write!(f, "Message:  ")?;
        writeln!(f, "{}", payload.cyan())?;

        write!(f, "Location: ")?;
        match pi.location() {
            Some(loc) => write!(f, "{}:{}", loc.file().purple(), loc.line().purple()),
            None => write!(f, "<unknown>"),
        }
    }
}
