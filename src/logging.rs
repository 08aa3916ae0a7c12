//! Tracing subscriber for hosts that don't install their own.
//!
//! Native builds print through the default fmt writer. On `wasm32` every
//! formatted line goes to the browser console instead, and timestamps are
//! left out since there is no system clock there.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

use tracing::Level;

/// Install the fmt subscriber at `INFO`. Returns false if a global
/// subscriber was already set.
pub fn init() -> bool {
    init_with_level(Level::INFO)
}

pub fn init_with_level(level: Level) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .without_time();

    #[cfg(target_arch = "wasm32")]
    let builder = builder.with_writer(console::ConsoleWriter::new);

    builder.try_init().is_ok()
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    /// Buffers one formatted event and logs it when dropped.
    pub struct ConsoleWriter {
        buf: Vec<u8>,
    }

    impl ConsoleWriter {
        pub fn new() -> Self {
            Self { buf: Vec::new() }
        }

        fn emit(&mut self) {
            if self.buf.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.buf);
            web_sys::console::log_1(&line.trim_end().into());
            self.buf.clear();
        }
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.emit();
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            self.emit();
        }
    }
}
