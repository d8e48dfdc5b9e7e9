use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::warn;

static INTERRUPTED: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Installs the Ctrl+C handler once and returns the flag it raises. While the
/// handler is installed Ctrl+C no longer terminates this process; the running
/// child still receives the signal from the terminal.
pub fn interrupt_flag() -> Arc<AtomicBool> {
    INTERRUPTED
        .get_or_init(|| {
            let flag = Arc::new(AtomicBool::new(false));
            let f = flag.clone();
            if let Err(e) = ctrlc::set_handler(move || f.store(true, Ordering::SeqCst)) {
                warn!("could not install Ctrl+C handler: {}", e);
            }
            flag
        })
        .clone()
}

/// Returns whether an interrupt arrived since the last call, clearing it.
pub fn take_interrupt(flag: &AtomicBool) -> bool {
    flag.swap(false, Ordering::SeqCst)
}
