use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    // A panic while holding the lock leaves plain strings behind; keep going.
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding warnings back, e.g. while a table is being printed.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Stop buffering and return everything collected since `activate`.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// Emit a warning: buffered while active, straight to stderr otherwise.
pub fn warn(msg: String) {
    let mut guard = buffer();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("warning: {}", msg);
    }
}

/// Emit a batch of warnings, such as those from `Season::normalize`.
pub fn warn_all<I>(messages: I)
where
    I: IntoIterator<Item = String>,
{
    for msg in messages {
        warn(msg);
    }
}

/// Print drained warnings under a heading, if there are any.
pub fn flush() {
    let pending = drain();
    if pending.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("{} warning(s):", pending.len());
    for msg in pending {
        eprintln!("  - {}", msg);
    }
}

/// Like `eprintln!`, but routed through the warning buffer.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}
