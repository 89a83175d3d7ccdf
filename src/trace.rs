//! Chrome trace output, enabled with `-d trace`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

static TRACE: Mutex<Option<Trace>> = Mutex::new(None);

struct Trace {
    start: Instant,
    w: BufWriter<File>,
}

impl Trace {
    fn new(path: &str) -> std::io::Result<Self> {
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(w, "[")?;
        Ok(Trace {
            start: Instant::now(),
            w,
        })
    }

    fn write_complete(&mut self, name: &str, start: Instant, end: Instant) -> std::io::Result<()> {
        write!(
            self.w,
            "{{ \"pid\": 0, \"name\": {:?}, \"ts\": {}, \"ph\": \"X\", \"dur\": {} }}",
            name,
            start.duration_since(self.start).as_micros(),
            end.duration_since(start).as_micros(),
        )
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.write_complete("main", self.start, Instant::now())?;
        writeln!(self.w, "\n]")?;
        self.w.flush()
    }
}

fn lock() -> MutexGuard<'static, Option<Trace>> {
    TRACE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn open(path: &str) -> std::io::Result<()> {
    let trace = Trace::new(path)?;
    *lock() = Some(trace);
    Ok(())
}

/// Run `f`, recording how long it took if tracing is enabled.
#[inline]
pub fn scope<T>(name: &'static str, f: impl FnOnce() -> T) -> T {
    if lock().is_none() {
        return f();
    }
    // The lock is not held while `f` runs, so scopes may nest.
    let start = Instant::now();
    let result = f();
    let end = Instant::now();
    if let Some(trace) = lock().as_mut() {
        // Best effort.
        let _ = trace
            .write_complete(name, start, end)
            .and_then(|()| writeln!(trace.w, ","));
    }
    result
}

pub fn close() -> std::io::Result<()> {
    match lock().take() {
        Some(mut trace) => trace.close(),
        None => Ok(()),
    }
}
