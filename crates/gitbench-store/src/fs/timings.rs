#![allow(clippy::result_large_err)]

use std::fmt::Write as _;
use std::path::Path;

use crate::errors::Result;
use crate::fs::atomic_write;

/// Write one elapsed-milliseconds value per line, newline-terminated
pub fn write_timings(path: &Path, millis: &[u64]) -> Result<()> {
    let mut content = String::with_capacity(millis.len() * 4);
    for ms in millis {
        // Writing to a String cannot fail
        let _ = writeln!(content, "{}", ms);
    }
    atomic_write(path, content.as_bytes())?;
    tracing::debug!(
        component = module_path!(),
        op = "write_timings",
        path = %path.display(),
        count = millis.len(),
    );
    Ok(())
}
