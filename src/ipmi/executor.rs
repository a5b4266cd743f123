//! Low-level invocation of the IPMI tool with a timeout

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

use crate::error::IpmiError;

/// Timeout for collecting output from child process pipes
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum captured output per stream (1MB); sensor tables are a few KB
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

/// Run `program args…` and return its stdout.
///
/// Non-zero exit and timeout are errors. On timeout the child is killed and
/// reaped before returning.
pub(crate) fn run_with_timeout(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<String, IpmiError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| IpmiError::Spawn {
            command: program.to_string(),
            source,
        })?;

    // Drain pipes while waiting; a full pipe buffer would block the child.
    let stdout_rx = drain(child.stdout.take());
    let stderr_rx = drain(child.stderr.take());

    let wait_result = child
        .wait_timeout(timeout)
        .map_err(|source| IpmiError::Wait {
            command: program.to_string(),
            source,
        })?;

    let Some(status) = wait_result else {
        kill_child_process(&mut child);
        return Err(IpmiError::Timeout(timeout.as_secs()));
    };

    let stdout = stdout_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_default();
    let stderr = stderr_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_default();

    if !status.success() {
        return Err(IpmiError::ExitStatus {
            code: status.code(),
            stderr: stderr.trim().to_string(),
        });
    }
    Ok(stdout)
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    match stream {
        Some(stream) => {
            thread::spawn(move || {
                let _ = tx.send(read_stream_to_string(stream));
            });
        }
        None => {
            let _ = tx.send(String::new());
        }
    }
    rx
}

/// Read a stream up to `MAX_OUTPUT_SIZE`, discarding the rest
fn read_stream_to_string<R: Read>(mut stream: R) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let remaining = MAX_OUTPUT_SIZE.saturating_sub(buf.len());
                buf.extend_from_slice(&chunk[..n.min(remaining)]);
            }
            Err(_) => break,
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn kill_child_process(child: &mut Child) {
    // may have exited between the timeout and the kill
    let _ = child.kill();
    let _ = child.wait();
}
