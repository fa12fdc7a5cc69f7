//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use tokio::sync::{Mutex, MutexGuard};

// Writing a script while another test forks can leave the script open in
// the forked child and make exec fail with ETXTBSY. Tests that write or run
// programs hold this lock for their whole body.
static EXEC_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub async fn exec_lock() -> MutexGuard<'static, ()> {
    EXEC_LOCK.lock().await
}

pub fn write_file(dir: &Path, rel: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

pub fn write_script(dir: &Path, rel: &str, script: &str, mode: u32) -> PathBuf {
    let path = write_file(dir, rel, script.as_bytes());
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    path
}

pub fn set_mode(path: &Path, mode: u32) {
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

pub const ECHO_ENV: &str = "#!/bin/sh\nprintf 'REQUEST_PATH=%s' \"$REQUEST_PATH\"\n";

pub const DUMP_ENV: &str = "#!/bin/sh\n\
printf '%s\\n' \"$REQUEST_PATH\" \"$SERVER_BASEDIR\" \"$REMOTE_PORT\" \"$REMOTE_IP\" \"$0\" \"$#\"\n";

pub const EXIT_TWO: &str = "#!/bin/sh\necho partial\nexit 2\n";

pub const KILL_SELF: &str = "#!/bin/sh\nkill -9 $$\n";

pub const NO_INTERPRETER: &str = "#!/nonexistent/interp\necho unreachable\n";
