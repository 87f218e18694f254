pub mod io;

/// Reset SIGPIPE to default behavior (SIG_DFL) so a closed stdout ends the
/// process quietly instead of surfacing as a write error.
/// This must be called at the start of main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Format an IO error message without the "(os error N)" suffix.
/// Rust's Display impl adds " (os error 2)" after the system text; tools
/// print the bare "No such file or directory".
pub fn io_error_msg(e: &std::io::Error) -> String {
    if let Some(raw) = e.raw_os_error() {
        let os_err = std::io::Error::from_raw_os_error(raw);
        let msg = format!("{}", os_err);
        msg.replace(&format!(" (os error {})", raw), "")
    } else {
        format!("{}", e)
    }
}
