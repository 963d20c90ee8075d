use super::ErrorKind;

cfg_match::cfg_match! {
    target_os = "linux" => {
        /// Classifies a status code reported by the system random source.
        pub fn kind_from_raw_os_error(errno: i32) -> ErrorKind {
            use linux_errno::Error as Errno;
            match errno.try_into().ok().and_then(|v| Errno::new(v)) {
                Some(e) if e == linux_errno::EINTR => ErrorKind::Interrupted,
                Some(e) if e == linux_errno::ENOSYS => ErrorKind::Unsupported,
                Some(e) if e == linux_errno::EPERM => ErrorKind::PermissionDenied,
                Some(e) if e == linux_errno::EACCES => ErrorKind::PermissionDenied,
                Some(e) if e == linux_errno::ENOMEM => ErrorKind::OutOfMemory,
                Some(e) if e == linux_errno::EINVAL => ErrorKind::InvalidInput,
                _ => ErrorKind::GenerationFailed,
            }
        }
    }
    _ => {
        /// Classifies a status code reported by the system random source.
        ///
        /// No per-code table exists for this target; every code reports a
        /// generation failure and is carried verbatim.
        pub fn kind_from_raw_os_error(_errno: i32) -> ErrorKind {
            ErrorKind::GenerationFailed
        }
    }
}
