//! Build status variant: message text and icon asset name

use std::ffi::OsStr;

/// Toast variant selected by the single CLI argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    /// Exact match on "success"; anything else is a failure
    /// Non-UTF-8 values never match
    pub fn from_arg(arg: impl AsRef<OsStr>) -> Self {
        if arg.as_ref() == "success" {
            Status::Success
        } else {
            Status::Failure
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Status::Success => "编译完成",
            Status::Failure => "编译失败",
        }
    }

    /// Icon file expected next to the executable
    pub fn icon_file(&self) -> &'static str {
        match self {
            Status::Success => "pass.png",
            Status::Failure => "fail.png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_variant() {
        let status = Status::from_arg("success");
        assert_eq!(status, Status::Success);
        assert_eq!(status.message(), "编译完成");
        assert_eq!(status.icon_file(), "pass.png");
    }

    #[test]
    fn test_failure_variant() {
        let status = Status::from_arg("failure");
        assert_eq!(status, Status::Failure);
        assert_eq!(status.message(), "编译失败");
        assert_eq!(status.icon_file(), "fail.png");
    }

    #[test]
    fn test_unknown_value_is_failure() {
        assert_eq!(Status::from_arg("banana"), Status::Failure);
        assert_eq!(Status::from_arg(""), Status::Failure);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_value_is_failure() {
        use std::os::unix::ffi::OsStrExt;
        assert_eq!(Status::from_arg(OsStr::from_bytes(&[0xff, 0xfe])), Status::Failure);
    }

    #[test]
    fn test_match_is_exact() {
        assert_eq!(Status::from_arg("Success"), Status::Failure);
        assert_eq!(Status::from_arg("success "), Status::Failure);
    }
}
