use std::path::Path;

/// Converts a path to a POSIX-style string, replacing backslashes with forward slashes.
#[must_use]
pub fn to_posix_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_forward_slashes() {
        assert_eq!(to_posix_string(Path::new("1/abc/7")), "1/abc/7");
    }

    #[test]
    fn replaces_backslashes() {
        assert_eq!(to_posix_string(Path::new(r"1\abc\7")), "1/abc/7");
    }
}
