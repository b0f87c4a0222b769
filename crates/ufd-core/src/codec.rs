//! Path delimiter conversion between the canonical and external forms.

/// Delimiter used for every path built inside the model.
pub const CANONICAL_DELIMITER: char = '/';

/// Converts paths between the canonical `/` form and the presentation form.
///
/// No `.` or `..` handling happens here; paths in the model are only ever
/// built by joining names along the tree ancestry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCodec {
    external: char,
}

impl PathCodec {
    /// Codec whose external delimiter is the host-native separator.
    pub fn native() -> Self {
        Self::with_external(std::path::MAIN_SEPARATOR)
    }

    /// Codec that hands canonical paths back verbatim.
    pub fn canonical() -> Self {
        Self::with_external(CANONICAL_DELIMITER)
    }

    /// Codec with an explicit external delimiter.
    pub fn with_external(external: char) -> Self {
        Self { external }
    }

    /// Codec matching the `use_external_delimiter` option.
    pub fn for_config(use_external_delimiter: bool) -> Self {
        if use_external_delimiter {
            Self::native()
        } else {
            Self::canonical()
        }
    }

    /// The external delimiter.
    pub fn external_delimiter(&self) -> char {
        self.external
    }

    /// Convert an external path to canonical form.
    pub fn to_canonical(&self, path: &str) -> String {
        if self.external == CANONICAL_DELIMITER {
            return path.to_string();
        }
        path.replace(self.external, "/")
    }

    /// Convert a canonical path to external form.
    pub fn to_external(&self, path: &str) -> String {
        if self.external == CANONICAL_DELIMITER {
            return path.to_string();
        }
        path.replace(CANONICAL_DELIMITER, self.external.encode_utf8(&mut [0; 4]))
    }
}

/// Join a child name onto a canonical parent path.
///
/// Volume paths already end in the delimiter (`C:/`, `/`), so no second one is added.
pub fn join(parent: &str, name: &str) -> String {
    let mut path = String::with_capacity(parent.len() + name.len() + 1);
    path.push_str(parent);
    if !parent.ends_with(CANONICAL_DELIMITER) {
        path.push(CANONICAL_DELIMITER);
    }
    path.push_str(name);
    path
}

impl Default for PathCodec {
    fn default() -> Self {
        Self::native()
    }
}
