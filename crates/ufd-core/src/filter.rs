//! Visibility and selectability policy.

use crate::config::DialogConfig;
use crate::node::EntryKind;

/// Outcome of classifying one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Entry appears as a tree child.
    pub show_in_tree: bool,
    /// Entry is offered as a selection candidate.
    pub selectable: bool,
}

/// Classify an entry by kind.
///
/// Hidden entries never reach this point when `show_hidden` is off; the
/// provider drops them.
pub fn classify(kind: EntryKind, config: &DialogConfig) -> Classification {
    match kind {
        EntryKind::Volume => Classification {
            show_in_tree: true,
            selectable: false,
        },
        EntryKind::Directory => Classification {
            show_in_tree: true,
            selectable: config.select_dirs,
        },
        EntryKind::File => Classification {
            show_in_tree: config.include_files,
            selectable: config.select_files,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(include_files: bool, select_dirs: bool, select_files: bool) -> DialogConfig {
        DialogConfig {
            include_files,
            select_dirs,
            select_files,
            ..DialogConfig::default()
        }
    }

    #[test]
    fn test_volumes_browsable_never_selectable() {
        let c = classify(EntryKind::Volume, &config(true, true, true));
        assert!(c.show_in_tree);
        assert!(!c.selectable);
    }

    #[test]
    fn test_directories_always_shown() {
        let c = classify(EntryKind::Directory, &config(false, false, false));
        assert!(c.show_in_tree);
        assert!(!c.selectable);

        let c = classify(EntryKind::Directory, &config(false, true, false));
        assert!(c.selectable);
    }

    #[test]
    fn test_files_follow_include_and_select_flags() {
        let c = classify(EntryKind::File, &config(false, true, true));
        assert!(!c.show_in_tree);
        assert!(c.selectable);

        let c = classify(EntryKind::File, &config(true, true, false));
        assert!(c.show_in_tree);
        assert!(!c.selectable);
    }
}
