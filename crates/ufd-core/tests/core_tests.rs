use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};

use ufd_core::{
    DialogConfig, DialogError, DialogSession, DirectoryListingProvider, EntryKind, FileTree,
    PathCodec, ProviderError, SessionState, VolumeEnumerator,
};

/// In-memory directory tree keyed by canonical path.
#[derive(Debug, Default)]
struct MemoryFs {
    dirs: BTreeMap<String, Vec<String>>,
    failing: HashSet<String>,
    calls: RefCell<Vec<(String, bool)>>,
}

impl MemoryFs {
    fn dir(mut self, path: &str, entries: &[&str]) -> Self {
        self.dirs.insert(
            path.to_string(),
            entries.iter().map(|e| e.to_string()).collect(),
        );
        self
    }

    fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self.dirs.entry(path.to_string()).or_default();
        self
    }
}

impl DirectoryListingProvider for MemoryFs {
    fn list(&self, path: &str, include_hidden: bool) -> Result<Vec<String>, ProviderError> {
        self.calls
            .borrow_mut()
            .push((path.to_string(), include_hidden));
        if self.failing.contains(path) {
            return Err(ProviderError::PermissionDenied {
                path: path.to_string(),
            });
        }
        match self.dirs.get(path) {
            Some(entries) => Ok(entries
                .iter()
                .filter(|name| include_hidden || !name.starts_with('.'))
                .cloned()
                .collect()),
            None => Err(ProviderError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    fn is_container(&self, path: &str) -> bool {
        self.dirs.contains_key(path)
    }
}

struct Volumes {
    labels: Vec<&'static str>,
    calls: Cell<usize>,
}

impl Volumes {
    fn new(labels: &[&'static str]) -> Self {
        Self {
            labels: labels.to_vec(),
            calls: Cell::new(0),
        }
    }
}

impl VolumeEnumerator for Volumes {
    fn enumerate(&self) -> Result<Vec<String>, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.labels.iter().map(|l| l.to_string()).collect())
    }
}

struct NoVolumes;

impl VolumeEnumerator for NoVolumes {
    fn enumerate(&self) -> Result<Vec<String>, ProviderError> {
        Err(ProviderError::Unsupported)
    }
}

fn unix_fs() -> MemoryFs {
    MemoryFs::default()
        .dir("/", &["locked", "x"])
        .dir("/x", &["a", "b", "c"])
        .failing("/locked")
}

fn child_named(session: &DialogSession<MemoryFs>, parent: ufd_core::NodeId, name: &str) -> ufd_core::NodeId {
    let tree = session.tree();
    *tree
        .node(parent)
        .unwrap()
        .children()
        .iter()
        .find(|&&id| tree.node(id).unwrap().name == name)
        .unwrap()
}

#[test]
fn test_path_reconstruction_survives_reexpansion() {
    let fs = MemoryFs::default()
        .dir("a/", &["b"])
        .dir("a/b", &["c"])
        .dir("a/b/c", &[]);
    let mut tree = FileTree::new();
    let root = tree.seed_roots(&Volumes::new(&["a"])).unwrap()[0];
    let config = DialogConfig::default();

    for _ in 0..3 {
        let b = tree.expand(root, &fs, &config).unwrap()[0];
        let c = tree.expand(b, &fs, &config).unwrap()[0];
        assert_eq!(tree.path(c).unwrap(), "a/b/c");
        assert_eq!(tree.node(c).unwrap().kind, EntryKind::Directory);
    }
}

#[test]
fn test_expanding_file_skips_provider() {
    let fs = MemoryFs::default().dir("a/", &["f.txt"]);
    let mut tree = FileTree::new();
    let root = tree.seed_roots(&Volumes::new(&["a"])).unwrap()[0];
    let config = DialogConfig::default();

    let file = tree.expand(root, &fs, &config).unwrap()[0];
    assert_eq!(tree.node(file).unwrap().kind, EntryKind::File);
    let calls_before = fs.calls.borrow().len();

    assert!(tree.expand(file, &fs, &config).unwrap().is_empty());
    assert_eq!(fs.calls.borrow().len(), calls_before);
    assert!(!tree.node(file).unwrap().expanded);
    assert!(tree.node(file).unwrap().children().is_empty());
}

#[test]
fn test_round_trip_through_external_form() {
    let codec = PathCodec::with_external('\\');
    for path in ["C:/", "C:/Users/me/file.txt", "/x/a"] {
        assert_eq!(codec.to_canonical(&codec.to_external(path)), path);
    }
}

#[test]
fn test_selection_invalidated_by_refocus() {
    let mut session = DialogSession::new(DialogConfig::default(), unix_fs(), &Volumes::new(&[""])).unwrap();
    let root = session.tree().roots()[0];
    session.focus(root).unwrap();
    let x = child_named(&session, root, "x");

    session.focus(x).unwrap();
    session.choose([0, 1]).unwrap();
    assert_eq!(session.selection().resolve().len(), 2);

    session.focus(x).unwrap();
    assert_eq!(session.candidates().len(), 3);
    assert!(session.selection().resolve().is_empty());
}

#[test]
fn test_filter_hides_files_from_tree_and_candidates() {
    let fs = MemoryFs::default()
        .dir("/", &["d"])
        .dir("/d", &["f1", "f2", "sub"])
        .dir("/d/sub", &[]);
    let config = DialogConfig {
        include_files: false,
        select_dirs: true,
        select_files: true,
        ..DialogConfig::default()
    };
    let mut session = DialogSession::new(config, fs, &Volumes::new(&[""])).unwrap();
    let root = session.tree().roots()[0];
    session.focus(root).unwrap();
    let d = child_named(&session, root, "d");

    session.focus(d).unwrap();
    assert_eq!(session.tree().node(d).unwrap().children().len(), 1);
    assert_eq!(session.candidates().len(), 1);
    assert_eq!(session.candidates()[0].path, "/d/sub");
}

#[test]
fn test_resolution_follows_index_order() {
    let mut session = DialogSession::new(DialogConfig::default(), unix_fs(), &Volumes::new(&[""]))
        .unwrap()
        .with_codec(PathCodec::canonical());
    let root = session.tree().roots()[0];
    session.focus(root).unwrap();
    let x = child_named(&session, root, "x");
    session.focus(x).unwrap();

    session.choose([2, 0]).unwrap();
    let result = session.submit().unwrap().to_vec();
    assert_eq!(result, vec!["/x/a".to_string(), "/x/c".to_string()]);
    assert_eq!(session.state(), SessionState::Submitted);
}

#[test]
fn test_listing_failure_is_isolated() {
    let mut session = DialogSession::new(DialogConfig::default(), unix_fs(), &Volumes::new(&[""])).unwrap();
    let root = session.tree().roots()[0];
    session.focus(root).unwrap();
    let x = child_named(&session, root, "x");
    let locked = child_named(&session, root, "locked");
    session.focus(x).unwrap();

    let err = session.focus(locked).unwrap_err();
    assert!(matches!(err, DialogError::Listing { ref path, .. } if path == "/locked"));
    assert!(err.is_recoverable());

    let node = session.tree().node(locked).unwrap();
    assert!(node.expanded);
    assert!(node.children().is_empty());
    assert!(node.error.is_some());
    assert!(session.candidates().is_empty());

    let sibling = session.tree().node(x).unwrap();
    assert_eq!(sibling.children().len(), 3);
    assert!(sibling.error.is_none());
    assert_eq!(session.state(), SessionState::Browsing);
}

#[test]
fn test_cancel_discards_choice() {
    let mut session = DialogSession::new(DialogConfig::default(), unix_fs(), &Volumes::new(&[""])).unwrap();
    let root = session.tree().roots()[0];
    session.focus(root).unwrap();
    session.choose([0]).unwrap();

    session.cancel();
    assert_eq!(session.state(), SessionState::Cancelled);
    assert!(session.result().is_empty());
    assert!(session.selection().resolve().is_empty());
    assert!(session.into_result().is_empty());
}

#[test]
fn test_invalid_config_fails_before_enumeration() {
    let volumes = Volumes::new(&[""]);
    let config = DialogConfig {
        title: String::new(),
        ..DialogConfig::default()
    };
    let err = DialogSession::new(config, unix_fs(), &volumes).unwrap_err();
    assert!(matches!(err, DialogError::InvalidConfiguration { .. }));
    assert_eq!(volumes.calls.get(), 0);
}

#[test]
fn test_volume_enumeration_failure() {
    let err = DialogSession::new(DialogConfig::default(), unix_fs(), &NoVolumes).unwrap_err();
    assert_eq!(err, DialogError::Provider(ProviderError::Unsupported));
}

#[test]
fn test_single_choice_when_multiselect_disabled() {
    let config = DialogConfig {
        multiselect: false,
        ..DialogConfig::default()
    };
    let mut session = DialogSession::new(config, unix_fs(), &Volumes::new(&[""])).unwrap();
    let root = session.tree().roots()[0];
    session.focus(root).unwrap();
    let x = child_named(&session, root, "x");
    session.focus(x).unwrap();

    assert_eq!(
        session.choose([0, 1]).unwrap_err(),
        DialogError::MultiselectDisabled { count: 2 }
    );
    session.choose([1, 1]).unwrap();
    assert_eq!(session.selection().resolve(), vec!["/x/b".to_string()]);
}

#[test]
fn test_index_out_of_range() {
    let mut session = DialogSession::new(DialogConfig::default(), unix_fs(), &Volumes::new(&[""])).unwrap();
    assert_eq!(
        session.choose([0]).unwrap_err(),
        DialogError::IndexOutOfRange { index: 0, len: 0 }
    );
}

#[test]
fn test_terminal_session_rejects_actions() {
    let mut session = DialogSession::new(DialogConfig::default(), unix_fs(), &Volumes::new(&[""])).unwrap();
    let root = session.tree().roots()[0];
    session.submit().unwrap();

    assert_eq!(session.focus(root).unwrap_err(), DialogError::SessionClosed);
    assert_eq!(session.choose([]).unwrap_err(), DialogError::SessionClosed);
    assert!(session.submit().is_err());

    session.cancel();
    assert_eq!(session.state(), SessionState::Submitted);
}

#[test]
fn test_focused_file_is_single_candidate() {
    let config = DialogConfig {
        select_files: false,
        ..DialogConfig::default()
    };
    let mut session = DialogSession::new(config, unix_fs(), &Volumes::new(&[""]))
        .unwrap()
        .with_codec(PathCodec::canonical());
    let root = session.tree().roots()[0];
    session.focus(root).unwrap();
    let x = child_named(&session, root, "x");
    session.focus(x).unwrap();
    assert!(session.candidates().is_empty());

    let b = child_named(&session, x, "b");
    let calls_before = session.provider().calls.borrow().len();
    session.focus(b).unwrap();
    assert_eq!(session.provider().calls.borrow().len(), calls_before);

    assert_eq!(session.candidates().len(), 1);
    assert_eq!(session.candidates()[0].kind, EntryKind::File);
    session.choose([0]).unwrap();
    assert_eq!(session.submit().unwrap(), ["/x/b".to_string()]);
}

#[test]
fn test_superseded_and_late_listings_are_ignored() {
    let mut session = DialogSession::new(DialogConfig::default(), unix_fs(), &Volumes::new(&[""])).unwrap();
    let root = session.tree().roots()[0];

    let first = session.request_focus(root).unwrap().unwrap();
    let second = session.request_focus(root).unwrap().unwrap();
    assert!(session.is_loading());

    session
        .complete_focus(&first, Err(ProviderError::other("late")))
        .unwrap();
    assert!(session.tree().node(root).unwrap().error.is_none());

    let outcome = ufd_core::fetch_listing(session.provider(), &second.path, second.include_hidden);
    session.complete_focus(&second, outcome).unwrap();
    assert!(!session.is_loading());
    assert_eq!(session.candidates().len(), 2);

    let third = session.request_focus(root).unwrap().unwrap();
    session.cancel();
    session
        .complete_focus(&third, Ok(Vec::new()))
        .unwrap();
    assert_eq!(session.tree().node(root).unwrap().children().len(), 2);
}

#[test]
fn test_provider_order_is_kept_and_hidden_flag_forwarded() {
    let fs = MemoryFs::default()
        .dir("/", &["zeta", ".hidden", "alpha"])
        .dir("/zeta", &[]);
    let config = DialogConfig {
        show_hidden: true,
        ..DialogConfig::default()
    };
    let mut session = DialogSession::new(config, fs, &Volumes::new(&[""])).unwrap();
    let root = session.tree().roots()[0];
    session.focus(root).unwrap();

    let labels: Vec<&str> = session.candidates().iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["zeta", ".hidden", "alpha"]);
    assert_eq!(session.provider().calls.borrow()[0], ("/".to_string(), true));
}

#[test]
fn test_external_delimiter_applied_on_submit() {
    let fs = MemoryFs::default()
        .dir("C:/", &["Users"])
        .dir("C:/Users", &[]);
    let mut session = DialogSession::new(DialogConfig::default(), fs, &Volumes::new(&["C:"]))
        .unwrap()
        .with_codec(PathCodec::with_external('\\'));
    let root = session.tree().roots()[0];
    session.focus(root).unwrap();
    session.choose([0]).unwrap();

    assert_eq!(session.submit().unwrap(), ["C:\\Users".to_string()]);
}
