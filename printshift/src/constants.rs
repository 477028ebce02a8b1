use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the configuration file discovered by upward traversal.
pub const CONFIG_FILENAME: &str = ".printshift.toml";

/// Default extension (without the dot) of candidate source files.
pub const DEFAULT_EXTENSION: &str = "swift";

/// Default marker whose presence makes a file eligible for import insertion.
pub const DEFAULT_MARKER: &str = "print(";

/// Default import declaration inserted after the last existing import line.
pub const DEFAULT_IMPORT_LINE: &str = "import PerformanceLogger";

/// Set of folders to exclude by default (Swift build and dependency output).
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert(".git");
        s.insert(".build");
        s.insert(".swiftpm");
        s.insert("DerivedData");
        s.insert("Pods");
        s.insert("Carthage");
        s.insert("build");
        s.insert("vendor");
        s
    })
}
