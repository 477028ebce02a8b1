use crate::constants::get_default_exclude_folders;

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use printshift::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\Sources\\App.swift")), "Sources/App.swift");
/// assert_eq!(normalize_display_path(Path::new("./Sources/App.swift")), "Sources/App.swift");
/// ```
#[must_use]
pub fn normalize_display_path(path: &std::path::Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    for exclude in excludes {
        if exclude.starts_with("*.") {
            if name.ends_with(&exclude[1..]) {
                return true;
            }
        } else if name == exclude {
            return true;
        }
    }
    false
}

/// Collects candidate source files from a directory with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude, and global gitignore
/// IN ADDITION to the hardcoded default exclusions (.build, DerivedData, Pods, etc.).
///
/// # Arguments
/// * `root` - Root directory to search
/// * `extension` - Candidate file extension (without the dot)
/// * `exclude` - Additional user-specified exclusion patterns
/// * `include` - Folders to force-include (overrides excludes)
/// * `verbose` - Whether to print walk errors to stderr
#[must_use]
pub fn collect_source_files(
    root: &std::path::Path,
    extension: &str,
    exclude: &[String],
    include: &[String],
    verbose: bool,
) -> Vec<std::path::PathBuf> {
    use ignore::WalkBuilder;

    // Merge user excludes with default excludes
    let default_excludes: Vec<String> = get_default_exclude_folders()
        .iter()
        .map(|&s| s.to_owned())
        .collect();
    let mut all_excludes: Vec<String> = exclude.iter().cloned().chain(default_excludes).collect();

    // Remove force-included folders from exclusion list
    all_excludes.retain(|ex| !include.iter().any(|inc| ex == inc));

    // Clone excludes for use in filter closure
    let excludes_for_filter = all_excludes.clone();
    let root_for_filter = root.to_path_buf();

    // Use ignore crate's WalkBuilder for gitignore support
    // Add filter_entry to skip excluded directories at traversal time,
    // preventing descent into .build, DerivedData, Pods, etc.
    let walker = WalkBuilder::new(root)
        .hidden(false) // Don't skip hidden files (we handle that with defaults)
        .git_ignore(true) // Respect .gitignore files
        .git_global(true) // Respect global gitignore
        .git_exclude(true) // Respect .git/info/exclude
        .filter_entry(move |entry| {
            // Always allow the root directory
            if entry.path() == root_for_filter {
                return true;
            }

            // Only filter directories - allow all files through (we filter them later)
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }

            // Check if directory name matches any exclusion pattern
            if let Some(name) = entry.file_name().to_str() {
                if is_excluded(name, &excludes_for_filter) {
                    return false;
                }
            }

            true
        })
        .build();

    let mut files = Vec::new();

    for result in walker {
        if let Ok(entry) = result {
            let path = entry.path();

            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                continue;
            }

            if path.extension().is_some_and(|ext| ext == extension) {
                files.push(path.to_path_buf());
            }
        } else if verbose {
            // Ignore walk errors silently unless verbose
            if let Err(e) = result {
                eprintln!("Walk error: {e}");
            }
        }
    }

    files
}

/// Resolves a mixed list of file and directory targets into the candidate
/// file list, sorted and deduplicated for a stable processing order.
///
/// Explicit file targets are taken as-is when they carry the candidate
/// extension; directory targets are walked with [`collect_source_files`].
#[must_use]
pub fn collect_candidates(
    targets: &[std::path::PathBuf],
    extension: &str,
    exclude: &[String],
    include: &[String],
    verbose: bool,
) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();

    for target in targets {
        if target.is_file() {
            if target.extension().is_some_and(|ext| ext == extension) {
                files.push(target.clone());
            }
        } else if target.is_dir() {
            files.extend(collect_source_files(
                target, extension, exclude, include, verbose,
            ));
        }
    }

    files.sort();
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_source_files_exclusion() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();

        let sources_dir = root.join("Sources");
        fs::create_dir(&sources_dir)?;
        fs::write(sources_dir.join("App.swift"), "print(\"hello\")")?;

        let build_dir = root.join(".build");
        fs::create_dir(&build_dir)?;
        fs::write(build_dir.join("Gen.swift"), "print(\"generated\")")?;

        let pods_dir = root.join("Pods");
        fs::create_dir(&pods_dir)?;
        fs::write(pods_dir.join("Dep.swift"), "print(\"pod\")")?;

        let files = collect_source_files(root, "swift", &[], &[], false);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert!(names.contains(&"App.swift".to_owned()));
        assert!(!names.contains(&"Gen.swift".to_owned()));
        assert!(!names.contains(&"Dep.swift".to_owned()));

        Ok(())
    }

    #[test]
    fn test_collect_source_files_wildcard_exclude() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();

        let gen_dir = root.join("Api.generated");
        fs::create_dir(&gen_dir)?;
        fs::write(gen_dir.join("Api.swift"), "print(\"api\")")?;

        let files = collect_source_files(root, "swift", &["*.generated".to_owned()], &[], false);
        assert!(
            files.is_empty(),
            "Files in Api.generated should be excluded by *.generated"
        );

        Ok(())
    }

    #[test]
    fn test_collect_source_files_force_include() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();

        let pods_dir = root.join("Pods");
        fs::create_dir(&pods_dir)?;
        fs::write(pods_dir.join("Dep.swift"), "print(\"pod\")")?;

        let files = collect_source_files(root, "swift", &[], &[], false);
        assert!(files.is_empty(), "Pods should be excluded by default");

        let files2 = collect_source_files(root, "swift", &[], &["Pods".to_owned()], false);
        assert_eq!(
            files2.len(),
            1,
            "Pods should be included if explicitly force-included"
        );
        assert_eq!(files2[0].file_name().unwrap().to_string_lossy(), "Dep.swift");

        Ok(())
    }

    #[test]
    fn test_collect_source_files_no_substring_unexclude() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();

        let build_dir = root.join(".build");
        fs::create_dir(&build_dir)?;
        fs::write(build_dir.join("Gen.swift"), "print(\"generated\")")?;

        // include="build" must NOT un-exclude ".build" (exact match only)
        let files = collect_source_files(root, "swift", &[], &["build".to_owned()], false);
        assert!(
            files.is_empty(),
            "include='build' should NOT un-exclude '.build'"
        );

        let files2 = collect_source_files(root, "swift", &[], &[".build".to_owned()], false);
        let names: Vec<String> = files2
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert!(
            names.contains(&"Gen.swift".to_owned()),
            "Exact include='.build' MUST un-exclude .build"
        );

        Ok(())
    }

    #[test]
    fn test_collect_candidates_mixed_targets() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();

        let sources_dir = root.join("Sources");
        fs::create_dir(&sources_dir)?;
        let app = sources_dir.join("App.swift");
        fs::write(&app, "print(\"hello\")")?;
        fs::write(sources_dir.join("View.swift"), "print(\"view\")")?;
        fs::write(sources_dir.join("notes.txt"), "not a source file")?;

        // Passing both the directory and a file inside it must not duplicate
        let files = collect_candidates(
            &[sources_dir.clone(), app.clone()],
            "swift",
            &[],
            &[],
            false,
        );
        assert_eq!(files.len(), 2);

        // Explicit file targets with the wrong extension are dropped
        let files2 = collect_candidates(&[sources_dir.join("notes.txt")], "swift", &[], &[], false);
        assert!(files2.is_empty());

        Ok(())
    }

    #[test]
    fn test_collect_candidates_sorted() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();

        fs::write(root.join("Bravo.swift"), "")?;
        fs::write(root.join("Alpha.swift"), "")?;
        fs::write(root.join("Charlie.swift"), "")?;

        let files = collect_candidates(&[root.to_path_buf()], "swift", &[], &[], false);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Alpha.swift", "Bravo.swift", "Charlie.swift"]);

        Ok(())
    }

    #[test]
    fn test_is_excluded_patterns() {
        let excludes = vec!["DerivedData".to_owned(), "*.generated".to_owned()];
        assert!(is_excluded("DerivedData", &excludes));
        assert!(is_excluded("Api.generated", &excludes));
        assert!(!is_excluded("DerivedDataBackup", &excludes));
        assert!(!is_excluded("Sources", &excludes));
    }
}
