//! Every source file has a unit test file at the same relative path under
//! `tests/unit`, and every test file holds at least one test

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Files that only declare modules or start a binary
    fn is_structural(relative: &str) -> bool {
        let name = Path::new(relative)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        matches!(name, "lib.rs" | "main.rs" | "mod.rs")
    }

    /// Relative paths of every `.rs` file below `base`, with `/` separators
    fn rust_files(base: &Path) -> io::Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![base.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                    let relative = path
                        .strip_prefix(base)
                        .map_err(io::Error::other)?
                        .components()
                        .map(|part| part.as_os_str().to_string_lossy().into_owned())
                        .collect::<Vec<_>>()
                        .join("/");
                    found.insert(relative);
                }
            }
        }
        Ok(found)
    }

    fn source_and_unit_files() -> (BTreeSet<String>, BTreeSet<String>) {
        let sources = rust_files(Path::new("src")).expect("src is readable");
        let units = rust_files(Path::new("tests/unit")).expect("tests/unit is readable");
        let keep = |set: BTreeSet<String>| {
            set.into_iter()
                .filter(|path| !is_structural(path))
                .collect::<BTreeSet<_>>()
        };
        (keep(sources), keep(units))
    }

    // Tests each module file has a unit test counterpart
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (sources, units) = source_and_unit_files();

        let missing: Vec<_> = sources.difference(&units).collect();
        assert!(
            missing.is_empty(),
            "Source files without tests/unit counterparts: {missing:?}"
        );
    }

    // Tests no unit test file outlives its source file
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (sources, units) = source_and_unit_files();

        let orphaned: Vec<_> = units.difference(&sources).collect();
        assert!(
            orphaned.is_empty(),
            "Unit test files without src counterparts: {orphaned:?}"
        );
    }

    // Tests every non-structural test file declares a test
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let files = rust_files(tests_dir).expect("tests is readable");

        let empty: Vec<_> = files
            .iter()
            .filter(|relative| !is_structural(relative))
            .filter(|relative| {
                fs::read_to_string(tests_dir.join(relative.as_str()))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .collect();
        assert!(empty.is_empty(), "Test files without any #[test]: {empty:?}");
    }
}
