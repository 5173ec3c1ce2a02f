use crate::errors::Result;
use crate::scan::Language;
use globset::{Glob, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Discover rewritable source files under `root`.
///
/// - Respects `.gitignore`
/// - Applies include/exclude glob patterns
/// - Filters by the extensions of `lang`, or of every supported language
///   when `lang` is `None`
/// - Returns sorted paths for deterministic output
pub fn discover_files(
    root: &Path,
    lang: Option<Language>,
    include_patterns: &[String],
    exclude_patterns: &[String],
) -> Result<Vec<PathBuf>> {
    let extensions: Vec<&str> = match lang {
        Some(l) => l.extensions().to_vec(),
        None => Language::all()
            .iter()
            .flat_map(|l| l.extensions().iter().copied())
            .collect(),
    };

    let mut exclude_builder = GlobSetBuilder::new();
    for pattern in exclude_patterns {
        exclude_builder.add(Glob::new(pattern)?);
    }
    let exclude_set = exclude_builder.build()?;

    let include_set = if include_patterns.is_empty() {
        None
    } else {
        let mut builder = GlobSetBuilder::new();
        for pattern in include_patterns {
            builder.add(Glob::new(pattern)?);
        }
        Some(builder.build()?)
    };

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext_match = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.contains(&ext));

        if !ext_match {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);

        if exclude_set.is_match(relative) || exclude_set.is_match(path) {
            continue;
        }
        if let Some(fname) = path.file_name() {
            if exclude_set.is_match(Path::new(fname)) {
                continue;
            }
        }

        if let Some(ref include) = include_set {
            if !include.is_match(relative) && !include.is_match(path) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    files.sort();

    Ok(files)
}

/// Auto-detect the dominant language by counting file extensions.
pub fn detect_language(root: &Path) -> Option<Language> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();

    let mut js_count = 0usize;
    let mut ts_count = 0usize;
    let mut tsx_count = 0usize;

    for entry in walker.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match Language::from_path(path) {
            Some(Language::JavaScript) => js_count += 1,
            Some(Language::TypeScript) => ts_count += 1,
            Some(Language::Tsx) => tsx_count += 1,
            None => {}
        }
    }

    let max = js_count.max(ts_count).max(tsx_count);
    if max == 0 {
        return None;
    }

    if max == ts_count {
        Some(Language::TypeScript)
    } else if max == js_count {
        Some(Language::JavaScript)
    } else {
        Some(Language::Tsx)
    }
}
