use std::path::Path;

use super::*;

#[test]
fn empty_include_admits_everything() {
    let filter = GlobFilter::new(&[], &[]).unwrap();
    assert!(filter.should_include(Path::new("any/file.log")));
}

#[test]
fn ignore_pattern_wins_over_include() {
    let filter = GlobFilter::new(
        &["**/*.log".to_string()],
        &["**/skipped/**".to_string()],
    )
    .unwrap();
    assert!(filter.should_include(Path::new("run1/sample.log")));
    assert!(!filter.should_include(Path::new("run1/skipped/sample.log")));
}

#[test]
fn ignore_matches_bare_file_name() {
    let filter = GlobFilter::new(&[], &["*.tmp".to_string()]).unwrap();
    assert!(!filter.should_include(Path::new("deep/nested/scratch.tmp")));
    assert!(filter.should_include(Path::new("deep/nested/scratch.log")));
}

#[test]
fn include_set_restricts_candidates() {
    let filter = GlobFilter::new(&["**/*.tsv".to_string()], &[]).unwrap();
    assert!(filter.should_include(Path::new("a/b/stats.tsv")));
    assert!(!filter.should_include(Path::new("a/b/stats.csv")));
}

#[test]
fn invalid_pattern_is_reported_with_the_pattern() {
    let err = GlobFilter::new(&[], &["[".to_string()]).unwrap_err();
    assert!(err.to_string().contains('['));
}
