#![cfg(unix)]

use pathexpander_deps::{parse_report, scan_projects, DepsError, ProjectSpec, Scope};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_report(dir: &Path, lines: &[String]) -> std::path::PathBuf {
    let path = dir.join("resolve.txt");
    let mut content = String::from("\nThe following files have been resolved:\n");
    for line in lines {
        content.push_str("   ");
        content.push_str(line);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_report_with_workspace_overlay() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("m2/repository");
    let workspace = temp.path().join("ws/bar");
    fs::create_dir_all(workspace.join("modules/bar/src")).unwrap();
    fs::create_dir_all(workspace.join(".svn/bar")).unwrap();

    let repo_str = repo.to_string_lossy();
    let report = write_report(
        temp.path(),
        &[
            format!("org.foo:bar:jar:2.0:compile:{}/org/foo/bar/2.0/bar-2.0.jar", repo_str),
            format!(
                "org.foo:bar:jar:sources:2.0:compile:{}/org/foo/bar/2.0/bar-2.0-sources.jar (optional)",
                repo_str
            ),
            format!("junit:junit:jar:4.13:test:{}/junit/junit/4.13/junit-4.13.jar", repo_str),
        ],
    );

    let index = scan_projects(&[ProjectSpec::new(&workspace, "org.foo", "BarProject")]).unwrap();
    let catalog = parse_report(&report, &index).unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.repository_root(), Some(&*repo_str));

    let expected_project = workspace.join("modules/bar").to_string_lossy().into_owned();
    let bar = &catalog.records()[0];
    assert_eq!(bar.repo_relative_path, "/org/foo/bar/2.0/bar-2.0.jar");
    assert_eq!(bar.project_relative_path(), Some(expected_project.as_str()));
    assert_eq!(bar.project_name(), Some("BarProject"));

    let sources = &catalog.records()[1];
    assert_eq!(sources.classifier.as_deref(), Some("sources"));
    assert!(sources.file_path.ends_with("bar-2.0-sources.jar"));
    assert_eq!(sources.project_name(), Some("BarProject"));

    let junit = &catalog.records()[2];
    assert_eq!(junit.scope, Scope::Test);
    assert_eq!(junit.project, None);
}

#[test]
fn test_malformed_first_line_produces_no_catalog() {
    let temp = TempDir::new().unwrap();
    let report = write_report(
        temp.path(),
        &["org.foo:bar:jar:2.0:compile:/home/u/.repo/org/foo/baz/2.0/bar-2.0.jar".to_string()],
    );

    let index = scan_projects(&[]).unwrap();
    let err = parse_report(&report, &index).unwrap_err();
    assert!(matches!(err, DepsError::MissingLayoutFragment { .. }));
}

#[test]
fn test_unreadable_workspace_aborts() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("not-checked-out");

    let err = scan_projects(&[ProjectSpec::new(&missing, "org.foo", "Gone")]).unwrap_err();
    match err {
        DepsError::FileSystemError { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other:?}"),
    }
}
