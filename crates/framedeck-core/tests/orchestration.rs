//! Batch orchestration tests.

use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use framedeck_core::config::{ProjectRecord, Settings, ViewConfig};
use framedeck_core::orchestration::{DeployOrchestrator, SkipReason, build_project_map};
use tempfile::TempDir;

fn set_mtime(path: &Path, secs: i64) {
    filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
}

fn view(name: &str) -> ViewConfig {
    ViewConfig {
        name: name.to_string(),
        variant: None,
        display: None,
    }
}

fn project(base: &str, path: &Path) -> ProjectRecord {
    ProjectRecord {
        view_name_base: base.to_string(),
        project_path: path.to_path_buf(),
    }
}

fn settings_for(output_root: &Path) -> Settings {
    Settings {
        output_root: output_root.to_path_buf(),
        ..Settings::default()
    }
}

#[test]
fn project_map_is_last_wins_for_colliding_keys() {
    let records = vec![
        project("Alpha", Path::new("/p1")),
        project("alpha ", Path::new("/p2")),
    ];
    let map = build_project_map(&records);
    assert_eq!(map.len(), 1);
    assert_eq!(map["alpha"], PathBuf::from("/p2"));
}

#[test]
fn end_to_end_deploys_newest_run() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    let run1 = out.join("deska/run1");
    fs::create_dir_all(&run1).unwrap();
    fs::write(run1.join("x.png"), b"X").unwrap();
    fs::write(run1.join("y.png"), b"Y").unwrap();
    set_mtime(&run1, 1_000);

    let run2 = out.join("deska/run2");
    fs::create_dir_all(&run2).unwrap();
    fs::write(run2.join("z.png"), b"Z").unwrap();
    set_mtime(&run2, 2_000);

    let project_dir = temp.path().join("p1");
    fs::create_dir_all(project_dir.join("materials")).unwrap();

    let orchestrator = DeployOrchestrator::new(settings_for(&out));
    let summary = orchestrator.run(
        &[view("DeskA")],
        &[project("deska", &project_dir)],
    );

    assert_eq!(summary.deployed.len(), 1);
    assert!(summary.skipped.is_empty());
    assert_eq!(summary.deployed[0].frames_copied, 1);

    assert_eq!(
        fs::read(out.join("deska/staging/frame_000.png")).unwrap(),
        b"Z"
    );
    assert_eq!(
        fs::read(project_dir.join("materials/frame_000.png")).unwrap(),
        b"Z"
    );
}

#[test]
fn unmatched_view_is_skipped_and_batch_continues() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let run = out.join("deskb/run1");
    fs::create_dir_all(&run).unwrap();
    fs::write(run.join("a.png"), b"A").unwrap();

    let project_dir = temp.path().join("p1");
    fs::create_dir_all(project_dir.join("materials")).unwrap();

    let orchestrator = DeployOrchestrator::new(settings_for(&out));
    let summary = orchestrator.run(
        &[view("Orphan"), view("DeskB")],
        &[project("deskb", &project_dir)],
    );

    // The orphan view is skipped; the batch still deploys the second one.
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].key, "orphan");
    assert_eq!(summary.skipped[0].reason, SkipReason::NoProjectMatch);
    assert_eq!(summary.deployed.len(), 1);
    assert_eq!(summary.deployed[0].key, "deskb");
}

#[test]
fn missing_source_folder_skips_view() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let project_dir = temp.path().join("p1");
    fs::create_dir_all(project_dir.join("materials")).unwrap();

    let orchestrator = DeployOrchestrator::new(settings_for(&out));
    let summary = orchestrator.run(&[view("DeskA")], &[project("deska", &project_dir)]);

    assert!(summary.deployed.is_empty());
    assert!(matches!(
        summary.skipped[0].reason,
        SkipReason::SourceNotFound { .. }
    ));
}

#[test]
fn missing_materials_skips_but_leaves_staging_intact() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let run = out.join("deska/run1");
    fs::create_dir_all(&run).unwrap();
    fs::write(run.join("a.png"), b"A").unwrap();

    let project_dir = temp.path().join("p1");
    fs::create_dir(&project_dir).unwrap();

    let orchestrator = DeployOrchestrator::new(settings_for(&out));
    let summary = orchestrator.run(&[view("DeskA")], &[project("deska", &project_dir)]);

    assert!(matches!(
        summary.skipped[0].reason,
        SkipReason::MissingMaterials { .. }
    ));
    // Staging survives the later-stage miss for the next run.
    assert!(out.join("deska/staging/frame_000.png").exists());
}

#[test]
fn stage_only_reports_zero_copied() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    let run = out.join("deska/run1");
    fs::create_dir_all(&run).unwrap();
    fs::write(run.join("a.png"), b"A").unwrap();

    let project_dir = temp.path().join("p1");
    fs::create_dir_all(project_dir.join("materials")).unwrap();

    let mut settings = settings_for(&out);
    settings.stage_only = true;
    let orchestrator = DeployOrchestrator::new(settings);
    let summary = orchestrator.run(&[view("DeskA")], &[project("deska", &project_dir)]);

    assert_eq!(summary.deployed.len(), 1);
    assert!(summary.deployed[0].stage_only);
    assert_eq!(summary.deployed[0].frames_copied, 0);
    assert_eq!(summary.deployed[0].frames_staged, 1);
    assert!(out.join("deska/staging/frame_000.png").exists());
    assert!(!project_dir.join("materials/frame_000.png").exists());
}

#[test]
fn legacy_named_source_folder_still_deploys() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    // Folder named with the micro sign; the view key uses Greek mu.
    let run = out.join("\u{00B5}desk/run1");
    fs::create_dir_all(&run).unwrap();
    fs::write(run.join("a.png"), b"A").unwrap();

    let project_dir = temp.path().join("p1");
    fs::create_dir_all(project_dir.join("materials")).unwrap();

    let orchestrator = DeployOrchestrator::new(settings_for(&out));
    let summary = orchestrator.run(
        &[view("\u{03BC}desk")],
        &[project("\u{00B5}desk", &project_dir)],
    );

    assert_eq!(summary.deployed.len(), 1);
    assert!(project_dir.join("materials/frame_000.png").exists());
}

#[test]
fn run_batch_is_fatal_on_missing_views_config() {
    let temp = TempDir::new().unwrap();
    let mut settings = settings_for(temp.path());
    settings.views_path = temp.path().join("nope.json");
    settings.projects_path = temp.path().join("projects.json");
    fs::write(&settings.projects_path, "[]").unwrap();

    let err = DeployOrchestrator::new(settings).run_batch().unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn run_batch_is_fatal_on_malformed_projects_config() {
    let temp = TempDir::new().unwrap();
    let mut settings = settings_for(temp.path());
    settings.views_path = temp.path().join("views.json");
    settings.projects_path = temp.path().join("projects.json");
    fs::write(&settings.views_path, "[]").unwrap();
    fs::write(&settings.projects_path, "{not json").unwrap();

    let err = DeployOrchestrator::new(settings).run_batch().unwrap_err();
    assert!(format!("{err:#}").contains("projects.json"));
}
