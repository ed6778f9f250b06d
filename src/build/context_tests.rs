use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::*;

#[test]
fn create_stages_template_and_data_dirs() {
    let ctx = BuildContext::create(true).unwrap();
    assert!(ctx.template_dir().is_dir());
    assert!(ctx.data_dir().unwrap().is_dir());
}

#[test]
fn data_dir_absent_when_export_disabled() {
    let ctx = BuildContext::create(false).unwrap();
    assert!(ctx.data_dir().is_none());
}

#[test]
fn staging_area_is_removed_on_drop() {
    let path: PathBuf;
    {
        let ctx = BuildContext::create(false).unwrap();
        path = ctx.path().to_path_buf();
        assert!(path.exists());
    }
    assert!(!path.exists());
}

#[test]
fn close_removes_the_staging_area() {
    let ctx = BuildContext::create(false).unwrap();
    let path = ctx.path().to_path_buf();
    ctx.close().unwrap();
    assert!(!path.exists());
}

#[test]
fn stage_asset_creates_intermediate_directories() {
    let src_dir = TempDir::new().unwrap();
    let src = src_dir.path().join("module.css");
    fs::write(&src, "body {}").unwrap();

    let ctx = BuildContext::create(false).unwrap();
    ctx.stage_asset("assets/css/module.css", &src).unwrap();

    let staged = ctx.template_dir().join("assets/css/module.css");
    assert_eq!(fs::read_to_string(staged).unwrap(), "body {}");
}

#[test]
fn stage_asset_rejects_escaping_destinations() {
    let src_dir = TempDir::new().unwrap();
    let src = src_dir.path().join("module.css");
    fs::write(&src, "x").unwrap();

    let ctx = BuildContext::create(false).unwrap();
    assert!(ctx.stage_asset("../outside.css", &src).is_err());
    assert!(ctx.stage_asset("/abs/outside.css", &src).is_err());
}

#[test]
fn stage_asset_reports_missing_source() {
    let ctx = BuildContext::create(false).unwrap();
    let err = ctx
        .stage_asset("assets/missing.css", std::path::Path::new("/no/such/file.css"))
        .unwrap_err();
    assert!(err.to_string().contains("/no/such/file.css"));
}

#[test]
fn write_template_file_overwrites_earlier_content() {
    let ctx = BuildContext::create(false).unwrap();
    ctx.write_template_file("base.html", "parent").unwrap();
    ctx.write_template_file("base.html", "child").unwrap();
    assert_eq!(
        fs::read_to_string(ctx.template_dir().join("base.html")).unwrap(),
        "child"
    );
}
