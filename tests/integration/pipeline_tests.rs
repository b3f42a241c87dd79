use std::fs;
use std::path::Path;

use mzsweep::analysis::Analyzer;
use mzsweep::config::Config;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn write_bytes(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Builds a small but complete project exercising every resolution
/// channel: plugin manifest, bootstrap script references, animation
/// database and manifest ids, tileset joins, effect containers, sound
/// effects, locale sidecars, and one genuinely orphaned image.
fn build_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "game.exe", "binary stub");

    write(
        root,
        "js/main.js",
        r#"
        const scripts = ["js/plugins.js"];
        loadDataFile("Animations.json");
        loadDataFile("Tilesets.json");
        loadDataFile("Map001.json");
        loadDataFile("Enemies.json");
        "#,
    );
    write(
        root,
        "js/plugins.js",
        r#"var $plugins =
[
  {"name":"Foo","status":true,"parameters":{}}
];
"#,
    );
    write(
        root,
        "js/plugins/Foo.js",
        r#"ConfigManager.loadPak("locales/en-US.pak");"#,
    );

    write(
        root,
        "data/Map001.json",
        r#"{"tilesetId":1,"events":[]}"#,
    );
    write(
        root,
        "data/Tilesets.json",
        r#"[null,{"id":1,"tilesetNames":["Outside","","",""]}]"#,
    );
    write(
        root,
        "data/Animations.json",
        r#"[null,{"id":7,"effectName":"Spark","soundTimings":[{"frame":1,"se":{"name":"Explosion1","volume":90}}]}]"#,
    );
    write(
        root,
        "data/Enemies.json",
        r#"[null,{"id":1,"name":"Slime","animationId":7}]"#,
    );

    write(root, "img/tilesets/Outside.png", "png stub");
    write(root, "img/characters/Orphan.png", "png stub");

    // Container with an embedded ASCII texture name surrounded by
    // binary noise.
    let mut container = vec![0xEFu8, 0x01, 0x02, 0x03];
    container.extend_from_slice(b"TexA.png");
    container.extend_from_slice(&[0x00, 0xFF, 0x7F]);
    write_bytes(root, "effects/Spark.efkefc", &container);
    write(root, "effects/TexA.png", "png stub");

    write(root, "audio/se/Explosion1.ogg", "ogg stub");

    write(root, "locales/en-US.pak", "pack stub");
    write(root, "locales/en-US.pak.info", "pack index stub");

    dir
}

fn key(root: &Path, rel: &str) -> String {
    format!(
        "{}/{}",
        root.to_string_lossy().replace('\\', "/"),
        rel
    )
}

#[test]
fn end_to_end_finds_only_the_orphan() {
    let dir = build_project();
    let root = dir.path();

    let config = Config::default();
    let analysis = Analyzer::new(&config).analyze(root).unwrap();

    assert_eq!(analysis.unused, vec![key(root, "img/characters/Orphan.png")]);

    for rel in [
        "game.exe",
        "js/main.js",
        "js/plugins.js",
        "js/plugins/Foo.js",
        "data/Map001.json",
        "data/Tilesets.json",
        "data/Animations.json",
        "data/Enemies.json",
        "img/tilesets/Outside.png",
        "effects/Spark.efkefc",
        "effects/TexA.png",
        "audio/se/Explosion1.ogg",
        "locales/en-US.pak",
        "locales/en-US.pak.info",
    ] {
        assert!(
            analysis.used.contains(&key(root, rel)),
            "expected {rel} to be marked used"
        );
    }
}

#[test]
fn provenance_records_justifying_sources() {
    let dir = build_project();
    let root = dir.path();

    let config = Config::default();
    let analysis = Analyzer::new(&config).analyze(root).unwrap();

    let effect = key(root, "effects/Spark.efkefc");
    let sources = analysis.provenance.by_target().get(&effect).unwrap();
    assert!(sources.contains("animations"));

    let texture = key(root, "effects/TexA.png");
    let sources = analysis.provenance.by_target().get(&texture).unwrap();
    assert!(sources.contains(&effect));

    let sound = key(root, "audio/se/Explosion1.ogg");
    assert!(analysis.provenance.by_target().contains_key(&sound));
}

#[test]
fn analysis_is_idempotent() {
    let dir = build_project();
    let root = dir.path();

    let config = Config::default();
    let first = Analyzer::new(&config).analyze(root).unwrap();
    let second = Analyzer::new(&config).analyze(root).unwrap();

    assert_eq!(first.used, second.used);
    assert_eq!(first.unused, second.unused);
}

#[test]
fn fixpoint_matches_single_pass_without_chains() {
    let dir = build_project();
    let root = dir.path();

    let config = Config::default();
    let single = Analyzer::new(&config).analyze(root).unwrap();
    let fixed = Analyzer::new(&config)
        .with_fixpoint(true)
        .analyze(root)
        .unwrap();

    assert_eq!(single.used, fixed.used);
    assert_eq!(single.unused, fixed.unused);
}

#[test]
fn parallel_sweep_matches_sequential() {
    let dir = build_project();
    let root = dir.path();

    let config = Config::default();
    let sequential = Analyzer::new(&config).analyze(root).unwrap();
    let parallel = Analyzer::new(&config)
        .with_parallel(true)
        .analyze(root)
        .unwrap();

    assert_eq!(sequential.used, parallel.used);
    assert_eq!(sequential.unused, parallel.unused);
}

#[test]
fn excluded_directories_never_enter_the_universe() {
    let dir = build_project();
    let root = dir.path();
    write(root, ".git/objects/ab/cdef", "blob");
    write(root, "DatabaseCleanUpTool/report.png", "png stub");

    let config = Config::default();
    let analysis = Analyzer::new(&config).analyze(root).unwrap();

    let shadow = key(root, "DatabaseCleanUpTool/report.png");
    assert!(!analysis.used.contains(&shadow));
    assert!(!analysis.unused.contains(&shadow));
}

#[test]
fn save_files_are_invisible_below_the_root() {
    let dir = build_project();
    let root = dir.path();
    write(root, "save/file1.rmmzsave", "save stub");

    let config = Config::default();
    let analysis = Analyzer::new(&config).analyze(root).unwrap();

    let save = key(root, "save/file1.rmmzsave");
    assert!(!analysis.used.contains(&save));
    assert!(!analysis.unused.contains(&save));
}
