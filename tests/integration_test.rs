// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const GAME_INI: &str = "[/Script/EngineSettings.GeneralProjectSettings]\r\n\
ProjectID=3F9D696D4A2A1AE4AA5E2BB0F2B33D17\r\n\
ProjectName=Sages Sample\r\n\
ProjectVersion=1.2.0\r\n\
\r\n\
; keep packaging settings untouched\r\n\
[/Script/UnrealEd.ProjectPackagingSettings]\r\n\
BuildConfiguration=PPBC_Shipping\r\n";

/// Run the binary inside `dir` with no user config in reach.
fn unreal_ci(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_unreal-ci"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute unreal-ci")
}

fn project_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("Config")).unwrap();
    fs::write(dir.path().join("Config/DefaultGame.ini"), GAME_INI).unwrap();
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = unreal_ci(dir.path(), &["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Tools for Unreal CI pipelines"));
    assert!(text.contains("projectVersion"));
    assert!(text.contains("jsonToXml"));
}

#[test]
fn test_get_uses_default_ini_path() {
    let dir = project_dir();
    let output = unreal_ci(dir.path(), &["projectVersion", "get"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1.2.0\n");
}

#[test]
fn test_get_missing_file() {
    let dir = TempDir::new().unwrap();
    let output = unreal_ci(
        dir.path(),
        &["projectVersion", "get", "--iniPath", "Config/DefaultGame.ini"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("not found"));
    assert!(stdout(&output).is_empty());
    assert!(!dir.path().join("Config").exists());
}

#[test]
fn test_set_writes_version() {
    let dir = project_dir();
    let output = unreal_ci(
        dir.path(),
        &["projectVersion", "set", "-v", "1.2.1-hotfix.2", "-i", "Config/DefaultGame.ini"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let written = fs::read_to_string(dir.path().join("Config/DefaultGame.ini")).unwrap();
    assert_eq!(written, GAME_INI.replace("1.2.0", "1.2.1-hotfix.2"));
}

#[test]
fn test_set_invalid_version_leaves_file() {
    let dir = project_dir();
    let output = unreal_ci(
        dir.path(),
        &["projectVersion", "set", "--version", "not-a-version"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Malformed version"));
    let written = fs::read(dir.path().join("Config/DefaultGame.ini")).unwrap();
    assert_eq!(written, GAME_INI.as_bytes());
}

#[test]
fn test_perforce_prints_and_writes() {
    let dir = project_dir();
    let output = unreal_ci(
        dir.path(),
        &[
            "projectVersion",
            "perforce",
            "--relVersion",
            "1.2.0",
            "--devVersion",
            "2.0.0",
            "--branch",
            "task9.4",
            "--iniPath",
            "Config/DefaultGame.ini",
        ],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "2.0.0+4\n");
    let written = fs::read_to_string(dir.path().join("Config/DefaultGame.ini")).unwrap();
    assert_eq!(written, GAME_INI.replace("1.2.0", "2.0.0+4"));
}

#[test]
fn test_perforce_unknown_branch() {
    let dir = project_dir();
    let output = unreal_ci(
        dir.path(),
        &[
            "projectVersion",
            "perforce",
            "-r",
            "1.2.0",
            "-d",
            "1.3.0",
            "-b",
            "main",
            "-i",
            "Config/DefaultGame.ini",
        ],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown branch kind"));
    let written = fs::read(dir.path().join("Config/DefaultGame.ini")).unwrap();
    assert_eq!(written, GAME_INI.as_bytes());
}

#[test]
fn test_config_file_changes_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("Game.ini"),
        "[/Script/EngineSettings.GeneralProjectSettings]\nProjectVersion=0.4.2\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("unreal-ci.toml"),
        "[project_version]\nini_path = \"Game.ini\"\n",
    )
    .unwrap();

    let output = unreal_ci(dir.path(), &["projectVersion", "get"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "0.4.2\n");
}

#[test]
fn test_invalid_config_file() {
    let dir = project_dir();
    fs::write(dir.path().join("unreal-ci.toml"), "[project_version\n").unwrap();

    let output = unreal_ci(dir.path(), &["projectVersion", "get"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error loading config"));
}

#[test]
fn test_json_to_xml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("index.json"),
        r#"{ "tests": [
            { "testDisplayName": "Boots", "fullTestPath": "Project.Boot.Boots", "state": "Success", "duration": 0.5 },
            { "testDisplayName": "Saves", "fullTestPath": "Project.Save.Saves", "state": "Fail", "duration": 1.0,
              "entries": [ { "event": { "type": "Error", "message": "slot missing" } } ] }
        ] }"#,
    )
    .unwrap();

    let output = unreal_ci(
        dir.path(),
        &["jsonToXml", "-j", "index.json", "-o", "reports/junit.xml", "-t", "Nightly"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let xml = fs::read_to_string(dir.path().join("reports/junit.xml")).unwrap();
    assert!(xml.contains(r#"<testsuite name="Nightly" tests="2" failures="1""#));
    assert!(xml.contains(r#"<failure message="slot missing">"#));
}

#[test]
fn test_parse_lint_report() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("lint.json"),
        r#"{ "Violators": [ { "ViolatorAssetPath": "/Game/BP_Door",
              "Violations": [ { "RuleGroup": "Naming", "RuleTitle": "Prefix", "bIsError": true } ] } ] }"#,
    )
    .unwrap();

    let output = unreal_ci(dir.path(), &["teamcity", "parseLintReport", "--json", "lint.json"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("##teamcity[inspectionType id='Naming.Prefix'"));
    assert!(text.contains("file='/Game/BP_Door' SEVERITY='ERROR'"));
    assert!(text.contains("##teamcity[buildProblem"));
}

#[test]
fn test_clean_dist() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("dist/Windows")).unwrap();
    fs::write(dir.path().join("dist/Windows/Game.pak"), b"pak").unwrap();

    let output = unreal_ci(dir.path(), &["clean", "dist"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!dir.path().join("dist").exists());

    let again = unreal_ci(dir.path(), &["clean", "dist", "--directory", "dist"]);
    assert!(again.status.success());
}
