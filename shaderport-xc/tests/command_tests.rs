#![cfg(unix)]

use shaderport_core::ShaderEntry;
use shaderport_xc::{CommandTranslator, ScratchDir, Translator, XcError};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::{tempdir, TempDir};

// Arguments arrive as: -E <entry> -I <input> -O <output> -S <stage> -T <lang> -V <version>
const ECHO: &str = "#!/bin/sh\ncp \"$4\" \"$6\"\n";
const FAIL: &str = "#!/bin/sh\necho \"error: bad shader\" >&2\nexit 3\n";
const SILENT: &str = "#!/bin/sh\nexit 0\n";
const EMPTY: &str = "#!/bin/sh\n: > \"$6\"\n";
const SLOW: &str = "#!/bin/sh\nsleep 5\ncp \"$4\" \"$6\"\n";
const RECORD_ARGS: &str = "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$6\"\n";

fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

async fn translator_with(script: &str) -> (TempDir, CommandTranslator) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempdir().unwrap();
    let stub = write_stub(dir.path(), "xc-stub", script);
    let scratch = ScratchDir::create(dir.path().join("tmp")).await.unwrap();
    (dir, CommandTranslator::new(stub, scratch))
}

#[tokio::test]
async fn test_echo_translator_returns_input() {
    let (_dir, translator) = translator_with(ECHO).await;
    let entry = ShaderEntry::new("unlit_vertex", "float4 VS() : SV_POSITION { return 0; }").unwrap();

    let translated = translator.translate(&entry, entry.source()).await.unwrap();
    assert_eq!(translated, entry.source());
}

#[tokio::test]
async fn test_translator_receives_stage_arguments() {
    let (dir, translator) = translator_with(RECORD_ARGS).await;
    let entry = ShaderEntry::new("unlit_ps", "x").unwrap();

    let recorded = translator.translate(&entry, "x").await.unwrap();
    let args: Vec<&str> = recorded.lines().collect();
    let input = dir.path().join("tmp/unlit_ps.ps");
    let output = dir.path().join("tmp/unlit_ps_ps.glsl");
    assert_eq!(
        args,
        vec![
            "-E",
            "PS",
            "-I",
            input.to_str().unwrap(),
            "-O",
            output.to_str().unwrap(),
            "-S",
            "ps",
            "-T",
            "glsl",
            "-V",
            "330 core",
        ]
    );
}

#[tokio::test]
async fn test_non_zero_exit_names_shader() {
    let (_dir, translator) = translator_with(FAIL).await;
    let entry = ShaderEntry::new("brokenPS", "x").unwrap();

    match translator.translate(&entry, "x").await {
        Err(XcError::ExitStatus { shader, status, stderr }) => {
            assert_eq!(shader, "brokenPS");
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr, "error: bad shader");
        }
        other => panic!("expected an exit status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_output_is_an_error() {
    let (_dir, translator) = translator_with(SILENT).await;
    let entry = ShaderEntry::new("silentPS", "x").unwrap();

    let err = translator.translate(&entry, "x").await.unwrap_err();
    assert!(matches!(err, XcError::MissingOutput { .. }));
    assert_eq!(err.shader(), Some("silentPS"));
}

#[tokio::test]
async fn test_empty_output_is_an_error() {
    let (_dir, translator) = translator_with(EMPTY).await;
    let entry = ShaderEntry::new("emptyPS", "x").unwrap();

    let err = translator.translate(&entry, "x").await.unwrap_err();
    assert!(matches!(err, XcError::EmptyOutput { .. }));
}

#[tokio::test]
async fn test_timeout_kills_translator() {
    let (_dir, translator) = translator_with(SLOW).await;
    let translator = translator.with_timeout(Some(Duration::from_millis(200)));
    let entry = ShaderEntry::new("slowVertex", "x").unwrap();

    let err = translator.translate(&entry, "x").await.unwrap_err();
    match err {
        XcError::Timeout { shader, timeout } => {
            assert_eq!(shader, "slowVertex");
            assert_eq!(timeout, Duration::from_millis(200));
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_finish_cleans_scratch_when_asked() {
    let (dir, translator) = translator_with(ECHO).await;
    let translator = translator.with_clean_scratch(true);
    let entry = ShaderEntry::new("unlit_ps", "x").unwrap();

    translator.translate(&entry, "x").await.unwrap();
    assert!(dir.path().join("tmp/unlit_ps_ps.glsl").exists());

    translator.finish().await.unwrap();
    assert!(!dir.path().join("tmp/unlit_ps.ps").exists());
    assert!(!dir.path().join("tmp/unlit_ps_ps.glsl").exists());
}

#[tokio::test]
async fn test_scratch_kept_by_default() {
    let (dir, translator) = translator_with(ECHO).await;
    let entry = ShaderEntry::new("unlit_ps", "x").unwrap();

    translator.translate(&entry, "x").await.unwrap();
    translator.finish().await.unwrap();
    assert!(dir.path().join("tmp/unlit_ps.ps").exists());
}
