//! Drives `convert` and `render` against stand-in shell scripts.
//! A real browser session is covered in `render_browser.rs`.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tidykit::convert::convert;
use tidykit::error::ToolError;
use tidykit::render::{render, RenderRequest};

const FAKE_SOFFICE: &str = r#"#!/bin/sh
while [ $# -gt 1 ]; do
  if [ "$1" = "--outdir" ]; then outdir="$2"; fi
  shift
done
base=$(basename "$1")
cp "$1" "$outdir/${base%.*}.pdf"
"#;

const FAILING_TOOL: &str = "#!/bin/sh\necho boom >&2\nexit 3\n";

const HANGING_TOOL: &str = "#!/bin/sh\nexec sleep 30\n";

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn request(browser: PathBuf, output: PathBuf, timeout: Duration) -> RenderRequest {
    RenderRequest {
        browser,
        html: "<h1>hello</h1>".to_string(),
        output,
        width: 320,
        height: 240,
        timeout,
        no_sandbox: true,
    }
}

// Spawning freshly written scripts from parallel tests can hit ETXTBSY,
// so every scenario runs from this one test.
#[test]
fn external_tools_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let soffice = script(tmp.path(), "soffice", FAKE_SOFFICE);
    let failing = script(tmp.path(), "failing", FAILING_TOOL);
    let hanging = script(tmp.path(), "hanging", HANGING_TOOL);

    // single document
    let input = tmp.path().join("Final Report.docx");
    fs::write(&input, b"document body").unwrap();
    let output = tmp.path().join("out/result.pdf");
    let written = convert(&soffice, &input, &output).unwrap();
    assert_eq!(written, vec![output.clone()]);
    assert_eq!(fs::read(&output).unwrap(), b"document body");

    // folder mode
    let folder = tmp.path().join("docs");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("a.docx"), b"a").unwrap();
    fs::write(folder.join("b.DOCX"), b"b").unwrap();
    fs::write(folder.join("notes.txt"), b"skip").unwrap();
    let written = convert(&soffice, &folder, Path::new("ignored.pdf")).unwrap();
    assert_eq!(written, vec![folder.join("a.pdf"), folder.join("b.pdf")]);
    assert!(!folder.join("notes.pdf").exists());

    // converter failure carries stderr
    match convert(&failing, &input, &output) {
        Err(ToolError::Failed { stderr, .. }) => assert_eq!(stderr, "boom"),
        other => panic!("expected failure, got {other:?}"),
    }

    // browser exits before opening a DevTools endpoint
    let shot = tmp.path().join("shot.png");
    let err = render(&request(failing.clone(), shot.clone(), Duration::from_secs(10))).unwrap_err();
    match err {
        ToolError::Browser { program, .. } => assert_eq!(program, failing),
        other => panic!("expected browser error, got {other:?}"),
    }
    assert!(!shot.exists());

    // browser never announces its endpoint
    let err = render(&request(
        hanging,
        tmp.path().join("never.png"),
        Duration::from_millis(300),
    ))
    .unwrap_err();
    assert!(matches!(err, ToolError::TimedOut { .. }));
}
