//! Document-to-PDF conversion through an external LibreOffice install.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::ToolError;

/// Convert `input` into `output` with the converter at `soffice`.
///
/// When `input` is a directory every `.docx` inside it is converted next to
/// its source and `output` is ignored. Returns the PDFs written.
pub fn convert(soffice: &Path, input: &Path, output: &Path) -> Result<Vec<PathBuf>, ToolError> {
    if input.is_dir() {
        return convert_folder(soffice, input);
    }
    if !input.exists() {
        return Err(ToolError::Io {
            path: input.to_path_buf(),
            error: std::io::ErrorKind::NotFound.into(),
        });
    }

    // soffice picks the output name itself, so convert into a scratch
    // directory and move the result into place.
    let scratch = tempfile::tempdir().map_err(|error| ToolError::Io {
        path: std::env::temp_dir(),
        error,
    })?;
    let produced = run_soffice(soffice, input, scratch.path())?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| ToolError::Io {
            path: parent.to_path_buf(),
            error,
        })?;
    }
    fs::copy(&produced, output).map_err(|error| ToolError::Io {
        path: output.to_path_buf(),
        error,
    })?;
    info!("Converted {} -> {}", input.display(), output.display());
    Ok(vec![output.to_path_buf()])
}

fn convert_folder(soffice: &Path, dir: &Path) -> Result<Vec<PathBuf>, ToolError> {
    let read_dir = fs::read_dir(dir).map_err(|error| ToolError::Io {
        path: dir.to_path_buf(),
        error,
    })?;

    let mut sources: Vec<PathBuf> = read_dir
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_docx(p))
        .collect();
    sources.sort();

    let mut written = Vec::with_capacity(sources.len());
    for source in sources {
        written.push(run_soffice(soffice, &source, dir)?);
    }
    Ok(written)
}

fn run_soffice(soffice: &Path, input: &Path, outdir: &Path) -> Result<PathBuf, ToolError> {
    debug!("Running {} on {}", soffice.display(), input.display());
    let out = Command::new(soffice)
        .args(soffice_args(input, outdir))
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ToolError::from_spawn(soffice, e))?;

    if !out.status.success() {
        return Err(ToolError::Failed {
            program: soffice.to_path_buf(),
            status: out.status.to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }

    let produced = pdf_name(input, outdir);
    if !produced.exists() {
        return Err(ToolError::NoOutput { path: produced });
    }
    Ok(produced)
}

fn soffice_args(input: &Path, outdir: &Path) -> Vec<OsString> {
    vec![
        "--headless".into(),
        "--convert-to".into(),
        "pdf".into(),
        "--outdir".into(),
        outdir.as_os_str().to_owned(),
        input.as_os_str().to_owned(),
    ]
}

/// Where soffice writes the PDF for `input` when told to use `outdir`.
fn pdf_name(input: &Path, outdir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".pdf");
    outdir.join(name)
}

fn is_docx(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("docx"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_put_input_last() {
        let args = soffice_args(Path::new("in/report.docx"), Path::new("/tmp/out"));
        assert_eq!(args.last().unwrap(), "in/report.docx");
        assert_eq!(args[0], "--headless");
        let pos = args.iter().position(|a| a == "--outdir").unwrap();
        assert_eq!(args[pos + 1], "/tmp/out");
    }

    #[test]
    fn pdf_name_swaps_extension() {
        assert_eq!(
            pdf_name(Path::new("docs/Final Report.docx"), Path::new("/out")),
            PathBuf::from("/out/Final Report.pdf")
        );
    }

    #[test]
    fn docx_detection_ignores_case() {
        assert!(is_docx(Path::new("a.DOCX")));
        assert!(!is_docx(Path::new("a.doc")));
        assert!(!is_docx(Path::new("docx")));
    }

    #[test]
    fn missing_input_is_reported_before_spawning() {
        let tmp = tempfile::tempdir().unwrap();
        let err = convert(
            Path::new("no-such-soffice"),
            &tmp.path().join("missing.docx"),
            &tmp.path().join("out.pdf"),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
    }

    #[test]
    fn missing_converter_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("a.docx");
        fs::write(&input, b"doc").unwrap();
        let err = convert(
            &tmp.path().join("no-such-soffice"),
            &input,
            &tmp.path().join("out.pdf"),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::MissingBinary { .. }));
    }
}
