//! Shared helpers for CLI commands: configuration discovery, architecture
//! path resolution, loading and diagnostic rendering.

use std::path::{Path, PathBuf};

use archsb_arch::{load_architecture, Architecture};
use archsb_config::{ArchsbConfig, CONFIG_FILE_NAME};
use archsb_diagnostics::{Diagnostic, DiagnosticRenderer, TerminalRenderer};
use archsb_source::SourceDb;

use crate::GlobalArgs;

/// Loads the configuration named by `--config`, else `./archsb.toml` if it
/// exists, else defaults.
///
/// Returns the configuration and the directory its relative paths refer to.
pub fn load_project_config(
    explicit: Option<&str>,
) -> Result<(ArchsbConfig, PathBuf), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    load_config_near(explicit.map(Path::new), &cwd)
}

fn load_config_near(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<(ArchsbConfig, PathBuf), Box<dyn std::error::Error>> {
    if let Some(path) = explicit {
        let config = archsb_config::load_config_file(path)?;
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        return Ok((config, base));
    }
    if cwd.join(CONFIG_FILE_NAME).is_file() {
        return Ok((archsb_config::load_config(cwd)?, cwd.to_path_buf()));
    }
    Ok((ArchsbConfig::default(), cwd.to_path_buf()))
}

/// Picks the architecture file: the command-line argument, else the one
/// configured in `archsb.toml`.
pub fn resolve_arch_path(
    arg: Option<&str>,
    global: &GlobalArgs,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(arg) = arg {
        return Ok(PathBuf::from(arg));
    }
    match &global.config.architecture.file {
        Some(file) => Ok(global.base_dir.join(file)),
        None => Err(format!(
            "no architecture file given; pass one or set `[architecture] file` in {CONFIG_FILE_NAME}"
        )
        .into()),
    }
}

/// Reads `path` into `source_db` and loads its switchblock sections.
///
/// A document-level failure (malformed XML, bad segment list) is returned as
/// a diagnostic so that it can be rendered with its location.
pub fn load_arch_file(
    path: &Path,
    source_db: &mut SourceDb,
) -> Result<Result<Architecture, Diagnostic>, Box<dyn std::error::Error>> {
    let file = source_db
        .load_file(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let text = &source_db.get_file(file).content;
    Ok(load_architecture(text, file).map_err(|e| e.to_diagnostic()))
}

/// Renders diagnostics to stderr. Returns how many were printed.
pub fn render_diagnostics(diagnostics: &[Diagnostic], source_db: &SourceDb, color: bool) -> usize {
    let renderer = TerminalRenderer::new(color);
    for diag in diagnostics {
        eprintln!("{}", renderer.render(diag, source_db));
    }
    diagnostics.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn global(config: ArchsbConfig, base_dir: &Path) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config,
            base_dir: base_dir.to_path_buf(),
        }
    }

    #[test]
    fn config_defaults_without_file() {
        let tmp = TempDir::new().unwrap();
        let (config, base) = load_config_near(None, tmp.path()).unwrap();
        assert!(config.architecture.file.is_none());
        assert_eq!(base, tmp.path());
    }

    #[test]
    fn config_from_working_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("archsb.toml"), "[check]\nchannel_widths = [12]\n").unwrap();
        let (config, _) = load_config_near(None, tmp.path()).unwrap();
        assert_eq!(config.check.channel_widths, [12]);
    }

    #[test]
    fn explicit_config_sets_base_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("ci");
        fs::create_dir(&dir).unwrap();
        let path = dir.join("custom.toml");
        fs::write(&path, "[architecture]\nfile = \"k4.xml\"\n").unwrap();

        let (config, base) = load_config_near(Some(&path), tmp.path()).unwrap();
        assert_eq!(base, dir);
        let global = global(config, &base);
        assert_eq!(resolve_arch_path(None, &global).unwrap(), dir.join("k4.xml"));
        assert_eq!(
            resolve_arch_path(Some("other.xml"), &global).unwrap(),
            PathBuf::from("other.xml")
        );
    }

    #[test]
    fn missing_explicit_config_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(load_config_near(Some(&tmp.path().join("nope.toml")), tmp.path()).is_err());
    }

    #[test]
    fn no_architecture_file_errors() {
        let tmp = TempDir::new().unwrap();
        let global = global(ArchsbConfig::default(), tmp.path());
        let err = resolve_arch_path(None, &global).unwrap_err();
        assert!(err.to_string().contains("no architecture file given"));
    }

    #[test]
    fn load_reports_xml_errors_as_diagnostics() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.xml");
        fs::write(&path, "<architecture>\n<switchblocklist>\n").unwrap();
        let mut db = SourceDb::new();
        let diag = load_arch_file(&path, &mut db).unwrap().unwrap_err();
        assert_eq!(diag.code.to_string(), "E316");
    }

    #[test]
    fn load_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let mut db = SourceDb::new();
        assert!(load_arch_file(&tmp.path().join("absent.xml"), &mut db).is_err());
    }
}
