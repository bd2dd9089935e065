//! `archsb check`: build, validate and probe every switchblock.
//!
//! 1. Resolve the architecture file (argument or `archsb.toml`)
//! 2. Parse it and read `<segmentlist>` and `<switchblocklist>`
//! 3. Validate each switchblock against the segment table
//! 4. Evaluate every permutation function at each configured channel width
//! 5. Render diagnostics

use archsb_arch::{check_permutation_formulas, check_switchblock, Architecture, SwitchblockError};
use archsb_diagnostics::{DiagnosticSink, Severity};
use archsb_source::SourceDb;

use crate::pipeline::{load_arch_file, render_diagnostics, resolve_arch_path};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs `archsb check`. Returns exit code 0 if no errors, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let path = resolve_arch_path(args.arch.as_deref(), global)?;
    let widths = probe_widths(args, global)?;
    let format = args
        .format
        .unwrap_or_else(|| global.config.output.format.into());

    if !global.quiet && format == ReportFormat::Text {
        eprintln!("   Checking {}", path.display());
    }

    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let summary = match load_arch_file(&path, &mut source_db)? {
        Ok(arch) => check_architecture(&arch, &widths, global, &sink),
        Err(diag) => {
            sink.emit(diag);
            Vec::new()
        }
    };

    let diagnostics = sink.diagnostics();
    let error_count = sink.count(Severity::Error);
    let warning_count = sink.count(Severity::Warning);

    match format {
        ReportFormat::Text => {
            render_diagnostics(&diagnostics, &source_db, global.color);
            if !global.quiet {
                eprintln!(
                    "   Result: {} error(s), {} warning(s)",
                    error_count, warning_count
                );
            }
        }
        ReportFormat::Json => {
            let switchblocks: Vec<_> = summary
                .iter()
                .map(|(name, ok)| serde_json::json!({ "name": name, "valid": ok }))
                .collect();
            let report = serde_json::json!({
                "file": path.display().to_string(),
                "switchblocks": switchblocks,
                "diagnostics": diagnostics,
                "errors": error_count,
                "warnings": warning_count,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if sink.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Channel widths from `--width`, else from `[check]`; none when probing is off.
fn probe_widths(args: &CheckArgs, global: &GlobalArgs) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    if args.no_probe || !global.config.check.probe_formulas {
        return Ok(Vec::new());
    }
    if !args.widths.is_empty() {
        if let Some(bad) = args.widths.iter().find(|&&w| w < 1) {
            return Err(format!("invalid channel width {bad}; widths must be at least 1").into());
        }
        return Ok(args.widths.clone());
    }
    // range-checked by the config loader
    Ok(global
        .config
        .check
        .channel_widths
        .iter()
        .filter_map(|&w| i32::try_from(w).ok())
        .collect())
}

/// Validates every switchblock, emitting one diagnostic per failing block.
///
/// Returns `(name, valid)` for every switchblock that could be built.
fn check_architecture(
    arch: &Architecture,
    widths: &[i32],
    global: &GlobalArgs,
    sink: &DiagnosticSink,
) -> Vec<(String, bool)> {
    let mut summary = Vec::new();
    for result in &arch.switchblocks {
        let spec = match result {
            Ok(spec) => spec,
            Err(err) => {
                sink.emit(err.to_diagnostic());
                continue;
            }
        };
        let outcome = check_switchblock(spec, &arch.segments).and_then(|()| {
            widths
                .iter()
                .try_for_each(|&w| check_permutation_formulas(spec, w))
        });
        if global.verbose && !global.quiet {
            eprintln!(
                "   Switchblock {} ({} wireconn(s), {} side pair(s)): {}",
                spec.name,
                spec.wireconns.len(),
                spec.permutation_map.len(),
                status(&outcome)
            );
        }
        summary.push((spec.name.clone(), outcome.is_ok()));
        if let Err(err) = outcome {
            sink.emit(
                err.to_diagnostic()
                    .with_note(format!("in switchblock '{}'", spec.name)),
            );
        }
    }
    summary
}

fn status(outcome: &Result<(), SwitchblockError>) -> &'static str {
    match outcome {
        Ok(()) => "ok",
        Err(_) => "FAILED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archsb_config::ArchsbConfig;
    use std::fs;
    use tempfile::TempDir;

    const ARCH: &str = r#"<architecture>
  <segmentlist><segment name="L4" length="4"/></segmentlist>
  <switchblocklist>
    <switchblock name="ok" directionality="bi">
      <wireconn num_conns_type="from" from_type="L4" to_type="L4" from_switchpoint="0,3" to_switchpoint="0,3"/>
      <switchfuncs><func type="lt" formula="W-1-t"/></switchfuncs>
    </switchblock>
    <switchblock name="half" directionality="bi">
      <switchfuncs><func type="lr" formula="t/(W-8)"/></switchfuncs>
    </switchblock>
  </switchblocklist>
</architecture>
"#;

    fn global(config: ArchsbConfig, dir: &TempDir) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config,
            base_dir: dir.path().to_path_buf(),
        }
    }

    fn args(arch: &str, widths: &[i32]) -> CheckArgs {
        CheckArgs {
            arch: Some(arch.to_string()),
            widths: widths.to_vec(),
            no_probe: false,
            format: Some(ReportFormat::Text),
        }
    }

    fn write_arch(dir: &TempDir) -> String {
        let path = dir.path().join("arch.xml");
        fs::write(&path, ARCH).unwrap();
        path.display().to_string()
    }

    #[test]
    fn structural_check_passes() {
        let dir = TempDir::new().unwrap();
        let arch = write_arch(&dir);
        let code = run(&args(&arch, &[]), &global(ArchsbConfig::default(), &dir)).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn probing_finds_division_by_zero() {
        let dir = TempDir::new().unwrap();
        let arch = write_arch(&dir);
        let global = global(ArchsbConfig::default(), &dir);
        assert_eq!(run(&args(&arch, &[4]), &global).unwrap(), 0);
        assert_eq!(run(&args(&arch, &[4, 8]), &global).unwrap(), 1);

        let mut no_probe = args(&arch, &[8]);
        no_probe.no_probe = true;
        assert_eq!(run(&no_probe, &global).unwrap(), 0);
    }

    #[test]
    fn widths_from_config() {
        let dir = TempDir::new().unwrap();
        let arch = write_arch(&dir);
        let config = archsb_config::load_config_from_str("[check]\nchannel_widths = [8]\n").unwrap();
        assert_eq!(run(&args(&arch, &[]), &global(config, &dir)).unwrap(), 1);
    }

    #[test]
    fn rejects_zero_width() {
        let dir = TempDir::new().unwrap();
        let arch = write_arch(&dir);
        assert!(run(&args(&arch, &[0]), &global(ArchsbConfig::default(), &dir)).is_err());
    }

    #[test]
    fn malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.xml");
        fs::write(&path, "<architecture>").unwrap();
        let code = run(
            &args(&path.display().to_string(), &[]),
            &global(ArchsbConfig::default(), &dir),
        )
        .unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn summary_marks_failures() {
        let arch = archsb_arch::load_architecture(ARCH, archsb_source::FileId::from_raw(0)).unwrap();
        let dir = TempDir::new().unwrap();
        let sink = DiagnosticSink::new();
        let summary = check_architecture(&arch, &[8], &global(ArchsbConfig::default(), &dir), &sink);
        assert_eq!(summary, [("ok".to_string(), true), ("half".to_string(), false)]);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.to_string(), "E315");
        assert_eq!(diags[0].notes, ["in switchblock 'half'"]);
    }
}
