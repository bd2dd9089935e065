//! `archsb dump`: print the parsed segments and switchblocks as JSON.

use archsb_arch::SwitchblockSpec;
use archsb_source::SourceDb;

use crate::pipeline::{load_arch_file, render_diagnostics, resolve_arch_path};
use crate::{DumpArgs, GlobalArgs};

/// Runs `archsb dump`.
///
/// Switchblocks that fail to build are left out of the JSON and reported on
/// stderr; the exit code is then 1.
pub fn run(args: &DumpArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let path = resolve_arch_path(args.arch.as_deref(), global)?;
    let mut source_db = SourceDb::new();

    let arch = match load_arch_file(&path, &mut source_db)? {
        Ok(arch) => arch,
        Err(diag) => {
            render_diagnostics(&[diag], &source_db, global.color);
            return Ok(1);
        }
    };

    let failures: Vec<_> = arch
        .switchblocks
        .iter()
        .filter_map(|sb| sb.as_ref().err())
        .map(|err| err.to_diagnostic())
        .collect();
    let switchblocks: Vec<&SwitchblockSpec> = arch.valid_switchblocks().collect();

    let report = serde_json::json!({
        "segments": arch.segments,
        "switchblocks": switchblocks,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if failures.is_empty() {
        Ok(0)
    } else {
        render_diagnostics(&failures, &source_db, global.color);
        Ok(1)
    }
}
