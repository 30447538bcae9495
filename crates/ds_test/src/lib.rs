//! Pipeline helpers shared by the golden-file harness.

use anyhow::Result;
use ds_ast::StripOptions;
use ds_parser::{emit_module, parse_source};
use ds_strip::eliminate_debug_blocks;

/// Environment the fixtures are stripped for.
pub const TARGET_ENV: &str = "production";

/// Parse, strip for `current_env`, and print `source`.
pub fn run_pipeline(source: &str, filename: &str, current_env: &str) -> Result<String> {
    let parsed = parse_source(source, filename)?;
    let options = StripOptions::new(TARGET_ENV);
    let module = eliminate_debug_blocks(parsed.module, &options, current_env);
    Ok(emit_module(&module, &parsed.source_map, false)?.code)
}

/// Parse and print `source` unchanged, so outputs compare without regard to
/// formatting.
pub fn normalize(source: &str, filename: &str) -> Result<String> {
    let parsed = parse_source(source, filename)?;
    Ok(emit_module(&parsed.module, &parsed.source_map, false)?.code)
}
