use std::io::Write;

use recfile_config::OutputConfig;
use serde::Serialize;

pub fn format_already_exists(id: &str) -> String {
    format!("Item with id {} already exists", id)
}

pub fn format_not_found(id: &str) -> String {
    format!("Item with id {} not found", id)
}

pub fn render_json<T: Serialize + ?Sized>(
    value: &T,
    options: &OutputConfig,
) -> Result<Vec<u8>, serde_json::Error> {
    if options.pretty {
        serde_json::to_vec_pretty(value)
    } else {
        serde_json::to_vec(value)
    }
}

/// Writes `bytes` to the sink unchanged. Empty payloads write nothing at all,
/// not even the configured trailing newline.
pub fn emit(out: &mut dyn Write, bytes: &[u8], options: &OutputConfig) -> std::io::Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    out.write_all(bytes)?;
    if options.trailing_newline {
        out.write_all(b"\n")?;
    }
    Ok(())
}
