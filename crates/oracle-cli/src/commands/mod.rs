pub mod catalog;
pub mod play;
pub mod simulate;

use std::path::Path;

use oracle_engine::EffectCatalog;

/// Load a catalog from a JSON file, or the built-in one when no path is given.
fn load_catalog(path: Option<&Path>) -> Result<EffectCatalog, String> {
    let Some(path) = path else {
        return Ok(EffectCatalog::builtin());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    EffectCatalog::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}
