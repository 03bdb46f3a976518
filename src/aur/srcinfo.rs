//! Parser for `.SRCINFO` files
//!
//! `.SRCINFO` is a flat `key = value` listing generated from a PKGBUILD.
//! Only source entries are extracted.

use tracing::warn;

use crate::aur::types::BuildRecipe;

/// Extract the source entries of a `.SRCINFO` file
///
/// `source` entries come first in file order, followed by
/// architecture-specific `source_<arch>` entries in file order.
pub fn parse_srcinfo(content: &str) -> BuildRecipe {
    let mut sources = Vec::new();
    let mut arch_sources = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            warn!("Ignoring malformed .SRCINFO line {}: {}", index + 1, line);
            continue;
        };

        let key = key.trim();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        if key == "source" {
            sources.push(value.to_string());
        } else if key.starts_with("source_") {
            arch_sources.push(value.to_string());
        }
    }

    sources.extend(arch_sources);
    BuildRecipe { sources }
}
