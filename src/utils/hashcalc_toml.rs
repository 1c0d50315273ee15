//! Load `.hashcalc.toml` from the target directory (CLI only). Lib callers pass [`HashOpts`](crate::HashOpts) directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::engine::registry::HashAlgorithm;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct HashcalcToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    hash: Option<String>,
    file_pattern: Option<String>,
    workers: Option<usize>,
    out_file: Option<String>,
    rename: Option<bool>,
    display: Option<bool>,
    follow_links: Option<bool>,
    verbose: Option<bool>,
}

/// Parse settings from a TOML string.
pub fn parse_hashcalc_toml(s: &str) -> Result<HashcalcToml, toml::de::Error> {
    toml::from_str(s)
}

/// Load the settings file from `dir` if present. `Ok(None)` when there is no readable file;
/// a file that exists but does not parse is a configuration error.
pub fn load_hashcalc_toml(dir: &Path) -> Result<Option<HashcalcToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let Ok(s) = std::fs::read_to_string(&path) else {
        return Ok(None);
    };
    let file = parse_hashcalc_toml(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($s:expr, $opts:expr, $s_field:ident => $opts_field:ident) => {
        if let Some(v) = $s.$s_field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
/// Fails only on an unknown `hash` identifier.
pub fn apply_file_to_opts(file: &HashcalcToml, opts: &mut Opts) -> Result<()> {
    let s = &file.settings;
    if let Some(ref id) = s.hash {
        opts.algorithm = id.parse::<HashAlgorithm>()?;
    }
    apply_file_opt!(s, opts, file_pattern => file_pattern);
    if let Some(n) = s.workers {
        opts.num_workers = Some(n);
    }
    if let Some(ref p) = s.out_file {
        opts.out_file = Some(PathBuf::from(p));
    }
    apply_file_opt!(s, opts, rename => rename);
    apply_file_opt!(s, opts, display => display);
    apply_file_opt!(s, opts, follow_links => follow_links);
    apply_file_opt!(s, opts, verbose => verbose);
    Ok(())
}
