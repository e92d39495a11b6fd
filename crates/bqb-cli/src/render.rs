use crate::cli::{CheckArgs, RenderArgs};
use crate::definition::DefinitionFile;
use bqb::{BuildConfig, BuiltQuery};
use std::fmt::Write as _;

fn build_definition(def: &DefinitionFile) -> anyhow::Result<BuiltQuery> {
    let root = def.root()?;
    let params = def.params()?;
    // The CLI prints the SQL itself; only log it untruncated at trace level.
    let config = BuildConfig::new()
        .level(tracing::Level::TRACE)
        .no_truncate();
    Ok(bqb::build_with_config(&config, &*root, params)?)
}

/// Build a definition and format it for display.
///
/// Plain output is the SQL (without its leading newline) followed by one
/// `-- @name TYPE = value` comment line per parameter. JSON output is the
/// serialized [`BuiltQuery`].
pub fn render_output(def: &DefinitionFile, json: bool) -> anyhow::Result<String> {
    let built = build_definition(def)?;

    if json {
        return Ok(serde_json::to_string_pretty(&built)?);
    }

    let mut out = built.sql.trim_start_matches('\n').to_string();
    if !built.params.is_empty() {
        out.push_str("\n\n-- params:");
        for p in &built.params {
            let _ = write!(out, "\n-- @{} {} = {}", p.name, p.value.type_name(), p.value);
        }
    }
    Ok(out)
}

pub fn run_render(args: RenderArgs) -> anyhow::Result<()> {
    let def = DefinitionFile::load(&args.file)?;
    let out = render_output(&def, args.json)
        .map_err(|e| anyhow::anyhow!("{}: {e:#}", args.file.display()))?;
    println!("{out}");
    Ok(())
}

pub fn run_check(args: CheckArgs) -> anyhow::Result<()> {
    for file in &args.files {
        let def = DefinitionFile::load(file)?;
        let built = build_definition(&def)
            .map_err(|e| anyhow::anyhow!("{}: {e:#}", file.display()))?;
        tracing::debug!(file = %file.display(), params = built.params.len(), "definition ok");
        println!("ok: {}", file.display());
    }
    Ok(())
}
