use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use nis_transform::{DatasetRegistry, clean_dataset};
use nis_validate::{ValidationReport, validate};
use tracing::{info, info_span};

use crate::cli::{CleanArgs, DatasetsArgs};
use crate::io::{read_raw_csv, write_csv};
use crate::summary::apply_table_style;

/// Result of one `clean` run.
#[derive(Debug)]
pub struct CleanOutcome {
    pub dataset: String,
    pub input_rows: usize,
    pub output_rows: usize,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub report: ValidationReport,
}

/// Built-in registry, or the one defined in `path`.
pub fn load_registry(path: Option<&Path>) -> Result<Cow<'static, DatasetRegistry>> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read registry {}", path.display()))?;
            let registry = DatasetRegistry::from_json_str(&json)
                .with_context(|| format!("load registry {}", path.display()))?;
            Ok(Cow::Owned(registry))
        }
        None => Ok(Cow::Borrowed(DatasetRegistry::builtin()?)),
    }
}

fn default_output(input: &Path, dataset: &str) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{dataset}_clean.csv"))
}

pub fn run_datasets(args: &DatasetsArgs) -> Result<()> {
    let registry = load_registry(args.registry.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec!["Dataset", "Steps"]);
    apply_table_style(&mut table);
    for pipeline in registry.pipelines() {
        table.add_row(vec![
            pipeline.id().to_string(),
            pipeline.step_names().join(" → "),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanOutcome> {
    let registry = load_registry(args.registry.as_deref())?;
    let pipeline = registry.get(&args.dataset)?;
    let span = info_span!("clean", dataset = %args.dataset);
    let _guard = span.enter();
    let start = Instant::now();

    let raw = read_raw_csv(&args.input)?;
    let input_rows = raw.height();
    let mut clean = clean_dataset(raw, pipeline)
        .with_context(|| format!("clean dataset `{}`", args.dataset))?;
    let report = validate(&args.dataset, &clean, args.validation)?;

    let output = if args.dry_run {
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output(&args.input, &args.dataset));
        write_csv(&mut clean, &path)?;
        Some(path)
    };
    info!(
        input_rows,
        output_rows = clean.height(),
        problems = report.len(),
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );

    Ok(CleanOutcome {
        dataset: args.dataset.clone(),
        input_rows,
        output_rows: clean.height(),
        output,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_next_to_input() {
        assert_eq!(
            default_output(Path::new("data/raw.csv"), "ker6-gs6z"),
            PathBuf::from("data/ker6-gs6z_clean.csv")
        );
    }
}
