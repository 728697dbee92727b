use std::fmt::Write as _;
use std::path::Path;

use eyre::eyre;

use abx_breakpoints::{Method, Setup, SetupCatalog, classify, resolve_breakpoint};
use abx_calc::{
    ClusterKey, recalculate, reject, reportable_antibiotics, update_cluster_antibiotics,
};
use abx_core::{AstAnalysis, Role};

use crate::cli::{ClusterArgs, Commands, MeasurementKind};
use crate::config::{self, AbxConfig};
use crate::workbook::Workbook;

/// Run a subcommand and return what it prints.
pub fn run(command: Commands, config: &AbxConfig, config_path: &Path) -> eyre::Result<String> {
    match command {
        Commands::ValidateSetup { setup } => validate_setup(&setup),
        Commands::Classify {
            setup,
            table,
            microorganism,
            antibiotic,
            method,
            value,
        } => classify_value(&setup, &table, &microorganism, &antibiotic, method, &value),
        Commands::Recalc {
            workbook,
            analysis,
            output,
        } => {
            let mut book = open(&workbook, config)?;
            book.with_cluster_of(&analysis, |cluster, setup| {
                recalculate(cluster, &analysis, setup)
            })?;
            book.save(&output.unwrap_or(workbook))?;
            Ok(format!("recalculated cluster of {analysis}\n"))
        }
        Commands::Reject {
            workbook,
            cluster,
            antibiotics,
            output,
        } => {
            let mut book = open(&workbook, config)?;
            let uids = book.antibiotic_uids(&antibiotics)?;
            let flagged = book.with_cluster(&key(&cluster), |cluster, _| {
                reject(cluster, &uids, &config.actor)
            })?;
            book.save(&output.unwrap_or(workbook))?;
            Ok(format!("{flagged} results flagged as not tested\n"))
        }
        Commands::Assign {
            workbook,
            cluster,
            antibiotics,
            output,
        } => {
            let mut book = open(&workbook, config)?;
            let uids = book.antibiotic_uids(&antibiotics)?;
            let updated = book.with_cluster(&key(&cluster), |cluster, setup| {
                update_cluster_antibiotics(cluster, &uids, setup)
            })?;
            book.save(&output.unwrap_or(workbook))?;
            Ok(format!("{} analyses updated\n", updated.len()))
        }
        Commands::Show { workbook, cluster } => {
            let mut book = open(&workbook, config)?;
            show(&mut book, &key(&cluster), &config.label_separator)
        }
        Commands::Config { init } => show_config(config, config_path, init),
    }
}

fn key(args: &ClusterArgs) -> ClusterKey {
    ClusterKey::new(&args.sample, &args.microorganism)
}

fn open(path: &Path, config: &AbxConfig) -> eyre::Result<Workbook> {
    let mut book = Workbook::load(path)?;
    book.set_actor(&config.actor);
    Ok(book)
}

fn validate_setup(path: &Path) -> eyre::Result<String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre!("failed to read setup at {}: {e}", path.display()))?;
    let setup = Setup::from_json(&contents)?;
    Ok(format!(
        "setup ok: {} antibiotics, {} microorganisms, {} breakpoints tables\n",
        setup.antibiotics.len(),
        setup.microorganisms.len(),
        setup.breakpoints_tables.len(),
    ))
}

fn classify_value(
    setup: &Path,
    table: &str,
    microorganism: &str,
    antibiotic: &str,
    method: MeasurementKind,
    value: &str,
) -> eyre::Result<String> {
    let contents = std::fs::read_to_string(setup)
        .map_err(|e| eyre!("failed to read setup at {}: {e}", setup.display()))?;
    let setup = Setup::from_json(&contents)?;

    let table = setup
        .breakpoints_table_by_ref(table)
        .ok_or_else(|| eyre!("unknown breakpoints table: {table}"))?;
    let organism = setup
        .microorganism_by_name(microorganism)
        .ok_or_else(|| eyre!("unknown microorganism: {microorganism}"))?;
    let antibiotic = setup
        .antibiotic_by_abbreviation(antibiotic)
        .ok_or_else(|| eyre!("unknown antibiotic: {antibiotic}"))?;

    let method = match method {
        MeasurementKind::Zone => Method::ZoneDiameter,
        MeasurementKind::Mic => Method::Mic,
    };
    let breakpoint = resolve_breakpoint(Some(table), Some(organism), Some(antibiotic.uid));
    match classify(value, breakpoint, method) {
        Some(category) => Ok(format!("{category}\n")),
        None => Ok("-\n".to_string()),
    }
}

fn show(book: &mut Workbook, key: &ClusterKey, separator: &str) -> eyre::Result<String> {
    let mut out = String::new();
    for analysis in book.cluster(key) {
        let label = analysis
            .role()
            .map(|role| role.analysis_title(&key.microorganism))
            .unwrap_or_else(|| analysis.keyword.clone());
        writeln!(out, "{} [{}]", label, analysis.id)?;
        for field in &analysis.interim_fields {
            let mirror = if field.is_extrapolated() { " *" } else { "" };
            writeln!(
                out,
                "  {:<8} {}{}",
                field.keyword,
                field.display_text(separator),
                mirror
            )?;
        }
    }

    let reportable = book.with_cluster(key, |cluster, _| {
        let group = cluster.group()?;
        Ok(reportable_antibiotics(&group))
    })?;
    let sensitivity = Role::Resistance.settings().choices.parse::<abx_core::Choices>()?;
    let reported: Vec<String> = reportable
        .iter()
        .map(|(keyword, code)| {
            format!("{keyword}={}", sensitivity.label(code).unwrap_or(code.as_str()))
        })
        .collect();
    writeln!(out, "reportable: {}", reported.join(separator))?;
    Ok(out)
}

fn show_config(config: &AbxConfig, path: &Path, init: bool) -> eyre::Result<String> {
    let mut out = String::new();
    if init {
        if path.exists() {
            writeln!(out, "config exists at {}", path.display())?;
        } else {
            config::save_config(config, path)?;
            writeln!(out, "config written to {}", path.display())?;
        }
    }
    writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
    Ok(out)
}
