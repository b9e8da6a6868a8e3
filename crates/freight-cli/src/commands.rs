use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info_span;

use freight_cli::report::{
    DashboardOptions, build_comparison, build_dashboard, build_inspect, build_mappings, load_table,
};
use freight_cli::settings::{SettingsSources, load_settings};
use freight_model::DashboardConfig;
use freight_standards::{config_to_toml, default_config};

use crate::cli::{Cli, CompareArgs, ConfigArgs, DashboardArgs, InputArgs, InspectArgs, NormalizeArgs};
use crate::summary::{print_comparison, print_dashboard, print_inspect, print_mappings};

fn settings_for(cli: &Cli, input: &InputArgs) -> Result<DashboardConfig> {
    load_settings(&SettingsSources {
        config: cli.config.as_deref(),
        aliases: cli.aliases.as_deref(),
        column_match: input.column_match.map(Into::into),
        company_match: input.company_match.map(Into::into),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{text}");
    Ok(())
}

pub fn run_inspect(cli: &Cli, args: &InspectArgs) -> Result<()> {
    let _span = info_span!("inspect", file = %args.input.file.display()).entered();
    let config = settings_for(cli, &args.input)?;
    let df = load_table(&args.input.file)?;
    let report = build_inspect(&df, &config, args.rows)?;
    print_inspect(&report);
    Ok(())
}

pub fn run_normalize(cli: &Cli, args: &NormalizeArgs) -> Result<()> {
    let _span = info_span!("normalize", file = %args.input.file.display()).entered();
    let config = settings_for(cli, &args.input)?;
    let df = load_table(&args.input.file)?;
    let mappings = build_mappings(&df, &config)?;
    if args.json {
        print_json(&mappings)
    } else {
        print_mappings(&mappings);
        Ok(())
    }
}

pub fn run_dashboard(cli: &Cli, args: &DashboardArgs) -> Result<()> {
    let _span = info_span!("dashboard", file = %args.input.file.display()).entered();
    let config = settings_for(cli, &args.input)?;
    let df = load_table(&args.input.file)?;
    let options = DashboardOptions {
        date: args.date,
        companies: args.companies.clone(),
        require: args.require.clone(),
        top: args.top,
    };
    let report = build_dashboard(&df, &config, &options)?;
    if args.json {
        print_json(&report)
    } else {
        print_dashboard(&report);
        Ok(())
    }
}

pub fn run_compare(cli: &Cli, args: &CompareArgs) -> Result<()> {
    let _span = info_span!("compare", file = %args.input.file.display()).entered();
    let config = settings_for(cli, &args.input)?;
    let df = load_table(&args.input.file)?;
    let comparison = build_comparison(&df, &config, args.product.as_deref(), args.today)?;
    if args.json {
        print_json(&comparison)
    } else {
        print_comparison(&comparison);
        Ok(())
    }
}

pub fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    let config = if args.default {
        default_config().context("load built-in config")?
    } else {
        load_settings(&SettingsSources {
            config: cli.config.as_deref(),
            aliases: cli.aliases.as_deref(),
            ..SettingsSources::default()
        })?
    };
    print!("{}", config_to_toml(&config).context("serialize config")?);
    Ok(())
}
