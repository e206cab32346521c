// SPDX-License-Identifier: PMPL-1.0-or-later

//! mies-i18n: resolve translation keys, format values and manage the
//! persisted language choice from the command line.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use mies_i18n::config::MiesConfig;
use mies_i18n::format::{self, DateStyle, ListType, NumberKind, NumberOptions};
use mies_i18n::language::{DocumentLocale, LanguageSelection};
use mies_i18n::report::{self, ReportOutputFormat};
use mies_i18n::resolve::{interpolate, resolve_detailed, Resolution};
use mies_i18n::{loader, telemetry, TranslatedContent};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mies-i18n")]
#[command(version)]
#[command(about = "Translation lookup, locale formatting and language selection for mies")]
#[command(long_about = None)]
struct Cli {
    /// Config file (YAML or JSON); falls back to $MIES_CONFIG
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a dotted translation key
    Resolve {
        /// Key such as `demo.lang`
        #[arg(value_name = "KEY")]
        key: String,

        /// Language to resolve in (default: active language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Fallback language (default: from config)
        #[arg(short, long)]
        fallback: Option<String>,

        /// Translation file or directory (default: from config)
        #[arg(long)]
        content: Option<PathBuf>,

        /// Placeholder values as NAME=VALUE
        #[arg(short = 'a', long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,

        /// Exit with an error when the key is missing everywhere
        #[arg(long)]
        strict: bool,
    },

    /// Format a value for a language
    Format {
        /// Language code (default: active language)
        #[arg(short, long, global = true)]
        lang: Option<String>,

        #[command(subcommand)]
        kind: FormatCommand,
    },

    /// Show, list or change the active language
    Lang {
        #[command(subcommand)]
        action: LangCommand,
    },

    /// Report keys missing from each language
    Audit {
        /// Translation file or directory (default: from config)
        #[arg(long)]
        content: Option<PathBuf>,

        /// Reference language (default: fallback language)
        #[arg(short, long)]
        reference: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ReportOutputFormat,

        /// Exit with an error if any language is incomplete
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Subcommand)]
enum FormatCommand {
    /// Format a number
    Number {
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,

        #[arg(short, long, value_enum, default_value = "decimal")]
        kind: NumberKind,

        /// ISO 4217 currency code
        #[arg(long)]
        currency: Option<String>,

        #[arg(long = "min-fraction")]
        min_fraction: Option<u8>,

        #[arg(long = "max-fraction")]
        max_fraction: Option<u8>,
    },

    /// Format a date (RFC 3339 or YYYY-MM-DD)
    Date {
        #[arg(value_name = "VALUE")]
        value: String,

        #[arg(short, long, value_enum, default_value = "medium")]
        style: DateStyle,

        /// UTC or a fixed offset such as +07:00
        #[arg(short = 'z', long = "time-zone")]
        time_zone: Option<String>,
    },

    /// Join items into a list
    List {
        #[arg(value_name = "ITEM")]
        items: Vec<String>,

        #[arg(short = 't', long = "type", value_enum, default_value = "conjunction")]
        list_type: ListType,
    },
}

#[derive(Subcommand)]
enum LangCommand {
    /// Print the active language
    Show,
    /// List the language catalog
    List,
    /// Persist a new active language
    Set {
        #[arg(value_name = "CODE")]
        code: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = MiesConfig::discover(cli.config.as_deref()).context("loading configuration")?;

    let filter = if cli.verbose {
        "mies_i18n=debug".to_string()
    } else {
        config.log_filter.clone()
    };
    telemetry::initialise(&filter)?;

    let selection = LanguageSelection::initialize(
        config.catalog()?,
        config.preference_store(),
        DocumentLocale::new(),
    );

    match cli.command {
        Commands::Resolve {
            key,
            lang,
            fallback,
            content,
            args,
            strict,
        } => {
            let content = load_content(content.as_deref(), &config)?;
            let lang = lang.unwrap_or_else(|| selection.current_code());
            let fallback = fallback.unwrap_or_else(|| config.fallback_language.clone());
            let pairs = parse_args(&args)?;
            let borrowed: Vec<(&str, &str)> =
                pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

            let resolution = resolve_detailed(&key, &content, &lang, &fallback);
            println!("{}", interpolate(resolution.text(), &borrowed));
            match resolution {
                Resolution::Fallback(_) => {
                    eprintln!("{} served from fallback language {}", "note:".yellow(), fallback)
                }
                Resolution::Missing(_) => {
                    eprintln!("{} no translation for {}", "warning:".red(), key);
                    if strict {
                        bail!("translation missing: {key}");
                    }
                }
                Resolution::Current(_) => {}
            }
        }

        Commands::Format { lang, kind } => {
            let lang = lang.unwrap_or_else(|| selection.current_code());
            let output = match kind {
                FormatCommand::Number {
                    value,
                    kind,
                    currency,
                    min_fraction,
                    max_fraction,
                } => {
                    // Unparseable input is treated like a missing value.
                    let parsed = value.trim().parse::<f64>().ok();
                    let options = NumberOptions {
                        currency,
                        minimum_fraction_digits: min_fraction,
                        maximum_fraction_digits: max_fraction,
                    };
                    format::format_number(parsed, &lang, kind, &options)
                }
                FormatCommand::Date {
                    value,
                    style,
                    time_zone,
                } => format::format_date(value, &lang, style, time_zone.as_deref()),
                FormatCommand::List { items, list_type } => {
                    format::format_list(&items, &lang, list_type)
                }
            };
            println!("{}", output);
        }

        Commands::Lang { action } => match action {
            LangCommand::Show => {
                let current = selection.current();
                println!("{} {} ({})", current.flag, current.label, current.code);
            }
            LangCommand::List => {
                let current = selection.current_code();
                for language in selection.catalog().languages() {
                    let marker = if language.code == current { "*" } else { " " };
                    println!(
                        "{} {:<4} {} {} [{}]",
                        marker,
                        language.code,
                        language.flag,
                        language.label,
                        format::locale_tag(&language.code)
                    );
                }
            }
            LangCommand::Set { code } => {
                if !selection.set_code(&code) {
                    let known: Vec<&str> = selection
                        .catalog()
                        .languages()
                        .iter()
                        .map(|l| l.code.as_str())
                        .collect();
                    bail!("unknown language {code}; expected one of {}", known.join(", "));
                }
                println!("{} {}", "Active language:".green(), selection.current_code());
            }
        },

        Commands::Audit {
            content,
            reference,
            format,
            strict,
        } => {
            let content = load_content(content.as_deref(), &config)?;
            let reference = reference.unwrap_or_else(|| config.fallback_language.clone());
            let report = report::coverage(&content, &reference);
            println!("{}", format.serialize(&report)?);
            if strict && !report.is_complete() {
                bail!("translation coverage incomplete");
            }
        }
    }

    Ok(())
}

fn load_content(explicit: Option<&Path>, config: &MiesConfig) -> Result<TranslatedContent> {
    let path = explicit
        .or(config.content.as_deref())
        .ok_or_else(|| anyhow!("no translation content given; pass --content or set `content` in the config"))?;
    loader::load_path(path).with_context(|| format!("loading translations from {}", path.display()))
}

fn parse_args(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(name, value)| (name.trim().to_string(), value.to_string()))
                .ok_or_else(|| anyhow!("placeholder argument must be NAME=VALUE: {arg}"))
        })
        .collect()
}
