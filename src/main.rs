//! Preview binary - resolves translations the way the site would
//!
//! Usage:
//!   site-i18n get hero.titleLine1 faq.items.0.question   # Look up keys in the active locale
//!   site-i18n languages                                   # List supported locales
//!   site-i18n set it                                      # Persist a new locale
//!   site-i18n validate                                    # Check catalog consistency
//!
//! Optional environment variables:
//! - SITE_I18N_LOCALES_DIR (defaults to the embedded documents)
//! - SITE_I18N_STORAGE_PATH (defaults to .site-i18n/preferences.json)
//! - SITE_I18N_STORAGE_KEY (defaults to fd-lang)
//! - SITE_I18N_FALLBACK (key | default, defaults to key)
//! - LC_ALL / LC_MESSAGES / LANG (language signal when nothing is persisted)

use anyhow::{bail, Result};
use site_i18n::config::Config;
use site_i18n::i18n::{CatalogValidator, Localizer, ProcessLanguage};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_i18n=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let mut i18n = Localizer::from_config(&config, &ProcessLanguage)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("languages");

    match command {
        "get" => {
            if args.len() < 2 {
                bail!("Usage: site-i18n get <key.path>...");
            }
            println!("locale: {}", i18n.locale());
            for path in &args[1..] {
                println!("{} = {}", path, i18n.t(path));
            }
            let report = i18n.metrics().report();
            if report.misses > 0 {
                warn!("{} of the requested keys have no translation", report.misses);
            }
        }
        "languages" => {
            let active = i18n.locale();
            for language in i18n.languages() {
                let marker = if language.code == active.code() { "*" } else { " " };
                println!("{} {} {} {}", marker, language.flag, language.code, language.name);
            }
        }
        "set" => {
            let Some(code) = args.get(1) else {
                bail!("Usage: site-i18n set <code>");
            };
            let previous = i18n.locale();
            let locale = i18n.set_locale_code(code)?;
            info!("Locale set: {} -> {}", previous, locale);
            println!("{}", i18n.t("nav.language"));
        }
        "validate" => {
            let report = CatalogValidator::validate(i18n.catalog());
            for warning in &report.warnings {
                println!("warning: {}", warning);
            }
            for error in &report.errors {
                println!("error: {}", error);
            }
            if report.has_errors() {
                bail!("Catalog has {} error(s)", report.errors.len());
            }
            println!(
                "Catalog OK ({} locales, {} warnings)",
                i18n.catalog().locales().len(),
                report.warnings.len()
            );
        }
        other => bail!(
            "Unknown command '{}' (expected get, languages, set or validate)",
            other
        ),
    }

    Ok(())
}
