use anyhow::{Context, Result, bail};
use azel_rs::config::Config;
use azel_rs::context::{DEFAULT_TIMEZONE, KNOWN_TIMEZONES, ObservationContext};
use azel_rs::models::PlotImage;
use azel_rs::palette::{DEFAULT_COLORS, Palette};
use azel_rs::present::Presenter;
use azel_rs::{HttpPlotService, Orchestrator, Site, Store, TargetRegistry};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "azel",
    version,
    about = "Request azimuth/elevation charts for celestial targets from a plot service"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a plot request from the given context and targets and fetch the chart.
    Plot(PlotArgs),
    /// List known observing sites, timezones and the target color palette.
    Sites,
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// Observation date (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(short = 'd', long)]
    date: Option<String>,
    /// IANA timezone (e.g., Asia/Tokyo)
    #[arg(short = 'z', long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,
    /// Site identifier (omu1p85m, nanten2, nro45)
    #[arg(short, long, default_value_t = Site::default())]
    site: Site,
    /// Target as NAME or NAME:#rrggbb; repeat for several targets.
    #[arg(short, long = "target")]
    targets: Vec<String>,
    /// Start from an empty target list instead of the default Sun.
    #[arg(long, default_value_t = false)]
    clear_default: bool,
    /// Write the resulting PNG to this path.
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Plot service base URL (overrides AZEL_API_URL).
    #[arg(long)]
    api_url: Option<String>,
    /// Print the JSON request and exit without contacting the service.
    #[arg(long, default_value_t = false)]
    print_request: bool,
}

/// Prints notifications to stderr, the way a toast would show them.
struct CliPresenter;

impl Presenter for CliPresenter {
    fn notify_error(&self, message: &str) {
        eprintln!("error: {}", message);
    }

    fn show_image(&self, image: &PlotImage) {
        log::debug!("image updated (empty: {})", image.is_empty());
    }
}

/// Split `NAME[:#rrggbb]`. A trailing segment starting with `#` is taken as the
/// color even if malformed, so the registry can reject it.
fn parse_target(s: &str) -> (String, Option<String>) {
    if let Some((name, color)) = s.rsplit_once(':')
        && color.trim_start().starts_with('#')
    {
        return (name.trim().to_string(), Some(color.trim().to_string()));
    }
    (s.trim().to_string(), None)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid --date {:?}, expected YYYY-MM-DD", s))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plot(args) => cmd_plot(args),
        Command::Sites => {
            cmd_sites();
            Ok(())
        }
    }
}

fn cmd_sites() {
    println!("Sites:");
    for site in Site::ALL {
        println!("  {:<10} {}", site.id(), site.label());
    }
    println!("Timezones:");
    for tz in KNOWN_TIMEZONES {
        println!("  {}", tz);
    }
    println!("Palette: {}", DEFAULT_COLORS.join(" "));
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let mut config = Config::from_env().context("read configuration")?;
    if let Some(url) = args.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }

    let context = ObservationContext {
        date: Some(match args.date.as_deref() {
            Some(s) => parse_date(s)?,
            None => ObservationContext::default()
                .date
                .context("default date unavailable")?,
        }),
        timezone: Some(args.timezone.clone()),
        site: Some(args.site),
    };
    let registry = if args.clear_default {
        TargetRegistry::empty(Palette::default())
    } else {
        TargetRegistry::default()
    };

    let service = HttpPlotService::with_timeout(&config.api_url, config.timeout)
        .context("build http client")?;
    let mut orch = Orchestrator::new(Store::new(context, registry), Arc::new(service), CliPresenter);

    for raw in &args.targets {
        let (name, color) = parse_target(raw);
        // rejected targets are reported by the presenter and skipped
        let _ = match color {
            Some(c) => orch.add_target(&name, &c),
            None => orch.add_suggested_target(&name),
        };
    }

    if args.print_request {
        let request = orch
            .store()
            .plot_request()
            .context("nothing to plot: target list is empty")?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    orch.run_until_idle();

    let registry = orch.store().registry();
    println!("Targets ({}):", registry.len());
    for t in registry.targets() {
        println!("  {} {}", t.color, t.name);
    }

    let image = orch.current_image();
    if image.is_empty() {
        bail!("no plot image produced");
    }
    if let Some(path) = args.out.as_ref() {
        let png = image.decode()?;
        std::fs::write(path, &png).with_context(|| format!("write {}", path.display()))?;
        eprintln!("Wrote plot to {}", path.display());
    }
    Ok(())
}
