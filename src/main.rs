use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use storefront_e2e::{Config, Runner, ScenarioId, Suite};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "End-to-end checks for the demo storefront and products API",
    long_about = None
)]
struct Args {
    /// Suite to run
    #[arg(short, long, value_enum, default_value_t = SuiteArg::All)]
    suite: SuiteArg,

    /// Run a single scenario by name (see --list)
    #[arg(long)]
    scenario: Option<String>,

    /// JSON configuration file
    #[arg(short, long, env = "E2E_CONFIG")]
    config: Option<PathBuf>,

    /// Write a JSON run report here
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Save screenshots of failed UI scenarios into this directory
    #[arg(short, long)]
    artifacts: Option<PathBuf>,

    /// Attach to a Chrome started with --remote-debugging-port instead of
    /// launching one (overrides E2E_DEBUG_PORT)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    debug_port: Option<u16>,

    /// List scenarios and exit
    #[arg(long)]
    list: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SuiteArg {
    Auth,
    Shop,
    Api,
    All,
}

impl SuiteArg {
    fn includes(&self, suite: Suite) -> bool {
        match self {
            SuiteArg::Auth => suite == Suite::Auth,
            SuiteArg::Shop => suite == Suite::Shop,
            SuiteArg::Api => suite == Suite::Api,
            SuiteArg::All => true,
        }
    }
}

/// Command-line settings win over the file and environment.
fn apply_overrides(args: &Args, config: &mut Config) {
    if let Some(port) = args.debug_port {
        config.browser.debug_port = Some(port);
    }
}

fn select(args: &Args) -> anyhow::Result<Vec<ScenarioId>> {
    if let Some(name) = &args.scenario {
        let id = ScenarioId::from_name(name).ok_or_else(|| {
            anyhow::anyhow!("Unknown scenario '{}'. Use --list to see them.", name)
        })?;
        return Ok(vec![id]);
    }
    Ok(ScenarioId::all()
        .iter()
        .copied()
        .filter(|id| args.suite.includes(id.suite()))
        .collect())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list {
        for id in ScenarioId::all() {
            println!("{:<6} {}", id.suite().name(), id.name());
        }
        return Ok(());
    }

    let mut config = Config::load(args.config.as_deref())?;
    apply_overrides(&args, &mut config);
    let ids = select(&args)?;
    log::info!(
        "Running {} scenario(s) against UI {} and API {}",
        ids.len(),
        config.ui_base_url,
        config.api_base_url
    );

    let mut runner = Runner::new(&config)?;
    if let Some(dir) = &args.artifacts {
        runner = runner.with_artifacts(dir);
    }
    let report = runner.run_all(&ids).await;

    for result in &report.results {
        match &result.error {
            None => println!("PASS  {} ({} ms)", result.scenario, result.duration_ms),
            Some(error) => println!(
                "FAIL  {} ({} ms): {}",
                result.scenario, result.duration_ms, error
            ),
        }
    }
    println!(
        "\n{} passed, {} failed ({:.0}%)",
        report.passed,
        report.failed,
        report.pass_rate()
    );

    if let Some(path) = &args.report {
        report.to_file(path).await?;
        log::info!("Report written to {}", path.display());
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
