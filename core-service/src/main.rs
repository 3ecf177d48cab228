//! FinShield - Credit Risk Dashboard (command line entry point)

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use finshield_core::api::DashboardSession;
use finshield_core::constants;
use finshield_core::logic::analyzer::IndividualInput;
use finshield_core::logic::gateway::{GatewayConfig, HttpBackend};

#[derive(Parser)]
#[command(name = "finshield", version, about = "Borrower PD estimates from behavioral signals")]
struct Cli {
    /// Scoring service base URL (overrides FINSHIELD_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the feature list the scoring model requires
    Features,
    /// Heuristic PD for every row of the dataset
    Scores(SourceArgs),
    /// Score a user from the dataset with the remote model
    Analyze {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        user: String,
    },
    /// Assess an individual; unknown ids are scored locally
    Individual {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        form: IndividualArgs,
    },
    /// Write the dataset plus heuristic prediction columns as CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// CSV upload (header row required)
    #[arg(long, conflicts_with = "demo")]
    file: Option<PathBuf>,
    /// Use the built-in demo rows
    #[arg(long)]
    demo: bool,
}

#[derive(Args)]
struct IndividualArgs {
    #[arg(long)]
    user: String,
    #[arg(long)]
    age: Option<f64>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    employment_type: Option<String>,
    #[arg(long)]
    avg_recharge_amt: Option<f64>,
    #[arg(long)]
    recharge_freq: Option<f64>,
    #[arg(long)]
    sms_bank_count: Option<f64>,
    #[arg(long)]
    sms_otp_count: Option<f64>,
    #[arg(long)]
    sms_upi_count: Option<f64>,
    #[arg(long)]
    sms_fin_txn_count: Option<f64>,
    #[arg(long)]
    sms_promotional_count: Option<f64>,
    #[arg(long)]
    sms_other_count: Option<f64>,
}

impl From<IndividualArgs> for IndividualInput {
    fn from(args: IndividualArgs) -> Self {
        Self {
            user_id: args.user,
            age: args.age,
            location: args.location,
            employment_type: args.employment_type,
            avg_recharge_amt: args.avg_recharge_amt,
            recharge_freq: args.recharge_freq,
            sms_bank_count: args.sms_bank_count,
            sms_otp_count: args.sms_otp_count,
            sms_upi_count: args.sms_upi_count,
            sms_fin_txn_count: args.sms_fin_txn_count,
            sms_promotional_count: args.sms_promotional_count,
            sms_other_count: args.sms_other_count,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);

    let config = match cli.api_base {
        Some(base) => GatewayConfig::new(base),
        None => GatewayConfig::default(),
    };
    let mut session = DashboardSession::connect(config).map_err(anyhow::Error::msg)?;

    match cli.command {
        Command::Features => {
            print_json(&session.get_required_features().await)?;
        }
        Command::Scores(source) => {
            load_source(&mut session, &source, true)?;
            print_json(&session.get_heuristic_scores())?;
        }
        Command::Analyze { source, user } => {
            load_source(&mut session, &source, true)?;
            let outcome = session
                .analyze_user(Some(&user))
                .await
                .map_err(anyhow::Error::msg)?;
            print_json(&outcome)?;
        }
        Command::Individual { source, form } => {
            load_source(&mut session, &source, false)?;
            let outcome = session
                .analyze_individual(&form.into())
                .await
                .map_err(anyhow::Error::msg)?;
            print_json(&outcome)?;
        }
        Command::Export { source, out } => {
            load_source(&mut session, &source, true)?;
            let out = out.unwrap_or_else(default_export_path);
            let count = session.export_dataset(&out).map_err(anyhow::Error::msg)?;
            println!("Exported {} rows to {}", count, out.display());
        }
    }

    Ok(())
}

fn load_source(
    session: &mut DashboardSession<HttpBackend>,
    source: &SourceArgs,
    required: bool,
) -> Result<()> {
    if let Some(path) = &source.file {
        session
            .load_csv(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading {}", path.display()))?;
    } else if source.demo {
        session.load_demo();
    } else if required {
        bail!("pass --file <CSV> or --demo");
    }
    Ok(())
}

fn default_export_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("finshield_export_{}.csv", stamp))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
