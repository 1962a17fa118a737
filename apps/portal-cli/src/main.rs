use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use shared_config::AppConfig;
use shared_models::auth::{AUTH_TOKEN_KEY, TOKEN_TYPE_KEY};
use shared_models::Locale;
use shared_utils::{InMemoryStore, Translator};

#[derive(Parser)]
#[command(name = "clinic-portal")]
#[command(about = "Patient portal: find doctors, get checkup recommendations, book appointments")]
struct Cli {
    /// Interface language: ru, uz or en
    #[arg(short, long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List medical specializations
    Specializations,
    /// List doctors of a specialization
    Doctors {
        /// Specialization name as shown on the site
        #[arg(short, long)]
        specialty: String,
    },
    /// List the symptoms that can be picked for recommendations
    Symptoms,
    /// Recommend checkups for up to three symptoms
    Recommend {
        /// Symptom names; a fourth one is ignored
        symptoms: Vec<String>,
    },
    /// Book a doctor, an analysis or a checkup
    Book {
        /// doctor, analysis or checkup
        #[arg(long)]
        service: String,
        /// Specialization (doctor) or analysis/checkup name
        #[arg(long)]
        target: String,
        /// Doctor UUID; defaults to the first doctor listed
        #[arg(long)]
        doctor: Option<uuid::Uuid>,
        /// yyyy-mm-dd; defaults to today
        #[arg(long)]
        date: Option<String>,
        /// HH:MM
        #[arg(long)]
        time: Option<String>,
        /// primary or secondary (doctor visits only)
        #[arg(long, default_value = "primary")]
        kind: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// Consent to personal data processing
        #[arg(long)]
        consent: bool,
    },
    /// Appointments of the signed-in patient
    Appointments,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let default_locale: Locale = config.default_locale.parse().unwrap_or_default();
    let locale = match cli.locale.as_deref() {
        Some(code) => code.parse()?,
        None => default_locale,
    };

    info!("Clinic portal using {} at {}", locale, config.api_base_url);

    // The session is written by the site's login flow; here it comes from the environment.
    let store = InMemoryStore::new();
    if let Ok(token) = std::env::var("CLINIC_AUTH_TOKEN") {
        store.set(AUTH_TOKEN_KEY, &token);
        store.set(
            TOKEN_TYPE_KEY,
            &std::env::var("CLINIC_TOKEN_TYPE").unwrap_or_else(|_| "Bearer".to_string()),
        );
    }

    let ctx = commands::Context {
        config,
        locale,
        translator: Arc::new(Translator::builtin(default_locale)),
        store: Arc::new(store),
    };

    match cli.command {
        Commands::Specializations => commands::specializations(&ctx).await,
        Commands::Doctors { specialty } => commands::doctors(&ctx, &specialty).await,
        Commands::Symptoms => {
            commands::symptoms(&ctx);
            Ok(())
        }
        Commands::Recommend { symptoms } => commands::recommend(&ctx, &symptoms).await,
        Commands::Book {
            service,
            target,
            doctor,
            date,
            time,
            kind,
            name,
            phone,
            consent,
        } => {
            let request = commands::BookRequest {
                service: service.parse()?,
                target,
                doctor,
                date,
                time,
                kind: kind.parse()?,
                name,
                phone,
                consent,
            };
            commands::book(&ctx, request).await
        }
        Commands::Appointments => commands::appointments(&ctx).await,
    }
}
