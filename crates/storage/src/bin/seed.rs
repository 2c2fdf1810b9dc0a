use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use prep_core::model::{ProgressRecord, QuizScore, SectionId, SettingKey, SettingValue};
use prep_core::sampling::TEST_SIZE;
use storage::Storage;
use tracing_subscriber::EnvFilter;

/// Populate a local study database with sample progress and quiz history.
#[derive(Debug, Parser)]
#[command(name = "seed")]
struct Args {
    /// SQLite URL of the study database.
    #[arg(long, env = "PREP_DB_URL", default_value = "sqlite:prep.sqlite3")]
    db: String,

    /// Number of handbook sections to mark as read (`ch1-s1`, `ch1-s2`, ...).
    #[arg(long, env = "PREP_SEED_SECTIONS", default_value_t = 5)]
    sections: u32,

    /// Number of quiz attempts to append.
    #[arg(long, env = "PREP_SEED_QUIZZES", default_value_t = 3)]
    quizzes: u32,

    /// Display name to store under `userName`.
    #[arg(long, env = "PREP_SEED_NAME")]
    name: Option<String>,

    /// Fixed current time (RFC 3339) for deterministic seeding.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::sqlite(&args.db).await?;
    let now = args.now.unwrap_or_else(Utc::now);
    let total = u32::try_from(TEST_SIZE)?;

    for n in 1..=args.sections {
        let section = SectionId::new(format!("ch1-s{n}"))?;
        let read_at = now - Duration::days(i64::from(args.sections - n));
        storage
            .progress
            .upsert_progress(&ProgressRecord::new(section, read_at))
            .await?;
    }

    for n in 0..args.quizzes {
        // scores climb from 18/30 so the dashboard shows some movement
        let score = QuizScore::new(n.saturating_mul(3).saturating_add(18).min(total), total)?;
        let taken_at = now - Duration::hours(i64::from(args.quizzes - n));
        let result = storage.quiz_results.append_result(score, taken_at).await?;
        tracing::debug!(id = %result.id(), percent = score.percent(), "seeded quiz");
    }

    if let Some(name) = args.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        storage
            .settings
            .put_setting(&SettingKey::user_name(), &SettingValue::from(name))
            .await?;
    }

    tracing::info!(
        db = %args.db,
        sections = args.sections,
        quizzes = args.quizzes,
        "seed complete"
    );
    storage.close().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run(Args::parse()).await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
