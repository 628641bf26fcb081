use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careernav::config::Config;
use careernav::gateway::SourceMode;
use careernav::models::{Answer, SkillEntry, SkillSet, SurveyResponse};
use careernav::scoring::personality;
use careernav::Session;

/// Drives one session end to end, the way the view layer would, and prints
/// the resulting recommendations as JSON.
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting CareerNav client v{}", env!("CARGO_PKG_VERSION"));

    let session = Session::from_config(&config)?;
    match session.gateway().mode() {
        SourceMode::Auto => info!("Backend: {}", config.api_base),
        SourceMode::LocalOnly => info!("Offline mode: all requests resolved locally"),
    }
    if let Some(path) = &config.store_path {
        info!("Store file: {}", path.display());
    }

    if !session.is_authenticated() {
        let login = session
            .login(&config.demo_email, &config.demo_password)
            .await?;
        if let Some(user) = login.user {
            info!("Signed in as {} <{}>", user.name, user.email);
        }
    }

    let status = session.dashboard().await?;
    if !status.skills_saved {
        session
            .save_skills(SkillSet {
                skills: vec![SkillEntry::new("Python", 8), SkillEntry::new("SQL", 6)],
            })
            .await?;
    }
    if !status.survey_completed {
        let responses = personality::questions()
            .into_iter()
            .map(|q| SurveyResponse::new(q.id, if q.id % 4 == 0 { Answer::B } else { Answer::A }))
            .collect();
        let result = session.submit_survey(responses).await?;
        info!("Personality: {}", result.personality_type);
    }

    let recs = session.generate_recommendations().await?;
    if recs.is_empty() {
        warn!("No recommendations were produced");
    }
    println!("{}", serde_json::to_string_pretty(&recs)?);

    Ok(())
}
