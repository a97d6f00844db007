mod client;
mod config;
mod models;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::{HttpScreeningClient, ResumeFile, DEFAULT_TOP_COUNT};
use crate::config::Config;
use crate::models::{AnalysisResult, Candidate, JobRequirement};
use crate::workflow::WorkflowController;

/// CLI shell around the screening workflow: configure the provider,
/// open a session, upload a directory of resumes, analyze them against
/// a job-requirement profile, and print the ranking.
#[derive(Parser, Debug)]
#[command(
    name = "screener",
    about = "Batch-screen resume files against a weighted job requirement",
    version
)]
struct Cli {
    /// Directory containing resume files (.pdf, .docx, .doc, .txt)
    resume_dir: PathBuf,
    /// Job-requirement profile as a JSON file
    requirement: PathBuf,
    /// How many ranked candidates to print
    #[arg(long, default_value_t = DEFAULT_TOP_COUNT)]
    top: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let requirement = load_requirement(&cli.requirement)?;
    let files = collect_files(&cli.resume_dir)?;
    if files.is_empty() {
        bail!("no files found in {}", cli.resume_dir.display());
    }

    let backend = Arc::new(HttpScreeningClient::new(config.api_url.clone()));
    let mut controller = WorkflowController::new(backend);

    controller.bootstrap().await;
    if !controller.snapshot().llm.is_configured {
        let Some(api_key) = config.api_key.as_deref() else {
            bail!("backend has no configured provider and SCREENER_API_KEY is not set");
        };
        controller.configure(api_key).await;
        let snap = controller.snapshot();
        if !snap.llm.is_configured {
            bail!(
                "provider configuration failed: {}",
                snap.error.unwrap_or_default()
            );
        }
    }
    let snap = controller.snapshot();
    info!(
        provider = snap.llm.provider.as_deref().unwrap_or("?"),
        model = snap.llm.model.as_deref().unwrap_or("?"),
        session = snap.session_id.as_deref().unwrap_or("?"),
        "provider ready"
    );

    let admission = controller.add_files(files);
    if !admission.all_admitted() {
        warn!(
            "skipping unsupported file(s): {}",
            admission.rejected.join(", ")
        );
    }

    controller.upload().await;
    let snap = controller.snapshot();
    if let Some(error) = &snap.error {
        warn!("{error}");
    }
    if snap.candidates.is_empty() {
        bail!("no resumes could be parsed; nothing to analyze");
    }
    info!("{} candidate(s) ready", snap.candidates.len());

    apply_requirement(&mut controller, &requirement);
    if !controller.can_analyze() {
        bail!("job requirement is incomplete: a title and at least one required skill are needed");
    }

    controller.analyze().await;
    let snap = controller.snapshot();
    if let Some(error) = &snap.error {
        warn!("{error}");
    }

    // Prefer the backend's ranking; fall back to sorting held results
    // when the endpoint returns nothing.
    let mut ranked = controller.top_candidates(cli.top).await;
    if ranked.is_empty() {
        ranked = snap.results.clone();
        ranked.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(cli.top as usize);
    }

    print_ranking(&ranked, &snap.candidates);
    Ok(())
}

fn load_requirement(path: &PathBuf) -> Result<JobRequirement> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading requirement file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing requirement file {}", path.display()))
}

fn collect_files(dir: &PathBuf) -> Result<Vec<ResumeFile>> {
    let mut files = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let content = std::fs::read(entry.path())
            .with_context(|| format!("reading {}", entry.path().display()))?;
        files.push(ResumeFile {
            file_name,
            content: Bytes::from(content),
        });
    }
    // Deterministic upload order regardless of directory iteration.
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

/// Feeds a loaded profile through the draft's named mutation ops.
fn apply_requirement(controller: &mut WorkflowController, requirement: &JobRequirement) {
    controller.set_job_title(&requirement.job_title);
    controller.set_description(&requirement.description);
    controller.set_min_years(requirement.min_years_of_experience);
    controller.set_max_years(requirement.max_years_of_experience);
    controller.set_required_degree(&requirement.required_degree);
    controller.set_weights(
        requirement.skills_weight,
        requirement.experience_weight,
        requirement.education_weight,
    );
    for skill in &requirement.required_skills {
        controller.add_required_skill(skill);
    }
    for skill in &requirement.preferred_skills {
        controller.add_preferred_skill(skill);
    }
    for field in &requirement.preferred_fields_of_study {
        controller.add_preferred_field(field);
    }
}

fn print_ranking(ranked: &[AnalysisResult], candidates: &[Candidate]) {
    println!("rank  total  skills  exp  edu  candidate");
    for (i, result) in ranked.iter().enumerate() {
        let name = result
            .candidate
            .as_ref()
            .map(|c| c.full_name.clone())
            .or_else(|| {
                candidates
                    .iter()
                    .find(|c| c.id == result.candidate_id)
                    .map(|c| c.full_name.clone())
            })
            .unwrap_or_else(|| result.candidate_id.clone());
        println!(
            "{:>4}  {:>5.1}  {:>6.1}  {:>4.1}  {:>4.1}  {}",
            i + 1,
            result.total_score,
            result.skills_score,
            result.experience_score,
            result.education_score,
            name
        );
        if !result.ai_summary.is_empty() {
            println!("      {}", result.ai_summary);
        }
    }
}
