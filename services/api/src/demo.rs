use crate::infra::{
    InMemoryAuditRepository, InMemoryCreditLedger, SeededSignalProvider, SEED_CREDITS,
};
use clap::Args;
use listing_health::audit::insights;
use listing_health::audit::{AuditKey, AuditResult, AuditService, ReviewCsvImporter, SentimentLabel};
use listing_health::config::AuditConfig;
use listing_health::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AuditRunArgs {
    /// Account the run is billed against
    #[arg(long, default_value = "demo-account")]
    pub(crate) user_id: String,
    /// Listing to audit
    #[arg(long, default_value = "demo-listing")]
    pub(crate) entity_id: String,
    /// Replace the seeded reviews with a CSV export before auditing
    #[arg(long)]
    pub(crate) reviews_csv: Option<PathBuf>,
    /// Print the full check trail behind every category score
    #[arg(long)]
    pub(crate) list_checks: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Replace the seeded reviews with a CSV export before auditing
    #[arg(long)]
    pub(crate) reviews_csv: Option<PathBuf>,
}

type DemoAuditService =
    AuditService<SeededSignalProvider, InMemoryAuditRepository, InMemoryCreditLedger>;

fn build_audit_service(
    reviews_csv: Option<PathBuf>,
) -> Result<(DemoAuditService, Arc<InMemoryCreditLedger>), AppError> {
    let provider = match reviews_csv {
        Some(path) => {
            let imported = ReviewCsvImporter::from_path(path)?;
            SeededSignalProvider::with_reviews(imported)
        }
        None => SeededSignalProvider::new(),
    };

    let ledger = Arc::new(InMemoryCreditLedger::new(SEED_CREDITS));
    let service = AuditService::new(
        Arc::new(provider),
        Arc::new(InMemoryAuditRepository::default()),
        ledger.clone(),
        AuditConfig::default(),
    );
    Ok((service, ledger))
}

pub(crate) fn run_audit_report(args: AuditRunArgs) -> Result<(), AppError> {
    let AuditRunArgs {
        user_id,
        entity_id,
        reviews_csv,
        list_checks,
    } = args;

    let (service, _ledger) = build_audit_service(reviews_csv)?;
    let result = service.run_audit(&AuditKey::new(user_id, entity_id))?;
    render_audit_report(&result, list_checks);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { reviews_csv } = args;

    println!("Listing health audit demo");
    let (service, ledger) = build_audit_service(reviews_csv)?;
    let key = AuditKey::new("demo-account", "demo-listing");

    let result = service.run_audit(&key)?;
    render_audit_report(&result, false);

    let second = service.run_audit(&key)?;
    let points = service.insights(&key)?;
    println!(
        "\nHistory after run {}: {} stored runs",
        second.audit_id,
        points.len()
    );
    if let Some(trend) = insights::trend(&points) {
        println!(
            "Trend: {} ({:+} points overall)",
            trend.direction.label(),
            trend.score_delta
        );
        if let Some(movement) = trend.top_improvement {
            println!(
                "- Top improvement: {} {} -> {}",
                movement.category.label(),
                movement.previous,
                movement.current
            );
        }
        if let Some(movement) = trend.top_regression {
            println!(
                "- Top regression: {} {} -> {}",
                movement.category.label(),
                movement.previous,
                movement.current
            );
        }
    }

    println!("\nAdmission check for an account without credit");
    ledger.grant("prospect-account", 0);
    match service.run_audit(&AuditKey::new("prospect-account", "demo-listing")) {
        Ok(result) => println!("- Admitted run {}", result.audit_id),
        Err(err) => println!("- Run rejected: {err}"),
    }

    Ok(())
}

pub(crate) fn render_audit_report(result: &AuditResult, list_checks: bool) {
    println!(
        "\nAudit {} for listing {} (account {})",
        result.audit_id, result.entity_id, result.user_id
    );
    println!(
        "Overall score: {}/100 using {} weights",
        result.overall_score,
        result.weight_profile.label()
    );

    println!("\nCategory scores");
    for scored in &result.categories {
        println!("- {}: {}/100", scored.category.label(), scored.score);
        if list_checks {
            for check in &scored.checks {
                println!(
                    "  [{}] {}: observed {} | expected {}",
                    check.status.label(),
                    check.field,
                    check.observed,
                    check.expected
                );
            }
        }
    }

    let summary = &result.review_summary;
    println!("\nReview snapshot");
    println!(
        "- {} reviews | {:.1} average rating | {:.0}% response rate",
        summary.total_reviews, summary.average_rating, summary.response_rate_pct
    );
    println!(
        "- {} replied within 48h | {} unreplied older than 7 days",
        summary.replies_within_48h, summary.unreplied_older_than_7d
    );
    let sentiment_mix: Vec<String> = SentimentLabel::ordered()
        .iter()
        .filter_map(|label| {
            let share = summary.sentiment_distribution.get(label).copied()?;
            (share > 0).then(|| format!("{}% {}", share, label.label()))
        })
        .collect();
    if !sentiment_mix.is_empty() {
        println!("- Sentiment mix: {}", sentiment_mix.join(" | "));
    }
    if !summary.common_themes.is_empty() {
        println!("- Common themes:");
        for theme in &summary.common_themes {
            println!("  - {} ({} mentions)", theme.theme, theme.count);
        }
    }
    if !summary.spam_flags.is_empty() {
        println!("- Suspected spam:");
        for flag in &summary.spam_flags {
            println!("  - {}: {}", flag.review_id, flag.reason);
        }
    }

    if result.recommendations.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for recommendation in &result.recommendations {
            println!(
                "- [{}] {} ({})",
                recommendation.priority.label(),
                recommendation.description,
                recommendation.category.label()
            );
            println!(
                "  Action: {} | Impact: {}",
                recommendation.action, recommendation.impact
            );
        }
    }
}
