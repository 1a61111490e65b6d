//! Command line front end
//!
//! Every invocation loads the configuration, installs logging, resolves the
//! engine and rolls the usage month over if it is due before running the
//! requested command.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use pdiary_domain::{Capabilities, PlanDefinition, SubscriptionPlan, SubscriptionStatus};
use pdiary_infrastructure::ConfigLoader;
use pdiary_infrastructure::di::{AppContext, init_app};
use pdiary_infrastructure::logging::init_logging;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Command line interface for Photo Diary
#[derive(Parser, Debug)]
#[command(name = "pdiary")]
#[command(about = "Photo Diary - subscription and entitlement engine")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Engine commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current plan, usage and capabilities
    Status,
    /// List the plan catalogue
    Plans,
    /// Consume one AI generation
    Generate,
    /// Reset the monthly usage counter
    Reset,
    /// Check whether a photo can be used under the current plan
    Photo {
        /// Capture date, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`
        #[arg(value_parser = parse_taken_at)]
        taken_at: NaiveDateTime,
    },
    /// Buy a plan through the purchase backend
    Purchase {
        /// Plan identifier (`premium_monthly`, `premium_yearly`)
        plan: SubscriptionPlan,
    },
    /// Restore the last purchase
    Restore,
}

/// Parse a capture date with an optional time of day
pub fn parse_taken_at(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|_| format!("invalid date '{value}', expected YYYY-MM-DD[THH:MM:SS]"))
}

/// Run the command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging)?;

    let context = init_app(config).await?;
    let output = execute(&context, &cli.command, cli.json).await?;
    println!("{output}");
    Ok(())
}

/// Run one command against a resolved engine and render its output
pub async fn execute(
    context: &AppContext,
    command: &Command,
    as_json: bool,
) -> anyhow::Result<String> {
    let service = context.subscription()?;
    if service.reset_usage_if_due().await? {
        info!("Monthly usage counter rolled over");
    }

    let output = match command {
        Command::Status => {
            let status = service.get_current_status().await?;
            let capabilities = service.capabilities().await?;
            let next_reset = service.get_next_reset_date().await?;
            if as_json {
                json!({
                    "status": status,
                    "capabilities": capabilities,
                    "next_reset_date": next_reset,
                })
                .to_string()
            } else {
                render_status(&status, &capabilities, next_reset)
            }
        }
        Command::Plans => {
            let plans = PlanDefinition::all();
            if as_json {
                serde_json::to_string_pretty(&plans)?
            } else {
                plans.into_iter().map(render_plan).collect::<Vec<_>>().join("\n")
            }
        }
        Command::Generate => {
            let status = service
                .increment_ai_usage()
                .await
                .context("AI generation refused")?;
            let remaining = service.get_remaining_generations().await?;
            if as_json {
                json!({ "used": status.monthly_usage_count, "remaining": remaining }).to_string()
            } else {
                format!(
                    "Generation recorded ({} used, {remaining} remaining this month)",
                    status.monthly_usage_count
                )
            }
        }
        Command::Reset => {
            let status = service.reset_usage().await?;
            let remaining = service.get_remaining_generations().await?;
            if as_json {
                json!({ "used": status.monthly_usage_count, "remaining": remaining }).to_string()
            } else {
                format!("Usage reset, {remaining} generations available")
            }
        }
        Command::Photo { taken_at } => {
            let status = service.get_current_status().await?;
            let plan = status.effective_plan(context.clock()?.now());
            let window = context.photo_access()?.access_window(plan)?;
            let accessible = service.can_use_photo(*taken_at).await?;
            if as_json {
                json!({
                    "taken_at": taken_at,
                    "plan": plan,
                    "earliest_date": window.earliest_date,
                    "accessible": accessible,
                })
                .to_string()
            } else if accessible {
                format!(
                    "Photo from {} is available on {plan} (window starts {})",
                    taken_at.date(),
                    window.earliest_date
                )
            } else {
                format!(
                    "Photo from {} is outside the {plan} window (starts {})",
                    taken_at.date(),
                    window.earliest_date
                )
            }
        }
        Command::Purchase { plan } => {
            let status = service
                .purchase_plan(*plan)
                .await
                .with_context(|| format!("Purchase of {plan} failed"))?;
            if as_json {
                serde_json::to_string_pretty(&status)?
            } else {
                format!(
                    "Now on {}{}",
                    status.plan_definition().display_name,
                    render_expiry(status.expiry_date)
                )
            }
        }
        Command::Restore => match service.restore_purchases().await? {
            Some(status) if as_json => serde_json::to_string_pretty(&status)?,
            Some(status) => format!(
                "Restored {}{}",
                status.plan_definition().display_name,
                render_expiry(status.expiry_date)
            ),
            None if as_json => json!(null).to_string(),
            None => "No purchase to restore".to_string(),
        },
    };
    Ok(output)
}

fn render_status(
    status: &SubscriptionStatus,
    capabilities: &Capabilities,
    next_reset: DateTime<Utc>,
) -> String {
    let definition = status.plan_definition();
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    [
        format!(
            "Plan:               {}{}",
            definition.display_name,
            render_expiry(status.expiry_date)
        ),
        format!("Auto renewal:       {}", yes_no(status.auto_renewal)),
        format!(
            "AI generations:     {} of {} used, {} remaining",
            status.monthly_usage_count,
            definition.monthly_generation_limit,
            capabilities.remaining_generations
        ),
        format!("Next reset:         {}", next_reset.format("%Y-%m-%d")),
        format!("Premium features:   {}", yes_no(capabilities.premium_features)),
        format!("Writing prompts:    {}", yes_no(capabilities.writing_prompts)),
        format!("Advanced filters:   {}", yes_no(capabilities.advanced_filters)),
        format!("Advanced analytics: {}", yes_no(capabilities.advanced_analytics)),
    ]
    .join("\n")
}

fn render_plan(plan: &PlanDefinition) -> String {
    format!(
        "{:<16} {:<18} {:>3} generations/month, {:>3} days of photos{}",
        plan.id,
        plan.display_name,
        plan.monthly_generation_limit,
        plan.past_photo_access_days,
        if plan.is_premium { ", premium features" } else { "" }
    )
}

fn render_expiry(expiry: Option<DateTime<Utc>>) -> String {
    expiry
        .map(|date| format!(" (expires {})", date.format("%Y-%m-%d")))
        .unwrap_or_default()
}
