use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gitstats::models::{AccountDetails, AggregatedStats, ComparisonReport, Winner};
use gitstats::{Config, GitHubClient, Outcome, StatsConfig, StatsService};

#[derive(Parser, Debug)]
#[command(name = "gitstats")]
#[command(version = "0.1.0")]
#[command(about = "Summarize and compare GitHub profiles")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Maximum repositories to analyze per account
    #[arg(long, global = true)]
    max_repos: Option<u32>,

    /// Number of repositories in the top ranking
    #[arg(long, global = true)]
    top: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show statistics for one or more accounts
    Stats {
        /// GitHub user or organization names
        #[arg(required = true)]
        accounts: Vec<String>,
    },
    /// Compare two accounts head to head
    Compare { first: String, second: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitstats=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(max_repos) = args.max_repos {
        config.max_repos = max_repos;
    }
    if let Some(top) = args.top {
        config.top_repos_count = top;
    }
    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set, requests are limited to 60 per hour");
    }

    let github = GitHubClient::new(&config)?;
    let service = StatsService::new(github, &StatsConfig::from(&config));

    let output = match &args.command {
        Command::Stats { accounts } => {
            let mut sections = Vec::new();
            for account in accounts {
                let spinner = spinner(format!("Fetching {}", account));
                let outcome = service.get_stats(account).await;
                spinner.finish_and_clear();
                sections.push(render_stats(&outcome, &args.format)?);
            }
            sections.join("\n")
        }
        Command::Compare { first, second } => {
            let spinner = spinner(format!("Comparing {} and {}", first, second));
            let outcome = service.compare_accounts(first, second).await;
            spinner.finish_and_clear();
            render_comparison(&outcome, &args.format)?
        }
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn render_stats(outcome: &Outcome<std::sync::Arc<AggregatedStats>>, format: &str) -> anyhow::Result<String> {
    Ok(match (format, outcome) {
        ("json", _) => serde_json::to_string_pretty(outcome)?,
        ("markdown", Outcome::Success(stats)) => format_markdown(stats),
        (_, Outcome::Success(stats)) => format_text(stats),
        (_, Outcome::Failure(error)) => format!("Error: {}\n", error),
    })
}

fn render_comparison(outcome: &Outcome<ComparisonReport>, format: &str) -> anyhow::Result<String> {
    Ok(match (format, outcome) {
        ("json", _) => serde_json::to_string_pretty(outcome)?,
        ("markdown", Outcome::Success(report)) => format_comparison_markdown(report),
        (_, Outcome::Success(report)) => format_comparison_text(report),
        (_, Outcome::Failure(error)) => format!("Error: {}\n", error),
    })
}

fn format_text(stats: &AggregatedStats) -> String {
    let mut output = String::new();
    let profile = &stats.profile;

    output.push_str(&format!("\n=== GitHub Stats: {} ===\n\n", profile.login));
    output.push_str(&format!("Name: {}\n", profile.name));
    if let Some(ref bio) = profile.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    output.push_str(&format!("Location: {}\n", profile.location));
    output.push_str(&format!("Blog: {}\n", profile.blog));
    match &profile.details {
        AccountDetails::User {
            followers,
            following,
            public_gists,
            company,
        } => {
            output.push_str(&format!("Company: {}\n", company));
            output.push_str(&format!(
                "Followers: {}  Following: {}  Gists: {}\n",
                followers, following, public_gists
            ));
        }
        AccountDetails::Organization {
            email,
            public_members,
        } => {
            output.push_str(&format!("Email: {}\n", email));
            output.push_str(&format!("Public members: {}\n", public_members));
        }
    }
    output.push_str(&format!(
        "Member since: {}\n\n",
        profile.created_at.format("%Y-%m-%d")
    ));

    let repos = &stats.repositories;
    output.push_str(&format!(
        "Repositories: {}  Stars: {}  Forks: {}  Watchers: {}  Avg stars: {:.2}\n",
        repos.total_repos, repos.total_stars, repos.total_forks, repos.total_watchers, repos.avg_stars
    ));

    if !repos.top_repos.is_empty() {
        output.push_str("\nTop Repositories:\n");
        for repo in &repos.top_repos {
            output.push_str(&format!(
                "  - {} ({}): {} stars, {} forks\n",
                repo.name, repo.language, repo.stars, repo.forks
            ));
        }
    }

    if !stats.languages.languages.is_empty() {
        output.push_str(&format!(
            "\nLanguages ({} total):\n",
            stats.languages.total_languages
        ));
        for lang in &stats.languages.languages {
            output.push_str(&format!(
                "  - {}: {} ({:.2}%)\n",
                lang.language, lang.count, lang.percentage
            ));
        }
    }

    let activity = &stats.activity;
    output.push_str(&format!(
        "\nActive in the last year: {} repositories (avg {:.2} stars)\n",
        activity.active_repos_last_year, activity.avg_stars_active
    ));
    output.push_str(&format!(
        "Sources: {}  Forks: {}\n",
        activity.fork_split.sources, activity.fork_split.forks
    ));
    for (month, count) in &activity.monthly_activity {
        output.push_str(&format!("  {}: {}\n", month, count));
    }
    let weekly: Vec<String> = activity
        .weekly_activity
        .iter()
        .map(|(day, count)| format!("{} {}", &day[..3], count))
        .collect();
    output.push_str(&format!("By weekday: {}\n", weekly.join(", ")));

    output
}

fn format_markdown(stats: &AggregatedStats) -> String {
    let mut output = String::new();
    let profile = &stats.profile;
    let repos = &stats.repositories;

    output.push_str(&format!("# GitHub Stats: {}\n\n", profile.login));
    if let Some(ref bio) = profile.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Repositories | {} |\n", repos.total_repos));
    output.push_str(&format!("| Stars | {} |\n", repos.total_stars));
    output.push_str(&format!("| Forks | {} |\n", repos.total_forks));
    output.push_str(&format!("| Average Stars | {:.2} |\n", repos.avg_stars));
    output.push_str(&format!(
        "| Active Last Year | {} |\n",
        stats.activity.active_repos_last_year
    ));

    if !repos.top_repos.is_empty() {
        output.push_str("\n## Top Repositories\n\n");
        output.push_str("| Repository | Language | Stars | Forks |\n");
        output.push_str("|------------|----------|-------|-------|\n");
        for repo in &repos.top_repos {
            output.push_str(&format!(
                "| [{}]({}) | {} | {} | {} |\n",
                repo.name, repo.url, repo.language, repo.stars, repo.forks
            ));
        }
    }

    if !stats.languages.languages.is_empty() {
        output.push_str("\n## Languages\n\n");
        output.push_str("| Language | Repositories | Share |\n");
        output.push_str("|----------|--------------|-------|\n");
        for lang in &stats.languages.languages {
            output.push_str(&format!(
                "| {} | {} | {:.2}% |\n",
                lang.language, lang.count, lang.percentage
            ));
        }
    }

    output
}

fn winner_label(report: &ComparisonReport, winner: Winner) -> &str {
    match winner {
        Winner::First => &report.first.profile.login,
        Winner::Second => &report.second.profile.login,
        Winner::Tie => "tie",
    }
}

fn format_comparison_text(report: &ComparisonReport) -> String {
    let mut output = format!(
        "\n=== {} vs {} ===\n\n",
        report.first.profile.login, report.second.profile.login
    );
    for (name, metric) in report.comparison.metrics() {
        output.push_str(&format!(
            "{:<14} {:>8} {:>8}  ({:+})  winner: {}\n",
            name,
            metric.value_a,
            metric.value_b,
            metric.difference,
            winner_label(report, metric.winner)
        ));
    }
    output
}

fn format_comparison_markdown(report: &ComparisonReport) -> String {
    let first = &report.first.profile.login;
    let second = &report.second.profile.login;

    let mut output = format!("# {} vs {}\n\n", first, second);
    output.push_str(&format!("| Metric | {} | {} | Difference | Winner |\n", first, second));
    output.push_str("|--------|---|---|------------|--------|\n");
    for (name, metric) in report.comparison.metrics() {
        output.push_str(&format!(
            "| {} | {} | {} | {:+} | {} |\n",
            name,
            metric.value_a,
            metric.value_b,
            metric.difference,
            winner_label(report, metric.winner)
        ));
    }
    output
}
