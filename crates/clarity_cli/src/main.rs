use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clarity_core::{
    DetoxLevel, DetoxStats, FilterScope, NewsArticle, Result, UserProfile, INDIAN_STATES,
    MAJOR_COUNTRIES,
};
use clarity_feed::{FeedController, FetchOutcome, FilterAction, InitOutcome};
use clarity_inference::models::DummyModel;
use clarity_inference::{create_model, Config, NewsModel, NewsService};

#[derive(Parser, Debug)]
#[command(version, about = "Calm, AI-curated news with a digital detox bent", long_about = None)]
struct Cli {
    /// Storage backend: file (default) or memory
    #[arg(long, default_value = "file")]
    storage: String,

    /// News model: gemini (default, needs GEMINI_API_KEY) or dummy
    #[arg(long, default_value = "gemini")]
    model: String,

    /// Directory for the file storage backend (default: .clarity)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create your profile and pull the first feed
    Onboard {
        #[arg(long)]
        name: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        email: Option<String>,
        /// Topics you care about, comma separated
        #[arg(long, value_delimiter = ',')]
        topics: Vec<String>,
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        prioritize_local: bool,
        /// low, medium, or strict
        #[arg(long, default_value = "medium")]
        detox_level: DetoxLevel,
    },
    /// Show the feed: instant load from cache, refresh only when stale
    Feed,
    /// Switch scope: top10, domestic, or world
    Filter { scope: FilterScope },
    /// Pick a region: promotes domestic to state, narrows world
    Region { region: String },
    /// Search for specific news, topics, or events
    Search { query: Vec<String> },
    /// Re-fetch the current feed without clearing it
    Refresh,
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Detox dashboard and a coach tip
    Detox,
    /// Remove the saved profile and feed cache
    Logout,
}

#[derive(clap::Subcommand, Debug)]
enum ProfileCommands {
    Show,
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long, value_delimiter = ',')]
        topics: Option<Vec<String>>,
        #[arg(long)]
        prioritize_local: Option<bool>,
        #[arg(long)]
        detox_level: Option<DetoxLevel>,
    },
}

fn render_articles(articles: &[NewsArticle], last_updated: Option<chrono::DateTime<chrono::Utc>>) {
    if articles.is_empty() {
        println!("No stories found.");
        println!("Try adjusting your search or filters, or run `clarity filter top10`.");
        return;
    }
    if let Some(at) = last_updated {
        println!("Last updated: {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
    for article in articles {
        println!();
        println!(
            "[{}/10] {} ({:?}, bias {})",
            article.importance_score, article.title, article.bias, article.bias_score
        );
        println!("  {} | {} | {}", article.source, article.category, article.news_type);
        println!("  {}", article.summary);
        for point in &article.key_points {
            println!("   - {}", point);
        }
        for event in &article.timeline {
            println!("   {}: {}", event.date, event.event);
        }
        if let Some(url) = &article.source_url {
            println!("  {}", url);
        }
    }
}

fn render_profile(profile: &UserProfile) {
    println!("Name:             {}", profile.name);
    if let Some(email) = &profile.email {
        println!("Email:            {}", email);
    }
    println!("Country:          {}", profile.country);
    println!("Topics:           {}", profile.topics.join(", "));
    println!("Prioritize local: {}", profile.prioritize_local);
    println!("Detox level:      {:?}", profile.detox_level);
}

fn region_hints(country: &str) -> &'static [&'static str] {
    if country.eq_ignore_ascii_case("india") {
        INDIAN_STATES
    } else {
        MAJOR_COUNTRIES
    }
}

/// Report a filter/search/refresh result the way the UI would: a quiet note
/// when nothing new arrived, the refreshed feed otherwise.
fn report(controller: &FeedController, outcome: Option<FetchOutcome>) {
    match outcome {
        None => println!("Nothing to do."),
        Some(FetchOutcome::NoNewData) => {
            println!("No new data this refresh.");
            render_articles(controller.articles(), controller.last_updated());
        }
        Some(FetchOutcome::Updated(_)) => {
            render_articles(controller.articles(), controller.last_updated());
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let store = clarity_storage::create_store(&cli.storage, cli.data_dir.clone()).await?;

    // Commands that never talk to the model skip credential checks.
    let needs_model = !matches!(
        cli.command,
        Commands::Logout
            | Commands::Profile {
                command: ProfileCommands::Show
            }
    );
    let model: Arc<dyn NewsModel> = if needs_model {
        let config = Config {
            api_key: None,
            model_name: Some(cli.model.clone()),
            base_url: None,
        };
        let model = create_model(Some(config)).await?;
        info!("🧠 News model ready ({})", model.name());
        model
    } else {
        Arc::new(DummyModel::new())
    };

    let service = NewsService::new(model);
    let mut controller = FeedController::new(store, service.clone());

    if matches!(cli.command, Commands::Logout) {
        controller.logout().await?;
        println!("Logged out. Run `clarity onboard` to start again.");
        return Ok(());
    }

    let init = controller.initialize().await?;

    if init == InitOutcome::Onboarding && !matches!(cli.command, Commands::Onboard { .. }) {
        println!("No profile yet. Run `clarity onboard --name <you> --country <where>` first.");
        return Ok(());
    }

    match cli.command {
        Commands::Logout => unreachable!("handled above"),
        Commands::Onboard {
            name,
            country,
            email,
            topics,
            prioritize_local,
            detox_level,
        } => {
            if controller.profile().is_some() {
                println!("A profile already exists. Use `clarity profile set` or `clarity logout`.");
                return Ok(());
            }
            let mut profile = UserProfile::new(name, country, topics);
            profile.email = email;
            profile.prioritize_local = prioritize_local;
            profile.detox_level = detox_level;
            info!("✨ Welcome, {}. Curating your first feed...", profile.name);
            let outcome = controller.complete_onboarding(profile).await?;
            report(&controller, Some(outcome));
        }
        Commands::Feed => {
            if let InitOutcome::Ready { restored, refreshed } = init {
                if restored > 0 && refreshed.is_some() {
                    info!("Cache was stale; refreshed in the background");
                }
            }
            render_articles(controller.articles(), controller.last_updated());
        }
        Commands::Filter { scope } => {
            if matches!(scope, FilterScope::State | FilterScope::Search) {
                let country = controller.profile().map(|p| p.country.clone()).unwrap_or_default();
                println!(
                    "Pick a region with `clarity region <name>` (e.g. {}) or use `clarity search <query>`.",
                    region_hints(&country).first().unwrap_or(&"Kerala")
                );
                return Ok(());
            }
            let outcome = controller.apply(FilterAction::SetScope(scope)).await?;
            report(&controller, outcome);
        }
        Commands::Region { region } => {
            let outcome = controller.apply(FilterAction::SelectRegion(region)).await?;
            if outcome.is_none() {
                println!(
                    "Regions narrow a domestic or world feed. Run `clarity filter domestic` or `clarity filter world` first."
                );
                return Ok(());
            }
            report(&controller, outcome);
        }
        Commands::Search { query } => {
            let outcome = controller.apply(FilterAction::Search(query.join(" "))).await?;
            report(&controller, outcome);
        }
        Commands::Refresh => {
            info!("🔄 Refreshing feed with latest stories...");
            let outcome = controller.manual_refresh().await?;
            report(&controller, outcome);
        }
        Commands::Profile { command } => match command {
            ProfileCommands::Show => {
                if let Some(profile) = controller.profile() {
                    render_profile(profile);
                }
            }
            ProfileCommands::Set {
                name,
                email,
                country,
                topics,
                prioritize_local,
                detox_level,
            } => {
                let Some(mut profile) = controller.profile().cloned() else {
                    return Ok(());
                };
                if let Some(name) = name {
                    profile.name = name;
                }
                if email.is_some() {
                    profile.email = email;
                }
                if let Some(country) = country {
                    profile.country = country;
                }
                if let Some(topics) = topics {
                    profile.topics = topics;
                }
                if let Some(flag) = prioritize_local {
                    profile.prioritize_local = flag;
                }
                if let Some(level) = detox_level {
                    profile.detox_level = level;
                }
                controller.update_profile(profile).await?;
                println!("Profile saved. The next refresh picks up the changes.");
            }
        },
        Commands::Detox => {
            let stats = DetoxStats::default();
            println!("Time spent today:  {} min", stats.daily_time_spent);
            println!("Stories read:      {}", stats.stories_read);
            println!("Anxiety score:     {}/10", stats.anxiety_score);
            println!("Topics avoided:    {}", stats.topics_avoided.join(", "));
            let trend: Vec<String> = stats
                .mood_trend
                .iter()
                .map(|p| format!("{} {}", p.day, p.mood))
                .collect();
            println!("Mood trend:        {}", trend.join("  "));
            if let Some(profile) = controller.profile() {
                let tip = service.detox_tip(stats.stories_read, &profile.name).await;
                println!();
                println!("Coach: {}", tip);
            }
        }
    }

    Ok(())
}
