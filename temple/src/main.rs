//! Cosmic Temple command-line front end.
//!
//! A thin presentation layer over `temple-core`: every subcommand maps onto
//! one engine operation and prints the engine's outcome message. Entity
//! numbers shown and accepted here are 1-based, matching the hotkey model.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use temple_core::{default_rules, ProgressionEngine, StreakKind, TempleStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "temple")]
#[command(about = "Personal progression tracker with a cosmic bent")]
struct Cli {
    /// Directory holding the data documents
    #[arg(long, default_value = ".", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List missions
    Missions,
    /// Toggle a mission's completion
    Mission { number: NonZeroUsize },
    /// List skills
    Skills,
    /// Practice a skill (+25 progress)
    Skill { number: NonZeroUsize },
    /// List artifacts
    Artifacts,
    /// Toggle an artifact's collected state
    Artifact { number: NonZeroUsize },
    /// Rename an artifact
    Rename { number: NonZeroUsize, name: String },
    /// List challenges
    Challenges,
    /// Advance a challenge by one step
    Challenge { number: NonZeroUsize },
    /// Create a new challenge
    NewChallenge {
        title: String,
        deadline: String,
        goal: u32,
    },
    /// List quests
    Quests,
    /// Mark a quest complete
    Quest { number: NonZeroUsize },
    /// List reflections
    Reflections,
    /// Record today's reflection (or a specific date's with --date)
    Reflect {
        content: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the profile and streaks
    Profile,
    /// Set the profile name
    Name { name: String },
    /// Cycle the profile title
    Title,
    /// Cycle the avatar color
    Color,
    /// Cycle the presentation theme
    Theme,
    /// Show today's lore line, once per day
    Lore,
    /// Draw an oracle tip for a category
    Oracle { category: String },
    /// List earned badges
    Badges,
    /// Evaluate achievement rules and award new badges
    Award,
    /// Feed a line to the sandbox
    SandboxAdd { line: String },
    /// Generate a sandbox babble line
    Sandbox,
    /// Export all collections to a snapshot file
    Export { path: PathBuf },
    /// Import collections from a snapshot file
    Import { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "temple=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let engine = ProgressionEngine::new(TempleStore::new(cli.data_dir));

    match cli.command {
        Commands::Missions => {
            for (i, mission) in engine.missions()?.iter().enumerate() {
                let status = if mission.completed { "[X]" } else { "[ ]" };
                println!("{}. {} {} - {}", i + 1, status, mission.title, mission.description);
            }
        }
        Commands::Mission { number } => {
            let mut missions = engine.missions()?;
            let outcome = engine.toggle_mission(&mut missions, number.get() - 1)?;
            println!("{}", outcome.message);
        }
        Commands::Skills => {
            for (i, skill) in engine.skills()?.iter().enumerate() {
                println!(
                    "{}. {} - Level {} ({}% progress)",
                    i + 1,
                    skill.name,
                    skill.level,
                    skill.progress
                );
            }
        }
        Commands::Skill { number } => {
            let mut skills = engine.skills()?;
            let outcome = engine.advance_skill(&mut skills, number.get() - 1)?;
            println!("{}", outcome.message);
        }
        Commands::Artifacts => {
            for (i, artifact) in engine.artifacts()?.iter().enumerate() {
                let status = if artifact.collected {
                    "[COLLECTED]"
                } else {
                    "[UNCOLLECTED]"
                };
                println!("{}. {} {}", i + 1, status, artifact.name);
            }
        }
        Commands::Artifact { number } => {
            let mut artifacts = engine.artifacts()?;
            let outcome = engine.toggle_artifact(&mut artifacts, number.get() - 1)?;
            println!("{}", outcome.message);
        }
        Commands::Rename { number, name } => {
            let mut artifacts = engine.artifacts()?;
            let outcome = engine.rename_artifact(&mut artifacts, number.get() - 1, name)?;
            println!("{}", outcome.message);
        }
        Commands::Challenges => {
            for (i, challenge) in engine.challenges()?.iter().enumerate() {
                let status = if challenge.is_done() { "[DONE]" } else { "[    ]" };
                println!(
                    "{}. {} {} ({}/{}, due {})",
                    i + 1,
                    status,
                    challenge.title,
                    challenge.progress,
                    challenge.goal,
                    challenge.deadline
                );
            }
        }
        Commands::Challenge { number } => {
            let mut challenges = engine.challenges()?;
            let outcome = engine.advance_challenge(&mut challenges, number.get() - 1)?;
            println!("{}", outcome.message);
        }
        Commands::NewChallenge {
            title,
            deadline,
            goal,
        } => {
            let mut challenges = engine.challenges()?;
            let outcome = engine.create_challenge(&mut challenges, title, deadline, goal)?;
            println!("{}", outcome.message);
        }
        Commands::Quests => {
            for (i, quest) in engine.quests()?.iter().enumerate() {
                let status = if quest.completed { "[X]" } else { "[ ]" };
                println!("{}. {} {}", i + 1, status, quest.name);
                for task in &quest.tasks {
                    println!("     - {task}");
                }
            }
        }
        Commands::Quest { number } => {
            let mut quests = engine.quests()?;
            let outcome = engine.advance_quest(&mut quests, number.get() - 1)?;
            println!("{}", outcome.message);
        }
        Commands::Reflections => {
            for (date, content) in engine.reflections()? {
                println!("{date}: {content}");
            }
        }
        Commands::Reflect { content, date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive().to_string());
            let mut reflections = engine.reflections()?;
            let outcome = engine.record_reflection(&mut reflections, date, &content)?;
            println!("{}", outcome.message);
        }
        Commands::Profile => {
            let profile = engine.profile()?;
            let settings = engine.settings()?;
            println!("{} the {} ({})", profile.name, profile.title, profile.avatar_color);
            println!(
                "Mission streak: {} day(s) | Reflection streak: {} day(s)",
                settings.streak(StreakKind::Mission),
                settings.streak(StreakKind::Reflection)
            );
        }
        Commands::Name { name } => {
            let mut profile = engine.profile()?;
            let outcome = engine.set_profile_name(&mut profile, name)?;
            println!("{}", outcome.message);
        }
        Commands::Title => {
            let mut profile = engine.profile()?;
            let outcome = engine.cycle_profile_title(&mut profile)?;
            println!("{}", outcome.message);
        }
        Commands::Color => {
            let mut profile = engine.profile()?;
            let outcome = engine.cycle_avatar_color(&mut profile)?;
            println!("{}", outcome.message);
        }
        Commands::Theme => {
            let outcome = engine.cycle_theme()?;
            println!("{}", outcome.message);
        }
        Commands::Lore => match engine.daily_lore()? {
            Some(line) => println!("Cosmic Event: {line}"),
            None => println!("The cosmos is quiet until tomorrow."),
        },
        Commands::Oracle { category } => {
            let outcome = engine.oracle_tip(&category)?;
            println!("{}", outcome.message);
        }
        Commands::Badges => {
            let badges = engine.badges()?;
            if badges.is_empty() {
                println!("No badges earned yet.");
            }
            for badge in badges {
                println!("* {} - {}", badge.title, badge.description);
            }
        }
        Commands::Award => {
            let earned = engine.evaluate_achievements(&default_rules())?;
            if earned.is_empty() {
                println!("No new badges.");
            }
            for badge in earned {
                println!("New badge: {} - {}", badge.title, badge.description);
            }
        }
        Commands::SandboxAdd { line } => {
            let outcome = engine.add_sandbox_line(&line)?;
            println!("{}", outcome.message);
        }
        Commands::Sandbox => match engine.generate_sandbox_line()? {
            Some(line) => println!("{line}"),
            None => println!("The sandbox is empty; feed it some lines first."),
        },
        Commands::Export { path } => {
            let outcome = engine.export_all(path)?;
            println!("{}", outcome.message);
        }
        Commands::Import { path } => {
            let outcome = engine.import_all(path)?;
            println!("{}", outcome.message);
        }
    }

    Ok(())
}
