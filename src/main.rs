use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;

use motionsync::{
    models::{ProfileUpdate, SessionInput, SettingsUpdate},
    projections, Database, EventKind, UserDataStore,
};

#[derive(Parser)]
#[command(name = "motionsync", about = "Console for the MotionSync user-data store")]
struct Cli {
    /// Override the data directory (defaults to the platform app-data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show profile, level and streak at a glance
    Status,
    /// Record a completed analysis session
    Record {
        /// Exercise type (squat, pushup, lunge, plank, deadlift)
        exercise: String,
        /// Motion score, 0-100
        #[arg(long)]
        score: f64,
        /// Session duration in seconds
        #[arg(long, default_value_t = 0)]
        duration_secs: u64,
        /// Also grant the computed XP reward for this session
        #[arg(long)]
        award_xp: bool,
    },
    /// Grant experience points directly
    AddXp {
        amount: u64,
        #[arg(long, default_value = "manual")]
        source: String,
    },
    /// List earned and locked badges with progress
    Badges,
    /// List pending and completed milestones
    Milestones,
    /// Complete a pending milestone by id
    Complete { milestone_id: String },
    /// Show the profile, or update whitelisted fields
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Show settings, or apply a JSON partial update
    Settings {
        /// JSON object of whitelisted changes, e.g. '{"privacy":{"analytics":false}}'
        #[arg(long)]
        set: Option<String>,
    },
    /// Show recent session history
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Write the full user-data export as JSON
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace all user data from an export file
    Import { input: PathBuf },
    /// Wipe every record and recreate defaults
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

fn data_dir(cli_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = cli_override {
        return Ok(dir);
    }
    let dirs = ProjectDirs::from("", "", "motionsync")
        .context("could not determine a platform data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();

    let dir = data_dir(cli.data_dir)?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory {}", dir.display()))?;
    let db = Database::new(dir.join("motionsync.sqlite3"))?;

    let store = UserDataStore::new(db);
    store.initialize().await;

    // Surface the interesting events the store fans out while a command runs.
    let _events = store.subscribe(|event| match &event.kind {
        EventKind::LevelUp { new_level, .. } => println!("* Level up! Now level {new_level}"),
        EventKind::BadgeUnlocked { badge } => {
            println!("* Badge unlocked: {} {}", badge.icon, badge.title);
        }
        EventKind::MilestoneCompleted { milestone } => {
            println!("* Milestone complete: {} (+{} XP)", milestone.title, milestone.xp_reward);
        }
        _ => {}
    });

    match cli.command {
        Command::Status => {
            let progress = store.progress().await?;
            let achievements = store.achievements().await?;
            let level = projections::level_progress(&progress);

            println!("Level {} ({} XP)", progress.level, progress.xp);
            println!(
                "  toward next display level: {:.0}% ({}/{} XP)",
                level.percentage, level.progress_xp, level.required_xp
            );
            println!(
                "Sessions: {}  Perfect forms: {}  Best score: {:.1}",
                progress.total_sessions, progress.perfect_forms, progress.best_motion_score
            );
            println!(
                "Streak: {} day(s), longest {}",
                progress.streak, progress.longest_streak
            );
            println!(
                "Badges: {}  Milestones: {}",
                achievements.total_badges_earned, achievements.total_milestones_completed
            );
        }
        Command::Record {
            exercise,
            score,
            duration_secs,
            award_xp,
        } => {
            if !(0.0..=100.0).contains(&score) {
                bail!("score must be between 0 and 100");
            }
            let record = store
                .record_session(SessionInput {
                    exercise_type: exercise,
                    motion_score: score,
                    duration_secs,
                    feedback: Vec::new(),
                    improvements: Vec::new(),
                    recorded_at: None,
                })
                .await?;
            println!(
                "Recorded {} session {} (score {:.1})",
                record.exercise_type, record.id, record.motion_score
            );
            if award_xp {
                let xp = projections::session_xp_reward(score, duration_secs);
                store.add_xp(xp, "session").await?;
                println!("Awarded {xp} XP");
            }
        }
        Command::AddXp { amount, source } => {
            let progress = store.add_xp(amount, &source).await?;
            println!("Total XP: {} (level {})", progress.xp, progress.level);
        }
        Command::Badges => {
            let badges = store.badges().await?;
            println!("Earned ({}):", badges.earned.len());
            for badge in &badges.earned {
                println!(
                    "  {} {} - unlocked {}",
                    badge.icon,
                    badge.title,
                    badge.unlocked_at.format("%Y-%m-%d")
                );
            }
            println!("Locked ({}):", badges.locked.len());
            for badge in &badges.locked {
                let percent = badges.progress.get(&badge.id).copied().unwrap_or(0.0);
                println!("  {} {} ({percent:.0}%) - {}", badge.icon, badge.title, badge.requirement);
            }
        }
        Command::Milestones => {
            let milestones = store.milestones().await?;
            let progress = store.progress().await?;
            let percents = projections::milestone_progress(&progress);

            println!("Pending:");
            for milestone in &milestones.in_progress {
                let percent = percents.get(&milestone.id).copied().unwrap_or(0.0);
                println!(
                    "  {} (+{} XP, {percent:.0}%) - {}",
                    milestone.id, milestone.xp_reward, milestone.description
                );
            }
            println!("Completed ({} XP earned):", milestones.total_xp_earned);
            for milestone in &milestones.completed {
                println!(
                    "  {} - {}",
                    milestone.id,
                    milestone.completed_at.format("%Y-%m-%d")
                );
            }
        }
        Command::Complete { milestone_id } => {
            if store.complete_milestone(&milestone_id).await? {
                println!("Milestone {milestone_id} completed");
            } else {
                println!("Milestone {milestone_id} is unknown or already completed");
            }
        }
        Command::Profile { name, email, avatar } => {
            if name.is_some() || email.is_some() || avatar.is_some() {
                let profile = store
                    .update_profile(ProfileUpdate { name, email, avatar })
                    .await?;
                println!("Profile updated for {}", profile.user_id);
            }
            let profile = store.profile().await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Settings { set } => {
            if let Some(json) = set {
                let update: SettingsUpdate = serde_json::from_str(&json)
                    .context("settings update contains invalid or unknown fields")?;
                store.update_settings(update).await?;
            }
            let settings = store.settings().await?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Command::History { limit } => {
            let sessions = store.sessions().await?;
            for record in sessions.history.iter().take(limit) {
                println!(
                    "{}  {:<10} score {:>5.1}  {}s",
                    record.recorded_at.format("%Y-%m-%d %H:%M"),
                    record.exercise_type,
                    record.motion_score,
                    record.duration_secs
                );
            }
            for day in projections::daily_summary(&sessions).iter().take(7) {
                println!(
                    "{}: {} session(s), avg {:.1}",
                    day.date, day.sessions, day.average_score
                );
            }
        }
        Command::Export { output } => {
            let export = store.export_user_data().await?;
            let json = serde_json::to_string_pretty(&export)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Import { input } => {
            let json = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let payload = serde_json::from_str(&json)
                .with_context(|| format!("{} is not a valid export", input.display()))?;
            store.import_user_data(payload).await?;
            println!("Import complete");
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("pass --yes to confirm wiping all user data");
            }
            store.reset_all_data().await?;
            println!("All user data reset to defaults");
        }
    }

    Ok(())
}
