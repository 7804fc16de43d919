//! Calorie Intake Admin CLI
//!
//! Administration tool for managing users and their biometric history.
//!
//! # Usage
//!
//! ```bash
//! calorie-intake-admin user add sam@example.com --gender male --dob 1990-05-01 --goal weightLoss
//! calorie-intake-admin user height sam@example.com 175
//! calorie-intake-admin user weight sam@example.com 72.5
//! calorie-intake-admin user list
//! calorie-intake-admin user show sam@example.com
//! calorie-intake-admin user remove sam@example.com
//! ```
//!
//! Reads the same configuration as the server (`CALORIE_CONFIG`,
//! `CALORIE_DATABASE_PATH`).

use calorie_intake::config::Config;
use calorie_intake::db::{init_db, UserRepository, UserStore};
use calorie_intake::intake::max_calorie_intake;
use calorie_intake::models::{Gender, Goal, HeightEntry, User, WeightEntry};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "calorie-intake-admin")]
#[command(version)]
#[command(about = "Calorie intake server administration tool")]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User(UserCommand),
}

#[derive(Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand)]
enum UserSubcommand {
    /// Add a new user and generate an API key
    Add {
        /// User's email address
        email: String,
        /// male, female or other
        #[arg(long, short)]
        gender: Gender,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: NaiveDate,
        /// weightLoss, weightGain or maintain
        #[arg(long, default_value = "maintain")]
        goal: Goal,
        /// User's display name
        #[arg(long, short)]
        name: Option<String>,
    },
    /// List all users
    List,
    /// Show a user's profile and goal calories
    Show {
        /// User's email address
        email: String,
    },
    /// Remove a user and all their entries
    Remove {
        /// User's email address
        email: String,
    },
    /// Record a height measurement in centimetres
    Height {
        email: String,
        cm: f64,
        /// Measurement date (YYYY-MM-DD), defaults to now
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record a weight measurement in kilograms
    Weight {
        email: String,
        kg: f64,
        /// Measurement date (YYYY-MM-DD), defaults to now
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Change a user's dietary goal
    Goal { email: String, goal: Goal },
}

// ============================================================================
// Helpers
// ============================================================================

/// Generates an API key: 32 random bytes encoded as base64url (no padding).
fn generate_api_key() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Local midnight of `date`, or now when absent.
fn measurement_time(date: Option<NaiveDate>) -> DateTime<Utc> {
    date.and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

fn validate_measurement(value: f64, what: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be a positive number", what).into());
    }
    Ok(())
}

async fn require_user(
    repo: &UserRepository,
    email: &str,
) -> Result<User, Box<dyn std::error::Error>> {
    repo.find_by_email(email)
        .await?
        .ok_or_else(|| format!("User '{}' not found", email).into())
}

// ============================================================================
// Commands
// ============================================================================

async fn add_user(
    repo: &UserRepository,
    email: String,
    gender: Gender,
    dob: NaiveDate,
    goal: Goal,
    name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if repo.find_by_email(&email).await?.is_some() {
        return Err(format!("User '{}' already exists", email).into());
    }

    let mut user = User::new(&email, gender, dob, goal);
    if let Some(n) = name {
        user = user.with_name(n);
    }
    let user = repo.create(&user).await?;
    let key = generate_api_key();

    println!("Added user: {}", user.email);
    println!("  ID: {}", user.id);
    println!("  Gender: {}", user.gender);
    println!("  Date of birth: {}", user.dob);
    println!("  Goal: {}", user.goal);
    if let Some(n) = &user.name {
        println!("  Name: {}", n);
    }
    println!();
    println!("Add this entry to the server config under api_keys:");
    println!("  - key: \"{}\"", key);
    println!("    user_id: \"{}\"", user.id);

    Ok(())
}

async fn list_users(repo: &UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    let users = repo.list().await?;

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!(
        "{:<36} {:<32} {:<8} {:<12} {:>8}",
        "ID", "EMAIL", "GENDER", "GOAL", "ENTRIES"
    );
    println!("{}", "-".repeat(100));

    for user in &users {
        println!(
            "{:<36} {:<32} {:<8} {:<12} {:>8}",
            user.id,
            user.email,
            user.gender,
            user.goal,
            user.calorie_intake.len()
        );
    }

    println!();
    println!("Total: {} user(s)", users.len());

    Ok(())
}

async fn show_user(repo: &UserRepository, email: String) -> Result<(), Box<dyn std::error::Error>> {
    let user = require_user(repo, &email).await?;

    println!("User: {}", user.email);
    println!("{}", "=".repeat(30));
    println!("ID: {}", user.id);
    if let Some(n) = &user.name {
        println!("Name: {}", n);
    }
    println!("Gender: {}", user.gender);
    println!("Date of birth: {}", user.dob);
    println!("Goal: {}", user.goal);
    match user.current_height() {
        Some(h) => println!("Height: {} cm", h),
        None => println!("Height: not recorded"),
    }
    match user.current_weight() {
        Some(w) => println!("Weight: {} kg", w),
        None => println!("Weight: not recorded"),
    }
    println!("Entries: {}", user.calorie_intake.len());

    match max_calorie_intake(&user, Local::now().date_naive()) {
        Ok(target) => println!("Daily target: {:.0} kcal", target),
        Err(e) => println!("Daily target: unavailable ({})", e),
    }

    if let Some(last) = user.calorie_intake.last() {
        println!("Last entry: {}", last);
    }

    Ok(())
}

async fn remove_user(
    repo: &UserRepository,
    email: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = require_user(repo, &email).await?;

    repo.delete(user.id).await?;

    println!("Removed user: {}", email);
    println!("Remember to remove their key from the server config.");

    Ok(())
}

async fn record_height(
    repo: &UserRepository,
    email: String,
    cm: f64,
    date: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_measurement(cm, "Height")?;
    let mut user = require_user(repo, &email).await?;

    user.height.push(HeightEntry {
        height: cm,
        date: measurement_time(date),
    });
    repo.save(&user).await?;

    println!("Recorded height for {}: {} cm", email, cm);
    Ok(())
}

async fn record_weight(
    repo: &UserRepository,
    email: String,
    kg: f64,
    date: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_measurement(kg, "Weight")?;
    let mut user = require_user(repo, &email).await?;

    user.weight.push(WeightEntry {
        weight: kg,
        date: measurement_time(date),
    });
    repo.save(&user).await?;

    println!("Recorded weight for {}: {} kg", email, kg);
    Ok(())
}

async fn set_goal(
    repo: &UserRepository,
    email: String,
    goal: Goal,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut user = require_user(repo, &email).await?;

    user.goal = goal;
    repo.save(&user).await?;

    println!("Updated goal for {}: {}", email, goal);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    let pool = init_db(&config.database_path).await?;
    let repo = UserRepository::new(pool);

    match cli.command {
        Commands::User(user_cmd) => match user_cmd.command {
            UserSubcommand::Add {
                email,
                gender,
                dob,
                goal,
                name,
            } => add_user(&repo, email, gender, dob, goal, name).await,
            UserSubcommand::List => list_users(&repo).await,
            UserSubcommand::Show { email } => show_user(&repo, email).await,
            UserSubcommand::Remove { email } => remove_user(&repo, email).await,
            UserSubcommand::Height { email, cm, date } => {
                record_height(&repo, email, cm, date).await
            }
            UserSubcommand::Weight { email, kg, date } => {
                record_weight(&repo, email, kg, date).await
            }
            UserSubcommand::Goal { email, goal } => set_goal(&repo, email, goal).await,
        },
    }
}
