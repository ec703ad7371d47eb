//! Print a nutrition report as JSON
//!
//! Usage:
//!   cargo run --bin nutrition_report -- --email ada@example.com
//!   cargo run --bin nutrition_report -- --weight 70 --height 175 --age 30 --sex male \
//!       [--activity moderately_active] [--goal maintain_weight]

use std::collections::HashMap;

use fitnutrition::config::Config;
use fitnutrition::db::{migrations, Database};
use fitnutrition::models::User;
use fitnutrition::nutrition::compute_report;
use fitnutrition::nutrition::tables::MICRONUTRIENT_TABLE;
use fitnutrition::tools::ProfileInput;

const USAGE: &str = "usage: nutrition_report --email <email>\n       \
    nutrition_report --weight <kg> --height <cm> --age <years> --sex <male|female> \
    [--activity <level>] [--goal <goal>]";

fn parse_flags(args: &[String]) -> Result<HashMap<String, String>, String> {
    let mut flags = HashMap::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let name = arg
            .strip_prefix("--")
            .ok_or_else(|| format!("unexpected argument: {}", arg))?;
        let value = iter
            .next()
            .ok_or_else(|| format!("missing value for --{}", name))?;
        flags.insert(name.to_string(), value.clone());
    }
    Ok(flags)
}

fn required<'a>(flags: &'a HashMap<String, String>, name: &str) -> Result<&'a str, String> {
    flags
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| format!("missing --{}\n{}", name, USAGE))
}

fn number<T: std::str::FromStr>(flags: &HashMap<String, String>, name: &str) -> Result<T, String> {
    let raw = required(flags, name)?;
    raw.parse()
        .map_err(|_| format!("--{} must be a number, got {}", name, raw))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let flags = parse_flags(&args)?;

    let profile = if let Some(email) = flags.get("email") {
        let config = Config::from_env();
        eprintln!("Database: {}", config.database_path.display());

        let database = Database::new(&config.database_path)?;
        let user = database.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            User::get_by_email(conn, email)
        })?;

        match user {
            Some(user) => {
                eprintln!("User: {} (id {})", user.name, user.id);
                user.profile()
            }
            None => return Err(format!("No user with email {}", email).into()),
        }
    } else {
        let input = ProfileInput {
            weight_kg: number(&flags, "weight")?,
            height_cm: number(&flags, "height")?,
            age_years: number(&flags, "age")?,
            sex: required(&flags, "sex")?.to_string(),
            activity_level: flags.get("activity").cloned(),
            goal: flags.get("goal").cloned(),
        };
        input.parse()?
    };

    eprintln!("Activity: {}", profile.activity_level.display_name());
    let report = compute_report(&profile)?;

    eprintln!("Micronutrients:");
    for (nutrient, _) in MICRONUTRIENT_TABLE.iter() {
        eprintln!(
            "  {:<12} {} {}",
            nutrient.key(),
            report.micronutrients.get(*nutrient),
            nutrient.unit()
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
