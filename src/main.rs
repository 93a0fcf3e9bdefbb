use std::fs::File;
use std::io::{stdin, stdout, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use mindcheck::config::{Config, ReportFormat};
use mindcheck::conversation::{ConversationStore, InMemoryConversationStore};
use mindcheck::mood::{
    daily_series, mood_trend, InMemoryMoodStore, MoodDraft, MoodStore, MAX_WINDOW_DAYS,
};
use mindcheck::profile::Persona;
use mindcheck::recommendation::crisis_resources;
use mindcheck::{telemetry, AssessmentResult, AssessmentSession, AssessmentType, Error, QUESTION_BANK};

#[derive(Parser)]
#[command(name = "mindcheck", version, about = "Self-assessments and mood trends in the terminal")]
struct Cli {
    /// Directory holding mindcheck.toml
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    /// text or json (overrides the config file)
    #[arg(long, global = true)]
    format: Option<ReportFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer an assessment question by question
    Take {
        /// phq9, gad7, wellbeing or generic
        #[arg(default_value = "phq9")]
        assessment: AssessmentType,
    },
    /// Summarise a JSON file of mood journal entries
    Mood {
        path: PathBuf,
        /// Days to average over (overrides the config file)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS)))]
        window_days: Option<u32>,
    },
    /// Chat with the companion; an empty line ends the conversation
    Chat {
        /// aria, dr_aegis or aiden
        #[arg(long, default_value = "aria")]
        persona: Persona,
    },
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config_dir)?;
    telemetry::init(&config.telemetry)?;
    let format = cli.format.unwrap_or(config.report.format);

    match cli.command {
        Command::Take { assessment } => take(assessment, format),
        Command::Mood { path, window_days } => {
            mood_report(&path, window_days.unwrap_or(config.mood.window_days), format)
        }
        Command::Chat { persona } => chat(persona),
    }
}

fn chat(persona: Persona) -> Result<(), Error> {
    let store = InMemoryConversationStore::new();
    let conversation = store.create("Check-in", persona);
    println!("{}: Hi there! How are you feeling today?", persona.display_name());

    let mut buffer = String::new();
    loop {
        print!("> ");
        stdout().flush()?;
        buffer.clear();
        if stdin().read_line(&mut buffer)? == 0 || buffer.trim().is_empty() {
            break;
        }
        let reply = store.send(&conversation.id, buffer.trim())?;
        println!("{}: {}", persona.display_name(), reply.content);
    }
    Ok(())
}

fn mood_report(path: &Path, window_days: u32, format: ReportFormat) -> Result<(), Error> {
    let drafts: Vec<MoodDraft> = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let store = InMemoryMoodStore::new();
    for draft in drafts {
        store.create(draft)?;
    }

    let entries = store.list(usize::MAX);
    let now = Utc::now();
    let trend = mood_trend(&entries, now, window_days);
    let series = daily_series(&entries, now.date_naive(), window_days);

    match format {
        ReportFormat::Text => {
            println!("Last {} days: {} entries", window_days, trend.entries);
            match (trend.average_mood, trend.average_energy) {
                (Some(mood), Some(energy)) => {
                    println!("Average mood: {:.1}/10, average energy: {:.1}/10", mood, energy)
                }
                _ => println!("No entries in this window."),
            }
            if let Some(mood_type) = trend.dominant_mood_type {
                println!("Most often: {}", mood_type.label());
            }
            for day in series {
                match (day.mood, day.band) {
                    (Some(mood), Some(band)) => {
                        println!("  {} {} ({})", day.date.format("%b %d"), mood, band.as_str())
                    }
                    _ => println!("  {} -", day.date.format("%b %d")),
                }
            }
        }
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "window_days": window_days,
                "trend": trend,
                "daily": series,
            }))?
        ),
    }
    Ok(())
}

fn take(assessment: AssessmentType, format: ReportFormat) -> Result<(), Error> {
    let spec = assessment.spec();
    println!("{} (about {} min)", spec.title, spec.estimated_minutes);
    println!("{}", spec.description);
    if let Some(instruction) = QUESTION_BANK.instruction(assessment) {
        println!("{}", instruction);
    }
    println!("Enter the number of your answer, or `b` to go back.");
    println!();

    let mut session = AssessmentSession::new(assessment);
    session.start()?;
    let mut buffer = String::new();

    while !session.is_ready() {
        let Some(question) = session.current_question() else {
            break;
        };
        println!("{}", question.text);
        for option in &question.options {
            print!("  {} => {}", option.value, option.label);
        }
        if let Some(value) = session.answers().get(question_index(&session)) {
            print!("  (current: {})", value);
        }
        println!();
        stdout().flush()?;

        buffer.clear();
        if stdin().read_line(&mut buffer)? == 0 {
            return Err(Error::IncompleteAnswers {
                missing: session.answers().next_unanswered(),
                answered: session.answers().len(),
                expected: assessment.question_count(),
            });
        }
        let outcome = match parse_input(buffer.trim()) {
            Input::Back => session.previous(),
            Input::Value(value) => session.answer(value),
            Input::Unrecognised => {
                println!("Please enter one of the numbers shown.");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            println!("{}", e);
        }
        println!();
    }

    let result = session.complete()?;
    match format {
        ReportFormat::Text => print_result(&result),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

fn question_index(session: &AssessmentSession) -> usize {
    match session.state() {
        mindcheck::SessionState::InProgress(index) => index,
        _ => 0,
    }
}

/// 対話入力の1行
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Back,
    Value(u8),
    Unrecognised,
}

fn parse_input(value: &str) -> Input {
    if value.eq_ignore_ascii_case("b") {
        return Input::Back;
    }
    value.parse::<u8>().map_or(Input::Unrecognised, Input::Value)
}

fn print_result(result: &AssessmentResult) {
    println!(
        "Score: {}/{} ({})",
        result.total_score(),
        result.max_score(),
        result.severity_level()
    );
    println!("{}", result.summary());
    println!();
    println!("Recommendations:");
    for recommendation in result.recommendations() {
        println!("  - {}", recommendation);
    }
    if result.requires_urgent_notice() {
        println!();
        println!("Please reach out for support now:");
        for resource in crisis_resources() {
            println!("  {}: {} ({})", resource.name, resource.contact, resource.description);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("b"), Input::Back);
        assert_eq!(parse_input("B"), Input::Back);
        assert_eq!(parse_input("2"), Input::Value(2));
        assert_eq!(parse_input("two"), Input::Unrecognised);
        assert_eq!(parse_input("-1"), Input::Unrecognised);
        assert_eq!(parse_input("300"), Input::Unrecognised);
    }

    #[test]
    fn test_window_days_is_bounded() {
        assert!(Cli::try_parse_from(["mindcheck", "mood", "moods.json", "--window-days", "30"]).is_ok());
        assert!(Cli::try_parse_from(["mindcheck", "mood", "moods.json", "--window-days", "0"]).is_err());
        assert!(Cli::try_parse_from(["mindcheck", "mood", "moods.json", "--window-days", "4294967295"]).is_err());
    }
}
