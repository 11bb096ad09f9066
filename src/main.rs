//! CLI interface for travel-planner

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs;
use travel_planner::prompt::VALIDATION_MARKER;
use travel_planner::{build_prompt, dashboard::JapanTrip, DetailExtractor, ItineraryClient};

#[derive(Parser)]
#[command(name = "travel-planner")]
#[command(about = "Extract travel details from free text and generate itineraries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract travel details from a free-text request
    Extract {
        /// The travel request, e.g. "2 adults from Delhi to Tokyo for a week from 13th april"
        text: String,
        /// Output file for the JSON record
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Extract details, build the prompt and generate an itinerary
    Plan {
        /// The travel request
        text: String,
        /// Print the prompt without calling the generation service
        #[arg(long)]
        prompt_only: bool,
        /// Output file for the generated itinerary
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the bundled Japan trip itinerary
    Itinerary {
        /// Output file for the plain-text export
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_planner=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { text, output } => {
            let extractor = DetailExtractor::new()?;
            let request = extractor.extract(&text);

            println!("Extracted Travel Details");
            for (label, value) in request.to_rows() {
                println!("{:<28} {}", label, value);
            }

            let json = serde_json::to_string_pretty(&request)?;
            if let Some(output_file) = output {
                fs::write(&output_file, &json)?;
                println!("\nRecord saved to {}", output_file);
            } else {
                println!("\n{}", json);
            }
        }
        Commands::Plan {
            text,
            prompt_only,
            output,
        } => {
            let extractor = DetailExtractor::new()?;
            let request = extractor.extract(&text);
            let today = chrono::Local::now().date_naive();

            let prompt = match build_prompt(&request, today) {
                Ok(prompt) => prompt,
                Err(e) => {
                    eprintln!("{} {}", VALIDATION_MARKER, e);
                    std::process::exit(1);
                }
            };

            println!("Itinerary Request Prompt");
            println!("{}\n", prompt);

            if prompt_only {
                return Ok(());
            }

            let client = ItineraryClient::from_env()?;
            println!("Generating detailed itinerary...");
            match client.generate(&prompt).await {
                Ok(itinerary) => {
                    if let Some(output_file) = output {
                        fs::write(&output_file, &itinerary)?;
                        println!("Itinerary saved to {}", output_file);
                    } else {
                        println!("\nYour Personalized Itinerary");
                        println!("{}", itinerary);
                    }
                    let json = serde_json::to_string_pretty(&request)?;
                    println!("\nExtracted Travel Details (JSON)");
                    println!("{}", json);
                }
                Err(e) => {
                    eprintln!("Error generating itinerary: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Itinerary { output } => {
            let trip = JapanTrip::new();
            let text = trip.to_plain_text();
            if let Some(output_file) = output {
                fs::write(&output_file, &text)?;
                println!("Itinerary saved to {}", output_file);
            } else {
                println!("{}", text);
                let days_left = trip.countdown_days(chrono::Local::now().date_naive());
                if days_left > 0 {
                    println!("{} days until your Japan adventure begins!", days_left);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "travel-planner",
            "extract",
            "2 adults going to Tokyo for a week",
        ]);
        assert!(cli.is_ok());

        if let Ok(Cli {
            command: Commands::Extract { text, output },
        }) = cli
        {
            assert_eq!(text, "2 adults going to Tokyo for a week");
            assert!(output.is_none());
        }
    }

    #[test]
    fn test_plan_flags() {
        let cli = Cli::try_parse_from([
            "travel-planner",
            "plan",
            "luxury honeymoon in Bali",
            "--prompt-only",
        ])
        .unwrap();

        match cli.command {
            Commands::Plan { prompt_only, .. } => assert!(prompt_only),
            _ => panic!("expected plan subcommand"),
        }
    }
}
