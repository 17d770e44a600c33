use clap::{Parser, Subcommand};
use nl2sql_rs::config::load_config;
use nl2sql_rs::graph::PipelineBuilder;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a question through the NL2SQL pipeline
    Run {
        /// The natural-language question
        #[arg(short, long)]
        question: String,

        /// Path to a pipeline definition (defaults to the built-in pipeline)
        #[arg(short, long)]
        pipeline: Option<String>,

        /// Pretty-print the resulting state
        #[arg(long)]
        pretty: bool,
    },
    /// Show the loaded configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = load_config();

    let default_level = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Run {
            question,
            pipeline,
            pretty,
        } => {
            let builder = PipelineBuilder::new();
            let graph = match &pipeline {
                Some(path) => builder.build_file(path)?,
                None => builder.build_default()?,
            };

            log::info!("Running pipeline: {}", graph.name());
            let state = graph.run(question).await?;

            let output = if pretty {
                serde_json::to_string_pretty(&state)?
            } else {
                serde_json::to_string(&state)?
            };
            println!("{}", output);
        }
        Commands::Config => {
            println!("NL2SQL configuration:");
            for (key, value) in config.to_dict() {
                println!("  {}: {}", key, value);
            }
            println!("Configuration loaded");
        }
    }

    Ok(())
}
