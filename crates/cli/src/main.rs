use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pizza_agents::PizzaAgent;
use pizza_core::{Catalog, ChatInput, SeededChoice};
use pizza_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "pizza")]
#[command(about = "Pizza Today responder CLI")]
struct Cli {
    /// Seed for recommendation and offer picks.
    #[arg(long, env = "PIZZA_RNG_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive chat; type 'exit' to quit.
    Chat,
    /// Answer a single message.
    Ask {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Print the menu and offers as JSON.
    Menu,
}

fn main() -> Result<()> {
    init_tracing("pizza_cli");
    let cli = Cli::parse();

    let agent = PizzaAgent::new(
        Arc::new(Catalog::default_menu()),
        Arc::new(SeededChoice::from_optional_seed(cli.seed)),
        AppMetrics::shared(),
    );

    match cli.command {
        Command::Chat => run_chat(&agent)?,
        Command::Ask { text } => {
            let reply = agent.handle_chat(ChatInput::new(text.join(" ")));
            println!("{}", reply.text());
        }
        Command::Menu => {
            println!(
                "{}",
                serde_json::to_string_pretty(agent.catalog()).context("failed to render menu")?
            );
        }
    }

    Ok(())
}

fn run_chat(agent: &PizzaAgent) -> Result<()> {
    println!("Pizza Today chat mode. type 'exit' to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        let reply = agent.handle_chat(ChatInput::new(message));
        println!("\n{}\n", reply.text());
    }

    Ok(())
}
