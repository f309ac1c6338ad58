use std::io::{BufRead, Write};

use subtrack::model::SuggestionPayload;
use subtrack::pipeline::ChatTurn;

use super::*;

pub(super) fn handle_chat_command(
    pipeline: &mut MutationPipeline<DriveClient>,
    message: Option<String>,
    accept: bool,
) -> Result<()> {
    match message {
        Some(message) => {
            let turn = pipeline.ask(&message)?;
            print_turn(&turn);
            if accept && turn.suggestion().is_some() {
                accept_pending(pipeline)?;
            }
            Ok(())
        }
        None => run_repl(pipeline),
    }
}

fn run_repl(pipeline: &mut MutationPipeline<DriveClient>) -> Result<()> {
    println!("Ask about your subscriptions. Commands: /accept, /dismiss, /quit");
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        match line.trim() {
            "/quit" | "/exit" => break,
            "/accept" => accept_pending(pipeline)?,
            "/dismiss" => match pipeline.dismiss_suggestion() {
                Some(s) => println!("Dismissed {}", s.name),
                None => println!("No pending suggestion"),
            },
            other => {
                let turn = pipeline.ask(other)?;
                print_turn(&turn);
            }
        }
    }
    Ok(())
}

fn accept_pending(pipeline: &mut MutationPipeline<DriveClient>) -> Result<()> {
    match pipeline.accept_suggestion() {
        Ok(Some(record)) => println!("Added {} ({})", record.name, record.id),
        Ok(None) => println!("No pending suggestion"),
        Err(subtrack::Error::Validation(err)) => println!("Cannot add suggestion: {}", err),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn print_turn(turn: &ChatTurn) {
    if let Some(text) = turn.text() {
        println!("{}", text);
    }
    if let Some(suggestion) = turn.suggestion() {
        print_suggestion(suggestion);
    }
}

fn print_suggestion(s: &SuggestionPayload) {
    let fee = s.monthly_fee.as_ref().map(|f| f.coerce()).unwrap_or(0);
    println!();
    println!("Suggested: {} ({}/month)", s.name, fee);
    if let Some(category) = &s.category {
        println!("    category: {}", category);
    }
    if let Some(url) = &s.url {
        println!("    url: {}", url);
    }
}
