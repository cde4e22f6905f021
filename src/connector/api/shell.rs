use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::ShowcaseSession;
use crate::domain::RecommendationError;

use super::container::Container;
use super::controller::render_entries;
use crate::cli::OutputFormat;

const HELP: &str = "\
Describe what you're looking for, or use:
  :featured           show featured products
  :category <name>    show a category
  :categories         list categories
  :help               show this help
  :quit               leave (Ctrl-D or Ctrl-C also work)
Ctrl-C aborts a running search.";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellInput<'a> {
    Empty,
    Quit,
    Help,
    Featured,
    Categories,
    Category(&'a str),
    Query(&'a str),
    Unknown(&'a str),
}

pub fn parse_shell_input(line: &str) -> ShellInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ShellInput::Empty;
    }

    let Some(command) = line.strip_prefix(':') else {
        return ShellInput::Query(line);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match (name, arg) {
        ("q" | "quit" | "exit", _) => ShellInput::Quit,
        ("h" | "help", _) => ShellInput::Help,
        ("featured", _) => ShellInput::Featured,
        ("categories", _) => ShellInput::Categories,
        ("category" | "c", arg) if !arg.is_empty() => ShellInput::Category(arg),
        _ => ShellInput::Unknown(line),
    }
}

/// Current listing plus the visible error, if any.
pub fn render_session(session: &ShowcaseSession) -> Result<String> {
    let mut output = render_entries(&session.view().title(), session.entries(), OutputFormat::Text)?;
    if let Some(error) = session.error() {
        output.push_str(&format!("\n\n! {error}"));
    }
    Ok(output)
}

pub struct Shell<'a> {
    container: &'a Container,
}

impl<'a> Shell<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn run(&self) -> Result<()> {
        let mut session = self
            .container
            .session()
            .map_err(|e| anyhow!(e.user_message()))?;

        let mut lines = spawn_stdin_reader();
        let (interrupt_tx, mut interrupts) = mpsc::unbounded_channel();
        let listener = tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if interrupt_tx.send(()).is_err() {
                    break;
                }
            }
        });

        let outcome = run_session(
            &mut session,
            &mut lines,
            &mut interrupts,
            &mut std::io::stdout(),
        )
        .await;
        listener.abort();
        outcome
    }
}

/// Stdin is read on a plain thread so a pending read never holds up runtime
/// shutdown.
fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Drive `session` from `lines` until input ends, `:quit` is entered or an
/// interrupt arrives at the prompt. An interrupt during a search cancels only
/// that search.
pub async fn run_session(
    session: &mut ShowcaseSession,
    lines: &mut UnboundedReceiver<String>,
    interrupts: &mut UnboundedReceiver<()>,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{HELP}\n")?;
    writeln!(out, "{}\n", render_session(session)?)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let line = tokio::select! {
            biased;
            line = lines.recv() => match line {
                Some(line) => line,
                None => break,
            },
            Some(()) = interrupts.recv() => {
                writeln!(out)?;
                break;
            }
        };

        match parse_shell_input(&line) {
            ShellInput::Empty => continue,
            ShellInput::Quit => break,
            ShellInput::Help => {
                writeln!(out, "{HELP}\n")?;
                continue;
            }
            ShellInput::Categories => {
                writeln!(out, "{}\n", session.categories().join(", "))?;
                continue;
            }
            ShellInput::Unknown(input) => {
                writeln!(out, "Unknown command: {input}. Type :help for commands.\n")?;
                continue;
            }
            ShellInput::Featured => session.show_featured(),
            ShellInput::Category(name) => {
                session.select_category(name);
            }
            ShellInput::Query(query) => {
                writeln!(out, "Analyzing...")?;
                if let Err(e) = search_interruptibly(session, query, interrupts).await {
                    if e.is_cancelled() {
                        writeln!(out, "Search cancelled.\n")?;
                        continue;
                    }
                    debug!("Search failed: {e}");
                }
            }
        }

        writeln!(out, "{}\n", render_session(session)?)?;
    }

    Ok(())
}

async fn search_interruptibly(
    session: &mut ShowcaseSession,
    query: &str,
    interrupts: &mut UnboundedReceiver<()>,
) -> Result<usize, RecommendationError> {
    let cancel = CancellationToken::new();
    let search = session.search(query, &cancel);
    tokio::pin!(search);

    loop {
        tokio::select! {
            outcome = &mut search => return outcome,
            Some(()) = interrupts.recv(), if !cancel.is_cancelled() => {
                debug!("Interrupt received; cancelling search");
                cancel.cancel();
            }
        }
    }
}
