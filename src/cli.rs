//! `walletdesk` command line.
//!
//! Each invocation initializes the onboarding orchestrator against the
//! configured backend and drives one flow to completion. The seed phrase
//! ceremony runs interactively: the phrase is shown once, then rebuilt by
//! picking words from a shuffled pool by number.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use wd_app::usecases::{GetSettings, SettingsPatch, UpdateSettings};
use wd_app::OnboardingOrchestrator;
use wd_core::flow::FlowState;
use wd_core::onboarding::{DraftEdit, OnboardingTab};
use wd_core::security::SecretString;
use wd_core::seed::VerificationView;
use wd_core::settings::Settings;

use crate::adapters::ConsoleEventPort;
use crate::bootstrap::{wire_dependencies, AppConfig, AppDeps};

#[derive(Debug, Parser)]
#[command(name = "walletdesk", version, about = "Open, create and recover wallets")]
pub struct Cli {
    /// Config file (default: <config_dir>/walletdesk/walletdesk.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use the in-memory sandbox backend instead of the configured one
    #[arg(long, global = true)]
    pub sandbox: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the open wallet and the wallet list
    Status,
    /// Open an existing wallet
    Open {
        /// Wallet to open (default: first in the list)
        #[arg(long, value_name = "NAME")]
        wallet: Option<String>,
    },
    /// Create a wallet and verify its recovery phrase
    Create {
        name: String,
        /// Protect the wallet with a password (prompted)
        #[arg(long)]
        password: bool,
    },
    /// Recover a wallet from its recovery phrase
    Recover {
        name: String,
        /// Protect the wallet with a password (prompted)
        #[arg(long)]
        password: bool,
    },
    /// Close the open wallet
    Close,
    /// Delete a wallet
    Delete { name: String },
    /// Show or change developer settings
    Settings {
        #[arg(long, value_name = "BOOL")]
        developer_mode: Option<bool>,
        #[arg(long = "skip-seed-dialogs", value_name = "BOOL")]
        skip_seed_dialogs: Option<bool>,
    },
}

/// Line-oriented terminal I/O.
pub struct Terminal<R, W> {
    input: R,
    pub out: W,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    fn read_raw(&mut self, label: &str) -> anyhow::Result<String> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self
            .input
            .read_line(&mut line)
            .context("read from terminal")?
            == 0
        {
            bail!("unexpected end of input");
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(line)
    }

    pub fn prompt(&mut self, label: &str) -> anyhow::Result<String> {
        Ok(self.read_raw(label)?.trim().to_string())
    }

    /// Input is echoed; the value itself goes straight into a [`SecretString`].
    pub fn prompt_secret(&mut self, label: &str) -> anyhow::Result<SecretString> {
        self.read_raw(label).map(SecretString::from)
    }
}

/// Build dependencies from `config` and run `command` on the process terminal.
pub async fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let deps = wire_dependencies(config, Arc::new(ConsoleEventPort::new()))?;
    let mut term = Terminal::stdio();
    execute(command, &deps, &mut term).await
}

pub async fn execute<R: BufRead, W: Write>(
    command: Command,
    deps: &AppDeps,
    term: &mut Terminal<R, W>,
) -> anyhow::Result<()> {
    match command {
        Command::Settings {
            developer_mode,
            skip_seed_dialogs,
        } => {
            let patch = SettingsPatch {
                developer_mode,
                skip_seed_phrase_dialogs: skip_seed_dialogs,
            };
            let settings = if patch.is_empty() {
                GetSettings::new(Arc::clone(&deps.settings)).execute().await?
            } else {
                UpdateSettings::new(Arc::clone(&deps.settings))
                    .execute(patch)
                    .await?
            };
            print_settings(term, &settings)
        }
        Command::Status => print_status(ready(deps).await?, term).await,
        Command::Open { wallet } => open(ready(deps).await?, term, wallet).await,
        Command::Create { name, password } => {
            let orchestrator = ready(deps).await?;
            with_backend_listener(deps, create(orchestrator, term, &name, password)).await
        }
        Command::Recover { name, password } => {
            let orchestrator = ready(deps).await?;
            with_backend_listener(deps, recover(orchestrator, term, &name, password)).await
        }
        Command::Close => {
            let orchestrator = ready(deps).await?;
            let name = orchestrator.session().await.current_name().map(str::to_string);
            let Some(name) = name else {
                bail!("no wallet is open");
            };
            orchestrator.close_wallet().await?;
            writeln!(term.out, "Closed wallet {name}.")?;
            Ok(())
        }
        Command::Delete { name } => {
            ready(deps).await?.delete_wallet(&name).await?;
            writeln!(term.out, "Deleted wallet {name}.")?;
            Ok(())
        }
    }
}

async fn ready(deps: &AppDeps) -> anyhow::Result<&OnboardingOrchestrator> {
    deps.orchestrator.initialize().await?;
    Ok(deps.orchestrator.as_ref())
}

/// Keep catalog and session in sync with backend pushes while `flow` runs.
async fn with_backend_listener<F>(deps: &AppDeps, flow: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = anyhow::Result<()>>,
{
    let listener = match deps
        .orchestrator
        .start_backend_listener(Arc::clone(&deps.backend_events))
        .await
    {
        Ok(handle) => Some(handle),
        Err(err) => {
            warn!(error = %err, "backend events unavailable, continuing without them");
            None
        }
    };
    let result = flow.await;
    if let Some(handle) = listener {
        handle.abort();
    }
    result
}

async fn print_status<R: BufRead, W: Write>(
    orchestrator: &OnboardingOrchestrator,
    term: &mut Terminal<R, W>,
) -> anyhow::Result<()> {
    let session = orchestrator.session().await;
    match session.current() {
        Some(wallet) if wallet.secured => {
            writeln!(term.out, "Open wallet: {} (password protected)", wallet.name)?
        }
        Some(wallet) => writeln!(term.out, "Open wallet: {}", wallet.name)?,
        None => writeln!(term.out, "No wallet open.")?,
    }

    let catalog = orchestrator.catalog().await;
    if catalog.is_empty() {
        writeln!(term.out, "No wallets.")?;
        return Ok(());
    }
    writeln!(term.out, "Wallets:")?;
    for wallet in catalog.wallets() {
        let marker = if session.current_name() == Some(wallet.name.as_str()) {
            '*'
        } else {
            ' '
        };
        let lock = if wallet.secured { " (secured)" } else { "" };
        writeln!(term.out, "  {marker} {}{lock}", wallet.name)?;
    }
    Ok(())
}

fn print_settings<R, W: Write>(term: &mut Terminal<R, W>, settings: &Settings) -> anyhow::Result<()> {
    writeln!(term.out, "developer_mode = {}", settings.developer_mode)?;
    writeln!(
        term.out,
        "skip_seed_phrase_dialogs = {}",
        settings.skip_seed_phrase_dialogs
    )?;
    writeln!(
        term.out,
        "seed ceremony: {}",
        if settings.bypasses_seed_ceremony() {
            "skipped"
        } else {
            "required"
        }
    )?;
    Ok(())
}

async fn open<R: BufRead, W: Write>(
    orchestrator: &OnboardingOrchestrator,
    term: &mut Terminal<R, W>,
    wallet: Option<String>,
) -> anyhow::Result<()> {
    orchestrator.open_dialog(OnboardingTab::Open).await?;
    let catalog = orchestrator.catalog().await;
    if catalog.is_empty() {
        bail!("no wallets found; create one with `walletdesk create NAME`");
    }

    if let Some(name) = wallet {
        let found = catalog
            .find(&name)
            .with_context(|| format!("wallet '{name}' not found"))?;
        orchestrator
            .edit(DraftEdit::SelectWallet(found.name.clone()))
            .await?;
    }

    let selected = orchestrator
        .draft_view()
        .await
        .selected_wallet
        .context("no wallet selected")?;
    if catalog.find(&selected).is_some_and(|w| w.secured) {
        let password = term.prompt_secret(&format!("Password for {selected}: "))?;
        orchestrator.edit(DraftEdit::OpenPassword(password)).await?;
    }

    let state = orchestrator.submit_open().await?;
    finish(orchestrator, term, state, "Opened").await
}

async fn fill_new_wallet<R: BufRead, W: Write>(
    orchestrator: &OnboardingOrchestrator,
    term: &mut Terminal<R, W>,
    name: &str,
    with_password: bool,
) -> anyhow::Result<()> {
    orchestrator
        .edit(DraftEdit::NewName(name.to_string()))
        .await?;
    orchestrator
        .edit(DraftEdit::UsePasswordProtection(with_password))
        .await?;
    if with_password {
        let password = term.prompt_secret("New password: ")?;
        orchestrator.edit(DraftEdit::NewPassword(password)).await?;
        let confirm = term.prompt_secret("Confirm password: ")?;
        orchestrator.edit(DraftEdit::ConfirmPassword(confirm)).await?;
    }
    Ok(())
}

async fn create<R: BufRead, W: Write>(
    orchestrator: &OnboardingOrchestrator,
    term: &mut Terminal<R, W>,
    name: &str,
    with_password: bool,
) -> anyhow::Result<()> {
    orchestrator.open_dialog(OnboardingTab::Create).await?;
    fill_new_wallet(orchestrator, term, name, with_password).await?;

    let state = orchestrator.submit_create().await?;
    let state = match state {
        FlowState::AwaitingSeedDisplay => match run_seed_ceremony(orchestrator, term).await? {
            Some(state) => state,
            None => {
                writeln!(term.out, "Wallet creation cancelled.")?;
                return Ok(());
            }
        },
        other => other,
    };
    finish(orchestrator, term, state, "Created").await
}

async fn recover<R: BufRead, W: Write>(
    orchestrator: &OnboardingOrchestrator,
    term: &mut Terminal<R, W>,
    name: &str,
    with_password: bool,
) -> anyhow::Result<()> {
    orchestrator.open_dialog(OnboardingTab::Create).await?;
    orchestrator.edit(DraftEdit::RecoveryMode(true)).await?;
    let phrase = term.prompt_secret("Recovery phrase: ")?;
    orchestrator.edit(DraftEdit::RecoveryPhrase(phrase)).await?;
    fill_new_wallet(orchestrator, term, name, with_password).await?;

    let state = orchestrator.submit_recover().await?;
    finish(orchestrator, term, state, "Recovered").await
}

async fn finish<R, W: Write>(
    orchestrator: &OnboardingOrchestrator,
    term: &mut Terminal<R, W>,
    state: FlowState,
    verb: &str,
) -> anyhow::Result<()> {
    match state {
        FlowState::Open => {
            let session = orchestrator.session().await;
            let name = session.current_name().unwrap_or("?");
            info!(wallet = %name, "{} wallet", verb.to_lowercase());
            writeln!(term.out, "{verb} wallet {name}.")?;
            Ok(())
        }
        state => match state.error() {
            Some(error) => bail!("{error}"),
            None => bail!("wallet flow stopped in state {}", state.name()),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PuzzleInput {
    /// Zero-based pool index.
    Select(usize),
    Undo,
    Reshuffle,
    Clear,
    Quit,
    Invalid,
}

fn parse_puzzle_input(input: &str, pool_len: usize) -> PuzzleInput {
    match input.trim().to_ascii_lowercase().as_str() {
        "u" | "undo" => PuzzleInput::Undo,
        "r" | "reshuffle" => PuzzleInput::Reshuffle,
        "c" | "clear" => PuzzleInput::Clear,
        "q" | "quit" => PuzzleInput::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=pool_len).contains(&n) => PuzzleInput::Select(n - 1),
            _ => PuzzleInput::Invalid,
        },
    }
}

fn render_puzzle<R, W: Write>(
    term: &mut Terminal<R, W>,
    view: &VerificationView,
) -> anyhow::Result<()> {
    writeln!(term.out)?;
    writeln!(term.out, "Selected: {}", view.selected.join(" "))?;
    for (i, word) in view.pool.iter().enumerate() {
        writeln!(term.out, "  {:>2}) {word}", i + 1)?;
    }
    Ok(())
}

/// Returns `None` when the user cancels. The pending wallet is discarded in
/// that case.
async fn run_seed_ceremony<R: BufRead, W: Write>(
    orchestrator: &OnboardingOrchestrator,
    term: &mut Terminal<R, W>,
) -> anyhow::Result<Option<FlowState>> {
    let words = orchestrator
        .seed_words()
        .await
        .context("recovery phrase is not available")?;
    writeln!(term.out, "Write down your recovery phrase:")?;
    for (i, word) in words.iter().enumerate() {
        writeln!(term.out, "  {:>2}. {word}", i + 1)?;
    }

    if term.prompt("Press Enter once it is saved (q to cancel): ")? == "q" {
        orchestrator.cancel().await?;
        return Ok(None);
    }
    orchestrator.acknowledge_seed_saved().await?;
    writeln!(
        term.out,
        "Rebuild the phrase by picking word numbers in order. u: undo, r: reshuffle, c: clear, q: cancel"
    )?;

    loop {
        match orchestrator.get_state().await {
            FlowState::AwaitingSeedVerification { error } => {
                if let Some(error) = error {
                    writeln!(term.out, "{error}")?;
                }
                let view = orchestrator
                    .verification_view()
                    .await
                    .context("verification is not available")?;
                render_puzzle(term, &view)?;

                match parse_puzzle_input(&term.prompt("> ")?, view.pool.len()) {
                    PuzzleInput::Select(index) => {
                        let updated = orchestrator
                            .select_seed_word(&view.pool[index], index)
                            .await?;
                        if updated.complete {
                            orchestrator.verify_seed_phrase().await?;
                        }
                    }
                    PuzzleInput::Undo => {
                        if let Some(word) = view.selected.last() {
                            orchestrator
                                .deselect_seed_word(word, view.selected.len() - 1)
                                .await?;
                        }
                    }
                    PuzzleInput::Reshuffle => {
                        orchestrator.reshuffle_seed_pool().await?;
                    }
                    PuzzleInput::Clear => {
                        orchestrator.clear_seed_selection().await?;
                    }
                    PuzzleInput::Quit => {
                        orchestrator.cancel().await?;
                        return Ok(None);
                    }
                    PuzzleInput::Invalid => writeln!(term.out, "Enter a word number, u, r, c or q.")?,
                }
            }
            FlowState::AwaitingCommitRetry { error } => {
                writeln!(term.out, "Creating the wallet failed: {error}")?;
                let answer = term.prompt("Retry with the same phrase? [Y/n] ")?;
                if answer.eq_ignore_ascii_case("n") {
                    orchestrator.cancel().await?;
                    return Ok(None);
                }
                orchestrator.retry_create().await?;
            }
            other => return Ok(Some(other)),
        }
    }
}
