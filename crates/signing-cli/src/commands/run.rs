//! Run command implementation
//!
//! Plays a script against a signer form backed by an in-memory drag surface.
//! Drags, additions and removals re-render the surface; typed orders are
//! replayed onto it and awaited before the next step.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use signing_core::ManualOrder;
use signing_form::{FormConfig, SharedOracle, SignerForm};
use signing_sync::{MemorySurface, SkipReason};
use tracing::debug;

use crate::error::{CliError, Result};
use crate::script::{Script, Step, position_of_row};

/// Run a session script and print the result
pub fn run_script(script_path: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => FormConfig::load(path)?,
        None => FormConfig::default(),
    };
    let script = Script::load(script_path)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let form = runtime.block_on(play(&script, &config, !json))?;

    let payload = form.submit()?;
    if json {
        println!("{}", payload.to_json()?);
    } else {
        print_signers(&form);
    }
    Ok(())
}

/// Apply every step of `script`, echoing each outcome when `echo` is set
pub async fn play(script: &Script, config: &FormConfig, echo: bool) -> Result<SignerForm> {
    let (sequence, book) = script.lineup()?;
    let oracle: SharedOracle = Arc::new(book);
    let surface = MemorySurface::new(sequence.identities());

    let mut form = SignerForm::new(config, oracle)
        .with_sequence(sequence)
        .with_drag_surface(Arc::new(surface.clone()));
    if let Some(user) = &script.user {
        form = form.with_current_user(user.clone());
    }
    if let Some(mode) = script.mode {
        form.set_mode(mode);
    }
    for identity in form.pinned() {
        surface.pin(identity);
    }

    for (index, step) in script.steps.iter().enumerate() {
        let number = index + 1;
        match apply(&mut form, &surface, step).await {
            Ok(note) => {
                if echo {
                    println!("{} {:>2}. {}: {}", "✓".green(), number, step, note);
                }
            }
            Err(e) if e.is_rejection() => {
                if echo {
                    println!("{} {:>2}. {}: {}", "✗".yellow(), number, step, e);
                }
            }
            Err(e) => {
                return Err(CliError::user(format!("step {} ({}): {}", number, step, e)));
            }
        }

        if surface.items() != form.sequence().identities() {
            debug!(step = number, "Re-rendering drag surface");
            surface.reset(form.sequence().identities());
        }
    }

    Ok(form)
}

async fn apply(form: &mut SignerForm, surface: &MemorySurface, step: &Step) -> Result<String> {
    match step {
        Step::Add { name, email, role } => {
            if !form.can_add() {
                return Err(CliError::user("signer limit reached"));
            }
            let identity = form.add_signer(name.clone(), email.clone(), *role);
            Ok(format!("added as {}", identity))
        }
        Step::AddSelf => {
            let identity = form.add_self()?;
            Ok(format!("you are {}", identity))
        }
        Step::Remove { name } => {
            let identity = form
                .sequence()
                .iter()
                .find(|e| &e.name == name)
                .map(|e| e.identity.clone())
                .ok_or_else(|| CliError::user(format!("no signer named {}", name)))?;
            form.remove_signer(&identity)?;
            Ok("removed".to_string())
        }
        Step::Drag { from, to } => {
            let source = position_of_row(*from)?;
            let destination = to.map(position_of_row).transpose()?;
            match form.drag(source, destination)? {
                Some(moved) => Ok(format!("now on row {}", moved.to + 1)),
                None => Ok("dropped outside the list".to_string()),
            }
        }
        Step::TypeOrder { row, value } => {
            let edit = form.type_order(position_of_row(*row)?, value)?;
            let note = match &edit.outcome {
                ManualOrder::Pending => "waiting for input".to_string(),
                ManualOrder::Reverted { display } => format!("reverted to {}", display),
                ManualOrder::Unchanged => "unchanged".to_string(),
                ManualOrder::Moved(moved) => format!("now on row {}", moved.to + 1),
            };
            let Some(ticket) = edit.replay else {
                return Ok(note);
            };

            match ticket.skip_reason() {
                Some(reason) => Ok(format!("{}, surface {}", note, describe_skip(reason))),
                None => {
                    let report = ticket.finished().await?;
                    let steps = report.map(|r| r.steps).unwrap_or(0);
                    debug!(items = ?surface.items(), "Surface after replay");
                    Ok(format!("{}, replayed in {} step(s)", note, steps))
                }
            }
        }
        Step::Mode { mode } => {
            form.set_mode(*mode);
            Ok(format!("{} signing", mode))
        }
    }
}

fn describe_skip(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NothingToReplay => "already in place",
        SkipReason::SurfaceBusy => "busy, replay skipped",
        SkipReason::NoRuntime => "unavailable, replay skipped",
    }
}

fn print_signers(form: &SignerForm) {
    println!(
        "{} ({} signing)",
        "Signers".bold(),
        form.mode().to_string().cyan()
    );
    for entry in form.sequence() {
        let status = if form.is_locked(&entry.identity) {
            "signed".green()
        } else {
            "pending".yellow()
        };
        println!(
            "  {:>2}. {:<20} {:<28} {:<9} {}",
            entry.order,
            entry.name,
            entry.email,
            entry.role.to_string(),
            status
        );
    }
    if form.sequence().is_empty() {
        println!("  {}", "(no signers)".dimmed());
    }
}
