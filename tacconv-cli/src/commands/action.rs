//! One-shot actions: `tacconv validate|compile|complete|assembly|resources|optimize|health`.
//!
//! The startup health check runs alongside the requested action. Every
//! notification either of them raises is printed, in the order raised.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Args;
use tacconv::context::AppContext;
use tacconv::controller::{Action, ActionOutcome, Controller};
use tacconv::gateway::HttpTransport;
use tacconv::render::{draw, RenderOptions, RenderSink};

use crate::error::CliError;
use crate::runner::CliRunner;
use crate::terminal::TerminalSink;

/// Arguments shared by the source-consuming actions.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// TAC source file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Show original and optimized code side by side
    #[arg(long)]
    pub diff: bool,
}

/// Read the TAC program from `file`, or from stdin.
pub fn read_source(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(|e| CliError::read_source(path, e)),
        None => {
            if atty::is(atty::Stream::Stdin) {
                eprintln!("Reading TAC from stdin, finish with Ctrl-D");
            }
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| CliError::read_source(Path::new("<stdin>"), e))?;
            Ok(source)
        }
    }
}

/// Run `action` on `source` and print the resulting view.
///
/// Returns whether the action succeeded.
pub fn run(
    runner: &CliRunner,
    action: Action,
    source: &str,
    options: RenderOptions,
) -> Result<bool, CliError> {
    runner.log_startup(action.id());

    let ctx = runner.context()?;
    let controller = Controller::new(&ctx);
    let outcome = runner.runtime()?.block_on(execute(&controller, action, source));

    let mut out = TerminalSink::stdout();
    draw(&mut out, &controller.view(), options)?;
    out.flush()?;

    report_notifications(&ctx, &mut TerminalSink::stderr())?;
    Ok(outcome.is_success())
}

/// Dispatch `action`, launching the startup health check next to it.
///
/// A health action is its own check, so nothing else is launched then.
pub async fn execute<T: HttpTransport>(
    controller: &Controller<'_, T>,
    action: Action,
    source: &str,
) -> ActionOutcome {
    if action == Action::Health {
        return controller.dispatch(action, source).await;
    }
    let (_, outcome) = tokio::join!(
        controller.startup_health_check(),
        controller.dispatch(action, source)
    );
    outcome
}

/// Print every notification raised during the session, oldest first.
fn report_notifications<T, S>(ctx: &AppContext<T>, sink: &mut S) -> Result<(), CliError>
where
    S: RenderSink<Error = io::Error>,
{
    for notification in ctx.notifications.drain() {
        sink.notification(&notification)?;
    }
    Ok(())
}
