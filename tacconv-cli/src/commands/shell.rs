//! Interactive session: `tacconv shell`.
//!
//! Holds a TAC buffer and forwards action words to the controller. Lines
//! are read asynchronously so the startup health check can finish while
//! the prompt is waiting.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use tacconv::controller::{Action, AttemptOutcome, Controller, Section};
use tacconv::gateway::HttpTransport;
use tacconv::render::{draw, RenderOptions, RenderSink};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::error::CliError;
use crate::runner::CliRunner;
use crate::terminal::TerminalSink;

const HELP: &str = "\
Buffer:
  load <file>   replace the buffer with a file
  edit          type a new buffer, end with a line holding only '.'
  show          print the buffer
Actions:
  validate      check TAC syntax
  compile       single-stage compilation (alias: tac)
  complete      assembly, resources and optimization in one request
  assembly      assembly only
  resources     assembly and resource analysis
  optimize      optimization report
  health        check the service
  clear         hide every result and empty the buffer
Session:
  diff          toggle the side-by-side optimization comparison
  history       list compilation attempts
  help          this text
  quit          leave the shell";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Run(Action),
    Load(PathBuf),
    Edit,
    Show,
    Diff,
    History,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ShellCommand::Empty);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "load" if rest.is_empty() => Err("Usage: load <file>".to_string()),
            "load" => Ok(ShellCommand::Load(PathBuf::from(rest))),
            "edit" => Ok(ShellCommand::Edit),
            "show" => Ok(ShellCommand::Show),
            "diff" => Ok(ShellCommand::Diff),
            "history" => Ok(ShellCommand::History),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            _ => Action::from_id(word).map(ShellCommand::Run).ok_or_else(|| {
                format!("Unknown command '{}'. Type 'help' for a list.", word)
            }),
        }
    }
}

/// A shell session bound to one controller.
pub struct Shell<'c, 'a, T, W> {
    controller: &'c Controller<'a, T>,
    out: TerminalSink<W>,
    buffer: String,
    /// Lines collected since `edit`, until the closing `.`.
    editing: Option<Vec<String>>,
    show_diff: bool,
}

impl<'c, 'a, T: HttpTransport, W: Write> Shell<'c, 'a, T, W> {
    pub fn new(controller: &'c Controller<'a, T>, out: TerminalSink<W>, show_diff: bool) -> Self {
        Self {
            controller,
            out,
            buffer: String::new(),
            editing: None,
            show_diff,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn into_output(self) -> W {
        self.out.into_inner()
    }

    /// Read and execute lines until `quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> io::Result<()> {
        let mut lines = input.lines();
        self.out.line("tacconv shell. Type 'help' for commands.")?;

        loop {
            self.show_notifications()?;
            let prompt = if self.editing.is_some() { "...> " } else { "tac> " };
            self.out.prompt(prompt)?;

            let Some(line) = lines.next_line().await? else {
                self.out.line("")?;
                break;
            };

            if let Some(mut pending) = self.editing.take() {
                if line.trim() == "." {
                    self.out
                        .line(&format!("Buffer holds {} lines", pending.len()))?;
                    self.buffer = pending.join("\n");
                } else {
                    pending.push(line);
                    self.editing = Some(pending);
                }
                continue;
            }

            match ShellCommand::parse(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(command).await?,
                Err(message) => self.out.line(&message)?,
            }
        }

        self.out.flush()
    }

    async fn execute(&mut self, command: ShellCommand) -> io::Result<()> {
        match command {
            ShellCommand::Run(action) => {
                self.controller.dispatch(action, &self.buffer).await;
                if action == Action::Clear {
                    self.buffer.clear();
                }
                self.redraw()?;
                self.show_notifications()?;
            }
            ShellCommand::Load(path) => match fs::read_to_string(&path) {
                Ok(source) => {
                    self.out.line(&format!(
                        "Loaded {} ({} lines)",
                        path.display(),
                        source.lines().count()
                    ))?;
                    self.buffer = source;
                }
                Err(e) => self.out.line(&format!("Error: cannot read {}: {}", path.display(), e))?,
            },
            ShellCommand::Edit => {
                self.out
                    .line("Enter TAC code. Finish with a line containing only '.'")?;
                self.editing = Some(Vec::new());
            }
            ShellCommand::Show => {
                if self.buffer.trim().is_empty() {
                    self.out.line("(buffer is empty)")?;
                }
                for (n, line) in self.buffer.lines().enumerate() {
                    self.out.line(&format!("{:>4}  {}", n + 1, line))?;
                }
            }
            ShellCommand::Diff => {
                self.show_diff = !self.show_diff;
                let state = if self.show_diff { "on" } else { "off" };
                self.out.line(&format!("Comparison view {}", state))?;
                if self.controller.view().is_visible(Section::Optimization) {
                    self.redraw()?;
                }
            }
            ShellCommand::History => self.print_history()?,
            ShellCommand::Help => self.out.line(HELP)?,
            ShellCommand::Quit | ShellCommand::Empty => {}
        }
        Ok(())
    }

    fn redraw(&mut self) -> io::Result<()> {
        let options = RenderOptions {
            show_diff: self.show_diff,
        };
        draw(&mut self.out, &self.controller.view(), options)
    }

    /// Print each notification raised since the last prompt, then sweep.
    fn show_notifications(&mut self) -> io::Result<()> {
        let controller = self.controller;
        let notifications = controller.notifications();
        for notification in notifications.drain() {
            self.out.notification(&notification)?;
        }
        notifications.sweep(Instant::now());
        Ok(())
    }

    fn print_history(&mut self) -> io::Result<()> {
        let controller = self.controller;
        let history = controller.history();
        if history.is_empty() {
            return self.out.line("No compilation attempts yet.");
        }
        for (n, entry) in history.entries().iter().enumerate() {
            let result = match &entry.outcome {
                AttemptOutcome::Succeeded => "ok".to_string(),
                AttemptOutcome::Failed { kind, message } => format!("{}: {}", kind, message),
            };
            self.out.line(&format!(
                "{:>3}. {} {:<9} {:>3} lines  {}",
                n + 1,
                entry.at.format("%H:%M:%S"),
                entry.mode.id(),
                entry.source.lines().count(),
                result
            ))?;
        }
        self.out.line(&format!(
            "{} of {} succeeded",
            history.successes(),
            history.len()
        ))
    }
}

/// Run an interactive session on stdin and stdout.
pub fn run(runner: &CliRunner, show_diff: bool) -> Result<(), CliError> {
    runner.log_startup("shell");

    let ctx = runner.context()?;
    let controller = Controller::new(&ctx);
    let mut shell = Shell::new(&controller, TerminalSink::stdout(), show_diff);

    let session = runner.runtime()?.block_on(async {
        let input = BufReader::new(tokio::io::stdin());
        let (_, session) = tokio::join!(controller.startup_health_check(), shell.run(input));
        session
    });
    session.map_err(CliError::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacconv::config::ConfigFile;
    use tacconv::context::AppContext;
    use tacconv::api::Method;
    use tacconv::controller::Mode;
    use tacconv::gateway::{GatewayError, HttpResponse, ReqwestTransport};

    struct RefusingTransport;

    impl HttpTransport for RefusingTransport {
        async fn send(
            &self,
            _method: Method,
            _url: &str,
            _json_body: Option<&str>,
        ) -> Result<HttpResponse, GatewayError> {
            Err(GatewayError::Network("connection refused".to_string()))
        }
    }

    fn offline_context() -> AppContext<ReqwestTransport> {
        let mut config = ConfigFile::default();
        config.api.base_url = "http://127.0.0.1:9/api/compile".to_string();
        AppContext::connect(&config).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse("  "), Ok(ShellCommand::Empty));
        assert_eq!(
            ShellCommand::parse("Compile"),
            Ok(ShellCommand::Run(Action::Run(Mode::Compile)))
        );
        assert_eq!(
            ShellCommand::parse("tac"),
            Ok(ShellCommand::Run(Action::Run(Mode::Compile)))
        );
        assert_eq!(ShellCommand::parse("clear"), Ok(ShellCommand::Run(Action::Clear)));
        assert_eq!(
            ShellCommand::parse("load  prog one.tac "),
            Ok(ShellCommand::Load(PathBuf::from("prog one.tac")))
        );
        assert_eq!(ShellCommand::parse("exit"), Ok(ShellCommand::Quit));
        assert!(ShellCommand::parse("load").is_err());
        assert!(ShellCommand::parse("deploy now").is_err());
    }

    #[tokio::test]
    async fn test_edit_fills_buffer() {
        let ctx = offline_context();
        let controller = Controller::new(&ctx);
        let mut shell = Shell::new(&controller, TerminalSink::new(Vec::new(), false), false);

        let input: &[u8] = b"edit\nt1 = a + b\nd = t1\n.\nshow\nquit\n";
        shell.run(input).await.unwrap();

        assert_eq!(shell.buffer(), "t1 = a + b\nd = t1");
        let text = String::from_utf8(shell.into_output()).unwrap();
        assert!(text.contains("Buffer holds 2 lines"));
        assert!(text.contains("   2  d = t1"));
    }

    #[tokio::test]
    async fn test_actions_on_empty_buffer_stay_local() {
        let ctx = offline_context();
        let controller = Controller::new(&ctx);
        let mut shell = Shell::new(&controller, TerminalSink::new(Vec::new(), false), false);

        let input: &[u8] = b"validate\noptimize\nhistory\nclear\nbogus\n";
        shell.run(input).await.unwrap();

        let text = String::from_utf8(shell.into_output()).unwrap();
        assert!(text.contains("TAC code is required for validation."));
        assert!(text.contains("TAC code is required for compilation."));
        assert!(text.contains("No compilation attempts yet."));
        assert!(text.contains("Interface cleared"));
        assert!(text.contains("Unknown command 'bogus'"));
        assert!(controller.view().banners().next().is_none());
    }

    #[tokio::test]
    async fn test_diff_toggle_is_reported() {
        let ctx = offline_context();
        let controller = Controller::new(&ctx);
        let mut shell = Shell::new(&controller, TerminalSink::new(Vec::new(), false), false);

        let input: &[u8] = b"diff\ndiff\n";
        shell.run(input).await.unwrap();

        let text = String::from_utf8(shell.into_output()).unwrap();
        assert!(text.contains("Comparison view on"));
        assert!(text.contains("Comparison view off"));
    }

    #[tokio::test]
    async fn test_clear_empties_buffer() {
        let ctx = offline_context();
        let controller = Controller::new(&ctx);
        let mut shell = Shell::new(&controller, TerminalSink::new(Vec::new(), false), false);

        let input: &[u8] = b"edit
t1 = a + b
.
clear
show
";
        shell.run(input).await.unwrap();

        assert_eq!(shell.buffer(), "");
        let text = String::from_utf8(shell.into_output()).unwrap();
        assert!(text.contains("Interface cleared"));
        assert!(text.contains("(buffer is empty)"));
    }

    #[tokio::test]
    async fn test_startup_warning_and_action_error_both_printed() {
        let ctx = AppContext::new(RefusingTransport, &ConfigFile::default());
        let controller = Controller::new(&ctx);
        let mut shell = Shell::new(&controller, TerminalSink::new(Vec::new(), false), false);

        let input: &[u8] = b"edit
t1 = a + b
.
compile
";
        let (_, session) = tokio::join!(controller.startup_health_check(), shell.run(input));
        session.unwrap();

        let text = String::from_utf8(shell.into_output()).unwrap();
        assert!(text.contains("Warning: Backend API may not be available"));
        assert!(text.contains("Compilation failed: Network error: connection refused"));
    }
}
