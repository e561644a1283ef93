use clap::{Args, Parser, Subcommand};

use common::access::AccessController;

use super::files::{download::Download, edit::Edit, ls::Ls, rm::Rm, view::View};
use crate::cli::op::{NotLoggedIn, Op, OpContext};

/// Interactive session. Passcodes entered here are remembered until exit.
#[derive(Args, Debug, Clone)]
pub struct Shell;

#[derive(Parser, Debug)]
#[command(name = "shell", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// List files
    Ls(Ls),
    /// Display a file
    View(View),
    /// Overwrite a file
    Edit(Edit),
    /// Move a file to the recycle bin
    Rm(Rm),
    /// Download a file
    Download(Download),
    /// Files with a remembered passcode
    Cached,
    /// Drop remembered passcodes
    Forget {
        filename: Option<String>,
        #[arg(long, conflicts_with = "filename")]
        all: bool,
    },
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    NotLoggedIn(#[from] NotLoggedIn),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

enum Flow {
    Continue(String),
    Exit,
}

/// Split a line into words. Single or double quotes group words; there is
/// no escaping.
pub(crate) fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

async fn dispatch(
    command: ShellCommand,
    ctx: &OpContext,
    controller: &AccessController,
) -> Result<Flow, String> {
    let output = match command {
        ShellCommand::Ls(ls) => ls.execute(ctx).await.map_err(|e| e.to_string())?,
        ShellCommand::View(op) => op.run(controller).await.map_err(|e| e.to_string())?,
        ShellCommand::Edit(op) => op.run(controller).await.map_err(|e| e.to_string())?,
        ShellCommand::Rm(op) => op.run(controller).await.map_err(|e| e.to_string())?,
        ShellCommand::Download(op) => op.run(controller).await.map_err(|e| e.to_string())?,
        ShellCommand::Cached => {
            let passcodes = controller.session().passcodes();
            let names = passcodes.file_names();
            if names.is_empty() {
                "No remembered passcodes".to_string()
            } else {
                names.join("\n")
            }
        }
        ShellCommand::Forget { filename, all } => {
            let passcodes = controller.session().passcodes();
            match filename {
                Some(name) if passcodes.forget(&name).is_some() => format!("Forgot {}", name),
                Some(name) => format!("No passcode remembered for {}", name),
                None if all => {
                    passcodes.clear();
                    "Forgot all passcodes".to_string()
                }
                None => return Err("name a file or pass --all".to_string()),
            }
        }
        ShellCommand::Exit => return Ok(Flow::Exit),
    };
    Ok(Flow::Continue(output))
}

#[async_trait::async_trait]
impl Op for Shell {
    type Error = ShellError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        // one controller, so one challenge slot and one passcode cache, for
        // the whole shell
        let controller = ctx.controller()?;
        let user = controller.session().user().username.clone();
        eprintln!("Signed in as {}. Type 'help' for commands, 'exit' to leave.", user);

        loop {
            let Some(line) = ctx.terminal.read_line("vaultdash> ").await? else {
                break;
            };
            let words = match split_line(&line) {
                Ok(words) if words.is_empty() => continue,
                Ok(words) => words,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    continue;
                }
            };

            let command = match ShellLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    // includes `help`
                    eprint!("{}", e.render());
                    continue;
                }
            };

            match dispatch(command, ctx, &controller).await {
                Ok(Flow::Continue(output)) => println!("{}", output),
                Ok(Flow::Exit) => break,
                Err(e) => eprintln!("Error: {}", e),
            }

            if ctx.client.session_rejected() {
                eprintln!("Session expired, please log in again");
                break;
            }
        }

        controller.session().passcodes().clear();
        Ok("Bye".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line("edit notes.txt --content \"hello world\"").unwrap(),
            vec!["edit", "notes.txt", "--content", "hello world"]
        );
        assert_eq!(
            split_line("  view   'q3 report.txt' ").unwrap(),
            vec!["view", "q3 report.txt"]
        );
        assert_eq!(split_line("edit a --content ''").unwrap(), vec!["edit", "a", "--content", ""]);
        assert!(split_line("   ").unwrap().is_empty());
        assert!(split_line("view \"open").is_err());
    }

    #[test]
    fn test_shell_line_parses_file_commands() {
        let parsed = ShellLine::try_parse_from(["download", "report.enc", "-o", "/tmp/r"]).unwrap();
        assert!(matches!(parsed.command, ShellCommand::Download(ref d) if d.filename == "report.enc"));

        let parsed = ShellLine::try_parse_from(["quit"]).unwrap();
        assert!(matches!(parsed.command, ShellCommand::Exit));

        let parsed = ShellLine::try_parse_from(["forget", "--all"]).unwrap();
        assert!(matches!(parsed.command, ShellCommand::Forget { filename: None, all: true }));

        assert!(ShellLine::try_parse_from(["edit", "notes.txt"]).is_err());
    }
}
