//! External command execution with uniform status checking.
//!
//! Every stage runs its external tool through these helpers: structured
//! argument-list invocation (no shell re-parsing), explicit exit-status
//! checks, and a typed stage failure carrying the literal command line on
//! non-zero exit. The rendered command string exists only for logging and
//! diagnostics, never for execution.

use crate::packager::{
    error::{Error, Result},
    stage::Stage,
    tools::ToolSpec,
};
use std::ffi::{OsStr, OsString};
use tokio::process::Command;

/// Renders a command line for display.
///
/// Arguments containing whitespace are quoted so the printed command can be
/// pasted into a shell to reproduce a failure. This string is never executed.
pub fn display_command<I, S>(program: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut rendered = String::from(program);
    for arg in args {
        let arg = arg.as_ref().to_string_lossy();
        rendered.push(' ');
        if arg.contains(char::is_whitespace) {
            rendered.push('"');
            rendered.push_str(&arg);
            rendered.push('"');
        } else {
            rendered.push_str(&arg);
        }
    }
    rendered
}

/// Builds the full argument vector for a tool: its fixed arguments followed
/// by the stage-specific ones.
pub fn tool_args<S: AsRef<OsStr>>(spec: &ToolSpec, extra: &[S]) -> Vec<OsString> {
    spec.args
        .iter()
        .map(OsString::from)
        .chain(extra.iter().map(|a| a.as_ref().to_os_string()))
        .collect()
}

/// Runs an external tool, checking its exit status.
///
/// Stdout/stderr are inherited so the tool's own diagnostics reach the user
/// unchanged. Non-zero exit yields [`Error::ToolFailed`] with the literal
/// command for manual reproduction.
pub async fn run_checked(stage: Stage, spec: &ToolSpec, extra: &[&OsStr]) -> Result<()> {
    let args = tool_args(spec, extra);
    let rendered = display_command(&spec.program, &args);
    log::debug!("[{stage}] running: {rendered}");

    let status = Command::new(&spec.program)
        .args(&args)
        .status()
        .await
        .map_err(|error| Error::CommandFailed {
            command: rendered.clone(),
            error,
        })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            stage,
            command: rendered,
            status,
        });
    }

    Ok(())
}

/// Runs an external tool and captures its stdout.
///
/// Used for inspection tools whose output the pipeline parses. The tool's
/// stderr is forwarded to the log on failure.
pub async fn capture_stdout(stage: Stage, spec: &ToolSpec, extra: &[&OsStr]) -> Result<String> {
    let args = tool_args(spec, extra);
    let rendered = display_command(&spec.program, &args);
    log::debug!("[{stage}] running: {rendered}");

    let output = Command::new(&spec.program)
        .args(&args)
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: rendered.clone(),
            error,
        })?;

    if !output.status.success() {
        log::error!(
            "[{stage}] {} stderr: {}",
            spec.program,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Err(Error::ToolFailed {
            stage,
            command: rendered,
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_command_quotes_whitespace() {
        let rendered = display_command("iscc", ["C:/build dir/app.iss"]);
        assert_eq!(rendered, "iscc \"C:/build dir/app.iss\"");
    }

    #[test]
    fn display_command_joins_plain_args() {
        let rendered = display_command("ntldd", ["-R", "bin/app.exe"]);
        assert_eq!(rendered, "ntldd -R bin/app.exe");
    }

    #[test]
    fn tool_args_keeps_fixed_args_first() {
        let spec = ToolSpec {
            program: "ntldd".into(),
            args: vec!["-R".into()],
        };
        let args = tool_args(&spec, &["bin/app.exe"]);
        assert_eq!(args, [OsString::from("-R"), OsString::from("bin/app.exe")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_checked_surfaces_nonzero_exit() {
        let spec = ToolSpec {
            program: "false".into(),
            args: vec![],
        };
        let err = run_checked(Stage::Installer, &spec, &[])
            .await
            .expect_err("false exits 1");
        match err {
            Error::ToolFailed { stage, command, .. } => {
                assert_eq!(stage, Stage::Installer);
                assert_eq!(command, "false");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn capture_stdout_returns_tool_output() {
        let spec = ToolSpec {
            program: "echo".into(),
            args: vec!["hello".into()],
        };
        let out = capture_stdout(Stage::Dlls, &spec, &[])
            .await
            .expect("echo succeeds");
        assert_eq!(out.trim(), "hello");
    }
}
