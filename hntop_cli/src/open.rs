use tokio::process::Command;

use std::path::Path;
use std::process::Stdio;

use hntop_core::{Config, Error as CoreError};

use crate::error::Result;

pub const URL_PLACEHOLDER: &str = "{url}";

/// Build the command line for opening `url`.
/// Every `{url}` in the configured command is replaced; without any placeholder the URL is appended.
pub fn command_args(open_command: &[String], url: &str) -> Vec<String> {
    let mut args = open_command.to_vec();
    if args.iter().any(|arg| arg.contains(URL_PLACEHOLDER)) {
        for arg in args.iter_mut() {
            *arg = arg.replace(URL_PLACEHOLDER, url);
        }
    } else {
        args.push(url.to_string());
    }
    args
}

/// Run the configured open command for `url`.
/// Prints its stdout when `show_command_output` is set, otherwise leaves it running in the background.
pub async fn open_url(config: &Config, config_path: &Path, url: &str) -> Result<()> {
    if config.open_command.is_empty() {
        return Err(CoreError::ConfigError {
            path: config_path.to_path_buf(),
            reason: "open_command is empty".to_string(),
        }
        .into());
    }
    let args = command_args(&config.open_command, url);
    let show_hide = if config.show_command_output { "showing" } else { "hiding" };
    println!("Command: {} ({} output)\n", args.join(" "), show_hide);

    let mut command = Command::new(&args[0]);
    command.args(&args[1..]).stdin(Stdio::null());

    if config.show_command_output {
        let output = command.stderr(Stdio::inherit()).output().await?;
        println!("{}", String::from_utf8_lossy(&output.stdout));
        if !output.status.success() {
            tracing::warn!("Command {} exited with {}", args[0], output.status);
        }
    } else {
        let child = command.stdout(Stdio::null()).stderr(Stdio::null()).spawn()?;
        tracing::debug!("Started {} with pid {:?}", args[0], child.id());
    }
    Ok(())
}
