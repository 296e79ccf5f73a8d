use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{anyhow, Context};
use log::trace;

use crate::collectors::classify::{
    handle_special_cases, is_no_data_available, is_not_found_status, is_spawn_not_found,
};
use crate::collectors::task::{CollectError, Producer};
use crate::config::RunConfig;

/// Run a program and return its stdout followed by its stderr.
///
/// A non-zero exit is classified: known quirks become successful output,
/// missing executables and "no data" answers become [`CollectError::Skip`],
/// anything else is a failure carrying the command output.
pub fn exec_command(program: &str, args: &[String]) -> Result<Vec<u8>, CollectError> {
    trace!("Executing {} {}", program, args.join(" "));

    let output = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => output,
        Err(err) if is_spawn_not_found(&err) => {
            return Err(CollectError::skip(format!("command not found: {}", program)));
        }
        Err(err) => {
            return Err(CollectError::Failure(
                anyhow::Error::new(err).context(format!("Failed to execute {}", program)),
            ));
        }
    };

    let mut combined = output.stdout;
    combined.extend_from_slice(&output.stderr);

    if output.status.success() {
        return Ok(combined);
    }

    if let Some(special) = handle_special_cases(program, &combined) {
        return Ok(special);
    }

    if is_not_found_status(&output.status) {
        return Err(CollectError::skip(format!("command not found: {}", program)));
    }

    let text = String::from_utf8_lossy(&combined);
    if is_no_data_available(&text) {
        return Err(CollectError::skip(format!("data not available: {}", program)));
    }

    Err(CollectError::Failure(anyhow!(
        "command '{} {}' failed: {} (output: {})",
        program,
        args.join(" "),
        output.status,
        text.trim()
    )))
}

/// Captures the output of an external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProducer {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandProducer {
    pub fn new<S: Into<String>>(program: impl Into<String>, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Producer for CommandProducer {
    fn produce(&self, _cfg: &RunConfig, out: &mut dyn Write) -> Result<(), CollectError> {
        let data = exec_command(&self.program, &self.args)?;
        out.write_all(&data)
            .context(format!("Failed to write output of {}", self.program))?;
        Ok(())
    }
}
