//! `igscan profile`: run the feature pipeline and print the JSON result.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use igscan_client::InstagramClient;
use igscan_core::AppConfig;
use igscan_profiler::{get_profile_features, ErrorCategory, FileSessionStore, ProfileOutput};

/// Runs one profile lookup. Pipeline failures are printed as the error
/// object and reflected in the exit code; only setup failures are `Err`.
pub(crate) async fn run_profile(
    config: &AppConfig,
    username: Option<String>,
    pretty: bool,
) -> anyhow::Result<ExitCode> {
    let target = match username {
        Some(name) => name,
        None => {
            let stdin = std::io::stdin();
            prompt_username(&mut stdin.lock(), &mut std::io::stdout())?
        }
    };

    let client = InstagramClient::from_config(config)?;
    let store = FileSessionStore::new(&config.session_dir);

    let result = get_profile_features(
        &client,
        &store,
        config.credentials.as_ref(),
        config.session_blob.as_deref(),
        &target,
    )
    .await;

    if let Err(err) = &result {
        tracing::warn!(category = %err.category(), error = %err, "profile run failed");
    }

    let output = ProfileOutput::from(result);
    let rendered = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(output.category().map_or(ExitCode::SUCCESS, exit_code))
}

pub(crate) fn prompt_username<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> std::io::Result<String> {
    write!(output, "Enter Instagram username: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

/// Distinct non-zero exit status per error category.
pub(crate) fn exit_code(category: &ErrorCategory) -> ExitCode {
    let code: u8 = match category {
        ErrorCategory::Unknown(_) => 1,
        ErrorCategory::MissingCredentials => 2,
        ErrorCategory::LoginChallengeRequired => 3,
        ErrorCategory::RateLimited => 4,
        ErrorCategory::ProfileNotFound => 5,
        ErrorCategory::LoginFailed => 6,
    };
    ExitCode::from(code)
}
