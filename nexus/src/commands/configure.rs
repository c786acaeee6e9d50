use crate::config;
use crate::context::{AppContext, VerbosityLevel};
use crate::format;
use libnexus::RegistryConfig;
use std::io::{BufRead, Write};

/// Print a prompt and read one trimmed line
pub(crate) fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String, String> {
    write!(output, "{}", label).map_err(|e| format!("Failed to write prompt: {}", e))?;
    output
        .flush()
        .map_err(|e| format!("Failed to flush stdout: {}", e))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read input: {}", e))?;

    Ok(line.trim().to_string())
}

/// Ask for host, repository and username, then the password via `read_password`
pub(crate) fn prompt_registry_config<R, W, P>(
    input: &mut R,
    output: &mut W,
    read_password: P,
) -> Result<RegistryConfig, String>
where
    R: BufRead,
    W: Write,
    P: FnOnce() -> Result<String, String>,
{
    let host = prompt_line(input, output, "Enter Nexus Host: ")?;
    let repository = prompt_line(input, output, "Enter Nexus Repository Name: ")?;
    let username = prompt_line(input, output, "Enter Nexus Username: ")?;
    let password = read_password()?;

    Ok(RegistryConfig::new(host, username, password, repository))
}

/// Handle the configure command
pub fn handle_configure(ctx: &AppContext) {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Writing credentials to {}", ctx.credentials_path.display()),
    );

    let stdin = std::io::stdin();
    let answers = prompt_registry_config(&mut stdin.lock(), &mut std::io::stdout(), || {
        rpassword::prompt_password("Enter Nexus Password: ")
            .map_err(|e| format!("Failed to read password: {}", e))
    });

    let result =
        answers.and_then(|answers| config::write_credentials(&ctx.credentials_path, &answers));
    match result {
        Ok(saved) => {
            tracing::info!(
                path = %ctx.credentials_path.display(),
                host = %saved.host,
                "credentials saved"
            );
            format::success(
                ctx,
                &format!("Credentials saved to {}", ctx.credentials_path.display()),
            );
        }
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "configure_tests.rs"]
mod tests;
