use std::io::Write as _;

use clap::Parser;
use signup::config::{AppConfig, ConfigError};
use signup::form::{Field, FormController, RegistrationModal, SubmitOutcome, SubmitRejected};
use signup::sink::{SinkClient, SinkError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("sink setup failed: {0}")]
    Sink(#[from] SinkError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input closed before the registration finished")]
    InputClosed,
    #[error("registration failed: {0}")]
    Failed(String),
}

#[derive(Parser, Debug)]
#[command(name = "signup", about = "Register for the community from the terminal")]
struct Cli {
    #[arg(long, env = "SIGNUP_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "SIGNUP_EMAIL")]
    email: Option<String>,

    /// 10-digit PRN.
    #[arg(long, env = "SIGNUP_PRN")]
    prn: Option<String>,

    #[arg(long, env = "SIGNUP_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let sink = SinkClient::from_config(&config.sink)?;
    tracing::info!(sink = sink.kind(), "registration sink ready");

    let modal = RegistrationModal::new(FormController::new(sink).with_close_delay(config.close_delay));
    modal.open();

    let controller = modal.controller();
    let given = [
        (Field::Username, cli.username),
        (Field::Email, cli.email),
        (Field::Identifier, cli.prn),
        (Field::Password, cli.password),
    ];
    for (field, value) in given {
        if let Some(value) = value {
            controller.set_field(field, value);
        }
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        collect_valid_fields(controller, &mut input).await?;

        println!("Processing...");
        match controller.submit().await {
            Ok(SubmitOutcome::Succeeded) => {
                println!("Registration successful! We'll be in touch soon.");
                modal.auto_close().await;
                return Ok(());
            }
            Ok(SubmitOutcome::Failed(message)) => {
                println!("Registration failed. {message}");
                if !confirm(&mut input, "Try again? [y/N] ").await? {
                    return Err(CliError::Failed(message));
                }
            }
            Ok(SubmitOutcome::Discarded) => return Err(CliError::Failed("submission discarded".into())),
            Err(SubmitRejected::ValidationFailed(_) | SubmitRejected::AlreadyInProgress) => {}
        }
    }
}

/// Prompt for every missing or invalid field until the form validates.
async fn collect_valid_fields<S>(controller: &FormController<S>, input: &mut Input) -> Result<(), CliError>
where
    S: signup::sink::RegistrationSink,
{
    loop {
        let errors = controller.refresh_errors();
        if errors.is_empty() {
            return Ok(());
        }
        for (field, error) in errors.iter() {
            if !controller.fields().get(field).is_empty() {
                println!("{}: {error}", field.label());
            }
            let value = prompt(input, &format!("{}: ", field.label())).await?;
            controller.set_field(field, value);
        }
    }
}

async fn prompt(input: &mut Input, label: &str) -> Result<String, CliError> {
    print!("{label}");
    std::io::stdout().flush()?;
    input.next_line().await?.ok_or(CliError::InputClosed)
}

async fn confirm(input: &mut Input, label: &str) -> Result<bool, CliError> {
    let answer = prompt(input, label).await?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
