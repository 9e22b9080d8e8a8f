//! FAQDesk command line composition root
//!
//! Parses commands, wires configuration into an `ApiClient`, and turns
//! results into terminal output. Navigation decisions made by the client
//! layer (`AuthRequired`, guard outcomes) are rendered here.

use clap::{Args, Parser, Subcommand};
use faqdesk_client::{client_entry, ApiClient, ApiError, Navigation, SignupForm, SignupWizard};
use faqdesk_common::ClientConfig;
use faqdesk_session::SessionState;

#[derive(Parser, Debug)]
#[command(name = "faqdesk")]
#[command(author = "FAQDesk Team")]
#[command(version)]
#[command(about = "Terminal client for the FAQDesk chatbot platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FAQDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored session and whether it is still usable
    Status,
    /// Fetch the signed-in profile
    Profile,
    /// Show subscription plan and question quota
    Subscription,
    /// Register a new client account
    Signup(SignupArgs),
}

#[derive(Args, Debug, Default)]
pub struct SignupArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    #[arg(long, default_value = "")]
    pub mobile: String,
    #[arg(long)]
    pub website: String,
    #[arg(long)]
    pub business_type: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub pan: String,
    #[arg(long, default_value = "")]
    pub tan: String,
}

impl From<SignupArgs> for SignupForm {
    fn from(args: SignupArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            password: args.password,
            confirm_password: args.confirm_password,
            mobile: args.mobile,
            website: args.website,
            business_type: args.business_type,
            location: args.location,
            pan: args.pan,
            tan: args.tan,
        }
    }
}

/// Run one command, returning the text to print
pub async fn run(
    command: Command,
    api: &ApiClient,
    config: &ClientConfig,
) -> anyhow::Result<String> {
    let result = execute(command, api).await;

    match result {
        Err(ApiError::AuthRequired) => Ok(login_prompt(config)),
        other => Ok(other?),
    }
}

async fn execute(command: Command, api: &ApiClient) -> Result<String, ApiError> {
    match command {
        Command::Login { email, password } => {
            let login = api.login(&email, &password).await?;
            let subject = api.session().subject().unwrap_or_default();
            Ok(format!("Logged in as {} ({})", subject, login.user_type))
        }
        Command::Logout => {
            api.logout()?;
            Ok("Logged out".to_string())
        }
        Command::Status => Ok(describe_status(api)),
        Command::Profile => {
            let profile = api.profile().await?;
            serde_json::to_string_pretty(&profile).map_err(|e| ApiError::Response(e.to_string()))
        }
        Command::Subscription => {
            if client_entry(api.authority()) == Navigation::AdminDashboard {
                return Ok("Admin accounts have no subscription".to_string());
            }
            let status = api.subscription_status().await?;
            let mut lines = vec![
                format!("Plan: {}", status.plan_label()),
                format!(
                    "Status: {}",
                    if status.is_active { "Active" } else { "Inactive" }
                ),
                format!(
                    "Questions Used: {}/{}",
                    status.questions_used, status.questions_allowed
                ),
            ];
            if let Some(end_date) = &status.end_date {
                lines.push(format!("Valid Until: {}", end_date));
            }
            if !status.can_add_question() {
                lines.push("Question limit reached. Please upgrade your plan.".to_string());
            }
            Ok(lines.join("\n"))
        }
        Command::Signup(args) => {
            let mut wizard = SignupWizard::with_form(args.into());
            let request = wizard.submit()?;
            api.signup(&request).await?;
            Ok("Signup successful! Log in with your new account.".to_string())
        }
    }
}

fn describe_status(api: &ApiClient) -> String {
    let authority = api.authority();
    let session = match api.session().snapshot() {
        Ok(Some(session)) => session,
        Ok(None) => return "Not logged in".to_string(),
        Err(e) => return format!("Session unreadable: {}", e),
    };

    let state = match authority.state() {
        SessionState::AuthenticatedValid => "valid",
        SessionState::AuthenticatedExpired => "expired",
        SessionState::NoSession => "absent",
    };

    format!(
        "User: {}\nRole: {}\nSession: {}",
        session.subject_id, session.role, state
    )
}

fn login_prompt(config: &ClientConfig) -> String {
    format!(
        "Your session has expired. Please log in again ({}).",
        config.login_entry
    )
}
