//! Interactive terminal registration form.
//!
//! Collects a registration, validates every field as it is entered, then
//! submits the non-secret fields to the notification endpoint.
//!
//! # Usage
//!
//! ```bash
//! # Against a local server
//! cargo run --bin register
//!
//! # Against another deployment
//! cargo run --bin register -- --endpoint https://example.com/api/send-email
//! ```
//!
//! Passwords are checked locally for strength and confirmation but are never sent.

use registration_notifier::form::countries::find_country;
use registration_notifier::form::validation::{
    validate_confirm_password, validate_email, validate_full_name, validate_password,
    validate_phone,
};
use registration_notifier::form::{
    COUNTRY_CODES, RESET_DELAY, RegistrationClient, RegistrationForm, StrengthLevel, SubmitStatus,
    password_strength,
};

use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::{Confirm, Input, Password, Select};
use url::Url;

/// Terminal client for the registration endpoint.
#[derive(Parser)]
#[command(name = "register")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Full URL of the registration endpoint
    #[arg(short, long, default_value = "http://localhost:3000/api/send-email")]
    endpoint: Url,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RegistrationClient::new(cli.endpoint);
    let mut form = RegistrationForm::default();

    println!("{}", "Create Account".bright_magenta().bold());
    println!("{}", format!("Submitting to {}", client.endpoint()).dimmed());
    println!();

    let mut status = SubmitStatus::default();

    loop {
        if let SubmitStatus::Error(_) = status {
            println!(
                "{}",
                "Previous answers kept. Passwords must be entered again.".dimmed()
            );
        }

        fill_form(&mut form)?;
        status = submit(&client, &form).await;

        match &status {
            SubmitStatus::Success(message) => {
                println!("{}", message.green().bold());
                tokio::time::sleep(RESET_DELAY).await;
                form.clear();
                status = SubmitStatus::Idle;
            }
            SubmitStatus::Error(message) => {
                println!("{}", message.red());
            }
            SubmitStatus::Idle => {}
        }

        println!();
        let again = Confirm::new()
            .with_prompt("Submit another registration?")
            .default(false)
            .interact()?;

        if !again {
            break;
        }
    }

    Ok(())
}

/// Prompts for every field, keeping previous answers as defaults after a failed submit.
fn fill_form(form: &mut RegistrationForm) -> Result<()> {
    form.full_name = Input::<String>::new()
        .with_prompt("Full name")
        .with_initial_text(form.full_name.clone())
        .validate_with(|input: &String| validate_full_name(input))
        .interact_text()?;

    form.email = Input::<String>::new()
        .with_prompt("Email")
        .with_initial_text(form.email.clone())
        .validate_with(|input: &String| validate_email(input))
        .interact_text()?;

    let countries: Vec<String> = COUNTRY_CODES.iter().map(|c| c.display_name()).collect();
    let current = COUNTRY_CODES
        .iter()
        .position(|c| c.code == find_country(&form.country_code).code)
        .unwrap_or(0);
    let selected = Select::new()
        .with_prompt("Country code")
        .items(&countries)
        .default(current)
        .interact()?;
    form.country_code = COUNTRY_CODES[selected].code.to_string();

    form.phone_number = Input::<String>::new()
        .with_prompt("Phone number")
        .with_initial_text(form.phone_number.clone())
        .validate_with(|input: &String| validate_phone(input))
        .interact_text()?;

    form.password = Password::new()
        .with_prompt("Password")
        .validate_with(|input: &String| validate_password(input))
        .interact()?;
    print_strength(&form.password);

    let password = form.password.clone();
    form.confirm_password = Password::new()
        .with_prompt("Confirm password")
        .validate_with(move |input: &String| validate_confirm_password(&password, input))
        .interact()?;

    form.accept_terms = Confirm::new()
        .with_prompt("I agree to the Terms of Service and Privacy Policy")
        .default(false)
        .interact()?;

    Ok(())
}

/// Re-validates the whole form and sends it when clean.
async fn submit(client: &RegistrationClient, form: &RegistrationForm) -> SubmitStatus {
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(errors) => {
            for (field, message) in errors.iter() {
                println!("  {} {}", format!("{field}:").yellow(), message);
            }
            return SubmitStatus::Error("Please fix the highlighted fields.".to_string());
        }
    };

    println!("{}", "Creating account...".dimmed());

    let outcome = client.submit(&submission).await;
    if let Ok(receipt) = &outcome
        && let Some(id) = &receipt.email_id
    {
        println!("{}", format!("Notification id: {id}").dimmed());
    }

    SubmitStatus::from_outcome(&outcome)
}

fn print_strength(password: &str) {
    let score = password_strength(password);
    let level = StrengthLevel::from_score(score);
    let meter = format!("{}{}", "#".repeat(usize::from(score) + 1), "-".repeat(4 - usize::from(score)));

    let label = match level {
        StrengthLevel::VeryWeak => level.label().red(),
        StrengthLevel::Weak => level.label().bright_red(),
        StrengthLevel::Fair => level.label().yellow(),
        StrengthLevel::Strong => level.label().bright_green(),
        StrengthLevel::VeryStrong => level.label().green(),
    };

    println!("  Password strength: [{meter}] {label}");
}
