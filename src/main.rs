use anyhow::Context;
use contact_form::configuration::get_configuration;
use contact_form::domain::ContactForm;
use contact_form::handler::SubmissionOutcome;
use contact_form::page::{SubmitEvent, TerminalPage, CONTACT_FORM_ID};
use contact_form::startup::Application;
use contact_form::telemetry::init_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber("contact_form", "info", std::io::stderr);

    let configuration = get_configuration().context("Failed to read configuration")?;
    let form: ContactForm =
        serde_json::from_reader(std::io::stdin()).context("Failed to read contact form from stdin")?;
    let application = Application::build(&configuration, TerminalPage::new(form))?;

    let mut event = SubmitEvent::new(CONTACT_FORM_ID);
    match application.submit(&mut event)? {
        Some(delivery) => match delivery.await? {
            SubmissionOutcome::Delivered { reply } => {
                tracing::info!(status = %reply.status, "Contact form delivered");
            }
            SubmissionOutcome::Failed(_) => std::process::exit(1),
        },
        None => std::process::exit(2),
    }
    Ok(())
}
