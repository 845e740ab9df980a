use contact_form::configuration::get_configuration;
use contact_form::domain::{ContactForm, FieldKey};
use contact_form::handler::SubmissionOutcome;
use contact_form::page::{InMemoryPage, SubmitEvent, CONTACT_FORM_ID};
use contact_form::startup::Application;
use contact_form::telemetry::init_subscriber;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use fake::Fake;
use once_cell::sync::Lazy;
use std::net::TcpListener;
use tokio::task::JoinHandle;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber("test", "debug", std::io::stdout);
    } else {
        init_subscriber("test", "debug", std::io::sink);
    }
});

pub const REDIRECT_URL: &str = "https://sayorama.eu/api";

pub struct TestApp {
    pub contact_server: MockServer,
    pub application: Application<InMemoryPage>,
}

impl TestApp {
    pub fn page(&self) -> &InMemoryPage {
        self.application.page()
    }

    pub fn fill(&self, form: &ContactForm) {
        for key in FieldKey::ALL {
            self.page().fill(key, form.value(key));
        }
    }

    pub fn submit(&self) -> (SubmitEvent, Option<JoinHandle<SubmissionOutcome>>) {
        let mut event = SubmitEvent::new(CONTACT_FORM_ID);
        let delivery = self
            .application
            .submit(&mut event)
            .expect("Failed to dispatch the contact form");
        (event, delivery)
    }

    pub async fn submit_and_wait(&self) -> (SubmitEvent, Option<SubmissionOutcome>) {
        let (event, delivery) = self.submit();
        let outcome = match delivery {
            Some(delivery) => Some(delivery.await.expect("Delivery task panicked")),
            None => None,
        };
        (event, outcome)
    }

    pub fn error_text(&self, key: FieldKey) -> String {
        self.page()
            .error_text(&key.error_element_id())
            .expect("Error element is missing")
    }

    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.contact_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
            .iter()
            .map(|request| serde_json::from_slice(&request.body).expect("Body is not JSON"))
            .collect()
    }
}

pub fn valid_form() -> ContactForm {
    ContactForm {
        name: Name().fake(),
        email: SafeEmail().fake(),
        subject: Sentence(1..4).fake(),
        message: Paragraph(1..3).fake(),
    }
}

pub async fn spawn_app() -> TestApp {
    let contact_server = MockServer::start().await;
    let base_url = contact_server.uri();
    build_app(contact_server, base_url)
}

/// The contact endpoint points at a port nothing listens on.
pub async fn spawn_app_with_unreachable_endpoint() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener
        .local_addr()
        .expect("Failed to read local address")
        .port();
    drop(listener);
    let contact_server = MockServer::start().await;
    build_app(contact_server, format!("http://127.0.0.1:{}", port))
}

fn build_app(contact_server: MockServer, base_url: String) -> TestApp {
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.contact_form.base_url = base_url;
        c.contact_form.redirect_url = REDIRECT_URL.to_owned();
        c
    };
    let application = Application::build(&configuration, InMemoryPage::contact_form())
        .expect("Failed to build application");
    TestApp {
        contact_server,
        application,
    }
}
