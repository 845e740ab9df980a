use crate::helpers::{spawn_app, valid_form};
use claim::assert_none;
use contact_form::domain::{ContactForm, FieldKey};
use test_case::test_case;
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

async fn expect_no_request(app: &crate::helpers::TestApp) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.contact_server)
        .await;
}

#[test_case(""; "empty")]
#[test_case("  \t"; "whitespace only")]
#[tokio::test]
async fn only_empty_fields_show_a_required_message(blank: &str) {
    let app = spawn_app().await;
    expect_no_request(&app).await;

    // Every non-empty subset of the four fields, one bit per field.
    for mask in 1u8..16 {
        let missing: Vec<FieldKey> = FieldKey::ALL
            .into_iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, key)| key)
            .collect();
        let mut form = valid_form();
        for key in &missing {
            form.set_value(*key, blank.to_owned());
        }
        app.fill(&form);

        let (event, delivery) = app.submit();

        assert!(event.is_default_prevented());
        assert_none!(delivery);
        for key in FieldKey::ALL {
            let expected = if missing.contains(&key) {
                key.required_message()
            } else {
                String::new()
            };
            assert_eq!(
                app.error_text(key),
                expected,
                "unexpected text for {} with {:?} missing",
                key,
                missing
            );
        }
    }
    assert!(app.page().events().is_empty());
}

#[tokio::test]
async fn whitespace_only_fields_are_treated_as_empty() {
    let app = spawn_app().await;
    expect_no_request(&app).await;
    app.fill(&ContactForm {
        name: "   ".into(),
        email: "\t".into(),
        subject: "Hello".into(),
        message: " \n ".into(),
    });

    let (_, delivery) = app.submit();

    assert_none!(delivery);
    assert_eq!(app.error_text(FieldKey::Name), "Name is required.");
    assert_eq!(app.error_text(FieldKey::Email), "Email is required.");
    assert_eq!(app.error_text(FieldKey::Subject), "");
    assert_eq!(app.error_text(FieldKey::Message), "Message is required.");
}

#[tokio::test]
async fn an_empty_subject_blocks_the_submission() {
    let app = spawn_app().await;
    expect_no_request(&app).await;
    app.fill(&ContactForm {
        name: "Ann ".into(),
        email: "a@b.com".into(),
        subject: "".into(),
        message: "Hi".into(),
    });

    let (_, delivery) = app.submit();

    assert_none!(delivery);
    assert_eq!(app.error_text(FieldKey::Subject), "Subject is required.");
    assert_eq!(app.error_text(FieldKey::Name), "");
}

#[tokio::test]
async fn resubmitting_clears_stale_messages() {
    let app = spawn_app().await;
    expect_no_request(&app).await;
    let mut form = valid_form();
    form.name = String::new();
    form.email = String::new();
    app.fill(&form);
    app.submit();
    assert_eq!(app.error_text(FieldKey::Name), "Name is required.");
    assert_eq!(app.error_text(FieldKey::Email), "Email is required.");

    form.name = "Ann".into();
    app.fill(&form);
    app.submit();

    assert_eq!(app.error_text(FieldKey::Name), "");
    assert_eq!(app.error_text(FieldKey::Email), "Email is required.");
}
