use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_simulated_sink() {
    let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.close_delay, Duration::from_millis(DEFAULT_CLOSE_DELAY_MS));
    assert_eq!(
        cfg.sink,
        SinkConfig::Simulated {
            delay: Duration::from_millis(DEFAULT_SIMULATED_DELAY_MS),
            failure: None,
            sender: Sender::default(),
        }
    );
}

#[test]
fn simulated_overrides() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("REGISTRATION_SINK", "simulated"),
        ("REGISTRATION_CLOSE_DELAY_MS", "250"),
        ("SIMULATED_SINK_DELAY_MS", "10"),
        ("SIMULATED_SINK_FAILURE", "Registration failed. Please try again."),
        ("REGISTRATION_FROM_NAME", "Dev Club"),
        ("REGISTRATION_REPLY_TO", "hi@club.dev"),
    ]))
    .unwrap();

    assert_eq!(cfg.close_delay, Duration::from_millis(250));
    let SinkConfig::Simulated { delay, failure, sender } = cfg.sink else {
        panic!("expected simulated sink");
    };
    assert_eq!(delay, Duration::from_millis(10));
    assert_eq!(failure.as_deref(), Some("Registration failed. Please try again."));
    assert_eq!(sender, Sender { from_name: "Dev Club".into(), reply_to: Some("hi@club.dev".into()) });
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = AppConfig::from_lookup(lookup(&[("REGISTRATION_SINK", "  "), ("SIMULATED_SINK_FAILURE", "")])).unwrap();
    assert!(matches!(cfg.sink, SinkConfig::Simulated { failure: None, .. }));
}

#[test]
fn webhook_requires_url() {
    let err = AppConfig::from_lookup(lookup(&[("REGISTRATION_SINK", "webhook")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "REGISTRATION_WEBHOOK_URL" });
}

#[test]
fn webhook_parses_url_and_timeouts() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("REGISTRATION_SINK", "webhook"),
        ("REGISTRATION_WEBHOOK_URL", "https://api.example.test/register"),
        ("REGISTRATION_WEBHOOK_TIMEOUT_SECS", "42"),
        ("REGISTRATION_WEBHOOK_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    assert_eq!(
        cfg.sink,
        SinkConfig::Webhook {
            url: "https://api.example.test/register".into(),
            timeouts: WebhookTimeouts { request_secs: 42, connect_secs: 7 },
        }
    );
}

#[test]
fn webhook_rejects_non_http_url() {
    let err = AppConfig::from_lookup(lookup(&[
        ("REGISTRATION_SINK", "webhook"),
        ("REGISTRATION_WEBHOOK_URL", "ftp://example.test"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "REGISTRATION_WEBHOOK_URL", .. }));
}

#[test]
fn email_requires_key_and_from() {
    let err = AppConfig::from_lookup(lookup(&[("REGISTRATION_SINK", "email")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "RESEND_API_KEY" });

    let err =
        AppConfig::from_lookup(lookup(&[("REGISTRATION_SINK", "email"), ("RESEND_API_KEY", "re_x")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "RESEND_FROM" });

    let cfg = AppConfig::from_lookup(lookup(&[
        ("REGISTRATION_SINK", "email"),
        ("RESEND_API_KEY", "re_x"),
        ("RESEND_FROM", "noreply@club.dev"),
    ]))
    .unwrap();
    assert_eq!(
        cfg.sink,
        SinkConfig::Email { api_key: "re_x".into(), from: "noreply@club.dev".into(), sender: Sender::default() }
    );
}

#[test]
fn unknown_sink_errors() {
    let err = AppConfig::from_lookup(lookup(&[("REGISTRATION_SINK", "carrier-pigeon")])).unwrap_err();
    assert_eq!(err.to_string(), "unknown REGISTRATION_SINK: carrier-pigeon");
}

#[test]
fn invalid_number_errors() {
    let err = AppConfig::from_lookup(lookup(&[("REGISTRATION_CLOSE_DELAY_MS", "soon")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "REGISTRATION_CLOSE_DELAY_MS", value: "soon".into() });
}
