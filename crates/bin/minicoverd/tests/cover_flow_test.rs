//! End-to-end flow tests for a configured cover.
//!
//! Each test builds the cover from a TOML `[cover]` section exactly as the
//! daemon does, wires a real `CoverService` and change bus, and replaces the
//! broker with an in-memory publisher. No network connection is opened.

use std::future::Future;
use std::sync::{Arc, Mutex};

use minicover_adapter_mqtt::{CoverConfig, CoverTopics};
use minicover_app::event_bus::InProcessChangeBus;
use minicover_app::ports::CommandPublisher;
use minicover_app::services::cover_service::CoverService;
use minicover_app::templates::{FormatTemplate, JsonPointerTemplate};
use minicover_domain::command::{CoverCommand, Outbound};
use minicover_domain::cover::CoverStatus;
use minicover_domain::error::MiniCoverError;
use minicover_domain::notification::{ChangeCause, ChangeNotification};
use tokio::sync::broadcast;

/// Records `(topic, payload)` pairs instead of talking to a broker.
#[derive(Default)]
struct RecordingBroker {
    topics: Option<CoverTopics>,
    published: Mutex<Vec<(String, String)>>,
}

impl RecordingBroker {
    fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

impl CommandPublisher for RecordingBroker {
    fn publish(
        &self,
        outbound: Outbound,
    ) -> impl Future<Output = Result<(), MiniCoverError>> + Send {
        let topic = self
            .topics
            .as_ref()
            .and_then(|topics| topics.outbound(outbound.channel))
            .unwrap_or_default()
            .to_string();
        self.published
            .lock()
            .unwrap()
            .push((topic, outbound.payload));
        async { Ok(()) }
    }
}

struct Harness {
    service: CoverService<Arc<RecordingBroker>, InProcessChangeBus>,
    broker: Arc<RecordingBroker>,
    changes: broadcast::Receiver<ChangeNotification>,
    topics: CoverTopics,
}

impl Harness {
    fn new(toml: &str) -> Self {
        let cover: CoverConfig = toml::from_str(toml).unwrap();
        let settings = cover.settings().unwrap();
        let topics = CoverTopics::new(&cover);
        let broker = Arc::new(RecordingBroker {
            topics: Some(topics.clone()),
            ..RecordingBroker::default()
        });
        let bus = InProcessChangeBus::new(16);
        let changes = bus.subscribe();

        let mut service = CoverService::new(settings, Arc::clone(&broker), bus);
        if let Some(pointer) = &cover.value_template {
            service = service.with_value_template(JsonPointerTemplate::new(pointer.as_str()));
        }
        if let Some(pattern) = &cover.set_position_template {
            service = service.with_set_position_template(FormatTemplate::new(pattern.as_str()));
        }

        Self {
            service,
            broker,
            changes,
            topics,
        }
    }

    /// Deliver `payload` as if it arrived on `topic`.
    async fn receive(&mut self, topic: &str, payload: &str) -> bool {
        match self.topics.inbound(topic) {
            Some(channel) => self.service.handle_message(channel, payload).await.is_some(),
            None => false,
        }
    }
}

#[tokio::test]
async fn should_assume_state_for_command_only_cover() {
    let mut harness = Harness::new("command_topic = 'garage/set'");

    harness.service.open().await.unwrap();
    assert_eq!(harness.service.state().status(), CoverStatus::Open);
    assert_eq!(harness.service.state().position(), None);
    assert!(harness.service.state().assumed_state());

    harness.service.close().await.unwrap();
    assert_eq!(harness.service.state().status(), CoverStatus::Closed);

    harness.service.stop().await.unwrap();
    assert_eq!(harness.service.state().status(), CoverStatus::Closed);

    assert_eq!(
        harness.broker.published(),
        vec![
            ("garage/set".to_string(), "OPEN".to_string()),
            ("garage/set".to_string(), "CLOSE".to_string()),
            ("garage/set".to_string(), "STOP".to_string()),
        ]
    );

    let first = harness.changes.recv().await.unwrap();
    assert_eq!(
        first.cause,
        ChangeCause::Optimistic {
            command: CoverCommand::Open
        }
    );
}

#[tokio::test]
async fn should_reconcile_position_reports_in_native_range() {
    let mut harness = Harness::new(
        "
        command_topic = 'blinds/set'
        state_topic = 'blinds/state'
        position_topic = 'blinds/position'
        set_position_topic = 'blinds/position/set'
        position_open = 200
        position_closed = 0
        ",
    );

    harness.service.set_position(42).await.unwrap();
    assert_eq!(
        harness.broker.published(),
        vec![("blinds/position/set".to_string(), "84".to_string())]
    );
    assert_eq!(harness.service.state().position(), None);

    // the state topic is not subscribed when a position topic exists
    assert!(!harness.receive("blinds/state", "open").await);

    assert!(harness.receive("blinds/position", "84").await);
    assert_eq!(harness.service.state().position(), Some(42));
    assert!(!harness.service.state().assumed_state());

    assert!(harness.receive("blinds/position", "0").await);
    assert_eq!(harness.service.state().is_closed(), Some(true));

    assert!(!harness.receive("blinds/position", "halfway").await);
    assert_eq!(harness.service.state().position(), Some(0));

    let causes: Vec<ChangeCause> = [
        harness.changes.recv().await.unwrap(),
        harness.changes.recv().await.unwrap(),
    ]
    .into_iter()
    .map(|change| change.cause)
    .collect();
    assert_eq!(
        causes,
        vec![ChangeCause::PositionReport, ChangeCause::PositionReport]
    );
}

#[tokio::test]
async fn should_track_tilt_and_drop_out_of_range_reports() {
    let mut harness = Harness::new(
        "
        tilt_command_topic = 'slats/set'
        tilt_status_topic = 'slats/state'
        tilt_min = 0
        tilt_max = 180
        ",
    );

    assert!(harness.receive("slats/state", "90").await);
    assert_eq!(harness.service.state().tilt(), Some(50));

    assert!(!harness.receive("slats/state", "250").await);
    assert!(!harness.receive("slats/state", "12.5").await);
    assert_eq!(harness.service.state().tilt(), Some(50));

    // a tilt status topic disables tilt optimism
    harness.service.open_tilt().await.unwrap();
    assert_eq!(harness.service.state().tilt(), Some(50));

    harness.service.set_tilt(25).await.unwrap();
    assert_eq!(
        harness.broker.published(),
        vec![
            ("slats/set".to_string(), "100".to_string()),
            ("slats/set".to_string(), "45".to_string()),
        ]
    );
}

#[tokio::test]
async fn should_apply_templates_in_both_directions() {
    let mut harness = Harness::new(
        r#"
        command_topic = 'awning/set'
        position_topic = 'awning/position'
        set_position_topic = 'awning/position/set'
        value_template = '/position'
        set_position_template = '{"target": {value}}'
        "#,
    );

    assert!(
        harness
            .receive("awning/position", r#"{"position": 100}"#)
            .await
    );
    assert_eq!(harness.service.state().is_closed(), Some(false));

    harness.service.set_position(15).await.unwrap();
    assert_eq!(
        harness.broker.published(),
        vec![(
            "awning/position/set".to_string(),
            r#"{"target": 15}"#.to_string()
        )]
    );
}

#[tokio::test]
async fn should_refuse_unsupported_commands() {
    let mut harness = Harness::new("state_topic = 'gate/state'");

    assert!(harness.receive("gate/state", "closed").await);
    let err = harness.service.open().await.unwrap_err();
    assert!(matches!(err, MiniCoverError::Unsupported(_)));
    assert!(harness.broker.published().is_empty());
    assert_eq!(harness.service.state().is_closed(), Some(true));

    let features = harness.service.supported_features();
    assert!(!features.open && !features.set_position && !features.open_tilt);
}

#[test]
fn should_refuse_invalid_cover_configuration() {
    let cover: CoverConfig = toml::from_str("set_position_topic = 'x/set'").unwrap();
    assert!(matches!(
        cover.settings(),
        Err(MiniCoverError::Validation(_))
    ));

    let cover: CoverConfig = toml::from_str(
        "
        position_topic = 'x/pos'
        position_open = 10
        position_closed = 10
        ",
    )
    .unwrap();
    assert!(cover.settings().is_err());
}
