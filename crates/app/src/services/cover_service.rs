//! Cover service — reconciles inbound status reports and executes commands.
//!
//! The service owns the [`CoverState`]; it is meant to live inside a single
//! task that receives both transport messages and caller commands, so every
//! mutation happens in arrival order.

use minicover_domain::command::{self, CoverCommand};
use minicover_domain::cover::{CoverFeatures, CoverSettings, CoverState, InboundChannel};
use minicover_domain::error::MiniCoverError;
use minicover_domain::inbound;
use minicover_domain::notification::ChangeNotification;

use crate::ports::{ChangeNotifier, CommandPublisher, PayloadTemplate};

/// Application service driving a single cover.
pub struct CoverService<P, N> {
    settings: CoverSettings,
    state: CoverState,
    publisher: P,
    notifier: N,
    value_template: Option<Box<dyn PayloadTemplate>>,
    set_position_template: Option<Box<dyn PayloadTemplate>>,
}

impl<P: CommandPublisher, N: ChangeNotifier> CoverService<P, N> {
    /// Create a service for an already validated cover.
    pub fn new(settings: CoverSettings, publisher: P, notifier: N) -> Self {
        let state = CoverState::new(&settings);
        Self {
            settings,
            state,
            publisher,
            notifier,
            value_template: None,
            set_position_template: None,
        }
    }

    /// Rewrite state and position payloads before they are parsed.
    #[must_use]
    pub fn with_value_template(mut self, template: impl PayloadTemplate + 'static) -> Self {
        self.value_template = Some(Box::new(template));
        self
    }

    /// Produce set-position payloads from the requested percentage.
    #[must_use]
    pub fn with_set_position_template(mut self, template: impl PayloadTemplate + 'static) -> Self {
        self.set_position_template = Some(Box::new(template));
        self
    }

    #[must_use]
    pub fn settings(&self) -> &CoverSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> &CoverState {
        &self.state
    }

    #[must_use]
    pub fn supported_features(&self) -> CoverFeatures {
        self.settings.supported_features()
    }

    /// Reconcile a payload received on one of the status channels.
    ///
    /// Returns the notification emitted for an accepted payload, `None` when
    /// the payload was discarded.
    #[tracing::instrument(skip(self, payload))]
    pub async fn handle_message(
        &mut self,
        channel: InboundChannel,
        payload: &str,
    ) -> Option<ChangeNotification> {
        let rendered = match (&self.value_template, channel) {
            (Some(template), InboundChannel::State | InboundChannel::Position) => {
                match template.render(payload) {
                    Ok(rendered) => rendered,
                    Err(err) => {
                        tracing::warn!(%err, payload, "unable to render inbound payload");
                        return None;
                    }
                }
            }
            _ => payload.to_string(),
        };

        match inbound::route(channel, &rendered, &mut self.state, &self.settings) {
            Ok(change) => {
                self.emit(&change).await;
                Some(change)
            }
            Err(rejection) if rejection.is_silent() => {
                tracing::trace!(%rejection, "ignoring tilt payload");
                None
            }
            Err(rejection) => {
                tracing::warn!(%rejection, "ignoring status payload");
                None
            }
        }
    }

    /// Publish `command` and apply the state it implies in optimistic mode.
    ///
    /// A failing set-position template publishes nothing; the closed flag
    /// is reset and the resulting notification is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`MiniCoverError::Unsupported`] when the cover lacks the
    /// channel the command needs, or the transport error of the publisher.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &mut self,
        command: CoverCommand,
    ) -> Result<Option<ChangeNotification>, MiniCoverError> {
        let mut outbound = command.plan(&self.settings)?;

        if let (CoverCommand::SetPosition(pct), Some(template)) =
            (command, &self.set_position_template)
        {
            match template.render(&pct.to_string()) {
                Ok(payload) => outbound.payload = payload,
                Err(err) => {
                    tracing::error!(%err, "unable to render set-position payload");
                    let change = command::render_failed(&mut self.state);
                    self.emit(&change).await;
                    return Ok(Some(change));
                }
            }
        }

        if let Err(err) = self.publisher.publish(outbound).await {
            tracing::error!(%err, "unable to publish command");
            return Err(err);
        }

        let change = command.apply_optimistic(&mut self.state, &self.settings);
        if let Some(change) = &change {
            self.emit(change).await;
        }
        Ok(change)
    }

    /// Move the cover up.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn open(&mut self) -> Result<Option<ChangeNotification>, MiniCoverError> {
        self.execute(CoverCommand::Open).await
    }

    /// Move the cover down.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn close(&mut self) -> Result<Option<ChangeNotification>, MiniCoverError> {
        self.execute(CoverCommand::Close).await
    }

    /// Stop the cover. Never changes the local state.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn stop(&mut self) -> Result<Option<ChangeNotification>, MiniCoverError> {
        self.execute(CoverCommand::Stop).await
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_position(
        &mut self,
        pct: u8,
    ) -> Result<Option<ChangeNotification>, MiniCoverError> {
        self.execute(CoverCommand::SetPosition(pct)).await
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn open_tilt(&mut self) -> Result<Option<ChangeNotification>, MiniCoverError> {
        self.execute(CoverCommand::OpenTilt).await
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn close_tilt(&mut self) -> Result<Option<ChangeNotification>, MiniCoverError> {
        self.execute(CoverCommand::CloseTilt).await
    }

    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn set_tilt(&mut self, pct: u8) -> Result<Option<ChangeNotification>, MiniCoverError> {
        self.execute(CoverCommand::SetTilt(pct)).await
    }

    async fn emit(&self, change: &ChangeNotification) {
        if let Err(err) = self.notifier.notify(change.clone()).await {
            tracing::warn!(%err, "unable to deliver change notification");
        }
    }
}
