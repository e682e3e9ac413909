//! Local notification bootstrap and delivery.
//!
//! [`NotificationCenter::bootstrap`] runs once at application start: it asks
//! for permission when needed, registers the countdown channel and installs
//! the foreground presentation policy. Delivery is best-effort; a missing
//! permission or a failing platform service is reported as a [`NotifyError`]
//! that callers are free to ignore.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::NotifyError;

#[cfg(any(target_os = "android", test))]
mod android;
#[cfg(not(target_os = "android"))]
mod desktop;

#[cfg(target_os = "android")]
pub use android::AndroidNotifier;
#[cfg(not(target_os = "android"))]
pub use desktop::SystemNotifier;

/// Channel used for countdown completion alerts.
pub const COUNTDOWN_CHANNEL_ID: &str = "countdown";

/// Notification permission as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Channel importance levels, highest last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Importance {
    Min,
    Low,
    Default,
    High,
    Max,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelSound {
    Default,
    Silent,
}

/// Named delivery configuration for local notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub importance: Importance,
    pub sound: ChannelSound,
}

impl NotificationChannel {
    /// The channel countdown alerts are posted to.
    pub fn countdown() -> Self {
        Self {
            id: COUNTDOWN_CHANNEL_ID.to_string(),
            name: "Countdown".to_string(),
            importance: Importance::High,
            sound: ChannelSound::Default,
        }
    }
}

/// How a notification is presented while the app is in the foreground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForegroundPresentation {
    pub show_alert: bool,
    pub play_sound: bool,
    pub set_badge: bool,
}

/// Foreground handler invoked for every notification the app posts.
pub type PresentationHandler = fn(&LocalNotification) -> ForegroundPresentation;

/// Always show an alert and play a sound, never touch the badge.
pub const fn alert_with_sound(_notification: &LocalNotification) -> ForegroundPresentation {
    ForegroundPresentation {
        show_alert: true,
        play_sound: true,
        set_badge: false,
    }
}

/// A notification posted by the app itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
    pub channel_id: String,
}

impl LocalNotification {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            channel_id: channel_id.into(),
        }
    }
}

/// Platform notification service.
pub trait NotificationBackend: Send + Sync {
    fn permission_status(&self) -> PermissionStatus;

    fn request_permission(&self) -> PermissionStatus;

    fn register_channel(&self, channel: &NotificationChannel) -> Result<(), NotifyError>;

    fn present(
        &self,
        notification: &LocalNotification,
        channel: Option<&NotificationChannel>,
        presentation: ForegroundPresentation,
    ) -> Result<(), NotifyError>;
}

/// Owned handle produced by the one-time notification bootstrap.
pub struct NotificationCenter {
    backend: Box<dyn NotificationBackend>,
    permission: Mutex<PermissionStatus>,
    channels: Vec<NotificationChannel>,
    handler: PresentationHandler,
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NotificationCenter")
            .field("permission", &*self.permission_guard())
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

impl NotificationCenter {
    /// Check/request permission, register the countdown channel and install
    /// the foreground handler.
    ///
    /// Never fails: a denied permission or a rejected channel only degrades
    /// later deliveries.
    pub fn bootstrap(backend: Box<dyn NotificationBackend>) -> Self {
        let mut permission = backend.permission_status();
        if !permission.is_granted() {
            debug!(?permission, "Requesting notification permission");
            permission = backend.request_permission();
        }
        if permission.is_granted() {
            info!("Notification permission granted");
        } else {
            warn!(
                ?permission,
                "Notification permission not granted; alerts may not be shown"
            );
        }

        let channel = NotificationChannel::countdown();
        let mut channels = Vec::new();
        match backend.register_channel(&channel) {
            Ok(()) => channels.push(channel),
            Err(error) => warn!(channel = %channel.id, "Failed to register channel: {}", error),
        }

        Self {
            backend,
            permission: Mutex::new(permission),
            channels,
            handler: alert_with_sound,
        }
    }

    /// Last known permission status.
    pub fn permission(&self) -> PermissionStatus {
        *self.permission_guard()
    }

    fn permission_guard(&self) -> MutexGuard<'_, PermissionStatus> {
        self.permission.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Permission for a delivery, asking the platform again while not granted.
    ///
    /// Permission prompts may be answered after the bootstrap has returned.
    fn refresh_permission(&self) -> PermissionStatus {
        let mut permission = self.permission_guard();
        if !permission.is_granted() {
            *permission = self.backend.permission_status();
            if permission.is_granted() {
                info!("Notification permission granted after bootstrap");
            }
        }
        *permission
    }

    pub fn channel(&self, id: &str) -> Option<&NotificationChannel> {
        self.channels.iter().find(|channel| channel.id == id)
    }

    /// Answer of the installed foreground handler for `notification`.
    pub fn foreground_presentation(&self, notification: &LocalNotification) -> ForegroundPresentation {
        (self.handler)(notification)
    }

    /// Post a notification immediately.
    pub fn notify(&self, notification: &LocalNotification) -> Result<(), NotifyError> {
        if !self.refresh_permission().is_granted() {
            return Err(NotifyError::PermissionDenied);
        }
        let presentation = self.foreground_presentation(notification);
        self.backend.present(
            notification,
            self.channel(&notification.channel_id),
            presentation,
        )
    }

    /// Post a notification from async code without blocking the caller's task.
    pub async fn deliver(self: Arc<Self>, notification: LocalNotification) -> Result<(), NotifyError> {
        tokio::task::spawn_blocking(move || self.notify(&notification))
            .await
            .map_err(|error| NotifyError::Backend(format!("notification task failed: {error}")))?
    }
}

/// Default backend for the current platform.
#[cfg(target_os = "android")]
pub fn default_backend() -> Box<dyn NotificationBackend> {
    Box::new(AndroidNotifier::new())
}

/// Default backend for the current platform.
#[cfg(not(target_os = "android"))]
pub fn default_backend() -> Box<dyn NotificationBackend> {
    Box::new(SystemNotifier::new())
}
