//! `notify-rust` backend for host builds.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use super::{
    ChannelSound, ForegroundPresentation, Importance, LocalNotification, NotificationBackend,
    NotificationChannel, PermissionStatus,
};
use crate::NotifyError;

const APP_NAME: &str = "Tickshop";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NotifierKind {
    System,
    LogOnly,
}

/// `notify-rust` backed notifier.
///
/// Starts optimistic and downgrades to log-only output after the first
/// delivery failure.
#[derive(Debug)]
pub struct SystemNotifier {
    kind: Mutex<NotifierKind>,
}

impl Default for SystemNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemNotifier {
    pub fn new() -> Self {
        debug!("Notifier created: using notify-rust backend initially");
        Self {
            kind: Mutex::new(NotifierKind::System),
        }
    }

    fn kind(&self) -> NotifierKind {
        *self.kind.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn downgrade(&self) {
        *self.kind.lock().unwrap_or_else(PoisonError::into_inner) = NotifierKind::LogOnly;
    }
}

impl NotificationBackend for SystemNotifier {
    fn permission_status(&self) -> PermissionStatus {
        probe_notification_service()
    }

    fn request_permission(&self) -> PermissionStatus {
        // Desktop notification servers have no prompt; re-probe instead.
        probe_notification_service()
    }

    fn register_channel(&self, channel: &NotificationChannel) -> Result<(), NotifyError> {
        // Desktop servers have no channel registry; urgency and sound hints
        // are applied per notification instead.
        debug!(
            channel = %channel.id,
            importance = ?channel.importance,
            "Registered notification channel"
        );
        Ok(())
    }

    fn present(
        &self,
        notification: &LocalNotification,
        channel: Option<&NotificationChannel>,
        presentation: ForegroundPresentation,
    ) -> Result<(), NotifyError> {
        if self.kind() == NotifierKind::LogOnly || !presentation.show_alert {
            info!("[NOTIFICATION] {}: {}", notification.title, notification.body);
            return Ok(());
        }

        let mut builder = notify_rust::Notification::new();
        builder
            .appname(APP_NAME)
            .summary(&notification.title)
            .body(&notification.body);
        apply_channel_hints(&mut builder, channel, presentation);

        match builder.show() {
            Ok(_) => {
                debug!(title = %notification.title, "Notification shown");
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "notify-rust failed; downgrading to log-only notifier");
                self.downgrade();
                info!("[NOTIFICATION] {}: {}", notification.title, notification.body);
                Err(NotifyError::Backend(error.to_string()))
            }
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn probe_notification_service() -> PermissionStatus {
    match notify_rust::get_server_information() {
        Ok(info) => {
            debug!(server = %info.name, "Notification server available");
            PermissionStatus::Granted
        }
        Err(error) => {
            debug!(error = %error, "Notification server unavailable");
            PermissionStatus::Denied
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
const fn probe_notification_service() -> PermissionStatus {
    PermissionStatus::Granted
}

/// Only `Max` maps to `Critical`; critical notifications stay until dismissed.
#[cfg(all(unix, not(target_os = "macos")))]
const fn urgency_for(importance: Importance) -> notify_rust::Urgency {
    match importance {
        Importance::Min | Importance::Low => notify_rust::Urgency::Low,
        Importance::Default | Importance::High => notify_rust::Urgency::Normal,
        Importance::Max => notify_rust::Urgency::Critical,
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn apply_channel_hints(
    builder: &mut notify_rust::Notification,
    channel: Option<&NotificationChannel>,
    presentation: ForegroundPresentation,
) {
    let importance = channel.map_or(Importance::Default, |channel| channel.importance);
    builder.urgency(urgency_for(importance));

    let silent_channel = channel.is_some_and(|channel| channel.sound == ChannelSound::Silent);
    if silent_channel || !presentation.play_sound {
        builder.hint(notify_rust::Hint::SuppressSound(true));
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn apply_channel_hints(
    _builder: &mut notify_rust::Notification,
    _channel: Option<&NotificationChannel>,
    _presentation: ForegroundPresentation,
) {
}

#[cfg(all(test, unix, not(target_os = "macos")))]
mod tests {
    use super::*;
    use notify_rust::Urgency;

    #[test]
    fn high_importance_is_not_sticky() {
        assert!(matches!(urgency_for(Importance::High), Urgency::Normal));
        assert!(matches!(urgency_for(Importance::Default), Urgency::Normal));
    }

    #[test]
    fn only_max_importance_is_critical() {
        assert!(matches!(urgency_for(Importance::Max), Urgency::Critical));
        assert!(matches!(urgency_for(Importance::Min), Urgency::Low));
        assert!(matches!(urgency_for(Importance::Low), Urgency::Low));
    }
}
