//! Save-outcome notifications: log output or freedesktop D-Bus popups.

use std::collections::HashMap;
use std::time::Duration;
use zbus::{Connection, proxy};

const APP_NAME: &str = "Whiteboard";
const SEND_TIMEOUT: Duration = Duration::from_secs(2);

/// Reports user-facing events such as a finished or failed save.
pub trait Notifier {
    fn notify(&self, summary: &str, body: &str);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, summary: &str, body: &str) {
        log::info!("{summary}: {body}");
    }
}

/// D-Bus interface for freedesktop Notifications.
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Send a notification.
    ///
    /// # Arguments
    /// * `app_name` - Application name
    /// * `replaces_id` - ID of notification to replace (0 for new)
    /// * `app_icon` - Icon name or path
    /// * `summary` - Notification title
    /// * `body` - Notification body text
    /// * `actions` - List of action identifiers and labels
    /// * `hints` - Additional metadata
    /// * `expire_timeout` - Timeout in milliseconds (-1 for default)
    ///
    /// # Returns
    /// Notification ID
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Send a system notification.
///
/// # Arguments
/// * `summary` - Notification title
/// * `body` - Notification body text
/// * `icon` - Icon name
pub async fn send_notification(summary: &str, body: &str, icon: &str) -> Result<(), String> {
    let connection = Connection::session()
        .await
        .map_err(|e| format!("Failed to connect to session bus: {}", e))?;

    let proxy = NotificationsProxy::new(&connection)
        .await
        .map_err(|e| format!("Failed to create notifications proxy: {}", e))?;

    proxy
        .notify(
            APP_NAME,
            0,
            icon,
            summary,
            body,
            vec![],
            HashMap::new(),
            3000, // 3 second timeout
        )
        .await
        .map_err(|e| format!("Failed to send notification: {}", e))?;

    Ok(())
}

/// Sends notifications over the session bus.
///
/// Owns a current-thread runtime so synchronous callers can block on the D-Bus
/// round trip. Any failure (no bus, no notification daemon, timeout) is logged
/// and the notification falls back to [`LogNotifier`].
pub struct DesktopNotifier {
    runtime: tokio::runtime::Runtime,
}

impl DesktopNotifier {
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        Ok(Self { runtime })
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, summary: &str, body: &str) {
        let icon = if summary.contains("failed") {
            "dialog-error"
        } else {
            "document-save"
        };

        let result = self.runtime.block_on(async {
            tokio::time::timeout(SEND_TIMEOUT, send_notification(summary, body, icon)).await
        });

        match result {
            Ok(Ok(())) => log::debug!("Sent desktop notification: {summary}"),
            Ok(Err(e)) => {
                log::warn!("{e}");
                LogNotifier.notify(summary, body);
            }
            Err(_) => {
                log::warn!("Timed out sending desktop notification");
                LogNotifier.notify(summary, body);
            }
        }
    }
}

impl std::fmt::Debug for DesktopNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopNotifier").finish_non_exhaustive()
    }
}
