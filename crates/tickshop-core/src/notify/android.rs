//! Android backend posting through the host activity's `NotificationManager`.
//!
//! The activity and VM come from `ndk-context`, which the mobile runtime
//! initialises before the app's entrypoint runs. Every JNI call runs inside a
//! local reference frame and clears any pending Java exception on failure.

use super::{Importance, PermissionStatus};

/// `PackageManager.PERMISSION_GRANTED`.
const PERMISSION_GRANTED: i32 = 0;

/// `Build.VERSION_CODES.TIRAMISU`, first release with `POST_NOTIFICATIONS`.
const TIRAMISU: i32 = 33;

/// `NotificationManager.IMPORTANCE_*` value for a channel importance.
pub(super) const fn importance_level(importance: Importance) -> i32 {
    match importance {
        Importance::Min => 1,
        Importance::Low => 2,
        Importance::Default => 3,
        Importance::High => 4,
        Importance::Max => 5,
    }
}

pub(super) const fn needs_runtime_permission(sdk_int: i32) -> bool {
    sdk_int >= TIRAMISU
}

/// Combine the runtime permission check with the user's app-level toggle.
///
/// An ungranted runtime permission reads as undetermined so the bootstrap
/// asks for it; Android only reveals a permanent denial through the prompt.
pub(super) const fn permission_from_checks(
    sdk_int: i32,
    check_result: i32,
    notifications_enabled: bool,
) -> PermissionStatus {
    if needs_runtime_permission(sdk_int) && check_result != PERMISSION_GRANTED {
        PermissionStatus::Undetermined
    } else if notifications_enabled {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Denied
    }
}

#[cfg(target_os = "android")]
pub use jni_backend::AndroidNotifier;

#[cfg(target_os = "android")]
mod jni_backend {
    use std::sync::atomic::{AtomicI32, Ordering};

    use jni::objects::{JObject, JValue};
    use jni::sys::JNI_TRUE;
    use jni::{JNIEnv, JavaVM};
    use tracing::{debug, info, warn};

    use super::{importance_level, needs_runtime_permission, permission_from_checks};
    use crate::notify::{
        ChannelSound, ForegroundPresentation, LocalNotification, NotificationBackend,
        NotificationChannel, PermissionStatus,
    };
    use crate::NotifyError;

    const POST_NOTIFICATIONS: &str = "android.permission.POST_NOTIFICATIONS";
    const PERMISSION_REQUEST_CODE: i32 = 0x7153;
    /// `Build.VERSION_CODES.O`, first release with notification channels.
    const OREO: i32 = 26;
    /// `Build.VERSION_CODES.S`, first release with `Notification.Builder#setSilent`.
    const SNOW_CONE: i32 = 31;
    const LOCAL_FRAME_CAPACITY: i32 = 32;
    const BUILDER_CLASS: &str = "android/app/Notification$Builder";
    const BUILDER_TEXT_SIG: &str = "(Ljava/lang/CharSequence;)Landroid/app/Notification$Builder;";

    type JniResult<T> = jni::errors::Result<T>;

    /// Notifier backed by the platform `NotificationManager`.
    #[derive(Debug)]
    pub struct AndroidNotifier {
        next_id: AtomicI32,
    }

    impl Default for AndroidNotifier {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AndroidNotifier {
        pub const fn new() -> Self {
            Self {
                next_id: AtomicI32::new(1),
            }
        }
    }

    impl NotificationBackend for AndroidNotifier {
        fn permission_status(&self) -> PermissionStatus {
            with_activity(query_permission).unwrap_or_else(|error| {
                warn!("Failed to query notification permission: {}", error);
                PermissionStatus::Denied
            })
        }

        fn request_permission(&self) -> PermissionStatus {
            with_activity(request_permission).unwrap_or_else(|error| {
                warn!("Failed to request notification permission: {}", error);
                PermissionStatus::Denied
            })
        }

        fn register_channel(&self, channel: &NotificationChannel) -> Result<(), NotifyError> {
            with_activity(|env, activity| create_channel(env, activity, channel))?;
            debug!(channel = %channel.id, "Registered notification channel");
            Ok(())
        }

        fn present(
            &self,
            notification: &LocalNotification,
            _channel: Option<&NotificationChannel>,
            presentation: ForegroundPresentation,
        ) -> Result<(), NotifyError> {
            if !presentation.show_alert {
                info!("[NOTIFICATION] {}: {}", notification.title, notification.body);
                return Ok(());
            }

            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            with_activity(|env, activity| {
                post_notification(env, activity, notification, presentation, id)
            })?;
            debug!(id, title = %notification.title, "Notification posted");
            Ok(())
        }
    }

    #[allow(unsafe_code)]
    fn with_activity<T>(
        action: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> JniResult<T>,
    ) -> Result<T, NotifyError> {
        let context = ndk_context::android_context();
        // SAFETY: the VM pointer comes from the initialised Android context
        // and stays valid for the life of the process.
        let vm = unsafe { JavaVM::from_raw(context.vm().cast()) }.map_err(backend_error)?;
        let mut env = vm.attach_current_thread().map_err(backend_error)?;
        // SAFETY: the context is a global reference to the host activity,
        // owned by the runtime; wrapping it does not take ownership.
        let activity = unsafe { JObject::from_raw(context.context().cast()) };

        let result = env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| action(env, &activity));
        if result.is_err() && env.exception_check().unwrap_or(false) {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        }
        result.map_err(backend_error)
    }

    fn backend_error(error: jni::errors::Error) -> NotifyError {
        NotifyError::Backend(error.to_string())
    }

    fn sdk_int(env: &mut JNIEnv<'_>) -> JniResult<i32> {
        env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
            .i()
    }

    fn notification_manager<'local>(
        env: &mut JNIEnv<'local>,
        activity: &JObject<'_>,
    ) -> JniResult<JObject<'local>> {
        let service = env.new_string("notification")?;
        env.call_method(
            activity,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&service)],
        )?
        .l()
    }

    fn query_permission(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> JniResult<PermissionStatus> {
        let sdk_int = sdk_int(env)?;
        let check_result = if needs_runtime_permission(sdk_int) {
            let permission = env.new_string(POST_NOTIFICATIONS)?;
            env.call_method(
                activity,
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&permission)],
            )?
            .i()?
        } else {
            super::PERMISSION_GRANTED
        };

        let manager = notification_manager(env, activity)?;
        let enabled = env
            .call_method(&manager, "areNotificationsEnabled", "()Z", &[])?
            .z()?;
        Ok(permission_from_checks(sdk_int, check_result, enabled))
    }

    fn request_permission(
        env: &mut JNIEnv<'_>,
        activity: &JObject<'_>,
    ) -> JniResult<PermissionStatus> {
        let status = query_permission(env, activity)?;
        if status != PermissionStatus::Undetermined {
            return Ok(status);
        }

        let permission = env.new_string(POST_NOTIFICATIONS)?;
        let permissions = env.new_object_array(1, "java/lang/String", &permission)?;
        env.call_method(
            activity,
            "requestPermissions",
            "([Ljava/lang/String;I)V",
            &[JValue::Object(&permissions), JValue::Int(PERMISSION_REQUEST_CODE)],
        )?;
        // The prompt answers asynchronously; the center re-checks on delivery.
        Ok(PermissionStatus::Undetermined)
    }

    fn create_channel(
        env: &mut JNIEnv<'_>,
        activity: &JObject<'_>,
        channel: &NotificationChannel,
    ) -> JniResult<()> {
        if sdk_int(env)? < OREO {
            return Ok(());
        }

        let id = env.new_string(&channel.id)?;
        let name = env.new_string(&channel.name)?;
        let android_channel = env.new_object(
            "android/app/NotificationChannel",
            "(Ljava/lang/String;Ljava/lang/CharSequence;I)V",
            &[
                JValue::Object(&id),
                JValue::Object(&name),
                JValue::Int(importance_level(channel.importance)),
            ],
        )?;
        if channel.sound == ChannelSound::Silent {
            let none = JObject::null();
            env.call_method(
                &android_channel,
                "setSound",
                "(Landroid/net/Uri;Landroid/media/AudioAttributes;)V",
                &[JValue::Object(&none), JValue::Object(&none)],
            )?;
        }

        let manager = notification_manager(env, activity)?;
        env.call_method(
            &manager,
            "createNotificationChannel",
            "(Landroid/app/NotificationChannel;)V",
            &[JValue::Object(&android_channel)],
        )?;
        Ok(())
    }

    fn post_notification(
        env: &mut JNIEnv<'_>,
        activity: &JObject<'_>,
        notification: &LocalNotification,
        presentation: ForegroundPresentation,
        id: i32,
    ) -> JniResult<()> {
        let sdk_int = sdk_int(env)?;
        let builder = if sdk_int >= OREO {
            let channel_id = env.new_string(&notification.channel_id)?;
            env.new_object(
                BUILDER_CLASS,
                "(Landroid/content/Context;Ljava/lang/String;)V",
                &[JValue::Object(activity), JValue::Object(&channel_id)],
            )?
        } else {
            env.new_object(
                BUILDER_CLASS,
                "(Landroid/content/Context;)V",
                &[JValue::Object(activity)],
            )?
        };

        let title = env.new_string(&notification.title)?;
        let body = env.new_string(&notification.body)?;
        env.call_method(&builder, "setContentTitle", BUILDER_TEXT_SIG, &[JValue::Object(&title)])?;
        env.call_method(&builder, "setContentText", BUILDER_TEXT_SIG, &[JValue::Object(&body)])?;

        let app_info = env
            .call_method(
                activity,
                "getApplicationInfo",
                "()Landroid/content/pm/ApplicationInfo;",
                &[],
            )?
            .l()?;
        let icon = env.get_field(&app_info, "icon", "I")?.i()?;
        env.call_method(
            &builder,
            "setSmallIcon",
            "(I)Landroid/app/Notification$Builder;",
            &[JValue::Int(icon)],
        )?;
        env.call_method(
            &builder,
            "setAutoCancel",
            "(Z)Landroid/app/Notification$Builder;",
            &[JValue::Bool(JNI_TRUE)],
        )?;
        if !presentation.play_sound && sdk_int >= SNOW_CONE {
            env.call_method(
                &builder,
                "setSilent",
                "(Z)Landroid/app/Notification$Builder;",
                &[JValue::Bool(JNI_TRUE)],
            )?;
        }

        let built = env
            .call_method(&builder, "build", "()Landroid/app/Notification;", &[])?
            .l()?;
        let manager = notification_manager(env, activity)?;
        env.call_method(
            &manager,
            "notify",
            "(ILandroid/app/Notification;)V",
            &[JValue::Int(id), JValue::Object(&built)],
        )?;
        Ok(())
    }
}
