// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Platform setup registers the notification
// channel the verification flows post to; resource reads go through the
// APK's `AssetManager`.

#![cfg(target_os = "android")]

use jni::JNIEnv;
use jni::objects::{JObject, JValue};
use jni::sys::jsize;

use blickwerk_core::error::{BlickwerkError, Result};

use crate::traits::{NativeResources, PlatformBridge, PlatformSetup};

/// Notification channel registered during platform setup.
const NOTIFICATION_CHANNEL_ID: &str = "blickwerk";
const NOTIFICATION_CHANNEL_TITLE: &str = "Blickwerk";
/// `NotificationManager.IMPORTANCE_DEFAULT`.
const IMPORTANCE_DEFAULT: i32 = 3;

/// Chunk size for draining an `InputStream`.
const IO_CHUNK: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Obtain a [`JNIEnv`] handle from the global Android context.
///
/// Calls `ndk_context::android_context()` to retrieve the `JavaVM*` pointer
/// set by `android_main` or `ANativeActivity_onCreate`, then attaches the
/// current thread if it is not already attached.
fn jni_env() -> Result<JNIEnv<'static>> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| BlickwerkError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    vm.attach_current_thread_permanently()
        .map_err(|e| BlickwerkError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the current Android `Context` as a [`JObject`].
fn context() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(BlickwerkError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Context.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map any `jni::errors::Error` into `BlickwerkError::Bridge`, clearing a
/// pending Java exception so later calls on the same env don't trip on it.
fn jni_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> BlickwerkError {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
    BlickwerkError::Bridge(format!("{context}: {e}"))
}

/// Bridge backed by the ART runtime.
pub struct AndroidBridge;

impl AndroidBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

impl PlatformSetup for AndroidBridge {
    /// Register the notification channel used by the verification flows.
    ///
    /// `createNotificationChannel` is idempotent on the Android side, so a
    /// retried bootstrap pass can safely call this again.
    fn platform_init(&self) -> Result<()> {
        let mut env = jni_env()?;
        let ctx = context()?;

        let channel_id = env
            .new_string(NOTIFICATION_CHANNEL_ID)
            .map_err(|e| jni_err(&mut env, "alloc channel id", e))?;
        let channel_title = env
            .new_string(NOTIFICATION_CHANNEL_TITLE)
            .map_err(|e| jni_err(&mut env, "alloc channel title", e))?;

        let channel = env
            .new_object(
                "android/app/NotificationChannel",
                "(Ljava/lang/String;Ljava/lang/CharSequence;I)V",
                &[
                    JValue::Object(&channel_id),
                    JValue::Object(&channel_title),
                    JValue::Int(IMPORTANCE_DEFAULT),
                ],
            )
            .map_err(|e| jni_err(&mut env, "NotificationChannel.<init>", e))?;

        let service_name = env
            .new_string("notification")
            .map_err(|e| jni_err(&mut env, "alloc service name", e))?;
        let manager = env
            .call_method(
                &ctx,
                "getSystemService",
                "(Ljava/lang/String;)Ljava/lang/Object;",
                &[JValue::Object(&service_name)],
            )
            .and_then(|v| v.l())
            .map_err(|e| jni_err(&mut env, "Context.getSystemService", e))?;

        env.call_method(
            &manager,
            "createNotificationChannel",
            "(Landroid/app/NotificationChannel;)V",
            &[JValue::Object(&channel)],
        )
        .map_err(|e| jni_err(&mut env, "createNotificationChannel", e))?;

        tracing::info!(channel = NOTIFICATION_CHANNEL_ID, "notification channel registered");
        Ok(())
    }
}

impl NativeResources for AndroidBridge {
    /// Read a bundled asset through `Context.getAssets().open(path)`.
    fn read_resource(&self, path: &str) -> Result<Vec<u8>> {
        let mut env = jni_env()?;
        let ctx = context()?;

        let assets = env
            .call_method(
                &ctx,
                "getAssets",
                "()Landroid/content/res/AssetManager;",
                &[],
            )
            .and_then(|v| v.l())
            .map_err(|e| jni_err(&mut env, "Context.getAssets", e))?;

        let jpath = env
            .new_string(path)
            .map_err(|e| jni_err(&mut env, "alloc asset path", e))?;

        // `open` throws FileNotFoundException for unknown assets — surface
        // that as ResourceUnavailable rather than a generic bridge error.
        let stream = match env
            .call_method(
                &assets,
                "open",
                "(Ljava/lang/String;)Ljava/io/InputStream;",
                &[JValue::Object(&jpath)],
            )
            .and_then(|v| v.l())
        {
            Ok(stream) => stream,
            Err(_) => {
                if env.exception_check().unwrap_or(false) {
                    let _ = env.exception_clear();
                }
                return Err(BlickwerkError::ResourceUnavailable(path.to_owned()));
            }
        };

        let buf = env
            .new_byte_array(IO_CHUNK as jsize)
            .map_err(|e| jni_err(&mut env, "alloc read buffer", e))?;

        let mut out = Vec::new();
        loop {
            let n = env
                .call_method(&stream, "read", "([B)I", &[JValue::Object(&buf)])
                .and_then(|v| v.i())
                .map_err(|e| jni_err(&mut env, "InputStream.read", e))?;
            if n < 0 {
                break;
            }
            let chunk = env
                .convert_byte_array(&buf)
                .map_err(|e| jni_err(&mut env, "copy read buffer", e))?;
            out.extend_from_slice(&chunk[..n as usize]);
        }

        let _ = env.call_method(&stream, "close", "()V", &[]);

        tracing::debug!(path, len = out.len(), "asset read");
        Ok(out)
    }
}
