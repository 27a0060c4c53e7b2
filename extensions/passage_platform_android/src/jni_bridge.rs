//! JNI entry points for the Java side
//!
//! # Usage from Java
//!
//! ```java
//! package org.passage;
//!
//! final class TransitionListenerProxy implements Transition.TransitionListener {
//!     private final long handle;
//!     TransitionListenerProxy(long handle) { this.handle = handle; }
//!
//!     @Override public void onTransitionStart(Transition t) { nativeOnTransitionEvent(handle, 0); }
//!     @Override public void onTransitionEnd(Transition t) { nativeOnTransitionEvent(handle, 1); }
//!     // pause = 2, resume = 3, cancel = 4
//!
//!     private static native void nativeOnTransitionEvent(long handle, int code);
//! }
//!
//! public final class MainThread {
//!     private static final Handler HANDLER = new Handler(Looper.getMainLooper());
//!     static void requestTick() { HANDLER.post(MainThread::nativeOnTick); }
//!     private static native void nativeOnTick();
//! }
//! ```
//!
//! Every entry point runs on the main thread, which owns the thread-local
//! [`EventDispatcher`].

#[cfg(target_os = "android")]
use std::rc::Rc;

#[cfg(target_os = "android")]
use jni::objects::JClass;
#[cfg(target_os = "android")]
use jni::sys::{jint, jlong};
#[cfg(target_os = "android")]
use jni::JNIEnv;

#[cfg(target_os = "android")]
use passage_platform::ListenerHandle;
#[cfg(target_os = "android")]
use passage_transition::{OrchestratorConfig, TransitionOrchestrator};

#[cfg(target_os = "android")]
use crate::dispatcher::EventDispatcher;
#[cfg(target_os = "android")]
use crate::error::Result;
#[cfg(target_os = "android")]
use crate::jni_utils::with_env;
#[cfg(target_os = "android")]
use crate::transition::AndroidBackend;

#[cfg(target_os = "android")]
thread_local! {
    static DISPATCHER: EventDispatcher<AndroidBackend> = EventDispatcher::new();
}

/// Run `f` against the main thread's orchestrator
#[cfg(target_os = "android")]
pub fn with_orchestrator<R>(f: impl FnOnce(&mut TransitionOrchestrator<AndroidBackend>) -> R) -> Result<R> {
    DISPATCHER.with(|dispatcher| dispatcher.with(f))
}

/// Install the main thread's orchestrator, waking ticks through `MainThread`
#[cfg(target_os = "android")]
pub fn install(config: OrchestratorConfig) -> Result<()> {
    let mut orchestrator = TransitionOrchestrator::new(AndroidBackend::new(), config);
    orchestrator.set_wake_callback(Rc::new(request_tick));
    DISPATCHER.with(|dispatcher| dispatcher.install(orchestrator))?;
    tracing::info!(target: "passage::android", "transition orchestrator installed");
    Ok(())
}

#[cfg(target_os = "android")]
fn request_tick() {
    let result = with_env(|env| {
        env.call_static_method("org/passage/MainThread", "requestTick", "()V", &[])?;
        Ok(())
    });
    if let Err(e) = result {
        tracing::error!(target: "passage::android", "MainThread.requestTick failed: {}", e);
    }
}

/// Listener callback from `TransitionListenerProxy`
///
/// # JNI Signature
/// `(JI)V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_org_passage_TransitionListenerProxy_nativeOnTransitionEvent(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
    code: jint,
) {
    DISPATCHER.with(|dispatcher| dispatcher.dispatch(ListenerHandle(handle as u64), code));
}

/// Deferred work posted by [`request_tick`]
///
/// # JNI Signature
/// `()V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_org_passage_MainThread_nativeOnTick(_env: JNIEnv, _class: JClass) {
    match DISPATCHER.with(|dispatcher| dispatcher.tick()) {
        Ok(count) => tracing::trace!(target: "passage::android", "tick ran {} tasks", count),
        Err(e) => tracing::warn!(target: "passage::android", "tick skipped: {}", e),
    }
}

/// Install the orchestrator with default settings
///
/// # JNI Signature
/// `()V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_org_passage_Passage_nativeInit(_env: JNIEnv, _class: JClass) {
    crate::init_logging();
    if let Err(e) = install(OrchestratorConfig::default()) {
        tracing::error!(target: "passage::android", "Passage.nativeInit failed: {}", e);
    }
}
