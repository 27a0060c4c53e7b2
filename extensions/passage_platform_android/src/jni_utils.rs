//! JNI utilities for the Android platform
//!
//! The `JavaVM` is captured once in `JNI_OnLoad`; every native call attaches
//! the current thread through [`with_env`].

use passage_platform::PlatformError;

#[cfg(target_os = "android")]
use std::sync::OnceLock;

#[cfg(target_os = "android")]
use jni::objects::{GlobalRef, JObject, JValue};
#[cfg(target_os = "android")]
use jni::sys::{jint, JNI_VERSION_1_6};
#[cfg(target_os = "android")]
use jni::{JNIEnv, JavaVM};

#[cfg(target_os = "android")]
static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// Convert a JNI failure into a platform error
#[cfg(target_os = "android")]
pub fn jni_error(error: jni::errors::Error) -> PlatformError {
    PlatformError::Jni(error.to_string())
}

/// Called by the runtime when `System.loadLibrary` loads this library
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn JNI_OnLoad(vm: JavaVM, _reserved: *mut std::ffi::c_void) -> jint {
    crate::init_logging();
    if JAVA_VM.set(vm).is_err() {
        tracing::warn!("JNI_OnLoad called twice; keeping the first JavaVM");
    }
    JNI_VERSION_1_6
}

/// Run `f` with a JNI environment attached to the current thread
#[cfg(target_os = "android")]
pub fn with_env<T>(f: impl FnOnce(&mut JNIEnv) -> jni::errors::Result<T>) -> Result<T, PlatformError> {
    let vm = JAVA_VM
        .get()
        .ok_or_else(|| PlatformError::Jni("JavaVM not initialized".to_string()))?;
    let mut env = vm.attach_current_thread().map_err(jni_error)?;
    f(&mut env).map_err(jni_error)
}

/// Call a `()Ljava/lang/Object;`-style getter, `None` for Java null
#[cfg(target_os = "android")]
pub fn call_object_getter(
    env: &mut JNIEnv,
    target: &JObject,
    name: &str,
    signature: &str,
) -> jni::errors::Result<Option<GlobalRef>> {
    let value = env.call_method(target, name, signature, &[])?.l()?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(env.new_global_ref(value)?))
}

/// Call a `(Z)V` setter
#[cfg(target_os = "android")]
pub fn call_bool_setter(env: &mut JNIEnv, target: &JObject, name: &str, value: bool) -> jni::errors::Result<()> {
    env.call_method(target, name, "(Z)V", &[JValue::Bool(value.into())])?;
    Ok(())
}

/// `SimpleName@hash` of a Java object, as printed by transition logs
#[cfg(target_os = "android")]
pub fn short_string(env: &mut JNIEnv, target: &JObject) -> jni::errors::Result<String> {
    let class = env
        .call_method(target, "getClass", "()Ljava/lang/Class;", &[])?
        .l()?;
    let name = env
        .call_method(&class, "getSimpleName", "()Ljava/lang/String;", &[])?
        .l()?;
    let name: String = env.get_string(&name.into())?.into();
    let hash = env
        .call_static_method(
            "java/lang/System",
            "identityHashCode",
            "(Ljava/lang/Object;)I",
            &[JValue::Object(target)],
        )?
        .i()?;
    Ok(format_short_string(&name, hash))
}

/// `name@hash` with the hash in lowercase hex
pub fn format_short_string(class_name: &str, identity_hash: i32) -> String {
    format!("{}@{:x}", class_name, identity_hash)
}

#[cfg(not(target_os = "android"))]
pub fn with_env<T>(_f: impl FnOnce(&mut ()) -> Result<T, PlatformError>) -> Result<T, PlatformError> {
    Err(PlatformError::Unsupported(
        "JNI only available on Android".to_string(),
    ))
}
