//! Navigation host bridge
//!
//! The Java side implements `org.passage.FrameHost`:
//!
//! ```java
//! public interface FrameHost {
//!     boolean isCurrent(long entryId);
//!     void setCurrent(long entryId, int navigationType);
//!     int getExecutingNavigationType(); // -1 when idle
//! }
//! ```

use passage_core::NavigationType;

/// Code of `navigation_type` on the Java side
pub fn navigation_type_code(navigation_type: NavigationType) -> i32 {
    match navigation_type {
        NavigationType::Forward => 0,
        NavigationType::Back => 1,
        NavigationType::Replace => 2,
    }
}

/// Inverse of [`navigation_type_code`]; `None` for idle or unknown codes
pub fn navigation_type_from_code(code: i32) -> Option<NavigationType> {
    match code {
        0 => Some(NavigationType::Forward),
        1 => Some(NavigationType::Back),
        2 => Some(NavigationType::Replace),
        _ => None,
    }
}

#[cfg(target_os = "android")]
pub use android::AndroidNavigationHost;

#[cfg(target_os = "android")]
mod android {
    use jni::objects::{GlobalRef, JValue};
    use passage_core::{EntryId, NavigationContext, NavigationType};
    use passage_platform::NavigationHost;

    use super::{navigation_type_code, navigation_type_from_code};
    use crate::jni_utils::with_env;

    /// Handle to an `org.passage.FrameHost`
    pub struct AndroidNavigationHost(GlobalRef);

    impl AndroidNavigationHost {
        pub fn from_global(host: GlobalRef) -> Self {
            AndroidNavigationHost(host)
        }
    }

    impl NavigationHost for AndroidNavigationHost {
        fn is_current(&self, entry: EntryId) -> bool {
            let result = with_env(|env| {
                env.call_method(
                    self.0.as_obj(),
                    "isCurrent",
                    "(J)Z",
                    &[JValue::Long(entry.to_raw() as i64)],
                )?
                .z()
            });
            result.unwrap_or_else(|e| {
                tracing::warn!(target: "passage::android", "FrameHost.isCurrent failed: {}", e);
                false
            })
        }

        fn set_current(&self, entry: EntryId, navigation_type: NavigationType) {
            let result = with_env(|env| {
                env.call_method(
                    self.0.as_obj(),
                    "setCurrent",
                    "(JI)V",
                    &[
                        JValue::Long(entry.to_raw() as i64),
                        JValue::Int(navigation_type_code(navigation_type)),
                    ],
                )?;
                Ok(())
            });
            if let Err(e) = result {
                tracing::error!(target: "passage::android", "FrameHost.setCurrent({}) failed: {}", entry, e);
            }
        }

        fn executing_context(&self) -> Option<NavigationContext> {
            let code = with_env(|env| {
                env.call_method(self.0.as_obj(), "getExecutingNavigationType", "()I", &[])?
                    .i()
            });
            match code {
                Ok(code) => navigation_type_from_code(code).map(NavigationContext::new),
                Err(e) => {
                    tracing::warn!(target: "passage::android", "FrameHost.getExecutingNavigationType failed: {}", e);
                    None
                }
            }
        }
    }
}
