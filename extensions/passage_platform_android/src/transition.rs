//! Native `android.transition.Transition` backend
//!
//! Presets map to framework classes (`Slide`, `Fade`, `Explode`). Custom
//! animators are carried by `org.passage.AnimatorTransition`, which plays one
//! `ObjectAnimator` per track. Listeners are `org.passage.TransitionListenerProxy`
//! objects that report back through `nativeOnTransitionEvent`.

use passage_core::AnimationCurve;

/// Java class and constructor of the interpolator for a curve
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolatorSpec {
    pub class: &'static str,
    pub constructor: &'static str,
    pub args: Vec<f32>,
}

/// The platform interpolator used for `curve`
pub fn interpolator_for(curve: AnimationCurve) -> InterpolatorSpec {
    let (class, constructor, args) = match curve {
        AnimationCurve::Linear => ("android/view/animation/LinearInterpolator", "()V", vec![]),
        AnimationCurve::EaseIn => ("android/view/animation/AccelerateInterpolator", "(F)V", vec![1.0]),
        AnimationCurve::EaseOut => ("android/view/animation/DecelerateInterpolator", "(F)V", vec![1.0]),
        AnimationCurve::EaseInOut => (
            "android/view/animation/AccelerateDecelerateInterpolator",
            "()V",
            vec![],
        ),
        AnimationCurve::Spring => ("android/view/animation/BounceInterpolator", "()V", vec![]),
        AnimationCurve::CubicBezier { x1, y1, x2, y2 } => (
            "android/view/animation/PathInterpolator",
            "(FFFF)V",
            vec![x1, y1, x2, y2],
        ),
    };
    InterpolatorSpec {
        class,
        constructor,
        args,
    }
}

#[cfg(target_os = "android")]
pub use android::{AndroidBackend, AndroidTransition};

#[cfg(target_os = "android")]
mod android {
    use std::cell::RefCell;
    use std::rc::Rc;

    use jni::objects::{GlobalRef, JObject, JValue};
    use jni::JNIEnv;
    use passage_core::AnimationCurve;
    use passage_platform::{ListenerHandle, NativeTransition, Result, TransitionBackend, TransitionSpec};

    use super::interpolator_for;
    use crate::fragment::AndroidFragment;
    use crate::jni_utils::{short_string, with_env};

    const LISTENER_PROXY: &str = "org/passage/TransitionListenerProxy";
    const ANIMATOR_TRANSITION: &str = "org/passage/AnimatorTransition";

    struct TransitionState {
        object: GlobalRef,
        listeners: RefCell<Vec<(ListenerHandle, GlobalRef)>>,
    }

    /// Handle to a native transition object
    #[derive(Clone)]
    pub struct AndroidTransition(Rc<TransitionState>);

    impl AndroidTransition {
        pub(crate) fn from_global(object: GlobalRef) -> Self {
            AndroidTransition(Rc::new(TransitionState {
                object,
                listeners: RefCell::new(Vec::new()),
            }))
        }

        pub fn as_obj(&self) -> &JObject<'static> {
            self.0.object.as_obj()
        }
    }

    fn set_interpolator(env: &mut JNIEnv, target: &JObject, curve: AnimationCurve) -> jni::errors::Result<()> {
        let spec = interpolator_for(curve);
        let args: Vec<JValue> = spec.args.iter().map(|v| JValue::Float(*v)).collect();
        let interpolator = env.new_object(spec.class, spec.constructor, &args)?;
        env.call_method(
            target,
            "setInterpolator",
            "(Landroid/animation/TimeInterpolator;)Landroid/transition/Transition;",
            &[JValue::Object(&interpolator)],
        )?;
        Ok(())
    }

    impl NativeTransition for AndroidTransition {
        fn set_duration(&self, duration_ms: u32) -> Result<()> {
            with_env(|env| {
                env.call_method(
                    self.as_obj(),
                    "setDuration",
                    "(J)Landroid/transition/Transition;",
                    &[JValue::Long(duration_ms.into())],
                )?;
                Ok(())
            })
        }

        fn set_interpolator(&self, curve: AnimationCurve) -> Result<()> {
            with_env(|env| set_interpolator(env, self.as_obj(), curve))
        }

        fn add_listener(&self, listener: ListenerHandle) -> Result<()> {
            let proxy = with_env(|env| {
                let handle = listener.0 as i64;
                let proxy = env.new_object(LISTENER_PROXY, "(J)V", &[JValue::Long(handle)])?;
                env.call_method(
                    self.as_obj(),
                    "addListener",
                    "(Landroid/transition/Transition$TransitionListener;)Landroid/transition/Transition;",
                    &[JValue::Object(&proxy)],
                )?;
                env.new_global_ref(proxy)
            })?;
            self.0.listeners.borrow_mut().push((listener, proxy));
            Ok(())
        }

        fn remove_listener(&self, listener: ListenerHandle) -> Result<()> {
            let proxy = {
                let mut listeners = self.0.listeners.borrow_mut();
                match listeners.iter().position(|(handle, _)| *handle == listener) {
                    Some(index) => listeners.swap_remove(index).1,
                    None => return Ok(()),
                }
            };
            with_env(|env| {
                env.call_method(
                    self.as_obj(),
                    "removeListener",
                    "(Landroid/transition/Transition$TransitionListener;)Landroid/transition/Transition;",
                    &[JValue::Object(proxy.as_obj())],
                )?;
                Ok(())
            })
        }

        fn same_as(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
                || with_env(|env| env.is_same_object(self.as_obj(), other.as_obj())).unwrap_or(false)
        }

        fn short_string(&self) -> String {
            with_env(|env| short_string(env, self.as_obj())).unwrap_or_else(|_| "Transition@?".to_string())
        }
    }

    /// Creates framework transitions through JNI
    #[derive(Default)]
    pub struct AndroidBackend;

    impl AndroidBackend {
        pub fn new() -> Self {
            Self
        }
    }

    impl TransitionBackend for AndroidBackend {
        type Transition = AndroidTransition;
        type Fragment = AndroidFragment;

        fn create_transition(&self, spec: &TransitionSpec) -> Result<AndroidTransition> {
            let object = with_env(|env| {
                let object = match spec {
                    TransitionSpec::Slide(edge) => env.new_object(
                        "android/transition/Slide",
                        "(I)V",
                        &[JValue::Int(edge.gravity())],
                    )?,
                    TransitionSpec::Fade(mode) => {
                        env.new_object("android/transition/Fade", "(I)V", &[JValue::Int(mode.mode())])?
                    }
                    TransitionSpec::Explode => env.new_object("android/transition/Explode", "()V", &[])?,
                    TransitionSpec::Custom { animator, name } => {
                        let name = env.new_string(name)?;
                        let transition = env.new_object(
                            ANIMATOR_TRANSITION,
                            "(Ljava/lang/String;J)V",
                            &[JValue::Object(&name), JValue::Long(animator.duration_ms().into())],
                        )?;
                        for track in animator.tracks() {
                            let property = env.new_string(track.property.platform_name())?;
                            let values = env.new_float_array(track.values.len() as i32)?;
                            env.set_float_array_region(&values, 0, &track.values)?;
                            env.call_method(
                                &transition,
                                "addTrack",
                                "(Ljava/lang/String;[FJJ)V",
                                &[
                                    JValue::Object(&property),
                                    JValue::Object(&values),
                                    JValue::Long(track.effective_duration(animator.duration_ms()).into()),
                                    JValue::Long(track.start_delay_ms.into()),
                                ],
                            )?;
                        }
                        if let Some(curve) = animator.curve() {
                            set_interpolator(env, &transition, curve)?;
                        }
                        transition
                    }
                };
                env.new_global_ref(object)
            })?;

            tracing::trace!(target: "passage::android", "created {}", spec.class_name());
            Ok(AndroidTransition::from_global(object))
        }

        fn name(&self) -> &'static str {
            "android"
        }
    }
}
