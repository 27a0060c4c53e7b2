//! `androidx.fragment` bridge

use passage_core::TransitionSlot;

/// Getter and setter names of a fragment's transition slot
pub fn slot_accessors(slot: TransitionSlot) -> (&'static str, &'static str) {
    match slot {
        TransitionSlot::Enter => ("getEnterTransition", "setEnterTransition"),
        TransitionSlot::Exit => ("getExitTransition", "setExitTransition"),
        TransitionSlot::Reenter => ("getReenterTransition", "setReenterTransition"),
        TransitionSlot::Return => ("getReturnTransition", "setReturnTransition"),
    }
}

#[cfg(target_os = "android")]
pub use android::{AndroidFragment, AndroidFragmentManager, AndroidFragmentTransaction};

#[cfg(target_os = "android")]
mod android {
    use jni::objects::{GlobalRef, JObject, JValue};
    use passage_core::TransitionSlot;
    use passage_platform::{
        Fragment, FragmentArgs, FragmentManager, FragmentTransaction, HostedFragment, Result,
    };

    use super::slot_accessors;
    use crate::jni_utils::{call_bool_setter, call_object_getter, with_env};
    use crate::transition::AndroidTransition;

    const FRAGMENT_SIG: &str = "Landroidx/fragment/app/Fragment;";
    const TRANSACTION_RET: &str = "Landroidx/fragment/app/FragmentTransaction;";
    const TAB_FRAGMENT: &str = "org/passage/TabFragment";

    fn same_object(a: &GlobalRef, b: &GlobalRef) -> bool {
        with_env(|env| env.is_same_object(a.as_obj(), b.as_obj())).unwrap_or(false)
    }

    /// Handle to an `androidx.fragment.app.Fragment`
    #[derive(Clone)]
    pub struct AndroidFragment(GlobalRef);

    impl AndroidFragment {
        pub fn from_global(fragment: GlobalRef) -> Self {
            AndroidFragment(fragment)
        }

        pub fn as_obj(&self) -> &JObject<'static> {
            self.0.as_obj()
        }
    }

    impl Fragment for AndroidFragment {
        type Transition = AndroidTransition;

        fn transition(&self, slot: TransitionSlot) -> Result<Option<AndroidTransition>> {
            let (getter, _) = slot_accessors(slot);
            let object = with_env(|env| call_object_getter(env, self.as_obj(), getter, "()Ljava/lang/Object;"))?;
            Ok(object.map(AndroidTransition::from_global))
        }

        fn set_transition(&self, slot: TransitionSlot, transition: Option<&AndroidTransition>) -> Result<()> {
            let (_, setter) = slot_accessors(slot);
            with_env(|env| {
                let null = JObject::null();
                let value = transition.map_or(&null, |t| t.as_obj());
                env.call_method(self.as_obj(), setter, "(Ljava/lang/Object;)V", &[JValue::Object(value)])?;
                Ok(())
            })
        }

        fn set_allow_enter_transition_overlap(&self, allow: bool) -> Result<()> {
            with_env(|env| call_bool_setter(env, self.as_obj(), "setAllowEnterTransitionOverlap", allow))
        }

        fn set_allow_return_transition_overlap(&self, allow: bool) -> Result<()> {
            with_env(|env| call_bool_setter(env, self.as_obj(), "setAllowReturnTransitionOverlap", allow))
        }
    }

    impl HostedFragment for AndroidFragment {
        fn set_menu_visibility(&self, visible: bool) -> Result<()> {
            with_env(|env| call_bool_setter(env, self.as_obj(), "setMenuVisibility", visible))
        }

        fn set_user_visible_hint(&self, visible: bool) -> Result<()> {
            with_env(|env| call_bool_setter(env, self.as_obj(), "setUserVisibleHint", visible))
        }

        fn same_as(&self, other: &Self) -> bool {
            same_object(&self.0, &other.0)
        }
    }

    /// Handle to a pending `FragmentTransaction`
    pub struct AndroidFragmentTransaction(GlobalRef);

    impl AndroidFragmentTransaction {
        fn call(&self, method: &str, fragment: &AndroidFragment) -> Result<()> {
            let signature = format!("({}){}", FRAGMENT_SIG, TRANSACTION_RET);
            with_env(|env| {
                env.call_method(self.0.as_obj(), method, &signature, &[JValue::Object(fragment.as_obj())])?;
                Ok(())
            })
        }
    }

    impl FragmentTransaction for AndroidFragmentTransaction {
        type Fragment = AndroidFragment;

        fn add(&mut self, container_id: i32, fragment: &AndroidFragment, tag: &str) -> Result<()> {
            let signature = format!("(I{}Ljava/lang/String;){}", FRAGMENT_SIG, TRANSACTION_RET);
            with_env(|env| {
                let tag = env.new_string(tag)?;
                env.call_method(
                    self.0.as_obj(),
                    "add",
                    &signature,
                    &[
                        JValue::Int(container_id),
                        JValue::Object(fragment.as_obj()),
                        JValue::Object(&tag),
                    ],
                )?;
                Ok(())
            })
        }

        fn attach(&mut self, fragment: &AndroidFragment) -> Result<()> {
            self.call("attach", fragment)
        }

        fn detach(&mut self, fragment: &AndroidFragment) -> Result<()> {
            self.call("detach", fragment)
        }

        fn remove(&mut self, fragment: &AndroidFragment) -> Result<()> {
            self.call("remove", fragment)
        }

        fn commit_now_allowing_state_loss(self) -> Result<()> {
            with_env(|env| {
                env.call_method(self.0.as_obj(), "commitNowAllowingStateLoss", "()V", &[])?;
                Ok(())
            })
        }
    }

    /// Handle to an `androidx.fragment.app.FragmentManager`
    #[derive(Clone)]
    pub struct AndroidFragmentManager(GlobalRef);

    impl AndroidFragmentManager {
        pub fn from_global(manager: GlobalRef) -> Self {
            AndroidFragmentManager(manager)
        }
    }

    impl FragmentManager for AndroidFragmentManager {
        type Fragment = AndroidFragment;
        type Transaction = AndroidFragmentTransaction;

        fn begin_transaction(&self) -> Result<AndroidFragmentTransaction> {
            let signature = format!("(){}", TRANSACTION_RET);
            let transaction = with_env(|env| {
                let transaction = env.call_method(self.0.as_obj(), "beginTransaction", &signature, &[])?.l()?;
                env.new_global_ref(transaction)
            })?;
            Ok(AndroidFragmentTransaction(transaction))
        }

        fn find_fragment_by_tag(&self, tag: &str) -> Result<Option<AndroidFragment>> {
            let signature = format!("(Ljava/lang/String;){}", FRAGMENT_SIG);
            let fragment = with_env(|env| {
                let tag = env.new_string(tag)?;
                let fragment = env
                    .call_method(self.0.as_obj(), "findFragmentByTag", &signature, &[JValue::Object(&tag)])?
                    .l()?;
                if fragment.is_null() {
                    return Ok(None);
                }
                Ok(Some(env.new_global_ref(fragment)?))
            })?;
            Ok(fragment.map(AndroidFragment))
        }

        fn fragments(&self) -> Result<Vec<AndroidFragment>> {
            let fragments = with_env(|env| {
                let list = env
                    .call_method(self.0.as_obj(), "getFragments", "()Ljava/util/List;", &[])?
                    .l()?;
                let size = env.call_method(&list, "size", "()I", &[])?.i()?;
                let mut fragments = Vec::with_capacity(size.max(0) as usize);
                for index in 0..size {
                    let fragment = env
                        .call_method(&list, "get", "(I)Ljava/lang/Object;", &[JValue::Int(index)])?
                        .l()?;
                    fragments.push(env.new_global_ref(fragment)?);
                }
                Ok(fragments)
            })?;
            Ok(fragments.into_iter().map(AndroidFragment).collect())
        }

        fn instantiate(&self, args: FragmentArgs) -> Result<AndroidFragment> {
            let fragment = with_env(|env| {
                let fragment = env
                    .call_static_method(
                        TAB_FRAGMENT,
                        "newInstance",
                        "(II)Lorg/passage/TabFragment;",
                        &[JValue::Int(args.tab_id), JValue::Int(args.index as i32)],
                    )?
                    .l()?;
                env.new_global_ref(fragment)
            })?;
            Ok(AndroidFragment(fragment))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_accessors() {
        assert_eq!(
            slot_accessors(TransitionSlot::Reenter),
            ("getReenterTransition", "setReenterTransition")
        );
        for slot in TransitionSlot::ALL {
            let (getter, setter) = slot_accessors(slot);
            assert_eq!(&getter[3..], &setter[3..]);
        }
    }
}
