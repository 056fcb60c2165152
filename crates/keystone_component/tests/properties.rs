//! Property tests for fail-fast hook execution.

use keystone_component::prelude::*;
use proptest::prelude::*;

macro_rules! stage {
    ($name:ident $(, $dep:ident: $dep_ty:ty)?) => {
        #[derive(Default, Component)]
        #[component(loadable)]
        struct $name {
            $($dep: Shared<$dep_ty>,)?
            fail: bool,
            loaded: bool,
        }

        impl Loadable for $name {
            fn load(&mut self) -> Result<(), HookError> {
                if self.fail {
                    return Err(stringify!($name).into());
                }
                self.loaded = true;
                Ok(())
            }
        }
    };
}

stage!(Gamma);
stage!(Beta, gamma: Gamma);
stage!(Alpha, beta: Beta);

#[derive(Default, Component)]
struct Pipeline {
    alpha: Shared<Alpha>,
    gamma: Shared<Gamma>,
}

proptest! {
    #[test]
    fn first_failure_in_post_order_wins(
        alpha_fails in any::<bool>(),
        beta_fails in any::<bool>(),
        gamma_fails in any::<bool>(),
    ) {
        let mut pipeline = Pipeline::default();
        let result = Loader::new()
            .provide(Alpha { fail: alpha_fails, ..Alpha::default() })
            .provide(Beta { fail: beta_fails, ..Beta::default() })
            .provide(Gamma { fail: gamma_fails, ..Gamma::default() })
            .load(&mut pipeline);

        // Post-order from the root is Gamma, Beta, Alpha.
        let stages = [("Gamma", gamma_fails), ("Beta", beta_fails), ("Alpha", alpha_fails)];
        let first_failure = stages.iter().position(|(_, fails)| *fails);

        let alpha = pipeline.alpha.read().unwrap();
        let beta = alpha.beta.read().unwrap();
        let gamma = beta.gamma.read().unwrap();
        let loaded = [gamma.loaded, beta.loaded, alpha.loaded];

        match first_failure {
            None => {
                let report = result.unwrap();
                prop_assert_eq!(report.hooks.len(), 3);
                prop_assert_eq!(loaded, [true, true, true]);
            }
            Some(index) => {
                let err = result.unwrap_err();
                prop_assert_eq!(err.to_string(), stages[index].0);
                for (position, was_loaded) in loaded.iter().enumerate() {
                    prop_assert_eq!(*was_loaded, position < index);
                }
            }
        }

        // The walk completes before any hook runs, so wiring is intact.
        prop_assert!(pipeline.gamma.ptr_eq(&beta.gamma));
    }
}
