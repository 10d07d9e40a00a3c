use std::collections::HashSet;

use f5cli::auth::{AuthRepository, MemoryProfileStorage, Profile, ProfileUpdate, ProviderType};
use proptest::prelude::*;

const NAMES: [&str; 4] = ["alpha", "bravo", "charlie", "delta"];

#[derive(Debug, Clone)]
enum Op {
    Create {
        name: usize,
        provider_type: ProviderType,
        set_default: bool,
    },
    Update {
        name: usize,
        is_default: Option<bool>,
        provider_type: Option<ProviderType>,
    },
    Delete {
        name: usize,
    },
}

fn provider_type() -> impl Strategy<Value = ProviderType> {
    prop_oneof![Just(ProviderType::Bigip), Just(ProviderType::CloudServices)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NAMES.len(), provider_type(), any::<bool>()).prop_map(
            |(name, provider_type, set_default)| Op::Create {
                name,
                provider_type,
                set_default,
            }
        ),
        (
            0..NAMES.len(),
            proptest::option::of(any::<bool>()),
            proptest::option::of(provider_type())
        )
            .prop_map(|(name, is_default, provider_type)| Op::Update {
                name,
                is_default,
                provider_type,
            }),
        (0..NAMES.len()).prop_map(|name| Op::Delete { name }),
    ]
}

fn apply(repo: &AuthRepository<MemoryProfileStorage>, op: &Op) -> bool {
    match op {
        Op::Create {
            name,
            provider_type,
            set_default,
        } => {
            let profile = Profile::new(NAMES[*name], *provider_type)
                .with_host("10.0.0.1")
                .as_default(*set_default);
            repo.create(profile).is_ok()
        }
        Op::Update {
            name,
            is_default,
            provider_type,
        } => {
            let mut update = ProfileUpdate::new(NAMES[*name]).host("10.0.0.2");
            update.is_default = *is_default;
            update.provider_type = *provider_type;
            repo.update(update).is_ok()
        }
        Op::Delete { name } => repo.delete(NAMES[*name]).is_ok(),
    }
}

fn assert_invariants(profiles: &[Profile]) {
    let names: HashSet<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names.len(), profiles.len(), "names must be unique");

    for provider_type in ProviderType::ALL {
        let of_type: Vec<&Profile> = profiles
            .iter()
            .filter(|p| p.provider_type == provider_type)
            .collect();
        let defaults = of_type.iter().filter(|p| p.is_default).count();
        if of_type.is_empty() {
            assert_eq!(defaults, 0);
        } else {
            assert_eq!(defaults, 1, "{provider_type} must have exactly one default");
        }
    }
}

proptest! {
    #[test]
    fn random_operation_sequences_keep_store_consistent(ops in proptest::collection::vec(op(), 1..40)) {
        let repo = AuthRepository::new(MemoryProfileStorage::new());
        for op in &ops {
            let before = repo.storage().snapshot();
            let ok = apply(&repo, op);
            let after = repo.storage().snapshot();
            if !ok {
                prop_assert_eq!(&before, &after, "failed {:?} changed the store", op);
            }
            assert_invariants(&after);
        }
    }

    #[test]
    fn read_default_matches_stored_flag(ops in proptest::collection::vec(op(), 1..25)) {
        let repo = AuthRepository::new(MemoryProfileStorage::new());
        for op in &ops {
            apply(&repo, op);
        }
        let profiles = repo.storage().snapshot();
        for provider_type in ProviderType::ALL {
            let expected = profiles
                .iter()
                .find(|p| p.provider_type == provider_type && p.is_default)
                .map(|p| p.name.clone());
            let actual = repo.read_default(provider_type).ok().map(|p| p.name);
            prop_assert_eq!(expected, actual);
        }
    }
}
