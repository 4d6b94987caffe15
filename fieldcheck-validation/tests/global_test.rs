//! The process-wide validator. Kept in its own test binary, one test at a
//! time, so swaps here cannot leak into other tests.

use fieldcheck_validation::{Validate, Validator, global};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

static SERIAL: Mutex<()> = Mutex::new(());

#[derive(Validate)]
struct Login {
    #[validate(rules = "required,email")]
    email: String,
    #[validate(rules = "password")]
    password: String,
}

fn login(email: &str, password: &str) -> Login {
    Login {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_override_and_reset_through_trait_method() {
    let _guard = SERIAL.lock();

    let record = login("not-an-email", "weak");
    let defaults = record.validate();
    assert_eq!(defaults[0], "Field 'email' is not a valid email");
    assert_eq!(defaults.len(), 4);

    global::set_email_checker(|value: &str, field: &str| {
        (!value.contains('@')).then(|| format!("Field '{}' lacks an @", field))
    });
    global::set_password_checker(|_: &str, _: &str| -> Vec<String> { Vec::new() });
    assert_eq!(record.validate(), vec!["Field 'email' lacks an @"]);

    global::reset_email_checker();
    global::reset_password_checker();
    assert_eq!(record.validate(), defaults);
}

#[test]
fn test_install_replaces_whole_validator() {
    let _guard = SERIAL.lock();

    let previous = global::current();
    global::install(previous.clone().with_password_checker(|_: &str, f: &str| vec![format!("{} rejected", f)]));
    assert_eq!(
        global::validate(&login("a@b.cd", "Passwo1!")),
        vec!["password rejected"]
    );

    global::install(previous);
    assert!(global::validate(&login("a@b.cd", "Passwo1!")).is_empty());
}

/// Sets the flag when dropped, so the swapper stops even if a worker panics.
struct StopOnDrop(Arc<AtomicBool>);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// A validator whose two checkers both report `generation`.
fn tagged(generation: u64) -> Validator {
    Validator::new()
        .with_email_checker(move |_: &str, field: &str| Some(format!("{} generation {}", field, generation)))
        .with_password_checker(move |_: &str, field: &str| vec![format!("{} generation {}", field, generation)])
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_swaps_never_split_a_validation() {
    let _guard = SERIAL.lock();
    global::install(tagged(u64::MAX));

    let stop = Arc::new(AtomicBool::new(false));
    let _stop_on_drop = StopOnDrop(stop.clone());
    let swapper = {
        let stop = stop.clone();
        tokio::task::spawn_blocking(move || {
            let mut generation = 0u64;
            while !stop.load(Ordering::Relaxed) {
                global::install(tagged(generation));
                generation += 1;
            }
        })
    };

    let mut workers = Vec::new();
    for _ in 0..4 {
        workers.push(tokio::spawn(async {
            let record = login("nope", "weak");
            for _ in 0..500 {
                let violations = record.validate();
                assert_eq!(violations.len(), 2, "{:?}", violations);

                let email = violations[0].strip_prefix("email ").unwrap_or_default();
                let password = violations[1].strip_prefix("password ").unwrap_or_default();
                assert!(email.starts_with("generation "), "{:?}", violations);
                assert_eq!(email, password, "one validation saw two checker generations");

                tokio::task::yield_now().await;
            }
        }));
    }

    for worker in workers {
        worker.await.unwrap();
    }
    stop.store(true, Ordering::Relaxed);
    swapper.await.unwrap();

    global::install(Validator::new());
    assert_eq!(login("nope", "weak").validate().len(), 4);
}
