//! Three threads race to push a shared date forward.
//!
//! Each thread reads the current date and writes it back plus N years. The
//! read and the write are separate steps, so updates overwrite each other
//! and the final date depends on scheduling.
//!
//! Run with `RUST_LOG=beacon_core=debug` to see registration logs.

use std::sync::Arc;
use std::thread;

use tracing_subscriber::EnvFilter;

use beacon_core::date::{Date, DateError, Years};
use beacon_core::observer::{Observer, Subscriber};
use beacon_core::value::ObservableValue;

struct DatePrinter {
    name: &'static str,
}

impl Subscriber<Date> for DatePrinter {
    fn on_notify(&self, date: &Date) {
        println!(
            "[{}] Date updated to: {}-{}-{}",
            self.name,
            date.year(),
            date.month(),
            date.day()
        );
    }
}

fn main() -> Result<(), DateError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let date = Arc::new(ObservableValue::new(Date::new(2023, 1, 1)?));

    let first = Observer::new(DatePrinter { name: "observer-1" });
    let second = Observer::new(DatePrinter { name: "observer-2" });
    first.register_with(&*date);
    second.register_with(&*date);

    let handles: Vec<_> = [1, 2, 3]
        .into_iter()
        .map(|years| {
            let date = date.clone();
            thread::spawn(move || {
                let current = date.get();
                date.set(current + Years(years));
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("an updater thread panicked");
        }
    }

    println!("Final date: {}", date.get());
    Ok(())
}
