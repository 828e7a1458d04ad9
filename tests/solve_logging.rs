#![cfg(feature = "tracing")]

use std::io;
use std::sync::{Arc, Mutex};

use knapsack_dp::{solve, Algorithm, Instance, SolveOptions};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn logged(algorithm: Algorithm, verbosity: u8) -> String {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    let inst = Instance::subset_sum(10, vec![2, 3, 5, 8]).unwrap();
    let opts = SolveOptions::new().with_verbosity(verbosity);
    tracing::subscriber::with_default(subscriber, || solve(&inst, algorithm, &opts).unwrap());
    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn summary_event_inside_solve_span() {
    let out = logged(Algorithm::Balancing, 1);
    assert!(out.contains("solved"), "{out}");
    assert!(out.contains("algorithm=\"balancing\""), "{out}");
}

#[test]
fn progress_events_need_verbosity_two() {
    let quiet = logged(Algorithm::List, 1);
    assert!(!quiet.contains(": it "), "{quiet}");
    let loud = logged(Algorithm::List, 2);
    assert!(loud.contains(": it "), "{loud}");
}

#[test]
fn silent_by_default() {
    assert!(logged(Algorithm::PrimalDual, 0).is_empty());
}
