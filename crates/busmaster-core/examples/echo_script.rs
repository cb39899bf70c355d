//! Runs a small write-then-verify script against the echoing memory peer
//! and prints the per-cycle trace.

use busmaster_core::{
    run, Interpreter, MemoryPeer, MemoryScript, RunConfig, TraceRecord, TraceSink,
};

// Dev-dependencies and the `thiserror` dependency are consumed by the library
// and its test suite, not by this example; silence `unused_crate_dependencies`
// for the example target without altering its behavior.
use proptest as _;
use rstest as _;
use thiserror as _;

struct StdoutTrace;

impl TraceSink for StdoutTrace {
    fn on_step(&mut self, record: TraceRecord) {
        println!("cycle {:>3}: {:?}", record.cycle, record.outcome);
    }
}

fn main() {
    let script = MemoryScript::from_text(
        "\
write 00000010 DEADBEEF
%EVENT
verify 00000010 DEADBEEF
write 00000020 12345678
verify 00000020 12345678
",
    );

    let mut master = Interpreter::new(script);
    let mut peer = MemoryPeer::new().with_auto_events(true);
    let report = run(&mut master, &mut peer, &RunConfig::default(), &mut StdoutTrace);

    println!("{} cycles, status {:?}", report.cycles, report.status);
}
