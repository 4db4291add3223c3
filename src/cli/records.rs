use crossbeam::channel::Receiver;

use stream_sat::dispatch::{
    library::{
        delta::{self, Delta},
        report::{self, Report},
        stat::Stat,
    },
    Dispatch,
};

/// Counts of the deltas received, noted at the end of a solve.
#[derive(Default)]
struct DeltaCounts {
    propagated: usize,
    merged: usize,
    branched: usize,
    removed: usize,
    reseeded: usize,
    broadcasts: usize,
}

impl DeltaCounts {
    fn note(&mut self, delta: &Delta) {
        match delta {
            Delta::Pool(delta::Pool::Propagated { .. }) => self.propagated += 1,
            Delta::Pool(delta::Pool::Merged { .. }) => self.merged += 1,
            Delta::Pool(delta::Pool::Branched { .. }) => self.branched += 1,
            Delta::Pool(delta::Pool::Removed { .. }) => self.removed += 1,
            Delta::Pool(delta::Pool::Reseeded(_)) => self.reseeded += 1,
            Delta::Global(delta::Global::Broadcast(_)) => self.broadcasts += 1,
            _ => {}
        }
    }
}

/// Receives dispatches until a finish report, writing comments to the console.
///
/// Progress and rates are written only if `show_stats` is set.
pub fn general_recorder(rx: Receiver<Dispatch>, show_stats: bool) {
    let mut counts = DeltaCounts::default();

    'reception: while let Ok(dispatch) = rx.recv() {
        match &dispatch {
            Dispatch::Delta(delta) => counts.note(delta),

            Dispatch::Stat(stat) => {
                if !show_stats {
                    continue 'reception;
                }
                match stat {
                    Stat::Progress {
                        solved,
                        smallest,
                        total,
                        streams,
                        progress,
                    } => println!(
                        "c progress {:.2}% ({solved}/{total} settled, smallest stream {smallest}, {streams} streams)",
                        progress * 100.0
                    ),

                    Stat::Rate { name, per_minute } => println!("c {name} per minute: {per_minute:.2}"),
                }
            }

            Dispatch::Report(the_report) => match the_report {
                Report::Parser(report::Parser::Load(path)) => println!("c Reading DIMACS file from {path}"),

                Report::Parser(report::Parser::Expected(atoms, clauses)) => {
                    println!("c Expected {atoms} atoms and {clauses} clauses")
                }

                Report::Parser(report::Parser::Counts(atoms, clauses)) => {
                    println!("c Parsed {atoms} atoms and {clauses} clauses")
                }

                Report::Checkpoint(report::Checkpoint::Loaded { streams, directory }) => {
                    println!("c Resumed {streams} streams from {}", directory.display())
                }

                Report::Checkpoint(report::Checkpoint::Saved { streams, directory }) => {
                    println!("c Checkpoint of {streams} streams written to {}", directory.display())
                }

                Report::Checkpoint(report::Checkpoint::Failed(reason)) => {
                    println!("c Checkpoint failed: {reason}")
                }

                Report::Solve(report) => println!("c Solve: {report}"),

                Report::Finish => break 'reception,
            },
        }
    }

    if show_stats {
        println!(
            "c {} propagations, {} merges, {} branches, {} deletions, {} broadcasts, {} reseeds",
            counts.propagated, counts.merged, counts.branched, counts.removed, counts.broadcasts, counts.reseeded
        );
    }
}
