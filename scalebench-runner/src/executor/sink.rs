//! Result Sinks
//!
//! A sink receives each finished [`SampleSet`] as soon as its
//! implementation has been measured across every size. What happens next
//! (printing, plotting, storing) is up to the sink.

use scalebench_report::SampleSet;

/// Destination for finished sample sets
pub trait ResultSink {
    /// Receive one finished sample set.
    fn accept(&mut self, set: SampleSet);
}

impl ResultSink for Vec<SampleSet> {
    fn accept(&mut self, set: SampleSet) {
        self.push(set);
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn accept(&mut self, set: SampleSet) {
        (**self).accept(set);
    }
}

/// Sink backed by a closure
pub struct FnSink<F>(pub F);

impl<F: FnMut(SampleSet)> ResultSink for FnSink<F> {
    fn accept(&mut self, set: SampleSet) {
        (self.0)(set);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalebench_core::{Measurement, SizeRange, Strategy};
    use scalebench_report::SampleSetBuilder;

    fn empty_set(label: &str) -> SampleSet {
        SampleSetBuilder::new(
            "Queue::push",
            label,
            Strategy::Incremental,
            Measurement::Amortized,
            SizeRange::new(1, 2).unwrap(),
        )
        .finish()
    }

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink = Vec::new();
        sink.accept(empty_set("deque"));
        sink.accept(empty_set("list"));

        let labels: Vec<_> = sink.iter().map(|s| s.implementation()).collect();
        assert_eq!(labels, vec!["deque", "list"]);
    }

    #[test]
    fn test_fn_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = FnSink(|set: SampleSet| seen.push(set.implementation().to_string()));
            let by_ref: &mut dyn ResultSink = &mut sink;
            by_ref.accept(empty_set("deque"));
        }
        assert_eq!(seen, vec!["deque"]);
    }
}
