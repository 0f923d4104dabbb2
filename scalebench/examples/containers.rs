//! ScaleBench Example Catalog
//!
//! Compares the standard library collections on the operations a container
//! library is usually judged by, across the small size tier.
//!
//! Run with:
//!   cargo run --release --example containers
//!   RUST_LOG=scalebench=debug cargo run --release --example containers
//!
//! Settings (trials, samples, tiers, JSON output) are read from `scale.toml`
//! when one is found above the current directory.

use rand::Rng;
use scalebench::SampleOutcome;
use scalebench::prelude::*;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};

fn random() -> u64 {
    rand::random()
}

fn filled<C: FromIterator<u64>>(n: usize) -> C {
    (0..n).map(|_| random()).collect()
}

// ============================================================================
// Stacks and queues
// ============================================================================

fn stack_pop() -> Task {
    Task::new("Stack::pop", Strategy::Incremental, SizeTier::Small)
        .implementation(
            "Vec",
            fixture(filled::<Vec<u64>>, |v: &mut Vec<u64>, _| v.pop(), drop),
        )
        .implementation(
            "LinkedList",
            fixture(filled::<LinkedList<u64>>, |l: &mut LinkedList<u64>, _| l.pop_back(), drop),
        )
}

fn priority_queue_push() -> Task {
    Task::new("PriorityQueue::push", Strategy::Incremental, SizeTier::Small)
        .implementation(
            "BinaryHeap",
            fixture(
                |_| BinaryHeap::new(),
                |h: &mut BinaryHeap<u64>, _| h.push(random()),
                drop,
            ),
        )
        .implementation(
            "VecDeque",
            fixture(
                |_| VecDeque::new(),
                |q: &mut VecDeque<u64>, _| {
                    q.push_back(random());
                    random()
                },
                drop,
            ),
        )
}

// ============================================================================
// Maps and sets
// ============================================================================

fn map_put() -> Task {
    Task::new("Map::put", Strategy::Incremental, SizeTier::Small)
        .implementation(
            "HashMap",
            fixture(
                |_| HashMap::new(),
                |m: &mut HashMap<usize, u64>, i| {
                    let key = rand::thread_rng().gen_range(0..=i * 2);
                    m.insert(key, random())
                },
                drop,
            ),
        )
        .implementation(
            "BTreeMap",
            fixture(
                |_| BTreeMap::new(),
                |m: &mut BTreeMap<usize, u64>, i| {
                    let key = rand::thread_rng().gen_range(0..=i * 2);
                    m.insert(key, random())
                },
                drop,
            ),
        )
}

fn map_remove() -> Task {
    Task::new("Map::remove", Strategy::Incremental, SizeTier::Small)
        .implementation(
            "HashMap",
            fixture(
                |n| (0..n).map(|k| (k, random())).collect::<HashMap<_, _>>(),
                |m: &mut HashMap<usize, u64>, i| m.remove(&i),
                drop,
            ),
        )
        .implementation(
            "BTreeMap",
            fixture(
                |n| (0..n).map(|k| (k, random())).collect::<BTreeMap<_, _>>(),
                |m: &mut BTreeMap<usize, u64>, i| m.remove(&i),
                drop,
            ),
        )
}

fn set_add() -> Task {
    Task::new("Set::add", Strategy::Incremental, SizeTier::Small)
        .implementation(
            "HashSet",
            fixture(|_| HashSet::new(), |s: &mut HashSet<u64>, _| s.insert(random()), drop),
        )
        .implementation(
            "BTreeSet",
            fixture(|_| BTreeSet::new(), |s: &mut BTreeSet<u64>, _| s.insert(random()), drop),
        )
}

/// Deduplicating a whole batch, so one timed step per size
fn dedup() -> Task {
    Task::new("Set vs. sort + dedup", Strategy::Exponential, SizeTier::Small)
        .measurement(Measurement::Point)
        .implementation(
            "Vec::dedup",
            fixture(
                |n| {
                    let half = (n / 2).max(1) as u64;
                    (0..n).map(|_| rand::thread_rng().gen_range(1..=half)).collect::<Vec<_>>()
                },
                |v: &mut Vec<u64>, _| {
                    v.sort_unstable();
                    v.dedup();
                    v.len()
                },
                drop,
            ),
        )
        .implementation(
            "HashSet",
            fixture(
                |_| HashSet::new(),
                |s: &mut HashSet<u64>, n| {
                    let half = (n / 2).max(1) as u64;
                    s.extend((0..n).map(|_| rand::thread_rng().gen_range(1..=half)));
                    s.iter().copied().collect::<Vec<_>>()
                },
                drop,
            ),
        )
}

// ============================================================================
// Sequences
// ============================================================================

fn sequence_unshift() -> Task {
    Task::new("Sequence::unshift", Strategy::Exponential, SizeTier::Small)
        .implementation(
            "Vec",
            fixture(
                |n| (1..=n as u64).collect::<Vec<_>>(),
                |v: &mut Vec<u64>, _| v.insert(0, random()),
                drop,
            ),
        )
        .implementation(
            "VecDeque",
            fixture(
                |n| (1..=n as u64).collect::<VecDeque<_>>(),
                |q: &mut VecDeque<u64>, _| q.push_front(random()),
                drop,
            ),
        )
        .implementation(
            "LinkedList",
            fixture(filled::<LinkedList<u64>>, |l: &mut LinkedList<u64>, _| l.push_front(random()), drop),
        )
}

fn sequence_push() -> Task {
    Task::new("Sequence::push", Strategy::Incremental, SizeTier::Small)
        .implementation(
            "Vec",
            fixture(|_| Vec::new(), |v: &mut Vec<u64>, _| v.push(random()), drop),
        )
        .implementation(
            "VecDeque",
            fixture(|_| VecDeque::new(), |q: &mut VecDeque<u64>, _| q.push_back(random()), drop),
        )
        .implementation(
            "LinkedList",
            fixture(|_| LinkedList::new(), |l: &mut LinkedList<u64>, _| l.push_back(random()), drop),
        )
}

fn sequence_push_allocated() -> Task {
    Task::new("Sequence::push (allocated)", Strategy::Incremental, SizeTier::Small)
        .implementation(
            "Vec",
            fixture(Vec::with_capacity, |v: &mut Vec<u64>, _| v.push(random()), drop),
        )
        .implementation(
            "VecDeque",
            fixture(VecDeque::with_capacity, |q: &mut VecDeque<u64>, _| q.push_back(random()), drop),
        )
}

fn sequence_pop() -> Task {
    Task::new("Sequence::pop", Strategy::Incremental, SizeTier::Small)
        .implementation(
            "Vec",
            fixture(
                |n| (1..=n as u64).collect::<Vec<_>>(),
                |v: &mut Vec<u64>, _| v.pop(),
                drop,
            ),
        )
        .implementation(
            "VecDeque",
            fixture(
                |n| (1..=n as u64).collect::<VecDeque<_>>(),
                |q: &mut VecDeque<u64>, _| q.pop_back(),
                drop,
            ),
        )
        .implementation(
            "LinkedList",
            fixture(filled::<LinkedList<u64>>, |l: &mut LinkedList<u64>, _| l.pop_back(), drop),
        )
}

fn main() -> anyhow::Result<()> {
    scalebench::init_logging(false);

    let mut catalog: Catalog = [
        stack_pop(),
        priority_queue_push(),
        map_put(),
        map_remove(),
        dedup(),
        set_add(),
        sequence_unshift(),
        sequence_push(),
        sequence_push_allocated(),
        sequence_pop(),
    ]
    .into_iter()
    .map(|task| task.samples(32).trials(5))
    .collect();

    let report = scalebench::run(&mut catalog)?;

    for set in &report.sample_sets {
        println!("\n{} [{}]", set.task(), set.implementation());
        for point in set.points() {
            match &point.outcome {
                SampleOutcome::Measured(m) => {
                    println!("  {:>8}  {:>10.1} ns/op  ({} failed)", point.size, m.mean_ns, m.failures)
                }
                SampleOutcome::Failed(f) => println!("  {:>8}  gap: {}", point.size, f.message),
            }
        }
    }

    println!(
        "\n{} sample sets, {} gaps in {:.0} ms",
        report.summary.sample_sets, report.summary.failed_points, report.summary.total_duration_ms
    );
    Ok(())
}
