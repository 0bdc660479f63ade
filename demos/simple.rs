/// Run this example with cargo run --example simple
/// Set RUST_LOG=scored_skiplist=trace to watch the height change.
use scored_skiplist::{SkipList, SkipListOptions};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut sk = SkipList::new();
    sk.add(10, "tom");
    sk.add(20, "charles");
    sk.add(15, "robert");
    sk.add(10, "candy");

    // print the skiplist, one line per level
    println!("{:?}", sk);
    println!("{}", sk);

    // len counts scores, not values
    dbg!(sk.len());
    dbg!(sk.get_all(false));
    dbg!(sk.get_all(true));
    dbg!(sk.get_by_score(10));
    dbg!(sk.get_by_range(11, 20));

    if sk.get_by_score(99).is_empty() {
        println!("Nothing scored 99");
    }

    // Pop from both ends
    dbg!(sk.remove_first());
    dbg!(sk.remove_back());
    dbg!(sk.len(), sk.is_empty());

    // A seeded list always builds the same towers
    let mut sk = SkipListOptions::new()
        .max_level(8)
        .seed(2024)
        .build()
        .expect("valid options");
    sk.extend((0..1000).map(|i| (i % 250, i)));
    println!("{}", sk);
    dbg!(sk.range(100, 102).collect::<Vec<_>>());
}
