//! Lazy Sequences Demonstration
//!
//! Each demonstration is independent; pick one with `--only` or run them all.
//!
//! Run with: cargo run --example sequences_demo -- [--only laziness]
//! Log level: RUST_LOG=sequences=trace

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use sequences::{Sequence, SequenceError, TrySequence, as_sequence, generate_sequence, sequence_of};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    Words,
    Drop,
    Shuffle,
    FlatMap,
    PlusMinus,
    WithIndex,
    Aggregates,
    Average,
    FilterFirst,
    Laziness,
    Order,
    Take,
    Odd,
    Fibonacci,
    OnceOnly,
    Fallible,
}

/// Show lazy sequence sources, stages and terminal operations.
#[derive(Parser)]
#[command(name = "sequences_demo")]
struct Args {
    /// Run only this demonstration.
    #[arg(long, value_enum)]
    only: Option<Demo>,

    /// Seed for the shuffle demonstration.
    #[arg(long, default_value_t = 2024)]
    seed: u64,
}

#[derive(Debug, Clone)]
struct Person {
    name: &'static str,
    age: u32,
}

fn persons() -> Vec<Person> {
    vec![
        Person { name: "Peter", age: 16 },
        Person { name: "Anna", age: 28 },
        Person { name: "Anna", age: 23 },
        Person { name: "Sonya", age: 39 },
    ]
}

fn words_demo() {
    println!("Lengths of first 4 words longer than 3 chars:");
    let words = sequence_of("The quick brown fox jumps over the lazy dog".split(' '));
    let lengths = words
        .filter(|w| {
            println!("  filter: {w}");
            w.len() > 3
        })
        .map(|w| {
            println!("  length: {}", w.len());
            w.len()
        })
        .take(4);
    println!("  {:?}", lengths.to_list());
}

fn drop_demo() {
    println!("Drop:");
    println!("  {:?}", sequence_of([1, 2, 3, 4, 5]).drop(1).to_list());
}

fn shuffle_demo(seed: u64) {
    println!("Shuffle (seed {seed}):");
    println!("  {:?}", sequence_of([1, 2, 3, 4, 5]).shuffled(seed).to_list());
}

fn flat_map_demo() {
    println!("Flat map:");
    let nested = sequence_of([vec![1, 2, 3, 4], vec![4, 5, 6]]);
    println!("  {:?}", nested.flat_map(|v| v).to_list());
}

fn plus_minus_demo() {
    println!("Plus and minus:");
    let result = sequence_of(["a", "b", "c"])
        .plus("d")
        .minus("c")
        .map(str::to_uppercase)
        .to_list();
    println!("  {result:?}");
}

fn with_index_demo() {
    println!("Elements at even positions:");
    let result = sequence_of(["a", "b", "c", "d"])
        .with_index()
        .filter(|iv| iv.index % 2 == 0)
        .map(|iv| iv.value)
        .to_list();
    println!("  {result:?}");
}

fn aggregates_demo() {
    println!("Sort, distinct, max, group, associate, any:");
    let people = sequence_of(persons());
    println!("  sorted by age: {:?}", people.sorted_by(|p| p.age));
    println!("  distinct by name: {:?}", people.distinct_by(|p| p.name));
    println!("  oldest: {:?}", people.max_by(|p| p.age));
    println!("  grouped by name: {:?}", people.group_by(|p| p.name));
    println!("  associated by name: {:?}", people.associate_by(|p| p.name));

    let any = sequence_of([1, 2, 3, 4, 5])
        .filter(|x| x % 2 == 1)
        .any(|x| x % 3 == 0);
    println!("  any odd multiple of 3: {any}");
}

fn average_demo() {
    println!("Average of multiples of 3 below 1,000,000:");
    let naturals = generate_sequence(1u32, |&n| Some(n + 1)).take(999_999);
    match naturals.filter(|n| n % 3 == 0).average() {
        Some(avg) => println!("  {avg}"),
        None => println!("  (empty)"),
    }
}

fn filter_first_demo() {
    println!("Filter before map:");
    sequence_of(["a", "b", "c", "d"])
        .filter(|s| {
            println!("  filter: {s}");
            s.to_lowercase().starts_with('a')
        })
        .map(|s| {
            println!("  map: {s}");
            s.to_uppercase()
        })
        .for_each(|s| println!("  for_each: {s}"));
}

fn laziness_demo() {
    println!("Map runs only until any matches:");
    let found = sequence_of(["a", "b", "c"])
        .map(|s| {
            println!("  map: {s}");
            s.to_uppercase()
        })
        .any(|s| {
            println!("  any: {s}");
            s.starts_with('B')
        });
    println!("  found: {found}");
}

fn order_demo() {
    println!("Per-element processing order:");
    sequence_of(1..=9)
        .filter(|&x| {
            if x <= 5 {
                println!("  filter:{x}");
                return true;
            }
            false
        })
        .for_each(|x| println!("  {x}"));
}

fn take_demo() {
    println!("First five odd numbers from 7:");
    generate_sequence(7, |&n| Some(n + 2))
        .take(5)
        .for_each(|n| println!("  {n}"));
}

fn odd_demo() {
    println!("Odd numbers from 1 to 100:");
    let odds = generate_sequence(1, |&n| (n + 2 <= 100).then_some(n + 2));
    println!("  {}", odds.join_to_string(" "));
}

fn fibonacci_demo() {
    println!("Fibonacci:");
    let pairs = generate_sequence((0u64, 1u64), |&(a, b)| Some((b, a + b)));
    println!("  {:?}", pairs.take(10).to_list());
}

fn once_only_demo() -> Result<()> {
    println!("One-shot sequence:");
    let lines = as_sequence("alpha\nbeta\ngamma".lines());
    println!("  first pass: {:?}", lines.to_list());
    println!("  second pass: {:?}", lines.to_list());
    match lines.try_iter() {
        Err(SequenceError::AlreadyConsumed) => println!("  try_iter: {}", SequenceError::AlreadyConsumed),
        Ok(_) => bail!("one-shot sequence was consumed twice"),
    }
    Ok(())
}

fn fallible_demo() {
    println!("Fallible stage:");
    let parsed = sequence_of(["1", "2", "x", "4"]).map(|s| s.parse::<i32>());
    match parsed.try_to_list() {
        Ok(values) => println!("  parsed: {values:?}"),
        Err(err) => println!("  stopped at first error: {err}"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let run = |demo: Demo| args.only.is_none_or(|only| only == demo);

    if run(Demo::Words) {
        words_demo();
    }
    if run(Demo::Drop) {
        drop_demo();
    }
    if run(Demo::Shuffle) {
        shuffle_demo(args.seed);
    }
    if run(Demo::FlatMap) {
        flat_map_demo();
    }
    if run(Demo::PlusMinus) {
        plus_minus_demo();
    }
    if run(Demo::WithIndex) {
        with_index_demo();
    }
    if run(Demo::Aggregates) {
        aggregates_demo();
    }
    if run(Demo::Average) {
        average_demo();
    }
    if run(Demo::FilterFirst) {
        filter_first_demo();
    }
    if run(Demo::Laziness) {
        laziness_demo();
    }
    if run(Demo::Order) {
        order_demo();
    }
    if run(Demo::Take) {
        take_demo();
    }
    if run(Demo::Odd) {
        odd_demo();
    }
    if run(Demo::Fibonacci) {
        fibonacci_demo();
    }
    if run(Demo::OnceOnly) {
        once_only_demo()?;
    }
    if run(Demo::Fallible) {
        fallible_demo();
    }
    Ok(())
}
