//! Delegated Properties Demonstration
//!
//! Each demonstration is independent; pick one with `--only` or run them all.
//!
//! Run with: cargo run --example delegates_demo -- [--only observable]
//! Log level: RUST_LOG=delegates=debug

use anyhow::Result;
use clap::{Parser, ValueEnum};
use delegates::{
    FnDelegate, Lazy, LateInit, MapBacked, Observable, Property, PropertyError, Vetoable,
    starts_uppercase,
};
use indexmap::IndexMap;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    Observable,
    Lazy,
    Custom,
    LateInit,
    Map,
}

/// Show lazy, observable, vetoable and custom delegated properties.
#[derive(Parser)]
#[command(name = "delegates_demo")]
struct Args {
    /// Run only this demonstration.
    #[arg(long, value_enum)]
    only: Option<Demo>,
}

type NameObserver = fn(&String, &String);
type SurnameRule = fn(&String, &String) -> bool;

/// A user whose name is observed and whose surname must start uppercase.
struct User {
    name: Property<Observable<String, NameObserver>>,
    surname: Property<Vetoable<String, SurnameRule>>,
}

impl User {
    fn new() -> Self {
        Self {
            name: Property::new(
                "name",
                Observable::new("<no name>".to_string(), |old, new| println!("  {old} -> {new}")),
            ),
            surname: Property::new(
                "surname",
                Vetoable::new("<no surname>".to_string(), |_, new| starts_uppercase(new)),
            ),
        }
    }
}

fn observable_demo() -> Result<()> {
    println!("Observable and vetoable properties:");
    let mut user = User::new();
    println!("  name = {}", user.name.get()?);
    user.name.set("Larissa".to_string())?;

    user.surname.set("gulin".to_string())?;
    println!("  after 'gulin': surname = {}", user.surname.get()?);
    user.surname.set("Gulin".to_string())?;
    println!("  after 'Gulin': surname = {}", user.surname.get()?);
    Ok(())
}

static LAZY_VALUE: Lazy<String> = Lazy::new(|| {
    println!("  computed!");
    "Hello".to_string()
});

fn lazy_demo() {
    println!("Lazy property (initializer runs once):");
    println!("  {}", LAZY_VALUE.get());
    println!("  {}", LAZY_VALUE.get());
}

fn custom_demo() -> Result<()> {
    println!("Custom delegate:");
    let mut p = Property::new(
        "p",
        FnDelegate::new(
            |name: &str| format!("Example, thank you for delegating '{name}' to me!"),
            |name: &str, value: String| println!("  {value} has been assigned to '{name}' in Example."),
        ),
    );
    println!("  {}", p.get()?);
    p.set("Teste".to_string())?;
    Ok(())
}

fn late_init_demo() -> Result<()> {
    println!("Late-initialized property:");
    let mut token = Property::new("token", LateInit::<String>::new());
    match token.get() {
        Err(err @ PropertyError::Uninitialized { .. }) => println!("  {err}"),
        other => println!("  unexpected: {other:?}"),
    }
    token.set("s3cr3t".to_string())?;
    println!("  token = {}", token.get()?);
    Ok(())
}

fn map_demo() -> Result<()> {
    println!("Map-backed properties:");
    let fields: IndexMap<String, String> = [
        ("name".to_string(), "John Doe".to_string()),
        ("age".to_string(), "25".to_string()),
    ]
    .into_iter()
    .collect();

    let name = Property::new("name", MapBacked::new(&fields));
    let age = Property::new("age", MapBacked::new(&fields));
    println!("  name = {}, age = {}", name.get()?, age.get()?);

    let email = Property::new("email", MapBacked::new(&fields));
    if let Err(err) = email.get() {
        println!("  {err}");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let run = |demo: Demo| args.only.is_none_or(|only| only == demo);

    if run(Demo::Observable) {
        observable_demo()?;
    }
    if run(Demo::Lazy) {
        lazy_demo();
    }
    if run(Demo::Custom) {
        custom_demo()?;
    }
    if run(Demo::LateInit) {
        late_init_demo()?;
    }
    if run(Demo::Map) {
        map_demo()?;
    }
    Ok(())
}
