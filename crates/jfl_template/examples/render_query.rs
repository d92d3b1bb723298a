//! Renders a few templates with debug logging enabled.
//!
//! Run with `RUST_LOG=jfl_template=trace` to see every replaced token.

use anyhow::Result;
use jfl_template::{record, EngineConfig, Interpolator, WithVar};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("jfl_template=debug".parse()?)
                .add_directive("warn".parse()?),
        )
        .try_init()?;

    let query = "select * from {TableName} where id >= {Id};"
        .with_var(&record! { TableName: "Foo", Id: 10 })?;
    println!("{query}");

    let count = 10;
    let message = "{count:00000} Rows Deleted!".with_var(&record! { count })?;
    println!("{message}");

    let legacy = Interpolator::new(EngineConfig::legacy());
    let partial = legacy.interpolate("[{a}] [{b:N1}]", &record! { a: None::<i32>, b: 1234.56 })?;
    println!("{partial}");

    Ok(())
}
