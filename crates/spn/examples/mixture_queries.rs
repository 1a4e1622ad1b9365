//! Mixtures, Products and Exact Queries
//!
//! Run with: cargo run -p spn --example mixture_queries
//!
//! This example demonstrates:
//! - Building mixtures with scale and mix, and watching the weight budget
//! - Independent products over disjoint symbols
//! - Exact probabilities, conditioning and evaluation traces
//! - The errors an illegal combination produces

use spn::families::{bernoulli, choice, norm, poisson, rv_discrete};
use spn::{event, Engine, SpnError, Symbol, Term};

fn main() -> Result<(), SpnError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let engine = Engine::default();
    let x = Symbol::new("X");
    let y = Symbol::new("Y");

    println!("=== Sum-Product Networks: Exact Queries ===\n");

    // -------------------------------------------------------------------------
    // 1. The Weight Budget
    // -------------------------------------------------------------------------
    println!("1. The Weight Budget");
    println!("--------------------");

    let partial = engine.mix(
        engine.scale(0.3, bernoulli(0.1)?)?,
        engine.scale(0.5, norm(0.0, 1.0)?)?,
    )?;
    if let Term::Partial(m) = &partial {
        println!("After .3 and .5: partial, total = {:.2}", m.total());
    }

    let closed = engine.mix(partial, engine.scale(0.2, poisson(7.0)?)?)?;
    if let Term::Closed(m) = &closed {
        println!("After .2 more:   closed, weights = {:?}", m.weights());
    }
    println!();

    // -------------------------------------------------------------------------
    // 2. Binding and Querying
    // -------------------------------------------------------------------------
    println!("2. Binding and Querying");
    println!("-----------------------");

    let model = engine.bind(&closed, &x)?;
    println!("{}", model);
    for (label, e) in [
        ("P(X <= 0)", x.le(0.0)),
        ("P(X in {1})", x.is_in([1])),
        ("P(X > 5)", x.gt(5.0)),
    ] {
        println!("{:<12} = {:.6}", label, engine.probability(&model, &e)?);
    }
    println!();

    // -------------------------------------------------------------------------
    // 3. Independent Products
    // -------------------------------------------------------------------------
    println!("3. Independent Products");
    println!("-----------------------");

    let joint = engine.product(
        rv_discrete(&[1.0, 2.0, 10.0], &[0.3, 0.5, 0.2])?.on(&x)?,
        choice([("a", 0.1), ("b", 0.9)])?.on(&y)?,
    )?;
    let joint = engine.bind(&joint, &x)?;
    let both = event::logical_and([x.le(2.0), y.is_in(["b"])]);
    println!("{} : {:.6}", both, engine.probability(&joint, &both)?);
    println!();

    // -------------------------------------------------------------------------
    // 4. Conditioning and Traces
    // -------------------------------------------------------------------------
    println!("4. Conditioning and Traces");
    println!("--------------------------");

    let posterior = engine.condition(&model, &x.ge(0.0))?;
    println!(
        "P(X in {{1}} | X >= 0) = {:.6}",
        engine.probability(&posterior, &x.is_in([1]))?
    );
    println!("{}", engine.explain(&model, &x.ge(0.0))?.display());

    // -------------------------------------------------------------------------
    // 5. Illegal Combinations
    // -------------------------------------------------------------------------
    println!("5. Illegal Combinations");
    println!("-----------------------");

    let overweight = engine.mix(
        engine.scale(0.8, norm(0.0, 1.0)?)?,
        engine.scale(0.3, norm(1.0, 1.0)?)?,
    );
    println!("mix(.8, .3):      {:?}", overweight.err());

    let incomplete = engine.mix(
        engine.scale(0.1, bernoulli(0.1)?)?,
        engine.scale(0.7, poisson(8.0)?)?,
    )?;
    println!("bind(.1 | .7):    {:?}", engine.bind(&incomplete, &x).err());

    let crossing = event::logical_or([x.le(1.0), y.is_in(["a"])]);
    println!("P(X<=1 or Y=a):   {:?}", engine.probability(&joint, &crossing).err());

    Ok(())
}
