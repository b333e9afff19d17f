//! Traffic lights that pre-empt state changes locally and let a server
//! merely record them.
//!
//! Run with: cargo run --example traffic_light

use stategate::{transitions, BoxError, Machine, State};
use std::time::Duration;
use tokio::time::sleep;

async fn save_on_server(colour: &'static str) -> Result<(), BoxError> {
    sleep(Duration::from_millis(100)).await;
    println!("server saved '{colour}'");
    Ok(())
}

#[tokio::main]
async fn main() {
    let mut machine = Machine::builder("traffic-lights")
        .states([
            State::new("red")
                .on_before_enter(|_prev: &str| save_on_server("red"))
                .on_enter(|| {
                    println!("cars stop");
                    Ok(())
                }),
            State::new("green")
                .on_before_enter(|_prev: &str| save_on_server("green"))
                .on_enter(|| {
                    println!("cars go");
                    Ok(())
                }),
            State::new("orange")
                .on_before_enter(|_prev: &str| save_on_server("orange"))
                .on_enter(|| {
                    println!("cars slow down");
                    Ok(())
                }),
        ])
        .transitions(transitions! {
            "red" => "green",
            "green" => "orange",
            "orange" => "red",
        })
        .build()
        .unwrap();

    machine.start_at("red").unwrap();

    for colour in ["green", "orange", "red"] {
        machine.transition_to(colour).await.unwrap();
    }

    // A stop request only has an effect while the lights are green.
    match machine.transition_to("orange").await {
        Ok(state) => println!("stopping, now '{}'", state.name()),
        Err(err) => println!("stop request has no effect: {err}"),
    }

    machine.transition_to("green").await.unwrap();
    match machine.transition_to("orange").await {
        Ok(state) => println!("stopping, now '{}'", state.name()),
        Err(err) => println!("stop request has no effect: {err}"),
    }
}
