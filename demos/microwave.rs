//! Microwave simulation: every state change is confirmed by a dummy
//! server before the machine commits it.
//!
//! Run with: cargo run --example microwave

use stategate::{BoxError, Machine, State};
use std::time::Duration;
use tokio::time::sleep;

async fn server_request(requested: &'static str) -> Result<(), BoxError> {
    // Pretend the server takes a moment to respond with 200 OK.
    sleep(Duration::from_millis(200)).await;
    println!("server acknowledged '{requested}'");
    Ok(())
}

#[tokio::main]
async fn main() {
    let mut machine = Machine::builder("microwave")
        .state(
            State::new("off")
                .allow_from(["running"])
                .on_before_enter(|_prev: &str| server_request("off")),
        )
        .state(
            State::new("on")
                .allow_from(["off"])
                .on_before_enter(|_prev: &str| server_request("on")),
        )
        .state(
            State::new("running")
                .allow_from(["on"])
                .on_before_enter(|_prev: &str| server_request("running")),
        )
        .build()
        .unwrap();

    machine.start_at("off").unwrap();
    println!("starting in '{}'", machine.state().unwrap().name());

    for target in ["on", "running", "off"] {
        let state = machine.transition(target).await.unwrap();
        println!("entered state '{}'", state.name());
    }

    // There is no route from 'off' straight to 'running'.
    match machine.transition("running").await {
        Ok(state) => println!("entered state '{}'", state.name()),
        Err(err) => println!("failed transition: {err}"),
    }

    println!("visited: {:?}", machine.log().path());
}
