use std::fs;

use elevator::local_elevator::fsm::elevatorfsm::MovementStatus;
use elevator::network::protocol;
use elevator::request_file::{batch, loader};
use elevator::util::config::Config;

#[test]
fn batch_file_runs_to_completion() {
    let path = std::env::temp_dir().join(format!("elevator-batch-{}.txt", std::process::id()));
    fs::write(&path, "# step boarding target\n1 3 7\n2 6 2\n").expect("write input");

    let requests = loader::load(&path).expect("load");
    fs::remove_file(&path).ok();
    assert_eq!(requests.len(), 2);

    let mut out = Vec::new();
    let summary = batch::run(&Config::default(), requests, &mut out).expect("run");
    assert!(summary.drained);

    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len() as u64, summary.ticks * 5);

    let frames: Vec<_> = lines
        .chunks(5)
        .map(|frame| protocol::decode_snapshot(frame).expect("decode"))
        .collect();
    let stops: Vec<i32> = frames
        .windows(2)
        .filter(|w| w[1].status == MovementStatus::Stopped && w[0].status != MovementStatus::Stopped)
        .map(|w| w[1].floor)
        .collect();
    assert_eq!(stops, vec![3, 7, 6, 2]);
    assert!(frames.iter().all(|f| f.floor >= 1 && f.floor <= 10));
}

#[test]
fn missing_input_file_is_an_error() {
    assert!(loader::load("/nonexistent/elevator/input.txt").is_err());
}
