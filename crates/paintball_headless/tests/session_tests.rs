//! Interpreter sessions driven from bundled scenario files.

use std::path::PathBuf;

use paintball_headless::{Scenario, Session};

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn run(scenario: &Scenario, input: &str) -> String {
    let mut session = Session::new(input.as_bytes(), Vec::new())
        .with_setup(scenario.setup.clone())
        .unwrap();
    session.run().unwrap();
    String::from_utf8(session.into_output()).unwrap()
}

#[test]
fn corners_scenario_loads() {
    let scenario = Scenario::load(scenario_path("corners.ron")).unwrap();
    assert_eq!(scenario.name, "Corners");
    assert_eq!(scenario.setup.bunkers.len(), 3);
    assert_eq!(scenario.setup.teams.len(), 2);
}

#[test]
fn corners_red_sweep_takes_everything() {
    let scenario = Scenario::load(scenario_path("corners.ron")).unwrap();
    let out = run(&scenario, "create red home\ncreate red away\nattack\n");

    assert!(out.starts_with("reds> red player created in home\n"));
    assert!(out.contains("blues> red player created in away\n"));
    assert!(out.ends_with("Winner is reds.\n> "));
}

#[test]
fn corners_listing_after_a_few_turns() {
    let scenario = Scenario::load(scenario_path("corners.ron")).unwrap();
    let out = run(
        &scenario,
        "create green home\nattack\nbunkers\nplayers\nquit\n",
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "reds> green player created in home");
    // The blues attack with nobody and are shown their view of the field.
    assert_eq!(lines[1], "blues> 10 10");
    assert_eq!(
        &lines[lines.len() - 5..],
        &[
            "reds> 1 bunkers:",
            "home with 10 coins in position (1, 1)",
            "reds> 1 players:",
            "green player in position (1, 1)",
            "reds> Bye.",
        ]
    );
}

#[test]
fn four_corners_builtin_starts() {
    let scenario = Scenario::four_corners();
    let out = run(&scenario, "status\nquit\n");
    assert!(out.starts_with(&format!(
        "{}> {} {}\n",
        scenario.setup.teams[0].name, scenario.setup.width, scenario.setup.height
    )));
    assert!(out.ends_with("Bye.\n"));
}
