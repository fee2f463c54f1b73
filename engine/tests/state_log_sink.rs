use std::fs;

use engine::{builtins, Boat, Environment, Manager, SimOptions};

#[test]
fn log_records_init_and_both_step_phases() {
    let path = std::env::temp_dir().join(format!(
        "engine-state-log-{}.jsonl",
        std::process::id()
    ));

    {
        let (config, foils) = builtins::dinghy();
        let mut env = builtins::steady_breeze_env();
        env.wind_gust_probability = 0.0;
        let options = SimOptions {
            state_log: Some(path.clone()),
            ..SimOptions::default()
        };
        let mut manager = Manager::new(
            Boat::new(config, foils),
            Environment::with_seed(env, 5),
            options,
        );
        for _ in 0..3 {
            manager.step(&[-20.0, 5.0]).unwrap();
        }
    }

    let text = fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    // One init record plus a pre/post pair per step.
    assert_eq!(records.len(), 1 + 3 * 2);
    assert_eq!(records[0]["phase"], "init");
    assert_eq!(records[0]["step"], 0);
    assert_eq!(records[1]["phase"], "pre-step");
    assert_eq!(records[2]["phase"], "post-step");
    assert_eq!(records[5]["step"], 2);
    assert!(records[2]["state"]["heading"].is_number());
    assert!(records[2]["force_components"]["sail"].is_array());
    assert!(records[2]["timestamp"].as_f64().unwrap() > 0.0);

    fs::remove_file(&path).ok();
}
