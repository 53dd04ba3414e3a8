#![cfg(feature = "serde")]

use encoding_ga::{
    evolution::{EvolutionOptions, LogLevel, Objective},
    markov::CoolingSchedule,
    Bitstring, FitnessTrace, Interval,
};

#[test]
fn test_trace_survives_json() {
    let mut trace = FitnessTrace::new("reflected gray");
    trace.push(1, 12.5);
    trace.push(2, 3.25);

    let json = serde_json::to_string(&trace).unwrap();
    let restored: FitnessTrace = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, trace);
    assert_eq!(restored.last(), Some(3.25));
}

#[test]
fn test_domain_types_survive_json() {
    let code: Bitstring = "01101".parse().unwrap();
    let restored: Bitstring = serde_json::from_str(&serde_json::to_string(&code).unwrap()).unwrap();
    assert_eq!(restored, code);
    assert_eq!(restored.to_string(), "01101");

    let domain = Interval::new(-5.12, 5.12, 0.01).unwrap();
    let restored: Interval = serde_json::from_str(&serde_json::to_string(&domain).unwrap()).unwrap();
    assert_eq!(restored, domain);

    let schedule = CoolingSchedule::default();
    let restored: CoolingSchedule =
        serde_json::from_str(&serde_json::to_string(&schedule).unwrap()).unwrap();
    assert_eq!(restored, schedule);
}

#[test]
fn test_options_survive_json() {
    let options = EvolutionOptions::builder()
        .num_generations(250)
        .population_size(40)
        .mutation_rate(0.1)
        .crossover_rate(0.9)
        .tournament_size(3)
        .objective(Objective::Maximize)
        .log_level(LogLevel::Minimal)
        .build();

    let json = serde_json::to_string(&options).unwrap();
    let restored: EvolutionOptions = serde_json::from_str(&json).unwrap();
    assert!(restored.validate().is_ok());
    assert_eq!(restored.get_num_generations(), 250);
    assert_eq!(restored.get_population_size(), 40);
    assert_eq!(restored.get_mutation_rate(), 0.1);
    assert_eq!(restored.get_crossover_rate(), 0.9);
    assert_eq!(restored.get_tournament_size(), 3);
    assert_eq!(restored.get_objective(), Objective::Maximize);
    assert_eq!(*restored.get_log_level(), LogLevel::Minimal);
}
