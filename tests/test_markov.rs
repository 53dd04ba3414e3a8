use encoding_ga::{
    functions::OneMax,
    markov::{
        annealed_absorption_probability, mean_first_passage_time, CoolingSchedule, MarkovChain,
    },
    representation::{generators, hypercube, Interval},
    rng::RandomNumberGenerator,
};

const WORST: [u64; 32] = [
    9, 26, 20, 13, 22, 14, 8, 21, 17, 3, 5, 19, 11, 25, 31, 6, 16, 4, 1, 30, 15, 23, 24, 7, 2, 27,
    29, 0, 18, 12, 10, 28,
];

#[test]
fn test_five_bit_one_max_comparison() {
    let domain = Interval::new(0.0, 31.0, 1.0).unwrap();
    let landscape = OneMax::new(31.0, 1);

    let binary = MarkovChain::hill_climbing(&generators::binary(&domain).unwrap(), &landscape).unwrap();
    binary.matrix().check_stochastic().unwrap();
    assert_eq!(binary.matrix().row(31)[31], 1.0);
    assert!(binary.matrix().row(31)[..31].iter().all(|&p| p == 0.0));

    let worst = generators::permutation(&WORST, "worst").unwrap();
    let trapped = MarkovChain::hill_climbing(&worst, &OneMax::new(15.0, 1)).unwrap();
    let p = trapped.long_run_absorption_probability(None, 1000).unwrap();
    assert!(p > 0.0 && p < 1.0);

    let ngg = hypercube::non_greedy_gray(&domain).unwrap();
    let chain = MarkovChain::hill_climbing(&ngg, &landscape).unwrap();
    chain.matrix().check_stochastic().unwrap();
    let p_ngg = chain.long_run_absorption_probability(None, 1000).unwrap();
    assert!(p_ngg > 0.0 && p_ngg <= 1.0 + 1e-9);
}

#[test]
fn test_annealing_rescues_trapped_searches_on_average() {
    let worst = generators::permutation(&WORST, "worst").unwrap();
    let landscape = OneMax::new(31.0, 1);
    let hill = MarkovChain::hill_climbing(&worst, &landscape)
        .unwrap()
        .long_run_absorption_probability(None, 1000)
        .unwrap();
    let annealed =
        annealed_absorption_probability(&worst, &landscape, &CoolingSchedule::default(), 300, None)
            .unwrap();
    assert!(annealed > hill, "{} <= {}", annealed, hill);
}

#[test]
fn test_passage_time_of_one_plus_one_strategy() {
    let rep = generators::binary(&Interval::integers(5).unwrap()).unwrap();
    let chain = MarkovChain::bitwise_mutation(&rep, &OneMax::new(31.0, 1)).unwrap();
    chain.matrix().check_stochastic().unwrap();

    let mut rng = RandomNumberGenerator::from_seed(12);
    let estimate =
        mean_first_passage_time(chain.matrix(), chain.optimum(), 500, 10_000, &mut rng).unwrap();
    assert_eq!(estimate.completed, 500);
    assert_eq!(estimate.censored, 0);
    let mean = estimate.mean.unwrap();
    assert!(mean >= 1.0 && mean < 100.0, "{}", mean);
}
