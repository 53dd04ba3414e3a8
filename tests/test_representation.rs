use std::sync::Arc;

use encoding_ga::{
    chromosome::Chromosome,
    locality::{neighbor_locality, rothlauf_locality, single_bit_locality},
    representation::{generators, hypercube, Bitstring, Interval},
    rng::RandomNumberGenerator,
};

#[test]
fn test_encodings_share_domain_but_differ_in_locality() {
    let domain = Interval::integers(5).unwrap();
    let binary = generators::binary(&domain).unwrap();
    let gray = generators::reflected_gray(&domain).unwrap();
    let ngg = hypercube::non_greedy_gray(&domain).unwrap();

    for rep in [&binary, &gray, &ngg] {
        assert_eq!(rep.len(), 32);
        assert!(rep.is_complete());
        for x in 0..32 {
            let code = rep.to_bitstring(x as f64).unwrap();
            assert_eq!(rep.to_number(&code).unwrap(), x as f64);
        }
    }

    assert_eq!(neighbor_locality(&gray), 0);
    assert_eq!(neighbor_locality(&ngg), 0);
    assert!(single_bit_locality(&ngg) > single_bit_locality(&gray));
    assert!(rothlauf_locality(&ngg) > rothlauf_locality(&gray));
}

#[test]
fn test_real_interval_with_unused_codewords() {
    let domain = Interval::new(-1.28, 1.28, 0.01).unwrap();
    let rep = generators::reflected_gray(&domain).unwrap();
    assert_eq!(rep.num_bits(), 9);
    assert_eq!(rep.len(), 257);
    assert!(!rep.is_complete());
    assert!(rep.is_valid(-1.28));
    assert!(rep.is_valid(0.37));
    assert!(!rep.is_valid(1.29));

    // The last codeword of the sequence is never assigned.
    let unused = Bitstring::new(1 << 8, 9).unwrap();
    assert!(!rep.is_valid(unused));
}

#[test]
fn test_chromosomes_stay_valid_under_search_operators() {
    let domain = Interval::new(-1.28, 1.28, 0.01).unwrap();
    let rep = Arc::new(hypercube::non_greedy_gray(&domain).unwrap());
    let mut rng = RandomNumberGenerator::from_seed(99);

    let mut parents: Vec<Chromosome> = (0..10)
        .map(|_| Chromosome::random(rep.clone(), 30, &mut rng).unwrap())
        .collect();
    for _ in 0..20 {
        let mut next = Vec::with_capacity(parents.len());
        for pair in parents.chunks(2) {
            let (mut a, mut b) = pair[0].crossover(&pair[1], &mut rng).unwrap();
            a.mutate(&mut rng).unwrap();
            b.mutate(&mut rng).unwrap();
            next.push(a);
            next.push(b);
        }
        parents = next;
    }
    for chrom in &parents {
        assert!(chrom.is_valid());
        let values = chrom.decode().unwrap();
        assert_eq!(values.len(), 30);
        assert!(values.iter().all(|v| (-1.28..=1.28).contains(v)));
    }
}
