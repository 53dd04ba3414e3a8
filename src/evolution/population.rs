//! Individuals carry an identity handed out by an [`IdArena`]. Fitness is cached
//! per identity, so two members with identical genes keep separate entries and the
//! launcher can tell whether the two tournament winners are the same individual.

use std::collections::HashMap;
use std::fmt;

use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::evolution::options::Objective;
use crate::evolution::TestFunction;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChromosomeId(u64);

impl ChromosomeId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChromosomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out identities that are never reused within one run.
#[derive(Debug, Default)]
pub struct IdArena {
    next: u64,
}

impl IdArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> ChromosomeId {
        let id = ChromosomeId(self.next);
        self.next += 1;
        id
    }

    /// Number of identities handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

#[derive(Debug, Clone)]
pub struct Individual {
    pub id: ChromosomeId,
    pub chromosome: Chromosome,
}

/// One generation: the members and the fitness of each.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Individual>,
    fitness: HashMap<ChromosomeId, f64>,
}

impl Population {
    /// Wraps chromosomes, giving each a fresh identity from `arena`.
    pub fn from_chromosomes<I>(chromosomes: I, arena: &mut IdArena) -> Self
    where
        I: IntoIterator<Item = Chromosome>,
    {
        let members = chromosomes
            .into_iter()
            .map(|chromosome| Individual {
                id: arena.allocate(),
                chromosome,
            })
            .collect();
        Self {
            members,
            fitness: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.members.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.members.iter()
    }

    /// Scores every member that has no cached fitness yet.
    ///
    /// Non-finite scores are rejected; they would poison both selection and the
    /// running best.
    pub fn evaluate<F>(&mut self, function: &F) -> Result<()>
    where
        F: TestFunction + ?Sized,
    {
        for member in &self.members {
            if self.fitness.contains_key(&member.id) {
                continue;
            }
            let value = member.chromosome.evaluate_fitness(function)?;
            if !value.is_finite() {
                return Err(GeneticError::FitnessCalculation(format!(
                    "{} returned {} for {}",
                    function.name(),
                    value,
                    member.chromosome
                )));
            }
            self.fitness.insert(member.id, value);
        }
        Ok(())
    }

    pub fn fitness_of(&self, id: ChromosomeId) -> Option<f64> {
        self.fitness.get(&id).copied()
    }

    /// Fitness of the member at `index`, failing if it was never evaluated.
    pub fn fitness_at(&self, index: usize) -> Result<f64> {
        let member = self.members.get(index).ok_or_else(|| {
            GeneticError::Configuration(format!(
                "index {} out of bounds for a population of {}",
                index,
                self.members.len()
            ))
        })?;
        self.fitness_of(member.id).ok_or_else(|| {
            GeneticError::FitnessCalculation(format!("{} has not been evaluated", member.id))
        })
    }

    /// The best member under `objective`. Ties go to the earliest member.
    pub fn fittest(&self, objective: Objective) -> Result<(&Individual, f64)> {
        let mut best: Option<(&Individual, f64)> = None;
        for (index, member) in self.members.iter().enumerate() {
            let value = self.fitness_at(index)?;
            match best {
                Some((_, incumbent)) if !objective.is_better(value, incumbent) => {}
                _ => best = Some((member, value)),
            }
        }
        best.ok_or(GeneticError::EmptyPopulation)
    }
}
