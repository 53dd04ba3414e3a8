use crate::error::{GeneticError, Result};

/// Best-so-far fitness per generation, labelled with the representation that
/// produced it. Generations are numbered from 1.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessTrace {
    pub label: String,
    pub points: Vec<(usize, f64)>,
}

impl FitnessTrace {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, generation: usize, best: f64) {
        self.points.push((generation, best));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fitness recorded for the last generation.
    pub fn last(&self) -> Option<f64> {
        self.points.last().map(|&(_, fitness)| fitness)
    }

    /// Point-wise mean of several runs. All traces must cover the same generations.
    pub fn average(traces: &[FitnessTrace], label: impl Into<String>) -> Result<FitnessTrace> {
        let first = traces.first().ok_or_else(|| {
            GeneticError::Configuration("cannot average zero fitness traces".to_string())
        })?;

        let mut sums: Vec<(usize, f64)> = first.points.iter().map(|&(g, _)| (g, 0.0)).collect();
        for trace in traces {
            if trace.points.len() != sums.len() {
                return Err(GeneticError::Configuration(format!(
                    "trace '{}' has {} points, expected {}",
                    trace.label,
                    trace.points.len(),
                    sums.len()
                )));
            }
            for (sum, &(generation, fitness)) in sums.iter_mut().zip(&trace.points) {
                if sum.0 != generation {
                    return Err(GeneticError::Configuration(format!(
                        "trace '{}' records generation {} where {} was expected",
                        trace.label, generation, sum.0
                    )));
                }
                sum.1 += fitness;
            }
        }

        let count = traces.len() as f64;
        Ok(FitnessTrace {
            label: label.into(),
            points: sums.into_iter().map(|(g, s)| (g, s / count)).collect(),
        })
    }
}
